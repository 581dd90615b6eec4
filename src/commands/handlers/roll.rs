//! `roll`: dice rolling, permanently disabled.
//!
//! The pattern still parses `[count]d<sides>` so malformed rolls stay
//! unrecognized, but the arguments are ignored and no dice are rolled.

use crate::commands::{Command, CommandArgs, CommandContext};
use crate::error::CommandResult;
use async_trait::async_trait;

pub const ROLL_REFUSAL: &str = "THIS is why we can't have nice things!";

/// Refuses every roll.
pub struct RollHandler;

#[async_trait]
impl Command for RollHandler {
    fn name(&self) -> &'static str {
        "roll"
    }

    async fn handle(&self, ctx: &CommandContext<'_>, _args: &CommandArgs) -> CommandResult {
        ctx.reply(ROLL_REFUSAL).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::run;

    #[tokio::test]
    async fn test_always_refuses() {
        let cases: &[&[(&str, &str)]] = &[
            &[],
            &[("sides", "6")],
            &[("count", "2"), ("sides", "6")],
            &[("count", "999999999999999999999"), ("sides", "0")],
        ];
        for args in cases {
            assert_eq!(run(&RollHandler, args).await, vec![ROLL_REFUSAL]);
        }
    }
}
