//! `bingo` and `help`: static link posts.

use crate::commands::{Command, CommandArgs, CommandContext};
use crate::error::CommandResult;
use async_trait::async_trait;

pub const BINGO_URL: &str = "https://pump19.eu/bingo";
pub const COMMAND_URL: &str = "https://pump19.eu/commands";

/// Posts a link to the Trope Bingo cards.
pub struct BingoHandler;

#[async_trait]
impl Command for BingoHandler {
    fn name(&self) -> &'static str {
        "bingo"
    }

    async fn handle(&self, ctx: &CommandContext<'_>, _args: &CommandArgs) -> CommandResult {
        ctx.reply(&format!(
            "Check out {BINGO_URL} for our interactive Trope Bingo cards."
        ))
        .await
    }
}

/// Posts a link to the list of supported commands.
pub struct HelpHandler;

#[async_trait]
impl Command for HelpHandler {
    fn name(&self) -> &'static str {
        "help"
    }

    async fn handle(&self, ctx: &CommandContext<'_>, _args: &CommandArgs) -> CommandResult {
        ctx.reply(&format!(
            "Pump19 is run by Twisted Pear. Check {COMMAND_URL} for a list of supported commands."
        ))
        .await
    }
}
