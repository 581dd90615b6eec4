//! The fixed command table.
//!
//! Each entry pairs a command name with the pattern its text must match
//! (after the prefix is removed) and the defaults for optional arguments.
//! Patterns are matched against the whole command text, case-sensitively.
//! Every command also answers to an emoji alias.

use super::CommandArgs;
use regex::Regex;
use std::collections::HashMap;

/// A command table entry.
#[derive(Debug, Clone, Copy)]
pub struct CommandEntry {
    /// Command name, also the handler lookup key.
    pub name: &'static str,
    /// Regular expression with named captures; implicitly anchored.
    pub pattern: &'static str,
    /// Values for captures that did not participate in the match.
    pub defaults: &'static [(&'static str, &'static str)],
}

impl CommandEntry {
    /// Compile this entry's pattern.
    pub fn compile(&self) -> Result<CommandPattern, regex::Error> {
        CommandPattern::new(self.pattern, self.defaults)
    }
}

/// All supported commands, in match priority order.
pub const COMMAND_TABLE: &[CommandEntry] = &[
    CommandEntry {
        name: "vod",
        pattern: "vod|📼",
        defaults: &[],
    },
    CommandEntry {
        name: "clip",
        pattern: "clip|🎬",
        defaults: &[],
    },
    CommandEntry {
        name: "lrrmc",
        pattern: r"(?:lrrmc|\x{26CF}\x{FE0F}?)(?: (?P<server>\w+))?",
        defaults: &[("server", "vanilla")],
    },
    CommandEntry {
        name: "lastfm",
        pattern: r"(?:last\.fm|🎵) (?P<user>[0-9A-Za-z_]+)",
        defaults: &[],
    },
    CommandEntry {
        name: "roll",
        pattern: r"(?:roll|🎲)(?: (?P<count>\d+)?d(?P<sides>\d+))?",
        defaults: &[],
    },
    CommandEntry {
        name: "bingo",
        pattern: "bingo|🎱",
        defaults: &[],
    },
    CommandEntry {
        name: "help",
        pattern: "help|🚑",
        defaults: &[],
    },
];

/// A compiled command pattern.
///
/// Identity is the source text; the compiled form is never mutated.
#[derive(Debug, Clone)]
pub struct CommandPattern {
    source: &'static str,
    regex: Regex,
    defaults: &'static [(&'static str, &'static str)],
}

impl CommandPattern {
    /// Compile `source`, anchoring the whole expression (alternations included).
    pub fn new(
        source: &'static str,
        defaults: &'static [(&'static str, &'static str)],
    ) -> Result<Self, regex::Error> {
        let regex = Regex::new(&format!("^(?:{source})$"))?;
        Ok(Self {
            source,
            regex,
            defaults,
        })
    }

    /// The pattern as written in the command table.
    pub fn as_str(&self) -> &'static str {
        self.source
    }

    /// Match the entire `text`, extracting named arguments.
    pub fn matches(&self, text: &str) -> Option<CommandArgs> {
        let captures = self.regex.captures(text)?;

        let mut args: HashMap<String, String> = self
            .regex
            .capture_names()
            .flatten()
            .filter_map(|name| {
                captures
                    .name(name)
                    .map(|m| (name.to_string(), m.as_str().to_string()))
            })
            .collect();

        for (name, value) in self.defaults {
            args.entry((*name).to_string())
                .or_insert_with(|| (*value).to_string());
        }

        Some(args.into_iter().collect())
    }
}

impl PartialEq for CommandPattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for CommandPattern {}
