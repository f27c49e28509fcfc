//! Command extraction from raw completions.
//!
//! Completions are not guaranteed to be well-formed JSON, so extraction is
//! deliberately pattern-based rather than a standards-compliant parse: three
//! independent regex scans pull out `"command"`, `"parameters"` and `"text"`
//! fragments from anywhere in the text. A stricter parser would reject
//! valid-looking model output more often. The strategy is isolated behind
//! [`CommandParser`] so it can be swapped without touching the orchestrator.
//!
//! This component never fails: malformed input degrades to an empty or
//! partial [`CandidateSet`].

use super::grammar::CommandGrammar;
use super::item::{CandidateSet, ParsedItem};
use super::literal::parse_flat_dict;
use regex::Regex;
use std::sync::LazyLock;

static COMMAND_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""command"\s*:\s*"([^"]*)"|'command'\s*:\s*'([^']*)'"#)
        .expect("command pattern is valid")
});

// Single nesting level only: a nested object inside the block makes the
// fragment unmatchable, which fails just that command downstream.
static PARAMS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"["']parameters["']\s*:\s*\{([^{}]*)\}"#).expect("parameters pattern is valid")
});

static TEXT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""text"\s*:\s*"([^"]*)"|'text'\s*:\s*'([^']*)'"#)
        .expect("text pattern is valid")
});

/// Extracts validated commands and text responses from one completion
#[derive(Debug, Clone)]
pub struct CommandParser {
    grammar: CommandGrammar,
}

impl CommandParser {
    pub fn new(grammar: CommandGrammar) -> Self {
        Self { grammar }
    }

    pub fn grammar(&self) -> &CommandGrammar {
        &self.grammar
    }

    /// Parse one completion into a candidate set.
    ///
    /// The i-th extracted command name is paired positionally with the i-th
    /// extracted parameter block; a command beyond the last block gets an
    /// empty block, since a command may validly take no parameters. Commands
    /// that are unknown, whose block fails to evaluate, or whose parameters
    /// fail schema validation are dropped one at a time. Text responses are
    /// appended after all commands regardless of where they appeared.
    pub fn parse(&self, completion: &str) -> CandidateSet {
        let names: Vec<String> = COMMAND_RE
            .captures_iter(completion)
            .filter_map(|c| either_group(&c))
            .collect();

        let blocks: Vec<&str> = PARAMS_RE
            .captures_iter(completion)
            .filter_map(|c| c.get(1).map(|m| m.as_str()))
            .collect();

        let mut set = CandidateSet::default();

        for (i, name) in names.iter().enumerate() {
            let name = name.to_lowercase();
            let Some(schema) = self.grammar.get(&name) else {
                continue;
            };
            let Some(parameters) = parse_flat_dict(blocks.get(i).copied().unwrap_or("")) else {
                continue;
            };
            if schema.validate(&parameters) {
                set.push(ParsedItem::command(name, parameters));
            }
        }

        for captures in TEXT_RE.captures_iter(completion) {
            if let Some(text) = either_group(&captures) {
                set.push(ParsedItem::text(text));
            }
        }

        set
    }
}

/// First non-empty capture group of a two-alternative pattern.
fn either_group(captures: &regex::Captures<'_>) -> Option<String> {
    captures
        .get(1)
        .or_else(|| captures.get(2))
        .map(|m| m.as_str().to_string())
}
