//! Console formatting for turn outcomes

use neuroroute_domain::{CandidateSet, ParsedItem, TurnOutcome};

/// Formats turn outcomes for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Human-readable rendering of an outcome
    pub fn format(outcome: &TurnOutcome) -> String {
        match outcome {
            TurnOutcome::Decision(set) => Self::format_set(set),
            TurnOutcome::Ambiguous(options) => {
                let mut out = String::from(
                    "The request is ambiguous. Did you mean one of these?\n",
                );
                for (i, option) in options.iter().enumerate() {
                    out.push_str(&format!("\n[{}]\n", i + 1));
                    out.push_str(&Self::format_set(option));
                }
                out
            }
            TurnOutcome::Empty => {
                "No actionable command or answer could be produced. Try rephrasing.".to_string()
            }
        }
    }

    /// JSON rendering of an outcome
    pub fn format_json(outcome: &TurnOutcome) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(outcome)
    }

    fn format_set(set: &CandidateSet) -> String {
        let mut lines = Vec::new();
        for item in set.items() {
            match item {
                ParsedItem::Command { name, parameters } => {
                    let params = serde_json::to_string(parameters)
                        .unwrap_or_else(|_| "{}".to_string());
                    lines.push(format!("-> {} {}", name, params));
                }
                ParsedItem::Text { text } => lines.push(text.clone()),
            }
        }
        lines.join("\n")
    }
}
