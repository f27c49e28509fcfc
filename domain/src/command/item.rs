//! Parsed completion items.
//!
//! A [`CandidateSet`] is the parsed output of exactly one completion: zero
//! or more validated commands followed by any free-text responses. Items are
//! never mutated after creation.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One structured item extracted from a completion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ParsedItem {
    /// A validated tool invocation
    Command {
        name: String,
        parameters: Map<String, Value>,
    },
    /// A conversational answer with no command content
    #[serde(rename = "TextResponse")]
    Text { text: String },
}

impl ParsedItem {
    pub fn command(name: impl Into<String>, parameters: Map<String, Value>) -> Self {
        Self::Command {
            name: name.into(),
            parameters,
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn is_command(&self) -> bool {
        matches!(self, Self::Command { .. })
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text { .. })
    }

    /// Command name, if this item is a command
    pub fn command_name(&self) -> Option<&str> {
        match self {
            Self::Command { name, .. } => Some(name),
            Self::Text { .. } => None,
        }
    }
}

/// Ordered items parsed from one completion
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateSet(Vec<ParsedItem>);

impl CandidateSet {
    pub fn new(items: Vec<ParsedItem>) -> Self {
        Self(items)
    }

    pub fn push(&mut self, item: ParsedItem) {
        self.0.push(item);
    }

    pub fn items(&self) -> &[ParsedItem] {
        &self.0
    }

    pub fn into_items(self) -> Vec<ParsedItem> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The voting key: ordered command names only.
    ///
    /// Text items and parameter values are excluded, so two sets issuing the
    /// same commands in the same order share a signature even when their
    /// parameter values differ.
    pub fn signature(&self) -> Vec<String> {
        self.0
            .iter()
            .filter_map(|item| item.command_name().map(str::to_string))
            .collect()
    }

    /// Whether this set contains any text response
    pub fn has_text(&self) -> bool {
        self.0.iter().any(ParsedItem::is_text)
    }

    /// Whether every item in this set is a text response
    pub fn is_text_only(&self) -> bool {
        !self.0.is_empty() && self.0.iter().all(ParsedItem::is_text)
    }
}

impl IntoIterator for CandidateSet {
    type Item = ParsedItem;
    type IntoIter = std::vec::IntoIter<ParsedItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
