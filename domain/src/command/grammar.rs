//! Command grammar.
//!
//! A static schema mapping lowercased command names to their parameter
//! contract. Loaded once at startup as an explicit ordered table so the set
//! of commands stays statically enumerable and testable; never mutated at
//! runtime.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Parameter contract for a single command
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSchema {
    /// Keys that must all be present
    #[serde(default)]
    pub required: Vec<String>,
    /// Keys that may be present (documentation only, never enforced)
    #[serde(default)]
    pub optional: Vec<String>,
    /// If non-empty, at least one of these keys must be present
    #[serde(default)]
    pub at_least_one: Vec<String>,
}

impl CommandSchema {
    /// Check a flat parameter map against this contract.
    pub fn validate(&self, parameters: &Map<String, Value>) -> bool {
        if self
            .required
            .iter()
            .any(|key| !parameters.contains_key(key))
        {
            return false;
        }

        if !self.at_least_one.is_empty()
            && !self.at_least_one.iter().any(|key| parameters.contains_key(key))
        {
            return false;
        }

        true
    }
}

/// Ordered table of command schemas, keyed by lowercased name
#[derive(Debug, Clone, Default)]
pub struct CommandGrammar {
    entries: Vec<(String, CommandSchema)>,
}

impl CommandGrammar {
    /// Build a grammar from `(name, schema)` pairs.
    ///
    /// Names are lowercased; duplicates after lowercasing are rejected.
    pub fn new(
        entries: impl IntoIterator<Item = (String, CommandSchema)>,
    ) -> Result<Self, DomainError> {
        let mut grammar = Self::default();
        for (name, schema) in entries {
            let name = name.to_lowercase();
            if grammar.get(&name).is_some() {
                return Err(DomainError::DuplicateCommand(name));
            }
            grammar.entries.push((name, schema));
        }
        Ok(grammar)
    }

    /// Look up a schema by already-lowercased name.
    pub fn get(&self, name: &str) -> Option<&CommandSchema> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, schema)| schema)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CommandSchema)> {
        self.entries.iter().map(|(n, s)| (n.as_str(), s))
    }

    /// Built-in grammar for the EEG-analysis tool set.
    ///
    /// Used when the configuration does not override the command table.
    pub fn builtin() -> Self {
        fn schema(required: &[&str], optional: &[&str], at_least_one: &[&str]) -> CommandSchema {
            CommandSchema {
                required: required.iter().map(|s| s.to_string()).collect(),
                optional: optional.iter().map(|s| s.to_string()).collect(),
                at_least_one: at_least_one.iter().map(|s| s.to_string()).collect(),
            }
        }

        let entries = vec![
            (
                "import data".to_string(),
                schema(&["file_path", "data_type"], &["montage"], &[]),
            ),
            (
                "filtering".to_string(),
                schema(&[], &["notch"], &["l_freq", "h_freq"]),
            ),
            ("resample".to_string(), schema(&["sfreq"], &[], &[])),
            (
                "epoching".to_string(),
                schema(&["tmin", "tmax"], &["event_id", "baseline"], &[]),
            ),
            (
                "dataset splitting".to_string(),
                schema(
                    &["training_type", "testing_type", "validation_type"],
                    &["ratio"],
                    &[],
                ),
            ),
            (
                "model training".to_string(),
                schema(&["model"], &["epochs", "lr", "batch_size"], &[]),
            ),
            (
                "evaluation".to_string(),
                schema(&[], &["plot"], &["metric", "confusion_matrix"]),
            ),
            (
                "visualization".to_string(),
                schema(&["plot_type"], &["channel"], &[]),
            ),
        ];

        // Built-in names are distinct, so this cannot fail
        Self::new(entries).expect("builtin grammar is well-formed")
    }
}
