//! File-backed configuration schema.

use neuroroute_domain::{
    CommandGrammar, CommandSchema, DEFAULT_CHUNK_SIZE, DEFAULT_SCORE_FLOOR, DomainError,
    TopicPrompt, TopicTable, default_topics,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Router behavior settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterSettings {
    /// Sample one completion per matched topic and vote
    pub ensemble: bool,
    /// Augment prompts with reference-document chunks
    pub retrieval: bool,
    /// Ablation: replace similarity scoring with a uniform random pick
    pub no_prompt_selection: bool,
    /// Chunks returned per retrieval query
    pub top_k: usize,
    /// Reference-document chunk size in characters
    pub chunk_size: usize,
    /// Absolute similarity floor for topic selection
    pub score_floor: f32,
}

impl Default for RouterSettings {
    fn default() -> Self {
        Self {
            ensemble: true,
            retrieval: true,
            no_prompt_selection: false,
            top_k: 3,
            chunk_size: DEFAULT_CHUNK_SIZE,
            score_floor: DEFAULT_SCORE_FLOOR,
        }
    }
}

/// Ollama provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    pub host: String,
    pub embedding_model: String,
    pub completion_model: String,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            host: "http://localhost:11434".to_string(),
            embedding_model: "nomic-embed-text".to_string(),
            completion_model: "llama3.1".to_string(),
        }
    }
}

/// A topic prompt as declared in configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicConfig {
    pub label: String,
    pub text: String,
}

/// Complete file-backed configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub router: RouterSettings,
    pub provider: ProviderSettings,
    /// Ordered topic table; empty means "use the built-in EEG topics"
    pub topics: Vec<TopicConfig>,
    /// Command schemas keyed by name; empty means "use the built-in grammar"
    pub commands: BTreeMap<String, CommandSchema>,
}

impl FileConfig {
    /// Materialize the topic table, falling back to the built-in one.
    pub fn topic_table(&self) -> Result<TopicTable, DomainError> {
        if self.topics.is_empty() {
            return Ok(default_topics());
        }
        TopicTable::new(
            self.topics
                .iter()
                .map(|t| TopicPrompt::new(&t.label, &t.text))
                .collect(),
        )
    }

    /// Materialize the command grammar, falling back to the built-in one.
    pub fn command_grammar(&self) -> Result<CommandGrammar, DomainError> {
        if self.commands.is_empty() {
            return Ok(CommandGrammar::builtin());
        }
        CommandGrammar::new(self.commands.clone())
    }
}
