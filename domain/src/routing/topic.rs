//! Topic prompt table.
//!
//! A topic prompt is a static, human-authored block of domain instructions
//! (e.g. "Preprocessing", "Training"). The table is an explicit ordered
//! sequence fixed for the lifetime of the router; selection always preserves
//! the declared order so that composite instructions stay internally
//! consistent.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// A labeled block of domain instructions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicPrompt {
    pub label: String,
    pub text: String,
}

impl TopicPrompt {
    pub fn new(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            text: text.into(),
        }
    }

    /// Text embedded for similarity scoring: label and instructions together,
    /// so short queries can match on either.
    pub fn embedding_text(&self) -> String {
        format!("{}\n{}", self.label, self.text)
    }
}

/// Fixed ordered table of topic prompts
#[derive(Debug, Clone)]
pub struct TopicTable {
    topics: Vec<TopicPrompt>,
}

impl TopicTable {
    /// Build a table, validating that it is non-empty and that every topic
    /// carries prompt text.
    pub fn new(topics: Vec<TopicPrompt>) -> Result<Self, DomainError> {
        if topics.is_empty() {
            return Err(DomainError::EmptyTopicTable);
        }
        for topic in &topics {
            if topic.text.trim().is_empty() {
                return Err(DomainError::EmptyTopicText(topic.label.clone()));
            }
        }
        Ok(Self { topics })
    }

    pub fn len(&self) -> usize {
        self.topics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TopicPrompt> {
        self.topics.iter()
    }

    pub fn get(&self, index: usize) -> Option<&TopicPrompt> {
        self.topics.get(index)
    }

    /// Concatenate the texts of the given topic indices, in the order given.
    ///
    /// Callers pass indices in ascending table order; this method does not
    /// reorder them.
    pub fn concat_texts(&self, indices: &[usize]) -> String {
        let mut combined = String::new();
        for &i in indices {
            if let Some(topic) = self.topics.get(i) {
                if !combined.is_empty() {
                    combined.push('\n');
                }
                combined.push_str(&topic.text);
            }
        }
        combined
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> TopicTable {
        TopicTable::new(vec![
            TopicPrompt::new("Start", "start text"),
            TopicPrompt::new("Preprocessing", "preprocessing text"),
            TopicPrompt::new("Training", "training text"),
        ])
        .unwrap()
    }

    #[test]
    fn test_empty_table_rejected() {
        assert!(matches!(
            TopicTable::new(vec![]),
            Err(DomainError::EmptyTopicTable)
        ));
    }

    #[test]
    fn test_blank_topic_text_rejected() {
        let result = TopicTable::new(vec![TopicPrompt::new("Training", "  ")]);
        assert!(matches!(result, Err(DomainError::EmptyTopicText(_))));
    }

    #[test]
    fn test_concat_preserves_given_order() {
        let table = table();
        let combined = table.concat_texts(&[0, 2]);
        assert_eq!(combined, "start text\ntraining text");
    }

    #[test]
    fn test_concat_skips_out_of_range() {
        let table = table();
        assert_eq!(table.concat_texts(&[2, 9]), "training text");
    }

    #[test]
    fn test_embedding_text_includes_label() {
        let topic = TopicPrompt::new("Training", "train a model");
        assert_eq!(topic.embedding_text(), "Training\ntrain a model");
    }
}
