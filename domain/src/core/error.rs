//! Domain error types

use thiserror::Error;

/// Domain-level errors
///
/// The parser and the voter are total functions and never produce these;
/// domain errors only arise when static tables are constructed from invalid
/// configuration.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Duplicate command '{0}' in grammar")]
    DuplicateCommand(String),

    #[error("Topic table is empty")]
    EmptyTopicTable,

    #[error("Topic '{0}' has no prompt text")]
    EmptyTopicText(String),
}
