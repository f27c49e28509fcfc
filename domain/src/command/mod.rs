//! Command extraction and validation.
//!
//! Completions are free text that may carry JSON-like command fragments; the
//! parser extracts whatever validates against the grammar and discards the
//! rest.

pub mod grammar;
pub mod item;
pub mod literal;
pub mod parser;
