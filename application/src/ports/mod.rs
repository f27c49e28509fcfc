//! Provider ports.
//!
//! The embedding and completion models are external collaborators; the
//! application layer only sees these two narrow contracts. Adapters live in
//! the infrastructure layer.

pub mod completion;
pub mod embedding;
pub mod gateway_error;
