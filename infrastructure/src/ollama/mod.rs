//! Ollama provider adapters.
//!
//! Both adapters talk to a locally running Ollama instance over HTTP and
//! map transport failures into [`GatewayError`], which the core propagates
//! unmasked.

pub mod completion;
pub mod embedding;
