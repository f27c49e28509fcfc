//! Reference-document chunking for retrieval.

pub mod chunk;
