//! Infrastructure layer for neuroroute
//!
//! Adapters for the application ports: TOML/environment configuration
//! loading and Ollama-backed embedding and completion providers.

pub mod config;
pub mod ollama;

// Re-export commonly used types
pub use config::{
    file_config::{FileConfig, ProviderSettings, RouterSettings, TopicConfig},
    loader::ConfigLoader,
};
pub use ollama::{completion::OllamaCompletion, embedding::OllamaEmbedding};
