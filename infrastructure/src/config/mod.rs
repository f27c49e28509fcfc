//! Configuration loading.
//!
//! Settings, the topic table and the command grammar all live in one TOML
//! file, loaded once at process start and passed in explicitly; there is no
//! global mutable state to patch in tests.

pub mod file_config;
pub mod loader;
