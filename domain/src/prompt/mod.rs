//! Prompt text and composition.

pub mod template;
pub mod topics;
