//! Domain layer for neuroroute
//!
//! This crate contains the core routing logic: the command grammar, the
//! best-effort command parser, consensus voting over candidate sets, and the
//! topic-selection statistics. It has no dependencies on infrastructure or
//! presentation concerns and performs no I/O.
//!
//! # Core Concepts
//!
//! ## Route
//!
//! A user utterance is scored against a fixed table of topic prompts; the
//! matched topics decide both the instructions sent to the model and the
//! ensemble size (how many completions to sample for one turn).
//!
//! ## Consensus
//!
//! Each completion is parsed into a [`CandidateSet`]; the voter reconciles
//! the sets into a single [`TurnOutcome`], surfacing ambiguity explicitly
//! instead of guessing.

pub mod command;
pub mod consensus;
pub mod core;
pub mod prompt;
pub mod retrieval;
pub mod routing;
pub mod session;

// Re-export commonly used types
pub use command::{
    grammar::{CommandGrammar, CommandSchema},
    item::{CandidateSet, ParsedItem},
    parser::CommandParser,
};
pub use consensus::{outcome::TurnOutcome, voter::vote};
pub use core::{error::DomainError, similarity::cosine_similarity};
pub use prompt::{
    template::PromptComposer,
    topics::{BASE_PROMPT, default_topics},
};
pub use retrieval::chunk::{DEFAULT_CHUNK_SIZE, DocumentChunk, chunk_text};
pub use routing::{
    selection::{DEFAULT_SCORE_FLOOR, SelectionPolicy, selection_threshold},
    topic::{TopicPrompt, TopicTable},
};
pub use session::{Message, Role};
