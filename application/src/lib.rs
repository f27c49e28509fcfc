//! Application layer for neuroroute
//!
//! This crate contains the use cases and port definitions: the async
//! provider ports (embedding and completion), the prompt router with its
//! cached topic embeddings, the append-only retrieval index, and the
//! orchestrator that composes a full turn. It depends only on the domain
//! layer.

pub mod ports;
pub mod retrieval;
pub mod router;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    completion::CompletionGateway,
    embedding::EmbeddingGateway,
    gateway_error::GatewayError,
};
pub use retrieval::RetrievalIndex;
pub use router::{PromptRouter, Route};
pub use use_cases::handle_turn::{HandleTurnError, HandleTurnInput, HandleTurnUseCase};
