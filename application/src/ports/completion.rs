//! Completion provider port.

use super::gateway_error::GatewayError;
use async_trait::async_trait;

/// Samples text completions from a language model
///
/// Each call returns one independently sampled continuation of the prompt,
/// with any prompt echo already stripped by the provider. The orchestrator
/// requests an ensemble as N sequential calls, never in parallel: the
/// provider is typically a single loaded model instance that cannot usefully
/// serve concurrent requests.
#[async_trait]
pub trait CompletionGateway: Send + Sync {
    /// Sample one completion for the prompt
    async fn complete(&self, prompt: &str) -> Result<String, GatewayError>;
}
