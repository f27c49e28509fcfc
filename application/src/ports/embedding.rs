//! Embedding provider port.

use super::gateway_error::GatewayError;
use async_trait::async_trait;

/// Encodes text into fixed-length vectors
///
/// Implementations must be deterministic for a fixed model and free of side
/// effects.
#[async_trait]
pub trait EmbeddingGateway: Send + Sync {
    /// Encode one text into a vector
    async fn embed(&self, text: &str) -> Result<Vec<f32>, GatewayError>;

    /// Encode a batch of texts.
    ///
    /// Default implementation encodes sequentially; adapters with a real
    /// batch endpoint should override.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, GatewayError> {
        let mut vectors = Vec::with_capacity(texts.len());
        for text in texts {
            vectors.push(self.embed(text).await?);
        }
        Ok(vectors)
    }
}
