//! Ollama embedding adapter.
//!
//! Uses the `/api/embeddings` endpoint with models like `nomic-embed-text`
//! (768-dim) or `all-minilm` (384-dim). Vectors are normalized to unit
//! length so cosine similarity reduces to a dot product on well-behaved
//! inputs.

use async_trait::async_trait;
use neuroroute_application::{EmbeddingGateway, GatewayError};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

#[derive(Deserialize)]
struct EmbeddingsResponse {
    embedding: Vec<f32>,
}

/// Embedding provider backed by Ollama
pub struct OllamaEmbedding {
    client: reqwest::Client,
    host: String,
    model: String,
}

impl OllamaEmbedding {
    pub fn new(host: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            host: host.into(),
            model: model.into(),
        }
    }
}

#[async_trait]
impl EmbeddingGateway for OllamaEmbedding {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, GatewayError> {
        debug!(model = %self.model, chars = text.len(), "requesting embedding");
        let response = self
            .client
            .post(format!("{}/api/embeddings", self.host))
            .json(&json!({
                "model": self.model,
                "prompt": text,
            }))
            .send()
            .await
            .map_err(|e| GatewayError::ConnectionError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(GatewayError::RequestFailed(format!(
                "embeddings endpoint returned {}",
                response.status()
            )));
        }

        let body: EmbeddingsResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::MalformedResponse(e.to_string()))?;

        if body.embedding.is_empty() {
            return Err(GatewayError::MalformedResponse(
                "empty embedding returned".to_string(),
            ));
        }

        // Normalize to unit vector
        let norm: f32 = body.embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 1e-8 {
            Ok(body.embedding.into_iter().map(|x| x / norm).collect())
        } else {
            Ok(body.embedding)
        }
    }
}
