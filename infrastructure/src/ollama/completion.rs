//! Ollama completion adapter.
//!
//! Uses the `/api/generate` endpoint without streaming. Each call samples
//! one continuation; the orchestrator's sequential ensemble loop maps
//! directly onto repeated calls against the single loaded model.

use async_trait::async_trait;
use neuroroute_application::{CompletionGateway, GatewayError};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

/// Completion provider backed by Ollama
pub struct OllamaCompletion {
    client: reqwest::Client,
    host: String,
    model: String,
    temperature: f32,
}

impl OllamaCompletion {
    pub fn new(host: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            host: host.into(),
            model: model.into(),
            // Non-zero so ensemble samples actually differ
            temperature: 0.7,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

#[async_trait]
impl CompletionGateway for OllamaCompletion {
    async fn complete(&self, prompt: &str) -> Result<String, GatewayError> {
        debug!(model = %self.model, prompt_chars = prompt.len(), "requesting completion");
        let response = self
            .client
            .post(format!("{}/api/generate", self.host))
            .json(&json!({
                "model": self.model,
                "prompt": prompt,
                "stream": false,
                "options": { "temperature": self.temperature },
            }))
            .send()
            .await
            .map_err(|e| GatewayError::ConnectionError(e.to_string()))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(GatewayError::ModelNotAvailable(self.model.clone()));
        }
        if !response.status().is_success() {
            return Err(GatewayError::RequestFailed(format!(
                "generate endpoint returned {}",
                response.status()
            )));
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::MalformedResponse(e.to_string()))?;

        Ok(body.response)
    }
}
