use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::EmbeddingConfig;
use super::provider::{Embedder, ensure_non_empty};
use crate::error::{RetrievalError, RetrievalResult};
use crate::models::EmbeddingVector;

/// Embedder backed by an OpenAI-compatible `/embeddings` endpoint
/// (OpenAI, text-embeddings-inference, vLLM, Ollama).
pub struct HttpEmbedder {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
    model: String,
    dimension: usize,
}

impl HttpEmbedder {
    pub fn new(config: &EmbeddingConfig) -> RetrievalResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| RetrievalError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: format!("{}/embeddings", config.base_url.trim_end_matches('/')),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            dimension: config.dimension,
        })
    }
}

#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: [&'a str; 1],
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
    #[serde(default)]
    index: usize,
}

#[async_trait]
impl Embedder for HttpEmbedder {
    async fn encode(&self, text: &str) -> RetrievalResult<EmbeddingVector> {
        ensure_non_empty(text)?;

        let request = EmbeddingRequest {
            model: &self.model,
            input: [text],
        };

        let mut builder = self.client.post(&self.endpoint).json(&request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| RetrievalError::Embedding(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(RetrievalError::Embedding(format!(
                "embedding endpoint returned {}: {}",
                status, error_text
            )));
        }

        let mut body: EmbeddingResponse = response
            .json()
            .await
            .map_err(|e| RetrievalError::Embedding(format!("invalid response body: {}", e)))?;

        body.data.sort_by_key(|d| d.index);
        let vector = body
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| RetrievalError::Embedding("No embedding returned".to_string()))?;

        if vector.len() != self.dimension {
            return Err(RetrievalError::Embedding(format!(
                "expected {} dimensions, got {}",
                self.dimension,
                vector.len()
            )));
        }

        debug!(dimension = vector.len(), "Encoded query via HTTP embedder");
        Ok(vector)
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn ready(&self) -> RetrievalResult<()> {
        self.encode("readiness probe").await.map(|_| ())
    }
}
