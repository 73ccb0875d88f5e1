use async_trait::async_trait;
use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

use super::EmbeddingConfig;
use super::provider::{Embedder, ensure_non_empty};
use crate::error::{RetrievalError, RetrievalResult};
use crate::models::EmbeddingVector;

/// In-process sentence embedder (ONNX Runtime via fastembed).
pub struct LocalEmbedder {
    model: Arc<TextEmbedding>,
    name: String,
    dimension: usize,
}

fn resolve_model(name: &str) -> RetrievalResult<(EmbeddingModel, usize)> {
    match name {
        "all-MiniLM-L6-v2" | "sentence-transformers/all-MiniLM-L6-v2" => {
            Ok((EmbeddingModel::AllMiniLML6V2, 384))
        }
        "all-MiniLM-L12-v2" | "sentence-transformers/all-MiniLM-L12-v2" => {
            Ok((EmbeddingModel::AllMiniLML12V2, 384))
        }
        "bge-small-en-v1.5" | "BAAI/bge-small-en-v1.5" => Ok((EmbeddingModel::BGESmallENV15, 384)),
        "bge-base-en-v1.5" | "BAAI/bge-base-en-v1.5" => Ok((EmbeddingModel::BGEBaseENV15, 768)),
        other => Err(RetrievalError::Config(format!(
            "unsupported local embedding model '{}'",
            other
        ))),
    }
}

impl LocalEmbedder {
    /// Loads the model, downloading weights into the cache dir on first use.
    pub fn try_new(config: &EmbeddingConfig) -> RetrievalResult<Self> {
        let (model, dimension) = resolve_model(&config.model)?;
        if dimension != config.dimension {
            return Err(RetrievalError::Config(format!(
                "model '{}' produces {} dimensions but EMBEDDING_DIMENSION is {}",
                config.model, dimension, config.dimension
            )));
        }

        let mut options = InitOptions::new(model).with_show_download_progress(false);
        if let Some(dir) = &config.cache_dir {
            options = options.with_cache_dir(dir.clone());
        }

        let started = Instant::now();
        let embedding = TextEmbedding::try_new(options).map_err(|e| {
            RetrievalError::Config(format!(
                "failed to load embedding model '{}': {}",
                config.model, e
            ))
        })?;
        info!(
            model = %config.model,
            dimension,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Loaded local embedding model"
        );

        Ok(Self {
            model: Arc::new(embedding),
            name: config.model.clone(),
            dimension,
        })
    }
}

#[async_trait]
impl Embedder for LocalEmbedder {
    async fn encode(&self, text: &str) -> RetrievalResult<EmbeddingVector> {
        ensure_non_empty(text)?;

        let model = Arc::clone(&self.model);
        let input = text.to_string();
        let mut vectors = tokio::task::spawn_blocking(move || model.embed(vec![input], None))
            .await
            .map_err(|e| RetrievalError::Embedding(format!("embedding task failed: {}", e)))?
            .map_err(|e| RetrievalError::Embedding(format!("{}: {}", self.name, e)))?;

        vectors
            .pop()
            .ok_or_else(|| RetrievalError::Embedding("No embedding returned".to_string()))
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn ready(&self) -> RetrievalResult<()> {
        Ok(())
    }
}
