//! Application state management.
//!
//! The state holds the configuration and the retrieval pipeline, which in
//! turn owns the loaded embedding model and the outbound HTTP clients.

use domain_retrieval::{
    GeminiSynthesizer, RetrievalService, ZillizSearchClient, build_embedder,
};
use std::sync::Arc;
use tracing::info;

use crate::config::Config;

/// Shared application state.
///
/// Cloned per handler; every clone shares the same model and connection pools.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: Config,
    /// Embed → search → sanitize → synthesize pipeline
    pub retrieval: RetrievalService,
}

impl AppState {
    /// Loads the embedding model and builds the backend clients.
    pub async fn build(config: Config) -> eyre::Result<Self> {
        let embedding_config = config.embedding.clone();
        // Loading a local model reads (and may download) weights.
        let embedder =
            tokio::task::spawn_blocking(move || build_embedder(&embedding_config)).await??;
        info!(
            provider = %config.embedding.provider,
            model = %config.embedding.model,
            dimension = embedder.dimension(),
            "Embedding model ready"
        );

        let search = ZillizSearchClient::new(config.zilliz.clone())?;
        let synthesizer = GeminiSynthesizer::new(config.gemini.clone())?;
        info!(
            collection = %config.zilliz.collection,
            model = %config.gemini.model,
            "Backend clients configured"
        );

        let retrieval = RetrievalService::new(
            embedder,
            Arc::new(search),
            Arc::new(synthesizer),
            config.retrieval,
        );

        Ok(Self { config, retrieval })
    }
}
