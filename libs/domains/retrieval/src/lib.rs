//! Retrieval Domain Library
//!
//! Answers legal-aid questions by retrieving articles from a vector index and
//! optionally asking a generative model to summarize them.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │ RetrievalService │  ← validate → embed → search → sanitize → synthesize
//! └────────┬─────────┘
//!          │
//! ┌────────▼───────┐  ┌────────────────────┐  ┌────────────────────┐
//! │    Embedder    │  │ VectorSearchClient │  │ AnswerSynthesizer  │
//! │    (trait)     │  │      (trait)       │  │      (trait)       │
//! └────────┬───────┘  └─────────┬──────────┘  └─────────┬──────────┘
//!          │                    │                       │
//! ┌────────▼───────┐  ┌─────────▼──────────┐  ┌─────────▼──────────┐
//! │ HttpEmbedder   │  │ ZillizSearchClient │  │ GeminiSynthesizer  │
//! │ LocalEmbedder* │  │  (Milvus REST v2)  │  │ (generateContent)  │
//! └────────────────┘  └────────────────────┘  └────────────────────┘
//! ```
//!
//! `*` requires the `local-embeddings` feature.
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_retrieval::{
//!     EmbeddingConfig, GeminiConfig, GeminiSynthesizer, RetrievalConfig, RetrievalService,
//!     ZillizConfig, ZillizSearchClient, build_embedder,
//! };
//! use std::sync::Arc;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let embedder = build_embedder(&EmbeddingConfig::default())?;
//! let search = Arc::new(ZillizSearchClient::new(ZillizConfig::default())?);
//! let synthesizer = Arc::new(GeminiSynthesizer::new(GeminiConfig::default())?);
//!
//! let service = RetrievalService::new(embedder, search, synthesizer, RetrievalConfig::default());
//! let app = domain_retrieval::handlers::router(service);
//! # Ok(())
//! # }
//! ```

pub mod embedding;
pub mod error;
pub mod handlers;
pub mod models;
pub mod sanitize;
pub mod search;
pub mod service;
pub mod synthesis;

// Re-export commonly used types
pub use embedding::{
    Embedder, EmbeddingConfig, EmbeddingProviderKind, HttpEmbedder, build_embedder,
};
#[cfg(feature = "local-embeddings")]
pub use embedding::LocalEmbedder;
pub use error::{RetrievalError, RetrievalResult};
pub use handlers::RetrievalApiDoc;
pub use models::{
    EmbeddingVector, ResponsePayload, SanitizedRecord, SearchRecord, SearchRequest, SearchResults,
};
pub use sanitize::sanitize;
pub use search::{VectorSearchClient, ZillizConfig, ZillizSearchClient};
pub use service::{RetrievalConfig, RetrievalService};
pub use synthesis::{
    AnswerSynthesizer, GeminiConfig, GeminiSynthesizer, MAX_CONTEXT_RECORDS, NO_RESULTS_SENTINEL,
    build_prompt,
};
