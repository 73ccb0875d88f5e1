//! Shared test fixtures: deterministic in-memory doubles for the three
//! retrieval pipeline capabilities.
//!
//! Used as a dev-dependency by the retrieval domain tests and the API crate;
//! none of them touch the network.
//!
//! ```ignore
//! let service = RetrievalService::new(
//!     Arc::new(StaticEmbedder::new(384)),
//!     Arc::new(StaticSearchClient::with_records(sample_records(3))),
//!     Arc::new(RecordingSynthesizer::new("answer")),
//!     RetrievalConfig::default(),
//! );
//! ```

use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use domain_retrieval::embedding::ensure_non_empty;
use domain_retrieval::{
    AnswerSynthesizer, Embedder, EmbeddingVector, NO_RESULTS_SENTINEL, RetrievalError,
    RetrievalResult, SanitizedRecord, SearchRecord, VectorSearchClient,
};

/// Embedder returning a constant vector of the given dimension.
pub struct StaticEmbedder {
    dimension: usize,
    calls: AtomicUsize,
}

impl StaticEmbedder {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Embedder for StaticEmbedder {
    async fn encode(&self, text: &str) -> RetrievalResult<EmbeddingVector> {
        ensure_non_empty(text)?;
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(vec![0.5; self.dimension])
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn ready(&self) -> RetrievalResult<()> {
        Ok(())
    }
}

enum SearchBehaviour {
    Records(Vec<SearchRecord>),
    Fail(String),
}

/// Search client that serves canned records (honouring `limit`) or fails.
pub struct StaticSearchClient {
    behaviour: SearchBehaviour,
    calls: AtomicUsize,
}

impl StaticSearchClient {
    pub fn with_records(records: Vec<SearchRecord>) -> Self {
        Self {
            behaviour: SearchBehaviour::Records(records),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn empty() -> Self {
        Self::with_records(Vec::new())
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            behaviour: SearchBehaviour::Fail(message.into()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VectorSearchClient for StaticSearchClient {
    async fn search(
        &self,
        _vector: &[f32],
        _credential: &str,
        limit: u32,
    ) -> RetrievalResult<Vec<SearchRecord>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.behaviour {
            SearchBehaviour::Records(records) => {
                Ok(records.iter().take(limit as usize).cloned().collect())
            }
            SearchBehaviour::Fail(message) => {
                Err(RetrievalError::SearchUnavailable(message.clone()))
            }
        }
    }
}

/// Synthesizer that records what it was asked and returns a fixed answer.
pub struct RecordingSynthesizer {
    answer: String,
    calls: Mutex<Vec<Vec<SanitizedRecord>>>,
}

impl RecordingSynthesizer {
    pub fn new(answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Number of `synthesize` calls that reached the remote-model stage
    pub fn calls(&self) -> usize {
        self.calls.lock().map(|calls| calls.len()).unwrap_or(0)
    }

    /// Records passed on each call, in call order
    pub fn received(&self) -> Vec<Vec<SanitizedRecord>> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl AnswerSynthesizer for RecordingSynthesizer {
    async fn synthesize(
        &self,
        _query: &str,
        records: &[SanitizedRecord],
        credential: &str,
    ) -> RetrievalResult<String> {
        if credential.trim().is_empty() {
            return Err(RetrievalError::InvalidCredential(
                "gemini_api_key must not be empty when provided".to_string(),
            ));
        }
        if records.is_empty() {
            return Ok(NO_RESULTS_SENTINEL.to_string());
        }
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(records.to_vec());
        }
        Ok(self.answer.clone())
    }
}

/// `n` records with opaque extra fields, titled `Article {i}`.
pub fn sample_records(n: usize) -> Vec<SearchRecord> {
    (0..n)
        .map(|i| {
            let mut record = SearchRecord::new(
                format!("Article {i}"),
                format!("Content of article {i}"),
            );
            record.extra.insert("id".to_string(), serde_json::json!(i));
            record
                .extra
                .insert("distance".to_string(), serde_json::json!(0.1 * i as f64));
            record
        })
        .collect()
}
