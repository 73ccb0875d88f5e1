use core_config::{ConfigError, FromEnv, env_parse};
use observability::{RetrievalMetrics, Stage};
use std::sync::Arc;
use tracing::{info, instrument};
use validator::Validate;

use crate::embedding::Embedder;
use crate::error::{RetrievalError, RetrievalResult};
use crate::models::{
    EmbeddingVector, ResponsePayload, SanitizedRecord, SearchRecord, SearchRequest, SearchResults,
};
use crate::sanitize::sanitize;
use crate::search::VectorSearchClient;
use crate::synthesis::AnswerSynthesizer;

pub const DEFAULT_LIMIT: u32 = 10;
pub const DEFAULT_MAX_LIMIT: u32 = 100;

/// Request limits applied before any backend is called
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetrievalConfig {
    /// Used when the request omits `limit`
    pub default_limit: u32,
    /// Largest `limit` a caller may ask for
    pub max_limit: u32,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_LIMIT,
            max_limit: DEFAULT_MAX_LIMIT,
        }
    }
}

impl FromEnv for RetrievalConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let default_limit = env_parse("SEARCH_DEFAULT_LIMIT", DEFAULT_LIMIT)?;
        let max_limit = env_parse("SEARCH_MAX_LIMIT", DEFAULT_MAX_LIMIT)?;

        if default_limit == 0 || default_limit > max_limit {
            return Err(ConfigError::InvalidValue {
                key: "SEARCH_DEFAULT_LIMIT".to_string(),
                details: format!("must be between 1 and SEARCH_MAX_LIMIT ({})", max_limit),
            });
        }

        Ok(Self {
            default_limit,
            max_limit,
        })
    }
}

/// Retrieval pipeline: validate → embed → search → sanitize → synthesize.
///
/// Holds the process-wide embedder and HTTP clients behind `Arc`s; cloning
/// is cheap and every clone shares them.
#[derive(Clone)]
pub struct RetrievalService {
    embedder: Arc<dyn Embedder>,
    search: Arc<dyn VectorSearchClient>,
    synthesizer: Arc<dyn AnswerSynthesizer>,
    config: RetrievalConfig,
}

impl RetrievalService {
    pub fn new(
        embedder: Arc<dyn Embedder>,
        search: Arc<dyn VectorSearchClient>,
        synthesizer: Arc<dyn AnswerSynthesizer>,
        config: RetrievalConfig,
    ) -> Self {
        Self {
            embedder,
            search,
            synthesizer,
            config,
        }
    }

    pub fn embedder(&self) -> &Arc<dyn Embedder> {
        &self.embedder
    }

    pub fn config(&self) -> &RetrievalConfig {
        &self.config
    }

    /// Run the full pipeline for one request.
    #[instrument(
        skip_all,
        fields(
            query_len = request.query.len(),
            synthesize = request.gemini_api_key.is_some(),
            limit = tracing::field::Empty,
        )
    )]
    pub async fn search(&self, request: SearchRequest) -> RetrievalResult<ResponsePayload> {
        let result = self.run(request).await;
        let outcome = match &result {
            Ok(_) => "ok",
            Err(err) => err.outcome(),
        };
        RetrievalMetrics::record_outcome(outcome);
        result
    }

    /// Checks the request and resolves the effective limit.
    pub fn validate(&self, request: &SearchRequest) -> RetrievalResult<u32> {
        request.validate()?;

        let limit = request.limit.unwrap_or(self.config.default_limit);
        if limit > self.config.max_limit {
            return Err(RetrievalError::validation(format!(
                "Invalid request: limit: must be at most {}",
                self.config.max_limit
            )));
        }
        Ok(limit)
    }

    async fn run(&self, request: SearchRequest) -> RetrievalResult<ResponsePayload> {
        let limit = self.validate(&request)?;
        tracing::Span::current().record("limit", limit);

        let vector = self.embed(&request.query).await?;
        let mut raw = self.retrieve(&vector, &request.zilliz_api_key, limit).await?;
        RetrievalMetrics::record_records_returned(raw.len());

        if raw.is_empty() {
            info!("Vector search returned no matches");
            return Err(RetrievalError::NoResultsFound);
        }
        raw.truncate(limit as usize);

        let records = sanitize(raw);

        let gemini_response = match request.gemini_api_key.as_deref() {
            Some(credential) => Some(
                self.synthesize(&request.query, &records, credential)
                    .await?,
            ),
            None => None,
        };

        info!(
            records = records.len(),
            answered = gemini_response.is_some(),
            "Retrieval completed"
        );

        Ok(ResponsePayload {
            zilliz_results: SearchResults { data: records },
            gemini_response,
        })
    }

    async fn embed(&self, query: &str) -> RetrievalResult<EmbeddingVector> {
        let timer = RetrievalMetrics::start(Stage::Embed);
        let result = self.embedder.encode(query).await;
        timer.finish(result.is_ok());
        result
    }

    async fn retrieve(
        &self,
        vector: &[f32],
        credential: &str,
        limit: u32,
    ) -> RetrievalResult<Vec<SearchRecord>> {
        let timer = RetrievalMetrics::start(Stage::Search);
        let result = self.search.search(vector, credential, limit).await;
        timer.finish(result.is_ok());
        result
    }

    async fn synthesize(
        &self,
        query: &str,
        records: &[SanitizedRecord],
        credential: &str,
    ) -> RetrievalResult<String> {
        let timer = RetrievalMetrics::start(Stage::Synthesize);
        let result = self.synthesizer.synthesize(query, records, credential).await;
        timer.finish(result.is_ok());
        result
    }
}
