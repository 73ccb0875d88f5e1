//! Zilliz Cloud / Milvus REST v2 `entities/search` client.

use async_trait::async_trait;
use core_config::{ConfigError, FromEnv, env_or_default, env_timeout_secs};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use super::VectorSearchClient;
use crate::error::{RetrievalError, RetrievalResult};
use crate::models::SearchRecord;

pub const DEFAULT_SEARCH_URL: &str = "https://in03-b94f636e631eba3.serverless.gcp-us-west1.cloud.zilliz.com/v2/vectordb/entities/search";
pub const DEFAULT_COLLECTION: &str = "my_articles";

/// Fields requested from the backend for every hit
const OUTPUT_FIELDS: [&str; 2] = ["title", "content"];

/// Zilliz search configuration
#[derive(Debug, Clone)]
pub struct ZillizConfig {
    /// Full URL of the `entities/search` endpoint
    pub search_url: String,
    pub collection: String,
    pub timeout: Duration,
}

impl Default for ZillizConfig {
    fn default() -> Self {
        Self {
            search_url: DEFAULT_SEARCH_URL.to_string(),
            collection: DEFAULT_COLLECTION.to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

impl ZillizConfig {
    pub fn with_search_url(mut self, search_url: impl Into<String>) -> Self {
        self.search_url = search_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl FromEnv for ZillizConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            search_url: env_or_default("ZILLIZ_SEARCH_URL", DEFAULT_SEARCH_URL),
            collection: env_or_default("ZILLIZ_COLLECTION", DEFAULT_COLLECTION),
            timeout: env_timeout_secs("ZILLIZ_TIMEOUT_SECS", 10)?,
        })
    }
}

/// Zilliz REST search client
pub struct ZillizSearchClient {
    client: Client,
    config: ZillizConfig,
}

impl ZillizSearchClient {
    pub fn new(config: ZillizConfig) -> RetrievalResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| RetrievalError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ZillizConfig {
        &self.config
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchBody<'a> {
    collection_name: &'a str,
    data: [&'a [f32]; 1],
    limit: u32,
    output_fields: [&'a str; 2],
}

/// Milvus REST response wrapper
///
/// A 200 response may still carry an application error (`code != 0`).
#[derive(Debug, Deserialize)]
struct MilvusResponse {
    #[serde(default)]
    code: i32,
    #[serde(default)]
    data: Option<Vec<SearchRecord>>,
    #[serde(default)]
    message: Option<String>,
}

#[async_trait]
impl VectorSearchClient for ZillizSearchClient {
    async fn search(
        &self,
        vector: &[f32],
        credential: &str,
        limit: u32,
    ) -> RetrievalResult<Vec<SearchRecord>> {
        let body = SearchBody {
            collection_name: &self.config.collection,
            data: [vector],
            limit,
            output_fields: OUTPUT_FIELDS,
        };

        let response = self
            .client
            .post(&self.config.search_url)
            .bearer_auth(credential)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_builder() {
                    RetrievalError::InvalidCredential(
                        "credential is not a valid HTTP header value".to_string(),
                    )
                } else if e.is_timeout() {
                    RetrievalError::SearchUnavailable(format!(
                        "request timed out after {:?}",
                        self.config.timeout
                    ))
                } else {
                    RetrievalError::SearchUnavailable(format!("request failed: {}", e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(%status, "Vector search backend returned an error status");
            return Err(RetrievalError::SearchUnavailable(format!(
                "backend returned {}: {}",
                status, error_text
            )));
        }

        let parsed: MilvusResponse = response.json().await.map_err(|e| {
            RetrievalError::SearchUnavailable(format!("invalid response body: {}", e))
        })?;

        if parsed.code != 0 {
            return Err(RetrievalError::SearchUnavailable(format!(
                "backend error {}: {}",
                parsed.code,
                parsed.message.unwrap_or_default()
            )));
        }

        let records = parsed.data.unwrap_or_default();
        debug!(
            collection = %self.config.collection,
            count = records.len(),
            "Vector search completed"
        );
        Ok(records)
    }
}
