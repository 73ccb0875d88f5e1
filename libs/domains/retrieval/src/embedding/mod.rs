mod http;
#[cfg(feature = "local-embeddings")]
mod local;
mod provider;

pub use http::HttpEmbedder;
#[cfg(feature = "local-embeddings")]
pub use local::LocalEmbedder;
#[cfg(test)]
pub use provider::MockEmbedder;
pub use provider::{Embedder, ensure_non_empty};

use core_config::{
    ConfigError, FromEnv, env_optional, env_or_default, env_parse, env_timeout_secs,
};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use crate::error::RetrievalResult;

/// Which embedding backend to load at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbeddingProviderKind {
    /// In-process ONNX model (`local-embeddings` feature)
    Local,
    /// OpenAI-compatible `/embeddings` endpoint
    Http,
}

impl Default for EmbeddingProviderKind {
    fn default() -> Self {
        if cfg!(feature = "local-embeddings") {
            EmbeddingProviderKind::Local
        } else {
            EmbeddingProviderKind::Http
        }
    }
}

impl FromStr for EmbeddingProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "local" => Ok(EmbeddingProviderKind::Local),
            "http" => Ok(EmbeddingProviderKind::Http),
            other => Err(format!("unknown embedding provider '{}' (expected local or http)", other)),
        }
    }
}

impl fmt::Display for EmbeddingProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmbeddingProviderKind::Local => write!(f, "local"),
            EmbeddingProviderKind::Http => write!(f, "http"),
        }
    }
}

pub const DEFAULT_EMBEDDING_MODEL: &str = "all-MiniLM-L6-v2";
pub const DEFAULT_EMBEDDING_DIMENSION: usize = 384;

#[derive(Clone)]
pub struct EmbeddingConfig {
    pub provider: EmbeddingProviderKind,
    pub model: String,
    pub dimension: usize,
    pub base_url: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
    pub cache_dir: Option<PathBuf>,
}

impl fmt::Debug for EmbeddingConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmbeddingConfig")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("dimension", &self.dimension)
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .field("cache_dir", &self.cache_dir)
            .finish()
    }
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: EmbeddingProviderKind::default(),
            model: DEFAULT_EMBEDDING_MODEL.to_string(),
            dimension: DEFAULT_EMBEDDING_DIMENSION,
            base_url: "http://localhost:8081/v1".to_string(),
            api_key: None,
            timeout: Duration::from_secs(10),
            cache_dir: None,
        }
    }
}

impl FromEnv for EmbeddingConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let provider = match env_optional("EMBEDDING_PROVIDER") {
            Some(raw) => raw.parse().map_err(|details| ConfigError::InvalidValue {
                key: "EMBEDDING_PROVIDER".to_string(),
                details,
            })?,
            None => defaults.provider,
        };

        let dimension = env_parse("EMBEDDING_DIMENSION", defaults.dimension)?;
        if dimension == 0 {
            return Err(ConfigError::InvalidValue {
                key: "EMBEDDING_DIMENSION".to_string(),
                details: "must be greater than zero".to_string(),
            });
        }

        Ok(Self {
            provider,
            model: env_or_default("EMBEDDING_MODEL", &defaults.model),
            dimension,
            base_url: env_or_default("EMBEDDING_BASE_URL", &defaults.base_url)
                .trim_end_matches('/')
                .to_string(),
            api_key: env_optional("EMBEDDING_API_KEY"),
            timeout: env_timeout_secs("EMBEDDING_TIMEOUT_SECS", 10)?,
            cache_dir: env_optional("EMBEDDING_CACHE_DIR").map(PathBuf::from),
        })
    }
}

/// Builds the process-wide embedder described by `config`.
///
/// Loading a local model is blocking and may download weights.
pub fn build_embedder(config: &EmbeddingConfig) -> RetrievalResult<Arc<dyn Embedder>> {
    match config.provider {
        EmbeddingProviderKind::Http => Ok(Arc::new(HttpEmbedder::new(config)?)),
        #[cfg(feature = "local-embeddings")]
        EmbeddingProviderKind::Local => Ok(Arc::new(LocalEmbedder::try_new(config)?)),
        #[cfg(not(feature = "local-embeddings"))]
        EmbeddingProviderKind::Local => Err(crate::error::RetrievalError::Config(
            "EMBEDDING_PROVIDER=local requires the local-embeddings feature".to_string(),
        )),
    }
}
