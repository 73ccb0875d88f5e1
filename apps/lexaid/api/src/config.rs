use core_config::{AppInfo, FromEnv, app_info, server::ServerConfig};
use domain_retrieval::{EmbeddingConfig, GeminiConfig, RetrievalConfig, ZillizConfig};

// Re-export Environment for use in other modules
pub use core_config::Environment;

/// Application-specific configuration
/// Composes shared config components with the retrieval backends' settings
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub server: ServerConfig,
    pub environment: Environment,
    pub retrieval: RetrievalConfig,
    pub zilliz: ZillizConfig,
    pub gemini: GeminiConfig,
    pub embedding: EmbeddingConfig,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?; // Uses defaults: HOST=0.0.0.0, PORT=8080

        Ok(Self {
            app: app_info!(),
            server,
            environment,
            retrieval: RetrievalConfig::from_env()?,
            zilliz: ZillizConfig::from_env()?,
            gemini: GeminiConfig::from_env()?,
            embedding: EmbeddingConfig::from_env()?,
        })
    }
}
