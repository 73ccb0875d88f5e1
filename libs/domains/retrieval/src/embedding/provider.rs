use async_trait::async_trait;

use crate::error::{RetrievalError, RetrievalResult};
use crate::models::EmbeddingVector;

/// Trait for query embedding models
///
/// Implementations are loaded once at startup and shared read-only across
/// requests, so `encode` takes `&self`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Encode a single non-empty text
    async fn encode(&self, text: &str) -> RetrievalResult<EmbeddingVector>;

    /// Output dimensionality
    fn dimension(&self) -> usize;

    /// Readiness probe used by `/ready`
    async fn ready(&self) -> RetrievalResult<()>;
}

/// Rejects empty and whitespace-only input.
pub fn ensure_non_empty(text: &str) -> RetrievalResult<()> {
    if text.trim().is_empty() {
        return Err(RetrievalError::InvalidInput(
            "text to embed must not be empty".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_non_empty() {
        assert!(ensure_non_empty("bail").is_ok());
        assert!(matches!(
            ensure_non_empty(" \n\t"),
            Err(RetrievalError::InvalidInput(_))
        ));
    }
}
