use async_trait::async_trait;

use crate::error::RetrievalResult;
use crate::models::SearchRecord;

/// Trait for remote similarity search backends
///
/// An empty result set is `Ok(vec![])`; callers decide what it means.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VectorSearchClient: Send + Sync {
    /// Return up to `limit` records nearest to `vector`, in backend rank order
    async fn search(
        &self,
        vector: &[f32],
        credential: &str,
        limit: u32,
    ) -> RetrievalResult<Vec<SearchRecord>>;
}
