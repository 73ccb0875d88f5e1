use async_trait::async_trait;

use crate::error::RetrievalResult;
use crate::models::SanitizedRecord;

/// Trait for generative answer backends
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnswerSynthesizer: Send + Sync {
    /// Generate an answer to `query` grounded on `records`.
    ///
    /// A blank `credential` is an `InvalidCredential` error. Empty `records`
    /// yield [`NO_RESULTS_SENTINEL`](super::NO_RESULTS_SENTINEL) without a
    /// remote call.
    async fn synthesize(
        &self,
        query: &str,
        records: &[SanitizedRecord],
        credential: &str,
    ) -> RetrievalResult<String>;
}
