//! JSON extractor whose rejections render as [`AppError`] bodies.

use crate::errors::AppError;
use axum::extract::{FromRequest, Json, Request};
use serde::de::DeserializeOwned;

/// Drop-in replacement for [`axum::Json`] on the request side.
///
/// Malformed JSON, a wrong content type or a missing field produce the
/// standard error body (`code`/`error`/`detail`) with status 400 instead of
/// axum's plain-text rejection.
///
/// ```ignore
/// async fn search(JsonBody(payload): JsonBody<SearchRequest>) -> impl IntoResponse {
///     // ...
/// }
/// ```
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state).await?;
        Ok(JsonBody(data))
    }
}
