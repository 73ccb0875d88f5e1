use axum::response::{IntoResponse, Response};
use axum_helpers::{AppError, ErrorCode};
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("{message}")]
    Validation {
        message: String,
        errors: Option<serde_json::Value>,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Query embedding failed: {0}")]
    Embedding(String),

    #[error("Vector search failed: {0}")]
    SearchUnavailable(String),

    #[error("No relevant results found for the query")]
    NoResultsFound,

    #[error("Invalid credential: {0}")]
    InvalidCredential(String),

    #[error("Answer synthesis failed: {0}")]
    SynthesisUnavailable(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type RetrievalResult<T> = Result<T, RetrievalError>;

impl RetrievalError {
    pub fn validation(message: impl Into<String>) -> Self {
        RetrievalError::Validation {
            message: message.into(),
            errors: None,
        }
    }

    /// Label used for the `retrieval_requests_total` outcome metric.
    pub fn outcome(&self) -> &'static str {
        match self {
            RetrievalError::Validation { .. }
            | RetrievalError::InvalidInput(_)
            | RetrievalError::InvalidCredential(_) => "invalid",
            RetrievalError::NoResultsFound => "no_results",
            _ => "error",
        }
    }
}

impl From<ValidationErrors> for RetrievalError {
    fn from(errs: ValidationErrors) -> Self {
        let mut fields: Vec<String> = errs
            .field_errors()
            .into_iter()
            .map(|(field, errors)| {
                let reasons = errors
                    .iter()
                    .map(|e| match &e.message {
                        Some(message) => message.to_string(),
                        None => e.code.to_string(),
                    })
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{}: {}", field, reasons)
            })
            .collect();
        fields.sort();

        RetrievalError::Validation {
            message: format!("Invalid request: {}", fields.join("; ")),
            errors: serde_json::to_value(&errs).ok(),
        }
    }
}

/// Convert RetrievalError to AppError for standardized HTTP error responses
impl From<RetrievalError> for AppError {
    fn from(err: RetrievalError) -> Self {
        match err {
            RetrievalError::Validation { message, errors } => {
                AppError::Validation { message, errors }
            }
            RetrievalError::InvalidInput(msg) => AppError::validation(msg),
            RetrievalError::InvalidCredential(msg) => AppError::BadRequest(msg),
            err @ RetrievalError::NoResultsFound => AppError::NotFound(err.to_string()),
            err @ RetrievalError::Embedding(_) => {
                AppError::dependency(ErrorCode::EmbeddingFailed, err.to_string())
            }
            err @ RetrievalError::SearchUnavailable(_) => {
                AppError::dependency(ErrorCode::SearchUnavailable, err.to_string())
            }
            err @ RetrievalError::SynthesisUnavailable(_) => {
                AppError::dependency(ErrorCode::SynthesisUnavailable, err.to_string())
            }
            RetrievalError::Config(msg) => {
                AppError::InternalServerError(format!("Config error: {}", msg))
            }
        }
    }
}

impl IntoResponse for RetrievalError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
