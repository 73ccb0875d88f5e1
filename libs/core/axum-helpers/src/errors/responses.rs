//! Reusable OpenAPI response types for consistent API documentation.

use super::ErrorResponse;
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Bad Request - malformed body or failed validation",
    content_type = "application/json",
    example = json!({
        "code": 1001,
        "error": "VALIDATION_ERROR",
        "detail": "query must not be empty"
    })
)]
pub struct BadRequestResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "No matching records",
    content_type = "application/json",
    example = json!({
        "code": 1004,
        "error": "NOT_FOUND",
        "detail": "No relevant results found for the query"
    })
)]
pub struct NotFoundResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error - a downstream dependency failed",
    content_type = "application/json",
    example = json!({
        "code": 2002,
        "error": "SEARCH_UNAVAILABLE",
        "detail": "Vector search failed: backend returned 503 Service Unavailable"
    })
)]
pub struct InternalServerErrorResponse(pub ErrorResponse);
