use serde::{Deserialize, Deserializer, Serialize};
use std::borrow::Cow;
use std::fmt;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// Dense query embedding; dimensionality is fixed by the embedding model.
pub type EmbeddingVector = Vec<f32>;

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some(Cow::Borrowed("must not be empty"));
        return Err(err);
    }
    Ok(())
}

/// Rejects characters that cannot travel in an HTTP header value.
fn header_safe(value: &str) -> Result<(), ValidationError> {
    if value.chars().any(|c| c.is_control() || !c.is_ascii()) {
        let mut err = ValidationError::new("invalid_characters");
        err.message = Some(Cow::Borrowed(
            "must contain only printable ASCII characters",
        ));
        return Err(err);
    }
    Ok(())
}

fn credential(value: &str) -> Result<(), ValidationError> {
    not_blank(value)?;
    header_safe(value)
}

/// Search request body for `POST /search` and `POST /query`
#[derive(Clone, Deserialize, Validate, ToSchema)]
pub struct SearchRequest {
    /// Natural-language question
    #[validate(custom(function = "not_blank"))]
    #[schema(example = "What are my rights if I am arrested?")]
    pub query: String,

    /// Bearer token for the vector search backend
    #[validate(custom(function = "credential"))]
    pub zilliz_api_key: String,

    /// API key for answer synthesis; the answer is omitted when absent
    #[serde(default)]
    #[validate(custom(function = "header_safe"))]
    pub gemini_api_key: Option<String>,

    /// Maximum number of records to retrieve (defaults to 10)
    #[serde(default)]
    #[validate(range(min = 1))]
    #[schema(example = 3, minimum = 1)]
    pub limit: Option<u32>,
}

impl fmt::Debug for SearchRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchRequest")
            .field("query", &self.query)
            .field("zilliz_api_key", &"<redacted>")
            .field(
                "gemini_api_key",
                &self.gemini_api_key.as_ref().map(|_| "<redacted>"),
            )
            .field("limit", &self.limit)
            .finish()
    }
}

/// Reads a text field without failing on unexpected JSON types.
///
/// Strings pass through, `null` becomes `None`, any other value is kept in
/// its JSON rendering.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => None,
        serde_json::Value::String(text) => Some(text),
        other => Some(other.to_string()),
    })
}

/// A record as returned by the search backend.
///
/// Only `title` and `content` are interpreted; everything else (ids,
/// distances, extra output fields) is kept opaque in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchRecord {
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub content: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl SearchRecord {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            content: Some(content.into()),
            extra: serde_json::Map::new(),
        }
    }
}

/// Public projection of a search record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SanitizedRecord {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SearchResults {
    pub data: Vec<SanitizedRecord>,
}

/// Successful search response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ResponsePayload {
    pub zilliz_results: SearchResults,
    /// Synthesized answer, present only when a synthesis key was supplied
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gemini_response: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(query: &str, key: &str, limit: Option<u32>) -> SearchRequest {
        SearchRequest {
            query: query.to_string(),
            zilliz_api_key: key.to_string(),
            gemini_api_key: None,
            limit,
        }
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(request("bail rights", "key", Some(3)).validate().is_ok());
        assert!(request("bail rights", "key", None).validate().is_ok());
    }

    #[test]
    fn test_blank_query_fails() {
        let errs = request("   ", "key", None).validate().unwrap_err();
        assert!(errs.field_errors().contains_key("query"));
    }

    #[test]
    fn test_blank_search_key_fails() {
        let errs = request("q", "", None).validate().unwrap_err();
        assert!(errs.field_errors().contains_key("zilliz_api_key"));
    }

    #[test]
    fn test_credentials_with_control_characters_fail() {
        let errs = request("q", "bad\nkey", None).validate().unwrap_err();
        assert!(errs.field_errors().contains_key("zilliz_api_key"));

        let mut req = request("q", "key", None);
        req.gemini_api_key = Some("gem\u{7f}ini".into());
        let errs = req.validate().unwrap_err();
        assert!(errs.field_errors().contains_key("gemini_api_key"));

        // Blank synthesis keys are left to the synthesizer.
        req.gemini_api_key = Some(String::new());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_zero_limit_fails() {
        let errs = request("q", "key", Some(0)).validate().unwrap_err();
        assert!(errs.field_errors().contains_key("limit"));
    }

    #[test]
    fn test_debug_redacts_credentials() {
        let mut req = request("q", "zilliz-secret", None);
        req.gemini_api_key = Some("gemini-secret".into());
        let printed = format!("{:?}", req);
        assert!(!printed.contains("zilliz-secret"));
        assert!(!printed.contains("gemini-secret"));
        assert!(printed.contains("<redacted>"));
    }

    #[test]
    fn test_null_gemini_key_and_missing_limit_deserialize() {
        let req: SearchRequest = serde_json::from_value(json!({
            "query": "q",
            "zilliz_api_key": "k",
            "gemini_api_key": null
        }))
        .unwrap();
        assert!(req.gemini_api_key.is_none());
        assert!(req.limit.is_none());
    }

    #[test]
    fn test_search_record_keeps_unknown_fields() {
        let record: SearchRecord = serde_json::from_value(json!({
            "id": 42,
            "distance": 0.12,
            "title": "Article 22"
        }))
        .unwrap();
        assert_eq!(record.title.as_deref(), Some("Article 22"));
        assert!(record.content.is_none());
        assert_eq!(record.extra["id"], 42);
    }

    #[test]
    fn test_search_record_tolerates_non_string_text() {
        let record: SearchRecord = serde_json::from_value(json!({
            "title": 1950,
            "content": null
        }))
        .unwrap();
        assert_eq!(record.title.as_deref(), Some("1950"));
        assert!(record.content.is_none());

        let record: SearchRecord = serde_json::from_value(json!({
            "title": ["Part", "III"],
            "content": true
        }))
        .unwrap();
        assert_eq!(record.title.as_deref(), Some(r#"["Part","III"]"#));
        assert_eq!(record.content.as_deref(), Some("true"));
    }

    #[test]
    fn test_payload_omits_missing_answer() {
        let payload = ResponsePayload {
            zilliz_results: SearchResults::default(),
            gemini_response: None,
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert!(value.get("gemini_response").is_none());
        assert_eq!(value["zilliz_results"]["data"], json!([]));
    }
}
