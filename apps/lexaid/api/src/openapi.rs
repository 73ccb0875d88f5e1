use domain_retrieval::RetrievalApiDoc;
use utoipa::{Modify, OpenApi};

/// Pulls the retrieval domain's paths and schemas into the service document.
struct RetrievalPaths;

impl Modify for RetrievalPaths {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.merge(RetrievalApiDoc::openapi());
    }
}

#[derive(OpenApi)]
#[openapi(
    modifiers(&RetrievalPaths),
    components(
        schemas(axum_helpers::ErrorResponse)
    ),
    info(
        title = "LexAid API",
        version = "0.1.0",
        description = "Plain-language legal information retrieval: vector search over legal articles with optional generated answers"
    ),
    servers(
        (url = "/api", description = "API base path")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_contains_retrieval_paths() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/search"));
        assert!(doc.paths.paths.contains_key("/query"));
        let schemas = doc.components.unwrap().schemas;
        assert!(schemas.contains_key("SearchRequest"));
        assert!(schemas.contains_key("ErrorResponse"));
    }
}
