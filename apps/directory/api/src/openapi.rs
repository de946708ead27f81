use utoipa::OpenApi;

use crate::api::blobs;

#[derive(OpenApi)]
#[openapi(
    paths(blobs::validate_upload),
    components(
        schemas(
            axum_helpers::ErrorResponse,
            blobs::ValidateUploadRequest,
            blobs::UploadAccepted
        )
    ),
    info(
        title = "Education Directory API",
        version = "0.1.0",
        description = "Bilingual (English/Arabic) directory of universities and language centers"
    ),
    servers(
        (url = "/api", description = "API base path")
    ),
    tags((name = blobs::BLOBS_TAG, description = "Upload validation"))
)]
struct BaseDoc;

/// Full document: the base plus every domain's paths, schemas and tags.
///
/// Domain docs use absolute resource paths, so they are merged instead of nested.
pub struct ApiDoc;

impl OpenApi for ApiDoc {
    fn openapi() -> utoipa::openapi::OpenApi {
        let mut doc = BaseDoc::openapi();
        doc.merge(domain_universities::ApiDoc::openapi());
        doc.merge(domain_language_centers::ApiDoc::openapi());
        doc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_contains_every_domain() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;

        assert!(paths.contains_key("/universities"));
        assert!(paths.contains_key("/universities/{id}/contents/by-type/{content_type}"));
        assert!(paths.contains_key("/language-courses/{id}/pricing/discount"));
        assert!(paths.contains_key("/course-pricing/{id}"));
        assert!(paths.contains_key("/blobs/validate"));
    }
}
