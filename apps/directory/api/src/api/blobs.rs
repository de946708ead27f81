//! Pre-flight check for logo, image and brochure uploads.
//!
//! Clients send the file metadata before pushing bytes to the blob store;
//! nothing is stored here.

use axum::{
    Json, Router,
    extract::State,
    response::{IntoResponse, Response},
    routing::post,
};
use axum_helpers::{AppError, ErrorCode, ErrorResponse, ValidatedJson};
use directory_rules::{UploadDescriptor, UploadError, UploadPolicy};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use validator::Validate;

pub const BLOBS_TAG: &str = "blobs";

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ValidateUploadRequest {
    #[validate(length(min = 1, max = 255))]
    pub file_name: String,
    #[validate(length(min = 1, max = 255))]
    pub content_type: String,
    pub size_bytes: u64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UploadAccepted {
    pub file_name: String,
    pub content_type: String,
    pub size_bytes: u64,
    /// Current size limit, so clients can show it
    pub max_bytes: u64,
}

/// Wraps [`UploadError`] so it renders as the shared error body.
pub struct UploadRejected(UploadError);

impl IntoResponse for UploadRejected {
    fn into_response(self) -> Response {
        let (code, key) = match &self.0 {
            UploadError::Empty => (ErrorCode::ValidationError, "Blobs:EmptyFile"),
            UploadError::InvalidFileName(_) => (ErrorCode::ValidationError, "Blobs:InvalidFileName"),
            UploadError::TooLarge { .. } => (ErrorCode::PayloadTooLarge, "Blobs:FileTooLarge"),
            UploadError::UnsupportedContentType(_) => {
                (ErrorCode::UnsupportedMediaType, "Blobs:UnsupportedContentType")
            }
            UploadError::UnsupportedExtension(_) => {
                (ErrorCode::UnsupportedMediaType, "Blobs:UnsupportedExtension")
            }
        };
        AppError::localized(code, key, self.0.to_string()).into_response()
    }
}

pub fn router(policy: Arc<UploadPolicy>) -> Router {
    Router::new()
        .route("/blobs/validate", post(validate_upload))
        .with_state(policy)
}

/// Check an upload against the size and type rules
#[utoipa::path(
    post,
    path = "/blobs/validate",
    tag = BLOBS_TAG,
    request_body = ValidateUploadRequest,
    responses(
        (status = 200, description = "Upload would be accepted", body = UploadAccepted),
        (status = 400, description = "Empty file or unusable file name", body = ErrorResponse),
        (status = 413, description = "File exceeds the size limit", body = ErrorResponse),
        (status = 415, description = "Content type or extension not accepted", body = ErrorResponse)
    )
)]
pub async fn validate_upload(
    State(policy): State<Arc<UploadPolicy>>,
    ValidatedJson(request): ValidatedJson<ValidateUploadRequest>,
) -> Result<Json<UploadAccepted>, UploadRejected> {
    let descriptor = UploadDescriptor {
        file_name: request.file_name,
        content_type: request.content_type,
        size_bytes: request.size_bytes,
    };

    policy.validate(&descriptor).map_err(|e| {
        tracing::info!(file_name = %descriptor.file_name, error = %e, "Upload rejected");
        UploadRejected(e)
    })?;

    Ok(Json(UploadAccepted {
        file_name: descriptor.file_name,
        content_type: descriptor.content_type,
        size_bytes: descriptor.size_bytes,
        max_bytes: policy.max_bytes,
    }))
}
