//! UUID path parameter extractor.

use crate::errors::{ErrorCode, ErrorResponse};
use axum::{
    Json,
    extract::{FromRequestParts, Path},
    http::request::Parts,
    response::{IntoResponse, Response},
};
use uuid::Uuid;

/// Parses a single `{id}` path segment as a UUID.
///
/// Malformed values are rejected with `400 INVALID_UUID` before the handler runs.
///
/// ```ignore
/// async fn get_university(UuidPath(id): UuidPath) -> String {
///     format!("University {}", id)
/// }
///
/// let app = Router::new().route("/universities/{id}", get(get_university));
/// ```
pub struct UuidPath(pub Uuid);

impl<S> FromRequestParts<S> for UuidPath
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| e.into_response())?;

        Uuid::parse_str(&raw).map(UuidPath).map_err(|_| {
            let code = ErrorCode::InvalidUuid;
            let body = ErrorResponse::new(code, format!("Invalid UUID: {}", raw), None);
            (code.status(), Json(body)).into_response()
        })
    }
}
