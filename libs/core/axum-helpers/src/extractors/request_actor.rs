//! Acting user extractor.

use crate::errors::{ErrorCode, ErrorResponse};
use axum::{
    Json,
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Response},
};
use uuid::Uuid;

/// Header set by the gateway once it has authenticated the caller.
pub const ACTOR_HEADER: &str = "x-user-id";

/// Id of the user performing the request, if the gateway supplied one.
///
/// A missing header yields `RequestActor(None)` (anonymous/system change);
/// a header that is not a UUID is rejected with `400 INVALID_UUID`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestActor(pub Option<Uuid>);

impl<S> FromRequestParts<S> for RequestActor
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(value) = parts.headers.get(ACTOR_HEADER) else {
            return Ok(RequestActor(None));
        };

        value
            .to_str()
            .ok()
            .and_then(|raw| Uuid::parse_str(raw.trim()).ok())
            .map(|id| RequestActor(Some(id)))
            .ok_or_else(|| {
                let code = ErrorCode::InvalidUuid;
                let body = ErrorResponse::new(code, format!("Invalid {} header", ACTOR_HEADER), None);
                (code.status(), Json(body)).into_response()
            })
    }
}
