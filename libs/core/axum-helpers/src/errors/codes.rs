//! Type-safe error codes for API responses.
//!
//! Each code carries:
//! - a SCREAMING_SNAKE_CASE identifier for clients (e.g., "DUPLICATE_NAME")
//! - an integer for logs and dashboards (e.g., 1101)
//! - the HTTP status it is served with
//! - a default English message
//!
//! # Example
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::ValidationError;
//! assert_eq!(code.as_str(), "VALIDATION_ERROR");
//! assert_eq!(code.code(), 1001);
//! assert_eq!(code.default_message(), "Request validation failed");
//! ```

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Request errors (1000s)
    /// Request validation failed
    ValidationError,
    /// Invalid UUID format in a path parameter
    InvalidUuid,
    /// JSON extraction from the request body failed
    JsonExtraction,
    /// Requested resource was not found
    NotFound,
    /// Unexpected internal error
    InternalError,
    /// Request conflicts with the current resource state
    Conflict,
    /// Request payload is semantically incorrect
    UnprocessableEntity,
    /// Service is temporarily unavailable
    ServiceUnavailable,

    // Directory rule violations (1100s)
    /// Another live record already uses this name
    DuplicateName,
    /// Another live record already uses this slug
    DuplicateSlug,
    /// The course already has a price for this duration
    DuplicateDuration,
    /// The university already has a section of this content type
    DuplicateContentType,
    /// The owning record of a child entity does not exist
    ParentNotFound,
    /// A numeric value is outside its permitted range
    OutOfRange,

    // Upload contract (1200s)
    /// Upload is larger than the configured limit
    PayloadTooLarge,
    /// Upload media type or extension is not accepted
    UnsupportedMediaType,

    // Persistence (2000s)
    /// Database query or connection failure
    DatabaseError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::InvalidUuid => "INVALID_UUID",
            Self::JsonExtraction => "JSON_EXTRACTION",
            Self::NotFound => "NOT_FOUND",
            Self::InternalError => "INTERNAL_ERROR",
            Self::Conflict => "CONFLICT",
            Self::UnprocessableEntity => "UNPROCESSABLE_ENTITY",
            Self::ServiceUnavailable => "SERVICE_UNAVAILABLE",
            Self::DuplicateName => "DUPLICATE_NAME",
            Self::DuplicateSlug => "DUPLICATE_SLUG",
            Self::DuplicateDuration => "DUPLICATE_DURATION",
            Self::DuplicateContentType => "DUPLICATE_CONTENT_TYPE",
            Self::ParentNotFound => "PARENT_NOT_FOUND",
            Self::OutOfRange => "OUT_OF_RANGE",
            Self::PayloadTooLarge => "PAYLOAD_TOO_LARGE",
            Self::UnsupportedMediaType => "UNSUPPORTED_MEDIA_TYPE",
            Self::DatabaseError => "DATABASE_ERROR",
        }
    }

    /// Integer code used in structured logs.
    ///
    /// - 1000-1099: request errors
    /// - 1100-1199: directory rule violations
    /// - 1200-1299: upload contract
    /// - 2000-2999: persistence
    pub fn code(&self) -> i32 {
        match self {
            Self::ValidationError => 1001,
            Self::InvalidUuid => 1002,
            Self::JsonExtraction => 1003,
            Self::NotFound => 1004,
            Self::InternalError => 1005,
            Self::Conflict => 1008,
            Self::UnprocessableEntity => 1009,
            Self::ServiceUnavailable => 1011,
            Self::DuplicateName => 1101,
            Self::DuplicateSlug => 1102,
            Self::DuplicateDuration => 1103,
            Self::DuplicateContentType => 1104,
            Self::ParentNotFound => 1105,
            Self::OutOfRange => 1106,
            Self::PayloadTooLarge => 1201,
            Self::UnsupportedMediaType => 1202,
            Self::DatabaseError => 2003,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::ValidationError
            | Self::InvalidUuid
            | Self::JsonExtraction
            | Self::OutOfRange => StatusCode::BAD_REQUEST,
            Self::NotFound | Self::ParentNotFound => StatusCode::NOT_FOUND,
            Self::Conflict
            | Self::DuplicateName
            | Self::DuplicateSlug
            | Self::DuplicateDuration
            | Self::DuplicateContentType => StatusCode::CONFLICT,
            Self::UnprocessableEntity => StatusCode::UNPROCESSABLE_ENTITY,
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::InternalError | Self::DatabaseError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn default_message(&self) -> &'static str {
        match self {
            Self::ValidationError => "Request validation failed",
            Self::InvalidUuid => "Invalid UUID format",
            Self::JsonExtraction => "Failed to parse request body",
            Self::NotFound => "Resource not found",
            Self::InternalError => "An internal server error occurred",
            Self::Conflict => "Resource already exists",
            Self::UnprocessableEntity => "Request cannot be processed",
            Self::ServiceUnavailable => "Service is temporarily unavailable",
            Self::DuplicateName => "The name is already in use",
            Self::DuplicateSlug => "The slug is already in use",
            Self::DuplicateDuration => "A price for this duration already exists",
            Self::DuplicateContentType => "A section of this type already exists",
            Self::ParentNotFound => "The owning record was not found",
            Self::OutOfRange => "Value is out of the permitted range",
            Self::PayloadTooLarge => "The upload exceeds the size limit",
            Self::UnsupportedMediaType => "The upload type is not supported",
            Self::DatabaseError => "Database error occurred",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
