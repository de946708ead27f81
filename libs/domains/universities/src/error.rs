use axum::response::{IntoResponse, Response};
use axum_helpers::{AppError, ErrorCode};
use directory_rules::{UniquenessError, UniquenessViolation};
use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

use crate::models::ContentType;

/// What kind of record a `NotFound` refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum Resource {
    University,
    Faq,
    Content,
    Program,
}

#[derive(Debug, Error)]
pub enum UniversityError {
    #[error("{0} {1} not found")]
    NotFound(Resource, Uuid),

    #[error("University with slug '{0}' not found")]
    SlugNotFound(String),

    #[error("University has no '{0}' content section")]
    SectionNotFound(ContentType),

    #[error("University {0} does not exist")]
    ParentNotFound(Uuid),

    #[error("University with name '{0}' already exists")]
    DuplicateName(String),

    #[error("Slug '{0}' is already in use")]
    DuplicateSlug(String),

    #[error("University already has a '{0}' content section")]
    DuplicateContentType(ContentType),

    #[error("Rating {0} must be between 0 and 5 with at most two decimals")]
    InvalidRating(Decimal),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type UniversityResult<T> = Result<T, UniversityError>;

impl UniversityError {
    /// Key clients use to look up a translated message.
    pub fn localization_key(&self) -> &'static str {
        match self {
            Self::NotFound(Resource::University, _) | Self::SlugNotFound(_) => {
                "Universities:NotFound"
            }
            Self::NotFound(Resource::Faq, _) => "Universities:FaqNotFound",
            Self::NotFound(Resource::Content, _) | Self::SectionNotFound(_) => {
                "Universities:ContentNotFound"
            }
            Self::NotFound(Resource::Program, _) => "Universities:ProgramNotFound",
            Self::ParentNotFound(_) => "Universities:UniversityNotFound",
            Self::DuplicateName(_) => "Universities:DuplicateName",
            Self::DuplicateSlug(_) => "Universities:SlugAlreadyExists",
            Self::DuplicateContentType(_) => "Universities:DuplicateContentType",
            Self::InvalidRating(_) => "Universities:InvalidRating",
            Self::Validation(_) => "Universities:ValidationFailed",
            Self::Internal(_) => "Universities:InternalError",
        }
    }

    fn error_code(&self) -> ErrorCode {
        match self {
            Self::NotFound(..) | Self::SlugNotFound(_) | Self::SectionNotFound(_) => {
                ErrorCode::NotFound
            }
            Self::ParentNotFound(_) => ErrorCode::ParentNotFound,
            Self::DuplicateName(_) => ErrorCode::DuplicateName,
            Self::DuplicateSlug(_) => ErrorCode::DuplicateSlug,
            Self::DuplicateContentType(_) => ErrorCode::DuplicateContentType,
            Self::InvalidRating(_) => ErrorCode::OutOfRange,
            Self::Validation(_) => ErrorCode::ValidationError,
            Self::Internal(_) => ErrorCode::InternalError,
        }
    }
}

impl From<UniquenessViolation> for UniversityError {
    fn from(violation: UniquenessViolation) -> Self {
        match violation {
            UniquenessViolation::DuplicateName(name) => Self::DuplicateName(name),
            UniquenessViolation::DuplicateSlug(slug) => Self::DuplicateSlug(slug),
        }
    }
}

impl From<UniquenessError<UniversityError>> for UniversityError {
    fn from(err: UniquenessError<UniversityError>) -> Self {
        match err {
            UniquenessError::Violation(violation) => violation.into(),
            UniquenessError::Lookup(err) => err,
        }
    }
}

/// Convert UniversityError to AppError for standardized error responses
impl From<UniversityError> for AppError {
    fn from(err: UniversityError) -> Self {
        match err {
            UniversityError::Internal(msg) => AppError::InternalServerError(msg),
            other => AppError::localized(other.error_code(), other.localization_key(), other.to_string()),
        }
    }
}

impl IntoResponse for UniversityError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_localization_keys() {
        assert_eq!(
            UniversityError::DuplicateName("x".into()).localization_key(),
            "Universities:DuplicateName"
        );
        assert_eq!(
            UniversityError::DuplicateSlug("x".into()).localization_key(),
            "Universities:SlugAlreadyExists"
        );
        assert_eq!(
            UniversityError::NotFound(Resource::Faq, Uuid::nil()).localization_key(),
            "Universities:FaqNotFound"
        );
    }

    #[test]
    fn test_status_codes() {
        let cases = [
            (UniversityError::DuplicateName("x".into()), StatusCode::CONFLICT),
            (
                UniversityError::DuplicateContentType(ContentType::Overview),
                StatusCode::CONFLICT,
            ),
            (UniversityError::ParentNotFound(Uuid::nil()), StatusCode::NOT_FOUND),
            (
                UniversityError::NotFound(Resource::University, Uuid::nil()),
                StatusCode::NOT_FOUND,
            ),
            (
                UniversityError::InvalidRating(Decimal::TEN),
                StatusCode::BAD_REQUEST,
            ),
            (
                UniversityError::Internal("db down".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn test_uniqueness_violation_maps_to_domain_error() {
        let err: UniversityError =
            UniquenessError::Violation(UniquenessViolation::DuplicateSlug("cairo".into())).into();
        assert!(matches!(err, UniversityError::DuplicateSlug(ref s) if s == "cairo"));
    }
}
