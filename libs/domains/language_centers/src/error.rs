use axum::response::{IntoResponse, Response};
use axum_helpers::{AppError, ErrorCode};
use directory_rules::{UniquenessError, UniquenessViolation};

use crate::pricing::PricingOverflow;
use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

/// What kind of record a `NotFound` refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum Resource {
    #[strum(serialize = "Language center")]
    LanguageCenter,
    Faq,
    Course,
    #[strum(serialize = "Course pricing")]
    Pricing,
}

#[derive(Debug, Error)]
pub enum LanguageCenterError {
    #[error("{0} {1} not found")]
    NotFound(Resource, Uuid),

    #[error("Language center with slug '{0}' not found")]
    SlugNotFound(String),

    #[error("Language center {0} does not exist")]
    ParentNotFound(Uuid),

    #[error("Language course {0} does not exist")]
    CourseNotFound(Uuid),

    #[error("Language center with name '{0}' already exists")]
    DuplicateName(String),

    #[error("Slug '{0}' is already in use")]
    DuplicateSlug(String),

    #[error("Course already has a price for {0} weeks")]
    DuplicateDuration(i32),

    #[error("Discount percentage {0} is outside 0 to 100")]
    InvalidDiscountRange(Decimal),

    #[error("Rating {0} must be between 0 and 5 with at most two decimals")]
    InvalidRating(Decimal),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type LanguageCenterResult<T> = Result<T, LanguageCenterError>;

impl LanguageCenterError {
    pub fn localization_key(&self) -> &'static str {
        match self {
            Self::NotFound(Resource::LanguageCenter, _) | Self::SlugNotFound(_) => {
                "LanguageCenters:NotFound"
            }
            Self::NotFound(Resource::Faq, _) => "LanguageCenters:FaqNotFound",
            Self::NotFound(Resource::Course, _) => "LanguageCenters:CourseNotFound",
            Self::NotFound(Resource::Pricing, _) => "LanguageCenters:PricingNotFound",
            Self::ParentNotFound(_) => "LanguageCenters:LanguageCenterNotFound",
            Self::CourseNotFound(_) => "LanguageCenters:CourseNotFound",
            Self::DuplicateName(_) => "LanguageCenters:DuplicateName",
            Self::DuplicateSlug(_) => "LanguageCenters:SlugAlreadyExists",
            Self::DuplicateDuration(_) => "LanguageCenters:DuplicateDuration",
            Self::InvalidDiscountRange(_) => "LanguageCenters:InvalidDiscountRange",
            Self::InvalidRating(_) => "LanguageCenters:InvalidRating",
            Self::Validation(_) => "LanguageCenters:ValidationFailed",
            Self::Internal(_) => "LanguageCenters:InternalError",
        }
    }

    fn error_code(&self) -> ErrorCode {
        match self {
            Self::NotFound(..) | Self::SlugNotFound(_) => ErrorCode::NotFound,
            Self::ParentNotFound(_) | Self::CourseNotFound(_) => ErrorCode::ParentNotFound,
            Self::DuplicateName(_) => ErrorCode::DuplicateName,
            Self::DuplicateSlug(_) => ErrorCode::DuplicateSlug,
            Self::DuplicateDuration(_) => ErrorCode::DuplicateDuration,
            Self::InvalidDiscountRange(_) | Self::InvalidRating(_) => ErrorCode::OutOfRange,
            Self::Validation(_) => ErrorCode::ValidationError,
            Self::Internal(_) => ErrorCode::InternalError,
        }
    }
}

impl From<UniquenessViolation> for LanguageCenterError {
    fn from(violation: UniquenessViolation) -> Self {
        match violation {
            UniquenessViolation::DuplicateName(name) => Self::DuplicateName(name),
            UniquenessViolation::DuplicateSlug(slug) => Self::DuplicateSlug(slug),
        }
    }
}

impl From<UniquenessError<LanguageCenterError>> for LanguageCenterError {
    fn from(err: UniquenessError<LanguageCenterError>) -> Self {
        match err {
            UniquenessError::Violation(violation) => violation.into(),
            UniquenessError::Lookup(err) => err,
        }
    }
}

impl From<PricingOverflow> for LanguageCenterError {
    fn from(err: PricingOverflow) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<LanguageCenterError> for AppError {
    fn from(err: LanguageCenterError) -> Self {
        match err {
            LanguageCenterError::Internal(msg) => AppError::InternalServerError(msg),
            other => AppError::localized(other.error_code(), other.localization_key(), other.to_string()),
        }
    }
}

impl IntoResponse for LanguageCenterError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use rust_decimal_macros::dec;

    #[test]
    fn test_pricing_error_keys() {
        assert_eq!(
            LanguageCenterError::DuplicateDuration(12).localization_key(),
            "LanguageCenters:DuplicateDuration"
        );
        assert_eq!(
            LanguageCenterError::InvalidDiscountRange(dec!(120)).localization_key(),
            "LanguageCenters:InvalidDiscountRange"
        );
        assert_eq!(
            LanguageCenterError::CourseNotFound(Uuid::nil()).localization_key(),
            "LanguageCenters:CourseNotFound"
        );
    }

    #[test]
    fn test_status_codes() {
        let cases = [
            (LanguageCenterError::DuplicateDuration(4), StatusCode::CONFLICT),
            (LanguageCenterError::DuplicateSlug("x".into()), StatusCode::CONFLICT),
            (
                LanguageCenterError::InvalidDiscountRange(dec!(-1)),
                StatusCode::BAD_REQUEST,
            ),
            (
                LanguageCenterError::CourseNotFound(Uuid::nil()),
                StatusCode::NOT_FOUND,
            ),
            (
                LanguageCenterError::NotFound(Resource::Pricing, Uuid::nil()),
                StatusCode::NOT_FOUND,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn test_not_found_message_names_the_resource() {
        let err = LanguageCenterError::NotFound(Resource::LanguageCenter, Uuid::nil());
        assert!(err.to_string().starts_with("Language center "));
    }
}
