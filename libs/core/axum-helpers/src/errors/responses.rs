//! Reusable OpenAPI response types for consistent API documentation.

use super::ErrorResponse;
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error",
    content_type = "application/json",
    example = json!({
        "code": 1005,
        "error": "INTERNAL_ERROR",
        "message": "An internal server error occurred"
    })
)]
pub struct InternalServerErrorResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - Validation Error",
    content_type = "application/json",
    example = json!({
        "code": 1001,
        "error": "VALIDATION_ERROR",
        "message": "Request validation failed",
        "details": {
            "name": [{
                "code": "length",
                "message": null,
                "params": {"min": 1, "value": ""}
            }]
        }
    })
)]
pub struct BadRequestValidationResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - Invalid UUID",
    content_type = "application/json",
    example = json!({
        "code": 1002,
        "error": "INVALID_UUID",
        "message": "Invalid UUID: not-a-uuid"
    })
)]
pub struct BadRequestUuidResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - Value out of range",
    content_type = "application/json",
    example = json!({
        "code": 1106,
        "error": "OUT_OF_RANGE",
        "message": "Discount percentage must be between 0 and 100",
        "details": {"key": "LanguageCenters:InvalidDiscountRange"}
    })
)]
pub struct OutOfRangeResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Resource not found",
    content_type = "application/json",
    example = json!({
        "code": 1004,
        "error": "NOT_FOUND",
        "message": "University 0193a3f2-7f4e-7c4a-9d2e-1b2c3d4e5f60 not found",
        "details": {"key": "Universities:NotFound"}
    })
)]
pub struct NotFoundResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Conflict - Duplicate value",
    content_type = "application/json",
    example = json!({
        "code": 1101,
        "error": "DUPLICATE_NAME",
        "message": "A university named 'Cairo University' already exists",
        "details": {"key": "Universities:DuplicateName"}
    })
)]
pub struct ConflictResponse(pub ErrorResponse);
