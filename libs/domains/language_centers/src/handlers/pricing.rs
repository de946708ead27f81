use axum::{
    Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
};
use axum_helpers::{
    RequestActor, UuidPath, ValidatedJson,
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, ConflictResponse,
        InternalServerErrorResponse, NotFoundResponse, OutOfRangeResponse,
    },
};
use serde_json::json;

use super::{PRICING_TAG, SharedServices, audit_context, audit_event};
use crate::error::LanguageCenterResult;
use crate::models::{
    ApplyDiscountRequest, BulkCreateCoursePricing, BulkUpdateCoursePricing, CoursePricing,
    CreateCoursePricing, DeletedCount, PricingFilter, UpdateCoursePricing,
};
use crate::repository::LanguageCenterStore;

pub(super) fn routes<S: LanguageCenterStore>() -> Router<SharedServices<S>> {
    Router::new()
        .route(
            "/language-courses/{id}/pricing",
            get(list_course_pricing::<S>)
                .post(create_pricing::<S>)
                .delete(delete_course_pricing::<S>),
        )
        .route(
            "/language-courses/{id}/pricing/bulk",
            post(create_pricing_bulk::<S>).put(update_pricing_bulk::<S>),
        )
        .route(
            "/language-courses/{id}/pricing/discount",
            post(apply_course_discount::<S>),
        )
        .route(
            "/course-pricing/{id}",
            get(get_pricing::<S>)
                .put(update_pricing::<S>)
                .delete(delete_pricing::<S>),
        )
}

/// List the prices of a course, shortest duration first
#[utoipa::path(
    get,
    path = "/language-courses/{id}/pricing",
    tag = PRICING_TAG,
    params(
        ("id" = Uuid, Path, description = "Course ID"),
        PricingFilter
    ),
    responses(
        (status = 200, description = "Prices of the course", body = Vec<CoursePricing>),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(super) async fn list_course_pricing<S: LanguageCenterStore>(
    State(services): State<SharedServices<S>>,
    UuidPath(course_id): UuidPath,
    Query(filter): Query<PricingFilter>,
) -> LanguageCenterResult<Json<Vec<CoursePricing>>> {
    let pricing = if filter.active_only {
        services.pricing.get_active_by_course(course_id).await?
    } else {
        services.pricing.get_by_course(course_id).await?
    };
    Ok(Json(pricing))
}

/// Add a price for one duration of a course
///
/// `fee_per_week` and `final_price` are computed by the server.
#[utoipa::path(
    post,
    path = "/language-courses/{id}/pricing",
    tag = PRICING_TAG,
    params(
        ("id" = Uuid, Path, description = "Course ID")
    ),
    request_body = CreateCoursePricing,
    responses(
        (status = 201, description = "Price created successfully", body = CoursePricing),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(super) async fn create_pricing<S: LanguageCenterStore>(
    State(services): State<SharedServices<S>>,
    headers: HeaderMap,
    UuidPath(course_id): UuidPath,
    actor: RequestActor,
    ValidatedJson(input): ValidatedJson<CreateCoursePricing>,
) -> LanguageCenterResult<impl IntoResponse> {
    let ctx = audit_context(actor);
    let pricing = services.pricing.create(&ctx, course_id, input).await?;

    audit_event(
        &ctx,
        "course_pricing.create",
        format!("course_pricing:{}", pricing.id),
        &headers,
    )
    .with_details(json!({
        "language_course_id": course_id,
        "duration_weeks": pricing.duration_weeks,
        "final_price": pricing.final_price,
    }))
    .log();

    Ok((StatusCode::CREATED, Json(pricing)))
}

/// Soft-delete every price of a course
#[utoipa::path(
    delete,
    path = "/language-courses/{id}/pricing",
    tag = PRICING_TAG,
    params(
        ("id" = Uuid, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Number of prices deleted", body = DeletedCount),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(super) async fn delete_course_pricing<S: LanguageCenterStore>(
    State(services): State<SharedServices<S>>,
    headers: HeaderMap,
    UuidPath(course_id): UuidPath,
    actor: RequestActor,
) -> LanguageCenterResult<Json<DeletedCount>> {
    let ctx = audit_context(actor);
    let deleted = services.pricing.delete_by_course(&ctx, course_id).await?;

    audit_event(
        &ctx,
        "course_pricing.delete_all",
        format!("language_course:{}", course_id),
        &headers,
    )
    .with_details(json!({ "deleted": deleted }))
    .log();

    Ok(Json(DeletedCount { deleted }))
}

/// Create several prices of a course at once
///
/// Nothing is written if any item fails.
#[utoipa::path(
    post,
    path = "/language-courses/{id}/pricing/bulk",
    tag = PRICING_TAG,
    params(
        ("id" = Uuid, Path, description = "Course ID")
    ),
    request_body = BulkCreateCoursePricing,
    responses(
        (status = 201, description = "Prices created", body = Vec<CoursePricing>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(super) async fn create_pricing_bulk<S: LanguageCenterStore>(
    State(services): State<SharedServices<S>>,
    headers: HeaderMap,
    UuidPath(course_id): UuidPath,
    actor: RequestActor,
    ValidatedJson(request): ValidatedJson<BulkCreateCoursePricing>,
) -> LanguageCenterResult<impl IntoResponse> {
    let ctx = audit_context(actor);
    let pricing = services.pricing.create_bulk(&ctx, course_id, request).await?;

    audit_event(
        &ctx,
        "course_pricing.bulk_create",
        format!("language_course:{}", course_id),
        &headers,
    )
    .with_details(json!({ "count": pricing.len() }))
    .log();

    Ok((StatusCode::CREATED, Json(pricing)))
}

/// Update several prices of a course at once
#[utoipa::path(
    put,
    path = "/language-courses/{id}/pricing/bulk",
    tag = PRICING_TAG,
    params(
        ("id" = Uuid, Path, description = "Course ID")
    ),
    request_body = BulkUpdateCoursePricing,
    responses(
        (status = 200, description = "Prices updated", body = Vec<CoursePricing>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(super) async fn update_pricing_bulk<S: LanguageCenterStore>(
    State(services): State<SharedServices<S>>,
    UuidPath(course_id): UuidPath,
    actor: RequestActor,
    ValidatedJson(request): ValidatedJson<BulkUpdateCoursePricing>,
) -> LanguageCenterResult<Json<Vec<CoursePricing>>> {
    let pricing = services
        .pricing
        .update_bulk(&audit_context(actor), course_id, request)
        .await?;
    Ok(Json(pricing))
}

/// Apply one percentage discount to every price of a course
#[utoipa::path(
    post,
    path = "/language-courses/{id}/pricing/discount",
    tag = PRICING_TAG,
    params(
        ("id" = Uuid, Path, description = "Course ID")
    ),
    request_body = ApplyDiscountRequest,
    responses(
        (status = 200, description = "Discounted prices", body = Vec<CoursePricing>),
        (status = 400, response = OutOfRangeResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(super) async fn apply_course_discount<S: LanguageCenterStore>(
    State(services): State<SharedServices<S>>,
    headers: HeaderMap,
    UuidPath(course_id): UuidPath,
    actor: RequestActor,
    ValidatedJson(request): ValidatedJson<ApplyDiscountRequest>,
) -> LanguageCenterResult<Json<Vec<CoursePricing>>> {
    let ctx = audit_context(actor);
    let pricing = services
        .pricing
        .apply_discount_to_course(&ctx, course_id, request.discount_percentage)
        .await?;

    audit_event(
        &ctx,
        "course_pricing.discount",
        format!("language_course:{}", course_id),
        &headers,
    )
    .with_details(json!({
        "discount_percentage": request.discount_percentage,
        "count": pricing.len(),
    }))
    .log();

    Ok(Json(pricing))
}

/// Get a price by ID
#[utoipa::path(
    get,
    path = "/course-pricing/{id}",
    tag = PRICING_TAG,
    params(
        ("id" = Uuid, Path, description = "Pricing ID")
    ),
    responses(
        (status = 200, description = "Price found", body = CoursePricing),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(super) async fn get_pricing<S: LanguageCenterStore>(
    State(services): State<SharedServices<S>>,
    UuidPath(id): UuidPath,
) -> LanguageCenterResult<Json<CoursePricing>> {
    let pricing = services.pricing.get(id).await?;
    Ok(Json(pricing))
}

/// Update a price
#[utoipa::path(
    put,
    path = "/course-pricing/{id}",
    tag = PRICING_TAG,
    params(
        ("id" = Uuid, Path, description = "Pricing ID")
    ),
    request_body = UpdateCoursePricing,
    responses(
        (status = 200, description = "Price updated successfully", body = CoursePricing),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(super) async fn update_pricing<S: LanguageCenterStore>(
    State(services): State<SharedServices<S>>,
    UuidPath(id): UuidPath,
    actor: RequestActor,
    ValidatedJson(input): ValidatedJson<UpdateCoursePricing>,
) -> LanguageCenterResult<Json<CoursePricing>> {
    let pricing = services
        .pricing
        .update(&audit_context(actor), id, input)
        .await?;
    Ok(Json(pricing))
}

/// Soft-delete a price
#[utoipa::path(
    delete,
    path = "/course-pricing/{id}",
    tag = PRICING_TAG,
    params(
        ("id" = Uuid, Path, description = "Pricing ID")
    ),
    responses(
        (status = 204, description = "Price deleted successfully"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(super) async fn delete_pricing<S: LanguageCenterStore>(
    State(services): State<SharedServices<S>>,
    headers: HeaderMap,
    UuidPath(id): UuidPath,
    actor: RequestActor,
) -> LanguageCenterResult<StatusCode> {
    let ctx = audit_context(actor);
    services.pricing.delete(&ctx, id).await?;

    audit_event(&ctx, "course_pricing.delete", format!("course_pricing:{}", id), &headers).log();

    Ok(StatusCode::NO_CONTENT)
}
