use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
};
use axum_helpers::{
    RequestActor, UuidPath, ValidatedJson,
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, ConflictResponse,
        InternalServerErrorResponse, NotFoundResponse,
    },
};
use directory_rules::{
    Availability, FeaturedQuery, NameAvailabilityQuery, SlugAvailabilityQuery,
};
use serde_json::json;

use super::{LANGUAGE_CENTERS_TAG, SharedServices, audit_context, audit_event};
use crate::error::LanguageCenterResult;
use crate::models::{
    CreateLanguageCenter, LanguageCenter, LanguageCenterFilter, UpdateLanguageCenter,
};
use crate::repository::LanguageCenterStore;

pub(super) fn routes<S: LanguageCenterStore>() -> Router<SharedServices<S>> {
    Router::new()
        .route(
            "/language-centers",
            get(list_language_centers::<S>).post(create_language_center::<S>),
        )
        .route("/language-centers/featured", get(list_featured_language_centers::<S>))
        .route(
            "/language-centers/name-availability",
            get(check_name_availability::<S>),
        )
        .route(
            "/language-centers/slug-availability",
            get(check_slug_availability::<S>),
        )
        .route(
            "/language-centers/by-slug/{slug}",
            get(get_language_center_by_slug::<S>),
        )
        .route(
            "/language-centers/{id}",
            get(get_language_center::<S>)
                .put(update_language_center::<S>)
                .delete(delete_language_center::<S>),
        )
        .route(
            "/language-centers/{id}/toggle-active",
            post(toggle_language_center_active::<S>),
        )
        .route(
            "/language-centers/{id}/toggle-featured",
            post(toggle_language_center_featured::<S>),
        )
}

/// List language centers with optional filters
#[utoipa::path(
    get,
    path = "/language-centers",
    tag = LANGUAGE_CENTERS_TAG,
    params(LanguageCenterFilter),
    responses(
        (status = 200, description = "Language centers ordered by display order, then name", body = Vec<LanguageCenter>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(super) async fn list_language_centers<S: LanguageCenterStore>(
    State(services): State<SharedServices<S>>,
    Query(filter): Query<LanguageCenterFilter>,
) -> LanguageCenterResult<Json<Vec<LanguageCenter>>> {
    let centers = services.centers.list(filter).await?;
    Ok(Json(centers))
}

/// Create a new language center
#[utoipa::path(
    post,
    path = "/language-centers",
    tag = LANGUAGE_CENTERS_TAG,
    request_body = CreateLanguageCenter,
    responses(
        (status = 201, description = "Language center created successfully", body = LanguageCenter),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(super) async fn create_language_center<S: LanguageCenterStore>(
    State(services): State<SharedServices<S>>,
    headers: HeaderMap,
    actor: RequestActor,
    ValidatedJson(input): ValidatedJson<CreateLanguageCenter>,
) -> LanguageCenterResult<impl IntoResponse> {
    let ctx = audit_context(actor);
    let center = services.centers.create(&ctx, input).await?;

    audit_event(
        &ctx,
        "language_center.create",
        format!("language_center:{}", center.id),
        &headers,
    )
    .with_details(json!({
        "name": center.name,
        "slug": center.slug,
        "slug_ar": center.slug_ar,
    }))
    .log();

    Ok((StatusCode::CREATED, Json(center)))
}

/// List featured, active language centers
#[utoipa::path(
    get,
    path = "/language-centers/featured",
    tag = LANGUAGE_CENTERS_TAG,
    params(FeaturedQuery),
    responses(
        (status = 200, description = "Featured language centers", body = Vec<LanguageCenter>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(super) async fn list_featured_language_centers<S: LanguageCenterStore>(
    State(services): State<SharedServices<S>>,
    Query(query): Query<FeaturedQuery>,
) -> LanguageCenterResult<Json<Vec<LanguageCenter>>> {
    let centers = services.centers.list_featured(query.limit).await?;
    Ok(Json(centers))
}

/// Check whether a language center name is free
#[utoipa::path(
    get,
    path = "/language-centers/name-availability",
    tag = LANGUAGE_CENTERS_TAG,
    params(NameAvailabilityQuery),
    responses(
        (status = 200, description = "Whether the name can be used", body = Availability),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(super) async fn check_name_availability<S: LanguageCenterStore>(
    State(services): State<SharedServices<S>>,
    Query(query): Query<NameAvailabilityQuery>,
) -> LanguageCenterResult<Json<Availability>> {
    let available = services
        .centers
        .is_name_unique(&query.name, query.exclude_id)
        .await?;
    Ok(Json(Availability { available }))
}

/// Check whether a slug is free in both slug columns
#[utoipa::path(
    get,
    path = "/language-centers/slug-availability",
    tag = LANGUAGE_CENTERS_TAG,
    params(SlugAvailabilityQuery),
    responses(
        (status = 200, description = "Whether the slug can be used", body = Availability),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(super) async fn check_slug_availability<S: LanguageCenterStore>(
    State(services): State<SharedServices<S>>,
    Query(query): Query<SlugAvailabilityQuery>,
) -> LanguageCenterResult<Json<Availability>> {
    let available = services
        .centers
        .is_slug_unique(&query.slug, query.exclude_id)
        .await?;
    Ok(Json(Availability { available }))
}

/// Get a language center by its English or Arabic slug
#[utoipa::path(
    get,
    path = "/language-centers/by-slug/{slug}",
    tag = LANGUAGE_CENTERS_TAG,
    params(
        ("slug" = String, Path, description = "English or Arabic slug")
    ),
    responses(
        (status = 200, description = "Language center found", body = LanguageCenter),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(super) async fn get_language_center_by_slug<S: LanguageCenterStore>(
    State(services): State<SharedServices<S>>,
    Path(slug): Path<String>,
) -> LanguageCenterResult<Json<LanguageCenter>> {
    let center = services.centers.get_by_slug(&slug).await?;
    Ok(Json(center))
}

/// Get a language center by ID
#[utoipa::path(
    get,
    path = "/language-centers/{id}",
    tag = LANGUAGE_CENTERS_TAG,
    params(
        ("id" = Uuid, Path, description = "Language center ID")
    ),
    responses(
        (status = 200, description = "Language center found", body = LanguageCenter),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(super) async fn get_language_center<S: LanguageCenterStore>(
    State(services): State<SharedServices<S>>,
    UuidPath(id): UuidPath,
) -> LanguageCenterResult<Json<LanguageCenter>> {
    let center = services.centers.get(id).await?;
    Ok(Json(center))
}

/// Update a language center
#[utoipa::path(
    put,
    path = "/language-centers/{id}",
    tag = LANGUAGE_CENTERS_TAG,
    params(
        ("id" = Uuid, Path, description = "Language center ID")
    ),
    request_body = UpdateLanguageCenter,
    responses(
        (status = 200, description = "Language center updated successfully", body = LanguageCenter),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(super) async fn update_language_center<S: LanguageCenterStore>(
    State(services): State<SharedServices<S>>,
    UuidPath(id): UuidPath,
    actor: RequestActor,
    ValidatedJson(input): ValidatedJson<UpdateLanguageCenter>,
) -> LanguageCenterResult<Json<LanguageCenter>> {
    let ctx = audit_context(actor);
    let center = services.centers.update(&ctx, id, input).await?;
    Ok(Json(center))
}

/// Soft-delete a language center
#[utoipa::path(
    delete,
    path = "/language-centers/{id}",
    tag = LANGUAGE_CENTERS_TAG,
    params(
        ("id" = Uuid, Path, description = "Language center ID")
    ),
    responses(
        (status = 204, description = "Language center deleted successfully"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(super) async fn delete_language_center<S: LanguageCenterStore>(
    State(services): State<SharedServices<S>>,
    headers: HeaderMap,
    UuidPath(id): UuidPath,
    actor: RequestActor,
) -> LanguageCenterResult<impl IntoResponse> {
    let ctx = audit_context(actor);
    services.centers.delete(&ctx, id).await?;

    audit_event(&ctx, "language_center.delete", format!("language_center:{}", id), &headers).log();

    Ok(StatusCode::NO_CONTENT)
}

/// Flip the active flag of a language center
#[utoipa::path(
    post,
    path = "/language-centers/{id}/toggle-active",
    tag = LANGUAGE_CENTERS_TAG,
    params(
        ("id" = Uuid, Path, description = "Language center ID")
    ),
    responses(
        (status = 200, description = "Active flag toggled", body = LanguageCenter),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(super) async fn toggle_language_center_active<S: LanguageCenterStore>(
    State(services): State<SharedServices<S>>,
    UuidPath(id): UuidPath,
    actor: RequestActor,
) -> LanguageCenterResult<Json<LanguageCenter>> {
    let center = services
        .centers
        .toggle_active(&audit_context(actor), id)
        .await?;
    Ok(Json(center))
}

/// Flip the featured flag of a language center
#[utoipa::path(
    post,
    path = "/language-centers/{id}/toggle-featured",
    tag = LANGUAGE_CENTERS_TAG,
    params(
        ("id" = Uuid, Path, description = "Language center ID")
    ),
    responses(
        (status = 200, description = "Featured flag toggled", body = LanguageCenter),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(super) async fn toggle_language_center_featured<S: LanguageCenterStore>(
    State(services): State<SharedServices<S>>,
    UuidPath(id): UuidPath,
    actor: RequestActor,
) -> LanguageCenterResult<Json<LanguageCenter>> {
    let center = services
        .centers
        .toggle_featured(&audit_context(actor), id)
        .await?;
    Ok(Json(center))
}
