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
use directory_rules::{Availability, FeaturedQuery, NameAvailabilityQuery, SlugAvailabilityQuery};
use serde_json::json;

use super::{SharedServices, UNIVERSITIES_TAG, audit_context, audit_event};
use crate::error::UniversityResult;
use crate::models::{CreateUniversity, University, UniversityFilter, UpdateUniversity};
use crate::repository::UniversityStore;

pub(super) fn routes<S: UniversityStore>() -> Router<SharedServices<S>> {
    Router::new()
        .route(
            "/universities",
            get(list_universities::<S>).post(create_university::<S>),
        )
        .route("/universities/featured", get(list_featured_universities::<S>))
        .route(
            "/universities/name-availability",
            get(check_name_availability::<S>),
        )
        .route(
            "/universities/slug-availability",
            get(check_slug_availability::<S>),
        )
        .route(
            "/universities/by-slug/{slug}",
            get(get_university_by_slug::<S>),
        )
        .route(
            "/universities/{id}",
            get(get_university::<S>)
                .put(update_university::<S>)
                .delete(delete_university::<S>),
        )
        .route(
            "/universities/{id}/toggle-active",
            post(toggle_university_active::<S>),
        )
        .route(
            "/universities/{id}/toggle-featured",
            post(toggle_university_featured::<S>),
        )
}

/// List universities with optional filters
#[utoipa::path(
    get,
    path = "/universities",
    tag = UNIVERSITIES_TAG,
    params(UniversityFilter),
    responses(
        (status = 200, description = "Universities ordered by display order, then name", body = Vec<University>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(super) async fn list_universities<S: UniversityStore>(
    State(services): State<SharedServices<S>>,
    Query(filter): Query<UniversityFilter>,
) -> UniversityResult<Json<Vec<University>>> {
    let universities = services.universities.list(filter).await?;
    Ok(Json(universities))
}

/// Create a new university
#[utoipa::path(
    post,
    path = "/universities",
    tag = UNIVERSITIES_TAG,
    request_body = CreateUniversity,
    responses(
        (status = 201, description = "University created successfully", body = University),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(super) async fn create_university<S: UniversityStore>(
    State(services): State<SharedServices<S>>,
    headers: HeaderMap,
    actor: RequestActor,
    ValidatedJson(input): ValidatedJson<CreateUniversity>,
) -> UniversityResult<impl IntoResponse> {
    let ctx = audit_context(actor);
    let university = services.universities.create(&ctx, input).await?;

    audit_event(
        &ctx,
        "university.create",
        format!("university:{}", university.id),
        &headers,
    )
    .with_details(json!({
        "name": university.name,
        "slug": university.slug,
        "slug_ar": university.slug_ar,
    }))
    .log();

    Ok((StatusCode::CREATED, Json(university)))
}

/// List featured, active universities
#[utoipa::path(
    get,
    path = "/universities/featured",
    tag = UNIVERSITIES_TAG,
    params(FeaturedQuery),
    responses(
        (status = 200, description = "Featured universities", body = Vec<University>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(super) async fn list_featured_universities<S: UniversityStore>(
    State(services): State<SharedServices<S>>,
    Query(query): Query<FeaturedQuery>,
) -> UniversityResult<Json<Vec<University>>> {
    let universities = services.universities.list_featured(query.limit).await?;
    Ok(Json(universities))
}

/// Check whether a university name is free
#[utoipa::path(
    get,
    path = "/universities/name-availability",
    tag = UNIVERSITIES_TAG,
    params(NameAvailabilityQuery),
    responses(
        (status = 200, description = "Whether the name can be used", body = Availability),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(super) async fn check_name_availability<S: UniversityStore>(
    State(services): State<SharedServices<S>>,
    Query(query): Query<NameAvailabilityQuery>,
) -> UniversityResult<Json<Availability>> {
    let available = services
        .universities
        .is_name_unique(&query.name, query.exclude_id)
        .await?;
    Ok(Json(Availability { available }))
}

/// Check whether a slug is free in both slug columns
#[utoipa::path(
    get,
    path = "/universities/slug-availability",
    tag = UNIVERSITIES_TAG,
    params(SlugAvailabilityQuery),
    responses(
        (status = 200, description = "Whether the slug can be used", body = Availability),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(super) async fn check_slug_availability<S: UniversityStore>(
    State(services): State<SharedServices<S>>,
    Query(query): Query<SlugAvailabilityQuery>,
) -> UniversityResult<Json<Availability>> {
    let available = services
        .universities
        .is_slug_unique(&query.slug, query.exclude_id)
        .await?;
    Ok(Json(Availability { available }))
}

/// Get a university by its English or Arabic slug
#[utoipa::path(
    get,
    path = "/universities/by-slug/{slug}",
    tag = UNIVERSITIES_TAG,
    params(
        ("slug" = String, Path, description = "English or Arabic slug")
    ),
    responses(
        (status = 200, description = "University found", body = University),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(super) async fn get_university_by_slug<S: UniversityStore>(
    State(services): State<SharedServices<S>>,
    Path(slug): Path<String>,
) -> UniversityResult<Json<University>> {
    let university = services.universities.get_by_slug(&slug).await?;
    Ok(Json(university))
}

/// Get a university by ID
#[utoipa::path(
    get,
    path = "/universities/{id}",
    tag = UNIVERSITIES_TAG,
    params(
        ("id" = Uuid, Path, description = "University ID")
    ),
    responses(
        (status = 200, description = "University found", body = University),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(super) async fn get_university<S: UniversityStore>(
    State(services): State<SharedServices<S>>,
    UuidPath(id): UuidPath,
) -> UniversityResult<Json<University>> {
    let university = services.universities.get(id).await?;
    Ok(Json(university))
}

/// Update a university
#[utoipa::path(
    put,
    path = "/universities/{id}",
    tag = UNIVERSITIES_TAG,
    params(
        ("id" = Uuid, Path, description = "University ID")
    ),
    request_body = UpdateUniversity,
    responses(
        (status = 200, description = "University updated successfully", body = University),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(super) async fn update_university<S: UniversityStore>(
    State(services): State<SharedServices<S>>,
    UuidPath(id): UuidPath,
    actor: RequestActor,
    ValidatedJson(input): ValidatedJson<UpdateUniversity>,
) -> UniversityResult<Json<University>> {
    let ctx = audit_context(actor);
    let university = services.universities.update(&ctx, id, input).await?;
    Ok(Json(university))
}

/// Soft-delete a university together with its children
#[utoipa::path(
    delete,
    path = "/universities/{id}",
    tag = UNIVERSITIES_TAG,
    params(
        ("id" = Uuid, Path, description = "University ID")
    ),
    responses(
        (status = 204, description = "University deleted successfully"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(super) async fn delete_university<S: UniversityStore>(
    State(services): State<SharedServices<S>>,
    headers: HeaderMap,
    UuidPath(id): UuidPath,
    actor: RequestActor,
) -> UniversityResult<impl IntoResponse> {
    let ctx = audit_context(actor);
    services.universities.delete(&ctx, id).await?;

    audit_event(&ctx, "university.delete", format!("university:{}", id), &headers).log();

    Ok(StatusCode::NO_CONTENT)
}

/// Flip the active flag of a university
#[utoipa::path(
    post,
    path = "/universities/{id}/toggle-active",
    tag = UNIVERSITIES_TAG,
    params(
        ("id" = Uuid, Path, description = "University ID")
    ),
    responses(
        (status = 200, description = "Active flag toggled", body = University),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(super) async fn toggle_university_active<S: UniversityStore>(
    State(services): State<SharedServices<S>>,
    UuidPath(id): UuidPath,
    actor: RequestActor,
) -> UniversityResult<Json<University>> {
    let university = services
        .universities
        .toggle_active(&audit_context(actor), id)
        .await?;
    Ok(Json(university))
}

/// Flip the featured flag of a university
#[utoipa::path(
    post,
    path = "/universities/{id}/toggle-featured",
    tag = UNIVERSITIES_TAG,
    params(
        ("id" = Uuid, Path, description = "University ID")
    ),
    responses(
        (status = 200, description = "Featured flag toggled", body = University),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(super) async fn toggle_university_featured<S: UniversityStore>(
    State(services): State<SharedServices<S>>,
    UuidPath(id): UuidPath,
    actor: RequestActor,
) -> UniversityResult<Json<University>> {
    let university = services
        .universities
        .toggle_featured(&audit_context(actor), id)
        .await?;
    Ok(Json(university))
}
