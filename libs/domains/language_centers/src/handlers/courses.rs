use axum::{
    Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post, put},
};
use axum_helpers::{
    RequestActor, UuidPath, ValidatedJson,
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        NotFoundResponse,
    },
};
use directory_rules::{ActiveFilter, ReorderRequest};

use super::{COURSES_TAG, SharedServices, audit_context, audit_event};
use crate::error::LanguageCenterResult;
use crate::models::{CreateLanguageCourse, LanguageCourse, UpdateLanguageCourse};
use crate::repository::LanguageCenterStore;

pub(super) fn routes<S: LanguageCenterStore>() -> Router<SharedServices<S>> {
    Router::new()
        .route(
            "/language-centers/{id}/courses",
            get(list_courses::<S>).post(create_course::<S>),
        )
        .route("/language-centers/{id}/courses/reorder", put(reorder_courses::<S>))
        .route(
            "/language-courses/{id}",
            get(get_course::<S>).put(update_course::<S>).delete(delete_course::<S>),
        )
        .route(
            "/language-courses/{id}/toggle-active",
            post(toggle_course_active::<S>),
        )
        .route(
            "/language-courses/{id}/toggle-featured",
            post(toggle_course_featured::<S>),
        )
}

/// List the courses of a language center in display order
#[utoipa::path(
    get,
    path = "/language-centers/{id}/courses",
    tag = COURSES_TAG,
    params(
        ("id" = Uuid, Path, description = "Language center ID"),
        ActiveFilter
    ),
    responses(
        (status = 200, description = "Courses of the language center", body = Vec<LanguageCourse>),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(super) async fn list_courses<S: LanguageCenterStore>(
    State(services): State<SharedServices<S>>,
    UuidPath(language_center_id): UuidPath,
    Query(filter): Query<ActiveFilter>,
) -> LanguageCenterResult<Json<Vec<LanguageCourse>>> {
    let courses = services
        .courses
        .list_by_center(language_center_id, filter.active_only)
        .await?;
    Ok(Json(courses))
}

/// Add a course to a language center
#[utoipa::path(
    post,
    path = "/language-centers/{id}/courses",
    tag = COURSES_TAG,
    params(
        ("id" = Uuid, Path, description = "Language center ID")
    ),
    request_body = CreateLanguageCourse,
    responses(
        (status = 201, description = "Course created successfully", body = LanguageCourse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(super) async fn create_course<S: LanguageCenterStore>(
    State(services): State<SharedServices<S>>,
    headers: HeaderMap,
    UuidPath(language_center_id): UuidPath,
    actor: RequestActor,
    ValidatedJson(input): ValidatedJson<CreateLanguageCourse>,
) -> LanguageCenterResult<impl IntoResponse> {
    let ctx = audit_context(actor);
    let course = services.courses.create(&ctx, language_center_id, input).await?;

    audit_event(&ctx, "language_course.create", format!("language_course:{}", course.id), &headers)
        .with_details(serde_json::json!({ "language_center_id": language_center_id }))
        .log();

    Ok((StatusCode::CREATED, Json(course)))
}

/// Set new display positions for courses of a language center
#[utoipa::path(
    put,
    path = "/language-centers/{id}/courses/reorder",
    tag = COURSES_TAG,
    params(
        ("id" = Uuid, Path, description = "Language center ID")
    ),
    request_body = ReorderRequest,
    responses(
        (status = 204, description = "Courses reordered"),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(super) async fn reorder_courses<S: LanguageCenterStore>(
    State(services): State<SharedServices<S>>,
    UuidPath(language_center_id): UuidPath,
    actor: RequestActor,
    ValidatedJson(request): ValidatedJson<ReorderRequest>,
) -> LanguageCenterResult<StatusCode> {
    services
        .courses
        .reorder(&audit_context(actor), language_center_id, request)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Get a course by ID
#[utoipa::path(
    get,
    path = "/language-courses/{id}",
    tag = COURSES_TAG,
    params(
        ("id" = Uuid, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Course found", body = LanguageCourse),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(super) async fn get_course<S: LanguageCenterStore>(
    State(services): State<SharedServices<S>>,
    UuidPath(id): UuidPath,
) -> LanguageCenterResult<Json<LanguageCourse>> {
    let course = services.courses.get(id).await?;
    Ok(Json(course))
}

/// Update a course
#[utoipa::path(
    put,
    path = "/language-courses/{id}",
    tag = COURSES_TAG,
    params(
        ("id" = Uuid, Path, description = "Course ID")
    ),
    request_body = UpdateLanguageCourse,
    responses(
        (status = 200, description = "Course updated successfully", body = LanguageCourse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(super) async fn update_course<S: LanguageCenterStore>(
    State(services): State<SharedServices<S>>,
    UuidPath(id): UuidPath,
    actor: RequestActor,
    ValidatedJson(input): ValidatedJson<UpdateLanguageCourse>,
) -> LanguageCenterResult<Json<LanguageCourse>> {
    let course = services.courses.update(&audit_context(actor), id, input).await?;
    Ok(Json(course))
}

/// Soft-delete a course
#[utoipa::path(
    delete,
    path = "/language-courses/{id}",
    tag = COURSES_TAG,
    params(
        ("id" = Uuid, Path, description = "Course ID")
    ),
    responses(
        (status = 204, description = "Course deleted successfully"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(super) async fn delete_course<S: LanguageCenterStore>(
    State(services): State<SharedServices<S>>,
    headers: HeaderMap,
    UuidPath(id): UuidPath,
    actor: RequestActor,
) -> LanguageCenterResult<StatusCode> {
    let ctx = audit_context(actor);
    services.courses.delete(&ctx, id).await?;

    audit_event(&ctx, "language_course.delete", format!("language_course:{}", id), &headers).log();

    Ok(StatusCode::NO_CONTENT)
}

/// Flip the active flag of a course
#[utoipa::path(
    post,
    path = "/language-courses/{id}/toggle-active",
    tag = COURSES_TAG,
    params(
        ("id" = Uuid, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Active flag toggled", body = LanguageCourse),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(super) async fn toggle_course_active<S: LanguageCenterStore>(
    State(services): State<SharedServices<S>>,
    UuidPath(id): UuidPath,
    actor: RequestActor,
) -> LanguageCenterResult<Json<LanguageCourse>> {
    let course = services
        .courses
        .toggle_active(&audit_context(actor), id)
        .await?;
    Ok(Json(course))
}

/// Flip the featured flag of a course
#[utoipa::path(
    post,
    path = "/language-courses/{id}/toggle-featured",
    tag = COURSES_TAG,
    params(
        ("id" = Uuid, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Featured flag toggled", body = LanguageCourse),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(super) async fn toggle_course_featured<S: LanguageCenterStore>(
    State(services): State<SharedServices<S>>,
    UuidPath(id): UuidPath,
    actor: RequestActor,
) -> LanguageCenterResult<Json<LanguageCourse>> {
    let course = services
        .courses
        .toggle_featured(&audit_context(actor), id)
        .await?;
    Ok(Json(course))
}
