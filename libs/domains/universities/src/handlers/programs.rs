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

use super::{PROGRAMS_TAG, SharedServices, audit_context, audit_event};
use crate::error::UniversityResult;
use crate::models::{CreateUniversityProgram, UniversityProgram, UpdateUniversityProgram};
use crate::repository::UniversityStore;

pub(super) fn routes<S: UniversityStore>() -> Router<SharedServices<S>> {
    Router::new()
        .route(
            "/universities/{id}/programs",
            get(list_programs::<S>).post(create_program::<S>),
        )
        .route("/universities/{id}/programs/reorder", put(reorder_programs::<S>))
        .route(
            "/university-programs/{id}",
            get(get_program::<S>).put(update_program::<S>).delete(delete_program::<S>),
        )
        .route(
            "/university-programs/{id}/toggle-active",
            post(toggle_program_active::<S>),
        )
        .route(
            "/university-programs/{id}/toggle-featured",
            post(toggle_program_featured::<S>),
        )
}

/// List the programs of a university in display order
#[utoipa::path(
    get,
    path = "/universities/{id}/programs",
    tag = PROGRAMS_TAG,
    params(
        ("id" = Uuid, Path, description = "University ID"),
        ActiveFilter
    ),
    responses(
        (status = 200, description = "Programs of the university", body = Vec<UniversityProgram>),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(super) async fn list_programs<S: UniversityStore>(
    State(services): State<SharedServices<S>>,
    UuidPath(university_id): UuidPath,
    Query(filter): Query<ActiveFilter>,
) -> UniversityResult<Json<Vec<UniversityProgram>>> {
    let programs = services
        .programs
        .list_by_university(university_id, filter.active_only)
        .await?;
    Ok(Json(programs))
}

/// Add a program to a university
#[utoipa::path(
    post,
    path = "/universities/{id}/programs",
    tag = PROGRAMS_TAG,
    params(
        ("id" = Uuid, Path, description = "University ID")
    ),
    request_body = CreateUniversityProgram,
    responses(
        (status = 201, description = "Program created successfully", body = UniversityProgram),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(super) async fn create_program<S: UniversityStore>(
    State(services): State<SharedServices<S>>,
    headers: HeaderMap,
    UuidPath(university_id): UuidPath,
    actor: RequestActor,
    ValidatedJson(input): ValidatedJson<CreateUniversityProgram>,
) -> UniversityResult<impl IntoResponse> {
    let ctx = audit_context(actor);
    let program = services.programs.create(&ctx, university_id, input).await?;

    audit_event(&ctx, "university_program.create", format!("university_program:{}", program.id), &headers)
        .with_details(serde_json::json!({ "university_id": university_id }))
        .log();

    Ok((StatusCode::CREATED, Json(program)))
}

/// Set new display positions for programs of a university
#[utoipa::path(
    put,
    path = "/universities/{id}/programs/reorder",
    tag = PROGRAMS_TAG,
    params(
        ("id" = Uuid, Path, description = "University ID")
    ),
    request_body = ReorderRequest,
    responses(
        (status = 204, description = "Programs reordered"),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(super) async fn reorder_programs<S: UniversityStore>(
    State(services): State<SharedServices<S>>,
    UuidPath(university_id): UuidPath,
    actor: RequestActor,
    ValidatedJson(request): ValidatedJson<ReorderRequest>,
) -> UniversityResult<StatusCode> {
    services
        .programs
        .reorder(&audit_context(actor), university_id, request)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Get a program by ID
#[utoipa::path(
    get,
    path = "/university-programs/{id}",
    tag = PROGRAMS_TAG,
    params(
        ("id" = Uuid, Path, description = "Program ID")
    ),
    responses(
        (status = 200, description = "Program found", body = UniversityProgram),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(super) async fn get_program<S: UniversityStore>(
    State(services): State<SharedServices<S>>,
    UuidPath(id): UuidPath,
) -> UniversityResult<Json<UniversityProgram>> {
    let program = services.programs.get(id).await?;
    Ok(Json(program))
}

/// Update a program
#[utoipa::path(
    put,
    path = "/university-programs/{id}",
    tag = PROGRAMS_TAG,
    params(
        ("id" = Uuid, Path, description = "Program ID")
    ),
    request_body = UpdateUniversityProgram,
    responses(
        (status = 200, description = "Program updated successfully", body = UniversityProgram),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(super) async fn update_program<S: UniversityStore>(
    State(services): State<SharedServices<S>>,
    UuidPath(id): UuidPath,
    actor: RequestActor,
    ValidatedJson(input): ValidatedJson<UpdateUniversityProgram>,
) -> UniversityResult<Json<UniversityProgram>> {
    let program = services.programs.update(&audit_context(actor), id, input).await?;
    Ok(Json(program))
}

/// Soft-delete a program
#[utoipa::path(
    delete,
    path = "/university-programs/{id}",
    tag = PROGRAMS_TAG,
    params(
        ("id" = Uuid, Path, description = "Program ID")
    ),
    responses(
        (status = 204, description = "Program deleted successfully"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(super) async fn delete_program<S: UniversityStore>(
    State(services): State<SharedServices<S>>,
    headers: HeaderMap,
    UuidPath(id): UuidPath,
    actor: RequestActor,
) -> UniversityResult<StatusCode> {
    let ctx = audit_context(actor);
    services.programs.delete(&ctx, id).await?;

    audit_event(&ctx, "university_program.delete", format!("university_program:{}", id), &headers).log();

    Ok(StatusCode::NO_CONTENT)
}

/// Flip the active flag of a program
#[utoipa::path(
    post,
    path = "/university-programs/{id}/toggle-active",
    tag = PROGRAMS_TAG,
    params(
        ("id" = Uuid, Path, description = "Program ID")
    ),
    responses(
        (status = 200, description = "Active flag toggled", body = UniversityProgram),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(super) async fn toggle_program_active<S: UniversityStore>(
    State(services): State<SharedServices<S>>,
    UuidPath(id): UuidPath,
    actor: RequestActor,
) -> UniversityResult<Json<UniversityProgram>> {
    let program = services
        .programs
        .toggle_active(&audit_context(actor), id)
        .await?;
    Ok(Json(program))
}

/// Flip the featured flag of a program
#[utoipa::path(
    post,
    path = "/university-programs/{id}/toggle-featured",
    tag = PROGRAMS_TAG,
    params(
        ("id" = Uuid, Path, description = "Program ID")
    ),
    responses(
        (status = 200, description = "Featured flag toggled", body = UniversityProgram),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(super) async fn toggle_program_featured<S: UniversityStore>(
    State(services): State<SharedServices<S>>,
    UuidPath(id): UuidPath,
    actor: RequestActor,
) -> UniversityResult<Json<UniversityProgram>> {
    let program = services
        .programs
        .toggle_featured(&audit_context(actor), id)
        .await?;
    Ok(Json(program))
}
