use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post, put},
};
use axum_helpers::{
    RequestActor, UuidPath, ValidatedJson,
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, ConflictResponse,
        InternalServerErrorResponse, NotFoundResponse,
    },
};
use directory_rules::{PublishedFilter, ReorderRequest};
use uuid::Uuid;

use super::{CONTENTS_TAG, SharedServices, audit_context, audit_event};
use crate::error::UniversityResult;
use crate::models::{ContentType, CreateUniversityContent, UniversityContent, UpdateUniversityContent};
use crate::repository::UniversityStore;

pub(super) fn routes<S: UniversityStore>() -> Router<SharedServices<S>> {
    Router::new()
        .route(
            "/universities/{id}/contents",
            get(list_contents::<S>).post(create_content::<S>),
        )
        .route(
            "/universities/{id}/contents/reorder",
            put(reorder_contents::<S>),
        )
        .route(
            "/universities/{id}/contents/by-type/{content_type}",
            get(get_content_by_type::<S>),
        )
        .route(
            "/university-contents/{id}",
            get(get_content::<S>).put(update_content::<S>).delete(delete_content::<S>),
        )
        .route(
            "/university-contents/{id}/toggle-published",
            post(toggle_content_published::<S>),
        )
}

/// List the content sections of a university in display order
#[utoipa::path(
    get,
    path = "/universities/{id}/contents",
    tag = CONTENTS_TAG,
    params(
        ("id" = Uuid, Path, description = "University ID"),
        PublishedFilter
    ),
    responses(
        (status = 200, description = "Content sections of the university", body = Vec<UniversityContent>),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(super) async fn list_contents<S: UniversityStore>(
    State(services): State<SharedServices<S>>,
    UuidPath(university_id): UuidPath,
    Query(filter): Query<PublishedFilter>,
) -> UniversityResult<Json<Vec<UniversityContent>>> {
    let contents = services
        .contents
        .list_by_university(university_id, filter.published_only)
        .await?;
    Ok(Json(contents))
}

/// Add a content section to a university
#[utoipa::path(
    post,
    path = "/universities/{id}/contents",
    tag = CONTENTS_TAG,
    params(
        ("id" = Uuid, Path, description = "University ID")
    ),
    request_body = CreateUniversityContent,
    responses(
        (status = 201, description = "Content section created successfully", body = UniversityContent),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(super) async fn create_content<S: UniversityStore>(
    State(services): State<SharedServices<S>>,
    headers: HeaderMap,
    UuidPath(university_id): UuidPath,
    actor: RequestActor,
    ValidatedJson(input): ValidatedJson<CreateUniversityContent>,
) -> UniversityResult<impl IntoResponse> {
    let ctx = audit_context(actor);
    let content = services.contents.create(&ctx, university_id, input).await?;

    audit_event(&ctx, "university_content.create", format!("university_content:{}", content.id), &headers)
        .with_details(serde_json::json!({
            "university_id": university_id,
            "content_type": content.content_type.to_string(),
        }))
        .log();

    Ok((StatusCode::CREATED, Json(content)))
}

/// Set new display positions for content sections of a university
#[utoipa::path(
    put,
    path = "/universities/{id}/contents/reorder",
    tag = CONTENTS_TAG,
    params(
        ("id" = Uuid, Path, description = "University ID")
    ),
    request_body = ReorderRequest,
    responses(
        (status = 204, description = "Content sections reordered"),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(super) async fn reorder_contents<S: UniversityStore>(
    State(services): State<SharedServices<S>>,
    UuidPath(university_id): UuidPath,
    actor: RequestActor,
    ValidatedJson(request): ValidatedJson<ReorderRequest>,
) -> UniversityResult<StatusCode> {
    services
        .contents
        .reorder(&audit_context(actor), university_id, request)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Get the section of one type for a university
#[utoipa::path(
    get,
    path = "/universities/{id}/contents/by-type/{content_type}",
    tag = CONTENTS_TAG,
    params(
        ("id" = Uuid, Path, description = "University ID"),
        ("content_type" = ContentType, Path, description = "Section type")
    ),
    responses(
        (status = 200, description = "Content section found", body = UniversityContent),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(super) async fn get_content_by_type<S: UniversityStore>(
    State(services): State<SharedServices<S>>,
    Path((university_id, content_type)): Path<(Uuid, ContentType)>,
) -> UniversityResult<Json<UniversityContent>> {
    let content = services
        .contents
        .get_by_type(university_id, content_type)
        .await?;
    Ok(Json(content))
}

/// Get a content section by ID
#[utoipa::path(
    get,
    path = "/university-contents/{id}",
    tag = CONTENTS_TAG,
    params(
        ("id" = Uuid, Path, description = "Content ID")
    ),
    responses(
        (status = 200, description = "Content section found", body = UniversityContent),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(super) async fn get_content<S: UniversityStore>(
    State(services): State<SharedServices<S>>,
    UuidPath(id): UuidPath,
) -> UniversityResult<Json<UniversityContent>> {
    let content = services.contents.get(id).await?;
    Ok(Json(content))
}

/// Update a content section
#[utoipa::path(
    put,
    path = "/university-contents/{id}",
    tag = CONTENTS_TAG,
    params(
        ("id" = Uuid, Path, description = "Content ID")
    ),
    request_body = UpdateUniversityContent,
    responses(
        (status = 200, description = "Content section updated successfully", body = UniversityContent),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(super) async fn update_content<S: UniversityStore>(
    State(services): State<SharedServices<S>>,
    UuidPath(id): UuidPath,
    actor: RequestActor,
    ValidatedJson(input): ValidatedJson<UpdateUniversityContent>,
) -> UniversityResult<Json<UniversityContent>> {
    let content = services.contents.update(&audit_context(actor), id, input).await?;
    Ok(Json(content))
}

/// Soft-delete a content section
#[utoipa::path(
    delete,
    path = "/university-contents/{id}",
    tag = CONTENTS_TAG,
    params(
        ("id" = Uuid, Path, description = "Content ID")
    ),
    responses(
        (status = 204, description = "Content section deleted successfully"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(super) async fn delete_content<S: UniversityStore>(
    State(services): State<SharedServices<S>>,
    headers: HeaderMap,
    UuidPath(id): UuidPath,
    actor: RequestActor,
) -> UniversityResult<StatusCode> {
    let ctx = audit_context(actor);
    services.contents.delete(&ctx, id).await?;

    audit_event(&ctx, "university_content.delete", format!("university_content:{}", id), &headers).log();

    Ok(StatusCode::NO_CONTENT)
}

/// Flip the published flag of a content section
#[utoipa::path(
    post,
    path = "/university-contents/{id}/toggle-published",
    tag = CONTENTS_TAG,
    params(
        ("id" = Uuid, Path, description = "Content ID")
    ),
    responses(
        (status = 200, description = "Published flag toggled", body = UniversityContent),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(super) async fn toggle_content_published<S: UniversityStore>(
    State(services): State<SharedServices<S>>,
    UuidPath(id): UuidPath,
    actor: RequestActor,
) -> UniversityResult<Json<UniversityContent>> {
    let content = services
        .contents
        .toggle_published(&audit_context(actor), id)
        .await?;
    Ok(Json(content))
}
