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
use directory_rules::{PublishedFilter, ReorderRequest};

use super::{FAQS_TAG, SharedServices, audit_context, audit_event};
use crate::error::UniversityResult;
use crate::models::{CreateUniversityFaq, UniversityFaq, UpdateUniversityFaq};
use crate::repository::UniversityStore;

pub(super) fn routes<S: UniversityStore>() -> Router<SharedServices<S>> {
    Router::new()
        .route(
            "/universities/{id}/faqs",
            get(list_faqs::<S>).post(create_faq::<S>),
        )
        .route("/universities/{id}/faqs/reorder", put(reorder_faqs::<S>))
        .route(
            "/university-faqs/{id}",
            get(get_faq::<S>).put(update_faq::<S>).delete(delete_faq::<S>),
        )
        .route(
            "/university-faqs/{id}/toggle-published",
            post(toggle_faq_published::<S>),
        )
}

/// List the FAQs of a university in display order
#[utoipa::path(
    get,
    path = "/universities/{id}/faqs",
    tag = FAQS_TAG,
    params(
        ("id" = Uuid, Path, description = "University ID"),
        PublishedFilter
    ),
    responses(
        (status = 200, description = "FAQs of the university", body = Vec<UniversityFaq>),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(super) async fn list_faqs<S: UniversityStore>(
    State(services): State<SharedServices<S>>,
    UuidPath(university_id): UuidPath,
    Query(filter): Query<PublishedFilter>,
) -> UniversityResult<Json<Vec<UniversityFaq>>> {
    let faqs = services
        .faqs
        .list_by_university(university_id, filter.published_only)
        .await?;
    Ok(Json(faqs))
}

/// Add a FAQ to a university
#[utoipa::path(
    post,
    path = "/universities/{id}/faqs",
    tag = FAQS_TAG,
    params(
        ("id" = Uuid, Path, description = "University ID")
    ),
    request_body = CreateUniversityFaq,
    responses(
        (status = 201, description = "FAQ created successfully", body = UniversityFaq),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(super) async fn create_faq<S: UniversityStore>(
    State(services): State<SharedServices<S>>,
    headers: HeaderMap,
    UuidPath(university_id): UuidPath,
    actor: RequestActor,
    ValidatedJson(input): ValidatedJson<CreateUniversityFaq>,
) -> UniversityResult<impl IntoResponse> {
    let ctx = audit_context(actor);
    let faq = services.faqs.create(&ctx, university_id, input).await?;

    audit_event(&ctx, "university_faq.create", format!("university_faq:{}", faq.id), &headers)
        .with_details(serde_json::json!({ "university_id": university_id }))
        .log();

    Ok((StatusCode::CREATED, Json(faq)))
}

/// Set new display positions for FAQs of a university
#[utoipa::path(
    put,
    path = "/universities/{id}/faqs/reorder",
    tag = FAQS_TAG,
    params(
        ("id" = Uuid, Path, description = "University ID")
    ),
    request_body = ReorderRequest,
    responses(
        (status = 204, description = "FAQs reordered"),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(super) async fn reorder_faqs<S: UniversityStore>(
    State(services): State<SharedServices<S>>,
    UuidPath(university_id): UuidPath,
    actor: RequestActor,
    ValidatedJson(request): ValidatedJson<ReorderRequest>,
) -> UniversityResult<StatusCode> {
    services
        .faqs
        .reorder(&audit_context(actor), university_id, request)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Get a FAQ by ID
#[utoipa::path(
    get,
    path = "/university-faqs/{id}",
    tag = FAQS_TAG,
    params(
        ("id" = Uuid, Path, description = "FAQ ID")
    ),
    responses(
        (status = 200, description = "FAQ found", body = UniversityFaq),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(super) async fn get_faq<S: UniversityStore>(
    State(services): State<SharedServices<S>>,
    UuidPath(id): UuidPath,
) -> UniversityResult<Json<UniversityFaq>> {
    let faq = services.faqs.get(id).await?;
    Ok(Json(faq))
}

/// Update a FAQ
#[utoipa::path(
    put,
    path = "/university-faqs/{id}",
    tag = FAQS_TAG,
    params(
        ("id" = Uuid, Path, description = "FAQ ID")
    ),
    request_body = UpdateUniversityFaq,
    responses(
        (status = 200, description = "FAQ updated successfully", body = UniversityFaq),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(super) async fn update_faq<S: UniversityStore>(
    State(services): State<SharedServices<S>>,
    UuidPath(id): UuidPath,
    actor: RequestActor,
    ValidatedJson(input): ValidatedJson<UpdateUniversityFaq>,
) -> UniversityResult<Json<UniversityFaq>> {
    let faq = services.faqs.update(&audit_context(actor), id, input).await?;
    Ok(Json(faq))
}

/// Soft-delete a FAQ
#[utoipa::path(
    delete,
    path = "/university-faqs/{id}",
    tag = FAQS_TAG,
    params(
        ("id" = Uuid, Path, description = "FAQ ID")
    ),
    responses(
        (status = 204, description = "FAQ deleted successfully"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(super) async fn delete_faq<S: UniversityStore>(
    State(services): State<SharedServices<S>>,
    headers: HeaderMap,
    UuidPath(id): UuidPath,
    actor: RequestActor,
) -> UniversityResult<StatusCode> {
    let ctx = audit_context(actor);
    services.faqs.delete(&ctx, id).await?;

    audit_event(&ctx, "university_faq.delete", format!("university_faq:{}", id), &headers).log();

    Ok(StatusCode::NO_CONTENT)
}

/// Flip the published flag of a FAQ
#[utoipa::path(
    post,
    path = "/university-faqs/{id}/toggle-published",
    tag = FAQS_TAG,
    params(
        ("id" = Uuid, Path, description = "FAQ ID")
    ),
    responses(
        (status = 200, description = "Published flag toggled", body = UniversityFaq),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(super) async fn toggle_faq_published<S: UniversityStore>(
    State(services): State<SharedServices<S>>,
    UuidPath(id): UuidPath,
    actor: RequestActor,
) -> UniversityResult<Json<UniversityFaq>> {
    let faq = services
        .faqs
        .toggle_published(&audit_context(actor), id)
        .await?;
    Ok(Json(faq))
}
