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
use crate::error::LanguageCenterResult;
use crate::models::{CreateLanguageCenterFaq, LanguageCenterFaq, UpdateLanguageCenterFaq};
use crate::repository::LanguageCenterStore;

pub(super) fn routes<S: LanguageCenterStore>() -> Router<SharedServices<S>> {
    Router::new()
        .route(
            "/language-centers/{id}/faqs",
            get(list_faqs::<S>).post(create_faq::<S>),
        )
        .route("/language-centers/{id}/faqs/reorder", put(reorder_faqs::<S>))
        .route(
            "/language-center-faqs/{id}",
            get(get_faq::<S>).put(update_faq::<S>).delete(delete_faq::<S>),
        )
        .route(
            "/language-center-faqs/{id}/toggle-published",
            post(toggle_faq_published::<S>),
        )
}

/// List the FAQs of a language center in display order
#[utoipa::path(
    get,
    path = "/language-centers/{id}/faqs",
    tag = FAQS_TAG,
    params(
        ("id" = Uuid, Path, description = "Language center ID"),
        PublishedFilter
    ),
    responses(
        (status = 200, description = "FAQs of the language center", body = Vec<LanguageCenterFaq>),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(super) async fn list_faqs<S: LanguageCenterStore>(
    State(services): State<SharedServices<S>>,
    UuidPath(language_center_id): UuidPath,
    Query(filter): Query<PublishedFilter>,
) -> LanguageCenterResult<Json<Vec<LanguageCenterFaq>>> {
    let faqs = services
        .faqs
        .list_by_center(language_center_id, filter.published_only)
        .await?;
    Ok(Json(faqs))
}

/// Add a FAQ to a language center
#[utoipa::path(
    post,
    path = "/language-centers/{id}/faqs",
    tag = FAQS_TAG,
    params(
        ("id" = Uuid, Path, description = "Language center ID")
    ),
    request_body = CreateLanguageCenterFaq,
    responses(
        (status = 201, description = "FAQ created successfully", body = LanguageCenterFaq),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(super) async fn create_faq<S: LanguageCenterStore>(
    State(services): State<SharedServices<S>>,
    headers: HeaderMap,
    UuidPath(language_center_id): UuidPath,
    actor: RequestActor,
    ValidatedJson(input): ValidatedJson<CreateLanguageCenterFaq>,
) -> LanguageCenterResult<impl IntoResponse> {
    let ctx = audit_context(actor);
    let faq = services.faqs.create(&ctx, language_center_id, input).await?;

    audit_event(&ctx, "language_center_faq.create", format!("language_center_faq:{}", faq.id), &headers)
        .with_details(serde_json::json!({ "language_center_id": language_center_id }))
        .log();

    Ok((StatusCode::CREATED, Json(faq)))
}

/// Set new display positions for FAQs of a language center
#[utoipa::path(
    put,
    path = "/language-centers/{id}/faqs/reorder",
    tag = FAQS_TAG,
    params(
        ("id" = Uuid, Path, description = "Language center ID")
    ),
    request_body = ReorderRequest,
    responses(
        (status = 204, description = "FAQs reordered"),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(super) async fn reorder_faqs<S: LanguageCenterStore>(
    State(services): State<SharedServices<S>>,
    UuidPath(language_center_id): UuidPath,
    actor: RequestActor,
    ValidatedJson(request): ValidatedJson<ReorderRequest>,
) -> LanguageCenterResult<StatusCode> {
    services
        .faqs
        .reorder(&audit_context(actor), language_center_id, request)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Get a FAQ by ID
#[utoipa::path(
    get,
    path = "/language-center-faqs/{id}",
    tag = FAQS_TAG,
    params(
        ("id" = Uuid, Path, description = "FAQ ID")
    ),
    responses(
        (status = 200, description = "FAQ found", body = LanguageCenterFaq),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(super) async fn get_faq<S: LanguageCenterStore>(
    State(services): State<SharedServices<S>>,
    UuidPath(id): UuidPath,
) -> LanguageCenterResult<Json<LanguageCenterFaq>> {
    let faq = services.faqs.get(id).await?;
    Ok(Json(faq))
}

/// Update a FAQ
#[utoipa::path(
    put,
    path = "/language-center-faqs/{id}",
    tag = FAQS_TAG,
    params(
        ("id" = Uuid, Path, description = "FAQ ID")
    ),
    request_body = UpdateLanguageCenterFaq,
    responses(
        (status = 200, description = "FAQ updated successfully", body = LanguageCenterFaq),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(super) async fn update_faq<S: LanguageCenterStore>(
    State(services): State<SharedServices<S>>,
    UuidPath(id): UuidPath,
    actor: RequestActor,
    ValidatedJson(input): ValidatedJson<UpdateLanguageCenterFaq>,
) -> LanguageCenterResult<Json<LanguageCenterFaq>> {
    let faq = services.faqs.update(&audit_context(actor), id, input).await?;
    Ok(Json(faq))
}

/// Soft-delete a FAQ
#[utoipa::path(
    delete,
    path = "/language-center-faqs/{id}",
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
pub(super) async fn delete_faq<S: LanguageCenterStore>(
    State(services): State<SharedServices<S>>,
    headers: HeaderMap,
    UuidPath(id): UuidPath,
    actor: RequestActor,
) -> LanguageCenterResult<StatusCode> {
    let ctx = audit_context(actor);
    services.faqs.delete(&ctx, id).await?;

    audit_event(&ctx, "language_center_faq.delete", format!("language_center_faq:{}", id), &headers).log();

    Ok(StatusCode::NO_CONTENT)
}

/// Flip the published flag of a FAQ
#[utoipa::path(
    post,
    path = "/language-center-faqs/{id}/toggle-published",
    tag = FAQS_TAG,
    params(
        ("id" = Uuid, Path, description = "FAQ ID")
    ),
    responses(
        (status = 200, description = "Published flag toggled", body = LanguageCenterFaq),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(super) async fn toggle_faq_published<S: LanguageCenterStore>(
    State(services): State<SharedServices<S>>,
    UuidPath(id): UuidPath,
    actor: RequestActor,
) -> LanguageCenterResult<Json<LanguageCenterFaq>> {
    let faq = services
        .faqs
        .toggle_published(&audit_context(actor), id)
        .await?;
    Ok(Json(faq))
}
