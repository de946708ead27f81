//! HTTP endpoints for universities and their FAQ, content and program children.
//!
//! Routes carry their full paths (`/universities/...`, `/university-faqs/...`)
//! so the application can merge this router directly under `/api`.

mod contents;
mod faqs;
mod programs;
mod universities;

use axum::{Router, http::HeaderMap};
use axum_helpers::{
    AuditEvent, AuditOutcome, RequestActor,
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, ConflictResponse,
        InternalServerErrorResponse, NotFoundResponse, OutOfRangeResponse,
    },
    extract_ip_from_headers, extract_user_agent,
};
use directory_rules::{Availability, AuditContext, DisplayOrderItem, ReorderRequest};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::models::{
    ContentType, CreateUniversity, CreateUniversityContent, CreateUniversityFaq,
    CreateUniversityProgram, DegreeLevel, University, UniversityContent, UniversityFaq,
    UniversityProgram, UpdateUniversity, UpdateUniversityContent, UpdateUniversityFaq,
    UpdateUniversityProgram,
};
use crate::repository::UniversityStore;
use crate::service::{
    UniversityContentService, UniversityFaqService, UniversityProgramService, UniversityService,
};

pub const UNIVERSITIES_TAG: &str = "universities";
pub const FAQS_TAG: &str = "university-faqs";
pub const CONTENTS_TAG: &str = "university-contents";
pub const PROGRAMS_TAG: &str = "university-programs";

/// OpenAPI documentation for the universities API
#[derive(OpenApi)]
#[openapi(
    paths(
        universities::list_universities,
        universities::create_university,
        universities::list_featured_universities,
        universities::check_name_availability,
        universities::check_slug_availability,
        universities::get_university_by_slug,
        universities::get_university,
        universities::update_university,
        universities::delete_university,
        universities::toggle_university_active,
        universities::toggle_university_featured,
        faqs::list_faqs,
        faqs::create_faq,
        faqs::reorder_faqs,
        faqs::get_faq,
        faqs::update_faq,
        faqs::delete_faq,
        faqs::toggle_faq_published,
        contents::list_contents,
        contents::create_content,
        contents::reorder_contents,
        contents::get_content_by_type,
        contents::get_content,
        contents::update_content,
        contents::delete_content,
        contents::toggle_content_published,
        programs::list_programs,
        programs::create_program,
        programs::reorder_programs,
        programs::get_program,
        programs::update_program,
        programs::delete_program,
        programs::toggle_program_active,
        programs::toggle_program_featured,
    ),
    components(
        schemas(
            University, CreateUniversity, UpdateUniversity,
            UniversityFaq, CreateUniversityFaq, UpdateUniversityFaq,
            UniversityContent, CreateUniversityContent, UpdateUniversityContent, ContentType,
            UniversityProgram, CreateUniversityProgram, UpdateUniversityProgram, DegreeLevel,
            ReorderRequest, DisplayOrderItem, Availability
        ),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            OutOfRangeResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = UNIVERSITIES_TAG, description = "University directory endpoints"),
        (name = FAQS_TAG, description = "Frequently asked questions per university"),
        (name = CONTENTS_TAG, description = "Typed content sections per university"),
        (name = PROGRAMS_TAG, description = "Academic programs per university")
    )
)]
pub struct ApiDoc;

/// The four managers sharing one store.
pub struct UniversityServices<S: UniversityStore> {
    pub universities: UniversityService<S>,
    pub faqs: UniversityFaqService<S, S>,
    pub contents: UniversityContentService<S, S>,
    pub programs: UniversityProgramService<S, S>,
}

impl<S: UniversityStore> UniversityServices<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            universities: UniversityService::new(store.clone()),
            faqs: UniversityFaqService::new(store.clone(), store.clone()),
            contents: UniversityContentService::new(store.clone(), store.clone()),
            programs: UniversityProgramService::new(store.clone(), store),
        }
    }
}

type SharedServices<S> = Arc<UniversityServices<S>>;

/// Create the universities router with all HTTP endpoints
pub fn router<S: UniversityStore>(store: Arc<S>) -> Router {
    let services = Arc::new(UniversityServices::new(store));

    Router::new()
        .merge(universities::routes::<S>())
        .merge(faqs::routes::<S>())
        .merge(contents::routes::<S>())
        .merge(programs::routes::<S>())
        .with_state(services)
}

fn audit_context(RequestActor(actor): RequestActor) -> AuditContext {
    AuditContext::new(actor)
}

fn audit_event(ctx: &AuditContext, action: &str, resource: String, headers: &HeaderMap) -> AuditEvent {
    AuditEvent::new(ctx.actor_id, action, Some(resource), AuditOutcome::Success)
        .with_ip(extract_ip_from_headers(headers))
        .with_user_agent(extract_user_agent(headers))
}
