//! HTTP endpoints for language centers, their FAQs and courses, and course prices.

mod courses;
mod faqs;
mod language_centers;
mod pricing;

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
    ApplyDiscountRequest, BulkCreateCoursePricing, BulkUpdateCoursePricing, CourseLevel,
    CoursePricing, CoursePricingUpdateItem, CreateCoursePricing, CreateLanguageCenter,
    CreateLanguageCenterFaq, CreateLanguageCourse, DeletedCount, LanguageCenter,
    LanguageCenterFaq, LanguageCourse, UpdateCoursePricing, UpdateLanguageCenter,
    UpdateLanguageCenterFaq, UpdateLanguageCourse,
};
use crate::repository::LanguageCenterStore;
use crate::service::{
    CoursePricingService, LanguageCenterFaqService, LanguageCenterService, LanguageCourseService,
};

pub const LANGUAGE_CENTERS_TAG: &str = "language-centers";
pub const FAQS_TAG: &str = "language-center-faqs";
pub const COURSES_TAG: &str = "language-courses";
pub const PRICING_TAG: &str = "course-pricing";

#[derive(OpenApi)]
#[openapi(
    paths(
        language_centers::list_language_centers,
        language_centers::create_language_center,
        language_centers::list_featured_language_centers,
        language_centers::check_name_availability,
        language_centers::check_slug_availability,
        language_centers::get_language_center_by_slug,
        language_centers::get_language_center,
        language_centers::update_language_center,
        language_centers::delete_language_center,
        language_centers::toggle_language_center_active,
        language_centers::toggle_language_center_featured,
        faqs::list_faqs,
        faqs::create_faq,
        faqs::reorder_faqs,
        faqs::get_faq,
        faqs::update_faq,
        faqs::delete_faq,
        faqs::toggle_faq_published,
        courses::list_courses,
        courses::create_course,
        courses::reorder_courses,
        courses::get_course,
        courses::update_course,
        courses::delete_course,
        courses::toggle_course_active,
        courses::toggle_course_featured,
        pricing::list_course_pricing,
        pricing::create_pricing,
        pricing::delete_course_pricing,
        pricing::create_pricing_bulk,
        pricing::update_pricing_bulk,
        pricing::apply_course_discount,
        pricing::get_pricing,
        pricing::update_pricing,
        pricing::delete_pricing,
    ),
    components(
        schemas(
            LanguageCenter, CreateLanguageCenter, UpdateLanguageCenter,
            LanguageCenterFaq, CreateLanguageCenterFaq, UpdateLanguageCenterFaq,
            LanguageCourse, CreateLanguageCourse, UpdateLanguageCourse, CourseLevel,
            CoursePricing, CreateCoursePricing, UpdateCoursePricing, CoursePricingUpdateItem,
            BulkCreateCoursePricing, BulkUpdateCoursePricing, ApplyDiscountRequest, DeletedCount,
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
        (name = LANGUAGE_CENTERS_TAG, description = "Language center directory endpoints"),
        (name = FAQS_TAG, description = "Frequently asked questions per language center"),
        (name = COURSES_TAG, description = "Courses offered by language centers"),
        (name = PRICING_TAG, description = "Course prices by duration, with discounts")
    )
)]
pub struct ApiDoc;

pub struct LanguageCenterServices<S: LanguageCenterStore> {
    pub centers: LanguageCenterService<S>,
    pub faqs: LanguageCenterFaqService<S, S>,
    pub courses: LanguageCourseService<S, S>,
    pub pricing: CoursePricingService<S, S>,
}

impl<S: LanguageCenterStore> LanguageCenterServices<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            centers: LanguageCenterService::new(store.clone()),
            faqs: LanguageCenterFaqService::new(store.clone(), store.clone()),
            courses: LanguageCourseService::new(store.clone(), store.clone()),
            pricing: CoursePricingService::new(store.clone(), store),
        }
    }
}

type SharedServices<S> = Arc<LanguageCenterServices<S>>;

pub fn router<S: LanguageCenterStore>(store: Arc<S>) -> Router {
    let services = Arc::new(LanguageCenterServices::new(store));

    Router::new()
        .merge(language_centers::routes::<S>())
        .merge(faqs::routes::<S>())
        .merge(courses::routes::<S>())
        .merge(pricing::routes::<S>())
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
