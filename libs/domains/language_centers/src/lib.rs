//! Language Centers Domain
//!
//! Language schools with their FAQs and courses. Each course is priced per
//! duration through [`CoursePricing`] rows whose weekly fee and final price
//! come from the [`pricing`] calculator.
//!
//! Layering follows the universities domain: handlers call services, services
//! call the repository traits, and [`InMemoryLanguageCenterStore`] and
//! [`PgLanguageCenterStore`] implement every repository.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use domain_language_centers::{handlers, InMemoryLanguageCenterStore};
//!
//! let router = handlers::router(Arc::new(InMemoryLanguageCenterStore::new()));
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod pricing;
pub mod repository;
pub mod service;

pub use error::{LanguageCenterError, LanguageCenterResult, Resource};
pub use handlers::{ApiDoc, LanguageCenterServices};
pub use models::{
    ApplyDiscountRequest, BulkCreateCoursePricing, BulkUpdateCoursePricing, CourseLevel,
    CoursePricing, CoursePricingUpdateItem, CreateCoursePricing, CreateLanguageCenter,
    CreateLanguageCenterFaq, CreateLanguageCourse, DeletedCount, LanguageCenter,
    LanguageCenterFaq, LanguageCenterFilter, LanguageCourse, UpdateCoursePricing,
    UpdateLanguageCenter, UpdateLanguageCenterFaq, UpdateLanguageCourse,
};
pub use postgres::PgLanguageCenterStore;
pub use pricing::PricingTerms;
pub use repository::{
    CoursePricingRepository, InMemoryLanguageCenterStore, LanguageCenterFaqRepository,
    LanguageCenterRepository, LanguageCenterStore, LanguageCourseRepository,
};
pub use service::{
    CoursePricingService, LanguageCenterFaqService, LanguageCenterService, LanguageCourseService,
};
