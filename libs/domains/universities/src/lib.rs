//! Universities Domain
//!
//! Bilingual (English/Arabic) university directory with FAQ, typed content
//! sections and academic programs attached to each university.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, audit events
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Slugs, uniqueness, parent checks, ordering
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (traits + in-memory / PostgreSQL)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Records, DTOs, enums
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use domain_universities::{handlers, InMemoryUniversityStore};
//!
//! let store = Arc::new(InMemoryUniversityStore::new());
//! let router = handlers::router(store);
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{Resource, UniversityError, UniversityResult};
pub use handlers::{ApiDoc, UniversityServices};
pub use models::{
    ContentType, CreateUniversity, CreateUniversityContent, CreateUniversityFaq,
    CreateUniversityProgram, DegreeLevel, University, UniversityContent, UniversityFaq,
    UniversityFilter, UniversityProgram, UpdateUniversity, UpdateUniversityContent,
    UpdateUniversityFaq, UpdateUniversityProgram,
};
pub use postgres::PgUniversityStore;
pub use repository::{
    InMemoryUniversityStore, UniversityContentRepository, UniversityFaqRepository,
    UniversityProgramRepository, UniversityRepository, UniversityStore,
};
pub use service::{
    UniversityContentService, UniversityFaqService, UniversityProgramService, UniversityService,
};
