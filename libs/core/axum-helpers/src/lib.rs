//! # Axum Helpers
//!
//! Shared HTTP plumbing for the directory services.
//!
//! - **[`server`]**: router assembly with API docs, health endpoints, graceful shutdown
//! - **[`errors`]**: [`AppError`] and the uniform [`ErrorResponse`] body with error codes
//! - **[`extractors`]**: UUID path, validated JSON, acting user
//! - **[`audit`]**: audit events on the `audit` tracing target

pub mod audit;
pub mod errors;
pub mod extractors;
pub mod server;

pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_production_app, create_router,
    health_router, run_health_checks,
};

pub use errors::{AppError, ErrorCode, ErrorResponse};

pub use extractors::{RequestActor, UuidPath, ValidatedJson};

pub use audit::{AuditEvent, AuditOutcome, extract_ip_from_headers, extract_user_agent};
