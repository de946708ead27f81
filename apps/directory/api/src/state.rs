//! Shared application state passed to the routers at startup.

use directory_rules::UploadPolicy;
use std::sync::Arc;

/// Cloned into each router; every field is cheap to clone.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// PostgreSQL connection pool
    pub db: database::postgres::DatabaseConnection,
    /// Rules checked by `/api/blobs/validate`
    pub upload_policy: Arc<UploadPolicy>,
}
