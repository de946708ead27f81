use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Who performs a mutation and when.
///
/// Services stamp `created_*`/`updated_*`/`deleted_at` from this instead of
/// reading ambient state, so one request gets one timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuditContext {
    pub actor_id: Option<Uuid>,
    pub at: DateTime<Utc>,
}

impl AuditContext {
    pub fn new(actor_id: Option<Uuid>) -> Self {
        Self {
            actor_id,
            at: Utc::now(),
        }
    }

    /// Context for changes not attributable to a user (seeding, maintenance).
    pub fn system() -> Self {
        Self::new(None)
    }
}
