//! Query strings shared by the directory list endpoints.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

fn default_featured_limit() -> u64 {
    10
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct FeaturedQuery {
    /// Maximum number of records (default 10)
    #[serde(default = "default_featured_limit")]
    pub limit: u64,
}

impl Default for FeaturedQuery {
    fn default() -> Self {
        Self {
            limit: default_featured_limit(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct NameAvailabilityQuery {
    pub name: String,
    /// Record being edited, which may keep its own name
    pub exclude_id: Option<Uuid>,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct SlugAvailabilityQuery {
    pub slug: String,
    /// Record being edited, which may keep its own slug
    pub exclude_id: Option<Uuid>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Availability {
    pub available: bool,
}

/// Listing filter for children with an `is_published` flag.
#[derive(Debug, Clone, Copy, Default, Deserialize, IntoParams)]
pub struct PublishedFilter {
    #[serde(default)]
    pub published_only: bool,
}

/// Listing filter for children with an `is_active` flag.
#[derive(Debug, Clone, Copy, Default, Deserialize, IntoParams)]
pub struct ActiveFilter {
    #[serde(default)]
    pub active_only: bool,
}
