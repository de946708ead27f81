//! Name and slug uniqueness among live (non-deleted) records.
//!
//! This is the fast path that produces friendly errors. Storage keeps partial
//! unique indexes as the final word, so two concurrent creates can still end
//! with one of them failing on insert.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

/// Storage lookups needed to check uniqueness.
///
/// Both methods only consider live rows and skip `exclude_id` so an update can
/// keep its own value.
#[cfg_attr(test, mockall::automock(type Error = String;))]
#[async_trait]
pub trait UniqueFieldLookup: Send + Sync {
    type Error: Send;

    /// Exact, case-sensitive match on the display name.
    async fn name_exists(&self, name: &str, exclude_id: Option<Uuid>) -> Result<bool, Self::Error>;

    /// Match on either the primary or the Arabic slug column.
    async fn slug_exists(&self, slug: &str, exclude_id: Option<Uuid>) -> Result<bool, Self::Error>;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UniquenessViolation {
    #[error("name '{0}' is already in use")]
    DuplicateName(String),

    #[error("slug '{0}' is already in use")]
    DuplicateSlug(String),
}

/// Outcome of an `ensure_*` check: either the lookup failed or the value is taken.
#[derive(Debug, Error)]
pub enum UniquenessError<E> {
    #[error(transparent)]
    Violation(#[from] UniquenessViolation),

    #[error("uniqueness lookup failed")]
    Lookup(E),
}

pub struct UniquenessValidator<L: ?Sized> {
    lookup: Arc<L>,
}

impl<L: ?Sized> Clone for UniquenessValidator<L> {
    fn clone(&self) -> Self {
        Self {
            lookup: Arc::clone(&self.lookup),
        }
    }
}

impl<L> UniquenessValidator<L>
where
    L: UniqueFieldLookup + ?Sized,
{
    pub fn new(lookup: Arc<L>) -> Self {
        Self { lookup }
    }

    pub async fn is_name_unique(&self, name: &str, exclude_id: Option<Uuid>) -> Result<bool, L::Error> {
        Ok(!self.lookup.name_exists(name, exclude_id).await?)
    }

    pub async fn is_slug_unique(&self, slug: &str, exclude_id: Option<Uuid>) -> Result<bool, L::Error> {
        Ok(!self.lookup.slug_exists(slug, exclude_id).await?)
    }

    pub async fn ensure_name_unique(
        &self,
        name: &str,
        exclude_id: Option<Uuid>,
    ) -> Result<(), UniquenessError<L::Error>> {
        if self
            .is_name_unique(name, exclude_id)
            .await
            .map_err(UniquenessError::Lookup)?
        {
            Ok(())
        } else {
            tracing::debug!(name, "Name already taken");
            Err(UniquenessViolation::DuplicateName(name.to_string()).into())
        }
    }

    /// Checks every non-empty slug in `slugs`, stopping at the first taken one.
    pub async fn ensure_slugs_unique(
        &self,
        slugs: &[&str],
        exclude_id: Option<Uuid>,
    ) -> Result<(), UniquenessError<L::Error>> {
        for slug in slugs.iter().filter(|s| !s.is_empty()) {
            if !self
                .is_slug_unique(slug, exclude_id)
                .await
                .map_err(UniquenessError::Lookup)?
            {
                tracing::debug!(slug, "Slug already taken");
                return Err(UniquenessViolation::DuplicateSlug(slug.to_string()).into());
            }
        }
        Ok(())
    }
}
