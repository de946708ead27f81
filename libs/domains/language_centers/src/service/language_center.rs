use async_trait::async_trait;
use directory_rules::{
    AuditContext, UniqueFieldLookup, UniquenessValidator, generate_slug, is_valid_rating,
    resolve_slug,
};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::error::{LanguageCenterError, LanguageCenterResult, Resource};
use crate::models::{
    CreateLanguageCenter, LanguageCenter, LanguageCenterFilter, UpdateLanguageCenter,
};
use crate::repository::LanguageCenterRepository;

/// Adapts a [`LanguageCenterRepository`] to the shared uniqueness validator.
pub struct LanguageCenterLookup<R: ?Sized>(Arc<R>);

#[async_trait]
impl<R: LanguageCenterRepository + ?Sized> UniqueFieldLookup for LanguageCenterLookup<R> {
    type Error = LanguageCenterError;

    async fn name_exists(&self, name: &str, exclude_id: Option<Uuid>) -> LanguageCenterResult<bool> {
        self.0.exists_by_name(name, exclude_id).await
    }

    async fn slug_exists(&self, slug: &str, exclude_id: Option<Uuid>) -> LanguageCenterResult<bool> {
        self.0.exists_by_slug(slug, exclude_id).await
    }
}

/// Language center management, with the same slug and uniqueness rules as
/// universities
pub struct LanguageCenterService<R: LanguageCenterRepository + ?Sized> {
    repository: Arc<R>,
    uniqueness: UniquenessValidator<LanguageCenterLookup<R>>,
}

impl<R: LanguageCenterRepository + ?Sized> Clone for LanguageCenterService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            uniqueness: self.uniqueness.clone(),
        }
    }
}

fn check_rating(rating: Option<rust_decimal::Decimal>) -> LanguageCenterResult<()> {
    match rating {
        Some(rating) if !is_valid_rating(rating) => Err(LanguageCenterError::InvalidRating(rating)),
        _ => Ok(()),
    }
}

impl<R: LanguageCenterRepository + ?Sized> LanguageCenterService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        let lookup = LanguageCenterLookup(Arc::clone(&repository));
        Self {
            repository,
            uniqueness: UniquenessValidator::new(Arc::new(lookup)),
        }
    }

    pub async fn create(
        &self,
        ctx: &AuditContext,
        input: CreateLanguageCenter,
    ) -> LanguageCenterResult<LanguageCenter> {
        input
            .validate()
            .map_err(|e| LanguageCenterError::Validation(e.to_string()))?;
        check_rating(input.rating)?;

        self.uniqueness.ensure_name_unique(&input.name, None).await?;

        let slug = resolve_slug(input.slug.as_deref(), &input.name);
        if slug.is_empty() {
            return Err(LanguageCenterError::Validation(
                "a slug cannot be derived from the name".to_string(),
            ));
        }
        let slug_ar = Some(resolve_slug(input.slug_ar.as_deref(), &input.name_ar))
            .filter(|s| !s.is_empty());

        let mut candidates = vec![slug.as_str()];
        candidates.extend(slug_ar.as_deref());
        self.uniqueness.ensure_slugs_unique(&candidates, None).await?;

        let center = LanguageCenter::new(input, slug, slug_ar, ctx);
        self.repository.insert(center).await
    }

    /// Slugs only change when given explicitly.
    pub async fn update(
        &self,
        ctx: &AuditContext,
        id: Uuid,
        input: UpdateLanguageCenter,
    ) -> LanguageCenterResult<LanguageCenter> {
        input
            .validate()
            .map_err(|e| LanguageCenterError::Validation(e.to_string()))?;
        check_rating(input.rating)?;

        let mut center = self.get(id).await?;

        if let Some(name) = input.name.as_deref().filter(|n| *n != center.name) {
            self.uniqueness.ensure_name_unique(name, Some(id)).await?;
        }

        let new_slug = match input.slug.as_deref() {
            Some(explicit) => Some(self.checked_slug(explicit, &center.slug, id).await?),
            None => None,
        };
        let new_slug_ar = match input.slug_ar.as_deref() {
            Some(explicit) => {
                let current = center.slug_ar.clone().unwrap_or_default();
                Some(self.checked_slug(explicit, &current, id).await?)
            }
            None => None,
        };

        center.apply_update(input, ctx);
        if let Some(slug) = new_slug {
            center.slug = slug;
        }
        if let Some(slug_ar) = new_slug_ar {
            center.slug_ar = Some(slug_ar);
        }

        self.repository.update(center).await
    }

    /// Normalizes an explicit slug and checks it if it differs from `current`.
    async fn checked_slug(&self, explicit: &str, current: &str, id: Uuid) -> LanguageCenterResult<String> {
        let slug = generate_slug(explicit);
        if slug.is_empty() {
            return Err(LanguageCenterError::Validation(format!(
                "'{}' does not produce a valid slug",
                explicit
            )));
        }
        if slug != current {
            self.uniqueness.ensure_slugs_unique(&[&slug], Some(id)).await?;
        }
        Ok(slug)
    }

    pub async fn delete(&self, ctx: &AuditContext, id: Uuid) -> LanguageCenterResult<()> {
        self.get(id).await?;

        if !self.repository.soft_delete(id, ctx).await? {
            return Err(LanguageCenterError::NotFound(Resource::LanguageCenter, id));
        }
        Ok(())
    }

    pub async fn get(&self, id: Uuid) -> LanguageCenterResult<LanguageCenter> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(LanguageCenterError::NotFound(Resource::LanguageCenter, id))
    }

    /// Look up by English or Arabic slug
    pub async fn get_by_slug(&self, slug: &str) -> LanguageCenterResult<LanguageCenter> {
        self.repository
            .get_by_slug(slug)
            .await?
            .ok_or_else(|| LanguageCenterError::SlugNotFound(slug.to_string()))
    }

    pub async fn list(&self, filter: LanguageCenterFilter) -> LanguageCenterResult<Vec<LanguageCenter>> {
        self.repository.list(filter).await
    }

    pub async fn list_featured(&self, limit: u64) -> LanguageCenterResult<Vec<LanguageCenter>> {
        self.repository.list_featured(limit).await
    }

    pub async fn toggle_active(&self, ctx: &AuditContext, id: Uuid) -> LanguageCenterResult<LanguageCenter> {
        let mut center = self.get(id).await?;
        center.is_active = !center.is_active;
        center.touch(ctx);
        self.repository.update(center).await
    }

    pub async fn toggle_featured(&self, ctx: &AuditContext, id: Uuid) -> LanguageCenterResult<LanguageCenter> {
        let mut center = self.get(id).await?;
        center.is_featured = !center.is_featured;
        center.touch(ctx);
        self.repository.update(center).await
    }

    pub async fn is_name_unique(&self, name: &str, exclude_id: Option<Uuid>) -> LanguageCenterResult<bool> {
        self.uniqueness.is_name_unique(name, exclude_id).await
    }

    /// Availability of the slug `slug` would normalize to
    pub async fn is_slug_unique(&self, slug: &str, exclude_id: Option<Uuid>) -> LanguageCenterResult<bool> {
        let slug = generate_slug(slug);
        if slug.is_empty() {
            return Ok(false);
        }
        self.uniqueness.is_slug_unique(&slug, exclude_id).await
    }
}
