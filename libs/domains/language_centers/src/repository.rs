use async_trait::async_trait;
use directory_rules::{
    AuditContext, DisplayOrderItem, apply_reorder, live_children, max_display_order,
};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{LanguageCenterError, LanguageCenterResult, Resource};
use crate::models::{
    CoursePricing, LanguageCenter, LanguageCenterFaq, LanguageCenterFilter, LanguageCourse,
};

/// Storage of language center records. Every read skips soft-deleted rows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LanguageCenterRepository: Send + Sync {
    async fn insert(&self, center: LanguageCenter) -> LanguageCenterResult<LanguageCenter>;

    async fn update(&self, center: LanguageCenter) -> LanguageCenterResult<LanguageCenter>;

    async fn get_by_id(&self, id: Uuid) -> LanguageCenterResult<Option<LanguageCenter>>;

    /// Matches either slug column
    async fn get_by_slug(&self, slug: &str) -> LanguageCenterResult<Option<LanguageCenter>>;

    async fn list(&self, filter: LanguageCenterFilter) -> LanguageCenterResult<Vec<LanguageCenter>>;

    async fn list_featured(&self, limit: u64) -> LanguageCenterResult<Vec<LanguageCenter>>;

    async fn soft_delete(&self, id: Uuid, ctx: &AuditContext) -> LanguageCenterResult<bool>;

    async fn exists_by_name(&self, name: &str, exclude_id: Option<Uuid>)
    -> LanguageCenterResult<bool>;

    async fn exists_by_slug(&self, slug: &str, exclude_id: Option<Uuid>)
    -> LanguageCenterResult<bool>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LanguageCenterFaqRepository: Send + Sync {
    async fn insert_faq(&self, faq: LanguageCenterFaq) -> LanguageCenterResult<LanguageCenterFaq>;

    async fn update_faq(&self, faq: LanguageCenterFaq) -> LanguageCenterResult<LanguageCenterFaq>;

    async fn get_faq(&self, id: Uuid) -> LanguageCenterResult<Option<LanguageCenterFaq>>;

    async fn list_faqs(
        &self,
        language_center_id: Uuid,
        published_only: bool,
    ) -> LanguageCenterResult<Vec<LanguageCenterFaq>>;

    async fn soft_delete_faq(&self, id: Uuid, ctx: &AuditContext) -> LanguageCenterResult<bool>;

    async fn max_faq_display_order(&self, language_center_id: Uuid)
    -> LanguageCenterResult<Option<i32>>;

    async fn reorder_faqs(
        &self,
        language_center_id: Uuid,
        items: &[DisplayOrderItem],
        ctx: &AuditContext,
    ) -> LanguageCenterResult<()>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LanguageCourseRepository: Send + Sync {
    async fn insert_course(&self, course: LanguageCourse) -> LanguageCenterResult<LanguageCourse>;

    async fn update_course(&self, course: LanguageCourse) -> LanguageCenterResult<LanguageCourse>;

    async fn get_course(&self, id: Uuid) -> LanguageCenterResult<Option<LanguageCourse>>;

    async fn list_courses(
        &self,
        language_center_id: Uuid,
        active_only: bool,
    ) -> LanguageCenterResult<Vec<LanguageCourse>>;

    async fn soft_delete_course(&self, id: Uuid, ctx: &AuditContext) -> LanguageCenterResult<bool>;

    async fn max_course_display_order(
        &self,
        language_center_id: Uuid,
    ) -> LanguageCenterResult<Option<i32>>;

    async fn reorder_courses(
        &self,
        language_center_id: Uuid,
        items: &[DisplayOrderItem],
        ctx: &AuditContext,
    ) -> LanguageCenterResult<()>;
}

/// Storage of course prices.
///
/// `(language_course_id, duration_weeks)` is unique among live rows. Batch
/// methods apply every row or none.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CoursePricingRepository: Send + Sync {
    async fn insert_pricing(&self, pricing: CoursePricing) -> LanguageCenterResult<CoursePricing>;

    async fn update_pricing(&self, pricing: CoursePricing) -> LanguageCenterResult<CoursePricing>;

    async fn get_pricing(&self, id: Uuid) -> LanguageCenterResult<Option<CoursePricing>>;

    /// Ordered by duration ascending
    async fn list_pricing(
        &self,
        language_course_id: Uuid,
        active_only: bool,
    ) -> LanguageCenterResult<Vec<CoursePricing>>;

    async fn soft_delete_pricing(&self, id: Uuid, ctx: &AuditContext) -> LanguageCenterResult<bool>;

    async fn exists_by_duration(
        &self,
        language_course_id: Uuid,
        duration_weeks: i32,
        exclude_id: Option<Uuid>,
    ) -> LanguageCenterResult<bool>;

    async fn insert_pricing_batch(
        &self,
        rows: Vec<CoursePricing>,
    ) -> LanguageCenterResult<Vec<CoursePricing>>;

    async fn update_pricing_batch(
        &self,
        rows: Vec<CoursePricing>,
    ) -> LanguageCenterResult<Vec<CoursePricing>>;

    /// Returns how many rows were deleted
    async fn soft_delete_pricing_by_course(
        &self,
        language_course_id: Uuid,
        ctx: &AuditContext,
    ) -> LanguageCenterResult<u64>;
}

/// Everything the HTTP layer needs from one backing store.
pub trait LanguageCenterStore:
    LanguageCenterRepository
    + LanguageCenterFaqRepository
    + LanguageCourseRepository
    + CoursePricingRepository
    + 'static
{
}

impl<T> LanguageCenterStore for T where
    T: LanguageCenterRepository
        + LanguageCenterFaqRepository
        + LanguageCourseRepository
        + CoursePricingRepository
        + 'static
{
}

/// In-memory implementation of every language center repository (dev and tests).
#[derive(Clone, Default)]
pub struct InMemoryLanguageCenterStore {
    centers: Arc<RwLock<HashMap<Uuid, LanguageCenter>>>,
    faqs: Arc<RwLock<HashMap<Uuid, LanguageCenterFaq>>>,
    courses: Arc<RwLock<HashMap<Uuid, LanguageCourse>>>,
    pricing: Arc<RwLock<HashMap<Uuid, CoursePricing>>>,
}

impl InMemoryLanguageCenterStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn check_unique_center(
    rows: &HashMap<Uuid, LanguageCenter>,
    candidate: &LanguageCenter,
) -> LanguageCenterResult<()> {
    let others = rows
        .values()
        .filter(|c| c.deleted_at.is_none() && c.id != candidate.id);

    for other in others {
        if other.name == candidate.name {
            return Err(LanguageCenterError::DuplicateName(candidate.name.clone()));
        }
        if other.has_slug(&candidate.slug) {
            return Err(LanguageCenterError::DuplicateSlug(candidate.slug.clone()));
        }
        if let Some(slug_ar) = candidate.slug_ar.as_deref().filter(|s| other.has_slug(s)) {
            return Err(LanguageCenterError::DuplicateSlug(slug_ar.to_string()));
        }
    }
    Ok(())
}

/// Checks `batch` against the stored rows and against itself.
///
/// Rows of the batch replace their stored versions, so an update that swaps
/// two durations is accepted.
fn check_unique_durations(
    rows: &HashMap<Uuid, CoursePricing>,
    batch: &[CoursePricing],
) -> LanguageCenterResult<()> {
    let batch_ids: HashSet<Uuid> = batch.iter().map(|p| p.id).collect();
    let mut taken: HashSet<(Uuid, i32)> = rows
        .values()
        .filter(|p| p.deleted_at.is_none() && !batch_ids.contains(&p.id))
        .map(|p| (p.language_course_id, p.duration_weeks))
        .collect();

    for pricing in batch {
        if !taken.insert((pricing.language_course_id, pricing.duration_weeks)) {
            return Err(LanguageCenterError::DuplicateDuration(pricing.duration_weeks));
        }
    }
    Ok(())
}

fn sorted_centers(rows: impl Iterator<Item = LanguageCenter>) -> Vec<LanguageCenter> {
    let mut centers: Vec<LanguageCenter> = rows.collect();
    centers.sort_by(|a, b| {
        a.display_order
            .cmp(&b.display_order)
            .then_with(|| a.name.cmp(&b.name))
    });
    centers
}

fn live_mut<'a, T>(
    rows: &'a mut HashMap<Uuid, T>,
    id: Uuid,
    is_live: impl Fn(&T) -> bool,
) -> Option<&'a mut T> {
    rows.get_mut(&id).filter(|row| is_live(row))
}

#[async_trait]
impl LanguageCenterRepository for InMemoryLanguageCenterStore {
    async fn insert(&self, center: LanguageCenter) -> LanguageCenterResult<LanguageCenter> {
        let mut rows = self.centers.write().await;
        check_unique_center(&rows, &center)?;
        rows.insert(center.id, center.clone());

        tracing::info!(language_center_id = %center.id, "Created language center");
        Ok(center)
    }

    async fn update(&self, center: LanguageCenter) -> LanguageCenterResult<LanguageCenter> {
        let mut rows = self.centers.write().await;
        check_unique_center(&rows, &center)?;

        let row = live_mut(&mut rows, center.id, |c| c.deleted_at.is_none())
            .ok_or(LanguageCenterError::NotFound(Resource::LanguageCenter, center.id))?;
        *row = center.clone();

        tracing::info!(language_center_id = %center.id, "Updated language center");
        Ok(center)
    }

    async fn get_by_id(&self, id: Uuid) -> LanguageCenterResult<Option<LanguageCenter>> {
        let rows = self.centers.read().await;
        Ok(rows.get(&id).filter(|c| c.deleted_at.is_none()).cloned())
    }

    async fn get_by_slug(&self, slug: &str) -> LanguageCenterResult<Option<LanguageCenter>> {
        let rows = self.centers.read().await;
        Ok(rows
            .values()
            .find(|c| c.deleted_at.is_none() && c.has_slug(slug))
            .cloned())
    }

    async fn list(&self, filter: LanguageCenterFilter) -> LanguageCenterResult<Vec<LanguageCenter>> {
        let rows = self.centers.read().await;
        let matching = rows
            .values()
            .filter(|c| c.deleted_at.is_none() && filter.matches(c))
            .cloned();

        Ok(sorted_centers(matching)
            .into_iter()
            .skip(filter.offset as usize)
            .take(filter.limit as usize)
            .collect())
    }

    async fn list_featured(&self, limit: u64) -> LanguageCenterResult<Vec<LanguageCenter>> {
        let rows = self.centers.read().await;
        let featured = rows
            .values()
            .filter(|c| c.deleted_at.is_none() && c.is_active && c.is_featured)
            .cloned();

        Ok(sorted_centers(featured).into_iter().take(limit as usize).collect())
    }

    async fn soft_delete(&self, id: Uuid, ctx: &AuditContext) -> LanguageCenterResult<bool> {
        let mut rows = self.centers.write().await;
        match live_mut(&mut rows, id, |c| c.deleted_at.is_none()) {
            Some(center) => {
                center.deleted_at = Some(ctx.at);
                center.touch(ctx);
                tracing::info!(language_center_id = %id, "Deleted language center");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn exists_by_name(
        &self,
        name: &str,
        exclude_id: Option<Uuid>,
    ) -> LanguageCenterResult<bool> {
        let rows = self.centers.read().await;
        Ok(rows
            .values()
            .any(|c| c.deleted_at.is_none() && Some(c.id) != exclude_id && c.name == name))
    }

    async fn exists_by_slug(
        &self,
        slug: &str,
        exclude_id: Option<Uuid>,
    ) -> LanguageCenterResult<bool> {
        let rows = self.centers.read().await;
        Ok(rows
            .values()
            .any(|c| c.deleted_at.is_none() && Some(c.id) != exclude_id && c.has_slug(slug)))
    }
}

#[async_trait]
impl LanguageCenterFaqRepository for InMemoryLanguageCenterStore {
    async fn insert_faq(&self, faq: LanguageCenterFaq) -> LanguageCenterResult<LanguageCenterFaq> {
        self.faqs.write().await.insert(faq.id, faq.clone());
        tracing::info!(
            faq_id = %faq.id,
            language_center_id = %faq.language_center_id,
            "Created language center FAQ"
        );
        Ok(faq)
    }

    async fn update_faq(&self, faq: LanguageCenterFaq) -> LanguageCenterResult<LanguageCenterFaq> {
        let mut rows = self.faqs.write().await;
        let row = live_mut(&mut rows, faq.id, |f| f.deleted_at.is_none())
            .ok_or(LanguageCenterError::NotFound(Resource::Faq, faq.id))?;
        *row = faq.clone();
        tracing::info!(faq_id = %faq.id, "Updated language center FAQ");
        Ok(faq)
    }

    async fn get_faq(&self, id: Uuid) -> LanguageCenterResult<Option<LanguageCenterFaq>> {
        let rows = self.faqs.read().await;
        Ok(rows.get(&id).filter(|f| f.deleted_at.is_none()).cloned())
    }

    async fn list_faqs(
        &self,
        language_center_id: Uuid,
        published_only: bool,
    ) -> LanguageCenterResult<Vec<LanguageCenterFaq>> {
        let rows = self.faqs.read().await;
        let mut faqs = live_children(rows.values(), language_center_id);
        if published_only {
            faqs.retain(|f| f.is_published);
        }
        Ok(faqs)
    }

    async fn soft_delete_faq(&self, id: Uuid, ctx: &AuditContext) -> LanguageCenterResult<bool> {
        let mut rows = self.faqs.write().await;
        match live_mut(&mut rows, id, |f| f.deleted_at.is_none()) {
            Some(faq) => {
                faq.deleted_at = Some(ctx.at);
                faq.touch(ctx);
                tracing::info!(faq_id = %id, "Deleted language center FAQ");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn max_faq_display_order(
        &self,
        language_center_id: Uuid,
    ) -> LanguageCenterResult<Option<i32>> {
        let rows = self.faqs.read().await;
        Ok(max_display_order(rows.values(), language_center_id))
    }

    async fn reorder_faqs(
        &self,
        language_center_id: Uuid,
        items: &[DisplayOrderItem],
        ctx: &AuditContext,
    ) -> LanguageCenterResult<()> {
        let mut rows = self.faqs.write().await;
        apply_reorder(&mut rows, language_center_id, items, ctx)
            .map_err(|id| LanguageCenterError::NotFound(Resource::Faq, id))?;
        tracing::info!(
            language_center_id = %language_center_id,
            count = items.len(),
            "Reordered language center FAQs"
        );
        Ok(())
    }
}

#[async_trait]
impl LanguageCourseRepository for InMemoryLanguageCenterStore {
    async fn insert_course(&self, course: LanguageCourse) -> LanguageCenterResult<LanguageCourse> {
        self.courses.write().await.insert(course.id, course.clone());
        tracing::info!(
            course_id = %course.id,
            language_center_id = %course.language_center_id,
            "Created language course"
        );
        Ok(course)
    }

    async fn update_course(&self, course: LanguageCourse) -> LanguageCenterResult<LanguageCourse> {
        let mut rows = self.courses.write().await;
        let row = live_mut(&mut rows, course.id, |c| c.deleted_at.is_none())
            .ok_or(LanguageCenterError::NotFound(Resource::Course, course.id))?;
        *row = course.clone();
        tracing::info!(course_id = %course.id, "Updated language course");
        Ok(course)
    }

    async fn get_course(&self, id: Uuid) -> LanguageCenterResult<Option<LanguageCourse>> {
        let rows = self.courses.read().await;
        Ok(rows.get(&id).filter(|c| c.deleted_at.is_none()).cloned())
    }

    async fn list_courses(
        &self,
        language_center_id: Uuid,
        active_only: bool,
    ) -> LanguageCenterResult<Vec<LanguageCourse>> {
        let rows = self.courses.read().await;
        let mut courses = live_children(rows.values(), language_center_id);
        if active_only {
            courses.retain(|c| c.is_active);
        }
        Ok(courses)
    }

    async fn soft_delete_course(&self, id: Uuid, ctx: &AuditContext) -> LanguageCenterResult<bool> {
        let mut rows = self.courses.write().await;
        match live_mut(&mut rows, id, |c| c.deleted_at.is_none()) {
            Some(course) => {
                course.deleted_at = Some(ctx.at);
                course.touch(ctx);
                tracing::info!(course_id = %id, "Deleted language course");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn max_course_display_order(
        &self,
        language_center_id: Uuid,
    ) -> LanguageCenterResult<Option<i32>> {
        let rows = self.courses.read().await;
        Ok(max_display_order(rows.values(), language_center_id))
    }

    async fn reorder_courses(
        &self,
        language_center_id: Uuid,
        items: &[DisplayOrderItem],
        ctx: &AuditContext,
    ) -> LanguageCenterResult<()> {
        let mut rows = self.courses.write().await;
        apply_reorder(&mut rows, language_center_id, items, ctx)
            .map_err(|id| LanguageCenterError::NotFound(Resource::Course, id))?;
        tracing::info!(
            language_center_id = %language_center_id,
            count = items.len(),
            "Reordered language courses"
        );
        Ok(())
    }
}

#[async_trait]
impl CoursePricingRepository for InMemoryLanguageCenterStore {
    async fn insert_pricing(&self, pricing: CoursePricing) -> LanguageCenterResult<CoursePricing> {
        let mut rows = self.pricing.write().await;
        check_unique_durations(&rows, std::slice::from_ref(&pricing))?;
        rows.insert(pricing.id, pricing.clone());
        tracing::info!(
            pricing_id = %pricing.id,
            course_id = %pricing.language_course_id,
            duration_weeks = pricing.duration_weeks,
            "Created course pricing"
        );
        Ok(pricing)
    }

    async fn update_pricing(&self, pricing: CoursePricing) -> LanguageCenterResult<CoursePricing> {
        let mut rows = self.pricing.write().await;
        check_unique_durations(&rows, std::slice::from_ref(&pricing))?;
        let row = live_mut(&mut rows, pricing.id, |p| p.deleted_at.is_none())
            .ok_or(LanguageCenterError::NotFound(Resource::Pricing, pricing.id))?;
        *row = pricing.clone();
        tracing::info!(pricing_id = %pricing.id, "Updated course pricing");
        Ok(pricing)
    }

    async fn get_pricing(&self, id: Uuid) -> LanguageCenterResult<Option<CoursePricing>> {
        let rows = self.pricing.read().await;
        Ok(rows.get(&id).filter(|p| p.deleted_at.is_none()).cloned())
    }

    async fn list_pricing(
        &self,
        language_course_id: Uuid,
        active_only: bool,
    ) -> LanguageCenterResult<Vec<CoursePricing>> {
        let rows = self.pricing.read().await;
        let mut pricing: Vec<CoursePricing> = rows
            .values()
            .filter(|p| {
                p.deleted_at.is_none()
                    && p.language_course_id == language_course_id
                    && (!active_only || p.is_active)
            })
            .cloned()
            .collect();
        pricing.sort_by_key(|p| p.duration_weeks);
        Ok(pricing)
    }

    async fn soft_delete_pricing(&self, id: Uuid, ctx: &AuditContext) -> LanguageCenterResult<bool> {
        let mut rows = self.pricing.write().await;
        match live_mut(&mut rows, id, |p| p.deleted_at.is_none()) {
            Some(pricing) => {
                pricing.deleted_at = Some(ctx.at);
                pricing.touch(ctx);
                tracing::info!(pricing_id = %id, "Deleted course pricing");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn exists_by_duration(
        &self,
        language_course_id: Uuid,
        duration_weeks: i32,
        exclude_id: Option<Uuid>,
    ) -> LanguageCenterResult<bool> {
        let rows = self.pricing.read().await;
        Ok(rows.values().any(|p| {
            p.deleted_at.is_none()
                && Some(p.id) != exclude_id
                && p.language_course_id == language_course_id
                && p.duration_weeks == duration_weeks
        }))
    }

    async fn insert_pricing_batch(
        &self,
        batch: Vec<CoursePricing>,
    ) -> LanguageCenterResult<Vec<CoursePricing>> {
        let mut rows = self.pricing.write().await;
        check_unique_durations(&rows, &batch)?;
        for pricing in &batch {
            rows.insert(pricing.id, pricing.clone());
        }
        tracing::info!(count = batch.len(), "Created course pricing batch");
        Ok(batch)
    }

    async fn update_pricing_batch(
        &self,
        batch: Vec<CoursePricing>,
    ) -> LanguageCenterResult<Vec<CoursePricing>> {
        let mut rows = self.pricing.write().await;
        if let Some(missing) = batch
            .iter()
            .find(|p| !rows.get(&p.id).is_some_and(|row| row.deleted_at.is_none()))
        {
            return Err(LanguageCenterError::NotFound(Resource::Pricing, missing.id));
        }
        check_unique_durations(&rows, &batch)?;
        for pricing in &batch {
            rows.insert(pricing.id, pricing.clone());
        }
        tracing::info!(count = batch.len(), "Updated course pricing batch");
        Ok(batch)
    }

    async fn soft_delete_pricing_by_course(
        &self,
        language_course_id: Uuid,
        ctx: &AuditContext,
    ) -> LanguageCenterResult<u64> {
        let mut rows = self.pricing.write().await;
        let mut deleted = 0;
        for pricing in rows
            .values_mut()
            .filter(|p| p.deleted_at.is_none() && p.language_course_id == language_course_id)
        {
            pricing.deleted_at = Some(ctx.at);
            pricing.touch(ctx);
            deleted += 1;
        }
        tracing::info!(course_id = %language_course_id, deleted, "Deleted course pricing");
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CreateCoursePricing;
    use rust_decimal_macros::dec;

    fn pricing(course_id: Uuid, weeks: i32) -> CoursePricing {
        CoursePricing::new(
            course_id,
            CreateCoursePricing {
                duration_weeks: weeks,
                fee: dec!(1000),
                currency: "USD".to_string(),
                has_discount: false,
                discount_percentage: None,
                discount_amount: None,
                is_active: true,
            },
            &AuditContext::system(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_duration_unique_per_course() {
        let store = InMemoryLanguageCenterStore::new();
        let course_id = Uuid::now_v7();
        store.insert_pricing(pricing(course_id, 4)).await.unwrap();

        let err = store.insert_pricing(pricing(course_id, 4)).await.unwrap_err();
        assert!(matches!(err, LanguageCenterError::DuplicateDuration(4)));

        // Another course may use the same duration
        assert!(store.insert_pricing(pricing(Uuid::now_v7(), 4)).await.is_ok());
    }

    #[tokio::test]
    async fn test_batch_insert_is_all_or_nothing() {
        let store = InMemoryLanguageCenterStore::new();
        let course_id = Uuid::now_v7();

        let err = store
            .insert_pricing_batch(vec![
                pricing(course_id, 4),
                pricing(course_id, 8),
                pricing(course_id, 4),
            ])
            .await
            .unwrap_err();
        assert!(matches!(err, LanguageCenterError::DuplicateDuration(4)));
        assert!(store.list_pricing(course_id, false).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_batch_update_may_swap_durations() {
        let store = InMemoryLanguageCenterStore::new();
        let course_id = Uuid::now_v7();
        let mut short = store.insert_pricing(pricing(course_id, 4)).await.unwrap();
        let mut long = store.insert_pricing(pricing(course_id, 8)).await.unwrap();

        short.duration_weeks = 8;
        long.duration_weeks = 4;
        store.update_pricing_batch(vec![short, long]).await.unwrap();

        let weeks: Vec<i32> = store
            .list_pricing(course_id, false)
            .await
            .unwrap()
            .iter()
            .map(|p| p.duration_weeks)
            .collect();
        assert_eq!(weeks, vec![4, 8]);
    }

    #[tokio::test]
    async fn test_list_pricing_sorted_and_filtered() {
        let store = InMemoryLanguageCenterStore::new();
        let course_id = Uuid::now_v7();
        let mut inactive = pricing(course_id, 2);
        inactive.is_active = false;
        store.insert_pricing(pricing(course_id, 12)).await.unwrap();
        store.insert_pricing(inactive).await.unwrap();
        store.insert_pricing(pricing(course_id, 6)).await.unwrap();

        let all: Vec<i32> = store
            .list_pricing(course_id, false)
            .await
            .unwrap()
            .iter()
            .map(|p| p.duration_weeks)
            .collect();
        assert_eq!(all, vec![2, 6, 12]);

        let active = store.list_pricing(course_id, true).await.unwrap();
        assert_eq!(active.len(), 2);
    }

    #[tokio::test]
    async fn test_delete_by_course_counts_live_rows() {
        let store = InMemoryLanguageCenterStore::new();
        let course_id = Uuid::now_v7();
        let first = store.insert_pricing(pricing(course_id, 4)).await.unwrap();
        store.insert_pricing(pricing(course_id, 8)).await.unwrap();
        store
            .soft_delete_pricing(first.id, &AuditContext::system())
            .await
            .unwrap();

        let deleted = store
            .soft_delete_pricing_by_course(course_id, &AuditContext::system())
            .await
            .unwrap();
        assert_eq!(deleted, 1);
        assert!(!store.exists_by_duration(course_id, 8, None).await.unwrap());
    }
}
