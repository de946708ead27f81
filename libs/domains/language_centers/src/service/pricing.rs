use directory_rules::AuditContext;
use rust_decimal::Decimal;
use std::collections::HashSet;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use super::validation_error;
use crate::error::{LanguageCenterError, LanguageCenterResult, Resource};
use crate::models::{
    BulkCreateCoursePricing, BulkUpdateCoursePricing, CoursePricing, CreateCoursePricing,
    UpdateCoursePricing,
};
use crate::pricing::validate_discount_percentage;
use crate::repository::{CoursePricingRepository, LanguageCourseRepository};

/// Prices of language courses, one row per duration.
///
/// Derived fields are recomputed on every write. Bulk operations and the
/// course-wide discount are all-or-nothing.
pub struct CoursePricingService<C: ?Sized, R: ?Sized> {
    courses: Arc<C>,
    repository: Arc<R>,
}

impl<C: ?Sized, R: ?Sized> Clone for CoursePricingService<C, R> {
    fn clone(&self) -> Self {
        Self {
            courses: Arc::clone(&self.courses),
            repository: Arc::clone(&self.repository),
        }
    }
}

fn check_percentage(percentage: Decimal) -> LanguageCenterResult<()> {
    if validate_discount_percentage(percentage) {
        Ok(())
    } else {
        Err(LanguageCenterError::InvalidDiscountRange(percentage))
    }
}

/// Range rules on a fully merged row.
fn check_terms(pricing: &CoursePricing) -> LanguageCenterResult<()> {
    if pricing.fee < Decimal::ZERO {
        return Err(LanguageCenterError::Validation(
            "fee must not be negative".to_string(),
        ));
    }
    if let Some(percentage) = pricing.discount_percentage {
        check_percentage(percentage)?;
    }
    match pricing.discount_amount {
        Some(amount) if amount < Decimal::ZERO => Err(LanguageCenterError::Validation(
            "discount_amount must not be negative".to_string(),
        )),
        Some(amount) if amount > pricing.fee => Err(LanguageCenterError::Validation(
            "discount_amount must not exceed the fee".to_string(),
        )),
        _ => Ok(()),
    }
}

/// Fails on the first duration used twice by `rows` or already taken by
/// `existing` rows that are not part of `rows`.
fn check_batch_durations(
    existing: &[CoursePricing],
    rows: &[CoursePricing],
) -> LanguageCenterResult<()> {
    let batch_ids: HashSet<Uuid> = rows.iter().map(|p| p.id).collect();
    let mut taken: HashSet<i32> = existing
        .iter()
        .filter(|p| !batch_ids.contains(&p.id))
        .map(|p| p.duration_weeks)
        .collect();

    for row in rows {
        if !taken.insert(row.duration_weeks) {
            return Err(LanguageCenterError::DuplicateDuration(row.duration_weeks));
        }
    }
    Ok(())
}

/// Rows are written one statement at a time and Postgres checks the
/// duration index after each, so a row may not move onto a duration another
/// row still holds, even when that row moves away in the same batch.
fn check_moved_durations(
    existing: &[CoursePricing],
    rows: &[CoursePricing],
) -> LanguageCenterResult<()> {
    for row in rows {
        let clash = existing
            .iter()
            .any(|p| p.id != row.id && p.duration_weeks == row.duration_weeks);
        if clash {
            return Err(LanguageCenterError::DuplicateDuration(row.duration_weeks));
        }
    }
    Ok(())
}

impl<C, R> CoursePricingService<C, R>
where
    C: LanguageCourseRepository + ?Sized,
    R: CoursePricingRepository + ?Sized,
{
    pub fn new(courses: Arc<C>, repository: Arc<R>) -> Self {
        Self {
            courses,
            repository,
        }
    }

    async fn ensure_course(&self, course_id: Uuid) -> LanguageCenterResult<()> {
        match self.courses.get_course(course_id).await? {
            Some(_) => Ok(()),
            None => Err(LanguageCenterError::CourseNotFound(course_id)),
        }
    }

    pub async fn create(
        &self,
        ctx: &AuditContext,
        course_id: Uuid,
        input: CreateCoursePricing,
    ) -> LanguageCenterResult<CoursePricing> {
        input.validate().map_err(validation_error)?;
        self.ensure_course(course_id).await?;

        let pricing = CoursePricing::new(course_id, input, ctx)?;
        check_terms(&pricing)?;

        if self
            .repository
            .exists_by_duration(course_id, pricing.duration_weeks, None)
            .await?
        {
            return Err(LanguageCenterError::DuplicateDuration(pricing.duration_weeks));
        }

        self.repository.insert_pricing(pricing).await
    }

    /// Merges `input` and re-checks the duration against the course's other rows.
    pub async fn update(
        &self,
        ctx: &AuditContext,
        id: Uuid,
        input: UpdateCoursePricing,
    ) -> LanguageCenterResult<CoursePricing> {
        input.validate().map_err(validation_error)?;

        let mut pricing = self.get(id).await?;
        pricing.apply_update(input, ctx)?;
        check_terms(&pricing)?;

        if self
            .repository
            .exists_by_duration(pricing.language_course_id, pricing.duration_weeks, Some(id))
            .await?
        {
            return Err(LanguageCenterError::DuplicateDuration(pricing.duration_weeks));
        }

        self.repository.update_pricing(pricing).await
    }

    pub async fn get(&self, id: Uuid) -> LanguageCenterResult<CoursePricing> {
        self.repository
            .get_pricing(id)
            .await?
            .ok_or(LanguageCenterError::NotFound(Resource::Pricing, id))
    }

    pub async fn delete(&self, ctx: &AuditContext, id: Uuid) -> LanguageCenterResult<()> {
        if !self.repository.soft_delete_pricing(id, ctx).await? {
            return Err(LanguageCenterError::NotFound(Resource::Pricing, id));
        }
        Ok(())
    }

    pub async fn get_by_course(&self, course_id: Uuid) -> LanguageCenterResult<Vec<CoursePricing>> {
        self.ensure_course(course_id).await?;
        self.repository.list_pricing(course_id, false).await
    }

    pub async fn get_active_by_course(
        &self,
        course_id: Uuid,
    ) -> LanguageCenterResult<Vec<CoursePricing>> {
        self.ensure_course(course_id).await?;
        self.repository.list_pricing(course_id, true).await
    }

    pub async fn create_bulk(
        &self,
        ctx: &AuditContext,
        course_id: Uuid,
        request: BulkCreateCoursePricing,
    ) -> LanguageCenterResult<Vec<CoursePricing>> {
        request.validate().map_err(validation_error)?;
        self.ensure_course(course_id).await?;

        let rows = request
            .items
            .into_iter()
            .map(|input| CoursePricing::new(course_id, input, ctx))
            .collect::<LanguageCenterResult<Vec<_>>>()?;
        for row in &rows {
            check_terms(row)?;
        }

        let existing = self.repository.list_pricing(course_id, false).await?;
        check_batch_durations(&existing, &rows)?;

        self.repository.insert_pricing_batch(rows).await
    }

    /// Every item must be a live price of `course_id`.
    pub async fn update_bulk(
        &self,
        ctx: &AuditContext,
        course_id: Uuid,
        request: BulkUpdateCoursePricing,
    ) -> LanguageCenterResult<Vec<CoursePricing>> {
        request.validate().map_err(validation_error)?;
        self.ensure_course(course_id).await?;

        let existing = self.repository.list_pricing(course_id, false).await?;

        let mut seen = HashSet::new();
        let mut rows = Vec::with_capacity(request.items.len());
        for item in request.items {
            if !seen.insert(item.id) {
                return Err(LanguageCenterError::Validation(format!(
                    "pricing {} appears more than once",
                    item.id
                )));
            }
            let mut row = existing
                .iter()
                .find(|p| p.id == item.id)
                .cloned()
                .ok_or(LanguageCenterError::NotFound(Resource::Pricing, item.id))?;
            row.apply_update(item.changes, ctx)?;
            check_terms(&row)?;
            rows.push(row);
        }

        check_batch_durations(&existing, &rows)?;
        check_moved_durations(&existing, &rows)?;
        self.repository.update_pricing_batch(rows).await
    }

    /// Sets the same percentage discount on every live price of the course.
    pub async fn apply_discount_to_course(
        &self,
        ctx: &AuditContext,
        course_id: Uuid,
        percentage: Decimal,
    ) -> LanguageCenterResult<Vec<CoursePricing>> {
        check_percentage(percentage)?;
        self.ensure_course(course_id).await?;

        let mut rows = self.repository.list_pricing(course_id, false).await?;
        if rows.is_empty() {
            return Ok(rows);
        }
        for row in &mut rows {
            row.apply_discount(percentage, ctx)?;
        }

        tracing::info!(
            course_id = %course_id,
            %percentage,
            count = rows.len(),
            "Applying course discount"
        );
        self.repository.update_pricing_batch(rows).await
    }

    /// Returns how many prices were deleted
    pub async fn delete_by_course(
        &self,
        ctx: &AuditContext,
        course_id: Uuid,
    ) -> LanguageCenterResult<u64> {
        self.ensure_course(course_id).await?;
        self.repository
            .soft_delete_pricing_by_course(course_id, ctx)
            .await
    }
}
