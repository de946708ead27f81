//! PostgreSQL implementation of the language center repositories.
//!
//! Pricing batches run in one transaction; the first failing row rolls the
//! whole batch back.

use async_trait::async_trait;
use database::{BaseRepository, unique_violation};
use directory_rules::{AuditContext, DisplayOrderItem};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, DbErr, QueryFilter, QueryOrder, QuerySelect,
    Select, TransactionTrait,
};
use uuid::Uuid;

use crate::entity::{course, course_pricing, faq, language_center};
use crate::error::{LanguageCenterError, LanguageCenterResult, Resource};
use crate::models::{
    CoursePricing, LanguageCenter, LanguageCenterFaq, LanguageCenterFilter, LanguageCourse,
};
use crate::repository::{
    CoursePricingRepository, LanguageCenterFaqRepository, LanguageCenterRepository,
    LanguageCourseRepository,
};

pub const UQ_LANGUAGE_CENTER_NAME: &str = "uq_language_centers_name";
/// Also the prefix of the `_cross` names raised by the cross-column slug trigger.
pub const UQ_LANGUAGE_CENTER_SLUG: &str = "uq_language_centers_slug";
pub const UQ_LANGUAGE_CENTER_SLUG_AR: &str = "uq_language_centers_slug_ar";
pub const UQ_COURSE_PRICING_DURATION: &str = "uq_course_pricings_duration";

fn db_error(err: DbErr) -> LanguageCenterError {
    LanguageCenterError::Internal(format!("Database error: {}", err))
}

fn center_write_error(err: DbErr, center: &LanguageCenter) -> LanguageCenterError {
    match unique_violation(&err) {
        Some(msg) if msg.contains(UQ_LANGUAGE_CENTER_NAME) => {
            LanguageCenterError::DuplicateName(center.name.clone())
        }
        Some(msg) if msg.contains(UQ_LANGUAGE_CENTER_SLUG_AR) => {
            LanguageCenterError::DuplicateSlug(center.slug_ar.clone().unwrap_or_default())
        }
        Some(msg) if msg.contains(UQ_LANGUAGE_CENTER_SLUG) => {
            LanguageCenterError::DuplicateSlug(center.slug.clone())
        }
        _ => db_error(err),
    }
}

fn pricing_write_error(err: DbErr, pricing: &CoursePricing) -> LanguageCenterError {
    match err {
        DbErr::RecordNotUpdated => LanguageCenterError::NotFound(Resource::Pricing, pricing.id),
        other => match unique_violation(&other) {
            Some(msg) if msg.contains(UQ_COURSE_PRICING_DURATION) => {
                LanguageCenterError::DuplicateDuration(pricing.duration_weeks)
            }
            _ => db_error(other),
        },
    }
}

fn pairs(items: &[DisplayOrderItem]) -> Vec<(Uuid, i32)> {
    items.iter().map(|item| (item.id, item.display_order)).collect()
}

#[derive(Clone)]
pub struct PgLanguageCenterStore {
    centers: BaseRepository<language_center::Entity>,
    faqs: BaseRepository<faq::Entity>,
    courses: BaseRepository<course::Entity>,
    pricing: BaseRepository<course_pricing::Entity>,
}

impl PgLanguageCenterStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            centers: BaseRepository::new(db.clone()),
            faqs: BaseRepository::new(db.clone()),
            courses: BaseRepository::new(db.clone()),
            pricing: BaseRepository::new(db),
        }
    }

    fn ordered_centers(&self) -> Select<language_center::Entity> {
        self.centers
            .find_active()
            .order_by_asc(language_center::Column::DisplayOrder)
            .order_by_asc(language_center::Column::Name)
    }

    fn slug_condition(slug: &str) -> Condition {
        Condition::any()
            .add(language_center::Column::Slug.eq(slug))
            .add(language_center::Column::SlugAr.eq(slug))
    }
}

#[async_trait]
impl LanguageCenterRepository for PgLanguageCenterStore {
    async fn insert(&self, center: LanguageCenter) -> LanguageCenterResult<LanguageCenter> {
        let model = self
            .centers
            .insert(self.centers.db(), center.clone().into())
            .await
            .map_err(|e| center_write_error(e, &center))?;

        tracing::info!(language_center_id = %model.id, "Created language center");
        Ok(model.into())
    }

    async fn update(&self, center: LanguageCenter) -> LanguageCenterResult<LanguageCenter> {
        let model = self
            .centers
            .update(self.centers.db(), center.clone().into())
            .await
            .map_err(|e| match e {
                DbErr::RecordNotUpdated => {
                    LanguageCenterError::NotFound(Resource::LanguageCenter, center.id)
                }
                other => center_write_error(other, &center),
            })?;

        tracing::info!(language_center_id = %model.id, "Updated language center");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: Uuid) -> LanguageCenterResult<Option<LanguageCenter>> {
        let model = self
            .centers
            .find_active_by_id(self.centers.db(), id)
            .await
            .map_err(db_error)?;
        Ok(model.map(Into::into))
    }

    async fn get_by_slug(&self, slug: &str) -> LanguageCenterResult<Option<LanguageCenter>> {
        let model = self
            .centers
            .find_active()
            .filter(Self::slug_condition(slug))
            .one(self.centers.db())
            .await
            .map_err(db_error)?;
        Ok(model.map(Into::into))
    }

    async fn list(&self, filter: LanguageCenterFilter) -> LanguageCenterResult<Vec<LanguageCenter>> {
        let mut query = self.ordered_centers();

        if let Some(search) = filter.search.as_deref().filter(|s| !s.is_empty()) {
            query = query.filter(Expr::cust_with_values(
                "(LOWER(name) LIKE $1 OR name_ar LIKE $2)",
                [
                    format!("%{}%", search.to_lowercase()),
                    format!("%{}%", search),
                ],
            ));
        }
        if let Some(is_active) = filter.is_active {
            query = query.filter(language_center::Column::IsActive.eq(is_active));
        }
        if let Some(is_featured) = filter.is_featured {
            query = query.filter(language_center::Column::IsFeatured.eq(is_featured));
        }

        let models = query
            .limit(filter.limit)
            .offset(filter.offset)
            .all(self.centers.db())
            .await
            .map_err(db_error)?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn list_featured(&self, limit: u64) -> LanguageCenterResult<Vec<LanguageCenter>> {
        let models = self
            .ordered_centers()
            .filter(language_center::Column::IsActive.eq(true))
            .filter(language_center::Column::IsFeatured.eq(true))
            .limit(limit)
            .all(self.centers.db())
            .await
            .map_err(db_error)?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn soft_delete(&self, id: Uuid, ctx: &AuditContext) -> LanguageCenterResult<bool> {
        let deleted = self
            .centers
            .soft_delete(self.centers.db(), id, ctx.at, ctx.actor_id)
            .await
            .map_err(db_error)?;

        if deleted {
            tracing::info!(language_center_id = %id, "Deleted language center");
        }
        Ok(deleted)
    }

    async fn exists_by_name(
        &self,
        name: &str,
        exclude_id: Option<Uuid>,
    ) -> LanguageCenterResult<bool> {
        let mut condition = Condition::all().add(language_center::Column::Name.eq(name));
        if let Some(id) = exclude_id {
            condition = condition.add(language_center::Column::Id.ne(id));
        }
        self.centers.exists_active(condition).await.map_err(db_error)
    }

    async fn exists_by_slug(
        &self,
        slug: &str,
        exclude_id: Option<Uuid>,
    ) -> LanguageCenterResult<bool> {
        let mut condition = Condition::all().add(Self::slug_condition(slug));
        if let Some(id) = exclude_id {
            condition = condition.add(language_center::Column::Id.ne(id));
        }
        self.centers.exists_active(condition).await.map_err(db_error)
    }
}

#[async_trait]
impl LanguageCenterFaqRepository for PgLanguageCenterStore {
    async fn insert_faq(&self, faq: LanguageCenterFaq) -> LanguageCenterResult<LanguageCenterFaq> {
        let model = self
            .faqs
            .insert(self.faqs.db(), faq.into())
            .await
            .map_err(db_error)?;

        tracing::info!(
            faq_id = %model.id,
            language_center_id = %model.language_center_id,
            "Created language center FAQ"
        );
        Ok(model.into())
    }

    async fn update_faq(&self, faq: LanguageCenterFaq) -> LanguageCenterResult<LanguageCenterFaq> {
        let id = faq.id;
        let model = self
            .faqs
            .update(self.faqs.db(), faq.into())
            .await
            .map_err(|e| match e {
                DbErr::RecordNotUpdated => LanguageCenterError::NotFound(Resource::Faq, id),
                other => db_error(other),
            })?;

        tracing::info!(faq_id = %id, "Updated language center FAQ");
        Ok(model.into())
    }

    async fn get_faq(&self, id: Uuid) -> LanguageCenterResult<Option<LanguageCenterFaq>> {
        let model = self
            .faqs
            .find_active_by_id(self.faqs.db(), id)
            .await
            .map_err(db_error)?;
        Ok(model.map(Into::into))
    }

    async fn list_faqs(
        &self,
        language_center_id: Uuid,
        published_only: bool,
    ) -> LanguageCenterResult<Vec<LanguageCenterFaq>> {
        let mut query = self
            .faqs
            .find_active()
            .filter(faq::Column::LanguageCenterId.eq(language_center_id));
        if published_only {
            query = query.filter(faq::Column::IsPublished.eq(true));
        }

        let models = query
            .order_by_asc(faq::Column::DisplayOrder)
            .order_by_asc(faq::Column::CreatedAt)
            .all(self.faqs.db())
            .await
            .map_err(db_error)?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn soft_delete_faq(&self, id: Uuid, ctx: &AuditContext) -> LanguageCenterResult<bool> {
        let deleted = self
            .faqs
            .soft_delete(self.faqs.db(), id, ctx.at, ctx.actor_id)
            .await
            .map_err(db_error)?;

        if deleted {
            tracing::info!(faq_id = %id, "Deleted language center FAQ");
        }
        Ok(deleted)
    }

    async fn max_faq_display_order(
        &self,
        language_center_id: Uuid,
    ) -> LanguageCenterResult<Option<i32>> {
        self.faqs
            .find_active()
            .select_only()
            .column_as(faq::Column::DisplayOrder.max(), "max_order")
            .filter(faq::Column::LanguageCenterId.eq(language_center_id))
            .into_tuple::<Option<i32>>()
            .one(self.faqs.db())
            .await
            .map(Option::flatten)
            .map_err(db_error)
    }

    async fn reorder_faqs(
        &self,
        language_center_id: Uuid,
        items: &[DisplayOrderItem],
        ctx: &AuditContext,
    ) -> LanguageCenterResult<()> {
        let missing = self
            .faqs
            .reorder_children(
                faq::Column::LanguageCenterId,
                faq::Column::DisplayOrder,
                language_center_id,
                &pairs(items),
                ctx.at,
                ctx.actor_id,
            )
            .await
            .map_err(db_error)?;

        match missing {
            Some(id) => Err(LanguageCenterError::NotFound(Resource::Faq, id)),
            None => {
                tracing::info!(
                    language_center_id = %language_center_id,
                    count = items.len(),
                    "Reordered language center FAQs"
                );
                Ok(())
            }
        }
    }
}

#[async_trait]
impl LanguageCourseRepository for PgLanguageCenterStore {
    async fn insert_course(&self, course: LanguageCourse) -> LanguageCenterResult<LanguageCourse> {
        let model = self
            .courses
            .insert(self.courses.db(), course.into())
            .await
            .map_err(db_error)?;

        tracing::info!(
            course_id = %model.id,
            language_center_id = %model.language_center_id,
            "Created language course"
        );
        Ok(model.into())
    }

    async fn update_course(&self, course: LanguageCourse) -> LanguageCenterResult<LanguageCourse> {
        let id = course.id;
        let model = self
            .courses
            .update(self.courses.db(), course.into())
            .await
            .map_err(|e| match e {
                DbErr::RecordNotUpdated => LanguageCenterError::NotFound(Resource::Course, id),
                other => db_error(other),
            })?;

        tracing::info!(course_id = %id, "Updated language course");
        Ok(model.into())
    }

    async fn get_course(&self, id: Uuid) -> LanguageCenterResult<Option<LanguageCourse>> {
        let model = self
            .courses
            .find_active_by_id(self.courses.db(), id)
            .await
            .map_err(db_error)?;
        Ok(model.map(Into::into))
    }

    async fn list_courses(
        &self,
        language_center_id: Uuid,
        active_only: bool,
    ) -> LanguageCenterResult<Vec<LanguageCourse>> {
        let mut query = self
            .courses
            .find_active()
            .filter(course::Column::LanguageCenterId.eq(language_center_id));
        if active_only {
            query = query.filter(course::Column::IsActive.eq(true));
        }

        let models = query
            .order_by_asc(course::Column::DisplayOrder)
            .order_by_asc(course::Column::CreatedAt)
            .all(self.courses.db())
            .await
            .map_err(db_error)?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn soft_delete_course(&self, id: Uuid, ctx: &AuditContext) -> LanguageCenterResult<bool> {
        let deleted = self
            .courses
            .soft_delete(self.courses.db(), id, ctx.at, ctx.actor_id)
            .await
            .map_err(db_error)?;

        if deleted {
            tracing::info!(course_id = %id, "Deleted language course");
        }
        Ok(deleted)
    }

    async fn max_course_display_order(
        &self,
        language_center_id: Uuid,
    ) -> LanguageCenterResult<Option<i32>> {
        self.courses
            .find_active()
            .select_only()
            .column_as(course::Column::DisplayOrder.max(), "max_order")
            .filter(course::Column::LanguageCenterId.eq(language_center_id))
            .into_tuple::<Option<i32>>()
            .one(self.courses.db())
            .await
            .map(Option::flatten)
            .map_err(db_error)
    }

    async fn reorder_courses(
        &self,
        language_center_id: Uuid,
        items: &[DisplayOrderItem],
        ctx: &AuditContext,
    ) -> LanguageCenterResult<()> {
        let missing = self
            .courses
            .reorder_children(
                course::Column::LanguageCenterId,
                course::Column::DisplayOrder,
                language_center_id,
                &pairs(items),
                ctx.at,
                ctx.actor_id,
            )
            .await
            .map_err(db_error)?;

        match missing {
            Some(id) => Err(LanguageCenterError::NotFound(Resource::Course, id)),
            None => {
                tracing::info!(
                    language_center_id = %language_center_id,
                    count = items.len(),
                    "Reordered language courses"
                );
                Ok(())
            }
        }
    }
}

#[async_trait]
impl CoursePricingRepository for PgLanguageCenterStore {
    async fn insert_pricing(&self, pricing: CoursePricing) -> LanguageCenterResult<CoursePricing> {
        let model = self
            .pricing
            .insert(self.pricing.db(), pricing.clone().into())
            .await
            .map_err(|e| pricing_write_error(e, &pricing))?;

        tracing::info!(
            pricing_id = %model.id,
            course_id = %model.language_course_id,
            duration_weeks = model.duration_weeks,
            "Created course pricing"
        );
        Ok(model.into())
    }

    async fn update_pricing(&self, pricing: CoursePricing) -> LanguageCenterResult<CoursePricing> {
        let model = self
            .pricing
            .update(self.pricing.db(), pricing.clone().into())
            .await
            .map_err(|e| pricing_write_error(e, &pricing))?;

        tracing::info!(pricing_id = %model.id, "Updated course pricing");
        Ok(model.into())
    }

    async fn get_pricing(&self, id: Uuid) -> LanguageCenterResult<Option<CoursePricing>> {
        let model = self
            .pricing
            .find_active_by_id(self.pricing.db(), id)
            .await
            .map_err(db_error)?;
        Ok(model.map(Into::into))
    }

    async fn list_pricing(
        &self,
        language_course_id: Uuid,
        active_only: bool,
    ) -> LanguageCenterResult<Vec<CoursePricing>> {
        let mut query = self
            .pricing
            .find_active()
            .filter(course_pricing::Column::LanguageCourseId.eq(language_course_id));
        if active_only {
            query = query.filter(course_pricing::Column::IsActive.eq(true));
        }

        let models = query
            .order_by_asc(course_pricing::Column::DurationWeeks)
            .all(self.pricing.db())
            .await
            .map_err(db_error)?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn soft_delete_pricing(&self, id: Uuid, ctx: &AuditContext) -> LanguageCenterResult<bool> {
        let deleted = self
            .pricing
            .soft_delete(self.pricing.db(), id, ctx.at, ctx.actor_id)
            .await
            .map_err(db_error)?;

        if deleted {
            tracing::info!(pricing_id = %id, "Deleted course pricing");
        }
        Ok(deleted)
    }

    async fn exists_by_duration(
        &self,
        language_course_id: Uuid,
        duration_weeks: i32,
        exclude_id: Option<Uuid>,
    ) -> LanguageCenterResult<bool> {
        let mut condition = Condition::all()
            .add(course_pricing::Column::LanguageCourseId.eq(language_course_id))
            .add(course_pricing::Column::DurationWeeks.eq(duration_weeks));
        if let Some(id) = exclude_id {
            condition = condition.add(course_pricing::Column::Id.ne(id));
        }
        self.pricing.exists_active(condition).await.map_err(db_error)
    }

    async fn insert_pricing_batch(
        &self,
        rows: Vec<CoursePricing>,
    ) -> LanguageCenterResult<Vec<CoursePricing>> {
        let txn = self.pricing.db().begin().await.map_err(db_error)?;
        let mut saved = Vec::with_capacity(rows.len());

        for pricing in rows {
            let model = self
                .pricing
                .insert(&txn, pricing.clone().into())
                .await
                .map_err(|e| pricing_write_error(e, &pricing))?;
            saved.push(CoursePricing::from(model));
        }

        txn.commit().await.map_err(db_error)?;
        tracing::info!(count = saved.len(), "Created course pricing batch");
        Ok(saved)
    }

    async fn update_pricing_batch(
        &self,
        rows: Vec<CoursePricing>,
    ) -> LanguageCenterResult<Vec<CoursePricing>> {
        let txn = self.pricing.db().begin().await.map_err(db_error)?;
        let mut saved = Vec::with_capacity(rows.len());

        for pricing in rows {
            let model = self
                .pricing
                .update(&txn, pricing.clone().into())
                .await
                .map_err(|e| pricing_write_error(e, &pricing))?;
            saved.push(CoursePricing::from(model));
        }

        txn.commit().await.map_err(db_error)?;
        tracing::info!(count = saved.len(), "Updated course pricing batch");
        Ok(saved)
    }

    async fn soft_delete_pricing_by_course(
        &self,
        language_course_id: Uuid,
        ctx: &AuditContext,
    ) -> LanguageCenterResult<u64> {
        let deleted = self
            .pricing
            .soft_delete_where(
                self.pricing.db(),
                Condition::all()
                    .add(course_pricing::Column::LanguageCourseId.eq(language_course_id)),
                ctx.at,
                ctx.actor_id,
            )
            .await
            .map_err(db_error)?;

        tracing::info!(course_id = %language_course_id, deleted, "Deleted course pricing");
        Ok(deleted)
    }
}
