//! PostgreSQL implementation of the university repositories.
//!
//! Uniqueness is enforced by partial unique indexes (`WHERE deleted_at IS NULL`);
//! their violations come back as the same domain errors the services raise
//! from their pre-checks.

use async_trait::async_trait;
use database::{BaseRepository, unique_violation};
use directory_rules::{AuditContext, DisplayOrderItem};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, DbErr, QueryFilter, QueryOrder, QuerySelect,
    Select,
};
use uuid::Uuid;

use crate::entity::{content, faq, program, university};
use crate::error::{Resource, UniversityError, UniversityResult};
use crate::models::{
    ContentType, University, UniversityContent, UniversityFaq, UniversityFilter,
    UniversityProgram,
};
use crate::repository::{
    UniversityContentRepository, UniversityFaqRepository, UniversityProgramRepository,
    UniversityRepository,
};

pub const UQ_UNIVERSITY_NAME: &str = "uq_universities_name";
/// Also the prefix of the `_cross` names raised by the cross-column slug trigger.
pub const UQ_UNIVERSITY_SLUG: &str = "uq_universities_slug";
pub const UQ_UNIVERSITY_SLUG_AR: &str = "uq_universities_slug_ar";
pub const UQ_UNIVERSITY_CONTENT_TYPE: &str = "uq_university_contents_type";

fn db_error(err: DbErr) -> UniversityError {
    UniversityError::Internal(format!("Database error: {}", err))
}

fn university_write_error(err: DbErr, university: &University) -> UniversityError {
    match unique_violation(&err) {
        Some(msg) if msg.contains(UQ_UNIVERSITY_NAME) => {
            UniversityError::DuplicateName(university.name.clone())
        }
        Some(msg) if msg.contains(UQ_UNIVERSITY_SLUG_AR) => {
            UniversityError::DuplicateSlug(university.slug_ar.clone().unwrap_or_default())
        }
        Some(msg) if msg.contains(UQ_UNIVERSITY_SLUG) => {
            UniversityError::DuplicateSlug(university.slug.clone())
        }
        _ => db_error(err),
    }
}

fn content_write_error(err: DbErr, content: &UniversityContent) -> UniversityError {
    match unique_violation(&err) {
        Some(msg) if msg.contains(UQ_UNIVERSITY_CONTENT_TYPE) => {
            UniversityError::DuplicateContentType(content.content_type)
        }
        _ => db_error(err),
    }
}

fn pairs(items: &[DisplayOrderItem]) -> Vec<(Uuid, i32)> {
    items.iter().map(|item| (item.id, item.display_order)).collect()
}

/// One connection pool shared by the four table repositories.
#[derive(Clone)]
pub struct PgUniversityStore {
    universities: BaseRepository<university::Entity>,
    faqs: BaseRepository<faq::Entity>,
    contents: BaseRepository<content::Entity>,
    programs: BaseRepository<program::Entity>,
}

impl PgUniversityStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            universities: BaseRepository::new(db.clone()),
            faqs: BaseRepository::new(db.clone()),
            contents: BaseRepository::new(db.clone()),
            programs: BaseRepository::new(db),
        }
    }

    fn ordered_universities(&self) -> Select<university::Entity> {
        self.universities
            .find_active()
            .order_by_asc(university::Column::DisplayOrder)
            .order_by_asc(university::Column::Name)
    }

    fn slug_condition(slug: &str) -> Condition {
        Condition::any()
            .add(university::Column::Slug.eq(slug))
            .add(university::Column::SlugAr.eq(slug))
    }
}

#[async_trait]
impl UniversityRepository for PgUniversityStore {
    async fn insert(&self, university: University) -> UniversityResult<University> {
        let model = self
            .universities
            .insert(self.universities.db(), university.clone().into())
            .await
            .map_err(|e| university_write_error(e, &university))?;

        tracing::info!(university_id = %model.id, "Created university");
        Ok(model.into())
    }

    async fn update(&self, university: University) -> UniversityResult<University> {
        let model = self
            .universities
            .update(self.universities.db(), university.clone().into())
            .await
            .map_err(|e| match e {
                DbErr::RecordNotUpdated => {
                    UniversityError::NotFound(Resource::University, university.id)
                }
                other => university_write_error(other, &university),
            })?;

        tracing::info!(university_id = %model.id, "Updated university");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: Uuid) -> UniversityResult<Option<University>> {
        let model = self
            .universities
            .find_active_by_id(self.universities.db(), id)
            .await
            .map_err(db_error)?;
        Ok(model.map(Into::into))
    }

    async fn get_by_slug(&self, slug: &str) -> UniversityResult<Option<University>> {
        let model = self
            .universities
            .find_active()
            .filter(Self::slug_condition(slug))
            .one(self.universities.db())
            .await
            .map_err(db_error)?;
        Ok(model.map(Into::into))
    }

    async fn list(&self, filter: UniversityFilter) -> UniversityResult<Vec<University>> {
        let mut query = self.ordered_universities();

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
            query = query.filter(university::Column::IsActive.eq(is_active));
        }
        if let Some(is_featured) = filter.is_featured {
            query = query.filter(university::Column::IsFeatured.eq(is_featured));
        }

        let models = query
            .limit(filter.limit)
            .offset(filter.offset)
            .all(self.universities.db())
            .await
            .map_err(db_error)?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn list_featured(&self, limit: u64) -> UniversityResult<Vec<University>> {
        let models = self
            .ordered_universities()
            .filter(university::Column::IsActive.eq(true))
            .filter(university::Column::IsFeatured.eq(true))
            .limit(limit)
            .all(self.universities.db())
            .await
            .map_err(db_error)?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn soft_delete(&self, id: Uuid, ctx: &AuditContext) -> UniversityResult<bool> {
        let deleted = self
            .universities
            .soft_delete(self.universities.db(), id, ctx.at, ctx.actor_id)
            .await
            .map_err(db_error)?;

        if deleted {
            tracing::info!(university_id = %id, "Deleted university");
        }
        Ok(deleted)
    }

    async fn exists_by_name(&self, name: &str, exclude_id: Option<Uuid>) -> UniversityResult<bool> {
        let mut condition = Condition::all().add(university::Column::Name.eq(name));
        if let Some(id) = exclude_id {
            condition = condition.add(university::Column::Id.ne(id));
        }
        self.universities.exists_active(condition).await.map_err(db_error)
    }

    async fn exists_by_slug(&self, slug: &str, exclude_id: Option<Uuid>) -> UniversityResult<bool> {
        let mut condition = Condition::all().add(Self::slug_condition(slug));
        if let Some(id) = exclude_id {
            condition = condition.add(university::Column::Id.ne(id));
        }
        self.universities.exists_active(condition).await.map_err(db_error)
    }
}

#[async_trait]
impl UniversityFaqRepository for PgUniversityStore {
    async fn insert_faq(&self, faq: UniversityFaq) -> UniversityResult<UniversityFaq> {
        let model = self
            .faqs
            .insert(self.faqs.db(), faq.into())
            .await
            .map_err(db_error)?;

        tracing::info!(faq_id = %model.id, university_id = %model.university_id, "Created university FAQ");
        Ok(model.into())
    }

    async fn update_faq(&self, faq: UniversityFaq) -> UniversityResult<UniversityFaq> {
        let id = faq.id;
        let model = self
            .faqs
            .update(self.faqs.db(), faq.into())
            .await
            .map_err(|e| match e {
                DbErr::RecordNotUpdated => UniversityError::NotFound(Resource::Faq, id),
                other => db_error(other),
            })?;

        tracing::info!(faq_id = %id, "Updated university FAQ");
        Ok(model.into())
    }

    async fn get_faq(&self, id: Uuid) -> UniversityResult<Option<UniversityFaq>> {
        let model = self
            .faqs
            .find_active_by_id(self.faqs.db(), id)
            .await
            .map_err(db_error)?;
        Ok(model.map(Into::into))
    }

    async fn list_faqs(
        &self,
        university_id: Uuid,
        published_only: bool,
    ) -> UniversityResult<Vec<UniversityFaq>> {
        let mut query = self
            .faqs
            .find_active()
            .filter(faq::Column::UniversityId.eq(university_id));
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

    async fn soft_delete_faq(&self, id: Uuid, ctx: &AuditContext) -> UniversityResult<bool> {
        let deleted = self
            .faqs
            .soft_delete(self.faqs.db(), id, ctx.at, ctx.actor_id)
            .await
            .map_err(db_error)?;

        if deleted {
            tracing::info!(faq_id = %id, "Deleted university FAQ");
        }
        Ok(deleted)
    }

    async fn max_faq_display_order(&self, university_id: Uuid) -> UniversityResult<Option<i32>> {
        self.faqs
            .find_active()
            .select_only()
            .column_as(faq::Column::DisplayOrder.max(), "max_order")
            .filter(faq::Column::UniversityId.eq(university_id))
            .into_tuple::<Option<i32>>()
            .one(self.faqs.db())
            .await
            .map(Option::flatten)
            .map_err(db_error)
    }

    async fn reorder_faqs(
        &self,
        university_id: Uuid,
        items: &[DisplayOrderItem],
        ctx: &AuditContext,
    ) -> UniversityResult<()> {
        let missing = self
            .faqs
            .reorder_children(
                faq::Column::UniversityId,
                faq::Column::DisplayOrder,
                university_id,
                &pairs(items),
                ctx.at,
                ctx.actor_id,
            )
            .await
            .map_err(db_error)?;

        match missing {
            Some(id) => Err(UniversityError::NotFound(Resource::Faq, id)),
            None => {
                tracing::info!(university_id = %university_id, count = items.len(), "Reordered university FAQs");
                Ok(())
            }
        }
    }
}

#[async_trait]
impl UniversityContentRepository for PgUniversityStore {
    async fn insert_content(&self, content: UniversityContent) -> UniversityResult<UniversityContent> {
        let model = self
            .contents
            .insert(self.contents.db(), content.clone().into())
            .await
            .map_err(|e| content_write_error(e, &content))?;

        tracing::info!(
            content_id = %model.id,
            university_id = %model.university_id,
            content_type = %model.content_type,
            "Created university content"
        );
        Ok(model.into())
    }

    async fn update_content(&self, content: UniversityContent) -> UniversityResult<UniversityContent> {
        let model = self
            .contents
            .update(self.contents.db(), content.clone().into())
            .await
            .map_err(|e| match e {
                DbErr::RecordNotUpdated => UniversityError::NotFound(Resource::Content, content.id),
                other => content_write_error(other, &content),
            })?;

        tracing::info!(content_id = %model.id, "Updated university content");
        Ok(model.into())
    }

    async fn get_content(&self, id: Uuid) -> UniversityResult<Option<UniversityContent>> {
        let model = self
            .contents
            .find_active_by_id(self.contents.db(), id)
            .await
            .map_err(db_error)?;
        Ok(model.map(Into::into))
    }

    async fn get_content_by_type(
        &self,
        university_id: Uuid,
        content_type: ContentType,
    ) -> UniversityResult<Option<UniversityContent>> {
        let model = self
            .contents
            .find_active()
            .filter(content::Column::UniversityId.eq(university_id))
            .filter(content::Column::ContentType.eq(content_type))
            .one(self.contents.db())
            .await
            .map_err(db_error)?;
        Ok(model.map(Into::into))
    }

    async fn list_contents(
        &self,
        university_id: Uuid,
        published_only: bool,
    ) -> UniversityResult<Vec<UniversityContent>> {
        let mut query = self
            .contents
            .find_active()
            .filter(content::Column::UniversityId.eq(university_id));
        if published_only {
            query = query.filter(content::Column::IsPublished.eq(true));
        }

        let models = query
            .order_by_asc(content::Column::DisplayOrder)
            .order_by_asc(content::Column::CreatedAt)
            .all(self.contents.db())
            .await
            .map_err(db_error)?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn soft_delete_content(&self, id: Uuid, ctx: &AuditContext) -> UniversityResult<bool> {
        let deleted = self
            .contents
            .soft_delete(self.contents.db(), id, ctx.at, ctx.actor_id)
            .await
            .map_err(db_error)?;

        if deleted {
            tracing::info!(content_id = %id, "Deleted university content");
        }
        Ok(deleted)
    }

    async fn max_content_display_order(&self, university_id: Uuid) -> UniversityResult<Option<i32>> {
        self.contents
            .find_active()
            .select_only()
            .column_as(content::Column::DisplayOrder.max(), "max_order")
            .filter(content::Column::UniversityId.eq(university_id))
            .into_tuple::<Option<i32>>()
            .one(self.contents.db())
            .await
            .map(Option::flatten)
            .map_err(db_error)
    }

    async fn reorder_contents(
        &self,
        university_id: Uuid,
        items: &[DisplayOrderItem],
        ctx: &AuditContext,
    ) -> UniversityResult<()> {
        let missing = self
            .contents
            .reorder_children(
                content::Column::UniversityId,
                content::Column::DisplayOrder,
                university_id,
                &pairs(items),
                ctx.at,
                ctx.actor_id,
            )
            .await
            .map_err(db_error)?;

        match missing {
            Some(id) => Err(UniversityError::NotFound(Resource::Content, id)),
            None => {
                tracing::info!(university_id = %university_id, count = items.len(), "Reordered university contents");
                Ok(())
            }
        }
    }

    async fn content_type_exists(
        &self,
        university_id: Uuid,
        content_type: ContentType,
        exclude_id: Option<Uuid>,
    ) -> UniversityResult<bool> {
        let mut condition = Condition::all()
            .add(content::Column::UniversityId.eq(university_id))
            .add(content::Column::ContentType.eq(content_type));
        if let Some(id) = exclude_id {
            condition = condition.add(content::Column::Id.ne(id));
        }
        self.contents.exists_active(condition).await.map_err(db_error)
    }
}

#[async_trait]
impl UniversityProgramRepository for PgUniversityStore {
    async fn insert_program(&self, program: UniversityProgram) -> UniversityResult<UniversityProgram> {
        let model = self
            .programs
            .insert(self.programs.db(), program.into())
            .await
            .map_err(db_error)?;

        tracing::info!(
            program_id = %model.id,
            university_id = %model.university_id,
            "Created university program"
        );
        Ok(model.into())
    }

    async fn update_program(&self, program: UniversityProgram) -> UniversityResult<UniversityProgram> {
        let id = program.id;
        let model = self
            .programs
            .update(self.programs.db(), program.into())
            .await
            .map_err(|e| match e {
                DbErr::RecordNotUpdated => UniversityError::NotFound(Resource::Program, id),
                other => db_error(other),
            })?;

        tracing::info!(program_id = %id, "Updated university program");
        Ok(model.into())
    }

    async fn get_program(&self, id: Uuid) -> UniversityResult<Option<UniversityProgram>> {
        let model = self
            .programs
            .find_active_by_id(self.programs.db(), id)
            .await
            .map_err(db_error)?;
        Ok(model.map(Into::into))
    }

    async fn list_programs(
        &self,
        university_id: Uuid,
        active_only: bool,
    ) -> UniversityResult<Vec<UniversityProgram>> {
        let mut query = self
            .programs
            .find_active()
            .filter(program::Column::UniversityId.eq(university_id));
        if active_only {
            query = query.filter(program::Column::IsActive.eq(true));
        }

        let models = query
            .order_by_asc(program::Column::DisplayOrder)
            .order_by_asc(program::Column::CreatedAt)
            .all(self.programs.db())
            .await
            .map_err(db_error)?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn soft_delete_program(&self, id: Uuid, ctx: &AuditContext) -> UniversityResult<bool> {
        let deleted = self
            .programs
            .soft_delete(self.programs.db(), id, ctx.at, ctx.actor_id)
            .await
            .map_err(db_error)?;

        if deleted {
            tracing::info!(program_id = %id, "Deleted university program");
        }
        Ok(deleted)
    }

    async fn max_program_display_order(&self, university_id: Uuid) -> UniversityResult<Option<i32>> {
        self.programs
            .find_active()
            .select_only()
            .column_as(program::Column::DisplayOrder.max(), "max_order")
            .filter(program::Column::UniversityId.eq(university_id))
            .into_tuple::<Option<i32>>()
            .one(self.programs.db())
            .await
            .map(Option::flatten)
            .map_err(db_error)
    }

    async fn reorder_programs(
        &self,
        university_id: Uuid,
        items: &[DisplayOrderItem],
        ctx: &AuditContext,
    ) -> UniversityResult<()> {
        let missing = self
            .programs
            .reorder_children(
                program::Column::UniversityId,
                program::Column::DisplayOrder,
                university_id,
                &pairs(items),
                ctx.at,
                ctx.actor_id,
            )
            .await
            .map_err(db_error)?;

        match missing {
            Some(id) => Err(UniversityError::NotFound(Resource::Program, id)),
            None => {
                tracing::info!(university_id = %university_id, count = items.len(), "Reordered university programs");
                Ok(())
            }
        }
    }
}
