use async_trait::async_trait;
use directory_rules::{
    AuditContext, DisplayOrderItem, apply_reorder, live_children, max_display_order,
};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{Resource, UniversityError, UniversityResult};
use crate::models::{
    ContentType, University, UniversityContent, UniversityFaq, UniversityFilter,
    UniversityProgram,
};

/// Storage of university records. Every read skips soft-deleted rows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UniversityRepository: Send + Sync {
    async fn insert(&self, university: University) -> UniversityResult<University>;

    async fn update(&self, university: University) -> UniversityResult<University>;

    async fn get_by_id(&self, id: Uuid) -> UniversityResult<Option<University>>;

    /// Match on either `slug` or `slug_ar`
    async fn get_by_slug(&self, slug: &str) -> UniversityResult<Option<University>>;

    /// Ordered by display order, then name
    async fn list(&self, filter: UniversityFilter) -> UniversityResult<Vec<University>>;

    /// Active and featured universities, ordered like `list`
    async fn list_featured(&self, limit: u64) -> UniversityResult<Vec<University>>;

    async fn soft_delete(&self, id: Uuid, ctx: &AuditContext) -> UniversityResult<bool>;

    async fn exists_by_name(&self, name: &str, exclude_id: Option<Uuid>) -> UniversityResult<bool>;

    /// Whether `slug` is used as `slug` or `slug_ar` by another live university
    async fn exists_by_slug(&self, slug: &str, exclude_id: Option<Uuid>) -> UniversityResult<bool>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UniversityFaqRepository: Send + Sync {
    async fn insert_faq(&self, faq: UniversityFaq) -> UniversityResult<UniversityFaq>;

    async fn update_faq(&self, faq: UniversityFaq) -> UniversityResult<UniversityFaq>;

    async fn get_faq(&self, id: Uuid) -> UniversityResult<Option<UniversityFaq>>;

    /// Ordered by display order, then creation time
    async fn list_faqs(
        &self,
        university_id: Uuid,
        published_only: bool,
    ) -> UniversityResult<Vec<UniversityFaq>>;

    async fn soft_delete_faq(&self, id: Uuid, ctx: &AuditContext) -> UniversityResult<bool>;

    async fn max_faq_display_order(&self, university_id: Uuid) -> UniversityResult<Option<i32>>;

    /// All-or-nothing; an id that is not a live FAQ of the university fails the batch
    async fn reorder_faqs(
        &self,
        university_id: Uuid,
        items: &[DisplayOrderItem],
        ctx: &AuditContext,
    ) -> UniversityResult<()>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UniversityContentRepository: Send + Sync {
    async fn insert_content(&self, content: UniversityContent) -> UniversityResult<UniversityContent>;

    async fn update_content(&self, content: UniversityContent) -> UniversityResult<UniversityContent>;

    async fn get_content(&self, id: Uuid) -> UniversityResult<Option<UniversityContent>>;

    async fn get_content_by_type(
        &self,
        university_id: Uuid,
        content_type: ContentType,
    ) -> UniversityResult<Option<UniversityContent>>;

    async fn list_contents(
        &self,
        university_id: Uuid,
        published_only: bool,
    ) -> UniversityResult<Vec<UniversityContent>>;

    async fn soft_delete_content(&self, id: Uuid, ctx: &AuditContext) -> UniversityResult<bool>;

    async fn max_content_display_order(&self, university_id: Uuid) -> UniversityResult<Option<i32>>;

    async fn reorder_contents(
        &self,
        university_id: Uuid,
        items: &[DisplayOrderItem],
        ctx: &AuditContext,
    ) -> UniversityResult<()>;

    async fn content_type_exists(
        &self,
        university_id: Uuid,
        content_type: ContentType,
        exclude_id: Option<Uuid>,
    ) -> UniversityResult<bool>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UniversityProgramRepository: Send + Sync {
    async fn insert_program(&self, program: UniversityProgram) -> UniversityResult<UniversityProgram>;

    async fn update_program(&self, program: UniversityProgram) -> UniversityResult<UniversityProgram>;

    async fn get_program(&self, id: Uuid) -> UniversityResult<Option<UniversityProgram>>;

    async fn list_programs(
        &self,
        university_id: Uuid,
        active_only: bool,
    ) -> UniversityResult<Vec<UniversityProgram>>;

    async fn soft_delete_program(&self, id: Uuid, ctx: &AuditContext) -> UniversityResult<bool>;

    async fn max_program_display_order(&self, university_id: Uuid) -> UniversityResult<Option<i32>>;

    async fn reorder_programs(
        &self,
        university_id: Uuid,
        items: &[DisplayOrderItem],
        ctx: &AuditContext,
    ) -> UniversityResult<()>;
}

/// Everything the HTTP layer needs from one backing store.
pub trait UniversityStore:
    UniversityRepository
    + UniversityFaqRepository
    + UniversityContentRepository
    + UniversityProgramRepository
    + 'static
{
}

impl<T> UniversityStore for T where
    T: UniversityRepository
        + UniversityFaqRepository
        + UniversityContentRepository
        + UniversityProgramRepository
        + 'static
{
}

/// In-memory implementation of every university repository (dev and tests).
///
/// Each write checks the same uniqueness rules the PostgreSQL partial unique
/// indexes enforce, so both implementations fail the same way.
#[derive(Clone, Default)]
pub struct InMemoryUniversityStore {
    universities: Arc<RwLock<HashMap<Uuid, University>>>,
    faqs: Arc<RwLock<HashMap<Uuid, UniversityFaq>>>,
    contents: Arc<RwLock<HashMap<Uuid, UniversityContent>>>,
    programs: Arc<RwLock<HashMap<Uuid, UniversityProgram>>>,
}

impl InMemoryUniversityStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn check_unique_university(
    rows: &HashMap<Uuid, University>,
    candidate: &University,
) -> UniversityResult<()> {
    let others = rows
        .values()
        .filter(|u| u.deleted_at.is_none() && u.id != candidate.id);

    for other in others {
        if other.name == candidate.name {
            return Err(UniversityError::DuplicateName(candidate.name.clone()));
        }
        if other.has_slug(&candidate.slug) {
            return Err(UniversityError::DuplicateSlug(candidate.slug.clone()));
        }
        if let Some(slug_ar) = candidate.slug_ar.as_deref().filter(|s| other.has_slug(s)) {
            return Err(UniversityError::DuplicateSlug(slug_ar.to_string()));
        }
    }
    Ok(())
}

fn check_unique_content(
    rows: &HashMap<Uuid, UniversityContent>,
    candidate: &UniversityContent,
) -> UniversityResult<()> {
    let taken = rows.values().any(|c| {
        c.deleted_at.is_none()
            && c.id != candidate.id
            && c.university_id == candidate.university_id
            && c.content_type == candidate.content_type
    });
    if taken {
        return Err(UniversityError::DuplicateContentType(candidate.content_type));
    }
    Ok(())
}

fn sorted_universities(rows: impl Iterator<Item = University>) -> Vec<University> {
    let mut universities: Vec<University> = rows.collect();
    universities.sort_by(|a, b| {
        a.display_order
            .cmp(&b.display_order)
            .then_with(|| a.name.cmp(&b.name))
    });
    universities
}

fn live_mut<'a, T>(
    rows: &'a mut HashMap<Uuid, T>,
    id: Uuid,
    is_live: impl Fn(&T) -> bool,
) -> Option<&'a mut T> {
    rows.get_mut(&id).filter(|row| is_live(row))
}

#[async_trait]
impl UniversityRepository for InMemoryUniversityStore {
    async fn insert(&self, university: University) -> UniversityResult<University> {
        let mut rows = self.universities.write().await;
        check_unique_university(&rows, &university)?;
        rows.insert(university.id, university.clone());

        tracing::info!(university_id = %university.id, "Created university");
        Ok(university)
    }

    async fn update(&self, university: University) -> UniversityResult<University> {
        let mut rows = self.universities.write().await;
        check_unique_university(&rows, &university)?;

        let row = live_mut(&mut rows, university.id, |u| u.deleted_at.is_none())
            .ok_or(UniversityError::NotFound(Resource::University, university.id))?;
        *row = university.clone();

        tracing::info!(university_id = %university.id, "Updated university");
        Ok(university)
    }

    async fn get_by_id(&self, id: Uuid) -> UniversityResult<Option<University>> {
        let rows = self.universities.read().await;
        Ok(rows.get(&id).filter(|u| u.deleted_at.is_none()).cloned())
    }

    async fn get_by_slug(&self, slug: &str) -> UniversityResult<Option<University>> {
        let rows = self.universities.read().await;
        Ok(rows
            .values()
            .find(|u| u.deleted_at.is_none() && u.has_slug(slug))
            .cloned())
    }

    async fn list(&self, filter: UniversityFilter) -> UniversityResult<Vec<University>> {
        let rows = self.universities.read().await;
        let matching = rows
            .values()
            .filter(|u| u.deleted_at.is_none() && filter.matches(u))
            .cloned();

        Ok(sorted_universities(matching)
            .into_iter()
            .skip(filter.offset as usize)
            .take(filter.limit as usize)
            .collect())
    }

    async fn list_featured(&self, limit: u64) -> UniversityResult<Vec<University>> {
        let rows = self.universities.read().await;
        let featured = rows
            .values()
            .filter(|u| u.deleted_at.is_none() && u.is_active && u.is_featured)
            .cloned();

        Ok(sorted_universities(featured)
            .into_iter()
            .take(limit as usize)
            .collect())
    }

    async fn soft_delete(&self, id: Uuid, ctx: &AuditContext) -> UniversityResult<bool> {
        let mut rows = self.universities.write().await;
        match live_mut(&mut rows, id, |u| u.deleted_at.is_none()) {
            Some(university) => {
                university.deleted_at = Some(ctx.at);
                university.touch(ctx);
                tracing::info!(university_id = %id, "Deleted university");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn exists_by_name(&self, name: &str, exclude_id: Option<Uuid>) -> UniversityResult<bool> {
        let rows = self.universities.read().await;
        Ok(rows.values().any(|u| {
            u.deleted_at.is_none() && Some(u.id) != exclude_id && u.name == name
        }))
    }

    async fn exists_by_slug(&self, slug: &str, exclude_id: Option<Uuid>) -> UniversityResult<bool> {
        let rows = self.universities.read().await;
        Ok(rows.values().any(|u| {
            u.deleted_at.is_none() && Some(u.id) != exclude_id && u.has_slug(slug)
        }))
    }
}

#[async_trait]
impl UniversityFaqRepository for InMemoryUniversityStore {
    async fn insert_faq(&self, faq: UniversityFaq) -> UniversityResult<UniversityFaq> {
        self.faqs.write().await.insert(faq.id, faq.clone());
        tracing::info!(faq_id = %faq.id, university_id = %faq.university_id, "Created university FAQ");
        Ok(faq)
    }

    async fn update_faq(&self, faq: UniversityFaq) -> UniversityResult<UniversityFaq> {
        let mut rows = self.faqs.write().await;
        let row = live_mut(&mut rows, faq.id, |f| f.deleted_at.is_none())
            .ok_or(UniversityError::NotFound(Resource::Faq, faq.id))?;
        *row = faq.clone();
        tracing::info!(faq_id = %faq.id, "Updated university FAQ");
        Ok(faq)
    }

    async fn get_faq(&self, id: Uuid) -> UniversityResult<Option<UniversityFaq>> {
        let rows = self.faqs.read().await;
        Ok(rows.get(&id).filter(|f| f.deleted_at.is_none()).cloned())
    }

    async fn list_faqs(
        &self,
        university_id: Uuid,
        published_only: bool,
    ) -> UniversityResult<Vec<UniversityFaq>> {
        let rows = self.faqs.read().await;
        let mut faqs = live_children(rows.values(), university_id);
        if published_only {
            faqs.retain(|f| f.is_published);
        }
        Ok(faqs)
    }

    async fn soft_delete_faq(&self, id: Uuid, ctx: &AuditContext) -> UniversityResult<bool> {
        let mut rows = self.faqs.write().await;
        match live_mut(&mut rows, id, |f| f.deleted_at.is_none()) {
            Some(faq) => {
                faq.deleted_at = Some(ctx.at);
                faq.touch(ctx);
                tracing::info!(faq_id = %id, "Deleted university FAQ");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn max_faq_display_order(&self, university_id: Uuid) -> UniversityResult<Option<i32>> {
        let rows = self.faqs.read().await;
        Ok(max_display_order(rows.values(), university_id))
    }

    async fn reorder_faqs(
        &self,
        university_id: Uuid,
        items: &[DisplayOrderItem],
        ctx: &AuditContext,
    ) -> UniversityResult<()> {
        let mut rows = self.faqs.write().await;
        apply_reorder(&mut rows, university_id, items, ctx)
            .map_err(|id| UniversityError::NotFound(Resource::Faq, id))?;
        tracing::info!(university_id = %university_id, count = items.len(), "Reordered university FAQs");
        Ok(())
    }
}

#[async_trait]
impl UniversityContentRepository for InMemoryUniversityStore {
    async fn insert_content(&self, content: UniversityContent) -> UniversityResult<UniversityContent> {
        let mut rows = self.contents.write().await;
        check_unique_content(&rows, &content)?;
        rows.insert(content.id, content.clone());
        tracing::info!(
            content_id = %content.id,
            university_id = %content.university_id,
            content_type = %content.content_type,
            "Created university content"
        );
        Ok(content)
    }

    async fn update_content(&self, content: UniversityContent) -> UniversityResult<UniversityContent> {
        let mut rows = self.contents.write().await;
        check_unique_content(&rows, &content)?;
        let row = live_mut(&mut rows, content.id, |c| c.deleted_at.is_none())
            .ok_or(UniversityError::NotFound(Resource::Content, content.id))?;
        *row = content.clone();
        tracing::info!(content_id = %content.id, "Updated university content");
        Ok(content)
    }

    async fn get_content(&self, id: Uuid) -> UniversityResult<Option<UniversityContent>> {
        let rows = self.contents.read().await;
        Ok(rows.get(&id).filter(|c| c.deleted_at.is_none()).cloned())
    }

    async fn get_content_by_type(
        &self,
        university_id: Uuid,
        content_type: ContentType,
    ) -> UniversityResult<Option<UniversityContent>> {
        let rows = self.contents.read().await;
        Ok(rows
            .values()
            .find(|c| {
                c.deleted_at.is_none()
                    && c.university_id == university_id
                    && c.content_type == content_type
            })
            .cloned())
    }

    async fn list_contents(
        &self,
        university_id: Uuid,
        published_only: bool,
    ) -> UniversityResult<Vec<UniversityContent>> {
        let rows = self.contents.read().await;
        let mut contents = live_children(rows.values(), university_id);
        if published_only {
            contents.retain(|c| c.is_published);
        }
        Ok(contents)
    }

    async fn soft_delete_content(&self, id: Uuid, ctx: &AuditContext) -> UniversityResult<bool> {
        let mut rows = self.contents.write().await;
        match live_mut(&mut rows, id, |c| c.deleted_at.is_none()) {
            Some(content) => {
                content.deleted_at = Some(ctx.at);
                content.touch(ctx);
                tracing::info!(content_id = %id, "Deleted university content");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn max_content_display_order(&self, university_id: Uuid) -> UniversityResult<Option<i32>> {
        let rows = self.contents.read().await;
        Ok(max_display_order(rows.values(), university_id))
    }

    async fn reorder_contents(
        &self,
        university_id: Uuid,
        items: &[DisplayOrderItem],
        ctx: &AuditContext,
    ) -> UniversityResult<()> {
        let mut rows = self.contents.write().await;
        apply_reorder(&mut rows, university_id, items, ctx)
            .map_err(|id| UniversityError::NotFound(Resource::Content, id))?;
        tracing::info!(university_id = %university_id, count = items.len(), "Reordered university contents");
        Ok(())
    }

    async fn content_type_exists(
        &self,
        university_id: Uuid,
        content_type: ContentType,
        exclude_id: Option<Uuid>,
    ) -> UniversityResult<bool> {
        let rows = self.contents.read().await;
        Ok(rows.values().any(|c| {
            c.deleted_at.is_none()
                && Some(c.id) != exclude_id
                && c.university_id == university_id
                && c.content_type == content_type
        }))
    }
}

#[async_trait]
impl UniversityProgramRepository for InMemoryUniversityStore {
    async fn insert_program(&self, program: UniversityProgram) -> UniversityResult<UniversityProgram> {
        self.programs.write().await.insert(program.id, program.clone());
        tracing::info!(
            program_id = %program.id,
            university_id = %program.university_id,
            "Created university program"
        );
        Ok(program)
    }

    async fn update_program(&self, program: UniversityProgram) -> UniversityResult<UniversityProgram> {
        let mut rows = self.programs.write().await;
        let row = live_mut(&mut rows, program.id, |p| p.deleted_at.is_none())
            .ok_or(UniversityError::NotFound(Resource::Program, program.id))?;
        *row = program.clone();
        tracing::info!(program_id = %program.id, "Updated university program");
        Ok(program)
    }

    async fn get_program(&self, id: Uuid) -> UniversityResult<Option<UniversityProgram>> {
        let rows = self.programs.read().await;
        Ok(rows.get(&id).filter(|p| p.deleted_at.is_none()).cloned())
    }

    async fn list_programs(
        &self,
        university_id: Uuid,
        active_only: bool,
    ) -> UniversityResult<Vec<UniversityProgram>> {
        let rows = self.programs.read().await;
        let mut programs = live_children(rows.values(), university_id);
        if active_only {
            programs.retain(|p| p.is_active);
        }
        Ok(programs)
    }

    async fn soft_delete_program(&self, id: Uuid, ctx: &AuditContext) -> UniversityResult<bool> {
        let mut rows = self.programs.write().await;
        match live_mut(&mut rows, id, |p| p.deleted_at.is_none()) {
            Some(program) => {
                program.deleted_at = Some(ctx.at);
                program.touch(ctx);
                tracing::info!(program_id = %id, "Deleted university program");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn max_program_display_order(&self, university_id: Uuid) -> UniversityResult<Option<i32>> {
        let rows = self.programs.read().await;
        Ok(max_display_order(rows.values(), university_id))
    }

    async fn reorder_programs(
        &self,
        university_id: Uuid,
        items: &[DisplayOrderItem],
        ctx: &AuditContext,
    ) -> UniversityResult<()> {
        let mut rows = self.programs.write().await;
        apply_reorder(&mut rows, university_id, items, ctx)
            .map_err(|id| UniversityError::NotFound(Resource::Program, id))?;
        tracing::info!(university_id = %university_id, count = items.len(), "Reordered university programs");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CreateUniversity;

    fn university(name: &str, slug: &str) -> University {
        University::new(
            CreateUniversity {
                name: name.to_string(),
                name_ar: format!("{name} ar"),
                description: String::new(),
                description_ar: String::new(),
                slug: None,
                slug_ar: None,
                city: "Cairo".to_string(),
                city_ar: String::new(),
                country: "Egypt".to_string(),
                website_url: None,
                logo_url: None,
                rating: None,
                is_active: true,
                is_featured: false,
                display_order: 0,
            },
            slug.to_string(),
            None,
            &AuditContext::system(),
        )
    }

    #[tokio::test]
    async fn test_insert_rejects_live_duplicates_only() {
        let store = InMemoryUniversityStore::new();
        let first = store.insert(university("Alpha", "alpha")).await.unwrap();

        let err = store.insert(university("Alpha", "alpha-2")).await.unwrap_err();
        assert!(matches!(err, UniversityError::DuplicateName(_)));

        let err = store.insert(university("Beta", "alpha")).await.unwrap_err();
        assert!(matches!(err, UniversityError::DuplicateSlug(_)));

        assert!(store.soft_delete(first.id, &AuditContext::system()).await.unwrap());
        assert!(store.insert(university("Alpha", "alpha")).await.is_ok());
    }

    #[tokio::test]
    async fn test_deleted_rows_are_invisible() {
        let store = InMemoryUniversityStore::new();
        let created = store.insert(university("Alpha", "alpha")).await.unwrap();
        store.soft_delete(created.id, &AuditContext::system()).await.unwrap();

        assert!(store.get_by_id(created.id).await.unwrap().is_none());
        assert!(store.get_by_slug("alpha").await.unwrap().is_none());
        assert!(!store.exists_by_name("Alpha", None).await.unwrap());
        assert!(store.list(UniversityFilter::default()).await.unwrap().is_empty());
        assert!(!store.soft_delete(created.id, &AuditContext::system()).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_orders_by_display_order_then_name_and_pages() {
        let store = InMemoryUniversityStore::new();
        let mut later = university("Aardvark", "aardvark");
        later.display_order = 2;
        store.insert(later).await.unwrap();
        store.insert(university("Zeta", "zeta")).await.unwrap();
        store.insert(university("Beta", "beta")).await.unwrap();

        let names: Vec<String> = store
            .list(UniversityFilter::default())
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.name)
            .collect();
        assert_eq!(names, vec!["Beta", "Zeta", "Aardvark"]);

        let page = store
            .list(UniversityFilter {
                limit: 1,
                offset: 1,
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].name, "Zeta");
    }

    #[tokio::test]
    async fn test_exists_by_slug_checks_both_columns() {
        let store = InMemoryUniversityStore::new();
        let mut u = university("Alpha", "alpha");
        u.slug_ar = Some("ألفا".to_string());
        let created = store.insert(u).await.unwrap();

        assert!(store.exists_by_slug("ألفا", None).await.unwrap());
        assert!(store.exists_by_slug("alpha", None).await.unwrap());
        assert!(!store.exists_by_slug("alpha", Some(created.id)).await.unwrap());
    }
}
