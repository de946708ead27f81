use directory_rules::{AuditContext, ReorderRequest, next_display_order};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use super::{ensure_university, validation_error};
use crate::error::{Resource, UniversityError, UniversityResult};
use crate::models::{
    ContentType, CreateUniversityContent, UniversityContent, UpdateUniversityContent,
};
use crate::repository::{UniversityContentRepository, UniversityRepository};

/// Content sections, at most one live section per type and university
pub struct UniversityContentService<U: ?Sized, R: ?Sized> {
    universities: Arc<U>,
    repository: Arc<R>,
}

impl<U: ?Sized, R: ?Sized> Clone for UniversityContentService<U, R> {
    fn clone(&self) -> Self {
        Self {
            universities: Arc::clone(&self.universities),
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<U, R> UniversityContentService<U, R>
where
    U: UniversityRepository + ?Sized,
    R: UniversityContentRepository + ?Sized,
{
    pub fn new(universities: Arc<U>, repository: Arc<R>) -> Self {
        Self {
            universities,
            repository,
        }
    }

    async fn ensure_type_free(
        &self,
        university_id: Uuid,
        content_type: ContentType,
        exclude_id: Option<Uuid>,
    ) -> UniversityResult<()> {
        if self
            .repository
            .content_type_exists(university_id, content_type, exclude_id)
            .await?
        {
            return Err(UniversityError::DuplicateContentType(content_type));
        }
        Ok(())
    }

    pub async fn create(
        &self,
        ctx: &AuditContext,
        university_id: Uuid,
        input: CreateUniversityContent,
    ) -> UniversityResult<UniversityContent> {
        input.validate().map_err(validation_error)?;
        ensure_university(self.universities.as_ref(), university_id).await?;
        self.ensure_type_free(university_id, input.content_type, None)
            .await?;

        let display_order = match input.display_order {
            Some(order) => order,
            None => next_display_order(
                self.repository
                    .max_content_display_order(university_id)
                    .await?,
            ),
        };

        let content = UniversityContent::new(university_id, input, display_order, ctx);
        self.repository.insert_content(content).await
    }

    pub async fn get(&self, id: Uuid) -> UniversityResult<UniversityContent> {
        self.repository
            .get_content(id)
            .await?
            .ok_or(UniversityError::NotFound(Resource::Content, id))
    }

    pub async fn get_by_type(
        &self,
        university_id: Uuid,
        content_type: ContentType,
    ) -> UniversityResult<UniversityContent> {
        self.repository
            .get_content_by_type(university_id, content_type)
            .await?
            .ok_or(UniversityError::SectionNotFound(content_type))
    }

    pub async fn update(
        &self,
        ctx: &AuditContext,
        id: Uuid,
        input: UpdateUniversityContent,
    ) -> UniversityResult<UniversityContent> {
        input.validate().map_err(validation_error)?;

        let mut content = self.get(id).await?;
        if let Some(content_type) = input.content_type.filter(|t| *t != content.content_type) {
            self.ensure_type_free(content.university_id, content_type, Some(id))
                .await?;
        }

        content.apply_update(input, ctx);
        self.repository.update_content(content).await
    }

    pub async fn delete(&self, ctx: &AuditContext, id: Uuid) -> UniversityResult<()> {
        if !self.repository.soft_delete_content(id, ctx).await? {
            return Err(UniversityError::NotFound(Resource::Content, id));
        }
        Ok(())
    }

    pub async fn list_by_university(
        &self,
        university_id: Uuid,
        published_only: bool,
    ) -> UniversityResult<Vec<UniversityContent>> {
        ensure_university(self.universities.as_ref(), university_id).await?;
        self.repository
            .list_contents(university_id, published_only)
            .await
    }

    pub async fn reorder(
        &self,
        ctx: &AuditContext,
        university_id: Uuid,
        request: ReorderRequest,
    ) -> UniversityResult<()> {
        request.validate().map_err(validation_error)?;
        ensure_university(self.universities.as_ref(), university_id).await?;
        self.repository
            .reorder_contents(university_id, &request.items, ctx)
            .await
    }

    pub async fn toggle_published(
        &self,
        ctx: &AuditContext,
        id: Uuid,
    ) -> UniversityResult<UniversityContent> {
        let mut content = self.get(id).await?;
        content.is_published = !content.is_published;
        content.touch(ctx);
        self.repository.update_content(content).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::University;
    use crate::repository::{
        InMemoryUniversityStore, MockUniversityContentRepository, MockUniversityRepository,
    };

    fn content_input(content_type: ContentType) -> CreateUniversityContent {
        CreateUniversityContent {
            content_type,
            title: content_type.to_string(),
            title_ar: String::new(),
            body: "Body".to_string(),
            body_ar: String::new(),
            display_order: None,
            is_published: true,
        }
    }

    async fn setup() -> (
        UniversityContentService<InMemoryUniversityStore, InMemoryUniversityStore>,
        Uuid,
    ) {
        let store = Arc::new(InMemoryUniversityStore::new());
        let university: University = serde_json::from_value(serde_json::json!({
            "id": Uuid::now_v7(),
            "name": "Alpha",
            "name_ar": "ألفا",
            "description": "",
            "description_ar": "",
            "slug": "alpha",
            "slug_ar": null,
            "city": "Cairo",
            "city_ar": "",
            "country": "Egypt",
            "website_url": null,
            "logo_url": null,
            "rating": null,
            "is_active": true,
            "is_featured": false,
            "display_order": 0,
            "created_at": "2026-01-01T00:00:00Z",
            "updated_at": "2026-01-01T00:00:00Z",
            "created_by": null,
            "updated_by": null
        }))
        .unwrap();
        let university = store.insert(university).await.unwrap();
        (UniversityContentService::new(Arc::clone(&store), store), university.id)
    }

    #[tokio::test]
    async fn test_one_section_per_type() {
        let (service, university_id) = setup().await;
        let ctx = AuditContext::system();
        service
            .create(&ctx, university_id, content_input(ContentType::Overview))
            .await
            .unwrap();

        let err = service
            .create(&ctx, university_id, content_input(ContentType::Overview))
            .await
            .unwrap_err();
        assert!(matches!(err, UniversityError::DuplicateContentType(ContentType::Overview)));

        assert!(
            service
                .create(&ctx, university_id, content_input(ContentType::Admission))
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_type_is_free_again_after_delete() {
        let (service, university_id) = setup().await;
        let ctx = AuditContext::system();
        let overview = service
            .create(&ctx, university_id, content_input(ContentType::Overview))
            .await
            .unwrap();

        service.delete(&ctx, overview.id).await.unwrap();

        assert!(
            service
                .create(&ctx, university_id, content_input(ContentType::Overview))
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_update_into_taken_type_fails() {
        let (service, university_id) = setup().await;
        let ctx = AuditContext::system();
        service
            .create(&ctx, university_id, content_input(ContentType::Overview))
            .await
            .unwrap();
        let contact = service
            .create(&ctx, university_id, content_input(ContentType::Contact))
            .await
            .unwrap();

        let err = service
            .update(
                &ctx,
                contact.id,
                UpdateUniversityContent {
                    content_type: Some(ContentType::Overview),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, UniversityError::DuplicateContentType(ContentType::Overview)));

        let retitled = service
            .update(
                &ctx,
                contact.id,
                UpdateUniversityContent {
                    content_type: Some(ContentType::Contact),
                    title: Some("Reach us".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(retitled.title, "Reach us");
    }

    #[tokio::test]
    async fn test_get_by_type() {
        let (service, university_id) = setup().await;
        let ctx = AuditContext::system();
        let created = service
            .create(&ctx, university_id, content_input(ContentType::Scholarships))
            .await
            .unwrap();

        let found = service
            .get_by_type(university_id, ContentType::Scholarships)
            .await
            .unwrap();
        assert_eq!(found.id, created.id);
        assert!(matches!(
            service.get_by_type(university_id, ContentType::Facilities).await,
            Err(UniversityError::SectionNotFound(ContentType::Facilities))
        ));
    }

    #[tokio::test]
    async fn test_create_checks_parent_before_type() {
        let mut universities = MockUniversityRepository::new();
        universities.expect_get_by_id().returning(|_| Ok(None));
        let mut contents = MockUniversityContentRepository::new();
        contents.expect_content_type_exists().never();

        let service = UniversityContentService::new(Arc::new(universities), Arc::new(contents));
        let err = service
            .create(
                &AuditContext::system(),
                Uuid::now_v7(),
                content_input(ContentType::Overview),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, UniversityError::ParentNotFound(_)));
    }
}
