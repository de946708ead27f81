use directory_rules::{AuditContext, ReorderRequest, next_display_order};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use super::{ensure_university, validation_error};
use crate::error::{Resource, UniversityError, UniversityResult};
use crate::models::{CreateUniversityFaq, UniversityFaq, UpdateUniversityFaq};
use crate::repository::{UniversityFaqRepository, UniversityRepository};

pub struct UniversityFaqService<U: ?Sized, R: ?Sized> {
    universities: Arc<U>,
    repository: Arc<R>,
}

impl<U: ?Sized, R: ?Sized> Clone for UniversityFaqService<U, R> {
    fn clone(&self) -> Self {
        Self {
            universities: Arc::clone(&self.universities),
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<U, R> UniversityFaqService<U, R>
where
    U: UniversityRepository + ?Sized,
    R: UniversityFaqRepository + ?Sized,
{
    pub fn new(universities: Arc<U>, repository: Arc<R>) -> Self {
        Self {
            universities,
            repository,
        }
    }

    /// Add a FAQ, appending it after the last one unless a position is given
    pub async fn create(
        &self,
        ctx: &AuditContext,
        university_id: Uuid,
        input: CreateUniversityFaq,
    ) -> UniversityResult<UniversityFaq> {
        input.validate().map_err(validation_error)?;
        ensure_university(self.universities.as_ref(), university_id).await?;

        let display_order = match input.display_order {
            Some(order) => order,
            None => next_display_order(self.repository.max_faq_display_order(university_id).await?),
        };

        let faq = UniversityFaq::new(university_id, input, display_order, ctx);
        self.repository.insert_faq(faq).await
    }

    pub async fn get(&self, id: Uuid) -> UniversityResult<UniversityFaq> {
        self.repository
            .get_faq(id)
            .await?
            .ok_or(UniversityError::NotFound(Resource::Faq, id))
    }

    pub async fn update(
        &self,
        ctx: &AuditContext,
        id: Uuid,
        input: UpdateUniversityFaq,
    ) -> UniversityResult<UniversityFaq> {
        input.validate().map_err(validation_error)?;

        let mut faq = self.get(id).await?;
        faq.apply_update(input, ctx);
        self.repository.update_faq(faq).await
    }

    pub async fn delete(&self, ctx: &AuditContext, id: Uuid) -> UniversityResult<()> {
        if !self.repository.soft_delete_faq(id, ctx).await? {
            return Err(UniversityError::NotFound(Resource::Faq, id));
        }
        Ok(())
    }

    pub async fn list_by_university(
        &self,
        university_id: Uuid,
        published_only: bool,
    ) -> UniversityResult<Vec<UniversityFaq>> {
        ensure_university(self.universities.as_ref(), university_id).await?;
        self.repository.list_faqs(university_id, published_only).await
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
            .reorder_faqs(university_id, &request.items, ctx)
            .await
    }

    pub async fn toggle_published(&self, ctx: &AuditContext, id: Uuid) -> UniversityResult<UniversityFaq> {
        let mut faq = self.get(id).await?;
        faq.is_published = !faq.is_published;
        faq.touch(ctx);
        self.repository.update_faq(faq).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CreateUniversity;
    use crate::repository::{
        InMemoryUniversityStore, MockUniversityFaqRepository, MockUniversityRepository,
    };
    use crate::service::UniversityService;
    use directory_rules::DisplayOrderItem;

    fn faq_input(question: &str) -> CreateUniversityFaq {
        CreateUniversityFaq {
            question: question.to_string(),
            question_ar: String::new(),
            answer: "Answer".to_string(),
            answer_ar: String::new(),
            display_order: None,
            is_published: true,
        }
    }

    async fn setup() -> (
        UniversityFaqService<InMemoryUniversityStore, InMemoryUniversityStore>,
        Uuid,
    ) {
        let store = Arc::new(InMemoryUniversityStore::new());
        let university = UniversityService::new(Arc::clone(&store))
            .create(
                &AuditContext::system(),
                CreateUniversity {
                    name: "Alpha".to_string(),
                    name_ar: "ألفا".to_string(),
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
            )
            .await
            .unwrap();
        (UniversityFaqService::new(Arc::clone(&store), store), university.id)
    }

    #[tokio::test]
    async fn test_create_appends_after_last() {
        let (service, university_id) = setup().await;
        let ctx = AuditContext::system();

        let first = service.create(&ctx, university_id, faq_input("Q1")).await.unwrap();
        let second = service.create(&ctx, university_id, faq_input("Q2")).await.unwrap();
        let mut pinned = faq_input("Q3");
        pinned.display_order = Some(10);
        let third = service.create(&ctx, university_id, pinned).await.unwrap();
        let fourth = service.create(&ctx, university_id, faq_input("Q4")).await.unwrap();

        assert_eq!(first.display_order, 0);
        assert_eq!(second.display_order, 1);
        assert_eq!(third.display_order, 10);
        assert_eq!(fourth.display_order, 11);
    }

    #[tokio::test]
    async fn test_create_requires_live_parent() {
        let mut universities = MockUniversityRepository::new();
        universities.expect_get_by_id().returning(|_| Ok(None));
        let mut faqs = MockUniversityFaqRepository::new();
        faqs.expect_insert_faq().never();

        let service = UniversityFaqService::new(Arc::new(universities), Arc::new(faqs));
        let missing = Uuid::now_v7();
        let err = service
            .create(&AuditContext::system(), missing, faq_input("Q"))
            .await
            .unwrap_err();

        assert!(matches!(err, UniversityError::ParentNotFound(id) if id == missing));
    }

    #[tokio::test]
    async fn test_reorder_and_list() {
        let (service, university_id) = setup().await;
        let ctx = AuditContext::system();
        let a = service.create(&ctx, university_id, faq_input("A")).await.unwrap();
        let b = service.create(&ctx, university_id, faq_input("B")).await.unwrap();

        service
            .reorder(
                &ctx,
                university_id,
                ReorderRequest {
                    items: vec![
                        DisplayOrderItem { id: a.id, display_order: 1 },
                        DisplayOrderItem { id: b.id, display_order: 0 },
                    ],
                },
            )
            .await
            .unwrap();

        let questions: Vec<String> = service
            .list_by_university(university_id, false)
            .await
            .unwrap()
            .into_iter()
            .map(|f| f.question)
            .collect();
        assert_eq!(questions, vec!["B", "A"]);
    }

    #[tokio::test]
    async fn test_reorder_with_unknown_id_changes_nothing() {
        let (service, university_id) = setup().await;
        let ctx = AuditContext::system();
        let a = service.create(&ctx, university_id, faq_input("A")).await.unwrap();
        let unknown = Uuid::now_v7();

        let err = service
            .reorder(
                &ctx,
                university_id,
                ReorderRequest {
                    items: vec![
                        DisplayOrderItem { id: a.id, display_order: 5 },
                        DisplayOrderItem { id: unknown, display_order: 0 },
                    ],
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, UniversityError::NotFound(Resource::Faq, id) if id == unknown));
        assert_eq!(service.get(a.id).await.unwrap().display_order, 0);
    }

    #[tokio::test]
    async fn test_toggle_published_and_filtered_listing() {
        let (service, university_id) = setup().await;
        let ctx = AuditContext::system();
        let faq = service.create(&ctx, university_id, faq_input("A")).await.unwrap();

        let hidden = service.toggle_published(&ctx, faq.id).await.unwrap();
        assert!(!hidden.is_published);
        assert!(service.list_by_university(university_id, true).await.unwrap().is_empty());
        assert_eq!(service.list_by_university(university_id, false).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_twice_is_not_found() {
        let (service, university_id) = setup().await;
        let ctx = AuditContext::system();
        let faq = service.create(&ctx, university_id, faq_input("A")).await.unwrap();

        service.delete(&ctx, faq.id).await.unwrap();
        assert!(matches!(
            service.delete(&ctx, faq.id).await,
            Err(UniversityError::NotFound(Resource::Faq, _))
        ));
    }
}
