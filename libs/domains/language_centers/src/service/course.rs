use directory_rules::{AuditContext, ReorderRequest, next_display_order};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use super::{ensure_center, validation_error};
use crate::error::{LanguageCenterError, LanguageCenterResult, Resource};
use crate::models::{CreateLanguageCourse, LanguageCourse, UpdateLanguageCourse};
use crate::repository::{LanguageCenterRepository, LanguageCourseRepository};

pub struct LanguageCourseService<U: ?Sized, R: ?Sized> {
    centers: Arc<U>,
    repository: Arc<R>,
}

impl<U: ?Sized, R: ?Sized> Clone for LanguageCourseService<U, R> {
    fn clone(&self) -> Self {
        Self {
            centers: Arc::clone(&self.centers),
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<U, R> LanguageCourseService<U, R>
where
    U: LanguageCenterRepository + ?Sized,
    R: LanguageCourseRepository + ?Sized,
{
    pub fn new(centers: Arc<U>, repository: Arc<R>) -> Self {
        Self {
            centers,
            repository,
        }
    }

    pub async fn create(
        &self,
        ctx: &AuditContext,
        language_center_id: Uuid,
        input: CreateLanguageCourse,
    ) -> LanguageCenterResult<LanguageCourse> {
        input.validate().map_err(validation_error)?;
        ensure_center(self.centers.as_ref(), language_center_id).await?;

        let display_order = match input.display_order {
            Some(order) => order,
            None => next_display_order(
                self.repository
                    .max_course_display_order(language_center_id)
                    .await?,
            ),
        };

        let course = LanguageCourse::new(language_center_id, input, display_order, ctx);
        self.repository.insert_course(course).await
    }

    pub async fn get(&self, id: Uuid) -> LanguageCenterResult<LanguageCourse> {
        self.repository
            .get_course(id)
            .await?
            .ok_or(LanguageCenterError::NotFound(Resource::Course, id))
    }

    pub async fn update(
        &self,
        ctx: &AuditContext,
        id: Uuid,
        input: UpdateLanguageCourse,
    ) -> LanguageCenterResult<LanguageCourse> {
        input.validate().map_err(validation_error)?;

        let mut course = self.get(id).await?;
        course.apply_update(input, ctx);
        self.repository.update_course(course).await
    }

    pub async fn delete(&self, ctx: &AuditContext, id: Uuid) -> LanguageCenterResult<()> {
        if !self.repository.soft_delete_course(id, ctx).await? {
            return Err(LanguageCenterError::NotFound(Resource::Course, id));
        }
        Ok(())
    }

    pub async fn list_by_center(
        &self,
        language_center_id: Uuid,
        active_only: bool,
    ) -> LanguageCenterResult<Vec<LanguageCourse>> {
        ensure_center(self.centers.as_ref(), language_center_id).await?;
        self.repository
            .list_courses(language_center_id, active_only)
            .await
    }

    pub async fn reorder(
        &self,
        ctx: &AuditContext,
        language_center_id: Uuid,
        request: ReorderRequest,
    ) -> LanguageCenterResult<()> {
        request.validate().map_err(validation_error)?;
        ensure_center(self.centers.as_ref(), language_center_id).await?;
        self.repository
            .reorder_courses(language_center_id, &request.items, ctx)
            .await
    }

    pub async fn toggle_active(
        &self,
        ctx: &AuditContext,
        id: Uuid,
    ) -> LanguageCenterResult<LanguageCourse> {
        let mut course = self.get(id).await?;
        course.is_active = !course.is_active;
        course.touch(ctx);
        self.repository.update_course(course).await
    }

    pub async fn toggle_featured(
        &self,
        ctx: &AuditContext,
        id: Uuid,
    ) -> LanguageCenterResult<LanguageCourse> {
        let mut course = self.get(id).await?;
        course.is_featured = !course.is_featured;
        course.touch(ctx);
        self.repository.update_course(course).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CourseLevel, CreateLanguageCenter};
    use crate::repository::InMemoryLanguageCenterStore;
    use crate::service::LanguageCenterService;
    use directory_rules::DisplayOrderItem;

    fn course_input(name: &str, level: CourseLevel) -> CreateLanguageCourse {
        CreateLanguageCourse {
            name: name.to_string(),
            name_ar: String::new(),
            description: String::new(),
            description_ar: String::new(),
            level,
            lessons_per_week: Some(5),
            max_class_size: Some(12),
            display_order: None,
            is_active: true,
            is_featured: false,
        }
    }

    async fn setup() -> (
        LanguageCourseService<InMemoryLanguageCenterStore, InMemoryLanguageCenterStore>,
        Uuid,
    ) {
        let store = Arc::new(InMemoryLanguageCenterStore::new());
        let center = LanguageCenterService::new(Arc::clone(&store))
            .create(
                &AuditContext::system(),
                CreateLanguageCenter {
                    name: "Berlitz Cairo".to_string(),
                    name_ar: "برليتز القاهرة".to_string(),
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
        (LanguageCourseService::new(Arc::clone(&store), store), center.id)
    }

    #[tokio::test]
    async fn test_courses_listed_in_display_order() {
        let (service, center_id) = setup().await;
        let ctx = AuditContext::system();
        let general = service
            .create(&ctx, center_id, course_input("General English", CourseLevel::Beginner))
            .await
            .unwrap();
        let ielts = service
            .create(&ctx, center_id, course_input("IELTS Preparation", CourseLevel::Advanced))
            .await
            .unwrap();
        assert_eq!((general.display_order, ielts.display_order), (0, 1));

        service
            .reorder(
                &ctx,
                center_id,
                ReorderRequest {
                    items: vec![
                        DisplayOrderItem { id: ielts.id, display_order: 0 },
                        DisplayOrderItem { id: general.id, display_order: 1 },
                    ],
                },
            )
            .await
            .unwrap();

        let names: Vec<String> = service
            .list_by_center(center_id, false)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["IELTS Preparation", "General English"]);
    }

    #[tokio::test]
    async fn test_toggle_active_twice_restores_value() {
        let (service, center_id) = setup().await;
        let ctx = AuditContext::system();
        let course = service
            .create(&ctx, center_id, course_input("Business English", CourseLevel::Intermediate))
            .await
            .unwrap();

        let off = service.toggle_active(&ctx, course.id).await.unwrap();
        assert!(!off.is_active);
        assert!(service.list_by_center(center_id, true).await.unwrap().is_empty());

        let on = service.toggle_active(&ctx, course.id).await.unwrap();
        assert!(on.is_active);
    }

    #[tokio::test]
    async fn test_update_validates_lessons_per_week() {
        let (service, center_id) = setup().await;
        let ctx = AuditContext::system();
        let course = service
            .create(&ctx, center_id, course_input("Arabic for Beginners", CourseLevel::Beginner))
            .await
            .unwrap();

        let err = service
            .update(
                &ctx,
                course.id,
                UpdateLanguageCourse {
                    lessons_per_week: Some(0),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, LanguageCenterError::Validation(_)));
    }

    #[tokio::test]
    async fn test_create_course_for_missing_center() {
        let (service, _) = setup().await;
        let err = service
            .create(
                &AuditContext::system(),
                Uuid::now_v7(),
                course_input("French", CourseLevel::AllLevels),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, LanguageCenterError::ParentNotFound(_)));
    }
}
