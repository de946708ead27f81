use async_trait::async_trait;
use directory_rules::{
    AuditContext, UniqueFieldLookup, UniquenessValidator, generate_slug, is_valid_rating,
    resolve_slug,
};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::error::{Resource, UniversityError, UniversityResult};
use crate::models::{CreateUniversity, University, UniversityFilter, UpdateUniversity};
use crate::repository::UniversityRepository;

/// Adapts a [`UniversityRepository`] to the shared uniqueness validator.
pub struct UniversityLookup<R: ?Sized>(Arc<R>);

#[async_trait]
impl<R: UniversityRepository + ?Sized> UniqueFieldLookup for UniversityLookup<R> {
    type Error = UniversityError;

    async fn name_exists(&self, name: &str, exclude_id: Option<Uuid>) -> UniversityResult<bool> {
        self.0.exists_by_name(name, exclude_id).await
    }

    async fn slug_exists(&self, slug: &str, exclude_id: Option<Uuid>) -> UniversityResult<bool> {
        self.0.exists_by_slug(slug, exclude_id).await
    }
}

/// University management: uniqueness, slugs, listing and toggles
pub struct UniversityService<R: UniversityRepository + ?Sized> {
    repository: Arc<R>,
    uniqueness: UniquenessValidator<UniversityLookup<R>>,
}

impl<R: UniversityRepository + ?Sized> Clone for UniversityService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            uniqueness: self.uniqueness.clone(),
        }
    }
}

fn check_rating(rating: Option<rust_decimal::Decimal>) -> UniversityResult<()> {
    match rating {
        Some(rating) if !is_valid_rating(rating) => Err(UniversityError::InvalidRating(rating)),
        _ => Ok(()),
    }
}

impl<R: UniversityRepository + ?Sized> UniversityService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        let lookup = UniversityLookup(Arc::clone(&repository));
        Self {
            repository,
            uniqueness: UniquenessValidator::new(Arc::new(lookup)),
        }
    }

    /// Create a university, deriving missing slugs from the names
    pub async fn create(
        &self,
        ctx: &AuditContext,
        input: CreateUniversity,
    ) -> UniversityResult<University> {
        input
            .validate()
            .map_err(|e| UniversityError::Validation(e.to_string()))?;
        check_rating(input.rating)?;

        self.uniqueness.ensure_name_unique(&input.name, None).await?;

        let slug = resolve_slug(input.slug.as_deref(), &input.name);
        if slug.is_empty() {
            return Err(UniversityError::Validation(
                "a slug cannot be derived from the name".to_string(),
            ));
        }
        let slug_ar = Some(resolve_slug(input.slug_ar.as_deref(), &input.name_ar))
            .filter(|s| !s.is_empty());

        let mut candidates = vec![slug.as_str()];
        candidates.extend(slug_ar.as_deref());
        self.uniqueness.ensure_slugs_unique(&candidates, None).await?;

        let university = University::new(input, slug, slug_ar, ctx);
        self.repository.insert(university).await
    }

    /// Update a university. Slugs only change when given explicitly.
    pub async fn update(
        &self,
        ctx: &AuditContext,
        id: Uuid,
        input: UpdateUniversity,
    ) -> UniversityResult<University> {
        input
            .validate()
            .map_err(|e| UniversityError::Validation(e.to_string()))?;
        check_rating(input.rating)?;

        let mut university = self.get(id).await?;

        if let Some(name) = input.name.as_deref().filter(|n| *n != university.name) {
            self.uniqueness.ensure_name_unique(name, Some(id)).await?;
        }

        let new_slug = match input.slug.as_deref() {
            Some(explicit) => Some(self.checked_slug(explicit, &university.slug, id).await?),
            None => None,
        };
        let new_slug_ar = match input.slug_ar.as_deref() {
            Some(explicit) => {
                let current = university.slug_ar.clone().unwrap_or_default();
                Some(self.checked_slug(explicit, &current, id).await?)
            }
            None => None,
        };

        university.apply_update(input, ctx);
        if let Some(slug) = new_slug {
            university.slug = slug;
        }
        if let Some(slug_ar) = new_slug_ar {
            university.slug_ar = Some(slug_ar);
        }

        self.repository.update(university).await
    }

    /// Normalizes an explicit slug and checks it if it differs from `current`.
    async fn checked_slug(&self, explicit: &str, current: &str, id: Uuid) -> UniversityResult<String> {
        let slug = generate_slug(explicit);
        if slug.is_empty() {
            return Err(UniversityError::Validation(format!(
                "'{}' does not produce a valid slug",
                explicit
            )));
        }
        if slug != current {
            self.uniqueness.ensure_slugs_unique(&[&slug], Some(id)).await?;
        }
        Ok(slug)
    }

    pub async fn delete(&self, ctx: &AuditContext, id: Uuid) -> UniversityResult<()> {
        self.get(id).await?;

        if !self.repository.soft_delete(id, ctx).await? {
            return Err(UniversityError::NotFound(Resource::University, id));
        }
        Ok(())
    }

    pub async fn get(&self, id: Uuid) -> UniversityResult<University> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(UniversityError::NotFound(Resource::University, id))
    }

    /// Look up by English or Arabic slug
    pub async fn get_by_slug(&self, slug: &str) -> UniversityResult<University> {
        self.repository
            .get_by_slug(slug)
            .await?
            .ok_or_else(|| UniversityError::SlugNotFound(slug.to_string()))
    }

    pub async fn list(&self, filter: UniversityFilter) -> UniversityResult<Vec<University>> {
        self.repository.list(filter).await
    }

    pub async fn list_featured(&self, limit: u64) -> UniversityResult<Vec<University>> {
        self.repository.list_featured(limit).await
    }

    pub async fn toggle_active(&self, ctx: &AuditContext, id: Uuid) -> UniversityResult<University> {
        let mut university = self.get(id).await?;
        university.is_active = !university.is_active;
        university.touch(ctx);
        self.repository.update(university).await
    }

    pub async fn toggle_featured(&self, ctx: &AuditContext, id: Uuid) -> UniversityResult<University> {
        let mut university = self.get(id).await?;
        university.is_featured = !university.is_featured;
        university.touch(ctx);
        self.repository.update(university).await
    }

    pub async fn is_name_unique(&self, name: &str, exclude_id: Option<Uuid>) -> UniversityResult<bool> {
        self.uniqueness.is_name_unique(name, exclude_id).await
    }

    /// Availability of the slug `slug` would normalize to
    pub async fn is_slug_unique(&self, slug: &str, exclude_id: Option<Uuid>) -> UniversityResult<bool> {
        let slug = generate_slug(slug);
        if slug.is_empty() {
            return Ok(false);
        }
        self.uniqueness.is_slug_unique(&slug, exclude_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{InMemoryUniversityStore, MockUniversityRepository};
    use mockall::predicate::eq;
    use rust_decimal_macros::dec;

    fn input(name: &str) -> CreateUniversity {
        CreateUniversity {
            name: name.to_string(),
            name_ar: "جامعة الاختبار".to_string(),
            description: String::new(),
            description_ar: String::new(),
            slug: None,
            slug_ar: None,
            city: "Cairo".to_string(),
            city_ar: "القاهرة".to_string(),
            country: "Egypt".to_string(),
            website_url: None,
            logo_url: None,
            rating: None,
            is_active: true,
            is_featured: false,
            display_order: 0,
        }
    }

    fn service() -> UniversityService<InMemoryUniversityStore> {
        UniversityService::new(Arc::new(InMemoryUniversityStore::new()))
    }

    #[tokio::test]
    async fn test_create_generates_slugs() {
        let service = service();
        let ctx = AuditContext::system();

        let university = service.create(&ctx, input("Test")).await.unwrap();

        assert_eq!(university.slug, "test");
        assert_eq!(university.slug_ar.as_deref(), Some("جامعة-الاختبار"));
        assert_eq!(university.created_at, ctx.at);
    }

    #[tokio::test]
    async fn test_create_duplicate_name() {
        let service = service();
        let ctx = AuditContext::system();
        service.create(&ctx, input("Cairo University")).await.unwrap();

        let mut again = input("Cairo University");
        again.slug = Some("another-slug".to_string());
        let err = service.create(&ctx, again).await.unwrap_err();

        assert!(matches!(err, UniversityError::DuplicateName(ref n) if n == "Cairo University"));
    }

    #[tokio::test]
    async fn test_create_duplicate_slug_across_columns() {
        let service = service();
        let ctx = AuditContext::system();
        service.create(&ctx, input("Alpha")).await.unwrap();

        let mut other = input("Beta");
        other.name_ar = "ألفا".to_string();
        other.slug = Some("جامعة الاختبار".to_string());
        let err = service.create(&ctx, other).await.unwrap_err();

        assert!(matches!(err, UniversityError::DuplicateSlug(ref s) if s == "جامعة-الاختبار"));
    }

    #[tokio::test]
    async fn test_create_rejects_out_of_range_rating() {
        let service = service();
        let mut bad = input("Alpha");
        bad.rating = Some(dec!(5.5));

        let err = service.create(&AuditContext::system(), bad).await.unwrap_err();
        assert!(matches!(err, UniversityError::InvalidRating(r) if r == dec!(5.5)));
    }

    #[tokio::test]
    async fn test_create_rejects_rating_the_database_would_round() {
        let service = service();
        let mut bad = input("Alpha");
        bad.rating = Some(dec!(4.555));

        let err = service.create(&AuditContext::system(), bad).await.unwrap_err();
        assert!(matches!(err, UniversityError::InvalidRating(r) if r == dec!(4.555)));
    }

    #[tokio::test]
    async fn test_update_keeps_slug_unless_given() {
        let service = service();
        let ctx = AuditContext::system();
        let created = service.create(&ctx, input("Alpha")).await.unwrap();

        let renamed = service
            .update(
                &ctx,
                created.id,
                UpdateUniversity {
                    name: Some("Alpha Renamed".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(renamed.name, "Alpha Renamed");
        assert_eq!(renamed.slug, "alpha");

        let reslugged = service
            .update(
                &ctx,
                created.id,
                UpdateUniversity {
                    slug: Some("Alpha Two!".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(reslugged.slug, "alpha-two");
    }

    #[tokio::test]
    async fn test_update_may_keep_own_name_and_slug() {
        let service = service();
        let ctx = AuditContext::system();
        let created = service.create(&ctx, input("Alpha")).await.unwrap();

        let updated = service
            .update(
                &ctx,
                created.id,
                UpdateUniversity {
                    name: Some("Alpha".to_string()),
                    slug: Some("alpha".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.slug, "alpha");
    }

    #[tokio::test]
    async fn test_update_to_taken_name_fails() {
        let service = service();
        let ctx = AuditContext::system();
        service.create(&ctx, input("Alpha")).await.unwrap();
        let mut beta = input("Beta");
        beta.name_ar = "بيتا".to_string();
        let beta = service.create(&ctx, beta).await.unwrap();

        let err = service
            .update(
                &ctx,
                beta.id,
                UpdateUniversity {
                    name: Some("Alpha".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, UniversityError::DuplicateName(_)));
    }

    #[tokio::test]
    async fn test_toggle_featured_twice_restores_value() {
        let service = service();
        let ctx = AuditContext::system();
        let created = service.create(&ctx, input("Alpha")).await.unwrap();

        let once = service.toggle_featured(&ctx, created.id).await.unwrap();
        let twice = service.toggle_featured(&ctx, created.id).await.unwrap();

        assert!(once.is_featured);
        assert_eq!(twice.is_featured, created.is_featured);
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let service = service();
        let ctx = AuditContext::system();
        let created = service.create(&ctx, input("Alpha")).await.unwrap();

        service.delete(&ctx, created.id).await.unwrap();

        assert!(matches!(
            service.get(created.id).await,
            Err(UniversityError::NotFound(Resource::University, _))
        ));
        assert!(matches!(
            service.delete(&ctx, created.id).await,
            Err(UniversityError::NotFound(..))
        ));
        assert!(service.is_name_unique("Alpha", None).await.unwrap());
    }

    #[tokio::test]
    async fn test_get_by_arabic_slug() {
        let service = service();
        let created = service.create(&AuditContext::system(), input("Alpha")).await.unwrap();

        let found = service.get_by_slug("جامعة-الاختبار").await.unwrap();
        assert_eq!(found.id, created.id);
        assert!(matches!(
            service.get_by_slug("missing").await,
            Err(UniversityError::SlugNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_is_slug_unique_normalizes_input() {
        let mut repository = MockUniversityRepository::new();
        repository
            .expect_exists_by_slug()
            .with(eq("cairo-university"), eq(None))
            .times(1)
            .returning(|_, _| Ok(true));

        let service = UniversityService::new(Arc::new(repository));
        assert!(!service.is_slug_unique("Cairo University", None).await.unwrap());
        assert!(!service.is_slug_unique("!!!", None).await.unwrap());
    }

    #[tokio::test]
    async fn test_lookup_errors_propagate() {
        let mut repository = MockUniversityRepository::new();
        repository
            .expect_exists_by_name()
            .returning(|_, _| Err(UniversityError::Internal("connection lost".into())));

        let service = UniversityService::new(Arc::new(repository));
        let err = service
            .create(&AuditContext::system(), input("Alpha"))
            .await
            .unwrap_err();
        assert!(matches!(err, UniversityError::Internal(_)));
    }
}
