//! PostgreSQL-backed tests for the universities store.
//!
//! Run with `cargo test -p domain_universities -- --ignored` (needs Docker).

use directory_rules::{AuditContext, DisplayOrderItem, ReorderRequest};
use domain_universities::*;
use std::sync::Arc;
use test_utils::{TestDataBuilder, TestDatabase};

fn university(builder: &TestDataBuilder, suffix: &str) -> CreateUniversity {
    CreateUniversity {
        name: builder.name("university", suffix),
        name_ar: builder.name_ar(suffix),
        description: String::new(),
        description_ar: String::new(),
        slug: None,
        slug_ar: None,
        city: "Amman".to_string(),
        city_ar: "عمان".to_string(),
        country: "Jordan".to_string(),
        website_url: None,
        logo_url: None,
        rating: None,
        is_active: true,
        is_featured: false,
        display_order: 0,
    }
}

fn content(content_type: ContentType, title: &str) -> CreateUniversityContent {
    CreateUniversityContent {
        content_type,
        title: title.to_string(),
        title_ar: String::new(),
        body: String::new(),
        body_ar: String::new(),
        display_order: None,
        is_published: true,
    }
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_university_lifecycle() {
    let db = TestDatabase::new().await;
    let builder = TestDataBuilder::from_test_name("test_university_lifecycle");
    let ctx = AuditContext::new(Some(builder.actor_id()));
    let store = Arc::new(PgUniversityStore::new(db.connection()));
    let service = UniversityService::new(store);

    let created = service.create(&ctx, university(&builder, "main")).await.unwrap();
    assert_eq!(created.created_by, Some(builder.actor_id()));

    let by_slug = service.get_by_slug(&created.slug).await.unwrap();
    assert_eq!(by_slug.id, created.id);

    let slug_ar = created.slug_ar.clone().unwrap();
    let by_slug_ar = service.get_by_slug(&slug_ar).await.unwrap();
    assert_eq!(by_slug_ar.id, created.id);

    service.delete(&ctx, created.id).await.unwrap();
    assert!(matches!(
        service.get(created.id).await,
        Err(UniversityError::NotFound(Resource::University, _))
    ));
    // Soft delete keeps the row
    assert_eq!(db.count_rows("universities").await, 1);

    // The name is free again once the holder is deleted
    let again = service.create(&ctx, university(&builder, "main")).await.unwrap();
    assert_ne!(again.id, created.id);
    assert_eq!(again.slug, created.slug);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_unique_index_maps_to_duplicate_name() {
    let db = TestDatabase::new().await;
    let builder = TestDataBuilder::from_test_name("test_unique_index_maps_to_duplicate_name");
    let ctx = AuditContext::system();
    let store = Arc::new(PgUniversityStore::new(db.connection()));
    let service = UniversityService::new(store.clone());

    let created = service.create(&ctx, university(&builder, "a")).await.unwrap();

    // Bypass the service checks so the database index has to catch it
    let mut clash = created.clone();
    clash.id = uuid::Uuid::now_v7();
    clash.slug = "another-slug".to_string();
    clash.slug_ar = None;

    let result = store.insert(clash).await;
    assert!(matches!(result, Err(UniversityError::DuplicateName(_))));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_slug_clash_across_languages_maps_to_duplicate_slug() {
    let db = TestDatabase::new().await;
    let builder = TestDataBuilder::from_test_name("test_slug_clash_across_languages");
    let ctx = AuditContext::system();
    let store = Arc::new(PgUniversityStore::new(db.connection()));
    let service = UniversityService::new(store.clone());

    let mut first = university(&builder, "first");
    first.slug = Some("shared-slug".to_string());
    let first = service.create(&ctx, first).await.unwrap();

    // Arabic slug of the second row equals the first row's English slug
    let mut clash = first.clone();
    clash.id = uuid::Uuid::now_v7();
    clash.name = builder.name("university", "second");
    clash.slug = "second-slug".to_string();
    clash.slug_ar = Some("shared-slug".to_string());
    let result = store.insert(clash.clone()).await;
    assert!(matches!(result, Err(UniversityError::DuplicateSlug(ref s)) if s == "shared-slug"));

    // English slug of the second row equals the first row's Arabic slug
    clash.slug = first.slug_ar.clone().unwrap();
    clash.slug_ar = None;
    let result = store.insert(clash.clone()).await;
    assert!(matches!(result, Err(UniversityError::DuplicateSlug(_))));

    // Free again once the first row is deleted
    service.delete(&ctx, first.id).await.unwrap();
    clash.slug_ar = Some("shared-slug".to_string());
    clash.slug = "second-slug".to_string();
    store.insert(clash).await.unwrap();
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_search_matches_arabic_name() {
    let db = TestDatabase::new().await;
    let builder = TestDataBuilder::from_test_name("test_search_matches_arabic_name");
    let ctx = AuditContext::system();
    let service = UniversityService::new(Arc::new(PgUniversityStore::new(db.connection())));

    service.create(&ctx, university(&builder, "one")).await.unwrap();
    let mut other = university(&builder, "two");
    other.name_ar = "جامعة اليرموك".to_string();
    service.create(&ctx, other).await.unwrap();

    let found = service
        .list(UniversityFilter {
            search: Some("اليرموك".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name_ar, "جامعة اليرموك");
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_content_type_unique_and_reorder() {
    let db = TestDatabase::new().await;
    let builder = TestDataBuilder::from_test_name("test_content_type_unique_and_reorder");
    let ctx = AuditContext::system();
    let store = Arc::new(PgUniversityStore::new(db.connection()));
    let universities = UniversityService::new(store.clone());
    let contents = UniversityContentService::new(store.clone(), store);

    let parent = universities
        .create(&ctx, university(&builder, "parent"))
        .await
        .unwrap();

    let overview = contents
        .create(&ctx, parent.id, content(ContentType::Overview, "Overview"))
        .await
        .unwrap();
    let admission = contents
        .create(&ctx, parent.id, content(ContentType::Admission, "Admission"))
        .await
        .unwrap();
    assert_eq!((overview.display_order, admission.display_order), (0, 1));

    let duplicate = contents
        .create(&ctx, parent.id, content(ContentType::Overview, "Again"))
        .await;
    assert!(matches!(
        duplicate,
        Err(UniversityError::DuplicateContentType(ContentType::Overview))
    ));

    contents
        .reorder(
            &ctx,
            parent.id,
            ReorderRequest {
                items: vec![
                    DisplayOrderItem { id: overview.id, display_order: 1 },
                    DisplayOrderItem { id: admission.id, display_order: 0 },
                ],
            },
        )
        .await
        .unwrap();

    let listed = contents.list_by_university(parent.id, false).await.unwrap();
    let titles: Vec<_> = listed.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles, vec!["Admission", "Overview"]);
}
