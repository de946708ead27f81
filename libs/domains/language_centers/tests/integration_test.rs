//! PostgreSQL-backed tests for the language centers store.
//!
//! Run with `cargo test -p domain_language_centers -- --ignored` (needs Docker).

use directory_rules::AuditContext;
use domain_language_centers::*;
use rust_decimal_macros::dec;
use std::sync::Arc;
use test_utils::{TestDataBuilder, TestDatabase};

struct Fixture {
    _db: TestDatabase,
    store: Arc<PgLanguageCenterStore>,
    services: LanguageCenterServices<PgLanguageCenterStore>,
    ctx: AuditContext,
    course_id: uuid::Uuid,
}

fn center(builder: &TestDataBuilder) -> CreateLanguageCenter {
    CreateLanguageCenter {
        name: builder.name("center", "main"),
        name_ar: builder.name_ar("مركز"),
        description: String::new(),
        description_ar: String::new(),
        slug: None,
        slug_ar: None,
        city: "Dubai".to_string(),
        city_ar: "دبي".to_string(),
        country: "UAE".to_string(),
        website_url: None,
        logo_url: None,
        rating: Some(dec!(4.5)),
        is_active: true,
        is_featured: true,
        display_order: 0,
    }
}

fn price(duration_weeks: i32, fee: rust_decimal::Decimal) -> CreateCoursePricing {
    CreateCoursePricing {
        duration_weeks,
        fee,
        currency: "USD".to_string(),
        has_discount: false,
        discount_percentage: None,
        discount_amount: None,
        is_active: true,
    }
}

async fn fixture(test_name: &str) -> Fixture {
    let db = TestDatabase::new().await;
    let builder = TestDataBuilder::from_test_name(test_name);
    let ctx = AuditContext::new(Some(builder.actor_id()));
    let store = Arc::new(PgLanguageCenterStore::new(db.connection()));
    let services = LanguageCenterServices::new(store.clone());

    let center = services.centers.create(&ctx, center(&builder)).await.unwrap();
    let course = services
        .courses
        .create(
            &ctx,
            center.id,
            CreateLanguageCourse {
                name: "IELTS Preparation".to_string(),
                name_ar: "تحضير الآيلتس".to_string(),
                description: String::new(),
                description_ar: String::new(),
                level: CourseLevel::UpperIntermediate,
                lessons_per_week: Some(10),
                max_class_size: Some(12),
                display_order: None,
                is_active: true,
                is_featured: false,
            },
        )
        .await
        .unwrap();

    Fixture {
        _db: db,
        store,
        services,
        ctx,
        course_id: course.id,
    }
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_pricing_round_trips_decimals() {
    let f = fixture("test_pricing_round_trips_decimals").await;

    let created = f
        .services
        .pricing
        .create(&f.ctx, f.course_id, price(12, dec!(5000)))
        .await
        .unwrap();
    let loaded = f.services.pricing.get(created.id).await.unwrap();

    assert_eq!(loaded.fee, dec!(5000));
    assert_eq!(loaded.fee_per_week, created.fee_per_week);
    assert_eq!(loaded.final_price, dec!(5000));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_duration_index_maps_to_duplicate_duration() {
    let f = fixture("test_duration_index_maps_to_duplicate_duration").await;

    let created = f
        .services
        .pricing
        .create(&f.ctx, f.course_id, price(4, dec!(800)))
        .await
        .unwrap();

    // Straight to the store so the partial unique index has to catch it
    let mut clash = created.clone();
    clash.id = uuid::Uuid::now_v7();
    let result = f.store.insert_pricing(clash).await;
    assert!(matches!(result, Err(LanguageCenterError::DuplicateDuration(4))));

    f.services.pricing.delete(&f.ctx, created.id).await.unwrap();
    let replacement = f
        .services
        .pricing
        .create(&f.ctx, f.course_id, price(4, dec!(700)))
        .await
        .unwrap();
    assert_eq!(replacement.final_price, dec!(700));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_slug_clash_across_languages_maps_to_duplicate_slug() {
    let f = fixture("test_slug_clash_across_languages").await;
    let builder = TestDataBuilder::from_test_name("test_slug_clash_across_languages");

    let mut input = center(&builder);
    input.name = builder.name("center", "first");
    input.name_ar = builder.name_ar("first");
    input.slug = Some("shared-slug".to_string());
    let first = f.services.centers.create(&f.ctx, input).await.unwrap();

    // Straight to the store so only the database can notice the clash
    let mut clash = first.clone();
    clash.id = uuid::Uuid::now_v7();
    clash.name = builder.name("center", "second");
    clash.slug = "second-slug".to_string();
    clash.slug_ar = Some("shared-slug".to_string());

    let result = f.store.insert(clash).await;
    assert!(matches!(result, Err(LanguageCenterError::DuplicateSlug(ref s)) if s == "shared-slug"));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_bulk_create_rolls_back_on_conflict() {
    let f = fixture("test_bulk_create_rolls_back_on_conflict").await;

    let existing = f
        .services
        .pricing
        .create(&f.ctx, f.course_id, price(8, dec!(1500)))
        .await
        .unwrap();

    // Second row collides in the database only
    let fresh = CoursePricing::new(f.course_id, price(2, dec!(400)), &f.ctx).unwrap();
    let mut clash = existing.clone();
    clash.id = uuid::Uuid::now_v7();

    let result = f.store.insert_pricing_batch(vec![fresh, clash]).await;
    assert!(matches!(result, Err(LanguageCenterError::DuplicateDuration(8))));

    let remaining = f.services.pricing.get_by_course(f.course_id).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, existing.id);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_discount_and_delete_by_course() {
    let f = fixture("test_discount_and_delete_by_course").await;

    f.services
        .pricing
        .create_bulk(
            &f.ctx,
            f.course_id,
            BulkCreateCoursePricing {
                items: vec![price(4, dec!(1000)), price(12, dec!(2400))],
            },
        )
        .await
        .unwrap();

    let discounted = f
        .services
        .pricing
        .apply_discount_to_course(&f.ctx, f.course_id, dec!(10))
        .await
        .unwrap();
    let finals: Vec<_> = discounted.iter().map(|p| p.final_price).collect();
    assert_eq!(finals, vec![dec!(900), dec!(2160)]);

    let stored = f.services.pricing.get_by_course(f.course_id).await.unwrap();
    assert!(stored.iter().all(|p| p.has_discount));

    let deleted = f
        .services
        .pricing
        .delete_by_course(&f.ctx, f.course_id)
        .await
        .unwrap();
    assert_eq!(deleted, 2);
    assert!(
        f.services
            .pricing
            .get_by_course(f.course_id)
            .await
            .unwrap()
            .is_empty()
    );
}
