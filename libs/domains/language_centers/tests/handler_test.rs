//! Handler tests for the language centers domain, run against the in-memory store.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_language_centers::*;
use http_body_util::BodyExt;
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;
use std::sync::Arc;
use tower::ServiceExt;

fn app() -> Router {
    handlers::router(Arc::new(InMemoryLanguageCenterStore::new()))
}

async fn json_body(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Decimals are serialized as strings
fn decimal(value: &Value) -> Decimal {
    Decimal::from_str(value.as_str().unwrap()).unwrap()
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

/// Creates a center with one course and returns the course id.
async fn course_fixture(app: &Router) -> String {
    let (status, center) = send(
        app,
        json_request(
            "POST",
            "/language-centers",
            json!({
                "name": "Berlitz Amman",
                "name_ar": "برليتز عمان",
                "city": "Amman",
                "country": "Jordan"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, course) = send(
        app,
        json_request(
            "POST",
            &format!("/language-centers/{}/courses", center["id"].as_str().unwrap()),
            json!({ "name": "General English", "level": "intermediate" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    course["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_create_language_center_generates_slugs() {
    let app = app();
    let (status, center) = send(
        &app,
        json_request(
            "POST",
            "/language-centers",
            json!({
                "name": "Wall Street English",
                "name_ar": "وول ستريت",
                "city": "Riyadh",
                "country": "Saudi Arabia"
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(center["slug"], "wall-street-english");
    assert_eq!(center["slug_ar"], "وول-ستريت");

    let response = app
        .oneshot(request(
            "GET",
            // percent-encoded "وول-ستريت"
            "/language-centers/by-slug/%D9%88%D9%88%D9%84-%D8%B3%D8%AA%D8%B1%D9%8A%D8%AA",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_duplicate_slug_returns_409() {
    let app = app();
    let body = json!({
        "name": "Alpha",
        "name_ar": "ألفا",
        "slug": "shared",
        "city": "Cairo",
        "country": "Egypt"
    });
    let (status, _) = send(&app, json_request("POST", "/language-centers", body)).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, error) = send(
        &app,
        json_request(
            "POST",
            "/language-centers",
            json!({
                "name": "Beta",
                "name_ar": "بيتا",
                "slug": "Shared",
                "city": "Cairo",
                "country": "Egypt"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error["details"]["key"], "LanguageCenters:SlugAlreadyExists");
}

#[tokio::test]
async fn test_missing_language_center_returns_404() {
    let response = app()
        .oneshot(request(
            "GET",
            &format!("/language-centers/{}", uuid::Uuid::new_v4()),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["details"]["key"], "LanguageCenters:NotFound");
}

#[tokio::test]
async fn test_create_pricing_computes_derived_fields() {
    let app = app();
    let course_id = course_fixture(&app).await;

    let (status, pricing) = send(
        &app,
        json_request(
            "POST",
            &format!("/language-courses/{}/pricing", course_id),
            json!({ "duration_weeks": 12, "fee": "5000" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(pricing["currency"], "USD");
    assert_eq!(decimal(&pricing["final_price"]), Decimal::from(5000));
    assert_eq!(
        decimal(&pricing["fee_per_week"]),
        Decimal::from(5000) / Decimal::from(12)
    );
}

#[tokio::test]
async fn test_duplicate_duration_returns_409() {
    let app = app();
    let course_id = course_fixture(&app).await;
    let uri = format!("/language-courses/{}/pricing", course_id);

    let (status, _) = send(
        &app,
        json_request("POST", &uri, json!({ "duration_weeks": 4, "fee": "800" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, error) = send(
        &app,
        json_request("POST", &uri, json!({ "duration_weeks": 4, "fee": "750" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error["error"], "DUPLICATE_DURATION");
    assert_eq!(error["details"]["key"], "LanguageCenters:DuplicateDuration");
}

#[tokio::test]
async fn test_pricing_with_fee_beyond_decimal_range_returns_400() {
    let app = app();
    let course_id = course_fixture(&app).await;
    let uri = format!("/language-courses/{}/pricing", course_id);

    let (status, _) = send(
        &app,
        json_request(
            "POST",
            &uri,
            json!({
                "duration_weeks": 4,
                "fee": "79228162514264337593543950335",
                "has_discount": true,
                "discount_percentage": "50"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // The server is still answering
    let (status, rows) = send(&app, request("GET", &uri)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(rows.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_pricing_for_missing_course_returns_404() {
    let (status, error) = send(
        &app(),
        json_request(
            "POST",
            &format!("/language-courses/{}/pricing", uuid::Uuid::new_v4()),
            json!({ "duration_weeks": 4, "fee": "800" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["details"]["key"], "LanguageCenters:CourseNotFound");
}

#[tokio::test]
async fn test_bulk_create_then_discount_whole_course() {
    let app = app();
    let course_id = course_fixture(&app).await;

    let (status, created) = send(
        &app,
        json_request(
            "POST",
            &format!("/language-courses/{}/pricing/bulk", course_id),
            json!({ "items": [
                { "duration_weeks": 4, "fee": "1000" },
                { "duration_weeks": 8, "fee": "1800" },
                { "duration_weeks": 12, "fee": "2400" }
            ]}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created.as_array().unwrap().len(), 3);

    let (status, discounted) = send(
        &app,
        json_request(
            "POST",
            &format!("/language-courses/{}/pricing/discount", course_id),
            json!({ "discount_percentage": "15" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    for row in discounted.as_array().unwrap() {
        assert_eq!(row["has_discount"], true);
        let fee = decimal(&row["fee"]);
        assert_eq!(decimal(&row["final_price"]), fee * Decimal::from_str("0.85").unwrap());
    }
}

#[tokio::test]
async fn test_discount_over_100_is_out_of_range() {
    let app = app();
    let course_id = course_fixture(&app).await;

    let (status, error) = send(
        &app,
        json_request(
            "POST",
            &format!("/language-courses/{}/pricing/discount", course_id),
            json!({ "discount_percentage": "150" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["details"]["key"], "LanguageCenters:InvalidDiscountRange");
}

#[tokio::test]
async fn test_active_only_listing_and_delete_all() {
    let app = app();
    let course_id = course_fixture(&app).await;
    let uri = format!("/language-courses/{}/pricing", course_id);

    send(
        &app,
        json_request("POST", &uri, json!({ "duration_weeks": 8, "fee": "900" })),
    )
    .await;
    send(
        &app,
        json_request(
            "POST",
            &uri,
            json!({ "duration_weeks": 2, "fee": "300", "is_active": false }),
        ),
    )
    .await;

    let (_, active) = send(&app, request("GET", &format!("{}?active_only=true", uri))).await;
    assert_eq!(active.as_array().unwrap().len(), 1);

    let (_, all) = send(&app, request("GET", &uri)).await;
    let weeks: Vec<i64> = all
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["duration_weeks"].as_i64().unwrap())
        .collect();
    assert_eq!(weeks, vec![2, 8]);

    let (status, deleted) = send(&app, request("DELETE", &uri)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["deleted"], 2);
}

#[tokio::test]
async fn test_update_and_delete_single_price() {
    let app = app();
    let course_id = course_fixture(&app).await;

    let (_, pricing) = send(
        &app,
        json_request(
            "POST",
            &format!("/language-courses/{}/pricing", course_id),
            json!({ "duration_weeks": 10, "fee": "1000" }),
        ),
    )
    .await;
    let uri = format!("/course-pricing/{}", pricing["id"].as_str().unwrap());

    let (status, updated) = send(
        &app,
        json_request(
            "PUT",
            &uri,
            json!({ "has_discount": true, "discount_amount": "250" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(decimal(&updated["final_price"]), Decimal::from(750));

    let (status, _) = send(&app, request("DELETE", &uri)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, request("GET", &uri)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_course_toggle_featured_twice() {
    let app = app();
    let course_id = course_fixture(&app).await;
    let uri = format!("/language-courses/{}/toggle-featured", course_id);

    let (_, once) = send(&app, request("POST", &uri)).await;
    let (_, twice) = send(&app, request("POST", &uri)).await;

    assert_eq!(once["is_featured"], true);
    assert_eq!(twice["is_featured"], false);
}
