//! Handler tests for the universities domain
//!
//! Exercises the router against the in-memory store: status codes, JSON
//! bodies and the error envelope. Persistence against PostgreSQL is covered
//! in `integration_test.rs`.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_universities::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt; // For oneshot()

fn app() -> Router {
    handlers::router(Arc::new(InMemoryUniversityStore::new()))
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

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn university_body(name: &str) -> Value {
    json!({
        "name": name,
        "name_ar": "جامعة القاهرة",
        "city": "Cairo",
        "country": "Egypt"
    })
}

async fn create_university(app: &Router, name: &str) -> Value {
    let response = app
        .clone()
        .oneshot(json_request("POST", "/universities", university_body(name)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    json_body(response.into_body()).await
}

#[tokio::test]
async fn test_create_university_returns_201_with_slugs() {
    let app = app();

    let university = create_university(&app, "Cairo University").await;

    assert_eq!(university["slug"], "cairo-university");
    assert_eq!(university["slug_ar"], "جامعة-القاهرة");
    assert_eq!(university["is_active"], true);
}

#[tokio::test]
async fn test_create_university_validates_input() {
    let app = app();

    let response = app
        .oneshot(json_request("POST", "/universities", university_body("")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_duplicate_name_returns_409_with_localization_key() {
    let app = app();
    create_university(&app, "Cairo University").await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/universities",
            university_body("Cairo University"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["details"]["key"], "Universities:DuplicateName");
}

#[tokio::test]
async fn test_get_university_by_id_and_slug() {
    let app = app();
    let created = create_university(&app, "Ain Shams University").await;
    let id = created["id"].as_str().unwrap();

    let response = app
        .clone()
        .oneshot(get(&format!("/universities/{}", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(get("/universities/by-slug/ain-shams-university"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["id"], created["id"]);
}

#[tokio::test]
async fn test_get_university_returns_404_for_missing() {
    let response = app()
        .oneshot(get(&format!("/universities/{}", uuid::Uuid::new_v4())))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["details"]["key"], "Universities:NotFound");
}

#[tokio::test]
async fn test_get_university_rejects_malformed_id() {
    let response = app().oneshot(get("/universities/not-a-uuid")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["error"], "INVALID_UUID");
}

#[tokio::test]
async fn test_slug_availability_reflects_existing_slugs() {
    let app = app();
    create_university(&app, "Helwan University").await;

    let response = app
        .clone()
        .oneshot(get("/universities/slug-availability?slug=helwan-university"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response.into_body()).await["available"], false);

    let response = app
        .oneshot(get("/universities/name-availability?name=Alexandria%20University"))
        .await
        .unwrap();
    assert_eq!(json_body(response.into_body()).await["available"], true);
}

#[tokio::test]
async fn test_toggle_featured_twice_restores_flag() {
    let app = app();
    let created = create_university(&app, "Mansoura University").await;
    let uri = format!("/universities/{}/toggle-featured", created["id"].as_str().unwrap());

    let first = app
        .clone()
        .oneshot(json_request("POST", &uri, json!({})))
        .await
        .unwrap();
    assert_eq!(json_body(first.into_body()).await["is_featured"], true);

    let second = app
        .oneshot(json_request("POST", &uri, json!({})))
        .await
        .unwrap();
    assert_eq!(json_body(second.into_body()).await["is_featured"], false);
}

#[tokio::test]
async fn test_delete_university_hides_it() {
    let app = app();
    let created = create_university(&app, "Assiut University").await;
    let uri = format!("/universities/{}", created["id"].as_str().unwrap());

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(&uri)
                .header("x-user-id", uuid::Uuid::new_v4().to_string())
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app.oneshot(get(&uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_faq_lifecycle_with_reorder() {
    let app = app();
    let university = create_university(&app, "Zagazig University").await;
    let university_id = university["id"].as_str().unwrap();
    let faqs_uri = format!("/universities/{}/faqs", university_id);

    let mut ids = Vec::new();
    for question in ["How to apply?", "When does term start?"] {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                &faqs_uri,
                json!({ "question": question, "answer": "See the admissions office." }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let faq = json_body(response.into_body()).await;
        ids.push(faq["id"].as_str().unwrap().to_string());
    }

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("{}/reorder", faqs_uri),
            json!({ "items": [
                { "id": ids[0], "display_order": 1 },
                { "id": ids[1], "display_order": 0 }
            ]}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app.oneshot(get(&faqs_uri)).await.unwrap();
    let faqs = json_body(response.into_body()).await;
    assert_eq!(faqs[0]["id"], ids[1].as_str());
    assert_eq!(faqs[1]["id"], ids[0].as_str());
}

#[tokio::test]
async fn test_create_faq_for_missing_university_returns_404() {
    let response = app()
        .oneshot(json_request(
            "POST",
            &format!("/universities/{}/faqs", uuid::Uuid::new_v4()),
            json!({ "question": "Q?", "answer": "A." }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["details"]["key"], "Universities:UniversityNotFound");
}

#[tokio::test]
async fn test_duplicate_content_type_returns_409() {
    let app = app();
    let university = create_university(&app, "Tanta University").await;
    let uri = format!("/universities/{}/contents", university["id"].as_str().unwrap());
    let body = json!({ "content_type": "admission", "title": "Admission" });

    let first = app
        .clone()
        .oneshot(json_request("POST", &uri, body.clone()))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app
        .clone()
        .oneshot(json_request("POST", &uri, body))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::CONFLICT);

    let by_type = app
        .oneshot(get(&format!("{}/by-type/admission", uri)))
        .await
        .unwrap();
    assert_eq!(by_type.status(), StatusCode::OK);
    assert_eq!(json_body(by_type.into_body()).await["title"], "Admission");
}

#[tokio::test]
async fn test_program_toggle_active_and_filter() {
    let app = app();
    let university = create_university(&app, "Benha University").await;
    let uri = format!("/universities/{}/programs", university["id"].as_str().unwrap());

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &uri,
            json!({ "name": "Computer Science", "degree_level": "bachelor" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let program = json_body(response.into_body()).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!(
                "/university-programs/{}/toggle-active",
                program["id"].as_str().unwrap()
            ),
            json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(json_body(response.into_body()).await["is_active"], false);

    let response = app
        .oneshot(get(&format!("{}?active_only=true", uri)))
        .await
        .unwrap();
    let programs = json_body(response.into_body()).await;
    assert_eq!(programs.as_array().unwrap().len(), 0);
}
