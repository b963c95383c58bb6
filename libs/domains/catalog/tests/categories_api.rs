//! HTTP-level tests for the category endpoints using the in-memory repository.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use domain_catalog::categories::{handlers, CategoryService, InMemoryCategoryRepository};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

fn app() -> Router {
    let service = CategoryService::new(InMemoryCategoryRepository::new());
    Router::new().nest("/categories", handlers::router(service))
}

fn request_json(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_create_category_returns_201() {
    let app = app();

    let response = app
        .oneshot(request_json(
            "POST",
            "/categories",
            json!({"name": "Figures"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["name"], "Figures");
}

#[tokio::test]
async fn test_update_category_overwrites_fields() {
    let app = app();

    let response = app
        .clone()
        .oneshot(request_json(
            "POST",
            "/categories",
            json!({"name": "Figures"}),
        ))
        .await
        .unwrap();
    let created = body_json(response).await;
    let id = created["id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(request_json(
            "PUT",
            &format!("/categories/{id}"),
            json!({"name": "Keychains", "image_hash": "deadbeef"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["name"], "Keychains");
    assert_eq!(body["image_hash"], "deadbeef");

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/categories/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["name"], "Keychains");
}

#[tokio::test]
async fn test_update_unknown_category_is_404() {
    let app = app();

    let response = app
        .oneshot(request_json(
            "PUT",
            &format!("/categories/{}", Uuid::now_v7()),
            json!({"name": "Keychains"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_category_with_empty_name_is_400() {
    let app = app();

    let response = app
        .oneshot(request_json("POST", "/categories", json!({"name": ""})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
}
