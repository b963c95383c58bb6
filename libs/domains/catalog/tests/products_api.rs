//! HTTP-level tests for the product endpoints using in-memory repositories.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use domain_catalog::categories::repository::CategoryRepository;
use domain_catalog::categories::{CreateCategory, InMemoryCategoryRepository};
use domain_catalog::products::{handlers, InMemoryProductRepository, ProductService};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

async fn app() -> (Router, Uuid) {
    let categories = InMemoryCategoryRepository::new();
    let category = categories
        .create(CreateCategory {
            name: "Figures".into(),
            image_hash: None,
        })
        .await
        .unwrap();

    let service = ProductService::new(InMemoryProductRepository::new(), categories);
    let router = Router::new().nest("/products", handlers::router(service));
    (router, category.id)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn put_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("PUT")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn create_payload(category_id: Uuid, name: &str, price: f64, discount: i32) -> Value {
    json!({
        "category_id": category_id,
        "name": name,
        "price": price,
        "discount": discount,
        "stock": 5
    })
}

#[tokio::test]
async fn test_create_product_returns_201_with_discounted_price() {
    let (app, category_id) = app().await;

    let response = app
        .oneshot(post_json(
            "/products",
            create_payload(category_id, "Darth Vader", 100.0, 25),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["name"], "Darth Vader");
    assert_eq!(body["discounted_price"], 75.0);
    assert_eq!(body["category"]["id"], json!(category_id));
    assert_eq!(body["is_new"], true);
}

#[tokio::test]
async fn test_create_product_with_unknown_category_is_404() {
    let (app, _) = app().await;

    let response = app
        .oneshot(post_json(
            "/products",
            create_payload(Uuid::now_v7(), "Darth Vader", 100.0, 0),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_product_with_negative_price_is_400() {
    let (app, category_id) = app().await;

    let response = app
        .oneshot(post_json(
            "/products",
            create_payload(category_id, "Darth Vader", -1.0, 0),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_delete_nonexistent_product_is_404() {
    let (app, _) = app().await;

    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/products/{}", Uuid::now_v7()))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_product_with_malformed_uuid_is_400() {
    let (app, _) = app().await;

    let response = app.oneshot(get("/products/not-a-uuid")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_search_matches_case_insensitively() {
    let (app, category_id) = app().await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/products",
            create_payload(category_id, "Darth Vader", 30.0, 0),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(post_json(
            "/products",
            create_payload(category_id, "Luke Skywalker", 30.0, 0),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app.oneshot(get("/products/search?q=VADER")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["items"][0]["name"], "Darth Vader");
}

#[tokio::test]
async fn test_search_treats_wildcards_literally() {
    let (app, category_id) = app().await;

    for name in ["Sale 100% off", "Sale 100 points"] {
        let response = app
            .clone()
            .oneshot(post_json(
                "/products",
                create_payload(category_id, name, 30.0, 0),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app
        .oneshot(get("/products/search?q=100%25"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["items"][0]["name"], "Sale 100% off");
}

#[tokio::test]
async fn test_discounted_endpoint_filters() {
    let (app, category_id) = app().await;

    app.clone()
        .oneshot(post_json(
            "/products",
            create_payload(category_id, "On sale", 50.0, 10),
        ))
        .await
        .unwrap();
    app.clone()
        .oneshot(post_json(
            "/products",
            create_payload(category_id, "Full price", 50.0, 0),
        ))
        .await
        .unwrap();

    let response = app.oneshot(get("/products/discounted")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["name"], "On sale");
    assert_eq!(items[0]["discounted_price"], 45.0);
}

#[tokio::test]
async fn test_update_with_unknown_category_leaves_product_unchanged() {
    let (app, category_id) = app().await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/products",
            create_payload(category_id, "Darth Vader", 100.0, 0),
        ))
        .await
        .unwrap();
    let created = body_json(response).await;
    let id = created["id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(put_json(
            &format!("/products/{id}"),
            json!({
                "name": "Changed",
                "price": 1.0,
                "is_available": true,
                "category_id": Uuid::now_v7()
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.oneshot(get(&format!("/products/{id}"))).await.unwrap();
    let body = body_json(response).await;
    assert_eq!(body["name"], "Darth Vader");
    assert_eq!(body["price"], 100.0);
}

#[tokio::test]
async fn test_update_product_overwrites_fields() {
    let (app, category_id) = app().await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/products",
            create_payload(category_id, "Darth Vader", 100.0, 0),
        ))
        .await
        .unwrap();
    let created = body_json(response).await;
    let id = created["id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(put_json(
            &format!("/products/{id}"),
            json!({
                "name": "Darth Vader Chrome",
                "price": 120.0,
                "discount": 50,
                "is_available": false
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["name"], "Darth Vader Chrome");
    assert_eq!(body["discounted_price"], 60.0);
    assert_eq!(body["is_available"], false);
    // Updates never touch the "new" flag and keep the category without one
    assert_eq!(body["is_new"], true);
    assert_eq!(body["category"]["id"], json!(category_id));
}

#[tokio::test]
async fn test_list_products_paginates() {
    let (app, category_id) = app().await;

    for i in 0..3 {
        app.clone()
            .oneshot(post_json(
                "/products",
                create_payload(category_id, &format!("Item {i}"), 10.0, 0),
            ))
            .await
            .unwrap();
    }

    let response = app.oneshot(get("/products?limit=2&offset=0")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["total"], 3);
    assert_eq!(body["items"].as_array().unwrap().len(), 2);
    assert_eq!(body["limit"], 2);
}

#[tokio::test]
async fn test_list_clamps_oversized_limit() {
    let (app, category_id) = app().await;

    app.clone()
        .oneshot(post_json(
            "/products",
            create_payload(category_id, "Darth Vader", 10.0, 0),
        ))
        .await
        .unwrap();

    let response = app.oneshot(get("/products?limit=100000")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["limit"], 100);
}

#[tokio::test]
async fn test_by_category_with_unknown_category_is_404() {
    let (app, _) = app().await;

    let response = app
        .oneshot(get(&format!("/products/by-category/{}", Uuid::now_v7())))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
