//! HTTP-level tests for the catalog API, run against the in-memory store.

use std::sync::Arc;

use axum::body::Body;
use axum::Router;
use catalog_core::{CatalogService, MemoryCatalog};
use catalog_server::router::build_router;
use http_body_util::BodyExt;
use hyper::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

// ── Helpers ────────────────────────────────────────────────────

fn app() -> Router {
    let service = Arc::new(CatalogService::new(MemoryCatalog::new().stores()));
    build_router(service)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => request.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, "GET", uri, None).await
}

async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, "POST", uri, Some(body)).await
}

async fn put(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, "PUT", uri, Some(body)).await
}

async fn delete(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, "DELETE", uri, None).await
}

/// Create a record and return its uuid.
async fn create(app: &Router, uri: &str, key: &str, body: Value) -> String {
    let (status, json) = post(app, uri, body).await;
    assert_eq!(status, StatusCode::OK, "create failed: {json}");
    json[key]["uuid"].as_str().unwrap().to_string()
}

// ── Tests ──────────────────────────────────────────────────────

#[tokio::test]
async fn health_is_ok() {
    let app = app();
    let (status, json) = get(&app, "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({ "status": "ok" }));
}

#[tokio::test]
async fn category_crud_lifecycle() {
    let app = app();

    let (status, json) = post(
        &app,
        "/api/category/",
        json!({ "name": "Wood", "description": "Timber" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Category created successfully");
    assert_eq!(json["category"]["name"], "Wood");
    let id = json["category"]["uuid"].as_str().unwrap().to_string();
    let item = format!("/api/category/{id}/");

    let (status, json) = get(&app, "/api/category/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["category"].as_array().unwrap().len(), 1);

    let (status, json) = put(&app, &item, json!({ "name": "Hardwood" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Category updated successfully");
    assert_eq!(json["category"]["name"], "Hardwood");
    assert_eq!(json["category"]["description"], "Timber");

    let (status, json) = delete(&app, &item).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({ "message": "Category deleted successfully" }));

    let (status, json) = get(&app, &item).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json, json!({ "error": "Category not found" }));
}

#[tokio::test]
async fn validation_errors_are_field_maps() {
    let app = app();
    let (status, json) = post(&app, "/api/product/", json!({ "price": -1 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["name"], json!(["This field is required."]));
    assert_eq!(json["error"]["unit"], json!(["This field is required."]));
    assert_eq!(
        json["error"]["price"],
        json!(["Ensure this value is greater than or equal to 0."])
    );
}

#[tokio::test]
async fn malformed_json_body_is_rejected() {
    let app = app();
    let request = Request::builder()
        .method("POST")
        .uri("/api/banner/")
        .header("content-type", "application/json")
        .body(Body::from("{\"name\": "))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(json["error"]["non_field_errors"].is_array());
}

#[tokio::test]
async fn path_identifier_errors() {
    let app = app();

    let (status, json) = get(&app, "/api/sub-category/not-a-uuid/").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        json,
        json!({ "error": "'not-a-uuid' is not a valid sub category uuid" })
    );

    let (status, json) = get(&app, "/api/product/%20/").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json, json!({ "error": "product uuid is required" }));
}

#[tokio::test]
async fn unresolved_reference_persists_nothing() {
    let app = app();
    let (status, json) = post(
        &app,
        "/api/sub-category/",
        json!({ "name": "Teak", "category": "7f1f8a3e-2a4b-4c55-9d1e-0c6f2f0b9a11" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        json,
        json!({ "error": "Category not found for field 'category'" })
    );

    let (_, json) = get(&app, "/api/sub-category/").await;
    assert_eq!(json["sub_category"], json!([]));
}

#[tokio::test]
async fn end_to_end_search() {
    let app = app();
    let unit = create(&app, "/api/unit/", "unit", json!({ "name": "piece" })).await;
    let wood = create(&app, "/api/category/", "category", json!({ "name": "Wood" })).await;
    create(
        &app,
        "/api/sub-category/",
        "sub_category",
        json!({ "name": "Teak", "category": wood }),
    )
    .await;
    let (status, json) = post(
        &app,
        "/api/product/",
        json!({ "name": "Teak Table", "category": wood, "unit": unit, "price": 500 }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Product created successfully");
    assert_eq!(json["product"]["price"], "500.00");
    assert_eq!(json["product"]["status"], true);
    let table = json["product"]["uuid"].clone();
    create(
        &app,
        "/api/product/",
        "product",
        json!({ "name": "Lamp", "unit": unit, "price": "19.99" }),
    )
    .await;

    let (status, json) = get(&app, "/api/search/?search=TEAK").await;
    assert_eq!(status, StatusCode::OK);
    let found = json["product"].as_array().unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0]["uuid"], table);

    let (_, json) = get(&app, "/api/product/?search=lamp").await;
    assert_eq!(json["products"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn empty_search_differs_between_endpoints() {
    let app = app();
    let unit = create(&app, "/api/unit/", "unit", json!({ "name": "kg" })).await;
    for name in ["Rice", "Flour"] {
        create(
            &app,
            "/api/product/",
            "product",
            json!({ "name": name, "unit": unit, "price": 2 }),
        )
        .await;
    }

    let (status, json) = get(&app, "/api/search/?search=").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json, json!({ "error": "search query required" }));

    let (status, _) = get(&app, "/api/search/").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, json) = get(&app, "/api/product/?search=").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["products"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn by_ancestor_filters_flat() {
    let app = app();
    let unit = create(&app, "/api/unit/", "unit", json!({ "name": "piece" })).await;
    let wood = create(&app, "/api/category/", "category", json!({ "name": "Wood" })).await;
    let teak = create(
        &app,
        "/api/sub-category/",
        "sub_category",
        json!({ "name": "Teak", "category": wood }),
    )
    .await;
    let table = create(
        &app,
        "/api/product/",
        "product",
        json!({ "name": "Table", "unit": unit, "price": 500, "category": wood }),
    )
    .await;
    create(
        &app,
        "/api/product/",
        "product",
        json!({ "name": "Stool", "unit": unit, "price": 40, "sub_category": teak }),
    )
    .await;

    let (status, json) = get(&app, &format!("/api/product/by-ancestor/category/{wood}/")).await;
    assert_eq!(status, StatusCode::OK);
    let products = json["product"].as_array().unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0]["uuid"], table.as_str());

    let (status, json) = get(&app, &format!("/api/product/by-ancestor/brand/{wood}/")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"]
        .as_str()
        .unwrap()
        .starts_with("invalid identifier 'brand'"));

    let (status, json) = get(&app, &format!("/api/product/by-ancestor/sub_of_sub/{wood}/")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json, json!({ "error": "Sub of sub category not found" }));
}

#[tokio::test]
async fn delete_rules_for_referenced_rows() {
    let app = app();
    let unit = create(&app, "/api/unit/", "unit", json!({ "name": "piece" })).await;
    let wood = create(&app, "/api/category/", "category", json!({ "name": "Wood" })).await;
    let product = create(
        &app,
        "/api/product/",
        "product",
        json!({ "name": "Table", "unit": unit, "price": 500, "category": wood }),
    )
    .await;

    let (status, json) = delete(&app, &format!("/api/unit/{unit}/")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        json,
        json!({ "error": "Unit is still referenced by 1 product(s)" })
    );

    let (status, _) = delete(&app, &format!("/api/category/{wood}/")).await;
    assert_eq!(status, StatusCode::OK);
    let (_, json) = get(&app, &format!("/api/product/{product}/")).await;
    assert_eq!(json["product"]["category"], Value::Null);
}

#[tokio::test]
async fn banner_update_can_clear_nullable_fields() {
    let app = app();
    let banner = create(
        &app,
        "/api/banner/",
        "banner",
        json!({ "name": "Summer", "image": "banners/summer.png" }),
    )
    .await;

    let (status, json) = put(
        &app,
        &format!("/api/banner/{banner}/"),
        json!({ "image": null, "is_status": false }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["banner"]["image"], Value::Null);
    assert_eq!(json["banner"]["is_status"], false);
    assert_eq!(json["banner"]["name"], "Summer");
}

#[tokio::test]
async fn bad_query_string_uses_error_envelope() {
    let app = app();
    for uri in ["/api/search/?search=a&search=b", "/api/product/?search=a&search=b"] {
        let (status, json) = get(&app, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        let message = json["error"].as_str().unwrap();
        assert!(message.contains("duplicate field"), "{uri}: {message}");
    }
}

#[tokio::test]
async fn oversized_price_is_a_field_error() {
    let app = app();
    let unit = create(&app, "/api/unit/", "unit", json!({ "name": "piece" })).await;
    let (status, json) = post(
        &app,
        "/api/product/",
        json!({ "name": "Yacht", "unit": unit, "price": "123456789012.50" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        json["error"]["price"],
        json!(["Ensure that there are no more than 10 digits in total."])
    );
}
