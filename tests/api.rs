//! API Integration Tests - Full Router over Real Stores
//!
//! Drives the assembled axum router with tower's `oneshot` against
//! snapshot stores in a temp directory. Covers the CRUD lifecycle,
//! bulk import, error bodies, and the probe endpoints.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use loanboard::adapters::http::app_router;
use loanboard::adapters::metrics::ApiMetrics;
use loanboard::adapters::persistence::JsonFileStore;
use loanboard::domain::record::CollectionKind;
use loanboard::usecases::CollectionService;

// ---- Test App Assembly ----

async fn service(
    dir: &TempDir,
    kind: CollectionKind,
    metrics: &Arc<ApiMetrics>,
) -> Arc<CollectionService> {
    let store = JsonFileStore::new(dir.path(), kind).await.unwrap();
    Arc::new(CollectionService::load(kind, Arc::new(store), Arc::clone(metrics)).await)
}

/// Router over fresh stores in a temp dir. The `TempDir` must outlive
/// the router or the data directory vanishes mid-test.
async fn test_app(dir: &TempDir) -> Router {
    let metrics = Arc::new(ApiMetrics::new().unwrap());
    let lenders = service(dir, CollectionKind::Lenders, &metrics).await;
    let quotes = service(dir, CollectionKind::Quotes, &metrics).await;
    app_router(lenders, quotes, Some(metrics), &dir.path().join("public"))
}

// ---- Request Helpers ----

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn json_request(method: Method, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

async fn send_raw(app: &Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

// ---- CRUD Lifecycle ----

#[tokio::test]
async fn test_lender_crud_lifecycle() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir).await;

    // Create
    let (status, created) = send(
        &app,
        json_request(
            Method::POST,
            "/api/lenders",
            &json!({ "name": "Acme Capital", "rate": 5.2, "contact": "acme@example.com" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["name"], json!("Acme Capital"));
    assert_eq!(created["rate"], json!(5.2));
    let id = created["id"].as_i64().unwrap();

    // List contains it
    let (status, listed) = send(&app, get("/api/lenders")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed, json!([created]));

    // Update is full replacement: the omitted contact field disappears
    let (status, updated) = send(
        &app,
        json_request(
            Method::PUT,
            &format!("/api/lenders/{id}"),
            &json!({ "name": "Acme Capital", "rate": 4.9 }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"].as_i64().unwrap(), id);
    assert_eq!(updated["rate"], json!(4.9));
    assert!(updated.get("contact").is_none());

    let (_, listed) = send(&app, get("/api/lenders")).await;
    assert!(listed[0].get("contact").is_none());

    // Delete
    let (status, body) = send(
        &app,
        Request::builder()
            .method(Method::DELETE)
            .uri(format!("/api/lenders/{id}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));

    let (_, listed) = send(&app, get("/api/lenders")).await;
    assert_eq!(listed, json!([]));

    // Deleting again is a 404 with the collection-specific message
    let (status, body) = send(
        &app,
        Request::builder()
            .method(Method::DELETE)
            .uri(format!("/api/lenders/{id}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Lender not found" }));
}

#[tokio::test]
async fn test_create_discards_caller_supplied_id() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir).await;

    let (status, created) = send(
        &app,
        json_request(
            Method::POST,
            "/api/lenders",
            &json!({ "id": 7, "name": "Imposter" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let id = created["id"].as_i64().unwrap();
    assert_ne!(id, 7);
    // Assigned ids keep the epoch-millisecond magnitude.
    assert!(id > 1_000_000_000_000);

    let (_, listed) = send(&app, get("/api/lenders")).await;
    assert_eq!(listed[0]["id"].as_i64().unwrap(), id);
}

#[tokio::test]
async fn test_unknown_and_non_numeric_ids_are_404() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir).await;

    // Unknown numeric id
    let (status, body) = send(
        &app,
        json_request(Method::PUT, "/api/quotes/999", &json!({ "amount": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Quote not found" }));

    // Non-numeric id segments are still 404, never a parse error
    for uri in ["/api/quotes/abc", "/api/quotes/12.5", "/api/quotes/7abc"] {
        let (status, body) = send(&app, json_request(Method::PUT, uri, &json!({}))).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "PUT {uri}");
        assert_eq!(body, json!({ "error": "Quote not found" }));
    }

    let (status, body) = send(
        &app,
        Request::builder()
            .method(Method::DELETE)
            .uri("/api/lenders/not-a-number")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Lender not found" }));
}

// ---- Bulk Import ----

#[tokio::test]
async fn test_import_replaces_collection_and_assigns_fresh_ids() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir).await;

    // Pre-existing quote that the import must wipe out
    let (_, old) = send(
        &app,
        json_request(Method::POST, "/api/quotes", &json!({ "amount": 999 })),
    )
    .await;

    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/api/quotes/import",
            &json!({
                "quotes": [
                    { "id": 1, "text": "A" },
                    { "text": "B" },
                ]
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "count": 2 }));

    let (_, listed) = send(&app, get("/api/quotes")).await;
    let quotes = listed.as_array().unwrap();
    assert_eq!(quotes.len(), 2);

    // Order preserved, caller ids discarded, batch ids distinct
    assert_eq!(quotes[0]["text"], json!("A"));
    assert_eq!(quotes[1]["text"], json!("B"));
    let id0 = quotes[0]["id"].as_i64().unwrap();
    let id1 = quotes[1]["id"].as_i64().unwrap();
    assert_ne!(id0, 1);
    assert_ne!(id0, id1);
    assert!(quotes.iter().all(|q| q["id"] != old["id"]));
}

#[tokio::test]
async fn test_import_shape_errors_are_400_without_side_effects() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir).await;

    let (_, before) = send(
        &app,
        json_request(Method::POST, "/api/lenders", &json!({ "name": "Keeper" })),
    )
    .await;

    let bad_bodies = [
        json!({}),                                    // missing key
        json!({ "quotes": [{ "amount": 1 }] }),       // wrong collection's key
        json!({ "lenders": "not-an-array" }),         // key not an array
        json!({ "lenders": [{ "name": "ok" }, 17] }), // non-object entry
    ];
    for body in &bad_bodies {
        let (status, response) =
            send(&app, json_request(Method::POST, "/api/lenders/import", body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body: {body}");
        assert!(response["error"].is_string(), "body: {body}");
    }

    // A rejected import must not have touched the collection
    let (_, listed) = send(&app, get("/api/lenders")).await;
    assert_eq!(listed, json!([before]));
}

// ---- Body Decoding ----

#[tokio::test]
async fn test_malformed_bodies_are_client_errors() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir).await;

    // Undecodable JSON
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/lenders")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, _) = send_raw(&app, request).await;
    assert!(status.is_client_error(), "got {status}");

    // Valid JSON of the wrong shape (array where an object is required)
    let (status, _) = send(
        &app,
        json_request(Method::POST, "/api/lenders", &json!([1, 2, 3])),
    )
    .await;
    assert!(status.is_client_error(), "got {status}");

    // Missing content type
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/lenders")
        .body(Body::from("{}"))
        .unwrap();
    let (status, _) = send_raw(&app, request).await;
    assert!(status.is_client_error(), "got {status}");

    let (_, listed) = send(&app, get("/api/lenders")).await;
    assert_eq!(listed, json!([]));
}

// ---- Collection Isolation ----

#[tokio::test]
async fn test_collections_are_independent() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir).await;

    send(
        &app,
        json_request(Method::POST, "/api/lenders", &json!({ "name": "Acme" })),
    )
    .await;

    let (_, quotes) = send(&app, get("/api/quotes")).await;
    assert_eq!(quotes, json!([]));

    send(
        &app,
        json_request(
            Method::POST,
            "/api/quotes/import",
            &json!({ "quotes": [{ "amount": 1 }, { "amount": 2 }] }),
        ),
    )
    .await;

    let (_, lenders) = send(&app, get("/api/lenders")).await;
    assert_eq!(lenders.as_array().unwrap().len(), 1);
}

// ---- Probes and Fallback ----

#[tokio::test]
async fn test_health_and_metrics_endpoints() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir).await;

    let (status, body) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));

    send(
        &app,
        json_request(Method::POST, "/api/lenders", &json!({ "name": "Acme" })),
    )
    .await;

    let (status, text) = send_raw(&app, get("/metrics")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(text.contains("loanboard_operations_total"));
    assert!(text.contains("collection=\"lenders\""));
}

#[tokio::test]
async fn test_metrics_endpoint_can_be_disabled() {
    let dir = TempDir::new().unwrap();
    let metrics = Arc::new(ApiMetrics::new().unwrap());
    let lenders = service(&dir, CollectionKind::Lenders, &metrics).await;
    let quotes = service(&dir, CollectionKind::Quotes, &metrics).await;
    let app = app_router(lenders, quotes, None, &dir.path().join("public"));

    let (status, _) = send_raw(&app, get("/metrics")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Everything else still works
    let (status, _) = send(&app, get("/api/lenders")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_unrouted_paths_fall_through_to_static_404() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir).await;

    let (status, _) = send_raw(&app, get("/no-such-page.html")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
