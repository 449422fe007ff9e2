//! Collection Handlers - CRUD and Bulk Import
//!
//! One handler per endpoint, all stateless over `Arc<CollectionService>`.
//! The same five handlers serve both collections; which one they hit is
//! decided entirely by the router's nesting.
//!
//! Id segments are parsed here, strictly: the full path segment must be
//! a decimal integer or the request 404s. A partial numeric prefix
//! ("7abc") never parses as an id.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use serde_json::{json, Map, Value};

use crate::adapters::http::error::ApiError;
use crate::domain::record::{CollectionKind, Record, RecordId};
use crate::usecases::CollectionService;

/// GET / - the full collection, in insertion order.
pub async fn list(State(service): State<Arc<CollectionService>>) -> Json<Vec<Record>> {
    Json(service.list().await)
}

/// POST / - append a record; any `id` in the body is discarded.
pub async fn create(
    State(service): State<Arc<CollectionService>>,
    Json(fields): Json<Map<String, Value>>,
) -> Json<Record> {
    Json(service.add(fields).await)
}

/// PUT /:id - replace every field of an existing record.
pub async fn update(
    State(service): State<Arc<CollectionService>>,
    Path(id): Path<String>,
    Json(fields): Json<Map<String, Value>>,
) -> Result<Json<Record>, ApiError> {
    let id = parse_id(&id, service.kind())?;
    service
        .update(id, fields)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::not_found(service.kind()))
}

/// DELETE /:id - remove a record.
pub async fn remove(
    State(service): State<Arc<CollectionService>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&id, service.kind())?;
    if service.delete(id).await {
        Ok(Json(json!({ "success": true })))
    } else {
        Err(ApiError::not_found(service.kind()))
    }
}

/// POST /import - replace the whole collection.
///
/// The body must be `{"<collection>": [ {...}, ... ]}` keyed by the
/// collection's own name; anything else is a 400. Entries get fresh ids
/// regardless of what they carried.
pub async fn import(
    State(service): State<Arc<CollectionService>>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let items = extract_items(&body, service.kind())?;
    let count = service.import(items).await;
    Ok(Json(json!({ "count": count })))
}

fn parse_id(raw: &str, kind: CollectionKind) -> Result<RecordId, ApiError> {
    raw.parse().map_err(|_| ApiError::not_found(kind))
}

fn extract_items(body: &Value, kind: CollectionKind) -> Result<Vec<Map<String, Value>>, ApiError> {
    let Some(items) = body.get(kind.key()).and_then(Value::as_array) else {
        return Err(ApiError::BadRequest(format!(
            "expected a JSON object with a \"{}\" array",
            kind.key()
        )));
    };
    items
        .iter()
        .map(|item| match item {
            Value::Object(fields) => Ok(fields.clone()),
            _ => Err(ApiError::BadRequest(format!(
                "entries in \"{}\" must be JSON objects",
                kind.key()
            ))),
        })
        .collect()
}
