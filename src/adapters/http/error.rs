//! API Error Responses
//!
//! Every error leaves the API as `{"error": "<message>"}` with the
//! matching status code. Unknown ids and unparseable id segments both
//! map to the same 404 so the route never leaks whether a segment
//! failed to parse or merely missed.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::domain::record::CollectionKind;

/// Client-facing API failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    /// 404 with `{"error": "Lender not found"}` / `{"error": "Quote not found"}`.
    #[error("{0} not found")]
    NotFound(&'static str),
    /// 400 with the reason in the error body.
    #[error("{0}")]
    BadRequest(String),
}

impl ApiError {
    /// The 404 for `kind`, worded with its singular name.
    pub fn not_found(kind: CollectionKind) -> Self {
        Self::NotFound(kind.singular())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
