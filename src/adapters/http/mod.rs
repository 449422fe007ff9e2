//! HTTP Adapter - Inbound REST Surface
//!
//! axum 0.7 server for the collection APIs. Handlers are thin: parse,
//! call the collection service, shape the response. All policy
//! (locking, persistence, id assignment) lives behind the service.

pub mod error;
pub mod handlers;
pub mod routes;

pub use error::ApiError;
pub use routes::app_router;
