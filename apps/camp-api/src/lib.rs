//! # Camp Roster API
//!
//! REST server over the camp entity store.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Camp API Request Flow                           │
//! │                                                                         │
//! │  Client ──► axum Router ──► JsonObject ──► camp-core      ──► camp-db  │
//! │             (TraceLayer,    (400 if not    validation          (SQLite) │
//! │              x-request-id)   an object)    (422 + errors)               │
//! │                                                                         │
//! │  Responses: DTOs without relationship fields, or {"errors": [...]}     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Environment variables:
//! - `DB_URI` - SQLite connection string (default: `sqlite://app.db`)
//! - `HOST` - bind address (default: 127.0.0.1)
//! - `PORT` - HTTP port (default: 5555)
//! - `DB_MAX_CONNECTIONS` - pool size (default: 5)

pub mod config;
pub mod error;
pub mod extract;
pub mod routes;

use axum::extract::Request;
use axum::http::{HeaderName, HeaderValue};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::Router;
use camp_db::Database;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

// Re-exports
pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};

/// Header carrying the per-request id, echoed back when the client sends one.
pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Shared application state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Database,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        AppState { db }
    }
}

/// Builds the application router with its middleware stack.
pub fn router(state: AppState) -> Router {
    routes::routes()
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id))
        .with_state(state)
}

/// Tags every response with `x-request-id`.
async fn request_id(mut req: Request, next: Next) -> Response {
    let id = req
        .headers()
        .get(&REQUEST_ID_HEADER)
        .cloned()
        .or_else(|| HeaderValue::from_str(&Uuid::new_v4().to_string()).ok());

    if let Some(value) = &id {
        req.headers_mut().insert(REQUEST_ID_HEADER, value.clone());
    }

    let mut response = next.run(req).await;
    if let Some(value) = id {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}
