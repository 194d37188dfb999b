//! HTTP adapters - REST API implementations.
//!
//! - `qualification` - Product listing and qualification sessions under `/api`
//! - `/health` - Liveness check

pub mod qualification;

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

pub use qualification::{qualification_routes, QualificationHandlers};

/// Full API router without middleware layers.
pub fn api_router(handlers: QualificationHandlers) -> Router {
    Router::new()
        .nest("/api", qualification_routes(handlers))
        .route("/health", get(health))
}

/// GET /health
async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
