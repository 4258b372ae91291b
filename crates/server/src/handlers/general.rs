//! # General Handlers
//!
//! Liveness and smoke-test endpoints.

use axum::Json;
use serde_json::{json, Value};

/// The handler for the root (`/`) endpoint.
pub async fn root() -> Json<Value> {
    Json(json!({ "message": "Backend server is running!" }))
}

/// The handler for the API smoke-test (`/api/test`) endpoint.
pub async fn api_test() -> Json<Value> {
    Json(json!({ "message": "API is working!" }))
}

/// The handler for the health check (`/health`) endpoint.
pub async fn health_check() -> &'static str {
    "OK"
}
