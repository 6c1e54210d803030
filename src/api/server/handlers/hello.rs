use axum::Json;
use serde_json::{json, Value};

/// Liveness probe; the only endpoint that works without a provider key.
pub async fn hello() -> Json<Value> {
    Json(json!({ "message": "Hello from the walks backend!" }))
}
