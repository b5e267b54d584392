use axum::Json;
use serde_json::{json, Value};

/// GET /health
/// Static liveness response; touches no other component.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "resume-generator"
    }))
}
