use axum::Json;
use serde_json::{Value, json};

/// Handler for `GET /healthz` — process liveness. Readiness is wired per
/// service, since only the service knows its backing stores.
pub async fn healthz() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
