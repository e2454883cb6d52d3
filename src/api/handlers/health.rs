use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

/// Liveness only; a spreadsheet round-trip here would burn read quota.
pub async fn health_check() -> impl IntoResponse {
    Json(json!({ "status": "healthy" }))
}
