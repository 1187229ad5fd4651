use crate::app::LibraryService;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::sync::Arc;
use std::time::Duration;
use utoipa::ToSchema;

#[derive(Clone)]
pub struct AppState {
    pub library: Arc<LibraryService>,
    /// Deadline for each request's library call.
    pub request_timeout: Duration,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub data: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub fn json_400(err: JsonRejection, expected: &str) -> (StatusCode, Json<ApiResponse>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse {
            success: false,
            data: Some(serde_json::json!({ "kind": "invalid_argument" })),
            error: Some(format!("Invalid JSON body: {} (expected: {})", err, expected)),
        }),
    )
}
