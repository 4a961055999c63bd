use std::any::Any;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use tracing::error;

pub async fn index() -> impl IntoResponse {
    Json(json!({
        "message": "💰 Currency Monitor API",
        "endpoints": {
            "/status": "Get current status",
            "/check": "Force currency check",
            "/config": "Get current configuration",
            "/threshold": "POST {\"threshold\": number} to change the target",
            "/events": "Server-sent monitor events",
            "/health": "Health check"
        }
    }))
}

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "ok" })))
}

pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Endpoint not found" })),
    )
}

/// Panic handler for the router: log the detail, hide it from the client.
pub fn internal_error(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    error!("❌ Server error: {detail}");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Internal server error" })),
    )
        .into_response()
}
