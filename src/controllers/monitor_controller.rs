use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::{json, Value};
use tracing::warn;

use crate::{
    error::{CheckError, ConfigError},
    services::{check_cycle, config_store::validate_threshold, status_service},
    AppState,
};

fn error_json(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "error": message.into() }))).into_response()
}

// GET /status
pub async fn get_status(State(state): State<AppState>) -> Response {
    match status_service::get_status(&state).await {
        Ok(status) => (StatusCode::OK, Json(status)).into_response(),
        Err(e) => {
            warn!("status request failed: {e}");
            match e {
                CheckError::NoThreshold => error_json(
                    StatusCode::BAD_REQUEST,
                    "Unable to get status: No configuration found. Please set a threshold first.",
                ),
                CheckError::Fetch(_) => {
                    error_json(StatusCode::BAD_GATEWAY, format!("Unable to get status: {e}"))
                }
            }
        }
    }
}

// GET /config
pub async fn get_config(State(state): State<AppState>) -> impl IntoResponse {
    let config = state.store.lock().await.config().cloned();
    Json(config)
}

// POST /threshold
pub async fn post_threshold(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let invalid = || error_json(StatusCode::BAD_REQUEST, ConfigError::InvalidThreshold.to_string());

    let Ok(Json(body)) = payload else {
        return invalid();
    };

    let Some(threshold) = body.get("threshold").and_then(Value::as_f64) else {
        return invalid();
    };

    if validate_threshold(threshold).is_err() {
        return invalid();
    }

    if let Err(e) = state.store.lock().await.set_threshold(threshold) {
        return error_json(StatusCode::BAD_REQUEST, e.to_string());
    }

    let _ = state.events_tx.send("thresholdUpdated".to_string());

    (
        StatusCode::OK,
        Json(json!({ "success": true, "threshold": threshold })),
    )
        .into_response()
}

// GET /check
pub async fn get_check(State(state): State<AppState>) -> impl IntoResponse {
    match check_cycle::run_check(&state).await {
        Ok(outcome) => Json(json!({
            "success": true,
            "rate": outcome.rate,
            "threshold": outcome.threshold,
            "triggered": outcome.triggered,
            "message": outcome.message,
        })),
        Err(e) => Json(json!({ "success": false, "error": e.to_string() })),
    }
}
