use axum::{Router, routing::{get, post}};
use crate::{AppState, controllers::monitor_controller};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/status", get(monitor_controller::get_status))
        .route("/config", get(monitor_controller::get_config))
        .route("/threshold", post(monitor_controller::post_threshold))
        .route("/check", get(monitor_controller::get_check))
}
