use chrono::Local;

use crate::{
    error::CheckError,
    models::MonitorStatus,
    services::{check_cycle::is_rate_above_threshold, config_store::next_check_after},
    AppState,
};

/// Build the `GET /status` snapshot: a fresh rate compared against the stored config.
/// Does not touch the persisted state.
pub async fn get_status(state: &AppState) -> Result<MonitorStatus, CheckError> {
    let config = state
        .store
        .lock()
        .await
        .config()
        .cloned()
        .ok_or(CheckError::NoThreshold)?;

    let rate = state.rates.fetch_current_rate().await?;

    Ok(MonitorStatus {
        current_rate: rate.ask,
        threshold: config.threshold,
        above_target: is_rate_above_threshold(rate.ask, config.threshold),
        last_check: config
            .last_check_at
            .map(|t| t.to_rfc3339())
            .unwrap_or_else(|| "Never".to_string()),
        next_check: next_check_display(),
    })
}

pub fn next_check_display() -> String {
    next_check_after(Local::now())
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}
