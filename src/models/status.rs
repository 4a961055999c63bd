use serde::Serialize;

/// Snapshot returned by `GET /status`. Computed on demand, never persisted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitorStatus {
    pub current_rate: f64,
    pub threshold: f64,
    pub above_target: bool,
    pub last_check: String,
    pub next_check: String,
}

/// How the current ask compares to the target, ready to log or show.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketStatus {
    pub above_target: bool,
    pub message: String,
    pub emoji: &'static str,
}

/// Result of one check cycle.
#[derive(Debug, Clone, Serialize)]
pub struct CheckOutcome {
    pub rate: f64,
    pub threshold: f64,
    pub triggered: bool,
    pub message: String,
}
