use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The persisted monitor configuration. Lives in `config.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorConfig {
    pub threshold: f64,

    #[serde(rename = "created")]
    pub created_at: DateTime<Utc>,

    #[serde(rename = "lastCheck", default, skip_serializing_if = "Option::is_none")]
    pub last_check_at: Option<DateTime<Utc>>,

    #[serde(rename = "lastNotification", default, skip_serializing_if = "Option::is_none")]
    pub last_notification_at: Option<DateTime<Utc>>,
}

impl MonitorConfig {
    pub fn new(threshold: f64, now: DateTime<Utc>) -> Self {
        Self {
            threshold,
            created_at: now,
            last_check_at: None,
            last_notification_at: None,
        }
    }
}
