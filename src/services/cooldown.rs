use chrono::{DateTime, Duration, Utc};

use crate::models::MonitorConfig;

/// Minimum time between two sell alerts. Independent of the check cadence.
pub const NOTIFICATION_COOLDOWN: Duration = Duration::hours(2);

/// True when no alert was ever sent, or the last one is older than the cooldown.
pub fn should_notify(config: &MonitorConfig, now: DateTime<Utc>) -> bool {
    match config.last_notification_at {
        None => true,
        Some(last) => last < now - NOTIFICATION_COOLDOWN,
    }
}
