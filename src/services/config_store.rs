use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Duration, DurationRound, TimeZone, Timelike, Utc};
use tracing::{error, info};

use crate::{error::ConfigError, models::MonitorConfig};

/// Owns the persisted configuration. Every mutation is flushed to disk right away;
/// write failures are logged and the in-memory copy stays authoritative.
#[derive(Debug)]
pub struct ConfigStore {
    path: PathBuf,
    config: Option<MonitorConfig>,
}

impl ConfigStore {
    /// Never fails: a missing or unreadable file just means "unconfigured".
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();

        let config = match read_config(&path) {
            Ok(Some(cfg)) => {
                info!("📖 Loaded saved threshold: {} BRL", cfg.threshold);
                Some(cfg)
            }
            Ok(None) => None,
            Err(e) => {
                error!("❌ Failed to load config from {}: {}", path.display(), e);
                None
            }
        };

        Self { path, config }
    }

    pub fn config(&self) -> Option<&MonitorConfig> {
        self.config.as_ref()
    }

    pub fn threshold(&self) -> Option<f64> {
        self.config.as_ref().map(|c| c.threshold)
    }

    pub fn set_threshold(&mut self, threshold: f64) -> Result<(), ConfigError> {
        self.set_threshold_at(threshold, Utc::now())
    }

    pub fn set_threshold_at(&mut self, threshold: f64, now: DateTime<Utc>) -> Result<(), ConfigError> {
        let threshold = validate_threshold(threshold)?;

        match self.config.as_mut() {
            Some(cfg) => cfg.threshold = threshold,
            None => self.config = Some(MonitorConfig::new(threshold, now)),
        }

        self.save();
        info!("✅ Threshold set to {:.2} BRL per USD", threshold);
        Ok(())
    }

    pub fn mark_checked(&mut self) {
        self.mark_checked_at(Utc::now());
    }

    pub fn mark_checked_at(&mut self, now: DateTime<Utc>) {
        if let Some(cfg) = self.config.as_mut() {
            cfg.last_check_at = Some(now);
            self.save();
        }
    }

    pub fn mark_notified(&mut self) {
        self.mark_notified_at(Utc::now());
    }

    pub fn mark_notified_at(&mut self, now: DateTime<Utc>) {
        if let Some(cfg) = self.config.as_mut() {
            cfg.last_notification_at = Some(now);
            self.save();
        }
    }

    fn save(&self) {
        let Some(cfg) = self.config.as_ref() else {
            return;
        };

        if let Err(e) = write_config(&self.path, cfg) {
            error!("❌ Failed to save config to {}: {}", self.path.display(), e);
        }
    }
}

pub fn validate_threshold(threshold: f64) -> Result<f64, ConfigError> {
    if threshold.is_finite() && threshold > 0.0 {
        Ok(threshold)
    } else {
        Err(ConfigError::InvalidThreshold)
    }
}

fn read_config(path: &Path) -> Result<Option<MonitorConfig>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }

    let data = fs::read_to_string(path)?;
    Ok(Some(serde_json::from_str(&data)?))
}

fn write_config(path: &Path, cfg: &MonitorConfig) -> Result<(), ConfigError> {
    let json = serde_json::to_string_pretty(cfg)?;
    fs::write(path, json)?;
    Ok(())
}

/// Next half-hour wall-clock boundary strictly after `now`:
/// hh:30 when the minute is below 30, otherwise the top of the next hour.
pub fn next_check_after<Tz: TimeZone>(now: DateTime<Tz>) -> DateTime<Tz> {
    let hour_start = now
        .clone()
        .duration_trunc(Duration::hours(1))
        .unwrap_or_else(|_| now.clone() - Duration::minutes(now.minute() as i64));

    if now.minute() < 30 {
        hour_start + Duration::minutes(30)
    } else {
        hour_start + Duration::hours(1)
    }
}
