use std::{env, path::PathBuf};

use crate::services::rate_fetcher::DEFAULT_RATE_API_URL;

#[derive(Debug, Clone)]
pub struct Settings {
    pub host: String,
    pub port: u16,

    pub config_path: PathBuf,
    pub rate_api_url: String,

    // only honored on macOS
    pub native_notifications: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            config_path: PathBuf::from("config.json"),
            rate_api_url: DEFAULT_RATE_API_URL.to_string(),
            native_notifications: true,
        }
    }
}

pub fn load() -> Settings {
    // Loads .env if present (no crash if missing)
    dotenvy::dotenv().ok();

    let defaults = Settings::default();

    let host = env::var("HOST").unwrap_or(defaults.host);

    let port = env::var("PORT")
        .ok()
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(defaults.port);

    let config_path = env::var("CONFIG_PATH")
        .map(PathBuf::from)
        .unwrap_or(defaults.config_path);

    let rate_api_url = env::var("RATE_API_URL").unwrap_or(defaults.rate_api_url);

    let native_notifications = env::var("NATIVE_NOTIFICATIONS")
        .map(|v| !matches!(v.trim().to_ascii_lowercase().as_str(), "0" | "false" | "no" | "off"))
        .unwrap_or(defaults.native_notifications);

    Settings {
        host,
        port,
        config_path,
        rate_api_url,
        native_notifications,
    }
}
