use std::time::Duration;

use tokio::{process::Command, sync::broadcast};
use tracing::{error, info, warn};

use crate::error::NotificationError;

const NATIVE_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Startup,
    SellAlert,
    ErrorAlert,
}

impl AlertKind {
    /// Event name published on the realtime channel.
    pub fn event_name(self) -> &'static str {
        match self {
            AlertKind::Startup => "startup",
            AlertKind::SellAlert => "sellAlert",
            AlertKind::ErrorAlert => "errorAlert",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub kind: AlertKind,
    pub title: String,
    pub message: String,
    pub sound: &'static str,
}

impl Notification {
    pub fn startup(threshold: f64) -> Self {
        Self {
            kind: AlertKind::Startup,
            title: "🚀 Currency Monitor Started".to_string(),
            message: format!("Monitoring USD-BRL rate. Target: ≥{threshold:.2} BRL"),
            sound: "Hero",
        }
    }

    pub fn sell_alert(ask: f64, threshold: f64) -> Self {
        Self {
            kind: AlertKind::SellAlert,
            title: "💰 USD Sell Alert".to_string(),
            message: format!("Current ask rate: {ask:.4} BRL (target: ≥{threshold:.2})"),
            sound: "Glass",
        }
    }

    pub fn error_alert(reason: &str) -> Self {
        Self {
            kind: AlertKind::ErrorAlert,
            title: "⚠️ Currency Monitor Error".to_string(),
            message: format!("Failed to check rates: {reason}"),
            sound: "Basso",
        }
    }
}

/// Which channel ended up carrying a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Native,
    Console,
}

/// Best-effort alert delivery: native macOS notification when possible,
/// a console block otherwise. Dispatch never fails.
#[derive(Clone)]
pub struct AlertDispatcher {
    native_enabled: bool,
    events_tx: broadcast::Sender<String>,
}

impl AlertDispatcher {
    pub fn new(native_enabled: bool, events_tx: broadcast::Sender<String>) -> Self {
        Self {
            native_enabled,
            events_tx,
        }
    }

    pub async fn dispatch(&self, notification: &Notification) -> Delivery {
        let delivery = match self.send_native(notification).await {
            Ok(()) => {
                info!("📱 Notification sent: {}", notification.title);
                Delivery::Native
            }
            Err(NotificationError::Unsupported(os)) => {
                info!("native notifications not supported on {os}, falling back to console");
                log_to_console(notification);
                Delivery::Console
            }
            Err(e) => {
                error!("❌ Failed to send native notification: {e}");
                warn!("📝 Falling back to console notification");
                log_to_console(notification);
                Delivery::Console
            }
        };

        let _ = self.events_tx.send(notification.kind.event_name().to_string());
        delivery
    }

    pub async fn send_startup(&self, threshold: f64) -> Delivery {
        self.dispatch(&Notification::startup(threshold)).await
    }

    pub async fn send_sell_alert(&self, ask: f64, threshold: f64) -> Delivery {
        self.dispatch(&Notification::sell_alert(ask, threshold)).await
    }

    pub async fn send_error_alert(&self, reason: &str) -> Delivery {
        self.dispatch(&Notification::error_alert(reason)).await
    }

    async fn send_native(&self, n: &Notification) -> Result<(), NotificationError> {
        let os = std::env::consts::OS;
        if !self.native_enabled || os != "macos" {
            return Err(NotificationError::Unsupported(os));
        }

        let child = Command::new("osascript")
            .arg("-e")
            .arg(apple_script(n))
            .kill_on_drop(true)
            .output();

        let output = tokio::time::timeout(NATIVE_TIMEOUT, child)
            .await
            .map_err(|_| NotificationError::Timeout(NATIVE_TIMEOUT.as_secs()))??;

        if !output.status.success() {
            return Err(NotificationError::Exit {
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(())
    }
}

fn apple_script(n: &Notification) -> String {
    format!(
        r#"display notification "{}" with title "{}" sound name "{}""#,
        escape_applescript(&n.message),
        escape_applescript(&n.title),
        escape_applescript(n.sound),
    )
}

fn escape_applescript(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

pub fn console_block(n: &Notification) -> String {
    let rule = "=".repeat(60);
    format!(
        "\n{rule}\n🔔 {}\n{}\n{}\n{rule}\n",
        n.title,
        "-".repeat(60),
        n.message
    )
}

fn log_to_console(n: &Notification) {
    println!("{}", console_block(n));
}
