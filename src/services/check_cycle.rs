use chrono::Utc;
use tracing::{error, info};

use crate::{
    error::CheckError,
    models::{CheckOutcome, MarketStatus},
    services::cooldown,
    AppState,
};

pub fn is_rate_above_threshold(ask: f64, threshold: f64) -> bool {
    ask >= threshold
}

pub fn market_status(ask: f64, threshold: f64) -> MarketStatus {
    if is_rate_above_threshold(ask, threshold) {
        MarketStatus {
            above_target: true,
            message: format!(
                "Great time to sell USD! Rate: {ask:.4} BRL (target: ≥{threshold:.4})"
            ),
            emoji: "🎯",
        }
    } else {
        let gap = threshold - ask;
        MarketStatus {
            above_target: false,
            message: format!("Rate below target. Need {gap:.4} more BRL to reach {threshold:.4}"),
            emoji: "📉",
        }
    }
}

/// One full fetch → evaluate → notify → persist pass.
///
/// Shared by the timer and `GET /check`. Cycles never overlap; a failure is
/// reported to the caller and announced through a best-effort error alert.
pub async fn run_check(state: &AppState) -> Result<CheckOutcome, CheckError> {
    let _cycle = state.check_lock.lock().await;

    match evaluate(state).await {
        Ok(outcome) => {
            let _ = state.events_tx.send("rateChecked".to_string());
            Ok(outcome)
        }
        Err(e) => {
            error!("❌ Currency check failed: {e}");
            state.notifier.send_error_alert(&e.to_string()).await;
            Err(e)
        }
    }
}

async fn evaluate(state: &AppState) -> Result<CheckOutcome, CheckError> {
    let threshold = state
        .store
        .lock()
        .await
        .threshold()
        .ok_or(CheckError::NoThreshold)?;

    let rate = state.rates.fetch_current_rate().await?;

    let mut store = state.store.lock().await;
    store.mark_checked();

    let status = market_status(rate.ask, threshold);
    info!("{} {}", status.emoji, status.message);

    let may_notify = store
        .config()
        .map(|cfg| cooldown::should_notify(cfg, Utc::now()))
        .unwrap_or(false);

    let mut triggered = false;
    if status.above_target && may_notify {
        // the alert only needs the numbers, release the store while it is delivered
        drop(store);
        state.notifier.send_sell_alert(rate.ask, threshold).await;
        state.store.lock().await.mark_notified();
        triggered = true;
        info!("🎯 ALERT: Rate above target - Notification sent!");
    } else if status.above_target {
        info!("🔕 Rate above target but notification cooldown active");
    }

    Ok(CheckOutcome {
        rate: rate.ask,
        threshold,
        triggered,
        message: status.message,
    })
}
