use std::{future::Future, time::Duration};

use chrono::Local;
use tokio::{
    task::JoinHandle,
    time::{self, Instant, MissedTickBehavior},
};
use tracing::{debug, error, warn};

use crate::{
    services::{check_cycle, config_store::next_check_after},
    AppState,
};

/// Cadence of the scheduled check. Independent of the notification cooldown.
pub const CHECK_INTERVAL: Duration = Duration::from_secs(30 * 60);

/// Spawn the recurring check. The first tick lands on the next :00/:30 boundary,
/// then every `CHECK_INTERVAL`.
pub fn spawn_rate_monitor(state: AppState) -> JoinHandle<()> {
    let now = Local::now();
    let until_boundary = (next_check_after(now) - now)
        .to_std()
        .unwrap_or(Duration::ZERO);

    spawn_rate_monitor_with(state, until_boundary, CHECK_INTERVAL)
}

/// Same as `spawn_rate_monitor` with an explicit first delay and period.
/// A failed cycle is logged and the next tick retries.
pub fn spawn_rate_monitor_with(state: AppState, first_delay: Duration, period: Duration) -> JoinHandle<()> {
    spawn_schedule(first_delay, period, move || {
        let state = state.clone();
        async move {
            debug!("⏰ Running scheduled currency check...");
            if let Err(e) = check_cycle::run_check(&state).await {
                warn!("[rate-monitor] scheduled check skipped: {e}");
            }
        }
    })
}

/// Run `job` on every tick. Each run gets its own task, so a panicking
/// run is logged and the schedule keeps going.
pub fn spawn_schedule<F, Fut>(first_delay: Duration, period: Duration, mut job: F) -> JoinHandle<()>
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    tokio::spawn(async move {
        let mut interval = time::interval_at(Instant::now() + first_delay, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            interval.tick().await;

            if let Err(e) = tokio::spawn(job()).await {
                error!("[rate-monitor] check cycle aborted: {e}");
            }
        }
    })
}
