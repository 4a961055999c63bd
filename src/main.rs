use std::{
    net::{IpAddr, SocketAddr},
    process::ExitCode,
};

use clap::Parser;
use tracing::{error, info, warn};

use currency_monitor::{
    cli::{self, Cli},
    config,
    error::StartupError,
    logging, routes,
    services::{config_store::ConfigStore, monitor, status_service},
    AppState,
};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    logging::init();
    let settings = config::load();

    let mut store = ConfigStore::load(&settings.config_path);

    if let Some(threshold) = cli.threshold {
        if let Err(e) = store.set_threshold(threshold) {
            eprintln!("❌ {e}");
            return ExitCode::FAILURE;
        }
    }

    let Some(threshold) = store.threshold() else {
        eprintln!("{}", cli::missing_threshold_message());
        return ExitCode::FAILURE;
    };

    match run(settings, store, threshold).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("💥 Failed to start currency monitor: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(
    settings: config::Settings,
    store: ConfigStore,
    threshold: f64,
) -> Result<(), StartupError> {
    let ip = settings
        .host
        .parse::<IpAddr>()
        .map_err(|_| StartupError::Address(settings.host.clone()))?;
    let addr = SocketAddr::from((ip, settings.port));

    let state = AppState::new(settings, store)?;

    state.notifier.send_startup(threshold).await;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("🚀 Server running on http://{}", addr);

    let rate_monitor = monitor::spawn_rate_monitor(state.clone());
    tokio::spawn(log_initial_status(state.clone()));

    let served = axum::serve(listener, routes::app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await;

    rate_monitor.abort();
    served?;

    Ok(())
}

async fn log_initial_status(state: AppState) {
    match status_service::get_status(&state).await {
        Ok(status) => {
            info!(
                "📊 Current USD ask rate: {:.4} BRL ({} target)",
                status.current_rate,
                if status.above_target { "above" } else { "below" }
            );
            info!("⏰ Next check: {}", status.next_check);
        }
        Err(e) => warn!("⚠️  Initial status check failed: {e}"),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("failed to listen for Ctrl+C: {e}");
        std::future::pending::<()>().await;
    }
    warn!("Shutdown signal received");
}
