//! Library entrypoint for the USD→BRL currency monitor.
//!
//! The binary in `main.rs` only parses arguments and wires things together;
//! everything else lives here so integration tests under `tests/` can build
//! the app state and the router directly.

use std::sync::Arc;

use tokio::sync::{broadcast, Mutex};

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;

pub mod services;

pub mod controllers;
pub mod routes;

use services::{config_store::ConfigStore, notifier::AlertDispatcher, rate_fetcher::RateFetcher};

#[derive(Clone)]
pub struct AppState {
    pub settings: config::Settings,
    pub rates: RateFetcher,
    pub store: Arc<Mutex<ConfigStore>>,
    pub notifier: AlertDispatcher,
    pub events_tx: broadcast::Sender<String>,

    // serializes check cycles so the timer and /check never overlap
    pub check_lock: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(settings: config::Settings, store: ConfigStore) -> Result<Self, error::FetchError> {
        let rates = RateFetcher::new(settings.rate_api_url.clone())?;
        let (events_tx, _events_rx) = broadcast::channel::<String>(64);
        let notifier = AlertDispatcher::new(settings.native_notifications, events_tx.clone());

        Ok(Self {
            settings,
            rates,
            store: Arc::new(Mutex::new(store)),
            notifier,
            events_tx,
            check_lock: Arc::new(Mutex::new(())),
        })
    }
}
