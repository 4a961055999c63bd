pub mod rate_fetcher;
pub mod config_store;
pub mod cooldown;
pub mod notifier;
pub mod check_cycle;
pub mod status_service;
pub mod monitor;
