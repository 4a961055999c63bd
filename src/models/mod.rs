pub mod rate;
pub mod monitor_config;
pub mod status;

pub use rate::ExchangeRate;
pub use monitor_config::MonitorConfig;
pub use status::{CheckOutcome, MarketStatus, MonitorStatus};
