use clap::{CommandFactory, Parser};

use crate::services::config_store::validate_threshold;

#[derive(Debug, Parser)]
#[command(name = "currency-monitor")]
#[command(about = "Watches the USD-BRL ask rate and alerts when it reaches your target")]
#[command(version)]
pub struct Cli {
    /// Target ask rate in BRL per USD, e.g. 5.3. Saved for later runs.
    #[arg(value_parser = parse_threshold)]
    pub threshold: Option<f64>,
}

fn parse_threshold(raw: &str) -> Result<f64, String> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .and_then(|v| validate_threshold(v).ok())
        .ok_or_else(|| "Invalid threshold. Please provide a positive number.".to_string())
}

/// Printed to stderr when there is neither an argument nor a saved threshold.
pub fn missing_threshold_message() -> String {
    format!(
        "❌ No threshold configured. Please provide a threshold.\n{}\nExample: currency-monitor 5.3",
        Cli::command().render_usage()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_positive_threshold() {
        let cli = Cli::try_parse_from(["currency-monitor", "5.3"]).unwrap();
        assert_eq!(cli.threshold, Some(5.3));
    }

    #[test]
    fn threshold_is_optional() {
        let cli = Cli::try_parse_from(["currency-monitor"]).unwrap();
        assert_eq!(cli.threshold, None);
    }

    #[test]
    fn rejects_zero_negative_and_garbage() {
        for bad in ["0", "-1.5", "abc", "NaN", "inf"] {
            assert!(
                Cli::try_parse_from(["currency-monitor", "--", bad]).is_err(),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_extra_positionals() {
        assert!(Cli::try_parse_from(["currency-monitor", "5.3", "6.1"]).is_err());
    }

    #[test]
    fn usage_message_names_the_binary() {
        let msg = missing_threshold_message();
        assert!(msg.contains("Usage:"));
        assert!(msg.contains("currency-monitor"));
    }
}
