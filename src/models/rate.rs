use serde::{Deserialize, Serialize};

/// One USD/BRL quote, produced fresh per fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRate {
    pub ask: f64,
    pub bid: f64,
    pub high: f64,
    pub low: f64,

    // milliseconds since epoch, as reported by the source
    pub observed_at: i64,

    pub name: String,
}
