#![allow(dead_code)]

use std::{
    path::Path,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};

use axum::{http::{header, StatusCode}, routing::get, Router};
use currency_monitor::{
    config::Settings,
    services::{config_store::ConfigStore, rate_fetcher::RetryPolicy},
    AppState,
};
use http_body_util::BodyExt;

/// Local stand-in for the quote API. Counts every request it receives.
pub struct Upstream {
    pub url: String,
    hits: Arc<AtomicUsize>,
}

impl Upstream {
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

pub async fn spawn_upstream(status: StatusCode, body: impl Into<String>) -> Upstream {
    let hits = Arc::new(AtomicUsize::new(0));
    let body = body.into();

    let counter = hits.clone();
    let app = Router::new().route(
        "/json/last/USD-BRL",
        get(move || {
            let counter = counter.clone();
            let body = body.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                (status, [(header::CONTENT_TYPE, "application/json")], body)
            }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    Upstream {
        url: format!("http://{addr}/json/last/USD-BRL"),
        hits,
    }
}

pub fn quote_body(ask: &str) -> String {
    format!(
        r#"{{"USDBRL":{{"code":"USD","codein":"BRL","name":"Dólar Americano/Real Brasileiro",
        "high":"5.40","low":"4.70","varBid":"0.01","pctChange":"0.2","bid":"{ask}",
        "ask":"{ask}","timestamp":"1700000000","create_date":"2023-11-14 19:13:20"}}}}"#
    )
}

pub const FAST_RETRY: RetryPolicy = RetryPolicy {
    max_attempts: 3,
    base_delay: Duration::from_millis(10),
    attempt_timeout: Duration::from_secs(5),
};

/// Upstream that accepts the request and then never answers in time.
pub async fn spawn_stalling_upstream(stall: Duration) -> Upstream {
    let hits = Arc::new(AtomicUsize::new(0));

    let counter = hits.clone();
    let app = Router::new().route(
        "/json/last/USD-BRL",
        get(move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                tokio::time::sleep(stall).await;
                (StatusCode::OK, quote_body("5.25"))
            }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    Upstream {
        url: format!("http://{addr}/json/last/USD-BRL"),
        hits,
    }
}

/// App state wired to a temp config file and the given upstream URL,
/// with console-only notifications and short backoff.
pub fn test_state(dir: &Path, rate_api_url: &str, threshold: Option<f64>) -> AppState {
    let settings = Settings {
        config_path: dir.join("config.json"),
        rate_api_url: rate_api_url.to_string(),
        native_notifications: false,
        ..Settings::default()
    };

    let mut store = ConfigStore::load(&settings.config_path);
    if let Some(t) = threshold {
        store.set_threshold(t).unwrap();
    }

    let mut state = AppState::new(settings, store).unwrap();
    state.rates = state.rates.with_retry_policy(FAST_RETRY);
    state
}

pub fn drain_events(rx: &mut tokio::sync::broadcast::Receiver<String>) -> Vec<String> {
    let mut out = Vec::new();
    while let Ok(name) = rx.try_recv() {
        out.push(name);
    }
    out
}

pub async fn response_json(res: axum::response::Response) -> serde_json::Value {
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
