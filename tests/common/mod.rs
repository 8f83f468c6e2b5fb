//! In-process stand-in for the geocoding, forecast and Overpass services

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    Router,
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
};
use serde_json::{Value, json};

use travel_concierge::{ConciergeConfig, NominatimGeocoder, ToolRegistry, UserContextStore};

pub struct Upstream {
    pub geocode_body: Value,
    pub forecast_status: StatusCode,
    pub forecast_body: Value,
    pub overpass_status: StatusCode,
    pub overpass_body: Value,
    pub delay: Duration,
    pub geocode_hits: AtomicUsize,
    pub forecast_hits: AtomicUsize,
    pub overpass_hits: AtomicUsize,
    pub forecast_params: Mutex<Vec<HashMap<String, String>>>,
    pub overpass_queries: Mutex<Vec<String>>,
}

impl Default for Upstream {
    fn default() -> Self {
        Self {
            geocode_body: json!([{
                "lat": "48.8566",
                "lon": "2.3522",
                "display_name": "Paris, Île-de-France, France"
            }]),
            forecast_status: StatusCode::OK,
            forecast_body: json!({}),
            overpass_status: StatusCode::OK,
            overpass_body: json!({"elements": []}),
            delay: Duration::ZERO,
            geocode_hits: AtomicUsize::new(0),
            forecast_hits: AtomicUsize::new(0),
            overpass_hits: AtomicUsize::new(0),
            forecast_params: Mutex::new(Vec::new()),
            overpass_queries: Mutex::new(Vec::new()),
        }
    }
}

impl Upstream {
    pub fn unknown_location() -> Self {
        Self {
            geocode_body: json!([]),
            ..Self::default()
        }
    }

    pub fn hits(&self) -> (usize, usize, usize) {
        (
            self.geocode_hits.load(Ordering::SeqCst),
            self.forecast_hits.load(Ordering::SeqCst),
            self.overpass_hits.load(Ordering::SeqCst),
        )
    }
}

async fn search(State(upstream): State<Arc<Upstream>>) -> Json<Value> {
    upstream.geocode_hits.fetch_add(1, Ordering::SeqCst);
    Json(upstream.geocode_body.clone())
}

async fn forecast(
    State(upstream): State<Arc<Upstream>>,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    upstream.forecast_hits.fetch_add(1, Ordering::SeqCst);
    upstream.forecast_params.lock().unwrap().push(params);
    tokio::time::sleep(upstream.delay).await;
    (upstream.forecast_status, Json(upstream.forecast_body.clone()))
}

async fn interpreter(
    State(upstream): State<Arc<Upstream>>,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    upstream.overpass_hits.fetch_add(1, Ordering::SeqCst);
    if let Some(data) = params.get("data") {
        upstream.overpass_queries.lock().unwrap().push(data.clone());
    }
    tokio::time::sleep(upstream.delay).await;
    (upstream.overpass_status, Json(upstream.overpass_body.clone()))
}

/// Serve `upstream` on an ephemeral port and return its base URL
pub async fn spawn(upstream: Arc<Upstream>) -> String {
    let app = Router::new()
        .route("/search", get(search))
        .route("/v1/forecast", get(forecast))
        .route("/api/interpreter", get(interpreter))
        .with_state(upstream);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// Config with every upstream pointed at `base` and one-second timeouts
pub fn config_for(base: &str) -> ConciergeConfig {
    let mut config = ConciergeConfig::default();
    config.geocoding.base_url = base.to_string();
    config.geocoding.timeout_seconds = 1;
    config.weather.base_url = format!("{base}/v1");
    config.weather.timeout_seconds = 1;
    config.places.base_url = format!("{base}/api");
    config.places.timeout_seconds = 1;
    config
}

pub async fn registry_for(upstream: Arc<Upstream>) -> (ToolRegistry, Arc<Upstream>) {
    let base = spawn(Arc::clone(&upstream)).await;
    let config = config_for(&base);
    let geocoder = Arc::new(NominatimGeocoder::new(&config.geocoding).unwrap());
    let registry =
        ToolRegistry::standard(&config, Arc::new(UserContextStore::new()), geocoder).unwrap();
    (registry, upstream)
}
