//! Nearby place search over OpenStreetMap data via the Overpass API
//!
//! The free-text query is matched case-insensitively against the `name`,
//! `amenity` and `shop` tags of nodes around the geocoded location.

use crate::config::PlacesConfig;
use crate::error::LookupError;
use crate::geocode::{self, Geocoder};
use crate::models::place::UNNAMED_PLACE;
use crate::models::{GeoPoint, PlaceResult};
use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Server-side query budget, independent of the client timeout
const QUERY_TIMEOUT_SECONDS: u32 = 25;

/// Overpass API client
pub struct PlaceFinder {
    client: Client,
    base_url: String,
    geocoder: Arc<dyn Geocoder>,
}

/// Overpass `out:json` response
#[derive(Debug, Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<OverpassElement>,
}

#[derive(Debug, Deserialize)]
struct OverpassElement {
    lat: Option<f64>,
    lon: Option<f64>,
    #[serde(default)]
    tags: HashMap<String, String>,
}

impl OverpassElement {
    fn into_place(mut self) -> PlaceResult {
        PlaceResult {
            name: self
                .tags
                .remove("name")
                .unwrap_or_else(|| UNNAMED_PLACE.to_string()),
            street: self.tags.remove("addr:street"),
            city: self.tags.remove("addr:city"),
            country: self.tags.remove("addr:country"),
            latitude: self.lat,
            longitude: self.lon,
        }
    }
}

/// Escape a value for use inside a double-quoted Overpass QL regex
fn escape_ql(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Build the Overpass QL union over the three tag dimensions
#[must_use]
pub fn build_query(query: &str, center: &GeoPoint, radius_m: u32, limit: u32) -> String {
    let pattern = escape_ql(query);
    let around = format!("(around:{},{},{})", radius_m, center.latitude, center.longitude);
    let clauses: String = ["name", "amenity", "shop"]
        .iter()
        .map(|tag| format!("  node[\"{tag}\"~\"{pattern}\", i]{around};\n"))
        .collect();

    format!("[out:json][timeout:{QUERY_TIMEOUT_SECONDS}];\n(\n{clauses});\nout body {limit};")
}

impl PlaceFinder {
    pub fn new(config: &PlacesConfig, geocoder: Arc<dyn Geocoder>) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("travel-concierge/", env!("CARGO_PKG_VERSION")))
            .build()
            .with_context(|| "Failed to create Overpass HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            geocoder,
        })
    }

    /// Up to `limit` places in upstream order; an empty list means no matches
    #[instrument(skip(self))]
    pub async fn search(
        &self,
        query: &str,
        location: &str,
        radius_m: u32,
        limit: u32,
    ) -> Result<Vec<PlaceResult>, LookupError> {
        let center = geocode::resolve(self.geocoder.as_ref(), location).await?;

        info!(
            "Searching '{}' within {}m of ({})",
            query,
            radius_m,
            center.format_coordinates()
        );

        let overpass_query = build_query(query, &center, radius_m, limit);
        debug!("Overpass query:\n{}", overpass_query);

        let url = format!(
            "{}/interpreter?data={}",
            self.base_url,
            urlencoding::encode(&overpass_query)
        );
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Overpass API returned HTTP {}", status);
            return Err(LookupError::Upstream {
                status: status.as_u16(),
            });
        }

        let body: OverpassResponse = response.json().await?;
        let total = body.elements.len();
        let places: Vec<PlaceResult> = body
            .elements
            .into_iter()
            .take(limit as usize)
            .map(OverpassElement::into_place)
            .collect();

        info!("Overpass returned {} elements, keeping {}", total, places.len());
        Ok(places)
    }

    /// Tool entry point: always returns display text
    pub async fn find(&self, query: &str, location: &str, radius_m: u32, limit: u32) -> String {
        let outcome = self.search(query, location, radius_m, limit).await;
        render_places(query, location, &outcome)
    }
}

/// Render a place search outcome the way the places tool reports it
#[must_use]
pub fn render_places(
    query: &str,
    location: &str,
    outcome: &Result<Vec<PlaceResult>, LookupError>,
) -> String {
    match outcome {
        Ok(places) if places.is_empty() => format!(
            "ℹ️ No results found for '{query}' near {location}. Try a different keyword or location."
        ),
        Ok(places) => {
            let mut lines = Vec::with_capacity(places.len() + 1);
            lines.push(format!(
                "Top {} results for '{query}' near {location}:",
                places.len()
            ));
            lines.extend(places.iter().map(ToString::to_string));
            lines.join("\n")
        }
        Err(LookupError::NotFound { .. }) => format!(
            "❌ Could not find location '{location}'. Please check the spelling or try a nearby city."
        ),
        Err(LookupError::Upstream { status }) => {
            format!("❌ Overpass API error: {status}. Please try again later.")
        }
        Err(LookupError::Timeout) => {
            "❌ The request to the Overpass API timed out. Please try again.".to_string()
        }
        Err(LookupError::Failure(message)) => {
            format!("❌ Error searching for '{query}' near '{location}': {message}")
        }
    }
}
