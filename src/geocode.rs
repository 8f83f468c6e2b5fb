//! Location Resolution Module
//!
//! Resolves a free-text place name into a [`GeoPoint`] with a single call to
//! a Nominatim-compatible search endpoint. No caching and no retries.

use crate::config::GeocodingConfig;
use crate::error::LookupError;
use crate::models::GeoPoint;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

/// Anything that can turn a place name into coordinates
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// `Ok(None)` means the service answered but knows no such place
    async fn geocode(&self, place_name: &str) -> std::result::Result<Option<GeoPoint>, LookupError>;
}

/// Geocoder backed by the OpenStreetMap Nominatim search API
pub struct NominatimGeocoder {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
    #[serde(default)]
    display_name: Option<String>,
}

impl NominatimPlace {
    fn into_point(self, fallback_name: &str) -> std::result::Result<GeoPoint, LookupError> {
        let latitude = self.lat.parse::<f64>().map_err(|e| {
            LookupError::failure(format!("Invalid latitude '{}' from geocoder: {e}", self.lat))
        })?;
        let longitude = self.lon.parse::<f64>().map_err(|e| {
            LookupError::failure(format!("Invalid longitude '{}' from geocoder: {e}", self.lon))
        })?;
        let name = self.display_name.unwrap_or_else(|| fallback_name.to_string());
        let point = GeoPoint::new(latitude, longitude, name);
        if !point.is_valid() {
            return Err(LookupError::failure(format!(
                "Geocoder returned out-of-range coordinates ({})",
                point.format_coordinates()
            )));
        }
        Ok(point)
    }
}

impl NominatimGeocoder {
    pub fn new(config: &GeocodingConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .build()
            .with_context(|| "Failed to create geocoding HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn search_url(&self, place_name: &str) -> String {
        format!(
            "{}/search?q={}&format=json&limit=1",
            self.base_url,
            urlencoding::encode(place_name)
        )
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    #[instrument(skip(self), fields(location = place_name))]
    async fn geocode(&self, place_name: &str) -> std::result::Result<Option<GeoPoint>, LookupError> {
        info!("Geocoding location: '{}'", place_name);
        let start_time = Instant::now();

        // geocoder failures are reported as generic failures, never as the
        // status of the API the caller actually asked about
        let response = self
            .client
            .get(self.search_url(place_name))
            .send()
            .await
            .map_err(|e| LookupError::failure(format!("Geocoding request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            warn!("Geocoding service returned HTTP {}", status);
            return Err(LookupError::failure(format!(
                "Geocoding service returned HTTP {}",
                status.as_u16()
            )));
        }

        let places: Vec<NominatimPlace> = response
            .json()
            .await
            .map_err(|e| LookupError::failure(format!("Failed to parse geocoding response: {e}")))?;

        let Some(place) = places.into_iter().next() else {
            warn!("No results found for location '{}'", place_name);
            return Ok(None);
        };

        let point = place.into_point(place_name)?;
        debug!(
            "Found location: {} ({}) in {:.3}s",
            point.name,
            point.format_coordinates(),
            start_time.elapsed().as_secs_f64()
        );
        Ok(Some(point))
    }
}

/// Resolve `place_name` or report it as not found
pub async fn resolve(
    geocoder: &dyn Geocoder,
    place_name: &str,
) -> std::result::Result<GeoPoint, LookupError> {
    geocoder
        .geocode(place_name)
        .await?
        .ok_or_else(|| LookupError::not_found(place_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_url_encodes_name() {
        let config = GeocodingConfig {
            base_url: "https://nominatim.example.org/".into(),
            ..GeocodingConfig::default()
        };
        let geocoder = NominatimGeocoder::new(&config).unwrap();
        assert_eq!(
            geocoder.search_url("São Paulo, BR"),
            "https://nominatim.example.org/search?q=S%C3%A3o%20Paulo%2C%20BR&format=json&limit=1"
        );
    }

    #[test]
    fn test_nominatim_place_parses_string_coordinates() {
        let place: NominatimPlace = serde_json::from_str(
            r#"{"lat": "48.8588897", "lon": "2.3200410", "display_name": "Paris, France"}"#,
        )
        .unwrap();
        let point = place.into_point("Paris").unwrap();
        assert_eq!(point.latitude, 48.858_889_7);
        assert_eq!(point.longitude, 2.320_041);
        assert_eq!(point.name, "Paris, France");
    }

    #[test]
    fn test_nominatim_place_falls_back_to_query_name() {
        let place = NominatimPlace {
            lat: "1.5".into(),
            lon: "-2.25".into(),
            display_name: None,
        };
        assert_eq!(place.into_point("Somewhere").unwrap().name, "Somewhere");
    }

    #[test]
    fn test_nominatim_place_rejects_out_of_range() {
        let place = NominatimPlace {
            lat: "123.0".into(),
            lon: "2.0".into(),
            display_name: None,
        };
        assert!(matches!(place.into_point("x"), Err(LookupError::Failure(_))));
    }

    #[test]
    fn test_nominatim_place_rejects_garbage() {
        let place = NominatimPlace {
            lat: "north".into(),
            lon: "2.0".into(),
            display_name: None,
        };
        assert!(matches!(place.into_point("x"), Err(LookupError::Failure(_))));
    }

    struct Nowhere;

    #[async_trait]
    impl Geocoder for Nowhere {
        async fn geocode(&self, _: &str) -> std::result::Result<Option<GeoPoint>, LookupError> {
            Ok(None)
        }
    }

    #[tokio::test]
    async fn test_resolve_maps_none_to_not_found() {
        let err = resolve(&Nowhere, "Atlantis").await.unwrap_err();
        assert_eq!(err, LookupError::not_found("Atlantis"));
    }
}
