//! Weather forecasts from the Open-Meteo API
//!
//! One geocoding call, then one forecast call with a fixed timeout. All
//! failures come back as [`LookupError`] and are rendered to text by
//! [`render_forecast`]; nothing here retries.

use crate::config::WeatherConfig;
use crate::error::LookupError;
use crate::geocode::{self, Geocoder};
use crate::models::{Forecast, ForecastDay, GeoPoint};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use reqwest::Client;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

pub struct WeatherFetcher {
    client: Client,
    base_url: String,
    geocoder: Arc<dyn Geocoder>,
}

impl WeatherFetcher {
    pub fn new(config: &WeatherConfig, geocoder: Arc<dyn Geocoder>) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("travel-concierge/", env!("CARGO_PKG_VERSION")))
            .build()
            .with_context(|| "Failed to create weather HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            geocoder,
        })
    }

    fn forecast_url(&self, point: &GeoPoint, days: u32) -> String {
        format!(
            "{}/forecast?latitude={}&longitude={}&daily=temperature_2m_max,temperature_2m_min,precipitation_sum,weathercode&forecast_days={}&timezone=auto",
            self.base_url, point.latitude, point.longitude, days
        )
    }

    /// Forecast for `location`; `Ok(None)` when the API returned no daily data
    #[instrument(skip(self))]
    pub async fn fetch(&self, location: &str, days: u32) -> Result<Option<Forecast>, LookupError> {
        let point = geocode::resolve(self.geocoder.as_ref(), location).await?;

        info!(
            "Getting {}-day forecast for coordinates: {}",
            days,
            point.format_coordinates()
        );
        let start_time = Instant::now();

        let response = self
            .client
            .get(self.forecast_url(&point, days))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Weather API returned HTTP {}", status);
            return Err(LookupError::Upstream {
                status: status.as_u16(),
            });
        }

        let body: openmeteo::ForecastResponse = response.json().await?;
        let forecast = body
            .daily
            .filter(|daily| !daily.is_empty())
            .map(|daily| daily.into_forecast(location, days));

        match &forecast {
            Some(forecast) => info!(
                "Retrieved forecast with {} days in {:.3}s",
                forecast.days.len(),
                start_time.elapsed().as_secs_f64()
            ),
            None => debug!("Forecast response carried no daily data"),
        }

        Ok(forecast)
    }

    /// Tool entry point: always returns display text
    pub async fn forecast(&self, location: &str, days: u32) -> String {
        render_forecast(location, &self.fetch(location, days).await)
    }
}

/// Render a forecast lookup outcome the way the weather tool reports it
#[must_use]
pub fn render_forecast(location: &str, outcome: &Result<Option<Forecast>, LookupError>) -> String {
    match outcome {
        Ok(Some(forecast)) => forecast.to_string(),
        Ok(None) => "ℹ️ No weather data available.".to_string(),
        Err(LookupError::NotFound { .. }) => {
            format!("❌ Could not find location '{location}' for weather.")
        }
        Err(LookupError::Upstream { status }) => format!("❌ Weather API error: {status}"),
        Err(LookupError::Timeout) => "❌ Weather request timed out.".to_string(),
        Err(LookupError::Failure(message)) => format!("❌ Error fetching weather: {message}"),
    }
}

/// `OpenMeteo` API response structures and conversion utilities
mod openmeteo {
    use super::{Forecast, ForecastDay, NaiveDate};
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    pub struct ForecastResponse {
        pub daily: Option<DailyData>,
    }

    /// Daily weather data; the arrays run in parallel and entries may be null
    #[derive(Debug, Default, Deserialize)]
    pub struct DailyData {
        pub time: Option<Vec<String>>,
        #[serde(rename = "temperature_2m_max")]
        pub temperature_max: Option<Vec<Option<f64>>>,
        #[serde(rename = "temperature_2m_min")]
        pub temperature_min: Option<Vec<Option<f64>>>,
        #[serde(rename = "precipitation_sum")]
        pub precipitation: Option<Vec<Option<f64>>>,
        #[serde(rename = "weathercode")]
        pub weather_code: Option<Vec<Option<u8>>>,
    }

    fn at<T: Copy>(values: Option<&Vec<Option<T>>>, i: usize) -> Option<T> {
        values.and_then(|v| v.get(i).copied().flatten())
    }

    impl DailyData {
        pub fn is_empty(&self) -> bool {
            self.time.is_none()
                && self.temperature_max.is_none()
                && self.temperature_min.is_none()
                && self.precipitation.is_none()
                && self.weather_code.is_none()
        }

        /// Keep `min(days, len(temperature_max))` rows; a short answer is not an error
        pub fn into_forecast(self, location: &str, days: u32) -> Forecast {
            let available = self.temperature_max.as_ref().map_or(0, Vec::len);
            let count = available.min(days as usize);

            let rows = (0..count)
                .map(|i| ForecastDay {
                    day: i + 1,
                    date: self
                        .time
                        .as_ref()
                        .and_then(|t| t.get(i))
                        .and_then(|t| NaiveDate::parse_from_str(t, "%Y-%m-%d").ok()),
                    temperature_max: at(self.temperature_max.as_ref(), i),
                    temperature_min: at(self.temperature_min.as_ref(), i),
                    precipitation: at(self.precipitation.as_ref(), i),
                    weather_code: at(self.weather_code.as_ref(), i),
                })
                .collect();

            Forecast {
                location: location.to_string(),
                requested_days: days,
                days: rows,
            }
        }
    }
}
