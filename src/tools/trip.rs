use super::{Tool, parse_args};
use crate::ConciergeError;
use crate::places::PlaceFinder;
use crate::weather::WeatherFetcher;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

/// Daily forecast for a named location
pub struct WeatherTool {
    fetcher: Arc<WeatherFetcher>,
}

impl WeatherTool {
    pub fn new(fetcher: Arc<WeatherFetcher>) -> Self {
        Self { fetcher }
    }
}

#[derive(Debug, Deserialize)]
struct WeatherParams {
    location: String,
    #[serde(default = "default_days")]
    days: u32,
}

fn default_days() -> u32 {
    1
}

#[async_trait]
impl Tool for WeatherTool {
    fn name(&self) -> &str {
        "get_weather_forecast"
    }

    fn description(&self) -> &str {
        "Get the daily weather forecast (high, low, precipitation) for a city or place name."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "location": {
                    "type": "string",
                    "description": "City or place name, e.g. 'Paris, France'"
                },
                "days": {
                    "type": "integer",
                    "description": "Number of forecast days",
                    "minimum": 1,
                    "default": 1
                }
            },
            "required": ["location"]
        })
    }

    async fn call(&self, args: Value) -> Result<String, ConciergeError> {
        let params: WeatherParams = parse_args(args)?;
        if params.days == 0 {
            return Err(ConciergeError::validation("days must be at least 1"));
        }
        Ok(self.fetcher.forecast(&params.location, params.days).await)
    }
}

/// Keyword search for nearby places from OpenStreetMap
pub struct PlacesTool {
    finder: Arc<PlaceFinder>,
    default_radius_m: u32,
    default_limit: u32,
}

impl PlacesTool {
    pub fn new(finder: Arc<PlaceFinder>, default_radius_m: u32, default_limit: u32) -> Self {
        Self {
            finder,
            default_radius_m,
            default_limit,
        }
    }
}

#[derive(Debug, Deserialize)]
struct PlacesParams {
    query: String,
    location: String,
    radius: Option<u32>,
    limit: Option<u32>,
}

#[async_trait]
impl Tool for PlacesTool {
    fn name(&self) -> &str {
        "find_nearby_places_open"
    }

    fn description(&self) -> &str {
        "Find places (restaurants, cafes, shops, attractions) matching a keyword near a location."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "What to look for, e.g. 'cafe' or 'museum'"
                },
                "location": {
                    "type": "string",
                    "description": "City or area to search around"
                },
                "radius": {
                    "type": "integer",
                    "description": "Search radius in meters",
                    "minimum": 1,
                    "default": self.default_radius_m
                },
                "limit": {
                    "type": "integer",
                    "description": "Maximum number of results",
                    "minimum": 1,
                    "default": self.default_limit
                }
            },
            "required": ["query", "location"]
        })
    }

    async fn call(&self, args: Value) -> Result<String, ConciergeError> {
        let params: PlacesParams = parse_args(args)?;
        let radius = params.radius.unwrap_or(self.default_radius_m);
        let limit = params.limit.unwrap_or(self.default_limit);
        if radius == 0 {
            return Err(ConciergeError::validation("radius must be at least 1"));
        }
        if limit == 0 {
            return Err(ConciergeError::validation("limit must be at least 1"));
        }
        Ok(self
            .finder
            .find(&params.query, &params.location, radius, limit)
            .await)
    }
}
