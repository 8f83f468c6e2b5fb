//! Daily weather forecast model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One day of a multi-day forecast
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ForecastDay {
    /// 1-based position in the forecast
    pub day: usize,
    /// Local calendar date reported upstream
    pub date: Option<NaiveDate>,
    /// Maximum temperature in Celsius
    pub temperature_max: Option<f64>,
    /// Minimum temperature in Celsius
    pub temperature_min: Option<f64>,
    /// Precipitation sum in mm
    pub precipitation: Option<f64>,
    /// WMO weather interpretation code
    pub weather_code: Option<u8>,
}

/// Forecast for a named location, already truncated to the requested days
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Forecast {
    /// Location exactly as the caller typed it
    pub location: String,
    pub requested_days: u32,
    pub days: Vec<ForecastDay>,
}

impl ForecastDay {
    /// Human-readable conditions for the weather code, if any
    #[must_use]
    pub fn conditions(&self) -> Option<&'static str> {
        self.weather_code.map(weather_code_to_description)
    }
}

// Values pass through unrounded; `{:?}` keeps the trailing `.0` on whole numbers.
fn fmt_value(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{v:?}"))
}

impl fmt::Display for ForecastDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "- Day {}: High {}°C, Low {}°C, Precipitation: {}mm",
            self.day,
            fmt_value(self.temperature_max),
            fmt_value(self.temperature_min),
            fmt_value(self.precipitation)
        )?;
        if let Some(conditions) = self.conditions() {
            write!(f, ", Conditions: {conditions}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Forecast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plural = if self.requested_days > 1 { "s" } else { "" };
        write!(
            f,
            "Weather for {} (next {} day{plural}):",
            self.location, self.requested_days
        )?;
        for day in &self.days {
            write!(f, "\n{day}")?;
        }
        Ok(())
    }
}

/// Convert `OpenMeteo` weather code to human-readable description
#[must_use]
pub fn weather_code_to_description(code: u8) -> &'static str {
    match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 => "Fog",
        48 => "Depositing rime fog",
        51 => "Light drizzle",
        53 => "Moderate drizzle",
        55 => "Dense drizzle",
        56 => "Light freezing drizzle",
        57 => "Dense freezing drizzle",
        61 => "Slight rain",
        63 => "Moderate rain",
        65 => "Heavy rain",
        66 => "Light freezing rain",
        67 => "Heavy freezing rain",
        71 => "Slight snow fall",
        73 => "Moderate snow fall",
        75 => "Heavy snow fall",
        77 => "Snow grains",
        80 => "Slight rain showers",
        81 => "Moderate rain showers",
        82 => "Violent rain showers",
        85 => "Slight snow showers",
        86 => "Heavy snow showers",
        95 => "Thunderstorm",
        96 => "Thunderstorm with slight hail",
        99 => "Thunderstorm with heavy hail",
        _ => "Unknown",
    }
}
