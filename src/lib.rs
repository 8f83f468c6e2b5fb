//! Travel concierge - tool layer for a multi-agent travel assistant
//!
//! This library provides per-user context, geocoding, weather forecasts,
//! nearby place search and static trip advice, exposed as named tools that
//! always answer with display-ready text.

pub mod advisors;
pub mod agents;
pub mod api;
pub mod config;
pub mod context;
pub mod error;
pub mod geocode;
pub mod models;
pub mod places;
pub mod telemetry;
pub mod tools;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use config::ConciergeConfig;
pub use context::UserContextStore;
pub use error::{ConciergeError, LookupError};
pub use geocode::{Geocoder, NominatimGeocoder};
pub use models::{Forecast, ForecastDay, GeoPoint, PlaceResult, Profile, UserRecord};
pub use places::PlaceFinder;
pub use tools::{Invocation, Tool, ToolRegistry};
pub use weather::WeatherFetcher;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, ConciergeError>;
