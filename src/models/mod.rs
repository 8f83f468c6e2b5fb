//! Data models for the travel concierge
//!
//! This module contains the domain models organized by concern:
//! - Location: Geographic points returned by the geocoder
//! - Forecast: Daily weather forecast rows
//! - Place: Points of interest from the map-data service
//! - User: Per-user profile, preferences, history and feedback

pub mod forecast;
pub mod location;
pub mod place;
pub mod user;

// Re-export all public types for convenient access
pub use forecast::{Forecast, ForecastDay};
pub use location::GeoPoint;
pub use place::PlaceResult;
pub use user::{BudgetTier, Profile, ProfileUpdate, TravelStyle, UserRecord};
