//! Point of interest returned by the place search

use serde::{Deserialize, Serialize};
use std::fmt;

pub const UNNAMED_PLACE: &str = "Unnamed place";
pub const NO_ADDRESS: &str = "Address not available";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PlaceResult {
    pub name: String,
    pub street: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl PlaceResult {
    /// Present address parts joined with `, `, or `None` when all are absent
    #[must_use]
    pub fn address(&self) -> Option<String> {
        let parts: Vec<&str> = [&self.street, &self.city, &self.country]
            .into_iter()
            .filter_map(|part| part.as_deref())
            .filter(|part| !part.is_empty())
            .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }

    #[must_use]
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }
}

impl fmt::Display for PlaceResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "- {}", self.name)?;
        if let Some((lat, lon)) = self.coordinates() {
            write!(f, " (Lat: {lat:.5}, Lon: {lon:.5})")?;
        }
        let address = self.address();
        write!(f, " | {}", address.as_deref().unwrap_or(NO_ADDRESS))
    }
}
