//! Latitude/longitude pairs used for the home location and entry positions.

use crate::error::{FeedError, Result};
use serde::Serialize;
use std::fmt;

/// A WGS 84 position in degrees, stored latitude first
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Build from a GeoJSON position, which is ordered `[lon, lat]`
    pub fn from_position(position: &[f64]) -> Option<Self> {
        match position {
            [lon, lat, ..] => Some(Self::new(*lat, *lon)),
            _ => None,
        }
    }

    /// Check that both components are finite and inside the WGS 84 range
    pub fn validate(&self) -> Result<()> {
        if !self.latitude.is_finite() || !(-90.0..=90.0).contains(&self.latitude) {
            return Err(FeedError::InvalidArgument {
                name: "latitude".to_string(),
                reason: format!("{} is outside [-90, 90]", self.latitude),
            });
        }
        if !self.longitude.is_finite() || !(-180.0..=180.0).contains(&self.longitude) {
            return Err(FeedError::InvalidArgument {
                name: "longitude".to_string(),
                reason: format!("{} is outside [-180, 180]", self.longitude),
            });
        }
        Ok(())
    }
}

impl From<(f64, f64)> for Coordinates {
    fn from((latitude, longitude): (f64, f64)) -> Self {
        Self::new(latitude, longitude)
    }
}

/// Renders as `(lat, lon)` using [`format_float`], so `-31` prints as `-31.0`.
impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", format_float(self.latitude), format_float(self.longitude))
    }
}

/// Shortest round-trip text for a float
///
/// Plain values keep a decimal point (`-31.0`). Values below `1e-4` or from
/// `1e16` up use a signed exponent of at least two digits (`1e-05`, `1e+16`).
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }

    let text = format!("{:?}", value);
    match text.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => text,
    }
}
