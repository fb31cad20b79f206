//! Geographic coordinates and the typed coordinate literal
//!
//! A coordinate literal is what a user types instead of a place name:
//! `37.7749, -122.4194`. Both numbers must be plain signed decimals and
//! lie within the WGS84 latitude/longitude ranges.

use crate::constants::geo::{LAT_MAX, LAT_MIN, LON_MAX, LON_MIN};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

static LITERAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([+-]?\d+(?:\.\d+)?),\s*([+-]?\d+(?:\.\d+)?)$").expect("valid regex")
});

/// A geographic coordinate (latitude, longitude)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    /// Create new coordinates
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Validate that coordinates are within valid ranges
    ///
    /// Latitude: -90 to 90
    /// Longitude: -180 to 180
    pub fn validate(&self) -> crate::error::Result<()> {
        if !(LAT_MIN..=LAT_MAX).contains(&self.lat) {
            return Err(crate::error::Error::InvalidCoordinates(format!(
                "Latitude {} is out of range [-90, 90]",
                self.lat
            )));
        }
        if !(LON_MIN..=LON_MAX).contains(&self.lon) {
            return Err(crate::error::Error::InvalidCoordinates(format!(
                "Longitude {} is out of range [-180, 180]",
                self.lon
            )));
        }
        Ok(())
    }

    /// Shorthand for `validate().is_ok()`. NaN is never valid.
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.lat, self.lon)
    }
}

/// Parse a typed coordinate literal such as `"-33.86, 151.2"`.
///
/// Returns `None` for anything that does not match the grammar or is out of
/// range; callers treat that as "not coordinates", never as an error.
pub fn parse_literal(text: &str) -> Option<Coordinates> {
    let caps = LITERAL_RE.captures(text.trim())?;
    let lat: f64 = caps[1].parse().ok()?;
    let lon: f64 = caps[2].parse().ok()?;

    let coords = Coordinates::new(lat, lon);
    coords.is_valid().then_some(coords)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_literal_exact_values() {
        let coords = parse_literal("37.7749, -122.4194").unwrap();
        assert_eq!(coords.lat, 37.7749);
        assert_eq!(coords.lon, -122.4194);
    }

    #[test]
    fn test_parse_literal_variants() {
        assert!(parse_literal("0,0").is_some());
        assert!(parse_literal("+45.5,-73").is_some());
        assert!(parse_literal("  -33.8688,151.2093  ").is_some());
        assert!(parse_literal("90, 180").is_some());
        assert!(parse_literal("-90, -180").is_some());
    }

    #[test]
    fn test_parse_literal_rejects_out_of_range() {
        assert!(parse_literal("91, 0").is_none());
        assert!(parse_literal("0, 180.5").is_none());
        assert!(parse_literal("-90.0001, 10").is_none());
    }

    #[test]
    fn test_parse_literal_rejects_malformed() {
        assert!(parse_literal("San Francisco").is_none());
        assert!(parse_literal("37.7749").is_none());
        assert!(parse_literal("37.7749 -122.4194").is_none());
        assert!(parse_literal("37.7749 , -122.4194").is_none());
        assert!(parse_literal("37., -122").is_none());
        assert!(parse_literal(".5, 10").is_none());
        assert!(parse_literal("1, 2, 3").is_none());
        assert!(parse_literal("").is_none());
    }

    #[test]
    fn test_validate() {
        assert!(Coordinates::new(40.7128, -74.0060).validate().is_ok());
        assert!(Coordinates::new(-91.0, 0.0).validate().is_err());
        assert!(Coordinates::new(0.0, 181.0).validate().is_err());
        assert!(!Coordinates::new(f64::NAN, 0.0).is_valid());
    }

    #[test]
    fn test_display() {
        let coords = Coordinates::new(37.7749, -122.4194);
        assert_eq!(coords.to_string(), "37.7749, -122.4194");
    }
}
