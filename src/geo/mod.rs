//! Geocoding module
//!
//! Provides forward geocoding (place name to candidate coordinates) behind
//! the `GeoBackend` trait so the picker can run against any provider.

#[cfg(test)]
pub(crate) mod fake;
pub mod nominatim;

use crate::config::GeocoderConfig;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// A geocoded location result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    /// Latitude
    pub lat: f64,
    /// Longitude
    pub lon: f64,
    /// Display name (address or description)
    pub display_name: String,
}

/// Trait for geocoding backends
pub trait GeoBackend: Send + Sync {
    /// Search for places matching a free-text query
    ///
    /// Returns at most `limit` results in the provider's relevance order.
    /// Transport and payload problems are reported as errors; an unknown
    /// place is an empty vector.
    fn search(
        &self,
        query: &str,
        limit: usize,
    ) -> impl std::future::Future<Output = Result<Vec<GeoLocation>>> + Send;
}

/// Build the default geocoding backend from configuration
pub fn get_geocoder(config: &GeocoderConfig) -> Result<nominatim::NominatimBackend> {
    nominatim::NominatimBackend::from_config(config)
}
