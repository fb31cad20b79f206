//! Nominatim geocoding backend (OpenStreetMap)
//!
//! Uses the free Nominatim search API. The usage policy requires an
//! identifying User-Agent, which the client sets on every request.

use crate::config::GeocoderConfig;
use crate::error::{Error, Result};
use crate::geo::{GeoBackend, GeoLocation};
use serde::Deserialize;
use tracing::debug;

/// Nominatim geocoding backend
#[derive(Debug, Clone)]
pub struct NominatimBackend {
    client: reqwest::Client,
    base_url: String,
    language: Option<String>,
}

/// Nominatim search response item
///
/// Nominatim sends `lat`/`lon` as strings, some mirrors send numbers.
#[derive(Debug, Deserialize)]
struct NominatimResult {
    lat: Degrees,
    lon: Degrees,
    display_name: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Degrees {
    Number(f64),
    Text(String),
}

impl Degrees {
    fn value(&self) -> Option<f64> {
        match self {
            Degrees::Number(n) => Some(*n),
            Degrees::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl NominatimBackend {
    /// Create a backend from the `[geocoder]` config section
    ///
    /// Without a configured language the user's locale is requested.
    pub fn from_config(config: &GeocoderConfig) -> Result<Self> {
        Self::build(config, config.accept_language())
    }

    fn build(config: &GeocoderConfig, language: Option<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            language,
        })
    }

    /// Build the search URL for a query
    fn search_url(&self, query: &str, limit: usize) -> String {
        let mut url = format!(
            "{}/search?q={}&format=json&limit={}",
            self.base_url,
            urlencoding::encode(query),
            limit
        );
        if let Some(language) = &self.language {
            url.push_str(&format!("&accept-language={}", urlencoding::encode(language)));
        }
        url
    }

    /// Turn a raw payload into locations, skipping entries that don't parse
    fn parse_results(payload: serde_json::Value) -> Result<Vec<GeoLocation>> {
        let serde_json::Value::Array(items) = payload else {
            return Err(Error::Geocoding(
                "Nominatim response is not an array".to_string(),
            ));
        };

        let locations = items
            .into_iter()
            .filter_map(|item| match serde_json::from_value::<NominatimResult>(item) {
                Ok(result) => Some(result),
                Err(e) => {
                    debug!("Skipping malformed Nominatim entry: {}", e);
                    None
                }
            })
            .filter_map(|result| {
                let lat = result.lat.value()?;
                let lon = result.lon.value()?;
                Some(GeoLocation {
                    lat,
                    lon,
                    display_name: result.display_name,
                })
            })
            .collect();

        Ok(locations)
    }
}

impl GeoBackend for NominatimBackend {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<GeoLocation>> {
        let url = self.search_url(query, limit);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Geocoding(format!("Nominatim request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::Geocoding(format!(
                "Nominatim returned status: {}",
                response.status()
            )));
        }

        let payload: serde_json::Value = response
            .json()
            .await
            .map_err(|e| Error::Geocoding(format!("Failed to parse Nominatim response: {}", e)))?;

        Self::parse_results(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use serde_json::json;

    fn backend(language: &str) -> NominatimBackend {
        let config = GeocoderConfig {
            base_url: "https://nominatim.example.org/".to_string(),
            ..GeocoderConfig::default()
        };
        let language = Some(language.to_string()).filter(|l| !l.is_empty());
        NominatimBackend::build(&config, language).unwrap()
    }

    #[test]
    fn test_search_url() {
        let url = backend("").search_url("San Francisco", 5);
        assert_eq!(
            url,
            "https://nominatim.example.org/search?q=San%20Francisco&format=json&limit=5"
        );
    }

    #[test]
    fn test_search_url_with_language() {
        let url = backend("de").search_url("München", 6);
        assert!(url.ends_with("&limit=6&accept-language=de"));
        assert!(url.contains("q=M%C3%BCnchen"));
    }

    #[test]
    fn test_parse_string_and_number_degrees() {
        let payload = json!([
            {"display_name": "San Francisco, CA", "lat": "37.7790262", "lon": "-122.419906"},
            {"display_name": "San Francisco, Córdoba", "lat": -31.4283, "lon": -62.0829}
        ]);

        let results = NominatimBackend::parse_results(payload).unwrap();
        assert_eq!(results.len(), 2);
        assert_relative_eq!(results[0].lat, 37.7790262);
        assert_relative_eq!(results[0].lon, -122.419906);
        assert_relative_eq!(results[1].lat, -31.4283);
        assert_eq!(results[1].display_name, "San Francisco, Córdoba");
    }

    #[test]
    fn test_parse_skips_malformed_entries() {
        let payload = json!([
            {"display_name": "No coordinates"},
            {"display_name": "Bad lat", "lat": "north", "lon": "1.0"},
            {"display_name": "Good", "lat": "1.5", "lon": "2.5"}
        ]);

        let results = NominatimBackend::parse_results(payload).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].display_name, "Good");
    }

    #[test]
    fn test_parse_rejects_non_array() {
        let payload = json!({"error": "Unable to geocode"});
        assert!(NominatimBackend::parse_results(payload).is_err());
    }

    #[test]
    fn test_backend_creation() {
        let backend = backend("en");
        assert!(format!("{:?}", backend).contains("NominatimBackend"));
        assert_eq!(backend.language.as_deref(), Some("en"));
    }

    #[test]
    fn test_configured_language_is_requested() {
        let config = GeocoderConfig {
            language: "ja".to_string(),
            ..GeocoderConfig::default()
        };
        let backend = NominatimBackend::from_config(&config).unwrap();
        assert_eq!(backend.language.as_deref(), Some("ja"));
    }
}
