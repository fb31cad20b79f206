//! Server shared state
//!
//! Holds configuration and the resolver shared by all requests.

use crate::config::Config;
use crate::geo::GeoBackend;
use crate::picker::Resolver;
use std::sync::Arc;

/// Shared state for the HTTP server
pub struct AppState<G> {
    /// Configuration
    pub config: Config,

    /// Resolver used by /api/resolve
    pub resolver: Resolver<G>,
}

impl<G: GeoBackend> AppState<G> {
    /// Create new application state
    pub fn new(config: Config, geocoder: Arc<G>) -> Self {
        let resolver = Resolver::new(geocoder, config.picker.result_limit);
        Self { config, resolver }
    }

    /// Shortest query the resolver answers
    pub fn min_query_length(&self) -> usize {
        self.config.picker.min_query_length
    }
}
