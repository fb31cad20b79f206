//! HTTP API routes
//!
//! Defines all REST API endpoints for the server.

use crate::config::PickerConfig;
use crate::format::Suggestions;
use crate::geo::GeoBackend;
use crate::picker::{Notice, Query};
use crate::server::state::AppState;

use axum::{
    extract::{Query as QueryParams, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Create the API router
pub fn create_router<G: GeoBackend + 'static>(state: Arc<AppState<G>>) -> Router {
    Router::new()
        .route("/api/resolve", get(resolve_handler::<G>))
        .route("/api/options", get(options_handler::<G>))
        .route("/api/status", get(status_handler::<G>))
        .with_state(state)
}

/// Resolve query string
#[derive(Debug, Deserialize)]
pub struct ResolveParams {
    /// Raw input text
    #[serde(default)]
    pub q: String,
}

/// Resolve response
#[derive(Debug, Serialize, Deserialize)]
pub struct ResolveResponse {
    #[serde(flatten)]
    pub suggestions: Suggestions,
    /// Set when there is nothing to show after a search
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notice: Option<Notice>,
}

/// Resolve raw input into candidates
///
/// GET /api/resolve?q=...
///
/// Always answers 200: too-short input yields no candidates and geocoder
/// failures are reported through `notice`.
async fn resolve_handler<G: GeoBackend + 'static>(
    State(state): State<Arc<AppState<G>>>,
    QueryParams(params): QueryParams<ResolveParams>,
) -> Json<ResolveResponse> {
    let query = Query::new(&params.q);

    if query.is_empty() || query.len() < state.min_query_length() {
        return Json(ResolveResponse {
            suggestions: Suggestions {
                query: query.text().to_string(),
                candidates: Vec::new(),
            },
            notice: None,
        });
    }

    let lookup = state.resolver.lookup(&query).await;
    let notice = match (lookup.candidates.is_empty(), lookup.failed) {
        (false, _) => None,
        (true, false) => Some(Notice::NoResults),
        (true, true) => Some(Notice::SearchFailed),
    };

    Json(ResolveResponse {
        suggestions: Suggestions {
            query: query.text().to_string(),
            candidates: lookup.candidates,
        },
        notice,
    })
}

/// Picker options for browser hosts
///
/// GET /api/options
async fn options_handler<G: GeoBackend + 'static>(
    State(state): State<Arc<AppState<G>>>,
) -> Json<PickerConfig> {
    Json(state.config.picker.clone())
}

/// Status response
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Server is running
    pub running: bool,
    /// Server version
    pub version: String,
    /// Geocoding endpoint in use
    pub geocoder: String,
}

/// Server status endpoint
///
/// GET /api/status
async fn status_handler<G: GeoBackend + 'static>(
    State(state): State<Arc<AppState<G>>>,
) -> Json<StatusResponse> {
    Json(StatusResponse {
        running: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        geocoder: state.config.geocoder.base_url.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::geo::fake::{place, FakeGeocoder};
    use crate::picker::Origin;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn create_test_app(fake: &FakeGeocoder) -> Router {
        let state = Arc::new(AppState::new(Config::default(), Arc::new(fake.clone())));
        create_router(state)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(app: Router, uri: &str) -> T {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_resolve_place() {
        let fake = FakeGeocoder::new().with_places(
            "Kyoto",
            vec![place("Kyoto, Japan", 35.0116, 135.7681)],
        );

        let response: ResolveResponse =
            get_json(create_test_app(&fake), "/api/resolve?q=%20Kyoto%20").await;

        assert_eq!(response.suggestions.query, "Kyoto");
        assert_eq!(response.suggestions.candidates.len(), 1);
        assert_eq!(response.suggestions.candidates[0].origin, Origin::Fetched);
        assert_eq!(response.notice, None);
        assert_eq!(fake.calls(), vec!["Kyoto"]);
    }

    #[tokio::test]
    async fn test_resolve_coordinates_skips_geocoder() {
        let fake = FakeGeocoder::new();
        let response: ResolveResponse =
            get_json(create_test_app(&fake), "/api/resolve?q=37.7749,%20-122.4194").await;

        let candidates = &response.suggestions.candidates;
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].lat, 37.7749);
        assert_eq!(candidates[0].lon, -122.4194);
        assert!(fake.calls().is_empty());
    }

    #[tokio::test]
    async fn test_resolve_short_query() {
        let fake = FakeGeocoder::new();
        let response: ResolveResponse = get_json(create_test_app(&fake), "/api/resolve?q=S").await;

        assert!(response.suggestions.candidates.is_empty());
        assert_eq!(response.notice, None);
        assert!(fake.calls().is_empty());

        let response: ResolveResponse = get_json(create_test_app(&fake), "/api/resolve").await;
        assert!(response.suggestions.candidates.is_empty());
    }

    #[tokio::test]
    async fn test_resolve_failure_is_not_an_error() {
        let fake = FakeGeocoder::new().failing("Atlantis");
        let response: ResolveResponse =
            get_json(create_test_app(&fake), "/api/resolve?q=Atlantis").await;

        assert!(response.suggestions.candidates.is_empty());
        assert_eq!(response.notice, Some(Notice::SearchFailed));
    }

    #[tokio::test]
    async fn test_options_endpoint() {
        let options: PickerConfig =
            get_json(create_test_app(&FakeGeocoder::new()), "/api/options").await;
        assert_eq!(options, PickerConfig::default());
    }

    #[tokio::test]
    async fn test_status_endpoint() {
        let status: StatusResponse =
            get_json(create_test_app(&FakeGeocoder::new()), "/api/status").await;

        assert!(status.running);
        assert_eq!(status.geocoder, "https://nominatim.openstreetmap.org");
    }
}
