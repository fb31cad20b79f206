//! Centralized constants for the loc-picker crate

/// Geographic bounds
pub mod geo {
    /// Valid latitude range in degrees
    pub const LAT_MIN: f64 = -90.0;
    pub const LAT_MAX: f64 = 90.0;

    /// Valid longitude range in degrees
    pub const LON_MIN: f64 = -180.0;
    pub const LON_MAX: f64 = 180.0;
}

/// External API endpoints
pub mod api {
    /// OpenStreetMap Nominatim geocoding API
    pub const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";

    /// Client identification sent with every geocoding request.
    /// Nominatim's usage policy rejects requests without one.
    pub const USER_AGENT: &str = concat!(
        "loc-picker/",
        env!("CARGO_PKG_VERSION"),
        " (+https://github.com/shitchell/loc-picker)"
    );
}

/// Name of the notification published for every committed selection
pub const LOCATION_SELECTED_EVENT: &str = "location-selected";
