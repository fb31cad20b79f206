//! Default configuration values
//!
//! Named constants for all tunable parameters

use crate::constants::api::{NOMINATIM_URL, USER_AGENT};

/// Placeholder shown in the empty input
pub const DEFAULT_PLACEHOLDER: &str = "Search for a place or enter lat, lon";

/// Container the picker mounts into when none is configured
pub const DEFAULT_CONTAINER_ID: &str = "location-search";

/// Shortest trimmed input that triggers a lookup
pub const DEFAULT_MIN_QUERY_LENGTH: usize = 2;

/// Quiet interval before a keystroke becomes a query
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Maximum number of place suggestions requested
pub const DEFAULT_RESULT_LIMIT: usize = 5;

/// Default geocoding endpoint
pub const DEFAULT_GEOCODER_URL: &str = NOMINATIM_URL;

/// Default client identification
pub const DEFAULT_USER_AGENT: &str = USER_AGENT;

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 7879;

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Application directory name (for XDG paths)
pub const APP_DIR_NAME: &str = "loc-picker";
