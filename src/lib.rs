//! loc-picker: place-name and coordinate location picker
//!
//! A headless location picker component. Users type either a place name,
//! resolved through a geocoding search, or raw `lat, lon` coordinates; the
//! picker debounces input, shows suggestions, and publishes the committed
//! location to listeners registered on the instance.
//!
//! ## Features
//!
//! - Debounced input with last-write-wins cancellation
//! - Coordinate literals answered locally, place names via Nominatim
//! - Stale search results are never shown
//! - Keyboard and pointer selection
//! - HTTP API + CLI interface
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use loc_picker::config::Config;
//! use loc_picker::geo::get_geocoder;
//! use loc_picker::picker::{Key, LocationPicker, Page};
//! use std::sync::Arc;
//!
//! # async fn demo() -> loc_picker::Result<()> {
//! let config = Config::default();
//! let geocoder = Arc::new(get_geocoder(&config.geocoder)?);
//! let page = Page::new().with_container(config.picker.container());
//!
//! let picker = LocationPicker::mount(&page, config.picker.clone(), geocoder);
//! picker.on_select(|selection| {
//!     println!("{} at ({}, {})", selection.display_name, selection.lat, selection.lon);
//! });
//!
//! picker.on_text_changed("37.7749, -122.4194");
//! picker.key_down(Key::Enter);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod coord;
pub mod error;
pub mod format;
pub mod geo;
pub mod picker;
pub mod server;

// Re-export commonly used types
pub use config::Config;
pub use coord::Coordinates;
pub use error::{Error, Result};
pub use picker::{Candidate, LocationPicker, Selection};
