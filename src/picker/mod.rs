//! Location picker component
//!
//! Turns raw keystrokes into a committed [`Selection`]:
//!
//! keystroke → [`tracker::InputTracker`] (debounce) → [`resolver::Resolver`]
//! (coordinate literal or place search) → [`list::SelectionList`] → click /
//! Enter → `location-selected` published to registered listeners.
//!
//! Each mounted picker runs as one tokio task that exclusively owns the
//! text, the candidate list and the active index. [`LocationPicker`] is the
//! handle the host uses to feed it input events and observe its view.

mod driver;
pub mod events;
pub mod list;
pub mod resolver;
pub mod tracker;


use crate::config::PickerConfig;
use crate::coord::Coordinates;
use crate::geo::{GeoBackend, GeoLocation};
use driver::{Command, Driver};
use events::ListenerId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tracing::{debug, warn};

pub use events::Selection;
pub use list::{Direction, SelectionList};
pub use resolver::{Lookup, Resolver};
pub use tracker::InputTracker;

/// Trimmed user input that is due for resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    text: String,
}

impl Query {
    /// Build a query from raw input text
    pub fn new(raw: &str) -> Self {
        Self {
            text: raw.trim().to_string(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length in characters, not bytes
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Where a candidate came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    /// Built locally from a typed coordinate literal
    Synthesized,
    /// Returned by the geocoder
    Fetched,
}

/// One location offered to the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub display_name: String,
    pub lat: f64,
    pub lon: f64,
    pub origin: Origin,
}

impl Candidate {
    /// Candidate for a typed coordinate pair
    pub fn synthesized(coords: Coordinates) -> Self {
        Self {
            display_name: coords.to_string(),
            lat: coords.lat,
            lon: coords.lon,
            origin: Origin::Synthesized,
        }
    }

    /// Candidate for a geocoder result; `None` if its coordinates are out of range
    pub fn fetched(location: GeoLocation) -> Option<Self> {
        Coordinates::new(location.lat, location.lon)
            .is_valid()
            .then(|| Self {
                display_name: location.display_name,
                lat: location.lat,
                lon: location.lon,
                origin: Origin::Fetched,
            })
    }

    pub fn to_selection(&self) -> Selection {
        Selection {
            display_name: self.display_name.clone(),
            lat: self.lat,
            lon: self.lon,
        }
    }
}

/// Ordered candidates, most relevant first
pub type CandidateList = Vec<Candidate>;

/// Inline message shown instead of suggestions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Notice {
    NoResults,
    SearchFailed,
}

impl Notice {
    pub fn message(&self) -> &'static str {
        match self {
            Notice::NoResults => "No matching places",
            Notice::SearchFailed => "Search failed, keep typing to retry",
        }
    }
}

/// Keys the picker reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowDown,
    ArrowUp,
    Enter,
    Escape,
}

/// Where a pointer press landed relative to the picker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    /// Input box or list chrome
    Inside,
    /// Anywhere else on the page
    Outside,
}

/// Snapshot of everything a host needs to draw the picker
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PickerView {
    /// False when the picker failed to mount or was disposed; it then ignores all input
    pub mounted: bool,
    pub placeholder: String,
    /// Current input text
    pub text: String,
    pub candidates: CandidateList,
    pub active: Option<usize>,
    pub visible: bool,
    pub notice: Option<Notice>,
}

impl PickerView {
    fn inert(placeholder: &str) -> Self {
        Self {
            mounted: false,
            placeholder: placeholder.to_string(),
            text: String::new(),
            candidates: Vec::new(),
            active: None,
            visible: false,
            notice: None,
        }
    }

    /// Candidates the user can currently see
    pub fn shown(&self) -> &[Candidate] {
        if self.visible {
            &self.candidates
        } else {
            &[]
        }
    }
}

/// Page the picker mounts into
pub trait Host {
    /// Whether a container with this id exists
    fn has_container(&self, id: &str) -> bool;
}

/// Minimal host: a set of container ids
#[derive(Debug, Clone, Default)]
pub struct Page {
    containers: HashSet<String>,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_container(mut self, id: impl Into<String>) -> Self {
        self.containers.insert(id.into());
        self
    }
}

impl Host for Page {
    fn has_container(&self, id: &str) -> bool {
        self.containers.contains(id)
    }
}

/// Handle to a mounted location picker
///
/// Dropping the handle (or calling [`dispose`](Self::dispose)) stops the
/// picker task and cancels its debounce timer.
#[derive(Debug)]
pub struct LocationPicker {
    commands: Option<mpsc::UnboundedSender<Command>>,
    view: watch::Receiver<PickerView>,
    next_listener: AtomicU64,
}

impl LocationPicker {
    /// Mount a picker into `options.container()` on `host`
    ///
    /// Never panics: a missing container or a missing tokio runtime logs a
    /// warning and returns an inert picker whose operations do nothing.
    pub fn mount<H, G>(host: &H, options: PickerConfig, geocoder: Arc<G>) -> Self
    where
        H: Host + ?Sized,
        G: GeoBackend + 'static,
    {
        let container = options.container().to_string();

        if !host.has_container(&container) {
            warn!(container = %container, "Mount container not found, location picker is inert");
            return Self::inert(&options.placeholder);
        }

        let runtime = match tokio::runtime::Handle::try_current() {
            Ok(runtime) => runtime,
            Err(e) => {
                warn!(error = %e, "No async runtime, location picker is inert");
                return Self::inert(&options.placeholder);
            }
        };

        let (commands, receiver) = mpsc::unbounded_channel();
        let (driver, view) = Driver::new(&options, geocoder);
        runtime.spawn(driver.run(receiver));

        debug!(container = %container, "Location picker mounted");

        Self {
            commands: Some(commands),
            view,
            next_listener: AtomicU64::new(1),
        }
    }

    fn inert(placeholder: &str) -> Self {
        let (_, view) = watch::channel(PickerView::inert(placeholder));
        Self {
            commands: None,
            view,
            next_listener: AtomicU64::new(1),
        }
    }

    /// Whether the picker mounted successfully
    pub fn is_mounted(&self) -> bool {
        self.commands.is_some()
    }

    fn send(&self, command: Command) {
        if let Some(commands) = &self.commands {
            // A closed channel means the picker was disposed
            let _ = commands.send(command);
        }
    }

    /// Feed one raw input event (the full current text)
    pub fn on_text_changed(&self, text: impl Into<String>) {
        self.send(Command::Input(text.into()));
    }

    pub fn key_down(&self, key: Key) {
        self.send(Command::Key(key));
    }

    /// Pointer click on the rendered candidate at `index`
    pub fn click_candidate(&self, index: usize) {
        self.send(Command::Click(index));
    }

    pub fn pointer_down(&self, target: PointerTarget) {
        self.send(Command::Pointer(target));
    }

    /// Register a `location-selected` listener
    pub fn on_select<F>(&self, callback: F) -> ListenerId
    where
        F: Fn(&Selection) + Send + 'static,
    {
        let id = ListenerId(self.next_listener.fetch_add(1, Ordering::Relaxed));
        self.send(Command::Listen(id, Box::new(callback)));
        id
    }

    pub fn remove_listener(&self, id: ListenerId) {
        self.send(Command::Unlisten(id));
    }

    /// Receive every future selection on a channel
    pub fn selections(&self) -> mpsc::UnboundedReceiver<Selection> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.on_select(move |selection| {
            let _ = tx.send(selection.clone());
        });
        rx
    }

    /// Current view snapshot
    pub fn view(&self) -> PickerView {
        self.view.borrow().clone()
    }

    /// Receiver notified on every view change
    pub fn watch(&self) -> watch::Receiver<PickerView> {
        self.view.clone()
    }

    /// Stop the picker; further operations are no-ops
    pub fn dispose(&mut self) {
        if let Some(commands) = self.commands.take() {
            let _ = commands.send(Command::Dispose);
        }
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_query_trims_and_counts_chars() {
        let query = Query::new("  Zürich \n");
        assert_eq!(query.text(), "Zürich");
        assert_eq!(query.len(), 6);
        assert!(Query::new("   ").is_empty());
    }

    #[test]
    fn test_synthesized_candidate() {
        let candidate = Candidate::synthesized(Coordinates::new(37.7749, -122.4194));
        assert_eq!(candidate.display_name, "37.7749, -122.4194");
        assert_eq!(candidate.origin, Origin::Synthesized);
        assert_eq!((candidate.lat, candidate.lon), (37.7749, -122.4194));
    }

    #[test]
    fn test_fetched_candidate_rejects_out_of_range() {
        let bad = GeoLocation {
            lat: 123.0,
            lon: 0.0,
            display_name: "Nowhere".to_string(),
        };
        assert!(Candidate::fetched(bad).is_none());

        let good = GeoLocation {
            lat: 51.5074,
            lon: -0.1278,
            display_name: "London".to_string(),
        };
        let candidate = Candidate::fetched(good).unwrap();
        assert_eq!(candidate.origin, Origin::Fetched);
        assert_eq!(candidate.to_selection().display_name, "London");
    }

    #[test]
    fn test_page_containers() {
        let page = Page::new().with_container("location-search");
        assert!(page.has_container("location-search"));
        assert!(!page.has_container("elsewhere"));
    }

    #[test]
    fn test_mount_without_runtime_is_inert() {
        let page = Page::new().with_container("location-search");
        let geocoder = Arc::new(crate::geo::fake::FakeGeocoder::new());
        let picker = LocationPicker::mount(&page, PickerConfig::default(), geocoder);

        assert!(!picker.is_mounted());
        picker.on_text_changed("Paris");
        assert!(!picker.view().mounted);
        assert_eq!(picker.view().text, "");
    }
}
