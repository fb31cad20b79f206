//! `location-selected` notifications
//!
//! Listeners belong to one picker instance and are dropped with it.

use crate::constants::LOCATION_SELECTED_EVENT;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use tracing::{debug, warn};

/// The location a user committed to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub display_name: String,
    pub lat: f64,
    pub lon: f64,
}

impl Selection {
    /// Event name hosts can use when forwarding the selection
    pub fn event_name(&self) -> &'static str {
        LOCATION_SELECTED_EVENT
    }
}

/// Callback invoked once per committed selection
pub type SelectionCallback = Box<dyn Fn(&Selection) + Send + 'static>;

/// Handle for removing a listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub(crate) u64);

/// Registered listeners in registration order
#[derive(Default)]
pub struct Listeners {
    entries: Vec<(ListenerId, SelectionCallback)>,
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.entries.len())
            .finish()
    }
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, id: ListenerId, callback: SelectionCallback) {
        self.entries.push((id, callback));
    }

    /// Returns true if the listener was registered
    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    /// Deliver a selection to every listener; returns how many returned normally
    ///
    /// A panicking listener is logged and skipped; the others still run.
    pub fn publish(&self, selection: &Selection) -> usize {
        debug!(
            event = selection.event_name(),
            listeners = self.len(),
            "Publishing selection"
        );

        let mut delivered = 0;
        for (id, callback) in &self.entries {
            match catch_unwind(AssertUnwindSafe(|| callback(selection))) {
                Ok(()) => delivered += 1,
                Err(panic) => {
                    let reason = panic_message(panic.as_ref());
                    warn!(listener = id.0, reason = %reason, "Selection listener panicked");
                }
            }
        }
        delivered
    }

    pub fn clear(&mut self) {
        if !self.is_empty() {
            debug!(listeners = self.len(), "Dropping selection listeners");
        }
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn selection() -> Selection {
        Selection {
            display_name: "Reykjavík".to_string(),
            lat: 64.1466,
            lon: -21.9426,
        }
    }

    #[test]
    fn test_publish_and_remove() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut listeners = Listeners::new();

        for n in 1..=2 {
            let seen = seen.clone();
            listeners.add(
                ListenerId(n),
                Box::new(move |s: &Selection| seen.lock().unwrap().push((n, s.display_name.clone()))),
            );
        }

        assert_eq!(listeners.publish(&selection()), 2);
        assert!(listeners.remove(ListenerId(1)));
        assert!(!listeners.remove(ListenerId(1)));
        assert_eq!(listeners.publish(&selection()), 1);

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 3);
        assert_eq!(seen[2].0, 2);
    }

    #[test]
    fn test_panicking_listener_does_not_stop_others() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut listeners = Listeners::new();

        listeners.add(ListenerId(1), Box::new(|_: &Selection| panic!("listener bug")));
        let sink = seen.clone();
        listeners.add(
            ListenerId(2),
            Box::new(move |s: &Selection| sink.lock().unwrap().push(s.display_name.clone())),
        );

        assert_eq!(listeners.publish(&selection()), 1);
        assert_eq!(*seen.lock().unwrap(), vec!["Reykjavík".to_string()]);
        assert_eq!(listeners.len(), 2);
    }

    #[test]
    fn test_selection_payload_shape() {
        let json = serde_json::to_value(selection()).unwrap();
        assert_eq!(json["display_name"], "Reykjavík");
        assert!(json["lat"].is_f64());
        assert!(json["lon"].is_f64());
        assert_eq!(selection().event_name(), "location-selected");
    }
}
