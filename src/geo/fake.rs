//! Controllable in-memory geocoder for tests
//!
//! Records every query it receives and can hold individual queries back
//! until the test releases them, so completion order can be forced.

use crate::error::{Error, Result};
use crate::geo::{GeoBackend, GeoLocation};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

#[derive(Debug, Clone)]
enum Reply {
    Places(Vec<GeoLocation>),
    Fail,
}

#[derive(Debug, Default)]
struct FakeState {
    replies: HashMap<String, Reply>,
    gates: HashMap<String, Arc<Notify>>,
    calls: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct FakeGeocoder {
    state: Arc<Mutex<FakeState>>,
}

pub(crate) fn place(name: &str, lat: f64, lon: f64) -> GeoLocation {
    GeoLocation {
        lat,
        lon,
        display_name: name.to_string(),
    }
}

impl FakeGeocoder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Answer `query` with `places`
    pub(crate) fn with_places(self, query: &str, places: Vec<GeoLocation>) -> Self {
        self.state
            .lock()
            .unwrap()
            .replies
            .insert(query.to_string(), Reply::Places(places));
        self
    }

    /// Fail every search for `query`
    pub(crate) fn failing(self, query: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .replies
            .insert(query.to_string(), Reply::Fail);
        self
    }

    /// Hold searches for `query` until the returned handle is notified
    pub(crate) fn gate(&self, query: &str) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.state
            .lock()
            .unwrap()
            .gates
            .insert(query.to_string(), gate.clone());
        gate
    }

    /// Queries received so far, in order
    pub(crate) fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }
}

impl GeoBackend for FakeGeocoder {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<GeoLocation>> {
        let (reply, gate) = {
            let mut state = self.state.lock().unwrap();
            state.calls.push(query.to_string());
            (state.replies.get(query).cloned(), state.gates.get(query).cloned())
        };

        if let Some(gate) = gate {
            gate.notified().await;
        }

        match reply {
            Some(Reply::Places(places)) => Ok(places.into_iter().take(limit).collect()),
            Some(Reply::Fail) => Err(Error::Geocoding("simulated outage".to_string())),
            None => Ok(Vec::new()),
        }
    }
}
