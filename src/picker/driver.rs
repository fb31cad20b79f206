//! Picker task
//!
//! Runs the whole input-to-selection pipeline on one task. Input events,
//! the debounce timer and finished searches are multiplexed with
//! `select!`; searches run on their own tasks and report back tagged with
//! a ticket so superseded results can be dropped.

use crate::config::PickerConfig;
use crate::coord;
use crate::geo::GeoBackend;
use crate::picker::events::{ListenerId, Listeners, SelectionCallback};
use crate::picker::list::{Direction, SelectionList};
use crate::picker::resolver::{Lookup, Resolver, Staleness, Ticket};
use crate::picker::tracker::{InputTracker, Intent};
use crate::picker::{Candidate, Key, Notice, PickerView, PointerTarget, Query};
use std::fmt;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, trace};

/// Messages from the host handle
pub(crate) enum Command {
    Input(String),
    Key(Key),
    Click(usize),
    Pointer(PointerTarget),
    Listen(ListenerId, SelectionCallback),
    Unlisten(ListenerId),
    Dispose,
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Input(text) => f.debug_tuple("Input").field(text).finish(),
            Command::Key(key) => f.debug_tuple("Key").field(key).finish(),
            Command::Click(index) => f.debug_tuple("Click").field(index).finish(),
            Command::Pointer(target) => f.debug_tuple("Pointer").field(target).finish(),
            Command::Listen(id, _) => f.debug_tuple("Listen").field(id).finish(),
            Command::Unlisten(id) => f.debug_tuple("Unlisten").field(id).finish(),
            Command::Dispose => f.write_str("Dispose"),
        }
    }
}

type Finished = (Ticket, Lookup);

pub(crate) struct Driver<G> {
    tracker: InputTracker,
    resolver: Resolver<G>,
    staleness: Staleness,
    list: SelectionList,
    listeners: Listeners,
    placeholder: String,
    text: String,
    notice: Option<Notice>,
    view: watch::Sender<PickerView>,
}

impl<G: GeoBackend + 'static> Driver<G> {
    pub(crate) fn new(
        options: &PickerConfig,
        geocoder: Arc<G>,
    ) -> (Self, watch::Receiver<PickerView>) {
        let driver = Self {
            tracker: InputTracker::new(options),
            resolver: Resolver::new(geocoder, options.result_limit),
            staleness: Staleness::new(),
            list: SelectionList::new(),
            listeners: Listeners::new(),
            placeholder: options.placeholder.clone(),
            text: String::new(),
            notice: None,
            view: watch::channel(PickerView::inert(&options.placeholder)).0,
        };
        let view = driver.view.subscribe();
        driver.publish_view();
        (driver, view)
    }

    pub(crate) async fn run(mut self, mut commands: mpsc::UnboundedReceiver<Command>) {
        let (finished_tx, mut finished_rx) = mpsc::unbounded_channel::<Finished>();

        loop {
            tokio::select! {
                command = commands.recv() => match command {
                    Some(Command::Dispose) | None => break,
                    Some(command) => self.handle(command),
                },
                Some(query) = self.tracker.elapsed(), if self.tracker.is_pending() => {
                    self.dispatch(query, &finished_tx);
                }
                Some((ticket, lookup)) = finished_rx.recv() => {
                    self.finish(ticket, lookup);
                }
            }
        }

        self.tracker.cancel();
        self.staleness.invalidate();
        self.listeners.clear();
        self.view.send_modify(|view| {
            view.mounted = false;
            view.visible = false;
        });
        debug!("Location picker disposed");
    }

    fn handle(&mut self, command: Command) {
        trace!(?command, "Picker command");

        match command {
            Command::Input(text) => self.on_input(text),
            Command::Key(Key::ArrowDown) => self.move_active(Direction::Down),
            Command::Key(Key::ArrowUp) => self.move_active(Direction::Up),
            Command::Key(Key::Enter) => self.commit_active(),
            Command::Key(Key::Escape) => self.hide(),
            Command::Click(index) => {
                if let Some(candidate) = self.list.get(index).cloned() {
                    self.commit(candidate);
                }
            }
            Command::Pointer(PointerTarget::Outside) => self.hide(),
            Command::Pointer(PointerTarget::Inside) => {}
            Command::Listen(id, callback) => self.listeners.add(id, callback),
            Command::Unlisten(id) => {
                self.listeners.remove(id);
            }
            Command::Dispose => {}
        }
    }

    fn on_input(&mut self, text: String) {
        let intent = self.tracker.on_text_changed(&text);
        self.text = text;

        if intent == Intent::Clear {
            self.staleness.invalidate();
            self.notice = None;
            self.list.clear();
        }
        self.publish_view();
    }

    /// Resolve a query released by the debounce timer
    fn dispatch(&mut self, query: Query, finished: &mpsc::UnboundedSender<Finished>) {
        let ticket = self.staleness.issue();

        if let Some(candidates) = self.resolver.resolve_local(&query) {
            self.render(candidates, None);
            return;
        }

        let resolver = self.resolver.clone();
        let finished = finished.clone();
        tokio::spawn(async move {
            let lookup = resolver.lookup(&query).await;
            // The picker may be gone by now
            let _ = finished.send((ticket, lookup));
        });
    }

    fn finish(&mut self, ticket: Ticket, lookup: Lookup) {
        if !self.staleness.is_current(ticket) {
            trace!(count = lookup.candidates.len(), "Discarding superseded search result");
            return;
        }

        let notice = match (lookup.candidates.is_empty(), lookup.failed) {
            (false, _) => None,
            (true, false) => Some(Notice::NoResults),
            (true, true) => Some(Notice::SearchFailed),
        };
        self.render(lookup.candidates, notice);
    }

    fn render(&mut self, candidates: Vec<Candidate>, notice: Option<Notice>) {
        self.list.render(candidates);
        self.notice = notice;
        self.publish_view();
    }

    fn move_active(&mut self, direction: Direction) {
        self.list.move_active(direction);
        self.publish_view();
    }

    fn hide(&mut self) {
        if self.list.is_visible() || self.notice.is_some() {
            self.list.hide();
            self.notice = None;
            self.publish_view();
        }
    }

    /// Enter: commit the highlight, or the typed coordinates if nothing is highlighted
    fn commit_active(&mut self) {
        if let Some(candidate) = self.list.active().cloned() {
            self.commit(candidate);
            return;
        }

        if let Some(coords) = coord::parse_literal(&self.text) {
            self.commit(Candidate::synthesized(coords));
        }
    }

    fn commit(&mut self, candidate: Candidate) {
        self.tracker.cancel();
        self.staleness.invalidate();

        self.text = candidate.display_name.clone();
        self.list.hide();
        self.notice = None;
        self.publish_view();

        let selection = candidate.to_selection();
        info!(
            display_name = %selection.display_name,
            lat = selection.lat,
            lon = selection.lon,
            "Location selected"
        );
        self.listeners.publish(&selection);
    }

    fn publish_view(&self) {
        self.view.send_replace(PickerView {
            mounted: true,
            placeholder: self.placeholder.clone(),
            text: self.text.clone(),
            candidates: self.list.candidates().to_vec(),
            active: self.list.active_index(),
            visible: self.list.is_visible(),
            notice: self.notice,
        });
    }
}
