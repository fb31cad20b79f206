//! Input tracking with debounce
//!
//! Owns the single pending query and the timer that releases it. A new
//! keystroke replaces both; nothing is ever queued.

use crate::config::PickerConfig;
use crate::picker::Query;
use std::pin::Pin;
use std::time::Duration;
use tokio::time::{sleep, Sleep};

/// What the tracker decided for one input event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Input too short: hide suggestions now
    Clear,
    /// A query will be released once the input goes quiet
    Scheduled,
}

/// Debounces raw text into queries
#[derive(Debug)]
pub struct InputTracker {
    min_len: usize,
    quiet: Duration,
    timer: Option<Pin<Box<Sleep>>>,
    pending: Option<Query>,
}

impl InputTracker {
    pub fn new(options: &PickerConfig) -> Self {
        Self {
            min_len: options.min_query_length,
            quiet: options.debounce(),
            timer: None,
            pending: None,
        }
    }

    /// Record a raw input event
    ///
    /// Must be called from within a tokio runtime when it schedules.
    pub fn on_text_changed(&mut self, text: &str) -> Intent {
        let query = Query::new(text);

        if query.is_empty() || query.len() < self.min_len {
            self.cancel();
            return Intent::Clear;
        }

        self.pending = Some(query);
        self.timer = Some(Box::pin(sleep(self.quiet)));
        Intent::Scheduled
    }

    pub fn is_pending(&self) -> bool {
        self.timer.is_some()
    }

    /// Drop the pending query and its timer
    pub fn cancel(&mut self) {
        self.timer = None;
        self.pending = None;
    }

    /// Wait for the quiet interval to pass and take the pending query
    ///
    /// Cancel safe: dropping the future leaves the timer armed.
    pub async fn elapsed(&mut self) -> Option<Query> {
        let timer = self.timer.as_mut()?;
        timer.await;
        self.timer = None;
        self.pending.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{timeout, Instant};

    fn tracker() -> InputTracker {
        InputTracker::new(&PickerConfig::default())
    }

    #[tokio::test(start_paused = true)]
    async fn test_short_input_clears_immediately() {
        let mut tracker = tracker();
        assert_eq!(tracker.on_text_changed(""), Intent::Clear);
        assert_eq!(tracker.on_text_changed("  S  "), Intent::Clear);
        assert!(!tracker.is_pending());
        assert_eq!(tracker.elapsed().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_releases_after_quiet_interval() {
        let mut tracker = tracker();
        let start = Instant::now();
        assert_eq!(tracker.on_text_changed(" Sa "), Intent::Scheduled);

        let query = tracker.elapsed().await.unwrap();
        assert_eq!(query.text(), "Sa");
        assert!(start.elapsed() >= Duration::from_millis(300));
        assert!(!tracker.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_last_write_wins() {
        let mut tracker = tracker();
        tracker.on_text_changed("Sa");
        tokio::time::sleep(Duration::from_millis(200)).await;
        tracker.on_text_changed("San");

        let start = Instant::now();
        let query = tracker.elapsed().await.unwrap();
        assert_eq!(query.text(), "San");
        assert!(start.elapsed() >= Duration::from_millis(300));
    }

    #[tokio::test(start_paused = true)]
    async fn test_short_input_cancels_pending() {
        let mut tracker = tracker();
        tracker.on_text_changed("San");
        tracker.on_text_changed("S");
        assert!(!tracker.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_wait_keeps_timer() {
        let mut tracker = tracker();
        tracker.on_text_changed("Oslo");

        assert!(timeout(Duration::from_millis(100), tracker.elapsed()).await.is_err());
        assert!(tracker.is_pending());
        assert_eq!(tracker.elapsed().await.unwrap().text(), "Oslo");
    }

    #[tokio::test(start_paused = true)]
    async fn test_custom_min_length() {
        let options = PickerConfig {
            min_query_length: 0,
            ..PickerConfig::default()
        };
        let mut tracker = InputTracker::new(&options);
        assert_eq!(tracker.on_text_changed("S"), Intent::Scheduled);
        assert_eq!(tracker.on_text_changed("   "), Intent::Clear);
    }
}
