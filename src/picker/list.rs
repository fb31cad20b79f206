//! Suggestion list state
//!
//! Holds the rendered candidates, the highlighted entry and visibility.
//! The list is only ever replaced as a whole.

use crate::picker::{Candidate, CandidateList};

/// Highlight movement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Down,
    Up,
}

/// Rendered suggestions with one optional highlight
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionList {
    candidates: CandidateList,
    active: Option<usize>,
    visible: bool,
}

impl SelectionList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the list wholesale and drop the highlight
    pub fn render(&mut self, candidates: CandidateList) {
        self.visible = !candidates.is_empty();
        self.candidates = candidates;
        self.active = None;
    }

    /// Empty and hide the list
    pub fn clear(&mut self) {
        self.render(Vec::new());
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Move the highlight one step, clamped to the list bounds
    pub fn move_active(&mut self, direction: Direction) {
        if !self.visible || self.candidates.is_empty() {
            return;
        }

        let last = self.candidates.len() - 1;
        let next = match (self.active, direction) {
            (None, _) => 0,
            (Some(i), Direction::Down) => (i + 1).min(last),
            (Some(i), Direction::Up) => i.saturating_sub(1),
        };
        self.active = Some(next);
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    /// Highlighted candidate, if the list is showing
    pub fn active(&self) -> Option<&Candidate> {
        if !self.visible {
            return None;
        }
        self.active.and_then(|i| self.candidates.get(i))
    }

    /// Candidate at `index`, if the list is showing
    pub fn get(&self, index: usize) -> Option<&Candidate> {
        if !self.visible {
            return None;
        }
        self.candidates.get(index)
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}
