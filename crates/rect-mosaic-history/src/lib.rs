#![warn(missing_docs)]
//! # rect-mosaic-history
//!
//! ## Purpose
//! Bounded linear undo/redo history of whole-image snapshots.
//!
//! ## Responsibilities
//! - Store deep copies of committed image states up to a fixed capacity.
//! - Truncate the redo branch when a new state is pushed after undoing.
//! - Evict the oldest snapshot when capacity is exceeded.
//!
//! ## Data flow
//! Editing session commits an [`Image`] after load and after every mosaic
//! application -> [`EditHistory::push`]. Undo/redo requests return copies of
//! stored states that replace the session's current image.
//!
//! ## Ownership and lifetimes
//! The history owns every snapshot. Pushing clones the caller's image and
//! every returned image is a fresh clone, so neither side can mutate the
//! other's buffers.
//!
//! ## Error model
//! Only construction can fail ([`HistoryError::InvalidCapacity`]). Undo/redo
//! at a boundary return `None` and leave the history unchanged.

use std::collections::VecDeque;

use rect_mosaic_core::{DEFAULT_HISTORY_CAPACITY, Image};
use thiserror::Error;

/// Bounded snapshot history with a movable cursor.
#[derive(Debug, Clone)]
pub struct EditHistory {
    capacity: usize,
    states: VecDeque<Image>,
    current: Option<usize>,
}

impl EditHistory {
    /// Creates an empty history keeping at most `capacity` snapshots.
    ///
    /// # Errors
    /// Returns [`HistoryError::InvalidCapacity`] when `capacity == 0`.
    pub fn new(capacity: usize) -> Result<Self, HistoryError> {
        if capacity == 0 {
            return Err(HistoryError::InvalidCapacity);
        }

        Ok(Self {
            capacity,
            states: VecDeque::with_capacity(capacity),
            current: None,
        })
    }

    /// Commits a copy of `image` as the new current state.
    ///
    /// # Side effects
    /// - Drops every state after the cursor (the redo branch).
    /// - Evicts the oldest snapshot when over capacity; the pushed state stays
    ///   current.
    /// - Zero-area images are ignored.
    pub fn push(&mut self, image: &Image) {
        if image.is_empty() {
            return;
        }

        let keep = self.current.map_or(0, |index| index + 1);
        self.states.truncate(keep);
        self.states.push_back(image.clone());

        if self.states.len() > self.capacity {
            self.states.pop_front();
        }

        // Invariant:
        // - The cursor always points at the most recently pushed state.
        self.current = Some(self.states.len() - 1);
    }

    /// Steps back one state and returns a copy of it.
    ///
    /// Returns `None` and leaves the cursor unchanged when nothing precedes
    /// the current state.
    pub fn undo(&mut self) -> Option<Image> {
        let index = self.current.filter(|index| *index > 0)? - 1;
        self.current = Some(index);
        self.states.get(index).cloned()
    }

    /// Steps forward one state and returns a copy of it.
    ///
    /// Returns `None` and leaves the cursor unchanged at the newest state.
    pub fn redo(&mut self) -> Option<Image> {
        let index = self.current? + 1;
        let state = self.states.get(index)?.clone();
        self.current = Some(index);
        Some(state)
    }

    /// Returns `true` when [`EditHistory::undo`] would succeed.
    pub fn can_undo(&self) -> bool {
        self.current.is_some_and(|index| index > 0)
    }

    /// Returns `true` when [`EditHistory::redo`] would succeed.
    pub fn can_redo(&self) -> bool {
        self.current
            .is_some_and(|index| index + 1 < self.states.len())
    }

    /// Removes every snapshot and resets the cursor.
    pub fn clear(&mut self) {
        self.states.clear();
        self.current = None;
    }

    /// Returns a copy of the current state.
    pub fn current(&self) -> Option<Image> {
        self.current
            .and_then(|index| self.states.get(index))
            .cloned()
    }

    /// Cursor position, `None` when the history is empty.
    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// Number of stored snapshots.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Returns `true` when no snapshot is stored.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Maximum number of stored snapshots.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for EditHistory {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_HISTORY_CAPACITY,
            states: VecDeque::with_capacity(DEFAULT_HISTORY_CAPACITY),
            current: None,
        }
    }
}

/// Error type for history construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HistoryError {
    /// Capacity must be strictly positive.
    #[error("history capacity must be greater than zero")]
    InvalidCapacity,
}

#[cfg(test)]
mod tests {
    //! Unit tests for cursor movement and branch truncation.

    use super::*;

    fn state(value: u8) -> Image {
        Image::filled(1, 1, [value, 0, 0, 255])
    }

    fn red(image: Option<Image>) -> Option<u8> {
        image.map(|image| image.rgba[0])
    }

    #[test]
    fn zero_capacity_is_rejected() {
        assert_eq!(EditHistory::new(0).unwrap_err(), HistoryError::InvalidCapacity);
    }

    #[test]
    fn empty_history_has_no_moves() {
        let mut history = EditHistory::default();
        assert_eq!(history.current_index(), None);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert_eq!(history.undo(), None);
        assert_eq!(history.redo(), None);
    }

    #[test]
    fn undo_and_redo_walk_the_cursor() {
        let mut history = EditHistory::new(5).expect("capacity should be valid");
        for value in 0..3 {
            history.push(&state(value));
        }

        assert_eq!(red(history.undo()), Some(1));
        assert_eq!(red(history.undo()), Some(0));
        assert_eq!(history.undo(), None);
        assert_eq!(history.current_index(), Some(0));

        assert_eq!(red(history.redo()), Some(1));
        assert_eq!(red(history.redo()), Some(2));
        assert_eq!(history.redo(), None);
    }

    #[test]
    fn push_after_undo_truncates_redo_branch() {
        let mut history = EditHistory::new(5).expect("capacity should be valid");
        for value in 0..4 {
            history.push(&state(value));
        }
        history.undo();
        history.undo();

        history.push(&state(9));
        assert_eq!(history.len(), 3);
        assert!(!history.can_redo());
        assert_eq!(red(history.current()), Some(9));
        assert_eq!(red(history.undo()), Some(1));
    }

    #[test]
    fn overflow_evicts_oldest_and_keeps_newest_current() {
        let mut history = EditHistory::new(3).expect("capacity should be valid");
        for value in 0..5 {
            history.push(&state(value));
        }

        assert_eq!(history.len(), 3);
        assert_eq!(history.current_index(), Some(2));
        assert_eq!(red(history.current()), Some(4));
        assert_eq!(red(history.undo()), Some(3));
        assert_eq!(red(history.undo()), Some(2));
        assert_eq!(history.undo(), None);
    }

    #[test]
    fn empty_images_are_ignored() {
        let mut history = EditHistory::default();
        history.push(&Image::filled(0, 4, [0; 4]));
        assert!(history.is_empty());
    }

    #[test]
    fn clear_resets_cursor() {
        let mut history = EditHistory::default();
        history.push(&state(1));
        history.push(&state(2));
        history.clear();
        assert!(history.is_empty());
        assert_eq!(history.current_index(), None);
        assert!(!history.can_undo());
    }
}
