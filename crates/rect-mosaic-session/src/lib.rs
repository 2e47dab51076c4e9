#![warn(missing_docs)]
//! # rect-mosaic-session
//!
//! ## Purpose
//! Owns the state of one interactive editing session: the current image,
//! its edit history, the mosaic parameters and the pending selection.
//!
//! ## Responsibilities
//! - Replace the image on open and seed the history with it.
//! - Turn drag gestures on the scaled display into image selections.
//! - Apply the mosaic to the selection and commit the result to history.
//! - Expose guard checks (`can_apply`, `can_undo`, `can_redo`) for the shell.
//!
//! ## Data flow
//! Shell events -> [`EditorSession`] -> viewport mapping -> mosaic engine ->
//! edit history -> [`EditorSession::image`] rendered by the shell.
//!
//! ## Ownership and lifetimes
//! The session is an explicit context object owned by one caller. It holds
//! the only [`EditHistory`] for its image; nothing here is global.
//!
//! ## Error model
//! This crate favors explicit state over recoverable errors. Actions that
//! cannot run (no image, no selection, history boundary) return `false` or
//! `None` and change nothing.

use std::path::{Path, PathBuf};

use log::debug;
use rect_mosaic_core::{Image, MosaicParams, PixelRect};
use rect_mosaic_engine::apply_mosaic_with;
use rect_mosaic_history::{EditHistory, HistoryError};
use rect_mosaic_viewport::{DisplayPoint, DisplayRect, RectSelector, ViewTransform, ViewportSize};

/// State of one editing session.
#[derive(Debug, Clone)]
pub struct EditorSession {
    image: Option<Image>,
    source_path: Option<PathBuf>,
    history: EditHistory,
    params: MosaicParams,
    viewport: ViewportSize,
    selector: RectSelector,
    selection: Option<PixelRect>,
}

impl EditorSession {
    /// Creates an empty session whose history keeps `history_capacity` states.
    ///
    /// # Errors
    /// Returns [`HistoryError::InvalidCapacity`] when `history_capacity == 0`.
    pub fn new(history_capacity: usize) -> Result<Self, HistoryError> {
        Ok(Self::with_history(EditHistory::new(history_capacity)?))
    }

    fn with_history(history: EditHistory) -> Self {
        Self {
            image: None,
            source_path: None,
            history,
            params: MosaicParams::default(),
            viewport: ViewportSize::default(),
            selector: RectSelector::new(),
            selection: None,
        }
    }

    /// Replaces the current image, resets history and selection, and commits
    /// the loaded image as the first history state.
    pub fn open(&mut self, image: Image, source_path: Option<PathBuf>) {
        debug!("opening {}x{} image", image.width, image.height);
        self.history.clear();
        self.history.push(&image);
        self.image = Some(image);
        self.source_path = source_path;
        self.clear_selection();
    }

    /// Discards the image, history and selection.
    pub fn close(&mut self) {
        self.image = None;
        self.source_path = None;
        self.history.clear();
        self.clear_selection();
    }

    /// Current image, if one is open.
    pub fn image(&self) -> Option<&Image> {
        self.image.as_ref()
    }

    /// File the current image was opened from.
    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    /// Returns `true` when an image is open.
    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    /// Current mosaic parameters.
    pub fn params(&self) -> MosaicParams {
        self.params
    }

    /// Replaces all mosaic parameters at once.
    pub fn set_params(&mut self, params: MosaicParams) {
        self.params = params;
    }

    /// Sets the block size (clamped to the supported range).
    pub fn set_block_size(&mut self, block_size: u32) {
        self.params.set_block_size(block_size);
    }

    /// Sets the intensity from the 1-10 scale.
    pub fn set_intensity_level(&mut self, level: u8) {
        self.params.set_intensity_level(level);
    }

    /// Records the size of the area the image is displayed in.
    pub fn set_viewport(&mut self, viewport: ViewportSize) {
        self.viewport = viewport;
    }

    /// Fit of the current image in the current viewport.
    pub fn view_transform(&self) -> Option<ViewTransform> {
        self.image
            .as_ref()
            .map(|image| ViewTransform::fit(self.viewport, image.width, image.height))
    }

    /// Starts a drag selection at a viewport point.
    pub fn begin_drag(&mut self, point: DisplayPoint) {
        if self.has_image() {
            self.selector.start(point);
        }
    }

    /// Moves the free corner of the active drag.
    pub fn drag_to(&mut self, point: DisplayPoint) {
        self.selector.update(point);
    }

    /// Rectangle currently being dragged, in viewport coordinates.
    pub fn drag_rect(&self) -> Option<DisplayRect> {
        if self.selector.is_selecting() {
            self.selector.current_rect()
        } else {
            None
        }
    }

    /// Ends the drag and stores the mapped image selection.
    ///
    /// Returns the new selection, or `None` when the drag was degenerate or
    /// touched the letterbox margins; in that case any previous selection is
    /// cleared.
    pub fn end_drag(&mut self, point: DisplayPoint) -> Option<PixelRect> {
        self.selector.finish(point)?;
        let (start, end) = self.selector.corners()?;
        self.selection = self
            .view_transform()
            .and_then(|transform| transform.selection_to_image(start, end));
        self.selection
    }

    /// Selects an image-space rectangle directly.
    ///
    /// The rectangle is kept as given so the mosaic grid stays anchored at
    /// its own origin; it is rejected only when it misses the image.
    pub fn select(&mut self, rect: PixelRect) -> Option<PixelRect> {
        self.selection = self
            .image
            .as_ref()
            .and_then(|image| rect.clip_to(image.width, image.height))
            .map(|_| rect);
        self.selection
    }

    /// Pending selection in image coordinates.
    pub fn selection(&self) -> Option<PixelRect> {
        self.selection
    }

    /// Visible part of the pending selection mapped back to the viewport for
    /// overlay drawing.
    pub fn selection_overlay(&self) -> Option<DisplayRect> {
        let image = self.image.as_ref()?;
        let visible = self.selection?.clip_to(image.width, image.height)?;
        self.view_transform()
            .map(|transform| transform.image_rect_to_display(visible))
    }

    /// Drops the pending selection and any active drag.
    pub fn clear_selection(&mut self) {
        self.selection = None;
        self.selector.cancel();
    }

    /// Returns `true` when an image is open and a selection is pending.
    pub fn can_apply(&self) -> bool {
        self.image.is_some() && self.selection.is_some()
    }

    /// Applies the mosaic to the pending selection and commits the result.
    ///
    /// Returns `false` without side effects when there is nothing to apply.
    pub fn apply_mosaic(&mut self) -> bool {
        let (Some(image), Some(selection)) = (self.image.as_ref(), self.selection) else {
            return false;
        };

        let updated = apply_mosaic_with(image, Some(selection), &self.params);
        self.history.push(&updated);
        self.image = Some(updated);
        self.clear_selection();
        debug!(
            "applied mosaic to {selection:?} (block {}, intensity {})",
            self.params.block_size(),
            self.params.intensity()
        );
        true
    }

    /// Returns `true` when an earlier state exists.
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Returns `true` when an undone state can be restored.
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Restores the previous state. Returns `false` at the history start.
    pub fn undo(&mut self) -> bool {
        self.restore(|history| history.undo())
    }

    /// Restores the next state. Returns `false` at the history end.
    pub fn redo(&mut self) -> bool {
        self.restore(|history| history.redo())
    }

    fn restore(&mut self, step: impl FnOnce(&mut EditHistory) -> Option<Image>) -> bool {
        match step(&mut self.history) {
            Some(image) => {
                self.image = Some(image);
                self.clear_selection();
                true
            }
            None => false,
        }
    }

    /// Read access to the edit history.
    pub fn history(&self) -> &EditHistory {
        &self.history
    }
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::with_history(EditHistory::default())
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for session guards and selection handling.

    use super::*;

    fn session_with_image() -> EditorSession {
        let mut session = EditorSession::default();
        session.open(Image::filled(800, 400, [10, 20, 30, 255]), None);
        session.set_viewport(ViewportSize::new(400, 300));
        session
    }

    #[test]
    fn empty_session_cannot_act() {
        let mut session = EditorSession::default();
        assert!(!session.has_image());
        assert!(!session.can_apply());
        assert!(!session.apply_mosaic());
        assert!(!session.undo());
        assert_eq!(session.select(PixelRect::new(0, 0, 5, 5)), None);

        session.begin_drag(DisplayPoint::new(1.0, 1.0));
        assert_eq!(session.end_drag(DisplayPoint::new(5.0, 5.0)), None);
    }

    #[test]
    fn open_seeds_history_with_loaded_image() {
        let session = session_with_image();
        assert_eq!(session.history().len(), 1);
        assert!(!session.can_undo());
        assert!(!session.can_redo());
    }

    #[test]
    fn drag_maps_through_letterbox() {
        let mut session = session_with_image();
        session.begin_drag(DisplayPoint::new(150.0, 110.0));
        session.drag_to(DisplayPoint::new(100.0, 100.0));
        assert!(session.drag_rect().is_some());

        let selection = session.end_drag(DisplayPoint::new(50.0, 60.0));
        assert_eq!(selection, Some(PixelRect::new(100, 20, 200, 100)));
        assert!(session.can_apply());
        assert!(session.drag_rect().is_none());

        let overlay = session.selection_overlay().expect("overlay should map");
        assert_eq!((overlay.x, overlay.y, overlay.width, overlay.height), (50.0, 60.0, 100.0, 50.0));
    }

    #[test]
    fn margin_drag_clears_selection() {
        let mut session = session_with_image();
        session.select(PixelRect::new(0, 0, 10, 10));

        session.begin_drag(DisplayPoint::new(10.0, 10.0));
        assert_eq!(session.end_drag(DisplayPoint::new(100.0, 100.0)), None);
        assert!(!session.can_apply());
    }

    #[test]
    fn select_keeps_unclipped_rect_that_overlaps_image() {
        let mut session = session_with_image();
        let rect = PixelRect::new(-10, -20, 50, 60);
        assert_eq!(session.select(rect), Some(rect));

        let overlay = session.selection_overlay().expect("overlay should map");
        assert_eq!((overlay.x, overlay.y, overlay.width, overlay.height), (0.0, 50.0, 20.0, 20.0));

        assert_eq!(session.select(PixelRect::new(900, 0, 10, 10)), None);
        assert!(!session.can_apply());
    }

    #[test]
    fn parameters_are_clamped() {
        let mut session = EditorSession::default();
        session.set_block_size(1_000);
        session.set_intensity_level(0);
        assert_eq!(session.params().block_size(), 100);
        assert!((session.params().intensity() - 0.1).abs() < f32::EPSILON);
    }
}
