#![warn(missing_docs)]
//! # rect-mosaic-viewport
//!
//! ## Purpose
//! Maps selections drawn on a scaled, letterboxed display of an image back to
//! source-image pixels, and maps image rectangles forward for overlays.
//!
//! ## Responsibilities
//! - Compute the aspect-preserving "contain" fit of an image in a viewport.
//! - Convert display points to image points, rejecting letterbox margins.
//! - Convert drag selections into clipped [`PixelRect`] values.
//! - Track an in-progress drag with [`RectSelector`].
//!
//! ## Data flow
//! Pointer events -> [`RectSelector`] -> [`ViewTransform::selection_to_image`]
//! -> mosaic engine. Stored selections -> [`ViewTransform::image_rect_to_display`]
//! -> overlay drawing after a resize.
//!
//! ## Ownership and lifetimes
//! All types are small `Copy` values; a new [`ViewTransform`] is computed
//! whenever the viewport or image size changes.
//!
//! ## Error model
//! Nothing here fails. Out-of-range points and degenerate selections are
//! reported as `None`, meaning "no selection".

use rect_mosaic_core::PixelRect;

/// Slack used when testing whether a point lies on the displayed image edge.
const EDGE_EPSILON: f64 = 1e-9;

/// Size of the on-screen area the image is drawn into.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewportSize {
    /// Viewport width in display units.
    pub width: u32,
    /// Viewport height in display units.
    pub height: u32,
}

impl ViewportSize {
    /// Creates a viewport size.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns `true` before layout, when either side is zero.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Point in viewport coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DisplayPoint {
    /// Horizontal position.
    pub x: f64,
    /// Vertical position.
    pub y: f64,
}

impl DisplayPoint {
    /// Creates a display point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Point in image-pixel coordinates, before rounding.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ImagePoint {
    /// Horizontal position.
    pub x: f64,
    /// Vertical position.
    pub y: f64,
}

impl ImagePoint {
    /// Creates an image point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Rectangle in viewport coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DisplayRect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl DisplayRect {
    /// Builds a normalized rectangle from two corners in any drag direction.
    pub fn from_corners(a: DisplayPoint, b: DisplayPoint) -> Self {
        let left = a.x.min(b.x);
        let top = a.y.min(b.y);
        Self {
            x: left,
            y: top,
            width: a.x.max(b.x) - left,
            height: a.y.max(b.y) - top,
        }
    }

    /// Top-left corner.
    pub fn top_left(&self) -> DisplayPoint {
        DisplayPoint::new(self.x, self.y)
    }

    /// Bottom-right corner.
    pub fn bottom_right(&self) -> DisplayPoint {
        DisplayPoint::new(self.x + self.width, self.y + self.height)
    }
}

/// Scale and offset of an image drawn with "contain" fit inside a viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    scale: f64,
    offset_x: f64,
    offset_y: f64,
    image_width: u32,
    image_height: u32,
}

impl ViewTransform {
    /// Computes the centered, aspect-preserving fit of an image.
    ///
    /// # Semantics
    /// `scale = min(Vw / Iw, Vh / Ih)` and the displayed image is centered, so
    /// one axis is letterboxed unless the aspect ratios match. A zero-sized
    /// viewport or image falls back to [`ViewTransform::identity`].
    pub fn fit(viewport: ViewportSize, image_width: u32, image_height: u32) -> Self {
        if viewport.is_empty() || image_width == 0 || image_height == 0 {
            return Self::identity(image_width, image_height);
        }

        let viewport_width = f64::from(viewport.width);
        let viewport_height = f64::from(viewport.height);
        let width = f64::from(image_width);
        let height = f64::from(image_height);

        let scale = (viewport_width / width).min(viewport_height / height);
        Self {
            scale,
            offset_x: (viewport_width - width * scale) / 2.0,
            offset_y: (viewport_height - height * scale) / 2.0,
            image_width,
            image_height,
        }
    }

    /// Native-resolution mapping with zero offset.
    pub fn identity(image_width: u32, image_height: u32) -> Self {
        Self {
            scale: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
            image_width,
            image_height,
        }
    }

    /// Display units per image pixel.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Offset of the displayed image's top-left corner in the viewport.
    pub fn offset(&self) -> DisplayPoint {
        DisplayPoint::new(self.offset_x, self.offset_y)
    }

    /// Area of the viewport covered by the image.
    pub fn displayed_rect(&self) -> DisplayRect {
        DisplayRect {
            x: self.offset_x,
            y: self.offset_y,
            width: f64::from(self.image_width) * self.scale,
            height: f64::from(self.image_height) * self.scale,
        }
    }

    /// Maps a viewport point to image coordinates.
    ///
    /// Returns `None` for points in the letterbox margins or beyond the
    /// viewport; such points are never clamped onto the image.
    pub fn display_to_image(&self, point: DisplayPoint) -> Option<ImagePoint> {
        let shown = self.displayed_rect();
        let inside_x = point.x >= shown.x - EDGE_EPSILON
            && point.x <= shown.x + shown.width + EDGE_EPSILON;
        let inside_y = point.y >= shown.y - EDGE_EPSILON
            && point.y <= shown.y + shown.height + EDGE_EPSILON;
        if !inside_x || !inside_y {
            return None;
        }

        Some(ImagePoint::new(
            (point.x - self.offset_x) / self.scale,
            (point.y - self.offset_y) / self.scale,
        ))
    }

    /// Maps an image point to viewport coordinates.
    pub fn image_to_display(&self, point: ImagePoint) -> DisplayPoint {
        DisplayPoint::new(
            point.x * self.scale + self.offset_x,
            point.y * self.scale + self.offset_y,
        )
    }

    /// Converts a drag between two viewport corners into an image rectangle.
    ///
    /// # Semantics
    /// The corners are normalized, mapped independently, rounded to whole
    /// pixels, re-normalized and clipped to the image. Returns `None` when
    /// either corner lies outside the displayed image or the clipped result
    /// has zero width or height.
    pub fn selection_to_image(&self, start: DisplayPoint, end: DisplayPoint) -> Option<PixelRect> {
        let drawn = DisplayRect::from_corners(start, end);
        let top_left = self.display_to_image(drawn.top_left())?;
        let bottom_right = self.display_to_image(drawn.bottom_right())?;

        PixelRect::from_corners(
            round_to_i32(top_left.x),
            round_to_i32(top_left.y),
            round_to_i32(bottom_right.x),
            round_to_i32(bottom_right.y),
        )
        .clip_to(self.image_width, self.image_height)
    }

    /// Maps an image rectangle to viewport coordinates for overlay drawing.
    pub fn image_rect_to_display(&self, rect: PixelRect) -> DisplayRect {
        let origin = self.image_to_display(ImagePoint::new(f64::from(rect.x), f64::from(rect.y)));
        DisplayRect {
            x: origin.x,
            y: origin.y,
            width: f64::from(rect.width) * self.scale,
            height: f64::from(rect.height) * self.scale,
        }
    }
}

fn round_to_i32(value: f64) -> i32 {
    value.round() as i32
}

/// Tracks one press-drag-release rectangle selection in viewport space.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RectSelector {
    anchor: Option<DisplayPoint>,
    current: Option<DisplayPoint>,
    selecting: bool,
}

impl RectSelector {
    /// Creates an idle selector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a drag at `point`.
    pub fn start(&mut self, point: DisplayPoint) {
        self.anchor = Some(point);
        self.current = Some(point);
        self.selecting = true;
    }

    /// Moves the free corner while a drag is active.
    pub fn update(&mut self, point: DisplayPoint) {
        if self.selecting {
            self.current = Some(point);
        }
    }

    /// Ends the drag at `point` and returns the drawn rectangle.
    ///
    /// Returns `None` when no drag was active.
    pub fn finish(&mut self, point: DisplayPoint) -> Option<DisplayRect> {
        if !self.selecting {
            return None;
        }
        self.current = Some(point);
        self.selecting = false;
        self.current_rect()
    }

    /// Drops any drag state.
    pub fn cancel(&mut self) {
        *self = Self::default();
    }

    /// Returns `true` while a drag is active.
    pub fn is_selecting(&self) -> bool {
        self.selecting
    }

    /// Drag corners as `(anchor, current)`.
    pub fn corners(&self) -> Option<(DisplayPoint, DisplayPoint)> {
        Some((self.anchor?, self.current?))
    }

    /// Normalized rectangle spanned by the drag so far.
    pub fn current_rect(&self) -> Option<DisplayRect> {
        self.corners()
            .map(|(anchor, current)| DisplayRect::from_corners(anchor, current))
    }
}
