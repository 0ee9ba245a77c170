//! Transform state: the shared scale + pan offset, and the coordinate mapping
//! derived from it.
//!
//! Canvas space is the unbounded logical plane elements live in. Screen space
//! is CSS pixels relative to the host surface's top-left corner. The mapping is
//! `screen = canvas * scale + offset`.
//!
//! All mutators are infallible. Out-of-range scales are clamped to the
//! configured [`ScaleBounds`]; non-finite inputs leave the transform untouched
//! so the clamping invariant can never be broken by a stray `NaN`.

#[cfg(test)]
#[path = "transform_test.rs"]
mod transform_test;

use serde::{Deserialize, Serialize};

use crate::consts::{SCALE_MAX, SCALE_MIN};

/// A point in either screen or canvas space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Both coordinates are finite (not `NaN` or infinite).
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance_to(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl std::ops::Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Inclusive `[min, max]` range the transform scale is clamped to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleBounds {
    pub min: f64,
    pub max: f64,
}

impl Default for ScaleBounds {
    fn default() -> Self {
        Self { min: SCALE_MIN, max: SCALE_MAX }
    }
}

impl ScaleBounds {
    /// Clamp `scale` into the range. Never panics, even for inverted bounds.
    #[must_use]
    pub fn clamp(self, scale: f64) -> f64 {
        scale.max(self.min).min(self.max)
    }
}

/// Scale and pan offset of the infinite canvas.
///
/// `offset_x` / `offset_y` are the screen position of the canvas origin, in CSS pixels.
/// `scale` is the zoom factor (1.0 = no zoom).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    scale: f64,
    offset_x: f64,
    offset_y: f64,
    #[serde(skip)]
    bounds: ScaleBounds,
}

impl Default for Transform {
    fn default() -> Self {
        Self::with_bounds(ScaleBounds::default())
    }
}

impl Transform {
    /// Identity transform with the default scale bounds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Identity transform clamped to `bounds`.
    #[must_use]
    pub fn with_bounds(bounds: ScaleBounds) -> Self {
        Self { scale: bounds.clamp(1.0), offset_x: 0.0, offset_y: 0.0, bounds }
    }

    // --- Accessors ---

    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    #[must_use]
    pub fn offset_x(&self) -> f64 {
        self.offset_x
    }

    #[must_use]
    pub fn offset_y(&self) -> f64 {
        self.offset_y
    }

    /// Screen position of the canvas origin.
    #[must_use]
    pub fn offset(&self) -> Point {
        Point::new(self.offset_x, self.offset_y)
    }

    #[must_use]
    pub fn bounds(&self) -> ScaleBounds {
        self.bounds
    }

    // --- Mutators ---

    /// Set the scale, clamped to the bounds. `NaN` is ignored.
    pub fn set_scale(&mut self, scale: f64) {
        if scale.is_nan() {
            return;
        }
        self.scale = self.bounds.clamp(scale);
    }

    /// Set the pan offset. Non-finite values are ignored.
    pub fn set_offset(&mut self, x: f64, y: f64) {
        if !(x.is_finite() && y.is_finite()) {
            return;
        }
        self.offset_x = x;
        self.offset_y = y;
    }

    /// Translate the canvas by a screen-space delta.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        if !(dx.is_finite() && dy.is_finite()) {
            return;
        }
        self.offset_x += dx;
        self.offset_y += dy;
    }

    /// Multiply the scale by `factor`, keeping the canvas point under `anchor`
    /// (screen space) fixed on screen.
    ///
    /// When the clamped scale does not change, the offset is left alone too.
    /// Zero, negative and non-finite factors are ignored.
    pub fn zoom_by(&mut self, factor: f64, anchor: Point) {
        if !factor.is_finite() || factor <= 0.0 || !anchor.is_finite() {
            return;
        }
        let new_scale = self.bounds.clamp(self.scale * factor);
        if (new_scale - self.scale).abs() < f64::EPSILON {
            return;
        }
        let change = new_scale / self.scale;
        self.offset_x = anchor.x - (anchor.x - self.offset_x) * change;
        self.offset_y = anchor.y - (anchor.y - self.offset_y) * change;
        self.scale = new_scale;
    }

    /// Restore `scale = 1`, `offset = (0, 0)`.
    pub fn reset(&mut self) {
        *self = Self::with_bounds(self.bounds);
    }

    /// Pan so that `canvas` lands on `screen`, keeping the current scale.
    pub fn center_on(&mut self, canvas: Point, screen: Point) {
        self.set_offset(screen.x - canvas.x * self.scale, screen.y - canvas.y * self.scale);
    }

    // --- Coordinate mapping ---

    /// Convert a screen-space point (CSS pixels) to canvas coordinates.
    #[must_use]
    pub fn screen_to_canvas(&self, screen: Point) -> Point {
        Point {
            x: (screen.x - self.offset_x) / self.scale,
            y: (screen.y - self.offset_y) / self.scale,
        }
    }

    /// Convert a canvas-space point to screen coordinates (CSS pixels).
    #[must_use]
    pub fn canvas_to_screen(&self, canvas: Point) -> Point {
        Point {
            x: canvas.x * self.scale + self.offset_x,
            y: canvas.y * self.scale + self.offset_y,
        }
    }

    /// Convert a screen-space distance (pixels) to canvas-space distance.
    #[must_use]
    pub fn screen_dist_to_canvas(&self, screen_dist: f64) -> f64 {
        screen_dist / self.scale
    }
}
