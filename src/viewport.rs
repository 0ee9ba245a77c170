//! Viewport size and visibility culling.
//!
//! The culler projects an element's canvas bounds to screen space and tests
//! them against `[0, width] × [0, height]`. Which edges count as overlap is
//! decided by a single [`EdgePolicy`] held by the engine, so every call site
//! agrees on the boundary pixel.

#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use serde::{Deserialize, Serialize};

use crate::element::ElementBounds;
use crate::transform::{Point, Transform};

/// How a box that only touches a viewport edge is classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgePolicy {
    /// Open-interval test: zero-overlap contact with an edge is not visible.
    #[default]
    Exclusive,
    /// Closed-interval test: touching an edge counts as visible.
    Inclusive,
}

/// Size of the host surface in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

/// A screen-space rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Screen-space centre of the viewport.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.width * 0.5, self.height * 0.5)
    }

    /// Project canvas bounds to a normalized screen rectangle.
    #[must_use]
    pub fn project(transform: &Transform, bounds: &ElementBounds) -> ScreenRect {
        let (min, max) = bounds.corners();
        let a = transform.canvas_to_screen(min);
        let b = transform.canvas_to_screen(max);
        ScreenRect { x: a.x, y: a.y, width: b.x - a.x, height: b.y - a.y }
    }

    /// Whether `bounds` intersects the visible region under `transform`.
    #[must_use]
    pub fn is_visible(&self, transform: &Transform, bounds: &ElementBounds, policy: EdgePolicy) -> bool {
        if !bounds.is_finite() {
            return false;
        }
        let r = Self::project(transform, bounds);
        let (left, top, right, bottom) = (r.x, r.y, r.x + r.width, r.y + r.height);
        match policy {
            EdgePolicy::Exclusive => left < self.width && right > 0.0 && top < self.height && bottom > 0.0,
            EdgePolicy::Inclusive => left <= self.width && right >= 0.0 && top <= self.height && bottom >= 0.0,
        }
    }

    /// The canvas-space region currently on screen, as `(top_left, bottom_right)`.
    #[must_use]
    pub fn visible_canvas_rect(&self, transform: &Transform) -> (Point, Point) {
        (
            transform.screen_to_canvas(Point::new(0.0, 0.0)),
            transform.screen_to_canvas(Point::new(self.width, self.height)),
        )
    }
}
