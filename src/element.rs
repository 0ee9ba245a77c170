//! Element capability interface.
//!
//! The engine never owns element content or positions. Hosts hand it
//! [`ElementBounds`] by value, or anything implementing [`Element`], whenever
//! a query or gesture needs geometry.

#[cfg(test)]
#[path = "element_test.rs"]
mod element_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::transform::Point;

/// Stable, opaque identifier for a positioned element.
pub type ElementKey = Uuid;

/// Axis-aligned bounds of an element in canvas space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElementBounds {
    /// Identifier of the element these bounds belong to.
    pub key: ElementKey,
    /// Left edge in canvas coordinates.
    pub x: f64,
    /// Top edge in canvas coordinates.
    pub y: f64,
    /// Width in canvas units.
    pub width: f64,
    /// Height in canvas units.
    pub height: f64,
}

impl ElementBounds {
    #[must_use]
    pub fn new(key: ElementKey, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { key, x, y, width, height }
    }

    /// Logical origin (top-left corner).
    #[must_use]
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Normalized `(min, max)` corners, tolerating negative width or height.
    #[must_use]
    pub fn corners(&self) -> (Point, Point) {
        let x2 = self.x + self.width;
        let y2 = self.y + self.height;
        (Point::new(self.x.min(x2), self.y.min(y2)), Point::new(self.x.max(x2), self.y.max(y2)))
    }

    /// Whether `pt` lies inside the bounds, edges included.
    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        let (min, max) = self.corners();
        pt.x >= min.x && pt.x <= max.x && pt.y >= min.y && pt.y <= max.y
    }

    /// All four values are finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.width.is_finite() && self.height.is_finite()
    }
}

/// Anything the engine can position, cull, and hit-test.
pub trait Element {
    /// Stable key of this element.
    fn key(&self) -> ElementKey;

    /// Current bounds in canvas space.
    fn bounds(&self) -> ElementBounds;
}

impl Element for ElementBounds {
    fn key(&self) -> ElementKey {
        self.key
    }

    fn bounds(&self) -> ElementBounds {
        *self
    }
}

impl<E: Element + ?Sized> Element for &E {
    fn key(&self) -> ElementKey {
        (**self).key()
    }

    fn bounds(&self) -> ElementBounds {
        (**self).bounds()
    }
}
