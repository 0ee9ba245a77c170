#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::element::{Element, ElementBounds};
use crate::transform::{Point, Transform};

/// Topmost element whose bounds contain `canvas_pt`, edges included.
///
/// `elements` is in paint order (bottom first), so the last match wins.
#[must_use]
pub fn hit_test<I>(canvas_pt: Point, elements: I) -> Option<ElementBounds>
where
    I: IntoIterator,
    I::Item: Element,
{
    elements
        .into_iter()
        .map(|e| e.bounds())
        .filter(|b| b.contains(canvas_pt))
        .last()
}

/// [`hit_test`] for a screen-space point.
#[must_use]
pub fn hit_test_screen<I>(transform: &Transform, screen_pt: Point, elements: I) -> Option<ElementBounds>
where
    I: IntoIterator,
    I::Item: Element,
{
    hit_test(transform.screen_to_canvas(screen_pt), elements)
}
