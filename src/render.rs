//! Render adapter: tells the rendering layer what to draw and where.
//!
//! Each pass walks the host's elements in paint order, asks the culler whether
//! each one is on screen, and hands visible ones to a [`RenderSink`] with their
//! screen-space rectangle and selection/hover flags. It reads engine state and
//! never mutates it.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use crate::element::{Element, ElementKey};
use crate::engine::EngineCore;
use crate::viewport::{ScreenRect, Viewport};

/// Where and how one visible element should be drawn this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub key: ElementKey,
    /// Element bounds projected to screen pixels.
    pub screen: ScreenRect,
    pub selected: bool,
    pub hovered: bool,
}

/// Receives placements for visible elements, bottom first.
pub trait RenderSink {
    fn place(&mut self, placement: &Placement);
}

impl RenderSink for Vec<Placement> {
    fn place(&mut self, placement: &Placement) {
        self.push(*placement);
    }
}

/// Counts from one render pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Elements offered to the pass.
    pub considered: usize,
    /// Elements that passed culling and reached the sink.
    pub drawn: usize,
}

/// Cull `elements` against the current viewport and place the visible ones.
///
/// `elements` is in paint order; the sink sees survivors in the same order.
pub fn render_pass<I, S>(core: &EngineCore, elements: I, sink: &mut S) -> RenderStats
where
    I: IntoIterator,
    I::Item: Element,
    S: RenderSink + ?Sized,
{
    let transform = core.transform();
    let hovered = core.hovered_key();
    let mut stats = RenderStats::default();

    for element in elements {
        stats.considered += 1;
        let bounds = element.bounds();
        if !core.is_visible(&bounds) {
            continue;
        }
        let placement = Placement {
            key: bounds.key,
            screen: Viewport::project(&transform, &bounds),
            selected: core.selection.is_selected(&bounds.key),
            hovered: hovered == Some(bounds.key),
        };
        sink.place(&placement);
        stats.drawn += 1;
    }

    tracing::trace!(considered = stats.considered, drawn = stats.drawn, scale = transform.scale(), "render pass");
    stats
}

/// Collect the placements for one pass.
#[must_use]
pub fn placements<I>(core: &EngineCore, elements: I) -> Vec<Placement>
where
    I: IntoIterator,
    I::Item: Element,
{
    let mut out = Vec::new();
    render_pass(core, elements, &mut out);
    out
}
