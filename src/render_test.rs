#![allow(clippy::float_cmp)]

use uuid::Uuid;

use super::*;
use crate::config::EngineConfig;
use crate::element::ElementBounds;
use crate::viewport::EdgePolicy;

fn bounds_at(x: f64, y: f64, w: f64, h: f64) -> ElementBounds {
    ElementBounds::new(Uuid::new_v4(), x, y, w, h)
}

fn core_800x600() -> EngineCore {
    let mut core = EngineCore::new();
    core.set_viewport_size(800.0, 600.0).unwrap();
    core
}

struct CountingSink {
    keys: Vec<ElementKey>,
}

impl RenderSink for CountingSink {
    fn place(&mut self, placement: &Placement) {
        self.keys.push(placement.key);
    }
}

// =============================================================
// Culling
// =============================================================

#[test]
fn offscreen_elements_are_skipped() {
    let core = core_800x600();
    let on = bounds_at(10.0, 10.0, 50.0, 50.0);
    let off = bounds_at(900.0, 10.0, 50.0, 50.0);

    let mut sink = CountingSink { keys: Vec::new() };
    let stats = render_pass(&core, [on, off], &mut sink);

    assert_eq!(stats, RenderStats { considered: 2, drawn: 1 });
    assert_eq!(sink.keys, vec![on.key]);
}

#[test]
fn edge_touching_element_follows_engine_policy() {
    let edge = bounds_at(800.0, 0.0, 20.0, 20.0);

    let core = core_800x600();
    assert!(placements(&core, [edge]).is_empty());

    let config = EngineConfig { edge_policy: EdgePolicy::Inclusive, ..Default::default() };
    let mut inclusive = EngineCore::with_config(config).unwrap();
    inclusive.set_viewport_size(800.0, 600.0).unwrap();
    assert_eq!(placements(&inclusive, [edge]).len(), 1);
}

#[test]
fn empty_viewport_draws_nothing() {
    let core = EngineCore::new();
    let stats = render_pass(&core, [bounds_at(0.0, 0.0, 10.0, 10.0)], &mut Vec::<Placement>::new());
    assert_eq!(stats.drawn, 0);
}

#[test]
fn pan_brings_element_into_view() {
    let mut core = core_800x600();
    let far = bounds_at(1000.0, 0.0, 50.0, 50.0);
    assert!(placements(&core, [far]).is_empty());
    core.pan_by(-300.0, 0.0);
    assert_eq!(placements(&core, [far]).len(), 1);
}

// =============================================================
// Placement contents
// =============================================================

#[test]
fn placement_is_projected_to_screen() {
    let mut core = core_800x600();
    core.set_scale(2.0);
    core.set_offset(10.0, 20.0);
    let b = bounds_at(5.0, 5.0, 50.0, 25.0);

    let out = placements(&core, [b]);

    assert_eq!(out[0].screen, ScreenRect { x: 20.0, y: 30.0, width: 100.0, height: 50.0 });
}

#[test]
fn placement_carries_selection_and_hover() {
    let mut core = core_800x600();
    let a = bounds_at(0.0, 0.0, 10.0, 10.0);
    let b = bounds_at(20.0, 0.0, 10.0, 10.0);
    core.select(a.key);
    core.set_hovered(Some(b.key));

    let out = placements(&core, [a, b]);

    assert!(out[0].selected && !out[0].hovered);
    assert!(!out[1].selected && out[1].hovered);
}

#[test]
fn paint_order_is_preserved() {
    let core = core_800x600();
    let elements: Vec<ElementBounds> = (0..5).map(|i| bounds_at(f64::from(i) * 20.0, 0.0, 10.0, 10.0)).collect();
    let out = placements(&core, &elements);
    let keys: Vec<ElementKey> = out.iter().map(|p| p.key).collect();
    let expected: Vec<ElementKey> = elements.iter().map(|b| b.key).collect();
    assert_eq!(keys, expected);
}

#[test]
fn non_finite_bounds_are_culled() {
    let core = core_800x600();
    let bad = bounds_at(f64::NAN, 0.0, 10.0, 10.0);
    let stats = render_pass(&core, [bad], &mut Vec::<Placement>::new());
    assert_eq!(stats, RenderStats { considered: 1, drawn: 0 });
}
