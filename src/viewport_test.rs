#![allow(clippy::float_cmp)]

use uuid::Uuid;

use super::*;

fn bounds_at(x: f64, y: f64, w: f64, h: f64) -> ElementBounds {
    ElementBounds::new(Uuid::new_v4(), x, y, w, h)
}

fn vp() -> Viewport {
    Viewport::new(800.0, 600.0)
}

fn visible(t: &Transform, b: &ElementBounds) -> bool {
    vp().is_visible(t, b, EdgePolicy::Exclusive)
}

// =============================================================
// Viewport basics
// =============================================================

#[test]
fn default_viewport_is_zero() {
    let v = Viewport::default();
    assert_eq!(v.width, 0.0);
    assert_eq!(v.height, 0.0);
}

#[test]
fn center_is_half_size() {
    assert_eq!(vp().center(), Point::new(400.0, 300.0));
}

#[test]
fn edge_policy_default_is_exclusive() {
    assert_eq!(EdgePolicy::default(), EdgePolicy::Exclusive);
}

#[test]
fn edge_policy_serde_lowercase() {
    let p: EdgePolicy = serde_json::from_str("\"inclusive\"").unwrap();
    assert_eq!(p, EdgePolicy::Inclusive);
}

// =============================================================
// Culling at identity
// =============================================================

#[test]
fn box_matching_viewport_is_visible() {
    let t = Transform::new();
    assert!(visible(&t, &bounds_at(0.0, 0.0, 800.0, 600.0)));
}

#[test]
fn box_inside_is_visible() {
    let t = Transform::new();
    assert!(visible(&t, &bounds_at(100.0, 100.0, 50.0, 50.0)));
}

#[test]
fn box_one_pixel_outside_each_edge_is_hidden() {
    let t = Transform::new();
    assert!(!visible(&t, &bounds_at(801.0, 100.0, 50.0, 50.0)));
    assert!(!visible(&t, &bounds_at(-51.0, 100.0, 50.0, 50.0)));
    assert!(!visible(&t, &bounds_at(100.0, 601.0, 50.0, 50.0)));
    assert!(!visible(&t, &bounds_at(100.0, -51.0, 50.0, 50.0)));
}

#[test]
fn box_touching_edge_is_hidden_when_exclusive() {
    let t = Transform::new();
    assert!(!visible(&t, &bounds_at(800.0, 100.0, 50.0, 50.0)));
    assert!(!visible(&t, &bounds_at(-50.0, 100.0, 50.0, 50.0)));
}

#[test]
fn box_touching_edge_is_visible_when_inclusive() {
    let t = Transform::new();
    assert!(vp().is_visible(&t, &bounds_at(800.0, 100.0, 50.0, 50.0), EdgePolicy::Inclusive));
    assert!(vp().is_visible(&t, &bounds_at(-50.0, 100.0, 50.0, 50.0), EdgePolicy::Inclusive));
}

#[test]
fn box_partially_overlapping_is_visible() {
    let t = Transform::new();
    assert!(visible(&t, &bounds_at(790.0, 590.0, 50.0, 50.0)));
}

#[test]
fn box_larger_than_viewport_is_visible() {
    let t = Transform::new();
    assert!(visible(&t, &bounds_at(-1000.0, -1000.0, 5000.0, 5000.0)));
}

#[test]
fn negative_size_box_is_normalized() {
    let t = Transform::new();
    assert!(visible(&t, &bounds_at(150.0, 150.0, -50.0, -50.0)));
}

#[test]
fn non_finite_box_is_hidden() {
    let t = Transform::new();
    assert!(!visible(&t, &bounds_at(f64::NAN, 0.0, 10.0, 10.0)));
}

#[test]
fn zero_viewport_shows_nothing() {
    let t = Transform::new();
    let v = Viewport::default();
    assert!(!v.is_visible(&t, &bounds_at(0.0, 0.0, 10.0, 10.0), EdgePolicy::Exclusive));
}

// =============================================================
// Culling under transform
// =============================================================

#[test]
fn pan_brings_box_into_view() {
    let mut t = Transform::new();
    let b = bounds_at(1000.0, 0.0, 50.0, 50.0);
    assert!(!visible(&t, &b));
    t.pan_by(-300.0, 0.0);
    assert!(visible(&t, &b));
}

#[test]
fn zoom_out_brings_box_into_view() {
    let mut t = Transform::new();
    let b = bounds_at(1000.0, 100.0, 50.0, 50.0);
    t.set_scale(0.5);
    assert!(visible(&t, &b));
}

#[test]
fn zoom_in_pushes_box_out_of_view() {
    let mut t = Transform::new();
    let b = bounds_at(700.0, 100.0, 50.0, 50.0);
    t.set_scale(2.0);
    assert!(!visible(&t, &b));
}

// =============================================================
// Projection and visible region
// =============================================================

#[test]
fn project_applies_scale_and_offset() {
    let mut t = Transform::new();
    t.set_scale(2.0);
    t.set_offset(10.0, 20.0);
    let r = Viewport::project(&t, &bounds_at(5.0, 5.0, 10.0, 20.0));
    assert_eq!(r, ScreenRect { x: 20.0, y: 30.0, width: 20.0, height: 40.0 });
}

#[test]
fn visible_canvas_rect_at_scale_two() {
    let mut t = Transform::new();
    t.set_scale(2.0);
    t.set_offset(-100.0, -50.0);
    let (tl, br) = vp().visible_canvas_rect(&t);
    assert_eq!(tl, Point::new(50.0, 25.0));
    assert_eq!(br, Point::new(450.0, 325.0));
}
