#![allow(clippy::float_cmp)]

use uuid::Uuid;

use super::*;

struct Card {
    id: Uuid,
    pos: (f64, f64),
    size: (f64, f64),
}

impl Element for Card {
    fn key(&self) -> ElementKey {
        self.id
    }

    fn bounds(&self) -> ElementBounds {
        ElementBounds::new(self.id, self.pos.0, self.pos.1, self.size.0, self.size.1)
    }
}

// =============================================================
// ElementBounds
// =============================================================

#[test]
fn origin_is_top_left() {
    let b = ElementBounds::new(Uuid::new_v4(), 40.0, 30.0, 10.0, 10.0);
    assert_eq!(b.origin(), Point::new(40.0, 30.0));
}

#[test]
fn corners_normalize_negative_size() {
    let b = ElementBounds::new(Uuid::new_v4(), 100.0, 100.0, -20.0, -30.0);
    let (min, max) = b.corners();
    assert_eq!(min, Point::new(80.0, 70.0));
    assert_eq!(max, Point::new(100.0, 100.0));
}

#[test]
fn contains_interior_and_edges() {
    let b = ElementBounds::new(Uuid::new_v4(), 0.0, 0.0, 100.0, 80.0);
    assert!(b.contains(Point::new(50.0, 40.0)));
    assert!(b.contains(Point::new(0.0, 0.0)));
    assert!(b.contains(Point::new(100.0, 80.0)));
    assert!(!b.contains(Point::new(100.1, 40.0)));
    assert!(!b.contains(Point::new(50.0, -0.1)));
}

#[test]
fn is_finite_detects_nan() {
    let mut b = ElementBounds::new(Uuid::new_v4(), 0.0, 0.0, 1.0, 1.0);
    assert!(b.is_finite());
    b.width = f64::NAN;
    assert!(!b.is_finite());
}

#[test]
fn bounds_serde_shape() {
    let key = Uuid::new_v4();
    let b = ElementBounds::new(key, 1.0, 2.0, 3.0, 4.0);
    let json = serde_json::to_value(b).unwrap();
    assert_eq!(json["key"], key.to_string());
    assert_eq!(json["width"], 3.0);
}

// =============================================================
// Element trait
// =============================================================

#[test]
fn custom_element_exposes_only_key_and_bounds() {
    let card = Card { id: Uuid::new_v4(), pos: (5.0, 6.0), size: (7.0, 8.0) };
    assert_eq!(card.bounds().key, card.key());
    assert_eq!(card.bounds().height, 8.0);
}

#[test]
fn bounds_are_their_own_element() {
    let b = ElementBounds::new(Uuid::new_v4(), 1.0, 1.0, 1.0, 1.0);
    assert_eq!(Element::key(&b), b.key);
    assert_eq!(Element::bounds(&b), b);
}

#[test]
fn references_are_elements() {
    let b = ElementBounds::new(Uuid::new_v4(), 1.0, 1.0, 1.0, 1.0);
    let r = &b;
    assert_eq!(Element::key(&r), b.key);
}
