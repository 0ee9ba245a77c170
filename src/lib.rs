//! Viewport and interaction engine for an infinite, pannable, zoomable canvas.
//!
//! The engine owns the canvas transform (scale and pan offset), decides which
//! elements are on screen, and turns normalized pointer, wheel and keyboard
//! input into pan, zoom, selection, hover and drag operations. It never owns
//! element content or positions: hosts pass element bounds in per query, and
//! drag moves come back out as [`engine::Action::ElementDragged`] plus an
//! optional callback. With the `wasm` feature the same engine is exported to
//! JavaScript.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`transform`] | Scale/offset state and screen/canvas conversions |
//! | [`viewport`] | Viewport size and visibility culling |
//! | [`element`] | Element keys, bounds, and the [`element::Element`] trait |
//! | [`selection`] | Selected set and hovered element |
//! | [`input`] | Input event types and the per-pointer gesture state |
//! | [`hit`] | Hit-testing against element bounds |
//! | [`render`] | Render adapter: culled, projected placements |
//! | [`config`] | Engine tuning loaded from JSON |
//! | [`consts`] | Shared numeric constants (zoom limits and steps) |

pub mod config;
pub mod consts;
pub mod element;
pub mod engine;
pub mod hit;
pub mod input;
pub mod render;
pub mod selection;
pub mod transform;
pub mod viewport;

#[cfg(feature = "wasm")]
pub mod wasm;
