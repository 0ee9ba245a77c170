//! Shared numeric constants for the viewport engine.

// ── Scale ───────────────────────────────────────────────────────

/// Smallest allowed transform scale.
pub const SCALE_MIN: f64 = 0.1;

/// Largest allowed transform scale.
pub const SCALE_MAX: f64 = 5.0;

// ── Zoom steps ──────────────────────────────────────────────────

/// Scale multiplier applied by one zoom-in step (wheel up, zoom tool click).
pub const ZOOM_IN_FACTOR: f64 = 1.1;

/// Scale multiplier applied by one zoom-out step (wheel down, alt + zoom tool click).
pub const ZOOM_OUT_FACTOR: f64 = 0.9;

// ── Keyboard ────────────────────────────────────────────────────

/// Key that forces the pan gesture while held (browser `KeyboardEvent.key` for Space).
pub const DEFAULT_PAN_KEY: &str = " ";
