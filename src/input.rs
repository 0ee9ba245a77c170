//! Input model: normalized host events, tools, modifiers, and the per-pointer
//! gesture state.
//!
//! Hosts translate their native events into the plain shapes defined here
//! (screen position, button, modifier flags, target). Nothing host-specific
//! crosses this boundary. Every event is validated before it reaches the
//! state machine; non-finite coordinates are rejected with [`InputError`].

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::element::{ElementBounds, ElementKey};
use crate::transform::Point;

/// Which tool mode is active. Affects how a primary press is interpreted and
/// which cursor the host should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Select and drag elements; pan on background with shift or middle button.
    #[default]
    Select,
    /// Every primary press pans the canvas.
    Pan,
    /// Every primary press zooms one step at the pointer.
    Zoom,
}

impl Tool {
    /// Map a single-letter shortcut (`v`, `h`, `z`) to a tool.
    #[must_use]
    pub fn from_shortcut(key: &str) -> Option<Self> {
        match key {
            "v" | "V" => Some(Self::Select),
            "h" | "H" => Some(Self::Pan),
            "z" | "Z" => Some(Self::Zoom),
            _ => None,
        }
    }
}

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Ctrl key is held.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

impl Modifiers {
    /// Ctrl on Windows/Linux or Cmd on macOS: the multi-select modifier.
    #[must_use]
    pub fn command(self) -> bool {
        self.ctrl || self.meta
    }

    /// Any modifier key is held.
    #[must_use]
    pub fn any(self) -> bool {
        self.shift || self.ctrl || self.alt || self.meta
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

impl Button {
    /// Map a DOM `MouseEvent.button` code.
    #[must_use]
    pub fn from_dom(code: i16) -> Self {
        match code {
            1 => Self::Middle,
            2 => Self::Secondary,
            _ => Self::Primary,
        }
    }
}

/// A keyboard key, as the browser's `KeyboardEvent.key` names it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    #[must_use]
    pub fn is(&self, name: &str) -> bool {
        self.0 == name
    }
}

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down).
    pub dy: f64,
}

/// Identifies one pointer device (mouse, pen, or a single touch contact).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct PointerId(pub i32);

/// What a pointer-down landed on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Target {
    /// Empty canvas background.
    Background,
    /// An element surface, with its bounds at press time.
    Element(ElementBounds),
}

/// Pointer press.
#[derive(Debug, Clone, Copy)]
pub struct PointerEvent {
    pub pointer_id: PointerId,
    /// Position relative to the host surface, in CSS pixels.
    pub screen: Point,
    pub button: Button,
    pub modifiers: Modifiers,
    pub target: Target,
}

impl PointerEvent {
    /// Primary-button press on the empty background.
    #[must_use]
    pub fn background(pointer_id: PointerId, screen: Point, button: Button, modifiers: Modifiers) -> Self {
        Self { pointer_id, screen, button, modifiers, target: Target::Background }
    }

    /// Press on an element surface.
    #[must_use]
    pub fn on_element(
        pointer_id: PointerId,
        screen: Point,
        button: Button,
        modifiers: Modifiers,
        bounds: ElementBounds,
    ) -> Self {
        Self { pointer_id, screen, button, modifiers, target: Target::Element(bounds) }
    }

    /// Reject non-finite coordinates or target bounds.
    ///
    /// # Errors
    ///
    /// Returns [`InputError`] naming the offending values.
    pub fn validate(&self) -> Result<(), InputError> {
        finite_point(self.screen)?;
        if let Target::Element(bounds) = self.target {
            if !bounds.is_finite() {
                return Err(InputError::NonFiniteBounds { key: bounds.key });
            }
        }
        Ok(())
    }
}

/// Pointer move, delivered from a document-level listener.
#[derive(Debug, Clone, Copy)]
pub struct PointerMove {
    pub pointer_id: PointerId,
    pub screen: Point,
}

/// Wheel tick at a screen position.
#[derive(Debug, Clone, Copy)]
pub struct WheelEvent {
    pub screen: Point,
    pub delta: WheelDelta,
}

impl WheelEvent {
    /// Reject non-finite position or delta.
    ///
    /// # Errors
    ///
    /// Returns [`InputError`] naming the offending values.
    pub fn validate(&self) -> Result<(), InputError> {
        finite_point(self.screen)?;
        if !(self.delta.dx.is_finite() && self.delta.dy.is_finite()) {
            return Err(InputError::NonFiniteDelta { dx: self.delta.dx, dy: self.delta.dy });
        }
        Ok(())
    }
}

/// A malformed event rejected at the normalization boundary.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InputError {
    #[error("non-finite pointer coordinate ({x}, {y})")]
    NonFiniteCoordinate { x: f64, y: f64 },
    #[error("non-finite wheel delta ({dx}, {dy})")]
    NonFiniteDelta { dx: f64, dy: f64 },
    #[error("non-finite viewport size {width}x{height}")]
    NonFiniteViewport { width: f64, height: f64 },
    #[error("non-finite bounds for element {key}")]
    NonFiniteBounds { key: ElementKey },
}

/// Pass `pt` through if both coordinates are finite.
///
/// # Errors
///
/// Returns [`InputError::NonFiniteCoordinate`] otherwise.
pub fn finite_point(pt: Point) -> Result<Point, InputError> {
    if pt.is_finite() { Ok(pt) } else { Err(InputError::NonFiniteCoordinate { x: pt.x, y: pt.y }) }
}

/// Persistent UI state visible to the renderer.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Currently active tool mode.
    pub tool: Tool,
    /// The pan-activation key is held down.
    pub pan_key_held: bool,
}

/// An open element drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    /// Element being dragged.
    pub key: ElementKey,
    /// Fixed vector from the element origin to the canvas-space press point.
    pub grab_offset: Point,
    /// Screen position of the press, used for the drag threshold.
    pub press_screen: Point,
}

/// Gesture state for one pointer device.
///
/// Each active variant carries the context needed to compute the next move.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// The canvas is being panned by dragging.
    Panning {
        /// Screen-space position of the previous pointer event, used to compute pan delta.
        last_screen: Point,
    },
    /// An element was pressed; the drag session is open but the pointer has
    /// not yet moved past the drag threshold.
    PendingDrag(DragSession),
    /// An element is following the pointer.
    Dragging(DragSession),
}

impl InputState {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    #[must_use]
    pub fn is_panning(&self) -> bool {
        matches!(self, Self::Panning { .. })
    }

    /// The open drag session, pending or moving.
    #[must_use]
    pub fn drag_session(&self) -> Option<&DragSession> {
        match self {
            Self::PendingDrag(session) | Self::Dragging(session) => Some(session),
            Self::Idle | Self::Panning { .. } => None,
        }
    }
}
