use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::config::{ConfigError, EngineConfig};
use crate::element::{ElementBounds, ElementKey};
use crate::input::{
    Button, DragSession, InputError, InputState, Key, Modifiers, PointerEvent, PointerId, PointerMove, Target,
    Tool, UiState, WheelEvent, finite_point,
};
use crate::selection::Selection;
use crate::transform::{Point, Transform};
use crate::viewport::Viewport;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Cursor hint for the host surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Cursor {
    Default,
    Grab,
    Grabbing,
    ZoomIn,
    ZoomOut,
    Move,
}

impl Cursor {
    /// CSS `cursor` property value.
    #[must_use]
    pub fn css(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Grab => "grab",
            Self::Grabbing => "grabbing",
            Self::ZoomIn => "zoom-in",
            Self::ZoomOut => "zoom-out",
            Self::Move => "move",
        }
    }
}

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum Action {
    /// The dragged element's new canvas origin. The content owner applies it.
    ElementDragged { key: ElementKey, x: f64, y: f64 },
    /// A drag that moved the element has finished. Positions are never rolled back.
    DragEnded { key: ElementKey, cancelled: bool },
    SetCursor(Cursor),
    /// Transform, selection, or hover changed.
    RenderNeeded,
}

/// Core engine state: transform, viewport, selection, and per-pointer gestures.
///
/// All logic lives here, independent of any host, so it can be tested in
/// isolation. This is the single writer of transform and selection state.
pub struct EngineCore {
    pub transform: Transform,
    pub viewport: Viewport,
    pub selection: Selection,
    pub ui: UiState,
    gestures: HashMap<PointerId, InputState>,
    config: EngineConfig,
}

impl Default for EngineCore {
    fn default() -> Self {
        let config = EngineConfig::default();
        Self {
            transform: Transform::with_bounds(config.scale_bounds()),
            viewport: Viewport::default(),
            selection: Selection::new(),
            ui: UiState::default(),
            gestures: HashMap::new(),
            config,
        }
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an engine from a custom config.
    ///
    /// # Errors
    ///
    /// Returns the config's validation error.
    pub fn with_config(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { transform: Transform::with_bounds(config.scale_bounds()), config, ..Self::default() })
    }

    // --- Queries ---

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The current transform, by value.
    #[must_use]
    pub fn transform(&self) -> Transform {
        self.transform
    }

    #[must_use]
    pub fn screen_to_canvas(&self, screen: Point) -> Point {
        self.transform.screen_to_canvas(screen)
    }

    #[must_use]
    pub fn canvas_to_screen(&self, canvas: Point) -> Point {
        self.transform.canvas_to_screen(canvas)
    }

    /// Whether `bounds` is on screen under the configured edge policy.
    #[must_use]
    pub fn is_visible(&self, bounds: &ElementBounds) -> bool {
        self.viewport.is_visible(&self.transform, bounds, self.config.edge_policy)
    }

    #[must_use]
    pub fn selected_keys(&self) -> &HashSet<ElementKey> {
        self.selection.selected_keys()
    }

    #[must_use]
    pub fn hovered_key(&self) -> Option<ElementKey> {
        self.selection.hovered_key()
    }

    #[must_use]
    pub fn tool(&self) -> Tool {
        self.ui.tool
    }

    /// Gesture state of one pointer. Pointers without a gesture are idle.
    #[must_use]
    pub fn input_state(&self, pointer: PointerId) -> InputState {
        self.gestures.get(&pointer).copied().unwrap_or_default()
    }

    /// Any pointer has an open drag session (pending or moving).
    #[must_use]
    pub fn has_drag_session(&self) -> bool {
        self.gestures.values().any(|s| s.drag_session().is_some())
    }

    /// Some pointer holds a drag session on `key`.
    #[must_use]
    pub fn is_dragging(&self, key: &ElementKey) -> bool {
        self.gestures.values().any(|s| s.drag_session().is_some_and(|d| d.key == *key))
    }

    /// Cursor the host should currently show.
    #[must_use]
    pub fn cursor(&self) -> Cursor {
        if self.gestures.values().any(InputState::is_panning) {
            Cursor::Grabbing
        } else if self.gestures.values().any(|s| matches!(s, InputState::Dragging(_))) {
            Cursor::Move
        } else {
            self.idle_cursor()
        }
    }

    // --- Transform mutations ---

    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.transform.pan_by(dx, dy);
    }

    pub fn zoom_by(&mut self, factor: f64, anchor: Point) {
        self.transform.zoom_by(factor, anchor);
    }

    pub fn set_scale(&mut self, scale: f64) {
        self.transform.set_scale(scale);
    }

    pub fn set_offset(&mut self, x: f64, y: f64) {
        self.transform.set_offset(x, y);
    }

    pub fn reset_transform(&mut self) {
        self.transform.reset();
    }

    /// Re-apply a saved transform through the clamping mutators.
    pub fn restore_transform(&mut self, snapshot: &Transform) {
        self.transform.set_scale(snapshot.scale());
        self.transform.set_offset(snapshot.offset_x(), snapshot.offset_y());
    }

    /// Pan so that `canvas` sits at the viewport centre.
    pub fn center_on(&mut self, canvas: Point) {
        self.transform.center_on(canvas, self.viewport.center());
    }

    /// Zoom anchored at the viewport centre.
    pub fn zoom_about_center(&mut self, factor: f64) {
        self.transform.zoom_by(factor, self.viewport.center());
    }

    /// Mirror the host surface size. Negative sizes are treated as zero.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::NonFiniteViewport`] and leaves the viewport unchanged.
    pub fn set_viewport_size(&mut self, width: f64, height: f64) -> Result<(), InputError> {
        if !(width.is_finite() && height.is_finite()) {
            return Err(InputError::NonFiniteViewport { width, height });
        }
        self.viewport = Viewport::new(width.max(0.0), height.max(0.0));
        Ok(())
    }

    // --- Selection mutations ---

    pub fn select(&mut self, key: ElementKey) {
        self.selection.select(key);
    }

    pub fn select_multiple<I>(&mut self, keys: I)
    where
        I: IntoIterator<Item = ElementKey>,
    {
        self.selection.select_multiple(keys);
    }

    pub fn deselect(&mut self, key: &ElementKey) {
        self.selection.deselect(key);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn set_hovered(&mut self, key: Option<ElementKey>) {
        self.selection.set_hovered(key);
    }

    /// Switch tool mode. Returns the new cursor hint.
    pub fn set_tool(&mut self, tool: Tool) -> Vec<Action> {
        self.ui.tool = tool;
        vec![Action::SetCursor(self.cursor())]
    }

    // --- Pointer input ---

    /// Handle a pointer press on the background or an element surface.
    ///
    /// A press on a pointer that still holds a gesture cancels that gesture
    /// first; its actions come ahead of the new press's.
    ///
    /// # Errors
    ///
    /// Rejects non-finite coordinates or bounds before touching any state.
    pub fn on_pointer_down(&mut self, ev: PointerEvent) -> Result<Vec<Action>, InputError> {
        ev.validate()?;

        // Last gesture wins on one pointer.
        let mut actions = Vec::new();
        if let Some(active) = self.gestures.get(&ev.pointer_id) {
            tracing::debug!(pointer = ev.pointer_id.0, state = ?active, "press supersedes active gesture");
            actions = self.end_gesture(ev.pointer_id, true);
        }

        let pressed = match ev.button {
            Button::Secondary => Vec::new(),
            Button::Middle => self.start_pan(ev.pointer_id, ev.screen),
            Button::Primary => {
                if self.ui.pan_key_held || self.ui.tool == Tool::Pan {
                    self.start_pan(ev.pointer_id, ev.screen)
                } else if self.ui.tool == Tool::Zoom {
                    self.zoom_step(ev.screen, !ev.modifiers.alt)
                } else {
                    match ev.target {
                        Target::Background => self.press_background(ev.pointer_id, ev.screen, ev.modifiers),
                        Target::Element(bounds) => {
                            self.press_element(ev.pointer_id, ev.screen, ev.modifiers, &bounds)
                        }
                    }
                }
            }
        };
        actions.extend(pressed);
        Ok(actions)
    }

    /// Handle a pointer move from the document-level listener.
    ///
    /// # Errors
    ///
    /// Rejects non-finite coordinates before touching any state.
    pub fn on_pointer_move(&mut self, mv: PointerMove) -> Result<Vec<Action>, InputError> {
        let screen = finite_point(mv.screen)?;
        let Some(state) = self.gestures.get(&mv.pointer_id).copied() else {
            return Ok(Vec::new());
        };

        let actions = match state {
            InputState::Idle => Vec::new(),
            InputState::Panning { last_screen } => {
                let (dx, dy) = (screen.x - last_screen.x, screen.y - last_screen.y);
                self.gestures.insert(mv.pointer_id, InputState::Panning { last_screen: screen });
                if dx == 0.0 && dy == 0.0 {
                    Vec::new()
                } else {
                    self.transform.pan_by(dx, dy);
                    tracing::trace!(pointer = mv.pointer_id.0, dx, dy, "pan");
                    vec![Action::RenderNeeded]
                }
            }
            InputState::PendingDrag(session) => {
                if screen.distance_to(session.press_screen) < self.config.drag_threshold_px {
                    Vec::new()
                } else {
                    self.gestures.insert(mv.pointer_id, InputState::Dragging(session));
                    tracing::debug!(pointer = mv.pointer_id.0, key = %session.key, "drag started");
                    vec![Action::SetCursor(Cursor::Move), self.drag_to(&session, screen)]
                }
            }
            InputState::Dragging(session) => vec![self.drag_to(&session, screen)],
        };
        Ok(actions)
    }

    /// Pointer released anywhere. Ends whatever gesture the pointer holds.
    pub fn on_pointer_up(&mut self, pointer: PointerId) -> Vec<Action> {
        self.end_gesture(pointer, false)
    }

    /// Pointer capture lost. Ends the gesture without rolling anything back.
    pub fn on_pointer_cancel(&mut self, pointer: PointerId) -> Vec<Action> {
        self.end_gesture(pointer, true)
    }

    /// Pointer left the canvas surface. Ends a pan; drags keep following the pointer.
    pub fn on_surface_leave(&mut self, pointer: PointerId) -> Vec<Action> {
        if self.input_state(pointer).is_panning() {
            self.end_gesture(pointer, false)
        } else {
            Vec::new()
        }
    }

    /// Pointer entered an element surface. Suppressed while any drag session is open.
    pub fn on_element_enter(&mut self, key: ElementKey) -> Vec<Action> {
        if self.has_drag_session() || self.selection.hovered_key() == Some(key) {
            return Vec::new();
        }
        self.selection.set_hovered(Some(key));
        vec![Action::RenderNeeded]
    }

    /// Pointer left an element surface. Ignored while that element is being dragged.
    pub fn on_element_leave(&mut self, key: ElementKey) -> Vec<Action> {
        if self.is_dragging(&key) || self.selection.hovered_key() != Some(key) {
            return Vec::new();
        }
        self.selection.set_hovered(None);
        vec![Action::RenderNeeded]
    }

    /// One wheel tick zooms toward the cursor. Independent of gesture state.
    ///
    /// # Errors
    ///
    /// Rejects non-finite position or delta before touching any state.
    pub fn on_wheel(&mut self, ev: WheelEvent) -> Result<Vec<Action>, InputError> {
        ev.validate()?;
        if ev.delta.dy == 0.0 {
            return Ok(Vec::new());
        }
        Ok(self.zoom_step(ev.screen, ev.delta.dy < 0.0))
    }

    // --- Keyboard / focus ---

    pub fn on_key_down(&mut self, key: &Key, modifiers: Modifiers) -> Vec<Action> {
        if key.is(&self.config.pan_key) {
            if self.ui.pan_key_held {
                return Vec::new();
            }
            self.ui.pan_key_held = true;
            return vec![Action::SetCursor(self.cursor())];
        }

        if key.is("Escape") {
            return if self.gestures.is_empty() {
                self.clear_with_render()
            } else {
                self.cancel_all()
            };
        }

        if modifiers.command() {
            let before = self.transform;
            match key.0.as_str() {
                "=" | "+" => self.zoom_about_center(self.config.zoom_in_factor),
                "-" => self.zoom_about_center(self.config.zoom_out_factor),
                "0" => self.transform.reset(),
                _ => {}
            }
            return self.render_if_changed(before);
        }

        if !modifiers.alt {
            if let Some(tool) = Tool::from_shortcut(&key.0) {
                return self.set_tool(tool);
            }
        }
        Vec::new()
    }

    pub fn on_key_up(&mut self, key: &Key, _modifiers: Modifiers) -> Vec<Action> {
        if key.is(&self.config.pan_key) && self.ui.pan_key_held {
            self.ui.pan_key_held = false;
            return vec![Action::SetCursor(self.cursor())];
        }
        Vec::new()
    }

    /// Host lost focus: every gesture is cancelled and the pan key released.
    pub fn on_blur(&mut self) -> Vec<Action> {
        self.ui.pan_key_held = false;
        let mut actions = self.cancel_all();
        if actions.is_empty() {
            actions.push(Action::SetCursor(self.cursor()));
        }
        actions
    }

    // --- Internals ---

    fn idle_cursor(&self) -> Cursor {
        if self.ui.pan_key_held {
            return Cursor::Grab;
        }
        match self.ui.tool {
            Tool::Select => Cursor::Default,
            Tool::Pan => Cursor::Grab,
            Tool::Zoom => Cursor::ZoomIn,
        }
    }

    fn start_pan(&mut self, pointer: PointerId, screen: Point) -> Vec<Action> {
        self.gestures.insert(pointer, InputState::Panning { last_screen: screen });
        tracing::debug!(pointer = pointer.0, "pan started");
        vec![Action::SetCursor(Cursor::Grabbing)]
    }

    fn zoom_step(&mut self, screen: Point, zoom_in: bool) -> Vec<Action> {
        let before = self.transform;
        let factor = if zoom_in { self.config.zoom_in_factor } else { self.config.zoom_out_factor };
        self.transform.zoom_by(factor, screen);
        self.render_if_changed(before)
    }

    fn press_background(&mut self, pointer: PointerId, screen: Point, modifiers: Modifiers) -> Vec<Action> {
        if modifiers.shift {
            return self.start_pan(pointer, screen);
        }
        if modifiers.any() {
            return Vec::new();
        }
        self.clear_with_render()
    }

    fn press_element(
        &mut self,
        pointer: PointerId,
        screen: Point,
        modifiers: Modifiers,
        bounds: &ElementBounds,
    ) -> Vec<Action> {
        let key = bounds.key;
        let was_selected = self.selection.is_selected(&key);
        let mut actions = Vec::new();

        if modifiers.command() && was_selected {
            self.selection.deselect(&key);
            return vec![Action::RenderNeeded];
        }
        if !was_selected {
            if !modifiers.command() {
                self.selection.clear();
            }
            self.selection.select(key);
            actions.push(Action::RenderNeeded);
        }

        if self.is_dragging(&key) {
            tracing::debug!(pointer = pointer.0, %key, "drag rejected; element held by another pointer");
            return actions;
        }

        let grab_offset = self.transform.screen_to_canvas(screen) - bounds.origin();
        let session = DragSession { key, grab_offset, press_screen: screen };
        self.gestures.insert(pointer, InputState::PendingDrag(session));
        tracing::debug!(pointer = pointer.0, %key, gx = grab_offset.x, gy = grab_offset.y, "drag session opened");
        actions
    }

    fn drag_to(&self, session: &DragSession, screen: Point) -> Action {
        let pos = self.transform.screen_to_canvas(screen) - session.grab_offset;
        tracing::trace!(key = %session.key, x = pos.x, y = pos.y, "drag");
        Action::ElementDragged { key: session.key, x: pos.x, y: pos.y }
    }

    fn end_gesture(&mut self, pointer: PointerId, cancelled: bool) -> Vec<Action> {
        let Some(state) = self.gestures.remove(&pointer) else {
            return Vec::new();
        };
        let mut actions = Vec::new();
        match state {
            InputState::Idle => {}
            InputState::Panning { .. } => {
                tracing::debug!(pointer = pointer.0, cancelled, "pan ended");
                actions.push(Action::SetCursor(self.cursor()));
            }
            InputState::PendingDrag(session) => {
                tracing::debug!(pointer = pointer.0, key = %session.key, cancelled, "drag session closed without moving");
            }
            InputState::Dragging(session) => {
                tracing::debug!(pointer = pointer.0, key = %session.key, cancelled, "drag ended");
                actions.push(Action::DragEnded { key: session.key, cancelled });
                actions.push(Action::SetCursor(self.cursor()));
            }
        }
        actions
    }

    fn cancel_all(&mut self) -> Vec<Action> {
        let mut pointers: Vec<PointerId> = self.gestures.keys().copied().collect();
        pointers.sort_unstable();
        pointers.into_iter().flat_map(|p| self.end_gesture(p, true)).collect()
    }

    fn clear_with_render(&mut self) -> Vec<Action> {
        if self.selection.is_empty() {
            return Vec::new();
        }
        self.selection.clear();
        vec![Action::RenderNeeded]
    }

    fn render_if_changed(&self, before: Transform) -> Vec<Action> {
        if self.transform == before { Vec::new() } else { vec![Action::RenderNeeded] }
    }
}

/// Callback invoked with `(key, new_x, new_y)` on every drag move.
pub type DragCallback = Box<dyn FnMut(ElementKey, f64, f64)>;

/// The full engine: [`EngineCore`] plus the content owner's drag callback.
pub struct Engine {
    pub core: EngineCore,
    on_element_drag: Option<DragCallback>,
}

impl Engine {
    #[must_use]
    pub fn new(core: EngineCore) -> Self {
        Self { core, on_element_drag: None }
    }

    /// Register the content owner's position sink. Replaces any previous one.
    pub fn on_element_drag<F>(&mut self, callback: F)
    where
        F: FnMut(ElementKey, f64, f64) + 'static,
    {
        self.on_element_drag = Some(Box::new(callback));
    }

    fn dispatch(&mut self, actions: Vec<Action>) -> Vec<Action> {
        if let Some(callback) = self.on_element_drag.as_mut() {
            for action in &actions {
                if let Action::ElementDragged { key, x, y } = action {
                    callback(*key, *x, *y);
                }
            }
        }
        actions
    }

    // --- Delegated input ---

    /// # Errors
    ///
    /// See [`EngineCore::on_pointer_down`].
    pub fn on_pointer_down(&mut self, ev: PointerEvent) -> Result<Vec<Action>, InputError> {
        let actions = self.core.on_pointer_down(ev)?;
        Ok(self.dispatch(actions))
    }

    /// # Errors
    ///
    /// See [`EngineCore::on_pointer_move`].
    pub fn on_pointer_move(&mut self, mv: PointerMove) -> Result<Vec<Action>, InputError> {
        let actions = self.core.on_pointer_move(mv)?;
        Ok(self.dispatch(actions))
    }

    pub fn on_pointer_up(&mut self, pointer: PointerId) -> Vec<Action> {
        self.core.on_pointer_up(pointer)
    }

    pub fn on_pointer_cancel(&mut self, pointer: PointerId) -> Vec<Action> {
        self.core.on_pointer_cancel(pointer)
    }

    pub fn on_surface_leave(&mut self, pointer: PointerId) -> Vec<Action> {
        self.core.on_surface_leave(pointer)
    }

    pub fn on_element_enter(&mut self, key: ElementKey) -> Vec<Action> {
        self.core.on_element_enter(key)
    }

    pub fn on_element_leave(&mut self, key: ElementKey) -> Vec<Action> {
        self.core.on_element_leave(key)
    }

    /// # Errors
    ///
    /// See [`EngineCore::on_wheel`].
    pub fn on_wheel(&mut self, ev: WheelEvent) -> Result<Vec<Action>, InputError> {
        self.core.on_wheel(ev)
    }

    pub fn on_key_down(&mut self, key: &Key, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_key_down(key, modifiers)
    }

    pub fn on_key_up(&mut self, key: &Key, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_key_up(key, modifiers)
    }

    pub fn on_blur(&mut self) -> Vec<Action> {
        self.core.on_blur()
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineCore::new())
    }
}
