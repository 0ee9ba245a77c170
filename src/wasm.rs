//! `wasm-bindgen` exports for browser hosts.
//!
//! JavaScript wires DOM events to [`WasmEngine`] using plain numbers and
//! strings. Element keys cross the boundary as UUID strings, modifier keys as a
//! bitmask (`1` shift, `2` ctrl, `4` alt, `8` meta), and buttons as DOM
//! `MouseEvent.button` codes. Every handler returns the resulting actions as a
//! JSON array. Malformed events are logged and dropped; they never reach the
//! state machine.

use uuid::Uuid;
use wasm_bindgen::prelude::*;

use crate::config::EngineConfig;
use crate::element::{ElementBounds, ElementKey};
use crate::engine::{Action, Engine, EngineCore};
use crate::input::{Button, InputError, Key, Modifiers, PointerEvent, PointerId, PointerMove, Tool, WheelDelta, WheelEvent};
use crate::transform::{Point, Transform};

const SHIFT: u8 = 1;
const CTRL: u8 = 2;
const ALT: u8 = 4;
const META: u8 = 8;

fn modifiers(bits: u8) -> Modifiers {
    Modifiers { shift: bits & SHIFT != 0, ctrl: bits & CTRL != 0, alt: bits & ALT != 0, meta: bits & META != 0 }
}

fn js_err(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn parse_key(key: &str) -> Result<ElementKey, JsValue> {
    Uuid::parse_str(key).map_err(js_err)
}

fn parse_tool(name: &str) -> Result<Tool, JsValue> {
    match name {
        "select" => Ok(Tool::Select),
        "pan" => Ok(Tool::Pan),
        "zoom" => Ok(Tool::Zoom),
        other => Err(JsValue::from_str(&format!("unknown tool: {other}"))),
    }
}

fn encode(actions: &[Action]) -> Result<String, JsValue> {
    serde_json::to_string(actions).map_err(js_err)
}

/// Log a rejected event and report no actions.
fn settle(result: Result<Vec<Action>, InputError>) -> Result<String, JsValue> {
    match result {
        Ok(actions) => encode(&actions),
        Err(err) => {
            tracing::warn!(%err, "input event rejected");
            encode(&[])
        }
    }
}

/// Browser-facing engine handle.
#[wasm_bindgen]
pub struct WasmEngine {
    engine: Engine,
}

impl Default for WasmEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl WasmEngine {
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new() -> Self {
        Self { engine: Engine::default() }
    }

    /// Build from a JSON [`EngineConfig`]. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns the parse or validation error as a string.
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(json: &str) -> Result<WasmEngine, JsValue> {
        let config = EngineConfig::from_json(json).map_err(js_err)?;
        let core = EngineCore::with_config(config).map_err(js_err)?;
        Ok(Self { engine: Engine::new(core) })
    }

    /// Register `callback(key, x, y)`, called on every drag move.
    #[wasm_bindgen(js_name = onElementDrag)]
    pub fn on_element_drag(&mut self, callback: js_sys::Function) {
        self.engine.on_element_drag(move |key, x, y| {
            let key = JsValue::from_str(&key.to_string());
            if let Err(err) = callback.call3(&JsValue::NULL, &key, &JsValue::from_f64(x), &JsValue::from_f64(y)) {
                tracing::warn!(?err, "element drag callback threw");
            }
        });
    }

    // --- Viewport ---

    /// Mirror the host element's client size.
    #[wasm_bindgen(js_name = resizeTo)]
    pub fn resize_to(&mut self, element: &web_sys::HtmlElement) {
        let (width, height) = (f64::from(element.client_width()), f64::from(element.client_height()));
        self.set_viewport_size(width, height);
    }

    #[wasm_bindgen(js_name = setViewportSize)]
    pub fn set_viewport_size(&mut self, width: f64, height: f64) {
        if let Err(err) = self.engine.core.set_viewport_size(width, height) {
            tracing::warn!(%err, "viewport size rejected");
        }
    }

    // --- Pointer input ---

    /// # Errors
    ///
    /// Fails only if the actions cannot be encoded.
    #[wasm_bindgen(js_name = pointerDownBackground)]
    pub fn pointer_down_background(
        &mut self,
        pointer_id: i32,
        x: f64,
        y: f64,
        button: i16,
        mods: u8,
    ) -> Result<String, JsValue> {
        let ev = PointerEvent::background(PointerId(pointer_id), Point::new(x, y), Button::from_dom(button), modifiers(mods));
        settle(self.engine.on_pointer_down(ev))
    }

    /// `key` and `bx..bh` describe the pressed element's current bounds.
    ///
    /// # Errors
    ///
    /// Fails if `key` is not a UUID or the actions cannot be encoded.
    #[allow(clippy::too_many_arguments)]
    #[wasm_bindgen(js_name = pointerDownElement)]
    pub fn pointer_down_element(
        &mut self,
        pointer_id: i32,
        x: f64,
        y: f64,
        button: i16,
        mods: u8,
        key: &str,
        bx: f64,
        by: f64,
        bw: f64,
        bh: f64,
    ) -> Result<String, JsValue> {
        let bounds = ElementBounds::new(parse_key(key)?, bx, by, bw, bh);
        let ev = PointerEvent::on_element(
            PointerId(pointer_id),
            Point::new(x, y),
            Button::from_dom(button),
            modifiers(mods),
            bounds,
        );
        settle(self.engine.on_pointer_down(ev))
    }

    /// # Errors
    ///
    /// Fails only if the actions cannot be encoded.
    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&mut self, pointer_id: i32, x: f64, y: f64) -> Result<String, JsValue> {
        let mv = PointerMove { pointer_id: PointerId(pointer_id), screen: Point::new(x, y) };
        settle(self.engine.on_pointer_move(mv))
    }

    /// # Errors
    ///
    /// Fails only if the actions cannot be encoded.
    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&mut self, pointer_id: i32) -> Result<String, JsValue> {
        encode(&self.engine.on_pointer_up(PointerId(pointer_id)))
    }

    /// # Errors
    ///
    /// Fails only if the actions cannot be encoded.
    #[wasm_bindgen(js_name = pointerCancel)]
    pub fn pointer_cancel(&mut self, pointer_id: i32) -> Result<String, JsValue> {
        encode(&self.engine.on_pointer_cancel(PointerId(pointer_id)))
    }

    /// # Errors
    ///
    /// Fails only if the actions cannot be encoded.
    #[wasm_bindgen(js_name = surfaceLeave)]
    pub fn surface_leave(&mut self, pointer_id: i32) -> Result<String, JsValue> {
        encode(&self.engine.on_surface_leave(PointerId(pointer_id)))
    }

    /// # Errors
    ///
    /// Fails if `key` is not a UUID or the actions cannot be encoded.
    #[wasm_bindgen(js_name = elementEnter)]
    pub fn element_enter(&mut self, key: &str) -> Result<String, JsValue> {
        encode(&self.engine.on_element_enter(parse_key(key)?))
    }

    /// # Errors
    ///
    /// Fails if `key` is not a UUID or the actions cannot be encoded.
    #[wasm_bindgen(js_name = elementLeave)]
    pub fn element_leave(&mut self, key: &str) -> Result<String, JsValue> {
        encode(&self.engine.on_element_leave(parse_key(key)?))
    }

    /// # Errors
    ///
    /// Fails only if the actions cannot be encoded.
    pub fn wheel(&mut self, x: f64, y: f64, dx: f64, dy: f64) -> Result<String, JsValue> {
        let ev = WheelEvent { screen: Point::new(x, y), delta: WheelDelta { dx, dy } };
        settle(self.engine.on_wheel(ev))
    }

    // --- Keyboard / focus ---

    /// # Errors
    ///
    /// Fails only if the actions cannot be encoded.
    #[wasm_bindgen(js_name = keyDown)]
    pub fn key_down(&mut self, key: String, mods: u8) -> Result<String, JsValue> {
        encode(&self.engine.on_key_down(&Key(key), modifiers(mods)))
    }

    /// # Errors
    ///
    /// Fails only if the actions cannot be encoded.
    #[wasm_bindgen(js_name = keyUp)]
    pub fn key_up(&mut self, key: String, mods: u8) -> Result<String, JsValue> {
        encode(&self.engine.on_key_up(&Key(key), modifiers(mods)))
    }

    /// # Errors
    ///
    /// Fails only if the actions cannot be encoded.
    pub fn blur(&mut self) -> Result<String, JsValue> {
        encode(&self.engine.on_blur())
    }

    /// `name` is `select`, `pan` or `zoom`.
    ///
    /// # Errors
    ///
    /// Fails on an unknown tool name.
    #[wasm_bindgen(js_name = setTool)]
    pub fn set_tool(&mut self, name: &str) -> Result<String, JsValue> {
        let tool = parse_tool(name)?;
        encode(&self.engine.core.set_tool(tool))
    }

    // --- Queries ---

    #[must_use]
    pub fn scale(&self) -> f64 {
        self.engine.core.transform().scale()
    }

    #[wasm_bindgen(js_name = offsetX)]
    #[must_use]
    pub fn offset_x(&self) -> f64 {
        self.engine.core.transform().offset_x()
    }

    #[wasm_bindgen(js_name = offsetY)]
    #[must_use]
    pub fn offset_y(&self) -> f64 {
        self.engine.core.transform().offset_y()
    }

    /// `[x, y]` in canvas space.
    #[wasm_bindgen(js_name = screenToCanvas)]
    #[must_use]
    pub fn screen_to_canvas(&self, x: f64, y: f64) -> Vec<f64> {
        let p = self.engine.core.screen_to_canvas(Point::new(x, y));
        vec![p.x, p.y]
    }

    /// `[x, y]` in screen space.
    #[wasm_bindgen(js_name = canvasToScreen)]
    #[must_use]
    pub fn canvas_to_screen(&self, x: f64, y: f64) -> Vec<f64> {
        let p = self.engine.core.canvas_to_screen(Point::new(x, y));
        vec![p.x, p.y]
    }

    /// # Errors
    ///
    /// Fails if `key` is not a UUID.
    #[wasm_bindgen(js_name = isVisible)]
    pub fn is_visible(&self, key: &str, x: f64, y: f64, width: f64, height: f64) -> Result<bool, JsValue> {
        let bounds = ElementBounds::new(parse_key(key)?, x, y, width, height);
        Ok(self.engine.core.is_visible(&bounds))
    }

    #[wasm_bindgen(js_name = selectedKeys)]
    #[must_use]
    pub fn selected_keys(&self) -> Vec<String> {
        self.engine.core.selected_keys().iter().map(ToString::to_string).collect()
    }

    #[wasm_bindgen(js_name = hoveredKey)]
    #[must_use]
    pub fn hovered_key(&self) -> Option<String> {
        self.engine.core.hovered_key().as_ref().map(ToString::to_string)
    }

    /// Current cursor as a CSS `cursor` value.
    #[must_use]
    pub fn cursor(&self) -> String {
        self.engine.core.cursor().css().to_owned()
    }

    // --- Mutations ---

    #[wasm_bindgen(js_name = panBy)]
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.engine.core.pan_by(dx, dy);
    }

    #[wasm_bindgen(js_name = zoomBy)]
    pub fn zoom_by(&mut self, factor: f64, anchor_x: f64, anchor_y: f64) {
        self.engine.core.zoom_by(factor, Point::new(anchor_x, anchor_y));
    }

    #[wasm_bindgen(js_name = setScale)]
    pub fn set_scale(&mut self, scale: f64) {
        self.engine.core.set_scale(scale);
    }

    #[wasm_bindgen(js_name = setOffset)]
    pub fn set_offset(&mut self, x: f64, y: f64) {
        self.engine.core.set_offset(x, y);
    }

    #[wasm_bindgen(js_name = resetTransform)]
    pub fn reset_transform(&mut self) {
        self.engine.core.reset_transform();
    }

    #[wasm_bindgen(js_name = centerOn)]
    pub fn center_on(&mut self, x: f64, y: f64) {
        self.engine.core.center_on(Point::new(x, y));
    }

    /// Serialize the transform for the host to store.
    ///
    /// # Errors
    ///
    /// Fails only if encoding fails.
    #[wasm_bindgen(js_name = transformSnapshot)]
    pub fn transform_snapshot(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.engine.core.transform()).map_err(js_err)
    }

    /// # Errors
    ///
    /// Fails if `json` is not a transform snapshot.
    #[wasm_bindgen(js_name = restoreTransform)]
    pub fn restore_transform(&mut self, json: &str) -> Result<(), JsValue> {
        let snapshot: Transform = serde_json::from_str(json).map_err(js_err)?;
        self.engine.core.restore_transform(&snapshot);
        Ok(())
    }

    /// # Errors
    ///
    /// Fails if `key` is not a UUID.
    pub fn select(&mut self, key: &str) -> Result<(), JsValue> {
        self.engine.core.select(parse_key(key)?);
        Ok(())
    }

    /// Replace the selection with `keys`.
    ///
    /// # Errors
    ///
    /// Fails if any key is not a UUID; the selection is left unchanged.
    #[wasm_bindgen(js_name = selectMultiple)]
    pub fn select_multiple(&mut self, keys: Vec<String>) -> Result<(), JsValue> {
        let keys = keys.iter().map(|k| parse_key(k)).collect::<Result<Vec<_>, _>>()?;
        self.engine.core.select_multiple(keys);
        Ok(())
    }

    /// # Errors
    ///
    /// Fails if `key` is not a UUID.
    pub fn deselect(&mut self, key: &str) -> Result<(), JsValue> {
        self.engine.core.deselect(&parse_key(key)?);
        Ok(())
    }

    #[wasm_bindgen(js_name = clearSelection)]
    pub fn clear_selection(&mut self) {
        self.engine.core.clear_selection();
    }

    /// # Errors
    ///
    /// Fails if `key` is present and not a UUID.
    #[wasm_bindgen(js_name = setHovered)]
    pub fn set_hovered(&mut self, key: Option<String>) -> Result<(), JsValue> {
        let key = key.as_deref().map(parse_key).transpose()?;
        self.engine.core.set_hovered(key);
        Ok(())
    }
}
