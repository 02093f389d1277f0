//! WASM bridge for Artboard: exposes the editor to a JavaScript host.
//!
//! Compiled via `wasm-pack build --target web`. The host forwards DOM
//! pointer/key events, calls `render` after any call that reports a change,
//! and registers decoded `<img>` elements so the Canvas2D painter can draw
//! them. Fallible calls answer with JSON: `{"ok":true,...}` or
//! `{"ok":false,"error":"...","code":"E_..."}`.

mod render2d;

use ab_core::{DocumentError, ElementId, ElementPatch, ImportError, Selection, ShapeKind};
use ab_editor::{Editor, EditorConfig, Modifiers, Outcome, ShortcutAction, ShortcutMap};
use serde::Serialize;
use serde_json::json;
use std::collections::HashMap;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

/// The main WASM-facing canvas controller.
#[wasm_bindgen]
pub struct ArtboardCanvas {
    editor: Editor,
    /// Decoded images keyed by element `src`.
    images: HashMap<String, HtmlImageElement>,
}

/// Answer to every pointer event.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PointerStatus {
    changed: bool,
    committed: bool,
    gesture: &'static str,
    selection: Vec<String>,
}

impl Default for ArtboardCanvas {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl ArtboardCanvas {
    /// Empty 800×600 artboard with default settings.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::from_editor(Editor::default())
    }

    /// Create with an `EditorConfig` given as JSON; absent keys keep their
    /// defaults.
    pub fn with_config(config_json: &str) -> Result<ArtboardCanvas, JsValue> {
        let config = EditorConfig::from_json(config_json)
            .map_err(|e| JsValue::from_str(&format!("invalid config: {e}")))?;
        Ok(Self::from_editor(Editor::new(config)))
    }

    /// Render the artboard, the elements and the selection chrome.
    pub fn render(&self, ctx: &CanvasRenderingContext2d) {
        let mut painter = render2d::Canvas2dPainter::new(ctx, &self.images);
        painter.begin_frame(self.editor.zoom());
        self.editor.render(&mut painter);
    }

    // ─── Pointer / keyboard ──────────────────────────────────────────────

    /// Pointer coordinates are CSS pixels relative to the canvas element.
    pub fn handle_pointer_down(&mut self, x: f64, y: f64, shift: bool, ctrl: bool, alt: bool, meta: bool) -> String {
        let outcome = self.editor.pointer_down(x, y, Modifiers::new(shift, ctrl, alt, meta));
        self.pointer_status(outcome)
    }

    pub fn handle_pointer_move(&mut self, x: f64, y: f64, shift: bool, ctrl: bool, alt: bool, meta: bool) -> String {
        let outcome = self.editor.pointer_move(x, y, Modifiers::new(shift, ctrl, alt, meta));
        self.pointer_status(outcome)
    }

    pub fn handle_pointer_up(&mut self, x: f64, y: f64, shift: bool, ctrl: bool, alt: bool, meta: bool) -> String {
        let outcome = self.editor.pointer_up(x, y, Modifiers::new(shift, ctrl, alt, meta));
        self.pointer_status(outcome)
    }

    /// Handle a keyboard event. Returns `{"changed":bool,"action":"<name>"}`.
    /// The host should `preventDefault` when `action` is not `"none"`.
    pub fn handle_key(&mut self, key: &str, ctrl: bool, shift: bool, alt: bool, meta: bool) -> String {
        let action = ShortcutMap::resolve(key, ctrl, shift, alt, meta).map_or("none", action_to_name);
        let changed = self.editor.key(key, Modifiers::new(shift, ctrl, alt, meta));
        json!({ "changed": changed, "action": action }).to_string()
    }

    // ─── Elements ────────────────────────────────────────────────────────

    pub fn add_image(&mut self, src: &str) -> String {
        id_response(self.editor.add_image(src))
    }

    pub fn add_text(&mut self, text: &str) -> String {
        id_response(self.editor.add_text(text))
    }

    /// `shape` is one of `rectangle`, `circle`, `ellipse`, `triangle`,
    /// `pentagon`, `hexagon`, `star`.
    pub fn add_shape(&mut self, shape: &str) -> String {
        match ShapeKind::from_name(shape) {
            Some(kind) => id_response(self.editor.add_shape(kind)),
            None => error_json(&format!("unknown shape `{shape}`"), "E_INVALID_SPEC"),
        }
    }

    /// Apply a camelCase JSON patch, e.g. `{"fill":"#FF0000","rotation":45}`.
    pub fn update_element(&mut self, id: &str, patch_json: &str) -> String {
        let patch: ElementPatch = match serde_json::from_str(patch_json) {
            Ok(p) => p,
            Err(e) => return error_json(&format!("invalid patch: {e}"), "E_INVALID_SPEC"),
        };
        match self.editor.update_element(ElementId::intern(id), &patch) {
            Ok(changed) => json!({ "ok": true, "changed": changed }).to_string(),
            Err(e) => document_error(&e),
        }
    }

    /// Element as JSON, or `null` for an unknown id.
    pub fn get_element_json(&self, id: &str) -> String {
        self.editor
            .document()
            .get(ElementId::intern(id))
            .and_then(|el| serde_json::to_string(el).ok())
            .unwrap_or_else(|| "null".to_string())
    }

    pub fn delete_selected(&mut self) -> bool {
        self.editor.delete_selection()
    }

    pub fn duplicate_selected(&mut self) -> String {
        match self.editor.duplicate_selection() {
            Ok(ids) => json!({ "ok": true, "ids": id_strings(ids) }).to_string(),
            Err(e) => document_error(&e),
        }
    }

    // ─── Selection ───────────────────────────────────────────────────────

    /// All selected ids as a JSON array.
    pub fn get_selected_ids(&self) -> String {
        serde_json::to_string(&id_strings(self.editor.selection().ids())).unwrap_or_else(|_| "[]".to_string())
    }

    /// Select one element; an empty id clears the selection.
    pub fn select_by_id(&mut self, id: &str) -> bool {
        if id.is_empty() {
            self.editor.select(Selection::None);
            return true;
        }
        let id = ElementId::intern(id);
        if !self.editor.document().contains(id) {
            return false;
        }
        self.editor.select(Selection::Single(id));
        true
    }

    pub fn select_all(&mut self) {
        self.editor.select_all();
    }

    // ─── Structure and layers ────────────────────────────────────────────

    pub fn group(&mut self) -> String {
        id_response(self.editor.group_selection())
    }

    pub fn ungroup(&mut self) -> String {
        match self.editor.ungroup_selection() {
            Ok(ids) => json!({ "ok": true, "ids": id_strings(ids) }).to_string(),
            Err(e) => document_error(&e),
        }
    }

    pub fn bring_to_front(&mut self) -> bool {
        self.editor.bring_to_front()
    }

    pub fn send_to_back(&mut self) -> bool {
        self.editor.send_to_back()
    }

    pub fn bring_forward(&mut self) -> bool {
        self.editor.bring_forward()
    }

    pub fn send_backward(&mut self) -> bool {
        self.editor.send_backward()
    }

    // ─── History ─────────────────────────────────────────────────────────

    pub fn undo(&mut self) -> bool {
        self.editor.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.editor.redo()
    }

    pub fn can_undo(&self) -> bool {
        self.editor.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.editor.can_redo()
    }

    // ─── Document ────────────────────────────────────────────────────────

    pub fn export_json(&self) -> Result<String, JsValue> {
        self.editor
            .export_json()
            .map_err(|e| JsValue::from_str(&format!("export failed: {e}")))
    }

    /// Replace the document. On failure nothing changes.
    pub fn import_json(&mut self, text: &str) -> String {
        match self.editor.import_json(text) {
            Ok(()) => json!({ "ok": true, "elements": self.editor.document().len() }).to_string(),
            Err(e) => import_error(&e),
        }
    }

    pub fn resize_artboard(&mut self, width: u32, height: u32) -> String {
        match self.editor.resize_artboard(width, height) {
            Ok(()) => json!({ "ok": true }).to_string(),
            Err(e) => document_error(&e),
        }
    }

    pub fn set_zoom(&mut self, zoom: f64) -> bool {
        self.editor.set_zoom(zoom)
    }

    pub fn get_zoom(&self) -> f64 {
        self.editor.zoom()
    }

    /// Active guidelines as `[{"axis":"vertical","position":150}, ...]`.
    pub fn get_guides_json(&self) -> String {
        serde_json::to_string(self.editor.guides()).unwrap_or_else(|_| "[]".to_string())
    }

    // ─── Images ──────────────────────────────────────────────────────────

    /// Make a decoded image available to the renderer under `src`.
    pub fn register_image(&mut self, src: &str, image: HtmlImageElement) {
        self.images.insert(src.to_string(), image);
    }

    /// The host finished loading the image of element `id`. Shrinks the
    /// element to the configured maximum keeping the aspect ratio.
    pub fn image_loaded(&mut self, id: &str, natural_width: f64, natural_height: f64) -> bool {
        self.editor
            .image_loaded(ElementId::intern(id), natural_width, natural_height)
    }
}

impl ArtboardCanvas {
    fn from_editor(editor: Editor) -> Self {
        console_error_panic_hook_setup();
        console_logger_setup();
        Self {
            editor,
            images: HashMap::new(),
        }
    }

    fn pointer_status(&self, outcome: Outcome) -> String {
        let status = PointerStatus {
            changed: outcome != Outcome::Unchanged,
            committed: outcome == Outcome::Commit,
            gesture: self.editor.gesture_name(),
            selection: id_strings(self.editor.selection().ids()),
        };
        serde_json::to_string(&status).unwrap_or_else(|_| r#"{"changed":true}"#.to_string())
    }
}

// ─── JSON responses ──────────────────────────────────────────────────────

fn id_strings(ids: impl IntoIterator<Item = ElementId>) -> Vec<String> {
    ids.into_iter().map(|id| id.as_str().to_string()).collect()
}

fn error_json(message: &str, code: &str) -> String {
    json!({ "ok": false, "error": message, "code": code }).to_string()
}

fn document_error(e: &DocumentError) -> String {
    error_json(&e.to_string(), e.code())
}

fn import_error(e: &ImportError) -> String {
    error_json(&e.to_string(), e.code())
}

fn id_response(result: Result<ElementId, DocumentError>) -> String {
    match result {
        Ok(id) => json!({ "ok": true, "id": id.as_str() }).to_string(),
        Err(e) => document_error(&e),
    }
}

fn action_to_name(action: ShortcutAction) -> &'static str {
    match action {
        ShortcutAction::Undo => "undo",
        ShortcutAction::Redo => "redo",
        ShortcutAction::Delete => "delete",
        ShortcutAction::SelectAll => "selectAll",
        ShortcutAction::Duplicate => "duplicate",
        ShortcutAction::Deselect => "deselect",
        ShortcutAction::Group => "group",
        ShortcutAction::Ungroup => "ungroup",
        ShortcutAction::SendBackward => "sendBackward",
        ShortcutAction::BringForward => "bringForward",
        ShortcutAction::SendToBack => "sendToBack",
        ShortcutAction::BringToFront => "bringToFront",
        ShortcutAction::Nudge { .. } => "nudge",
    }
}

// ─── Console hooks ───────────────────────────────────────────────────────

fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("Artboard WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}

/// Routes `log` records to the browser console.
#[cfg(target_arch = "wasm32")]
struct ConsoleLogger;

#[cfg(target_arch = "wasm32")]
impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let msg = JsValue::from_str(&format!("[{}] {}", record.target(), record.args()));
        match record.level() {
            log::Level::Error => web_sys::console::error_1(&msg),
            log::Level::Warn => web_sys::console::warn_1(&msg),
            log::Level::Info => web_sys::console::info_1(&msg),
            log::Level::Debug | log::Level::Trace => web_sys::console::debug_1(&msg),
        }
    }

    fn flush(&self) {}
}

fn console_logger_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        static LOGGER: ConsoleLogger = ConsoleLogger;
        if log::set_logger(&LOGGER).is_ok() {
            log::set_max_level(log::LevelFilter::Warn);
        }
    }
}

/// Change how much of the editor's log reaches the console:
/// `"error"`, `"warn"`, `"info"`, `"debug"` or `"trace"`.
#[wasm_bindgen]
pub fn set_log_level(level: &str) -> bool {
    match level.parse::<log::LevelFilter>() {
        Ok(filter) => {
            log::set_max_level(filter);
            true
        }
        Err(_) => false,
    }
}

// ─── Standalone helpers (no canvas needed) ───────────────────────────────

/// Check a document JSON without loading it.
/// Returns `{"ok":true,"elements":n}` or an error response.
#[wasm_bindgen]
pub fn validate_document(json_text: &str) -> String {
    match ab_core::from_json(json_text) {
        Ok(doc) => json!({ "ok": true, "elements": doc.len() }).to_string(),
        Err(e) => import_error(&e),
    }
}
