//! Editor facade: document, selection, gestures and history in one place.
//!
//! Hosts feed raw pointer and key events in and call [`Editor::render`]
//! whenever an event reports a change. Every command that edits the document
//! records one history entry; gestures record theirs on pointer-up.

use crate::config::EditorConfig;
use crate::controller::{Controller, Outcome, View};
use crate::history::History;
use crate::input::{InputEvent, Modifiers};
use crate::shortcuts::{ShortcutAction, ShortcutMap};
use ab_core::geometry::clamp_into;
use ab_core::{
    Document, DocumentError, ElementId, ElementPatch, ElementSpec, Geom, Guideline, ImportError, Point,
    Selection, ShapeKind, from_json, to_json,
};
use ab_render::{Overlay, Painter, paint_document};

pub struct Editor {
    doc: Document,
    history: History<Document>,
    controller: Controller,
    config: EditorConfig,
    /// Screen pixels per canvas unit.
    zoom: f64,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl Editor {
    pub fn new(config: EditorConfig) -> Self {
        Self::with_document(Document::default(), config)
    }

    /// Start from an existing document; it becomes the history baseline.
    pub fn with_document(doc: Document, config: EditorConfig) -> Self {
        let history = History::new(config.history_capacity, doc.clone());
        Self {
            doc,
            history,
            controller: Controller::new(),
            config,
            zoom: 1.0,
        }
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn selection(&self) -> &Selection {
        self.controller.selection()
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Ignored unless `zoom` is positive and finite.
    pub fn set_zoom(&mut self, zoom: f64) -> bool {
        if !(zoom.is_finite() && zoom > 0.0) {
            log::warn!("ignoring zoom {zoom}");
            return false;
        }
        self.zoom = zoom;
        true
    }

    pub fn guides(&self) -> &[Guideline] {
        self.controller.guides()
    }

    pub fn marquee(&self) -> Option<Geom> {
        self.controller.marquee()
    }

    pub fn gesture_name(&self) -> &'static str {
        self.controller.gesture_name()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Record the live document as a history entry.
    fn commit(&mut self) {
        if self.history.record(self.doc.clone()) {
            log::debug!("commit: {} element(s)", self.doc.len());
        }
    }

    /// Roll back a live gesture so a command never commits its
    /// uncommitted geometry.
    fn settle_gesture(&mut self) {
        if !self.controller.is_idle() {
            log::debug!("{} cancelled by a command", self.controller.gesture_name());
            self.controller.cancel(&mut self.doc);
        }
    }

    /// Select ids and make sure none of them is stale.
    fn select_ids(&mut self, ids: impl IntoIterator<Item = ElementId>) {
        self.controller.set_selection(Selection::from_ids(ids));
        self.controller.prune_selection(&self.doc);
    }

    // ─── Element commands ────────────────────────────────────────────────

    /// Add an element on top of the stack and select it.
    pub fn add_element(&mut self, spec: ElementSpec) -> Result<ElementId, DocumentError> {
        self.settle_gesture();
        let id = self.doc.add_element(spec)?;
        self.controller.set_selection(Selection::Single(id));
        self.commit();
        Ok(id)
    }

    pub fn add_image(&mut self, src: &str) -> Result<ElementId, DocumentError> {
        self.add_element(ElementSpec::image(src))
    }

    pub fn add_text(&mut self, text: &str) -> Result<ElementId, DocumentError> {
        self.add_element(ElementSpec::text(text))
    }

    pub fn add_shape(&mut self, shape: ShapeKind) -> Result<ElementId, DocumentError> {
        self.add_element(ElementSpec::shape(shape))
    }

    /// Property edit. A stale id is logged and ignored (`Ok(false)`).
    pub fn update_element(&mut self, id: ElementId, patch: &ElementPatch) -> Result<bool, DocumentError> {
        self.settle_gesture();
        match self.doc.update_element(id, patch) {
            Ok(()) => {
                self.commit();
                Ok(true)
            }
            Err(DocumentError::NotFound(id)) => {
                log::warn!("update skipped: {id} no longer exists");
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    /// Remove one element (and its children, for a group).
    pub fn delete(&mut self, id: ElementId) -> bool {
        self.settle_gesture();
        match self.doc.remove_element(id) {
            Ok(removed) => {
                log::debug!("deleted {}", removed.len());
                self.controller.prune_selection(&self.doc);
                self.commit();
                true
            }
            Err(e) => {
                log::warn!("delete {id}: {e}");
                false
            }
        }
    }

    pub fn delete_selection(&mut self) -> bool {
        self.settle_gesture();
        let ids = self.selection().ids();
        if ids.is_empty() {
            return false;
        }
        let mut removed = 0;
        for id in ids {
            // Already gone when an earlier id was its group.
            if !self.doc.contains(id) {
                continue;
            }
            if let Ok(r) = self.doc.remove_element(id) {
                removed += r.len();
            }
        }
        log::debug!("deleted {removed} element(s)");
        self.controller.set_selection(Selection::None);
        self.commit();
        removed > 0
    }

    /// Copy the selected root elements, offset by `duplicate_offset`, and
    /// select the copies.
    pub fn duplicate_selection(&mut self) -> Result<Vec<ElementId>, DocumentError> {
        self.settle_gesture();
        let ids: Vec<ElementId> = self
            .selection()
            .ids()
            .into_iter()
            .filter(|id| self.doc.get(*id).is_some_and(|el| el.parent_id.is_none()))
            .collect();
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let offset = self.config.duplicate_offset;
        let copies = self.doc.duplicate(&ids, offset, offset)?;
        self.select_ids(copies.iter().copied());
        self.commit();
        Ok(copies)
    }

    pub fn select_all(&mut self) {
        let ids: Vec<ElementId> = self.doc.paint_order().into_iter().map(|el| el.id).collect();
        self.select_ids(ids);
    }

    pub fn select(&mut self, selection: Selection) {
        self.controller.set_selection(selection);
        self.controller.prune_selection(&self.doc);
    }

    /// Move the selected root elements by whole steps.
    pub fn nudge(&mut self, dx: f64, dy: f64) -> bool {
        self.settle_gesture();
        let (w, h) = (f64::from(self.doc.artboard.width), f64::from(self.doc.artboard.height));
        let mut moved = false;
        for id in self.selection().ids() {
            let Some(el) = self.doc.get(id).filter(|el| el.parent_id.is_none()) else {
                continue;
            };
            let mut geom = el.geom().translate(dx, dy);
            if self.config.clamp_to_artboard {
                geom = clamp_into(geom, w, h);
            }
            moved |= geom != el.geom();
            if let Err(e) = self.doc.set_geom(id, geom) {
                log::warn!("nudge {id}: {e}");
            }
        }
        if moved {
            self.commit();
        }
        moved
    }

    // ─── Structure ───────────────────────────────────────────────────────

    /// Group the selected elements and select the new group.
    pub fn group_selection(&mut self) -> Result<ElementId, DocumentError> {
        self.settle_gesture();
        let ids = self.selection().ids();
        let group = self.doc.group_elements(&ids)?;
        log::debug!("grouped {} element(s) into {group}", ids.len());
        self.controller.set_selection(Selection::Single(group));
        self.commit();
        Ok(group)
    }

    /// Ungroup the selected group and select its former children.
    pub fn ungroup_selection(&mut self) -> Result<Vec<ElementId>, DocumentError> {
        self.settle_gesture();
        let Some(group) = self.selection().single() else {
            return Err(DocumentError::ConstraintViolation(
                "select exactly one group to ungroup".into(),
            ));
        };
        let children = self.doc.ungroup(group)?;
        log::debug!("ungrouped {group} into {} element(s)", children.len());
        self.select_ids(children.iter().copied());
        self.commit();
        Ok(children)
    }

    // ─── Z-order ─────────────────────────────────────────────────────────

    pub fn bring_to_front(&mut self) -> bool {
        self.reorder(Document::bring_to_front, false)
    }

    pub fn send_to_back(&mut self) -> bool {
        self.reorder(Document::send_to_back, true)
    }

    pub fn bring_forward(&mut self) -> bool {
        self.reorder(Document::bring_forward, true)
    }

    pub fn send_backward(&mut self) -> bool {
        self.reorder(Document::send_backward, false)
    }

    /// Apply a layer command to every selected element, in the order that
    /// keeps the selection's relative stacking intact.
    fn reorder(
        &mut self,
        op: fn(&mut Document, ElementId) -> Result<bool, DocumentError>,
        topmost_first: bool,
    ) -> bool {
        self.settle_gesture();
        let mut ids: Vec<(ElementId, i64)> = self
            .selection()
            .ids()
            .into_iter()
            .filter_map(|id| self.doc.get(id).map(|el| (id, el.z_index)))
            .collect();
        ids.sort_by_key(|(_, z)| *z);
        if topmost_first {
            ids.reverse();
        }

        let mut changed = false;
        for (id, _) in ids {
            match op(&mut self.doc, id) {
                Ok(c) => changed |= c,
                Err(e) => log::warn!("reorder {id}: {e}"),
            }
        }
        if changed {
            self.commit();
        }
        changed
    }

    // ─── Document commands ───────────────────────────────────────────────

    pub fn resize_artboard(&mut self, width: u32, height: u32) -> Result<(), DocumentError> {
        self.settle_gesture();
        self.doc.resize_artboard(width, height)?;
        self.commit();
        Ok(())
    }

    /// The host finished decoding an image: shrink the element to fit
    /// `image_max_size`. Stale ids are a logged no-op.
    pub fn image_loaded(&mut self, id: ElementId, natural_width: f64, natural_height: f64) -> bool {
        self.settle_gesture();
        match self
            .doc
            .fit_image(id, natural_width, natural_height, self.config.image_max_size)
        {
            Ok(true) => {
                self.commit();
                true
            }
            Ok(false) => false,
            Err(e) => {
                log::warn!("image load for {id} ignored: {e}");
                false
            }
        }
    }

    pub fn export_json(&self) -> Result<String, serde_json::Error> {
        to_json(&self.doc)
    }

    /// Replace the document. Undoable; on error nothing changes.
    pub fn import_json(&mut self, text: &str) -> Result<(), ImportError> {
        let doc = from_json(text)?;
        self.settle_gesture();
        self.doc = doc;
        self.controller.set_selection(Selection::None);
        log::debug!("imported {} element(s)", self.doc.len());
        self.commit();
        Ok(())
    }

    // ─── History ─────────────────────────────────────────────────────────

    pub fn undo(&mut self) -> bool {
        self.controller.cancel(&mut self.doc);
        match self.history.undo() {
            Some(snapshot) => {
                self.restore(snapshot);
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        self.controller.cancel(&mut self.doc);
        match self.history.redo() {
            Some(snapshot) => {
                self.restore(snapshot);
                true
            }
            None => false,
        }
    }

    fn restore(&mut self, snapshot: Document) {
        self.history.begin_restore();
        self.doc = snapshot;
        self.controller.prune_selection(&self.doc);
        self.history.end_restore();
    }

    // ─── Input ───────────────────────────────────────────────────────────

    /// Dispatch any input event. Returns what the host should do next.
    pub fn handle_event(&mut self, event: &InputEvent) -> Outcome {
        match event {
            InputEvent::Key { key, modifiers } => {
                if self.key(key, *modifiers) {
                    Outcome::Redraw
                } else {
                    Outcome::Unchanged
                }
            }
            _ => {
                let view = View {
                    config: &self.config,
                    zoom: self.zoom,
                };
                let outcome = self.controller.handle(&mut self.doc, event, view);
                if outcome == Outcome::Commit {
                    self.commit();
                }
                outcome
            }
        }
    }

    pub fn pointer_down(&mut self, x: f64, y: f64, modifiers: Modifiers) -> Outcome {
        self.handle_event(&InputEvent::PointerDown { x, y, modifiers })
    }

    pub fn pointer_move(&mut self, x: f64, y: f64, modifiers: Modifiers) -> Outcome {
        self.handle_event(&InputEvent::PointerMove { x, y, modifiers })
    }

    pub fn pointer_up(&mut self, x: f64, y: f64, modifiers: Modifiers) -> Outcome {
        self.handle_event(&InputEvent::PointerUp { x, y, modifiers })
    }

    /// Run the shortcut bound to `key`. Returns `true` if one was bound and
    /// did something.
    pub fn key(&mut self, key: &str, modifiers: Modifiers) -> bool {
        let Some(action) = ShortcutMap::resolve(key, modifiers.ctrl, modifiers.shift, modifiers.alt, modifiers.meta)
        else {
            return false;
        };
        log::debug!("shortcut {key} -> {action:?}");
        match action {
            ShortcutAction::Undo => self.undo(),
            ShortcutAction::Redo => self.redo(),
            ShortcutAction::Delete => self.delete_selection(),
            ShortcutAction::SelectAll => {
                self.select_all();
                true
            }
            ShortcutAction::Duplicate => self.duplicate_selection().is_ok_and(|c| !c.is_empty()),
            ShortcutAction::Deselect => {
                self.controller.cancel(&mut self.doc);
                let had = !self.selection().is_empty();
                self.controller.set_selection(Selection::None);
                had
            }
            ShortcutAction::Group => accepted("group", self.group_selection().map(|_| ())),
            ShortcutAction::Ungroup => accepted("ungroup", self.ungroup_selection().map(|_| ())),
            ShortcutAction::SendBackward => self.send_backward(),
            ShortcutAction::BringForward => self.bring_forward(),
            ShortcutAction::SendToBack => self.send_to_back(),
            ShortcutAction::BringToFront => self.bring_to_front(),
            ShortcutAction::Nudge { dx, dy, large } => {
                let step = if large {
                    self.config.nudge_step_large
                } else {
                    self.config.nudge_step
                };
                self.nudge(f64::from(dx) * step, f64::from(dy) * step)
            }
        }
    }

    // ─── Rendering ───────────────────────────────────────────────────────

    /// Selection chrome for the current state, sized in canvas units.
    pub fn overlay(&self) -> Overlay {
        Overlay {
            selected: self.selection().ids().to_vec(),
            guides: self.guides().to_vec(),
            marquee: self.marquee(),
            handle_radius: self.config.handle_radius / self.zoom,
            rotate_handle_offset: self.config.rotate_handle_offset / self.zoom,
            ..Overlay::default()
        }
    }

    /// Paint in canvas units; the painter applies the zoom.
    pub fn render(&self, painter: &mut dyn Painter) {
        log::trace!("render {} element(s)", self.doc.len());
        paint_document(&self.doc, &self.overlay(), painter);
    }

    /// Canvas-space position of a screen point.
    pub fn to_canvas(&self, x: f64, y: f64) -> Point {
        Point::new(x / self.zoom, y / self.zoom)
    }
}

/// Shortcut commands that can be refused (grouping one element, ...) only
/// log the refusal.
fn accepted(what: &str, result: Result<(), DocumentError>) -> bool {
    match result {
        Ok(()) => true,
        Err(e) => {
            log::debug!("{what} rejected: {e}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_selects_and_commits() {
        let mut ed = Editor::default();
        let id = ed.add_text("Hello").unwrap();
        assert_eq!(ed.selection(), &Selection::Single(id));
        assert!(ed.can_undo());
        assert!(ed.undo());
        assert!(ed.document().is_empty());
        assert!(ed.selection().is_empty());
    }

    #[test]
    fn stale_update_is_a_no_op() {
        let mut ed = Editor::default();
        let id = ed.add_shape(ShapeKind::Star).unwrap();
        ed.delete(id);
        let len = ed.history_len();
        assert_eq!(ed.update_element(id, &ElementPatch::position(1.0, 1.0)), Ok(false));
        assert_eq!(ed.history_len(), len);
    }

    #[test]
    fn invalid_update_is_rejected_without_commit() {
        let mut ed = Editor::default();
        let id = ed.add_shape(ShapeKind::Rectangle).unwrap();
        let len = ed.history_len();
        let err = ed.update_element(id, &ElementPatch::size(0.0, 10.0)).unwrap_err();
        assert_eq!(err.code(), "E_INVALID_SPEC");
        assert_eq!(ed.history_len(), len);
    }

    #[test]
    fn zoom_must_be_positive() {
        let mut ed = Editor::default();
        assert!(!ed.set_zoom(0.0));
        assert!(!ed.set_zoom(f64::NAN));
        assert!(ed.set_zoom(2.0));
        assert_eq!(ed.to_canvas(100.0, 50.0), Point::new(50.0, 25.0));
        assert_eq!(ed.overlay().handle_radius, 4.0);
    }

    #[test]
    fn escape_clears_selection() {
        let mut ed = Editor::default();
        ed.add_image("a.png").unwrap();
        assert!(ed.key("Escape", Modifiers::NONE));
        assert!(ed.selection().is_empty());
        assert!(!ed.key("Escape", Modifiers::NONE));
    }
}
