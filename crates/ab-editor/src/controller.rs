//! Pointer gesture state machine.
//!
//! Turns pointer events into live document edits: click-to-select, drag
//! (single and multi), resize and rotate through the selection handles, and
//! marquee selection. Edits are applied to the document as the pointer moves;
//! the returned [`Outcome`] tells the caller when a gesture finished with a
//! change worth an undo step.
//!
//! ## Modifier behaviors
//!
//! | Modifier | Click | Drag | Rotate | Empty canvas |
//! |----------|-------|------|--------|--------------|
//! | **Shift** | Toggle membership | — | Snap to 15° | Extend selection |

use crate::config::EditorConfig;
use crate::guides::{compute_guides, snap_offset};
use crate::input::{InputEvent, Modifiers};
use ab_core::geometry::{
    angle_between, apply_resize, apply_rotation_scale, clamp_into, distance, rescale, rotate_point,
    rotated_aabb, scale_font_size,
};
use ab_core::{
    Bounds, Document, ElementId, ElementKind, ElementPatch, Geom, Guideline, Handle, Point, Selection,
};
use ab_render::{HandleHit, hit_handle, hit_test, hit_test_rect};

/// Marquee rectangles this small are treated as a plain click on empty canvas.
const MIN_MARQUEE_AREA: f64 = 2.0;

/// What a pointer event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing visible changed.
    Unchanged,
    /// The document or the overlay changed; repaint.
    Redraw,
    /// A gesture finished with a document change. Record a history entry.
    Commit,
}

/// Per-event view parameters.
#[derive(Debug, Clone, Copy)]
pub struct View<'a> {
    pub config: &'a EditorConfig,
    /// Screen pixels per canvas unit.
    pub zoom: f64,
}

impl View<'_> {
    fn to_canvas(&self, screen: Point) -> Point {
        Point::new(screen.x / self.zoom, screen.y / self.zoom)
    }

    fn delta(&self, from: Point, to: Point) -> (f64, f64) {
        ((to.x - from.x) / self.zoom, (to.y - from.y) / self.zoom)
    }
}

/// Start state of a resize, kept so every move is computed from the origin.
#[derive(Debug, Clone, PartialEq)]
struct ResizeOrigin {
    geom: Geom,
    rotation: f64,
    /// Set for text; scaled along with the box.
    font_size: Option<f64>,
    /// Relative boxes of a group's children.
    children: Vec<(ElementId, Geom)>,
    /// Transform resize (text, groups) instead of moving edges.
    scale: bool,
}

#[derive(Debug, Clone, PartialEq)]
enum Gesture {
    Idle,
    /// Pressed on an element; not a drag until the threshold is crossed.
    PendingDrag {
        start: Point,
        target: ElementId,
        additive: bool,
    },
    Dragging {
        start: Point,
        target: ElementId,
        origins: Vec<(ElementId, Geom)>,
    },
    Resizing {
        start: Point,
        target: ElementId,
        handle: Handle,
        origin: ResizeOrigin,
    },
    Rotating {
        target: ElementId,
        center: Point,
        start_angle: f64,
        origin_rotation: f64,
    },
    /// Canvas-space corners plus the selection to extend.
    Marquee {
        start: Point,
        current: Point,
        base: Selection,
    },
}

impl Gesture {
    fn name(&self) -> &'static str {
        match self {
            Gesture::Idle => "idle",
            Gesture::PendingDrag { .. } => "pending",
            Gesture::Dragging { .. } => "dragging",
            Gesture::Resizing { .. } => "resizing",
            Gesture::Rotating { .. } => "rotating",
            Gesture::Marquee { .. } => "marquee",
        }
    }

    /// First element the gesture edits that is no longer in the document.
    fn missing(&self, doc: &Document) -> Option<ElementId> {
        let mut ids: Vec<ElementId> = Vec::new();
        match self {
            Gesture::Idle | Gesture::Marquee { .. } => {}
            Gesture::PendingDrag { target, .. } | Gesture::Rotating { target, .. } => ids.push(*target),
            Gesture::Dragging { origins, .. } => ids.extend(origins.iter().map(|(id, _)| *id)),
            Gesture::Resizing { target, origin, .. } => {
                ids.push(*target);
                ids.extend(origin.children.iter().map(|(id, _)| *id));
            }
        }
        ids.into_iter().find(|id| !doc.contains(*id))
    }

    /// Put every element this gesture touched back where it started.
    /// Ids that vanished meanwhile are skipped.
    fn restore(&self, doc: &mut Document) {
        match self {
            Gesture::Dragging { origins, .. } => {
                for (id, geom) in origins {
                    doc.set_geom(*id, *geom).ok();
                }
            }
            Gesture::Resizing { target, origin, .. } => {
                doc.set_geom(*target, origin.geom).ok();
                if let Some(size) = origin.font_size {
                    let patch = ElementPatch {
                        font_size: Some(size),
                        ..ElementPatch::default()
                    };
                    doc.update_element(*target, &patch).ok();
                }
                for (id, geom) in &origin.children {
                    doc.set_geom(*id, *geom).ok();
                }
            }
            Gesture::Rotating {
                target,
                origin_rotation,
                ..
            } => {
                doc.set_rotation(*target, *origin_rotation).ok();
            }
            Gesture::Idle | Gesture::PendingDrag { .. } | Gesture::Marquee { .. } => {}
        }
    }
}

/// Selection plus the gesture in flight.
#[derive(Debug, Clone)]
pub struct Controller {
    gesture: Gesture,
    selection: Selection,
    /// Guidelines for the drag in progress.
    guides: Vec<Guideline>,
}

impl Default for Controller {
    fn default() -> Self {
        Self::new()
    }
}

impl Controller {
    pub fn new() -> Self {
        Self {
            gesture: Gesture::Idle,
            selection: Selection::None,
            guides: Vec::new(),
        }
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn set_selection(&mut self, selection: Selection) {
        self.selection = selection;
    }

    /// Drop removed ids from the selection. Returns `true` if it changed.
    pub fn prune_selection(&mut self, doc: &Document) -> bool {
        let stale: Vec<ElementId> = self
            .selection
            .ids()
            .into_iter()
            .filter(|id| !doc.contains(*id))
            .collect();
        !stale.is_empty() && self.selection.prune(&stale)
    }

    pub fn guides(&self) -> &[Guideline] {
        &self.guides
    }

    /// Canvas-space rectangle of the marquee being dragged.
    pub fn marquee(&self) -> Option<Geom> {
        match &self.gesture {
            Gesture::Marquee { start, current, .. } => Some(Geom::from_corners(*start, *current)),
            _ => None,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.gesture == Gesture::Idle
    }

    pub fn gesture_name(&self) -> &'static str {
        self.gesture.name()
    }

    /// Dispatch a pointer event. Key events are not handled here.
    pub fn handle(&mut self, doc: &mut Document, event: &InputEvent, view: View<'_>) -> Outcome {
        let Some(p) = event.position() else {
            return Outcome::Unchanged;
        };
        let mods = event.modifiers();
        match event {
            InputEvent::PointerDown { .. } => self.pointer_down(doc, p, mods, view),
            InputEvent::PointerMove { .. } => self.pointer_move(doc, p, mods, view),
            InputEvent::PointerUp { .. } => self.pointer_up(doc, p, mods, view),
            InputEvent::Key { .. } => Outcome::Unchanged,
        }
    }

    // ─── Pointer down ────────────────────────────────────────────────────

    /// `screen` is in screen pixels relative to the canvas.
    pub fn pointer_down(&mut self, doc: &mut Document, screen: Point, mods: Modifiers, view: View<'_>) -> Outcome {
        if !self.is_idle() {
            // A lost pointer-up leaves the previous gesture dangling.
            log::debug!("pointer down during {}; cancelling it", self.gesture.name());
            self.cancel(doc);
        }
        let p = view.to_canvas(screen);

        if let Some(outcome) = self.press_handle(doc, screen, p, view) {
            return outcome;
        }

        match hit_test(doc, p) {
            Some(target) => {
                self.gesture = Gesture::PendingDrag {
                    start: screen,
                    target,
                    additive: mods.shift,
                };
                Outcome::Unchanged
            }
            None => {
                let base = if mods.shift {
                    self.selection.clone()
                } else {
                    Selection::None
                };
                let cleared = self.selection != base;
                self.selection = base.clone();
                self.gesture = Gesture::Marquee {
                    start: p,
                    current: p,
                    base,
                };
                if cleared { Outcome::Redraw } else { Outcome::Unchanged }
            }
        }
    }

    /// Start a resize or rotate if `p` lands on the single selection's chrome.
    fn press_handle(&mut self, doc: &Document, screen: Point, p: Point, view: View<'_>) -> Option<Outcome> {
        let id = self.selection.single()?;
        let el = doc.get(id)?;
        let abs = doc.absolute_geom(id)?;
        let cfg = view.config;
        let hit = hit_handle(
            abs,
            el.rotation,
            p,
            cfg.handle_radius / view.zoom,
            cfg.rotate_handle_offset / view.zoom,
        )?;

        self.gesture = match hit {
            HandleHit::Resize(handle) => {
                let children = el
                    .children()
                    .iter()
                    .filter_map(|c| doc.get(*c).map(|child| (*c, child.geom())))
                    .collect();
                log::debug!("resize {id} from {}", handle.as_str());
                Gesture::Resizing {
                    start: screen,
                    target: id,
                    handle,
                    origin: ResizeOrigin {
                        geom: el.geom(),
                        rotation: el.rotation,
                        font_size: el.font_size(),
                        children,
                        scale: matches!(el.kind, ElementKind::Text(_) | ElementKind::Group(_)),
                    },
                }
            }
            HandleHit::Rotate => {
                let center = abs.center();
                log::debug!("rotate {id}");
                Gesture::Rotating {
                    target: id,
                    center,
                    start_angle: angle_between(center, p),
                    origin_rotation: el.rotation,
                }
            }
        };
        Some(Outcome::Redraw)
    }

    // ─── Pointer move ────────────────────────────────────────────────────

    pub fn pointer_move(&mut self, doc: &mut Document, screen: Point, mods: Modifiers, view: View<'_>) -> Outcome {
        if let Some(missing) = self.gesture.missing(doc) {
            return self.abort(doc, missing);
        }

        let gesture = std::mem::replace(&mut self.gesture, Gesture::Idle);
        match gesture {
            Gesture::Idle => Outcome::Unchanged,
            Gesture::PendingDrag {
                start,
                target,
                additive,
            } => {
                if distance(start, screen) < view.config.drag_threshold {
                    self.gesture = Gesture::PendingDrag {
                        start,
                        target,
                        additive,
                    };
                    return Outcome::Unchanged;
                }
                // Dragging an unselected element selects it first.
                if !self.selection.contains(target) {
                    if additive {
                        self.selection.toggle(target);
                    } else {
                        self.selection = Selection::Single(target);
                    }
                }
                let origins: Vec<(ElementId, Geom)> = self
                    .selection
                    .ids()
                    .into_iter()
                    .filter_map(|id| doc.get(id))
                    .filter(|el| el.parent_id.is_none())
                    .map(|el| (el.id, el.geom()))
                    .collect();
                log::debug!("drag {} element(s), grabbed {target}", origins.len());
                self.drag(doc, start, screen, target, origins, view)
            }
            Gesture::Dragging { start, target, origins } => self.drag(doc, start, screen, target, origins, view),
            Gesture::Resizing {
                start,
                target,
                handle,
                origin,
            } => self.resize(doc, start, screen, target, handle, origin, view),
            Gesture::Rotating {
                target,
                center,
                start_angle,
                origin_rotation,
            } => {
                let p = view.to_canvas(screen);
                let mut rotation = origin_rotation + angle_between(center, p) - start_angle;
                let step = view.config.rotation_snap;
                if mods.shift && step > 0.0 {
                    rotation = (rotation / step).round() * step;
                }
                if let Err(e) = doc.set_rotation(target, rotation) {
                    log::warn!("rotate {target}: {e}");
                }
                self.gesture = Gesture::Rotating {
                    target,
                    center,
                    start_angle,
                    origin_rotation,
                };
                Outcome::Redraw
            }
            Gesture::Marquee { start, base, .. } => {
                self.gesture = Gesture::Marquee {
                    start,
                    current: view.to_canvas(screen),
                    base,
                };
                Outcome::Redraw
            }
        }
    }

    /// Move every dragged element to its origin plus the pointer delta.
    fn drag(
        &mut self,
        doc: &mut Document,
        start: Point,
        screen: Point,
        target: ElementId,
        origins: Vec<(ElementId, Geom)>,
        view: View<'_>,
    ) -> Outcome {
        let cfg = view.config;
        let (mut dx, mut dy) = view.delta(start, screen);

        if let Some((_, primary)) = origins.iter().find(|(id, _)| *id == target) {
            let rotation = doc.get(target).map_or(0.0, |el| el.rotation);
            let siblings: Vec<Bounds> = doc
                .root_elements()
                .filter(|el| !origins.iter().any(|(id, _)| *id == el.id))
                .map(|el| rotated_aabb(el.geom(), el.rotation).bounds())
                .collect();
            let board = doc.artboard.geom();
            let moving = |dx: f64, dy: f64| rotated_aabb(primary.translate(dx, dy), rotation).bounds();

            if cfg.snap_to_guides {
                let (sx, sy) = snap_offset(moving(dx, dy), &siblings, board, cfg.snap_tolerance);
                dx += sx;
                dy += sy;
            }
            self.guides = compute_guides(moving(dx, dy), &siblings, board, cfg.snap_tolerance);
        }

        for (id, geom) in &origins {
            if let Err(e) = doc.set_geom(*id, geom.translate(dx, dy)) {
                log::warn!("drag {id}: {e}");
            }
        }
        log::trace!("drag by ({dx:.1}, {dy:.1})");

        self.gesture = Gesture::Dragging { start, target, origins };
        Outcome::Redraw
    }

    #[allow(clippy::too_many_arguments)]
    fn resize(
        &mut self,
        doc: &mut Document,
        start: Point,
        screen: Point,
        target: ElementId,
        handle: Handle,
        origin: ResizeOrigin,
        view: View<'_>,
    ) -> Outcome {
        let min_size = view.config.min_size;
        let (dx, dy) = view.delta(start, screen);
        // Pointer delta in the element's unrotated frame.
        let local = rotate_point(Point::new(dx, dy), Point::new(0.0, 0.0), -origin.rotation);

        let (geom, factors) = if origin.scale {
            let r = apply_rotation_scale(origin.geom, handle, local.x, local.y, min_size, true);
            (r.geom, Some((r.scale_x, r.scale_y)))
        } else {
            (apply_resize(origin.geom, handle, local.x, local.y, min_size), None)
        };
        let geom = pin_opposite(origin.geom, geom, handle, origin.rotation);

        if let Err(e) = doc.set_geom(target, geom) {
            log::warn!("resize {target}: {e}");
        }
        if let Some((sx, sy)) = factors {
            if let Some(size) = origin.font_size {
                let patch = ElementPatch {
                    font_size: Some(scale_font_size(size, sx, sy)),
                    ..ElementPatch::default()
                };
                if let Err(e) = doc.update_element(target, &patch) {
                    log::warn!("resize {target}: {e}");
                }
            }
            for (id, child) in &origin.children {
                if let Err(e) = doc.set_geom(*id, rescale(*child, sx, sy)) {
                    log::warn!("resize {id}: {e}");
                }
            }
        }

        self.gesture = Gesture::Resizing {
            start,
            target,
            handle,
            origin,
        };
        Outcome::Redraw
    }

    // ─── Pointer up ──────────────────────────────────────────────────────

    pub fn pointer_up(&mut self, doc: &mut Document, screen: Point, _mods: Modifiers, view: View<'_>) -> Outcome {
        if let Some(missing) = self.gesture.missing(doc) {
            return self.abort(doc, missing);
        }

        self.guides.clear();
        let gesture = std::mem::replace(&mut self.gesture, Gesture::Idle);
        match gesture {
            Gesture::Idle => Outcome::Unchanged,
            Gesture::PendingDrag { target, additive, .. } => {
                if additive {
                    self.selection.toggle(target);
                } else {
                    self.selection = Selection::Single(target);
                }
                Outcome::Redraw
            }
            Gesture::Dragging { origins, .. } => {
                if view.config.clamp_to_artboard {
                    let (w, h) = (f64::from(doc.artboard.width), f64::from(doc.artboard.height));
                    for (id, _) in &origins {
                        if let Some(el) = doc.get(*id) {
                            let clamped = clamp_into(el.geom(), w, h);
                            doc.set_geom(*id, clamped).ok();
                        }
                    }
                }
                let moved = origins
                    .iter()
                    .any(|(id, geom)| doc.get(*id).is_some_and(|el| el.geom() != *geom));
                if moved { Outcome::Commit } else { Outcome::Redraw }
            }
            Gesture::Resizing { target, origin, .. } => {
                let changed = doc.get(target).is_some_and(|el| el.geom() != origin.geom);
                if changed { Outcome::Commit } else { Outcome::Redraw }
            }
            Gesture::Rotating {
                target,
                origin_rotation,
                ..
            } => {
                let changed = doc.get(target).is_some_and(|el| el.rotation != origin_rotation);
                if changed { Outcome::Commit } else { Outcome::Redraw }
            }
            Gesture::Marquee { start, base, .. } => {
                let rect = Geom::from_corners(start, view.to_canvas(screen));
                if rect.width * rect.height > MIN_MARQUEE_AREA {
                    let hits = hit_test_rect(doc, rect);
                    log::debug!("marquee picked {} element(s)", hits.len());
                    self.selection = Selection::from_ids(base.ids().into_iter().chain(hits));
                }
                Outcome::Redraw
            }
        }
    }

    // ─── Cancel ──────────────────────────────────────────────────────────

    /// Escape: drop the gesture and put its elements back.
    pub fn cancel(&mut self, doc: &mut Document) -> Outcome {
        self.guides.clear();
        let gesture = std::mem::replace(&mut self.gesture, Gesture::Idle);
        gesture.restore(doc);
        match gesture {
            Gesture::Idle | Gesture::PendingDrag { .. } => Outcome::Unchanged,
            Gesture::Marquee { base, .. } => {
                self.selection = base;
                Outcome::Redraw
            }
            _ => Outcome::Redraw,
        }
    }

    /// Drop the gesture after an element it edits disappeared.
    fn abort(&mut self, doc: &mut Document, missing: ElementId) -> Outcome {
        log::warn!("{} aborted: {missing} no longer exists", self.gesture.name());
        self.cancel(doc);
        self.prune_selection(doc);
        Outcome::Redraw
    }
}

/// Shift a resized box so the point opposite the grabbed handle stays where
/// it was on screen. Only matters for rotated boxes: the rotation centre
/// moves with the box.
fn pin_opposite(origin: Geom, resized: Geom, handle: Handle, rotation: f64) -> Geom {
    if rotation == 0.0 {
        return resized;
    }
    let (fx, fy) = handle.anchor_fraction();
    let (ax, ay) = (1.0 - fx, 1.0 - fy);
    let anchor = |g: Geom| {
        let local = Point::new(g.x + g.width * ax, g.y + g.height * ay);
        rotate_point(local, g.center(), rotation)
    };
    let before = anchor(origin);
    let after = anchor(resized);
    resized.translate(before.x - after.x, before.y - after.y)
}
