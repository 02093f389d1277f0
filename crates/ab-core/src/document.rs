//! The scene document: artboard plus a flat list of elements.
//!
//! Every public mutation either succeeds and leaves the document valid, or
//! returns a [`DocumentError`] and leaves it untouched. Debug builds re-check
//! the full invariant set after each successful mutation.

use crate::error::DocumentError;
use crate::geometry::{
    Geom, Point, fit_within, normalize_rotation, rescale, rotate_point, to_absolute, union_all,
};
use crate::id::ElementId;
use crate::model::{Artboard, Element, ElementKind, ElementPatch, ElementSpec, GroupProps};
use serde::Serialize;
use smallvec::SmallVec;
use std::collections::HashSet;

/// The retained scene edited by the canvas.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Document {
    pub artboard: Artboard,
    elements: Vec<Element>,
}

impl Document {
    #[must_use]
    pub fn new(artboard: Artboard) -> Self {
        Self {
            artboard,
            elements: Vec::new(),
        }
    }

    /// Build a document from already-identified elements (import path).
    pub fn from_parts(artboard: Artboard, elements: Vec<Element>) -> Result<Self, DocumentError> {
        let doc = Self { artboard, elements };
        doc.validate()?;
        Ok(doc)
    }

    // ─── Queries ─────────────────────────────────────────────────────────

    /// All elements in insertion order.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.index_of(id).is_some()
    }

    pub(crate) fn index_of(&self, id: ElementId) -> Option<usize> {
        self.elements.iter().position(|e| e.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.id == id)
    }

    pub(crate) fn elements_mut(&mut self) -> &mut [Element] {
        &mut self.elements
    }

    fn require(&self, id: ElementId) -> Result<&Element, DocumentError> {
        self.get(id).ok_or(DocumentError::NotFound(id))
    }

    /// Child ids of a group; empty for non-groups and unknown ids.
    pub fn children_of(&self, id: ElementId) -> &[ElementId] {
        self.get(id).map(Element::children).unwrap_or(&[])
    }

    /// Elements without a parent, in insertion order.
    pub fn root_elements(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter().filter(|e| e.parent_id.is_none())
    }

    /// z-index for the next added element: `max(z) + 1`, or 1 when empty.
    pub fn next_z_index(&self) -> i64 {
        self.elements
            .iter()
            .map(|e| e.z_index)
            .max()
            .map_or(1, |z| z + 1)
    }

    /// Canvas-space box of an element (children are offset by their group).
    pub fn absolute_geom(&self, id: ElementId) -> Option<Geom> {
        let el = self.get(id)?;
        match el.parent_id.and_then(|p| self.get(p)) {
            Some(parent) => Some(to_absolute(el.geom(), &[parent.geom()])),
            None => Some(el.geom()),
        }
    }

    fn fresh_id(&self, prefix: &str) -> ElementId {
        loop {
            let id = ElementId::with_prefix(prefix);
            if !self.contains(id) {
                return id;
            }
        }
    }

    // ─── Mutations ───────────────────────────────────────────────────────

    /// Add a new root element with a generated id on top of the stack.
    pub fn add_element(&mut self, spec: ElementSpec) -> Result<ElementId, DocumentError> {
        if matches!(spec.kind, ElementKind::Group(_)) {
            return Err(DocumentError::InvalidSpec(
                "groups are created by grouping existing elements".into(),
            ));
        }
        check_size(spec.geom)?;
        check_rotation(spec.rotation)?;
        if let ElementKind::Text(t) = &spec.kind {
            check_font_size(t.font_size)?;
        }

        let id = self.fresh_id(spec.kind.name());
        let z_index = self.elements.iter().map(|e| e.z_index).max().unwrap_or(0).max(0) + 1;
        self.elements.push(Element {
            id,
            x: spec.geom.x,
            y: spec.geom.y,
            width: spec.geom.width,
            height: spec.geom.height,
            rotation: normalize_rotation(spec.rotation),
            z_index,
            parent_id: None,
            kind: spec.kind,
        });
        log::debug!("added {id} (z={z_index})");
        self.debug_validate();
        Ok(id)
    }

    /// Merge the present fields of `patch` into an element.
    pub fn update_element(&mut self, id: ElementId, patch: &ElementPatch) -> Result<(), DocumentError> {
        let idx = self.index_of(id).ok_or(DocumentError::NotFound(id))?;
        let mut updated = self.elements[idx].clone();
        patch
            .apply_to(&mut updated)
            .map_err(|msg| DocumentError::InvalidSpec(msg.into()))?;
        check_size(updated.geom())?;
        check_rotation(updated.rotation)?;
        if let Some(size) = updated.font_size() {
            check_font_size(size)?;
        }
        self.elements[idx] = updated;
        self.debug_validate();
        Ok(())
    }

    /// Replace an element's box (live gesture updates).
    pub fn set_geom(&mut self, id: ElementId, geom: Geom) -> Result<(), DocumentError> {
        check_size(geom)?;
        let el = self.get_mut(id).ok_or(DocumentError::NotFound(id))?;
        el.set_geom(geom);
        Ok(())
    }

    pub fn set_rotation(&mut self, id: ElementId, degrees: f64) -> Result<(), DocumentError> {
        check_rotation(degrees)?;
        let el = self.get_mut(id).ok_or(DocumentError::NotFound(id))?;
        el.rotation = normalize_rotation(degrees);
        Ok(())
    }

    /// Remove an element. Removing a group removes its children; a group
    /// left without children is removed too. Returns every removed id.
    pub fn remove_element(&mut self, id: ElementId) -> Result<Vec<ElementId>, DocumentError> {
        let el = self.require(id)?;
        let parent_id = el.parent_id;
        let mut removed: Vec<ElementId> = vec![id];
        removed.extend_from_slice(el.children());

        if let Some(parent_id) = parent_id
            && let Some(parent) = self.get_mut(parent_id)
            && let ElementKind::Group(g) = &mut parent.kind
        {
            g.children.retain(|c| *c != id);
            if g.children.is_empty() {
                removed.push(parent_id);
            }
        }

        self.elements.retain(|e| !removed.contains(&e.id));
        log::debug!("removed {removed:?}");
        self.debug_validate();
        Ok(removed)
    }

    /// Move elements into `group` (or back to the root with `None`), keeping
    /// their canvas position. Groups emptied by the move are removed.
    pub fn reparent(&mut self, child_ids: &[ElementId], group: Option<ElementId>) -> Result<(), DocumentError> {
        let origin = match group {
            Some(gid) => {
                let g = self.require(gid)?;
                if !g.is_group() {
                    return Err(DocumentError::ConstraintViolation(format!("{gid} is not a group")));
                }
                Point::new(g.x, g.y)
            }
            None => Point::new(0.0, 0.0),
        };
        for &cid in child_ids {
            let child = self.require(cid)?;
            if child.is_group() {
                return Err(DocumentError::ConstraintViolation(format!(
                    "{cid} is a group and groups cannot be nested"
                )));
            }
        }

        let mut emptied: Vec<ElementId> = Vec::new();
        for &cid in child_ids {
            let Some(abs) = self.absolute_geom(cid) else {
                continue;
            };
            let old_parent = self.get(cid).and_then(|c| c.parent_id);
            if old_parent == group {
                continue;
            }
            if let Some(pid) = old_parent
                && let Some(parent) = self.get_mut(pid)
                && let ElementKind::Group(g) = &mut parent.kind
            {
                g.children.retain(|c| *c != cid);
                if g.children.is_empty() {
                    emptied.push(pid);
                }
            }
            if let Some(gid) = group
                && let Some(parent) = self.get_mut(gid)
                && let ElementKind::Group(g) = &mut parent.kind
            {
                g.children.push(cid);
            }
            if let Some(child) = self.get_mut(cid) {
                child.set_geom(abs.translate(-origin.x, -origin.y));
                child.parent_id = group;
            }
        }
        self.elements.retain(|e| !emptied.contains(&e.id));
        self.debug_validate();
        Ok(())
    }

    /// Wrap two or more root elements in a new group sized to their bounding
    /// box. The group goes on top of the stack.
    pub fn group_elements(&mut self, ids: &[ElementId]) -> Result<ElementId, DocumentError> {
        let mut members: SmallVec<[ElementId; 4]> = SmallVec::new();
        for &id in ids {
            if !members.contains(&id) {
                members.push(id);
            }
        }
        if members.len() < 2 {
            return Err(DocumentError::ConstraintViolation(
                "grouping needs at least two elements".into(),
            ));
        }
        for &id in &members {
            let el = self.require(id)?;
            if el.is_group() {
                return Err(DocumentError::ConstraintViolation(format!(
                    "{id} is a group and groups cannot be nested"
                )));
            }
            if el.parent_id.is_some() {
                return Err(DocumentError::ConstraintViolation(format!("{id} is already grouped")));
            }
        }

        let Some(bbox) = union_all(members.iter().filter_map(|id| self.get(*id)).map(Element::geom)) else {
            return Err(DocumentError::ConstraintViolation("nothing to group".into()));
        };
        let gid = self.fresh_id("group");
        let z_index = self.next_z_index();

        for el in self.elements.iter_mut().filter(|e| members.contains(&e.id)) {
            el.x -= bbox.x;
            el.y -= bbox.y;
            el.parent_id = Some(gid);
        }
        self.elements.push(Element {
            id: gid,
            x: bbox.x,
            y: bbox.y,
            width: bbox.width,
            height: bbox.height,
            rotation: 0.0,
            z_index,
            parent_id: None,
            kind: ElementKind::Group(GroupProps { children: members }),
        });
        log::debug!("grouped into {gid}");
        self.debug_validate();
        Ok(gid)
    }

    /// Dissolve a group, returning its former children. Children get their
    /// canvas-space position back; a rotated group hands its rotation down.
    pub fn ungroup(&mut self, group_id: ElementId) -> Result<Vec<ElementId>, DocumentError> {
        let group = self.require(group_id)?;
        if !group.is_group() {
            return Err(DocumentError::ConstraintViolation(format!("{group_id} is not a group")));
        }
        let origin = Point::new(group.x, group.y);
        let pivot = group.geom().center();
        let group_rotation = group.rotation;
        let children: Vec<ElementId> = group.children().to_vec();

        for el in self.elements.iter_mut().filter(|e| e.parent_id == Some(group_id)) {
            let abs = el.geom().translate(origin.x, origin.y);
            if group_rotation == 0.0 {
                el.set_geom(abs);
            } else {
                let c = rotate_point(abs.center(), pivot, group_rotation);
                el.set_geom(Geom::new(c.x - abs.width / 2.0, c.y - abs.height / 2.0, abs.width, abs.height));
                el.rotation = normalize_rotation(el.rotation + group_rotation);
            }
            el.parent_id = None;
        }
        self.elements.retain(|e| e.id != group_id);
        log::debug!("ungrouped {group_id} into {children:?}");
        self.debug_validate();
        Ok(children)
    }

    /// Copy root elements (with their children) offset by `(dx, dy)`.
    /// Returns the new root ids in input order.
    pub fn duplicate(&mut self, ids: &[ElementId], dx: f64, dy: f64) -> Result<Vec<ElementId>, DocumentError> {
        for &id in ids {
            self.require(id)?;
        }
        let mut created = Vec::with_capacity(ids.len());
        for &id in ids {
            let Some(src) = self.get(id).cloned() else {
                continue;
            };
            if src.parent_id.is_some() {
                continue;
            }
            let new_id = self.fresh_id(src.kind.name());
            let mut copy = src.clone();
            copy.id = new_id;
            copy.x += dx;
            copy.y += dy;
            copy.z_index = self.next_z_index();

            let mut kids: Vec<Element> = Vec::new();
            if let ElementKind::Group(g) = &mut copy.kind {
                g.children.clear();
                for cid in src.children() {
                    if let Some(child) = self.get(*cid) {
                        let mut c = child.clone();
                        c.id = self.fresh_id(c.kind.name());
                        c.parent_id = Some(new_id);
                        g.children.push(c.id);
                        kids.push(c);
                    }
                }
            }
            self.elements.extend(kids);
            self.elements.push(copy);
            created.push(new_id);
        }
        self.debug_validate();
        Ok(created)
    }

    /// Resize the artboard and rescale every element by the same per-axis
    /// factor.
    pub fn resize_artboard(&mut self, width: u32, height: u32) -> Result<(), DocumentError> {
        if width == 0 || height == 0 {
            return Err(DocumentError::InvalidSpec("artboard size must be positive".into()));
        }
        let fx = f64::from(width) / f64::from(self.artboard.width);
        let fy = f64::from(height) / f64::from(self.artboard.height);
        for el in &mut self.elements {
            el.set_geom(rescale(el.geom(), fx, fy));
        }
        self.artboard.width = width;
        self.artboard.height = height;
        log::debug!("artboard resized to {width}x{height}");
        self.debug_validate();
        Ok(())
    }

    /// Fit an image into a `max × max` box once its natural size is known.
    /// Returns `true` if the geometry changed.
    pub fn fit_image(&mut self, id: ElementId, natural_w: f64, natural_h: f64, max: f64) -> Result<bool, DocumentError> {
        let el = self.require(id)?;
        if !matches!(el.kind, ElementKind::Image(_)) {
            return Err(DocumentError::InvalidSpec(format!("{id} is not an image")));
        }
        let (w, h) = fit_within(natural_w, natural_h, max);
        if !(w > 0.0 && h > 0.0 && w.is_finite() && h.is_finite()) {
            return Err(DocumentError::InvalidSpec("image has no natural size".into()));
        }
        if el.width == w && el.height == h {
            return Ok(false);
        }
        let geom = Geom::new(el.x, el.y, w, h);
        self.set_geom(id, geom)?;
        Ok(true)
    }

    // ─── Invariants ──────────────────────────────────────────────────────

    /// Check the structural invariants: unique ids, positive finite sizes,
    /// positive font sizes and consistent one-level grouping.
    pub fn validate(&self) -> Result<(), DocumentError> {
        if self.artboard.width == 0 || self.artboard.height == 0 {
            return Err(DocumentError::InvalidSpec("artboard size must be positive".into()));
        }

        let mut seen = HashSet::with_capacity(self.elements.len());
        for el in &self.elements {
            if !seen.insert(el.id) {
                return Err(DocumentError::ConstraintViolation(format!("duplicate id {}", el.id)));
            }
            check_size(el.geom()).map_err(|e| with_id(e, el.id))?;
            if !el.rotation.is_finite() {
                return Err(DocumentError::InvalidSpec(format!("{}: rotation must be finite", el.id)));
            }
            if let Some(size) = el.font_size() {
                check_font_size(size).map_err(|e| with_id(e, el.id))?;
            }
        }

        for el in &self.elements {
            if let Some(pid) = el.parent_id {
                let parent = self.get(pid).ok_or(DocumentError::NotFound(pid))?;
                if !parent.children().contains(&el.id) {
                    return Err(DocumentError::ConstraintViolation(format!(
                        "{} claims parent {pid} which does not list it",
                        el.id
                    )));
                }
            }
            if el.is_group() {
                if el.parent_id.is_some() {
                    return Err(DocumentError::ConstraintViolation(format!("group {} is nested", el.id)));
                }
                if el.children().is_empty() {
                    return Err(DocumentError::ConstraintViolation(format!("group {} is empty", el.id)));
                }
                for cid in el.children() {
                    let child = self.get(*cid).ok_or(DocumentError::NotFound(*cid))?;
                    if child.parent_id != Some(el.id) {
                        return Err(DocumentError::ConstraintViolation(format!(
                            "{cid} is listed by group {} but does not point back",
                            el.id
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    fn debug_validate(&self) {
        debug_assert!(
            self.validate().is_ok(),
            "document invariant broken: {:?}",
            self.validate()
        );
    }
}

fn check_size(geom: Geom) -> Result<(), DocumentError> {
    if !geom.is_finite() {
        return Err(DocumentError::InvalidSpec("geometry must be finite".into()));
    }
    if geom.width <= 0.0 || geom.height <= 0.0 {
        return Err(DocumentError::InvalidSpec(format!(
            "size must be positive, got {}x{}",
            geom.width, geom.height
        )));
    }
    Ok(())
}

fn check_rotation(degrees: f64) -> Result<(), DocumentError> {
    if degrees.is_finite() {
        Ok(())
    } else {
        Err(DocumentError::InvalidSpec(format!("rotation must be finite, got {degrees}")))
    }
}

fn check_font_size(size: f64) -> Result<(), DocumentError> {
    if size > 0.0 && size.is_finite() {
        Ok(())
    } else {
        Err(DocumentError::InvalidSpec(format!("font size must be positive, got {size}")))
    }
}

fn with_id(err: DocumentError, id: ElementId) -> DocumentError {
    match err {
        DocumentError::InvalidSpec(msg) => DocumentError::InvalidSpec(format!("{id}: {msg}")),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ShapeKind, TextProps};
    use pretty_assertions::assert_eq;

    #[test]
    fn add_assigns_ids_and_increasing_z() {
        let mut doc = Document::default();
        let a = doc.add_element(ElementSpec::image("a.png")).unwrap();
        let b = doc.add_element(ElementSpec::text("Hello")).unwrap();
        assert!(a.as_str().starts_with("image_"));
        assert!(b.as_str().starts_with("text_"));
        assert_eq!(doc.get(a).unwrap().z_index, 1);
        assert_eq!(doc.get(b).unwrap().z_index, 2);
        assert_eq!(doc.next_z_index(), 3);
    }

    #[test]
    fn add_rejects_bad_specs() {
        let mut doc = Document::default();
        let bad_size = ElementSpec::shape(ShapeKind::Star).sized(0.0, 10.0);
        assert!(matches!(doc.add_element(bad_size), Err(DocumentError::InvalidSpec(_))));

        let mut bad_font = ElementSpec::text("x");
        bad_font.kind = ElementKind::Text(TextProps {
            font_size: 0.0,
            ..TextProps::default()
        });
        assert!(matches!(doc.add_element(bad_font), Err(DocumentError::InvalidSpec(_))));

        let group = ElementSpec {
            kind: ElementKind::Group(GroupProps::default()),
            geom: Geom::new(0.0, 0.0, 10.0, 10.0),
            rotation: 0.0,
        };
        assert!(matches!(doc.add_element(group), Err(DocumentError::InvalidSpec(_))));

        for degrees in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let spec = ElementSpec::image("a.png").rotated(degrees);
            assert!(matches!(doc.add_element(spec), Err(DocumentError::InvalidSpec(_))));
        }
        assert!(doc.is_empty());
    }

    #[test]
    fn non_finite_rotation_patch_is_rejected() {
        let mut doc = Document::default();
        let id = doc.add_element(ElementSpec::image("a.png").rotated(30.0)).unwrap();
        let before = doc.clone();

        for degrees in [f64::NAN, f64::INFINITY] {
            let patch = ElementPatch {
                x: Some(5.0),
                rotation: Some(degrees),
                ..ElementPatch::default()
            };
            assert!(matches!(doc.update_element(id, &patch), Err(DocumentError::InvalidSpec(_))));
        }
        assert!(doc.set_rotation(id, f64::NAN).is_err());
        assert_eq!(doc, before);

        let patch = ElementPatch {
            rotation: Some(-90.0),
            ..ElementPatch::default()
        };
        doc.update_element(id, &patch).unwrap();
        assert_eq!(doc.get(id).unwrap().rotation, 270.0);
    }

    #[test]
    fn update_is_atomic_on_error() {
        let mut doc = Document::default();
        let id = doc.add_element(ElementSpec::text("Hi")).unwrap();
        let before = doc.clone();

        let patch = ElementPatch {
            x: Some(500.0),
            font_size: Some(-3.0),
            ..ElementPatch::default()
        };
        assert!(doc.update_element(id, &patch).is_err());
        assert_eq!(doc, before);

        let missing = ElementId::intern("no_such_element");
        assert_eq!(
            doc.update_element(missing, &ElementPatch::position(1.0, 1.0)),
            Err(DocumentError::NotFound(missing))
        );
    }

    #[test]
    fn group_and_ungroup_restore_positions() {
        let mut doc = Document::default();
        let a = doc.add_element(ElementSpec::image("a.png")).unwrap();
        let b = doc
            .add_element(ElementSpec::shape(ShapeKind::Circle).at(350.0, 40.0).sized(60.0, 60.0))
            .unwrap();
        let before_a = doc.absolute_geom(a).unwrap();
        let before_b = doc.absolute_geom(b).unwrap();

        let g = doc.group_elements(&[a, b]).unwrap();
        assert_eq!(doc.get(g).unwrap().geom(), Geom::new(100.0, 40.0, 310.0, 210.0));
        assert_eq!(doc.get(a).unwrap().geom(), Geom::new(0.0, 60.0, 200.0, 150.0));
        assert_eq!(doc.absolute_geom(a).unwrap(), before_a);

        let children = doc.ungroup(g).unwrap();
        assert_eq!(children, vec![a, b]);
        assert!(doc.get(g).is_none());
        assert_eq!(doc.get(a).unwrap().geom(), before_a);
        assert_eq!(doc.get(b).unwrap().geom(), before_b);
        assert_eq!(doc.get(a).unwrap().parent_id, None);
    }

    #[test]
    fn grouping_constraints() {
        let mut doc = Document::default();
        let a = doc.add_element(ElementSpec::image("a.png")).unwrap();
        let b = doc.add_element(ElementSpec::text("b")).unwrap();
        let c = doc.add_element(ElementSpec::text("c")).unwrap();

        assert!(matches!(doc.group_elements(&[a]), Err(DocumentError::ConstraintViolation(_))));
        assert!(matches!(doc.group_elements(&[a, a]), Err(DocumentError::ConstraintViolation(_))));

        let g = doc.group_elements(&[a, b]).unwrap();
        assert!(matches!(doc.group_elements(&[a, c]), Err(DocumentError::ConstraintViolation(_))));
        assert!(matches!(doc.group_elements(&[g, c]), Err(DocumentError::ConstraintViolation(_))));
        assert!(matches!(doc.ungroup(c), Err(DocumentError::ConstraintViolation(_))));
    }

    #[test]
    fn removing_last_child_removes_group() {
        let mut doc = Document::default();
        let a = doc.add_element(ElementSpec::image("a.png")).unwrap();
        let b = doc.add_element(ElementSpec::text("b")).unwrap();
        let g = doc.group_elements(&[a, b]).unwrap();

        assert_eq!(doc.remove_element(a).unwrap(), vec![a]);
        assert_eq!(doc.children_of(g), &[b]);
        let removed = doc.remove_element(b).unwrap();
        assert_eq!(removed, vec![b, g]);
        assert!(doc.is_empty());
    }

    #[test]
    fn removing_group_removes_children() {
        let mut doc = Document::default();
        let a = doc.add_element(ElementSpec::image("a.png")).unwrap();
        let b = doc.add_element(ElementSpec::text("b")).unwrap();
        let g = doc.group_elements(&[a, b]).unwrap();
        let removed = doc.remove_element(g).unwrap();
        assert_eq!(removed, vec![g, a, b]);
        assert!(doc.is_empty());
    }

    #[test]
    fn reparent_keeps_canvas_position() {
        let mut doc = Document::default();
        let a = doc.add_element(ElementSpec::image("a.png")).unwrap();
        let b = doc.add_element(ElementSpec::text("b").at(300.0, 300.0)).unwrap();
        let c = doc.add_element(ElementSpec::text("c").at(10.0, 500.0)).unwrap();
        let g = doc.group_elements(&[a, b]).unwrap();

        let before = doc.absolute_geom(c).unwrap();
        doc.reparent(&[c], Some(g)).unwrap();
        assert_eq!(doc.absolute_geom(c).unwrap(), before);
        assert_eq!(doc.children_of(g), &[a, b, c]);

        doc.reparent(&[c], None).unwrap();
        assert_eq!(doc.get(c).unwrap().geom(), before);
        assert_eq!(doc.children_of(g), &[a, b]);
    }

    #[test]
    fn artboard_resize_scales_elements() {
        let mut doc = Document::default();
        let a = doc.add_element(ElementSpec::image("a.png")).unwrap();
        doc.resize_artboard(1600, 300).unwrap();
        assert_eq!(doc.get(a).unwrap().geom(), Geom::new(200.0, 50.0, 400.0, 75.0));
        assert!(doc.resize_artboard(0, 300).is_err());
    }

    #[test]
    fn fit_image_reports_change() {
        let mut doc = Document::default();
        let a = doc.add_element(ElementSpec::image("a.png")).unwrap();
        assert!(doc.fit_image(a, 1200.0, 600.0, 300.0).unwrap());
        assert_eq!(doc.get(a).unwrap().geom(), Geom::new(100.0, 100.0, 300.0, 150.0));
        assert!(!doc.fit_image(a, 1200.0, 600.0, 300.0).unwrap());
    }

    #[test]
    fn duplicate_copies_groups_with_children() {
        let mut doc = Document::default();
        let a = doc.add_element(ElementSpec::image("a.png")).unwrap();
        let b = doc.add_element(ElementSpec::text("b")).unwrap();
        let g = doc.group_elements(&[a, b]).unwrap();

        let copies = doc.duplicate(&[g], 20.0, 20.0).unwrap();
        assert_eq!(copies.len(), 1);
        let copy = doc.get(copies[0]).unwrap();
        assert_eq!(copy.x, 120.0);
        assert_eq!(copy.children().len(), 2);
        assert!(!copy.children().contains(&a));
        assert_eq!(doc.len(), 6);
        assert!(doc.validate().is_ok());
    }
}
