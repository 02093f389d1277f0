//! Hit testing: point → element lookup.
//!
//! Walks root elements in reverse paint order (topmost first). Groups are
//! hit as a whole, so a click on a grouped child resolves to its group.

use ab_core::geometry::{contains_rotated, distance, rotate_point, rotated_aabb};
use ab_core::{Document, ElementId, Geom, Handle, Point};

/// What a pointer landed on in the selection chrome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleHit {
    Resize(Handle),
    Rotate,
}

/// Find the topmost root element at `p` (canvas space).
/// Returns `None` for empty artboard.
pub fn hit_test(doc: &Document, p: Point) -> Option<ElementId> {
    doc.paint_order()
        .into_iter()
        .rev()
        .find(|el| contains_rotated(el.geom(), el.rotation, p))
        .map(|el| el.id)
}

/// All root elements whose on-screen bounds intersect `rect`, in paint order.
/// Used for marquee selection.
pub fn hit_test_rect(doc: &Document, rect: Geom) -> Vec<ElementId> {
    doc.paint_order()
        .into_iter()
        .filter(|el| rotated_aabb(el.geom(), el.rotation).intersects(&rect))
        .map(|el| el.id)
        .collect()
}

/// Axis-aligned canvas-space bounds of an element, including its rotation.
pub fn element_aabb(doc: &Document, id: ElementId) -> Option<Geom> {
    let el = doc.get(id)?;
    let abs = doc.absolute_geom(id)?;
    Some(rotated_aabb(abs, el.rotation))
}

/// Canvas-space position of each resize grip of a (possibly rotated) box.
pub fn handle_points(geom: Geom, rotation: f64) -> [(Handle, Point); 8] {
    let c = geom.center();
    Handle::ALL.map(|h| {
        let (fx, fy) = h.anchor_fraction();
        let local = Point::new(geom.x + geom.width * fx, geom.y + geom.height * fy);
        (h, rotate_point(local, c, rotation))
    })
}

/// Canvas-space position of the rotate grip, `offset` above the top edge.
pub fn rotate_handle_point(geom: Geom, rotation: f64, offset: f64) -> Point {
    let local = Point::new(geom.x + geom.width / 2.0, geom.y - offset);
    rotate_point(local, geom.center(), rotation)
}

/// Test the selection chrome of one box. `radius` and `rotate_offset` are in
/// canvas units. The rotate grip wins over resize grips when both are in reach.
pub fn hit_handle(geom: Geom, rotation: f64, p: Point, radius: f64, rotate_offset: f64) -> Option<HandleHit> {
    if distance(rotate_handle_point(geom, rotation, rotate_offset), p) <= radius {
        return Some(HandleHit::Rotate);
    }
    handle_points(geom, rotation)
        .into_iter()
        .map(|(h, hp)| (h, distance(hp, p)))
        .filter(|(_, d)| *d <= radius)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(h, _)| HandleHit::Resize(h))
}
