//! Z-order management.
//!
//! Layer operations work among siblings: root elements are ordered against
//! each other, group children against the other children of the same group.
//! Paint order is a stable sort by `z_index`, so ties fall back to insertion
//! order.

use crate::document::Document;
use crate::error::DocumentError;
use crate::id::ElementId;
use crate::model::Element;

impl Document {
    /// Root elements bottom to top.
    pub fn paint_order(&self) -> Vec<&Element> {
        self.sorted_siblings(None)
    }

    /// Children of `group` bottom to top.
    pub fn child_paint_order(&self, group: ElementId) -> Vec<&Element> {
        self.sorted_siblings(Some(group))
    }

    fn sorted_siblings(&self, parent: Option<ElementId>) -> Vec<&Element> {
        let mut out: Vec<&Element> = self
            .elements()
            .iter()
            .filter(|e| e.parent_id == parent)
            .collect();
        out.sort_by_key(|e| e.z_index);
        out
    }

    fn siblings_of(&self, id: ElementId) -> Result<Vec<ElementId>, DocumentError> {
        let parent = self.get(id).ok_or(DocumentError::NotFound(id))?.parent_id;
        Ok(self.sorted_siblings(parent).iter().map(|e| e.id).collect())
    }

    /// Give tied siblings distinct consecutive z values, keeping their paint
    /// order and the lowest value. Returns `true` if anything moved.
    fn renumber_if_tied(&mut self, order: &[ElementId]) -> bool {
        let zs: Vec<i64> = order
            .iter()
            .filter_map(|id| self.get(*id).map(|e| e.z_index))
            .collect();
        if zs.windows(2).all(|w| w[0] < w[1]) {
            return false;
        }
        let base = zs.first().copied().unwrap_or(1);
        for el in self.elements_mut() {
            if let Some(rank) = order.iter().position(|id| *id == el.id) {
                el.z_index = base + rank as i64;
            }
        }
        log::debug!("renumbered {} tied layers", order.len());
        true
    }

    fn z_of(&self, id: ElementId) -> Result<i64, DocumentError> {
        self.get(id)
            .map(|e| e.z_index)
            .ok_or(DocumentError::NotFound(id))
    }

    fn set_z(&mut self, id: ElementId, z: i64) {
        if let Some(el) = self.get_mut(id) {
            el.z_index = z;
        }
    }

    /// Move above every sibling. No-op if already alone on top.
    pub fn bring_to_front(&mut self, id: ElementId) -> Result<bool, DocumentError> {
        let z = self.z_of(id)?;
        let siblings = self.siblings_of(id)?;
        let others = siblings.iter().filter(|s| **s != id);
        let Some(max_other) = others.filter_map(|s| self.get(*s)).map(|e| e.z_index).max() else {
            return Ok(false);
        };
        if z > max_other {
            return Ok(false);
        }
        self.set_z(id, max_other + 1);
        Ok(true)
    }

    /// Move below every sibling. No-op if already alone at the bottom.
    pub fn send_to_back(&mut self, id: ElementId) -> Result<bool, DocumentError> {
        let z = self.z_of(id)?;
        let siblings = self.siblings_of(id)?;
        let others = siblings.iter().filter(|s| **s != id);
        let Some(min_other) = others.filter_map(|s| self.get(*s)).map(|e| e.z_index).min() else {
            return Ok(false);
        };
        if z < min_other {
            return Ok(false);
        }
        self.set_z(id, min_other - 1);
        Ok(true)
    }

    /// Swap with the sibling directly above.
    pub fn bring_forward(&mut self, id: ElementId) -> Result<bool, DocumentError> {
        self.step(id, true)
    }

    /// Swap with the sibling directly below.
    pub fn send_backward(&mut self, id: ElementId) -> Result<bool, DocumentError> {
        self.step(id, false)
    }

    fn step(&mut self, id: ElementId, up: bool) -> Result<bool, DocumentError> {
        let order = self.siblings_of(id)?;
        let Some(pos) = order.iter().position(|s| *s == id) else {
            return Err(DocumentError::NotFound(id));
        };
        let neighbour = if up {
            order.get(pos + 1).copied()
        } else {
            pos.checked_sub(1).and_then(|p| order.get(p).copied())
        };
        let Some(neighbour) = neighbour else {
            return Ok(false);
        };

        self.renumber_if_tied(&order);
        let a = self.z_of(id)?;
        let b = self.z_of(neighbour)?;
        self.set_z(id, b);
        self.set_z(neighbour, a);
        Ok(true)
    }
}
