use crate::id::ElementId;
use smallvec::SmallVec;

/// Current selection. `Multi` always holds two or more distinct ids.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    None,
    Single(ElementId),
    Multi(SmallVec<[ElementId; 4]>),
}

impl Selection {
    /// Build a selection from any list of ids, dropping duplicates and
    /// collapsing to the smallest variant that fits.
    pub fn from_ids<I: IntoIterator<Item = ElementId>>(ids: I) -> Self {
        let mut out: SmallVec<[ElementId; 4]> = SmallVec::new();
        for id in ids {
            if !out.contains(&id) {
                out.push(id);
            }
        }
        Self::normalized(out)
    }

    fn normalized(ids: SmallVec<[ElementId; 4]>) -> Self {
        match ids.len() {
            0 => Selection::None,
            1 => Selection::Single(ids[0]),
            _ => Selection::Multi(ids),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Selection::None)
    }

    pub fn len(&self) -> usize {
        match self {
            Selection::None => 0,
            Selection::Single(_) => 1,
            Selection::Multi(ids) => ids.len(),
        }
    }

    pub fn contains(&self, id: ElementId) -> bool {
        match self {
            Selection::None => false,
            Selection::Single(s) => *s == id,
            Selection::Multi(ids) => ids.contains(&id),
        }
    }

    /// The id when exactly one element is selected.
    pub fn single(&self) -> Option<ElementId> {
        match self {
            Selection::Single(id) => Some(*id),
            _ => None,
        }
    }

    pub fn ids(&self) -> SmallVec<[ElementId; 4]> {
        match self {
            Selection::None => SmallVec::new(),
            Selection::Single(id) => smallvec::smallvec![*id],
            Selection::Multi(ids) => ids.clone(),
        }
    }

    /// Shift-click semantics: add when absent, remove when present.
    pub fn toggle(&mut self, id: ElementId) {
        let mut ids = self.ids();
        if let Some(pos) = ids.iter().position(|s| *s == id) {
            ids.remove(pos);
        } else {
            ids.push(id);
        }
        *self = Self::normalized(ids);
    }

    /// Drop every id in `removed`. Returns `true` if anything changed.
    pub fn prune(&mut self, removed: &[ElementId]) -> bool {
        let before = self.len();
        let ids: SmallVec<[ElementId; 4]> =
            self.ids().into_iter().filter(|id| !removed.contains(id)).collect();
        *self = Self::normalized(ids);
        self.len() != before
    }

    pub fn clear(&mut self) {
        *self = Selection::None;
    }
}
