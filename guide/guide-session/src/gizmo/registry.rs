//! Entity to gizmo ownership table.

use std::fmt;

use hashbrown::HashMap;

use crate::scene::EntityId;

/// Which gizmo an entity belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GizmoKind {
    /// The vertical translation handle.
    Vertical,
    /// The rotation ring.
    Rotation,
}

impl fmt::Display for GizmoKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Vertical => "vertical",
            Self::Rotation => "rotation",
        })
    }
}

/// Flat lookup from renderer entity to owning gizmo.
///
/// Built once when the renderer reports the gizmo entities, so hit-testing a
/// pointer event is a single map lookup instead of a walk up the entity tree.
#[derive(Debug, Clone, Default)]
pub struct GizmoRegistry {
    owners: HashMap<EntityId, GizmoKind>,
}

impl GizmoRegistry {
    /// Empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one entity. A later registration of the same id wins.
    pub fn register(&mut self, id: EntityId, kind: GizmoKind) {
        self.owners.insert(id, kind);
    }

    /// Register every entity in `ids` as part of `kind`.
    pub fn register_all(&mut self, ids: impl IntoIterator<Item = EntityId>, kind: GizmoKind) {
        self.owners.extend(ids.into_iter().map(|id| (id, kind)));
    }

    /// Owner of `id`, if it belongs to a gizmo.
    #[must_use]
    pub fn owner(&self, id: EntityId) -> Option<GizmoKind> {
        self.owners.get(&id).copied()
    }

    /// Number of registered entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.owners.len()
    }

    /// True if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }

    /// Forget every entity.
    pub fn clear(&mut self) {
        self.owners.clear();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn lookup() {
        let mut registry = GizmoRegistry::new();
        registry.register(EntityId(1), GizmoKind::Vertical);
        registry.register_all([EntityId(2), EntityId(3)], GizmoKind::Rotation);

        assert_eq!(registry.len(), 3);
        assert_eq!(registry.owner(EntityId(1)), Some(GizmoKind::Vertical));
        assert_eq!(registry.owner(EntityId(3)), Some(GizmoKind::Rotation));
        assert_eq!(registry.owner(EntityId(9)), None);
    }

    #[test]
    fn clear_forgets_everything() {
        let mut registry = GizmoRegistry::new();
        registry.register(EntityId(1), GizmoKind::Vertical);
        registry.clear();
        assert!(registry.is_empty());
        assert_eq!(registry.owner(EntityId(1)), None);
    }
}
