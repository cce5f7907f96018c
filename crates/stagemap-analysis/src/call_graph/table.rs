//! Entity arena (pass one) and the frozen entity table it produces.

use stagemap_core::types::collections::{FxHashMap, SmallVec2};

use super::types::Entity;

/// Append-only entity collection. Duplicate ids keep the first entity.
#[derive(Debug, Default)]
pub struct EntityArena {
    entities: Vec<Entity>,
    by_id: FxHashMap<String, usize>,
    duplicates: usize,
}

impl EntityArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` when an entity with the same id is already present.
    pub fn insert(&mut self, entity: Entity) -> bool {
        if self.by_id.contains_key(&entity.id) {
            self.duplicates += 1;
            tracing::trace!(id = %entity.id, "duplicate entity id ignored");
            return false;
        }
        self.by_id.insert(entity.id.clone(), self.entities.len());
        self.entities.push(entity);
        true
    }

    pub fn extend(&mut self, entities: impl IntoIterator<Item = Entity>) {
        for entity in entities {
            self.insert(entity);
        }
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn duplicates(&self) -> usize {
        self.duplicates
    }

    /// Freeze into an immutable table with a name index.
    pub fn freeze(self) -> EntityTable {
        let mut by_name: FxHashMap<String, SmallVec2<usize>> = FxHashMap::default();
        for (idx, entity) in self.entities.iter().enumerate() {
            by_name.entry(entity.name.clone()).or_default().push(idx);
        }
        EntityTable {
            entities: self.entities,
            by_id: self.by_id,
            by_name,
        }
    }
}

/// Immutable, index-addressed entities. Shared read-only across the
/// parallel resolution pass.
#[derive(Debug, Default)]
pub struct EntityTable {
    entities: Vec<Entity>,
    by_id: FxHashMap<String, usize>,
    by_name: FxHashMap<String, SmallVec2<usize>>,
}

impl EntityTable {
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&Entity> {
        self.entities.get(idx)
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.by_id.get(id).copied()
    }

    /// Indices of every entity with this name, in insertion order.
    pub fn named(&self, name: &str) -> &[usize] {
        self.by_name.get(name).map(|v| v.as_slice()).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub(crate) fn into_entities(self) -> Vec<Entity> {
        self.entities
    }
}
