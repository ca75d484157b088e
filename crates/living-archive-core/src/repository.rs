//! Name lookup over the archive's entities.
//!
//! The [`EntityRepository`] trait is the only thing the lineage engine needs
//! from the archive: a case-insensitive, exact-match lookup by name.
//! [`EntityIndex`] is the in-memory implementation built once from the
//! loaded dataset.
//!
//! # Example
//!
//! ```
//! # use living_archive_core::entity::{Entity, EntityType};
//! # use living_archive_core::repository::{EntityIndex, EntityRepository};
//! let index = EntityIndex::new(vec![Entity::new("Anansi", EntityType::Hero)]);
//!
//! assert!(index.resolve("anansi").is_some());
//! assert!(index.resolve("ANANSI").is_some());
//! assert!(index.resolve("Ananse").is_none());
//! ```

use indexmap::{IndexMap, map::Entry};
use log::{debug, warn};

use crate::entity::Entity;

/// Case-insensitive, exact-match lookup of entities by name.
pub trait EntityRepository {
    /// Returns the entity whose name equals `name` ignoring case.
    fn resolve(&self, name: &str) -> Option<&Entity>;
}

/// Lookup key for a name.
fn lookup_key(name: &str) -> String {
    name.to_lowercase()
}

/// Immutable in-memory index of entities keyed by lowercased name.
///
/// Iteration follows dataset order. When two records share a name the first
/// one wins, matching a front-to-back scan of the dataset.
#[derive(Debug, Clone, Default)]
pub struct EntityIndex {
    entities: IndexMap<String, Entity>,
}

impl EntityIndex {
    /// Builds an index from the given entities.
    pub fn new(entities: impl IntoIterator<Item = Entity>) -> Self {
        let mut index = IndexMap::new();

        for entity in entities {
            match index.entry(lookup_key(entity.name())) {
                Entry::Occupied(_) => {
                    warn!(name = entity.name(); "Duplicate entity name, keeping first record");
                }
                Entry::Vacant(slot) => {
                    slot.insert(entity);
                }
            }
        }

        debug!(entities_count = index.len(); "Entity index built");
        Self { entities: index }
    }

    /// Returns the number of distinct entities.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Returns `true` if the index holds no entity.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Iterates over entities in dataset order.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    /// Returns the entity at `position` in dataset order.
    pub fn get_index(&self, position: usize) -> Option<&Entity> {
        self.entities.get_index(position).map(|(_, entity)| entity)
    }
}

impl EntityRepository for EntityIndex {
    fn resolve(&self, name: &str) -> Option<&Entity> {
        self.entities.get(&lookup_key(name))
    }
}

/// Linear scan, first match wins.
impl EntityRepository for [Entity] {
    fn resolve(&self, name: &str) -> Option<&Entity> {
        let key = lookup_key(name);
        self.iter().find(|entity| lookup_key(entity.name()) == key)
    }
}

impl EntityRepository for Vec<Entity> {
    fn resolve(&self, name: &str) -> Option<&Entity> {
        self.as_slice().resolve(name)
    }
}

impl<R: EntityRepository + ?Sized> EntityRepository for &R {
    fn resolve(&self, name: &str) -> Option<&Entity> {
        (**self).resolve(name)
    }
}
