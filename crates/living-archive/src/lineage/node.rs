//! Nodes of a lineage layout and their annotations.

use std::fmt;

use living_archive_core::{
    entity::{Entity, EntityType},
    repository::EntityRepository,
};

/// A relation slot in a lineage layout.
///
/// Relation names come straight from the dataset and need not point at a
/// record. A name that resolves becomes [`LineageNode::Resolved`]; one that
/// does not keeps its literal spelling in [`LineageNode::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineageNode<'a> {
    Resolved(&'a Entity),
    Unknown(&'a str),
}

impl<'a> LineageNode<'a> {
    /// Looks `name` up in `repository`.
    pub fn resolve<R>(name: &'a str, repository: &'a R) -> Self
    where
        R: EntityRepository + ?Sized,
    {
        match repository.resolve(name) {
            Some(entity) => Self::Resolved(entity),
            None => Self::Unknown(name),
        }
    }

    /// Name to display: the record's own name, or the literal relation text.
    pub fn name(&self) -> &'a str {
        match self {
            Self::Resolved(entity) => entity.name(),
            Self::Unknown(name) => name,
        }
    }

    pub fn entity(&self) -> Option<&'a Entity> {
        match self {
            Self::Resolved(entity) => Some(entity),
            Self::Unknown(_) => None,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown(_))
    }

    pub fn annotation(&self) -> Annotation {
        match self {
            Self::Resolved(entity) => Annotation::Type(entity.entity_type()),
            Self::Unknown(_) => Annotation::Unknown,
        }
    }
}

/// Secondary label drawn under a node name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Annotation {
    Type(EntityType),
    /// The relation name matched no record.
    Unknown,
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Type(entity_type) => write!(f, "{entity_type}"),
            Self::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

#[cfg(test)]
mod tests {
    use living_archive_core::repository::EntityIndex;

    use super::*;

    fn index() -> EntityIndex {
        EntityIndex::new([Entity::new("Nyame", EntityType::Divinity)])
    }

    #[test]
    fn test_resolve_hit_uses_record_name() {
        let index = index();
        let node = LineageNode::resolve("NYAME", &index);

        assert!(!node.is_unknown());
        assert_eq!(node.name(), "Nyame");
        assert_eq!(node.annotation(), Annotation::Type(EntityType::Divinity));
        assert_eq!(node.annotation().to_string(), "Divinity");
    }

    #[test]
    fn test_resolve_miss_keeps_literal_name() {
        let index = index();
        let node = LineageNode::resolve("aSo", &index);

        assert_eq!(node, LineageNode::Unknown("aSo"));
        assert_eq!(node.name(), "aSo");
        assert!(node.entity().is_none());
        assert_eq!(node.annotation().to_string(), "UNKNOWN");
    }
}
