//! Lineage layout engine.
//!
//! Turns a focus entity and its relation lists into a [`LineageLayout`]: the
//! parents, partner and child tiers of a family-tree diagram with their column
//! spans and connector geometry already decided. Rendering surfaces only read
//! the layout; they never decide where a node or a connector goes.
//!
//! # Grid
//!
//! The diagram is a grid of `column_count = 2 × max(partners, children, 1)`
//! columns. Parents always form one block across the full width. Partners
//! and children are partitioned independently: a single node spans every
//! column and gets one vertical connector, while several nodes share the width
//! and are joined by a horizontal bus running from the first drop to the last.
//!
//! ```
//! # use living_archive::lineage::{compute_layout, LineageNode};
//! # use living_archive_core::entity::{Entity, EntityType, Relations};
//! # use living_archive_core::repository::EntityIndex;
//! let anansi = Entity::new("Anansi", EntityType::Hero).with_relations(Relations {
//!     parents: vec!["Nyame".to_string()],
//!     conjoint: vec!["Okonore Yaa".to_string(), "Aso".to_string()],
//!     descendants: vec!["Ntikuma".to_string()],
//! });
//! let index = EntityIndex::new([
//!     Entity::new("Nyame", EntityType::Divinity),
//!     Entity::new("Okonore Yaa", EntityType::Divinity),
//!     Entity::new("Ntikuma", EntityType::Hero),
//! ]);
//!
//! let layout = compute_layout(&anansi, &index);
//! assert_eq!(layout.column_count(), 4);
//!
//! let partners = layout.partners().unwrap();
//! assert_eq!(*partners.cells()[1].node(), LineageNode::Unknown("Aso"));
//! assert_eq!(partners.cells()[1].column_span(), 2);
//! assert!(!layout.children().unwrap().has_bus());
//! ```

mod node;
mod tier;

use living_archive_core::{entity::Entity, repository::EntityRepository};

pub use node::{Annotation, LineageNode};
pub use tier::{BusRole, ParentBlock, Tier, TierCell, TierKind};

/// Renderable genealogy of one focus entity.
///
/// Borrows from the focus entity and the repository it was computed against.
/// Tiers without nodes are `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct LineageLayout<'a> {
    focus: &'a Entity,
    parents: Option<ParentBlock<'a>>,
    partners: Option<Tier<'a>>,
    children: Option<Tier<'a>>,
    column_count: usize,
}

impl<'a> LineageLayout<'a> {
    pub fn focus(&self) -> &'a Entity {
        self.focus
    }

    /// The focus is annotated with its own type.
    pub fn focus_annotation(&self) -> Annotation {
        Annotation::Type(self.focus.entity_type())
    }

    pub fn parents(&self) -> Option<&ParentBlock<'a>> {
        self.parents.as_ref()
    }

    pub fn partners(&self) -> Option<&Tier<'a>> {
        self.partners.as_ref()
    }

    pub fn children(&self) -> Option<&Tier<'a>> {
        self.children.as_ref()
    }

    pub fn column_count(&self) -> usize {
        self.column_count
    }

    /// Center of the full width in half-column units.
    pub fn center(&self) -> usize {
        self.column_count
    }

    /// Every node of the layout, focus excluded, top to bottom.
    pub fn nodes(&self) -> impl Iterator<Item = &LineageNode<'a>> + '_ {
        let parents = self.parents.iter().flat_map(|block| block.nodes());
        let tiers = self
            .partners
            .iter()
            .chain(&self.children)
            .flat_map(|tier| tier.cells().iter().map(TierCell::node));
        parents.chain(tiers)
    }
}

/// Computes lineage layouts against one repository.
#[derive(Debug, Clone, Copy)]
pub struct LineageLayoutEngine<'r, R: ?Sized> {
    repository: &'r R,
}

impl<'r, R> LineageLayoutEngine<'r, R>
where
    R: EntityRepository + ?Sized,
{
    pub fn new(repository: &'r R) -> Self {
        Self { repository }
    }

    /// Computes the layout of `focus`. See [`compute_layout`].
    pub fn compute_layout<'a>(&self, focus: &'a Entity) -> LineageLayout<'a>
    where
        'r: 'a,
    {
        compute_layout(focus, self.repository)
    }
}

/// Computes the lineage layout of `focus`, resolving relation names through
/// `repository`.
///
/// Relation lists are read in their stored order and never re-sorted.
/// Duplicate names stay duplicated, and a name equal to the focus resolves to
/// the focus like any other. The computation has no side effects: calling it
/// twice with the same inputs gives equal layouts.
pub fn compute_layout<'a, R>(focus: &'a Entity, repository: &'a R) -> LineageLayout<'a>
where
    R: EntityRepository + ?Sized,
{
    let relations = focus.relations();
    let resolve_all = |names: &'a [String]| -> Vec<LineageNode<'a>> {
        names
            .iter()
            .map(|name| LineageNode::resolve(name, repository))
            .collect()
    };

    let parents = resolve_all(relations.parents.as_slice());
    let partners = resolve_all(relations.conjoint.as_slice());
    let children = resolve_all(relations.descendants.as_slice());

    let column_count = 2 * partners.len().max(children.len()).max(1);

    LineageLayout {
        focus,
        parents: ParentBlock::new(parents, column_count),
        partners: Tier::new(TierKind::Partners, partners, column_count),
        children: Tier::new(TierKind::Children, children, column_count),
        column_count,
    }
}
