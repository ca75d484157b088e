//! Browsing queries over the archive.
//!
//! [`Catalog`] answers the questions the archive's browsing views ask: which
//! entities match a search, which belong to a type or a map region, how the
//! archive splits into pantheons, which entities still lack an image, and
//! which entity to show at random.
//!
//! ```
//! # use living_archive::catalog::{Catalog, Region};
//! # use living_archive_core::entity::{Entity, EntityType, Origin};
//! # use living_archive_core::repository::EntityIndex;
//! let index = EntityIndex::new([
//!     Entity::new("Sango", EntityType::Divinity).with_origin(Origin {
//!         country: "Nigeria".to_string(),
//!         ethnicity: "Yoruba".to_string(),
//!         ..Default::default()
//!     }),
//!     Entity::new("Anansi", EntityType::Hero),
//! ]);
//! let catalog = Catalog::new(&index);
//!
//! assert_eq!(catalog.search("yoruba").len(), 1);
//! assert_eq!(catalog.ethnicities(Region::WestAfrica), vec!["Yoruba"]);
//! ```

mod region;
mod search;

use indexmap::IndexMap;
use log::debug;
use rand::Rng;

use living_archive_core::{
    entity::{Entity, EntityType},
    repository::EntityIndex,
};

pub use region::Region;
pub use search::SearchQuery;

/// Pantheon name used for entities without one.
pub const UNKNOWN_PANTHEON: &str = "Unknown";

/// Entities sharing a pantheon.
#[derive(Debug, Clone, PartialEq)]
pub struct Pantheon<'a> {
    name: &'a str,
    entities: Vec<&'a Entity>,
}

impl<'a> Pantheon<'a> {
    pub fn name(&self) -> &'a str {
        self.name
    }

    pub fn entities(&self) -> &[&'a Entity] {
        &self.entities
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

/// How much of the archive has a generated image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageCoverage {
    total: usize,
    missing: usize,
}

impl ImageCoverage {
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn missing(&self) -> usize {
        self.missing
    }

    pub fn covered(&self) -> usize {
        self.total - self.missing
    }

    /// Share of entities with an image, from 0 to 100. An empty archive has
    /// 0% coverage.
    pub fn percent(&self) -> f32 {
        if self.total == 0 {
            return 0.0;
        }
        self.covered() as f32 * 100.0 / self.total as f32
    }
}

/// Read-only queries over an [`EntityIndex`].
///
/// Results borrow from the index and follow dataset order unless a query
/// says otherwise.
#[derive(Debug, Clone, Copy)]
pub struct Catalog<'a> {
    index: &'a EntityIndex,
}

impl<'a> Catalog<'a> {
    pub fn new(index: &'a EntityIndex) -> Self {
        Self { index }
    }

    /// Entities matching `query` as a whole word. See [`SearchQuery`].
    ///
    /// A blank query matches nothing.
    pub fn search(&self, query: &str) -> Vec<&'a Entity> {
        let Some(query) = SearchQuery::new(query) else {
            return Vec::new();
        };

        let found: Vec<_> = self
            .index
            .iter()
            .filter(|entity| query.matches(entity))
            .collect();
        debug!(results_count = found.len(); "Search completed");
        found
    }

    /// Entities of one type, sorted by name ignoring case.
    pub fn by_type(&self, entity_type: EntityType) -> Vec<&'a Entity> {
        let mut entities: Vec<_> = self
            .index
            .iter()
            .filter(|entity| entity.entity_type() == entity_type)
            .collect();
        entities.sort_by(|a, b| {
            a.name()
                .to_lowercase()
                .cmp(&b.name().to_lowercase())
                .then_with(|| a.name().cmp(b.name()))
        });
        entities
    }

    /// Number of entities of each type, in [`EntityType::ALL`] order.
    pub fn type_counts(&self) -> Vec<(EntityType, usize)> {
        EntityType::ALL
            .into_iter()
            .map(|entity_type| {
                let count = self
                    .index
                    .iter()
                    .filter(|entity| entity.entity_type() == entity_type)
                    .count();
                (entity_type, count)
            })
            .collect()
    }

    /// Entities whose country belongs to `region`.
    pub fn by_region(&self, region: Region) -> Vec<&'a Entity> {
        self.index
            .iter()
            .filter(|entity| region.contains(entity))
            .collect()
    }

    /// Distinct ethnicities found in `region`, sorted.
    pub fn ethnicities(&self, region: Region) -> Vec<&'a str> {
        let mut ethnicities: Vec<&'a str> = self
            .by_region(region)
            .into_iter()
            .map(|entity| entity.origin.ethnicity.as_str())
            .collect();
        ethnicities.sort_unstable();
        ethnicities.dedup();
        ethnicities
    }

    /// Entities of `region` with exactly the given ethnicity.
    pub fn by_region_and_ethnicity(&self, region: Region, ethnicity: &str) -> Vec<&'a Entity> {
        self.by_region(region)
            .into_iter()
            .filter(|entity| entity.origin.ethnicity == ethnicity)
            .collect()
    }

    /// Entities grouped by pantheon, largest group first.
    ///
    /// Entities without a pantheon land in [`UNKNOWN_PANTHEON`]. Groups of
    /// equal size keep the order in which their first member appears.
    pub fn pantheons(&self) -> Vec<Pantheon<'a>> {
        let mut groups: IndexMap<&'a str, Vec<&'a Entity>> = IndexMap::new();
        for entity in self.index.iter() {
            let name = match entity.origin.pantheon.as_str() {
                "" => UNKNOWN_PANTHEON,
                name => name,
            };
            groups.entry(name).or_default().push(entity);
        }

        let mut pantheons: Vec<_> = groups
            .into_iter()
            .map(|(name, entities)| Pantheon { name, entities })
            .collect();
        pantheons.sort_by(|a, b| b.len().cmp(&a.len()));
        pantheons
    }

    /// Entities without an image URL, in dataset order.
    pub fn missing_images(&self) -> Vec<&'a Entity> {
        self.index
            .iter()
            .filter(|entity| !entity.has_image())
            .collect()
    }

    pub fn image_coverage(&self) -> ImageCoverage {
        let coverage = ImageCoverage {
            total: self.index.len(),
            missing: self.index.iter().filter(|entity| !entity.has_image()).count(),
        };
        debug!(
            total = coverage.total(),
            missing = coverage.missing();
            "Image coverage computed"
        );
        coverage
    }

    /// A uniformly chosen entity, or `None` when the archive is empty.
    pub fn random<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&'a Entity> {
        if self.index.is_empty() {
            return None;
        }
        self.index.get_index(rng.random_range(0..self.index.len()))
    }
}
