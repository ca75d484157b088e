//! Whole-word search over the searchable fields of an entity.

use log::warn;
use regex::{Regex, RegexBuilder};

use living_archive_core::entity::Entity;

/// A compiled search query.
///
/// The query text is matched literally, case-insensitively and only on word
/// boundaries, so `Mali` finds "Mali" but not "malice".
#[derive(Debug, Clone)]
pub struct SearchQuery {
    pattern: Regex,
}

impl SearchQuery {
    /// Compiles `query`. Returns `None` when the trimmed query is empty.
    pub fn new(query: &str) -> Option<Self> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }

        let pattern = format!(r"\b{}\b", regex::escape(query));
        match RegexBuilder::new(&pattern).case_insensitive(true).build() {
            Ok(pattern) => Some(Self { pattern }),
            Err(err) => {
                // Only reachable when the escaped query exceeds the size limit
                warn!(query = query, err:err; "Search query rejected");
                None
            }
        }
    }

    /// Whether any searchable field of `entity` contains the query as a word.
    ///
    /// Searched fields: name, country, ethnicity, cultural role, category,
    /// description and every domain.
    pub fn matches(&self, entity: &Entity) -> bool {
        let fields: [&str; 6] = [
            entity.name(),
            &entity.origin.country,
            &entity.origin.ethnicity,
            &entity.identity.cultural_role,
            &entity.category,
            &entity.story.description,
        ];

        fields
            .into_iter()
            .chain(entity.attributes.domains.iter().map(String::as_str))
            .any(|field| self.pattern.is_match(field))
    }
}
