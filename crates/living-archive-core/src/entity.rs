//! The mythological entity record.
//!
//! An [`Entity`] is one figure of the archive: a divinity, a hero or a
//! creature. Records are deserialized from the archive dataset with
//! [`serde`]; every section except `name` and `entity_type` falls back to an
//! empty value when absent so partially curated records still load.
//!
//! # Overview
//!
//! - [`Entity`] - The full record
//! - [`EntityType`] - The three kinds of figures
//! - [`Relations`] - Ordered name references to parents, partners and children
//! - [`TypeSpecific`] - Per-type extension blocks (divinity, hero, creature)
//! - [`Rendering`] - Image prompt canon and styled prompt variants

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// The kind of a mythological figure.
///
/// Used for display annotation and catalog browsing, never for layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
pub enum EntityType {
    Divinity,
    Hero,
    Creature,
}

impl EntityType {
    /// All entity types in catalog order.
    pub const ALL: [EntityType; 3] = [Self::Divinity, Self::Hero, Self::Creature];

    /// Returns the canonical name of this type.
    pub fn name(self) -> &'static str {
        match self {
            Self::Divinity => "Divinity",
            Self::Hero => "Hero",
            Self::Creature => "Creature",
        }
    }

    /// Returns the heading used when browsing entities of this type.
    pub fn collection_title(self) -> &'static str {
        match self {
            Self::Divinity => "The Divinities",
            Self::Hero => "The Heroes",
            Self::Creature => "The Creatures",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EntityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "divinity" => Ok(Self::Divinity),
            "hero" => Ok(Self::Hero),
            "creature" => Ok(Self::Creature),
            _ => Err(format!(
                "invalid entity type `{s}`, valid values: divinity, hero, creature"
            )),
        }
    }
}

/// Geographic and cultural origin of a figure.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Origin {
    pub country: String,
    pub ethnicity: String,
    pub pantheon: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Identity {
    pub gender: String,
    pub cultural_role: String,
    pub alignment: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Attributes {
    pub domains: Vec<String>,
    pub symbols: Vec<String>,
    pub power_objects: Vec<String>,
    pub symbolic_animals: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Appearance {
    pub physical_signs: Vec<String>,
    pub manifestations: String,
    pub image_generation_prompt: String,
    #[serde(rename = "imageUrl")]
    pub image_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Story {
    pub description: String,
    pub characteristics: Vec<String>,
}

/// Name references to related figures.
///
/// Order is authorial and meaningful. Names are plain strings and are not
/// guaranteed to match any record of the archive.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Relations {
    pub parents: Vec<String>,
    /// Partners and spouses.
    pub conjoint: Vec<String>,
    /// Children.
    pub descendants: Vec<String>,
}

impl Relations {
    /// Returns `true` when no relation of any kind is recorded.
    pub fn is_empty(&self) -> bool {
        self.parents.is_empty() && self.conjoint.is_empty() && self.descendants.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Cult {
    pub offerings: Vec<String>,
    pub taboos: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DivinitySpecific {
    pub cult: Option<Cult>,
    pub domains: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct HeroSpecific {
    pub titles: Vec<String>,
    pub achievements: Vec<String>,
    pub weapons_or_artifacts: Vec<String>,
    pub legacy: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CreatureSpecific {
    pub habitat: Vec<String>,
    pub powers: Vec<String>,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diet: Option<String>,
    pub size: String,
}

/// Per-type extension blocks.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TypeSpecific {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub divinity: Option<DivinitySpecific>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hero: Option<HeroSpecific>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creature: Option<CreatureSpecific>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PromptVariant {
    pub style_id: String,
    pub label: String,
    pub prompt: String,
}

/// Image prompt material for a figure.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Rendering {
    pub prompt_canon: String,
    pub prompt_variants: Vec<PromptVariant>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Source {
    pub label: String,
    pub url: String,
}

/// A mythological figure of the archive.
///
/// # Examples
///
/// ```
/// # use living_archive_core::entity::{Entity, EntityType};
/// let anansi = Entity::new("Anansi", EntityType::Hero);
/// assert_eq!(anansi.name(), "Anansi");
/// assert!(anansi.relations().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Entity {
    pub entity_type: EntityType,
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub origin: Origin,
    #[serde(default)]
    pub identity: Identity,
    #[serde(default)]
    pub attributes: Attributes,
    #[serde(default)]
    pub appearance: Appearance,
    #[serde(default)]
    pub story: Story,
    #[serde(default)]
    pub relations: Relations,

    // Extension blocks may sit under `type_specific` or at the record root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_specific: Option<TypeSpecific>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub divinity: Option<DivinitySpecific>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hero: Option<HeroSpecific>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creature: Option<CreatureSpecific>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rendering: Option<Rendering>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<Source>>,
}

impl Entity {
    /// Creates an entity with the given name and type and every other
    /// section empty.
    pub fn new(name: impl Into<String>, entity_type: EntityType) -> Self {
        Self {
            entity_type,
            name: name.into(),
            category: String::new(),
            origin: Origin::default(),
            identity: Identity::default(),
            attributes: Attributes::default(),
            appearance: Appearance::default(),
            story: Story::default(),
            relations: Relations::default(),
            type_specific: None,
            divinity: None,
            hero: None,
            creature: None,
            rendering: None,
            sources: None,
        }
    }

    /// Sets the relations (builder style).
    pub fn with_relations(mut self, relations: Relations) -> Self {
        self.relations = relations;
        self
    }

    /// Sets the origin (builder style).
    pub fn with_origin(mut self, origin: Origin) -> Self {
        self.origin = origin;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn entity_type(&self) -> EntityType {
        self.entity_type
    }

    pub fn relations(&self) -> &Relations {
        &self.relations
    }

    /// Returns the divinity block, preferring the nested form.
    pub fn divinity_details(&self) -> Option<&DivinitySpecific> {
        self.type_specific
            .as_ref()
            .and_then(|ts| ts.divinity.as_ref())
            .or(self.divinity.as_ref())
    }

    /// Returns the hero block, preferring the nested form.
    pub fn hero_details(&self) -> Option<&HeroSpecific> {
        self.type_specific
            .as_ref()
            .and_then(|ts| ts.hero.as_ref())
            .or(self.hero.as_ref())
    }

    /// Returns the creature block, preferring the nested form.
    pub fn creature_details(&self) -> Option<&CreatureSpecific> {
        self.type_specific
            .as_ref()
            .and_then(|ts| ts.creature.as_ref())
            .or(self.creature.as_ref())
    }

    /// Whether the record points at a generated image.
    pub fn has_image(&self) -> bool {
        !self.appearance.image_url.trim().is_empty()
    }

    /// The image prompt for `style_id`, or the canonical prompt when no
    /// style is given.
    ///
    /// Lookup order: the prompt variant for the style, the rendering canon,
    /// then the appearance prompt. Blank prompts are skipped; `None` means the
    /// record has no usable prompt at all.
    ///
    /// ```
    /// # use living_archive_core::entity::{Entity, EntityType};
    /// let mut sango = Entity::new("Sango", EntityType::Divinity);
    /// assert_eq!(sango.image_prompt(None), None);
    ///
    /// sango.appearance.image_generation_prompt = "A king wreathed in lightning".to_string();
    /// assert_eq!(sango.image_prompt(Some("manga")), Some("A king wreathed in lightning"));
    /// ```
    pub fn image_prompt(&self, style_id: Option<&str>) -> Option<&str> {
        let non_blank = |prompt: &str| !prompt.trim().is_empty();

        let variant = style_id.and_then(|style_id| {
            self.rendering
                .iter()
                .flat_map(|rendering| &rendering.prompt_variants)
                .find(|variant| variant.style_id == style_id && non_blank(&variant.prompt))
                .map(|variant| variant.prompt.as_str())
        });
        let canon = self
            .rendering
            .as_ref()
            .map(|rendering| rendering.prompt_canon.as_str())
            .filter(|prompt| non_blank(prompt));
        let appearance =
            Some(self.appearance.image_generation_prompt.as_str()).filter(|prompt| non_blank(prompt));

        variant.or(canon).or(appearance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_type_from_str() {
        assert_eq!("Divinity".parse::<EntityType>(), Ok(EntityType::Divinity));
        assert_eq!("hero".parse::<EntityType>(), Ok(EntityType::Hero));
        assert_eq!("CREATURE".parse::<EntityType>(), Ok(EntityType::Creature));
        assert!("spirit".parse::<EntityType>().is_err());
    }

    #[test]
    fn test_entity_type_display() {
        assert_eq!(EntityType::Divinity.to_string(), "Divinity");
        assert_eq!(EntityType::Creature.collection_title(), "The Creatures");
    }

    #[test]
    fn test_deserialize_minimal_record() {
        let json = r#"{"entity_type": "Hero", "name": "Ntikuma"}"#;
        let entity: Entity = serde_json::from_str(json).unwrap();

        assert_eq!(entity.name(), "Ntikuma");
        assert_eq!(entity.entity_type(), EntityType::Hero);
        assert!(entity.relations().is_empty());
        assert!(entity.type_specific.is_none());
    }

    #[test]
    fn test_deserialize_relations_keep_order() {
        let json = r#"{
            "entity_type": "Hero",
            "name": "Anansi",
            "relations": {
                "parents": ["Nyame", "Asase Yaa"],
                "conjoint": ["Okonore Yaa", "Aso"],
                "descendants": ["Ntikuma", "Tikelenkelen", "Ntikuma"]
            }
        }"#;
        let entity: Entity = serde_json::from_str(json).unwrap();

        assert_eq!(entity.relations().parents, vec!["Nyame", "Asase Yaa"]);
        assert_eq!(entity.relations().conjoint, vec!["Okonore Yaa", "Aso"]);
        assert_eq!(entity.relations().descendants.len(), 3);
    }

    #[test]
    fn test_image_url_field_name() {
        let json = r#"{
            "entity_type": "Divinity",
            "name": "Nyame",
            "appearance": {"imageUrl": "https://example.org/nyame.png"}
        }"#;
        let entity: Entity = serde_json::from_str(json).unwrap();
        assert_eq!(entity.appearance.image_url, "https://example.org/nyame.png");

        let back = serde_json::to_string(&entity).unwrap();
        assert!(back.contains("\"imageUrl\""));
    }

    #[test]
    fn test_has_image_ignores_blank_url() {
        let mut entity = Entity::new("Nyame", EntityType::Divinity);
        assert!(!entity.has_image());
        entity.appearance.image_url = "   ".to_string();
        assert!(!entity.has_image());
        entity.appearance.image_url = "https://example.org/nyame.png".to_string();
        assert!(entity.has_image());
    }

    #[test]
    fn test_image_prompt_lookup_order() {
        let mut entity = Entity::new("Mami Wata", EntityType::Creature);
        entity.appearance.image_generation_prompt = "appearance".to_string();
        assert_eq!(entity.image_prompt(None), Some("appearance"));

        entity.rendering = Some(Rendering {
            prompt_canon: "canon".to_string(),
            prompt_variants: vec![
                PromptVariant {
                    style_id: "manga".to_string(),
                    label: "Manga Style".to_string(),
                    prompt: "manga".to_string(),
                },
                PromptVariant {
                    style_id: "comic_marvel".to_string(),
                    label: "Comic Book Style".to_string(),
                    prompt: " ".to_string(),
                },
            ],
        });

        assert_eq!(entity.image_prompt(None), Some("canon"));
        assert_eq!(entity.image_prompt(Some("manga")), Some("manga"));
        // Style ids are exact, blank variants fall through
        assert_eq!(entity.image_prompt(Some("MANGA")), Some("canon"));
        assert_eq!(entity.image_prompt(Some("comic_marvel")), Some("canon"));
    }

    #[test]
    fn test_type_details_prefer_nested_block() {
        let json = r#"{
            "entity_type": "Hero",
            "name": "Sundiata",
            "hero": {"titles": ["Root"]},
            "type_specific": {"hero": {"titles": ["Nested"]}}
        }"#;
        let entity: Entity = serde_json::from_str(json).unwrap();
        assert_eq!(entity.hero_details().unwrap().titles, vec!["Nested"]);
    }

    #[test]
    fn test_type_details_fall_back_to_root_block() {
        let json = r#"{
            "entity_type": "Creature",
            "name": "Tikoloshe",
            "creature": {"habitat": ["Rivers"]}
        }"#;
        let entity: Entity = serde_json::from_str(json).unwrap();
        assert_eq!(entity.creature_details().unwrap().habitat, vec!["Rivers"]);
        assert!(entity.divinity_details().is_none());
    }
}
