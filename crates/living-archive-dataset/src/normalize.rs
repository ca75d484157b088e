//! Brings records up to the current record layout.
//!
//! Normalization is additive: it creates missing blocks and skeleton fields
//! and never overwrites curated content.
//!
//! - the type block of the record's own type lives under `type_specific`
//!   (a root-level block is moved in when present);
//! - a `rendering` block exists, its canon prompt seeded from the appearance
//!   prompt;
//! - one prompt variant exists for each entry of [`STYLE_VARIANTS`].

use log::debug;

use living_archive_core::entity::{Cult, Entity, EntityType, PromptVariant, Rendering};

/// Style identifiers and labels every record carries a prompt variant for.
pub const STYLE_VARIANTS: [(&str, &str); 4] = [
    ("regional_or_ethnic", "Regional/Ethnic Style"),
    ("manga", "Manga Style"),
    ("comic_marvel", "Comic Book Style"),
    ("modern_african_painting", "Modern African Art"),
];

/// Normalizes a single record in place.
pub fn normalize(entity: &mut Entity) {
    normalize_type_block(entity);
    normalize_rendering(entity);
}

/// Normalizes every record, returning how many were changed.
pub fn normalize_all(entities: &mut [Entity]) -> usize {
    let mut changed = 0;
    for entity in entities.iter_mut() {
        let before = entity.clone();
        normalize(entity);
        if *entity != before {
            changed += 1;
        }
    }

    debug!(records_count = entities.len(), changed_count = changed; "Dataset normalized");
    changed
}

fn normalize_type_block(entity: &mut Entity) {
    let type_specific = entity.type_specific.get_or_insert_with(Default::default);

    match entity.entity_type {
        EntityType::Divinity => {
            let block = type_specific
                .divinity
                .get_or_insert_with(|| entity.divinity.take().unwrap_or_default());
            block.cult.get_or_insert_with(Cult::default);
        }
        EntityType::Hero => {
            type_specific
                .hero
                .get_or_insert_with(|| entity.hero.take().unwrap_or_default());
        }
        EntityType::Creature => {
            type_specific
                .creature
                .get_or_insert_with(|| entity.creature.take().unwrap_or_default());
        }
    }
}

fn normalize_rendering(entity: &mut Entity) {
    let rendering = entity.rendering.get_or_insert_with(|| Rendering {
        prompt_canon: entity.appearance.image_generation_prompt.clone(),
        prompt_variants: Vec::new(),
    });

    for (style_id, label) in STYLE_VARIANTS {
        let present = rendering
            .prompt_variants
            .iter()
            .any(|variant| variant.style_id == style_id);
        if !present {
            rendering.prompt_variants.push(PromptVariant {
                style_id: style_id.to_string(),
                label: label.to_string(),
                prompt: String::new(),
            });
        }
    }
}
