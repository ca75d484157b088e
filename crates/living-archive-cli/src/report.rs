//! Plain-text reports printed by the browsing commands.

use std::fmt::Write;

use living_archive::{
    catalog::{ImageCoverage, Pantheon},
    entity::{Entity, EntityType},
};
use unicode_width::UnicodeWidthStr;

/// One-line summary: name, type and origin.
pub fn summary(entity: &Entity) -> String {
    let mut line = format!("{} ({})", entity.name(), entity.entity_type());
    let origin = [
        entity.origin.country.as_str(),
        entity.origin.ethnicity.as_str(),
    ]
    .into_iter()
    .filter(|part| !part.is_empty())
    .collect::<Vec<_>>();
    if !origin.is_empty() {
        write!(line, " - {}", origin.join(", ")).expect("Writing to String buffer is infallible");
    }
    line
}

/// Summaries of `entities`, one per line, or a notice when there are none.
pub fn listing(entities: &[&Entity]) -> String {
    if entities.is_empty() {
        return "No entities found.\n".to_string();
    }

    entities.iter().fold(String::new(), |mut out, entity| {
        writeln!(out, "{}", summary(entity)).expect("Writing to String buffer is infallible");
        out
    })
}

pub fn type_counts(counts: &[(EntityType, usize)]) -> String {
    counts
        .iter()
        .fold(String::new(), |mut out, (entity_type, count)| {
            writeln!(out, "{:<16} {count}", entity_type.collection_title())
                .expect("Writing to String buffer is infallible");
            out
        })
}

pub fn pantheons(pantheons: &[Pantheon<'_>]) -> String {
    pantheons.iter().fold(String::new(), |mut out, pantheon| {
        let names: Vec<_> = pantheon.entities().iter().map(|e| e.name()).collect();
        writeln!(
            out,
            "{} ({}): {}",
            pantheon.name(),
            pantheon.len(),
            names.join(", ")
        )
        .expect("Writing to String buffer is infallible");
        out
    })
}

/// Image coverage of the archive, as printed by `analyze`.
pub fn coverage(coverage: &ImageCoverage) -> String {
    let mut out = String::new();
    writeln!(out, "{:<18} {}", "Total entities", coverage.total())
        .expect("Writing to String buffer is infallible");
    writeln!(out, "{:<18} {}", "Missing images", coverage.missing())
        .expect("Writing to String buffer is infallible");
    writeln!(out, "{:<18} {:.1}%", "Visual coverage", coverage.percent())
        .expect("Writing to String buffer is infallible");
    out
}

/// The full record of an entity, one field per line. Empty fields are left
/// out.
pub fn card(entity: &Entity) -> String {
    let mut out = String::new();
    let title = entity.name().to_uppercase();
    writeln!(out, "{title}\n{}", "=".repeat(title.width()))
        .expect("Writing to String buffer is infallible");

    field(&mut out, "Type", entity.entity_type().name());
    field(&mut out, "Category", &entity.category);
    field(&mut out, "Country", &entity.origin.country);
    field(&mut out, "Ethnicity", &entity.origin.ethnicity);
    field(&mut out, "Pantheon", &entity.origin.pantheon);
    field(&mut out, "Gender", &entity.identity.gender);
    field(&mut out, "Role", &entity.identity.cultural_role);
    field(&mut out, "Alignment", &entity.identity.alignment);
    list(&mut out, "Domains", &entity.attributes.domains);
    list(&mut out, "Symbols", &entity.attributes.symbols);
    list(&mut out, "Power objects", &entity.attributes.power_objects);
    list(&mut out, "Animals", &entity.attributes.symbolic_animals);
    list(&mut out, "Parents", &entity.relations.parents);
    list(&mut out, "Partners", &entity.relations.conjoint);
    list(&mut out, "Children", &entity.relations.descendants);

    if let Some(hero) = entity.hero_details() {
        list(&mut out, "Titles", &hero.titles);
        list(&mut out, "Achievements", &hero.achievements);
        field(&mut out, "Legacy", &hero.legacy);
    }
    if let Some(creature) = entity.creature_details() {
        list(&mut out, "Habitat", &creature.habitat);
        list(&mut out, "Powers", &creature.powers);
        list(&mut out, "Weaknesses", &creature.weaknesses);
    }
    if let Some(cult) = entity.divinity_details().and_then(|d| d.cult.as_ref()) {
        list(&mut out, "Offerings", &cult.offerings);
        list(&mut out, "Taboos", &cult.taboos);
    }

    if !entity.story.description.is_empty() {
        writeln!(out, "\n{}", entity.story.description)
            .expect("Writing to String buffer is infallible");
    }
    out
}

fn field(out: &mut String, label: &str, value: &str) {
    if !value.is_empty() {
        writeln!(out, "{label:<14} {value}").expect("Writing to String buffer is infallible");
    }
}

fn list(out: &mut String, label: &str, values: &[String]) {
    if !values.is_empty() {
        field(out, label, &values.join(", "));
    }
}
