//! Reading, validating and writing the JSON dataset.

use std::{fs, path::Path};

use log::{debug, info, trace, warn};
use serde_json::error::Category;

use living_archive_core::entity::Entity;

use crate::error::{DatasetError, Issue};

/// Dataset compiled into the crate.
const BUNDLED_DATASET: &str = include_str!("../data/archive.json");

/// Parses and validates a dataset held in memory.
///
/// # Errors
///
/// Returns [`DatasetError::Syntax`] when the text is not a JSON array of
/// entity records, and [`DatasetError::Invalid`] when records break a
/// dataset rule (such as an empty name).
pub fn load_str(src: &str) -> Result<Vec<Entity>, DatasetError> {
    let entities: Vec<Entity> =
        serde_json::from_str(src).map_err(|err| syntax_error(&err, src))?;

    debug!(records_count = entities.len(); "Dataset parsed");
    validate(&entities)?;

    Ok(entities)
}

/// Reads, parses and validates a dataset file.
///
/// # Errors
///
/// Returns [`DatasetError::Read`] when the file cannot be read, otherwise the
/// errors of [`load_str`].
pub fn load_file(path: impl AsRef<Path>) -> Result<Vec<Entity>, DatasetError> {
    let path = path.as_ref();
    info!(path = path.display().to_string(); "Loading dataset");

    let src = fs::read_to_string(path).map_err(|source| DatasetError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    load_str(&src)
}

/// Loads the dataset bundled with the crate.
pub fn bundled() -> Result<Vec<Entity>, DatasetError> {
    info!("Loading bundled dataset");
    load_str(BUNDLED_DATASET)
}

/// Serializes entities to pretty-printed JSON, non-ASCII text kept as is.
pub fn to_json(entities: &[Entity]) -> Result<String, DatasetError> {
    let mut json = serde_json::to_string_pretty(entities).map_err(DatasetError::Serialize)?;
    json.push('\n');
    Ok(json)
}

/// Writes entities to `path` as pretty-printed JSON.
pub fn save_file(path: impl AsRef<Path>, entities: &[Entity]) -> Result<(), DatasetError> {
    let path = path.as_ref();
    let json = to_json(entities)?;

    fs::write(path, json).map_err(|source| DatasetError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    info!(path = path.display().to_string(), records_count = entities.len(); "Dataset saved");
    Ok(())
}

/// Checks dataset rules that the JSON shape alone cannot express.
fn validate(entities: &[Entity]) -> Result<(), DatasetError> {
    let mut issues = Vec::new();

    for (index, entity) in entities.iter().enumerate() {
        let name = entity.name();
        if name.trim().is_empty() {
            issues.push(
                Issue::new("entity name is empty")
                    .with_record(index)
                    .with_help("every record needs a non-blank `name`"),
            );
            continue;
        }

        if name.trim() != name {
            warn!(record = index, name = name; "Entity name has surrounding whitespace");
        }

        let relations = entity.relations();
        let blank_relations = relations
            .parents
            .iter()
            .chain(&relations.conjoint)
            .chain(&relations.descendants)
            .filter(|relation| relation.trim().is_empty())
            .count();
        if blank_relations > 0 {
            warn!(name = name, blank_relations = blank_relations; "Entity lists blank relation names");
        }
    }

    if issues.is_empty() {
        trace!(records_count = entities.len(); "Dataset validated");
        Ok(())
    } else {
        Err(DatasetError::Invalid { issues })
    }
}

fn syntax_error(err: &serde_json::Error, src: &str) -> DatasetError {
    let help = match err.classify() {
        Category::Syntax => "check for missing commas, brackets or quotes",
        Category::Data => {
            "each record needs a `name` and an `entity_type` of Divinity, Hero or Creature"
        }
        Category::Eof => "the dataset ends before the JSON document is complete",
        Category::Io => "the dataset could not be read",
    };

    let issue = Issue::new(err.to_string())
        .with_offset(byte_offset(src, err.line(), err.column()))
        .with_help(help);

    DatasetError::Syntax {
        issue,
        src: src.to_string(),
    }
}

/// Converts serde_json's one-based line and byte column to a byte offset.
fn byte_offset(src: &str, line: usize, column: usize) -> usize {
    if line == 0 {
        return 0;
    }

    let line_start: usize = src
        .split_inclusive('\n')
        .take(line - 1)
        .map(str::len)
        .sum();
    let mut offset = (line_start + column.saturating_sub(1)).min(src.len());
    while !src.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}
