//! CLI logic for the Living Archive.
//!
//! This module loads the configuration and the dataset, then runs one
//! [`Command`] against them.

pub mod error_adapter;

mod args;
mod config;
mod report;

pub use args::{Args, Command};

use std::{
    fs,
    io::{self, Write},
};

use log::{info, warn};

use living_archive::{
    ArchiveBuilder, ArchiveError,
    catalog::Catalog,
    entity::Entity,
    repository::{EntityIndex, EntityRepository},
};

/// Run the Living Archive CLI application, printing to standard output.
///
/// # Errors
///
/// Returns `ArchiveError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Dataset syntax and validation errors
/// - Unknown entity names
/// - Rendering errors
pub fn run(args: &Args) -> Result<(), ArchiveError> {
    let stdout = io::stdout();
    execute(args, &mut stdout.lock())
}

/// Run `args` and write every printed report to `out`.
///
/// # Errors
///
/// See [`run`].
pub fn execute(args: &Args, out: &mut impl Write) -> Result<(), ArchiveError> {
    let app_config = config::load_config(args.config.as_ref())?;
    let builder = ArchiveBuilder::new(app_config);

    if let Command::Normalize { output } = &args.command {
        return normalize(args.dataset.as_deref(), output);
    }

    let archive = match &args.dataset {
        Some(path) => {
            info!(dataset_path = path; "Loading dataset");
            builder.load_file(path)?
        }
        None => builder.load_bundled()?,
    };

    browse(&args.command, &builder, &archive, out)
}

fn browse(
    command: &Command,
    builder: &ArchiveBuilder,
    archive: &EntityIndex,
    out: &mut impl Write,
) -> Result<(), ArchiveError> {
    let catalog = Catalog::new(archive);

    match command {
        Command::Lineage {
            name,
            format,
            output,
        } => {
            let layout = builder.lineage(archive, name)?;
            let rendered = builder.render(&layout, *format)?;
            match output {
                Some(path) => {
                    fs::write(path, rendered)?;
                    info!(output_file = path, format = format.name(); "Lineage exported successfully");
                }
                None => writeln!(out, "{rendered}")?,
            }
        }
        Command::Search { query } => {
            write!(out, "{}", report::listing(&catalog.search(query)))?;
        }
        Command::Show { name } => {
            let entity = find(archive, name)?;
            write!(out, "{}", report::card(entity))?;
        }
        Command::Types { entity_type } => match entity_type {
            Some(entity_type) => {
                write!(out, "{}", report::listing(&catalog.by_type(*entity_type)))?;
            }
            None => write!(out, "{}", report::type_counts(&catalog.type_counts()))?,
        },
        Command::Region { region, ethnicity } => {
            let entities = match ethnicity {
                Some(ethnicity) => catalog.by_region_and_ethnicity(*region, ethnicity),
                None => catalog.by_region(*region),
            };
            writeln!(out, "{region}")?;
            write!(out, "{}", report::listing(&entities))?;
        }
        Command::Pantheons => {
            write!(out, "{}", report::pantheons(&catalog.pantheons()))?;
        }
        Command::Random => match catalog.random(&mut rand::rng()) {
            Some(entity) => write!(out, "{}", report::card(entity))?,
            None => warn!("The archive is empty"),
        },
        Command::Analyze => {
            write!(out, "{}", report::coverage(&catalog.image_coverage()))?;
        }
        Command::ListMissing => {
            let missing = catalog.missing_images();
            writeln!(out, "Entities requiring visualization ({}):", missing.len())?;
            write!(out, "{}", report::listing(&missing))?;
        }
        Command::Preview { name, style } => {
            let prompt = builder.image_prompt(archive, name, style.as_deref())?;
            writeln!(out, "{prompt}")?;
        }
        // Works on raw records, see `normalize`
        Command::Normalize { .. } => {}
    }

    Ok(())
}

fn find<'a>(archive: &'a EntityIndex, name: &str) -> Result<&'a Entity, ArchiveError> {
    archive
        .resolve(name)
        .ok_or_else(|| ArchiveError::EntityNotFound(name.to_string()))
}

fn normalize(dataset: Option<&str>, output: &str) -> Result<(), ArchiveError> {
    let mut entities = match dataset {
        Some(path) => living_archive_dataset::load_file(path)?,
        None => living_archive_dataset::bundled()?,
    };

    let changed = living_archive_dataset::normalize_all(&mut entities);
    living_archive_dataset::save_file(output, &entities)?;

    info!(output_file = output, changed_count = changed; "Normalized dataset written");
    Ok(())
}
