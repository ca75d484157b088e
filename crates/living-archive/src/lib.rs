//! Living Archive - a browsable archive of African mythological figures.
//!
//! Loads the archive dataset, answers catalog queries and computes and
//! renders lineage diagrams. The layout engine lives in [`lineage`], browsing
//! queries in [`catalog`], and [`ArchiveBuilder`] ties them to a dataset and
//! a configuration.

pub mod catalog;
pub mod config;
pub mod export;
pub mod lineage;

mod error;

pub use living_archive_core::{color, entity, repository};

pub use error::ArchiveError;

use std::{fmt, path::Path, str::FromStr};

use log::{debug, info, trace};

use living_archive_core::{
    entity::Entity,
    repository::{EntityIndex, EntityRepository},
};

use config::AppConfig;
use export::{Exporter, svg::SvgExporter, text::TextExporter};
use lineage::LineageLayout;

/// Output format of a rendered lineage.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Svg,
    Text,
}

impl OutputFormat {
    pub fn name(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Text => "text",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "svg" => Ok(Self::Svg),
            "text" | "txt" => Ok(Self::Text),
            _ => Err(format!("unknown output format `{s}` (expected svg or text)")),
        }
    }
}

/// Builder for loading the archive and rendering lineages.
///
/// # Examples
///
/// ```rust
/// use living_archive::{ArchiveBuilder, OutputFormat, config::AppConfig};
///
/// let builder = ArchiveBuilder::new(AppConfig::default());
/// let archive = builder.load_bundled().expect("bundled dataset loads");
///
/// let layout = builder.lineage(&archive, "anansi").expect("Anansi is archived");
/// assert_eq!(layout.column_count(), 4);
///
/// let diagram = builder.render(&layout, OutputFormat::Text).expect("text renders");
/// assert!(diagram.contains("ANANSI"));
/// ```
#[derive(Debug, Default)]
pub struct ArchiveBuilder {
    config: AppConfig,
}

impl ArchiveBuilder {
    /// Create a new archive builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Index the dataset bundled with the crate.
    ///
    /// # Errors
    ///
    /// Returns `ArchiveError::Dataset` if the bundled dataset fails to parse
    /// or validate.
    pub fn load_bundled(&self) -> Result<EntityIndex, ArchiveError> {
        let entities = living_archive_dataset::bundled()?;
        Ok(self.index(entities))
    }

    /// Read and index a dataset file.
    ///
    /// # Errors
    ///
    /// Returns `ArchiveError::Dataset` for read, syntax or validation errors.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<EntityIndex, ArchiveError> {
        let entities = living_archive_dataset::load_file(path)?;
        Ok(self.index(entities))
    }

    /// Index a dataset held in memory.
    ///
    /// # Errors
    ///
    /// Returns `ArchiveError::Dataset` for syntax or validation errors.
    pub fn load_str(&self, source: &str) -> Result<EntityIndex, ArchiveError> {
        let entities = living_archive_dataset::load_str(source)?;
        Ok(self.index(entities))
    }

    fn index(&self, entities: Vec<Entity>) -> EntityIndex {
        let index = EntityIndex::new(entities);
        info!(entities_count = index.len(); "Archive indexed");
        index
    }

    /// Compute the lineage of the entity named `name`.
    ///
    /// # Errors
    ///
    /// Returns `ArchiveError::EntityNotFound` when no entity has that name.
    pub fn lineage<'a>(
        &self,
        archive: &'a EntityIndex,
        name: &str,
    ) -> Result<LineageLayout<'a>, ArchiveError> {
        let focus = archive
            .resolve(name)
            .ok_or_else(|| ArchiveError::EntityNotFound(name.to_string()))?;

        let layout = lineage::compute_layout(focus, archive);
        debug!(
            focus = focus.name(),
            columns = layout.column_count(),
            nodes_count = layout.nodes().count();
            "Lineage computed"
        );
        trace!(layout:?; "Lineage layout");

        Ok(layout)
    }

    /// The image prompt of the entity named `name`, for `style_id` when
    /// given. See [`Entity::image_prompt`] for the lookup order.
    ///
    /// # Errors
    ///
    /// Returns `ArchiveError::EntityNotFound` when no entity has that name
    /// and `ArchiveError::MissingPrompt` when the entity has no usable prompt.
    pub fn image_prompt<'a>(
        &self,
        archive: &'a EntityIndex,
        name: &str,
        style_id: Option<&str>,
    ) -> Result<&'a str, ArchiveError> {
        let entity = archive
            .resolve(name)
            .ok_or_else(|| ArchiveError::EntityNotFound(name.to_string()))?;

        let prompt = entity
            .image_prompt(style_id)
            .ok_or_else(|| ArchiveError::MissingPrompt(entity.name().to_string()))?;
        debug!(focus = entity.name(), style_id:?; "Image prompt selected");
        Ok(prompt)
    }

    /// Render a lineage layout in the requested format.
    ///
    /// # Errors
    ///
    /// Returns `ArchiveError::Export` when the configured style is invalid.
    pub fn render(
        &self,
        layout: &LineageLayout<'_>,
        format: OutputFormat,
    ) -> Result<String, ArchiveError> {
        let rendered = match format {
            OutputFormat::Svg => SvgExporter::new(&self.config)?.export_lineage(layout)?,
            OutputFormat::Text => TextExporter::new().export_lineage(layout)?,
        };

        info!(format = format.name(), bytes = rendered.len(); "Lineage rendered");
        Ok(rendered)
    }

    /// Render a lineage layout to an SVG string.
    pub fn render_svg(&self, layout: &LineageLayout<'_>) -> Result<String, ArchiveError> {
        self.render(layout, OutputFormat::Svg)
    }

    /// Render a lineage layout as monospace text.
    pub fn render_text(&self, layout: &LineageLayout<'_>) -> Result<String, ArchiveError> {
        self.render(layout, OutputFormat::Text)
    }
}
