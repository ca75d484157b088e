//! Rendering surfaces for lineage layouts.
//!
//! Exporters read a [`LineageLayout`] and turn it into output. They map the
//! layout's half-column geometry onto their own units and never move a node
//! or a connector.
//!
//! - [`svg::SvgExporter`] - SVG document with layered connectors and measured labels
//! - [`text::TextExporter`] - Monospace diagram with box-drawing connectors

pub mod svg;
pub mod text;

use thiserror::Error;

use crate::lineage::LineageLayout;

/// A rendering surface for lineage layouts.
pub trait Exporter {
    /// Renders `layout` to a string.
    fn export_lineage(&self, layout: &LineageLayout<'_>) -> Result<String, Error>;
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("Style error: {0}")]
    Style(String),
}
