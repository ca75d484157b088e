//! Drawable elements for lineage renderings.
//!
//! Every drawable implements the [`Drawable`] trait: it measures itself and
//! renders to a [`LayeredOutput`], which orders SVG nodes by [`RenderLayer`]
//! when the final document is assembled.
mod layer;
mod line;
mod stroke;
mod text;

pub use layer::{LayeredOutput, RenderLayer, SvgNode};
pub use line::Line;
pub use stroke::{StrokeDefinition, StrokeStyle};
pub use text::{FontWeight, Text, TextDefinition};

use crate::geometry::{Point, Size};

/// Trait for elements that can be rendered to SVG layers.
pub trait Drawable: std::fmt::Debug {
    /// Renders this drawable anchored at `position`.
    ///
    /// What the anchor means is up to the drawable: text is centered on it,
    /// lines start from it.
    fn render_to_layers(&self, position: Point) -> LayeredOutput;

    /// Returns the size this drawable occupies.
    fn size(&self) -> Size;
}
