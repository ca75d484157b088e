//! Straight connector segment.

use svg::node::element as svg_element;

use crate::{
    draw::{Drawable, LayeredOutput, RenderLayer, StrokeDefinition},
    geometry::{Point, Size},
};

/// A straight line drawn from the render position by a fixed offset.
///
/// Lines land on the [`RenderLayer::Connector`] layer.
///
/// ```
/// # use living_archive_core::draw::{Drawable, Line, StrokeDefinition};
/// # use living_archive_core::geometry::Point;
/// let stroke = StrokeDefinition::default();
/// let drop = Line::vertical(&stroke, 30.0);
///
/// assert_eq!(drop.size().height(), 30.0);
/// assert!(!drop.render_to_layers(Point::new(50.0, 0.0)).is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct Line<'a> {
    stroke: &'a StrokeDefinition,
    offset: Point,
}

impl<'a> Line<'a> {
    pub fn new(stroke: &'a StrokeDefinition, offset: Point) -> Self {
        Self { stroke, offset }
    }

    /// A line going `length` downward.
    pub fn vertical(stroke: &'a StrokeDefinition, length: f32) -> Self {
        Self::new(stroke, Point::new(0.0, length))
    }

    /// A line going `length` to the right.
    pub fn horizontal(stroke: &'a StrokeDefinition, length: f32) -> Self {
        Self::new(stroke, Point::new(length, 0.0))
    }
}

impl Drawable for Line<'_> {
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let end = position.add_point(self.offset);

        let line = svg_element::Line::new()
            .set("x1", position.x())
            .set("y1", position.y())
            .set("x2", end.x())
            .set("y2", end.y());
        let line = crate::apply_stroke!(line, self.stroke);

        let mut output = LayeredOutput::new();
        output.add_to_layer(RenderLayer::Connector, Box::new(line));
        output
    }

    fn size(&self) -> Size {
        Size::new(self.offset.x().abs(), self.offset.y().abs())
    }
}
