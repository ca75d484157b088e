//! SVG rendering of lineage layouts.

use ::svg::{Document, node::element as svg_element};
use log::{debug, info, trace};

use living_archive_core::{
    apply_stroke,
    color::Color,
    draw::{
        Drawable, FontWeight, LayeredOutput, Line, RenderLayer, StrokeDefinition, Text,
        TextDefinition,
    },
    geometry::Point,
};

use crate::{
    config::AppConfig,
    export::{self, Exporter},
    lineage::{LineageLayout, LineageNode, Tier, TierKind},
};

/// Height of the band holding a tier caption.
const LABEL_HEIGHT: f32 = 16.0;
/// Horizontal room kept free around a name inside its cell.
const LABEL_GAP: f32 = 24.0;

/// Renders lineage layouts to SVG documents.
///
/// Column width starts from [`LineageConfig::column_width`] and grows until
/// every measured name fits inside its cell.
///
/// [`LineageConfig::column_width`]: crate::config::LineageConfig::column_width
#[derive(Debug, Clone)]
pub struct SvgExporter {
    min_column_width: f32,
    row_height: f32,
    connector_length: f32,
    padding: f32,
    background: Color,
    line: StrokeDefinition,
    /// Connector into a node that matches no record.
    unknown_line: StrokeDefinition,
    accent: StrokeDefinition,
    name_text: TextDefinition,
    unknown_text: TextDefinition,
    focus_text: TextDefinition,
    annotation_text: TextDefinition,
    label_text: TextDefinition,
}

impl SvgExporter {
    /// Builds an exporter from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`export::Error::Style`] when a configured color does not parse.
    pub fn new(config: &AppConfig) -> Result<Self, export::Error> {
        let style = config.style();
        let lineage = config.lineage();

        let background = style.background_color().map_err(export::Error::Style)?;
        let line_color = style.line_color().map_err(export::Error::Style)?;
        let text_color = style.text_color().map_err(export::Error::Style)?;
        let muted_color = style.muted_color().map_err(export::Error::Style)?;
        let accent_color = style.accent_color().map_err(export::Error::Style)?;

        let text = |size: u16, weight: FontWeight, color: Color| {
            let mut definition = TextDefinition::new();
            definition.set_font_family(style.font_family());
            definition.set_font_size(size);
            definition.set_weight(weight);
            definition.set_color(Some(color));
            definition.set_uppercase(true);
            definition
        };

        Ok(Self {
            min_column_width: lineage.column_width(),
            row_height: lineage.row_height(),
            connector_length: lineage.connector_length(),
            padding: lineage.padding(),
            background,
            line: StrokeDefinition::solid(line_color, 1.0),
            unknown_line: StrokeDefinition::dashed(muted_color, 1.0),
            accent: StrokeDefinition::solid(accent_color, 2.0),
            name_text: text(14, FontWeight::Bold, text_color),
            unknown_text: text(14, FontWeight::Normal, muted_color),
            focus_text: text(20, FontWeight::Black, text_color),
            annotation_text: text(9, FontWeight::Normal, muted_color),
            label_text: text(9, FontWeight::Bold, line_color),
        })
    }

    fn node_text(&self, node: &LineageNode<'_>) -> &TextDefinition {
        if node.is_unknown() {
            &self.unknown_text
        } else {
            &self.name_text
        }
    }

    /// Widest column any label of the layout needs.
    fn column_width(&self, layout: &LineageLayout<'_>) -> f32 {
        let columns = layout.column_count() as f32;
        let needed = |definition: &TextDefinition, content: &str, span: f32| {
            (Text::new(definition, content).calculate_size().width() + LABEL_GAP) / span
        };

        let focus = needed(&self.focus_text, layout.focus().name(), columns);

        let parents = layout.parents().map_or(0.0, |block| {
            let slot = columns / block.nodes().len() as f32;
            block
                .nodes()
                .iter()
                .map(|node| needed(self.node_text(node), node.name(), slot))
                .fold(0.0, f32::max)
        });

        let tiers = layout
            .partners()
            .into_iter()
            .chain(layout.children())
            .flat_map(Tier::cells)
            .map(|cell| {
                needed(
                    self.node_text(cell.node()),
                    cell.node().name(),
                    cell.column_span() as f32,
                )
            })
            .fold(0.0, f32::max);

        let width = self.min_column_width.max(focus).max(parents).max(tiers);
        trace!(
            column_width = width, focus = focus, parents = parents, tiers = tiers;
            "Column width measured"
        );
        width
    }

    fn render_layout(&self, layout: &LineageLayout<'_>) -> Document {
        let column_width = self.column_width(layout);
        let grid = Grid {
            left: self.padding,
            half_column: column_width / 2.0,
        };
        let center_x = grid.x(layout.center());
        let half_connector = self.connector_length / 2.0;

        let mut output = LayeredOutput::new();
        let mut y = self.padding;

        if let Some(block) = layout.parents() {
            let slot_width =
                layout.column_count() as f32 * column_width / block.nodes().len() as f32;
            for (index, node) in block.nodes().iter().enumerate() {
                let x = self.padding + slot_width * (index as f32 + 0.5);
                output.merge(self.render_node(node, Point::new(x, y)));
            }
            y += self.row_height;

            y = self.render_labeled_connector(&mut output, block.kind(), center_x, y);
        }

        output.merge(self.render_focus(layout, Point::new(center_x, y)));
        y += self.row_height;

        if let Some(partners) = layout.partners() {
            output.merge(
                Line::vertical(&self.line, half_connector)
                    .render_to_layers(Point::new(center_x, y)),
            );
            y += half_connector;
            y = self.render_fan_out(&mut output, partners, &grid, y);
            y = self.render_cell_labels(&mut output, partners, &grid, y);
            y = self.render_cell_nodes(&mut output, partners, &grid, y);
        }

        if let Some(children) = layout.children() {
            y = self.render_labeled_connector(&mut output, children.kind(), center_x, y);
            y = self.render_fan_out(&mut output, children, &grid, y);
            y = self.render_cell_nodes(&mut output, children, &grid, y);
        }

        let width = 2.0 * self.padding + layout.column_count() as f32 * column_width;
        let height = y + self.padding;
        debug!(width = width, height = height; "SVG dimensions calculated");

        let background = svg_element::Rectangle::new()
            .set("x", 0)
            .set("y", 0)
            .set("width", width)
            .set("height", height)
            .set("fill", self.background.to_string());
        output.add_to_layer(RenderLayer::Background, Box::new(background));

        output.render().into_iter().fold(
            Document::new()
                .set("viewBox", (0, 0, width, height))
                .set("width", width)
                .set("height", height),
            |doc, node| doc.add(node),
        )
    }

    /// Name with its annotation below, centered on `top.x()`.
    fn render_node(&self, node: &LineageNode<'_>, top: Point) -> LayeredOutput {
        let annotation = node.annotation().to_string();
        let mut output = Text::new(self.node_text(node), node.name())
            .render_to_layers(top.with_y(top.y() + self.row_height * 0.35));
        output.merge(
            Text::new(&self.annotation_text, &annotation)
                .render_to_layers(top.with_y(top.y() + self.row_height * 0.75)),
        );
        output
    }

    fn render_focus(&self, layout: &LineageLayout<'_>, top: Point) -> LayeredOutput {
        let focus = layout.focus();
        let name = Text::new(&self.focus_text, focus.name());
        let name_y = top.y() + self.row_height * 0.35;
        let mut output = name.render_to_layers(top.with_y(name_y));

        let underline_width = name.calculate_size().width();
        let underline_y = name_y + self.row_height * 0.25;
        let underline = svg_element::Line::new()
            .set("x1", top.x() - underline_width / 2.0)
            .set("y1", underline_y)
            .set("x2", top.x() + underline_width / 2.0)
            .set("y2", underline_y);
        let underline = apply_stroke!(underline, &self.accent);
        output.add_to_layer(RenderLayer::Content, Box::new(underline));

        let annotation = layout.focus_annotation().to_string();
        output.merge(
            Text::new(&self.annotation_text, &annotation)
                .render_to_layers(top.with_y(top.y() + self.row_height * 0.85)),
        );
        output
    }

    /// Vertical connector broken by a tier caption. Returns the new cursor.
    fn render_labeled_connector(
        &self,
        output: &mut LayeredOutput,
        kind: TierKind,
        x: f32,
        y: f32,
    ) -> f32 {
        let half_connector = self.connector_length / 2.0;
        let segment = Line::vertical(&self.line, half_connector);

        output.merge(segment.render_to_layers(Point::new(x, y)));
        let y = y + half_connector;

        output.merge(
            Text::new(&self.label_text, kind.label())
                .render_to_layers(Point::new(x, y + LABEL_HEIGHT / 2.0)),
        );
        let y = y + LABEL_HEIGHT;

        output.merge(segment.render_to_layers(Point::new(x, y)));
        y + half_connector
    }

    /// Bus segments at `y` and one drop per cell below them.
    fn render_fan_out(
        &self,
        output: &mut LayeredOutput,
        tier: &Tier<'_>,
        grid: &Grid,
        y: f32,
    ) -> f32 {
        for cell in tier.cells() {
            for segment in [cell.left_bus(), cell.right_bus()].into_iter().flatten() {
                let start = grid.x(segment.start);
                let length = grid.x(segment.end) - start;
                output.merge(
                    Line::horizontal(&self.line, length).render_to_layers(Point::new(start, y)),
                );
            }
        }

        let drop = Line::vertical(&self.line, self.connector_length / 2.0);
        for center in tier.drops() {
            output.merge(drop.render_to_layers(Point::new(grid.x(center), y)));
        }
        y + drop.size().height()
    }

    /// Per-cell caption followed by a short connector, dashed for unknown
    /// nodes.
    fn render_cell_labels(
        &self,
        output: &mut LayeredOutput,
        tier: &Tier<'_>,
        grid: &Grid,
        y: f32,
    ) -> f32 {
        let caption = Text::new(&self.label_text, tier.kind().label());
        let length = self.connector_length / 2.0;
        for cell in tier.cells() {
            let x = grid.x(cell.center());
            let stroke = if cell.node().is_unknown() {
                &self.unknown_line
            } else {
                &self.line
            };
            output.merge(caption.render_to_layers(Point::new(x, y + LABEL_HEIGHT / 2.0)));
            output.merge(
                Line::vertical(stroke, length).render_to_layers(Point::new(x, y + LABEL_HEIGHT)),
            );
        }
        y + LABEL_HEIGHT + length
    }

    fn render_cell_nodes(
        &self,
        output: &mut LayeredOutput,
        tier: &Tier<'_>,
        grid: &Grid,
        y: f32,
    ) -> f32 {
        for cell in tier.cells() {
            output.merge(self.render_node(cell.node(), Point::new(grid.x(cell.center()), y)));
        }
        y + self.row_height
    }
}

impl Exporter for SvgExporter {
    fn export_lineage(&self, layout: &LineageLayout<'_>) -> Result<String, export::Error> {
        info!(
            focus = layout.focus().name(), columns = layout.column_count();
            "Rendering lineage SVG"
        );
        let doc = self.render_layout(layout);
        debug!("SVG document rendered");
        Ok(doc.to_string())
    }
}

/// Maps half-column units to pixels.
struct Grid {
    left: f32,
    half_column: f32,
}

impl Grid {
    fn x(&self, half_units: usize) -> f32 {
        self.left + half_units as f32 * self.half_column
    }
}
