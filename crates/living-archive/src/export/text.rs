//! Plain-text rendering of lineage layouts.
//!
//! Every column of the layout becomes a fixed number of terminal cells, always
//! even, so each half-column unit maps to a whole cell. Names and annotations
//! are measured by display width after uppercasing and centered on their
//! cell; connectors use box-drawing characters:
//!
//! ```text
//!         ┌───────┴───────┐
//!         │               │
//!      PARTNER         PARTNER
//! ```

use log::{debug, info};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::{
    export::{self, Exporter},
    lineage::{LineageLayout, LineageNode, Tier, TierKind},
};

const VERTICAL: char = '│';
const HORIZONTAL: char = '─';
const FIRST_DROP: char = '┌';
const DROP: char = '┬';
const LAST_DROP: char = '┐';
const TRUNK: char = '┴';
const TRUNK_DROP: char = '┼';
const UNDERLINE: char = '═';

/// Renders lineage layouts as monospace text.
#[derive(Debug, Clone)]
pub struct TextExporter {
    min_column_chars: usize,
}

impl TextExporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the narrowest column, in characters. Rounded up to an even number.
    pub fn with_min_column_chars(mut self, chars: usize) -> Self {
        self.min_column_chars = chars;
        self
    }

    /// Cells per column: enough for every label plus one space each side.
    fn column_chars(&self, layout: &LineageLayout<'_>) -> usize {
        let columns = layout.column_count();
        let needed = |width: usize, span: usize| (width + 2).div_ceil(span);

        let focus_name = layout.focus().name().to_uppercase();
        let focus = needed(label_width(&focus_name, &annotation_of(layout)), columns);
        let parents = layout.parents().map_or(0, |block| {
            let per_slot = block
                .nodes()
                .iter()
                .map(node_width)
                .max()
                .unwrap_or(0);
            needed(per_slot * block.nodes().len(), columns)
        });
        let tiers = layout
            .partners()
            .into_iter()
            .chain(layout.children())
            .flat_map(Tier::cells)
            .map(|cell| needed(node_width(cell.node()), cell.column_span()))
            .max()
            .unwrap_or(0);

        let chars = self.min_column_chars.max(focus).max(parents).max(tiers);
        chars + chars % 2
    }

    fn render_layout(&self, layout: &LineageLayout<'_>) -> String {
        let column_chars = self.column_chars(layout);
        let mut canvas = Canvas::new(layout.column_count() * column_chars, column_chars / 2);
        let center = layout.center();

        if let Some(block) = layout.parents() {
            let slot = canvas.width() / block.nodes().len();
            let names = canvas.add_row();
            let annotations = canvas.add_row();
            for (index, node) in block.nodes().iter().enumerate() {
                let x = slot * index + slot / 2;
                canvas.write_centered_at(names, x, &node.name().to_uppercase());
                canvas.write_centered_at(annotations, x, &annotation_label(node));
            }
            labeled_connector(&mut canvas, block.kind(), center);
        }

        let focus = layout.focus().name().to_uppercase();
        let row = canvas.add_row();
        canvas.write_centered(row, center, &focus);
        let row = canvas.add_row();
        let underline: String = std::iter::repeat_n(UNDERLINE, focus.width()).collect();
        canvas.write_centered(row, center, &underline);
        let row = canvas.add_row();
        canvas.write_centered(row, center, &annotation_of(layout));

        if let Some(partners) = layout.partners() {
            let row = canvas.add_row();
            canvas.put(row, center, VERTICAL);
            fan_out(&mut canvas, partners, center);
            let captions = canvas.add_row();
            let drops = canvas.add_row();
            for drop in partners.drops() {
                canvas.write_centered(captions, drop, partners.kind().label());
                canvas.put(drops, drop, VERTICAL);
            }
            cell_nodes(&mut canvas, partners);
        }

        if let Some(children) = layout.children() {
            labeled_connector(&mut canvas, children.kind(), center);
            fan_out(&mut canvas, children, center);
            cell_nodes(&mut canvas, children);
        }

        debug!(rows = canvas.rows.len(), width = canvas.width(); "Text canvas filled");
        canvas.render()
    }
}

impl Default for TextExporter {
    fn default() -> Self {
        Self {
            min_column_chars: 6,
        }
    }
}

impl Exporter for TextExporter {
    fn export_lineage(&self, layout: &LineageLayout<'_>) -> Result<String, export::Error> {
        info!(
            focus = layout.focus().name(), columns = layout.column_count();
            "Rendering lineage text"
        );
        Ok(self.render_layout(layout))
    }
}

fn annotation_of(layout: &LineageLayout<'_>) -> String {
    format!("({})", layout.focus_annotation().to_string().to_uppercase())
}

fn annotation_label(node: &LineageNode<'_>) -> String {
    format!("({})", node.annotation().to_string().to_uppercase())
}

/// Display width of the wider of two already uppercased labels.
fn label_width(name: &str, annotation: &str) -> usize {
    name.width().max(annotation.width())
}

fn node_width(node: &LineageNode<'_>) -> usize {
    label_width(&node.name().to_uppercase(), &annotation_label(node))
}

/// `│`, caption, `│` on three rows at `center`.
fn labeled_connector(canvas: &mut Canvas, kind: TierKind, center: usize) {
    let row = canvas.add_row();
    canvas.put(row, center, VERTICAL);
    let row = canvas.add_row();
    canvas.write_centered(row, center, kind.label());
    let row = canvas.add_row();
    canvas.put(row, center, VERTICAL);
}

/// Bus row (when the tier has several cells) followed by one drop per cell.
fn fan_out(canvas: &mut Canvas, tier: &Tier<'_>, trunk: usize) {
    if tier.has_bus() {
        let row = canvas.add_row();
        for cell in tier.cells() {
            for segment in [cell.left_bus(), cell.right_bus()].into_iter().flatten() {
                for x in canvas.x(segment.start)..canvas.x(segment.end) {
                    canvas.put_at(row, x, HORIZONTAL);
                }
            }
        }

        let last = tier.len() - 1;
        for (index, drop) in tier.drops().enumerate() {
            let junction = match index {
                0 => FIRST_DROP,
                i if i == last => LAST_DROP,
                _ => DROP,
            };
            canvas.put(row, drop, junction);
        }
        let trunk_junction = if tier.drops().any(|drop| drop == trunk) {
            TRUNK_DROP
        } else {
            TRUNK
        };
        canvas.put(row, trunk, trunk_junction);
    }

    let row = canvas.add_row();
    for drop in tier.drops() {
        canvas.put(row, drop, VERTICAL);
    }
}

fn cell_nodes(canvas: &mut Canvas, tier: &Tier<'_>) {
    let names = canvas.add_row();
    let annotations = canvas.add_row();
    for cell in tier.cells() {
        canvas.write_centered(names, cell.center(), &cell.node().name().to_uppercase());
        canvas.write_centered(annotations, cell.center(), &annotation_label(cell.node()));
    }
}

/// One terminal cell of the canvas.
#[derive(Debug, Clone, PartialEq)]
enum Cell {
    Empty,
    /// A grapheme cluster starting in this cell.
    Glyph(String),
    /// Taken by the wide glyph on its left.
    Covered,
}

/// Growable grid of terminal cells addressed in half-column units.
struct Canvas {
    rows: Vec<Vec<Cell>>,
    width: usize,
    chars_per_half: usize,
}

impl Canvas {
    fn new(width: usize, chars_per_half: usize) -> Self {
        Self {
            rows: Vec::new(),
            width,
            chars_per_half,
        }
    }

    fn width(&self) -> usize {
        self.width
    }

    fn add_row(&mut self) -> usize {
        self.rows.push(vec![Cell::Empty; self.width]);
        self.rows.len() - 1
    }

    /// Cell position of a half-column unit, kept inside the canvas.
    fn x(&self, half_units: usize) -> usize {
        (half_units * self.chars_per_half).min(self.width.saturating_sub(1))
    }

    fn put(&mut self, row: usize, half_units: usize, ch: char) {
        let x = self.x(half_units);
        self.put_at(row, x, ch);
    }

    fn put_at(&mut self, row: usize, x: usize, ch: char) {
        self.put_glyph(row, x, ch.encode_utf8(&mut [0; 4]), 1);
    }

    /// Places a grapheme of display width `width` at `x`. Glyphs that would
    /// cross the right edge are dropped.
    fn put_glyph(&mut self, row: usize, x: usize, glyph: &str, width: usize) {
        if width == 0 || x + width > self.width || row >= self.rows.len() {
            return;
        }
        for offset in 0..width {
            self.clear(row, x + offset);
        }

        let cells = &mut self.rows[row];
        cells[x] = Cell::Glyph(glyph.to_string());
        for cell in &mut cells[x + 1..x + width] {
            *cell = Cell::Covered;
        }
    }

    /// Empties the cell at `x` together with every cell of the glyph it
    /// belongs to.
    fn clear(&mut self, row: usize, x: usize) {
        let cells = &mut self.rows[row];
        let mut start = x;
        while start > 0 && cells[start] == Cell::Covered {
            start -= 1;
        }
        let mut end = x + 1;
        while end < cells.len() && cells[end] == Cell::Covered {
            end += 1;
        }
        // A lone cell keeps its neighbours
        if start == x && end == x + 1 {
            cells[x] = Cell::Empty;
            return;
        }
        for cell in &mut cells[start..end] {
            *cell = Cell::Empty;
        }
    }

    fn write_centered(&mut self, row: usize, half_units: usize, text: &str) {
        let x = self.x(half_units);
        self.write_centered_at(row, x, text);
    }

    /// Writes `text` centered on cell `x`, clipped to the canvas.
    fn write_centered_at(&mut self, row: usize, x: usize, text: &str) {
        let mut position = x.saturating_sub(text.width() / 2);
        for glyph in text.graphemes(true) {
            let width = glyph.width();
            self.put_glyph(row, position, glyph, width);
            position += width;
        }
    }

    fn render(&self) -> String {
        let mut out = String::new();
        for row in &self.rows {
            let line: String = row
                .iter()
                .map(|cell| match cell {
                    Cell::Empty => " ",
                    Cell::Glyph(glyph) => glyph.as_str(),
                    Cell::Covered => "",
                })
                .collect();
            out.push_str(line.trim_end());
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use living_archive_core::{
        entity::{Entity, EntityType, Relations},
        repository::EntityIndex,
    };

    use super::*;
    use crate::lineage::compute_layout;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|name| name.to_string()).collect()
    }

    fn index() -> EntityIndex {
        EntityIndex::new([
            Entity::new("Nyame", EntityType::Divinity),
            Entity::new("Okonore Yaa", EntityType::Divinity),
            Entity::new("Ntikuma", EntityType::Hero),
        ])
    }

    fn render(focus: &Entity) -> String {
        let index = index();
        let layout = compute_layout(focus, &index);
        TextExporter::new().export_lineage(&layout).unwrap()
    }

    /// Character column of the first occurrence of `ch` on `line`.
    fn column_of(line: &str, ch: char) -> Option<usize> {
        line.chars().position(|c| c == ch)
    }

    #[test]
    fn test_anansi_diagram() {
        let focus = Entity::new("Anansi", EntityType::Hero).with_relations(Relations {
            parents: names(&["Nyame"]),
            conjoint: names(&["Okonore Yaa", "Aso"]),
            descendants: names(&["Ntikuma"]),
        });
        let text = render(&focus);
        let lines: Vec<&str> = text.lines().collect();

        for expected in [
            "NYAME", "PARENTS", "ANANSI", "(HERO)", "OKONORE YAA", "ASO", "(UNKNOWN)", "CHILD",
            "NTIKUMA",
        ] {
            assert!(text.contains(expected), "missing {expected} in\n{text}");
        }

        let bus = lines
            .iter()
            .find(|line| line.contains(FIRST_DROP))
            .expect("partner bus");
        assert!(bus.contains(TRUNK));
        assert!(bus.contains(LAST_DROP));
        assert_eq!(bus.chars().filter(|&c| c == FIRST_DROP).count(), 1);

        // Trunk sits halfway between the two drops
        let first = column_of(bus, FIRST_DROP).unwrap();
        let trunk = column_of(bus, TRUNK).unwrap();
        let last = column_of(bus, LAST_DROP).unwrap();
        assert_eq!(trunk - first, last - trunk);

        // Single child: no second bus
        assert_eq!(lines.iter().filter(|line| line.contains(FIRST_DROP)).count(), 1);
        assert_eq!(text.matches("PARTNER").count(), 2);
    }

    #[test]
    fn test_three_children_share_the_bus() {
        let focus = Entity::new("Sango", EntityType::Divinity).with_relations(Relations {
            descendants: names(&["A", "B", "C"]),
            ..Default::default()
        });
        let text = render(&focus);
        let bus = text
            .lines()
            .find(|line| line.contains(FIRST_DROP))
            .expect("child bus");

        // Middle drop is directly under the trunk
        assert!(bus.contains(TRUNK_DROP));
        assert!(!bus.contains(TRUNK));
        assert!(bus.trim().starts_with(FIRST_DROP));
        assert!(bus.trim().ends_with(LAST_DROP));
        assert!(!bus.trim().contains(' '));
    }

    #[test]
    fn test_lone_focus() {
        let focus = Entity::new("Bia", EntityType::Divinity);
        let text = render(&focus);

        assert_eq!(text.lines().count(), 3);
        assert!(text.contains("BIA"));
        assert!(text.contains("(DIVINITY)"));
        assert!(!text.contains(VERTICAL));
    }

    #[test]
    fn test_underline_matches_display_width() {
        // O with dot below and grave, S with dot below: combining marks take no cell
        let focus = Entity::new("O\u{323}\u{300}s\u{323}un", EntityType::Divinity);
        let text = render(&focus);
        let lines: Vec<&str> = text.lines().collect();

        let name = lines[0];
        let underline = lines[1];
        assert_eq!(name.trim().width(), 4);
        assert_eq!(underline.trim().chars().count(), 4);
        assert!(underline.trim().chars().all(|c| c == UNDERLINE));
        // Both start at the same cell
        assert_eq!(
            name.len() - name.trim_start().len(),
            underline.len() - underline.trim_start().len()
        );
    }

    #[test]
    fn test_wide_names_take_two_cells_per_glyph() {
        let focus = Entity::new("孫悟空", EntityType::Hero).with_relations(Relations {
            conjoint: names(&["Aso", "Ntikuma"]),
            ..Default::default()
        });
        let text = render(&focus);

        assert!(text.contains("孫悟空"));
        let underline = text
            .lines()
            .find(|line| line.contains(UNDERLINE))
            .expect("focus underline");
        assert_eq!(underline.trim().chars().count(), 6);
    }

    #[test]
    fn test_widths_are_measured_after_uppercasing() {
        // Uppercases to STRASSE, one cell wider
        let focus = Entity::new("Straße", EntityType::Hero);
        let index = index();
        let layout = compute_layout(&focus, &index);
        let chars = TextExporter::new().with_min_column_chars(2).column_chars(&layout);
        assert!(chars * layout.column_count() >= "STRASSE".len() + 2);

        let text = TextExporter::new().export_lineage(&layout).unwrap();
        assert!(text.contains("STRASSE"));
        let underline = text.lines().nth(1).unwrap();
        assert_eq!(underline.trim().chars().count(), 7);
    }

    #[test]
    fn test_overwriting_a_wide_glyph_clears_it() {
        let mut canvas = Canvas::new(6, 1);
        let row = canvas.add_row();
        canvas.write_centered_at(row, 2, "空");
        canvas.put_at(row, 2, VERTICAL);
        assert_eq!(canvas.render(), "  │\n");

        canvas.write_centered_at(row, 6, "空");
        assert_eq!(canvas.render(), "  │\n");
    }

    #[test]
    fn test_column_chars_are_even_and_fit_labels() {
        let focus = Entity::new("Anansi", EntityType::Hero).with_relations(Relations {
            conjoint: names(&["Okonore Yaa", "Aso"]),
            ..Default::default()
        });
        let index = index();
        let layout = compute_layout(&focus, &index);
        let chars = TextExporter::new().with_min_column_chars(3).column_chars(&layout);

        assert_eq!(chars % 2, 0);
        assert!(chars * 2 >= "OKONORE YAA".len() + 2);
    }
}
