//! Text labels: styling, measurement and SVG rendering.
//!
//! - [`TextDefinition`] - Reusable text style (font, size, weight, color, case)
//! - [`Text`] - A measurable, renderable label combining content with a definition
//!
//! Measurement goes through a shared cosmic-text `FontSystem`, created on
//! first use. When no font can shape the content, an estimate based on the
//! font size is used instead, so measurement never fails.
//!
//! ```
//! # use living_archive_core::draw::{Text, TextDefinition};
//! let mut style = TextDefinition::new();
//! style.set_font_family("monospace");
//! style.set_font_size(14);
//! style.set_uppercase(true);
//!
//! let text = Text::new(&style, "Okonore Yaa");
//! assert_eq!(text.display_content(), "OKONORE YAA");
//! assert!(text.calculate_size().width() > 0.0);
//! ```

use std::{
    borrow::Cow,
    sync::{Arc, Mutex, OnceLock},
};

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping};
use log::info;
use svg::{node::Text as SvgText, node::element as svg_element};

use crate::{
    color::Color,
    draw::{Drawable, LayeredOutput, RenderLayer},
    geometry::{Insets, Point, Size},
};

/// Font weight written to the SVG `font-weight` attribute.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
    /// Heaviest weight, used for the focus name.
    Black,
}

impl FontWeight {
    pub fn to_svg_value(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Bold => "bold",
            Self::Black => "900",
        }
    }
}

/// Visual style for text labels.
///
/// | Property | Default |
/// |----------|---------|
/// | Font family | `"monospace"` |
/// | Font size | `14` |
/// | Weight | normal |
/// | Color | `None` (SVG default) |
/// | Uppercase | `false` |
/// | Padding | zero |
#[derive(Debug, Clone)]
pub struct TextDefinition {
    font_family: String,
    font_size: u16,
    weight: FontWeight,
    color: Option<Color>,
    uppercase: bool,
    padding: Insets,
}

impl TextDefinition {
    /// Creates a new text definition with default values.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_font_size(&mut self, size: u16) {
        self.font_size = size;
    }

    pub fn set_font_family(&mut self, family: &str) {
        self.font_family = family.to_string();
    }

    pub fn set_weight(&mut self, weight: FontWeight) {
        self.weight = weight;
    }

    /// Sets the fill color. `None` keeps the SVG default.
    pub fn set_color(&mut self, color: Option<Color>) {
        self.color = color;
    }

    /// Renders (and measures) the content in upper case when set.
    pub fn set_uppercase(&mut self, uppercase: bool) {
        self.uppercase = uppercase;
    }

    /// Sets the padding included in the measured size.
    pub fn set_padding(&mut self, padding: Insets) {
        self.padding = padding;
    }

    pub fn font_size(&self) -> u16 {
        self.font_size
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn weight(&self) -> FontWeight {
        self.weight
    }

    pub fn color(&self) -> Option<&Color> {
        self.color.as_ref()
    }

    pub fn uppercase(&self) -> bool {
        self.uppercase
    }

    pub fn padding(&self) -> Insets {
        self.padding
    }
}

impl Default for TextDefinition {
    fn default() -> Self {
        Self {
            font_family: "monospace".to_string(),
            font_size: 14,
            weight: FontWeight::default(),
            color: None,
            uppercase: false,
            padding: Insets::default(),
        }
    }
}

/// A single-line label.
#[derive(Debug, Clone)]
pub struct Text<'a> {
    definition: &'a TextDefinition,
    content: &'a str,
}

impl<'a> Text<'a> {
    pub fn new(definition: &'a TextDefinition, content: &'a str) -> Self {
        Self {
            definition,
            content,
        }
    }

    /// Returns the content as given.
    pub fn content(&self) -> &str {
        self.content
    }

    /// Returns the content as it will be drawn, with the case transform applied.
    pub fn display_content(&self) -> Cow<'a, str> {
        if self.definition.uppercase() {
            Cow::Owned(self.content.to_uppercase())
        } else {
            Cow::Borrowed(self.content)
        }
    }

    /// Total size of the label, padding included.
    pub fn calculate_size(&self) -> Size {
        let content = self.display_content();
        TEXT_MANAGER
            .get_or_init(TextManager::new)
            .calculate_text_size(&content, self.definition)
            .add_padding(self.definition.padding())
    }
}

impl Drawable for Text<'_> {
    /// Renders the label centered on `position`.
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let mut rendered = svg_element::Text::new("")
            .set("x", position.x())
            .set("y", position.y())
            .set("text-anchor", "middle")
            .set("dominant-baseline", "central")
            .set("font-family", self.definition.font_family())
            .set("font-size", self.definition.font_size())
            .set("font-weight", self.definition.weight().to_svg_value());

        if let Some(color) = self.definition.color() {
            rendered = rendered
                .set("fill", color.to_string())
                .set("fill-opacity", color.alpha());
        }

        let rendered = rendered.add(SvgText::new(self.display_content()));

        let mut output = LayeredOutput::new();
        output.add_to_layer(RenderLayer::Text, Box::new(rendered));
        output
    }

    fn size(&self) -> Size {
        self.calculate_size()
    }
}

/// Holds the shared cosmic-text font system.
struct TextManager {
    font_system: Arc<Mutex<FontSystem>>,
}

impl TextManager {
    fn new() -> Self {
        info!("Initializing FontSystem");
        Self {
            font_system: Arc::new(Mutex::new(FontSystem::new())),
        }
    }

    /// Measures `text` with real font metrics and shaping.
    fn calculate_text_size(&self, text: &str, text_def: &TextDefinition) -> Size {
        if text.is_empty() {
            return Size::default();
        }

        // Points to pixels at standard DPI
        let font_size_px = text_def.font_size() as f32 * 1.33;
        let line_height = font_size_px * 1.15;
        let metrics = Metrics::new(font_size_px, line_height);

        // A poisoned lock only means another measurement panicked; the font
        // system itself is still usable.
        let mut font_system = match self.font_system.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        let mut buffer = Buffer::new(&mut font_system, metrics);
        let mut buffer = buffer.borrow_with(&mut font_system);

        let attrs = Attrs::new().family(Family::Name(text_def.font_family()));
        buffer.set_size(None, None);
        buffer.set_text(text, &attrs, Shaping::Advanced, None);
        buffer.shape_until_scroll(true);

        let mut max_width: f32 = 0.0;
        let mut total_height: f32 = 0.0;
        for run in buffer.layout_runs() {
            if let Some(last) = run.glyphs.last() {
                max_width = max_width.max(last.x + last.w);
            }
            total_height += metrics.line_height;
        }

        if max_width == 0.0 {
            // No usable font: estimate from character count
            max_width = text.chars().count() as f32 * (font_size_px * 0.6);
            total_height = metrics.line_height;
        }

        Size::new(max_width, total_height)
    }
}

static TEXT_MANAGER: OnceLock<TextManager> = OnceLock::new();

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_text_definition_defaults() {
        let def = TextDefinition::new();
        assert_eq!(def.font_size(), 14);
        assert_eq!(def.font_family(), "monospace");
        assert_eq!(def.weight(), FontWeight::Normal);
        assert!(def.color().is_none());
        assert!(!def.uppercase());
    }

    #[test]
    fn test_display_content_uppercase() {
        let mut def = TextDefinition::new();
        let text = Text::new(&def, "Nyame");
        assert_eq!(text.display_content(), "Nyame");

        def.set_uppercase(true);
        let text = Text::new(&def, "Nyame");
        assert_eq!(text.display_content(), "NYAME");
        assert_eq!(text.content(), "Nyame");
    }

    #[test]
    fn test_empty_text_has_padding_only() {
        let mut def = TextDefinition::new();
        def.set_padding(Insets::uniform(4.0));
        let size = Text::new(&def, "").calculate_size();
        assert_approx_eq!(f32, size.width(), 8.0);
        assert_approx_eq!(f32, size.height(), 8.0);
    }

    #[test]
    fn test_longer_text_is_wider() {
        let def = TextDefinition::new();
        let short = Text::new(&def, "Aso").calculate_size();
        let long = Text::new(&def, "Okonore Yaa of the Sky").calculate_size();
        assert!(long.width() > short.width());
        assert!(short.height() > 0.0);
    }

    #[test]
    fn test_render_sets_font_attributes() {
        let mut def = TextDefinition::new();
        def.set_weight(FontWeight::Black);
        def.set_color(Some(Color::new("white").unwrap()));

        let nodes = Text::new(&def, "Anansi")
            .render_to_layers(Point::new(100.0, 20.0))
            .render();
        let svg = nodes[0].to_string();

        assert!(svg.contains("data-layer=\"text\""));
        assert!(svg.contains("font-weight=\"900\""));
        assert!(svg.contains("text-anchor=\"middle\""));
        assert!(svg.contains("Anansi"));
        assert!(svg.contains("fill="));
    }
}
