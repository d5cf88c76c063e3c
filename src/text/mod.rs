//! Styled text and the text measurement capability.
//!
//! Layout never rasterizes text itself. It asks a [`TextMeasurer`] for sizes and font metrics,
//! so the same row-height algorithm serves any renderer. [`CellMeasurer`] is the terminal
//! implementation.

mod measure;
pub mod plural;

pub use measure::{wrap_lines, CellMeasurer};

use crate::view_state::types::Size;

/// Font metrics that layout needs from a styled run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontMetrics {
    /// Height of one line of text.
    pub line_height: f64,
    /// Horizontal advance of one terminal column (one unit of `unicode-width`).
    pub advance: f64,
}

impl FontMetrics {
    /// One cell per column, one row per line.
    pub const CELL: Self = Self {
        line_height: 1.0,
        advance: 1.0,
    };

    /// Create font metrics.
    pub const fn new(line_height: f64, advance: f64) -> Self {
        Self {
            line_height,
            advance,
        }
    }
}

/// Semantic text colour; renderers map it to real colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextColor {
    /// Main text colour.
    Primary,
    /// Timestamps and other secondary labels.
    Secondary,
    /// Interactive controls ("show more").
    Accent,
    /// The review count summary.
    Muted,
}

/// Attributes applied to a whole text run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Font metrics.
    pub font: FontMetrics,
    /// Colour.
    pub color: TextColor,
    /// Bold weight.
    pub bold: bool,
}

impl TextStyle {
    /// Regular-weight style.
    pub const fn new(font: FontMetrics, color: TextColor) -> Self {
        Self {
            font,
            color,
            bold: false,
        }
    }

    /// Same style with bold weight.
    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

/// Text plus the style it is rendered with.
#[derive(Debug, Clone, PartialEq)]
pub struct StyledText {
    text: String,
    style: TextStyle,
}

impl StyledText {
    /// Create styled text.
    pub fn new(text: impl Into<String>, style: TextStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    /// Raw text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Style of the run.
    pub fn style(&self) -> TextStyle {
        self.style
    }

    /// True when the text has no characters at all.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// True when the text is empty after trimming whitespace and newlines.
    ///
    /// Blank text is treated as absent by layout.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Feed the layout-relevant content into a hasher.
    pub(crate) fn hash_into(&self, hasher: &mut xxhash_rust::xxh3::Xxh3) {
        hasher.update(&(self.text.len() as u64).to_le_bytes());
        hasher.update(self.text.as_bytes());
        hasher.update(&self.style.font.line_height.to_bits().to_le_bytes());
        hasher.update(&self.style.font.advance.to_bits().to_le_bytes());
        hasher.update(&[u8::from(self.style.bold)]);
    }
}

/// Text measurement capability consumed by layout.
pub trait TextMeasurer {
    /// Rendered size of `text` wrapped at `max_width`.
    ///
    /// `max_height` of `None` means no height ceiling. Empty text measures as zero.
    fn measure(&self, text: &StyledText, max_width: f64, max_height: Option<f64>) -> Size;

    /// Effective font metrics at character `position`, or `None` when the text is empty.
    fn font_metrics(&self, text: &StyledText, position: usize) -> Option<FontMetrics>;

    /// Line height at the start of `text`, or zero when the text is empty.
    fn line_height(&self, text: &StyledText) -> f64 {
        self.font_metrics(text, 0)
            .map_or(0.0, |metrics| metrics.line_height)
    }
}
