//! Star rating glyphs.

use super::metrics::RowMetrics;
use super::types::Size;

/// Number of stars in a rating glyph.
pub const MAX_STARS: u8 = 5;

/// Rendered rating: how many of the five stars are filled, plus intrinsic size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingGlyph {
    filled: u8,
    size: Size,
}

impl RatingGlyph {
    /// Filled stars, 0..=5.
    pub fn filled(&self) -> u8 {
        self.filled
    }

    /// Intrinsic size; not measured against the available width.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Text form, e.g. `★★★☆☆`.
    pub fn stars(&self) -> String {
        (0..MAX_STARS)
            .map(|i| if i < self.filled { '★' } else { '☆' })
            .collect()
    }
}

/// Turns integer ratings into glyphs for a given star geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingRenderer {
    star: Size,
    spacing: f64,
}

impl RatingRenderer {
    /// Renderer with explicit star geometry.
    pub fn new(star: Size, spacing: f64) -> Self {
        Self { star, spacing }
    }

    /// Renderer using the star geometry from `metrics`.
    pub fn from_metrics(metrics: &RowMetrics) -> Self {
        Self::new(metrics.star, metrics.star_spacing)
    }

    /// Glyph for `rating`, clamped to 0..=5 filled stars.
    pub fn render(&self, rating: i64) -> RatingGlyph {
        let filled = rating.clamp(0, i64::from(MAX_STARS)) as u8;
        let count = f64::from(MAX_STARS);
        RatingGlyph {
            filled,
            size: Size::new(
                count * self.star.width + (count - 1.0) * self.spacing,
                self.star.height,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_out_of_range_ratings() {
        let renderer = RatingRenderer::from_metrics(&RowMetrics::cells());
        assert_eq!(renderer.render(-3).filled(), 0);
        assert_eq!(renderer.render(9).filled(), 5);
        assert_eq!(renderer.render(4).filled(), 4);
    }

    #[test]
    fn size_is_independent_of_rating() {
        let renderer = RatingRenderer::from_metrics(&RowMetrics::points());
        assert_eq!(renderer.render(1).size(), renderer.render(5).size());
        assert_eq!(renderer.render(1).size(), Size::new(84.0, 16.0));
    }

    #[test]
    fn stars_text_marks_filled_prefix() {
        let renderer = RatingRenderer::from_metrics(&RowMetrics::cells());
        assert_eq!(renderer.render(3).stars(), "★★★☆☆");
        assert_eq!(renderer.render(3).size(), Size::new(5.0, 1.0));
    }
}
