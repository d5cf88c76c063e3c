//! Mapping decoded reviews to row descriptors.

use crate::model::{Review, RowId};
use crate::text::{StyledText, TextColor, TextStyle};
use crate::view_state::metrics::RowMetrics;
use crate::view_state::rating::RatingRenderer;
use crate::view_state::row::{MaxLines, ReviewRow, RowContent, SummaryRow, SHOW_MORE_LABEL};

/// Text styles for every kind of row text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyles {
    /// Author name.
    pub username: TextStyle,
    /// Review body.
    pub body: TextStyle,
    /// Timestamp.
    pub created: TextStyle,
    /// Show-more control.
    pub show_more: TextStyle,
    /// Summary row.
    pub summary: TextStyle,
}

impl TextStyles {
    /// Styles sharing the font of `metrics`.
    pub fn for_metrics(metrics: &RowMetrics) -> Self {
        let font = metrics.font;
        Self {
            username: TextStyle::new(font, TextColor::Primary).bold(),
            body: TextStyle::new(font, TextColor::Primary),
            created: TextStyle::new(font, TextColor::Secondary),
            show_more: TextStyle::new(font, TextColor::Accent),
            summary: TextStyle::new(font, TextColor::Muted),
        }
    }

    /// Styled show-more label.
    pub fn show_more_label(&self) -> StyledText {
        StyledText::new(SHOW_MORE_LABEL, self.show_more)
    }
}

/// Builds row descriptors and hands out row ids.
///
/// Ids increase monotonically for the factory's whole lifetime, including across reloads.
#[derive(Debug, Clone)]
pub struct RowFactory {
    next_id: u64,
    styles: TextStyles,
    rating: RatingRenderer,
    max_lines: MaxLines,
}

impl RowFactory {
    /// Factory using `metrics` for fonts and star geometry and `max_lines` for new rows.
    pub fn new(metrics: &RowMetrics, max_lines: MaxLines) -> Self {
        Self {
            next_id: 0,
            styles: TextStyles::for_metrics(metrics),
            rating: RatingRenderer::from_metrics(metrics),
            max_lines,
        }
    }

    /// Styles in use.
    pub fn styles(&self) -> &TextStyles {
        &self.styles
    }

    /// Descriptor for `review` with a fresh id.
    pub fn make_row(&mut self, review: &Review) -> ReviewRow {
        let id = RowId::from_raw(self.next_id);
        self.next_id += 1;

        ReviewRow::new(
            id,
            RowContent {
                username: StyledText::new(review.full_name(), self.styles.username),
                rating: self.rating.render(review.rating),
                body: StyledText::new(review.text.as_str(), self.styles.body),
                max_lines: self.max_lines,
                created: StyledText::new(review.created.as_str(), self.styles.created),
                avatar: review.avatar(),
                photos: review.photos(),
            },
        )
    }

    /// Summary row for `count` reviews.
    pub fn make_summary(&self, count: usize) -> SummaryRow {
        SummaryRow::new(count, self.styles.summary)
    }
}
