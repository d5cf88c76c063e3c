//! Row content descriptors.
//!
//! A [`ReviewRow`] is an immutable snapshot of everything needed to lay out and draw one
//! review. Changing what a row shows means building a new descriptor; the only such change is
//! [`ReviewRow::expanded`], which keeps the row's identity.

use super::rating::RatingGlyph;
use crate::model::{ResourceId, RowId};
use crate::text::plural::reviews_count_text;
use crate::text::{StyledText, TextStyle};
use xxhash_rust::xxh3::Xxh3;

/// Label of the control that expands a truncated body.
pub const SHOW_MORE_LABEL: &str = "Показать полностью...";

/// Body line limit. Zero means unlimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaxLines(u32);

impl MaxLines {
    /// Limit for collapsed rows.
    pub const COLLAPSED: Self = Self(3);
    /// No limit; the row is expanded.
    pub const UNLIMITED: Self = Self(0);

    /// Wrap a raw limit; `0` means unlimited.
    pub const fn new(lines: u32) -> Self {
        Self(lines)
    }

    /// Raw limit.
    pub const fn get(self) -> u32 {
        self.0
    }

    /// True when there is no limit.
    pub const fn is_unlimited(self) -> bool {
        self.0 == 0
    }
}

impl Default for MaxLines {
    fn default() -> Self {
        Self::COLLAPSED
    }
}

/// Renderable content of a review row, before identity is attached.
#[derive(Debug, Clone, PartialEq)]
pub struct RowContent {
    /// Author name.
    pub username: StyledText,
    /// Rating glyph.
    pub rating: RatingGlyph,
    /// Review body.
    pub body: StyledText,
    /// Body line limit.
    pub max_lines: MaxLines,
    /// Creation timestamp.
    pub created: StyledText,
    /// Avatar image, if any.
    pub avatar: Option<ResourceId>,
    /// Photo thumbnails in order.
    pub photos: Vec<ResourceId>,
}

/// Immutable descriptor of one review row.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewRow {
    id: RowId,
    content: RowContent,
    fingerprint: u64,
}

impl ReviewRow {
    /// Attach `id` to `content`.
    pub fn new(id: RowId, content: RowContent) -> Self {
        let fingerprint = fingerprint(&content);
        Self {
            id,
            content,
            fingerprint,
        }
    }

    /// Stable row identity.
    pub fn id(&self) -> RowId {
        self.id
    }

    /// Hash of every layout-relevant field.
    pub fn fingerprint(&self) -> u64 {
        self.fingerprint
    }

    /// Full content.
    pub fn content(&self) -> &RowContent {
        &self.content
    }

    /// Author name.
    pub fn username(&self) -> &StyledText {
        &self.content.username
    }

    /// Rating glyph.
    pub fn rating(&self) -> &RatingGlyph {
        &self.content.rating
    }

    /// Body text.
    pub fn body(&self) -> &StyledText {
        &self.content.body
    }

    /// Body line limit.
    pub fn max_lines(&self) -> MaxLines {
        self.content.max_lines
    }

    /// Timestamp text.
    pub fn created(&self) -> &StyledText {
        &self.content.created
    }

    /// Avatar image identifier.
    pub fn avatar(&self) -> Option<&ResourceId> {
        self.content.avatar.as_ref()
    }

    /// Photo identifiers.
    pub fn photos(&self) -> &[ResourceId] {
        &self.content.photos
    }

    /// True when the body has no line limit.
    pub fn is_expanded(&self) -> bool {
        self.content.max_lines.is_unlimited()
    }

    /// Same row with the body line limit removed.
    pub fn expanded(&self) -> Self {
        let mut content = self.content.clone();
        content.max_lines = MaxLines::UNLIMITED;
        Self::new(self.id, content)
    }
}

fn fingerprint(content: &RowContent) -> u64 {
    let mut hasher = Xxh3::new();
    content.username.hash_into(&mut hasher);
    hasher.update(&[content.rating.filled()]);
    hasher.update(&content.rating.size().width.to_bits().to_le_bytes());
    hasher.update(&content.rating.size().height.to_bits().to_le_bytes());
    content.body.hash_into(&mut hasher);
    hasher.update(&content.max_lines.get().to_le_bytes());
    content.created.hash_into(&mut hasher);
    hasher.update(&[u8::from(content.avatar.is_some())]);
    hasher.update(&(content.photos.len() as u64).to_le_bytes());
    for photo in &content.photos {
        hasher.update(photo.as_str().as_bytes());
        hasher.update(&[0]);
    }
    hasher.digest()
}

/// Trailing row showing the total number of reviews.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    count: usize,
    text: StyledText,
}

impl SummaryRow {
    /// Summary for `count` reviews with a pluralised label.
    pub fn new(count: usize, style: TextStyle) -> Self {
        Self {
            count,
            text: StyledText::new(reviews_count_text(count), style),
        }
    }

    /// Reported total.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Label text.
    pub fn text(&self) -> &StyledText {
        &self.text
    }
}

/// One item of the list.
#[derive(Debug, Clone, PartialEq)]
pub enum RowEntry {
    /// A review.
    Review(ReviewRow),
    /// The review count summary; only ever the last item.
    Summary(SummaryRow),
}

impl RowEntry {
    /// The review row, if this is one.
    pub fn as_review(&self) -> Option<&ReviewRow> {
        match self {
            Self::Review(row) => Some(row),
            Self::Summary(_) => None,
        }
    }

    /// True for the summary row.
    pub fn is_summary(&self) -> bool {
        matches!(self, Self::Summary(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::{FontMetrics, TextColor};
    use crate::view_state::metrics::RowMetrics;
    use crate::view_state::rating::RatingRenderer;

    fn style() -> TextStyle {
        TextStyle::new(FontMetrics::CELL, TextColor::Primary)
    }

    fn content(body: &str) -> RowContent {
        RowContent {
            username: StyledText::new("Анна Смирнова", style()),
            rating: RatingRenderer::from_metrics(&RowMetrics::cells()).render(4),
            body: StyledText::new(body, style()),
            max_lines: MaxLines::default(),
            created: StyledText::new("1 июня", style()),
            avatar: None,
            photos: Vec::new(),
        }
    }

    #[test]
    fn default_max_lines_is_three() {
        assert_eq!(MaxLines::default().get(), 3);
        assert!(!MaxLines::default().is_unlimited());
        assert!(MaxLines::new(0).is_unlimited());
    }

    #[test]
    fn expanded_keeps_id_and_removes_limit() {
        let row = ReviewRow::new(RowId::from_raw(7), content("text"));
        let expanded = row.expanded();
        assert_eq!(expanded.id(), row.id());
        assert!(expanded.is_expanded());
        assert_eq!(expanded.body(), row.body());
    }

    #[test]
    fn fingerprint_tracks_max_lines() {
        let row = ReviewRow::new(RowId::from_raw(1), content("text"));
        assert_ne!(row.fingerprint(), row.expanded().fingerprint());
    }

    #[test]
    fn fingerprint_is_content_only() {
        let a = ReviewRow::new(RowId::from_raw(1), content("same"));
        let b = ReviewRow::new(RowId::from_raw(2), content("same"));
        let c = ReviewRow::new(RowId::from_raw(1), content("other"));
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_ne!(a.fingerprint(), c.fingerprint());
    }

    #[test]
    fn summary_pluralises_count() {
        let summary = SummaryRow::new(21, style());
        assert_eq!(summary.text().as_str(), "21 отзыв");
        assert_eq!(summary.count(), 21);
    }

    #[test]
    fn entry_accessors() {
        let review = RowEntry::Review(ReviewRow::new(RowId::from_raw(1), content("x")));
        let summary = RowEntry::Summary(SummaryRow::new(1, style()));
        assert!(review.as_review().is_some());
        assert!(!review.is_summary());
        assert!(summary.as_review().is_none());
        assert!(summary.is_summary());
    }
}
