//! Row layout and height computation.
//!
//! [`RowLayoutEngine`] turns a row descriptor and an available width into named frames and a
//! total height. Results are memoised per `(row, content, width)`, so asking for the height
//! of an unchanged row is a cache lookup.

use super::cache::{LayoutCache, LayoutKey};
use super::metrics::RowMetrics;
use super::row::{ReviewRow, RowEntry, SummaryRow};
use super::types::{Rect, Size};
use crate::text::{StyledText, TextMeasurer};
use tracing::trace;

/// Frames of one review row plus its height.
///
/// Frames that do not apply are [`Rect::ZERO`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LayoutResult {
    /// Avatar image.
    pub avatar: Rect,
    /// Author name.
    pub username: Rect,
    /// Rating glyph.
    pub rating: Rect,
    /// Photo strip.
    pub photos: Rect,
    /// Body text.
    pub body: Rect,
    /// Show-more control.
    pub show_more: Rect,
    /// Timestamp.
    pub created: Rect,
    /// Total row height.
    pub height: f64,
    /// True when the body is truncated and the show-more control is placed.
    pub needs_show_more: bool,
}

/// Frame of the summary label plus row height.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SummaryLayout {
    /// Count label.
    pub label: Rect,
    /// Total row height.
    pub height: f64,
}

/// Computes row layouts with a bounded memo table.
#[derive(Debug)]
pub struct RowLayoutEngine<M> {
    measurer: M,
    metrics: RowMetrics,
    show_more: StyledText,
    /// Intrinsic size of the show-more label, independent of the row width.
    show_more_size: Size,
    cache: LayoutCache,
}

impl<M: TextMeasurer> RowLayoutEngine<M> {
    /// Engine with the given measurer, constants, show-more label and cache capacity.
    ///
    /// A `cache_capacity` of zero selects the default capacity.
    pub fn new(
        measurer: M,
        metrics: RowMetrics,
        show_more: StyledText,
        cache_capacity: usize,
    ) -> Self {
        let show_more_size = measurer.measure(&show_more, f64::INFINITY, None);
        Self {
            measurer,
            metrics,
            show_more,
            show_more_size,
            cache: LayoutCache::new(cache_capacity),
        }
    }

    /// Layout constants in use.
    pub fn metrics(&self) -> &RowMetrics {
        &self.metrics
    }

    /// Text measurer in use.
    pub fn measurer(&self) -> &M {
        &self.measurer
    }

    /// Show-more label.
    pub fn show_more_label(&self) -> &StyledText {
        &self.show_more
    }

    /// Unwrapped size of the show-more label. The control is always placed at this size.
    pub fn show_more_size(&self) -> Size {
        self.show_more_size
    }

    /// Layout of `row` at `max_width`.
    ///
    /// Returns the memoised result when neither the content nor the width changed since the
    /// last computation.
    pub fn compute_layout(&mut self, row: &ReviewRow, max_width: f64) -> LayoutResult {
        let key = LayoutKey::new(row.id(), row.fingerprint(), max_width);
        if let Some(cached) = self.cache.get(&key) {
            trace!(row = %row.id(), "layout cache hit");
            return cached;
        }
        let layout = self.layout_review(row, max_width);
        self.cache.put(key, layout);
        layout
    }

    /// Layout of the summary row. Not cached.
    pub fn summary_layout(&self, summary: &SummaryRow, max_width: f64) -> SummaryLayout {
        let insets = self.metrics.insets;
        let width = (max_width - insets.left - insets.right).max(0.0);
        let size = self.measurer.measure(summary.text(), width, None);
        SummaryLayout {
            label: Rect::new(insets.left, insets.top, size),
            height: insets.top + size.height + insets.bottom,
        }
    }

    /// Height of any list item.
    pub fn row_height(&mut self, entry: &RowEntry, max_width: f64) -> f64 {
        match entry {
            RowEntry::Review(row) => self.compute_layout(row, max_width).height,
            RowEntry::Summary(summary) => self.summary_layout(summary, max_width).height,
        }
    }

    /// Drop every memoised layout.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Number of memoised layouts.
    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }

    fn layout_review(&self, row: &ReviewRow, max_width: f64) -> LayoutResult {
        let m = &self.metrics;
        let mut layout = LayoutResult {
            avatar: Rect::new(m.insets.left, m.insets.top, m.avatar),
            ..LayoutResult::default()
        };

        let content_x = layout.avatar.max_x() + m.avatar_to_username;
        let content_width = (max_width - content_x - m.insets.right).max(0.0);

        layout.username = Rect::new(
            content_x,
            m.insets.top,
            self.measurer.measure(row.username(), content_width, None),
        );
        layout.rating = Rect::new(
            content_x,
            layout.username.max_y() + m.username_to_rating,
            row.rating().size(),
        );

        let mut cursor_y = layout.avatar.max_y().max(layout.rating.max_y());

        let photo_count = row.photos().len();
        if photo_count > 0 {
            cursor_y += m.rating_to_photos;
            let n = photo_count as f64;
            let strip = Size::new(
                n * m.photo.width + (n - 1.0) * m.photo_spacing,
                m.photo.height,
            );
            layout.photos = Rect::new(content_x, cursor_y, strip);
            cursor_y = layout.photos.max_y();
        }

        let has_body = !row.body().is_blank();
        if has_body {
            cursor_y += m.photos_to_text;

            let full = self.measurer.measure(row.body(), content_width, None);
            let max_lines = row.max_lines();
            let body = if max_lines.is_unlimited() {
                full
            } else {
                let clamped = self.measurer.line_height(row.body()) * f64::from(max_lines.get());
                layout.needs_show_more = full.height > clamped;
                let visible = self
                    .measurer
                    .measure(row.body(), content_width, Some(clamped));
                Size::new(visible.width, full.height.min(clamped))
            };
            layout.body = Rect::new(content_x, cursor_y, body);
            cursor_y = layout.body.max_y();

            if layout.needs_show_more {
                cursor_y += m.text_to_created;
                layout.show_more = Rect::new(content_x, cursor_y, self.show_more_size);
                cursor_y = layout.show_more.max_y();
            }
        }

        if !row.created().is_blank() {
            cursor_y += if layout.needs_show_more {
                m.show_more_to_created
            } else if has_body {
                m.text_to_created
            } else {
                m.photos_to_text
            };
            layout.created = Rect::new(
                content_x,
                cursor_y,
                self.measurer.measure(row.created(), content_width, None),
            );
            cursor_y = layout.created.max_y();
        }

        layout.height = cursor_y + m.insets.bottom;
        layout
    }
}

#[cfg(test)]
#[path = "layout_tests.rs"]
mod tests;
