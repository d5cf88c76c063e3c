//! Fixed spacing and size constants for review rows.

use super::types::{Insets, Size};
use crate::text::FontMetrics;

/// Every constant the row layout algorithm uses.
///
/// Gaps are applied only between regions that are actually present; a region with zero area
/// never consumes its gap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowMetrics {
    /// Insets from the row edges to its content.
    pub insets: Insets,
    /// Fixed avatar size.
    pub avatar: Size,
    /// Horizontal gap from the avatar to the content column.
    pub avatar_to_username: f64,
    /// Vertical gap from the username to the rating glyph.
    pub username_to_rating: f64,
    /// Vertical gap from the header to the photo strip.
    pub rating_to_photos: f64,
    /// Vertical gap before the body. Also used before the timestamp when nothing sits between
    /// the header and the timestamp.
    pub photos_to_text: f64,
    /// Vertical gap from the body to the show-more control, or to the timestamp when the body
    /// is not truncated.
    pub text_to_created: f64,
    /// Vertical gap from the show-more control to the timestamp.
    pub show_more_to_created: f64,
    /// Size of one photo thumbnail.
    pub photo: Size,
    /// Horizontal gap between thumbnails.
    pub photo_spacing: f64,
    /// Size of one rating star.
    pub star: Size,
    /// Horizontal gap between stars.
    pub star_spacing: f64,
    /// Font metrics for body and label text.
    pub font: FontMetrics,
}

impl RowMetrics {
    /// Point values for graphical renderers.
    pub const fn points() -> Self {
        Self {
            insets: Insets::new(9.0, 12.0, 9.0, 12.0),
            avatar: Size::new(36.0, 36.0),
            avatar_to_username: 10.0,
            username_to_rating: 6.0,
            rating_to_photos: 10.0,
            photos_to_text: 10.0,
            text_to_created: 6.0,
            show_more_to_created: 6.0,
            photo: Size::new(55.0, 66.0),
            photo_spacing: 8.0,
            star: Size::new(16.0, 16.0),
            star_spacing: 1.0,
            font: FontMetrics::new(17.0, 8.0),
        }
    }

    /// Terminal-cell values: one unit is one column horizontally and one row vertically.
    pub const fn cells() -> Self {
        Self {
            insets: Insets::new(0.0, 1.0, 1.0, 1.0),
            avatar: Size::new(4.0, 2.0),
            avatar_to_username: 2.0,
            username_to_rating: 0.0,
            rating_to_photos: 1.0,
            photos_to_text: 1.0,
            text_to_created: 0.0,
            show_more_to_created: 0.0,
            photo: Size::new(6.0, 3.0),
            photo_spacing: 1.0,
            star: Size::new(1.0, 1.0),
            star_spacing: 0.0,
            font: FontMetrics::CELL,
        }
    }
}

impl Default for RowMetrics {
    fn default() -> Self {
        Self::cells()
    }
}
