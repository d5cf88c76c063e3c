//! View-state layer - row geometry, layout caching and scrolling
//!
//! # Module Structure
//!
//! - `types`: Geometry in layout units (Size, Rect, Insets)
//! - `metrics`: RowMetrics - spacing and size constants with point and cell presets
//! - `rating`: RatingRenderer - star glyphs from integer ratings
//! - `row`: ReviewRow, SummaryRow, RowEntry - immutable row descriptors
//! - `layout`: RowLayoutEngine - frames and heights with memoisation
//! - `cache`: LayoutCache - bounded LRU memo table
//! - `scroll`: load-more trigger and offset projection

pub mod cache;
pub mod layout;
pub mod metrics;
pub mod rating;
pub mod row;
pub mod scroll;
pub mod types;

pub use layout::{LayoutResult, RowLayoutEngine, SummaryLayout};
pub use metrics::RowMetrics;
pub use rating::{RatingGlyph, RatingRenderer};
pub use row::{MaxLines, ReviewRow, RowContent, RowEntry, SummaryRow, SHOW_MORE_LABEL};
pub use types::{Insets, Rect, Size};
