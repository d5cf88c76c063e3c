//! Requests from the renderer to the list controller.

use crate::model::RowId;

/// Everything a renderer may ask of the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListIntent {
    /// Load the next page if allowed.
    NextPage,
    /// Remove the body line limit of a row.
    ExpandRow(RowId),
    /// Discard all rows and load from the start.
    Reload,
}
