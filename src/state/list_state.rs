//! Snapshot of the review list handed to renderers.

use crate::view_state::row::{ReviewRow, RowEntry, SummaryRow};

/// Default number of reviews per page.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// What the list is currently loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadingPhase {
    /// No page in flight.
    #[default]
    Idle,
    /// First page in flight (offset 0).
    InitialLoad,
    /// A later page in flight.
    Paginating,
}

/// Items plus pagination cursor.
///
/// Invariant: at most one [`RowEntry::Summary`] exists and it is always the last item.
#[derive(Debug, Clone, PartialEq)]
pub struct ListState {
    /// Review rows, optionally followed by the summary row.
    pub items: Vec<RowEntry>,
    /// Page size.
    pub limit: usize,
    /// Index of the next review to fetch. Never decreases except on reload.
    pub offset: usize,
    /// True when another page may be requested.
    pub should_load: bool,
    /// Current loading phase.
    pub loading_phase: LoadingPhase,
}

impl ListState {
    /// Empty list ready for its first page. A zero `limit` is raised to one.
    pub fn new(limit: usize) -> Self {
        Self {
            items: Vec::new(),
            limit: limit.max(1),
            offset: 0,
            should_load: true,
            loading_phase: LoadingPhase::Idle,
        }
    }

    /// Review rows in order.
    pub fn review_rows(&self) -> impl Iterator<Item = &ReviewRow> {
        self.items.iter().filter_map(RowEntry::as_review)
    }

    /// The trailing summary row, if the list is complete.
    pub fn summary(&self) -> Option<&SummaryRow> {
        match self.items.last() {
            Some(RowEntry::Summary(summary)) => Some(summary),
            _ => None,
        }
    }

    /// True while a page is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading_phase != LoadingPhase::Idle
    }

    /// True when every page has been loaded.
    pub fn is_complete(&self) -> bool {
        self.summary().is_some()
    }
}

impl Default for ListState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}
