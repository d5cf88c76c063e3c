//! Review page sources and dispatch.
//!
//! This module provides the fetch side of pagination:
//! - [`ReviewSource`]: fetches raw page bytes for an offset/limit window
//! - [`FileReviewSource`]: serves slices of a local fixture file
//! - [`PageDispatcher`]: runs a fetch and delivers a [`PageCompletion`] over a channel
//!
//! Completions always travel over `std::sync::mpsc`, so whichever thread did the fetching,
//! state is only touched by the thread that drains the channel.

use crate::model::TransportError;

pub mod dispatch;
pub mod file;

pub use dispatch::{InlineDispatcher, ThreadedDispatcher};
pub use file::FileReviewSource;

/// Offset/limit window of one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    /// Index of the first review.
    pub offset: usize,
    /// Maximum number of reviews.
    pub limit: usize,
}

impl PageRequest {
    /// Create a request.
    pub fn new(offset: usize, limit: usize) -> Self {
        Self { offset, limit }
    }
}

/// Result of one fetch, tagged with the request that produced it.
#[derive(Debug)]
pub struct PageCompletion {
    /// Request this completion answers.
    pub request: PageRequest,
    /// Raw payload or transport failure.
    pub result: Result<Vec<u8>, TransportError>,
}

/// Fetches raw page payloads.
pub trait ReviewSource {
    /// Fetch the page described by `request`.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when the page cannot be fetched.
    fn fetch_page(&self, request: &PageRequest) -> Result<Vec<u8>, TransportError>;
}

/// Runs page fetches and reports each one as a [`PageCompletion`].
///
/// Implementations must deliver exactly one completion per dispatched request.
pub trait PageDispatcher {
    /// Start fetching `request`.
    fn dispatch(&mut self, request: PageRequest);
}
