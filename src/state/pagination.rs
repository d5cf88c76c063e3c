//! Offset-based pagination state machine.
//!
//! The controller owns the [`ListState`] and is the only thing that mutates it. Every change
//! is published as a full snapshot on a channel; renderers never write back except through
//! [`ListIntent`]s.
//!
//! # Loading discipline
//!
//! `should_load` doubles as the in-flight guard: it is cleared when a page is requested and
//! only set again once that page's completion has been handled. Until then further requests
//! are no-ops, so at most one page is ever in flight.

use super::intent::ListIntent;
use super::list_state::{ListState, LoadingPhase};
use super::row_factory::RowFactory;
use crate::model::{PageError, ReviewPage, RowId};
use crate::parser::{JsonReviewDecoder, ReviewDecoder};
use crate::source::{PageCompletion, PageDispatcher, PageRequest};
use crate::view_state::row::RowEntry;
use std::sync::mpsc::Sender;
use tracing::{debug, info, trace, warn};

/// Drives pagination and row expansion for one review list.
#[derive(Debug)]
pub struct PaginationController<D, R = JsonReviewDecoder> {
    state: ListState,
    dispatcher: D,
    decoder: R,
    factory: RowFactory,
    snapshots: Sender<ListState>,
    in_flight: Option<PageRequest>,
}

impl<D: PageDispatcher> PaginationController<D, JsonReviewDecoder> {
    /// Controller decoding JSON pages of `limit` reviews.
    pub fn new(
        dispatcher: D,
        factory: RowFactory,
        limit: usize,
        snapshots: Sender<ListState>,
    ) -> Self {
        Self::with_decoder(dispatcher, JsonReviewDecoder, factory, limit, snapshots)
    }
}

impl<D: PageDispatcher, R: ReviewDecoder> PaginationController<D, R> {
    /// Controller with a custom payload decoder.
    pub fn with_decoder(
        dispatcher: D,
        decoder: R,
        factory: RowFactory,
        limit: usize,
        snapshots: Sender<ListState>,
    ) -> Self {
        Self {
            state: ListState::new(limit),
            dispatcher,
            decoder,
            factory,
            snapshots,
            in_flight: None,
        }
    }

    /// Current state.
    pub fn state(&self) -> &ListState {
        &self.state
    }

    /// Request currently awaiting its completion.
    pub fn in_flight(&self) -> Option<PageRequest> {
        self.in_flight
    }

    /// The dispatcher, for inspection.
    pub fn dispatcher(&self) -> &D {
        &self.dispatcher
    }

    /// Row factory in use.
    pub fn factory(&self) -> &RowFactory {
        &self.factory
    }

    /// Request the next page.
    ///
    /// Returns `false` without doing anything when loading is not allowed: either a page is
    /// already in flight or every page has been loaded.
    pub fn request_next_page(&mut self) -> bool {
        if !self.state.should_load {
            trace!(offset = self.state.offset, "Next page not requested");
            return false;
        }

        self.state.should_load = false;
        self.state.loading_phase = if self.state.offset == 0 {
            LoadingPhase::InitialLoad
        } else {
            LoadingPhase::Paginating
        };
        self.emit();

        let request = PageRequest::new(self.state.offset, self.state.limit);
        self.in_flight = Some(request);
        debug!(offset = request.offset, limit = request.limit, "Requesting page");
        self.dispatcher.dispatch(request);
        true
    }

    /// Apply a fetch completion.
    ///
    /// A completion for anything but the in-flight request is logged and dropped. Failures
    /// keep the items as they are and re-open loading so the next trigger retries.
    pub fn handle_page(&mut self, completion: PageCompletion) {
        if self.in_flight != Some(completion.request) {
            warn!(
                offset = completion.request.offset,
                limit = completion.request.limit,
                "Ignoring completion for a request that is not in flight"
            );
            return;
        }
        self.in_flight = None;
        self.state.loading_phase = LoadingPhase::Idle;

        let decoded = completion
            .result
            .map_err(PageError::from)
            .and_then(|bytes| self.decoder.decode(&bytes).map_err(PageError::from));

        match decoded {
            Ok(page) => self.apply_page(page),
            Err(err) => {
                warn!(
                    offset = completion.request.offset,
                    error = %err,
                    "Page load failed; will retry on next trigger"
                );
                self.state.should_load = true;
            }
        }

        self.emit();
    }

    /// Replace row `id` with its expanded form.
    ///
    /// Returns `false` and emits nothing when no review row has that id or it is already
    /// expanded.
    pub fn expand_row(&mut self, id: RowId) -> bool {
        let Some(slot) = self
            .state
            .items
            .iter_mut()
            .find(|entry| entry.as_review().is_some_and(|row| row.id() == id))
        else {
            debug!(row = %id, "Expand requested for unknown row");
            return false;
        };

        let RowEntry::Review(row) = slot else {
            return false;
        };
        if row.is_expanded() {
            return false;
        }
        *row = row.expanded();
        debug!(row = %id, "Row expanded");

        self.emit();
        true
    }

    /// Drop every row and load from offset zero.
    ///
    /// Refused while a page is in flight, since its completion would land in the rebuilt list.
    pub fn reload(&mut self) -> bool {
        if self.in_flight.is_some() {
            debug!("Reload refused while a page is in flight");
            return false;
        }

        info!(rows = self.state.items.len(), "Reloading review list");
        self.state.items.clear();
        self.state.offset = 0;
        self.state.should_load = true;
        self.state.loading_phase = LoadingPhase::Idle;
        self.request_next_page()
    }

    /// Route a renderer intent. Returns whether it changed anything.
    pub fn dispatch(&mut self, intent: ListIntent) -> bool {
        match intent {
            ListIntent::NextPage => self.request_next_page(),
            ListIntent::ExpandRow(id) => self.expand_row(id),
            ListIntent::Reload => self.reload(),
        }
    }

    fn apply_page(&mut self, page: ReviewPage) {
        let mut items: Vec<RowEntry> = std::mem::take(&mut self.state.items)
            .into_iter()
            .filter(|entry| !entry.is_summary())
            .collect();
        items.extend(
            page.items
                .iter()
                .map(|review| RowEntry::Review(self.factory.make_row(review))),
        );

        self.state.offset += self.state.limit;
        self.state.should_load = self.state.offset < page.count;
        info!(
            received = page.items.len(),
            offset = self.state.offset,
            total = page.count,
            "Page loaded"
        );

        if !self.state.should_load {
            items.push(RowEntry::Summary(self.factory.make_summary(page.count)));
            info!(total = page.count, "All reviews loaded");
        }
        self.state.items = items;
    }

    fn emit(&self) {
        if self.snapshots.send(self.state.clone()).is_err() {
            trace!("No snapshot receiver");
        }
    }
}

#[cfg(test)]
#[path = "pagination_tests.rs"]
mod tests;
