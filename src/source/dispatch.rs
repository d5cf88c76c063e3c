//! Page dispatchers.

use super::{PageCompletion, PageDispatcher, PageRequest, ReviewSource};
use crate::model::TransportError;
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread;
use tracing::{debug, warn};

/// Fetches each page on its own background thread.
///
/// The controller keeps at most one page request in flight, so at most one fetch thread
/// is alive at a time.
#[derive(Debug)]
pub struct ThreadedDispatcher<S> {
    source: Arc<S>,
    completions: Sender<PageCompletion>,
}

impl<S> ThreadedDispatcher<S>
where
    S: ReviewSource + Send + Sync + 'static,
{
    /// Dispatcher fetching from `source` and reporting on `completions`.
    pub fn new(source: S, completions: Sender<PageCompletion>) -> Self {
        Self {
            source: Arc::new(source),
            completions,
        }
    }
}

impl<S> PageDispatcher for ThreadedDispatcher<S>
where
    S: ReviewSource + Send + Sync + 'static,
{
    fn dispatch(&mut self, request: PageRequest) {
        let source = Arc::clone(&self.source);
        let completions = self.completions.clone();

        debug!(offset = request.offset, limit = request.limit, "Dispatching page fetch");
        let spawned = thread::Builder::new()
            .name(format!("page-fetch-{}", request.offset))
            .spawn(move || {
                let result = source.fetch_page(&request);
                // Receiver gone means the app is shutting down.
                let _ = completions.send(PageCompletion { request, result });
            });

        if let Err(err) = spawned {
            warn!(error = %err, "Failed to spawn page fetch thread");
            let _ = self.completions.send(PageCompletion {
                request,
                result: Err(TransportError::Io(err)),
            });
        }
    }
}

/// Fetches on the calling thread; the completion is queued before `dispatch` returns.
#[derive(Debug)]
pub struct InlineDispatcher<S> {
    source: S,
    completions: Sender<PageCompletion>,
}

impl<S: ReviewSource> InlineDispatcher<S> {
    /// Dispatcher fetching from `source` and reporting on `completions`.
    pub fn new(source: S, completions: Sender<PageCompletion>) -> Self {
        Self {
            source,
            completions,
        }
    }
}

impl<S: ReviewSource> PageDispatcher for InlineDispatcher<S> {
    fn dispatch(&mut self, request: PageRequest) {
        debug!(offset = request.offset, limit = request.limit, "Fetching page inline");
        let result = self.source.fetch_page(&request);
        let _ = self.completions.send(PageCompletion { request, result });
    }
}
