//! Fixture-backed review source.
//!
//! Loads a JSON file holding every review once and serves `offset..offset + limit` slices of
//! it, optionally after a simulated network delay.

use super::{PageRequest, ReviewSource};
use crate::model::error::SourceError;
use crate::model::{ReviewPage, TransportError};
use crate::parser::{encode_page, JsonReviewDecoder, ReviewDecoder};
use std::path::Path;
use std::thread;
use std::time::Duration;
use tracing::info;

/// Serves pages from an in-memory copy of a fixture.
#[derive(Debug, Clone)]
pub struct FileReviewSource {
    page: ReviewPage,
    latency: Duration,
}

impl FileReviewSource {
    /// Load the fixture at `path`.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::FileNotFound` if the file does not exist,
    /// `SourceError::Decode` if it is not a review page and `SourceError::Io` for other
    /// read failures.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(SourceError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let bytes = std::fs::read(path)?;
        let page = JsonReviewDecoder
            .decode(&bytes)
            .map_err(|source| SourceError::Decode {
                path: path.to_path_buf(),
                source,
            })?;

        info!(
            path = %path.display(),
            reviews = page.items.len(),
            count = page.count,
            "Loaded review fixture"
        );
        Ok(Self::from_page(page))
    }

    /// Serve slices of an already decoded page.
    pub fn from_page(page: ReviewPage) -> Self {
        Self {
            page,
            latency: Duration::ZERO,
        }
    }

    /// Delay every fetch by `latency`.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Total the source reports to clients.
    pub fn reported_count(&self) -> usize {
        self.page.count
    }
}

impl ReviewSource for FileReviewSource {
    fn fetch_page(&self, request: &PageRequest) -> Result<Vec<u8>, TransportError> {
        if !self.latency.is_zero() {
            thread::sleep(self.latency);
        }

        let items = &self.page.items;
        if request.offset > items.len() {
            return Err(TransportError::PageUnavailable {
                offset: request.offset,
            });
        }
        let end = request.offset.saturating_add(request.limit).min(items.len());

        Ok(encode_page(&ReviewPage {
            items: items[request.offset..end].to_vec(),
            count: self.page.count,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Review;

    fn review(i: usize) -> Review {
        Review {
            first_name: format!("Имя{i}"),
            last_name: "Фамилия".to_string(),
            avatar_url: None,
            rating: 5,
            text: format!("Отзыв {i}"),
            photo_urls: Vec::new(),
            created: "1 июня".to_string(),
        }
    }

    fn source(n: usize) -> FileReviewSource {
        FileReviewSource::from_page(ReviewPage {
            items: (0..n).map(review).collect(),
            count: n,
        })
    }

    fn fetch(source: &FileReviewSource, offset: usize, limit: usize) -> ReviewPage {
        let bytes = source.fetch_page(&PageRequest::new(offset, limit)).unwrap();
        JsonReviewDecoder.decode(&bytes).unwrap()
    }

    #[test]
    fn serves_requested_window() {
        let page = fetch(&source(50), 20, 20);
        assert_eq!(page.items.len(), 20);
        assert_eq!(page.items[0].first_name, "Имя20");
        assert_eq!(page.count, 50);
    }

    #[test]
    fn last_page_is_short() {
        let page = fetch(&source(45), 40, 20);
        assert_eq!(page.items.len(), 5);
    }

    #[test]
    fn offset_at_end_yields_empty_page() {
        assert!(fetch(&source(10), 10, 20).items.is_empty());
    }

    #[test]
    fn offset_past_end_is_unavailable() {
        let err = source(10)
            .fetch_page(&PageRequest::new(30, 20))
            .unwrap_err();
        assert!(matches!(err, TransportError::PageUnavailable { offset: 30 }));
    }

    #[test]
    fn open_missing_file_reports_path() {
        let err = FileReviewSource::open("/nonexistent/reviews.json").unwrap_err();
        assert!(matches!(err, SourceError::FileNotFound { .. }));
    }

    #[test]
    fn open_invalid_file_is_decode_error() {
        let path = std::env::temp_dir().join("reviewlist_invalid_fixture.json");
        std::fs::write(&path, b"{ not json").unwrap();

        let result = FileReviewSource::open(&path);
        let _ = std::fs::remove_file(&path);

        assert!(matches!(result, Err(SourceError::Decode { .. })));
    }

    #[test]
    fn open_valid_file_keeps_reported_count() {
        let path = std::env::temp_dir().join("reviewlist_valid_fixture.json");
        let page = ReviewPage {
            items: (0..3).map(review).collect(),
            count: 3,
        };
        std::fs::write(&path, encode_page(&page)).unwrap();

        let result = FileReviewSource::open(&path);
        let _ = std::fs::remove_file(&path);

        assert_eq!(result.unwrap().reported_count(), 3);
    }
}
