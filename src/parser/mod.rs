//! Page payload decoding.
//!
//! Pages arrive as raw bytes from a [`ReviewSource`](crate::source::ReviewSource). Decoding is a
//! separate capability so the pagination controller can be tested with any payload format.

use crate::model::{DecodeError, ReviewPage};

/// Decode bytes into a typed review batch.
pub trait ReviewDecoder {
    /// Decode one page payload.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError`] when the payload is not a valid page.
    fn decode(&self, bytes: &[u8]) -> Result<ReviewPage, DecodeError>;
}

/// JSON decoder for `{ "items": [...], "count": N }` payloads with snake_case keys.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonReviewDecoder;

impl ReviewDecoder for JsonReviewDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<ReviewPage, DecodeError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

/// Encode a page the way [`JsonReviewDecoder`] expects it.
///
/// Used by sources that serve slices of a local fixture.
pub fn encode_page(page: &ReviewPage) -> Vec<u8> {
    // ReviewPage holds only strings and integers; serialization cannot fail.
    serde_json::to_vec(page).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Review;

    const PAGE: &str = r#"{
        "items": [
            {
                "first_name": "Анна",
                "last_name": "Смирнова",
                "avatar_url": "avatars/anna.png",
                "rating": 5,
                "text": "Всё понравилось",
                "photo_urls": ["photos/1.jpg", "photos/2.jpg"],
                "created": "1 июня"
            },
            {
                "first_name": "Олег",
                "last_name": "Иванов",
                "rating": 2,
                "text": "",
                "created": "2 июня"
            }
        ],
        "count": 42
    }"#;

    #[test]
    fn decodes_valid_page() {
        let page = JsonReviewDecoder.decode(PAGE.as_bytes()).unwrap();
        assert_eq!(page.count, 42);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].photo_urls.len(), 2);
        assert_eq!(page.items[1].avatar_url, None);
    }

    #[test]
    fn rejects_missing_count() {
        let err = JsonReviewDecoder.decode(br#"{"items": []}"#).unwrap_err();
        assert!(err.message.contains("count"), "got: {}", err.message);
    }

    #[test]
    fn rejects_truncated_payload() {
        let truncated = &PAGE.as_bytes()[..40];
        assert!(JsonReviewDecoder.decode(truncated).is_err());
    }

    #[test]
    fn encode_then_decode_preserves_page() {
        let page = ReviewPage {
            items: vec![Review {
                first_name: "A".into(),
                last_name: "B".into(),
                avatar_url: None,
                rating: 3,
                text: "t".into(),
                photo_urls: vec![],
                created: "c".into(),
            }],
            count: 1,
        };
        let bytes = encode_page(&page);
        assert_eq!(JsonReviewDecoder.decode(&bytes).unwrap(), page);
    }
}
