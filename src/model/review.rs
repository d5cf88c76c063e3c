//! Decoded review records.

use super::identifiers::ResourceId;
use serde::{Deserialize, Serialize};

/// One review as delivered by the server. Immutable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    /// Author first name.
    pub first_name: String,
    /// Author last name.
    pub last_name: String,
    /// Avatar URL, if the author has one.
    #[serde(default)]
    pub avatar_url: Option<String>,
    /// Star rating, expected in 1..=5.
    pub rating: i64,
    /// Review body.
    pub text: String,
    /// Attached photos in display order.
    #[serde(default)]
    pub photo_urls: Vec<String>,
    /// Preformatted creation time.
    pub created: String,
}

impl Review {
    /// "First Last".
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Avatar identifier; blank URLs count as absent.
    pub fn avatar(&self) -> Option<ResourceId> {
        self.avatar_url
            .as_deref()
            .and_then(|url| ResourceId::new(url).ok())
    }

    /// Photo identifiers in order, skipping blank URLs.
    pub fn photos(&self) -> Vec<ResourceId> {
        self.photo_urls
            .iter()
            .filter_map(|url| ResourceId::new(url.as_str()).ok())
            .collect()
    }
}

/// One page of reviews plus the server-reported total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewPage {
    /// Reviews in this page.
    pub items: Vec<Review>,
    /// Total number of reviews on the server.
    pub count: usize,
}
