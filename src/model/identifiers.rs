//! Core identifier newtypes with smart constructors.
//!
//! Raw constructors are never exported - use smart constructors only.

use std::fmt;

/// Identity of one row in the review list.
///
/// Allocated monotonically by [`RowFactory`](crate::state::RowFactory) and never reused, so a
/// stale id (from a row discarded by a reload) can never alias a live row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(u64);

impl RowId {
    pub(crate) fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw value.
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row-{}", self.0)
    }
}

/// Identifier of a remote image (avatar or photo), usually a URL or relative path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceId(String);

impl ResourceId {
    /// Smart constructor: rejects empty or whitespace-only identifiers.
    pub fn new(raw: impl Into<String>) -> Result<Self, InvalidResourceId> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(InvalidResourceId::Empty);
        }
        Ok(Self(raw))
    }

    /// Borrow the identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Error returned by [`ResourceId::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidResourceId {
    /// Identifier was empty.
    #[error("Resource identifier cannot be empty")]
    Empty,
}

// ===== Tests =====
