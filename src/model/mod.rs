//! Domain model: decoded reviews, identifiers and error types.
//!
//! Everything here is plain data with no dependency on layout or rendering.

pub mod error;
pub mod identifiers;
pub mod review;

pub use error::{
    AppError, DecodeError, ImageLoadError, PageError, SourceError, TransportError,
};
pub use identifiers::{InvalidResourceId, ResourceId, RowId};
pub use review::{Review, ReviewPage};
