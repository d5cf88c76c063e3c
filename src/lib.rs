//! Review list (reviewlist)
//!
//! A paginated, variable-height list of user reviews with a terminal front end.
//!
//! The crate follows a Pure Core / Impure Shell split:
//!
//! - [`view_state`] computes row frames and heights with a memoised layout engine.
//! - [`state`] holds the offset-based pagination state machine.
//! - [`text`] measures and wraps styled text and pluralises review counts.
//! - [`source`] and [`images`] fetch pages and pictures off the control thread.
//! - [`view`] is the ratatui shell that draws rows and turns input into intents.

pub mod config;
pub mod images;
pub mod logging;
pub mod model;
pub mod parser;
pub mod source;
pub mod state;
pub mod text;
pub mod view;
pub mod view_state;
