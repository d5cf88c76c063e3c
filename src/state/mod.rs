//! List state machine.
//!
//! All transitions run on the control thread and are testable without a terminal.

pub mod intent;
pub mod list_state;
pub mod pagination;
pub mod row_factory;

pub use intent::ListIntent;
pub use list_state::{ListState, LoadingPhase, DEFAULT_PAGE_SIZE};
pub use pagination::PaginationController;
pub use row_factory::{RowFactory, TextStyles};
