//! Timing and dimension constants for TUI rendering.

use std::time::Duration;

/// How long the event loop waits for input before draining completion channels.
///
/// Page and image completions arriving while the terminal is idle show up within one tick.
pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Height of the status bar in lines.
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Lines scrolled per mouse wheel step.
pub const WHEEL_STEP: f64 = 3.0;

/// Width used when the terminal reports zero columns.
pub const FALLBACK_WIDTH: u16 = 80;

/// Shown in place of the list while the first page loads.
pub const INITIAL_LOAD_LABEL: &str = "Загрузка отзывов…";

/// Shown in the status bar while a later page loads.
pub const PAGINATING_LABEL: &str = "Загрузка…";

/// Key hints in the status bar.
pub const KEY_HINTS: &str = "j/k: move  PgUp/PgDn: scroll  Enter: expand  r: reload  q: quit";
