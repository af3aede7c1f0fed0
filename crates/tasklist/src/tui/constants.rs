//! Shared constants for the TUI to keep layout and timing in sync.

/// Interval in milliseconds between UI ticks/redraws.
pub const TUI_TICK_RATE_MS: u64 = 200;
/// Time-to-live in seconds for transient status messages.
pub const UI_MESSAGE_TTL_SECS: u64 = 5;
/// Highlight symbol shown beside the selected row.
pub const TASK_LIST_HIGHLIGHT_SYMBOL: &str = "▶ ";
/// Longest task text echoed in the status area before it is cut.
pub const STATUS_TASK_TEXT_MAX_GRAPHEMES: usize = 40;
/// Width percentage for the notice popup before clamping.
pub const NOTICE_POPUP_WIDTH_PERCENT: u16 = 50;
/// Minimum width for the notice popup.
pub const NOTICE_POPUP_MIN_WIDTH: u16 = 32;
/// Height of the notice popup, borders included.
pub const NOTICE_POPUP_HEIGHT: u16 = 5;
