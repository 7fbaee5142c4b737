//! Centralized, hardcoded console settings.
//!
//! This is the single place to tweak limits, poll cadence, timestamp format,
//! and default colours.

use crossterm::style::Color;

// ---------------------------------------------------------------------------
// Input line / history
// ---------------------------------------------------------------------------

/// Maximum characters accepted on the input line before silent truncation.
pub const DEFAULT_CHAR_LIMIT: usize = 100;

/// Retained history entries before the oldest is evicted.
pub const DEFAULT_HISTORY_CAPACITY: usize = 10;

// ---------------------------------------------------------------------------
// Key loop
// ---------------------------------------------------------------------------

pub const KEY_POLL_MS: u64 = 80;

pub const CONFIRM_SUFFIX: &str = " [y/n] ";

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Marker introducing a two-character colour escape in message bodies.
pub const DIRECTIVE_MARKER: char = '&';

/// Local-time stamp prefixed to every emitted message.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Foreground colour restored after every message.
pub const COLOR_TEXT_DEFAULT: Color = Color::Grey;

// ---------------------------------------------------------------------------
// Files
// ---------------------------------------------------------------------------

pub const DEFAULT_LOG_FILE: &str = "server.log";

pub const DEFAULT_CONFIG_FILE: &str = "servcon.toml";
