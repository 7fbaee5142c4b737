//! Interactive console building blocks.
//!
//! `line` holds the bounded input buffer, `editor` the keystroke semantics
//! and history-browse rules, `history` the recall ring, `render` the shared
//! terminal/log-file output path, and `session` the raw-mode key loop. The
//! split keeps editing policy, terminal mechanics, and loop plumbing
//! independently testable.

pub mod colour;
pub mod editor;
pub mod history;
pub mod line;
pub mod render;
pub mod session;
pub mod settings;

pub use editor::{Key, LineEditor};
pub use history::HistoryBuffer;
pub use line::InputLine;
pub use render::{LogFile, LogLevel, OutputRenderer};
pub use session::{confirm, stop_channel, Session, StopHandle, StopReason};
