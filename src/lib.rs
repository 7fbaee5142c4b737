//! servcon — an interactive command console for a headless server.
//!
//! One editable input line, ring-buffer history recall, and colour-directive
//! log output that may arrive from any thread without corrupting the line
//! being typed. Command interpretation, server lifecycle, and plugin trust
//! decisions are external collaborators: completed lines go out through a
//! dispatch callback, log messages come back in through the renderer.
//!
//! # Quick start
//!
//! ```no_run
//! use servcon::console::{stop_channel, HistoryBuffer, LineEditor, OutputRenderer, Session};
//!
//! let renderer = OutputRenderer::new(std::io::stdout(), 100, true, None);
//! let (_stop, stop_rx) = stop_channel();
//! let editor = LineEditor::new(HistoryBuffer::new(10));
//! let mut session = Session::new(editor, renderer.clone(), stop_rx);
//! session
//!     .run(|line| {
//!         let _ = renderer.info(&format!("dispatched: {line}"));
//!     })
//!     .unwrap();
//! ```

pub mod build_info;
pub mod config;
pub mod console;
pub mod error;
#[cfg(test)]
pub mod testsupport;
