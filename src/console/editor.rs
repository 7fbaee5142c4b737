//! Keystroke handling: bounded line editing plus history recall.
//!
//! The editor owns policy (what each key means, where the history-browse
//! cursor may move); the renderer owns terminal mechanics. Every key is a
//! total function over the current state — no key sequence can fail outside
//! of terminal I/O errors.

use crate::console::history::HistoryBuffer;
use crate::console::render::OutputRenderer;
use std::io::{self, Write};

/// Keys the console reacts to. Anything else is ignored upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Backspace,
    Enter,
    Up,
    Down,
}

/// History-browse cursor value meaning "editing a fresh line".
const NOT_BROWSING: isize = -1;

/// Line editor with history navigation state.
///
/// The browse cursor is an offset from the newest history entry, ranging over
/// `-1 ..= len`: `-1` is a fresh line, `len` is the wrapped position just past
/// the oldest entry (also shown as a fresh line).
#[derive(Debug)]
pub struct LineEditor {
    history: HistoryBuffer,
    browse: isize,
}

impl LineEditor {
    pub fn new(history: HistoryBuffer) -> Self {
        Self {
            history,
            browse: NOT_BROWSING,
        }
    }

    pub fn history(&self) -> &HistoryBuffer {
        &self.history
    }

    /// Record a submitted line into history.
    ///
    /// Called by the loop after dispatch; submission itself never stores the
    /// line, so the dispatcher always sees it first.
    pub fn record(&mut self, line: &str) {
        self.history.push(line);
    }

    /// Apply one key. Returns the completed line on Enter, `None` otherwise.
    pub fn handle_key<W: Write>(
        &mut self,
        key: Key,
        renderer: &OutputRenderer<W>,
    ) -> io::Result<Option<String>> {
        match key {
            Key::Char(ch) => {
                renderer.append_char(ch)?;
                Ok(None)
            }
            Key::Backspace => {
                renderer.backspace()?;
                Ok(None)
            }
            Key::Enter => {
                let line = renderer.take_line()?;
                self.browse = NOT_BROWSING;
                Ok(Some(line))
            }
            Key::Up => {
                self.browse_older(renderer)?;
                Ok(None)
            }
            Key::Down => {
                self.browse_newer(renderer)?;
                Ok(None)
            }
        }
    }

    /// Move one entry toward the oldest; past the oldest wraps to a fresh line.
    fn browse_older<W: Write>(&mut self, renderer: &OutputRenderer<W>) -> io::Result<()> {
        let last = self.history.len() as isize - 1;
        self.browse += 1;
        if self.browse > last {
            self.browse = NOT_BROWSING;
        }
        self.redraw_browsed(renderer)
    }

    /// Move one entry toward the newest; below fresh wraps past the oldest.
    fn browse_newer<W: Write>(&mut self, renderer: &OutputRenderer<W>) -> io::Result<()> {
        let len = self.history.len() as isize;
        self.browse -= 1;
        if self.browse < NOT_BROWSING {
            self.browse = len;
        }
        self.redraw_browsed(renderer)
    }

    /// Full repaint: either the browsed entry or an empty fresh line.
    fn redraw_browsed<W: Write>(&self, renderer: &OutputRenderer<W>) -> io::Result<()> {
        let len = self.history.len() as isize;
        if self.browse == NOT_BROWSING || self.browse == len {
            renderer.replace_line("")
        } else {
            renderer.replace_line(self.history.get(self.browse as usize))
        }
    }
}
