//! The keystroke loop: poll-then-read key dispatch, raw-mode lifetime, and
//! the stop channel that ends the session.
//!
//! One logical thread drives the loop. It polls for key availability with a
//! short timeout instead of blocking, so log output emitted from other
//! threads is never starved while the operator is idle.

use crate::console::editor::{Key, LineEditor};
use crate::console::history::HistoryBuffer;
use crate::console::render::OutputRenderer;
use crate::console::settings::KEY_POLL_MS;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use std::io::{self, Write};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::time::Duration;

/// Why the session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Orderly shutdown requested by the dispatcher.
    Stopped,
    /// The external collaborator reported an unrecoverable fault.
    FatalError,
}

/// Cloneable handle the dispatcher uses to end the session.
#[derive(Debug, Clone)]
pub struct StopHandle {
    tx: Sender<StopReason>,
}

impl StopHandle {
    /// Request loop termination. Losing the race with another stop is fine.
    pub fn stop(&self, reason: StopReason) {
        let _ = self.tx.send(reason);
    }
}

/// Build the stop channel: a handle for collaborators and the receiver the
/// session polls.
pub fn stop_channel() -> (StopHandle, Receiver<StopReason>) {
    let (tx, rx) = mpsc::channel();
    (StopHandle { tx }, rx)
}

/// An interactive console session over one terminal.
pub struct Session<W: Write> {
    editor: LineEditor,
    renderer: OutputRenderer<W>,
    stop: Receiver<StopReason>,
}

impl<W: Write> Session<W> {
    pub fn new(
        editor: LineEditor,
        renderer: OutputRenderer<W>,
        stop: Receiver<StopReason>,
    ) -> Self {
        Self {
            editor,
            renderer,
            stop,
        }
    }

    /// History retained by the editor (for persistence at shutdown).
    pub fn history(&self) -> &HistoryBuffer {
        self.editor.history()
    }

    /// Run the keystroke loop until a stop arrives.
    ///
    /// `dispatch` is invoked once per submitted line; the line is recorded
    /// into history afterwards. Terminal I/O errors abort the loop — there is
    /// no recovery target for a broken terminal.
    pub fn run<F>(&mut self, mut dispatch: F) -> io::Result<StopReason>
    where
        F: FnMut(&str),
    {
        let _guard = RawModeGuard::acquire()?;

        loop {
            match self.stop.try_recv() {
                Ok(reason) => return Ok(reason),
                // All stop handles gone: nobody can ever stop us, so treat it
                // as an orderly shutdown rather than spinning forever.
                Err(TryRecvError::Disconnected) => return Ok(StopReason::Stopped),
                Err(TryRecvError::Empty) => {}
            }

            if !event::poll(Duration::from_millis(KEY_POLL_MS))? {
                continue;
            }
            let Event::Key(event) = event::read()? else {
                continue;
            };
            let Some(key) = translate_key(event) else {
                continue;
            };

            if let Some(line) = self.editor.handle_key(key, &self.renderer)? {
                dispatch(&line);
                self.editor.record(&line);
            }
        }
    }
}

/// Blocking yes/no prompt, e.g. for plugin trust questions.
///
/// Suspends normal key dispatch: keys go to the answer until y/n arrives.
/// Call from the dispatch callback (or another thread) while the session runs.
pub fn confirm<W: Write>(renderer: &OutputRenderer<W>, question: &str) -> io::Result<bool> {
    renderer.confirm_with(question, || loop {
        let Event::Key(event) = event::read()? else {
            continue;
        };
        if event.kind != KeyEventKind::Press && event.kind != KeyEventKind::Repeat {
            continue;
        }
        if let KeyCode::Char(ch) = event.code {
            return Ok(ch);
        }
    })
}

/// Map a crossterm key event onto a console key, dropping everything else.
fn translate_key(event: KeyEvent) -> Option<Key> {
    if event.kind != KeyEventKind::Press && event.kind != KeyEventKind::Repeat {
        return None;
    }
    match event.code {
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Backspace => Some(Key::Backspace),
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        KeyCode::Char(ch) => {
            // Control/alt chords belong to the terminal, not the input line.
            if event.modifiers.contains(KeyModifiers::CONTROL)
                || event.modifiers.contains(KeyModifiers::ALT)
            {
                None
            } else {
                Some(Key::Char(ch))
            }
        }
        _ => None,
    }
}

/// Raw mode lifetime guard so terminal state is restored on any return path.
struct RawModeGuard;

impl RawModeGuard {
    fn acquire() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}
