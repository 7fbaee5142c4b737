//! Terminal output path: timestamped, colour-directive log rendering that
//! never corrupts the in-progress input line, mirrored to an append-only file.
//!
//! One mutex guards the whole read-input / blank / write / redraw sequence, so
//! a dispatcher thread may emit while the key loop edits. Every editing
//! primitive the key handler needs lives here too, because each one must hold
//! that same lock while it touches the terminal cursor.

use crate::console::colour::colour_for;
use crate::console::line::InputLine;
use crate::console::settings::{
    self, COLOR_TEXT_DEFAULT, DIRECTIVE_MARKER, TIMESTAMP_FORMAT,
};
use chrono::Local;
use crossterm::cursor::{MoveLeft, MoveToColumn};
use crossterm::style::{Print, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};
use crossterm::QueueableCommand;
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

// ---------------------------------------------------------------------------
// Levels and the log-file mirror
// ---------------------------------------------------------------------------

/// Severity tag attached to every emitted message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warning",
            Self::Error => "error",
            Self::Fatal => "fatal",
        };
        f.write_str(tag)
    }
}

/// Append-only plain-text mirror of everything emitted to the terminal.
///
/// Bodies are written literally, colour directives included.
#[derive(Debug)]
pub struct LogFile {
    file: File,
}

impl LogFile {
    /// Open (creating if needed) the log file with append semantics.
    pub fn open(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self { file })
    }

    fn append(&mut self, stamp: &str, level: LogLevel, body: &str) -> io::Result<()> {
        writeln!(self.file, "[{stamp}] {level}:  {body}")
    }
}

// ---------------------------------------------------------------------------
// Renderer
// ---------------------------------------------------------------------------

struct RenderState<W> {
    out: W,
    input: InputLine,
    log: Option<LogFile>,
    colours_enabled: bool,
}

/// Cloneable handle over the shared terminal/input state.
///
/// The key loop calls the editing primitives; the external dispatcher calls
/// [`OutputRenderer::out`] (or the level helpers) from any thread.
pub struct OutputRenderer<W> {
    state: Arc<Mutex<RenderState<W>>>,
}

impl<W> Clone for OutputRenderer<W> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl<W: Write> OutputRenderer<W> {
    /// Build a renderer over `out` with a fresh input line.
    ///
    /// `colours_enabled` is the global toggle; per-message directive parsing
    /// additionally requires the `colours` flag on each emit.
    pub fn new(out: W, char_limit: usize, colours_enabled: bool, log: Option<LogFile>) -> Self {
        Self {
            state: Arc::new(Mutex::new(RenderState {
                out,
                input: InputLine::new(char_limit),
                log,
                colours_enabled,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, RenderState<W>> {
        // A poisoned lock only means another thread panicked mid-write; the
        // state itself is still usable.
        self.state.lock().unwrap_or_else(|err| err.into_inner())
    }

    /// Snapshot of the current input line.
    pub fn current_line(&self) -> String {
        self.lock().input.text().to_string()
    }

    // -- editing primitives (called by the key handler) ---------------------

    /// Append a printable character and echo it if the line accepted it.
    pub fn append_char(&self, ch: char) -> io::Result<()> {
        let mut state = self.lock();
        if state.input.push_char(ch) {
            state.out.queue(Print(ch))?;
            state.out.flush()?;
        }
        Ok(())
    }

    /// Erase one terminal column and drop the last buffered character.
    ///
    /// The column erase happens whether or not a character was removed, so
    /// backspacing an empty line is visually inert but still issues the
    /// cursor adjustment.
    pub fn backspace(&self) -> io::Result<()> {
        let mut state = self.lock();
        state
            .out
            .queue(MoveLeft(1))?
            .queue(Print(' '))?
            .queue(MoveLeft(1))?;
        state.out.flush()?;
        state.input.pop_char();
        Ok(())
    }

    /// Capture and clear the input line, moving the terminal to a fresh row
    /// so the submitted text stays visible in scrollback.
    pub fn take_line(&self) -> io::Result<String> {
        let mut state = self.lock();
        let line = state.input.take();
        state.out.queue(Print("\r\n"))?;
        state.out.flush()?;
        Ok(line)
    }

    /// Replace the input line and repaint it (erase, then rewrite).
    pub fn replace_line(&self, text: &str) -> io::Result<()> {
        let mut state = self.lock();
        state
            .out
            .queue(MoveToColumn(0))?
            .queue(Clear(ClearType::CurrentLine))?;
        state.input.replace(text);
        let visible = state.input.text().to_string();
        state.out.queue(Print(visible))?;
        state.out.flush()?;
        Ok(())
    }

    // -- log output ----------------------------------------------------------

    /// Emit one log message: blank the in-progress input line if any, write
    /// `[timestamp] body` (interpreting colour directives when enabled),
    /// mirror the literal body to the log file, then redraw the input line.
    pub fn out(&self, body: &str, level: LogLevel, colours: bool) -> io::Result<()> {
        let mut state = self.lock();
        let stamp = Local::now().format(TIMESTAMP_FORMAT).to_string();

        if !state.input.is_empty() {
            state
                .out
                .queue(MoveToColumn(0))?
                .queue(Clear(ClearType::CurrentLine))?;
        }

        state.out.queue(Print(format!("[{stamp}] ")))?;
        if colours && state.colours_enabled {
            write_with_directives(&mut state.out, body)?;
        } else {
            state.out.queue(Print(body))?;
        }
        state.out.queue(Print("\r\n"))?;
        state.out.queue(SetForegroundColor(COLOR_TEXT_DEFAULT))?;

        // The file mirror is best-effort: a failed append is reported on the
        // terminal and never interrupts the console.
        let log_failure = match state.log.as_mut() {
            Some(log) => log.append(&stamp, level, body).err(),
            None => None,
        };
        if let Some(err) = log_failure {
            state
                .out
                .queue(Print(format!("[{stamp}] log file write failed: {err}\r\n")))?;
        }

        let visible = state.input.text().to_string();
        state.out.queue(Print(visible))?;
        state.out.flush()
    }

    pub fn debug(&self, body: &str) -> io::Result<()> {
        self.out(body, LogLevel::Debug, true)
    }

    pub fn info(&self, body: &str) -> io::Result<()> {
        self.out(body, LogLevel::Info, true)
    }

    pub fn warn(&self, body: &str) -> io::Result<()> {
        self.out(body, LogLevel::Warn, true)
    }

    pub fn error(&self, body: &str) -> io::Result<()> {
        self.out(body, LogLevel::Error, true)
    }

    // -- blocking prompt -----------------------------------------------------

    /// Synchronous yes/no prompt that suspends normal key dispatch.
    ///
    /// Holds the output lock for the whole exchange so dispatcher emits queue
    /// up behind the prompt instead of tearing it. `read_key` supplies raw
    /// answer characters; anything other than y/n is ignored.
    pub fn confirm_with<F>(&self, question: &str, mut read_key: F) -> io::Result<bool>
    where
        F: FnMut() -> io::Result<char>,
    {
        let mut state = self.lock();
        if !state.input.is_empty() {
            state
                .out
                .queue(MoveToColumn(0))?
                .queue(Clear(ClearType::CurrentLine))?;
        }
        state
            .out
            .queue(Print(question))?
            .queue(Print(settings::CONFIRM_SUFFIX))?;
        state.out.flush()?;

        let accepted = loop {
            match read_key()? {
                'y' | 'Y' => break true,
                'n' | 'N' => break false,
                _ => {}
            }
        };

        let answer = if accepted { 'y' } else { 'n' };
        state.out.queue(Print(answer))?.queue(Print("\r\n"))?;
        let visible = state.input.text().to_string();
        state.out.queue(Print(visible))?;
        state.out.flush()?;
        Ok(accepted)
    }
}

/// Write `body`, switching foreground colour on recognized `&` escapes.
///
/// The marker is consumed either way: a recognized code becomes a colour
/// switch, an unrecognized code prints its character literally, and a lone
/// trailing marker produces nothing at all.
fn write_with_directives<W: Write>(out: &mut W, body: &str) -> io::Result<()> {
    let mut pending_code = false;
    for ch in body.chars() {
        if pending_code {
            match colour_for(ch) {
                Some(colour) => {
                    out.queue(SetForegroundColor(colour))?;
                }
                None => {
                    out.queue(Print(ch))?;
                }
            }
            pending_code = false;
        } else if ch == DIRECTIVE_MARKER {
            pending_code = true;
        } else {
            out.queue(Print(ch))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testsupport::{SharedBuf, TestTempDir};

    const CLEAR_LINE: &str = "\u{1b}[2K";

    fn renderer(buf: &SharedBuf, limit: usize, colours: bool) -> OutputRenderer<SharedBuf> {
        OutputRenderer::new(buf.clone(), limit, colours, None)
    }

    #[test]
    fn directives_are_consumed_and_text_survives() {
        let buf = SharedBuf::default();
        let r = renderer(&buf, 100, true);
        r.out("&Chello", LogLevel::Info, true).unwrap();

        let rendered = buf.contents();
        assert!(rendered.contains("hello"));
        assert!(!rendered.contains('&'), "marker must never be printed");
        assert!(!rendered.contains("&C"));
    }

    #[test]
    fn colours_off_prints_directives_literally() {
        let buf = SharedBuf::default();
        let r = renderer(&buf, 100, true);
        r.out("&Chello", LogLevel::Info, false).unwrap();
        assert!(buf.contents().contains("&Chello"));
    }

    #[test]
    fn global_colour_toggle_overrides_per_message_flag() {
        let buf = SharedBuf::default();
        let r = renderer(&buf, 100, false);
        r.out("&Chello", LogLevel::Info, true).unwrap();
        assert!(buf.contents().contains("&Chello"));
    }

    #[test]
    fn unrecognized_code_prints_code_char() {
        let buf = SharedBuf::default();
        let r = renderer(&buf, 100, true);
        r.out("&Zoo", LogLevel::Info, true).unwrap();

        let rendered = buf.contents();
        assert!(rendered.contains("Zoo"));
        assert!(!rendered.contains('&'));
    }

    #[test]
    fn lone_trailing_marker_vanishes() {
        let buf = SharedBuf::default();
        let r = renderer(&buf, 100, true);
        r.out("end&", LogLevel::Info, true).unwrap();

        let rendered = buf.contents();
        assert!(rendered.contains("end"));
        assert!(!rendered.contains('&'));
    }

    #[test]
    fn emit_blanks_nonempty_input_and_redraws_it() {
        let buf = SharedBuf::default();
        let r = renderer(&buf, 100, true);
        for ch in "foo".chars() {
            r.append_char(ch).unwrap();
        }
        r.out("ping", LogLevel::Info, true).unwrap();

        let rendered = buf.contents();
        assert!(rendered.contains(CLEAR_LINE), "input line should be erased");
        assert!(rendered.contains("ping"));
        assert!(rendered.ends_with("foo"), "input must be redrawn last");
        assert_eq!(r.current_line(), "foo");
    }

    #[test]
    fn emit_with_empty_input_skips_the_blank() {
        let buf = SharedBuf::default();
        let r = renderer(&buf, 100, true);
        r.out("quiet", LogLevel::Info, true).unwrap();
        assert!(!buf.contents().contains(CLEAR_LINE));
    }

    #[test]
    fn append_char_echoes_until_the_limit() {
        let buf = SharedBuf::default();
        let r = renderer(&buf, 3, true);
        for ch in "abcde".chars() {
            r.append_char(ch).unwrap();
        }
        assert_eq!(r.current_line(), "abc");
        assert_eq!(buf.contents(), "abc", "dropped chars must not echo");
    }

    #[test]
    fn backspace_always_erases_a_column() {
        let buf = SharedBuf::default();
        let r = renderer(&buf, 10, true);
        r.backspace().unwrap();
        assert_eq!(r.current_line(), "");
        // Cursor-left, space, cursor-left even with nothing buffered.
        assert!(buf.contents().contains("\u{1b}[1D"));
    }

    #[test]
    fn take_line_captures_and_moves_to_next_row() {
        let buf = SharedBuf::default();
        let r = renderer(&buf, 10, true);
        for ch in "go".chars() {
            r.append_char(ch).unwrap();
        }
        assert_eq!(r.take_line().unwrap(), "go");
        assert_eq!(r.current_line(), "");
        assert!(buf.contents().ends_with("\r\n"));
    }

    #[test]
    fn replace_line_erases_then_rewrites() {
        let buf = SharedBuf::default();
        let r = renderer(&buf, 10, true);
        r.replace_line("recalled").unwrap();
        let rendered = buf.contents();
        assert!(rendered.contains(CLEAR_LINE));
        assert!(rendered.ends_with("recalled"));
        assert_eq!(r.current_line(), "recalled");
    }

    #[test]
    fn log_file_keeps_literal_directives_with_level_tag() {
        let temp = TestTempDir::new("render-log");
        let path = temp.child("server.log");
        let buf = SharedBuf::default();
        let log = LogFile::open(&path).expect("open log");
        let r = OutputRenderer::new(buf, 100, true, Some(log));

        r.out("&Chello", LogLevel::Warn, true).unwrap();

        let written = std::fs::read_to_string(&path).expect("read log");
        let line = written.lines().next().expect("one log line");
        assert!(line.starts_with('['));
        assert!(
            line.ends_with("warning:  &Chello"),
            "directives must not be stripped from the file, got: {line}"
        );
    }

    #[test]
    fn each_emit_appends_exactly_one_log_line() {
        let temp = TestTempDir::new("render-log-count");
        let path = temp.child("server.log");
        let log = LogFile::open(&path).expect("open log");
        let r = OutputRenderer::new(SharedBuf::default(), 100, true, Some(log));

        r.info("one").unwrap();
        r.error("two").unwrap();

        let written = std::fs::read_to_string(&path).expect("read log");
        assert_eq!(written.lines().count(), 2);
    }

    #[test]
    #[cfg(unix)]
    fn log_append_failure_is_reported_and_does_not_interrupt() {
        // /dev/full accepts the open but fails every write with ENOSPC.
        let log = LogFile::open(Path::new("/dev/full")).expect("open /dev/full");
        let buf = SharedBuf::default();
        let r = OutputRenderer::new(buf.clone(), 100, true, Some(log));

        r.out("still here", LogLevel::Info, true).unwrap();

        let rendered = buf.contents();
        assert!(rendered.contains("still here"), "message must still render");
        assert!(
            rendered.contains("log file write failed"),
            "append failure must be reported on the terminal"
        );

        // The console keeps going on subsequent emits too.
        r.warn("again").unwrap();
        assert!(buf.contents().contains("again"));
    }

    #[test]
    fn log_open_failure_is_an_error_but_renderer_works_without() {
        let temp = TestTempDir::new("render-log-missing");
        // A directory path cannot be opened for append.
        assert!(LogFile::open(temp.path()).is_err());

        let buf = SharedBuf::default();
        let r = renderer(&buf, 100, true);
        r.info("still alive").unwrap();
        assert!(buf.contents().contains("still alive"));
    }

    #[test]
    fn confirm_ignores_other_keys_and_redraws_input() {
        let buf = SharedBuf::default();
        let r = renderer(&buf, 100, true);
        for ch in "draft".chars() {
            r.append_char(ch).unwrap();
        }

        let mut keys = ['x', '7', 'Y'].into_iter();
        let accepted = r
            .confirm_with("load plugin.so", || Ok(keys.next().expect("scripted key")))
            .unwrap();

        assert!(accepted);
        let rendered = buf.contents();
        assert!(rendered.contains("load plugin.so [y/n] "));
        assert!(rendered.ends_with("draft"), "input redrawn after prompt");
        assert_eq!(r.current_line(), "draft");
    }

    #[test]
    fn confirm_answers_no() {
        let buf = SharedBuf::default();
        let r = renderer(&buf, 100, true);
        let accepted = r.confirm_with("trust?", || Ok('n')).unwrap();
        assert!(!accepted);
    }

    #[test]
    fn level_tags_render_as_lowercase_words() {
        assert_eq!(LogLevel::Warn.to_string(), "warning");
        assert_eq!(LogLevel::Fatal.to_string(), "fatal");
        assert_eq!(LogLevel::Info.to_string(), "info");
    }
}
