//! Bounded single-line input buffer.
//!
//! One `InputLine` is shared (behind the renderer's lock) between the key
//! handler that edits it and the output path that blanks and redraws it.

/// The live, editable input line.
///
/// Invariants: the character count never exceeds `limit`, and no control
/// characters (newlines included) are ever stored.
#[derive(Debug)]
pub struct InputLine {
    text: String,
    limit: usize,
}

impl InputLine {
    pub fn new(limit: usize) -> Self {
        Self {
            text: String::new(),
            limit,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Append one character. Returns `false` when the character was dropped,
    /// either because the line is full (silent truncation) or because it is a
    /// control character.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() || self.char_len() >= self.limit {
            return false;
        }
        self.text.push(ch);
        true
    }

    /// Remove the last character. Returns `false` on an empty line.
    pub(crate) fn pop_char(&mut self) -> bool {
        self.text.pop().is_some()
    }

    /// Capture and clear the line in one step (submission).
    pub(crate) fn take(&mut self) -> String {
        std::mem::take(&mut self.text)
    }

    /// Overwrite the line, clamping to the character limit.
    pub(crate) fn replace(&mut self, text: &str) {
        self.text = text.chars().take(self.limit).collect();
    }
}
