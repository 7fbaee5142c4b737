//! Fixed-capacity command history with oldest-first eviction.

use std::collections::VecDeque;
use std::fs;
use std::io;
use std::path::Path;

/// Ring of previously submitted lines, newest at the back.
///
/// Entries are immutable once pushed; recalling one into the editor copies it
/// into the live input line.
#[derive(Debug, Clone)]
pub struct HistoryBuffer {
    entries: VecDeque<String>,
    capacity: usize,
}

impl HistoryBuffer {
    /// Create a buffer retaining at most `capacity` lines.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "history capacity must be at least 1");
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a line at the newest end, evicting the oldest entry when full.
    pub fn push(&mut self, line: impl Into<String>) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(line.into());
    }

    /// Entry `offset` lines back from the newest; `get(0)` is the most recent.
    ///
    /// Offsets outside `[0, len)` are caller bugs and panic — the editor clamps
    /// through its wrap rules before indexing.
    pub fn get(&self, offset: usize) -> &str {
        &self.entries[self.entries.len() - 1 - offset]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Load persisted entries from disk, replacing current contents.
    ///
    /// Accepts a JSON array (the save format) or a plain line-per-entry file;
    /// a missing file is not an error. Only the newest `capacity` entries
    /// survive, by ring semantics.
    pub fn load_file(&mut self, path: &Path) -> io::Result<()> {
        if !path.exists() {
            return Ok(());
        }

        let raw = fs::read_to_string(path)?;
        self.entries.clear();
        if raw.trim().is_empty() {
            return Ok(());
        }

        if let Ok(lines) = serde_json::from_str::<Vec<String>>(&raw) {
            for line in lines.into_iter().filter(|l| !l.is_empty()) {
                self.push(line);
            }
            return Ok(());
        }

        // Fallback for hand-edited plain-text files.
        for line in raw.lines().filter(|l| !l.is_empty()) {
            self.push(line);
        }
        Ok(())
    }

    /// Persist the retained window to disk as a compact JSON array, oldest first.
    pub fn save_file(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let entries: Vec<&str> = self.entries.iter().map(String::as_str).collect();
        let encoded = serde_json::to_string(&entries).map_err(|err| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("failed to encode history: {err}"),
            )
        })?;
        fs::write(path, format!("{encoded}\n"))
    }
}
