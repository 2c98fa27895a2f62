//! History store
//!
//! An append-only in-memory log of submitted command lines, plus a cursor
//! marking how many entries have already been flushed to disk by the most
//! recent incremental append (`history -a`). `history -w` rewrites the
//! whole file and re-bases the cursor at the new length; `history -r` loads
//! entries without moving the cursor at all.

use std::fs;
use std::io::Write;
use std::path::Path;

use crate::errors::HistoryFileError;

/// One submitted, trimmed, non-empty line.
pub type HistoryEntry = String;

#[derive(Debug, Default, Clone)]
pub struct HistoryStore {
    entries: Vec<HistoryEntry>,
    written_cursor: usize,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a raw line to the store if, once trimmed, it's non-empty.
    pub fn append(&mut self, line: &str) {
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            self.entries.push(trimmed.to_string());
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// The last `limit` entries (or all of them, `limit` absent or ≥ len),
    /// paired with their 1-based index in the full history.
    pub fn last(&self, limit: Option<usize>) -> Vec<(usize, &str)> {
        let start = match limit {
            Some(n) if n < self.entries.len() => self.entries.len() - n,
            _ => 0,
        };
        self.entries[start..]
            .iter()
            .enumerate()
            .map(|(i, e)| (start + i + 1, e.as_str()))
            .collect()
    }

    /// Load entries from `path`, one per non-empty trimmed line. Does not
    /// move `written_cursor`.
    pub fn read_file(&mut self, path: &Path) -> Result<(), HistoryFileError> {
        let content = fs::read_to_string(path).map_err(|_| HistoryFileError {
            path: path.display().to_string(),
        })?;
        for line in content.lines() {
            self.append(line);
        }
        Ok(())
    }

    /// Write every entry to `path`, truncating it, and re-base the cursor
    /// at the new length.
    pub fn write_file(&mut self, path: &Path) -> std::io::Result<()> {
        let mut file = fs::File::create(path)?;
        for entry in &self.entries {
            writeln!(file, "{entry}")?;
        }
        self.written_cursor = self.entries.len();
        Ok(())
    }

    /// Append entries from `written_cursor` onward to `path`, then advance
    /// the cursor to the new length. A no-op write if nothing is new.
    pub fn append_file(&mut self, path: &Path) -> std::io::Result<()> {
        let mut file = fs::OpenOptions::new().create(true).append(true).open(path)?;
        for entry in &self.entries[self.written_cursor..] {
            writeln!(file, "{entry}")?;
        }
        self.written_cursor = self.entries.len();
        Ok(())
    }

    /// Load entries from `path` if it exists, ignoring a missing file (used
    /// for the optional `HISTFILE` startup load, which has no diagnostic of
    /// its own).
    pub fn load_startup_file(&mut self, path: &Path) {
        if path.exists() {
            let _ = self.read_file(path);
        }
    }
}
