//! Calculation history.
//!
//! The log is append-only: entries are never edited or removed one by one,
//! only cleared in bulk. Views over it ([`History::recent`]) never change it.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::iter::{Rev, Take};
use std::path::Path;
use std::slice;

use anyhow::Context;

/// Number of entries shown by default.
pub const DISPLAY_LIMIT: usize = 20;

/// First line of an exported history file.
pub const EXPORT_HEADER: &str = "MathMaster Calculation History";

const EXPORT_SEPARATOR_WIDTH: usize = 50;

/// One recorded calculation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    description: String,
}

impl HistoryEntry {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

impl std::fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.description)
    }
}

/// Most recent entries, newest first.
pub type Recent<'a> = Take<Rev<slice::Iter<'a, HistoryEntry>>>;

#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    /// An empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an entry after every existing one.
    pub fn append(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    /// The last `n` entries in reverse order. Each call starts a fresh view.
    pub fn recent(&self, n: usize) -> Recent<'_> {
        self.entries.iter().rev().take(n)
    }

    /// Numbered display lines for the last `n` entries; `1.` is the newest.
    pub fn render_recent(&self, n: usize) -> Vec<String> {
        self.recent(n)
            .enumerate()
            .map(|(i, entry)| format!("{}. {}", i + 1, entry))
            .collect()
    }

    /// All entries in the order they were appended.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Number of recorded entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Write the full log: a header, a separator, then `{index}. {entry}` lines.
    pub fn export<W: Write>(&self, mut sink: W) -> io::Result<()> {
        writeln!(sink, "{}", EXPORT_HEADER)?;
        writeln!(sink, "{}", "=".repeat(EXPORT_SEPARATOR_WIDTH))?;
        for (i, entry) in self.entries.iter().enumerate() {
            writeln!(sink, "{}. {}", i + 1, entry)?;
        }
        sink.flush()
    }

    /// Export to a file, replacing it if it exists.
    pub fn export_to_file(&self, path: &Path) -> anyhow::Result<()> {
        let file = File::create(path)
            .with_context(|| format!("Could not create {}", path.display()))?;
        self.export(BufWriter::new(file))
            .with_context(|| format!("Could not write history to {}", path.display()))?;
        tracing::info!(path = %path.display(), entries = self.len(), "exported history");
        Ok(())
    }
}
