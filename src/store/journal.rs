use crate::errors::AppResult;
use chrono::Local;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

/// Append-only operation journal, one `timestamp | operation | target |
/// message` line per entry.
pub struct Journal {
    path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct JournalEntry {
    pub timestamp: String,
    pub operation: String,
    pub target: String,
    pub message: String,
}

impl Journal {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Write one journal line.
    pub fn record(&self, operation: &str, target: &str, message: &str) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let now = Local::now().to_rfc3339();

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{now} | {operation} | {target} | {message}")?;

        Ok(())
    }

    /// Read every journal line, oldest first. A missing file is an
    /// empty journal.
    pub fn entries(&self) -> AppResult<Vec<JournalEntry>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let raw = fs::read_to_string(&self.path)?;
        let mut out = Vec::new();

        for line in raw.lines().filter(|l| !l.trim().is_empty()) {
            let mut parts = line.splitn(4, " | ");
            let timestamp = parts.next().unwrap_or_default().to_string();
            let operation = parts.next().unwrap_or_default().to_string();
            let target = parts.next().unwrap_or_default().to_string();
            let message = parts.next().unwrap_or_default().to_string();

            out.push(JournalEntry {
                timestamp,
                operation,
                target,
                message,
            });
        }

        Ok(out)
    }
}
