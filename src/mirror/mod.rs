pub mod sheets;

pub use sheets::SheetsMirror;

use crate::errors::AppResult;
use serde_json::Value;
use std::fmt;

/// Remote destinations, one worksheet per local table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MirrorTable {
    EnCurso,
    Bobinas,
    Eventos,
}

impl MirrorTable {
    pub fn worksheet(&self) -> &'static str {
        match self {
            MirrorTable::EnCurso => "EN_CURSO",
            MirrorTable::Bobinas => "BOBINAS",
            MirrorTable::Eventos => "EVENTOS",
        }
    }
}

impl fmt::Display for MirrorTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.worksheet())
    }
}

/// Mirror port: appends one row to one remote destination. Failures are
/// returned, not swallowed; the ledger decides how to degrade them.
pub trait Mirror {
    fn append(&self, table: MirrorTable, row: Vec<Value>) -> AppResult<()>;
}

/// Outcome of the mirror leg of a submission. The local write has
/// already succeeded by the time one of these exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MirrorStatus {
    /// The row reached the remote destination.
    Delivered,
    /// Mirroring is disabled; nothing was attempted.
    Skipped,
    /// The append failed; the row exists locally only.
    Failed(String),
}

impl MirrorStatus {
    pub fn is_delivered(&self) -> bool {
        matches!(self, MirrorStatus::Delivered)
    }

    /// One-word form used in journal lines.
    pub fn as_str(&self) -> &'static str {
        match self {
            MirrorStatus::Delivered => "delivered",
            MirrorStatus::Skipped => "skipped",
            MirrorStatus::Failed(_) => "failed",
        }
    }

    /// Warning text to surface to the operator, if any.
    pub fn warning(&self) -> Option<String> {
        match self {
            MirrorStatus::Failed(reason) => Some(format!(
                "Saved locally, but the mirror append failed: {reason}"
            )),
            _ => None,
        }
    }
}
