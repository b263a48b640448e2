// ── Core error types ──
//
// Connection-layer failures arrive from `wlcrename-ssh` and abort a run.
// Row-level problems are never errors: they live on `ChangeRow::status`.
// The spreadsheet variants cover the only other thing that can go wrong
// before a batch starts.

use thiserror::Error;

use crate::model::BatchReport;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error(transparent)]
    Session(#[from] wlcrename_ssh::Error),

    #[error("Cannot tell the controller type from prompt '{prompt}' on {host}")]
    UnknownDialect { host: String, prompt: String },

    /// The session failed partway through a batch. `report` holds the rows
    /// finished before the failure; `remaining` rows were never confirmed.
    #[error("Rename batch stopped with {remaining} rows left: {source}")]
    Interrupted {
        report: Box<BatchReport>,
        remaining: usize,
        #[source]
        source: Box<CoreError>,
    },

    // ── Spreadsheet errors ───────────────────────────────────────────
    #[error("Cannot open workbook {path}: {reason}")]
    WorkbookOpen { path: String, reason: String },

    #[error("Worksheet '{sheet}' not found in {path}")]
    SheetNotFound {
        path: String,
        sheet: String,
        available: Vec<String>,
    },

    #[error("Column '{column}' not found in {path} (sheet '{sheet}')")]
    MissingColumn {
        path: String,
        sheet: String,
        column: String,
    },

    #[error("Cannot write workbook {path}: {reason}")]
    WorkbookWrite { path: String, reason: String },
}
