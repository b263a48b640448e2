// ── Batch outcome ──

use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;

use super::change_row::ChangeRow;

/// Every row of one rename run, after processing.
///
/// A row counts as a success only if it is still `Valid` once the batch
/// has run; everything else (data errors and controller rejections) is a
/// failure, so `success_count() + failure_count() == total()` always holds.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub rows: Vec<ChangeRow>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.rows.len()
    }

    pub fn success_count(&self) -> usize {
        self.rows.iter().filter(|row| row.is_valid()).count()
    }

    pub fn failure_count(&self) -> usize {
        self.total() - self.success_count()
    }

    /// Failed rows in spreadsheet order.
    pub fn failures(&self) -> impl Iterator<Item = &ChangeRow> {
        self.rows.iter().filter(|row| !row.is_valid())
    }

    pub fn elapsed(&self) -> TimeDelta {
        self.finished_at - self.started_at
    }
}
