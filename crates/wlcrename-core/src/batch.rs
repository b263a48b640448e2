//! Batch orchestration over a validated change list.

use chrono::Utc;
use tracing::{info, instrument, warn};

use crate::error::CoreError;
use crate::executor::RenameExecutor;
use crate::model::{BatchReport, ChangeRow};
use crate::session::ControllerSession;

/// Progress hooks, called in spreadsheet order.
pub trait BatchObserver {
    /// A row that failed validation and will not be sent.
    fn skipped(&mut self, _row: &ChangeRow) {}
    /// About to send the rename for `row`.
    fn started(&mut self, _row: &ChangeRow) {}
    /// The controller answered; `row.status` holds the outcome.
    fn finished(&mut self, _row: &ChangeRow) {}
}

#[cfg(test)]
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct NoopObserver;

#[cfg(test)]
impl BatchObserver for NoopObserver {}

/// Run every `Valid` row through the executor and collect the report.
///
/// Invalid rows are skipped and stay failures with their own status. A
/// rejected rename never stops the batch; a lost session does, since no
/// later row could be sent either. In that case the error is
/// [`CoreError::Interrupted`], carrying the rows finished so far.
#[instrument(skip_all, fields(rows = rows.len(), dialect = %executor.dialect()))]
pub fn run_batch<S: ControllerSession + ?Sized>(
    mut rows: Vec<ChangeRow>,
    executor: &mut RenameExecutor<'_, S>,
    observer: &mut dyn BatchObserver,
) -> Result<BatchReport, CoreError> {
    let started_at = Utc::now();

    for index in 0..rows.len() {
        let Some(row) = rows.get_mut(index) else {
            break;
        };
        if !row.is_valid() {
            observer.skipped(row);
            continue;
        }
        observer.started(row);
        if let Err(source) = executor.execute(row) {
            let remaining = rows.len() - index;
            rows.truncate(index);
            warn!(done = index, remaining, error = %source, "rename batch interrupted");
            return Err(CoreError::Interrupted {
                report: Box::new(BatchReport {
                    rows,
                    started_at,
                    finished_at: Utc::now(),
                }),
                remaining,
                source: Box::new(source),
            });
        }
        observer.finished(row);
    }

    let report = BatchReport {
        rows,
        started_at,
        finished_at: Utc::now(),
    };
    info!(
        succeeded = report.success_count(),
        failed = report.failure_count(),
        "rename batch complete"
    );
    Ok(report)
}
