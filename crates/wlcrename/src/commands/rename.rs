//! `rename`: apply a change-list workbook to the controller.

use std::io::{self, IsTerminal};
use std::path::Path;

use chrono::Utc;
use indicatif::{ProgressBar, ProgressStyle};

use wlcrename_core::{
    BatchObserver, BatchReport, ChangeRow, Controller, ControllerSession, CoreError,
    ResponseScan, load_change_rows,
};

use crate::cli::{GlobalOpts, OutputFormat, RenameArgs};
use crate::config;
use crate::error::CliError;
use crate::output;

pub fn handle(args: &RenameArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let started_at = Utc::now();
    let cfg = config::load_config_or_default();
    let files = config::resolve_files(global, &cfg);
    let path = args.file.clone().unwrap_or(files.workbook);
    let sheet = args.sheet.clone().unwrap_or(files.sheet);
    let scan = if args.strict_scan {
        ResponseScan::Strict
    } else {
        files.scan
    };

    // Read the workbook before connecting so a bad file fails fast.
    let rows = load_change_rows(&path, &sheet)?;

    if args.dry_run {
        dry_run(&rows, global);
        return Ok(());
    }

    let mut inputs = super::input_provider();
    let target = config::resolve_target(global, &cfg, inputs.as_mut())?;
    let mut controller = super::connect(&target, global)?;
    run(&mut controller, rows, &path, &sheet, scan, global)?;
    controller.close()?;

    super::print_run_time(global, started_at);
    Ok(())
}

fn dry_run(rows: &[ChangeRow], global: &GlobalOpts) {
    let color = output::should_color(&global.color);
    let out = output::render_change_rows(&global.output, rows, color);
    output::print_output(&out, global.quiet);

    let ready = rows.iter().filter(|row| row.is_valid()).count();
    super::status(
        global,
        format!(
            "Dry run: {ready} of {} rows would be sent to the controller",
            rows.len()
        ),
    );
}

/// Run the batch against a connected controller and print the summary.
///
/// If the session drops partway, the rows finished so far are still
/// summarized before the connection error is returned.
pub fn run<S: ControllerSession>(
    controller: &mut Controller<S>,
    rows: Vec<ChangeRow>,
    path: &Path,
    sheet: &str,
    scan: ResponseScan,
    global: &GlobalOpts,
) -> Result<BatchReport, CliError> {
    super::status(
        global,
        format!(
            "There are {} APs to process from file: {}, sheet: {sheet}",
            rows.len(),
            path.display()
        ),
    );

    let mut observer = ConsoleObserver::new(rows.len(), global);
    let result = controller.rename_batch(rows, scan, &mut observer);
    observer.finish();
    let color = output::should_color(&global.color);
    match result {
        Ok(report) => {
            let out = output::render_report(&global.output, &report, color);
            output::print_output(&out, global.quiet);
            Ok(report)
        }
        Err(CoreError::Interrupted {
            report,
            remaining,
            source,
        }) => {
            let out = output::render_report(&global.output, &report, color);
            output::print_output(&out, global.quiet);
            super::status(
                global,
                format!("Session lost: {remaining} rows were not confirmed by the controller"),
            );
            Err((*source).into())
        }
        Err(err) => Err(err.into()),
    }
}

// ── Progress ────────────────────────────────────────────────────────

/// Prints the per-row lines and, on a terminal, drives a progress bar.
struct ConsoleObserver {
    bar: Option<ProgressBar>,
    quiet: bool,
    color: bool,
}

impl ConsoleObserver {
    fn new(total: usize, global: &GlobalOpts) -> Self {
        let wants_bar = !global.quiet
            && matches!(global.output, OutputFormat::Table)
            && io::stderr().is_terminal();
        let bar = wants_bar.then(|| {
            let bar = ProgressBar::new(u64::try_from(total).unwrap_or(u64::MAX));
            if let Ok(style) = ProgressStyle::with_template("{bar:30} {pos}/{len} {wide_msg}") {
                bar.set_style(style);
            }
            bar
        });
        Self {
            bar,
            quiet: global.quiet,
            color: output::should_color(&global.color),
        }
    }

    fn line(&self, message: &str) {
        if self.quiet {
            return;
        }
        match self.bar {
            Some(ref bar) => bar.println(message),
            None => eprintln!("{message}"),
        }
    }

    fn tick(&self) {
        if let Some(ref bar) = self.bar {
            bar.inc(1);
        }
    }

    fn finish(&self) {
        if let Some(ref bar) = self.bar {
            bar.finish_and_clear();
        }
    }
}

impl BatchObserver for ConsoleObserver {
    fn skipped(&mut self, row: &ChangeRow) {
        self.line(&output::row_error_line(row));
        self.tick();
    }

    fn started(&mut self, row: &ChangeRow) {
        self.line(&format!(
            "{}: Processing {}  {}",
            row.sheet_row(),
            row.current_name,
            row.new_name
        ));
        if let Some(ref bar) = self.bar {
            bar.set_message(row.current_name.clone());
        }
    }

    fn finished(&mut self, row: &ChangeRow) {
        if row.status.is_error() {
            self.line(&format!(
                "{}: {}",
                row.sheet_row(),
                output::paint_status(row.status, self.color)
            ));
            if let Some(ref response) = row.response {
                self.line(response.trim());
            }
        }
        self.tick();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::commands::testing::{FakeSession, quiet_opts};
    use wlcrename_core::{Dialect, RowStatus, SessionError, validate_rows};

    #[test]
    fn batch_runs_through_the_session_seam() {
        let rows = validate_rows([
            ("AP-1", "Lobby-01"),
            ("AP-2", "AP-2"),
            ("AP-3", "Dock-07"),
        ]);
        let mut session = FakeSession::new(vec!["", "% Error: AP AP-3 not found"]);
        let mut controller = Controller::new(&mut session, Dialect::AireOs, ">", "wlc");

        let report = run(
            &mut controller,
            rows,
            Path::new("rename_ap.xlsx"),
            "Sheet1",
            ResponseScan::default(),
            &quiet_opts(),
        )
        .unwrap();

        assert_eq!(report.success_count(), 1);
        assert_eq!(report.failure_count(), 2);
        assert_eq!(report.rows[2].status, RowStatus::ErrorDeviceRejected);
        assert_eq!(
            session.sent,
            vec!["config ap name Lobby-01 AP-1", "config ap name Dock-07 AP-3"]
        );
    }

    #[test]
    fn lost_session_surfaces_as_error() {
        let rows = validate_rows([("AP-1", "Lobby-01")]);
        let mut session = FakeSession::new(vec![]).then_fail(SessionError::UnexpectedEnd {
            host: "wlc".into(),
        });
        let mut controller = Controller::new(&mut session, Dialect::IosXe, "WLC#", "wlc");

        let err = run(
            &mut controller,
            rows,
            Path::new("rename_ap.xlsx"),
            "Sheet1",
            ResponseScan::default(),
            &quiet_opts(),
        )
        .unwrap_err();

        assert!(matches!(err, CliError::SessionClosed { .. }));
        assert_eq!(err.exit_code(), crate::error::exit_code::CONNECTION);
    }

    #[test]
    fn lost_session_after_progress_is_connection_error() {
        let rows = validate_rows([("AP-1", "Lobby-01"), ("AP-2", "Dock-07")]);
        let mut session = FakeSession::new(vec![""]).then_fail(SessionError::UnexpectedEnd {
            host: "wlc".into(),
        });
        let mut controller = Controller::new(&mut session, Dialect::IosXe, "WLC#", "wlc");

        let err = run(
            &mut controller,
            rows,
            Path::new("rename_ap.xlsx"),
            "Sheet1",
            ResponseScan::default(),
            &quiet_opts(),
        )
        .unwrap_err();

        assert_eq!(err.exit_code(), crate::error::exit_code::CONNECTION);
        assert_eq!(
            session.sent,
            vec!["ap name AP-1 name Lobby-01", "ap name AP-2 name Dock-07"]
        );
    }
}
