//! `export`: write the joined access point names to a workbook.

use std::path::Path;

use chrono::Utc;
use tracing::debug;

use wlcrename_core::{ApSummary, Controller, ControllerSession, write_export};

use crate::cli::{ExportArgs, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::output;

pub fn handle(args: &ExportArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let started_at = Utc::now();
    let cfg = config::load_config_or_default();
    let mut inputs = super::input_provider();
    let target = config::resolve_target(global, &cfg, inputs.as_mut())?;
    let path = args
        .file
        .clone()
        .unwrap_or_else(|| target.files.export_file.clone());

    let mut controller = super::connect(&target, global)?;
    run(&mut controller, &path, global)?;
    controller.close()?;

    super::print_run_time(global, started_at);
    Ok(())
}

/// List the access points, write them to `path`, and print them.
pub fn run<S: ControllerSession>(
    controller: &mut Controller<S>,
    path: &Path,
    global: &GlobalOpts,
) -> Result<ApSummary, CliError> {
    let summary = controller.list_access_points()?;
    debug!(raw = %summary.raw, "show ap summary");

    write_export(path, &summary.names())?;

    let out = output::render_access_points(&global.output, &summary.access_points);
    output::print_output(&out, global.quiet);
    super::status(
        global,
        format!(
            "Total number of AP's currently connected to WLC: {}",
            summary.count()
        ),
    );
    super::status(
        global,
        format!("AP list exported to excel: {}", path.display()),
    );
    super::status(
        global,
        "Add a 'New AP Name' column to reuse this file with: wlcrename rename",
    );
    Ok(summary)
}
