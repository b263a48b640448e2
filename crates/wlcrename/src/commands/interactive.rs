//! Interactive mode: prompt for the controller, connect, then offer the menu.

use chrono::Utc;

use wlcrename_core::{Controller, ControllerSession, load_change_rows};

use crate::cli::GlobalOpts;
use crate::config::{self, FileSettings};
use crate::error::CliError;
use crate::prompt::{InputProvider, MENU, MenuSelection};

pub fn handle(global: &GlobalOpts) -> Result<(), CliError> {
    let started_at = Utc::now();
    super::status(
        global,
        format!("Start time: {}", started_at.format("%Y-%m-%d %H:%M:%S UTC")),
    );

    let cfg = config::load_config_or_default();
    let mut inputs = super::input_provider();
    let target = config::resolve_target(global, &cfg, inputs.as_mut())?;
    let mut controller = super::connect(&target, global)?;

    menu(&mut controller, &target.files, inputs.as_mut(), global)?;
    controller.close()?;

    super::print_run_time(global, started_at);
    Ok(())
}

/// Show the menu once and run the chosen task on an open controller.
///
/// The workbook and sheet are only asked for when renaming.
pub fn menu<S: ControllerSession>(
    controller: &mut Controller<S>,
    files: &FileSettings,
    inputs: &mut dyn InputProvider,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    eprintln!("\n{MENU}\n");

    match MenuSelection::parse(&inputs.selection()?)? {
        MenuSelection::Export => {
            super::export::run(controller, &files.export_file, global)?;
        }
        MenuSelection::Rename => {
            let path = inputs.workbook(&files.workbook)?;
            let sheet = inputs.sheet(&files.sheet)?;
            let rows = load_change_rows(&path, &sheet)?;
            super::rename::run(controller, rows, &path, &sheet, files.scan, global)?;
        }
    }
    Ok(())
}
