//! Command handlers.

pub mod config_cmd;
pub mod export;
pub mod interactive;
pub mod rename;

use std::io::{self, IsTerminal};

use chrono::{DateTime, Utc};
use tracing::debug;

use wlcrename_core::Controller;

use crate::cli::GlobalOpts;
use crate::config::Target;
use crate::error::CliError;
use crate::output;
use crate::prompt::{InputProvider, PresetInputs, TerminalPrompts};

/// Terminal prompts when stdin is interactive; otherwise missing values are errors.
pub fn input_provider() -> Box<dyn InputProvider> {
    if io::stdin().is_terminal() {
        Box::new(TerminalPrompts)
    } else {
        Box::new(PresetInputs::default())
    }
}

/// Progress text for the operator. Goes to stderr so stdout stays clean.
pub fn status(global: &GlobalOpts, message: impl AsRef<str>) {
    if !global.quiet {
        eprintln!("{}", message.as_ref());
    }
}

/// Open the session and announce the controller we ended up on.
pub fn connect(target: &Target, global: &GlobalOpts) -> Result<Controller, CliError> {
    let session = &target.session;
    debug!(profile = %target.profile_name, address = %session.address(), "connecting");
    status(
        global,
        format!(
            "Starting connection to WLC: {} with userid: {}",
            session.host, session.username
        ),
    );

    let controller = Controller::connect(session, target.dialect)?;
    status(
        global,
        format!(
            "Connected to {} WLC: {} at: {}",
            controller.dialect(),
            controller.prompt(),
            controller.host()
        ),
    );
    Ok(controller)
}

pub fn print_run_time(global: &GlobalOpts, started_at: DateTime<Utc>) {
    status(
        global,
        format!(
            "Total run time was: {}",
            output::format_elapsed(Utc::now() - started_at)
        ),
    );
}
