//! Rename execution: one command per valid row, one response, no retry.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use tracing::{debug, warn};

use crate::dialect::Dialect;
use crate::error::CoreError;
use crate::model::{ChangeRow, RowStatus};
use crate::session::ControllerSession;

/// Marker both controller families print when a command is refused.
pub(crate) const ERROR_MARKER: &str = "% Error:";

/// How a rename response is judged.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ResponseScan {
    /// Only `% Error:` (case-sensitive) counts as a rejection.
    #[default]
    ErrorMarker,
    /// `% Error:` or the word `invalid` in any case.
    Strict,
}

impl ResponseScan {
    pub fn is_rejection(self, response: &str) -> bool {
        if response.contains(ERROR_MARKER) {
            return true;
        }
        match self {
            Self::ErrorMarker => false,
            Self::Strict => response.to_ascii_lowercase().contains("invalid"),
        }
    }
}

/// Sends rename commands through a session in one dialect.
pub struct RenameExecutor<'a, S: ControllerSession + ?Sized> {
    session: &'a mut S,
    dialect: Dialect,
    scan: ResponseScan,
}

impl<'a, S: ControllerSession + ?Sized> RenameExecutor<'a, S> {
    pub fn new(session: &'a mut S, dialect: Dialect, scan: ResponseScan) -> Self {
        Self {
            session,
            dialect,
            scan,
        }
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Rename the AP behind `row` and record the outcome on it.
    ///
    /// Rows that are not `Valid` are left untouched and nothing is sent.
    /// A controller rejection is recorded on the row; only a session
    /// failure is returned as an error.
    pub fn execute(&mut self, row: &mut ChangeRow) -> Result<RowStatus, CoreError> {
        if !row.is_valid() {
            return Ok(row.status);
        }

        let command = self.dialect.rename_command(&row.current_name, &row.new_name);
        debug!(row = row.sheet_row(), %command, "renaming access point");
        let response = self.session.send_command(&command)?;

        if self.scan.is_rejection(&response) {
            warn!(
                row = row.sheet_row(),
                current = %row.current_name,
                new = %row.new_name,
                response = %response.trim(),
                "controller rejected rename"
            );
            row.reject(response);
        }
        Ok(row.status)
    }
}
