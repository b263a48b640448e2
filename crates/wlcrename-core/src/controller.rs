// ── Controller facade ──
//
// Owns the one command session of a run together with the dialect it was
// detected as. Both operator tasks (export and bulk rename) go through
// here; the session is handed in explicitly, never held globally.

use tracing::{debug, info};
use wlcrename_ssh::{SessionConfig, SshSession};

use crate::batch::{self, BatchObserver};
use crate::dialect::Dialect;
use crate::error::CoreError;
use crate::executor::{RenameExecutor, ResponseScan};
use crate::model::{ApSummary, BatchReport, ChangeRow};
use crate::parser;
use crate::session::ControllerSession;

/// A connected controller and the dialect its CLI speaks.
#[derive(Debug)]
pub struct Controller<S = SshSession> {
    session: S,
    dialect: Dialect,
    prompt: String,
    host: String,
}

impl Controller<SshSession> {
    /// Open the SSH session, pick the dialect, and switch paging off.
    ///
    /// `dialect` overrides prompt detection when set.
    pub fn connect(config: &SessionConfig, dialect: Option<Dialect>) -> Result<Self, CoreError> {
        let session = SshSession::connect(config)?;
        let prompt = session.prompt().to_owned();

        let dialect = match dialect.or_else(|| Dialect::from_prompt(&prompt)) {
            Some(d) => d,
            None => {
                return Err(CoreError::UnknownDialect {
                    host: config.host.clone(),
                    prompt,
                });
            }
        };
        info!(host = %config.host, %dialect, %prompt, "controller dialect selected");

        let mut controller = Self::new(session, dialect, prompt, config.host.clone());
        controller.disable_paging()?;
        Ok(controller)
    }

    /// Close the session explicitly. Dropping the controller does the same.
    pub fn close(self) -> Result<(), CoreError> {
        self.session.close()?;
        Ok(())
    }
}

impl<S: ControllerSession> Controller<S> {
    pub fn new(
        session: S,
        dialect: Dialect,
        prompt: impl Into<String>,
        host: impl Into<String>,
    ) -> Self {
        Self {
            session,
            dialect,
            prompt: prompt.into(),
            host: host.into(),
        }
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// Turn off `--More--` pagination so long tables arrive in one piece.
    pub fn disable_paging(&mut self) -> Result<(), CoreError> {
        let command = self.dialect.paging_command();
        let output = self.session.send_command(command)?;
        debug!(command, output = %output.trim(), "paging disabled");
        Ok(())
    }

    /// Run `show ap summary` and parse the joined access points.
    pub fn list_access_points(&mut self) -> Result<ApSummary, CoreError> {
        let raw = self.session.send_command(self.dialect.list_command())?;
        let access_points = parser::parse_ap_summary(&raw);
        info!(count = access_points.len(), "access points listed");
        Ok(ApSummary { raw, access_points })
    }

    /// Rename every valid row, one command each, in order.
    pub fn rename_batch(
        &mut self,
        rows: Vec<ChangeRow>,
        scan: ResponseScan,
        observer: &mut dyn BatchObserver,
    ) -> Result<BatchReport, CoreError> {
        let mut executor = RenameExecutor::new(&mut self.session, self.dialect, scan);
        batch::run_batch(rows, &mut executor, observer)
    }
}
