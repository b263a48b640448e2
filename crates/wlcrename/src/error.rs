//! CLI error types with miette diagnostics.
//!
//! Maps library errors into operator-facing errors with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use wlcrename_config::ConfigError;
use wlcrename_core::{CoreError, SessionError};

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
    pub const UNKNOWN_DIALECT: i32 = 9;
    pub const WORKBOOK: i32 = 10;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to controller at {host}")]
    #[diagnostic(
        code(wlcrename::connection_failed),
        help(
            "Check that the controller is reachable over SSH.\n\
             Host: {host}\n\
             Try a different port with --port, or raise --timeout."
        )
    )]
    ConnectionFailed { host: String, reason: String },

    #[error("Controller at {host} closed the session unexpectedly")]
    #[diagnostic(
        code(wlcrename::session_closed),
        help("The controller may limit concurrent SSH sessions. Retry once others log out.")
    )]
    SessionClosed { host: String },

    #[error("Cannot tell the controller type at {host} from prompt '{prompt}'")]
    #[diagnostic(
        code(wlcrename::unknown_dialect),
        help(
            "Supported controllers show a '#' (IOS-XE) or '>' (AireOS) prompt.\n\
             Force one with: --dialect iosxe | --dialect aireos"
        )
    )]
    UnknownDialect { host: String, prompt: String },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed for {username}@{host}")]
    #[diagnostic(
        code(wlcrename::auth_failed),
        help(
            "Verify the username and password.\n\
             Stored passwords can be replaced with: wlcrename config set-password"
        )
    )]
    AuthFailed { host: String, username: String },

    #[error("No credentials configured for profile '{profile}'")]
    #[diagnostic(
        code(wlcrename::no_credentials),
        help(
            "Configure credentials with: wlcrename config init\n\
             Or set WLC_USERNAME and WLC_PASSWORD."
        )
    )]
    NoCredentials { profile: String },

    // ── Timeout ──────────────────────────────────────────────────────
    #[error("Controller at {host} did not answer within {seconds}s")]
    #[diagnostic(
        code(wlcrename::timeout),
        help("Increase timeout with --timeout or check controller responsiveness.")
    )]
    Timeout { host: String, seconds: u64 },

    // ── Spreadsheets ─────────────────────────────────────────────────
    #[error("Cannot open workbook {path}")]
    #[diagnostic(
        code(wlcrename::workbook_open),
        help("{reason}\nPass a different file with --file.")
    )]
    WorkbookOpen { path: String, reason: String },

    #[error("Worksheet '{sheet}' not found in {path}")]
    #[diagnostic(
        code(wlcrename::sheet_not_found),
        help("Available sheets: {available}\nPick one with --sheet.")
    )]
    SheetNotFound {
        path: String,
        sheet: String,
        available: String,
    },

    #[error("Column '{column}' not found in {path} (sheet '{sheet}')")]
    #[diagnostic(
        code(wlcrename::missing_column),
        help("The first row must hold the headers 'Current AP Name' and 'New AP Name'.")
    )]
    MissingColumn {
        path: String,
        sheet: String,
        column: String,
    },

    #[error("Cannot write workbook {path}: {reason}")]
    #[diagnostic(
        code(wlcrename::workbook_write),
        help("Close the file if it is open in Excel, or pick another path with --file.")
    )]
    WorkbookWrite { path: String, reason: String },

    // ── Input ────────────────────────────────────────────────────────
    #[error("Invalid selection '{input}'")]
    #[diagnostic(code(wlcrename::invalid_selection), help("Enter A or B."))]
    InvalidSelection { input: String },

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(wlcrename::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(wlcrename::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: wlcrename config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error(transparent)]
    #[diagnostic(code(wlcrename::config))]
    Config(Box<figment::Error>),

    #[error("Keyring error: {0}")]
    #[diagnostic(
        code(wlcrename::keyring),
        help("Store the password in the profile instead, or set WLC_PASSWORD.")
    )]
    Keyring(String),

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize config: {0}")]
    #[diagnostic(code(wlcrename::serialization))]
    Serialization(#[from] toml::ser::Error),
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } | Self::SessionClosed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::UnknownDialect { .. } => exit_code::UNKNOWN_DIALECT,
            Self::WorkbookOpen { .. }
            | Self::SheetNotFound { .. }
            | Self::MissingColumn { .. }
            | Self::WorkbookWrite { .. } => exit_code::WORKBOOK,
            Self::InvalidSelection { .. }
            | Self::Validation { .. }
            | Self::ProfileNotFound { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── Library error → CliError mapping ─────────────────────────────────

impl From<SessionError> for CliError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::AuthFailure { host, username } => CliError::AuthFailed { host, username },
            SessionError::Timeout { host, timeout_secs } => CliError::Timeout {
                host,
                seconds: timeout_secs,
            },
            SessionError::UnexpectedEnd { host } => CliError::SessionClosed { host },
            SessionError::Transport { host, message } => CliError::ConnectionFailed {
                host,
                reason: message,
            },
            SessionError::Unknown { host, detail } => CliError::ConnectionFailed {
                host,
                reason: detail,
            },
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Session(inner) => inner.into(),
            CoreError::Interrupted { source, .. } => (*source).into(),
            CoreError::UnknownDialect { host, prompt } => CliError::UnknownDialect { host, prompt },
            CoreError::WorkbookOpen { path, reason } => CliError::WorkbookOpen { path, reason },
            CoreError::SheetNotFound {
                path,
                sheet,
                available,
            } => CliError::SheetNotFound {
                path,
                sheet,
                available: if available.is_empty() {
                    "(none)".into()
                } else {
                    available.join(", ")
                },
            },
            CoreError::MissingColumn {
                path,
                sheet,
                column,
            } => CliError::MissingColumn {
                path,
                sheet,
                column,
            },
            CoreError::WorkbookWrite { path, reason } => CliError::WorkbookWrite { path, reason },
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::NoCredentials { profile } => CliError::NoCredentials { profile },
            ConfigError::Keyring(e) => CliError::Keyring(e.to_string()),
            ConfigError::Serialization(e) => CliError::Serialization(e),
            ConfigError::Figment(e) => CliError::Config(e),
            ConfigError::Io(e) => CliError::Io(e),
        }
    }
}
