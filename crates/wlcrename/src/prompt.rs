//! Operator input behind a trait, so command logic runs without a terminal.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use dialoguer::Input;
use secrecy::SecretString;

use crate::error::CliError;

/// Everything the interactive flows ever ask the operator for.
pub trait InputProvider {
    fn host(&mut self) -> Result<String, CliError>;
    fn username(&mut self) -> Result<String, CliError>;
    fn password(&mut self) -> Result<SecretString, CliError>;
    /// Raw menu answer; parsed by [`MenuSelection::parse`].
    fn selection(&mut self) -> Result<String, CliError>;
    fn workbook(&mut self, default: &Path) -> Result<PathBuf, CliError>;
    fn sheet(&mut self, default: &str) -> Result<String, CliError>;
}

/// Map a dialoguer / terminal I/O failure into `CliError`.
pub fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

// ── Menu ────────────────────────────────────────────────────────────

pub const MENU: &str = "\
A: Generate an Excel with the names of the Current AP's
B: Change AP names using an Excel sheet";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuSelection {
    Export,
    Rename,
}

impl MenuSelection {
    /// `a` or `b`, any case, surrounding whitespace ignored.
    pub fn parse(input: &str) -> Result<Self, CliError> {
        match input.trim().to_ascii_lowercase().as_str() {
            "a" => Ok(Self::Export),
            "b" => Ok(Self::Rename),
            _ => Err(CliError::InvalidSelection {
                input: input.trim().to_owned(),
            }),
        }
    }
}

// ── Terminal ────────────────────────────────────────────────────────

/// Prompts on the controlling terminal; passwords are never echoed.
#[derive(Debug, Default)]
pub struct TerminalPrompts;

impl TerminalPrompts {
    fn required(prompt: &str) -> Result<String, CliError> {
        let value: String = Input::new()
            .with_prompt(prompt)
            .interact_text()
            .map_err(prompt_err)?;
        let value = value.trim().to_owned();
        if value.is_empty() {
            return Err(CliError::Validation {
                field: prompt.to_ascii_lowercase(),
                reason: "cannot be empty".into(),
            });
        }
        Ok(value)
    }

    fn with_default(prompt: &str, default: String) -> Result<String, CliError> {
        let value: String = Input::new()
            .with_prompt(prompt)
            .default(default)
            .interact_text()
            .map_err(prompt_err)?;
        Ok(value.trim().to_owned())
    }
}

impl InputProvider for TerminalPrompts {
    fn host(&mut self) -> Result<String, CliError> {
        Self::required("WLC IP address")
    }

    fn username(&mut self) -> Result<String, CliError> {
        Self::required("Username")
    }

    fn password(&mut self) -> Result<SecretString, CliError> {
        let pass = rpassword::prompt_password("Password: ").map_err(prompt_err)?;
        Ok(SecretString::from(pass))
    }

    fn selection(&mut self) -> Result<String, CliError> {
        let value: String = Input::new()
            .with_prompt("Select an option")
            .allow_empty(true)
            .interact_text()
            .map_err(prompt_err)?;
        Ok(value)
    }

    fn workbook(&mut self, default: &Path) -> Result<PathBuf, CliError> {
        Self::with_default("Excel file", default.display().to_string()).map(PathBuf::from)
    }

    fn sheet(&mut self, default: &str) -> Result<String, CliError> {
        Self::with_default("Worksheet", default.to_owned())
    }
}

// ── Pre-resolved ────────────────────────────────────────────────────

/// Answers from values known up front; anything missing is an error.
///
/// Used where no terminal may be touched, and in tests.
#[derive(Debug, Default)]
pub struct PresetInputs {
    pub host: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub selections: VecDeque<String>,
    pub workbook: Option<PathBuf>,
    pub sheet: Option<String>,
}

impl PresetInputs {
    fn missing(field: &str) -> CliError {
        CliError::Validation {
            field: field.into(),
            reason: "no value supplied and prompting is disabled".into(),
        }
    }
}

impl InputProvider for PresetInputs {
    fn host(&mut self) -> Result<String, CliError> {
        self.host.clone().ok_or_else(|| Self::missing("host"))
    }

    fn username(&mut self) -> Result<String, CliError> {
        self.username.clone().ok_or_else(|| Self::missing("username"))
    }

    fn password(&mut self) -> Result<SecretString, CliError> {
        self.password
            .clone()
            .map(SecretString::from)
            .ok_or_else(|| Self::missing("password"))
    }

    fn selection(&mut self) -> Result<String, CliError> {
        self.selections
            .pop_front()
            .ok_or_else(|| Self::missing("selection"))
    }

    fn workbook(&mut self, default: &Path) -> Result<PathBuf, CliError> {
        Ok(self.workbook.clone().unwrap_or_else(|| default.to_path_buf()))
    }

    fn sheet(&mut self, default: &str) -> Result<String, CliError> {
        Ok(self.sheet.clone().unwrap_or_else(|| default.to_owned()))
    }
}
