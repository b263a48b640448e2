//! CLI configuration: a thin layer over `wlcrename_config`.
//!
//! Each connection setting resolves flag (or its `WLC_` env var), then the
//! active profile, then an operator prompt.

use std::path::PathBuf;

use secrecy::SecretString;

use wlcrename_core::{DEFAULT_PORT, Dialect, ResponseScan, SessionConfig};

use crate::cli::{DialectArg, GlobalOpts};
use crate::error::CliError;
use crate::prompt::InputProvider;

// ── Re-exports from shared crate ────────────────────────────────────

pub use wlcrename_config::{
    Config, Defaults, Profile, config_path, load_config_or_default, save_config,
};

impl From<DialectArg> for Dialect {
    fn from(arg: DialectArg) -> Self {
        match arg {
            DialectArg::IosXe => Dialect::IosXe,
            DialectArg::AireOs => Dialect::AireOs,
        }
    }
}

/// Everything a run needs once flags, profile and prompts are merged.
#[derive(Debug)]
pub struct Target {
    pub profile_name: String,
    pub session: SessionConfig,
    /// `None` means detect from the prompt.
    pub dialect: Option<Dialect>,
    pub files: FileSettings,
}

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

fn available_profiles(config: &Config) -> String {
    let mut names: Vec<_> = config.profiles.keys().cloned().collect();
    if names.is_empty() {
        return "(none)".into();
    }
    names.sort();
    names.join(", ")
}

/// Spreadsheet settings; these never need a connection or a prompt.
#[derive(Debug, Clone)]
pub struct FileSettings {
    pub workbook: PathBuf,
    pub sheet: String,
    pub export_file: PathBuf,
    pub scan: ResponseScan,
}

/// Active profile overrides, falling back to `[defaults]`.
pub fn resolve_files(global: &GlobalOpts, config: &Config) -> FileSettings {
    let profile = config.profiles.get(&active_profile_name(global, config));
    let defaults = &config.defaults;
    FileSettings {
        workbook: profile
            .and_then(|p| p.workbook.clone())
            .unwrap_or_else(|| defaults.workbook.clone()),
        sheet: profile
            .and_then(|p| p.sheet.clone())
            .unwrap_or_else(|| defaults.sheet.clone()),
        export_file: profile
            .and_then(|p| p.export_file.clone())
            .unwrap_or_else(|| defaults.export_file.clone()),
        scan: profile.and_then(|p| p.scan).unwrap_or(defaults.scan),
    }
}

/// Merge flags, the active profile and prompts into a [`Target`].
///
/// Prompts are asked in the order host, username, password, and only for
/// values nothing else supplied.
pub fn resolve_target(
    global: &GlobalOpts,
    config: &Config,
    inputs: &mut dyn InputProvider,
) -> Result<Target, CliError> {
    let profile_name = active_profile_name(global, config);
    let profile = config.profiles.get(&profile_name);

    // An explicitly requested profile has to exist.
    if profile.is_none() && global.profile.is_some() {
        return Err(CliError::ProfileNotFound {
            name: profile_name,
            available: available_profiles(config),
        });
    }

    // 1. Host
    let host = match global.host.clone().or_else(|| profile.map(|p| p.host.clone())) {
        Some(host) => host,
        None => inputs.host()?,
    };

    // 2. Username
    let username = match global
        .username
        .clone()
        .or_else(|| profile.and_then(|p| p.username.clone()))
    {
        Some(user) => user,
        None => inputs.username()?,
    };

    // 3. Password: flag / WLC_PASSWORD, keyring, plaintext, prompt
    let password = resolve_password(global, profile, &profile_name, inputs)?;

    // 4. Connection tuning
    let mut effective = profile.cloned().unwrap_or_else(|| Profile::new(host.clone()));
    effective.host = host;
    effective.port = global.port.or(profile.map(|p| p.port)).unwrap_or(DEFAULT_PORT);
    if let Some(timeout) = global.timeout {
        effective.timeout = Some(timeout);
    }
    let session =
        wlcrename_config::session_config(&effective, username, password, config.defaults.timeout)?;

    Ok(Target {
        session,
        dialect: global.dialect.map(Dialect::from).or(effective.dialect),
        files: resolve_files(global, config),
        profile_name,
    })
}

fn resolve_password(
    global: &GlobalOpts,
    profile: Option<&Profile>,
    profile_name: &str,
    inputs: &mut dyn InputProvider,
) -> Result<SecretString, CliError> {
    if let Some(ref pass) = global.password {
        return Ok(SecretString::from(pass.clone()));
    }
    if let Some(profile) = profile {
        match wlcrename_config::resolve_password(profile, profile_name) {
            Ok(secret) => return Ok(secret),
            Err(wlcrename_config::ConfigError::NoCredentials { .. }) => {}
            Err(other) => return Err(other.into()),
        }
    }
    inputs.password()
}
