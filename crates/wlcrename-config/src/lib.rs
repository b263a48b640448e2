//! Shared configuration for wlcrename.
//!
//! TOML profiles, credential resolution (env + keyring + plaintext),
//! and translation to `wlcrename_core::SessionConfig`. The CLI layers its
//! flag overrides and interactive prompts on top of this.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use wlcrename_core::{
    DEFAULT_CHANGE_FILE, DEFAULT_EXPORT_FILE, DEFAULT_PORT, DEFAULT_SHEET, Dialect, ResponseScan,
    SessionConfig,
};

/// Keyring service name; entries are keyed `{profile}/password`.
pub const KEYRING_SERVICE: &str = "wlcrename";

pub const PASSWORD_ENV: &str = "WLC_PASSWORD";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no credentials configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("keyring error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named controller profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Change-list workbook used by `rename`.
    #[serde(default = "default_workbook")]
    pub workbook: PathBuf,

    #[serde(default = "default_sheet")]
    pub sheet: String,

    /// Workbook written by `export`.
    #[serde(default = "default_export_file")]
    pub export_file: PathBuf,

    #[serde(default)]
    pub scan: ResponseScan,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            timeout: default_timeout(),
            workbook: default_workbook(),
            sheet: default_sheet(),
            export_file: default_export_file(),
            scan: ResponseScan::default(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    30
}
fn default_workbook() -> PathBuf {
    DEFAULT_CHANGE_FILE.into()
}
fn default_sheet() -> String {
    DEFAULT_SHEET.into()
}
fn default_export_file() -> PathBuf {
    DEFAULT_EXPORT_FILE.into()
}

/// A named controller profile.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Profile {
    /// Controller hostname or IP address.
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// SSH username.
    pub username: Option<String>,

    /// Plaintext password; prefer the keyring or `WLC_PASSWORD`.
    pub password: Option<String>,

    /// Force a dialect instead of detecting it from the prompt.
    pub dialect: Option<Dialect>,

    /// Override timeout.
    pub timeout: Option<u64>,

    /// Override the change-list workbook.
    pub workbook: Option<PathBuf>,

    /// Override the change-list sheet.
    pub sheet: Option<String>,

    /// Override the export workbook.
    pub export_file: Option<PathBuf>,

    /// Override how rename responses are judged.
    pub scan: Option<ResponseScan>,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

impl Profile {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: DEFAULT_PORT,
            username: None,
            password: None,
            dialect: None,
            timeout: None,
            workbook: None,
            sheet: None,
            export_file: None,
            scan: None,
        }
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "wlcrename", "wlcrename").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("wlcrename");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    let path = config_path();

    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(&path))
        .merge(Env::prefixed("WLC_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

/// Parse a config document directly (no file or env layering).
pub fn parse_config(toml_str: &str) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::string(toml_str));
    Ok(figment.extract()?)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(&path, toml_str)?;
    Ok(())
}

// ── Credential resolution ───────────────────────────────────────────

fn keyring_key(profile_name: &str) -> String {
    format!("{profile_name}/password")
}

fn keyring_password(profile_name: &str) -> Option<String> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, &keyring_key(profile_name)).ok()?;
    match entry.get_password() {
        Ok(pw) => Some(pw),
        Err(err) => {
            debug!(profile = profile_name, error = %err, "no keyring password");
            None
        }
    }
}

/// Store a profile password in the system keyring.
pub fn store_password(profile_name: &str, password: &str) -> Result<(), ConfigError> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, &keyring_key(profile_name))?;
    entry.set_password(password)?;
    Ok(())
}

/// Resolve the SSH password: `WLC_PASSWORD`, keyring, then plaintext.
pub fn resolve_password(
    profile: &Profile,
    profile_name: &str,
) -> Result<SecretString, ConfigError> {
    password_chain(
        profile,
        profile_name,
        |var| std::env::var(var).ok(),
        keyring_password,
    )
}

fn password_chain(
    profile: &Profile,
    profile_name: &str,
    env: impl Fn(&str) -> Option<String>,
    keyring: impl Fn(&str) -> Option<String>,
) -> Result<SecretString, ConfigError> {
    // 1. Env var
    if let Some(pw) = env(PASSWORD_ENV) {
        return Ok(SecretString::from(pw));
    }

    // 2. Keyring
    if let Some(pw) = keyring(profile_name) {
        return Ok(SecretString::from(pw));
    }

    // 3. Plaintext in config
    if let Some(ref pw) = profile.password {
        return Ok(SecretString::from(pw.clone()));
    }

    Err(ConfigError::NoCredentials {
        profile: profile_name.into(),
    })
}

/// Build a `SessionConfig` from a profile and already-resolved credentials.
pub fn session_config(
    profile: &Profile,
    username: String,
    password: SecretString,
    default_timeout: u64,
) -> Result<SessionConfig, ConfigError> {
    if profile.host.trim().is_empty() {
        return Err(ConfigError::Validation {
            field: "host".into(),
            reason: "controller address cannot be empty".into(),
        });
    }
    let timeout = Duration::from_secs(profile.timeout.unwrap_or(default_timeout));
    Ok(SessionConfig::new(profile.host.trim(), username, password)
        .with_port(profile.port)
        .with_timeout(timeout))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use secrecy::ExposeSecret;

    use super::*;

    const SAMPLE: &str = r#"
default_profile = "lab"

[defaults]
timeout = 45
sheet = "Renames"

[profiles.lab]
host = "10.20.30.40"
username = "netops"
dialect = "aireos"
scan = "strict"

[profiles.campus]
host = "wlc.campus.example"
port = 2222
password = "plain"
"#;

    #[test]
    fn parses_profiles_and_fills_defaults() {
        let cfg = parse_config(SAMPLE).unwrap();

        assert_eq!(cfg.default_profile.as_deref(), Some("lab"));
        assert_eq!(cfg.defaults.timeout, 45);
        assert_eq!(cfg.defaults.sheet, "Renames");
        assert_eq!(cfg.defaults.workbook, PathBuf::from("rename_ap.xlsx"));
        assert_eq!(cfg.defaults.export_file, PathBuf::from("Current_AP.xlsx"));

        let lab = &cfg.profiles["lab"];
        assert_eq!(lab.port, 22);
        assert_eq!(lab.dialect, Some(Dialect::AireOs));
        assert_eq!(lab.scan, Some(ResponseScan::Strict));
        assert_eq!(cfg.profiles["campus"].port, 2222);
    }

    #[test]
    fn empty_document_is_default_config() {
        let cfg = parse_config("").unwrap();
        assert!(cfg.profiles.is_empty());
        assert_eq!(cfg.defaults.timeout, 30);
        assert_eq!(cfg.defaults.scan, ResponseScan::ErrorMarker);
    }

    #[test]
    fn password_chain_prefers_env_then_keyring_then_plaintext() {
        let mut profile = Profile::new("wlc");
        profile.password = Some("plain".into());

        let from_env = password_chain(&profile, "p", |_| Some("env".into()), |_| Some("kr".into()));
        assert_eq!(from_env.unwrap().expose_secret(), "env");

        let from_keyring = password_chain(&profile, "p", |_| None, |_| Some("kr".into()));
        assert_eq!(from_keyring.unwrap().expose_secret(), "kr");

        let from_file = password_chain(&profile, "p", |_| None, |_| None);
        assert_eq!(from_file.unwrap().expose_secret(), "plain");
    }

    #[test]
    fn password_chain_without_sources_is_no_credentials() {
        let profile = Profile::new("wlc");
        let err = password_chain(&profile, "lab", |_| None, |_| None).unwrap_err();
        assert!(matches!(err, ConfigError::NoCredentials { ref profile } if profile == "lab"));
    }

    #[test]
    fn session_config_applies_port_and_timeout() {
        let mut profile = Profile::new(" 10.0.0.9 ");
        profile.port = 2200;
        let cfg = session_config(
            &profile,
            "admin".into(),
            SecretString::from("pw".to_owned()),
            12,
        )
        .unwrap();

        assert_eq!(cfg.host, "10.0.0.9");
        assert_eq!(cfg.port, 2200);
        assert_eq!(cfg.timeout, Duration::from_secs(12));
    }

    #[test]
    fn session_config_rejects_blank_host() {
        let profile = Profile::new("  ");
        let err = session_config(&profile, "a".into(), SecretString::from("b".to_owned()), 30)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Validation { .. }));
    }
}
