//! Config subcommand handlers.

use std::collections::HashMap;
use std::fmt::Write;

use dialoguer::{Input, Select};

use wlcrename_core::{DEFAULT_PORT, Dialect};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config, Defaults, Profile};
use crate::error::CliError;
use crate::output;
use crate::prompt::prompt_err;

// ── Helpers ─────────────────────────────────────────────────────────

/// Format config for display, masking sensitive fields.
fn format_config_redacted(cfg: &Config) -> String {
    let mut out = String::new();

    if let Some(ref default) = cfg.default_profile {
        let _ = writeln!(out, "default_profile = \"{default}\"");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "[defaults]");
    let _ = writeln!(out, "output = \"{}\"", cfg.defaults.output);
    let _ = writeln!(out, "color = \"{}\"", cfg.defaults.color);
    let _ = writeln!(out, "timeout = {}", cfg.defaults.timeout);
    let _ = writeln!(out, "workbook = \"{}\"", cfg.defaults.workbook.display());
    let _ = writeln!(out, "sheet = \"{}\"", cfg.defaults.sheet);
    let _ = writeln!(
        out,
        "export_file = \"{}\"",
        cfg.defaults.export_file.display()
    );
    let _ = writeln!(out, "scan = \"{}\"", cfg.defaults.scan);

    let mut names: Vec<_> = cfg.profiles.keys().collect();
    names.sort();
    for name in names {
        let p = &cfg.profiles[name];
        let _ = writeln!(out);
        let _ = writeln!(out, "[profiles.{name}]");
        let _ = writeln!(out, "host = \"{}\"", p.host);
        let _ = writeln!(out, "port = {}", p.port);
        if let Some(ref u) = p.username {
            let _ = writeln!(out, "username = \"{u}\"");
        }
        if p.password.is_some() {
            let _ = writeln!(out, "password = \"****\"");
        }
        if let Some(dialect) = p.dialect {
            let _ = writeln!(out, "dialect = \"{dialect}\"");
        }
        if let Some(timeout) = p.timeout {
            let _ = writeln!(out, "timeout = {timeout}");
        }
        if let Some(ref wb) = p.workbook {
            let _ = writeln!(out, "workbook = \"{}\"", wb.display());
        }
        if let Some(ref sheet) = p.sheet {
            let _ = writeln!(out, "sheet = \"{sheet}\"");
        }
        if let Some(ref export) = p.export_file {
            let _ = writeln!(out, "export_file = \"{}\"", export.display());
        }
        if let Some(scan) = p.scan {
            let _ = writeln!(out, "scan = \"{scan}\"");
        }
    }

    out
}

/// Ask where the password should live. `Some` means plaintext in the config.
fn prompt_password_storage(
    profile_name: &str,
    password: String,
) -> Result<Option<String>, CliError> {
    let choices = &[
        "Store in system keyring (recommended)",
        "Save to config file (plaintext)",
        "Don't store it, ask every time",
    ];
    let selection = Select::new()
        .with_prompt("Where to store the password?")
        .items(choices)
        .default(0)
        .interact()
        .map_err(prompt_err)?;

    match selection {
        0 => {
            wlcrename_config::store_password(profile_name, &password)?;
            eprintln!("   ✓ Password stored in system keyring");
            Ok(None)
        }
        1 => Ok(Some(password)),
        _ => Ok(None),
    }
}

/// Replace plaintext passwords before the config is rendered in any format.
fn masked(mut cfg: Config) -> Config {
    for profile in cfg.profiles.values_mut() {
        if profile.password.is_some() {
            profile.password = Some("****".into());
        }
    }
    cfg
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Init => init(),

        ConfigCommand::Show => {
            let cfg = masked(config::load_config_or_default());
            let out = output::render_single(&global.output, &cfg, format_config_redacted, |_| {
                config::config_path().display().to_string()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::Profiles => {
            let cfg = config::load_config_or_default();
            let default = cfg.default_profile.as_deref().unwrap_or("default");
            if cfg.profiles.is_empty() {
                eprintln!("No profiles configured. Run: wlcrename config init");
            } else {
                let mut names: Vec<_> = cfg.profiles.keys().collect();
                names.sort();
                for name in names {
                    let marker = if name == default { " *" } else { "" };
                    println!("{name}{marker}");
                }
            }
            Ok(())
        }

        ConfigCommand::SetPassword { profile } => {
            let cfg = config::load_config_or_default();
            let profile_name = profile.unwrap_or_else(|| config::active_profile_name(global, &cfg));
            let password = rpassword::prompt_password("Password: ").map_err(prompt_err)?;
            if password.is_empty() {
                return Err(CliError::Validation {
                    field: "password".into(),
                    reason: "password cannot be empty".into(),
                });
            }
            wlcrename_config::store_password(&profile_name, &password)?;
            eprintln!("✓ Password for profile '{profile_name}' stored in system keyring");
            Ok(())
        }
    }
}

/// Interactive wizard: writes a fresh config with one profile.
fn init() -> Result<(), CliError> {
    let config_path = config::config_path();
    eprintln!("wlcrename configuration wizard");
    eprintln!("   Config path: {}\n", config_path.display());

    // 1. Profile name
    let profile_name: String = Input::new()
        .with_prompt("Profile name")
        .default("default".into())
        .interact_text()
        .map_err(prompt_err)?;

    // 2. Controller
    let host: String = Input::new()
        .with_prompt("Controller hostname or IP")
        .interact_text()
        .map_err(prompt_err)?;
    let port: u16 = Input::new()
        .with_prompt("SSH port")
        .default(DEFAULT_PORT)
        .interact_text()
        .map_err(prompt_err)?;

    // 3. Dialect
    let dialect_choices = &[
        "Detect from prompt (recommended)",
        "IOS-XE (Catalyst 9800)",
        "AireOS",
    ];
    let dialect = match Select::new()
        .with_prompt("Controller type")
        .items(dialect_choices)
        .default(0)
        .interact()
        .map_err(prompt_err)?
    {
        1 => Some(Dialect::IosXe),
        2 => Some(Dialect::AireOs),
        _ => None,
    };

    // 4. Credentials
    let username: String = Input::new()
        .with_prompt("Username")
        .interact_text()
        .map_err(prompt_err)?;
    let password = rpassword::prompt_password("Password (empty to skip): ").map_err(prompt_err)?;
    let password = if password.is_empty() {
        None
    } else {
        prompt_password_storage(&profile_name, password)?
    };

    // 5. Build profile and config
    let mut profile = Profile::new(host.trim());
    profile.port = port;
    profile.username = Some(username.trim().to_owned()).filter(|u| !u.is_empty());
    profile.password = password;
    profile.dialect = dialect;

    let mut profiles = HashMap::new();
    profiles.insert(profile_name.clone(), profile);

    let cfg = Config {
        default_profile: Some(profile_name.clone()),
        defaults: Defaults::default(),
        profiles,
    };

    // 6. Write config
    config::save_config(&cfg)?;

    eprintln!("\n✓ Configuration written to {}", config_path.display());
    eprintln!("  Active profile: {profile_name}");
    eprintln!("\n  Test it: wlcrename export");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn redacted_config_masks_password() {
        let mut profile = Profile::new("10.0.0.5");
        profile.username = Some("netops".into());
        profile.password = Some("hunter2".into());
        profile.dialect = Some(Dialect::AireOs);
        let cfg = Config {
            default_profile: Some("lab".into()),
            defaults: Defaults::default(),
            profiles: HashMap::from([("lab".to_owned(), profile)]),
        };

        let text = format_config_redacted(&cfg);

        assert!(text.contains("[profiles.lab]"));
        assert!(text.contains("host = \"10.0.0.5\""));
        assert!(text.contains("dialect = \"aireos\""));
        assert!(text.contains("password = \"****\""));
        assert!(!text.contains("hunter2"));
    }

    #[test]
    fn structured_output_is_masked_too() {
        let mut profile = Profile::new("wlc");
        profile.password = Some("hunter2".into());
        let cfg = Config {
            default_profile: None,
            defaults: Defaults::default(),
            profiles: HashMap::from([("p".to_owned(), profile)]),
        };

        let json = serde_json::to_string(&masked(cfg)).unwrap();

        assert!(json.contains("****"));
        assert!(!json.contains("hunter2"));
    }
}
