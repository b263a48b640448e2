//! Clap derive structures for the `wlcrename` CLI.
//!
//! Only clap and clap_complete are used here so `build.rs` can include
//! this file to render man pages.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// wlcrename -- export and bulk-rename access points on Cisco WLCs
#[derive(Debug, Parser)]
#[command(
    name = "wlcrename",
    version,
    about = "Export and bulk-rename access points on Cisco wireless LAN controllers",
    long_about = "Connects to a Cisco wireless LAN controller over SSH and either exports\n\
        the names of the joined access points to an Excel workbook, or renames\n\
        access points from a `Current AP Name` / `New AP Name` workbook.\n\n\
        Run without a subcommand for the interactive menu.",
    propagate_version = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Option<Command>,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Controller profile to use
    #[arg(long, short = 'p', env = "WLC_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Controller hostname or IP address (overrides profile)
    #[arg(long, short = 'H', env = "WLC_HOST", global = true)]
    pub host: Option<String>,

    /// SSH port
    #[arg(long, env = "WLC_PORT", global = true)]
    pub port: Option<u16>,

    /// SSH username
    #[arg(long, short = 'u', env = "WLC_USERNAME", global = true)]
    pub username: Option<String>,

    /// SSH password
    #[arg(long, env = "WLC_PASSWORD", global = true, hide_env_values = true)]
    pub password: Option<String>,

    /// Controller CLI dialect (detected from the prompt when omitted)
    #[arg(long, env = "WLC_DIALECT", global = true)]
    pub dialect: Option<DialectArg>,

    /// Per-read timeout in seconds
    #[arg(long, env = "WLC_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "WLC_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

// ── Value Enums ──────────────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DialectArg {
    /// Catalyst 9800 (IOS-XE), `#` prompt
    #[value(name = "iosxe")]
    IosXe,
    /// Legacy AireOS controllers, `>` prompt
    #[value(name = "aireos")]
    AireOs,
}

// ── Commands ─────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Export the names of the joined access points to an Excel workbook
    #[command(alias = "x")]
    Export(ExportArgs),

    /// Rename access points from an Excel workbook
    #[command(alias = "r")]
    Rename(RenameArgs),

    /// Prompt for everything and pick the task from a menu
    #[command(alias = "menu")]
    Interactive,

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Workbook to write [default: Current_AP.xlsx]
    #[arg(long, short = 'f')]
    pub file: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct RenameArgs {
    /// Change-list workbook [default: rename_ap.xlsx]
    #[arg(long, short = 'f')]
    pub file: Option<PathBuf>,

    /// Worksheet holding the change list [default: Sheet1]
    #[arg(long, short = 's')]
    pub sheet: Option<String>,

    /// Also treat the word "invalid" in a response as a rejection
    #[arg(long)]
    pub strict_scan: bool,

    /// Validate the workbook and show what would be sent, without connecting
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Interactive configuration wizard
    Init,

    /// Display current configuration (secrets masked)
    Show,

    /// List configured profiles
    Profiles,

    /// Store a profile password in the system keyring
    SetPassword {
        /// Profile to update [default: active profile]
        #[arg(long)]
        profile: Option<String>,
    },
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
