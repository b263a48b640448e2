//! Output formatting: table, JSON, YAML, plain.
//!
//! Renders data in the format selected by `--output`. Table uses `tabled`,
//! structured formats use serde, plain emits one value per line.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use serde::Serialize;
use tabled::{Table, Tabled, settings::Style};

use wlcrename_core::{AccessPointRecord, BatchReport, ChangeRow, RowStatus};

use crate::cli::{ColorMode, OutputFormat};

// ── Color helpers ───────────────────────────────────────────────────

/// Determine whether color output should be enabled.
pub fn should_color(mode: &ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

/// Row status text, green when the row is still good and red otherwise.
pub fn paint_status(status: RowStatus, color: bool) -> String {
    let text = status.description();
    if !color {
        return text.to_owned();
    }
    if status.is_error() {
        text.red().to_string()
    } else {
        text.green().to_string()
    }
}

// ── Render dispatchers ──────────────────────────────────────────────

/// Render a list of serde-serializable + tabled items in the chosen format.
pub fn render_list<T, R>(
    format: &OutputFormat,
    data: &[T],
    to_row: impl Fn(&T) -> R,
    id_fn: impl Fn(&T) -> String,
) -> String
where
    T: Serialize,
    R: Tabled,
{
    match format {
        OutputFormat::Table => {
            let rows: Vec<R> = data.iter().map(to_row).collect();
            render_table(&rows)
        }
        OutputFormat::Json => render_json(data, false),
        OutputFormat::JsonCompact => render_json(data, true),
        OutputFormat::Yaml => render_yaml(data),
        OutputFormat::Plain => data.iter().map(&id_fn).collect::<Vec<_>>().join("\n"),
    }
}

/// Render a single serde-serializable item in the chosen format.
pub fn render_single<T>(
    format: &OutputFormat,
    data: &T,
    detail_fn: impl Fn(&T) -> String,
    id_fn: impl Fn(&T) -> String,
) -> String
where
    T: Serialize,
{
    match format {
        OutputFormat::Table => detail_fn(data),
        OutputFormat::Json => render_json(data, false),
        OutputFormat::JsonCompact => render_json(data, true),
        OutputFormat::Yaml => render_yaml(data),
        OutputFormat::Plain => id_fn(data),
    }
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

// ── Access points ───────────────────────────────────────────────────

#[derive(Tabled)]
struct ApRow {
    #[tabled(rename = "AP Name")]
    name: String,
    #[tabled(rename = "Slots")]
    slots: u8,
    #[tabled(rename = "Model")]
    model: String,
    #[tabled(rename = "MAC")]
    mac: String,
}

fn ap_row(ap: &AccessPointRecord) -> ApRow {
    ApRow {
        name: ap.name.clone(),
        slots: ap.slots,
        model: ap.model.clone(),
        mac: ap.mac.clone(),
    }
}

pub fn render_access_points(format: &OutputFormat, aps: &[AccessPointRecord]) -> String {
    render_list(format, aps, ap_row, |ap| ap.name.clone())
}

// ── Rename reports ──────────────────────────────────────────────────

#[derive(Tabled)]
struct ChangeRowView {
    #[tabled(rename = "Row")]
    row: usize,
    #[tabled(rename = "Current AP Name")]
    current: String,
    #[tabled(rename = "New AP Name")]
    new: String,
    #[tabled(rename = "Status")]
    status: String,
}

fn change_row_view(row: &ChangeRow, color: bool) -> ChangeRowView {
    ChangeRowView {
        row: row.sheet_row(),
        current: row.current_name.clone(),
        new: row.new_name.clone(),
        status: paint_status(row.status, color),
    }
}

/// Rows of a change list, e.g. for a dry run.
pub fn render_change_rows(format: &OutputFormat, rows: &[ChangeRow], color: bool) -> String {
    render_list(
        format,
        rows,
        |row| change_row_view(row, color),
        |row| {
            format!(
                "{}\t{}\t{}",
                row.current_name,
                row.new_name,
                row.status.description()
            )
        },
    )
}

/// The operator-facing error line for one failed row.
pub fn row_error_line(row: &ChangeRow) -> String {
    format!(
        "{}: Error with row - {}",
        row.sheet_row(),
        row.status.description()
    )
}

/// Human-readable run time, e.g. `0:01:07.250`.
pub fn format_elapsed(elapsed: chrono::TimeDelta) -> String {
    let millis = elapsed.num_milliseconds().max(0);
    let secs = millis / 1000;
    format!(
        "{}:{:02}:{:02}.{:03}",
        secs / 3600,
        (secs / 60) % 60,
        secs % 60,
        millis % 1000
    )
}

/// The closing summary of a rename batch.
///
/// Table output gets the classic summary text (with a table of the failed
/// rows); structured formats get the whole report.
pub fn render_report(format: &OutputFormat, report: &BatchReport, color: bool) -> String {
    render_single(
        format,
        report,
        |report| summary_text(report, color),
        |report| {
            report
                .failures()
                .map(row_error_line)
                .collect::<Vec<_>>()
                .join("\n")
        },
    )
}

fn summary_text(report: &BatchReport, color: bool) -> String {
    use std::fmt::Write;
    let mut out = String::new();

    let _ = writeln!(out, "Summarizing failed rows:");
    let failed: Vec<ChangeRowView> = report
        .failures()
        .map(|row| change_row_view(row, color))
        .collect();
    if !failed.is_empty() {
        let _ = writeln!(out, "{}", render_table(&failed));
    }
    let _ = writeln!(
        out,
        "Total failed AP name changes: {}",
        report.failure_count()
    );
    let _ = write!(
        out,
        "Successful AP name changes: {}",
        report.success_count()
    );
    out
}

// ── Format-specific renderers ───────────────────────────────────────

fn render_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

/// Pretty-printed JSON.
fn render_json_pretty<T: Serialize + ?Sized>(data: &T) -> String {
    serde_json::to_string_pretty(data).expect("serialization should not fail")
}

/// Compact single-line JSON.
fn render_json_compact<T: Serialize + ?Sized>(data: &T) -> String {
    serde_json::to_string(data).expect("serialization should not fail")
}

fn render_json<T: Serialize + ?Sized>(data: &T, compact: bool) -> String {
    if compact {
        render_json_compact(data)
    } else {
        render_json_pretty(data)
    }
}

/// YAML output.
fn render_yaml<T: Serialize + ?Sized>(data: &T) -> String {
    serde_yaml::to_string(data).expect("serialization should not fail")
}
