//! Spreadsheet I/O for the change list and the AP export.
//!
//! Reading goes through `calamine` (xlsx, xlsm, xls, ods); the export is
//! written with `rust_xlsxwriter`. Columns are found by header text, so
//! operators can add notes columns anywhere.

use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use rust_xlsxwriter::{Format, Workbook, XlsxError};
use tracing::{debug, info};

use crate::error::CoreError;
use crate::model::ChangeRow;
use crate::validate::validate_row;

pub const CURRENT_NAME_HEADER: &str = "Current AP Name";
pub const NEW_NAME_HEADER: &str = "New AP Name";

pub const DEFAULT_CHANGE_FILE: &str = "rename_ap.xlsx";
pub const DEFAULT_SHEET: &str = "Sheet1";
pub const DEFAULT_EXPORT_FILE: &str = "Current_AP.xlsx";

const EXPORT_COLUMN_WIDTH: f64 = 32.0;

/// One data row as it appears in the sheet, before normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawChangeRow {
    pub current_name: String,
    pub new_name: String,
}

/// Read the `Current AP Name` / `New AP Name` columns from `sheet`.
///
/// The first row is the header. Missing or empty cells read as `""`.
/// An entirely empty sheet yields no rows.
pub fn read_change_list(path: &Path, sheet: &str) -> Result<Vec<RawChangeRow>, CoreError> {
    let shown = path.display().to_string();
    let mut workbook = open_workbook_auto(path).map_err(|e| CoreError::WorkbookOpen {
        path: shown.clone(),
        reason: e.to_string(),
    })?;

    let available = workbook.sheet_names();
    if !available.iter().any(|name| name == sheet) {
        return Err(CoreError::SheetNotFound {
            path: shown,
            sheet: sheet.to_owned(),
            available,
        });
    }

    let range = workbook
        .worksheet_range(sheet)
        .map_err(|e| CoreError::WorkbookOpen {
            path: shown.clone(),
            reason: e.to_string(),
        })?;

    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        debug!(path = %shown, sheet, "worksheet is empty");
        return Ok(Vec::new());
    };

    let column = |name: &str| {
        header
            .iter()
            .position(|cell| cell_text(Some(cell)).trim() == name)
            .ok_or_else(|| CoreError::MissingColumn {
                path: shown.clone(),
                sheet: sheet.to_owned(),
                column: name.to_owned(),
            })
    };
    let current_col = column(CURRENT_NAME_HEADER)?;
    let new_col = column(NEW_NAME_HEADER)?;

    let parsed: Vec<RawChangeRow> = rows
        .map(|cells| RawChangeRow {
            current_name: cell_text(cells.get(current_col)),
            new_name: cell_text(cells.get(new_col)),
        })
        .collect();

    info!(path = %shown, sheet, rows = parsed.len(), "change list loaded");
    Ok(parsed)
}

/// Read and validate a change list in one step.
pub fn load_change_rows(path: &Path, sheet: &str) -> Result<Vec<ChangeRow>, CoreError> {
    Ok(read_change_list(path, sheet)?
        .iter()
        .enumerate()
        .map(|(index, raw)| validate_row(index, &raw.current_name, &raw.new_name))
        .collect())
}

/// Write a single-column export: `Current AP Name` then one name per row.
pub fn write_export<S: AsRef<str>>(path: &Path, names: &[S]) -> Result<(), CoreError> {
    let write_err = |e: XlsxError| CoreError::WorkbookWrite {
        path: path.display().to_string(),
        reason: e.to_string(),
    };

    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(DEFAULT_SHEET).map_err(write_err)?;
    worksheet
        .set_column_width(0, EXPORT_COLUMN_WIDTH)
        .map_err(write_err)?;
    worksheet
        .write_string_with_format(0, 0, CURRENT_NAME_HEADER, &bold)
        .map_err(write_err)?;

    for (row, name) in (1u32..).zip(names) {
        worksheet
            .write_string(row, 0, name.as_ref())
            .map_err(write_err)?;
    }

    workbook.save(path).map_err(write_err)?;
    info!(path = %path.display(), rows = names.len(), "AP list exported");
    Ok(())
}

/// Cell contents as text. Whole floats drop their `.0`; error cells read as empty.
fn cell_text(cell: Option<&Data>) -> String {
    match cell {
        None | Some(Data::Empty | Data::Error(_)) => String::new(),
        Some(Data::String(s)) => s.clone(),
        Some(Data::Int(i)) => i.to_string(),
        Some(Data::Float(f)) if f.fract().abs() < f64::EPSILON && f.abs() < 1e15 => {
            format!("{f:.0}")
        }
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;
    use crate::model::RowStatus;

    fn write_sheet(dir: &TempDir, sheet: &str, rows: &[&[&str]]) -> std::path::PathBuf {
        let path = dir.path().join("changes.xlsx");
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(sheet).unwrap();
        for (r, cells) in (0u32..).zip(rows) {
            for (c, value) in (0u16..).zip(cells.iter()) {
                if !value.is_empty() {
                    worksheet.write_string(r, c, *value).unwrap();
                }
            }
        }
        workbook.save(&path).unwrap();
        path
    }

    #[test]
    fn reads_named_columns_in_any_position() {
        let dir = TempDir::new().unwrap();
        let path = write_sheet(
            &dir,
            "Sheet1",
            &[
                &["Notes", "New AP Name", "Current AP Name"],
                &["lobby", "LOBBY-01", "AP00A2.EE11.2233"],
                &["", "", "AP00A2.EE44.5566"],
            ],
        );

        let rows = read_change_list(&path, "Sheet1").unwrap();

        assert_eq!(
            rows,
            vec![
                RawChangeRow {
                    current_name: "AP00A2.EE11.2233".into(),
                    new_name: "LOBBY-01".into(),
                },
                RawChangeRow {
                    current_name: "AP00A2.EE44.5566".into(),
                    new_name: String::new(),
                },
            ]
        );
    }

    #[test]
    fn load_validates_each_row() {
        let dir = TempDir::new().unwrap();
        let path = write_sheet(
            &dir,
            "Renames",
            &[
                &["Current AP Name", "New AP Name"],
                &[" AP 1 ", "AP-1-NEW"],
                &["AP2", " AP2 "],
            ],
        );

        let rows = load_change_rows(&path, "Renames").unwrap();

        assert_eq!(rows[0].current_name, "AP1");
        assert_eq!(rows[0].status, RowStatus::Valid);
        assert_eq!(rows[1].status, RowStatus::ErrorNamesIdentical);
        assert_eq!(rows[1].sheet_row(), 3);
    }

    #[test]
    fn header_only_sheet_has_no_rows() {
        let dir = TempDir::new().unwrap();
        let path = write_sheet(&dir, "Sheet1", &[&["Current AP Name", "New AP Name"]]);
        assert!(load_change_rows(&path, "Sheet1").unwrap().is_empty());
    }

    #[test]
    fn blank_sheet_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        let path = write_sheet(&dir, "Sheet1", &[]);
        assert!(read_change_list(&path, "Sheet1").unwrap().is_empty());
    }

    #[test]
    fn missing_sheet_lists_available() {
        let dir = TempDir::new().unwrap();
        let path = write_sheet(&dir, "Data", &[&["Current AP Name", "New AP Name"]]);

        let err = read_change_list(&path, "Sheet1").unwrap_err();

        match err {
            CoreError::SheetNotFound { available, .. } => assert_eq!(available, vec!["Data"]),
            other => panic!("expected SheetNotFound, got {other:?}"),
        }
    }

    #[test]
    fn missing_column_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = write_sheet(&dir, "Sheet1", &[&["Current AP Name", "Name"], &["a", "b"]]);

        let err = read_change_list(&path, "Sheet1").unwrap_err();

        assert!(matches!(
            err,
            CoreError::MissingColumn { ref column, .. } if column == NEW_NAME_HEADER
        ));
    }

    #[test]
    fn missing_file_is_open_error() {
        let dir = TempDir::new().unwrap();
        let err = read_change_list(&dir.path().join("nope.xlsx"), "Sheet1").unwrap_err();
        assert!(matches!(err, CoreError::WorkbookOpen { .. }));
    }

    #[test]
    fn export_reads_back_as_single_column() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Current_AP.xlsx");

        write_export(&path, &["AP-East-01", "AP-West-02", "AP-East-01"]).unwrap();

        let mut workbook = open_workbook_auto(&path).unwrap();
        let range = workbook.worksheet_range(DEFAULT_SHEET).unwrap();
        let column: Vec<String> = range.rows().map(|r| cell_text(r.first())).collect();
        assert_eq!(
            column,
            vec!["Current AP Name", "AP-East-01", "AP-West-02", "AP-East-01"]
        );
    }

    #[test]
    fn whole_floats_lose_decimal_point() {
        assert_eq!(cell_text(Some(&Data::Float(1234.0))), "1234");
        assert_eq!(cell_text(Some(&Data::Float(1.5))), "1.5");
        assert_eq!(cell_text(Some(&Data::Int(7))), "7");
        assert_eq!(cell_text(None), "");
    }
}
