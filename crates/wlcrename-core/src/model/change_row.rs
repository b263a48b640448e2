// ── Rename work items ──

use serde::Serialize;

/// Spreadsheet rows above the first data row: one header, plus 1-based display.
const SHEET_ROW_OFFSET: usize = 2;

/// Lifecycle of one change-list row.
///
/// `Pending` until validated; `Valid` rows may later become
/// `ErrorDeviceRejected`. Every other variant is final at validation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowStatus {
    Pending,
    Valid,
    ErrorNewNameMissing,
    ErrorNamesIdentical,
    ErrorCurrentNameMissing,
    ErrorDeviceRejected,
}

impl RowStatus {
    pub fn is_valid(self) -> bool {
        matches!(self, Self::Valid)
    }

    pub fn is_error(self) -> bool {
        !matches!(self, Self::Pending | Self::Valid)
    }

    /// Operator-facing text printed next to the row number.
    pub fn description(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Valid => "OK",
            Self::ErrorNewNameMissing => "Data Error: New AP Name not defined",
            Self::ErrorNamesIdentical => {
                "Data Error: Current AP Name and New AP Name is the same"
            }
            Self::ErrorCurrentNameMissing => "Data Error: Current AP Name not defined",
            Self::ErrorDeviceRejected => "AP is not connected to network.",
        }
    }
}

impl std::fmt::Display for RowStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.description())
    }
}

/// One unit of rename work, derived from one spreadsheet row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeRow {
    /// Zero-based position among the data rows of the sheet.
    pub row_index: usize,
    /// Whitespace-free current name.
    pub current_name: String,
    /// Whitespace-free new name.
    pub new_name: String,
    pub status: RowStatus,
    /// Raw controller output, kept only when the controller rejected the rename.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
}

impl ChangeRow {
    /// A row that has not been validated yet.
    pub fn pending(
        row_index: usize,
        current_name: impl Into<String>,
        new_name: impl Into<String>,
    ) -> Self {
        Self {
            row_index,
            current_name: current_name.into(),
            new_name: new_name.into(),
            status: RowStatus::Pending,
            response: None,
        }
    }

    /// Row number as the operator sees it in the spreadsheet.
    pub fn sheet_row(&self) -> usize {
        self.row_index + SHEET_ROW_OFFSET
    }

    pub fn is_valid(&self) -> bool {
        self.status.is_valid()
    }

    /// Record a controller rejection along with its output.
    pub(crate) fn reject(&mut self, response: String) {
        self.status = RowStatus::ErrorDeviceRejected;
        self.response = Some(response);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sheet_row_accounts_for_header() {
        assert_eq!(ChangeRow::pending(0, "a", "b").sheet_row(), 2);
        assert_eq!(ChangeRow::pending(41, "a", "b").sheet_row(), 43);
    }

    #[test]
    fn reject_keeps_response() {
        let mut row = ChangeRow::pending(3, "AP1", "AP2");
        row.status = RowStatus::Valid;
        row.reject("% Error: AP not found".into());
        assert_eq!(row.status, RowStatus::ErrorDeviceRejected);
        assert_eq!(row.response.as_deref(), Some("% Error: AP not found"));
        assert!(row.status.is_error());
    }

    #[test]
    fn pending_and_valid_are_not_errors() {
        assert!(!RowStatus::Pending.is_error());
        assert!(!RowStatus::Valid.is_error());
        assert!(RowStatus::ErrorNamesIdentical.is_error());
    }
}
