//! Row validation: raw spreadsheet pairs in, classified `ChangeRow`s out.
//!
//! Names are stripped of every whitespace character before they are
//! compared or used in a command. Checks run in a fixed order, so a row
//! with both names blank reports the missing *new* name.

use crate::model::{ChangeRow, RowStatus};

/// Remove all whitespace, including inner spaces and tabs.
pub fn normalize_name(raw: &str) -> String {
    raw.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Classify a pair of already-normalized names.
pub fn classify(current_name: &str, new_name: &str) -> RowStatus {
    if new_name.is_empty() {
        RowStatus::ErrorNewNameMissing
    } else if current_name == new_name {
        RowStatus::ErrorNamesIdentical
    } else if current_name.is_empty() {
        RowStatus::ErrorCurrentNameMissing
    } else {
        RowStatus::Valid
    }
}

/// Normalize and classify one raw row.
pub fn validate_row(row_index: usize, raw_current: &str, raw_new: &str) -> ChangeRow {
    let mut row = ChangeRow::pending(
        row_index,
        normalize_name(raw_current),
        normalize_name(raw_new),
    );
    row.status = classify(&row.current_name, &row.new_name);
    row
}

/// Validate pairs in order; `row_index` is the position in the input.
pub fn validate_rows<I, C, N>(pairs: I) -> Vec<ChangeRow>
where
    I: IntoIterator<Item = (C, N)>,
    C: AsRef<str>,
    N: AsRef<str>,
{
    pairs
        .into_iter()
        .enumerate()
        .map(|(index, (current, new))| validate_row(index, current.as_ref(), new.as_ref()))
        .collect()
}
