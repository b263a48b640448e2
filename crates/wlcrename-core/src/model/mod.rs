pub mod access_point;
pub mod change_row;
pub mod report;

pub use access_point::{AccessPointRecord, ApSummary};
pub use change_row::{ChangeRow, RowStatus};
pub use report::BatchReport;
