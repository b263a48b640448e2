// wlcrename-core: change-list reconciliation and AP export on top of wlcrename-ssh.

pub mod batch;
pub mod controller;
pub mod dialect;
pub mod error;
pub mod executor;
pub mod model;
pub mod parser;
pub mod session;
pub mod validate;
pub mod workbook;

// ── Primary re-exports ──────────────────────────────────────────────
pub use batch::{BatchObserver, run_batch};
pub use controller::Controller;
pub use dialect::Dialect;
pub use error::CoreError;
pub use executor::{RenameExecutor, ResponseScan};
pub use model::{AccessPointRecord, ApSummary, BatchReport, ChangeRow, RowStatus};
pub use session::ControllerSession;
pub use validate::{normalize_name, validate_row, validate_rows};
pub use workbook::{
    DEFAULT_CHANGE_FILE, DEFAULT_EXPORT_FILE, DEFAULT_SHEET, RawChangeRow, load_change_rows,
    read_change_list, write_export,
};

// Transport types consumers need to open a session.
pub use wlcrename_ssh::{DEFAULT_PORT, DEFAULT_TIMEOUT, Error as SessionError, SessionConfig};
