//! Blocking SSH command-session transport for Cisco wireless LAN controllers.
//!
//! Opens one PTY shell per controller, handles the AireOS in-shell login,
//! detects the exec prompt, and exchanges one command for one text
//! response at a time. Knows nothing about access points or spreadsheets;
//! `wlcrename-core` builds on top of it.

pub mod error;
pub mod prompt;
pub mod session;
pub mod transport;

pub use error::Error;
pub use session::SshSession;
pub use transport::{DEFAULT_PORT, DEFAULT_TIMEOUT, SessionConfig};
