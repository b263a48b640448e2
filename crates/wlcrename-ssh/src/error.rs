use std::io;

use thiserror::Error;

// libssh2 session error codes we branch on. `ssh2` only exposes the raw
// integer through `ErrorCode::Session`.
const LIBSSH2_ERROR_BANNER_RECV: i32 = -2;
const LIBSSH2_ERROR_SOCKET_SEND: i32 = -7;
const LIBSSH2_ERROR_TIMEOUT: i32 = -9;
const LIBSSH2_ERROR_SOCKET_DISCONNECT: i32 = -13;
const LIBSSH2_ERROR_AUTHENTICATION_FAILED: i32 = -18;
const LIBSSH2_ERROR_PUBLICKEY_UNVERIFIED: i32 = -19;
const LIBSSH2_ERROR_CHANNEL_CLOSED: i32 = -26;
const LIBSSH2_ERROR_CHANNEL_EOF_SENT: i32 = -27;
const LIBSSH2_ERROR_SOCKET_RECV: i32 = -43;

/// Top-level error type for the `wlcrename-ssh` crate.
///
/// Every failure mode of the connection boundary collapses into one of
/// five variants. Callers are expected to abort the run on any of them:
/// nothing has been reconciled yet when the session is lost.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// The controller rejected the username/password pair, either at the
    /// SSH layer or at the controller's own `User:`/`Password:` login.
    #[error("SSH authentication failure: {username}@{host}")]
    AuthFailure { host: String, username: String },

    // ── Transport ───────────────────────────────────────────────────
    /// A connect or read did not complete within the configured timeout.
    #[error("SSH timeout to device: {host} (after {timeout_secs}s)")]
    Timeout { host: String, timeout_secs: u64 },

    /// Socket or SSH protocol failure (refused, handshake, channel setup).
    #[error("SSH issue with {host}, is SSH enabled? {message}")]
    Transport { host: String, message: String },

    /// The controller closed the stream while we were waiting for output.
    #[error("End of file while talking to device {host}")]
    UnexpectedEnd { host: String },

    // ── Catch-all ───────────────────────────────────────────────────
    /// Anything the categories above do not describe.
    #[error("Unexpected error with {host}: {detail}")]
    Unknown { host: String, detail: String },
}

impl Error {
    /// Classify a libssh2 error raised during handshake, auth, or channel I/O.
    pub(crate) fn from_ssh(
        host: &str,
        username: &str,
        timeout_secs: u64,
        err: &ssh2::Error,
    ) -> Self {
        let host = host.to_owned();
        match err.code() {
            ssh2::ErrorCode::Session(
                LIBSSH2_ERROR_AUTHENTICATION_FAILED | LIBSSH2_ERROR_PUBLICKEY_UNVERIFIED,
            ) => Self::AuthFailure {
                host,
                username: username.to_owned(),
            },
            ssh2::ErrorCode::Session(LIBSSH2_ERROR_TIMEOUT) => Self::Timeout { host, timeout_secs },
            ssh2::ErrorCode::Session(
                LIBSSH2_ERROR_SOCKET_DISCONNECT
                | LIBSSH2_ERROR_SOCKET_RECV
                | LIBSSH2_ERROR_CHANNEL_CLOSED
                | LIBSSH2_ERROR_CHANNEL_EOF_SENT,
            ) => Self::UnexpectedEnd { host },
            ssh2::ErrorCode::Session(LIBSSH2_ERROR_BANNER_RECV | LIBSSH2_ERROR_SOCKET_SEND) => {
                Self::Transport {
                    host,
                    message: err.message().to_owned(),
                }
            }
            ssh2::ErrorCode::Session(_) => Self::Transport {
                host,
                message: err.to_string(),
            },
            ssh2::ErrorCode::SFTP(_) => Self::Unknown {
                host,
                detail: err.to_string(),
            },
        }
    }

    /// Classify a socket-level I/O error.
    pub(crate) fn from_io(host: &str, timeout_secs: u64, err: &io::Error) -> Self {
        let host = host.to_owned();
        match err.kind() {
            io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => {
                Self::Timeout { host, timeout_secs }
            }
            io::ErrorKind::UnexpectedEof
            | io::ErrorKind::ConnectionReset
            | io::ErrorKind::ConnectionAborted
            | io::ErrorKind::BrokenPipe => Self::UnexpectedEnd { host },
            io::ErrorKind::ConnectionRefused
            | io::ErrorKind::NotFound
            | io::ErrorKind::AddrNotAvailable
            | io::ErrorKind::InvalidInput => Self::Transport {
                host,
                message: err.to_string(),
            },
            _ => Self::Unknown {
                host,
                detail: err.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_timeout_maps_to_timeout() {
        let err = io::Error::new(io::ErrorKind::TimedOut, "read timed out");
        let mapped = Error::from_io("10.0.0.5", 30, &err);
        assert!(matches!(mapped, Error::Timeout { ref host, .. } if host == "10.0.0.5"));
    }

    #[test]
    fn io_eof_maps_to_unexpected_end() {
        let err = io::Error::new(io::ErrorKind::UnexpectedEof, "eof");
        assert!(matches!(
            Error::from_io("wlc", 30, &err),
            Error::UnexpectedEnd { .. }
        ));
    }

    #[test]
    fn io_refused_maps_to_transport() {
        let err = io::Error::new(io::ErrorKind::ConnectionRefused, "refused");
        assert!(matches!(
            Error::from_io("wlc", 30, &err),
            Error::Transport { .. }
        ));
    }

    #[test]
    fn io_other_maps_to_unknown() {
        let err = io::Error::other("weird");
        let mapped = Error::from_io("wlc", 30, &err);
        assert!(matches!(mapped, Error::Unknown { ref detail, .. } if detail == "weird"));
    }

    #[test]
    fn display_names_the_host() {
        let err = Error::AuthFailure {
            host: "192.0.2.10".into(),
            username: "admin".into(),
        };
        assert_eq!(
            err.to_string(),
            "SSH authentication failure: admin@192.0.2.10"
        );
    }
}
