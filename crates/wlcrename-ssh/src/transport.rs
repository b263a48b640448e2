// Connection parameters shared by every session.
//
// Kept separate from the session itself so config resolution (profiles,
// env vars, prompts) can build one without touching a socket.

use std::net::{SocketAddr, ToSocketAddrs};
use std::time::Duration;

use secrecy::SecretString;

use crate::error::Error;

/// Default SSH port on both controller families.
pub const DEFAULT_PORT: u16 = 22;

/// Default per-read timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Everything needed to open one command session against a controller.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Controller hostname or IP address.
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: SecretString,
    /// Bound on the TCP connect and on every blocking read.
    pub timeout: Duration,
}

impl SessionConfig {
    pub fn new(
        host: impl Into<String>,
        username: impl Into<String>,
        password: SecretString,
    ) -> Self {
        Self {
            host: host.into(),
            port: DEFAULT_PORT,
            username: username.into(),
            password,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// `host:port`, bracketing bare IPv6 literals.
    pub fn address(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }

    pub(crate) fn timeout_secs(&self) -> u64 {
        self.timeout.as_secs()
    }

    /// libssh2 takes its blocking timeout in milliseconds as a `u32`.
    pub(crate) fn timeout_millis(&self) -> u32 {
        u32::try_from(self.timeout.as_millis()).unwrap_or(u32::MAX)
    }

    /// Resolve the first socket address for the configured host.
    pub(crate) fn socket_addr(&self) -> Result<SocketAddr, Error> {
        let mut addrs = (self.host.as_str(), self.port)
            .to_socket_addrs()
            .map_err(|e| Error::from_io(&self.host, self.timeout_secs(), &e))?;
        addrs.next().ok_or_else(|| Error::Transport {
            host: self.host.clone(),
            message: "hostname did not resolve to any address".into(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn config(host: &str) -> SessionConfig {
        SessionConfig::new(host, "admin", SecretString::from("secret".to_owned()))
    }

    #[test]
    fn defaults_to_port_22_and_30s() {
        let cfg = config("10.1.1.1");
        assert_eq!(cfg.port, 22);
        assert_eq!(cfg.timeout, Duration::from_secs(30));
        assert_eq!(cfg.timeout_millis(), 30_000);
    }

    #[test]
    fn address_brackets_ipv6() {
        assert_eq!(config("10.1.1.1").address(), "10.1.1.1:22");
        assert_eq!(
            config("2001:db8::1").with_port(2222).address(),
            "[2001:db8::1]:2222"
        );
    }

    #[test]
    fn socket_addr_resolves_ip_literal() {
        let addr = config("127.0.0.1").with_port(8022).socket_addr().unwrap();
        assert_eq!(addr.port(), 8022);
        assert!(addr.ip().is_loopback());
    }

    #[test]
    fn debug_output_hides_password() {
        let rendered = format!("{:?}", config("wlc"));
        assert!(!rendered.contains("secret"));
    }
}
