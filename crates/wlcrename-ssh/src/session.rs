// Interactive shell session over SSH.
//
// Controllers do not support exec channels reliably, so every command goes
// through one PTY-backed shell: write the line, read until the prompt shows
// up again, trim the echo. The channel is closed on `close()` or on drop.

use std::io::{Read, Write};
use std::net::TcpStream;

use secrecy::ExposeSecret;
use ssh2::{Channel, Session};
use tracing::{debug, info, trace};

use crate::error::Error;
use crate::prompt::{self, LoginStep, PromptCheck};
use crate::transport::SessionConfig;

const PTY_TERM: &str = "vt100";
const PTY_COLUMNS: u32 = 511;
const PTY_ROWS: u32 = 24;
const READ_CHUNK: usize = 8192;

/// One authenticated shell on a controller.
pub struct SshSession {
    host: String,
    username: String,
    timeout_secs: u64,
    session: Session,
    channel: Channel,
    prompt: String,
    closed: bool,
}

impl std::fmt::Debug for SshSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SshSession")
            .field("host", &self.host)
            .field("username", &self.username)
            .field("prompt", &self.prompt)
            .field("closed", &self.closed)
            .finish_non_exhaustive()
    }
}

impl SshSession {
    /// Connect, authenticate, open a shell, and wait for the first prompt.
    ///
    /// AireOS controllers ask for `User:` and `Password:` a second time
    /// inside the shell; those are answered here with the same credentials.
    pub fn connect(config: &SessionConfig) -> Result<Self, Error> {
        info!(
            host = %config.host,
            port = config.port,
            username = %config.username,
            "connecting to controller"
        );

        let addr = config.socket_addr()?;
        let tcp = TcpStream::connect_timeout(&addr, config.timeout)
            .map_err(|e| Error::from_io(&config.host, config.timeout_secs(), &e))?;

        let ssh_err = |e: ssh2::Error| {
            Error::from_ssh(&config.host, &config.username, config.timeout_secs(), &e)
        };

        let mut session = Session::new().map_err(ssh_err)?;
        session.set_tcp_stream(tcp);
        session.set_timeout(config.timeout_millis());
        session.handshake().map_err(ssh_err)?;

        session
            .userauth_password(&config.username, config.password.expose_secret())
            .map_err(ssh_err)?;
        if !session.authenticated() {
            return Err(Error::AuthFailure {
                host: config.host.clone(),
                username: config.username.clone(),
            });
        }
        debug!(host = %config.host, "ssh authentication accepted");

        let mut channel = session.channel_session().map_err(ssh_err)?;
        channel
            .request_pty(PTY_TERM, None, Some((PTY_COLUMNS, PTY_ROWS, 0, 0)))
            .map_err(ssh_err)?;
        channel.shell().map_err(ssh_err)?;

        let mut this = Self {
            host: config.host.clone(),
            username: config.username.clone(),
            timeout_secs: config.timeout_secs(),
            session,
            channel,
            prompt: String::new(),
            closed: false,
        };
        this.login(config)?;

        info!(host = %this.host, prompt = %this.prompt, "controller prompt found");
        Ok(this)
    }

    /// The exec prompt captured at login, e.g. `WLC-9800#`.
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Send one command line and return its output without echo or prompt.
    pub fn send_command(&mut self, command: &str) -> Result<String, Error> {
        debug!(command, "sending command");
        self.write_line(command)?;

        let mut raw = Vec::new();
        let mut text = String::new();
        while !prompt::ends_with_prompt(&text, &self.prompt) {
            if self.read_chunk(&mut raw)? == 0 {
                return Err(Error::UnexpectedEnd {
                    host: self.host.clone(),
                });
            }
            text = prompt::decode(&raw);
        }

        let output = prompt::clean_output(&text, command, &self.prompt);
        trace!(command, output = %output, "command output");
        Ok(output)
    }

    /// Close the shell and disconnect.
    pub fn close(mut self) -> Result<(), Error> {
        self.shutdown()
    }

    // ── Internals ───────────────────────────────────────────────────

    fn login(&mut self, config: &SessionConfig) -> Result<(), Error> {
        let mut buf = Vec::new();
        let mut check = PromptCheck::default();
        let mut sent_username = false;
        let mut sent_password = false;
        let mut nudged = false;

        loop {
            match prompt::login_step(&prompt::decode(&buf)) {
                LoginStep::Ready(found) => {
                    if let Some(confirmed) = check.observe(found) {
                        self.prompt = confirmed;
                        return Ok(());
                    }
                    trace!("confirming prompt candidate");
                    self.write_line("")?;
                    buf.clear();
                }
                LoginStep::Username if !sent_username => {
                    debug!("answering controller username prompt");
                    self.write_line(&config.username)?;
                    sent_username = true;
                    buf.clear();
                }
                LoginStep::Password if !sent_password => {
                    debug!("answering controller password prompt");
                    self.write_line(config.password.expose_secret())?;
                    sent_password = true;
                    buf.clear();
                }
                // Asked a second time: the controller refused the credentials.
                LoginStep::Username | LoginStep::Password => {
                    return Err(Error::AuthFailure {
                        host: self.host.clone(),
                        username: self.username.clone(),
                    });
                }
                LoginStep::Waiting => match self.read_chunk(&mut buf) {
                    Ok(0) => {
                        return Err(Error::UnexpectedEnd {
                            host: self.host.clone(),
                        });
                    }
                    Ok(_) => {}
                    // Some controllers print nothing until they see a keypress.
                    Err(Error::Timeout { .. }) if !nudged => {
                        debug!("no prompt yet, sending newline");
                        self.write_line("")?;
                        nudged = true;
                    }
                    Err(e) => return Err(e),
                },
            }
        }
    }

    fn write_line(&mut self, line: &str) -> Result<(), Error> {
        let mut payload = String::with_capacity(line.len() + 1);
        payload.push_str(line);
        payload.push('\n');
        self.channel
            .write_all(payload.as_bytes())
            .and_then(|()| self.channel.flush())
            .map_err(|e| Error::from_io(&self.host, self.timeout_secs, &e))
    }

    fn read_chunk(&mut self, buf: &mut Vec<u8>) -> Result<usize, Error> {
        let mut chunk = [0u8; READ_CHUNK];
        let n = self
            .channel
            .read(&mut chunk)
            .map_err(|e| Error::from_io(&self.host, self.timeout_secs, &e))?;
        if let Some(bytes) = chunk.get(..n) {
            buf.extend_from_slice(bytes);
        }
        Ok(n)
    }

    fn shutdown(&mut self) -> Result<(), Error> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;

        let ssh_err =
            |e: ssh2::Error| Error::from_ssh(&self.host, &self.username, self.timeout_secs, &e);
        self.channel.send_eof().map_err(ssh_err)?;
        self.channel.close().map_err(ssh_err)?;
        self.session
            .disconnect(None, "session closed by client", None)
            .map_err(ssh_err)?;

        info!(host = %self.host, "controller session closed");
        Ok(())
    }
}

impl Drop for SshSession {
    fn drop(&mut self) {
        if let Err(err) = self.shutdown() {
            debug!(error = %err, "error while closing controller session");
        }
    }
}
