// ── Command session seam ──
//
// The executor and the export path only ever need "send one line, get one
// text response". Anything that can do that (the SSH session, a scripted
// fake in tests) plugs in here.

use wlcrename_ssh::{Error as SessionError, SshSession};

/// One command in, one text response out.
pub trait ControllerSession {
    fn send_command(&mut self, command: &str) -> Result<String, SessionError>;
}

impl ControllerSession for SshSession {
    fn send_command(&mut self, command: &str) -> Result<String, SessionError> {
        SshSession::send_command(self, command)
    }
}

impl<T: ControllerSession + ?Sized> ControllerSession for &mut T {
    fn send_command(&mut self, command: &str) -> Result<String, SessionError> {
        (**self).send_command(command)
    }
}

impl<T: ControllerSession + ?Sized> ControllerSession for Box<T> {
    fn send_command(&mut self, command: &str) -> Result<String, SessionError> {
        (**self).send_command(command)
    }
}
