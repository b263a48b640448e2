//! Prompt recognition over raw shell output.
//!
//! Pure text helpers: nothing here touches the socket, so the login and
//! command-framing rules can be tested against captured transcripts.

/// Where the controller's interactive login currently stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginStep {
    /// AireOS asks for the username again inside the shell.
    Username,
    Password,
    /// A command prompt is showing; carries the prompt text.
    Ready(String),
    /// Nothing recognizable yet (banner still streaming).
    Waiting,
}

/// Drop carriage returns and NUL padding so line handling sees plain `\n`.
pub fn normalize(text: &str) -> String {
    text.chars().filter(|c| !matches!(c, '\r' | '\0')).collect()
}

/// Decode a whole read buffer at once.
///
/// Reads can end in the middle of a multi-byte character, so bytes are only
/// decoded after they have been collected.
pub fn decode(bytes: &[u8]) -> String {
    normalize(&String::from_utf8_lossy(bytes))
}

/// The last line with visible content, trimmed.
pub fn last_line(text: &str) -> &str {
    text.lines()
        .rev()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or("")
}

/// Both controller families end their exec prompt with `#` or `>`.
pub fn is_prompt(line: &str) -> bool {
    let line = line.trim_end();
    line.ends_with('#') || line.ends_with('>')
}

/// Classify the tail of the login transcript.
pub fn login_step(text: &str) -> LoginStep {
    let line = last_line(text);
    let lower = line.to_ascii_lowercase();
    if lower.ends_with("user:") || lower.ends_with("username:") {
        LoginStep::Username
    } else if lower.ends_with("password:") {
        LoginStep::Password
    } else if is_prompt(line) {
        LoginStep::Ready(line.to_owned())
    } else {
        LoginStep::Waiting
    }
}

/// Holds a prompt-looking line until the controller repeats it.
///
/// Banners may contain lines ending in `#` or `>` (`#####` borders), so a
/// line only counts as the prompt once a bare newline brings it back.
#[derive(Debug, Default)]
pub struct PromptCheck {
    candidate: Option<String>,
}

impl PromptCheck {
    /// Record a candidate. Returns the prompt once the same line was seen twice.
    pub fn observe(&mut self, found: String) -> Option<String> {
        if self.candidate.as_deref() == Some(found.as_str()) {
            return Some(found);
        }
        self.candidate = Some(found);
        None
    }
}

/// True once the buffered output ends with the session's prompt.
pub fn ends_with_prompt(text: &str, prompt: &str) -> bool {
    let prompt = prompt.trim();
    !prompt.is_empty() && last_line(text) == prompt
}

/// Strip the echoed command line and the trailing prompt from a response.
pub fn clean_output(raw: &str, command: &str, prompt: &str) -> String {
    let text = normalize(raw);
    let command = command.trim();
    let prompt = prompt.trim();

    let mut lines: Vec<&str> = text.lines().skip_while(|l| l.trim().is_empty()).collect();

    if !command.is_empty() && lines.first().is_some_and(|first| first.contains(command)) {
        lines.remove(0);
    }

    while let Some(last) = lines.last() {
        let last = last.trim();
        if last.is_empty() || last == prompt {
            lines.pop();
        } else {
            break;
        }
    }

    lines.join("\n")
}
