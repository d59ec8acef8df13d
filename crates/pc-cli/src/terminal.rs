//! Terminal rendering of session and form state, plus clipboard access.
//!
//! Status goes to stderr so stdout carries only the command's rendered
//! response.

use std::io::Write;
use std::process::{Command, Stdio};

use pc_auth::SessionView;
use pc_client::{Clipboard, PromptView};
use pc_core::Session;

#[derive(Debug, Clone, Copy)]
pub struct TerminalView {
    quiet: bool,
}

impl TerminalView {
    pub const fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    fn status(&self, message: &str) {
        if !self.quiet {
            eprintln!("{message}");
        }
    }
}

impl SessionView for TerminalView {
    fn show_profile(&mut self, session: &Session) {
        self.status(&format!("Logged in as {} ({} plan)", session.email, session.plan));
    }

    fn show_login(&mut self) {
        self.status("Not logged in. Run `pcrafter login` to sign in.");
    }
}

impl PromptView for TerminalView {
    fn show_empty(&mut self, message: &str) {
        self.status(message);
    }

    fn show_processing(&mut self, message: &str) {
        self.status(message);
    }

    fn show_result(&mut self, _structured: &str, _natural: &str) {
        self.status("Prompt ready.");
    }

    fn show_error(&mut self, message: &str) {
        eprintln!("{message}");
    }

    fn show_login_prompt(&mut self, detail: &str) {
        eprintln!("{detail}");
        eprintln!("Run `pcrafter login` to continue.");
    }

    fn show_notice(&mut self, message: &str) {
        self.status(message);
    }
}

/// Clipboard backed by whichever platform copy tool is installed.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

const COPY_TOOLS: &[(&str, &[&str])] = &[
    ("pbcopy", &[]),
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
    ("clip", &[]),
];

impl Clipboard for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), String> {
        let mut last_error = String::from("no clipboard tool found");
        for (program, args) in COPY_TOOLS {
            match pipe_to(program, args, text) {
                Ok(()) => {
                    tracing::debug!(program, "copied to clipboard");
                    return Ok(());
                }
                Err(error) => {
                    tracing::debug!(program, %error, "clipboard tool unavailable");
                    last_error = format!("{program}: {error}");
                }
            }
        }
        Err(last_error)
    }
}

fn pipe_to(program: &str, args: &[&str], text: &str) -> std::io::Result<()> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(text.as_bytes())?;
    }

    let status = child.wait()?;
    if status.success() {
        Ok(())
    } else {
        Err(std::io::Error::other(format!("exited with {status}")))
    }
}
