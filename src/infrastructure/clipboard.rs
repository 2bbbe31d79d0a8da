use crate::domain::editor::ClipboardSink;
use anyhow::Result;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use crossterm::{execute, Command};
use std::fmt;
use std::io::Write;

/// OSC 52 "set clipboard" escape, BEL-terminated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetClipboard(pub String);

impl Command for SetClipboard {
    fn write_ansi(&self, f: &mut impl fmt::Write) -> fmt::Result {
        write!(f, "\x1b]52;c;{}\x07", STANDARD.encode(&self.0))
    }

    #[cfg(windows)]
    fn execute_winapi(&self) -> std::io::Result<()> {
        Err(std::io::Error::new(
            std::io::ErrorKind::Unsupported,
            "clipboard needs an ANSI terminal",
        ))
    }
}

/// Writes to the system clipboard through the terminal (OSC 52), which also
/// works over SSH.
pub struct TerminalClipboard<W: Write + Send> {
    out: W,
}

impl TerminalClipboard<std::io::Stdout> {
    #[must_use]
    pub fn stdout() -> Self {
        Self {
            out: std::io::stdout(),
        }
    }
}

impl<W: Write + Send> TerminalClipboard<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> ClipboardSink for TerminalClipboard<W> {
    fn write_text(&mut self, text: &str) -> Result<()> {
        execute!(self.out, SetClipboard(text.to_string()))?;
        tracing::debug!(bytes = text.len(), "copied to clipboard");
        Ok(())
    }
}
