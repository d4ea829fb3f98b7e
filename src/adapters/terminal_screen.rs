use std::io::{self, Write};

use fp_core::ports::ScreenPort;
use tracing::warn;

/// [`ScreenPort`] that prints the screen state to stdout.
#[derive(Debug, Default)]
pub struct TerminalScreen;

impl TerminalScreen {
    pub fn new() -> Self {
        Self
    }

    fn print(&self, line: &str) {
        let mut stdout = io::stdout().lock();
        if let Err(err) = writeln!(stdout, "{line}").and_then(|_| stdout.flush()) {
            warn!(error = %err, "failed to write to terminal");
        }
    }
}

impl ScreenPort for TerminalScreen {
    fn set_instruction(&self, text: &str) {
        self.print(&format!("[label] {text}"));
    }

    fn set_icon_enabled(&self, enabled: bool) {
        let state = if enabled { "enabled" } else { "disabled" };
        self.print(&format!("[icon] {state}"));
    }
}
