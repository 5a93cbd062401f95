//! Reporting sink for user-visible status lines.
//!
//! Status lines are tagged `SUCCESS`, `FAILURE` or `INFO`. They are separate
//! from `tracing` output, which goes to stderr.

use std::fmt;
use std::io::{IsTerminal, Write};
use std::sync::Mutex;

/// Tag attached to every status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportTag {
    /// Something completed the way the user wanted
    Success,
    /// Something did not complete
    Failure,
    /// Progress information
    Info,
}

impl ReportTag {
    /// Label printed in front of the message.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Success => "SUCCESS",
            Self::Failure => "FAILURE",
            Self::Info => "INFO",
        }
    }

    fn ansi_color(self) -> &'static str {
        match self {
            Self::Success => "\x1b[32m",
            Self::Failure => "\x1b[31m",
            Self::Info => "\x1b[33m",
        }
    }
}

impl fmt::Display for ReportTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Receives tagged status messages for display.
pub trait Reporter: Send + Sync {
    /// Emit one tagged line.
    fn report(&self, tag: ReportTag, message: &str);

    /// Emit a success line.
    fn success(&self, message: &str) {
        self.report(ReportTag::Success, message);
    }

    /// Emit a failure line.
    fn failure(&self, message: &str) {
        self.report(ReportTag::Failure, message);
    }

    /// Emit an info line.
    fn info(&self, message: &str) {
        self.report(ReportTag::Info, message);
    }
}

/// Writes status lines to stdout, coloured when stdout is a terminal.
#[derive(Debug)]
pub struct ConsoleReporter {
    color: bool,
}

impl ConsoleReporter {
    /// Create a reporter, detecting colour support from stdout.
    #[must_use]
    pub fn new() -> Self {
        Self {
            color: std::io::stdout().is_terminal(),
        }
    }

    /// Render a line the way it is printed.
    #[must_use]
    pub fn format_line(&self, tag: ReportTag, message: &str) -> String {
        if self.color {
            format!("{}{}: \x1b[0m{message}", tag.ansi_color(), tag.label())
        } else {
            format!("{}: {message}", tag.label())
        }
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter for ConsoleReporter {
    fn report(&self, tag: ReportTag, message: &str) {
        let line = self.format_line(tag, message);
        let mut stdout = std::io::stdout().lock();
        if let Err(e) = writeln!(stdout, "{line}") {
            tracing::warn!("failed to write status line: {e}");
        }
    }
}

/// Collects status lines in memory.
#[derive(Debug, Default)]
pub struct MemoryReporter {
    lines: Mutex<Vec<(ReportTag, String)>>,
}

impl MemoryReporter {
    /// Create an empty reporter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything reported so far.
    #[must_use]
    pub fn lines(&self) -> Vec<(ReportTag, String)> {
        self.lines
            .lock()
            .map(|lines| lines.clone())
            .unwrap_or_default()
    }

    /// Messages reported with the given tag.
    #[must_use]
    pub fn with_tag(&self, tag: ReportTag) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|(t, _)| *t == tag)
            .map(|(_, message)| message)
            .collect()
    }
}

impl Reporter for MemoryReporter {
    fn report(&self, tag: ReportTag, message: &str) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push((tag, message.to_string()));
        }
    }
}
