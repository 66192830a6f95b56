//! Diagnostic sink: the append-only line stream failed assertions and caught errors are written to.

use std::cell::RefCell;

/// Where diagnostic lines go.
#[derive(Debug)]
enum Target {
    Stderr,
    Buffer(RefCell<Vec<String>>),
    Discard,
}

/// Append-only, line-oriented diagnostic output shared by every case of a run.
///
/// Writes go through `&self`; runs are single-threaded so no further synchronization is needed.
#[derive(Debug)]
pub struct DiagnosticSink {
    target: Target,
}

impl DiagnosticSink {
    /// Write lines to standard error.
    pub fn stderr() -> Self {
        Self { target: Target::Stderr }
    }

    /// Keep lines in memory; read them back with [`DiagnosticSink::lines`].
    pub fn buffer() -> Self {
        Self {
            target: Target::Buffer(RefCell::new(Vec::new())),
        }
    }

    /// Drop every line.
    pub fn discard() -> Self {
        Self { target: Target::Discard }
    }

    /// Append one line.
    pub fn write_line(&self, line: impl Into<String>) {
        match &self.target {
            Target::Stderr => eprintln!("{}", line.into()),
            Target::Buffer(lines) => lines.borrow_mut().push(line.into()),
            Target::Discard => {}
        }
    }

    /// Lines written so far. Always empty unless this is a buffer sink.
    pub fn lines(&self) -> Vec<String> {
        match &self.target {
            Target::Buffer(lines) => lines.borrow().clone(),
            Target::Stderr | Target::Discard => Vec::new(),
        }
    }

    /// The most recently written line, if buffered.
    pub fn last_line(&self) -> Option<String> {
        match &self.target {
            Target::Buffer(lines) => lines.borrow().last().cloned(),
            Target::Stderr | Target::Discard => None,
        }
    }
}

impl Default for DiagnosticSink {
    fn default() -> Self {
        Self::stderr()
    }
}
