//! Diagnostic sinks and formatting
//!
//! Both passes report through the [`DiagnosticSink`] trait. [`Diagnostics`]
//! is the collecting implementation; each collected [`Diagnostic`] can be
//! rendered with source code context.

use std::fmt;

use colored::Colorize;

use super::SourceLocation;

/// Receiver for diagnostics keyed by (line, column, message).
///
/// A `fatal` report marks the program as erroneous but does not stop the
/// analysis.
pub trait DiagnosticSink {
    fn fatal(&mut self, line: usize, column: usize, message: &str);
    fn warn(&mut self, line: usize, column: usize, message: &str);
}

/// Diagnostic severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }
}

/// One reported diagnostic
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub location: SourceLocation,
    pub message: String,
}

impl Diagnostic {
    pub fn new(severity: Severity, location: SourceLocation, message: impl Into<String>) -> Self {
        Self {
            severity,
            location,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Format the diagnostic with color and the offending source line
    pub fn format_with_source(&self, source: &str) -> String {
        let mut output = String::new();

        let label = match self.severity {
            Severity::Error => self.severity.label().red().bold(),
            Severity::Warning => self.severity.label().yellow().bold(),
        };
        output.push_str(&format!("{}: {}\n", label, self.message));
        output.push_str(&format!("  {} {}\n", "-->".blue().bold(), self.location));
        output.push_str(&self.format_source_context(source));

        output
    }

    fn format_source_context(&self, source: &str) -> String {
        let mut output = String::new();
        let lines: Vec<&str> = source.lines().collect();
        let location = &self.location;

        if location.line == 0 || location.line > lines.len() {
            return output;
        }

        let line_num_width = location.line.to_string().len();

        output.push_str(&format!(
            "  {} {}\n",
            format!("{:width$}", location.line, width = line_num_width)
                .blue()
                .bold(),
            lines[location.line - 1]
        ));

        let indicator_padding = " ".repeat(line_num_width + 2 + location.column.saturating_sub(1));
        output.push_str(&format!("{}{}\n", indicator_padding, "^".red().bold()));

        output
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}: {}",
            self.location,
            self.severity.label(),
            self.message
        )
    }
}

/// Collecting sink, in report order
#[derive(Debug, Default, Clone)]
pub struct Diagnostics {
    reported: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error_count(&self) -> usize {
        self.reported.iter().filter(|d| d.is_error()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.reported.len() - self.error_count()
    }

    pub fn has_errors(&self) -> bool {
        self.reported.iter().any(Diagnostic::is_error)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.reported.iter()
    }

    pub fn len(&self) -> usize {
        self.reported.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reported.is_empty()
    }

    /// Just the message texts, in report order
    pub fn messages(&self) -> Vec<&str> {
        self.reported.iter().map(|d| d.message.as_str()).collect()
    }

    fn push(&mut self, severity: Severity, line: usize, column: usize, message: &str) {
        self.reported
            .push(Diagnostic::new(severity, SourceLocation::at(line, column), message));
    }
}

impl DiagnosticSink for Diagnostics {
    fn fatal(&mut self, line: usize, column: usize, message: &str) {
        self.push(Severity::Error, line, column, message);
    }

    fn warn(&mut self, line: usize, column: usize, message: &str) {
        self.push(Severity::Warning, line, column, message);
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.reported.into_iter()
    }
}
