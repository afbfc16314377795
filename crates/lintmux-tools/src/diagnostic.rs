//! Diagnostic records shared across all adapters.

use crate::Severity;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single diagnostic parsed from one line of tool output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Adapter that produced this diagnostic.
    pub tool: String,
    /// File path as the tool printed it.
    pub filename: String,
    /// 1-based line number.
    pub line: usize,
    /// Column as the tool printed it, if the format has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
    /// Severity level.
    pub severity: Severity,
    /// Message text, verbatim.
    pub message: String,
}

impl Diagnostic {
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Render as `filename:line:column:severity:message`.
    ///
    /// An absent column leaves its field empty.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:", self.filename, self.line)?;
        if let Some(column) = self.column {
            write!(f, "{}", column)?;
        }
        write!(f, ":{}:{}", self.severity, self.message)
    }
}
