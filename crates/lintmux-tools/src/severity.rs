//! Severity levels and the free-text severity classifier.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical severity of a diagnostic.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational note.
    Info,
    /// Potential problem, should be fixed.
    #[default]
    Warning,
    /// Must be fixed.
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Characters stripped from the start of a hint before prefix matching.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StripSet {
    /// Whitespace only.
    #[default]
    Whitespace,
    /// Whitespace plus `(`, `[`, `*` and quote characters.
    Punctuation,
}

impl StripSet {
    fn strips(&self, c: char) -> bool {
        match self {
            Self::Whitespace => c.is_whitespace(),
            Self::Punctuation => {
                c.is_whitespace() || matches!(c, '(' | '[' | '*' | '"' | '\'' | '`')
            }
        }
    }
}

/// Maps a tool's own severity wording ("warning: ...", "Error ...") to a [`Severity`].
///
/// Matching is on whole-word prefixes, checked in priority order:
/// `info`/`note`, then `warning`, then `error`. Anything else is a warning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SeverityClassifier {
    pub strip: StripSet,
}

impl SeverityClassifier {
    pub fn new(strip: StripSet) -> Self {
        Self { strip }
    }

    pub fn classify(&self, text: &str) -> Severity {
        let lowered = text.to_lowercase();
        let hint = lowered.trim_start_matches(|c| self.strip.strips(c));

        if hint.starts_with("info") || hint.starts_with("note") {
            Severity::Info
        } else if hint.starts_with("warning") {
            Severity::Warning
        } else if hint.starts_with("error") {
            Severity::Error
        } else {
            Severity::Warning
        }
    }
}

/// Classify with the default (whitespace-only) classifier.
pub fn classify(text: &str) -> Severity {
    SeverityClassifier::default().classify(text)
}
