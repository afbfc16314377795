//! Ruff adapter - Python linter.
//!
//! Ruff is an extremely fast Python linter, written in Rust.
//! https://docs.astral.sh/ruff/
//!
//! Concise output puts the rule code where other tools put a severity word:
//! `t.py:1:8: F401 [*] `os` imported but unused`. Pyflakes (`F`) and
//! pycodestyle error (`E`) codes are errors, everything else a warning.

use crate::{Adapter, CommandTemplate, Severity, SeverityGrammar};

pub fn adapter() -> Adapter {
    Adapter::new(
        "ruff",
        CommandTemplate::new([
            "ruff",
            "check",
            "--output-format=concise",
            "--no-fix",
            "--quiet",
            "%f",
        ]),
        super::file_line_column()
            .severity_pattern(rule_code_severity())
            .message(),
    )
    .with_website("https://docs.astral.sh/ruff/")
}

/// Severity from a ruff/flake8 style rule code, leaving the code in the message.
pub(crate) fn rule_code_severity() -> SeverityGrammar {
    SeverityGrammar::new()
        .code("E", Severity::Error)
        .code("F", Severity::Error)
        .code("W", Severity::Warning)
        .fallback(Severity::Warning)
        .lookahead()
}
