//! Built-in adapters.
//!
//! Each adapter pairs an external tool's command line with the layout of
//! one line of its plain-text output:
//! - Invocation (with `%f` standing for the target file)
//! - Diagnostic line format
//! - Which languages run it by default

mod clang;
mod clippy;
mod flake8;
mod gcc;
mod go_vet;
mod mypy;
mod pyflakes;
mod ruff;
mod shellcheck;

use crate::{Adapter, FormatSpec, Severity, SeverityGrammar};

/// `file:line:col: ` prefix shared by gcc-style tools.
pub(crate) fn file_line_column() -> FormatSpec {
    FormatSpec::new()
        .filename()
        .literal(":")
        .line()
        .literal(":")
        .column()
        .literal(": ")
}

/// Severity word after the gcc-style prefix, left in the message.
///
/// `fatal error` has to be listed: the classifier would read it as a
/// warning.
pub(crate) fn severity_word() -> SeverityGrammar {
    SeverityGrammar::new()
        .code("fatal error", Severity::Error)
        .code("error", Severity::Error)
        .code("warning", Severity::Warning)
        .code("note", Severity::Info)
        .fallback(Severity::Warning)
        .lookahead()
}

/// `file:line:col: severity: message`, as printed by gcc, clang and friends.
pub(crate) fn gcc_style() -> FormatSpec {
    file_line_column().severity_pattern(severity_word()).message()
}

/// All built-in adapters.
pub fn all_adapters() -> Vec<Adapter> {
    vec![
        ruff::adapter(),
        flake8::adapter(),
        mypy::adapter(),
        pyflakes::adapter(),
        clippy::adapter(),
        gcc::adapter(),
        clang::adapter(),
        shellcheck::adapter(),
        go_vet::adapter(),
    ]
}

/// Default language table: language tag to adapters, in run order.
pub fn default_languages() -> Vec<(&'static str, Vec<&'static str>)> {
    vec![
        ("python", vec!["ruff", "mypy"]),
        ("rust", vec!["clippy"]),
        ("c", vec!["gcc"]),
        ("cpp", vec!["clang"]),
        ("sh", vec!["shellcheck"]),
        ("go", vec!["go-vet"]),
    ]
}

/// Run sample tool output through an adapter's format.
#[cfg(test)]
pub(crate) fn parse_sample(adapter: &Adapter, output: &str) -> Vec<crate::Diagnostic> {
    let matcher = adapter.format.compile().unwrap();
    output
        .lines()
        .filter_map(|line| matcher.apply(line))
        .map(|m| m.into_diagnostic(&adapter.name))
        .collect()
}
