//! Lint command - run the configured tools for one file.

use super::{EXIT_DIAGNOSTICS, EXIT_FAILURE, EXIT_OK};
use crate::config::LintmuxConfig;
use crate::output::{OutputFormat, OutputFormatter};
use clap::Args;
use lintmux_tools::{
    Diagnostic, LintError, Orchestrator, ProcessRunner, Severity, SkippedTool, ToolFailurePolicy,
    language_for_path,
};
use nu_ansi_term::Color::{Blue, Red, Yellow};
use serde::Serialize;
use std::fmt::Write;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub struct LintArgs {
    /// File to lint
    pub file: PathBuf,

    /// Language tag (inferred from the file extension by default)
    #[arg(short, long)]
    pub language: Option<String>,

    /// Print each diagnostic as soon as it is parsed, as filename:line:column:severity:message
    #[arg(long)]
    pub stream: bool,

    /// Skip tools that cannot be started instead of aborting
    #[arg(long)]
    pub skip_missing: bool,

    /// Only report diagnostics for FILE, dropping other files a tool checked
    #[arg(long)]
    pub only_target: bool,

    /// Root directory (defaults to current directory)
    #[arg(short, long)]
    pub root: Option<PathBuf>,
}

/// Result of a lint run
#[derive(Debug, Serialize)]
pub struct LintResult {
    pub language: String,
    pub file: String,
    pub diagnostics: Vec<Diagnostic>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedTool>,
}

impl LintResult {
    fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }
}

impl OutputFormatter for LintResult {
    fn format_text(&self) -> String {
        let mut out = String::new();
        for diag in &self.diagnostics {
            writeln!(out, "{}", diag).unwrap();
        }
        out
    }

    fn format_pretty(&self, colors: bool) -> String {
        let mut out = String::new();
        for diag in &self.diagnostics {
            let severity = diag.severity.as_str();
            let severity = if colors {
                match diag.severity {
                    Severity::Error => Red.bold().paint(severity).to_string(),
                    Severity::Warning => Yellow.paint(severity).to_string(),
                    Severity::Info => Blue.paint(severity).to_string(),
                }
            } else {
                severity.to_string()
            };

            let location = match diag.column {
                Some(column) => format!("{}:{}:{}", diag.filename, diag.line, column),
                None => format!("{}:{}", diag.filename, diag.line),
            };
            writeln!(
                out,
                "{} {} [{}] {}",
                location, severity, diag.tool, diag.message
            )
            .unwrap();
        }

        for skipped in &self.skipped {
            writeln!(out, "skipped {}: {}", skipped.tool, skipped.reason).unwrap();
        }

        let errors = self.count(Severity::Error);
        let warnings = self.count(Severity::Warning);
        if self.diagnostics.is_empty() {
            writeln!(out, "No issues found in {}", self.file).unwrap();
        } else {
            writeln!(
                out,
                "\nFound {} error(s) and {} warning(s)",
                errors, warnings
            )
            .unwrap();
        }
        out
    }
}

/// Resolve the language tag from the flag or the file extension.
fn resolve_language(args: &LintArgs) -> Option<String> {
    args.language
        .clone()
        .or_else(|| language_for_path(&args.file).map(str::to_string))
}

/// Run the lint command.
pub fn run(args: LintArgs, format: OutputFormat) -> i32 {
    let root = args.root.clone().unwrap_or_else(|| PathBuf::from("."));
    let config = LintmuxConfig::load(&root);

    let Some(language) = resolve_language(&args) else {
        eprintln!(
            "error: cannot infer a language for {}; pass --language",
            args.file.display()
        );
        return EXIT_FAILURE;
    };

    let registry = match config.registry() {
        Ok(registry) => registry,
        Err(e) => {
            eprintln!("error: invalid configuration: {}", e);
            return EXIT_FAILURE;
        }
    };

    let policy = if args.skip_missing {
        ToolFailurePolicy::Skip
    } else {
        config.lint.on_tool_failure()
    };

    let only_target = args.only_target || config.lint.only_target();

    let mut orchestrator = Orchestrator::new(registry, ProcessRunner::new())
        .with_policy(policy)
        .with_only_target(only_target);
    let mut target = args.file.clone();
    if args.root.is_some() || only_target {
        // Tools run inside the root, so neither path may be cwd-relative.
        let resolved = std::path::absolute(&target).and_then(|target| {
            std::path::absolute(&root).map(|root| (target, root))
        });
        let root = match resolved {
            Ok((absolute, root)) => {
                target = absolute;
                root
            }
            Err(e) => {
                eprintln!("error: {}: {}", args.file.display(), e);
                return EXIT_FAILURE;
            }
        };
        orchestrator = orchestrator.with_working_dir(root);
    }

    if args.stream {
        stream(&orchestrator, &language, &target)
    } else {
        report(&orchestrator, &language, &target, &format)
    }
}

fn report(
    orchestrator: &Orchestrator<ProcessRunner>,
    language: &str,
    file: &Path,
    format: &OutputFormat,
) -> i32 {
    match orchestrator.lint_report(language, file) {
        Ok(report) => {
            if !format.is_json() {
                for skipped in &report.skipped {
                    eprintln!("{}: skipped ({})", skipped.tool, skipped.reason);
                }
            }
            let result = LintResult {
                language: language.to_string(),
                file: file.display().to_string(),
                diagnostics: report.diagnostics,
                skipped: report.skipped,
            };
            result.print(format);
            if result.count(Severity::Error) > 0 {
                EXIT_DIAGNOSTICS
            } else {
                EXIT_OK
            }
        }
        Err(e) => fail(e),
    }
}

fn stream(orchestrator: &Orchestrator<ProcessRunner>, language: &str, file: &Path) -> i32 {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match orchestrator.lint_to_writer(language, file, &mut out) {
        Ok(summary) => {
            for skipped in &summary.skipped {
                eprintln!("{}: skipped ({})", skipped.tool, skipped.reason);
            }
            if summary.errors > 0 {
                EXIT_DIAGNOSTICS
            } else {
                EXIT_OK
            }
        }
        Err(e) => fail(e),
    }
}

fn fail(error: LintError) -> i32 {
    match &error {
        LintError::UnsupportedLanguage(_) => {
            eprintln!("error: {}", error);
            eprintln!("Use 'lintmux list' to see configured languages.");
        }
        _ => eprintln!("error: {}", error),
    }
    EXIT_FAILURE
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(file: &str, language: Option<&str>) -> LintArgs {
        LintArgs {
            file: PathBuf::from(file),
            language: language.map(str::to_string),
            stream: false,
            skip_missing: false,
            only_target: false,
            root: None,
        }
    }

    fn diag(severity: Severity, column: Option<usize>) -> Diagnostic {
        Diagnostic {
            tool: "mypy".to_string(),
            filename: "app.py".to_string(),
            line: 3,
            column,
            severity,
            message: "error: bad".to_string(),
        }
    }

    #[test]
    fn test_resolve_language() {
        assert_eq!(resolve_language(&args("a.py", None)).as_deref(), Some("python"));
        assert_eq!(
            resolve_language(&args("a.py", Some("cython"))).as_deref(),
            Some("cython")
        );
        assert_eq!(resolve_language(&args("README", None)), None);
    }

    #[test]
    fn test_text_output_uses_normalized_lines() {
        let result = LintResult {
            language: "python".to_string(),
            file: "app.py".to_string(),
            diagnostics: vec![diag(Severity::Error, Some(5)), diag(Severity::Info, None)],
            skipped: vec![],
        };
        assert_eq!(
            result.format_text(),
            "app.py:3:5:error:error: bad\napp.py:3::info:error: bad\n"
        );
    }

    #[test]
    fn test_pretty_output_summary() {
        let result = LintResult {
            language: "python".to_string(),
            file: "app.py".to_string(),
            diagnostics: vec![diag(Severity::Error, Some(5)), diag(Severity::Warning, None)],
            skipped: vec![],
        };
        let out = result.format_pretty(false);
        assert!(out.contains("app.py:3:5 error [mypy] error: bad"));
        assert!(out.contains("app.py:3 warning [mypy]"));
        assert!(out.contains("Found 1 error(s) and 1 warning(s)"));
    }

    #[test]
    fn test_pretty_output_clean() {
        let result = LintResult {
            language: "python".to_string(),
            file: "app.py".to_string(),
            diagnostics: vec![],
            skipped: vec![],
        };
        assert_eq!(result.format_pretty(true), "No issues found in app.py\n");
    }
}
