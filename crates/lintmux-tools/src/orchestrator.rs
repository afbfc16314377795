//! Orchestrator: run every adapter for a language and merge the results.

use crate::{AdapterRegistry, CommandRunner, Diagnostic, RunError, TemplateError};
use serde::{Deserialize, Serialize};
use std::io::{self, Write};
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

/// What to do when a tool cannot be started.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolFailurePolicy {
    /// Stop and return the error.
    #[default]
    Abort,
    /// Log a warning and carry on with the remaining adapters.
    Skip,
}

/// Error from a lint run.
#[derive(Debug, Error)]
pub enum LintError {
    #[error("no linters configured for language '{0}'")]
    UnsupportedLanguage(String),
    #[error("{tool}: {source}")]
    Tool {
        tool: String,
        #[source]
        source: RunError,
    },
    #[error("{tool}: {source}")]
    Template {
        tool: String,
        #[source]
        source: TemplateError,
    },
    #[error("failed to write diagnostics: {0}")]
    Output(#[from] io::Error),
}

/// An adapter that was skipped under [`ToolFailurePolicy::Skip`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedTool {
    pub tool: String,
    pub reason: String,
}

/// Outcome of a streaming run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LintSummary {
    /// Diagnostics emitted, in order.
    pub emitted: usize,
    /// Diagnostics with error severity.
    pub errors: usize,
    pub skipped: Vec<SkippedTool>,
}

/// Structured result of a lint run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LintReport {
    pub diagnostics: Vec<Diagnostic>,
    pub skipped: Vec<SkippedTool>,
}

/// Runs the adapters configured for a language one after another.
///
/// Output order is adapter order, then line order within each tool's output.
pub struct Orchestrator<R> {
    registry: AdapterRegistry,
    runner: R,
    policy: ToolFailurePolicy,
    working_dir: Option<PathBuf>,
    only_target: bool,
}

impl<R: CommandRunner> Orchestrator<R> {
    pub fn new(registry: AdapterRegistry, runner: R) -> Self {
        Self {
            registry,
            runner,
            policy: ToolFailurePolicy::default(),
            working_dir: None,
            only_target: false,
        }
    }

    pub fn with_policy(mut self, policy: ToolFailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Directory tools run in (defaults to the current directory).
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Keep only diagnostics reported against the target file.
    ///
    /// Project-wide tools such as clippy report every file they check.
    /// Relative filenames are resolved against the working directory before
    /// comparison.
    pub fn with_only_target(mut self, only_target: bool) -> Self {
        self.only_target = only_target;
        self
    }

    pub fn registry(&self) -> &AdapterRegistry {
        &self.registry
    }

    /// Lint `target` and return every diagnostic.
    pub fn lint(&self, language: &str, target: &Path) -> Result<Vec<Diagnostic>, LintError> {
        self.lint_report(language, target)
            .map(|report| report.diagnostics)
    }

    /// Like [`lint`](Self::lint), but also reports skipped adapters.
    pub fn lint_report(&self, language: &str, target: &Path) -> Result<LintReport, LintError> {
        let mut diagnostics = Vec::new();
        let summary = self.run(language, target, |diag| {
            diagnostics.push(diag);
            Ok(())
        })?;
        Ok(LintReport {
            diagnostics,
            skipped: summary.skipped,
        })
    }

    /// Lint `target`, writing each diagnostic to `out` as soon as it is parsed,
    /// one `filename:line:column:severity:message` line each.
    pub fn lint_to_writer<W: Write>(
        &self,
        language: &str,
        target: &Path,
        out: &mut W,
    ) -> Result<LintSummary, LintError> {
        self.run(language, target, |diag| writeln!(out, "{}", diag))
    }

    /// Shared fold over adapters; `emit` sees diagnostics in output order.
    fn run<F>(&self, language: &str, target: &Path, mut emit: F) -> Result<LintSummary, LintError>
    where
        F: FnMut(Diagnostic) -> io::Result<()>,
    {
        let adapters = self
            .registry
            .for_language(language)
            .ok_or_else(|| LintError::UnsupportedLanguage(language.to_string()))?;

        let base = self.working_dir.as_deref();
        let wanted = self.only_target.then(|| normalize(target, base));

        let mut summary = LintSummary::default();
        for registered in adapters {
            let name = registered.adapter.name.as_str();

            let argv = registered
                .adapter
                .command
                .materialize(target)
                .map_err(|source| LintError::Template {
                    tool: name.to_string(),
                    source,
                })?;

            let output = match self.runner.run(&argv, self.working_dir.as_deref()) {
                Ok(output) => output,
                Err(source) => match self.policy {
                    ToolFailurePolicy::Abort => {
                        return Err(LintError::Tool {
                            tool: name.to_string(),
                            source,
                        });
                    }
                    ToolFailurePolicy::Skip => {
                        log::warn!("skipping {}: {}", name, source);
                        summary.skipped.push(SkippedTool {
                            tool: name.to_string(),
                            reason: source.to_string(),
                        });
                        continue;
                    }
                },
            };

            let mut matched = 0;
            for line in &output.lines {
                let Some(found) = registered.matcher.apply(line) else {
                    log::trace!("{}: dropped line {:?}", name, line);
                    continue;
                };
                let elsewhere = wanted.as_ref().is_some_and(|wanted| {
                    normalize(Path::new(&found.filename), base) != *wanted
                });
                if elsewhere {
                    log::trace!("{}: other file {}", name, found.filename);
                    continue;
                }
                let diag = found.into_diagnostic(name);
                if diag.is_error() {
                    summary.errors += 1;
                }
                emit(diag)?;
                matched += 1;
            }
            summary.emitted += matched;

            log::debug!(
                "{}: {} of {} lines matched (exit code {:?})",
                name,
                matched,
                output.lines.len(),
                output.exit_code
            );
        }

        Ok(summary)
    }
}

/// Lexically resolve `path` against `base`, dropping `.` and folding `..`.
fn normalize(path: &Path, base: Option<&Path>) -> PathBuf {
    let joined = match base {
        Some(base) if path.is_relative() => base.join(path),
        _ => path.to_path_buf(),
    };
    let mut out = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other),
        }
    }
    out
}
