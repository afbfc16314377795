//! Run external linters and merge their output into one diagnostic stream.
//!
//! Each tool is described by an [`Adapter`]: the command that runs it and a
//! [`FormatSpec`] describing one line of its plain-text output. Formats are
//! compiled into [`Matcher`]s; lines that do not match are dropped.
//!
//! # Components
//!
//! - **Severity classifier**: free-text hints ("warning: ...") to [`Severity`]
//! - **Format compiler**: [`FormatSpec`] to [`Matcher`]
//! - **Process runner**: spawn a tool, capture stdout and stderr together
//! - **Adapter registry**: adapters by name plus the language table
//! - **Orchestrator**: run a language's adapters in order and concatenate
//!
//! # Example
//!
//! ```ignore
//! use lintmux_tools::{AdapterRegistry, Orchestrator, ProcessRunner};
//! use std::path::Path;
//!
//! let orch = Orchestrator::new(AdapterRegistry::with_builtins()?, ProcessRunner::new());
//! for diag in orch.lint("python", Path::new("app.py"))? {
//!     println!("{diag}");
//! }
//! ```

mod adapter;
pub mod adapters;
mod custom;
mod diagnostic;
mod format;
mod language;
mod orchestrator;
mod registry;
mod runner;
mod severity;

pub use adapter::{Adapter, CommandTemplate, FILE_PLACEHOLDER, TemplateError};
pub use custom::{CustomAdapterConfig, CustomConfig};
pub use diagnostic::Diagnostic;
pub use format::{FormatError, FormatSpec, FormatToken, LineMatch, Matcher, SeverityGrammar};
pub use language::language_for_path;
pub use orchestrator::{
    LintError, LintReport, LintSummary, Orchestrator, SkippedTool, ToolFailurePolicy,
};
pub use registry::{AdapterRegistry, RegisteredAdapter, RegistryBuilder, RegistryError};
pub use runner::{CapturedOutput, CommandRunner, ProcessRunner, RunError};
pub use severity::{Severity, SeverityClassifier, StripSet, classify};
