//! Adapter type: how to invoke one tool and how to read its output.

use crate::FormatSpec;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Placeholder replaced with the target path in command arguments.
pub const FILE_PLACEHOLDER: &str = "%f";

/// Error filling in a command template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("file path must be valid UTF-8: {0}")]
    NonUtf8Path(String),
    #[error("command template is empty")]
    Empty,
}

/// Argument vector with optional `%f` placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct CommandTemplate {
    argv: Vec<String>,
}

impl CommandTemplate {
    pub fn new<I, S>(argv: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            argv: argv.into_iter().map(Into::into).collect(),
        }
    }

    pub fn program(&self) -> Option<&str> {
        self.argv.first().map(String::as_str)
    }

    pub fn args(&self) -> &[String] {
        &self.argv
    }

    /// Whether the target file is passed on the command line.
    ///
    /// Tools without a placeholder work out their target from the project.
    pub fn takes_file(&self) -> bool {
        self.argv.iter().any(|a| a.contains(FILE_PLACEHOLDER))
    }

    /// Substitute `target` for every `%f`.
    pub fn materialize(&self, target: &Path) -> Result<Vec<String>, TemplateError> {
        if self.argv.is_empty() {
            return Err(TemplateError::Empty);
        }
        if !self.takes_file() {
            return Ok(self.argv.clone());
        }
        let path = target
            .to_str()
            .ok_or_else(|| TemplateError::NonUtf8Path(target.to_string_lossy().into_owned()))?;
        Ok(self
            .argv
            .iter()
            .map(|arg| arg.replace(FILE_PLACEHOLDER, path))
            .collect())
    }
}

impl std::fmt::Display for CommandTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.argv.join(" "))
    }
}

/// One external tool: its command and its diagnostic line format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Adapter {
    /// Logical name (e.g., "ruff", "gcc").
    pub name: String,
    pub command: CommandTemplate,
    pub format: FormatSpec,
    /// URL to tool website.
    pub website: Option<String>,
}

impl Adapter {
    pub fn new(name: impl Into<String>, command: CommandTemplate, format: FormatSpec) -> Self {
        Self {
            name: name.into(),
            command,
            format,
            website: None,
        }
    }

    pub fn with_website(mut self, url: &str) -> Self {
        self.website = Some(url.to_string());
        self
    }

    /// Check whether the tool's executable is on `PATH`.
    pub fn is_available(&self) -> bool {
        self.command
            .program()
            .is_some_and(|program| which::which(program).is_ok())
    }
}
