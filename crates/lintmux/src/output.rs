//! Output formatting utilities.
//!
//! Provides consistent JSON/text output across commands via the `OutputFormatter` trait.

use crate::merge::Merge;
use serde::{Deserialize, Serialize};
use std::io::IsTerminal;

/// Color output mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Auto-detect based on TTY (default)
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Configuration for pretty output mode.
///
/// Example config.toml:
/// ```toml
/// [pretty]
/// enabled = true       # auto-enable when TTY (default: auto)
/// colors = "auto"      # "auto", "always", or "never"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PrettyConfig {
    /// Enable pretty mode. None = auto (true when stdout is TTY)
    pub enabled: Option<bool>,
    /// Color mode: auto (default), always, or never
    pub colors: Option<ColorMode>,
}

impl Merge for PrettyConfig {
    fn merge(self, other: Self) -> Self {
        Self {
            enabled: self.enabled.merge(other.enabled),
            colors: self.colors.merge(other.colors),
        }
    }
}

impl PrettyConfig {
    /// Should pretty mode be enabled?
    /// Respects explicit setting, otherwise auto-detects TTY.
    pub fn enabled(&self) -> bool {
        self.enabled
            .unwrap_or_else(|| std::io::stdout().is_terminal())
    }

    /// Should colors be used?
    /// Respects colors setting and NO_COLOR env var.
    pub fn use_colors(&self) -> bool {
        if std::env::var("NO_COLOR").is_ok() {
            return false;
        }

        match self.colors.unwrap_or_default() {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => std::io::stdout().is_terminal(),
        }
    }
}

/// Output format and display mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Compact text output, no colors.
    #[default]
    Compact,
    /// Pretty text output (human-friendly, with colors if available).
    Pretty { colors: bool },
    /// JSON output.
    Json,
}

impl OutputFormat {
    /// Create from CLI flags and config (fully resolved).
    pub fn from_cli(json: bool, pretty: bool, compact: bool, config: &PrettyConfig) -> Self {
        if json {
            return OutputFormat::Json;
        }

        let is_pretty = if compact {
            false
        } else {
            pretty || config.enabled()
        };

        if is_pretty {
            OutputFormat::Pretty {
                colors: config.use_colors(),
            }
        } else {
            OutputFormat::Compact
        }
    }

    pub fn is_json(&self) -> bool {
        matches!(self, OutputFormat::Json)
    }

    pub fn use_colors(&self) -> bool {
        matches!(self, OutputFormat::Pretty { colors: true })
    }
}

/// Trait for types that can format output in multiple formats.
///
/// JSON serialization uses serde, while text formatting is custom.
pub trait OutputFormatter: Serialize {
    /// Format as compact text.
    fn format_text(&self) -> String;

    /// Format as pretty text (human-friendly with colors).
    /// Default implementation falls back to format_text().
    fn format_pretty(&self, _colors: bool) -> String {
        self.format_text()
    }

    /// Render in the specified format.
    fn render(&self, format: &OutputFormat) -> String {
        match format {
            OutputFormat::Compact => self.format_text(),
            OutputFormat::Pretty { colors } => self.format_pretty(*colors),
            OutputFormat::Json => serde_json::to_string(self).unwrap_or_default(),
        }
    }

    /// Print to stdout in the specified format.
    fn print(&self, format: &OutputFormat) {
        let out = self.render(format);
        if out.is_empty() || out.ends_with('\n') {
            print!("{}", out);
        } else {
            println!("{}", out);
        }
    }
}
