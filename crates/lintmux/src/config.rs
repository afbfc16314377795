//! Configuration system for lintmux.
//!
//! Loads config from:
//! 1. Global: ~/.config/lintmux/config.toml
//! 2. Per-project: .lintmux/config.toml (overrides global)
//!
//! Example config.toml:
//! ```toml
//! [lint]
//! on_tool_failure = "skip"    # "abort" (default) or "skip"
//! only_target = true          # drop diagnostics for other files (default: false)
//!
//! [severity]
//! strip = "punctuation"       # "whitespace" (default) or "punctuation"
//!
//! [languages]
//! python = ["ruff"]           # replaces the built-in list
//!
//! [adapters.mylint]
//! command = ["mylint", "--plain", "%f"]
//! format = ["filename", { literal = ":" }, "line", { literal = ": " }, "message", "severity-from-message"]
//!
//! [pretty]
//! colors = "auto"             # "auto", "always", or "never"
//! ```

use crate::merge::Merge;
use crate::output::PrettyConfig;
use lintmux_tools::{
    AdapterRegistry, CustomConfig, RegistryError, SeverityClassifier, StripSet, ToolFailurePolicy,
};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Lint run configuration.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct LintConfig {
    /// What to do when a tool cannot be started. Default: abort
    pub on_tool_failure: Option<ToolFailurePolicy>,
    /// Drop diagnostics for files other than the one being linted. Default: false
    pub only_target: Option<bool>,
}

impl LintConfig {
    pub fn on_tool_failure(&self) -> ToolFailurePolicy {
        self.on_tool_failure.unwrap_or_default()
    }

    pub fn only_target(&self) -> bool {
        self.only_target.unwrap_or(false)
    }
}

impl Merge for LintConfig {
    fn merge(self, other: Self) -> Self {
        Self {
            on_tool_failure: self.on_tool_failure.merge(other.on_tool_failure),
            only_target: self.only_target.merge(other.only_target),
        }
    }
}

/// Severity classifier configuration.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct SeverityConfig {
    /// Characters stripped before matching severity words. Default: whitespace
    pub strip: Option<StripSet>,
}

impl SeverityConfig {
    pub fn classifier(&self) -> SeverityClassifier {
        SeverityClassifier::new(self.strip.unwrap_or_default())
    }
}

impl Merge for SeverityConfig {
    fn merge(self, other: Self) -> Self {
        Self {
            strip: self.strip.merge(other.strip),
        }
    }
}

/// Root configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct LintmuxConfig {
    pub lint: LintConfig,
    pub severity: SeverityConfig,
    pub pretty: PrettyConfig,
    /// `[adapters.*]` and `[languages]` tables.
    #[serde(flatten)]
    pub custom: CustomConfig,
}

impl Merge for LintmuxConfig {
    fn merge(self, other: Self) -> Self {
        Self {
            lint: self.lint.merge(other.lint),
            severity: self.severity.merge(other.severity),
            pretty: self.pretty.merge(other.pretty),
            custom: self.custom.merge(other.custom),
        }
    }
}

impl LintmuxConfig {
    /// Load configuration for a project.
    ///
    /// Loads global config from ~/.config/lintmux/config.toml,
    /// then merges with per-project config from .lintmux/config.toml.
    pub fn load(root: &Path) -> Self {
        Self::load_layers(Self::global_config_path().as_deref(), root)
    }

    fn load_layers(global: Option<&Path>, root: &Path) -> Self {
        let mut config = Self::default();

        if let Some(global) = global.and_then(Self::load_file) {
            config = config.merge(global);
        }

        let project_path = root.join(".lintmux").join("config.toml");
        if let Some(project) = Self::load_file(&project_path) {
            config = config.merge(project);
        }

        config
    }

    /// Built-in adapters with this config's adapters, languages and
    /// classifier layered on top.
    pub fn registry(&self) -> Result<AdapterRegistry, RegistryError> {
        let builder = AdapterRegistry::builtins().classifier(self.severity.classifier());
        self.custom.apply(builder).build()
    }

    /// Get the global config path.
    fn global_config_path() -> Option<PathBuf> {
        let config_home = std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .ok()
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))?;
        Some(config_home.join("lintmux").join("config.toml"))
    }

    /// Load config from a file path. Missing files are silently skipped.
    fn load_file(path: &Path) -> Option<Self> {
        let content = std::fs::read_to_string(path).ok()?;
        match toml::from_str(&content) {
            Ok(config) => {
                log::debug!("loaded config from {}", path.display());
                Some(config)
            }
            Err(e) => {
                log::warn!("ignoring {}: {}", path.display(), e);
                None
            }
        }
    }
}
