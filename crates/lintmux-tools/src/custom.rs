//! User-defined adapters and language overrides.
//!
//! Declared in config TOML:
//!
//! ```toml
//! [languages]
//! python = ["ruff", "pylint"]
//!
//! [adapters.pylint]
//! command = ["pylint", "--output-format=parseable", "--score=n", "%f"]
//! format = [
//!     "filename", { literal = ":" }, "line", { literal = ": [" },
//!     { severity-pattern = { codes = { E = "error", F = "error" }, fallback = "warning", lookahead = true } },
//!     "message",
//! ]
//! website = "https://pylint.readthedocs.io/"
//! ```

use crate::{Adapter, CommandTemplate, FormatSpec, RegistryBuilder};
use serde::Deserialize;
use std::collections::BTreeMap;

/// Configuration for a single user-defined adapter.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CustomAdapterConfig {
    /// Command to run (first element is executable, `%f` is the target file).
    pub command: Vec<String>,
    /// Layout of one diagnostic line.
    pub format: FormatSpec,
    /// Website/documentation URL.
    #[serde(default)]
    pub website: Option<String>,
}

impl CustomAdapterConfig {
    pub fn into_adapter(self, name: &str) -> Adapter {
        let adapter = Adapter::new(name, CommandTemplate::new(self.command), self.format);
        match self.website {
            Some(url) => adapter.with_website(&url),
            None => adapter,
        }
    }
}

/// Adapters and language lists layered over the built-ins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CustomConfig {
    pub adapters: BTreeMap<String, CustomAdapterConfig>,
    pub languages: BTreeMap<String, Vec<String>>,
}

impl CustomConfig {
    /// Add custom adapters and language lists to `builder`.
    ///
    /// Adapters with an empty command or an invalid format are skipped with a
    /// warning; same-named built-ins stay in place.
    pub fn apply(&self, mut builder: RegistryBuilder) -> RegistryBuilder {
        for (name, config) in &self.adapters {
            if config.command.is_empty() {
                log::warn!("adapter {}: empty command, ignoring", name);
                continue;
            }
            if let Err(e) = config.format.compile() {
                log::warn!("adapter {}: {}, ignoring", name, e);
                continue;
            }
            builder = builder.adapter(config.clone().into_adapter(name));
        }
        for (language, names) in &self.languages {
            builder = builder.language(language, names.iter().cloned());
        }
        builder
    }
}
