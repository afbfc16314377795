//! List command - show configured languages and their adapters.

use super::{EXIT_FAILURE, EXIT_OK};
use crate::config::LintmuxConfig;
use crate::output::{OutputFormat, OutputFormatter};
use lintmux_tools::AdapterRegistry;
use nu_ansi_term::Color::{Green, Red};
use serde::Serialize;
use std::fmt::Write;
use std::path::Path;

/// Adapter info for list output
#[derive(Debug, Serialize)]
pub struct AdapterItem {
    pub name: String,
    pub command: String,
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

/// One configured language
#[derive(Debug, Serialize)]
pub struct LanguageItem {
    pub language: String,
    pub adapters: Vec<AdapterItem>,
}

/// Result of list command
#[derive(Debug, Serialize)]
pub struct ListResult {
    pub languages: Vec<LanguageItem>,
}

impl ListResult {
    pub fn from_registry(registry: &AdapterRegistry, check_available: bool) -> Self {
        let languages = registry
            .languages()
            .map(|(language, _)| LanguageItem {
                language: language.to_string(),
                adapters: registry
                    .for_language(language)
                    .unwrap_or_default()
                    .into_iter()
                    .map(|registered| {
                        let adapter = &registered.adapter;
                        AdapterItem {
                            name: adapter.name.clone(),
                            command: adapter.command.to_string(),
                            available: check_available && adapter.is_available(),
                            website: adapter.website.clone(),
                        }
                    })
                    .collect(),
            })
            .collect();
        Self { languages }
    }
}

impl OutputFormatter for ListResult {
    fn format_text(&self) -> String {
        let mut out = String::new();
        for lang in &self.languages {
            let names: Vec<&str> = lang.adapters.iter().map(|a| a.name.as_str()).collect();
            writeln!(out, "{}: {}", lang.language, names.join(", ")).unwrap();
        }
        out
    }

    fn format_pretty(&self, colors: bool) -> String {
        let mut out = String::from("Configured languages:\n\n");
        for lang in &self.languages {
            writeln!(out, "  {}", lang.language).unwrap();
            for adapter in &lang.adapters {
                let status = match (adapter.available, colors) {
                    (true, true) => Green.paint("✓").to_string(),
                    (false, true) => Red.paint("✗").to_string(),
                    (true, false) => "✓".to_string(),
                    (false, false) => "✗".to_string(),
                };
                writeln!(out, "    {} {}", status, adapter.name).unwrap();
                writeln!(out, "      Command: {}", adapter.command).unwrap();
                if let Some(url) = &adapter.website {
                    writeln!(out, "      Website: {}", url).unwrap();
                }
            }
            writeln!(out).unwrap();
        }
        out
    }
}

/// Run the list command.
pub fn run(root: Option<&Path>, format: &OutputFormat) -> i32 {
    let root = root.unwrap_or_else(|| Path::new("."));
    let config = LintmuxConfig::load(root);
    let registry = match config.registry() {
        Ok(registry) => registry,
        Err(e) => {
            eprintln!("error: invalid configuration: {}", e);
            return EXIT_FAILURE;
        }
    };

    ListResult::from_registry(&registry, true).print(format);
    EXIT_OK
}
