//! Adapter registry: adapters by name plus the language table.

use crate::{Adapter, FormatError, FormatSpec, Matcher, SeverityClassifier};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Error building an [`AdapterRegistry`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("adapter {adapter}: {source}")]
    InvalidFormat {
        adapter: String,
        #[source]
        source: FormatError,
    },
    #[error("language {language} references unknown adapter {adapter}")]
    UnknownAdapter { language: String, adapter: String },
}

/// An adapter together with its compiled matcher.
#[derive(Debug, Clone)]
pub struct RegisteredAdapter {
    pub adapter: Adapter,
    pub matcher: Arc<Matcher>,
}

/// Immutable table of adapters and the languages that use them.
///
/// Matchers are compiled when an adapter is registered and shared between
/// adapters with identical formats.
#[derive(Debug, Clone)]
pub struct AdapterRegistry {
    adapters: Vec<RegisteredAdapter>,
    languages: Vec<(String, Vec<String>)>,
}

impl AdapterRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Built-in adapters and the default language table.
    pub fn with_builtins() -> Result<Self, RegistryError> {
        Self::builtins().build()
    }

    /// Builder pre-filled with the built-ins, for layering user configuration.
    pub fn builtins() -> RegistryBuilder {
        let mut builder = RegistryBuilder::new();
        for adapter in crate::adapters::all_adapters() {
            builder = builder.adapter(adapter);
        }
        for (language, names) in crate::adapters::default_languages() {
            builder = builder.language(language, names);
        }
        builder
    }

    pub fn get(&self, name: &str) -> Option<&RegisteredAdapter> {
        self.adapters.iter().find(|a| a.adapter.name == name)
    }

    pub fn adapters(&self) -> impl Iterator<Item = &RegisteredAdapter> {
        self.adapters.iter()
    }

    /// Adapters configured for `language`, in run order.
    ///
    /// `None` means the language is not configured at all.
    pub fn for_language(&self, language: &str) -> Option<Vec<&RegisteredAdapter>> {
        let (_, names) = self.languages.iter().find(|(tag, _)| tag == language)?;
        Some(names.iter().filter_map(|name| self.get(name)).collect())
    }

    /// Configured languages, sorted by tag.
    pub fn languages(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.languages
            .iter()
            .map(|(tag, names)| (tag.as_str(), names.as_slice()))
    }
}

/// Builder for [`AdapterRegistry`].
#[derive(Debug, Clone, Default)]
pub struct RegistryBuilder {
    adapters: Vec<Adapter>,
    languages: Vec<(String, Vec<String>)>,
    classifier: SeverityClassifier,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an adapter, replacing any existing adapter with the same name.
    pub fn adapter(mut self, adapter: Adapter) -> Self {
        match self.adapters.iter_mut().find(|a| a.name == adapter.name) {
            Some(existing) => *existing = adapter,
            None => self.adapters.push(adapter),
        }
        self
    }

    /// Set the adapters for a language, replacing any previous list.
    pub fn language<I, S>(mut self, language: &str, adapters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = adapters.into_iter().map(Into::into).collect();
        match self.languages.iter_mut().find(|(tag, _)| tag == language) {
            Some((_, existing)) => *existing = names,
            None => self.languages.push((language.to_string(), names)),
        }
        self
    }

    /// Classifier used by `severity-from-message` in every adapter.
    pub fn classifier(mut self, classifier: SeverityClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn build(self) -> Result<AdapterRegistry, RegistryError> {
        for (language, names) in &self.languages {
            if let Some(missing) = names
                .iter()
                .find(|name| !self.adapters.iter().any(|a| &a.name == *name))
            {
                return Err(RegistryError::UnknownAdapter {
                    language: language.clone(),
                    adapter: missing.clone(),
                });
            }
        }

        let mut cache: HashMap<FormatSpec, Arc<Matcher>> = HashMap::new();
        let mut adapters = Vec::with_capacity(self.adapters.len());
        for adapter in self.adapters {
            let matcher = match cache.get(&adapter.format) {
                Some(matcher) => Arc::clone(matcher),
                None => {
                    let matcher = adapter
                        .format
                        .compile_with(self.classifier)
                        .map(Arc::new)
                        .map_err(|source| RegistryError::InvalidFormat {
                            adapter: adapter.name.clone(),
                            source,
                        })?;
                    cache.insert(adapter.format.clone(), Arc::clone(&matcher));
                    matcher
                }
            };
            adapters.push(RegisteredAdapter { adapter, matcher });
        }

        let mut languages = self.languages;
        languages.sort_by(|a, b| a.0.cmp(&b.0));

        Ok(AdapterRegistry {
            adapters,
            languages,
        })
    }
}
