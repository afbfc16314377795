//! Layering of configuration values: later (more specific) wins.

use lintmux_tools::CustomConfig;
use std::collections::BTreeMap;

/// Combine two configuration values, `other` taking precedence.
pub trait Merge {
    fn merge(self, other: Self) -> Self;
}

impl<T> Merge for Option<T> {
    fn merge(self, other: Self) -> Self {
        other.or(self)
    }
}

impl<K: Ord, V> Merge for BTreeMap<K, V> {
    fn merge(mut self, other: Self) -> Self {
        self.extend(other);
        self
    }
}

impl Merge for CustomConfig {
    fn merge(self, other: Self) -> Self {
        CustomConfig {
            adapters: self.adapters.merge(other.adapters),
            languages: self.languages.merge(other.languages),
        }
    }
}
