//! Registry entity
//!
//! The analyzer registry is the desired state: one entry per analyzer that
//! should be running as a compose service.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Suffix appended to every analyzer identifier
pub const ANALYZER_SUFFIX: &str = "analyzer";

/// Metadata declared for one analyzer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryEntry {
    /// Human-readable analyzer name
    pub name: String,
    /// Config file path, relative to the frontend source root
    pub config_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub python_path: Option<String>,
    /// Fields written by other tools, kept as-is on rewrite
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl RegistryEntry {
    pub fn new(name: impl Into<String>, config_path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            config_path: config_path.into(),
            component_name: None,
            python_path: None,
            extra: BTreeMap::new(),
        }
    }

    pub fn with_component_name(mut self, component_name: impl Into<String>) -> Self {
        self.component_name = Some(component_name.into());
        self
    }
}

/// Analyzer registry keyed by identifier
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Registry {
    entries: BTreeMap<String, RegistryEntry>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: BTreeMap<String, RegistryEntry>) -> Self {
        Self { entries }
    }

    pub fn insert(&mut self, id: impl Into<String>, entry: RegistryEntry) {
        self.entries.insert(id.into(), entry);
    }

    /// Remove an entry, returning whether it was present
    pub fn remove(&mut self, id: &str) -> bool {
        self.entries.remove(id).is_some()
    }

    pub fn get(&self, id: &str) -> Option<&RegistryEntry> {
        self.entries.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Identifiers in sorted order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn entries(&self) -> &BTreeMap<String, RegistryEntry> {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Compact form of a display name: whitespace removed, lowercased
pub fn compact_name(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Derive the registry identifier for a display name (`"Foo Bar"` -> `foobaranalyzer`)
pub fn analyzer_id(name: &str) -> String {
    format!("{}{}", compact_name(name), ANALYZER_SUFFIX)
}
