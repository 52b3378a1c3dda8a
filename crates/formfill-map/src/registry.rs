//! Registry of per-form mapping tables.
//!
//! Tables are external configuration data, versioned independently of the
//! engine. The registry loads one JSON file per form from a directory
//! (`<form_id>.json`), or starts from the bundled sample tables. It is
//! populated once and read-only afterwards; lookups have no side effects.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use tracing::debug;

use formfill_model::FormMapping;

use crate::error::{MapError, Result};

/// Holds the mapping table for each registered form.
#[derive(Debug, Clone, Default)]
pub struct MappingRegistry {
    mappings: BTreeMap<String, FormMapping>,
}

impl MappingRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a mapping table, replacing any previous table for the form.
    pub fn register(&mut self, mapping: FormMapping) {
        self.mappings.insert(mapping.form_id.clone(), mapping);
    }

    /// Look up the mapping table for a form.
    pub fn get(&self, form_id: &str) -> Result<&FormMapping> {
        self.mappings
            .get(form_id)
            .ok_or_else(|| MapError::mapping_not_found(form_id))
    }

    /// Registered form identifiers, sorted.
    pub fn form_ids(&self) -> Vec<&str> {
        self.mappings.keys().map(String::as_str).collect()
    }

    /// Iterate over all registered mapping tables.
    pub fn mappings(&self) -> impl Iterator<Item = &FormMapping> {
        self.mappings.values()
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    /// Load every `*.json` mapping file in a directory.
    ///
    /// Files that are not mapping JSON fail the load; two files declaring
    /// the same form identifier are rejected rather than silently merged.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let mut registry = Self::new();
        let entries = fs::read_dir(dir).map_err(|source| MapError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        for entry in entries {
            let entry = entry.map_err(|source| MapError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
            let path = entry.path();
            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let contents = fs::read_to_string(&path).map_err(|source| MapError::Io {
                path: path.clone(),
                source,
            })?;
            let mapping: FormMapping =
                serde_json::from_str(&contents).map_err(|source| MapError::Parse {
                    path: path.clone(),
                    source,
                })?;
            if registry.mappings.contains_key(&mapping.form_id) {
                return Err(MapError::Duplicate {
                    form_id: mapping.form_id,
                    path,
                });
            }
            debug!(form_id = %mapping.form_id, path = %path.display(), "loaded mapping table");
            registry.register(mapping);
        }
        Ok(registry)
    }
}
