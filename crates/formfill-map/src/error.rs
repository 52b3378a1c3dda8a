//! Error types for mapping lookup and table loading.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from mapping registry operations.
#[derive(Debug, Error)]
pub enum MapError {
    /// No mapping table is registered for the requested form.
    #[error("no field mapping registered for form '{form_id}'")]
    MappingNotFound { form_id: String },

    /// A mapping file could not be read.
    #[error("failed to read mapping file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A mapping file is not valid mapping JSON.
    #[error("failed to parse mapping file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Two files declare the same form identifier.
    #[error("duplicate mapping for form '{form_id}' in {path}")]
    Duplicate { form_id: String, path: PathBuf },
}

impl MapError {
    /// Create a MappingNotFound error.
    pub fn mapping_not_found(form_id: impl Into<String>) -> Self {
        Self::MappingNotFound {
            form_id: form_id.into(),
        }
    }
}

/// Result type alias for mapping operations.
pub type Result<T> = std::result::Result<T, MapError>;
