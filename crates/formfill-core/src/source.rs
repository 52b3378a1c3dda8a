//! Template byte sources.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors from loading template bytes.
#[derive(Debug, Error)]
pub enum SourceError {
    /// No template exists at the locator.
    #[error("template not found: {path}")]
    NotFound { path: PathBuf },

    /// Reading the template failed.
    #[error("failed to read template {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Supplies raw template bytes for a locator.
///
/// Retries and timeouts are the loader's concern, not the fill core's.
pub trait TemplateSource {
    fn load(&self, locator: &str) -> Result<Vec<u8>, SourceError>;
}

impl<T: TemplateSource + ?Sized> TemplateSource for &T {
    fn load(&self, locator: &str) -> Result<Vec<u8>, SourceError> {
        (**self).load(locator)
    }
}

/// Loads templates from files under a base directory.
#[derive(Debug, Clone)]
pub struct FsTemplateSource {
    base_dir: PathBuf,
}

impl FsTemplateSource {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }
}

impl TemplateSource for FsTemplateSource {
    fn load(&self, locator: &str) -> Result<Vec<u8>, SourceError> {
        let path = self.base_dir.join(locator);
        if !path.is_file() {
            return Err(SourceError::NotFound { path });
        }
        fs::read(&path).map_err(|source| SourceError::Io { path, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_template_is_not_found() {
        let source = FsTemplateSource::new("/definitely/not/a/dir");
        let err = source.load("form.pdf").unwrap_err();
        assert!(matches!(err, SourceError::NotFound { .. }));
    }
}
