//! Writing the merged feature file.

use std::{
    fs::{create_dir_all, write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

/// The output `.fea` file.
#[derive(Debug, Clone)]
pub struct FeatureFile {
    path: PathBuf,
}

impl FeatureFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the whole text in one call, replacing any existing file.
    pub fn write(&self, text: &str) -> Result<()> {
        self.ensure_parent_dir()?;
        write(&self.path, text)
            .with_context(|| format!("Failed to write features: {}", self.path.display()))
    }

    /// Create parent directory if it doesn't exist.
    pub fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        Ok(())
    }
}
