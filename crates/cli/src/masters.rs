//! Reading feature text from the designspace's UFO masters.

use std::path::{Path, PathBuf};

use fea_merge::{MasterRegistry, MasterSource};
use log::{debug, info, warn};
use norad::{DataRequest, Font};
use rayon::prelude::*;

use crate::designspace::DesignspaceSource;

/// A master that was skipped. The run carries on without it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MasterWarning {
    #[error("UFO not found at {} (source '{identifier}')", path.display())]
    MissingSource { identifier: String, path: PathBuf },

    #[error("Source '{identifier}' has no filename")]
    MissingFilename { identifier: String },

    #[error("Error loading UFO {}: {message}", path.display())]
    LoadFailed {
        identifier: String,
        path: PathBuf,
        message: String,
    },
}

impl MasterWarning {
    pub fn identifier(&self) -> &str {
        match self {
            Self::MissingSource { identifier, .. }
            | Self::MissingFilename { identifier }
            | Self::LoadFailed { identifier, .. } => identifier,
        }
    }
}

/// Masters that loaded, plus a warning for each one that did not.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub masters: MasterRegistry,
    pub warnings: Vec<MasterWarning>,
}

impl LoadReport {
    pub fn all_loaded(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Load the feature text of every source in parallel.
///
/// Masters enter the registry in designspace order regardless of which
/// finished loading first.
pub fn load_masters(sources: &[DesignspaceSource]) -> LoadReport {
    let results: Vec<_> = sources.par_iter().map(load_master).collect();

    let mut loaded = Vec::with_capacity(results.len());
    let mut warnings = Vec::new();
    for result in results {
        match result {
            Ok(master) => loaded.push(master),
            Err(warning) => {
                warn!("{warning}");
                warnings.push(warning);
            }
        }
    }

    info!(
        "Loaded {} of {} masters ({} skipped)",
        loaded.len(),
        sources.len(),
        warnings.len()
    );

    LoadReport {
        masters: loaded.into_iter().collect(),
        warnings,
    }
}

fn load_master(source: &DesignspaceSource) -> Result<MasterSource, MasterWarning> {
    if source.identifier.is_empty() {
        return Err(MasterWarning::MissingFilename {
            identifier: source.name.clone().unwrap_or_else(|| "unnamed".to_string()),
        });
    }
    if !source.path.exists() {
        return Err(MasterWarning::MissingSource {
            identifier: source.identifier.clone(),
            path: source.path.clone(),
        });
    }

    let features = read_features(&source.path).map_err(|message| MasterWarning::LoadFailed {
        identifier: source.identifier.clone(),
        path: source.path.clone(),
        message,
    })?;
    debug!("{}: {} bytes of feature text", source.identifier, features.len());

    Ok(MasterSource {
        identifier: source.identifier.clone(),
        location: source.location.clone(),
        features,
    })
}

/// Only `features.fea` is read; glyph layers are left on disk.
fn read_features(path: &Path) -> Result<String, String> {
    Font::load_requested_data(path, DataRequest::none().features(true))
        .map(|font| font.features)
        .map_err(|e| e.to_string())
}
