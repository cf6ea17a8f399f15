//! Designspace reading.
//!
//! Axes and sources come from a `.designspace` document parsed by norad.
//! Source paths are resolved against the document's directory.

use std::path::{Path, PathBuf};

use fea_merge::{Axis, AxisRegistry, Location};
use log::{debug, warn};
use norad::designspace::{DesignSpaceDocument, Source as NoradSource};

/// Errors that abort a run before any master is read.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Designspace file not found: {}", .0.display())]
    MissingDesignspace(PathBuf),

    #[error("Failed to parse designspace '{}': {message}", path.display())]
    Designspace { path: PathBuf, message: String },
}

/// A master source as listed in the designspace.
#[derive(Debug, Clone, PartialEq)]
pub struct DesignspaceSource {
    /// The source's `filename` attribute as written. Empty when the
    /// document gives none; such sources are skipped at load time.
    pub identifier: String,
    /// The source's `name` attribute.
    pub name: Option<String>,
    /// Resolved path to the UFO.
    pub path: PathBuf,
    pub location: Location,
}

/// The parts of a designspace the merge needs.
#[derive(Debug, Clone)]
pub struct Designspace {
    pub path: PathBuf,
    pub axes: AxisRegistry,
    pub sources: Vec<DesignspaceSource>,
}

impl Designspace {
    /// Load a designspace from a `.designspace` file.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        if !path.exists() {
            return Err(LoadError::MissingDesignspace(path.to_path_buf()));
        }

        let doc = DesignSpaceDocument::load(path).map_err(|e| LoadError::Designspace {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new(""));

        let designspace = Self::from_document(path, &doc, base_dir);
        debug!(
            "{}: {} axes, {} sources",
            path.display(),
            designspace.axes.len(),
            designspace.sources.len()
        );
        Ok(designspace)
    }

    /// Build from an already parsed document.
    pub fn from_document(path: &Path, doc: &DesignSpaceDocument, base_dir: &Path) -> Self {
        let axes = parse_axes(doc);
        let sources = doc
            .sources
            .iter()
            .map(|source| parse_source(source, &axes, base_dir))
            .collect();
        Self {
            path: path.to_path_buf(),
            axes,
            sources,
        }
    }
}

/// Axes without explicit bounds (discrete axes) are pinned to their default.
fn parse_axes(doc: &DesignSpaceDocument) -> AxisRegistry {
    doc.axes
        .iter()
        .map(|axis| {
            Axis::new(
                &axis.tag,
                &axis.name,
                axis.minimum.unwrap_or(axis.default),
                axis.default,
                axis.maximum.unwrap_or(axis.default),
            )
        })
        .collect()
}

fn parse_source(source: &NoradSource, axes: &AxisRegistry, base_dir: &Path) -> DesignspaceSource {
    DesignspaceSource {
        identifier: source.filename.clone(),
        name: source.name.clone(),
        path: base_dir.join(&source.filename),
        location: parse_location(source, axes),
    }
}

/// Dimensions are keyed by axis name in the document; map them to tags.
///
/// Dimensions without a design value are left out, giving a partial location.
fn parse_location(source: &NoradSource, axes: &AxisRegistry) -> Location {
    source
        .location
        .iter()
        .filter_map(|dim| {
            let value = dim.xvalue?;
            let tag = axes.tag_for(&dim.name).unwrap_or(dim.name.as_str());
            if let Some(axis) = axes.get(tag)
                && !axis.contains(value)
            {
                warn!(
                    "Source '{}' sits outside the {tag} axis range: {value}",
                    source.filename
                );
            }
            Some((tag.to_string(), value))
        })
        .collect()
}
