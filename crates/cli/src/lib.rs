//! fea-merge CLI library: designspace and UFO reading around the merge engine.

pub mod cli;
pub mod designspace;
pub mod io;
pub mod masters;

pub use designspace::{Designspace, DesignspaceSource, LoadError};
pub use masters::{LoadReport, MasterWarning, load_masters};
