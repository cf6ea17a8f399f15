//! # fea-merge
//!
//! Merge the OpenType feature text of several design masters into a single
//! feature file using variable value syntax.
//!
//! Glyph classes are unioned across masters, `kern` pair statements are
//! matched by their glyph text and rewritten as `axis=coordinate:value`
//! lists, and every other feature block is passed through once.
//!
//! ## Example
//!
//! ```
//! use fea_merge::{MasterRegistry, MasterSource, merge_features};
//!
//! let masters: MasterRegistry = [
//!     MasterSource::new("Light.ufo", [("wght", 100.0)], "feature kern { pos A V : -50 ; } kern;"),
//!     MasterSource::new("Bold.ufo", [("wght", 900.0)], "feature kern { pos A V : -80 ; } kern;"),
//! ]
//! .into_iter()
//! .collect();
//!
//! let text = merge_features(&masters).unwrap();
//! assert!(text.contains("    pos A V (wght=100:-50 wght=900:-80);"));
//! ```

mod axis;
mod blocks;
mod classes;
mod error;
mod kern;
mod master;
mod merger;
mod options;
mod output;
mod value;

pub use axis::{Axis, AxisRegistry};
pub use blocks::{FeatureBlock, KERN_TAG, collect_passthrough_blocks, feature_blocks, kern_block};
pub use classes::{GlyphClasses, class_declaration, merge_glyph_classes, parse_glyph_classes};
pub use error::{Error, Result};
pub use kern::{
    KernKey, KernRule, KernStatement, MergedKernEntry, kern_rules, merge_kern_statements,
    parse_kern_statements,
};
pub use master::{Location, MasterRegistry, MasterSource};
pub use merger::Merger;
pub use options::{DEFAULT_HEADER, MergeOptions};
pub use output::CombinedFeatures;
pub use value::{DEGENERATE_VALUE, format_coordinate, format_location, format_variable_value};

/// Merge the feature text of every master using default options.
///
/// This is a convenience wrapper around [`Merger`].
pub fn merge_features(masters: &MasterRegistry) -> Result<String> {
    Merger::default().merge_to_string(masters)
}
