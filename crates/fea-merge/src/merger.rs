//! Main Merger implementation

use log::{debug, info};

use crate::{
    CombinedFeatures, Error, GlyphClasses, KernStatement, MasterRegistry, MergeOptions, Result,
    blocks::collect_passthrough_blocks,
    classes::{merge_glyph_classes, parse_glyph_classes},
    kern::{kern_rules, merge_kern_statements, parse_kern_statements},
};

/// Feature merger that combines the feature text of several masters
#[derive(Debug, Default)]
pub struct Merger {
    options: MergeOptions,
}

impl Merger {
    /// Create a new Merger with the given options
    pub fn new(options: MergeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &MergeOptions {
        &self.options
    }

    /// Merge the feature text of every master in the registry
    pub fn merge(&self, masters: &MasterRegistry) -> Result<CombinedFeatures> {
        if masters.is_empty() {
            return Err(Error::NoMasters);
        }

        let mut class_parses: Vec<GlyphClasses> = Vec::with_capacity(masters.len());
        let mut statements: Vec<(&str, Vec<KernStatement>)> = Vec::with_capacity(masters.len());
        for master in masters.iter() {
            let classes = parse_glyph_classes(&master.features);
            let kern = parse_kern_statements(&master.features);
            debug!(
                "{}: {} classes, {} kern statements",
                master.identifier,
                classes.len(),
                kern.len()
            );
            class_parses.push(classes);
            statements.push((master.identifier.as_str(), kern));
        }

        let classes = merge_glyph_classes(&class_parses);
        let entries = merge_kern_statements(
            statements
                .iter()
                .map(|(identifier, kern)| (*identifier, kern.as_slice())),
        );
        let kern_rules = kern_rules(&entries, masters)?;
        let passthrough: Vec<String> =
            collect_passthrough_blocks(masters.iter().map(|m| m.features.as_str()))
                .into_iter()
                .map(str::to_owned)
                .collect();

        info!(
            "Merged {} masters: {} classes, {} kern rules ({} dropped), {} other feature blocks",
            masters.len(),
            classes.len(),
            kern_rules.len(),
            entries.len() - kern_rules.len(),
            passthrough.len()
        );

        Ok(CombinedFeatures { classes, kern_rules, passthrough })
    }

    /// Merge and render in one step
    pub fn merge_to_string(&self, masters: &MasterRegistry) -> Result<String> {
        Ok(self.merge(masters)?.render(&self.options))
    }
}
