//! Assembly of the merged feature file.

use std::fmt;

use crate::{GlyphClasses, KernRule, MergeOptions, classes::class_declaration};

/// Everything merged from the masters, ready to be written out.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CombinedFeatures {
    pub classes: GlyphClasses,
    pub kern_rules: Vec<KernRule>,
    /// Non-kern feature blocks, verbatim.
    pub passthrough: Vec<String>,
}

impl CombinedFeatures {
    /// Render as feature-file text.
    ///
    /// Sections come in a fixed order: header, classes, `kern` block, then
    /// pass-through blocks. Empty sections are left out.
    pub fn render(&self, options: &MergeOptions) -> String {
        let mut lines: Vec<String> = options.header.clone();
        lines.push(String::new());

        if !self.classes.is_empty() {
            if options.class_comment {
                lines.push("# Glyph class definitions".to_string());
            }
            lines.extend(
                self.classes
                    .iter()
                    .map(|(name, glyphs)| class_declaration(name, glyphs)),
            );
            lines.push(String::new());
        }

        if !self.kern_rules.is_empty() {
            lines.push("feature kern {".to_string());
            lines.extend(self.kern_rules.iter().map(|rule| format!("{}{rule}", options.indent)));
            lines.push("} kern;".to_string());
            lines.push(String::new());
        }

        for block in &self.passthrough {
            lines.push(block.clone());
            lines.push(String::new());
        }

        lines.join("\n")
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty() && self.kern_rules.is_empty() && self.passthrough.is_empty()
    }
}

impl fmt::Display for CombinedFeatures {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&MergeOptions::default()))
    }
}
