//! Glyph class declarations (`@NAME = [a b c];`).

use std::{collections::BTreeSet, sync::LazyLock};

use indexmap::{IndexMap, IndexSet};
use regex::Regex;

static CLASS_DECLARATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)@([A-Za-z0-9_.]+)\s*=\s*\[(.*?)\];").expect("class declaration pattern")
});

/// Glyph classes by name, in declaration order.
pub type GlyphClasses = IndexMap<String, Vec<String>>;

/// Extract every glyph class declaration from feature text.
///
/// Glyphs keep their written order with duplicates removed. Declarations
/// without a closing `];` simply do not match, unless a later declaration
/// supplies one: then the unterminated class absorbs everything up to it.
/// Redeclaring a name replaces the earlier glyph list but keeps its position.
pub fn parse_glyph_classes(text: &str) -> GlyphClasses {
    let mut classes = GlyphClasses::new();
    for caps in CLASS_DECLARATION.captures_iter(text) {
        let glyphs: IndexSet<&str> = caps[2].split_whitespace().collect();
        classes.insert(
            caps[1].to_string(),
            glyphs.into_iter().map(str::to_owned).collect(),
        );
    }
    classes
}

/// Union classes of the same name across masters.
///
/// Class order follows first appearance; each glyph list is sorted
/// lexically so the result does not depend on which master declared what.
pub fn merge_glyph_classes<'a>(parses: impl IntoIterator<Item = &'a GlyphClasses>) -> GlyphClasses {
    let mut merged: IndexMap<String, BTreeSet<String>> = IndexMap::new();
    for classes in parses {
        for (name, glyphs) in classes {
            merged
                .entry(name.clone())
                .or_default()
                .extend(glyphs.iter().cloned());
        }
    }
    merged
        .into_iter()
        .map(|(name, glyphs)| (name, glyphs.into_iter().collect()))
        .collect()
}

/// Render one class as a feature-file declaration.
pub fn class_declaration(name: &str, glyphs: &[String]) -> String {
    format!("@{name} = [{}];", glyphs.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_single_and_multiline_declarations() {
        let text = "@UC = [A B C];\n@lc.alt = [\n    a.alt\n    b.alt\n];\n";
        let classes = parse_glyph_classes(text);

        assert_eq!(classes.len(), 2);
        assert_eq!(classes["UC"], ["A", "B", "C"]);
        assert_eq!(classes["lc.alt"], ["a.alt", "b.alt"]);
    }

    #[test]
    fn drops_duplicate_glyphs_keeping_order() {
        let classes = parse_glyph_classes("@X = [ c a c b a ];");
        assert_eq!(classes["X"], ["c", "a", "b"]);
    }

    #[test]
    fn unterminated_declaration_is_skipped() {
        let classes = parse_glyph_classes("@Broken = [A B\n@Ok = C;");
        assert!(classes.is_empty());
    }

    #[test]
    fn unterminated_declaration_absorbs_the_next_one() {
        let classes = parse_glyph_classes("@Broken = [A B\n@Ok = [C];");

        assert_eq!(classes.len(), 1);
        assert_eq!(classes["Broken"], ["A", "B", "@Ok", "=", "[C"]);
        assert!(!classes.contains_key("Ok"));
    }

    #[test]
    fn redeclaration_replaces_glyphs() {
        let classes = parse_glyph_classes("@A = [x];\n@B = [y];\n@A = [z];");
        let names: Vec<_> = classes.keys().map(String::as_str).collect();
        assert_eq!(names, ["A", "B"]);
        assert_eq!(classes["A"], ["z"]);
    }

    #[test]
    fn merge_unions_and_sorts() {
        let light = parse_glyph_classes("@UPPERCASE = [C D];");
        let bold = parse_glyph_classes("@UPPERCASE = [A B D];\n@digits = [one];");

        let merged = merge_glyph_classes([&light, &bold]);

        assert_eq!(merged["UPPERCASE"], ["A", "B", "C", "D"]);
        assert_eq!(merged["digits"], ["one"]);
        let names: Vec<_> = merged.keys().map(String::as_str).collect();
        assert_eq!(names, ["UPPERCASE", "digits"]);
    }

    #[test]
    fn merge_is_idempotent() {
        let one = parse_glyph_classes("@UC = [B A];");
        assert_eq!(merge_glyph_classes([&one]), merge_glyph_classes([&one, &one]));
    }

    #[test]
    fn declaration_reparses() {
        let glyphs = vec!["A".to_string(), "B".to_string()];
        let text = class_declaration("UC", &glyphs);

        assert_eq!(text, "@UC = [A B];");
        assert_eq!(parse_glyph_classes(&text)["UC"], glyphs);
    }
}
