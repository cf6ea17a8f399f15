//! Pair positioning statements from the `kern` feature and their merge.

use std::{fmt, sync::LazyLock};

use indexmap::IndexMap;
use log::debug;
use regex::Regex;

use crate::{
    MasterRegistry, Result,
    blocks::kern_block,
    value::{DEGENERATE_VALUE, format_variable_value},
};

static POS_STATEMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(enum\s+)?pos\s+([^(;]+?)(?:\s*\(([^)]*)\))?\s*:\s*([^;]+);")
        .expect("pos statement pattern")
});

static INTEGER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-?\d+").expect("integer pattern"));

/// Merge key of a positioning statement.
///
/// `glyphs` is compared as written, so `A V` and `A  V` are different pairs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KernKey {
    pub glyphs: String,
    pub is_enum: bool,
}

impl KernKey {
    pub fn new(glyphs: impl Into<String>, is_enum: bool) -> Self {
        Self { glyphs: glyphs.into(), is_enum }
    }
}

/// One `[enum] pos <glyphs> [(<conditions>)] : <value>;` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KernStatement {
    pub key: KernKey,
    /// Raw text of the parenthesised condition list.
    ///
    /// Kept for callers that want it; merged rules do not carry conditions.
    pub conditions: Option<String>,
    /// Trimmed text after the colon.
    pub value: String,
}

impl KernStatement {
    /// First signed integer literal in the value, if any.
    pub fn numeric_value(&self) -> Option<i64> {
        let literal = INTEGER.find(&self.value)?.as_str();
        match literal.parse() {
            Ok(value) => Some(value),
            Err(e) => {
                debug!("Dropping pos {}: value {literal} out of range ({e})", self.key.glyphs);
                None
            }
        }
    }
}

/// Extract positioning statements from the first `kern` block of feature text.
///
/// Only the colon form is recognised; `pos A V (-50);` does not match.
pub fn parse_kern_statements(text: &str) -> Vec<KernStatement> {
    let Some(block) = kern_block(text) else {
        return Vec::new();
    };

    POS_STATEMENT
        .captures_iter(block.body)
        .map(|caps| KernStatement {
            key: KernKey::new(caps[2].trim(), caps.get(1).is_some()),
            conditions: caps.get(3).map(|m| m.as_str().to_string()),
            value: caps[4].trim().to_string(),
        })
        .collect()
}

/// Values of one pair across masters, in the order masters reported them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedKernEntry {
    pub key: KernKey,
    pub values: IndexMap<String, i64>,
}

/// Group statements from every master by key, in first-seen key order.
///
/// Statements without an integer value are left out. If a master repeats a
/// pair, its last value wins.
pub fn merge_kern_statements<'a>(
    per_master: impl IntoIterator<Item = (&'a str, &'a [KernStatement])>,
) -> Vec<MergedKernEntry> {
    let mut grouped: IndexMap<&KernKey, IndexMap<String, i64>> = IndexMap::new();
    for (identifier, statements) in per_master {
        for statement in statements {
            if let Some(value) = statement.numeric_value() {
                grouped
                    .entry(&statement.key)
                    .or_default()
                    .insert(identifier.to_string(), value);
            }
        }
    }
    grouped
        .into_iter()
        .map(|(key, values)| MergedKernEntry { key: key.clone(), values })
        .collect()
}

/// A merged pair rule with its variable value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KernRule {
    pub key: KernKey,
    pub value: String,
}

impl fmt::Display for KernRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = if self.key.is_enum { "enum " } else { "" };
        write!(f, "{prefix}pos {} ({});", self.key.glyphs, self.value)
    }
}

/// Format merged entries, dropping those with no positioned master.
pub fn kern_rules(entries: &[MergedKernEntry], masters: &MasterRegistry) -> Result<Vec<KernRule>> {
    let mut rules = Vec::with_capacity(entries.len());
    for entry in entries {
        let value = format_variable_value(&entry.values, masters)?;
        if value != DEGENERATE_VALUE {
            rules.push(KernRule { key: entry.key.clone(), value });
        }
    }
    Ok(rules)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MasterSource;

    #[test]
    fn parses_statements_inside_kern_block_only() {
        let text = "feature liga { pos X Y : 10; } liga;\n\
                    feature kern {\n    pos A V : -50;\n    enum pos @UC o (wght > 500) : -20 ;\n} kern;";
        let statements = parse_kern_statements(text);

        assert_eq!(
            statements,
            [
                KernStatement {
                    key: KernKey::new("A V", false),
                    conditions: None,
                    value: "-50".to_string(),
                },
                KernStatement {
                    key: KernKey::new("@UC o", true),
                    conditions: Some("wght > 500".to_string()),
                    value: "-20".to_string(),
                },
            ]
        );
    }

    #[test]
    fn no_kern_block_means_no_statements() {
        assert!(parse_kern_statements("pos A V : -50;").is_empty());
    }

    #[test]
    fn parenthesised_value_form_is_not_recognised() {
        assert!(parse_kern_statements("feature kern { pos A V (-50); } kern;").is_empty());
    }

    #[test]
    fn numeric_value_takes_first_integer() {
        let statement = |value: &str| KernStatement {
            key: KernKey::new("A V", false),
            conditions: None,
            value: value.to_string(),
        };

        assert_eq!(statement("-50").numeric_value(), Some(-50));
        assert_eq!(statement("<0 0 -30 0>").numeric_value(), Some(0));
        assert_eq!(statement("<NULL>").numeric_value(), None);
        assert_eq!(statement("99999999999999999999").numeric_value(), None);
    }

    #[test]
    fn whitespace_differences_are_different_keys() {
        let light = parse_kern_statements("feature kern { pos A V : -50; } kern;");
        let bold = parse_kern_statements("feature kern { pos A  V : -80; } kern;");

        let entries = merge_kern_statements([("Light.ufo", light.as_slice()), ("Bold.ufo", bold.as_slice())]);

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].key.glyphs, "A V");
        assert_eq!(entries[1].key.glyphs, "A  V");
    }

    #[test]
    fn enum_flag_is_part_of_the_key() {
        let statements = parse_kern_statements("feature kern { pos A V : -5; enum pos A V : -6; } kern;");
        let entries = merge_kern_statements([("Light.ufo", statements.as_slice())]);
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn degenerate_entries_are_dropped() {
        let masters: MasterRegistry = [
            MasterSource::new("Light.ufo", [("wght", 100.0)], ""),
            MasterSource::new("Regular.ufo", Vec::<(&str, f32)>::new(), ""),
        ]
        .into_iter()
        .collect();
        let light = parse_kern_statements("feature kern { pos A V : -50; } kern;");
        let regular = parse_kern_statements("feature kern { pos A V : -40; pos T o : -70; } kern;");

        let entries = merge_kern_statements([
            ("Light.ufo", light.as_slice()),
            ("Regular.ufo", regular.as_slice()),
        ]);
        let rules = kern_rules(&entries, &masters).unwrap();

        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].to_string(), "pos A V (wght=100:-50);");
    }

    #[test]
    fn rule_keeps_enum_prefix() {
        let rule = KernRule {
            key: KernKey::new("@UC o", true),
            value: "wght=100:-20".to_string(),
        };
        assert_eq!(rule.to_string(), "enum pos @UC o (wght=100:-20);");
    }
}
