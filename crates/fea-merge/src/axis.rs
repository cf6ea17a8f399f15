//! Variation axes declared by a designspace.

use indexmap::IndexMap;

/// A variation axis in the designspace.
#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    /// Four-character axis tag (e.g., "wght", "ital")
    pub tag: String,
    /// Human-readable axis name
    pub name: String,
    /// Minimum value on this axis
    pub minimum: f32,
    /// Default value on this axis
    pub default: f32,
    /// Maximum value on this axis
    pub maximum: f32,
}

impl Axis {
    /// Create a new axis.
    pub fn new(tag: &str, name: &str, minimum: f32, default: f32, maximum: f32) -> Self {
        Self {
            tag: tag.to_string(),
            name: name.to_string(),
            minimum,
            default,
            maximum,
        }
    }

    /// Whether `value` lies within `minimum..=maximum`.
    pub fn contains(&self, value: f32) -> bool {
        (self.minimum..=self.maximum).contains(&value)
    }
}

/// Declared axes keyed by tag, in declaration order.
///
/// Built once from the designspace and never mutated afterwards. A repeated
/// tag replaces the earlier declaration.
#[derive(Debug, Clone, Default)]
pub struct AxisRegistry {
    axes: IndexMap<String, Axis>,
}

impl AxisRegistry {
    pub fn get(&self, tag: &str) -> Option<&Axis> {
        self.axes.get(tag)
    }

    /// Resolve a designspace dimension name (the axis *name*) to its tag.
    ///
    /// Tags are accepted as well, so locations already keyed by tag pass through.
    pub fn tag_for(&self, name_or_tag: &str) -> Option<&str> {
        if let Some(axis) = self.axes.get(name_or_tag) {
            return Some(&axis.tag);
        }
        self.axes
            .values()
            .find(|axis| axis.name == name_or_tag)
            .map(|axis| axis.tag.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Axis> {
        self.axes.values()
    }

    pub fn len(&self) -> usize {
        self.axes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.axes.is_empty()
    }
}

impl FromIterator<Axis> for AxisRegistry {
    fn from_iter<I: IntoIterator<Item = Axis>>(iter: I) -> Self {
        Self {
            axes: iter.into_iter().map(|axis| (axis.tag.clone(), axis)).collect(),
        }
    }
}
