//! Master sources and the registry that holds them.

use indexmap::IndexMap;
use log::warn;

/// Axis location of a master, as `(axis_tag, coordinate)` pairs.
///
/// Partial locations are valid: a source sitting at an axis default may
/// omit that axis entirely. Iteration order is the order the designspace
/// lists the dimensions.
pub type Location = IndexMap<String, f32>;

/// One design master: where it sits in the designspace and its feature text.
#[derive(Debug, Clone, PartialEq)]
pub struct MasterSource {
    pub identifier: String,
    pub location: Location,
    /// Raw feature source; empty when the master defines none.
    pub features: String,
}

impl MasterSource {
    pub fn new<K: Into<String>>(
        identifier: impl Into<String>,
        location: impl IntoIterator<Item = (K, f32)>,
        features: impl Into<String>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            location: location.into_iter().map(|(k, v)| (k.into(), v)).collect(),
            features: features.into(),
        }
    }

    /// Whether the master pins at least one axis.
    pub fn is_positioned(&self) -> bool {
        !self.location.is_empty()
    }
}

/// Masters keyed by identifier, in load order.
#[derive(Debug, Clone, Default)]
pub struct MasterRegistry {
    masters: IndexMap<String, MasterSource>,
}

impl MasterRegistry {
    pub fn get(&self, identifier: &str) -> Option<&MasterSource> {
        self.masters.get(identifier)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MasterSource> {
        self.masters.values()
    }

    pub fn len(&self) -> usize {
        self.masters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.masters.is_empty()
    }
}

impl FromIterator<MasterSource> for MasterRegistry {
    /// A repeated identifier replaces the earlier master in place.
    fn from_iter<I: IntoIterator<Item = MasterSource>>(iter: I) -> Self {
        let mut masters = IndexMap::new();
        for master in iter {
            let identifier = master.identifier.clone();
            if masters.insert(identifier.clone(), master).is_some() {
                warn!("Duplicate master identifier '{identifier}': later source replaces earlier one");
            }
        }
        Self { masters }
    }
}
