//! Variable value syntax: `wght=100:-50 wght=900:-80`.

use indexmap::IndexMap;

use crate::{Error, Location, MasterRegistry, Result};

/// What the formatter yields when no master has a location to report.
///
/// Rules carrying this value are dropped rather than emitted as zero.
pub const DEGENERATE_VALUE: &str = "0";

/// Render a coordinate in its shortest decimal form (`100`, `0.5`).
pub fn format_coordinate(value: f32) -> String {
    value.to_string()
}

/// Render a location as space-separated `tag=coordinate` pairs.
pub fn format_location(location: &Location) -> String {
    location
        .iter()
        .map(|(tag, value)| format!("{tag}={}", format_coordinate(*value)))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Format per-master values as a variable value.
///
/// Masters are visited in the order their values were recorded. Masters with
/// an empty location contribute nothing; if none contribute, the result is
/// [`DEGENERATE_VALUE`].
pub fn format_variable_value(values: &IndexMap<String, i64>, masters: &MasterRegistry) -> Result<String> {
    let mut fragments = Vec::with_capacity(values.len());
    for (identifier, value) in values {
        let master = masters
            .get(identifier)
            .ok_or_else(|| Error::UnknownMaster(identifier.clone()))?;
        if master.is_positioned() {
            fragments.push(format!("{}:{value}", format_location(&master.location)));
        }
    }

    if fragments.is_empty() {
        Ok(DEGENERATE_VALUE.to_string())
    } else {
        Ok(fragments.join(" "))
    }
}
