//! Rendering of a built argument table for inspection.

use crate::parser::{ArgTable, Origin};
use serde::Serialize;
use std::collections::BTreeMap;

/// Output format for [`render`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    /// One `key` or `key=value` line per entry
    #[default]
    Text,
    /// A JSON object of key to value-or-null
    Json,
}

#[derive(Serialize)]
struct JsonEntry<'a> {
    value: Option<&'a str>,
    negated: bool,
}

/// Render the table in the requested format.
pub fn render(table: &ArgTable, format: Format) -> Result<String, serde_json::Error> {
    match format {
        Format::Text => Ok(render_text(table)),
        Format::Json => render_json(table),
    }
}

/// Render entries as sorted `key[=value]` lines.
///
/// Entries synthesized from a negation flag are not marked; use
/// [`render_json`] when the origin matters.
pub fn render_text(table: &ArgTable) -> String {
    let mut output = String::new();
    for (key, entry) in table.iter() {
        match entry.value {
            Some(ref value) => output.push_str(&format!("{}={}\n", key, value)),
            None => output.push_str(&format!("{}\n", key)),
        }
    }
    output
}

/// Render entries as a pretty-printed JSON object in key order.
pub fn render_json(table: &ArgTable) -> Result<String, serde_json::Error> {
    let map: BTreeMap<&str, JsonEntry> = table
        .iter()
        .map(|(key, entry)| {
            (
                key,
                JsonEntry {
                    value: entry.value.as_deref(),
                    negated: entry.origin == Origin::Negation,
                },
            )
        })
        .collect();
    serde_json::to_string_pretty(&map)
}
