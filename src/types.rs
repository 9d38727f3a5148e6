//! Shared types used across the pipeline and the gallery layer.
//!
//! [`ImageRecord`] is the unit of the published manifest (`data/images.json`).
//! The process stage writes it, the generate stage and the gallery controller
//! read it back, so the JSON field names here are the wire format.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// The six keys every manifest record must carry.
pub const REQUIRED_FIELDS: [&str; 6] = ["id", "title", "category", "tags", "thumbUrl", "fullUrl"];

/// Sentinel category meaning "no category filter".
pub const ALL_CATEGORY: &str = "All";

/// A single gallery image as published in the manifest.
///
/// Records are immutable once loaded. Missing, null or mistyped text fields
/// deserialize to empty strings (and mistyped tags to no tags) so a malformed
/// record past the first one renders oddly instead of failing the whole load.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageRecord {
    /// Stable identifier, unique within a manifest (e.g. `nature-3`).
    #[serde(deserialize_with = "lenient_text")]
    pub id: String,
    /// Display title; synthesized (`Nature Image 3`) when the source has none.
    #[serde(deserialize_with = "lenient_text")]
    pub title: String,
    /// Coarse display group (e.g. `Nature`).
    #[serde(deserialize_with = "lenient_text")]
    pub category: String,
    /// Lower-cased keywords, deduplicated per record, in source order.
    #[serde(deserialize_with = "lenient_tags")]
    pub tags: Vec<String>,
    /// Site-relative path of the square thumbnail.
    #[serde(deserialize_with = "lenient_text")]
    pub thumb_url: String,
    /// Site-relative path of the full-size derivative.
    #[serde(deserialize_with = "lenient_text")]
    pub full_url: String,
}

impl ImageRecord {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Strings pass through, numbers keep their text, anything else is empty.
fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

/// The string elements of an array; a non-array is no tags.
fn lenient_tags<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}
