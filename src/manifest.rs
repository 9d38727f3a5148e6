//! Manifest ingestion: fetch, normalize, validate, deserialize.
//!
//! The published manifest (`data/images.json`) is the read-only snapshot the
//! gallery runs on. Loading is fail-closed and happens in a fixed order:
//!
//! ```text
//! fetch → normalize legacy keys → validate (first-record sniff) → deserialize → normalize tags
//! ```
//!
//! ## Legacy producers
//!
//! An earlier asset script wrote `alt`, `thumb` and `full` instead of
//! `title`, `thumbUrl` and `fullUrl`. Those keys are renamed here, before
//! validation, so nothing downstream ever sees the old schema. A canonical
//! key always wins over its legacy alias.
//!
//! ## Sources
//!
//! [`ManifestSource`] is the single suspension point of the gallery: one
//! fallible fetch, no retry. [`FileSource`] reads from disk; a
//! `serde_json::Value` is itself a source, which is what tests use.

use crate::query;
use crate::tags::normalize_tags;
use crate::types::ImageRecord;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid data format: expected an array of image records")]
    InvalidShape,
}

/// Legacy key → canonical key.
const LEGACY_KEYS: [(&str, &str); 3] = [("alt", "title"), ("thumb", "thumbUrl"), ("full", "fullUrl")];

/// Somewhere a raw manifest payload can be fetched from.
pub trait ManifestSource {
    fn fetch(&self) -> Result<Value, ManifestError>;
}

/// Reads the manifest from a JSON file.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ManifestSource for FileSource {
    fn fetch(&self) -> Result<Value, ManifestError> {
        let content = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

impl ManifestSource for Value {
    fn fetch(&self) -> Result<Value, ManifestError> {
        Ok(self.clone())
    }
}

/// Rename legacy keys on every object of an array payload.
///
/// Non-array payloads are returned as-is; [`query::validate`] rejects them.
pub fn normalize_legacy(mut data: Value) -> Value {
    if let Some(items) = data.as_array_mut() {
        for item in items.iter_mut().filter_map(Value::as_object_mut) {
            for (legacy, canonical) in LEGACY_KEYS {
                if item.contains_key(canonical) {
                    continue;
                }
                if let Some(value) = item.remove(legacy) {
                    item.insert(canonical.to_string(), value);
                }
            }
        }
    }
    data
}

/// Turn a raw payload into records, or reject it as a whole.
pub fn ingest(data: Value) -> Result<Vec<ImageRecord>, ManifestError> {
    let data = normalize_legacy(data);
    if !query::validate(&data) {
        return Err(ManifestError::InvalidShape);
    }
    let Value::Array(items) = data else {
        return Err(ManifestError::InvalidShape);
    };
    // Only the first record is checked; a later one that is not even an
    // object becomes an empty record.
    Ok(items
        .into_iter()
        .map(|item| {
            let mut record: ImageRecord = serde_json::from_value(item).unwrap_or_default();
            record.tags = normalize_tags(&record.tags);
            record
        })
        .collect())
}

/// Fetch from `source` and ingest.
pub fn load(source: &impl ManifestSource) -> Result<Vec<ImageRecord>, ManifestError> {
    ingest(source.fetch()?)
}

/// Load a manifest file from disk.
pub fn load_file(path: &Path) -> Result<Vec<ImageRecord>, ManifestError> {
    load(&FileSource::new(path))
}

/// Write records as a pretty-printed manifest, creating parent directories.
pub fn write(path: &Path, records: &[ImageRecord]) -> Result<(), ManifestError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(records)?;
    fs::write(path, json)?;
    Ok(())
}
