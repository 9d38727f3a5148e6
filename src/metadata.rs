//! Image text resolution: title and description.
//!
//! Each field is resolved independently; the first non-empty source wins.
//!
//! ```text
//! description: sidecar .txt
//! title:       sidecar .txt → filename display title → "<Category> Image <n>"
//! ```
//!
//! A sidecar is a plain text file with the same stem as the image:
//! `003-Calm-Lake.txt` next to `003-Calm-Lake.jpg`.

use crate::naming::parse_entry_name;
use crate::tags::fallback_title;
use std::path::Path;

/// Resolved text for one image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageText {
    pub title: String,
    pub description: Option<String>,
}

/// First non-empty value among `sources`, trimmed.
pub fn resolve(sources: &[Option<&str>]) -> Option<String> {
    sources
        .iter()
        .filter_map(|opt| opt.map(str::trim).filter(|s| !s.is_empty()))
        .map(String::from)
        .next()
}

/// Trimmed contents of the image's `.txt` sidecar, if present and non-empty.
pub fn read_sidecar(image_path: &Path) -> Option<String> {
    let sidecar = image_path.with_extension("txt");
    std::fs::read_to_string(sidecar)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Resolve title and description for the image at 1-based `position`.
pub fn resolve_text(
    stem: &str,
    sidecar: Option<&str>,
    category: &str,
    position: usize,
) -> ImageText {
    let parsed = parse_entry_name(stem);
    let title = resolve(&[sidecar, parsed.title()])
        .unwrap_or_else(|| fallback_title(category, position));
    ImageText {
        title,
        description: resolve(&[sidecar]),
    }
}
