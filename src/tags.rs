//! Tag and title rules shared by the scan stage and manifest ingestion.
//!
//! Tags are keywords used for the tag chips and for free-text search.
//! Every tag list in the system goes through [`normalize_tags`], so a tag is
//! always lower-case, trimmed and unique within its record.
//!
//! Scanned images get their tags from [`derive_tags`]:
//!
//! ```text
//! category "Water", text "A calm lake, at dawn!"  (min length 4)
//!   → ["water", "calm", "lake", "dawn"]
//! ```

/// Lower-case, trim, drop empties and deduplicate, keeping first occurrence.
pub fn normalize_tags<S: AsRef<str>>(tags: &[S]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.as_ref().trim().to_lowercase();
        if !tag.is_empty() && !out.contains(&tag) {
            out.push(tag);
        }
    }
    out
}

/// Descriptive words of `text`: punctuation stripped, lower-cased, split on
/// whitespace, words shorter than `min_len` characters dropped.
pub fn keywords(text: &str, min_len: usize) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect();
    cleaned
        .split_whitespace()
        .filter(|word| word.chars().count() >= min_len)
        .map(String::from)
        .collect()
}

/// Tags for a scanned image: the category first, then the keywords of its
/// description (or title), deduplicated.
pub fn derive_tags(category: &str, text: Option<&str>, min_len: usize) -> Vec<String> {
    let mut raw = vec![category.to_string()];
    if let Some(text) = text {
        raw.extend(keywords(text, min_len));
    }
    normalize_tags(&raw)
}

/// Title used when an image has neither a description nor a named file.
pub fn fallback_title(category: &str, position: usize) -> String {
    format!("{} Image {}", category, position)
}
