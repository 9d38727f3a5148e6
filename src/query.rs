//! Query engine: pure functions over a slice of [`ImageRecord`]s.
//!
//! Nothing here touches the filesystem or the presentation layer, and
//! nothing here fails for well-formed records. Functions that may return
//! their input untouched hand back a [`Cow`]: `Borrowed` means "the same
//! sequence, same order", `Owned` is a filtered copy.
//!
//! | Function | Returns |
//! |---|---|
//! | [`filter_by_category`] | records in one category (`""`/`"All"` = everything) |
//! | [`filter_by_tag`] | records carrying an exact tag |
//! | [`search`] | case-insensitive substring match on title or any tag |
//! | [`unique_tags`] | sorted, deduplicated tag list |
//! | [`categories`] | distinct categories in first-seen order |
//! | [`validate`] | structural sniff of a raw manifest payload |

use crate::types::{ALL_CATEGORY, ImageRecord, REQUIRED_FIELDS};
use serde_json::Value;
use std::borrow::Cow;
use std::collections::BTreeSet;

/// Keep the records whose category equals `category` exactly.
///
/// Matching is case-sensitive; callers normalize UI identifiers first.
/// An empty category or the `"All"` sentinel returns the input unchanged.
pub fn filter_by_category<'a>(images: &'a [ImageRecord], category: &str) -> Cow<'a, [ImageRecord]> {
    if category.is_empty() || category == ALL_CATEGORY {
        return Cow::Borrowed(images);
    }
    Cow::Owned(
        images
            .iter()
            .filter(|img| img.category == category)
            .cloned()
            .collect(),
    )
}

/// Keep the records carrying `tag` as one of their tags (exact match).
pub fn filter_by_tag(images: &[ImageRecord], tag: &str) -> Vec<ImageRecord> {
    images.iter().filter(|img| img.has_tag(tag)).cloned().collect()
}

/// Free-text search over titles and tags.
///
/// The query is trimmed and lower-cased, then matched as a substring against
/// the lower-cased title and each lower-cased tag. A record matches if any
/// of them contains the query. An empty (or all-whitespace) query returns
/// the input unchanged.
pub fn search<'a>(images: &'a [ImageRecord], query: &str) -> Cow<'a, [ImageRecord]> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Cow::Borrowed(images);
    }
    Cow::Owned(
        images
            .iter()
            .filter(|img| matches_query(img, &needle))
            .cloned()
            .collect(),
    )
}

fn matches_query(img: &ImageRecord, needle: &str) -> bool {
    img.title.to_lowercase().contains(needle)
        || img.tags.iter().any(|tag| tag.to_lowercase().contains(needle))
}

/// Every distinct tag across `images`, sorted ascending.
pub fn unique_tags(images: &[ImageRecord]) -> Vec<String> {
    images
        .iter()
        .flat_map(|img| img.tags.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Distinct categories in the order they first appear.
pub fn categories(images: &[ImageRecord]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for img in images {
        if !img.category.is_empty() && !seen.contains(&img.category) {
            seen.push(img.category.clone());
        }
    }
    seen
}

/// Cheap structural check of a raw manifest payload.
///
/// - not an array → `false`
/// - empty array → `true`
/// - otherwise only the first element is inspected: it must be an object
///   holding all of [`REQUIRED_FIELDS`]
///
/// Later records are not looked at. A bad record further down is not
/// caught here.
pub fn validate(data: &Value) -> bool {
    let Some(items) = data.as_array() else {
        return false;
    };
    let Some(sample) = items.first() else {
        return true;
    };
    sample
        .as_object()
        .is_some_and(|obj| REQUIRED_FIELDS.iter().all(|field| obj.contains_key(*field)))
}
