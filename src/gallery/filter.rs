//! The single active filter.
//!
//! Category buttons, the search box and tag chips are mutually exclusive:
//! exactly one of them (or none) drives the current view. [`Filter`] encodes
//! that directly, and every "active" UI state is derived from it, so a
//! category and a search can never both look selected.

use crate::query::{filter_by_category, filter_by_tag, search};
use crate::types::ImageRecord;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Filter {
    /// Everything is shown.
    #[default]
    None,
    /// Exact category label, already case-normalized.
    Category(String),
    /// Free-text query, as typed.
    Text(String),
    /// Exact tag.
    Tag(String),
}

impl Filter {
    /// Filter for a category button identifier (`"all"`, `"nature"`, ...).
    ///
    /// An exact label wins; otherwise the identifier is matched
    /// case-insensitively against `known` categories, and an unknown
    /// identifier gets its first letter upper-cased.
    pub fn category(id: &str, known: &[String]) -> Self {
        let id = id.trim();
        if id.is_empty() || id.eq_ignore_ascii_case("all") {
            return Self::None;
        }
        let lower = id.to_lowercase();
        let label = known
            .iter()
            .find(|c| c.as_str() == id)
            .or_else(|| known.iter().find(|c| c.to_lowercase() == lower))
            .cloned()
            .unwrap_or_else(|| capitalize_first(id));
        Self::Category(label)
    }

    /// Filter for the search box contents. Blank text clears filtering.
    pub fn text(query: &str) -> Self {
        if query.trim().is_empty() {
            Self::None
        } else {
            Self::Text(query.to_string())
        }
    }

    /// Filter for a tag chip; `None` is the "All" chip.
    pub fn tag(tag: Option<&str>) -> Self {
        match tag {
            Some(t) if !t.is_empty() => Self::Tag(t.to_string()),
            _ => Self::None,
        }
    }

    /// Recompute a view from the base set using only this filter.
    pub fn apply(&self, all: &[ImageRecord]) -> Vec<ImageRecord> {
        match self {
            Self::None => all.to_vec(),
            Self::Category(category) => filter_by_category(all, category).into_owned(),
            Self::Text(query) => search(all, query).into_owned(),
            Self::Tag(tag) => filter_by_tag(all, tag),
        }
    }

    pub fn active_category(&self) -> Option<&str> {
        match self {
            Self::Category(c) => Some(c),
            _ => None,
        }
    }

    pub fn active_tag(&self) -> Option<&str> {
        match self {
            Self::Tag(t) => Some(t),
            _ => None,
        }
    }

    /// What the search box shows: the query for a text filter, empty otherwise.
    pub fn search_text(&self) -> &str {
        match self {
            Self::Text(q) => q,
            _ => "",
        }
    }
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
