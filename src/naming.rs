//! Filename conventions for the content tree.
//!
//! Category directories and image files share one pattern: an optional
//! numeric prefix (`NNN-`) that orders the entry, followed by a name whose
//! dashes read as spaces.
//!
//! - `010-Street-Art/` → category "Street Art", slug `street-art`, order 10
//! - `003-Calm-Lake.jpg` → title "Calm Lake"
//! - `003.jpg` → no title (falls back to `"<Category> Image <n>"`)

/// A parsed `NNN-name` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedName {
    /// Number prefix if present (`10` from `010-Street-Art`).
    pub number: Option<u32>,
    /// Display form: prefix removed, dashes turned into spaces. Empty if
    /// the entry is number-only.
    pub display: String,
}

impl ParsedName {
    /// The display name, or `None` when there is nothing but a number.
    pub fn title(&self) -> Option<&str> {
        let title = self.display.trim();
        (!title.is_empty()).then_some(title)
    }
}

/// Parse an entry name following the `NNN-name` convention.
///
/// ```text
/// "020-Street-Art" → number=Some(20), display="Street Art"
/// "001"            → number=Some(1),  display=""
/// "001-"           → number=Some(1),  display=""
/// "wip-drafts"     → number=None,     display="wip drafts"
/// ```
pub fn parse_entry_name(name: &str) -> ParsedName {
    if let Some((prefix, rest)) = name.split_once('-')
        && let Ok(number) = prefix.parse::<u32>()
    {
        return ParsedName {
            number: Some(number),
            display: rest.replace('-', " "),
        };
    }
    if let Ok(number) = name.parse::<u32>() {
        return ParsedName {
            number: Some(number),
            display: String::new(),
        };
    }
    ParsedName {
        number: None,
        display: name.replace('-', " "),
    }
}

/// URL- and filename-safe form of a label.
///
/// Lower-cases, maps every run of non-alphanumeric characters to a single
/// dash and trims dashes from the ends: `"Street Art!"` → `street-art`.
pub fn slugify(label: &str) -> String {
    let mut slug = String::with_capacity(label.len());
    let mut pending_dash = false;
    for c in label.chars().flat_map(char::to_lowercase) {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbered_multi_word() {
        let p = parse_entry_name("020-Street-Art");
        assert_eq!(p.number, Some(20));
        assert_eq!(p.display, "Street Art");
        assert_eq!(p.title(), Some("Street Art"));
    }

    #[test]
    fn number_only() {
        for name in ["001", "001-"] {
            let p = parse_entry_name(name);
            assert_eq!(p.number, Some(1));
            assert_eq!(p.title(), None);
        }
    }

    #[test]
    fn unnumbered_keeps_whole_name() {
        let p = parse_entry_name("wip-drafts");
        assert_eq!(p.number, None);
        assert_eq!(p.display, "wip drafts");
    }

    #[test]
    fn non_numeric_prefix_is_part_of_name() {
        let p = parse_entry_name("v2-Final");
        assert_eq!(p.number, None);
        assert_eq!(p.display, "v2 Final");
    }

    #[test]
    fn slugify_collapses_separators() {
        assert_eq!(slugify("Street Art"), "street-art");
        assert_eq!(slugify("  Black & White!! "), "black-white");
        assert_eq!(slugify("Nature"), "nature");
    }

    #[test]
    fn slugify_keeps_unicode_letters() {
        assert_eq!(slugify("Côte d'Azur"), "côte-d-azur");
    }
}
