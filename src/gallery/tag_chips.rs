//! Tag chip list with an overflow toggle.
//!
//! The first `cap` chips are always visible; the rest hide behind a toggle
//! whose label carries the hidden count. The expanded flag is independent
//! of the active filter: toggling never changes the selection, and
//! selecting never collapses the list.

/// Chips shown before the overflow toggle.
pub const DEFAULT_VISIBLE_TAGS: usize = 15;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagChips {
    tags: Vec<String>,
    cap: usize,
    expanded: bool,
}

/// Presentation snapshot of one chip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chip {
    pub label: String,
    pub visible: bool,
    pub active: bool,
}

/// Presentation snapshot of the overflow toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleView {
    pub label: String,
    pub expanded: bool,
    pub hidden_count: usize,
}

/// Presentation snapshot of the whole chip list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChipsView {
    /// Whether the leading "All" chip is the active one.
    pub all_active: bool,
    pub chips: Vec<Chip>,
    /// Absent when every chip fits under the cap.
    pub toggle: Option<ToggleView>,
}

impl TagChips {
    pub fn new(tags: Vec<String>, cap: usize) -> Self {
        Self {
            tags,
            cap,
            expanded: false,
        }
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn has_overflow(&self) -> bool {
        self.tags.len() > self.cap
    }

    /// Number of chips beyond the cap (whether or not currently shown).
    pub fn overflow_count(&self) -> usize {
        self.tags.len().saturating_sub(self.cap)
    }

    pub fn is_visible(&self, index: usize) -> bool {
        self.expanded || index < self.cap
    }

    /// Flip between expanded and collapsed. Returns `false` (and does
    /// nothing) when there is no overflow to toggle.
    pub fn toggle(&mut self) -> bool {
        if !self.has_overflow() {
            return false;
        }
        self.expanded = !self.expanded;
        true
    }

    pub fn toggle_label(&self) -> Option<String> {
        if !self.has_overflow() {
            return None;
        }
        Some(if self.expanded {
            "Show less".to_string()
        } else {
            format!("Show more ({}+)", self.overflow_count())
        })
    }

    pub fn view(&self, active_tag: Option<&str>) -> ChipsView {
        let chips = self
            .tags
            .iter()
            .enumerate()
            .map(|(i, tag)| Chip {
                label: tag.clone(),
                visible: self.is_visible(i),
                active: active_tag == Some(tag.as_str()),
            })
            .collect();
        let toggle = self.toggle_label().map(|label| ToggleView {
            label,
            expanded: self.expanded,
            hidden_count: self.overflow_count(),
        });
        ChipsView {
            all_active: active_tag.is_none(),
            chips,
            toggle,
        }
    }
}
