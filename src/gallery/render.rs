//! Presentation boundary.
//!
//! The controller never touches markup or a terminal directly: every visible
//! change goes through a [`Renderer`]. Two production renderers exist:
//! [`HtmlRenderer`](crate::generate::HtmlRenderer) for the static site and
//! [`TextRenderer`](crate::output::TextRenderer) for `browse`.

use super::tag_chips::ChipsView;
use crate::types::ImageRecord;

/// Status line shown in place of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    LoadFailed,
    NoResults,
}

impl Status {
    pub fn message(self) -> &'static str {
        match self {
            Status::LoadFailed => "Error loading gallery. Please try again later.",
            Status::NoResults => "No images found matching your criteria.",
        }
    }
}

/// Category buttons and search box state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterControls<'a> {
    pub categories: &'a [String],
    /// `None` means the "All" button is active.
    pub active_category: Option<&'a str>,
    pub search_text: &'a str,
}

/// The image shown in an open lightbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LightboxView<'a> {
    pub image: &'a ImageRecord,
    /// Zero-based position in the current view.
    pub position: usize,
    pub total: usize,
}

pub trait Renderer {
    /// Replace the grid wholesale with `images`.
    fn render_grid(&mut self, images: &[ImageRecord]);

    fn show_status(&mut self, status: Status);

    fn hide_status(&mut self);

    fn render_controls(&mut self, controls: &FilterControls<'_>);

    fn render_tag_chips(&mut self, chips: &ChipsView);

    fn show_lightbox(&mut self, view: &LightboxView<'_>);

    fn hide_lightbox(&mut self);

    /// Lock or release background scrolling while the lightbox is open.
    fn set_scroll_lock(&mut self, locked: bool);
}

#[cfg(test)]
pub mod tests {
    use super::*;

    /// Renderer that records every call, for asserting on controller output.
    #[derive(Debug, Default)]
    pub struct RecordingRenderer {
        pub ops: Vec<RenderOp>,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum RenderOp {
        Grid(Vec<String>),
        Status(Status),
        HideStatus,
        Controls {
            active_category: Option<String>,
            search_text: String,
        },
        Chips {
            active: Option<String>,
            visible: usize,
            toggle: Option<String>,
        },
        ShowLightbox {
            id: String,
            position: usize,
            total: usize,
        },
        HideLightbox,
        ScrollLock(bool),
    }

    impl RecordingRenderer {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn clear(&mut self) {
            self.ops.clear();
        }

        /// Ids of the most recent grid render.
        pub fn last_grid(&self) -> Option<&[String]> {
            self.ops.iter().rev().find_map(|op| match op {
                RenderOp::Grid(ids) => Some(ids.as_slice()),
                _ => None,
            })
        }

        pub fn last_controls(&self) -> Option<&RenderOp> {
            self.ops
                .iter()
                .rev()
                .find(|op| matches!(op, RenderOp::Controls { .. }))
        }

        pub fn last_chips(&self) -> Option<&RenderOp> {
            self.ops
                .iter()
                .rev()
                .find(|op| matches!(op, RenderOp::Chips { .. }))
        }
    }

    impl Renderer for RecordingRenderer {
        fn render_grid(&mut self, images: &[ImageRecord]) {
            self.ops
                .push(RenderOp::Grid(images.iter().map(|i| i.id.clone()).collect()));
        }

        fn show_status(&mut self, status: Status) {
            self.ops.push(RenderOp::Status(status));
        }

        fn hide_status(&mut self) {
            self.ops.push(RenderOp::HideStatus);
        }

        fn render_controls(&mut self, controls: &FilterControls<'_>) {
            self.ops.push(RenderOp::Controls {
                active_category: controls.active_category.map(String::from),
                search_text: controls.search_text.to_string(),
            });
        }

        fn render_tag_chips(&mut self, chips: &ChipsView) {
            let active = chips
                .chips
                .iter()
                .find(|c| c.active)
                .map(|c| c.label.clone());
            self.ops.push(RenderOp::Chips {
                active,
                visible: chips.chips.iter().filter(|c| c.visible).count(),
                toggle: chips.toggle.as_ref().map(|t| t.label.clone()),
            });
        }

        fn show_lightbox(&mut self, view: &LightboxView<'_>) {
            self.ops.push(RenderOp::ShowLightbox {
                id: view.image.id.clone(),
                position: view.position,
                total: view.total,
            });
        }

        fn hide_lightbox(&mut self) {
            self.ops.push(RenderOp::HideLightbox);
        }

        fn set_scroll_lock(&mut self, locked: bool) {
            self.ops.push(RenderOp::ScrollLock(locked));
        }
    }

    #[test]
    fn status_messages() {
        assert_eq!(
            Status::LoadFailed.message(),
            "Error loading gallery. Please try again later."
        );
        assert_eq!(
            Status::NoResults.message(),
            "No images found matching your criteria."
        );
    }
}
