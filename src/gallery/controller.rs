//! The gallery controller: one owner for all view state.
//!
//! ```text
//!  Loading ──init ok──▶ Ready ──handle(event)──▶ Ready
//!     │
//!     └──init err──▶ Failed   (terminal: status shown, events ignored)
//! ```
//!
//! Every transition runs synchronously inside [`GalleryController::handle`].
//! A filter event recomputes `current` from `all` with only the new filter,
//! closes an open lightbox, then re-renders controls, chips and grid.

use super::filter::Filter;
use super::lightbox::Lightbox;
use super::render::{FilterControls, LightboxView, Renderer, Status};
use super::tag_chips::TagChips;
use crate::manifest::{self, ManifestSource};
use crate::query::{categories, unique_tags};
use crate::types::ImageRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Loading,
    Ready,
    Failed,
}

/// Keys the lightbox responds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    ArrowLeft,
    ArrowRight,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GalleryEvent {
    /// Category button by identifier (`"all"`, `"nature"`, ...).
    SelectCategory(String),
    /// Search box contents changed.
    SearchInput(String),
    /// Tag chip; `None` is the "All" chip.
    SelectTag(Option<String>),
    ToggleTags,
    /// View affordance on the grid item with this id. With repeated ids the
    /// first match opens.
    OpenImage(String),
    /// Open the item at this zero-based position of the current view.
    OpenAt(usize),
    Next,
    Prev,
    Close,
    /// Click inside the lightbox; `on_content` is false for the backdrop itself.
    Backdrop { on_content: bool },
    Key(Key),
}

pub struct GalleryController<R: Renderer> {
    renderer: R,
    all: Vec<ImageRecord>,
    current: Vec<ImageRecord>,
    categories: Vec<String>,
    filter: Filter,
    chips: TagChips,
    lightbox: Lightbox,
    phase: Phase,
    load_error: Option<String>,
}

impl<R: Renderer> GalleryController<R> {
    pub fn new(renderer: R, visible_tags: usize) -> Self {
        Self {
            renderer,
            all: Vec::new(),
            current: Vec::new(),
            categories: Vec::new(),
            filter: Filter::None,
            chips: TagChips::new(Vec::new(), visible_tags),
            lightbox: Lightbox::Closed,
            phase: Phase::Loading,
            load_error: None,
        }
    }

    /// Fetch and ingest the manifest, then render the initial view.
    ///
    /// Any fetch or validation failure is terminal: the load-failure status
    /// is shown and nothing else is rendered. The cause is kept for
    /// [`load_error`](Self::load_error).
    pub fn init(&mut self, source: &impl ManifestSource) -> Phase {
        match manifest::load(source) {
            Ok(records) => self.start(records),
            Err(e) => {
                self.load_error = Some(e.to_string());
                self.phase = Phase::Failed;
                self.renderer.show_status(Status::LoadFailed);
            }
        }
        self.phase
    }

    /// Start from records that are already loaded.
    pub fn start(&mut self, records: Vec<ImageRecord>) {
        self.categories = categories(&records);
        self.chips = TagChips::new(unique_tags(&records), self.chips.cap());
        self.current = records.clone();
        self.all = records;
        self.filter = Filter::None;
        self.lightbox = Lightbox::Closed;
        self.phase = Phase::Ready;
        self.load_error = None;

        self.render_chips();
        self.render_controls();
        self.render_current();
    }

    /// Apply one UI event. Events are ignored unless the gallery is ready.
    pub fn handle(&mut self, event: GalleryEvent) {
        if self.phase != Phase::Ready {
            return;
        }
        match event {
            GalleryEvent::SelectCategory(id) => {
                let filter = Filter::category(&id, &self.categories);
                self.set_filter(filter);
            }
            GalleryEvent::SearchInput(text) => self.set_filter(Filter::text(&text)),
            GalleryEvent::SelectTag(tag) => self.set_filter(Filter::tag(tag.as_deref())),
            GalleryEvent::ToggleTags => {
                if self.chips.toggle() {
                    self.render_chips();
                }
            }
            GalleryEvent::OpenImage(id) => {
                if let Some(index) = self.current.iter().position(|r| r.id == id) {
                    self.open(index);
                }
            }
            GalleryEvent::OpenAt(index) => {
                if index < self.current.len() {
                    self.open(index);
                }
            }
            GalleryEvent::Next => self.navigate(Lightbox::next),
            GalleryEvent::Prev => self.navigate(Lightbox::prev),
            GalleryEvent::Close => self.close(),
            GalleryEvent::Backdrop { on_content } => {
                if !on_content {
                    self.close();
                }
            }
            GalleryEvent::Key(key) => {
                if !self.lightbox.is_open() {
                    return;
                }
                match key {
                    Key::Escape => self.close(),
                    Key::ArrowLeft => self.navigate(Lightbox::prev),
                    Key::ArrowRight => self.navigate(Lightbox::next),
                }
            }
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn all(&self) -> &[ImageRecord] {
        &self.all
    }

    pub fn current(&self) -> &[ImageRecord] {
        &self.current
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    pub fn chips(&self) -> &TagChips {
        &self.chips
    }

    pub fn lightbox(&self) -> Lightbox {
        self.lightbox
    }

    /// The record shown in the lightbox, if open.
    pub fn lightbox_image(&self) -> Option<&ImageRecord> {
        self.lightbox.index().and_then(|i| self.current.get(i))
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }

    fn set_filter(&mut self, filter: Filter) {
        if self.lightbox.is_open() {
            self.close();
        }
        self.filter = filter;
        self.current = self.filter.apply(&self.all);
        self.render_controls();
        self.render_chips();
        self.render_current();
    }

    fn open(&mut self, index: usize) {
        let was_open = self.lightbox.is_open();
        self.lightbox = Lightbox::opened_at(index, self.current.len());
        if !was_open {
            self.renderer.set_scroll_lock(true);
        }
        self.render_lightbox();
    }

    fn navigate(&mut self, step: fn(Lightbox, usize) -> Lightbox) {
        if !self.lightbox.is_open() {
            return;
        }
        self.lightbox = step(self.lightbox, self.current.len());
        self.render_lightbox();
    }

    fn close(&mut self) {
        if !self.lightbox.is_open() {
            return;
        }
        self.lightbox = Lightbox::Closed;
        self.renderer.hide_lightbox();
        self.renderer.set_scroll_lock(false);
    }

    fn render_lightbox(&mut self) {
        if let Some(index) = self.lightbox.index() {
            if let Some(image) = self.current.get(index) {
                self.renderer.show_lightbox(&LightboxView {
                    image,
                    position: index,
                    total: self.current.len(),
                });
            }
        }
    }

    fn render_controls(&mut self) {
        self.renderer.render_controls(&FilterControls {
            categories: &self.categories,
            active_category: self.filter.active_category(),
            search_text: self.filter.search_text(),
        });
    }

    fn render_chips(&mut self) {
        let view = self.chips.view(self.filter.active_tag());
        self.renderer.render_tag_chips(&view);
    }

    fn render_current(&mut self) {
        self.renderer.render_grid(&self.current);
        if self.current.is_empty() {
            self.renderer.show_status(Status::NoResults);
        } else {
            self.renderer.hide_status();
        }
    }
}
