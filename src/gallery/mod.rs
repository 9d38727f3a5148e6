//! Interactive gallery state: filters, tag chips, lightbox.
//!
//! | Module | Owns |
//! |--------|------|
//! | [`filter`] | The single active filter and how it selects records |
//! | [`tag_chips`] | Chip list, overflow cap, expand/collapse toggle |
//! | [`lightbox`] | `Closed` / `Open(i)` transitions with wrap-around |
//! | [`render`] | The [`Renderer`] trait every front end implements |
//! | [`controller`] | [`GalleryController`], which ties the above together |
//!
//! The controller has no presentation dependencies. The static site and the
//! terminal browser drive the same controller through different renderers.

pub mod controller;
pub mod filter;
pub mod lightbox;
pub mod render;
pub mod tag_chips;

pub use controller::{GalleryController, GalleryEvent, Key, Phase};
pub use filter::Filter;
pub use lightbox::Lightbox;
pub use render::{FilterControls, LightboxView, Renderer, Status};
pub use tag_chips::{Chip, ChipsView, DEFAULT_VISIBLE_TAGS, TagChips, ToggleView};
