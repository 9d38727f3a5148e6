//! # Image Gallery
//!
//! A static image gallery: photo derivatives, a JSON manifest, and a
//! searchable, filterable gallery with a lightbox.
//!
//! # Architecture: Three-Stage Pipeline
//!
//! ```text
//! 1. Scan      content/   →  manifest.json          (filesystem → structured data)
//! 2. Process   manifest   →  dist/images, data/     (AVIF derivatives + images.json)
//! 3. Generate  images.json →  dist/**/*.html        (one page per gallery state)
//! ```
//!
//! The published `data/images.json` is the contract between the pipeline and
//! the gallery. Anything that produces that array (including legacy producers
//! using `alt`/`thumb`/`full`) can feed the gallery.
//!
//! # The Gallery Core
//!
//! The interactive part is a small state machine, [`gallery::GalleryController`],
//! driven by [`gallery::GalleryEvent`]s and rendering through the
//! [`gallery::Renderer`] trait:
//!
//! - a single active [`gallery::Filter`] (`None | Category | Text | Tag`),
//!   so category, search and tag selections reset one another;
//! - a [`gallery::Lightbox`] over the current view with wrap-around
//!   navigation;
//! - [`gallery::TagChips`] with a visibility cap and overflow toggle.
//!
//! The filter logic itself is the pure functions in [`query`].
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`types`] | `ImageRecord`, the manifest entry |
//! | [`query`] | Pure category filter, search, tag listing and shape check |
//! | [`manifest`] | Fail-closed manifest ingestion and legacy normalization |
//! | [`gallery`] | Controller, filter, lightbox, tag chips, `Renderer` trait |
//! | [`scan`] | Stage 1: content directory → scan manifest |
//! | [`process`] | Stage 2: AVIF derivatives, cache, published manifest |
//! | [`generate`] | Stage 3: static HTML views via `HtmlRenderer` (maud) |
//! | [`output`] | CLI output formatting and the terminal `TextRenderer` |
//! | [`config`] | `config.toml` loading, merging and validation |
//! | [`naming`] | `NNN-name` convention parser and slugs |
//! | [`metadata`] | Title and description resolution |
//! | [`tags`] | Tag derivation from titles and descriptions |
//! | [`imaging`] | Pure-Rust resize, thumbnail and AVIF encoding |
//! | [`cache`] | Content-addressed encode cache |

pub mod cache;
pub mod config;
pub mod gallery;
pub mod generate;
pub mod imaging;
pub mod manifest;
pub mod metadata;
pub mod naming;
pub mod output;
pub mod process;
pub mod query;
pub mod scan;
pub mod tags;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
