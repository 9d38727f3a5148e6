//! Filesystem scanning.
//!
//! Stage 1 of the build pipeline. Walks the content root, turning category
//! directories and their images into a [`ScanManifest`] that the process
//! stage consumes.
//!
//! ## Directory Structure
//!
//! ```text
//! content/                         # Content root
//! ├── config.toml                  # Gallery configuration (optional)
//! ├── 010-Nature/                  # Category "Nature" (numbered = ordered)
//! │   ├── 001-Sunset-Beach.jpg     # → nature-1, title "Sunset Beach"
//! │   ├── 001-Sunset-Beach.txt     # Sidecar description (optional)
//! │   └── 002.jpg                  # → nature-2, title "Nature Image 2"
//! ├── 020-Street-Art/              # Category "Street Art"
//! │   └── mural.png                # → street-art-1
//! └── Wallpapers/                  # Unnumbered categories sort last
//!     └── 001-Skyline.webp
//! ```
//!
//! ## Rules
//!
//! - Every image belongs to exactly one category: images directly in the
//!   root and directories nested inside a category are errors.
//! - Images are ordered by filename; the 1-based position gives the id
//!   `<category-slug>-<n>`. Ids must be unique across the gallery.
//! - Hidden entries, `config.toml` and `.txt` sidecars are not images.
//! - Categories without images are skipped.

use crate::config::{self, GalleryConfig};
use crate::metadata::{read_sidecar, resolve_text};
use crate::naming::{parse_entry_name, slugify};
use crate::tags::derive_tags;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Image is not inside a category directory: {0}")]
    UncategorizedImage(PathBuf),
    #[error("Category directories cannot contain subdirectories: {0}")]
    NestedDirectory(PathBuf),
    #[error("Duplicate image id {0} (from {1})")]
    DuplicateId(String, PathBuf),
}

/// Manifest output from the scan stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanManifest {
    /// Category labels in display order.
    pub categories: Vec<String>,
    pub images: Vec<ScannedImage>,
    pub config: GalleryConfig,
}

/// One source image with its resolved metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScannedImage {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub category: String,
    pub tags: Vec<String>,
    /// Path relative to the content root.
    pub source_path: String,
}

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "tif", "tiff"];

struct CategoryDir {
    number: Option<u32>,
    dir_name: String,
    label: String,
    images: Vec<PathBuf>,
}

pub fn scan(root: &Path) -> Result<ScanManifest, ScanError> {
    let config = config::load_config(root)?;
    let categories = collect_categories(root)?;

    let mut seen = HashSet::new();
    let mut images = Vec::new();
    for category in &categories {
        let slug = slugify(&category.label);
        for (index, path) in category.images.iter().enumerate() {
            let position = index + 1;
            let id = format!("{slug}-{position}");
            if !seen.insert(id.clone()) {
                return Err(ScanError::DuplicateId(id, path.clone()));
            }
            images.push(build_image(
                root,
                path,
                id,
                &category.label,
                position,
                config.tags.min_word_length,
            ));
        }
    }

    Ok(ScanManifest {
        categories: categories.into_iter().map(|c| c.label).collect(),
        images,
        config,
    })
}

fn collect_categories(root: &Path) -> Result<Vec<CategoryDir>, ScanError> {
    let mut categories: Vec<CategoryDir> = Vec::new();

    let walker = WalkDir::new(root)
        .min_depth(1)
        .max_depth(2)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_hidden(e));

    for entry in walker {
        let entry = entry?;
        let path = entry.path();
        match (entry.depth(), entry.file_type().is_dir()) {
            (1, true) => {
                let dir_name = entry.file_name().to_string_lossy().to_string();
                let parsed = parse_entry_name(&dir_name);
                let label = parsed.title().unwrap_or(&dir_name).to_string();
                categories.push(CategoryDir {
                    number: parsed.number,
                    dir_name,
                    label,
                    images: Vec::new(),
                });
            }
            (1, false) => {
                if is_image(path) {
                    return Err(ScanError::UncategorizedImage(path.to_path_buf()));
                }
            }
            (_, true) => return Err(ScanError::NestedDirectory(path.to_path_buf())),
            (_, false) => {
                // sort_by_file_name yields a directory's children right after it
                if is_image(path)
                    && let Some(category) = categories.last_mut()
                {
                    category.images.push(path.to_path_buf());
                }
            }
        }
    }

    categories.retain(|c| !c.images.is_empty());
    categories.sort_by(|a, b| {
        (a.number.unwrap_or(u32::MAX), &a.dir_name).cmp(&(b.number.unwrap_or(u32::MAX), &b.dir_name))
    });
    Ok(categories)
}

fn build_image(
    root: &Path,
    path: &Path,
    id: String,
    category: &str,
    position: usize,
    min_word_length: usize,
) -> ScannedImage {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let sidecar = read_sidecar(path);
    let text = resolve_text(&stem, sidecar.as_deref(), category, position);
    let tag_source = text.description.as_deref().unwrap_or(&text.title);
    let tags = derive_tags(category, Some(tag_source), min_word_length);
    let source_path = path
        .strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .to_string();

    ScannedImage {
        id,
        title: text.title,
        description: text.description,
        category: category.to_string(),
        tags,
        source_path,
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0 && entry.file_name().to_string_lossy().starts_with('.')
}

fn is_image(path: &Path) -> bool {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    IMAGE_EXTENSIONS.contains(&ext.as_str())
}
