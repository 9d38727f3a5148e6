//! Gallery configuration.
//!
//! Handles loading, validating, and merging `config.toml`. The file lives in
//! the content root and only needs the keys it wants to override: stock
//! defaults form the base layer and the user file is merged on top of it.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! title = "Image Gallery"   # Page title and header
//!
//! [thumbnails]
//! size = 300                # Square thumbnail edge (px)
//! quality = 70              # AVIF quality (0-100)
//!
//! [images]
//! width = 1200              # Full-size target width (px), never upscaled
//! quality = 80              # AVIF quality (0-100)
//!
//! [tags]
//! min_word_length = 4       # Description words shorter than this are not tags
//!
//! [gallery]
//! visible_tags = 15         # Tag chips shown before "Show more"
//!
//! [processing]
//! max_processes = 4         # Max parallel workers (omit for auto = CPU cores)
//! ```
//!
//! Unknown keys are rejected so typos surface as errors instead of being
//! silently ignored.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Gallery configuration loaded from `config.toml`.
///
/// All fields have sensible defaults. Unknown keys are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryConfig {
    /// Page title, shown in `<title>` and the page header.
    pub title: String,
    pub thumbnails: ThumbnailsConfig,
    pub images: ImagesConfig,
    pub tags: TagsConfig,
    pub gallery: GalleryViewConfig,
    pub processing: ProcessingConfig,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            title: "Image Gallery".to_string(),
            thumbnails: ThumbnailsConfig::default(),
            images: ImagesConfig::default(),
            tags: TagsConfig::default(),
            gallery: GalleryViewConfig::default(),
            processing: ProcessingConfig::default(),
        }
    }
}

impl GalleryConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.thumbnails.quality > 100 {
            return Err(ConfigError::Validation(
                "thumbnails.quality must be 0-100".into(),
            ));
        }
        if self.images.quality > 100 {
            return Err(ConfigError::Validation(
                "images.quality must be 0-100".into(),
            ));
        }
        if self.thumbnails.size == 0 {
            return Err(ConfigError::Validation(
                "thumbnails.size must be non-zero".into(),
            ));
        }
        if self.images.width == 0 {
            return Err(ConfigError::Validation(
                "images.width must be non-zero".into(),
            ));
        }
        if self.gallery.visible_tags == 0 {
            return Err(ConfigError::Validation(
                "gallery.visible_tags must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Square thumbnail settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThumbnailsConfig {
    /// Edge length of the square cover crop, in pixels.
    pub size: u32,
    pub quality: u32,
}

impl Default for ThumbnailsConfig {
    fn default() -> Self {
        Self {
            size: 300,
            quality: 70,
        }
    }
}

/// Full-size image settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImagesConfig {
    /// Target width in pixels. Narrower sources keep their own width.
    pub width: u32,
    pub quality: u32,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            width: 1200,
            quality: 80,
        }
    }
}

/// Tag derivation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TagsConfig {
    pub min_word_length: usize,
}

impl Default for TagsConfig {
    fn default() -> Self {
        Self { min_word_length: 4 }
    }
}

/// Gallery page settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryViewConfig {
    /// Tag chips shown before the overflow toggle.
    pub visible_tags: usize,
}

impl Default for GalleryViewConfig {
    fn default() -> Self {
        Self {
            visible_tags: crate::gallery::DEFAULT_VISIBLE_TAGS,
        }
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel image processing workers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config
        .max_processes
        .map(|n| n.clamp(1, cores))
        .unwrap_or(cores)
}

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged onto.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(GalleryConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the directory has no `config.toml`.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<GalleryConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: GalleryConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the content root.
pub fn load_config(root: &Path) -> Result<GalleryConfig, ConfigError> {
    resolve_config(stock_defaults_value(), load_raw_config(root)?)
}

/// A fully-commented stock `config.toml`, printed by `gen-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# Image Gallery Configuration
# ===========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Place this file at content/config.toml.
# Unknown keys will cause an error.

# Page title, used in <title> and the page header.
title = "Image Gallery"

# ---------------------------------------------------------------------------
# Thumbnails
# ---------------------------------------------------------------------------
[thumbnails]
# Edge length of the square thumbnail, in pixels.
# Sources are scaled to cover the square and center-cropped.
size = 300

# AVIF encoding quality (0 = worst, 100 = best).
quality = 70

# ---------------------------------------------------------------------------
# Full-size images
# ---------------------------------------------------------------------------
[images]
# Target width in pixels. Sources narrower than this are never upscaled.
width = 1200

# AVIF encoding quality (0 = worst, 100 = best).
quality = 80

# ---------------------------------------------------------------------------
# Tags
# ---------------------------------------------------------------------------
[tags]
# Words in an image description shorter than this are not turned into tags.
min_word_length = 4

# ---------------------------------------------------------------------------
# Gallery page
# ---------------------------------------------------------------------------
[gallery]
# Tag chips shown before the "Show more" toggle.
visible_tags = 15

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel image-processing workers.
# Omit or comment out to use all CPU cores. Values above the core count
# are clamped down.
# max_processes = 4
"##
}
