//! High-level image operations.
//!
//! Each operation is split into a pure `plan_*` step (dimension math,
//! parameters) and a `create_*` step that hands the plan to a backend. The
//! process stage hashes the plan for its cache before deciding to execute.

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::calculations::full_size_dimensions;
use super::params::{Quality, ResizeParams, Sharpening, ThumbnailParams};
use std::path::Path;

pub type Result<T> = std::result::Result<T, BackendError>;

/// Settings for the full-size derivative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FullSizeConfig {
    pub width: u32,
    pub quality: Quality,
}

impl Default for FullSizeConfig {
    fn default() -> Self {
        Self {
            width: 1200,
            quality: Quality::new(80),
        }
    }
}

/// Settings for the square thumbnail.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThumbnailConfig {
    pub size: u32,
    pub quality: Quality,
    pub sharpening: Option<Sharpening>,
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        Self {
            size: 300,
            quality: Quality::new(70),
            sharpening: Some(Sharpening::light()),
        }
    }
}

pub fn get_dimensions(backend: &impl ImageBackend, path: &Path) -> Result<Dimensions> {
    backend.identify(path)
}

pub fn plan_full_size(
    source: &Path,
    output: &Path,
    original: Dimensions,
    config: &FullSizeConfig,
) -> ResizeParams {
    let (width, height) = full_size_dimensions((original.width, original.height), config.width);
    ResizeParams {
        source: source.to_path_buf(),
        output: output.to_path_buf(),
        width,
        height,
        quality: config.quality,
    }
}

pub fn plan_thumbnail(source: &Path, output: &Path, config: &ThumbnailConfig) -> ThumbnailParams {
    ThumbnailParams {
        source: source.to_path_buf(),
        output: output.to_path_buf(),
        size: config.size,
        quality: config.quality,
        sharpening: config.sharpening,
    }
}

/// Resize `source` to the full-size width (never upscaling) and encode.
pub fn create_full_size(
    backend: &impl ImageBackend,
    source: &Path,
    output: &Path,
    original: Dimensions,
    config: &FullSizeConfig,
) -> Result<()> {
    backend.resize(&plan_full_size(source, output, original, config))
}

/// Cover-crop `source` to the thumbnail square and encode.
pub fn create_thumbnail(
    backend: &impl ImageBackend,
    source: &Path,
    output: &Path,
    config: &ThumbnailConfig,
) -> Result<()> {
    backend.thumbnail(&plan_thumbnail(source, output, config))
}
