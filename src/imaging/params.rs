//! Parameter types for image operations.
//!
//! These structs describe *what* to do, not *how*. They sit between
//! [`operations`](super::operations), which decides what to create, and the
//! [`backend`](super::backend), which does the pixel work, so a mock backend
//! can stand in without touching operation logic.

use std::path::PathBuf;

/// Lossy encoding quality (1-100), clamped on construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(80)
    }
}

/// Unsharp-mask parameters.
///
/// - `sigma`: Gaussian blur radius (higher = stronger)
/// - `threshold`: minimum brightness difference to sharpen (0 = all pixels)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sharpening {
    pub sigma: f32,
    pub threshold: i32,
}

impl Sharpening {
    /// Light sharpening that restores edge contrast lost in downscaling.
    pub fn light() -> Self {
        Self {
            sigma: 0.5,
            threshold: 0,
        }
    }
}

/// Aspect-preserving resize to exact output dimensions.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeParams {
    pub source: PathBuf,
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
    pub quality: Quality,
}

/// Square thumbnail: fill-resize to `size`×`size`, then center-crop.
#[derive(Debug, Clone, PartialEq)]
pub struct ThumbnailParams {
    pub source: PathBuf,
    pub output: PathBuf,
    pub size: u32,
    pub quality: Quality,
    pub sharpening: Option<Sharpening>,
}
