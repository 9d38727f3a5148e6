//! Image processing backend trait and shared types.
//!
//! [`ImageBackend`] defines the three operations the process stage needs:
//! identify, resize and thumbnail. The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend); tests use
//! `MockBackend`, which records operations without touching pixels.

use super::params::{ResizeParams, ThumbnailParams};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Every backend implements all three operations so the rest of the
/// codebase is backend-agnostic. `Sync` so rayon workers can share one.
pub trait ImageBackend: Sync {
    /// Read image dimensions without a full decode where possible.
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError>;

    /// Aspect-preserving resize, encoded to the output's format.
    fn resize(&self, params: &ResizeParams) -> Result<(), BackendError>;

    /// Square cover crop with optional sharpening.
    fn thumbnail(&self, params: &ThumbnailParams) -> Result<(), BackendError>;
}
