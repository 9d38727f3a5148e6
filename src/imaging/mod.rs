//! Image processing in pure Rust.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `image::image_dimensions` |
//! | **Full size → AVIF** | Lanczos3 + rav1e encoder, never upscaled |
//! | **Thumbnail** | square cover crop + `unsharpen` |
//!
//! The module is split into:
//! - **Calculations**: pure dimension math
//! - **Parameters**: data describing an operation
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: plans and `create_*` helpers combining the above

pub mod backend;
mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use operations::{
    FullSizeConfig, ThumbnailConfig, create_full_size, create_thumbnail, get_dimensions,
    plan_full_size, plan_thumbnail,
};
pub use params::{Quality, ResizeParams, Sharpening, ThumbnailParams};
pub use rust_backend::RustBackend;
