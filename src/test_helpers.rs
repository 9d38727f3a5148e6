//! Shared test utilities for the image-gallery test suite.
//!
//! Provides the canonical four-record fixture, a compact record builder,
//! synthetic image files for scan/process tests, and a content-tree
//! builder.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let images = sample_records();
//! let tmp = content_tree(&[("010-Nature", &["001-dawn.jpg"])]);
//! ```

use crate::types::ImageRecord;
use image::{ImageEncoder, RgbImage};
use std::path::Path;
use tempfile::TempDir;

// =========================================================================
// Records
// =========================================================================

/// Build a record with derived asset paths.
pub fn record(id: &str, title: &str, category: &str, tags: &[&str]) -> ImageRecord {
    ImageRecord {
        id: id.to_string(),
        title: title.to_string(),
        category: category.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        thumb_url: format!("thumb{id}.jpg"),
        full_url: format!("full{id}.jpg"),
    }
}

/// Four records, one per category. Only `Sunset Beach` carries `water`.
pub fn sample_records() -> Vec<ImageRecord> {
    vec![
        record("1", "Sunset Beach", "Nature", &["sunset", "beach", "water"]),
        record("2", "City Skyline", "Wallpapers", &["city", "night", "lights"]),
        record("3", "Mountain Trek", "Travel", &["mountain", "trek", "hiking"]),
        record("4", "Cute Puppy", "Animals", &["dog", "puppy", "cute"]),
    ]
}

/// `count` records with `count` distinct tags (`tag-00`, `tag-01`, ...).
pub fn many_tagged_records(count: usize) -> Vec<ImageRecord> {
    (0..count)
        .map(|i| {
            let tag = format!("tag-{i:02}");
            record(&i.to_string(), &format!("Image {i}"), "Nature", &[&tag])
        })
        .collect()
}

// =========================================================================
// Filesystem fixtures
// =========================================================================

/// Write a small valid JPEG at `path`.
pub fn write_test_jpeg(path: &Path, width: u32, height: u32) {
    let img = RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    let file = std::fs::File::create(path).unwrap();
    let writer = std::io::BufWriter::new(file);
    image::codecs::jpeg::JpegEncoder::new(writer)
        .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
        .unwrap();
}

/// Create a content root with category directories holding placeholder
/// image files (scan only checks extensions). Each file has distinct bytes
/// so content hashes differ.
pub fn content_tree(categories: &[(&str, &[&str])]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    for (dir, files) in categories {
        let category = tmp.path().join(dir);
        std::fs::create_dir_all(&category).unwrap();
        for file in *files {
            std::fs::write(category.join(file), format!("fake image {dir}/{file}")).unwrap();
        }
    }
    tmp
}
