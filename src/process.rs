//! Image processing and manifest publishing.
//!
//! Stage 2 of the build pipeline. Takes the scan manifest, produces two
//! AVIF derivatives per image and publishes the gallery manifest.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── data/
//! │   └── images.json              # Published manifest (array of records)
//! └── images/
//!     ├── .cache-manifest.json     # Encode cache, see crate::cache
//!     ├── full/
//!     │   └── nature-1.avif        # images.width wide, never upscaled
//!     └── thumbs/
//!         └── nature-1.avif        # thumbnails.size square, sharpened
//! ```
//!
//! ## Parallel Processing
//!
//! Images are processed with rayon on the global pool (sized by
//! `processing.max_processes`). Progress is reported as [`ProcessEvent`]s
//! over an optional channel so the CLI can print from a single thread.

use crate::cache::{
    AssetCache, CacheStats, ContentKey, VariantStatus, hash_file, hash_full_size_params,
    hash_thumbnail_params,
};
use crate::config::GalleryConfig;
use crate::imaging::{
    BackendError, FullSizeConfig, ImageBackend, Quality, RustBackend, Sharpening,
    ThumbnailConfig, get_dimensions, plan_full_size, plan_thumbnail,
};
use crate::manifest::{self, ManifestError};
use crate::scan::{ScanManifest, ScannedImage};
use crate::types::ImageRecord;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use std::sync::{Mutex, PoisonError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Manifest error: {0}")]
    Manifest(#[from] ManifestError),
    #[error("Image processing failed: {0}")]
    Imaging(#[from] BackendError),
    #[error("Source image not found: {0}")]
    SourceNotFound(PathBuf),
}

/// Published manifest location, relative to the output directory.
pub const MANIFEST_PATH: &str = "data/images.json";

const IMAGES_DIR: &str = "images";
const FULL_DIR: &str = "full";
const THUMBS_DIR: &str = "thumbs";

/// Encoding settings for both derivatives.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ProcessConfig {
    pub full: FullSizeConfig,
    pub thumbnail: ThumbnailConfig,
}

impl ProcessConfig {
    pub fn from_gallery_config(config: &GalleryConfig) -> Self {
        Self {
            full: FullSizeConfig {
                width: config.images.width,
                quality: Quality::new(config.images.quality),
            },
            thumbnail: ThumbnailConfig {
                size: config.thumbnails.size,
                quality: Quality::new(config.thumbnails.quality),
                sharpening: Some(Sharpening::light()),
            },
        }
    }
}

/// Progress report for one finished image.
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessEvent {
    ImageProcessed {
        /// 1-based position in the manifest.
        index: usize,
        total: usize,
        id: String,
        title: String,
        /// Relative to the content root.
        source_path: String,
        full: VariantStatus,
        thumb: VariantStatus,
    },
}

#[derive(Debug)]
pub struct ProcessResult {
    pub records: Vec<ImageRecord>,
    pub cache_stats: CacheStats,
}

/// Site-relative URL of the full-size derivative.
pub fn full_url(id: &str) -> String {
    format!("{IMAGES_DIR}/{FULL_DIR}/{id}.avif")
}

/// Site-relative URL of the thumbnail.
pub fn thumb_url(id: &str) -> String {
    format!("{IMAGES_DIR}/{THUMBS_DIR}/{id}.avif")
}

/// Read a scan manifest written by the `scan` command.
pub fn read_scan_manifest(path: &Path) -> Result<ScanManifest, ProcessError> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

pub fn process(
    scan: &ScanManifest,
    source_root: &Path,
    output_dir: &Path,
    use_cache: bool,
    events: Option<Sender<ProcessEvent>>,
) -> Result<ProcessResult, ProcessError> {
    process_with_backend(
        &RustBackend::new(),
        scan,
        source_root,
        output_dir,
        use_cache,
        events,
    )
}

/// Process with a specific backend (tests pass a mock).
pub fn process_with_backend(
    backend: &impl ImageBackend,
    scan: &ScanManifest,
    source_root: &Path,
    output_dir: &Path,
    use_cache: bool,
    events: Option<Sender<ProcessEvent>>,
) -> Result<ProcessResult, ProcessError> {
    let config = ProcessConfig::from_gallery_config(&scan.config);
    let images_dir = output_dir.join(IMAGES_DIR);
    std::fs::create_dir_all(images_dir.join(FULL_DIR))?;
    std::fs::create_dir_all(images_dir.join(THUMBS_DIR))?;

    let cache = Mutex::new(if use_cache {
        AssetCache::load(&images_dir)
    } else {
        AssetCache::empty()
    });

    let total = scan.images.len();
    let outcomes: Vec<(ImageRecord, VariantStatus, VariantStatus)> = scan
        .images
        .par_iter()
        .enumerate()
        .map(|(index, image)| {
            let outcome =
                process_image(backend, image, source_root, &images_dir, &config, &cache)?;
            if let Some(tx) = &events {
                // A dropped receiver only loses progress output.
                let _ = tx.send(ProcessEvent::ImageProcessed {
                    index: index + 1,
                    total,
                    id: image.id.clone(),
                    title: image.title.clone(),
                    source_path: image.source_path.clone(),
                    full: outcome.1,
                    thumb: outcome.2,
                });
            }
            Ok(outcome)
        })
        .collect::<Result<_, ProcessError>>()?;

    let mut cache_stats = CacheStats::default();
    let mut records = Vec::with_capacity(outcomes.len());
    for (record, full, thumb) in outcomes {
        cache_stats.add(full);
        cache_stats.add(thumb);
        records.push(record);
    }

    cache
        .into_inner()
        .unwrap_or_else(PoisonError::into_inner)
        .save(&images_dir)?;
    manifest::write(&output_dir.join(MANIFEST_PATH), &records)?;

    Ok(ProcessResult {
        records,
        cache_stats,
    })
}

fn process_image(
    backend: &impl ImageBackend,
    image: &ScannedImage,
    source_root: &Path,
    images_dir: &Path,
    config: &ProcessConfig,
    cache: &Mutex<AssetCache>,
) -> Result<(ImageRecord, VariantStatus, VariantStatus), ProcessError> {
    let source = source_root.join(&image.source_path);
    if !source.exists() {
        return Err(ProcessError::SourceNotFound(source));
    }
    let source_hash = hash_file(&source)?;

    let full_rel = format!("{FULL_DIR}/{}.avif", image.id);
    let dims = get_dimensions(backend, &source)?;
    let full_params = plan_full_size(&source, &images_dir.join(&full_rel), dims, &config.full);
    let full_key = ContentKey {
        source_hash: source_hash.clone(),
        params_hash: hash_full_size_params(
            full_params.width,
            full_params.height,
            full_params.quality.value(),
        ),
    };
    let full = produce(cache, &full_key, &full_rel, images_dir, || {
        backend.resize(&full_params)
    })?;

    let thumb_rel = format!("{THUMBS_DIR}/{}.avif", image.id);
    let thumb_params = plan_thumbnail(&source, &images_dir.join(&thumb_rel), &config.thumbnail);
    let thumb_key = ContentKey {
        source_hash,
        params_hash: hash_thumbnail_params(
            thumb_params.size,
            thumb_params.quality.value(),
            thumb_params.sharpening.map(|s| (s.sigma, s.threshold)),
        ),
    };
    let thumb = produce(cache, &thumb_key, &thumb_rel, images_dir, || {
        backend.thumbnail(&thumb_params)
    })?;

    let record = ImageRecord {
        id: image.id.clone(),
        title: image.title.clone(),
        category: image.category.clone(),
        tags: image.tags.clone(),
        thumb_url: thumb_url(&image.id),
        full_url: full_url(&image.id),
    };
    Ok((record, full, thumb))
}

/// Reuse a cached variant or run `encode`, then record the result.
fn produce(
    cache: &Mutex<AssetCache>,
    key: &ContentKey,
    output: &str,
    images_dir: &Path,
    encode: impl FnOnce() -> Result<(), BackendError>,
) -> Result<VariantStatus, ProcessError> {
    let hit = cache
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .resolve(key, output, images_dir)?;
    let status = match hit {
        Some(status) => status,
        None => {
            encode()?;
            VariantStatus::Encoded
        }
    };
    cache
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .record(output.to_string(), key.clone());
    Ok(status)
}
