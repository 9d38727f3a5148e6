//! Content-addressed cache for encoded images.
//!
//! AVIF encoding dominates build time, so the process stage skips any
//! variant whose source bytes and encoding parameters are unchanged since
//! the last run.
//!
//! ## Keys
//!
//! Lookups use a [`ContentKey`], not the output path:
//!
//! - **source**: SHA-256 of the source file. Content-based, so it survives
//!   `git checkout` resetting modification times.
//! - **params**: SHA-256 of the encoding parameters (variant kind, output
//!   dimensions, quality, sharpening). Any config change re-encodes.
//!
//! Renaming a file or a category changes image ids and therefore output
//! paths, but not the content key. A hit whose stored output sits at a
//! different path is copied instead of re-encoded.
//!
//! ```text
//! key found, file at expected path   → Cached
//! key found, file at another path    → Copied
//! no key, or stored file missing     → Encoded
//! ```
//!
//! ## Storage
//!
//! `images/.cache-manifest.json` inside the site output, so caching the
//! output directory in CI carries the cache along. `--no-cache` starts from
//! [`AssetCache::empty`].

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

const CACHE_FILENAME: &str = ".cache-manifest.json";

/// Bump to invalidate every existing cache when key computation changes.
const CACHE_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentKey {
    pub source_hash: String,
    pub params_hash: String,
}

/// How a variant was produced in this run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VariantStatus {
    Cached,
    Copied,
    Encoded,
}

impl fmt::Display for VariantStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            VariantStatus::Cached => "cached",
            VariantStatus::Copied => "copied",
            VariantStatus::Encoded => "encoded",
        })
    }
}

/// Output path (relative to the images directory) → content key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetCache {
    version: u32,
    entries: BTreeMap<String, ContentKey>,
    /// Reverse index, rebuilt on load.
    #[serde(skip)]
    by_content: HashMap<ContentKey, String>,
}

impl AssetCache {
    pub fn empty() -> Self {
        Self {
            version: CACHE_VERSION,
            entries: BTreeMap::new(),
            by_content: HashMap::new(),
        }
    }

    /// Load from `images_dir`. A missing, corrupt or outdated file yields an
    /// empty cache.
    pub fn load(images_dir: &Path) -> Self {
        let Ok(content) = std::fs::read_to_string(cache_path(images_dir)) else {
            return Self::empty();
        };
        let Ok(mut cache) = serde_json::from_str::<Self>(&content) else {
            return Self::empty();
        };
        if cache.version != CACHE_VERSION {
            return Self::empty();
        }
        cache.by_content = cache
            .entries
            .iter()
            .map(|(path, key)| (key.clone(), path.clone()))
            .collect();
        cache
    }

    pub fn save(&self, images_dir: &Path) -> io::Result<()> {
        std::fs::create_dir_all(images_dir)?;
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(cache_path(images_dir), json)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Stored output path for `key`, if that file is still on disk.
    pub fn lookup(&self, key: &ContentKey, images_dir: &Path) -> Option<&str> {
        let stored = self.by_content.get(key)?;
        images_dir.join(stored).exists().then_some(stored.as_str())
    }

    /// Record that `output` holds the encoding identified by `key`.
    ///
    /// An older entry for the same content under a different path is
    /// dropped, so moved images don't accumulate stale entries.
    pub fn record(&mut self, output: String, key: ContentKey) {
        if let Some(old) = self.by_content.get(&key)
            && *old != output
        {
            self.entries.remove(old.as_str());
        }
        self.by_content.insert(key.clone(), output.clone());
        self.entries.insert(output, key);
    }

    /// Resolve `key` for `output`: reuse in place, copy from a previous
    /// location, or report that an encode is needed.
    pub fn resolve(
        &self,
        key: &ContentKey,
        output: &str,
        images_dir: &Path,
    ) -> io::Result<Option<VariantStatus>> {
        match self.lookup(key, images_dir) {
            Some(stored) if stored == output => Ok(Some(VariantStatus::Cached)),
            Some(stored) => {
                let target = images_dir.join(output);
                if let Some(parent) = target.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::copy(images_dir.join(stored), target)?;
                Ok(Some(VariantStatus::Copied))
            }
            None => Ok(None),
        }
    }
}

pub fn cache_path(images_dir: &Path) -> PathBuf {
    images_dir.join(CACHE_FILENAME)
}

/// SHA-256 of a file's contents as lowercase hex.
pub fn hash_file(path: &Path) -> io::Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(format!("{:x}", Sha256::digest(&bytes)))
}

/// Params hash for a full-size variant at its final dimensions.
pub fn hash_full_size_params(width: u32, height: u32, quality: u32) -> String {
    let mut hasher = Sha256::new();
    hasher.update(b"full\0");
    hasher.update(width.to_le_bytes());
    hasher.update(height.to_le_bytes());
    hasher.update(quality.to_le_bytes());
    format!("{:x}", hasher.finalize())
}

/// Params hash for a square thumbnail.
pub fn hash_thumbnail_params(size: u32, quality: u32, sharpening: Option<(f32, i32)>) -> String {
    let mut hasher = Sha256::new();
    hasher.update(b"thumb\0");
    hasher.update(size.to_le_bytes());
    hasher.update(quality.to_le_bytes());
    match sharpening {
        Some((sigma, threshold)) => {
            hasher.update(b"\x01");
            hasher.update(sigma.to_le_bytes());
            hasher.update(threshold.to_le_bytes());
        }
        None => hasher.update(b"\x00"),
    }
    format!("{:x}", hasher.finalize())
}

/// Per-run tally of variant outcomes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub cached: u32,
    pub copied: u32,
    pub encoded: u32,
}

impl CacheStats {
    pub fn add(&mut self, status: VariantStatus) {
        match status {
            VariantStatus::Cached => self.cached += 1,
            VariantStatus::Copied => self.copied += 1,
            VariantStatus::Encoded => self.encoded += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.cached + self.copied + self.encoded
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.cached == 0 && self.copied == 0 {
            return write!(f, "{} encoded", self.encoded);
        }
        write!(f, "{} cached, ", self.cached)?;
        if self.copied > 0 {
            write!(f, "{} copied, ", self.copied)?;
        }
        write!(f, "{} encoded ({} total)", self.encoded, self.total())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn key(s: &str, p: &str) -> ContentKey {
        ContentKey {
            source_hash: s.into(),
            params_hash: p.into(),
        }
    }

    #[test]
    fn lookup_requires_file_on_disk() {
        let tmp = TempDir::new().unwrap();
        let mut cache = AssetCache::empty();
        cache.record("full/nature-1.avif".into(), key("s", "p"));
        assert_eq!(cache.lookup(&key("s", "p"), tmp.path()), None);

        fs::create_dir_all(tmp.path().join("full")).unwrap();
        fs::write(tmp.path().join("full/nature-1.avif"), "x").unwrap();
        assert_eq!(
            cache.lookup(&key("s", "p"), tmp.path()),
            Some("full/nature-1.avif")
        );
        assert_eq!(cache.lookup(&key("s", "other"), tmp.path()), None);
    }

    #[test]
    fn record_drops_entry_for_moved_content() {
        let mut cache = AssetCache::empty();
        cache.record("full/nature-1.avif".into(), key("s", "p"));
        cache.record("full/nature-2.avif".into(), key("s", "p"));
        assert_eq!(cache.len(), 1);
        assert!(cache.entries.contains_key("full/nature-2.avif"));
    }

    #[test]
    fn resolve_distinguishes_cached_copied_and_miss() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("full")).unwrap();
        fs::write(tmp.path().join("full/old-1.avif"), "pixels").unwrap();

        let mut cache = AssetCache::empty();
        cache.record("full/old-1.avif".into(), key("s", "p"));

        assert_eq!(
            cache.resolve(&key("s", "p"), "full/old-1.avif", tmp.path()).unwrap(),
            Some(VariantStatus::Cached)
        );
        assert_eq!(
            cache.resolve(&key("s", "p"), "full/new-1.avif", tmp.path()).unwrap(),
            Some(VariantStatus::Copied)
        );
        assert_eq!(
            fs::read_to_string(tmp.path().join("full/new-1.avif")).unwrap(),
            "pixels"
        );
        assert_eq!(
            cache.resolve(&key("t", "p"), "full/x.avif", tmp.path()).unwrap(),
            None
        );
    }

    #[test]
    fn save_and_load_rebuilds_index() {
        let tmp = TempDir::new().unwrap();
        let mut cache = AssetCache::empty();
        cache.record("thumbs/a.avif".into(), key("s1", "p1"));
        cache.save(tmp.path()).unwrap();

        let loaded = AssetCache::load(tmp.path());
        assert_eq!(loaded.len(), 1);
        assert_eq!(
            loaded.by_content.get(&key("s1", "p1")).map(String::as_str),
            Some("thumbs/a.avif")
        );
    }

    #[test]
    fn load_missing_corrupt_or_outdated_is_empty() {
        let tmp = TempDir::new().unwrap();
        assert!(AssetCache::load(tmp.path()).is_empty());

        fs::write(cache_path(tmp.path()), "not json").unwrap();
        assert!(AssetCache::load(tmp.path()).is_empty());

        let json = format!(
            r#"{{"version": {}, "entries": {{"a": {{"source_hash":"h","params_hash":"p"}}}}}}"#,
            CACHE_VERSION + 1
        );
        fs::write(cache_path(tmp.path()), json).unwrap();
        assert!(AssetCache::load(tmp.path()).is_empty());
    }

    #[test]
    fn hash_file_tracks_content() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("a.jpg");
        fs::write(&path, b"one").unwrap();
        let h1 = hash_file(&path).unwrap();
        assert_eq!(h1.len(), 64);
        assert_eq!(h1, hash_file(&path).unwrap());

        fs::write(&path, b"two").unwrap();
        assert_ne!(h1, hash_file(&path).unwrap());
    }

    #[test]
    fn params_hashes_vary_with_inputs() {
        assert_eq!(hash_full_size_params(1200, 800, 80), hash_full_size_params(1200, 800, 80));
        assert_ne!(hash_full_size_params(1200, 800, 80), hash_full_size_params(1200, 800, 70));
        assert_ne!(hash_full_size_params(1200, 800, 80), hash_full_size_params(800, 600, 80));
        assert_ne!(
            hash_thumbnail_params(300, 70, Some((0.5, 0))),
            hash_thumbnail_params(300, 70, None)
        );
        assert_ne!(hash_thumbnail_params(300, 70, None), hash_thumbnail_params(200, 70, None));
    }

    #[test]
    fn thumbnail_and_full_hashes_never_collide() {
        assert_ne!(hash_full_size_params(300, 300, 70), hash_thumbnail_params(300, 70, None));
    }

    #[test]
    fn stats_display() {
        let mut stats = CacheStats::default();
        stats.add(VariantStatus::Encoded);
        stats.add(VariantStatus::Encoded);
        assert_eq!(stats.to_string(), "2 encoded");

        stats.add(VariantStatus::Cached);
        assert_eq!(stats.to_string(), "1 cached, 2 encoded (3 total)");

        stats.add(VariantStatus::Copied);
        assert_eq!(stats.to_string(), "1 cached, 1 copied, 2 encoded (4 total)");
    }
}
