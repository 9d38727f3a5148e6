//! Full pipeline tests: real JPEGs through scan, process and generate.
//!
//! The library tests drive each stage directly; the CLI tests run the
//! built binary against a temporary content directory.

use image::{ImageEncoder, RgbImage};
use image_gallery::{config, generate, manifest, process, scan};
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Setup helpers
// ---------------------------------------------------------------------------

fn write_jpeg(path: &Path, width: u32, height: u32) {
    let img = RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x * 4 % 256) as u8, (y * 4 % 256) as u8, 90])
    });
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    let file = std::fs::File::create(path).unwrap();
    image::codecs::jpeg::JpegEncoder::new(std::io::BufWriter::new(file))
        .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
        .unwrap();
}

/// Two categories, three small images, one sidecar, a tiny config.
fn content() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write_jpeg(&root.join("010-Nature/001-Sunset-Beach.jpg"), 96, 64);
    write_jpeg(&root.join("010-Nature/002-Forest.jpg"), 48, 64);
    std::fs::write(
        root.join("010-Nature/001-Sunset-Beach.txt"),
        "Waves rolling over a golden beach",
    )
    .unwrap();
    write_jpeg(&root.join("020-Animals/001-Puppy.jpg"), 64, 64);
    std::fs::write(
        root.join("config.toml"),
        "title = \"Test Gallery\"\n\n[thumbnails]\nsize = 32\n\n[images]\nwidth = 64\n",
    )
    .unwrap();
    tmp
}

fn non_empty(path: &Path) -> bool {
    std::fs::metadata(path).map(|m| m.len() > 0).unwrap_or(false)
}

fn bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_image-gallery"))
}

// ---------------------------------------------------------------------------
// Library pipeline
// ---------------------------------------------------------------------------

#[test]
fn pipeline_produces_assets_manifest_and_pages() {
    let content = content();
    let dist = TempDir::new().unwrap();

    let scanned = scan::scan(content.path()).unwrap();
    assert_eq!(scanned.categories, vec!["Nature", "Animals"]);
    assert_eq!(scanned.config.title, "Test Gallery");

    let result = process::process(&scanned, content.path(), dist.path(), true, None).unwrap();
    assert_eq!(result.records.len(), 3);
    assert_eq!(result.cache_stats.encoded, 6);

    let published = manifest::load_file(&dist.path().join(process::MANIFEST_PATH)).unwrap();
    assert_eq!(published, result.records);
    let sunset = &published[0];
    assert_eq!(sunset.id, "nature-1");
    assert_eq!(sunset.title, "Waves rolling over a golden beach");
    assert_eq!(sunset.tags[0], "nature");
    assert!(sunset.tags.contains(&"golden".to_string()));

    for record in &published {
        assert!(non_empty(&dist.path().join(&record.full_url)));
        assert!(non_empty(&dist.path().join(&record.thumb_url)));
    }
    assert!(dist.path().join("images/.cache-manifest.json").exists());

    let summary = generate::generate(
        &dist.path().join(process::MANIFEST_PATH),
        dist.path(),
        &scanned.config,
    )
    .unwrap();
    assert_eq!(summary.images, 3);
    assert_eq!(summary.categories, 2);

    let index = std::fs::read_to_string(dist.path().join("index.html")).unwrap();
    assert!(index.contains("<title>Test Gallery</title>"));
    assert!(index.contains("src=\"/images/thumbs/nature-1.avif\""));
    assert!(dist.path().join("category/animals/index.html").exists());
    assert!(dist.path().join("tag/golden/1.html").exists());
}

#[test]
fn second_process_run_is_fully_cached() {
    let content = content();
    let dist = TempDir::new().unwrap();
    let scanned = scan::scan(content.path()).unwrap();

    process::process(&scanned, content.path(), dist.path(), true, None).unwrap();
    let again = process::process(&scanned, content.path(), dist.path(), true, None).unwrap();
    assert_eq!(again.cache_stats.cached, 6);
    assert_eq!(again.cache_stats.encoded, 0);
}

#[test]
fn stock_config_matches_defaults() {
    let parsed: config::GalleryConfig = toml::from_str(config::stock_config_toml()).unwrap();
    assert_eq!(parsed, config::GalleryConfig::default());
}

// ---------------------------------------------------------------------------
// CLI
// ---------------------------------------------------------------------------

#[test]
fn cli_build_then_query() {
    let content = content();
    let dist = TempDir::new().unwrap();
    let temp = TempDir::new().unwrap();

    let status = bin()
        .arg("build")
        .arg("--source")
        .arg(content.path())
        .arg("--output")
        .arg(dist.path())
        .arg("--temp-dir")
        .arg(temp.path())
        .status()
        .unwrap();
    assert!(status.success());
    assert!(temp.path().join("manifest.json").exists());
    assert!(dist.path().join("index.html").exists());

    let out = bin()
        .args(["query", "--tag", "puppy"])
        .arg("--output")
        .arg(dist.path())
        .output()
        .unwrap();
    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert!(stdout.contains("001 Puppy [Animals]"));
    assert!(stdout.contains("1 result"));
}

#[test]
fn cli_query_reports_no_results() {
    let dist = TempDir::new().unwrap();
    let records: Vec<image_gallery::types::ImageRecord> = serde_json::from_str(
        &std::fs::read_to_string(Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/images.json"))
            .unwrap(),
    )
    .unwrap();
    manifest::write(&dist.path().join(process::MANIFEST_PATH), &records).unwrap();

    let out = bin()
        .args(["query", "--search", "zzz"])
        .arg("--output")
        .arg(dist.path())
        .output()
        .unwrap();
    assert!(out.status.success());
    assert_eq!(
        String::from_utf8(out.stdout).unwrap(),
        "No images found matching your criteria.\n"
    );
}

#[test]
fn cli_check_rejects_loose_images() {
    let content = content();
    write_jpeg(&content.path().join("stray.jpg"), 8, 8);

    let out = bin()
        .arg("check")
        .arg("--source")
        .arg(content.path())
        .output()
        .unwrap();
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("stray.jpg"));
}

#[test]
fn cli_browse_fails_without_manifest() {
    let dir = TempDir::new().unwrap();
    let out = bin()
        .arg("browse")
        .arg("--source")
        .arg(dir.path())
        .arg("--output")
        .arg(dir.path())
        .output()
        .unwrap();
    assert!(!out.status.success());
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert!(stdout.starts_with("Error loading gallery. Please try again later."));
    assert!(String::from_utf8_lossy(&out.stderr).contains("images.json"));
}

#[test]
fn cli_gen_config_prints_stock_file() {
    let out = bin().arg("gen-config").output().unwrap();
    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert_eq!(stdout, config::stock_config_toml());
}
