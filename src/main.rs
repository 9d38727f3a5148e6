use clap::{Parser, Subcommand};
use image_gallery::gallery::{Filter, Phase};
use image_gallery::{config, generate, manifest, output, process, query, scan};
use std::path::{Path, PathBuf};

/// Shared flags for commands that process images.
#[derive(clap::Args, Clone)]
struct CacheArgs {
    /// Disable the processing cache: force re-encoding of all images
    #[arg(long)]
    no_cache: bool,
}

/// Where to read the published manifest from.
#[derive(clap::Args, Clone)]
struct ManifestArgs {
    /// Manifest path (default: <output>/data/images.json)
    #[arg(long)]
    manifest: Option<PathBuf>,
}

impl ManifestArgs {
    fn resolve(&self, output_dir: &Path) -> PathBuf {
        self.manifest
            .clone()
            .unwrap_or_else(|| output_dir.join(process::MANIFEST_PATH))
    }
}

#[derive(Parser)]
#[command(name = "image-gallery")]
#[command(about = "Static image gallery with search, tag filters and a lightbox")]
#[command(long_about = "\
Static image gallery with search, tag filters and a lightbox

Directories become categories, images become gallery entries with derived
tags, and every filter and lightbox state becomes a static page.

Content structure:

  content/
  ├── config.toml                  # Gallery config (optional)
  ├── 010-Nature/                  # Category (number orders, name labels)
  │   ├── 001-Sunset-Beach.jpg     # Title from filename
  │   ├── 001-Sunset-Beach.txt     # Sidecar: title and tag source
  │   └── 002-Forest.jpg
  └── 020-Animals/
      └── 001-Puppy.jpg

Output:

  dist/
  ├── data/images.json             # Published manifest
  ├── images/full/<id>.avif        # Full-size derivatives
  ├── images/thumbs/<id>.avif      # Square thumbnails
  ├── index.html                   # All images
  ├── category/<slug>/             # One view per category
  └── tag/<slug>/                  # One view per tag

Run 'image-gallery gen-config' to generate a documented config.toml.")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Directory for intermediate files (scan manifest)
    #[arg(long, default_value = ".gallery-temp", global = true)]
    temp_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan content directory into a manifest
    Scan,
    /// Encode derivatives and publish data/images.json
    Process(CacheArgs),
    /// Produce the static HTML views from the published manifest
    Generate(ManifestArgs),
    /// Run the full pipeline: scan → process → generate
    Build(CacheArgs),
    /// Validate the content directory and any published manifest
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
    /// Filter the published manifest and print the matches
    Query {
        #[command(flatten)]
        manifest: ManifestArgs,
        /// Category name ("all" for everything)
        #[arg(long, conflicts_with_all = ["search", "tag"])]
        category: Option<String>,
        /// Case-insensitive substring over titles and tags
        #[arg(long, conflicts_with = "tag")]
        search: Option<String>,
        /// Exact tag
        #[arg(long)]
        tag: Option<String>,
    },
    /// Drive the gallery interactively from stdin (type 'help')
    Browse(ManifestArgs),
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Scan => {
            let manifest = scan::scan(&cli.source)?;
            write_scan_manifest(&manifest, &cli.temp_dir)?;
            output::print_scan_output(&manifest);
        }
        Command::Process(cache_args) => {
            let scan_manifest_path = cli.temp_dir.join("manifest.json");
            let manifest = process::read_scan_manifest(&scan_manifest_path)?;
            run_process(&manifest, &cli.source, &cli.output, !cache_args.no_cache)?;
        }
        Command::Generate(manifest_args) => {
            let gallery_config = config::load_config(&cli.source)?;
            let summary = generate::generate(
                &manifest_args.resolve(&cli.output),
                &cli.output,
                &gallery_config,
            )?;
            output::print_generate_output(&summary);
        }
        Command::Build(cache_args) => {
            println!("==> Stage 1: Scanning {}", cli.source.display());
            let manifest = scan::scan(&cli.source)?;
            write_scan_manifest(&manifest, &cli.temp_dir)?;
            output::print_scan_output(&manifest);

            println!("==> Stage 2: Processing images");
            run_process(&manifest, &cli.source, &cli.output, !cache_args.no_cache)?;

            println!("==> Stage 3: Generating HTML → {}", cli.output.display());
            let summary = generate::generate(
                &cli.output.join(process::MANIFEST_PATH),
                &cli.output,
                &manifest.config,
            )?;
            output::print_generate_output(&summary);

            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let manifest = scan::scan(&cli.source)?;
            output::print_scan_output(&manifest);

            let published = cli.output.join(process::MANIFEST_PATH);
            if published.exists() {
                println!("==> Checking {}", published.display());
                let records = manifest::load_file(&published)?;
                output::print_lines(&output::format_check_output(&records));
            }
            println!("==> Content is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
        Command::Query {
            manifest: manifest_args,
            category,
            search,
            tag,
        } => {
            let records = manifest::load_file(&manifest_args.resolve(&cli.output))?;
            let filter = match (category, search, tag) {
                (Some(category), _, _) => Filter::category(&category, &query::categories(&records)),
                (_, Some(text), _) => Filter::text(&text),
                (_, _, Some(tag)) => Filter::tag(Some(&tag)),
                _ => Filter::None,
            };
            output::print_lines(&output::format_query_output(&filter.apply(&records)));
        }
        Command::Browse(manifest_args) => {
            let gallery_config = config::load_config(&cli.source)?;
            let source = manifest::FileSource::new(manifest_args.resolve(&cli.output));
            let stdin = std::io::stdin();
            let phase = output::run_browse(
                &source,
                gallery_config.gallery.visible_tags,
                stdin.lock(),
                std::io::stdout(),
            )?;
            if phase == Phase::Failed {
                return Err(format!("could not load {}", source.path().display()).into());
            }
        }
    }

    Ok(())
}

fn write_scan_manifest(manifest: &scan::ScanManifest, temp_dir: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(temp_dir)?;
    let json = serde_json::to_string_pretty(manifest)?;
    std::fs::write(temp_dir.join("manifest.json"), json)
}

/// Process with a printer thread draining progress events.
fn run_process(
    manifest: &scan::ScanManifest,
    source: &Path,
    output_dir: &Path,
    use_cache: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    init_thread_pool(&manifest.config.processing);
    let (tx, rx) = std::sync::mpsc::channel();
    let printer = std::thread::spawn(move || {
        for event in rx {
            for line in output::format_process_event(&event) {
                println!("{}", line);
            }
        }
    });
    let result = process::process(manifest, source, output_dir, use_cache, Some(tx));
    printer
        .join()
        .map_err(|_| "progress printer thread panicked")?;
    output::print_process_summary(&result?);
    Ok(())
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores: user can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
