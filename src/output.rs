//! CLI output formatting for all pipeline stages and the text gallery.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. Every image leads
//! with its positional index and title; ids, source paths and cache status
//! follow as indented context lines.
//!
//! # Output Format
//!
//! ## Scan
//!
//! ```text
//! Categories
//! 001 Nature (2 images)
//!     001 Sunset Beach
//!         Id: nature-1
//!         Source: 010-Nature/001-Sunset-Beach.jpg
//!         Tags: sunset, beach
//!
//! Found 2 images in 1 category
//! ```
//!
//! ## Process
//!
//! ```text
//! 001 Sunset Beach
//!     Source: 010-Nature/001-Sunset-Beach.jpg
//!     full: encoded
//!     thumbnail: cached
//! ```
//!
//! ## Browse
//!
//! The `browse` command drives a [`GalleryController`] with a
//! [`TextRenderer`], one command per input line:
//!
//! ```text
//! Categories: [All] Nature Animals
//! Tags: [All] beach puppy sunset
//! Grid (3 images)
//!     001 Sunset Beach [Nature] #sunset #beach
//! > tag puppy
//! ```
//!
//! # Architecture
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure:
//! no I/O, no side effects.

use crate::gallery::{
    ChipsView, FilterControls, GalleryController, GalleryEvent, Key, LightboxView, Phase,
    Renderer, Status,
};
use crate::generate::GenerateSummary;
use crate::manifest::ManifestSource;
use crate::process::{ProcessEvent, ProcessResult};
use crate::query::{categories, unique_tags};
use crate::scan::ScanManifest;
use crate::types::ImageRecord;
use std::io::{self, BufRead, Write};
use thiserror::Error;

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}

/// Format an entity header: positional index + title, with optional count.
///
/// ```text
/// 001 Nature (5 images)
/// 001 Sunset Beach
/// ```
fn entity_header(index: usize, title: &str, count: Option<usize>) -> String {
    match count {
        Some(n) => format!(
            "{} {} ({})",
            format_index(index),
            title,
            plural(n, "image", "images")
        ),
        None => format!("{} {}", format_index(index), title),
    }
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// One grid line: title, category and tags.
fn image_summary(index: usize, image: &ImageRecord) -> String {
    let mut line = format!("{} [{}]", entity_header(index, &image.title, None), image.category);
    for tag in &image.tags {
        line.push_str(" #");
        line.push_str(tag);
    }
    line
}

// ============================================================================
// Stage 1: Scan output
// ============================================================================

/// Format scan stage output showing discovered categories and images.
pub fn format_scan_output(manifest: &ScanManifest) -> Vec<String> {
    let mut lines = vec!["Categories".to_string()];

    for (cat_idx, category) in manifest.categories.iter().enumerate() {
        let images: Vec<_> = manifest
            .images
            .iter()
            .filter(|img| &img.category == category)
            .collect();
        lines.push(entity_header(cat_idx + 1, category, Some(images.len())));

        for (img_idx, image) in images.iter().enumerate() {
            lines.push(format!(
                "{}{}",
                indent(1),
                entity_header(img_idx + 1, &image.title, None)
            ));
            lines.push(format!("{}Id: {}", indent(2), image.id));
            lines.push(format!("{}Source: {}", indent(2), image.source_path));
            if !image.tags.is_empty() {
                lines.push(format!("{}Tags: {}", indent(2), image.tags.join(", ")));
            }
            if let Some(desc) = &image.description {
                lines.push(format!(
                    "{}Description: {}",
                    indent(2),
                    truncate_desc(desc, 60)
                ));
            }
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "Found {} in {}",
        plural(manifest.images.len(), "image", "images"),
        plural(manifest.categories.len(), "category", "categories")
    ));
    lines
}

/// Print scan output to stdout.
pub fn print_scan_output(manifest: &ScanManifest) {
    for line in format_scan_output(manifest) {
        println!("{}", line);
    }
}

// ============================================================================
// Stage 2: Process output
// ============================================================================

/// Format a single process progress event as display lines.
pub fn format_process_event(event: &ProcessEvent) -> Vec<String> {
    match event {
        ProcessEvent::ImageProcessed {
            index,
            title,
            source_path,
            full,
            thumb,
            ..
        } => vec![
            entity_header(*index, title, None),
            format!("{}Source: {}", indent(1), source_path),
            format!("{}full: {}", indent(1), full),
            format!("{}thumbnail: {}", indent(1), thumb),
        ],
    }
}

/// Format the closing summary of the process stage.
pub fn format_process_summary(result: &ProcessResult) -> Vec<String> {
    vec![format!(
        "Processed {} ({})",
        plural(result.records.len(), "image", "images"),
        result.cache_stats
    )]
}

pub fn print_process_summary(result: &ProcessResult) {
    for line in format_process_summary(result) {
        println!("{}", line);
    }
}

// ============================================================================
// Stage 3: Generate output
// ============================================================================

/// Format generate stage output.
pub fn format_generate_output(summary: &GenerateSummary) -> Vec<String> {
    vec![
        "Home \u{2192} index.html".to_string(),
        format!(
            "{}{} \u{2192} category/",
            indent(1),
            plural(summary.categories, "category view", "category views")
        ),
        format!(
            "{}{} \u{2192} tag/",
            indent(1),
            plural(summary.tags, "tag view", "tag views")
        ),
        format!(
            "Generated {} for {}",
            plural(summary.pages, "page", "pages"),
            plural(summary.images, "image", "images")
        ),
    ]
}

pub fn print_generate_output(summary: &GenerateSummary) {
    for line in format_generate_output(summary) {
        println!("{}", line);
    }
}

// ============================================================================
// Check and query output
// ============================================================================

/// Summary of a manifest that passed ingestion.
pub fn format_check_output(records: &[ImageRecord]) -> Vec<String> {
    vec![format!(
        "Manifest OK: {}, {}, {}",
        plural(records.len(), "image", "images"),
        plural(categories(records).len(), "category", "categories"),
        plural(unique_tags(records).len(), "tag", "tags")
    )]
}

/// Matching images, or the no-results message.
pub fn format_query_output(results: &[ImageRecord]) -> Vec<String> {
    if results.is_empty() {
        return vec![Status::NoResults.message().to_string()];
    }
    let mut lines: Vec<String> = results
        .iter()
        .enumerate()
        .map(|(i, image)| image_summary(i + 1, image))
        .collect();
    lines.push(plural(results.len(), "result", "results"));
    lines
}

pub fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}

// ============================================================================
// Text renderer
// ============================================================================

pub fn format_grid(images: &[ImageRecord]) -> Vec<String> {
    let mut lines = vec![format!("Grid ({})", plural(images.len(), "image", "images"))];
    lines.extend(
        images
            .iter()
            .enumerate()
            .map(|(i, image)| format!("{}{}", indent(1), image_summary(i + 1, image))),
    );
    lines
}

pub fn format_controls(controls: &FilterControls<'_>) -> Vec<String> {
    let mut line = String::from("Categories:");
    let all = std::iter::once(("All", controls.active_category.is_none()));
    let rest = controls
        .categories
        .iter()
        .map(|c| (c.as_str(), controls.active_category == Some(c.as_str())));
    for (label, active) in all.chain(rest) {
        if active {
            line.push_str(&format!(" [{label}]"));
        } else {
            line.push_str(&format!(" {label}"));
        }
    }
    let mut lines = vec![line];
    if !controls.search_text.is_empty() {
        lines.push(format!("Search: \"{}\"", controls.search_text));
    }
    lines
}

pub fn format_chips(chips: &ChipsView) -> Vec<String> {
    let mut line = if chips.all_active {
        String::from("Tags: [All]")
    } else {
        String::from("Tags: All")
    };
    for chip in chips.chips.iter().filter(|c| c.visible) {
        if chip.active {
            line.push_str(&format!(" [{}]", chip.label));
        } else {
            line.push_str(&format!(" {}", chip.label));
        }
    }
    if let Some(toggle) = &chips.toggle {
        line.push_str(&format!(" ({})", toggle.label));
    }
    vec![line]
}

pub fn format_lightbox(view: &LightboxView<'_>) -> Vec<String> {
    vec![
        format!(
            "Lightbox {}/{}: {} [{}]",
            view.position + 1,
            view.total,
            view.image.title,
            view.image.category
        ),
        format!("{}{}", indent(1), view.image.full_url),
    ]
}

/// Renders the gallery as plain text lines on a writer.
///
/// Write errors do not interrupt rendering; the first one is kept and
/// surfaced through [`take_error`](Self::take_error).
pub struct TextRenderer<W: Write> {
    out: W,
    status: Option<Status>,
    scroll_locked: bool,
    error: Option<io::Error>,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            status: None,
            scroll_locked: false,
            error: None,
        }
    }

    pub fn status(&self) -> Option<Status> {
        self.status
    }

    pub fn is_scroll_locked(&self) -> bool {
        self.scroll_locked
    }

    /// Write free-form lines (prompts, help, command errors).
    pub fn note(&mut self, lines: &[String]) {
        for line in lines {
            if let Err(e) = writeln!(self.out, "{}", line) {
                self.error.get_or_insert(e);
            }
        }
    }

    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for TextRenderer<W> {
    fn render_grid(&mut self, images: &[ImageRecord]) {
        self.note(&format_grid(images));
    }

    fn show_status(&mut self, status: Status) {
        self.status = Some(status);
        self.note(&[status.message().to_string()]);
    }

    fn hide_status(&mut self) {
        self.status = None;
    }

    fn render_controls(&mut self, controls: &FilterControls<'_>) {
        self.note(&format_controls(controls));
    }

    fn render_tag_chips(&mut self, chips: &ChipsView) {
        self.note(&format_chips(chips));
    }

    fn show_lightbox(&mut self, view: &LightboxView<'_>) {
        self.note(&format_lightbox(view));
    }

    fn hide_lightbox(&mut self) {
        self.note(&["Lightbox closed".to_string()]);
    }

    fn set_scroll_lock(&mut self, locked: bool) {
        self.scroll_locked = locked;
    }
}

// ============================================================================
// Browse session
// ============================================================================

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command: {0} (try `help`)")]
    Unknown(String),
    #[error("{0} needs an argument")]
    MissingArgument(&'static str),
    #[error("not a position: {0}")]
    InvalidPosition(String),
    #[error("unknown key: {0} (escape, left, right)")]
    UnknownKey(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseCommand {
    Event(GalleryEvent),
    /// Open the n-th image (1-based) of the current view.
    Open(usize),
    Help,
    Quit,
}

pub const BROWSE_HELP: &[&str] = &[
    "category <name|all>   filter by category",
    "search <text>         search titles and tags",
    "tag <name>            filter by tag",
    "all                   clear the filter",
    "more                  show or hide extra tags",
    "open <n>              open the n-th image",
    "next | prev | close   lightbox navigation",
    "key <escape|left|right>",
    "backdrop              click outside the lightbox image",
    "quit",
];

/// Parse one input line. Blank lines yield `None`.
pub fn parse_browse_command(line: &str) -> Result<Option<BrowseCommand>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    let required = |name: &'static str| {
        if rest.is_empty() {
            Err(CommandError::MissingArgument(name))
        } else {
            Ok(rest.to_string())
        }
    };

    let command = match word.to_lowercase().as_str() {
        "category" => BrowseCommand::Event(GalleryEvent::SelectCategory(required("category")?)),
        "search" => BrowseCommand::Event(GalleryEvent::SearchInput(rest.to_string())),
        "tag" => BrowseCommand::Event(GalleryEvent::SelectTag(Some(required("tag")?))),
        "all" => BrowseCommand::Event(GalleryEvent::SelectCategory("all".to_string())),
        "more" | "less" => BrowseCommand::Event(GalleryEvent::ToggleTags),
        "open" => {
            let arg = required("open")?;
            match arg.parse::<usize>() {
                Ok(n) if n > 0 => BrowseCommand::Open(n),
                _ => return Err(CommandError::InvalidPosition(arg)),
            }
        }
        "next" => BrowseCommand::Event(GalleryEvent::Next),
        "prev" => BrowseCommand::Event(GalleryEvent::Prev),
        "close" => BrowseCommand::Event(GalleryEvent::Close),
        "backdrop" => BrowseCommand::Event(GalleryEvent::Backdrop { on_content: false }),
        "key" => {
            let key = match required("key")?.to_lowercase().as_str() {
                "escape" | "esc" => Key::Escape,
                "left" => Key::ArrowLeft,
                "right" => Key::ArrowRight,
                other => return Err(CommandError::UnknownKey(other.to_string())),
            };
            BrowseCommand::Event(GalleryEvent::Key(key))
        }
        "help" | "?" => BrowseCommand::Help,
        "quit" | "exit" | "q" => BrowseCommand::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

/// Run an interactive browse session until `quit` or end of input.
///
/// Returns the phase the gallery ended in; [`Phase::Failed`] means the
/// manifest never loaded and no commands were read.
pub fn run_browse<R: BufRead, W: Write>(
    source: &impl ManifestSource,
    visible_tags: usize,
    input: R,
    output: W,
) -> io::Result<Phase> {
    let mut controller = GalleryController::new(TextRenderer::new(output), visible_tags);
    if controller.init(source) == Phase::Failed {
        let cause = controller.load_error().unwrap_or_default().to_string();
        let renderer = controller.renderer_mut();
        renderer.note(&[format!("Cause: {cause}")]);
        return finish(controller);
    }

    for line in input.lines() {
        let line = line?;
        match parse_browse_command(&line) {
            Ok(None) => {}
            Ok(Some(BrowseCommand::Quit)) => break,
            Ok(Some(BrowseCommand::Help)) => {
                let help: Vec<String> = BROWSE_HELP.iter().map(|s| s.to_string()).collect();
                controller.renderer_mut().note(&help);
            }
            Ok(Some(BrowseCommand::Open(n))) => match controller.current().get(n - 1) {
                Some(_) => controller.handle(GalleryEvent::OpenAt(n - 1)),
                None => {
                    let count = controller.current().len();
                    controller
                        .renderer_mut()
                        .note(&[format!("? no image at position {n} (view has {count})")]);
                }
            },
            Ok(Some(BrowseCommand::Event(event))) => controller.handle(event),
            Err(e) => controller.renderer_mut().note(&[format!("? {e}")]),
        }
        if let Some(e) = controller.renderer_mut().take_error() {
            return Err(e);
        }
    }
    finish(controller)
}

fn finish<W: Write>(controller: GalleryController<TextRenderer<W>>) -> io::Result<Phase> {
    let phase = controller.phase();
    let mut renderer = controller.into_renderer();
    if let Some(e) = renderer.take_error() {
        return Err(e);
    }
    renderer.into_inner().flush()?;
    Ok(phase)
}

// ============================================================================
// Tests
// ============================================================================
