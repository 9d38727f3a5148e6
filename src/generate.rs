//! Static HTML site generation.
//!
//! Stage 3 of the build pipeline. Loads the published manifest and drives a
//! [`GalleryController`] through every static view, writing one HTML
//! document per state the controller reaches.
//!
//! ## Generated Pages
//!
//! - **Index** (`/index.html`): all images, no active filter
//! - **Category views** (`/category/{slug}/index.html`): one per category
//! - **Tag views** (`/tag/{slug}/index.html`): one per unique tag
//! - **Lightbox pages** (`/{view}/{n}.html`): the view with its n-th image
//!   open, previous/next wrapping around and close returning to the view
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html
//! ├── 1.html, 2.html, ...        # Lightbox pages of the index view
//! ├── category/
//! │   └── nature/
//! │       ├── index.html
//! │       └── 1.html
//! ├── tag/
//! │   └── sunset/
//! │       └── index.html
//! ├── data/images.json           # Written by the process stage
//! └── images/                    # Written by the process stage
//! ```
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Without JavaScript every control is a plain link and the search box is a
//! form submitting to the index. `static/search.js` filters the index grid
//! as the user types; `static/lightbox.js` adds the Escape and arrow key
//! bindings on lightbox pages.

use crate::config::GalleryConfig;
use crate::gallery::{
    Chip, ChipsView, FilterControls, GalleryController, GalleryEvent, Lightbox, LightboxView,
    Renderer, Status,
};
use crate::manifest::{self, ManifestError};
use crate::naming::slugify;
use crate::query::{categories, unique_tags};
use crate::types::ImageRecord;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Manifest error: {0}")]
    Manifest(#[from] ManifestError),
}

const CSS: &str = include_str!("../static/style.css");
const SEARCH_JS: &str = include_str!("../static/search.js");
const LIGHTBOX_JS: &str = include_str!("../static/lightbox.js");

/// Counts reported after a successful generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GenerateSummary {
    pub images: usize,
    pub categories: usize,
    pub tags: usize,
    /// Every HTML file written, lightbox pages included.
    pub pages: usize,
}

/// Stable URL slugs for category and tag views.
///
/// Labels whose slugs collide (or come out empty) get a numeric suffix so
/// every view has its own directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SiteLinks {
    categories: BTreeMap<String, String>,
    tags: BTreeMap<String, String>,
}

impl SiteLinks {
    pub fn new(records: &[ImageRecord]) -> Self {
        Self {
            categories: assign_slugs(&categories(records)),
            tags: assign_slugs(&unique_tags(records)),
        }
    }

    /// View directory for a category, e.g. `category/nature/`.
    pub fn category_dir(&self, label: &str) -> Option<String> {
        self.categories
            .get(label)
            .map(|slug| format!("category/{slug}/"))
    }

    /// View directory for a tag, e.g. `tag/sunset/`.
    pub fn tag_dir(&self, tag: &str) -> Option<String> {
        self.tags.get(tag).map(|slug| format!("tag/{slug}/"))
    }

    fn category_href(&self, label: &str) -> String {
        format!("/{}", self.category_dir(label).unwrap_or_default())
    }

    fn tag_href(&self, tag: &str) -> String {
        format!("/{}", self.tag_dir(tag).unwrap_or_default())
    }
}

fn assign_slugs(labels: &[String]) -> BTreeMap<String, String> {
    let mut used = HashSet::new();
    let mut slugs = BTreeMap::new();
    for label in labels {
        let base = match slugify(label) {
            s if s.is_empty() => "view".to_string(),
            s => s,
        };
        let mut slug = base.clone();
        let mut n = 2;
        while !used.insert(slug.clone()) {
            slug = format!("{base}-{n}");
            n += 1;
        }
        slugs.insert(label.clone(), slug);
    }
    slugs
}

/// Root-absolute URL for an asset path from the manifest.
fn asset_url(path: &str) -> String {
    if path.starts_with('/') || path.contains("://") {
        path.to_string()
    } else {
        format!("/{path}")
    }
}

fn flag(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

/// Renders controller state into static HTML fragments.
///
/// Each `Renderer` call replaces one fragment; [`document`](Self::document)
/// assembles the current fragments into a full page.
pub struct HtmlRenderer {
    site_title: String,
    thumb_size: u32,
    links: SiteLinks,
    view_dir: String,
    controls: Markup,
    chips: Markup,
    grid: Markup,
    status: Option<Status>,
    lightbox: Option<Markup>,
    scroll_locked: bool,
}

impl HtmlRenderer {
    pub fn new(config: &GalleryConfig, links: SiteLinks) -> Self {
        Self {
            site_title: config.title.clone(),
            thumb_size: config.thumbnails.size,
            links,
            view_dir: String::new(),
            controls: html! {},
            chips: html! {},
            grid: html! {},
            status: None,
            lightbox: None,
            scroll_locked: false,
        }
    }

    /// Directory (relative to the site root) of the view being rendered.
    /// Grid links and lightbox navigation point into it.
    pub fn set_view_dir(&mut self, dir: impl Into<String>) {
        self.view_dir = dir.into();
    }

    pub fn view_dir(&self) -> &str {
        &self.view_dir
    }

    pub fn status(&self) -> Option<Status> {
        self.status
    }

    pub fn is_scroll_locked(&self) -> bool {
        self.scroll_locked
    }

    fn view_href(&self) -> String {
        format!("/{}", self.view_dir)
    }

    /// Lightbox page for the zero-based `position` in the current view.
    fn page_href(&self, position: usize) -> String {
        format!("/{}{}.html", self.view_dir, position + 1)
    }

    /// Assemble the full page from the current fragments.
    pub fn document(&self, page_title: &str) -> Markup {
        let content = html! {
            header.site-header {
                h1 { a href="/" { (self.site_title) } }
                (self.controls)
                (self.chips)
            }
            main {
                div #status-message .status .hidden[self.status.is_none()] role="status"
                    data-no-results=(Status::NoResults.message()) {
                    p { @if let Some(status) = self.status { (status.message()) } }
                }
                (self.grid)
            }
            script { (PreEscaped(SEARCH_JS)) }
            @if let Some(lightbox) = &self.lightbox {
                (lightbox)
                script { (PreEscaped(LIGHTBOX_JS)) }
            }
        };
        base_document(page_title, self.scroll_locked.then_some("no-scroll"), content)
    }

    fn chip(&self, chip: &Chip) -> Markup {
        html! {
            a.tag-chip.active[chip.active]
                href=(self.links.tag_href(&chip.label))
                aria-current=[chip.active.then_some("page")] {
                (chip.label)
            }
        }
    }
}

impl Renderer for HtmlRenderer {
    fn render_grid(&mut self, images: &[ImageRecord]) {
        self.grid = html! {
            section #gallery-grid .gallery-grid aria-live="polite" data-view=(self.view_dir) {
                @for (position, image) in images.iter().enumerate() {
                    article.gallery-item data-category=(image.category.to_lowercase()) {
                        a.image-wrapper
                            href=(self.page_href(position))
                            aria-haspopup="dialog"
                            aria-label={ "View Full " (image.title) } {
                            img src=(asset_url(&image.thumb_url))
                                alt=(image.title)
                                loading="lazy"
                                width=(self.thumb_size)
                                height=(self.thumb_size);
                            div.overlay aria-hidden="true" {
                                span.view-text { "View Full" }
                            }
                        }
                        div.image-info {
                            h3 { (image.title) }
                            p.image-category { (image.category) }
                            div.image-tags aria-label="Tags" {
                                @for tag in &image.tags {
                                    a.tag-badge href=(self.links.tag_href(tag)) { (tag) }
                                }
                            }
                        }
                    }
                }
            }
        };
    }

    fn show_status(&mut self, status: Status) {
        self.status = Some(status);
    }

    fn hide_status(&mut self) {
        self.status = None;
    }

    fn render_controls(&mut self, controls: &FilterControls<'_>) {
        let all_active = controls.active_category.is_none();
        self.controls = html! {
            nav.category-nav aria-label="Categories" {
                a.nav-btn.active[all_active] href="/" data-category="all"
                    aria-selected=(flag(all_active)) {
                    "All"
                }
                @for category in controls.categories {
                    @let active = controls.active_category == Some(category.as_str());
                    a.nav-btn.active[active]
                        href=(self.links.category_href(category))
                        data-category=(category.to_lowercase())
                        aria-selected=(flag(active)) {
                        (category)
                    }
                }
            }
            form #search-form .search-box role="search" action="/" method="get" {
                input #image-search type="search" name="q"
                    placeholder="Search by title or tag..."
                    aria-label="Search images"
                    value=(controls.search_text);
            }
        };
    }

    fn render_tag_chips(&mut self, chips: &ChipsView) {
        let hidden = chips.toggle.as_ref().map_or(0, |t| t.hidden_count);
        let (head, overflow) = chips.chips.split_at(chips.chips.len() - hidden);
        self.chips = html! {
            div.tag-filter {
                div.tag-list role="group" aria-label="Filter by tag" {
                    a.tag-chip.active[chips.all_active] href="/"
                        aria-current=[chips.all_active.then_some("page")] {
                        "All"
                    }
                    @for chip in head {
                        (self.chip(chip))
                    }
                }
                @if let Some(toggle) = &chips.toggle {
                    details.tag-overflow open[toggle.expanded] data-hidden-count=(toggle.hidden_count) {
                        summary #tag-toggle-btn aria-expanded=(flag(toggle.expanded)) {
                            (toggle.label)
                        }
                        div.tag-list {
                            @for chip in overflow {
                                (self.chip(chip))
                            }
                        }
                    }
                }
            }
        };
    }

    fn show_lightbox(&mut self, view: &LightboxView<'_>) {
        let here = Lightbox::opened_at(view.position, view.total);
        let prev = here.prev(view.total).index().unwrap_or(view.position);
        let next = here.next(view.total).index().unwrap_or(view.position);
        let image = view.image;
        self.lightbox = Some(html! {
            dialog #lightbox .lightbox open aria-modal="true" aria-label=(image.title) {
                a.lightbox-backdrop href=(self.view_href()) aria-hidden="true" tabindex="-1" {}
                div.lightbox-content {
                    a #lightbox-close .lightbox-close href=(self.view_href()) aria-label="Close" {
                        "×"
                    }
                    a #prev-btn .lightbox-nav.prev href=(self.page_href(prev))
                        rel="prev" aria-label="Previous image" {
                        "‹"
                    }
                    figure {
                        img #lightbox-img src=(asset_url(&image.full_url)) alt=(image.title);
                        figcaption {
                            h2 #lightbox-title { (image.title) }
                            p #lightbox-category { (image.category) }
                            p.lightbox-counter { (view.position + 1) " / " (view.total) }
                        }
                    }
                    a #next-btn .lightbox-nav.next href=(self.page_href(next))
                        rel="next" aria-label="Next image" {
                        "›"
                    }
                }
            }
        });
    }

    fn hide_lightbox(&mut self) {
        self.lightbox = None;
    }

    fn set_scroll_lock(&mut self, locked: bool) {
        self.scroll_locked = locked;
    }
}

fn base_document(title: &str, body_class: Option<&str>, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(CSS)) }
            }
            body class=[body_class] {
                (content)
            }
        }
    }
}

/// One static view: where it lives and the event that selects it.
struct View {
    dir: String,
    title: String,
    event: GalleryEvent,
}

pub fn generate(
    manifest_path: &Path,
    output_dir: &Path,
    config: &GalleryConfig,
) -> Result<GenerateSummary, GenerateError> {
    let records = manifest::load_file(manifest_path)?;
    let links = SiteLinks::new(&records);
    let renderer = HtmlRenderer::new(config, links.clone());
    let mut controller = GalleryController::new(renderer, config.gallery.visible_tags);
    controller.start(records);

    let mut views = vec![View {
        dir: String::new(),
        title: config.title.clone(),
        event: GalleryEvent::SelectCategory("all".to_string()),
    }];
    for category in controller.categories() {
        if let Some(dir) = links.category_dir(category) {
            views.push(View {
                dir,
                title: format!("{category} - {}", config.title),
                event: GalleryEvent::SelectCategory(category.clone()),
            });
        }
    }
    for tag in controller.chips().tags() {
        if let Some(dir) = links.tag_dir(tag) {
            views.push(View {
                dir,
                title: format!("#{tag} - {}", config.title),
                event: GalleryEvent::SelectTag(Some(tag.clone())),
            });
        }
    }

    let mut summary = GenerateSummary {
        images: controller.all().len(),
        categories: controller.categories().len(),
        tags: controller.chips().tags().len(),
        pages: 0,
    };

    for view in views {
        let view_dir = output_dir.join(&view.dir);
        fs::create_dir_all(&view_dir)?;
        controller.renderer_mut().set_view_dir(view.dir.as_str());
        controller.handle(view.event);
        write_page(
            &view_dir.join("index.html"),
            controller.renderer().document(&view.title),
        )?;
        summary.pages += 1;

        for position in 0..controller.current().len() {
            controller.handle(GalleryEvent::OpenAt(position));
            let title = match controller.lightbox_image() {
                Some(image) => format!("{} - {}", image.title, view.title),
                None => view.title.clone(),
            };
            write_page(
                &view_dir.join(format!("{}.html", position + 1)),
                controller.renderer().document(&title),
            )?;
            summary.pages += 1;
        }
        controller.handle(GalleryEvent::Close);
    }

    Ok(summary)
}

fn write_page(path: &Path, page: Markup) -> Result<(), GenerateError> {
    fs::write(path, page.into_string())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gallery::{Filter, TagChips};
    use crate::test_helpers::{many_tagged_records, record, sample_records};
    use tempfile::TempDir;

    fn renderer_for(records: &[ImageRecord]) -> HtmlRenderer {
        HtmlRenderer::new(&GalleryConfig::default(), SiteLinks::new(records))
    }

    fn ready(records: Vec<ImageRecord>) -> GalleryController<HtmlRenderer> {
        let mut controller = GalleryController::new(renderer_for(&records), 15);
        controller.start(records);
        controller
    }

    fn page(controller: &GalleryController<HtmlRenderer>) -> String {
        controller.renderer().document("Test").into_string()
    }

    fn build_site(records: &[ImageRecord]) -> (TempDir, GenerateSummary) {
        let tmp = TempDir::new().unwrap();
        let manifest_path = tmp.path().join("data/images.json");
        manifest::write(&manifest_path, records).unwrap();
        let summary = generate(&manifest_path, tmp.path(), &GalleryConfig::default()).unwrap();
        (tmp, summary)
    }

    fn read(dir: &TempDir, path: &str) -> String {
        fs::read_to_string(dir.path().join(path)).unwrap()
    }

    // =========================================================================
    // SiteLinks
    // =========================================================================

    #[test]
    fn slugs_for_categories_and_tags() {
        let links = SiteLinks::new(&sample_records());
        assert_eq!(links.category_dir("Nature").unwrap(), "category/nature/");
        assert_eq!(links.tag_dir("water").unwrap(), "tag/water/");
        assert_eq!(links.tag_dir("unknown"), None);
    }

    #[test]
    fn colliding_slugs_get_suffix() {
        let slugs = assign_slugs(&["Rock Art".to_string(), "rock-art".to_string()]);
        assert_eq!(slugs["Rock Art"], "rock-art");
        assert_eq!(slugs["rock-art"], "rock-art-2");
    }

    #[test]
    fn empty_slug_falls_back() {
        let slugs = assign_slugs(&["!!!".to_string()]);
        assert_eq!(slugs["!!!"], "view");
    }

    #[test]
    fn asset_urls_are_root_absolute() {
        assert_eq!(asset_url("images/thumbs/a.avif"), "/images/thumbs/a.avif");
        assert_eq!(asset_url("/already.avif"), "/already.avif");
        assert_eq!(asset_url("https://cdn.example/a.jpg"), "https://cdn.example/a.jpg");
    }

    // =========================================================================
    // HtmlRenderer
    // =========================================================================

    #[test]
    fn grid_items_have_view_affordance_and_lazy_thumbs() {
        let controller = ready(sample_records());
        let html = page(&controller);
        assert!(html.contains(r#"aria-haspopup="dialog""#));
        assert!(html.contains(r#"aria-label="View Full Sunset Beach""#));
        assert!(html.contains(r#"loading="lazy""#));
        assert!(html.contains(r#"src="/thumb1.jpg""#));
        assert!(html.contains(r#"href="/tag/water/""#));
        assert_eq!(html.matches("class=\"gallery-item\"").count(), 4);
    }

    #[test]
    fn titles_are_escaped() {
        let controller = ready(vec![record("1", "<script>x</script>", "Nature", &[])]);
        let html = page(&controller);
        assert!(!html.contains("<script>x</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn no_results_status_replaces_grid() {
        let mut controller = ready(sample_records());
        controller.handle(GalleryEvent::SearchInput("zzz".to_string()));
        assert_eq!(controller.renderer().status(), Some(Status::NoResults));
        let html = page(&controller);
        assert!(html.contains("<p>No images found matching your criteria.</p>"));
        assert!(!html.contains("class=\"gallery-item\""));

        controller.handle(GalleryEvent::SearchInput("sun".to_string()));
        assert_eq!(controller.renderer().status(), None);
        assert!(page(&controller).contains(r#"class="status hidden""#));
    }

    #[test]
    fn active_category_is_marked() {
        let mut controller = ready(sample_records());
        controller.handle(GalleryEvent::SelectCategory("nature".to_string()));
        let html = page(&controller);
        assert!(html.contains(r#"class="nav-btn active" href="/category/nature/""#));
        assert!(html.contains(r#"class="nav-btn" href="/" data-category="all""#));
    }

    #[test]
    fn search_text_is_rendered_into_box() {
        let mut controller = ready(sample_records());
        controller.handle(GalleryEvent::SearchInput("beach".to_string()));
        assert!(page(&controller).contains(r#"value="beach""#));
        assert_eq!(controller.filter(), &Filter::Text("beach".to_string()));
    }

    #[test]
    fn overflow_chips_sit_in_details() {
        let controller = ready(many_tagged_records(18));
        let html = page(&controller);
        assert!(html.contains("<details class=\"tag-overflow\" data-hidden-count=\"3\">"));
        assert!(html.contains("Show more (3+)"));
        let details_at = html.find("<details").unwrap();
        assert!(html.find(">tag-00<").unwrap() < details_at);
        assert!(html.find(">tag-17<").unwrap() > details_at);
    }

    #[test]
    fn expanded_chips_render_open_details() {
        let mut controller = ready(many_tagged_records(18));
        controller.handle(GalleryEvent::ToggleTags);
        let html = page(&controller);
        assert!(html.contains("tag-overflow\" open"));
        assert!(html.contains("Show less"));
    }

    #[test]
    fn no_toggle_without_overflow() {
        let controller = ready(sample_records());
        assert!(!page(&controller).contains("<details"));
        assert!(!controller.chips().has_overflow());
    }

    #[test]
    fn lightbox_links_wrap_around() {
        let mut controller = ready(sample_records());
        controller.renderer_mut().set_view_dir("category/x/");
        controller.handle(GalleryEvent::OpenImage("4".to_string()));
        let html = page(&controller);
        assert!(html.contains(r#"href="/category/x/1.html" rel="next""#));
        assert!(html.contains(r#"href="/category/x/3.html" rel="prev""#));
        assert!(html.contains(r#"href="/category/x/" aria-label="Close""#));
        assert!(html.contains("4 / 4"));
        assert!(html.contains(r#"<body class="no-scroll">"#));
    }

    #[test]
    fn closing_releases_scroll_lock() {
        let mut controller = ready(sample_records());
        controller.handle(GalleryEvent::OpenImage("1".to_string()));
        assert!(controller.renderer().is_scroll_locked());
        controller.handle(GalleryEvent::Key(crate::gallery::Key::Escape));
        assert!(!controller.renderer().is_scroll_locked());
        assert!(!page(&controller).contains("id=\"lightbox\""));
    }

    #[test]
    fn chips_view_drives_active_chip() {
        let chips = TagChips::new(vec!["water".to_string()], 15);
        let mut renderer = renderer_for(&sample_records());
        renderer.render_tag_chips(&chips.view(Some("water")));
        let html = renderer.document("t").into_string();
        assert!(html.contains(r#"class="tag-chip active" href="/tag/water/" aria-current="page""#));
    }

    // =========================================================================
    // generate
    // =========================================================================

    #[test]
    fn writes_index_views_and_lightbox_pages() {
        let (site, summary) = build_site(&sample_records());
        assert_eq!(summary.images, 4);
        assert_eq!(summary.categories, 4);
        assert_eq!(summary.tags, 12);

        assert!(site.path().join("index.html").exists());
        assert!(site.path().join("4.html").exists());
        assert!(site.path().join("category/nature/index.html").exists());
        assert!(site.path().join("category/nature/1.html").exists());
        assert!(!site.path().join("category/nature/2.html").exists());
        assert!(site.path().join("tag/water/index.html").exists());

        // index + 4 pages, 4 categories with one image each, 12 tags with one image each
        assert_eq!(summary.pages, 5 + 4 * 2 + 12 * 2);
    }

    #[test]
    fn index_page_has_every_image_and_all_active() {
        let (site, _) = build_site(&sample_records());
        let html = read(&site, "index.html");
        assert_eq!(html.matches("class=\"gallery-item\"").count(), 4);
        assert!(html.contains(r#"class="nav-btn active" href="/""#));
        assert!(!html.contains("id=\"lightbox\""));
    }

    #[test]
    fn tag_view_shows_only_tagged_images() {
        let (site, _) = build_site(&sample_records());
        let html = read(&site, "tag/water/index.html");
        assert_eq!(html.matches("class=\"gallery-item\"").count(), 1);
        assert!(html.contains("Sunset Beach"));
        assert!(html.contains(r#"class="tag-chip active" href="/tag/water/""#));
        // Category selection is reset while a tag is active.
        assert!(html.contains(r#"class="nav-btn active" href="/""#));
    }

    #[test]
    fn lightbox_page_shows_full_image() {
        let (site, _) = build_site(&sample_records());
        let html = read(&site, "2.html");
        assert!(html.contains(r#"src="/full2.jpg""#));
        assert!(html.contains("<title>City Skyline - Image Gallery</title>"));
        assert!(html.contains(r#"href="/1.html""#));
        assert!(html.contains(r#"href="/3.html""#));
    }

    #[test]
    fn every_view_has_a_working_search_box() {
        let (site, _) = build_site(&sample_records());
        for path in ["index.html", "category/nature/index.html", "tag/water/1.html"] {
            let html = read(&site, path);
            assert!(html.contains(r#"action="/" method="get""#), "{path}");
            assert!(html.contains(r#"type="search" name="q""#), "{path}");
            assert!(html.contains("getElementById('image-search')"), "{path}");
        }
        let index = read(&site, "index.html");
        assert!(index.contains(r#"data-view="""#));
        assert!(index.contains(r#"data-no-results="No images found matching your criteria.""#));
        assert!(read(&site, "category/nature/index.html").contains(r#"data-view="category/nature/""#));
    }

    #[test]
    fn categories_differing_in_case_get_their_own_views() {
        let records = vec![
            record("1", "Upper", "Nature", &[]),
            record("2", "Lower", "nature", &[]),
        ];
        let (site, summary) = build_site(&records);
        assert_eq!(summary.categories, 2);
        let upper = read(&site, "category/nature/index.html");
        let lower = read(&site, "category/nature-2/index.html");
        assert!(upper.contains("Upper") && !upper.contains("<h3>Lower</h3>"));
        assert!(lower.contains("Lower") && !lower.contains("<h3>Upper</h3>"));
    }

    #[test]
    fn repeated_ids_get_their_own_lightbox_pages() {
        let records = vec![
            record("dup", "First", "Nature", &[]),
            record("dup", "Second", "Nature", &[]),
        ];
        let (site, _) = build_site(&records);
        assert!(read(&site, "1.html").contains(r#"id="lightbox-title">First<"#));
        assert!(read(&site, "2.html").contains(r#"id="lightbox-title">Second<"#));
    }

    #[test]
    fn invalid_manifest_fails_closed() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("images.json");
        fs::write(&path, r#"[{"id": "1", "title": "t"}]"#).unwrap();
        let result = generate(&path, tmp.path(), &GalleryConfig::default());
        assert!(matches!(result, Err(GenerateError::Manifest(_))));
        assert!(!tmp.path().join("index.html").exists());
    }

    #[test]
    fn empty_manifest_renders_no_results() {
        let (site, summary) = build_site(&[]);
        assert_eq!(summary.pages, 1);
        assert!(read(&site, "index.html").contains("<p>No images found matching your criteria.</p>"));
    }
}
