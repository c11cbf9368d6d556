//! Static site generation from a documentation pages directory.

use anyhow::{Context, Result};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::assets::{STYLESHEET, write_css_assets};
use crate::components::layout::page_wrapper;
use crate::document::{Document, Navigation, label_from_slug};
use crate::loader::{LoadOutcome, PAGES_DIR, PageLoader};
use crate::markdown::{MarkdownRenderer, PageLinks, static_page_name};
use crate::source::DirSource;

const INDEX_PAGE: &str = "index.html";

/// Summary of a site build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Pages written, including the index page.
    pub written: Vec<PathBuf>,
    /// Identifiers of pages that rendered the load error message.
    pub failed: Vec<String>,
    /// Identifiers left out because another page owns their output name.
    pub skipped: Vec<String>,
}

/// Lists page identifiers found in the `pages/` directory of a site.
///
/// Markdown files contribute their stem, HTML files their full name. The
/// default page comes first when present, the rest sort by name. Pages whose
/// output file would collide with an earlier page, or with the index written
/// for the default page, are left out.
///
/// # Errors
///
/// Returns error if the pages directory cannot be read.
pub fn discover_pages(root: &Path, default_page: &str) -> Result<Vec<String>> {
    collect_pages(root, default_page).map(|(kept, _)| kept)
}

/// Discovered pages split into kept and skipped identifiers.
fn collect_pages(root: &Path, default_page: &str) -> Result<(Vec<String>, Vec<String>)> {
    let dir = root.join(PAGES_DIR);
    let entries = fs::read_dir(&dir)
        .with_context(|| format!("Failed to read pages directory {}", dir.display()))?;

    let mut slugs = Vec::new();
    for entry in entries {
        let entry = entry.context("Failed to read pages directory entry")?;
        if !entry.file_type()?.is_file() {
            continue;
        }

        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            tracing::warn!(path = %entry.path().display(), "skipping non UTF-8 page name");
            continue;
        };

        if let Some(stem) = name.strip_suffix(".md") {
            slugs.push(stem.to_string());
        } else if name.ends_with(".html") {
            slugs.push(name.to_string());
        }
    }

    slugs.sort_by(|a, b| (a != default_page, a).cmp(&(b != default_page, b)));

    // `foo.md` and `foo.html` both render to foo.html; index.html is reserved
    // for the default page.
    let mut taken = BTreeSet::from([INDEX_PAGE.to_string()]);
    let mut kept = Vec::with_capacity(slugs.len());
    let mut skipped = Vec::new();
    for slug in slugs {
        let name = static_page_name(&slug);
        let owns_index = slug == default_page && name == INDEX_PAGE;
        if owns_index || taken.insert(name.clone()) {
            kept.push(slug);
        } else {
            tracing::warn!(page = %slug, output = %name, "skipping page with colliding output name");
            skipped.push(slug);
        }
    }

    Ok((kept, skipped))
}

/// Builds the static documentation site.
///
/// Every discovered page runs through the page loader and is written to
/// `<output>/<slug>.html` with the menu selection applied. The default page
/// is also written as `index.html`. Pages that fail to load are written with
/// the load error message and listed in the report.
///
/// # Arguments
///
/// * `root`: Site directory containing `pages/`
/// * `output`: Output directory
/// * `default_page`: Identifier written as `index.html`
///
/// # Errors
///
/// Returns error if the pages directory cannot be read or output cannot be
/// written.
pub fn build_site(root: &Path, output: &Path, default_page: &str) -> Result<BuildReport> {
    let (slugs, skipped) = collect_pages(root, default_page)?;
    tracing::info!(pages = slugs.len(), root = %root.display(), "building site");

    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory {}", output.display()))?;
    write_css_assets(&output.join("assets"))?;

    let links = PageLinks::new(slugs.iter().cloned());
    let renderer = MarkdownRenderer::with_page_links(links.clone());
    let document = Document::new(Navigation::from_slugs(&slugs));
    let mut loader = PageLoader::with_renderer(DirSource::new(root), renderer, document);

    let href_for = |href: &str| links.resolve(href).unwrap_or_else(|| href.to_string());

    let mut report = BuildReport {
        skipped,
        ..BuildReport::default()
    };
    let mut index_written = false;

    for slug in &slugs {
        if loader.load(slug) == LoadOutcome::Failed {
            report.failed.push(slug.clone());
        }

        let title = label_from_slug(slug);
        let html = page_wrapper(&title, &[STYLESHEET], loader.document(), href_for).into_string();

        let page_path = output.join(static_page_name(slug));
        write_page(&page_path, &html)?;
        report.written.push(page_path);

        if slug == default_page {
            if static_page_name(slug) != INDEX_PAGE {
                let index_path = output.join(INDEX_PAGE);
                write_page(&index_path, &html)?;
                report.written.push(index_path);
            }
            index_written = true;
        }
    }

    if !index_written {
        // Default page missing from pages/: index shows the load result.
        if loader.load(default_page) == LoadOutcome::Failed {
            report.failed.push(default_page.to_string());
        }
        let title = label_from_slug(default_page);
        let html = page_wrapper(&title, &[STYLESHEET], loader.document(), href_for).into_string();
        let index_path = output.join(INDEX_PAGE);
        write_page(&index_path, &html)?;
        report.written.push(index_path);
    }

    Ok(report)
}

fn write_page(path: &Path, html: &str) -> Result<()> {
    fs::write(path, html).with_context(|| format!("Failed to write page {}", path.display()))
}
