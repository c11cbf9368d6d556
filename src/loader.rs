//! Page loading: identifier resolution, fetch, conversion and selection.
//!
//! A load runs in two halves. [`PageLoader::begin`] resolves the resource
//! path and stamps the request with a generation. [`PageLoader::finish`]
//! takes the fetched text (or the fetch error), replaces the content region
//! and moves the navigation marker. Completions of superseded requests are
//! dropped, so overlapping navigations cannot leave an older page on screen.

use anyhow::Result;

use crate::document::Document;
use crate::markdown::MarkdownRenderer;
use crate::source::PageSource;

/// Page loaded at startup when the location has no fragment.
pub const DEFAULT_PAGE: &str = "getting-started";

/// Directory holding page resources, relative to the site root.
pub const PAGES_DIR: &str = "pages";

/// Extension appended to identifiers without an explicit one.
pub const DEFAULT_EXTENSION: &str = ".md";

/// Content region markup shown when a page cannot be retrieved.
pub const LOAD_ERROR_HTML: &str = "<div class='error'>Failed to load this page.</div>";

/// Resolves a page identifier to its resource path.
///
/// Identifiers already naming an `.html` resource are used unchanged,
/// everything else gets the markdown extension.
pub fn resolve_path(slug: &str) -> String {
    if slug.ends_with(".html") {
        format!("{PAGES_DIR}/{slug}")
    } else {
        format!("{PAGES_DIR}/{slug}{DEFAULT_EXTENSION}")
    }
}

/// Returns the fragment of a link target or location.
///
/// `None` when there is no `#` or nothing follows it.
pub fn fragment_of(href: &str) -> Option<&str> {
    let (_, fragment) = href.split_once('#')?;
    let fragment = fragment.split('#').next().unwrap_or(fragment);
    (!fragment.is_empty()).then_some(fragment)
}

/// Page identifier to load at startup for the given location.
pub fn initial_slug(location: Option<&str>) -> &str {
    location.and_then(fragment_of).unwrap_or(DEFAULT_PAGE)
}

/// Load request waiting for its fetch to complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingLoad {
    generation: u64,
    slug: String,
    path: String,
}

impl PendingLoad {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// Resource path to fetch.
    pub fn path(&self) -> &str {
        &self.path
    }
}

/// Result of completing a load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Page text converted and shown.
    Rendered,
    /// Fetch or conversion failed; the fallback message is shown.
    Failed,
    /// A newer load was issued meanwhile; the document is untouched.
    Stale,
}

/// Loads pages into a document.
pub struct PageLoader<'a, S> {
    source: S,
    renderer: MarkdownRenderer<'a>,
    document: Document,
    generation: u64,
}

impl<'a, S: PageSource> PageLoader<'a, S> {
    /// Creates loader rendering into `document` with the default extensions.
    pub fn new(source: S, document: Document) -> Self {
        Self::with_renderer(source, MarkdownRenderer::new(), document)
    }

    pub fn with_renderer(source: S, renderer: MarkdownRenderer<'a>, document: Document) -> Self {
        Self {
            source,
            renderer,
            document,
            generation: 0,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Consumes the loader, returning the document.
    pub fn into_document(self) -> Document {
        self.document
    }

    /// Starts a load request for `slug`.
    ///
    /// Every call supersedes the requests issued before it.
    pub fn begin(&mut self, slug: &str) -> PendingLoad {
        self.generation += 1;
        let pending = PendingLoad {
            generation: self.generation,
            slug: slug.to_string(),
            path: resolve_path(slug),
        };
        tracing::debug!(
            slug,
            path = %pending.path,
            generation = pending.generation,
            "begin page load"
        );
        pending
    }

    /// Completes a load request with the fetched page text.
    ///
    /// On success the converted HTML replaces the content region; on failure
    /// the content region shows [`LOAD_ERROR_HTML`]. Either way the
    /// navigation marker moves to the requested page.
    pub fn finish(&mut self, pending: PendingLoad, fetched: Result<String>) -> LoadOutcome {
        if pending.generation != self.generation {
            tracing::debug!(
                slug = %pending.slug,
                generation = pending.generation,
                current = self.generation,
                "dropping stale page load"
            );
            return LoadOutcome::Stale;
        }

        let outcome = match fetched.and_then(|text| self.renderer.render(&text)) {
            Ok(html) => {
                self.document.replace_content(html);
                LoadOutcome::Rendered
            }
            Err(e) => {
                tracing::warn!(path = %pending.path, "failed to load page: {e:#}");
                self.document.replace_content(LOAD_ERROR_HTML.to_string());
                LoadOutcome::Failed
            }
        };

        self.document.select(&pending.slug);
        outcome
    }

    /// Loads `slug` from the page source.
    pub fn load(&mut self, slug: &str) -> LoadOutcome {
        let pending = self.begin(slug);
        let fetched = self.source.fetch(pending.path());
        self.finish(pending, fetched)
    }

    /// Startup load: the location fragment, or the default page.
    pub fn start(&mut self, location: Option<&str>) -> LoadOutcome {
        let slug = initial_slug(location).to_string();
        self.load(&slug)
    }

    /// Navigation entry click.
    ///
    /// Loads the fragment of the entry's href; `None` when the href has no
    /// fragment and nothing was loaded.
    pub fn click(&mut self, href: &str) -> Option<LoadOutcome> {
        let slug = fragment_of(href)?.to_string();
        Some(self.load(&slug))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Navigation;
    use anyhow::anyhow;
    use std::collections::HashMap;

    struct MemorySource(HashMap<String, String>);

    impl MemorySource {
        fn new(pages: &[(&str, &str)]) -> Self {
            Self(
                pages
                    .iter()
                    .map(|(p, t)| (p.to_string(), t.to_string()))
                    .collect(),
            )
        }
    }

    impl PageSource for MemorySource {
        fn fetch(&self, path: &str) -> Result<String> {
            self.0
                .get(path)
                .cloned()
                .ok_or_else(|| anyhow!("404 Not Found: {path}"))
        }
    }

    fn loader(pages: &[(&str, &str)]) -> PageLoader<'static, MemorySource> {
        let nav = Navigation::from_slugs(["getting-started", "syntax", "about.html"]);
        PageLoader::new(MemorySource::new(pages), Document::new(nav))
    }

    fn selected_hrefs<S: PageSource>(loader: &PageLoader<'_, S>) -> Vec<String> {
        loader
            .document()
            .navigation()
            .entries()
            .iter()
            .filter(|e| e.is_selected())
            .map(|e| e.href().to_string())
            .collect()
    }

    #[test]
    fn test_resolve_path_appends_markdown_extension() {
        assert_eq!(resolve_path("getting-started"), "pages/getting-started.md");
        assert_eq!(resolve_path("syntax"), "pages/syntax.md");
        assert_eq!(resolve_path("notes.txt"), "pages/notes.txt.md");
    }

    #[test]
    fn test_resolve_path_keeps_html() {
        assert_eq!(resolve_path("about.html"), "pages/about.html");
    }

    #[test]
    fn test_fragment_of() {
        assert_eq!(fragment_of("index.html#syntax"), Some("syntax"));
        assert_eq!(fragment_of("#syntax"), Some("syntax"));
        assert_eq!(fragment_of("http://x.dev/docs/#a#b"), Some("a"));
        assert_eq!(fragment_of("index.html#"), None);
        assert_eq!(fragment_of("index.html"), None);
    }

    #[test]
    fn test_initial_slug() {
        assert_eq!(initial_slug(None), DEFAULT_PAGE);
        assert_eq!(initial_slug(Some("http://docs/index.html")), DEFAULT_PAGE);
        assert_eq!(initial_slug(Some("http://docs/index.html#syntax")), "syntax");
    }

    #[test]
    fn test_load_success_renders_and_selects() {
        // Arrange
        let mut loader = loader(&[("pages/syntax.md", "# Syntax")]);

        // Act
        let outcome = loader.load("syntax");

        // Assert
        assert_eq!(outcome, LoadOutcome::Rendered);
        assert!(loader.document().content().contains("<h1>"));
        assert_eq!(selected_hrefs(&loader), vec!["#syntax"]);
    }

    #[test]
    fn test_load_failure_shows_fallback_and_selects() {
        // Arrange
        let mut loader = loader(&[]);

        // Act
        let outcome = loader.load("syntax");

        // Assert
        assert_eq!(outcome, LoadOutcome::Failed);
        assert_eq!(loader.document().content(), LOAD_ERROR_HTML);
        assert_eq!(selected_hrefs(&loader), vec!["#syntax"]);
    }

    #[test]
    fn test_load_replaces_previous_content() {
        // Arrange
        let mut loader = loader(&[
            ("pages/getting-started.md", "first page"),
            ("pages/syntax.md", "second page"),
        ]);
        loader.load("getting-started");

        // Act
        loader.load("syntax");

        // Assert
        let content = loader.document().content();
        assert!(content.contains("second page"));
        assert!(!content.contains("first page"));
        assert_eq!(selected_hrefs(&loader), vec!["#syntax"]);
    }

    #[test]
    fn test_load_html_page_fetches_unmodified_path() {
        // Arrange
        let mut loader = loader(&[("pages/about.html", "<p>About</p>")]);

        // Act
        let outcome = loader.load("about.html");

        // Assert
        assert_eq!(outcome, LoadOutcome::Rendered);
        assert!(loader.document().content().contains("<p>About</p>"));
        assert_eq!(selected_hrefs(&loader), vec!["#about.html"]);
    }

    #[test]
    fn test_start_uses_fragment_or_default() {
        // Arrange
        let mut from_default = loader(&[("pages/getting-started.md", "welcome")]);
        let mut from_fragment = loader(&[("pages/syntax.md", "syntax")]);

        // Act
        from_default.start(None);
        from_fragment.start(Some("index.html#syntax"));

        // Assert
        assert_eq!(selected_hrefs(&from_default), vec!["#getting-started"]);
        assert_eq!(selected_hrefs(&from_fragment), vec!["#syntax"]);
    }

    #[test]
    fn test_click_loads_fragment() {
        // Arrange
        let mut loader = loader(&[("pages/syntax.md", "syntax")]);

        // Act
        let outcome = loader.click("http://docs/index.html#syntax");

        // Assert
        assert_eq!(outcome, Some(LoadOutcome::Rendered));
        assert_eq!(selected_hrefs(&loader), vec!["#syntax"]);
    }

    #[test]
    fn test_click_without_fragment_is_ignored() {
        // Arrange
        let mut loader = loader(&[("pages/syntax.md", "syntax")]);

        // Act
        let outcome = loader.click("https://github.com");

        // Assert
        assert_eq!(outcome, None);
        assert_eq!(loader.document().content(), "");
    }

    #[test]
    fn test_stale_completion_is_dropped() {
        // Arrange
        let mut loader = loader(&[]);
        let first = loader.begin("getting-started");
        let second = loader.begin("syntax");

        // Act
        let newer = loader.finish(second, Ok("newer".to_string()));
        let older = loader.finish(first, Ok("older".to_string()));

        // Assert
        assert_eq!(newer, LoadOutcome::Rendered);
        assert_eq!(older, LoadOutcome::Stale);
        assert!(loader.document().content().contains("newer"));
        assert_eq!(selected_hrefs(&loader), vec!["#syntax"]);
    }

    #[test]
    fn test_stale_failure_does_not_clobber() {
        // Arrange
        let mut loader = loader(&[]);
        let first = loader.begin("getting-started");
        let second = loader.begin("syntax");
        loader.finish(second, Ok("shown".to_string()));

        // Act
        let outcome = loader.finish(first, Err(anyhow!("timeout")));

        // Assert
        assert_eq!(outcome, LoadOutcome::Stale);
        assert!(loader.document().content().contains("shown"));
    }

    #[test]
    fn test_generations_increase() {
        // Arrange
        let mut loader = loader(&[]);

        // Act
        let a = loader.begin("a");
        let b = loader.begin("b");

        // Assert
        assert!(b.generation() > a.generation());
        assert_eq!(b.path(), "pages/b.md");
        assert_eq!(b.slug(), "b");
    }

    #[test]
    fn test_load_unknown_page_leaves_no_selection() {
        // Arrange
        let mut loader = loader(&[("pages/syntax.md", "x")]);
        loader.load("syntax");

        // Act
        loader.load("unlisted");

        // Assert
        assert!(selected_hrefs(&loader).is_empty());
        assert_eq!(loader.document().content(), LOAD_ERROR_HTML);
    }

    #[test]
    fn test_load_applies_extensions() {
        // Arrange
        let mut loader = loader(&[("pages/syntax.md", "F[demo](http://y.com)")]);

        // Act
        loader.load("syntax");

        // Assert
        assert!(
            loader
                .document()
                .content()
                .contains(r#"<iframe class="demo" src="http://y.com"></iframe>"#)
        );
    }
}
