//! Markdown to HTML conversion for documentation pages.

use anyhow::{Context, Result};
use comrak::Options;
use regex::Regex;
use std::sync::OnceLock;
use syntect::html::{ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

use super::PageLinks;
use super::extensions::{self, Extension};

/// Renders documentation markdown to HTML.
///
/// Source extensions (target links, frames) run on the raw text first, then
/// comrak converts it with GitHub Flavored Markdown extensions. Fenced code
/// blocks are highlighted with syntect. Optionally rewrites fragment links
/// to pre-rendered pages when configured with [`PageLinks`].
pub struct MarkdownRenderer<'a> {
    options: Options<'a>,
    syntax_set: SyntaxSet,
    extensions: Vec<Box<dyn Extension>>,
    page_links: Option<PageLinks>,
}

impl<'a> MarkdownRenderer<'a> {
    /// Creates renderer with GitHub Flavored Markdown options.
    ///
    /// Configures all GFM extensions and security settings:
    /// - Tables, strikethrough, autolinks, task lists, footnotes
    /// - Smart punctuation for quotes and dashes
    /// - Raw HTML passthrough, required by the source extensions
    /// - Syntax highlighting with syntect using CSS classes
    /// - Target link and frame source extensions
    pub fn new() -> Self {
        Self::with_extensions(extensions::default_extensions())
    }

    /// Creates renderer running the given source extensions.
    pub fn with_extensions(extensions: Vec<Box<dyn Extension>>) -> Self {
        let mut options = Options::default();

        // Extension options (GFM features)
        options.extension.strikethrough = true;
        options.extension.table = true;
        options.extension.autolink = true;
        options.extension.tasklist = true;
        options.extension.footnotes = true;
        options.extension.description_lists = true;

        // Parse options (smart punctuation)
        options.parse.smart = true;

        // Render options (documentation content is trusted)
        options.render.unsafe_ = true;

        // Load syntax definitions for highlighting
        let syntax_set = SyntaxSet::load_defaults_newlines();

        Self {
            options,
            syntax_set,
            extensions,
            page_links: None,
        }
    }

    /// Creates renderer that points fragment links at pre-rendered pages.
    ///
    /// # Arguments
    ///
    /// * `page_links`: Known pages of the site being built
    pub fn with_page_links(page_links: PageLinks) -> Self {
        let mut renderer = Self::new();
        renderer.page_links = Some(page_links);
        renderer
    }

    /// Names of the configured source extensions, in application order.
    pub fn extension_names(&self) -> Vec<&'static str> {
        self.extensions.iter().map(|e| e.name()).collect()
    }

    /// Renders markdown content to HTML string.
    ///
    /// # Arguments
    ///
    /// * `content`: Markdown content to render
    ///
    /// # Returns
    ///
    /// Rendered HTML as string with syntax highlighted code blocks
    ///
    /// # Errors
    ///
    /// Returns error if syntax highlighting fails
    pub fn render(&self, content: &str) -> Result<String> {
        let source = extensions::apply_all(&self.extensions, content);
        let mut html = comrak::markdown_to_html(&source, &self.options);

        if let Some(links) = &self.page_links {
            html = links.rewrite(&html);
        }

        // Post-process HTML to add syntax highlighting with CSS classes
        self.highlight_code_blocks(&html)
    }

    /// Replaces the text of `<code class="language-X">` blocks with
    /// syntect output using `hljs-` prefixed classes.
    fn highlight_code_blocks(&self, html: &str) -> Result<String> {
        let mut result = String::with_capacity(html.len());
        let mut last_end = 0;

        for caps in code_block_regex().captures_iter(html) {
            let (Some(block), Some(language), Some(code)) = (caps.get(0), caps.get(1), caps.get(2))
            else {
                continue;
            };

            let highlighted = self
                .highlight_code(&decode_entities(code.as_str()), language.as_str())
                .with_context(|| format!("Failed to highlight {} code block", language.as_str()))?;

            result.push_str(&html[last_end..block.start()]);
            result.push_str("<code class=\"language-");
            result.push_str(language.as_str());
            result.push_str("\">");
            result.push_str(&highlighted);
            result.push_str("</code>");
            last_end = block.end();
        }

        result.push_str(&html[last_end..]);
        Ok(result)
    }

    fn highlight_code(&self, code: &str, language: &str) -> Result<String> {
        if code.is_empty() {
            return Ok(String::new());
        }

        // Unknown fences stay plain text.
        let token = fence_syntax(language);
        let Some(syntax) = self
            .syntax_set
            .find_syntax_by_token(token)
            .or_else(|| self.syntax_set.find_syntax_by_extension(token))
        else {
            return Ok(escape_entities(code));
        };

        let mut generator = ClassedHTMLGenerator::new_with_class_style(
            syntax,
            &self.syntax_set,
            ClassStyle::SpacedPrefixed { prefix: "hljs-" },
        );
        for line in LinesWithEndings::from(code) {
            generator
                .parse_html_for_line_which_includes_newline(line)
                .context("Failed to parse line for syntax highlighting")?;
        }

        Ok(generator.finalize())
    }
}

/// Fence languages without a bundled syntect grammar, mapped to the closest
/// one. Cube scripts use C style calls and braces.
const FENCE_ALIASES: &[(&str, &str)] = &[("cube", "js"), ("cb", "js")];

fn fence_syntax(language: &str) -> &str {
    FENCE_ALIASES
        .iter()
        .find(|(alias, _)| *alias == language)
        .map_or(language, |(_, token)| token)
}

static CODE_BLOCK_REGEX: OnceLock<Regex> = OnceLock::new();

fn code_block_regex() -> &'static Regex {
    CODE_BLOCK_REGEX.get_or_init(|| {
        Regex::new(r#"(?s)<code class="language-([^"]+)">(.*?)</code>"#)
            .unwrap_or_else(|e| panic!("invalid code block regex: {e}"))
    })
}

// comrak entity encodes code block text; syntect wants the raw source.
fn decode_entities(html: &str) -> String {
    html.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

fn escape_entities(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

impl<'a> Default for MarkdownRenderer<'a> {
    fn default() -> Self {
        Self::new()
    }
}
