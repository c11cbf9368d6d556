//! Source level Markdown extensions.
//!
//! Extensions rewrite custom notation in the raw Markdown text into inline
//! HTML before comrak parses it. The renderer runs with raw HTML enabled, so
//! the emitted tags pass through conversion untouched.

use regex::{Captures, Regex};
use std::borrow::Cow;
use std::sync::OnceLock;

/// Text substitution applied to Markdown source before conversion.
pub trait Extension: Send + Sync {
    /// Short identifier used in diagnostics.
    fn name(&self) -> &'static str;

    /// Rewrites every occurrence of the extension syntax in `text`.
    fn apply<'t>(&self, text: &'t str) -> Cow<'t, str>;
}

// [text](url 'title'){:target="value"}
const TARGET_LINK_REGEX_STR: &str = concat!(
    r#"\[((?:\[[^\]]*\]|[^\[\]])*)\]"#,
    r#"\([ \t]*<?([^\s()<>]*(?:\([^\s()]*\)[^\s()<>]*)?)>?[ \t]*"#,
    // a quote inside the title is allowed unless it could close the link
    r#"(?:(?:'((?:[^']|'[^')\s]|'[ \t]+[^)\s'])*)'"#,
    r#"|"((?:[^"]|"[^")\s]|"[ \t]+[^)\s"])*)")[ \t]*)?\)"#,
    r#"\{:target=(?:"([^"]*)"|'([^']*)')\}"#,
);

static TARGET_LINK_REGEX: OnceLock<Regex> = OnceLock::new();

fn target_link_regex() -> &'static Regex {
    TARGET_LINK_REGEX.get_or_init(|| {
        Regex::new(TARGET_LINK_REGEX_STR)
            .unwrap_or_else(|e| panic!("invalid target link regex: {e}"))
    })
}

// F[class](url), F(url) and the escaped \F(url)
const FRAME_REGEX_STR: &str = r"(\\)?\bF(?:\[([^\]]*)\])?\(([^)]*)\)\B";

static FRAME_REGEX: OnceLock<Regex> = OnceLock::new();

fn frame_regex() -> &'static Regex {
    FRAME_REGEX.get_or_init(|| {
        Regex::new(FRAME_REGEX_STR).unwrap_or_else(|e| panic!("invalid frame regex: {e}"))
    })
}

/// Link with an explicit browsing context target.
///
/// `[text](url 'title'){:target="_blank"}` becomes an anchor element carrying
/// the `target` attribute, which plain Markdown links cannot express.
#[derive(Debug, Default, Clone, Copy)]
pub struct TargetLink;

impl TargetLink {
    fn replace(caps: &Captures<'_>) -> String {
        let text = caps.get(1).map_or("", |m| m.as_str());
        let url = caps.get(2).map_or("", |m| m.as_str());
        let title = caps.get(3).or_else(|| caps.get(4)).map_or("", |m| m.as_str());
        let target = caps.get(5).or_else(|| caps.get(6)).map_or("", |m| m.as_str());

        let mut anchor = format!("<a href=\"{url}\"");
        if !title.is_empty() {
            anchor.push_str(" title=\"");
            anchor.push_str(&escape_title(title));
            anchor.push('"');
        }
        if !target.is_empty() {
            anchor.push_str(" target=\"");
            anchor.push_str(target);
            anchor.push('"');
        }
        anchor.push('>');
        anchor.push_str(text);
        anchor.push_str("</a>");
        anchor
    }
}

impl Extension for TargetLink {
    fn name(&self) -> &'static str {
        "targetlink"
    }

    fn apply<'t>(&self, text: &'t str) -> Cow<'t, str> {
        target_link_regex().replace_all(text, |caps: &Captures<'_>| Self::replace(caps))
    }
}

/// Escapes a link title for use inside a double quoted attribute.
///
/// Emphasis markers are entity encoded so they never pair up with markers
/// elsewhere in the paragraph.
fn escape_title(title: &str) -> String {
    title
        .replace('"', "&quot;")
        .replace('*', "&#42;")
        .replace('_', "&#95;")
}

/// Embedded frame notation.
///
/// `F[class](url)` and `F(url)` become `<iframe>` elements. A leading
/// backslash keeps the notation as literal text.
#[derive(Debug, Default, Clone, Copy)]
pub struct Frame;

impl Frame {
    fn replace(caps: &Captures<'_>) -> String {
        let whole = caps.get(0).map_or("", |m| m.as_str());
        if caps.get(1).is_some() {
            return whole[1..].to_string();
        }

        let src = caps.get(3).map_or("", |m| m.as_str());
        match caps.get(2).map(|m| m.as_str()) {
            Some(class) if !class.is_empty() => {
                format!("<iframe class=\"{class}\" src=\"{src}\"></iframe>")
            }
            _ => format!("<iframe src=\"{src}\"></iframe>"),
        }
    }
}

impl Extension for Frame {
    fn name(&self) -> &'static str {
        "frame"
    }

    fn apply<'t>(&self, text: &'t str) -> Cow<'t, str> {
        frame_regex().replace_all(text, |caps: &Captures<'_>| Self::replace(caps))
    }
}

/// Returns the extension set used by the documentation site.
pub fn default_extensions() -> Vec<Box<dyn Extension>> {
    vec![Box::new(TargetLink), Box::new(Frame)]
}

/// Applies extensions in order, borrowing the input until one rewrites it.
pub fn apply_all<'t>(extensions: &[Box<dyn Extension>], text: &'t str) -> Cow<'t, str> {
    let mut current = Cow::Borrowed(text);
    for extension in extensions {
        let rewritten = match extension.apply(&current) {
            Cow::Borrowed(_) => continue,
            Cow::Owned(rewritten) => rewritten,
        };
        tracing::trace!(extension = extension.name(), "rewrote markdown source");
        current = Cow::Owned(rewritten);
    }
    current
}
