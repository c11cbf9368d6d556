//! Fragment link resolution for pre-rendered pages.

use std::collections::BTreeSet;

/// Rewrites `#<slug>` links to the static page for that slug.
///
/// The client side loader routes on the URL fragment. Pages written by the
/// site builder have no loader script, so fragment links naming a known page
/// are pointed at the pre-rendered file instead. Unknown fragments stay
/// in-page anchors.
#[derive(Debug, Clone, Default)]
pub struct PageLinks {
    slugs: BTreeSet<String>,
}

impl PageLinks {
    /// Creates resolver for the given page identifiers.
    pub fn new<I, S>(slugs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            slugs: slugs.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns whether `slug` names a known page.
    pub fn contains(&self, slug: &str) -> bool {
        self.slugs.contains(slug)
    }

    /// Resolves a link target.
    ///
    /// Returns `None` when the link is left unchanged.
    pub fn resolve(&self, href: &str) -> Option<String> {
        let slug = href.strip_prefix('#')?;
        if !self.contains(slug) {
            return None;
        }
        Some(static_page_name(slug))
    }

    /// Rewrites `href` attributes of anchor tags in rendered HTML.
    pub fn rewrite(&self, html: &str) -> String {
        let mut result = String::with_capacity(html.len());
        let mut pos = 0;

        while let Some(found) = html[pos..].find("<a ") {
            let tag_start = pos + found;
            let tag_end = html[tag_start..]
                .find('>')
                .map_or(html.len(), |p| tag_start + p);

            let attr = "href=\"";
            let Some(attr_start) = html[tag_start..tag_end]
                .find(attr)
                .map(|p| tag_start + p + attr.len())
            else {
                result.push_str(&html[pos..tag_end]);
                pos = tag_end;
                continue;
            };

            let Some(attr_end) = html[attr_start..tag_end].find('"').map(|p| attr_start + p)
            else {
                result.push_str(&html[pos..tag_end]);
                pos = tag_end;
                continue;
            };

            result.push_str(&html[pos..attr_start]);
            let href = &html[attr_start..attr_end];
            match self.resolve(href) {
                Some(resolved) => result.push_str(&resolved),
                None => result.push_str(href),
            }
            pos = attr_end;
        }

        result.push_str(&html[pos..]);
        result
    }
}

/// File name of the pre-rendered page for a slug.
///
/// Slugs naming an explicit `.html` resource keep their name.
pub fn static_page_name(slug: &str) -> String {
    if slug.ends_with(".html") {
        slug.to_string()
    } else {
        format!("{slug}.html")
    }
}
