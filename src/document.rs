//! Loaded document state: content region and navigation menu.

/// Navigation menu entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavEntry {
    href: String,
    label: String,
    selected: bool,
}

impl NavEntry {
    /// Creates unselected entry linking to `href`.
    pub fn new(href: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            label: label.into(),
            selected: false,
        }
    }

    /// Creates unselected entry for a page identifier.
    ///
    /// The href is the fragment reference `#<slug>` and the label is derived
    /// from the slug.
    pub fn for_slug(slug: &str) -> Self {
        Self::new(format!("#{slug}"), label_from_slug(slug))
    }

    pub fn href(&self) -> &str {
        &self.href
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Page identifier targeted by this entry, if the href has a fragment.
    pub fn slug(&self) -> Option<&str> {
        crate::loader::fragment_of(&self.href)
    }
}

/// Ordered navigation menu with a mutually exclusive selection marker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Navigation {
    entries: Vec<NavEntry>,
}

impl Navigation {
    pub fn new(entries: Vec<NavEntry>) -> Self {
        Self { entries }
    }

    /// Builds menu with one entry per page identifier, in the given order.
    pub fn from_slugs<I, S>(slugs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(
            slugs
                .into_iter()
                .map(|slug| NavEntry::for_slug(slug.as_ref()))
                .collect(),
        )
    }

    pub fn entries(&self) -> &[NavEntry] {
        &self.entries
    }

    /// Clears every marker, then marks the entries whose href is `#<slug>`.
    ///
    /// Returns the number of marked entries.
    pub fn select(&mut self, slug: &str) -> usize {
        let target = format!("#{slug}");
        let mut marked = 0;
        for entry in &mut self.entries {
            entry.selected = entry.href == target;
            if entry.selected {
                marked += 1;
            }
        }
        marked
    }

    /// Currently selected entry.
    pub fn selected(&self) -> Option<&NavEntry> {
        self.entries.iter().find(|e| e.selected)
    }
}

/// Document a page loader renders into.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    content: String,
    navigation: Navigation,
}

impl Document {
    pub fn new(navigation: Navigation) -> Self {
        Self {
            content: String::new(),
            navigation,
        }
    }

    /// Markup of the content region.
    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn navigation(&self) -> &Navigation {
        &self.navigation
    }

    /// Replaces the content region entirely.
    pub fn replace_content(&mut self, html: String) {
        self.content = html;
    }

    pub fn select(&mut self, slug: &str) -> usize {
        self.navigation.select(slug)
    }
}

/// Derives a menu label from a page identifier.
///
/// Drops an explicit `.html`/`.md` extension, turns hyphens and underscores
/// into spaces and capitalises each word.
pub fn label_from_slug(slug: &str) -> String {
    let stem = slug
        .strip_suffix(".html")
        .or_else(|| slug.strip_suffix(".md"))
        .unwrap_or(slug);

    stem.split(['-', '_'])
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
