//! Page text retrieval.

use anyhow::{Context, Result, bail};
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Retrieves raw page text for a resolved resource path.
///
/// Paths are site relative with forward slashes, for example
/// `pages/getting-started.md`.
pub trait PageSource {
    /// Returns the UTF-8 body of the resource.
    ///
    /// # Errors
    ///
    /// Returns error if the resource does not exist or cannot be read.
    fn fetch(&self, path: &str) -> Result<String>;
}

impl<S: PageSource + ?Sized> PageSource for &S {
    fn fetch(&self, path: &str) -> Result<String> {
        (**self).fetch(path)
    }
}

/// Serves resources from a documentation site directory.
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    /// Creates source rooted at the site directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Site root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Maps a resource path to a file below the site root.
    ///
    /// # Errors
    ///
    /// Returns error if the path escapes the site root.
    pub fn locate(&self, path: &str) -> Result<PathBuf> {
        let normalized = normalize(Path::new(path))?;
        Ok(self.root.join(normalized))
    }
}

impl PageSource for DirSource {
    fn fetch(&self, path: &str) -> Result<String> {
        let file = self.locate(path)?;
        let bytes =
            fs::read(&file).with_context(|| format!("Failed to read {}", file.display()))?;
        let text = String::from_utf8(bytes)
            .with_context(|| format!("Page is not valid UTF-8: {}", file.display()))?;
        tracing::debug!(path, bytes = text.len(), "fetched page");
        Ok(text)
    }
}

/// Resolves `.` and `..` components, rejecting traversal above the root.
fn normalize(path: &Path) -> Result<PathBuf> {
    let mut components = Vec::new();

    for component in path.components() {
        match component {
            Component::Normal(c) => components.push(c),
            Component::ParentDir => {
                if components.pop().is_none() {
                    bail!("Path escapes site root: {}", path.display());
                }
            }
            Component::CurDir => {}
            Component::RootDir | Component::Prefix(_) => {
                bail!("Absolute path not allowed: {}", path.display());
            }
        }
    }

    Ok(components.iter().collect())
}
