//! Shared test utilities for integration tests.
//!
//! Provides helpers for creating temporary documentation sites with a
//! `pages/` directory.

#![allow(dead_code)]

use anyhow::Result;
use std::path::Path;
use tempfile::TempDir;

/// Creates temporary site directory with the given pages.
///
/// # Arguments
///
/// * `pages`: File name and content pairs written below `pages/`
///
/// # Errors
///
/// Returns error if directory creation or file write fails
pub fn create_test_site(pages: &[(&str, &str)]) -> Result<TempDir> {
    let dir = TempDir::new()?;
    std::fs::create_dir_all(dir.path().join("pages"))?;
    for (name, content) in pages {
        write_file(dir.path(), &format!("pages/{}", name), content)?;
    }
    Ok(dir)
}

/// Writes file below `root`, creating parent directories as needed.
///
/// # Errors
///
/// Returns error if directory creation or file write fails
pub fn write_file(root: &Path, path: &str, content: &str) -> Result<()> {
    let file_path = root.join(path);
    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(file_path, content)?;
    Ok(())
}

/// Documentation pages resembling the Cube docs.
pub const SAMPLE_PAGES: &[(&str, &str)] = &[
    (
        "getting-started.md",
        "# Getting Started\n\nRead the [syntax](#syntax) page next.\n\n\
         [Source](https://github.com/cube/cube 'Cube source'){:target=\"_blank\"}\n",
    ),
    (
        "syntax.md",
        "# Syntax\n\n```cube\nprint(ls());\n```\n\nF[demo](demo.html)\n\n\\F(not-a-frame.html)\n",
    ),
    ("changelog.html", "<h1>Changelog</h1>\n"),
];
