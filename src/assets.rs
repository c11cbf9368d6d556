//! CSS asset bundling

use anyhow::{Context, Result};
use std::{fs, path::Path};

const BASE: &str = include_str!("../assets/base.css");
const MENU: &str = include_str!("../assets/menu.css");
const MARKDOWN: &str = include_str!("../assets/markdown.css");

/// Stylesheet written by [`write_css_assets`], relative to the output root.
pub const STYLESHEET: &str = "assets/docs.css";

/// Writes all bundled CSS assets to output directory
pub fn write_css_assets(assets_dir: &Path) -> Result<()> {
    fs::create_dir_all(assets_dir).context("Failed to create assets directory")?;
    write_bundled(assets_dir, "docs.css", &[BASE, MENU, MARKDOWN])
}

fn write_bundled(dir: &Path, name: &str, parts: &[&str]) -> Result<()> {
    let css = parts.join("\n");
    fs::write(dir.join(name), css)
        .with_context(|| format!("Failed to write CSS asset: {}", name))?;
    Ok(())
}
