//! Markdown rendering with the documentation site extensions.
//!
//! This module provides markdown rendering using comrak with GFM extensions,
//! the source level target link and frame rules, and fragment link
//! resolution for pre-rendered pages.

pub mod extensions;
mod links;
mod renderer;

pub use extensions::{Extension, Frame, TargetLink};
pub use links::{PageLinks, static_page_name};
pub use renderer::MarkdownRenderer;
