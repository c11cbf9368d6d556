//! Page loading and static rendering for the Cube documentation site.

mod assets;
pub mod components;
mod config;
pub mod document;
pub mod loader;
pub mod markdown;
pub mod pipe;
pub mod site;
pub mod source;

pub use assets::{STYLESHEET, write_css_assets};
pub use config::{Command, Config};
pub use document::{Document, NavEntry, Navigation};
pub use loader::{
    DEFAULT_PAGE, LOAD_ERROR_HTML, LoadOutcome, PageLoader, PendingLoad, fragment_of,
    initial_slug, resolve_path,
};
pub use markdown::{Extension, Frame, MarkdownRenderer, PageLinks, TargetLink};
pub use pipe::{CubePipe, PipeOutput};
pub use site::{BuildReport, build_site, discover_pages};
pub use source::{DirSource, PageSource};
