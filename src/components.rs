//! Reusable HTML components for page generation
//!
//! Maud component functions shared by every generated documentation page.

pub mod layout;
pub mod menu;
