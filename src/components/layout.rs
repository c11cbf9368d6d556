//! Page layout wrapper component

use maud::{DOCTYPE, Markup, PreEscaped, html};

use super::menu::menu;
use crate::document::Document;

/// Wraps a loaded document with the standard HTML structure
///
/// Produces the `#content` container holding the `#menu` navigation and the
/// `.markdown-body` content region the page loader renders into.
///
/// # Arguments
///
/// * `title`: Page title text (without suffix)
/// * `stylesheets`: Array of CSS file paths to include
/// * `document`: Loaded document providing menu state and content markup
/// * `href_for`: Maps a navigation href to the link target written out
///
/// # Returns
///
/// Complete HTML document
pub fn page_wrapper(
    title: &str,
    stylesheets: &[&str],
    document: &Document,
    href_for: impl Fn(&str) -> String,
) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " - Cube Documentation" }
                @for stylesheet in stylesheets {
                    link rel="stylesheet" href=(stylesheet);
                }
            }
            body {
                div id="content" {
                    (menu(document.navigation(), href_for))
                    div class="markdown-body" {
                        (PreEscaped(document.content()))
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Navigation;

    #[test]
    fn test_page_wrapper_embeds_content() {
        // Arrange
        let mut document = Document::new(Navigation::from_slugs(["intro"]));
        document.replace_content("<h1>Intro</h1>".to_string());
        document.select("intro");

        // Act
        let html = page_wrapper("Intro", &["assets/docs.css"], &document, str::to_string)
            .into_string();

        // Assert
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Intro - Cube Documentation</title>"));
        assert!(html.contains(r#"<link rel="stylesheet" href="assets/docs.css">"#));
        assert!(html.contains(r#"<div class="markdown-body"><h1>Intro</h1></div>"#));
        assert!(html.contains(r##"<a class="selected" href="#intro">Intro</a>"##), "{}", html);
    }
}
