//! Navigation menu component

use maud::{Markup, html};

use crate::document::Navigation;

/// Renders the navigation menu
///
/// Emits `#menu > ul > li > a` entries; the selected entry carries the
/// `selected` class.
///
/// # Arguments
///
/// * `navigation`: Menu entries with selection state
/// * `href_for`: Maps an entry href to the written link target
pub fn menu(navigation: &Navigation, href_for: impl Fn(&str) -> String) -> Markup {
    html! {
        div id="menu" {
            ul {
                @for entry in navigation.entries() {
                    li {
                        @if entry.is_selected() {
                            a class="selected" href=(href_for(entry.href())) { (entry.label()) }
                        } @else {
                            a href=(href_for(entry.href())) { (entry.label()) }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_marks_selected_entry() {
        // Arrange
        let mut nav = Navigation::from_slugs(["getting-started", "syntax"]);
        nav.select("syntax");

        // Act
        let html = menu(&nav, str::to_string).into_string();

        // Assert
        assert!(html.contains(r##"<a href="#getting-started">Getting Started</a>"##));
        assert!(html.contains(r##"<a class="selected" href="#syntax">Syntax</a>"##));
        assert_eq!(html.matches("selected").count(), 1);
    }

    #[test]
    fn test_menu_applies_href_mapping() {
        // Arrange
        let nav = Navigation::from_slugs(["syntax"]);

        // Act
        let html = menu(&nav, |href| format!("{}.html", href.trim_start_matches('#')))
            .into_string();

        // Assert
        assert!(html.contains(r#"<a href="syntax.html">Syntax</a>"#), "{}", html);
    }

    #[test]
    fn test_menu_escapes_labels() {
        // Arrange
        let nav = Navigation::new(vec![crate::document::NavEntry::new("#x", "<b>X</b>")]);

        // Act
        let html = menu(&nav, str::to_string).into_string();

        // Assert
        assert!(html.contains("&lt;b&gt;X&lt;/b&gt;"), "{}", html);
    }
}
