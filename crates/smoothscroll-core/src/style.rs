//! Scrollbar styling injected into the host document

use crate::config::{ScrollbarVisibility, Settings};

/// Id of the single style element the plugin owns
pub const STYLE_ELEMENT_ID: &str = "smoothscroll-scrollbar-style";

/// Class set on an editor's scroller while it is scrolling
pub const SCROLLING_CLASS: &str = "is-scrolling";

/// Scroll container of the document editor
const DOCUMENT_SCROLLER: &str = ".markdown-source-view .cm-scroller";

/// Build the scrollbar stylesheet for `settings`
///
/// Returns `None` when nothing differs from the host defaults, in which case
/// the style element should be removed.
pub fn scrollbar_css(settings: &Settings) -> Option<String> {
    let scroller = if settings.scrollbar_global {
        "*"
    } else {
        DOCUMENT_SCROLLER
    };

    let mut rules = Vec::new();
    match settings.scrollbar_visibility {
        ScrollbarVisibility::Hide => {
            rules.push(format!("{} {{ scrollbar-width: none; }}", scroller));
            rules.push(format!("{}::-webkit-scrollbar {{ display: none; }}", scroller));
        }
        ScrollbarVisibility::Scroll => {
            rules.extend(width_rule(scroller, settings.scrollbar_width));
            // only editor scrollers ever receive the scrolling class
            rules.push(format!(
                "{}::-webkit-scrollbar-thumb {{ background-color: transparent; }}",
                DOCUMENT_SCROLLER
            ));
            rules.push(format!(
                "{}.{}::-webkit-scrollbar-thumb {{ background-color: var(--scrollbar-thumb-bg); }}",
                DOCUMENT_SCROLLER, SCROLLING_CLASS
            ));
        }
        ScrollbarVisibility::Show => {
            rules.extend(width_rule(scroller, settings.scrollbar_width));
        }
    }

    if rules.is_empty() {
        None
    } else {
        Some(rules.join("\n"))
    }
}

fn width_rule(scroller: &str, width: f64) -> Option<String> {
    if width <= 0.0 {
        return None;
    }
    Some(format!(
        "{}::-webkit-scrollbar {{ width: {}px; height: {}px; }}",
        scroller, width, width
    ))
}
