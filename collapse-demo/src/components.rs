//! The page's components.

use collapse::Props;
use livedom::{Edges, Element};

pub const TITLE: &str = "Brunch, Express, Crank, and Tachyons";

const TOOLS: [(&str, &str); 4] = [
    ("brunch.io", "for the build pipeline."),
    ("crank.js", "for the javascript."),
    ("express.js", "to serve the files."),
    ("tachyons.css", "to make it legible."),
];

/// How many times, in words.
pub fn figure_count_text(count: u32) -> String {
    match count {
        1 => "once".to_string(),
        2 => "twice".to_string(),
        3 => "thrice".to_string(),
        n => format!("{n} times"),
    }
}

pub fn button_label(count: u32) -> String {
    if count == 0 {
        "Click me".to_string()
    } else {
        format!("I've been clicked {}", figure_count_text(count))
    }
}

pub fn text_button(id: &str, count: u32) -> Element {
    Element::button(button_label(count)).id(id)
}

/// The paragraph listing what the page is built with.
pub fn text_paragraph(_props: &Props) -> Element {
    Element::div()
        .padding(Edges::symmetric(0, 2))
        .children(
            TOOLS
                .iter()
                .map(|(name, purpose)| Element::list_item(format!("{name} {purpose}"))),
        )
}
