//! Vertical measurement.
//!
//! Elements stack in a single column. Text wraps to the width left over
//! after padding and tag decoration, and every line is `line_height` pixels
//! tall.

use crate::element::{Content, Element, Tag};
use crate::text::wrap_words;

/// Font and viewport metrics used for measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Metrics {
    /// Pixels per text line.
    pub line_height: u16,
    /// Columns available to the root element.
    pub viewport_width: u16,
}

impl Default for Metrics {
    fn default() -> Self {
        Self {
            line_height: 20,
            viewport_width: 60,
        }
    }
}

/// Columns a tag spends on decoration around its text.
pub fn decoration_width(tag: Tag) -> u16 {
    match tag {
        Tag::Button => 4,
        Tag::ListItem => 2,
        Tag::Div | Tag::Text => 0,
    }
}

/// Width available to an element's content (and to its children).
pub fn inner_width(element: &Element, width: u16) -> u16 {
    width
        .saturating_sub(element.padding.horizontal())
        .saturating_sub(decoration_width(element.tag))
}

/// Lines of text an element draws itself, wrapped to its inner width.
pub fn text_lines(element: &Element, width: u16) -> Vec<String> {
    match &element.content {
        Content::Text(text) => wrap_words(text, inner_width(element, width) as usize),
        _ => Vec::new(),
    }
}

/// Full content height of `element` laid out at `width`, ignoring any
/// height override on the element itself.
///
/// `explicit` reports the current explicit height of a descendant (inline,
/// stylesheet or mid-transition); descendants without one size to content.
pub fn natural_height(
    element: &Element,
    width: u16,
    metrics: &Metrics,
    explicit: &impl Fn(&Element) -> Option<u16>,
) -> u16 {
    let content = match &element.content {
        Content::None => 0,
        Content::Text(_) => {
            let lines = text_lines(element, width).len() as u16;
            lines.saturating_mul(metrics.line_height)
        }
        Content::Children(children) => {
            let child_width = inner_width(element, width);
            children.iter().fold(0u16, |total, child| {
                total.saturating_add(box_height(child, child_width, metrics, explicit))
            })
        }
    };

    content.saturating_add(element.padding.vertical())
}

/// Height the element's box occupies: its explicit height if it has one,
/// otherwise its natural height.
pub fn box_height(
    element: &Element,
    width: u16,
    metrics: &Metrics,
    explicit: &impl Fn(&Element) -> Option<u16>,
) -> u16 {
    explicit(element).unwrap_or_else(|| natural_height(element, width, metrics, explicit))
}
