//! Line-based text rendering of a document.
//!
//! Every pixel row band of `line_height` is one output line. A box with
//! `overflow: hidden` shows only the whole lines that fit its rendered
//! height; a visible-overflow box spills its content regardless.

use crate::document::Document;
use crate::element::{Content, Element, Tag};
use crate::layout::{self, inner_width};
use crate::types::Overflow;

pub fn render_lines(document: &Document) -> Vec<String> {
    let mut out = Vec::new();
    let width = document.metrics().viewport_width;
    render_element(document, document.root(), width, 0, &mut out);
    out
}

fn render_element(
    document: &Document,
    element: &Element,
    width: u16,
    indent: usize,
    out: &mut Vec<String>,
) {
    let line_height = document.metrics().line_height.max(1);
    let mut lines = Vec::new();

    for _ in 0..element.padding.top / line_height {
        lines.push(String::new());
    }

    let indent = indent + element.padding.left as usize;
    match &element.content {
        Content::None => {}
        Content::Text(_) => {
            for line in layout::text_lines(element, width) {
                lines.push(format!("{}{}", " ".repeat(indent), decorate(element.tag, &line)));
            }
        }
        Content::Children(children) => {
            let child_width = inner_width(element, width);
            for child in children {
                render_element(document, child, child_width, indent, &mut lines);
            }
        }
    }

    for _ in 0..element.padding.bottom / line_height {
        lines.push(String::new());
    }

    let overflow = document.stylesheet().compute(element).overflow;
    if overflow == Overflow::Hidden {
        let visible = (document.box_height(element, width) / line_height) as usize;
        lines.truncate(visible);
    }

    out.extend(lines);
}

fn decorate(tag: Tag, line: &str) -> String {
    match tag {
        Tag::Button => format!("[ {line} ]"),
        Tag::ListItem => format!("• {line}"),
        Tag::Div | Tag::Text => line.to_string(),
    }
}
