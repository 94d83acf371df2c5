//! The live element tree.
//!
//! Descriptions are committed into a `Document` by id. A committed node
//! keeps its inline style across re-renders (only what the new description
//! sets explicitly overrides it), the same way a reconciling renderer
//! patches a DOM node instead of recreating it. Each live node carries a
//! key that changes only when the node is removed and inserted again.

use std::collections::HashMap;
use std::time::Instant;

use log::{debug, warn};

use crate::animation::AnimationState;
use crate::element::{find_element, find_element_mut, walk, Content, Element};
use crate::layout::{self, Metrics};
use crate::render;
use crate::stylesheet::{ComputedStyle, Stylesheet};
use crate::transitions::TransitionTiming;
use crate::types::Height;

/// Id of the root element every committed description hangs off.
pub const ROOT_ID: &str = "body";

#[derive(Debug)]
pub struct Document {
    root: Element,
    stylesheet: Stylesheet,
    metrics: Metrics,
    animation: AnimationState,
    keys: HashMap<String, u64>,
    next_key: u64,
    frame_time: Option<Instant>,
}

impl Document {
    pub fn new(stylesheet: Stylesheet, metrics: Metrics) -> Self {
        let mut document = Self {
            root: Element::div().id(ROOT_ID),
            stylesheet,
            metrics,
            animation: AnimationState::new(),
            keys: HashMap::new(),
            next_key: 0,
            frame_time: None,
        };
        document.sync_keys();
        document
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn stylesheet(&self) -> &Stylesheet {
        &self.stylesheet
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn set_reduced_motion(&mut self, enabled: bool) {
        self.animation.set_reduced_motion(enabled);
    }

    /// Commit a description. Returns true if it patched an existing node.
    ///
    /// The root cannot be replaced: a description carrying its id is dropped.
    pub fn commit(&mut self, description: Element) -> bool {
        let id = description.id.clone();
        if id == ROOT_ID {
            warn!("refusing to commit over #{ROOT_ID}");
            return false;
        }
        let patched = match find_element_mut(&mut self.root, &id) {
            Some(existing) => {
                reconcile(existing, description);
                true
            }
            None => {
                match &mut self.root.content {
                    Content::Children(children) => children.push(description),
                    content => *content = Content::Children(vec![description]),
                }
                false
            }
        };
        debug!("committed #{id} ({})", if patched { "patched" } else { "inserted" });
        self.sync_keys();
        patched
    }

    /// Remove a node and its subtree. The root cannot be removed.
    pub fn remove(&mut self, id: &str) -> bool {
        if id == ROOT_ID {
            return false;
        }
        let removed = remove_from(&mut self.root, id);
        if removed {
            debug!("removed #{id}");
            self.sync_keys();
        }
        removed
    }

    pub fn contains(&self, id: &str) -> bool {
        self.keys.contains_key(id)
    }

    pub fn node_key(&self, id: &str) -> Option<u64> {
        self.keys.get(id).copied()
    }

    pub fn find(&self, id: &str) -> Option<&Element> {
        find_element(&self.root, id)
    }

    pub fn computed_style(&self, id: &str) -> Option<ComputedStyle> {
        self.find(id).map(|element| self.stylesheet.compute(element))
    }

    /// Full content height of a node, whatever height it is currently held at.
    pub fn scroll_height(&self, id: &str) -> Option<u16> {
        let (element, width) = self.locate(id)?;
        Some(layout::natural_height(
            element,
            width,
            &self.metrics,
            &|el| self.explicit_height(el),
        ))
    }

    /// Height the node occupies on the last rendered frame.
    pub fn rendered_height(&self, id: &str) -> Option<u16> {
        let (element, width) = self.locate(id)?;
        Some(self.box_height(element, width))
    }

    pub fn set_height(&mut self, id: &str, height: Height) -> bool {
        match find_element_mut(&mut self.root, id) {
            Some(element) => {
                element.style.height = Some(height);
                true
            }
            None => false,
        }
    }

    pub fn transition(&self, id: &str) -> Option<TransitionTiming> {
        self.find(id).map(|element| element.style.transition)
    }

    pub fn set_transition(&mut self, id: &str, timing: TransitionTiming) -> bool {
        match find_element_mut(&mut self.root, id) {
            Some(element) => {
                element.style.transition = timing;
                true
            }
            None => false,
        }
    }

    pub fn is_transitioning(&self, id: &str) -> bool {
        self.animation.is_transitioning(id)
    }

    pub fn has_active_transitions(&self) -> bool {
        self.animation.has_active_transitions()
    }

    /// Run one frame of style resolution and transitions.
    pub fn step(&mut self, now: Instant) {
        self.animation.update(&self.root, &self.stylesheet, now);
        self.frame_time = Some(now);
    }

    /// Plain-text rendering of the visible tree as of the last frame.
    pub fn render_lines(&self) -> Vec<String> {
        render::render_lines(self)
    }

    /// Explicit height of an element on the last frame: mid-transition value,
    /// else inline or stylesheet height. `None` means auto.
    pub(crate) fn explicit_height(&self, element: &Element) -> Option<u16> {
        if let Some(now) = self.frame_time {
            if let Some(value) = self.animation.get_interpolated(&element.id, now) {
                return Some(value);
            }
        }
        self.stylesheet.compute(element).height.px()
    }

    pub(crate) fn box_height(&self, element: &Element, width: u16) -> u16 {
        layout::box_height(element, width, &self.metrics, &|el| self.explicit_height(el))
    }

    /// Find a node along with the width it is laid out at.
    fn locate(&self, id: &str) -> Option<(&Element, u16)> {
        fn search<'a>(element: &'a Element, width: u16, id: &str) -> Option<(&'a Element, u16)> {
            if element.id == id {
                return Some((element, width));
            }
            let inner = layout::inner_width(element, width);
            element
                .content
                .children()
                .iter()
                .find_map(|child| search(child, inner, id))
        }
        search(&self.root, self.metrics.viewport_width, id)
    }

    fn sync_keys(&mut self) {
        let mut ids = Vec::new();
        walk(&self.root, &mut |element| ids.push(element.id.clone()));

        let mut keys = HashMap::with_capacity(ids.len());
        for id in ids {
            let key = match self.keys.get(&id) {
                Some(key) => *key,
                None => {
                    self.next_key += 1;
                    self.next_key
                }
            };
            keys.insert(id, key);
        }
        self.keys = keys;
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new(Stylesheet::collapsible(), Metrics::default())
    }
}

/// Patch `existing` in place to match `description`, keeping inline style
/// the description does not set and recursing into children with matching ids.
fn reconcile(existing: &mut Element, description: Element) {
    let Element {
        tag,
        classes,
        content,
        padding,
        style,
        ..
    } = description;

    existing.tag = tag;
    existing.classes = classes;
    existing.padding = padding;
    existing.style = existing.style.merged_with(&style);

    let old = std::mem::take(&mut existing.content);
    existing.content = match content {
        Content::Children(children) => {
            let mut previous: HashMap<String, Element> = match old {
                Content::Children(old_children) => old_children
                    .into_iter()
                    .map(|child| (child.id.clone(), child))
                    .collect(),
                _ => HashMap::new(),
            };
            Content::Children(
                children
                    .into_iter()
                    .map(|child| match previous.remove(&child.id) {
                        Some(mut kept) => {
                            reconcile(&mut kept, child);
                            kept
                        }
                        None => child,
                    })
                    .collect(),
            )
        }
        other => other,
    };
}

fn remove_from(parent: &mut Element, id: &str) -> bool {
    let Content::Children(children) = &mut parent.content else {
        return false;
    };
    if let Some(index) = children.iter().position(|child| child.id == id) {
        children.remove(index);
        return true;
    }
    children.iter_mut().any(|child| remove_from(child, id))
}
