//! Class-based style rules.
//!
//! A tiny stand-in for an external stylesheet: each rule targets one class
//! and may declare a height, an overflow mode and a height transition. Rules
//! apply in sheet order, then the element's inline style wins.

use std::time::Duration;

use crate::element::Element;
use crate::transitions::{Easing, TransitionConfig};
use crate::types::{Height, Overflow};

/// Class the wrapper puts on every collapsible container.
pub const COLLAPSIBLE: &str = "collapsible";
/// Class that pins a container to zero height on first paint.
pub const COLLAPSED: &str = "collapsed";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub class: String,
    pub height: Option<Height>,
    pub overflow: Option<Overflow>,
    pub transition: Option<TransitionConfig>,
}

impl Rule {
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            height: None,
            overflow: None,
            transition: None,
        }
    }

    pub fn height(mut self, height: Height) -> Self {
        self.height = Some(height);
        self
    }

    pub fn overflow(mut self, overflow: Overflow) -> Self {
        self.overflow = Some(overflow);
        self
    }

    pub fn transition(mut self, duration: Duration, easing: Easing) -> Self {
        self.transition = Some(TransitionConfig::new(duration, easing));
        self
    }
}

/// Fully resolved style of one element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComputedStyle {
    pub height: Height,
    pub overflow: Overflow,
    pub transition: Option<TransitionConfig>,
}

#[derive(Debug, Clone, Default)]
pub struct Stylesheet {
    rules: Vec<Rule>,
}

impl Stylesheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// The sheet collapsible containers expect:
    ///
    /// ```css
    /// .collapsible { overflow: hidden; transition: height 0.8s ease-out; }
    /// .collapsed { height: 0; }
    /// ```
    pub fn collapsible() -> Self {
        Self::new()
            .rule(
                Rule::new(COLLAPSIBLE)
                    .overflow(Overflow::Hidden)
                    .transition(Duration::from_millis(800), Easing::EaseOut),
            )
            .rule(Rule::new(COLLAPSED).height(Height::Px(0)))
    }

    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn compute(&self, element: &Element) -> ComputedStyle {
        let mut computed = ComputedStyle::default();
        let mut sheet_transition = None;

        for rule in self.rules.iter().filter(|r| element.has_class(&r.class)) {
            if let Some(height) = rule.height {
                computed.height = height;
            }
            if let Some(overflow) = rule.overflow {
                computed.overflow = overflow;
            }
            if rule.transition.is_some() {
                sheet_transition = rule.transition;
            }
        }

        let inline = &element.style;
        if let Some(height) = inline.height {
            computed.height = height;
        }
        if let Some(overflow) = inline.overflow {
            computed.overflow = overflow;
        }
        computed.transition = inline.transition.resolve(sheet_transition);
        computed
    }
}
