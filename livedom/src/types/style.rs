use super::{Height, Overflow};
use crate::transitions::{TransitionConfig, TransitionTiming};

/// Inline style overrides carried by an element.
///
/// Unset fields fall through to the stylesheet.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Style {
    pub height: Option<Height>,
    pub overflow: Option<Overflow>,
    pub transition: TransitionTiming,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn height(mut self, height: Height) -> Self {
        self.height = Some(height);
        self
    }

    pub fn overflow(mut self, overflow: Overflow) -> Self {
        self.overflow = Some(overflow);
        self
    }

    pub fn transition(mut self, config: TransitionConfig) -> Self {
        self.transition = TransitionTiming::Set(config);
        self
    }

    pub fn no_transition(mut self) -> Self {
        self.transition = TransitionTiming::Disabled;
        self
    }

    /// Overlay `other` on top of `self`. Fields set in `other` win.
    pub fn merged_with(self, other: &Style) -> Style {
        Style {
            height: other.height.or(self.height),
            overflow: other.overflow.or(self.overflow),
            transition: match other.transition {
                TransitionTiming::Inherit => self.transition,
                explicit => explicit,
            },
        }
    }
}
