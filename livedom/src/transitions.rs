use std::fmt;
use std::time::Duration;

/// Configuration for a height transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionConfig {
    pub duration: Duration,
    pub easing: Easing,
}

impl TransitionConfig {
    pub fn new(duration: Duration, easing: Easing) -> Self {
        Self { duration, easing }
    }
}

impl fmt::Display for TransitionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "height {}ms {}", self.duration.as_millis(), self.easing)
    }
}

/// Easing function for transitions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Easing {
    #[default]
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
}

impl Easing {
    /// Apply easing to progress (0.0 to 1.0).
    pub fn apply(self, t: f32) -> f32 {
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
        }
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Easing::Linear => "linear",
            Easing::EaseIn => "ease-in",
            Easing::EaseOut => "ease-out",
            Easing::EaseInOut => "ease-in-out",
        };
        f.write_str(name)
    }
}

/// Inline transition declaration of an element.
///
/// `Inherit` defers to whatever the stylesheet declares for the element's
/// classes; `Disabled` suppresses it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TransitionTiming {
    #[default]
    Inherit,
    Disabled,
    Set(TransitionConfig),
}

impl TransitionTiming {
    /// Resolve against the transition the stylesheet would apply.
    pub fn resolve(self, from_sheet: Option<TransitionConfig>) -> Option<TransitionConfig> {
        match self {
            TransitionTiming::Inherit => from_sheet,
            TransitionTiming::Disabled => None,
            TransitionTiming::Set(config) => Some(config),
        }
    }
}

impl fmt::Display for TransitionTiming {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransitionTiming::Inherit => f.write_str("inherit"),
            TransitionTiming::Disabled => f.write_str("none"),
            TransitionTiming::Set(config) => write!(f, "{config}"),
        }
    }
}
