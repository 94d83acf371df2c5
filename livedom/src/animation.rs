use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};

use log::trace;

use crate::element::{walk, Element};
use crate::stylesheet::Stylesheet;
use crate::transitions::Easing;

/// A single running height transition.
#[derive(Debug, Clone, Copy)]
struct ActiveTransition {
    from: u16,
    to: u16,
    start: Instant,
    duration: Duration,
    easing: Easing,
}

impl ActiveTransition {
    fn value_at(&self, now: Instant) -> u16 {
        let elapsed = now.saturating_duration_since(self.start);
        let progress = if self.duration.is_zero() {
            1.0
        } else {
            (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
        };
        lerp_u16(self.from, self.to, self.easing.apply(progress))
    }

    fn is_finished(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.start) >= self.duration
    }
}

/// Tracks explicit heights across frames and interpolates changes.
///
/// A transition starts when an element's explicit height differs from the
/// previous frame and its computed style carries a transition. Nothing
/// animates from `auto`: an element must hold an explicit height for one
/// frame before a change to it can be animated.
#[derive(Debug, Default)]
pub struct AnimationState {
    /// Previous frame's explicit height per element (`None` = auto).
    snapshots: HashMap<String, Option<u16>>,
    active: HashMap<String, ActiveTransition>,
    /// When true, height changes apply instantly.
    reduced_motion: bool,
}

impl AnimationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_reduced_motion(&mut self, enabled: bool) {
        self.reduced_motion = enabled;
        if enabled {
            self.active.clear();
        }
    }

    pub fn has_active_transitions(&self) -> bool {
        !self.active.is_empty()
    }

    pub fn is_transitioning(&self, id: &str) -> bool {
        self.active.contains_key(id)
    }

    /// Advance one frame: prune finished transitions, start new ones, and
    /// forget elements that left the tree.
    pub fn update(&mut self, root: &Element, stylesheet: &Stylesheet, now: Instant) {
        self.active.retain(|_, t| !t.is_finished(now));

        let mut seen = HashSet::new();
        walk(root, &mut |element| {
            seen.insert(element.id.clone());
            self.update_element(element, stylesheet, now);
        });

        self.snapshots.retain(|id, _| seen.contains(id));
        self.active.retain(|id, _| seen.contains(id));
    }

    fn update_element(&mut self, element: &Element, stylesheet: &Stylesheet, now: Instant) {
        let computed = stylesheet.compute(element);
        let current = computed.height.px();
        let previous = self.snapshots.insert(element.id.clone(), current);

        let (Some(Some(from)), Some(to)) = (previous, current) else {
            if current.is_none() {
                self.active.remove(&element.id);
            }
            return;
        };
        if from == to {
            return;
        }

        let Some(config) = computed.transition.filter(|_| !self.reduced_motion) else {
            // Changed without a transition: jump straight to the new value.
            self.active.remove(&element.id);
            return;
        };

        // Retarget from wherever a running transition currently is.
        let from = self
            .active
            .get(&element.id)
            .map(|running| running.value_at(now))
            .unwrap_or(from);

        trace!(
            "height transition on #{}: {}px -> {}px over {:?}",
            element.id,
            from,
            to,
            config.duration
        );
        self.active.insert(
            element.id.clone(),
            ActiveTransition {
                from,
                to,
                start: now,
                duration: config.duration,
                easing: config.easing,
            },
        );
    }

    /// Interpolated height of an element at `now`, if it is transitioning.
    pub fn get_interpolated(&self, id: &str, now: Instant) -> Option<u16> {
        self.active.get(id).map(|t| t.value_at(now))
    }
}

fn lerp_u16(from: u16, to: u16, t: f32) -> u16 {
    let from = f32::from(from);
    let to = f32::from(to);
    (from + (to - from) * t).round() as u16
}
