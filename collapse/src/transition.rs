//! Height transitions to and from zero.
//!
//! An element cannot transition away from `auto`, so collapsing first pins
//! it to its measured pixel height with transitions off, then drops it to
//! zero a frame later with transitions back on. Expanding starts from an
//! element already held at zero and only needs the target height.

use livedom::{Height, TransitionTiming};
use log::{debug, trace};

use crate::surface::{FrameScheduler, LiveElement};

/// Holds an element's transition suspended and puts it back.
///
/// The saved declaration is restored by [`TransitionGuard::restore`], or on
/// drop if the guard goes away first.
pub struct TransitionGuard<'a, E: LiveElement + ?Sized> {
    element: &'a E,
    saved: Option<TransitionTiming>,
}

impl<'a, E: LiveElement + ?Sized> TransitionGuard<'a, E> {
    /// Save the element's transition declaration and disable it.
    pub fn suspend(element: &'a E) -> Self {
        let saved = element.transition();
        element.set_transition(TransitionTiming::Disabled);
        Self {
            element,
            saved: Some(saved),
        }
    }

    /// The declaration that will be put back.
    pub fn saved(&self) -> Option<TransitionTiming> {
        self.saved
    }

    pub fn restore(mut self) {
        self.put_back();
    }

    fn put_back(&mut self) {
        if let Some(saved) = self.saved.take() {
            self.element.set_transition(saved);
        }
    }
}

impl<E: LiveElement + ?Sized> Drop for TransitionGuard<'_, E> {
    fn drop(&mut self) {
        if self.saved.is_some() {
            trace!(
                "restoring transition on #{} after early exit",
                self.element.id()
            );
        }
        self.put_back();
    }
}

/// Animate `element` from its natural height down to zero.
///
/// Reads the natural height and disables the transition now; on the next
/// frame pins the height and restores the transition; on the frame after
/// that sets the height to zero. Does nothing without an element.
pub async fn collapse<E, F>(element: Option<&E>, frames: &F)
where
    E: LiveElement + ?Sized,
    F: FrameScheduler + ?Sized,
{
    let Some(element) = element else {
        debug!("collapse skipped: no element");
        return;
    };

    let extent = element.scroll_height();
    let guard = TransitionGuard::suspend(element);

    frames.next_frame().await;
    element.set_height(Height::Px(extent));
    guard.restore();

    frames.next_frame().await;
    element.set_height(Height::Px(0));
    debug!("collapsing #{} from {extent}px", element.id());
}

/// Animate `element` from zero up to its natural height, immediately.
///
/// Relies on the element's own transition to animate the change. Does
/// nothing without an element.
pub fn expand<E>(element: Option<&E>)
where
    E: LiveElement + ?Sized,
{
    let Some(element) = element else {
        debug!("expand skipped: no element");
        return;
    };

    let extent = element.scroll_height();
    element.set_height(Height::Px(extent));
    debug!("expanding #{} to {extent}px", element.id());
}
