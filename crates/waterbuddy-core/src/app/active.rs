//! The "active animation" slot.
//!
//! Written by the animation lane when an animation starts running and by
//! `stop_animation`, read by pause/resume. All access goes through one
//! short lock, so a start racing a stop cannot lose an update.

use std::sync::{Mutex, PoisonError};

use crate::ports::AnimationControl;

#[derive(Debug, Default)]
pub(crate) struct ActiveAnimation {
    slot: Mutex<Option<AnimationControl>>,
}

impl ActiveAnimation {
    /// Make `control` the active animation, replacing any previous one.
    pub(crate) fn replace(&self, control: AnimationControl) {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(control);
    }

    /// Clear the slot and hand back what was in it.
    pub(crate) fn take(&self) -> Option<AnimationControl> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner).take()
    }

    /// Run `f` on the active animation; false if there is none.
    pub(crate) fn with<F>(&self, f: F) -> bool
    where
        F: FnOnce(&AnimationControl),
    {
        let slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        match slot.as_ref() {
            Some(control) => {
                f(control);
                true
            }
            None => false,
        }
    }

    pub(crate) fn is_set(&self) -> bool {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_slot_is_noop() {
        let active = ActiveAnimation::default();
        assert!(!active.with(AnimationControl::pause));
        assert!(active.take().is_none());
        assert!(!active.is_set());
    }

    #[test]
    fn test_replace_then_take() {
        let active = ActiveAnimation::default();
        let first = AnimationControl::new();
        let second = AnimationControl::new();
        active.replace(first.clone());
        active.replace(second.clone());

        assert!(active.with(AnimationControl::pause));
        assert!(second.is_paused());
        assert!(!first.is_paused());

        let taken = active.take().unwrap();
        assert!(taken.same_animation(&second));
        assert!(!active.is_set());
    }
}
