//! Animation ports - frame generators and their live controls

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::domain::{DeviceError, FrameBudget};

#[derive(Debug, Default)]
struct ControlFlags {
    paused: AtomicBool,
    stopped: AtomicBool,
}

/// Shared `paused`/`stopped` flags of one animation.
///
/// Cloning yields another handle to the same flags. The animation's render
/// loop reads them between frames; a flag set now takes effect at the next
/// check, and only if the animation is interruptible.
#[derive(Debug, Clone, Default)]
pub struct AnimationControl {
    flags: Arc<ControlFlags>,
}

impl AnimationControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pause(&self) {
        self.flags.paused.store(true, Ordering::Release);
    }

    pub fn resume(&self) {
        self.flags.paused.store(false, Ordering::Release);
    }

    pub fn stop(&self) {
        self.flags.stopped.store(true, Ordering::Release);
    }

    pub fn is_paused(&self) -> bool {
        self.flags.paused.load(Ordering::Acquire)
    }

    pub fn is_stopped(&self) -> bool {
        self.flags.stopped.load(Ordering::Acquire)
    }

    /// Do both handles point at the same animation?
    pub fn same_animation(&self, other: &AnimationControl) -> bool {
        Arc::ptr_eq(&self.flags, &other.flags)
    }
}

/// A ready-to-render animation.
pub trait Animation: Send {
    /// Handle to this animation's flags.
    fn control(&self) -> AnimationControl;

    /// Render until the frame budget is used up or, when interruptible, the
    /// stop flag is observed. Blocks the calling thread.
    fn show(&mut self) -> Result<(), DeviceError>;
}

/// Builds animations by name.
pub trait AnimationFactory: Send + Sync {
    fn get_animation(
        &self,
        name: &str,
        budget: FrameBudget,
        interruptible: bool,
    ) -> Result<Box<dyn Animation>, DeviceError>;
}
