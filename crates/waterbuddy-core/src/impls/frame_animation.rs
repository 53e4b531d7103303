//! FrameAnimationFactory - 名前付きフレームループ
//!
//! # 描画ループ
//! - one frame per `frame_interval`, cycling through the named sequence
//! - stops when the [`FrameBudget`] is used up
//! - interruptible animations check their flags before every frame: `stopped`
//!   ends `show()`, `paused` holds the current frame and polls every
//!   `pause_poll` without spending budget
//! - non-interruptible animations ignore both flags
//! - the matrix is cleared when the loop ends, so nothing lingers after the
//!   animation's task is Done

use std::collections::HashMap;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use log::debug;

use crate::config::AnimationConfig;
use crate::domain::{DeviceError, Frame, FrameBudget, MATRIX_SIDE, Rgb};
use crate::ports::{Animation, AnimationControl, AnimationFactory, DisplayDevice};

pub struct FrameAnimationFactory {
    device: Arc<dyn DisplayDevice>,
    library: HashMap<String, Arc<Vec<Frame>>>,
    frame_interval: Duration,
    pause_poll: Duration,
}

impl FrameAnimationFactory {
    /// Empty library; see [`FrameAnimationFactory::with_builtins`].
    pub fn new(device: Arc<dyn DisplayDevice>, config: &AnimationConfig) -> Self {
        Self {
            device,
            library: HashMap::new(),
            frame_interval: config.frame_interval(),
            pause_poll: config.pause_poll(),
        }
    }

    /// Library preloaded with `spin`, `pulse` and `drop`.
    pub fn with_builtins(device: Arc<dyn DisplayDevice>, config: &AnimationConfig) -> Self {
        Self::new(device, config)
            .register("spin", spin_frames())
            .register("pulse", pulse_frames())
            .register("drop", drop_frames())
    }

    /// Add (or replace) a named frame sequence.
    pub fn register(mut self, name: impl Into<String>, frames: Vec<Frame>) -> Self {
        self.library.insert(name.into(), Arc::new(frames));
        self
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.library.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl AnimationFactory for FrameAnimationFactory {
    fn get_animation(
        &self,
        name: &str,
        budget: FrameBudget,
        interruptible: bool,
    ) -> Result<Box<dyn Animation>, DeviceError> {
        let frames = self
            .library
            .get(name)
            .ok_or_else(|| DeviceError::AnimationNotFound(name.to_string()))?;
        if frames.is_empty() {
            return Err(DeviceError::Rejected(format!("animation {name} has no frames")));
        }
        Ok(Box::new(FrameAnimation {
            name: name.to_string(),
            frames: Arc::clone(frames),
            device: Arc::clone(&self.device),
            control: AnimationControl::new(),
            budget,
            interruptible,
            frame_interval: self.frame_interval,
            pause_poll: self.pause_poll,
        }))
    }
}

struct FrameAnimation {
    name: String,
    frames: Arc<Vec<Frame>>,
    device: Arc<dyn DisplayDevice>,
    control: AnimationControl,
    budget: FrameBudget,
    interruptible: bool,
    frame_interval: Duration,
    pause_poll: Duration,
}

impl Animation for FrameAnimation {
    fn control(&self) -> AnimationControl {
        self.control.clone()
    }

    fn show(&mut self) -> Result<(), DeviceError> {
        let mut rendered: u32 = 0;
        while !self.budget.is_exhausted(rendered) {
            if self.interruptible {
                if self.control.is_stopped() {
                    debug!("animation {} stopped after {rendered} frames", self.name);
                    break;
                }
                if self.control.is_paused() {
                    thread::sleep(self.pause_poll);
                    continue;
                }
            }

            let index = rendered as usize % self.frames.len();
            if let Some(frame) = self.frames.get(index) {
                self.device.draw_frame(frame)?;
            }
            rendered = rendered.saturating_add(1);

            if !self.budget.is_exhausted(rendered) {
                thread::sleep(self.frame_interval);
            }
        }
        self.device.clear()
    }
}

/// One lit pixel walking clockwise around the border.
fn spin_frames() -> Vec<Frame> {
    let last = MATRIX_SIDE - 1;
    let top = (0..last).map(|x| (x, 0));
    let right = (0..last).map(|y| (last, y));
    let bottom = (1..=last).rev().map(|x| (x, last));
    let left = (1..=last).rev().map(|y| (0, y));
    top.chain(right)
        .chain(bottom)
        .chain(left)
        .map(|(x, y)| Frame::filled(Rgb::OFF).with_pixel(x, y, Rgb::WATER))
        .collect()
}

/// Whole matrix breathing in and out.
fn pulse_frames() -> Vec<Frame> {
    let rise = [32u8, 64, 128, 192, 255];
    rise.iter()
        .chain(rise.iter().rev())
        .map(|level| Frame::filled(Rgb::new(0, level / 2, *level)))
        .collect()
}

/// A droplet falling down the middle column.
fn drop_frames() -> Vec<Frame> {
    let mid = MATRIX_SIDE / 2;
    (0..MATRIX_SIDE)
        .map(|y| Frame::filled(Rgb::OFF).with_pixel(mid, y, Rgb::WATER))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impls::{DeviceCall, RecordingDevice};
    use std::time::Instant;

    fn fast_config() -> AnimationConfig {
        AnimationConfig {
            frame_interval_ms: 5,
            pause_poll_ms: 5,
        }
    }

    fn factory(device: &Arc<RecordingDevice>) -> FrameAnimationFactory {
        let device: Arc<dyn DisplayDevice> = device.clone();
        FrameAnimationFactory::with_builtins(device, &fast_config())
    }

    #[test]
    fn test_builtins_are_registered() {
        let device = Arc::new(RecordingDevice::default());
        assert_eq!(factory(&device).names(), vec!["drop", "pulse", "spin"]);
        assert_eq!(spin_frames().len(), 4 * (MATRIX_SIDE - 1));
    }

    #[test]
    fn test_unknown_animation() {
        let device = Arc::new(RecordingDevice::default());
        let err = factory(&device)
            .get_animation("nope", FrameBudget::Frames(1), false)
            .err();
        assert_eq!(err, Some(DeviceError::AnimationNotFound("nope".into())));
    }

    #[test]
    fn test_empty_sequence_is_rejected() {
        let device = Arc::new(RecordingDevice::default());
        let factory = factory(&device).register("blank", Vec::new());
        assert!(matches!(
            factory.get_animation("blank", FrameBudget::Frames(1), false),
            Err(DeviceError::Rejected(_))
        ));
    }

    #[test]
    fn test_renders_exactly_budget_frames() {
        let device = Arc::new(RecordingDevice::default());
        let mut anim = factory(&device)
            .get_animation("pulse", FrameBudget::Frames(13), false)
            .unwrap();
        anim.show().unwrap();
        // pulse has 10 frames; the loop wraps around
        assert_eq!(device.frames_drawn(), 13);
        assert_eq!(device.calls().last(), Some(&DeviceCall::Clear));
    }

    #[test]
    fn test_non_interruptible_ignores_flags() {
        let device = Arc::new(RecordingDevice::default());
        let mut anim = factory(&device)
            .get_animation("spin", FrameBudget::Frames(4), false)
            .unwrap();
        anim.control().pause();
        anim.control().stop();
        anim.show().unwrap();
        assert_eq!(device.frames_drawn(), 4);
    }

    #[test]
    fn test_interruptible_stop_before_show() {
        let device = Arc::new(RecordingDevice::default());
        let mut anim = factory(&device)
            .get_animation("spin", FrameBudget::Unbounded, true)
            .unwrap();
        anim.control().stop();
        anim.show().unwrap();
        assert_eq!(device.frames_drawn(), 0);
        assert_eq!(device.calls(), vec![DeviceCall::Clear]);
    }

    #[test]
    fn test_interruptible_stop_from_another_thread() {
        let device = Arc::new(RecordingDevice::default());
        let mut anim = factory(&device)
            .get_animation("drop", FrameBudget::Unbounded, true)
            .unwrap();
        let control = anim.control();
        let stopper = thread::spawn(move || {
            thread::sleep(Duration::from_millis(40));
            control.stop();
        });

        let started = Instant::now();
        anim.show().unwrap();
        stopper.join().unwrap();

        assert!(started.elapsed() < Duration::from_secs(2));
        assert!(device.frames_drawn() >= 1);
        assert_eq!(device.calls().last(), Some(&DeviceCall::Clear));
    }

    #[test]
    fn test_pause_holds_frames_until_resume() {
        let device = Arc::new(RecordingDevice::default());
        let mut anim = factory(&device)
            .get_animation("spin", FrameBudget::Frames(5), true)
            .unwrap();
        let control = anim.control();
        control.pause();

        let renderer = thread::spawn(move || anim.show());
        thread::sleep(Duration::from_millis(50));
        assert_eq!(device.frames_drawn(), 0);

        control.resume();
        renderer.join().unwrap().unwrap();
        assert_eq!(device.frames_drawn(), 5);
    }
}
