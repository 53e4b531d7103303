//! ConsoleDevice - ペリフェラルの動作をログに出す
//!
//! Stands in for the LED matrix and buzzer on a development machine.
//! Message duration scales with text length, the way a scrolling matrix does.

use std::thread;
use std::time::Duration;

use log::info;

use crate::domain::{ChimeCode, DeviceError, Frame, Rgb};
use crate::ports::DisplayDevice;

pub struct ConsoleDevice {
    scroll_per_char: Duration,
    flash_duration: Duration,
}

impl ConsoleDevice {
    pub fn new(scroll_per_char: Duration, flash_duration: Duration) -> Self {
        Self {
            scroll_per_char,
            flash_duration,
        }
    }
}

impl Default for ConsoleDevice {
    fn default() -> Self {
        Self::new(Duration::from_millis(20), Duration::from_millis(300))
    }
}

impl DisplayDevice for ConsoleDevice {
    fn show_message(&self, text: &str) -> Result<(), DeviceError> {
        info!("[display] {text}");
        let chars = u32::try_from(text.chars().count()).unwrap_or(u32::MAX);
        thread::sleep(self.scroll_per_char.saturating_mul(chars));
        Ok(())
    }

    fn flash(&self, color: Rgb) -> Result<(), DeviceError> {
        info!("[display] flash rgb({}, {}, {})", color.r, color.g, color.b);
        thread::sleep(self.flash_duration);
        Ok(())
    }

    fn play_chime(&self, chime: &ChimeCode) -> Result<(), DeviceError> {
        if !chime.is_none() {
            info!("[buzzer] chime {chime}");
        }
        Ok(())
    }

    fn draw_frame(&self, frame: &Frame) -> Result<(), DeviceError> {
        let lit = frame.pixels().iter().filter(|p| **p != Rgb::OFF).count();
        info!("[display] frame ({lit} lit)");
        Ok(())
    }

    fn clear(&self) -> Result<(), DeviceError> {
        info!("[display] clear");
        Ok(())
    }
}
