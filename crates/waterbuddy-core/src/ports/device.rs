//! DisplayDevice port - the display/buzzer peripheral
//!
//! Every call blocks until the physical effect completes. The device has no
//! locking of its own: callers must never overlap two calls. The display
//! sequencer guarantees this by running one task at a time.

use crate::domain::{ChimeCode, DeviceError, Frame, Rgb};

pub trait DisplayDevice: Send + Sync {
    /// Scroll `text` across the matrix.
    fn show_message(&self, text: &str) -> Result<(), DeviceError>;

    /// Fill the matrix with `color` for a moment.
    fn flash(&self, color: Rgb) -> Result<(), DeviceError>;

    /// Play a buzzer chime. Unknown codes fall back to silence.
    fn play_chime(&self, chime: &ChimeCode) -> Result<(), DeviceError>;

    /// Draw one full frame.
    fn draw_frame(&self, frame: &Frame) -> Result<(), DeviceError>;

    /// Turn every pixel off. Animations call this when they end.
    fn clear(&self) -> Result<(), DeviceError>;
}
