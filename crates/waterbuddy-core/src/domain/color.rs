//! Colors and full-matrix frames for the 8x8 LED display.

use serde::{Deserialize, Serialize};

/// Width and height of the LED matrix.
pub const MATRIX_SIDE: usize = 8;
pub const MATRIX_PIXELS: usize = MATRIX_SIDE * MATRIX_SIDE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const OFF: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const RED: Rgb = Rgb::new(255, 0, 0);
    pub const GREEN: Rgb = Rgb::new(0, 255, 0);
    pub const BLUE: Rgb = Rgb::new(0, 0, 255);
    pub const WATER: Rgb = Rgb::new(0, 120, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// One full frame of pixels, row-major.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    pixels: Vec<Rgb>,
}

impl Frame {
    pub fn filled(color: Rgb) -> Self {
        Self {
            pixels: vec![color; MATRIX_PIXELS],
        }
    }

    /// Set one pixel; out-of-range coordinates are ignored.
    pub fn with_pixel(mut self, x: usize, y: usize, color: Rgb) -> Self {
        if x < MATRIX_SIDE && y < MATRIX_SIDE {
            self.pixels[y * MATRIX_SIDE + x] = color;
        }
        self
    }

    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }
}
