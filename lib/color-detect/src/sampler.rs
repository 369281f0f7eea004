//! Center-window sampling
//!
//! A small window around a point is averaged per channel so a single noisy
//! pixel does not decide the color.

use crate::{ColorError, ColorResult};
use image::{RgbImage, imageops};

/// Half-width of the sample window used by the detection path.
pub const DEFAULT_MARGIN: u32 = 5;

/// Per-channel mean of a three-channel grid.
pub type Triplet = [f32; 3];

/// Half-open pixel window `[x0, x1) x [y0, y1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleWindow {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
}

impl SampleWindow {
    /// Window `[c - margin, c + margin)` on both axes, clipped to the grid.
    ///
    /// Fails when the clipped window is empty, or when clipping had to cut
    /// the window because it reaches past the grid edge.
    pub fn centered(
        width: u32,
        height: u32,
        center_x: u32,
        center_y: u32,
        margin: u32,
    ) -> ColorResult<Self> {
        let (cx, cy, m) = (center_x as i64, center_y as i64, margin as i64);
        let requested = (cx - m, cy - m, cx + m, cy + m);

        let x0 = requested.0.clamp(0, width as i64);
        let y0 = requested.1.clamp(0, height as i64);
        let x1 = requested.2.clamp(0, width as i64);
        let y1 = requested.3.clamp(0, height as i64);

        if x1 <= x0 || y1 <= y0 {
            return Err(ColorError::EmptySample(format!(
                "window of margin {margin} around ({center_x}, {center_y}) is empty in a {width}x{height} image"
            )));
        }

        if (x0, y0, x1, y1) != requested {
            return Err(ColorError::EmptySample(format!(
                "window of margin {margin} around ({center_x}, {center_y}) reaches past a {width}x{height} image"
            )));
        }

        Ok(Self {
            x0: x0 as u32,
            y0: y0 as u32,
            x1: x1 as u32,
            y1: y1 as u32,
        })
    }

    pub fn width(&self) -> u32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> u32 {
        self.y1 - self.y0
    }

    pub fn area(&self) -> u64 {
        self.width() as u64 * self.height() as u64
    }
}

/// Copy out the window around `(center_x, center_y)`.
pub fn extract_window(
    image: &RgbImage,
    center_x: u32,
    center_y: u32,
    margin: u32,
) -> ColorResult<RgbImage> {
    let window = SampleWindow::centered(image.width(), image.height(), center_x, center_y, margin)?;

    Ok(imageops::crop_imm(image, window.x0, window.y0, window.width(), window.height()).to_image())
}

/// Arithmetic mean of each channel over the whole grid.
pub fn channel_mean(image: &RgbImage) -> ColorResult<Triplet> {
    let count = image.width() as u64 * image.height() as u64;
    if count == 0 {
        return Err(ColorError::EmptySample("no pixels to average".to_string()));
    }

    let mut sums = [0u64; 3];
    for pixel in image.pixels() {
        for (sum, &value) in sums.iter_mut().zip(pixel.0.iter()) {
            *sum += value as u64;
        }
    }

    Ok(sums.map(|sum| (sum as f64 / count as f64) as f32))
}

/// Mean of the window around `(center_x, center_y)`.
pub fn sample(image: &RgbImage, center_x: u32, center_y: u32, margin: u32) -> ColorResult<Triplet> {
    channel_mean(&extract_window(image, center_x, center_y, margin)?)
}
