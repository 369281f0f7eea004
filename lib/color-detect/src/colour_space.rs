//! Color space conversion
//!
//! Converts RGB grids to 8-bit device HSV and to a grayscale grid whose gray
//! value is replicated across all three channels.
//!
//! Device HSV units: hue in [0, 180] (degrees halved), saturation and value
//! in [0, 255].

use crate::{ColorError, ColorResult};
use image::{Rgb, RgbImage};

/// A pixel grid whose channels hold hue, saturation and value.
///
/// Kept apart from [`RgbImage`] so HSV samples are never handed to code
/// that expects RGB.
#[derive(Debug, Clone, PartialEq)]
pub struct HsvImage(RgbImage);

impl HsvImage {
    /// Wrap raw `[h, s, v, h, s, v, ...]` samples, row-major.
    pub fn from_raw(width: u32, height: u32, samples: Vec<u8>) -> Option<Self> {
        RgbImage::from_raw(width, height, samples).map(Self)
    }

    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> [u8; 3]) -> Self {
        Self(RgbImage::from_fn(width, height, |x, y| Rgb(f(x, y))))
    }

    pub fn width(&self) -> u32 {
        self.0.width()
    }

    pub fn height(&self) -> u32 {
        self.0.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.0.dimensions()
    }

    /// Pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = [u8; 3]> + '_ {
        self.0.pixels().map(|p| p.0)
    }

    /// The underlying three-channel buffer, for channel-agnostic operations
    /// such as averaging.
    pub fn as_channels(&self) -> &RgbImage {
        &self.0
    }
}

#[inline]
fn round_half_up(value: f32) -> f32 {
    (value + 0.5).floor()
}

/// Convert one RGB sample to device HSV.
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> [u8; 3] {
    let (r, g, b) = (r as i32, g as i32, b as i32);
    let v = r.max(g).max(b);
    let diff = v - r.min(g).min(b);

    let s = if v == 0 {
        0.0
    } else {
        round_half_up(255.0 * diff as f32 / v as f32)
    };

    let h = if diff == 0 {
        0.0
    } else {
        // Each sextant spans 30 device units.
        let x = if v == r {
            g - b
        } else if v == g {
            2 * diff + b - r
        } else {
            4 * diff + r - g
        };

        let h = round_half_up(30.0 * x as f32 / diff as f32);
        if h < 0.0 { h + 180.0 } else { h }
    };

    [h as u8, s as u8, v as u8]
}

/// Convert RGB to a gray level using ITU-R BT.601 luma weights.
#[inline]
pub fn rgb_to_gray(r: u8, g: u8, b: u8) -> u8 {
    (0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32)
        .round()
        .clamp(0.0, 255.0) as u8
}

fn ensure_not_empty(image: &RgbImage) -> ColorResult<()> {
    if image.width() == 0 || image.height() == 0 {
        return Err(ColorError::InternalProcessing(format!(
            "cannot convert an empty {}x{} image",
            image.width(),
            image.height()
        )));
    }

    Ok(())
}

/// Convert a whole RGB grid to device HSV.
pub fn to_hsv(image: &RgbImage) -> ColorResult<HsvImage> {
    ensure_not_empty(image)?;

    let mut hsv = image.clone();
    for pixel in hsv.pixels_mut() {
        let [r, g, b] = pixel.0;
        pixel.0 = rgb_to_hsv(r, g, b);
    }

    Ok(HsvImage(hsv))
}

/// Convert an RGB grid to grayscale, replicating the gray level into all
/// three channels so the result can be composited with the color grid.
pub fn to_grayscale_replicated(image: &RgbImage) -> ColorResult<RgbImage> {
    ensure_not_empty(image)?;

    let mut gray = image.clone();
    for pixel in gray.pixels_mut() {
        let [r, g, b] = pixel.0;
        let level = rgb_to_gray(r, g, b);
        pixel.0 = [level, level, level];
    }

    Ok(gray)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_hues() {
        assert_eq!(rgb_to_hsv(255, 0, 0), [0, 255, 255]);
        assert_eq!(rgb_to_hsv(255, 255, 0), [30, 255, 255]);
        assert_eq!(rgb_to_hsv(0, 255, 0), [60, 255, 255]);
        assert_eq!(rgb_to_hsv(0, 255, 255), [90, 255, 255]);
        assert_eq!(rgb_to_hsv(0, 0, 255), [120, 255, 255]);
        assert_eq!(rgb_to_hsv(255, 0, 255), [150, 255, 255]);
    }

    #[test]
    fn test_hue_wraps_below_zero() {
        // Red with a little blue lands at the top of the hue circle.
        let [h, _, _] = rgb_to_hsv(255, 0, 20);
        assert!(h > 170 && h <= 180, "hue {h}");
    }

    #[test]
    fn test_achromatic() {
        assert_eq!(rgb_to_hsv(0, 0, 0), [0, 0, 0]);
        assert_eq!(rgb_to_hsv(255, 255, 255), [0, 0, 255]);
        assert_eq!(rgb_to_hsv(128, 128, 128), [0, 0, 128]);
    }

    #[test]
    fn test_half_saturation() {
        let [_, s, v] = rgb_to_hsv(200, 100, 100);
        assert_eq!(v, 200);
        assert_eq!(s, 128);
    }

    #[test]
    fn test_gray_levels() {
        assert_eq!(rgb_to_gray(0, 0, 0), 0);
        assert_eq!(rgb_to_gray(255, 255, 255), 255);
        assert_eq!(rgb_to_gray(255, 0, 0), 76);
        assert_eq!(rgb_to_gray(0, 255, 0), 150);
        assert_eq!(rgb_to_gray(0, 0, 255), 29);
    }

    #[test]
    fn test_grayscale_replicated() {
        let image = RgbImage::from_fn(3, 2, |x, y| Rgb([(x * 80) as u8, (y * 100) as u8, 40]));
        let gray = to_grayscale_replicated(&image).unwrap();

        assert_eq!(gray.dimensions(), image.dimensions());
        for pixel in gray.pixels() {
            assert_eq!(pixel[0], pixel[1]);
            assert_eq!(pixel[1], pixel[2]);
        }
    }

    #[test]
    fn test_to_hsv_keeps_dimensions() {
        let image = RgbImage::from_pixel(4, 3, Rgb([0, 0, 255]));
        let hsv = to_hsv(&image).unwrap();

        assert_eq!(hsv.dimensions(), (4, 3));
        assert!(hsv.pixels().all(|p| p == [120, 255, 255]));
    }

    #[test]
    fn test_empty_image_is_rejected() {
        let image = RgbImage::new(0, 5);
        assert!(matches!(to_hsv(&image), Err(ColorError::InternalProcessing(_))));
        assert!(matches!(
            to_grayscale_replicated(&image),
            Err(ColorError::InternalProcessing(_))
        ));
    }
}
