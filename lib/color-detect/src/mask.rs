//! Highlight-color masks over an HSV grid.

use crate::{
    ColorError, ColorResult, HsvImage,
    palette::{self, ColorName},
};

/// Boolean grid, row-major, one entry per pixel of its source grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    bits: Vec<bool>,
}

impl Mask {
    pub fn filled(width: u32, height: u32, value: bool) -> Self {
        Self {
            width,
            height,
            bits: vec![value; width as usize * height as usize],
        }
    }

    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> bool) -> Self {
        let bits = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .map(|(x, y)| f(x, y))
            .collect();

        Self {
            width,
            height,
            bits,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn get(&self, x: u32, y: u32) -> bool {
        assert!(x < self.width && y < self.height, "({x}, {y}) outside mask");
        self.bits[y as usize * self.width as usize + x as usize]
    }

    /// Number of set positions.
    pub fn count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.bits
    }
}

/// Mark every pixel that falls inside one of `color`'s highlight ranges.
///
/// Only the highlight subset (red, green, blue) is accepted.
pub fn build_mask(hsv: &HsvImage, color: ColorName) -> ColorResult<Mask> {
    let definition = palette::highlight_definition(color).ok_or_else(|| {
        ColorError::UnsupportedColor(format!(
            "`{color}` cannot be highlighted, expected one of {:?}",
            palette::highlight_names()
        ))
    })?;

    let (width, height) = hsv.dimensions();
    let bits = hsv.pixels().map(|pixel| definition.contains(pixel)).collect();
    let mask = Mask {
        width,
        height,
        bits,
    };

    log::debug!(
        "{color} mask: {} of {} pixels",
        mask.count(),
        width as u64 * height as u64
    );

    Ok(mask)
}
