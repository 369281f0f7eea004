//! Center-color detection: encoded bytes in, classified color out.

use crate::{
    ColorLabel, ColorResult, Triplet, channel_mean, classify, codec, extract_window, to_hsv,
    sampler::DEFAULT_MARGIN,
};
use derivative::Derivative;
use derive_setters::Setters;
use image::RgbImage;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct DetectionConfig {
    #[derivative(Default(value = "DEFAULT_MARGIN"))]
    margin: u32,
}

/// Where the sample was taken and how large the source image is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleGeometry {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationResult {
    pub label: ColorLabel,
    /// Mean of the per-pixel HSV values over the window, device units.
    pub hsv: Triplet,
    /// Mean RGB over the window.
    pub rgb: Triplet,
    pub geometry: SampleGeometry,
}

/// Wire form of a [`ClassificationResult`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionReport {
    pub color: String,
    pub rgb: String,
    pub hsv: String,
    pub coordinates: SampleGeometry,
    pub sample_rgb: String,
}

impl ClassificationResult {
    fn rgb_u8(&self) -> [u8; 3] {
        self.rgb.map(|c| c.clamp(0.0, 255.0) as u8)
    }

    pub fn rgb_string(&self) -> String {
        let [r, g, b] = self.rgb_u8();
        format!("rgb({r}, {g}, {b})")
    }

    pub fn hsv_string(&self) -> String {
        let [h, s, v] = self.hsv.map(|c| c as u32);
        format!("hsv({h}, {s}%, {v}%)")
    }

    /// `#rrggbb` swatch of the averaged color.
    pub fn swatch(&self) -> String {
        let [r, g, b] = self.rgb_u8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    pub fn report(&self) -> DetectionReport {
        DetectionReport {
            color: self.label.to_string(),
            rgb: self.rgb_string(),
            hsv: self.hsv_string(),
            coordinates: self.geometry,
            sample_rgb: self.swatch(),
        }
    }
}

impl DetectionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn margin(&self) -> u32 {
        self.margin
    }

    /// Classify the color at the center of `image`.
    pub fn detect_image(&self, image: &RgbImage) -> ColorResult<ClassificationResult> {
        let (width, height) = image.dimensions();
        let (x, y) = (width / 2, height / 2);

        let window = extract_window(image, x, y, self.margin)?;
        let rgb = channel_mean(&window)?;
        let hsv = channel_mean(to_hsv(&window)?.as_channels())?;
        let label = classify(hsv[0], hsv[1], hsv[2]);

        log::debug!(
            "center ({x}, {y}) of {width}x{height}: hsv {:.1} {:.1} {:.1} -> {label}",
            hsv[0],
            hsv[1],
            hsv[2]
        );

        Ok(ClassificationResult {
            label,
            hsv,
            rgb,
            geometry: SampleGeometry {
                x,
                y,
                width,
                height,
            },
        })
    }

    pub fn detect_bytes(&self, bytes: &[u8]) -> ColorResult<ClassificationResult> {
        self.detect_image(&codec::decode_bytes(bytes)?)
    }

    pub fn detect_file(&self, path: impl AsRef<Path>) -> ColorResult<ClassificationResult> {
        self.detect_image(&codec::decode_file(path)?)
    }
}
