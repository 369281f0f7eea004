//! Selective-color highlighting: keep one color, desaturate everything else.

use crate::{
    ColorError, ColorName, ColorResult, OutputFormat, build_mask, codec, composite,
    palette::highlight_names, to_grayscale_replicated, to_hsv,
};
use derivative::Derivative;
use derive_setters::Setters;
use image::RgbImage;
use std::path::Path;

#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct HighlightConfig {
    #[derivative(Default(value = "ColorName::Red"))]
    color: ColorName,

    #[derivative(Default(value = "OutputFormat::Jpeg"))]
    output_format: OutputFormat,

    #[derivative(Default(value = "90"))]
    jpeg_quality: u8,
}

/// Parse a user-supplied highlight color.
///
/// Accepts the English names and their Spanish aliases, case-insensitive.
/// Palette colors outside the highlight subset are rejected the same way as
/// unknown names.
pub fn parse_highlight_color(name: &str) -> ColorResult<ColorName> {
    let unsupported = || {
        ColorError::UnsupportedColor(format!(
            "`{}` is not one of {:?}",
            name.trim(),
            highlight_names()
        ))
    };

    let color = name.parse::<ColorName>().map_err(|_| unsupported())?;
    if crate::palette::highlight_definition(color).is_none() {
        return Err(unsupported());
    }

    Ok(color)
}

impl HighlightConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn color(&self) -> ColorName {
        self.color
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output_format
    }

    pub fn jpeg_quality(&self) -> u8 {
        self.jpeg_quality
    }

    /// Composite `image` so only pixels of the configured color keep their
    /// color.
    pub fn highlight_image(&self, image: &RgbImage) -> ColorResult<RgbImage> {
        let hsv = to_hsv(image)?;
        let mask = build_mask(&hsv, self.color)?;
        let gray = to_grayscale_replicated(image)?;

        Ok(composite(image, &gray, &mask))
    }

    pub fn highlight_bytes(&self, bytes: &[u8]) -> ColorResult<Vec<u8>> {
        self.encode(&self.highlight_image(&codec::decode_bytes(bytes)?)?)
    }

    pub fn highlight_file(&self, path: impl AsRef<Path>) -> ColorResult<Vec<u8>> {
        self.encode(&self.highlight_image(&codec::decode_file(path)?)?)
    }

    fn encode(&self, image: &RgbImage) -> ColorResult<Vec<u8>> {
        let bytes = codec::encode(image, self.output_format, self.jpeg_quality)?;
        log::debug!(
            "highlighted {} in {}x{} image, {} bytes of {:?}",
            self.color,
            image.width(),
            image.height(),
            bytes.len(),
            self.output_format
        );

        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_parse_highlight_color() {
        assert_eq!(parse_highlight_color("red"), Ok(ColorName::Red));
        assert_eq!(parse_highlight_color("Rojo"), Ok(ColorName::Red));
        assert_eq!(parse_highlight_color("verde"), Ok(ColorName::Green));
        assert_eq!(parse_highlight_color(" BLUE "), Ok(ColorName::Blue));
        assert!(matches!(
            parse_highlight_color("purple"),
            Err(ColorError::UnsupportedColor(_))
        ));
        assert!(matches!(
            parse_highlight_color("chartreuse"),
            Err(ColorError::UnsupportedColor(_))
        ));
    }

    #[test]
    fn test_keeps_only_target_color() {
        // Red, green, blue and white columns.
        let image = RgbImage::from_fn(4, 2, |x, _| match x {
            0 => Rgb([220, 20, 20]),
            1 => Rgb([20, 220, 20]),
            2 => Rgb([20, 20, 220]),
            _ => Rgb([255, 255, 255]),
        });

        let output = HighlightConfig::new()
            .with_color(ColorName::Green)
            .highlight_image(&image)
            .unwrap();

        assert_eq!(output.get_pixel(1, 0), image.get_pixel(1, 0));
        for x in [0, 2, 3] {
            let pixel = output.get_pixel(x, 1);
            assert_eq!(pixel[0], pixel[1], "column {x} not gray");
            assert_eq!(pixel[1], pixel[2], "column {x} not gray");
        }
    }

    #[test]
    fn test_defaults() {
        let config = HighlightConfig::new();
        assert_eq!(config.color(), ColorName::Red);
        assert_eq!(config.output_format(), OutputFormat::Jpeg);
        assert_eq!(config.jpeg_quality(), 90);
    }

    #[test]
    fn test_unsupported_color_yields_no_image() {
        let image = RgbImage::from_pixel(4, 4, Rgb([128, 0, 128]));
        let result = HighlightConfig::new()
            .with_color(ColorName::Purple)
            .highlight_image(&image);

        assert!(matches!(result, Err(ColorError::UnsupportedColor(_))));
    }
}
