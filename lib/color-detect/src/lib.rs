//! Color detection and selective-color highlighting for colorblind assistance.
//!
//! - **Color space conversion** ([`colour_space`]): RGB -> 8-bit HSV, RGB -> replicated grayscale
//! - **Palette** ([`palette`]): the fixed color names and their HSV ranges
//! - **Sampling** ([`sampler`]): center window extraction and channel averages
//! - **Classification** ([`classifier`]): averaged HSV -> color label
//! - **Masking** ([`mask`]): per-pixel membership in a highlight color
//! - **Compositing** ([`compositor`]): keep masked pixels, desaturate the rest
//! - **Use cases** ([`detection`], [`highlight`]): decode, run the core, encode

pub mod classifier;
pub mod codec;
pub mod colour_space;
pub mod compositor;
pub mod detection;
pub mod highlight;
pub mod mask;
pub mod palette;
pub mod sampler;

pub use classifier::{ColorLabel, classify};
pub use codec::{OutputFormat, decode_bytes, decode_file, encode};
pub use colour_space::{HsvImage, rgb_to_gray, rgb_to_hsv, to_grayscale_replicated, to_hsv};
pub use compositor::composite;
pub use detection::{ClassificationResult, DetectionConfig, DetectionReport, SampleGeometry};
pub use highlight::{HighlightConfig, parse_highlight_color};
pub use mask::{Mask, build_mask};
pub use palette::{ColorDefinition, ColorName, ColorRange, HIGHLIGHT_PALETTE, PALETTE};
pub use sampler::{DEFAULT_MARGIN, SampleWindow, Triplet, channel_mean, extract_window, sample};

pub type ColorResult<T> = Result<T, ColorError>;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    #[error("Decode image failed: {0}")]
    Decode(String),
    #[error("Empty sample: {0}")]
    EmptySample(String),
    #[error("Unsupported color: {0}")]
    UnsupportedColor(String),
    #[error("Internal processing error: {0}")]
    InternalProcessing(String),
}

impl From<image::ImageError> for ColorError {
    fn from(e: image::ImageError) -> Self {
        // IoError here means the stream ended early, i.e. truncated input.
        match e {
            image::ImageError::Decoding(_)
            | image::ImageError::Unsupported(_)
            | image::ImageError::Limits(_)
            | image::ImageError::IoError(_) => ColorError::Decode(e.to_string()),
            _ => ColorError::InternalProcessing(e.to_string()),
        }
    }
}

impl From<std::io::Error> for ColorError {
    fn from(e: std::io::Error) -> Self {
        ColorError::InternalProcessing(format!("io: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{
        ImageError,
        error::{LimitError, LimitErrorKind, ParameterError, ParameterErrorKind},
    };

    #[test]
    fn test_image_error_mapping() {
        let limits = ImageError::Limits(LimitError::from_kind(LimitErrorKind::DimensionError));
        assert!(matches!(ColorError::from(limits), ColorError::Decode(_)));

        let truncated = ImageError::IoError(std::io::ErrorKind::UnexpectedEof.into());
        assert!(matches!(ColorError::from(truncated), ColorError::Decode(_)));

        let parameter = ImageError::Parameter(ParameterError::from_kind(
            ParameterErrorKind::DimensionMismatch,
        ));
        assert!(matches!(
            ColorError::from(parameter),
            ColorError::InternalProcessing(_)
        ));
    }
}
