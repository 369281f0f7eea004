//! Decoding input bytes to RGB grids and encoding results.

use crate::{ColorError, ColorResult};
use image::{
    DynamicImage, ImageDecoder, ImageReader, RgbImage,
    codecs::{jpeg::JpegEncoder, png::PngEncoder},
};
use serde::{Deserialize, Serialize};
use std::{
    io::{BufRead, Cursor, Seek},
    path::Path,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Jpeg,
    Png,
}

impl OutputFormat {
    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "image/jpeg",
            OutputFormat::Png => "image/png",
        }
    }
}

pub fn decode_bytes(bytes: &[u8]) -> ColorResult<RgbImage> {
    if bytes.is_empty() {
        return Err(ColorError::Decode("no image data".to_string()));
    }

    decode_upright(ImageReader::new(Cursor::new(bytes)).with_guessed_format()?)
}

/// Decode a file, sniffing the format from its content rather than its name.
pub fn decode_file(path: impl AsRef<Path>) -> ColorResult<RgbImage> {
    decode_upright(ImageReader::open(path.as_ref())?.with_guessed_format()?)
}

/// Decode and rotate/flip the pixels as the EXIF orientation tag says, so
/// phone photos come out the way they were taken.
fn decode_upright<R: BufRead + Seek>(reader: ImageReader<R>) -> ColorResult<RgbImage> {
    let mut decoder = reader.into_decoder()?;
    let orientation = decoder.orientation()?;

    let mut image = DynamicImage::from_decoder(decoder)?;
    image.apply_orientation(orientation);

    Ok(image.to_rgb8())
}

/// Encode to a complete in-memory file. Nothing is returned on failure.
pub fn encode(image: &RgbImage, format: OutputFormat, jpeg_quality: u8) -> ColorResult<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());

    let result = match format {
        OutputFormat::Jpeg => {
            image.write_with_encoder(JpegEncoder::new_with_quality(&mut buf, jpeg_quality.clamp(1, 100)))
        }
        OutputFormat::Png => image.write_with_encoder(PngEncoder::new(&mut buf)),
    };

    result.map_err(|e| ColorError::InternalProcessing(format!("encode {format:?} failed: {e}")))?;
    Ok(buf.into_inner())
}
