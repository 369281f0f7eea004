//! Mask-driven compositing of a color grid over its grayscale twin.

use crate::Mask;
use image::RgbImage;

/// Keep `original` where `mask` is set and take `grayscale` elsewhere.
///
/// # Panics
/// When the three inputs do not share the same dimensions.
pub fn composite(original: &RgbImage, grayscale: &RgbImage, mask: &Mask) -> RgbImage {
    assert_eq!(
        original.dimensions(),
        grayscale.dimensions(),
        "original and grayscale grids differ in size"
    );
    assert_eq!(
        original.dimensions(),
        mask.dimensions(),
        "mask does not match the image size"
    );

    let mut output = grayscale.clone();
    for ((out, src), &keep) in output
        .pixels_mut()
        .zip(original.pixels())
        .zip(mask.as_slice())
    {
        if keep {
            *out = *src;
        }
    }

    output
}
