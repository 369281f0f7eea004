//! Averaged HSV -> color label.
//!
//! Rules are evaluated in order and the first match wins:
//!
//! 1. `v < 30` is black
//! 2. `s < 25 && v > 200` is white
//! 3. `s < 50 && 50 < v < 200` is gray
//! 4. hue lookup over the chromatic palette entries, in palette order
//! 5. anything left is [`ColorLabel::Unknown`]
//!
//! Achromatic rules come first and the hue table is scanned in order, so a
//! hue of exactly 170 is red and not pink.

use crate::palette::{ColorName, PALETTE};
use serde::{Serialize, Serializer};
use std::fmt;

const BLACK_MAX_VALUE: f32 = 30.0;
const WHITE_MAX_SATURATION: f32 = 25.0;
const WHITE_MIN_VALUE: f32 = 200.0;
const GRAY_MAX_SATURATION: f32 = 50.0;
const GRAY_VALUE_BOUNDS: (f32, f32) = (50.0, 200.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorLabel {
    Known(ColorName),
    /// Hue falls in a gap between chromatic ranges (31-39, 91-99, ...).
    Unknown,
}

impl ColorLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorLabel::Known(name) => name.as_str(),
            ColorLabel::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ColorLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ColorLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Classify an averaged HSV triplet in device units.
pub fn classify(h: f32, s: f32, v: f32) -> ColorLabel {
    if v < BLACK_MAX_VALUE {
        return ColorLabel::Known(ColorName::Black);
    }

    if s < WHITE_MAX_SATURATION && v > WHITE_MIN_VALUE {
        return ColorLabel::Known(ColorName::White);
    }

    if s < GRAY_MAX_SATURATION && v > GRAY_VALUE_BOUNDS.0 && v < GRAY_VALUE_BOUNDS.1 {
        return ColorLabel::Known(ColorName::Gray);
    }

    PALETTE
        .iter()
        .filter(|def| def.name.is_chromatic())
        .find(|def| def.contains_hue(h))
        .map_or(ColorLabel::Unknown, |def| ColorLabel::Known(def.name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(h: f32, s: f32, v: f32) -> &'static str {
        classify(h, s, v).as_str()
    }

    #[test]
    fn test_achromatic_first() {
        assert_eq!(label(5.0, 255.0, 0.0), "black");
        assert_eq!(label(5.0, 255.0, 29.9), "black");
        assert_eq!(label(120.0, 0.0, 255.0), "white");
        assert_eq!(label(120.0, 10.0, 128.0), "gray");
    }

    #[test]
    fn test_achromatic_boundaries() {
        // v == 30 is no longer black.
        assert_eq!(label(5.0, 200.0, 30.0), "red");
        // s == 25 is no longer white, but still gray-eligible only below v 200.
        assert_eq!(label(60.0, 25.0, 220.0), "green");
        // v == 200 is neither white (needs > 200) nor gray (needs < 200).
        assert_eq!(label(60.0, 10.0, 200.0), "green");
        assert_eq!(label(60.0, 10.0, 50.0), "green");
        assert_eq!(label(60.0, 49.9, 51.0), "gray");
    }

    #[test]
    fn test_hue_table() {
        assert_eq!(label(0.0, 200.0, 200.0), "red");
        assert_eq!(label(10.0, 200.0, 200.0), "red");
        assert_eq!(label(11.0, 200.0, 200.0), "orange");
        assert_eq!(label(20.0, 200.0, 200.0), "orange");
        assert_eq!(label(21.0, 200.0, 200.0), "yellow");
        assert_eq!(label(30.0, 200.0, 200.0), "yellow");
        assert_eq!(label(40.0, 200.0, 200.0), "green");
        assert_eq!(label(90.0, 200.0, 200.0), "green");
        assert_eq!(label(100.0, 200.0, 200.0), "blue");
        assert_eq!(label(130.0, 200.0, 200.0), "blue");
        assert_eq!(label(131.0, 200.0, 200.0), "purple");
        assert_eq!(label(160.0, 200.0, 200.0), "purple");
        assert_eq!(label(161.0, 200.0, 200.0), "pink");
        assert_eq!(label(180.0, 200.0, 200.0), "red");
    }

    #[test]
    fn test_red_pink_boundary() {
        assert_eq!(classify(170.0, 150.0, 150.0), ColorLabel::Known(ColorName::Red));
        assert_eq!(classify(169.0, 150.0, 150.0), ColorLabel::Known(ColorName::Pink));
    }

    #[test]
    fn test_gaps_are_unknown() {
        assert_eq!(classify(35.0, 200.0, 200.0), ColorLabel::Unknown);
        assert_eq!(classify(95.0, 200.0, 200.0), ColorLabel::Unknown);
        // Fractional averages between integer bounds fall through too.
        assert_eq!(classify(10.5, 200.0, 200.0), ColorLabel::Unknown);
    }

    #[test]
    fn test_classify_is_deterministic() {
        for h in (0..=180).step_by(7) {
            let first = classify(h as f32, 120.0, 180.0);
            for _ in 0..3 {
                assert_eq!(classify(h as f32, 120.0, 180.0), first);
            }
        }
    }

    #[test]
    fn test_label_serializes_as_string() {
        let json = serde_json::to_string(&ColorLabel::Unknown).unwrap();
        assert_eq!(json, "\"unknown\"");
        assert_eq!(ColorLabel::Known(ColorName::Pink).to_string(), "pink");
    }
}
