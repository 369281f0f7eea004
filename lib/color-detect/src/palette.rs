//! Fixed color palette
//!
//! The ten color names the classifier knows, their HSV ranges, and the
//! three-color subset that can be highlighted. All tables are `static` and
//! never change after compilation.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorName {
    #[serde(alias = "rojo")]
    Red,
    #[serde(alias = "naranja")]
    Orange,
    #[serde(alias = "amarillo")]
    Yellow,
    #[serde(alias = "verde")]
    Green,
    #[serde(alias = "azul")]
    Blue,
    #[serde(alias = "morado")]
    Purple,
    #[serde(alias = "rosa")]
    Pink,
    #[serde(alias = "blanco")]
    White,
    #[serde(alias = "negro")]
    Black,
    #[serde(alias = "gris")]
    Gray,
}

impl ColorName {
    /// Palette order.
    pub const ALL: [ColorName; 10] = [
        ColorName::Red,
        ColorName::Orange,
        ColorName::Yellow,
        ColorName::Green,
        ColorName::Blue,
        ColorName::Purple,
        ColorName::Pink,
        ColorName::White,
        ColorName::Black,
        ColorName::Gray,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ColorName::Red => "red",
            ColorName::Orange => "orange",
            ColorName::Yellow => "yellow",
            ColorName::Green => "green",
            ColorName::Blue => "blue",
            ColorName::Purple => "purple",
            ColorName::Pink => "pink",
            ColorName::White => "white",
            ColorName::Black => "black",
            ColorName::Gray => "gray",
        }
    }

    /// Spanish name accepted as an alias on input.
    pub fn alias(&self) -> &'static str {
        match self {
            ColorName::Red => "rojo",
            ColorName::Orange => "naranja",
            ColorName::Yellow => "amarillo",
            ColorName::Green => "verde",
            ColorName::Blue => "azul",
            ColorName::Purple => "morado",
            ColorName::Pink => "rosa",
            ColorName::White => "blanco",
            ColorName::Black => "negro",
            ColorName::Gray => "gris",
        }
    }

    pub fn is_chromatic(&self) -> bool {
        !matches!(self, ColorName::White | ColorName::Black | ColorName::Gray)
    }
}

impl fmt::Display for ColorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColorName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        ColorName::ALL
            .into_iter()
            .find(|c| c.as_str() == name || c.alias() == name || (name == "grey" && *c == ColorName::Gray))
            .ok_or_else(|| format!("unknown color name `{}`", s.trim()))
    }
}

/// Closed HSV interval in device units, `lower[i] <= hsv[i] <= upper[i]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorRange {
    pub lower: [u8; 3],
    pub upper: [u8; 3],
}

impl ColorRange {
    pub const fn new(lower: [u8; 3], upper: [u8; 3]) -> Self {
        Self { lower, upper }
    }

    pub fn contains(&self, hsv: [u8; 3]) -> bool {
        (0..3).all(|i| self.lower[i] <= hsv[i] && hsv[i] <= self.upper[i])
    }

    pub fn contains_hue(&self, hue: f32) -> bool {
        self.lower[0] as f32 <= hue && hue <= self.upper[0] as f32
    }
}

/// A named color and the ranges it covers. More than one range expresses
/// hue wraparound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorDefinition {
    pub name: ColorName,
    pub ranges: &'static [ColorRange],
}

impl ColorDefinition {
    pub fn contains(&self, hsv: [u8; 3]) -> bool {
        self.ranges.iter().any(|range| range.contains(hsv))
    }

    pub fn contains_hue(&self, hue: f32) -> bool {
        self.ranges.iter().any(|range| range.contains_hue(hue))
    }
}

const RED: &[ColorRange] = &[
    ColorRange::new([0, 100, 100], [10, 255, 255]),
    ColorRange::new([170, 100, 100], [180, 255, 255]),
];
const GREEN: &[ColorRange] = &[ColorRange::new([40, 50, 50], [90, 255, 255])];

/// Every color the classifier can name, in palette order.
pub static PALETTE: [ColorDefinition; 10] = [
    ColorDefinition {
        name: ColorName::Red,
        ranges: RED,
    },
    ColorDefinition {
        name: ColorName::Orange,
        ranges: &[ColorRange::new([11, 100, 100], [20, 255, 255])],
    },
    ColorDefinition {
        name: ColorName::Yellow,
        ranges: &[ColorRange::new([21, 100, 100], [30, 255, 255])],
    },
    ColorDefinition {
        name: ColorName::Green,
        ranges: GREEN,
    },
    ColorDefinition {
        name: ColorName::Blue,
        ranges: &[ColorRange::new([100, 50, 50], [130, 255, 255])],
    },
    ColorDefinition {
        name: ColorName::Purple,
        ranges: &[ColorRange::new([131, 50, 50], [160, 255, 255])],
    },
    ColorDefinition {
        name: ColorName::Pink,
        ranges: &[ColorRange::new([161, 50, 50], [169, 255, 255])],
    },
    ColorDefinition {
        name: ColorName::White,
        ranges: &[ColorRange::new([0, 0, 200], [180, 50, 255])],
    },
    ColorDefinition {
        name: ColorName::Black,
        ranges: &[ColorRange::new([0, 0, 0], [180, 255, 50])],
    },
    ColorDefinition {
        name: ColorName::Gray,
        ranges: &[ColorRange::new([0, 0, 50], [180, 50, 200])],
    },
];

/// Colors that can be highlighted. Blue is wider here than in [`PALETTE`].
pub static HIGHLIGHT_PALETTE: [ColorDefinition; 3] = [
    ColorDefinition {
        name: ColorName::Red,
        ranges: RED,
    },
    ColorDefinition {
        name: ColorName::Green,
        ranges: GREEN,
    },
    ColorDefinition {
        name: ColorName::Blue,
        ranges: &[ColorRange::new([100, 50, 50], [140, 255, 255])],
    },
];

pub fn definition(name: ColorName) -> &'static ColorDefinition {
    PALETTE
        .iter()
        .find(|d| d.name == name)
        .unwrap_or_else(|| unreachable!("{name} is missing from the palette"))
}

pub fn highlight_definition(name: ColorName) -> Option<&'static ColorDefinition> {
    HIGHLIGHT_PALETTE.iter().find(|d| d.name == name)
}

pub fn palette_names() -> Vec<&'static str> {
    PALETTE.iter().map(|d| d.name.as_str()).collect()
}

pub fn highlight_names() -> Vec<&'static str> {
    HIGHLIGHT_PALETTE.iter().map(|d| d.name.as_str()).collect()
}
