//! Colorblindness filter selection.
//!
//! The core only tracks *which* filter is active; applying the actual
//! color transform is entirely the renderer's job (in the original web
//! incarnation, an SVG filter referenced by name). The variants cover the
//! eight common color-vision deficiencies plus "none", ordered by how much
//! of the population each affects.

use std::str::FromStr;

/// A named colorblindness simulation filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Filter {
    #[default]
    None,
    Deuteranomaly,
    Protanomaly,
    Protanopia,
    Deuteranopia,
    Tritanopia,
    Tritanomaly,
    Achromatopsia,
    Achromatomaly,
}

impl Filter {
    /// Every filter, in display order.
    pub const ALL: [Self; 9] = [
        Self::None,
        Self::Deuteranomaly,
        Self::Protanomaly,
        Self::Protanopia,
        Self::Deuteranopia,
        Self::Tritanopia,
        Self::Tritanomaly,
        Self::Achromatopsia,
        Self::Achromatomaly,
    ];

    /// The filter's wire name (what a renderer keys its transform on).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Deuteranomaly => "deuteranomaly",
            Self::Protanomaly => "protanomaly",
            Self::Protanopia => "protanopia",
            Self::Deuteranopia => "deuteranopia",
            Self::Tritanopia => "tritanopia",
            Self::Tritanomaly => "tritanomaly",
            Self::Achromatopsia => "achromatopsia",
            Self::Achromatomaly => "achromatomaly",
        }
    }

    /// Approximate share of the population with this vision type, for
    /// display next to the selector.
    #[must_use]
    pub const fn population(self) -> &'static str {
        match self {
            Self::None => "92%",
            Self::Deuteranomaly => "2.7%",
            Self::Protanomaly => "0.66%",
            Self::Protanopia => "0.59%",
            Self::Deuteranopia => "0.56%",
            Self::Tritanopia => "0.016%",
            Self::Tritanomaly => "0.01%",
            Self::Achromatopsia => "<0.0001%",
            Self::Achromatomaly => "Unknown %",
        }
    }
}

impl FromStr for Filter {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
