//! The candidate-color palette — an ordered, mutable collection.
//!
//! Order is purely presentational (it controls where a swatch appears in a
//! UI); the generator samples uniformly regardless of position. Colors are
//! copied by value into combinations, so editing or removing a palette
//! entry never disturbs combinations already sitting in history.

use hue_color::Color;

/// The fixed baseline the palette resets to: black, white, and two accents.
pub const DEFAULT_COLORS: [Color; 4] = [
    Color::BLACK,
    Color::WHITE,
    Color::rgb(0x2c, 0x7c, 0xb0),
    Color::rgb(0x75, 0x75, 0x75),
];

/// An ordered sequence of candidate colors. Duplicates are permitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    /// A palette seeded with the default baseline colors.
    #[must_use]
    pub fn new() -> Self {
        Self {
            colors: DEFAULT_COLORS.to_vec(),
        }
    }

    /// A palette with the given colors, in the given order.
    #[must_use]
    pub const fn from_colors(colors: Vec<Color>) -> Self {
        Self { colors }
    }

    /// Append a color at the end.
    pub fn add(&mut self, color: Color) {
        self.colors.push(color);
    }

    /// Remove the color at `index`, shifting later entries down.
    ///
    /// Returns the removed color, or `None` if `index` is out of bounds
    /// (the palette is left unchanged).
    pub fn remove_at(&mut self, index: usize) -> Option<Color> {
        if index < self.colors.len() {
            Some(self.colors.remove(index))
        } else {
            None
        }
    }

    /// Replace the color at `index` in place, preserving position.
    ///
    /// Returns `false` (palette unchanged) if `index` is out of bounds.
    pub fn replace_at(&mut self, index: usize, color: Color) -> bool {
        if index < self.colors.len() {
            self.colors[index] = color;
            true
        } else {
            false
        }
    }

    /// Replace the entire contents with the default baseline.
    pub fn reset_to_default(&mut self) {
        self.colors.clear();
        self.colors.extend_from_slice(&DEFAULT_COLORS);
    }

    /// Replace the entire contents with an imported color sequence.
    ///
    /// An empty import is ignored and the current palette kept — the rest
    /// of the system requires a non-empty palette to generate from.
    /// Returns whether the import was applied.
    pub fn reset_to(&mut self, colors: Vec<Color>) -> bool {
        if colors.is_empty() {
            return false;
        }
        self.colors = colors;
        true
    }

    /// The color at `index`, if in bounds.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Color> {
        self.colors.get(index).copied()
    }

    /// The colors in order.
    #[must_use]
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Number of colors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Whether the palette has no colors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
