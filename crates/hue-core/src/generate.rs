//! Constraint-guided random combination generation.
//!
//! The generator draws each unpinned role uniformly from the palette, then
//! checks one constraint: the text/background pair must reach the target
//! WCAG contrast ratio. Failing draws redo only the unpinned members of
//! that pair, up to a fixed attempt budget. When the budget runs out the
//! best-scoring attempt is returned with a diagnostic flag instead of an
//! error — a palette of four similar grays at a 7:1 target simply has no
//! satisfying pair, and serving a slightly-under-target combination beats
//! stalling the caller.

use std::time::{SystemTime, UNIX_EPOCH};

use hue_color::Color;
use hue_color::contrast::{Threshold, contrast_ratio};
use thiserror::Error;

use crate::combination::{Combination, PinMask, Role};
use crate::palette::Palette;

/// Redraw budget for the contrast search.
///
/// High enough that a satisfiable constraint is essentially always met
/// (each attempt is an independent uniform draw), low enough that an
/// unsatisfiable one returns promptly.
const MAX_ATTEMPTS: u32 = 50;

// ---------------------------------------------------------------------------
// Xorshift32 — a minimal deterministic PRNG
// ---------------------------------------------------------------------------

/// Minimal deterministic PRNG. No external `rand` crate needed, and a
/// fixed seed replays an entire generation sequence in tests.
struct Xorshift32 {
    state: u32,
}

impl Xorshift32 {
    const fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    const fn next(&mut self) -> u32 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 17;
        self.state ^= self.state << 5;
        self.state
    }

    /// Pick a random element from a non-empty slice.
    fn pick<T: Copy>(&mut self, slice: &[T]) -> T {
        let idx = (self.next() as usize) % slice.len();
        slice[idx]
    }
}

// ---------------------------------------------------------------------------
// Errors and results
// ---------------------------------------------------------------------------

/// Generation cannot proceed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GenerateError {
    /// The palette has no colors to draw from. The caller must supply a
    /// non-empty palette — silently inventing a color would hide the
    /// problem from whoever emptied it.
    #[error("cannot generate a combination from an empty palette")]
    EmptyPalette,
}

/// A generated combination plus diagnostics about the search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Generated {
    /// The combination to display.
    pub combination: Combination,
    /// Contrast ratio of the text/background pair.
    pub ratio: f64,
    /// Whether `ratio` reached the requested threshold. `false` means the
    /// attempt budget ran out and this is the best-scoring draw observed.
    pub met_threshold: bool,
}

// ---------------------------------------------------------------------------
// BackgroundMode
// ---------------------------------------------------------------------------

/// Presentation override for the page background role.
///
/// Applied after the constraint search — it swaps `parent_bg` for display
/// without participating in (or re-triggering) contrast checking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackgroundMode {
    /// Keep whatever the palette draw produced.
    #[default]
    Palette,
    /// Force pure white.
    White,
    /// Force pure black.
    Black,
}

impl BackgroundMode {
    /// Apply this mode to a combination's `parent_bg`.
    #[must_use]
    pub const fn apply(self, combination: Combination) -> Combination {
        match self {
            Self::Palette => combination,
            Self::White => combination.with_role(Role::ParentBg, Color::WHITE),
            Self::Black => combination.with_role(Role::ParentBg, Color::BLACK),
        }
    }
}

// ---------------------------------------------------------------------------
// Generator
// ---------------------------------------------------------------------------

/// Combination generator: owns the random source, nothing else.
///
/// Palette, pins, previous combination, and threshold all arrive as
/// explicit arguments so generation stays a pure function of its inputs
/// plus the seeded PRNG state.
pub struct Generator {
    rng: Xorshift32,
}

impl Generator {
    /// A generator with a fixed seed. Identical seeds replay identical
    /// draw sequences.
    #[must_use]
    pub const fn new(seed: u32) -> Self {
        Self {
            rng: Xorshift32::new(seed),
        }
    }

    /// A generator seeded from the system clock.
    #[must_use]
    pub fn from_entropy() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.subsec_nanos());
        Self::new(nanos ^ 0x9e37_79b9)
    }

    /// Generate a new combination.
    ///
    /// Roles pinned in `pins` are copied from `previous`; with no previous
    /// combination a pin has nothing to copy and the role is drawn fresh.
    /// Only the `color`/`bg` pair is contrast-constrained; `parent_bg` and
    /// `border_color` are decorative.
    ///
    /// # Errors
    ///
    /// [`GenerateError::EmptyPalette`] if the palette has no colors.
    pub fn generate(
        &mut self,
        palette: &Palette,
        pins: PinMask,
        previous: Option<&Combination>,
        threshold: Threshold,
    ) -> Result<Generated, GenerateError> {
        if palette.is_empty() {
            return Err(GenerateError::EmptyPalette);
        }
        let colors = palette.colors();

        // A role is held only when it's pinned AND there's a previous
        // combination to hold it from.
        let held = |role: Role| -> Option<Color> {
            previous
                .filter(|_| pins.is_pinned(role))
                .map(|prev| prev.role(role))
        };

        let parent_bg = held(Role::ParentBg).unwrap_or_else(|| self.rng.pick(colors));
        let border_color = held(Role::BorderColor).unwrap_or_else(|| self.rng.pick(colors));
        let pinned_color = held(Role::Color);
        let pinned_bg = held(Role::Bg);

        let mut best: Option<(Combination, f64)> = None;
        for _ in 0..MAX_ATTEMPTS {
            let color = pinned_color.unwrap_or_else(|| self.rng.pick(colors));
            let bg = pinned_bg.unwrap_or_else(|| self.rng.pick(colors));

            let candidate = Combination {
                parent_bg,
                bg,
                color,
                border_color,
            };
            let ratio = contrast_ratio(color, bg);

            if ratio >= threshold.ratio() {
                return Ok(Generated {
                    combination: candidate,
                    ratio,
                    met_threshold: true,
                });
            }
            if best.is_none_or(|(_, best_ratio)| ratio > best_ratio) {
                best = Some((candidate, ratio));
            }

            // Both pair members pinned: redrawing can't change the ratio.
            if pinned_color.is_some() && pinned_bg.is_some() {
                break;
            }
        }

        // Budget exhausted — serve the best draw seen rather than failing.
        let (combination, ratio) = best.unwrap_or_else(|| unreachable!("at least one attempt ran"));
        log::debug!(
            "contrast search gave up after {MAX_ATTEMPTS} attempts; best ratio {ratio:.2} \
             below target {:.1}",
            threshold.ratio()
        );
        Ok(Generated {
            combination,
            ratio,
            met_threshold: false,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn two_color_palette() -> Palette {
        Palette::from_colors(vec![Color::BLACK, Color::WHITE])
    }

    #[test]
    fn empty_palette_is_an_error() {
        let mut g = Generator::new(1);
        let empty = Palette::from_colors(Vec::new());
        let err = g
            .generate(&empty, PinMask::default(), None, Threshold::Aa)
            .unwrap_err();
        assert_eq!(err, GenerateError::EmptyPalette);
    }

    #[test]
    fn black_and_white_meets_aaa() {
        let mut g = Generator::new(42);
        let out = g
            .generate(&two_color_palette(), PinMask::default(), None, Threshold::Aaa)
            .unwrap();
        assert!(out.met_threshold);
        assert!(out.ratio >= 7.0);
        assert_ne!(out.combination.color, out.combination.bg);
    }

    #[test]
    fn every_role_comes_from_the_palette() {
        let mut g = Generator::new(7);
        let palette = Palette::new();
        let out = g
            .generate(&palette, PinMask::default(), None, Threshold::AaLarge)
            .unwrap();
        for role in Role::ALL {
            assert!(
                palette.colors().contains(&out.combination.role(role)),
                "{role:?} not drawn from palette"
            );
        }
    }

    #[test]
    fn single_color_palette_terminates_with_best_effort() {
        let gray = Color::rgb(117, 117, 117);
        let palette = Palette::from_colors(vec![gray]);
        let mut g = Generator::new(3);
        let out = g
            .generate(&palette, PinMask::default(), None, Threshold::Aaa)
            .unwrap();
        assert!(!out.met_threshold);
        assert!((out.ratio - 1.0).abs() < 1e-9);
        assert_eq!(out.combination.color, gray);
        assert_eq!(out.combination.bg, gray);
    }

    #[test]
    fn pinned_roles_copy_previous() {
        let prev = Combination {
            parent_bg: Color::rgb(1, 2, 3),
            bg: Color::WHITE,
            color: Color::BLACK,
            border_color: Color::rgb(9, 9, 9),
        };
        let pins = PinMask {
            parent_bg: true,
            bg: true,
            color: false,
            border_color: true,
        };
        let mut g = Generator::new(11);
        let out = g
            .generate(&two_color_palette(), pins, Some(&prev), Threshold::Aa)
            .unwrap();
        assert_eq!(out.combination.parent_bg, prev.parent_bg);
        assert_eq!(out.combination.bg, prev.bg);
        assert_eq!(out.combination.border_color, prev.border_color);
    }

    #[test]
    fn all_roles_pinned_reproduces_previous() {
        let prev = Combination {
            parent_bg: Color::WHITE,
            bg: Color::WHITE,
            color: Color::BLACK,
            border_color: Color::BLACK,
        };
        let pins = PinMask {
            parent_bg: true,
            bg: true,
            color: true,
            border_color: true,
        };
        let mut g = Generator::new(5);
        let out = g
            .generate(&two_color_palette(), pins, Some(&prev), Threshold::Aa)
            .unwrap();
        assert_eq!(out.combination, prev);
        assert!(out.met_threshold);
    }

    #[test]
    fn fully_pinned_unreadable_pair_reports_unmet() {
        // color == bg pinned: ratio is 1.0 and no redraw can help, but a
        // combination still comes back.
        let prev = Combination {
            parent_bg: Color::WHITE,
            bg: Color::BLACK,
            color: Color::BLACK,
            border_color: Color::WHITE,
        };
        let pins = PinMask {
            parent_bg: false,
            bg: true,
            color: true,
            border_color: false,
        };
        let mut g = Generator::new(13);
        let out = g
            .generate(&two_color_palette(), pins, Some(&prev), Threshold::Aa)
            .unwrap();
        assert!(!out.met_threshold);
        assert_eq!(out.combination.color, Color::BLACK);
        assert_eq!(out.combination.bg, Color::BLACK);
    }

    #[test]
    fn pins_without_previous_draw_fresh() {
        let pins = PinMask {
            parent_bg: true,
            bg: true,
            color: true,
            border_color: true,
        };
        let mut g = Generator::new(21);
        // Must not panic, and must produce palette colors.
        let out = g
            .generate(&two_color_palette(), pins, None, Threshold::AaLarge)
            .unwrap();
        for role in Role::ALL {
            assert!(two_color_palette().colors().contains(&out.combination.role(role)));
        }
    }

    #[test]
    fn deterministic_for_a_fixed_seed() {
        let palette = Palette::new();
        let mut a = Generator::new(99);
        let mut b = Generator::new(99);
        for _ in 0..10 {
            let ca = a.generate(&palette, PinMask::default(), None, Threshold::Aa).unwrap();
            let cb = b.generate(&palette, PinMask::default(), None, Threshold::Aa).unwrap();
            assert_eq!(ca.combination, cb.combination);
        }
    }

    #[test]
    fn generated_pair_always_meets_satisfiable_threshold() {
        // Black/white is in the palette, so AA is always satisfiable.
        let palette = Palette::new();
        let mut g = Generator::new(1234);
        for _ in 0..100 {
            let out = g
                .generate(&palette, PinMask::default(), None, Threshold::Aa)
                .unwrap();
            if out.met_threshold {
                assert!(out.ratio >= 4.5);
            }
        }
    }

    // ── BackgroundMode ──────────────────────────────────────────────

    #[test]
    fn background_mode_overrides_parent_bg_only() {
        let combo = Combination {
            parent_bg: Color::rgb(10, 20, 30),
            bg: Color::WHITE,
            color: Color::BLACK,
            border_color: Color::rgb(1, 1, 1),
        };
        assert_eq!(BackgroundMode::Palette.apply(combo), combo);
        assert_eq!(BackgroundMode::White.apply(combo).parent_bg, Color::WHITE);
        assert_eq!(BackgroundMode::Black.apply(combo).parent_bg, Color::BLACK);
        assert_eq!(BackgroundMode::Black.apply(combo).bg, combo.bg);
    }
}
