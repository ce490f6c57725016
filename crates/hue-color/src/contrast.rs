//! WCAG contrast math — relative luminance, contrast ratio, and tier
//! classification.
//!
//! This is the readability engine behind combination generation: the
//! generator only ever asks one question ("does this foreground/background
//! pair reach the target ratio?"), and the UI layers ask a second one
//! ("which compliance tier does this ratio land in?"). Both are answered
//! here with pure functions over [`Color`] values.

use crate::Color;

/// Linearize one 8-bit sRGB channel for luminance computation.
///
/// Uses the WCAG 2.x published constant (`0.03928`) rather than the
/// slightly different sRGB spec value — the difference is below the
/// precision that matters for any 8-bit input, and matching the published
/// formula keeps our ratios identical to every other WCAG checker.
fn srgb_to_linear(channel: u8) -> f64 {
    let v = f64::from(channel) / 255.0;
    if v <= 0.03928 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

/// Compute the relative luminance of a color per WCAG 2.1.
///
/// `L = 0.2126 * R_lin + 0.7152 * G_lin + 0.0722 * B_lin`
///
/// Returns a value in [0.0, 1.0] where 0 is black and 1 is white.
#[must_use]
pub fn luminance(color: Color) -> f64 {
    let r = srgb_to_linear(color.r);
    let g = srgb_to_linear(color.g);
    let b = srgb_to_linear(color.b);
    0.2126f64.mul_add(r, 0.7152f64.mul_add(g, 0.0722 * b))
}

/// Compute the WCAG 2.1 contrast ratio between two colors.
///
/// `(L_lighter + 0.05) / (L_darker + 0.05)`, always in [1.0, 21.0] and
/// symmetric in its arguments.
#[must_use]
pub fn contrast_ratio(a: Color, b: Color) -> f64 {
    let la = luminance(a);
    let lb = luminance(b);
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

/// Whether a color is light enough that dark text should sit on top of it.
///
/// Threshold of 0.179 relative luminance — the point where black text
/// reaches a higher contrast ratio against the color than white text does.
#[must_use]
pub fn is_light(color: Color) -> bool {
    luminance(color) > 0.179
}

// ---------------------------------------------------------------------------
// Tier classification
// ---------------------------------------------------------------------------

/// WCAG compliance tier for a contrast ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    /// Below 3:1 — fails every WCAG criterion.
    Fail,
    /// At least 3:1 — passes AA for large text only.
    AaLarge,
    /// At least 4.5:1 — passes AA for normal text.
    Aa,
    /// At least 7:1 — passes AAA.
    Aaa,
}

impl Tier {
    /// Short human-readable label (`"Fail"`, `"AA Large"`, `"AA"`, `"AAA"`).
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Fail => "Fail",
            Self::AaLarge => "AA Large",
            Self::Aa => "AA",
            Self::Aaa => "AAA",
        }
    }
}

/// Classify a contrast ratio into its WCAG tier.
///
/// Boundaries: `< 3` is [`Tier::Fail`], `3 ≤ r < 4.5` is [`Tier::AaLarge`],
/// `4.5 ≤ r < 7` is [`Tier::Aa`], `≥ 7` is [`Tier::Aaa`].
///
/// Exactly 3.0 counts as `AaLarge`: WCAG treats 3:1 as passing for large
/// text, so the boundary value belongs to the passing side. (Some checkers
/// leave this value unclassified; we deliberately do not.)
#[must_use]
pub fn classify(ratio: f64) -> Tier {
    if ratio >= 7.0 {
        Tier::Aaa
    } else if ratio >= 4.5 {
        Tier::Aa
    } else if ratio >= 3.0 {
        Tier::AaLarge
    } else {
        Tier::Fail
    }
}

// ---------------------------------------------------------------------------
// Threshold
// ---------------------------------------------------------------------------

/// A target contrast ratio for combination generation.
///
/// The closed set of WCAG targets — callers pick one of these rather than
/// supplying an arbitrary float.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Threshold {
    /// 3:1 — AA for large text.
    AaLarge,
    /// 4.5:1 — AA for normal text.
    #[default]
    Aa,
    /// 7:1 — AAA.
    Aaa,
}

impl Threshold {
    /// The minimum contrast ratio this threshold demands.
    #[must_use]
    pub const fn ratio(self) -> f64 {
        match self {
            Self::AaLarge => 3.0,
            Self::Aa => 4.5,
            Self::Aaa => 7.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() < eps
    }

    // ── Relative luminance ──────────────────────────────────────────

    #[test]
    fn luminance_black_is_zero() {
        assert!(approx_eq(luminance(Color::BLACK), 0.0, 0.001));
    }

    #[test]
    fn luminance_white_is_one() {
        assert!(approx_eq(luminance(Color::WHITE), 1.0, 0.001));
    }

    #[test]
    fn luminance_pure_red() {
        // Red contributes exactly its 0.2126 weight.
        let lum = luminance(Color::rgb(255, 0, 0));
        assert!(approx_eq(lum, 0.2126, 0.001), "red luminance: {lum}");
    }

    #[test]
    fn luminance_pure_green() {
        let lum = luminance(Color::rgb(0, 255, 0));
        assert!(approx_eq(lum, 0.7152, 0.001), "green luminance: {lum}");
    }

    #[test]
    fn luminance_monotonic_in_gray() {
        let mut prev = -1.0;
        for v in [0u8, 32, 64, 128, 192, 255] {
            let lum = luminance(Color::rgb(v, v, v));
            assert!(lum > prev, "luminance not monotonic at {v}");
            prev = lum;
        }
    }

    // ── Contrast ratio ──────────────────────────────────────────────

    #[test]
    fn contrast_black_white_is_21() {
        let ratio = contrast_ratio(Color::BLACK, Color::WHITE);
        assert!(approx_eq(ratio, 21.0, 0.01), "b/w contrast: {ratio}");
    }

    #[test]
    fn contrast_same_color_is_1() {
        let c = Color::rgb(44, 124, 176);
        assert!(approx_eq(contrast_ratio(c, c), 1.0, 1e-9));
    }

    #[test]
    fn contrast_is_symmetric() {
        let a = Color::rgb(200, 50, 80);
        let b = Color::rgb(20, 20, 100);
        assert!(approx_eq(contrast_ratio(a, b), contrast_ratio(b, a), 1e-12));
    }

    #[test]
    fn contrast_gray_on_white_matches_reference() {
        // #767676 on white is the canonical "just passes AA" pair: 4.54.
        let ratio = contrast_ratio(Color::rgb(0x76, 0x76, 0x76), Color::WHITE);
        assert!(approx_eq(ratio, 4.54, 0.01), "gray/white: {ratio}");
    }

    #[test]
    fn contrast_red_on_white_matches_reference() {
        let ratio = contrast_ratio(Color::rgb(255, 0, 0), Color::WHITE);
        assert!(approx_eq(ratio, 3.99, 0.01), "red/white: {ratio}");
    }

    #[test]
    fn contrast_bounded() {
        let samples = [
            Color::BLACK,
            Color::WHITE,
            Color::rgb(44, 124, 176),
            Color::rgb(117, 117, 117),
            Color::rgb(255, 0, 255),
        ];
        for &a in &samples {
            for &b in &samples {
                let ratio = contrast_ratio(a, b);
                assert!((1.0..=21.0 + 1e-9).contains(&ratio), "out of range: {ratio}");
            }
        }
    }

    // ── is_light ────────────────────────────────────────────────────

    #[test]
    fn white_is_light_black_is_not() {
        assert!(is_light(Color::WHITE));
        assert!(!is_light(Color::BLACK));
    }

    #[test]
    fn is_light_monotonic_in_luminance() {
        // Once a gray ramp crosses the threshold it never crosses back.
        let mut seen_light = false;
        for v in 0..=255u8 {
            let light = is_light(Color::rgb(v, v, v));
            if seen_light {
                assert!(light, "non-monotonic at gray {v}");
            }
            seen_light = light;
        }
        assert!(seen_light, "pure white must be light");
    }

    // ── Tier classification ─────────────────────────────────────────

    #[test]
    fn classify_fail_below_3() {
        assert_eq!(classify(1.0), Tier::Fail);
        assert_eq!(classify(2.9), Tier::Fail);
    }

    #[test]
    fn classify_exactly_3_is_aa_large() {
        // Pinned: the boundary value belongs to the passing side.
        assert_eq!(classify(3.0), Tier::AaLarge);
    }

    #[test]
    fn classify_aa_large_band() {
        assert_eq!(classify(3.1), Tier::AaLarge);
        assert_eq!(classify(4.4), Tier::AaLarge);
    }

    #[test]
    fn classify_aa_band() {
        assert_eq!(classify(4.5), Tier::Aa);
        assert_eq!(classify(6.99), Tier::Aa);
    }

    #[test]
    fn classify_aaa_from_7() {
        assert_eq!(classify(7.0), Tier::Aaa);
        assert_eq!(classify(21.0), Tier::Aaa);
    }

    #[test]
    fn tier_labels() {
        assert_eq!(Tier::Fail.label(), "Fail");
        assert_eq!(Tier::AaLarge.label(), "AA Large");
        assert_eq!(Tier::Aa.label(), "AA");
        assert_eq!(Tier::Aaa.label(), "AAA");
    }

    // ── Threshold ───────────────────────────────────────────────────

    #[test]
    fn threshold_ratios() {
        assert_eq!(Threshold::AaLarge.ratio(), 3.0);
        assert_eq!(Threshold::Aa.ratio(), 4.5);
        assert_eq!(Threshold::Aaa.ratio(), 7.0);
    }

    #[test]
    fn threshold_default_is_aa() {
        assert_eq!(Threshold::default(), Threshold::Aa);
    }

    #[test]
    fn black_white_meets_every_threshold() {
        let ratio = contrast_ratio(Color::BLACK, Color::WHITE);
        for t in [Threshold::AaLarge, Threshold::Aa, Threshold::Aaa] {
            assert!(ratio >= t.ratio());
        }
    }
}
