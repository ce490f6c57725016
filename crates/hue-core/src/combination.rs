//! The four-role color combination and its pin mask.
//!
//! A [`Combination`] is one complete "look": the page background behind
//! everything (`parent_bg`), the element background (`bg`), the text color
//! (`color`), and the border (`border_color`). Combinations are immutable
//! values — every change produces a whole new record, which is what makes
//! the history store's undo/redo trivially correct.

use hue_color::Color;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// One of the four color roles in a combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// The page background behind everything.
    ParentBg,
    /// The element background.
    Bg,
    /// The foreground/text color.
    Color,
    /// The border color.
    BorderColor,
}

impl Role {
    /// All four roles, in display order.
    pub const ALL: [Self; 4] = [Self::ParentBg, Self::Bg, Self::Color, Self::BorderColor];

    /// The key this role uses in the shareable encoding.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::ParentBg => "parentBg",
            Self::Bg => "bg",
            Self::Color => "color",
            Self::BorderColor => "borderColor",
        }
    }

    /// Look a role up by its encoding key.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "parentBg" => Some(Self::ParentBg),
            "bg" => Some(Self::Bg),
            "color" => Some(Self::Color),
            "borderColor" => Some(Self::BorderColor),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Combination
// ---------------------------------------------------------------------------

/// A complete four-role color assignment.
///
/// Serde field names match the shareable encoding keys, so a persisted
/// likes file and a decoded share string describe colors identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Combination {
    /// The page background behind everything.
    #[serde(rename = "parentBg")]
    pub parent_bg: Color,
    /// The element background.
    pub bg: Color,
    /// The foreground/text color. Contrast against `bg` is the only
    /// constrained pair during generation.
    pub color: Color,
    /// The border color. Decorative; never contrast-constrained.
    #[serde(rename = "borderColor")]
    pub border_color: Color,
}

impl Combination {
    /// The color currently assigned to `role`.
    #[must_use]
    pub const fn role(&self, role: Role) -> Color {
        match role {
            Role::ParentBg => self.parent_bg,
            Role::Bg => self.bg,
            Role::Color => self.color,
            Role::BorderColor => self.border_color,
        }
    }

    /// A copy of this combination with one role replaced.
    ///
    /// This is how single-role user edits are modeled: the result is a
    /// full new combination, pushed into history like any generated one.
    #[must_use]
    pub const fn with_role(mut self, role: Role, color: Color) -> Self {
        match role {
            Role::ParentBg => self.parent_bg = color,
            Role::Bg => self.bg = color,
            Role::Color => self.color = color,
            Role::BorderColor => self.border_color = color,
        }
        self
    }
}

// ---------------------------------------------------------------------------
// PinMask
// ---------------------------------------------------------------------------

/// Which roles to hold constant on the next generation.
///
/// Defaults to all-unpinned. Pinning is advisory: with no previous
/// combination to copy from, a pinned role is drawn fresh anyway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PinMask {
    pub parent_bg: bool,
    pub bg: bool,
    pub color: bool,
    pub border_color: bool,
}

impl PinMask {
    /// Whether `role` is pinned.
    #[must_use]
    pub const fn is_pinned(self, role: Role) -> bool {
        match role {
            Role::ParentBg => self.parent_bg,
            Role::Bg => self.bg,
            Role::Color => self.color,
            Role::BorderColor => self.border_color,
        }
    }

    /// Flip the pin state of `role`.
    pub const fn toggle(&mut self, role: Role) {
        match role {
            Role::ParentBg => self.parent_bg = !self.parent_bg,
            Role::Bg => self.bg = !self.bg,
            Role::Color => self.color = !self.color,
            Role::BorderColor => self.border_color = !self.border_color,
        }
    }

    /// Whether any role is pinned.
    #[must_use]
    pub const fn any(self) -> bool {
        self.parent_bg || self.bg || self.color || self.border_color
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
