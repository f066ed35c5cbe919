//! User preference model.
//!
//! # Responsibility
//! - Define the preference snapshot read by the UI layer.
//! - Enforce the font scale range and stepping grid at the type level.
//!
//! # Invariants
//! - `FontScale` is always within `[FONT_SCALE_MIN, FONT_SCALE_MAX]`.
//! - `FontScale` is always a multiple of `FONT_SCALE_STEP`.
//! - Theme wire names are `dark` and `light`.

use crate::i18n::Locale;
use serde::{Deserialize, Serialize};

pub const FONT_SCALE_MIN: f64 = 0.5;
pub const FONT_SCALE_MAX: f64 = 3.0;
pub const FONT_SCALE_STEP: f64 = 0.125;
pub const FONT_SCALE_DEFAULT: f64 = 1.25;

/// Color theme of the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }
}

/// Direction of a font scale step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontStep {
    Increase,
    Decrease,
}

/// Text scale factor, clamped and snapped to the stepping grid.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct FontScale(f64);

impl FontScale {
    /// Normalizes any finite value into range and onto the grid.
    ///
    /// Returns `None` for NaN or infinite input.
    pub fn new(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        let clamped = value.clamp(FONT_SCALE_MIN, FONT_SCALE_MAX);
        let snapped = (clamped / FONT_SCALE_STEP).round() * FONT_SCALE_STEP;
        Some(Self(snapped.clamp(FONT_SCALE_MIN, FONT_SCALE_MAX)))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Moves one grid step, saturating at the range bounds.
    pub fn stepped(self, step: FontStep) -> Self {
        let next = match step {
            FontStep::Increase => self.0 + FONT_SCALE_STEP,
            FontStep::Decrease => self.0 - FONT_SCALE_STEP,
        };
        Self(next.clamp(FONT_SCALE_MIN, FONT_SCALE_MAX))
    }
}

impl Default for FontScale {
    fn default() -> Self {
        Self(FONT_SCALE_DEFAULT)
    }
}

/// In-memory preference snapshot.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Preferences {
    pub theme: Theme,
    pub font_scale: FontScale,
    pub muted: bool,
    pub locale: Locale,
}

impl Preferences {
    pub fn with_locale(locale: Locale) -> Self {
        Self {
            locale,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{FontScale, FontStep, Theme, FONT_SCALE_MAX, FONT_SCALE_MIN};

    #[test]
    fn font_scale_new_clamps_and_snaps() {
        assert_eq!(FontScale::new(10.0).expect("finite").value(), FONT_SCALE_MAX);
        assert_eq!(FontScale::new(0.01).expect("finite").value(), FONT_SCALE_MIN);
        assert_eq!(FontScale::new(1.3).expect("finite").value(), 1.25);
        assert_eq!(FontScale::new(1.32).expect("finite").value(), 1.375);
        assert!(FontScale::new(f64::NAN).is_none());
        assert!(FontScale::new(f64::INFINITY).is_none());
    }

    #[test]
    fn stepping_saturates_at_bounds() {
        let top = FontScale::new(FONT_SCALE_MAX).expect("finite");
        assert_eq!(top.stepped(FontStep::Increase), top);

        let bottom = FontScale::new(FONT_SCALE_MIN).expect("finite");
        assert_eq!(bottom.stepped(FontStep::Decrease), bottom);
        assert_eq!(bottom.stepped(FontStep::Increase).value(), 0.625);
    }

    #[test]
    fn theme_parse_and_toggle() {
        assert_eq!(Theme::parse(" Light "), Some(Theme::Light));
        assert_eq!(Theme::parse("sepia"), None);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(
            serde_json::to_value(Theme::Light).expect("serialize theme"),
            "light"
        );
    }
}
