//! Arrangement kinds.
//!
//! An [`ArrangementKind`] names one of the layout algorithms that decide where
//! elements are placed on the canvas.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Available arrangement algorithms.
///
/// The names match external configuration strings (snake_case).
///
/// # Variants
///
/// - `Horizontal` - A single row across the middle of the canvas (default)
/// - `Circle` - Evenly spaced around a circle
/// - `Wave` - A row whose vertical offset follows a cosine wave
/// - `Spiral` - An outward spiral at twice the circle's angular speed
/// - `Mosaic` - A grid of cells filling the whole canvas
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrangementKind {
    #[default]
    Horizontal,
    Circle,
    Wave,
    Spiral,
    Mosaic,
}

impl ArrangementKind {
    /// Every kind, in menu order.
    pub const ALL: [ArrangementKind; 5] = [
        Self::Horizontal,
        Self::Circle,
        Self::Wave,
        Self::Spiral,
        Self::Mosaic,
    ];

    /// Returns true if elements of this kind can be rotated to face outward.
    pub fn supports_rotation(self) -> bool {
        matches!(self, Self::Circle | Self::Spiral)
    }

    /// Returns true if the element size is chosen by the user.
    ///
    /// Mosaic cells are sized by the grid, so the size field does not apply.
    pub fn uses_element_size(self) -> bool {
        !matches!(self, Self::Mosaic)
    }

    /// Returns true if elements are filled with the user's color.
    ///
    /// Mosaic cells take their fill from the fixed palette instead.
    pub fn uses_fill_color(self) -> bool {
        !matches!(self, Self::Mosaic)
    }
}

impl FromStr for ArrangementKind {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "horizontal" => Ok(Self::Horizontal),
            "circle" => Ok(Self::Circle),
            "wave" => Ok(Self::Wave),
            "spiral" => Ok(Self::Spiral),
            "mosaic" => Ok(Self::Mosaic),
            _ => Err("Unsupported arrangement kind"),
        }
    }
}

impl From<ArrangementKind> for &'static str {
    fn from(val: ArrangementKind) -> Self {
        match val {
            ArrangementKind::Horizontal => "horizontal",
            ArrangementKind::Circle => "circle",
            ArrangementKind::Wave => "wave",
            ArrangementKind::Spiral => "spiral",
            ArrangementKind::Mosaic => "mosaic",
        }
    }
}

impl fmt::Display for ArrangementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: &'static str = (*self).into();
        write!(f, "{s}")
    }
}
