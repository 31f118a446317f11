//! Product variants.
//!
//! Every product built on Motif exposes a restricted slice of what the
//! generator can do: which arrangement kinds are offered, how many elements
//! may be placed, whether the element size and rotation fields exist, and how
//! fast placements may be sent to the host. A [`Variant`] names one of those
//! presets and [`Capabilities`] spells it out.

use std::{fmt, ops::RangeInclusive, str::FromStr, time::Duration};

use serde::{Deserialize, Serialize};

use motif_core::kind::ArrangementKind;

/// Element size used when a variant has no size field.
pub const DEFAULT_ELEMENT_SIZE: f32 = 100.0;

/// Allowed element sizes for variants with a size field.
pub const ELEMENT_SIZE_RANGE: RangeInclusive<f32> = 10.0..=200.0;

const SMALL_COUNT_RANGE: RangeInclusive<u32> = 1..=15;
const LARGE_COUNT_RANGE: RangeInclusive<u32> = 1..=64;

const FAST_PACING: Duration = Duration::from_millis(250);
const SLOW_PACING: Duration = Duration::from_millis(400);

const ROW_KINDS: &[ArrangementKind] = &[ArrangementKind::Horizontal];
const SHAPES_KINDS: &[ArrangementKind] = &[
    ArrangementKind::Horizontal,
    ArrangementKind::Circle,
    ArrangementKind::Wave,
];
const ORBIT_KINDS: &[ArrangementKind] = &[
    ArrangementKind::Horizontal,
    ArrangementKind::Circle,
    ArrangementKind::Wave,
    ArrangementKind::Spiral,
];
const MOSAIC_KINDS: &[ArrangementKind] = &[ArrangementKind::Mosaic];
const STUDIO_KINDS: &[ArrangementKind] = &ArrangementKind::ALL;

/// Product presets.
///
/// The names match external configuration strings (snake_case).
///
/// # Variants
///
/// - `Row` - Horizontal rows only, fixed element size and color
/// - `Shapes` - Row, circle and wave with a size field; circles may rotate
/// - `Orbit` - Adds spirals; circles and spirals may rotate
/// - `Mosaic` - Mosaic grids only, up to 64 columns
/// - `Studio` - Every kind with the widest ranges (default)
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    Row,
    Shapes,
    Orbit,
    Mosaic,
    #[default]
    Studio,
}

impl Variant {
    /// Returns the capability set this variant exposes.
    pub fn capabilities(self) -> Capabilities {
        match self {
            Self::Row => Capabilities {
                kinds: ROW_KINDS,
                count_range: SMALL_COUNT_RANGE,
                size_range: None,
                rotation: false,
                color: false,
                pacing_delay: FAST_PACING,
            },
            Self::Shapes => Capabilities {
                kinds: SHAPES_KINDS,
                count_range: SMALL_COUNT_RANGE,
                size_range: Some(ELEMENT_SIZE_RANGE),
                rotation: true,
                color: true,
                pacing_delay: FAST_PACING,
            },
            Self::Orbit => Capabilities {
                kinds: ORBIT_KINDS,
                count_range: SMALL_COUNT_RANGE,
                size_range: Some(ELEMENT_SIZE_RANGE),
                rotation: true,
                color: true,
                pacing_delay: SLOW_PACING,
            },
            Self::Mosaic => Capabilities {
                kinds: MOSAIC_KINDS,
                count_range: LARGE_COUNT_RANGE,
                size_range: None,
                rotation: false,
                color: false,
                pacing_delay: FAST_PACING,
            },
            Self::Studio => Capabilities {
                kinds: STUDIO_KINDS,
                count_range: LARGE_COUNT_RANGE,
                size_range: Some(ELEMENT_SIZE_RANGE),
                rotation: true,
                color: true,
                pacing_delay: SLOW_PACING,
            },
        }
    }
}

impl FromStr for Variant {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "row" => Ok(Self::Row),
            "shapes" => Ok(Self::Shapes),
            "orbit" => Ok(Self::Orbit),
            "mosaic" => Ok(Self::Mosaic),
            "studio" => Ok(Self::Studio),
            _ => Err("Unsupported product variant"),
        }
    }
}

impl From<Variant> for &'static str {
    fn from(val: Variant) -> Self {
        match val {
            Variant::Row => "row",
            Variant::Shapes => "shapes",
            Variant::Orbit => "orbit",
            Variant::Mosaic => "mosaic",
            Variant::Studio => "studio",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: &'static str = (*self).into();
        write!(f, "{s}")
    }
}

/// What a [`Variant`] lets the user configure.
#[derive(Debug, Clone, PartialEq)]
pub struct Capabilities {
    kinds: &'static [ArrangementKind],
    count_range: RangeInclusive<u32>,
    size_range: Option<RangeInclusive<f32>>,
    rotation: bool,
    color: bool,
    pacing_delay: Duration,
}

impl Capabilities {
    /// Kinds offered by the variant, in menu order
    pub fn kinds(&self) -> &'static [ArrangementKind] {
        self.kinds
    }

    /// The kind selected when nothing else is known
    pub fn default_kind(&self) -> ArrangementKind {
        self.kinds
            .first()
            .copied()
            .unwrap_or(ArrangementKind::Horizontal)
    }

    pub fn supports_kind(&self, kind: ArrangementKind) -> bool {
        self.kinds.contains(&kind)
    }

    /// Returns true if more than one kind is on offer
    pub fn has_kind_field(&self) -> bool {
        self.kinds.len() > 1
    }

    /// Returns true if the rotation toggle is shown and applied for `kind`.
    pub fn supports_rotation(&self, kind: ArrangementKind) -> bool {
        self.rotation && self.supports_kind(kind) && kind.supports_rotation()
    }

    /// Returns true if any offered kind can be rotated
    pub fn has_rotation_field(&self) -> bool {
        self.kinds.iter().any(|kind| self.supports_rotation(*kind))
    }

    /// Returns true if the color field is shown and some offered kind is
    /// filled with the user's color
    pub fn has_color_field(&self) -> bool {
        self.color && self.kinds.iter().any(|kind| kind.uses_fill_color())
    }

    pub fn has_size_field(&self) -> bool {
        self.size_range.is_some()
    }

    pub fn count_range(&self) -> RangeInclusive<u32> {
        self.count_range.clone()
    }

    pub fn size_range(&self) -> Option<RangeInclusive<f32>> {
        self.size_range.clone()
    }

    /// Clamps an element count into the allowed range
    pub fn clamp_count(&self, count: u32) -> u32 {
        count.clamp(*self.count_range.start(), *self.count_range.end())
    }

    /// Clamps an element size into the allowed range.
    ///
    /// Variants without a size field always use [`DEFAULT_ELEMENT_SIZE`];
    /// non-finite input falls back to the range minimum.
    pub fn clamp_size(&self, size: f32) -> f32 {
        match &self.size_range {
            None => DEFAULT_ELEMENT_SIZE,
            Some(range) if !size.is_finite() => *range.start(),
            Some(range) => size.clamp(*range.start(), *range.end()),
        }
    }

    /// Minimum delay between two placements sent to the host
    pub fn pacing_delay(&self) -> Duration {
        self.pacing_delay
    }
}
