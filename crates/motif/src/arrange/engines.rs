//! Arrangement engine factory module
//!
//! Each arrangement kind is implemented by one engine. Engines are built once
//! per run from the run's configuration and canvas, and then answer two
//! questions: how many placements the run produces, and what the placement
//! at a given index is. Engines hold no mutable state, so asking for the same
//! index twice yields the same placement.

mod circle;
mod horizontal;
mod mosaic;
mod spiral;
mod wave;

use std::{f32::consts::PI, fmt};

use motif_core::{canvas::CanvasBounds, geometry::Size, kind::ArrangementKind, placement::Placement};

use crate::{arrange::GenerateError, model::Configuration};

pub use circle::Circle;
pub use horizontal::Horizontal;
pub use mosaic::Mosaic;
pub use spiral::Spiral;
pub use wave::Wave;

/// Trait defining the interface for arrangement engines
pub trait ArrangementEngine: fmt::Debug + Send {
    /// Number of placements this engine produces
    fn len(&self) -> usize;

    /// Returns true if the engine produces no placements
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Computes the placement at `index`.
    ///
    /// Callers must keep `index < self.len()`.
    fn place(&self, index: usize) -> Placement;
}

/// Per-element parameters shared by the engines, taken from a [`Configuration`].
#[derive(Debug, Clone)]
pub(crate) struct ElementParams {
    pub(crate) count: usize,
    pub(crate) size: Size,
    pub(crate) fill: String,
    pub(crate) rotate: bool,
}

impl ElementParams {
    pub(crate) fn new(kind: ArrangementKind, config: &Configuration) -> Self {
        Self {
            count: config.num_elements() as usize,
            size: Size::square(config.element_size()),
            fill: config.color().to_string(),
            rotate: config.use_rotation() && kind.supports_rotation(),
        }
    }
}

/// Builds the engine for `kind`.
///
/// The canvas must already be validated.
///
/// # Errors
///
/// Returns [`GenerateError::GridTooLarge`] if a mosaic grid for `canvas`
/// would hold more cells than can be counted.
pub fn engine_for(
    kind: ArrangementKind,
    config: &Configuration,
    canvas: CanvasBounds,
) -> Result<Box<dyn ArrangementEngine>, GenerateError> {
    let params = ElementParams::new(kind, config);
    let engine: Box<dyn ArrangementEngine> = match kind {
        ArrangementKind::Horizontal => Box::new(Horizontal::new(canvas, params)),
        ArrangementKind::Circle => Box::new(Circle::new(canvas, params)),
        ArrangementKind::Wave => Box::new(Wave::new(canvas, params)),
        ArrangementKind::Spiral => Box::new(Spiral::new(canvas, params)),
        ArrangementKind::Mosaic => {
            Box::new(Mosaic::new(canvas, config.num_elements() as usize)?)
        }
    };
    Ok(engine)
}

/// Center x of the `index`-th of `count` equal segments across `width`.
pub(crate) fn segment_center_x(width: f32, count: usize, index: usize) -> f32 {
    if count == 0 {
        return width / 2.0;
    }
    let segment = width / count as f32;
    index as f32 * segment + segment / 2.0
}

/// Angle between neighbours when `count` elements share a full turn.
pub(crate) fn angular_segment(count: usize) -> f32 {
    if count == 0 {
        return 0.0;
    }
    2.0 * PI / count as f32
}

/// Starting angle for ring layouts: half a segment past twelve o'clock.
pub(crate) fn start_angle(segment: f32) -> f32 {
    -PI / 2.0 + segment / 2.0
}

/// Rotation in degrees for an element sitting at angle `t` on a ring.
///
/// Kept as `-360 + t*180/π` for compatibility with existing designs.
pub(crate) fn ring_rotation_degrees(t: f32) -> f32 {
    -360.0 + t * 180.0 / PI
}
