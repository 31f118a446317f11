//! Horizontal row arrangement.

use motif_core::{canvas::CanvasBounds, geometry::Point, placement::Placement};

use super::{ArrangementEngine, ElementParams, segment_center_x};

/// Places elements in a single row across the vertical middle of the canvas.
///
/// The width is split into `count` equal segments and each element is
/// centered in its segment.
#[derive(Debug)]
pub struct Horizontal {
    canvas: CanvasBounds,
    params: ElementParams,
}

impl Horizontal {
    pub(crate) fn new(canvas: CanvasBounds, params: ElementParams) -> Self {
        Self { canvas, params }
    }
}

impl ArrangementEngine for Horizontal {
    fn len(&self) -> usize {
        self.params.count
    }

    fn place(&self, index: usize) -> Placement {
        let center = Point::new(
            segment_center_x(self.canvas.width(), self.params.count, index),
            self.canvas.height() / 2.0,
        );
        Placement::new(center.to_bounds(self.params.size), self.params.fill.clone())
    }
}
