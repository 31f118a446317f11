//! Circle arrangement.

use motif_core::{canvas::CanvasBounds, geometry::Point, placement::Placement};

use super::{
    ArrangementEngine, ElementParams, angular_segment, ring_rotation_degrees, start_angle,
};

/// Places elements evenly around a circle of radius `height/3` centered on
/// the canvas.
///
/// The first element sits half a segment clockwise from twelve o'clock and
/// each following one advances by `2π/count`.
#[derive(Debug)]
pub struct Circle {
    center: Point,
    radius: f32,
    params: ElementParams,
    segment: f32,
    start: f32,
}

impl Circle {
    pub(crate) fn new(canvas: CanvasBounds, params: ElementParams) -> Self {
        let segment = angular_segment(params.count);
        Self {
            center: Point::new(canvas.width() / 2.0, canvas.height() / 2.0),
            radius: canvas.height() / 3.0,
            params,
            segment,
            start: start_angle(segment),
        }
    }

    /// Angle in radians of the element at `index`
    pub fn angle(&self, index: usize) -> f32 {
        self.start + index as f32 * self.segment
    }
}

impl ArrangementEngine for Circle {
    fn len(&self) -> usize {
        self.params.count
    }

    fn place(&self, index: usize) -> Placement {
        let t = self.angle(index);
        let point = self.center.polar_offset(self.radius, t);
        Placement::new(point.to_bounds(self.params.size), self.params.fill.clone())
            .with_rotation(self.params.rotate.then(|| ring_rotation_degrees(t)))
    }
}
