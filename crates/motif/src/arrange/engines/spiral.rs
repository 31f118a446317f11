//! Spiral arrangement.

use motif_core::{canvas::CanvasBounds, geometry::Point, placement::Placement};

use super::{
    ArrangementEngine, ElementParams, angular_segment, ring_rotation_degrees, start_angle,
};

/// Places elements on an outward spiral around the canvas center.
///
/// The angle starts where [`super::Circle`] starts and advances twice as fast
/// (`2 * 2π/count` per element). The radius grows linearly from `height/8`
/// by `height/4/count` per element.
#[derive(Debug)]
pub struct Spiral {
    center: Point,
    base_radius: f32,
    radius_step: f32,
    params: ElementParams,
    segment: f32,
    start: f32,
}

impl Spiral {
    pub(crate) fn new(canvas: CanvasBounds, params: ElementParams) -> Self {
        let height = canvas.height();
        let segment = angular_segment(params.count);
        let radius_step = if params.count == 0 {
            0.0
        } else {
            height / 4.0 / params.count as f32
        };
        Self {
            center: Point::new(canvas.width() / 2.0, height / 2.0),
            base_radius: height / 8.0,
            radius_step,
            params,
            segment,
            start: start_angle(segment),
        }
    }

    /// Angle in radians of the element at `index`
    pub fn angle(&self, index: usize) -> f32 {
        self.start + index as f32 * 2.0 * self.segment
    }

    /// Distance from the canvas center of the element at `index`
    pub fn radius(&self, index: usize) -> f32 {
        self.base_radius + index as f32 * self.radius_step
    }
}

impl ArrangementEngine for Spiral {
    fn len(&self) -> usize {
        self.params.count
    }

    fn place(&self, index: usize) -> Placement {
        let t = self.angle(index);
        let point = self.center.polar_offset(self.radius(index), t);
        Placement::new(point.to_bounds(self.params.size), self.params.fill.clone())
            .with_rotation(self.params.rotate.then(|| ring_rotation_degrees(t)))
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::PI;

    use float_cmp::assert_approx_eq;

    use motif_core::geometry::Size;

    use super::*;

    fn engine(count: usize) -> Spiral {
        Spiral::new(
            CanvasBounds::new(800.0, 800.0),
            ElementParams {
                count,
                size: Size::square(20.0),
                fill: "#000".to_string(),
                rotate: true,
            },
        )
    }

    #[test]
    fn test_angle_advances_twice_as_fast() {
        let engine = engine(8);
        let segment = 2.0 * PI / 8.0;
        let start = -PI / 2.0 + segment / 2.0;

        for i in 0..engine.len() {
            let expected = start + i as f32 * 2.0 * segment;
            assert_approx_eq!(f32, engine.angle(i), expected, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_radius_grows_linearly() {
        let engine = engine(4);

        assert_approx_eq!(f32, engine.radius(0), 100.0);
        assert_approx_eq!(f32, engine.radius(1), 150.0);
        assert_approx_eq!(f32, engine.radius(3), 250.0);
    }

    #[test]
    fn test_placement_distance_matches_radius() {
        let engine = engine(6);
        for i in 0..engine.len() {
            let center = engine.place(i).center();
            let distance = (center.x() - 400.0).hypot(center.y() - 400.0);
            assert_approx_eq!(f32, distance, engine.radius(i), epsilon = 1e-3);
        }
    }

    #[test]
    fn test_rotation_uses_ring_formula() {
        let engine = engine(4);
        let t = engine.angle(2);
        let degrees = engine.place(2).rotation_degrees().unwrap();

        assert_approx_eq!(f32, degrees, -360.0 + t * 180.0 / PI, epsilon = 1e-3);
    }

    #[test]
    fn test_single_element() {
        let engine = engine(1);
        let placement = engine.place(0);

        // t = π/2, r = height/8
        assert_approx_eq!(f32, placement.center().x(), 400.0, epsilon = 1e-3);
        assert_approx_eq!(f32, placement.center().y(), 500.0, epsilon = 1e-3);
    }
}
