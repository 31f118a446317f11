//! Wave arrangement.

use motif_core::{canvas::CanvasBounds, geometry::Point, placement::Placement};

use super::{ArrangementEngine, ElementParams, angular_segment, segment_center_x};

/// Places elements in a row whose vertical offset follows one cosine period.
///
/// Horizontal spacing matches [`super::Horizontal`]. Element `i` is centered
/// at `height/2 + height/4 * cos(i * 2π/count)`.
#[derive(Debug)]
pub struct Wave {
    canvas: CanvasBounds,
    params: ElementParams,
    segment: f32,
}

impl Wave {
    pub(crate) fn new(canvas: CanvasBounds, params: ElementParams) -> Self {
        let segment = angular_segment(params.count);
        Self {
            canvas,
            params,
            segment,
        }
    }
}

impl ArrangementEngine for Wave {
    fn len(&self) -> usize {
        self.params.count
    }

    fn place(&self, index: usize) -> Placement {
        let height = self.canvas.height();
        let phase = index as f32 * self.segment;
        let center = Point::new(
            segment_center_x(self.canvas.width(), self.params.count, index),
            height / 2.0 + height / 4.0 * phase.cos(),
        );
        Placement::new(center.to_bounds(self.params.size), self.params.fill.clone())
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use motif_core::geometry::Size;

    use super::*;

    fn engine(count: usize) -> Wave {
        Wave::new(
            CanvasBounds::new(1000.0, 800.0),
            ElementParams {
                count,
                size: Size::square(50.0),
                fill: "blue".to_string(),
                rotate: false,
            },
        )
    }

    #[test]
    fn test_wave_follows_cosine() {
        let engine = engine(4);

        // cos(0) = 1, cos(π/2) = 0, cos(π) = -1, cos(3π/2) = 0
        let expected_centers = [600.0, 400.0, 200.0, 400.0];
        for (i, expected) in expected_centers.iter().enumerate() {
            let placement = engine.place(i);
            assert_approx_eq!(f32, placement.center().y(), *expected, epsilon = 1e-3);
            assert_approx_eq!(f32, placement.y(), *expected - 25.0, epsilon = 1e-3);
        }
    }

    #[test]
    fn test_wave_shares_row_spacing() {
        let engine = engine(5);
        for i in 0..engine.len() {
            assert_approx_eq!(f32, engine.place(i).center().x(), 100.0 + 200.0 * i as f32);
        }
    }

    #[test]
    fn test_single_element_sits_on_crest() {
        let engine = engine(1);
        let placement = engine.place(0);

        assert_approx_eq!(f32, placement.center().x(), 500.0);
        assert_approx_eq!(f32, placement.center().y(), 600.0);
    }
}
