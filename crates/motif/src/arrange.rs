//! Arrangement generation.
//!
//! [`generate`] turns an arrangement kind, a [`Configuration`] and the canvas
//! bounds into a lazy, ordered sequence of [`Placement`]s. The order is the
//! order elements are handed to the host, and so their stacking order.
//!
//! Generation is deterministic: identical inputs always yield identical
//! sequences.

pub mod engines;

use std::iter::FusedIterator;

use log::debug;
use thiserror::Error;

use motif_core::{
    canvas::{CanvasBounds, CanvasError},
    kind::ArrangementKind,
    placement::Placement,
};

use crate::{model::Configuration, variant::Variant};

use engines::ArrangementEngine;

/// Errors that stop a run before any placement is produced.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GenerateError {
    #[error("degenerate canvas: {0}")]
    DegenerateBounds(#[from] CanvasError),

    #[error("mosaic of {columns} columns would need {rows} rows, too many cells to place")]
    GridTooLarge { columns: usize, rows: f32 },

    #[error("arrangement `{kind}` is not available in the `{variant}` variant")]
    UnsupportedKind {
        kind: ArrangementKind,
        variant: Variant,
    },
}

/// Lazy, one-shot sequence of placements for a single run.
///
/// Placements are computed on demand as the sequence is advanced. A new run
/// needs a new sequence from [`generate`].
#[derive(Debug)]
pub struct Placements {
    engine: Box<dyn ArrangementEngine>,
    next: usize,
}

impl Placements {
    fn new(engine: Box<dyn ArrangementEngine>) -> Self {
        Self { engine, next: 0 }
    }

    /// Number of placements already produced
    pub fn produced(&self) -> usize {
        self.next
    }
}

impl Iterator for Placements {
    type Item = Placement;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.engine.len() {
            return None;
        }
        let placement = self.engine.place(self.next);
        self.next += 1;
        Some(placement)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.engine.len().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Placements {}

impl FusedIterator for Placements {}

/// Generates the placements for one run.
///
/// A zero element count yields an empty sequence.
///
/// # Errors
///
/// Returns [`GenerateError::DegenerateBounds`] if the canvas width or height
/// is not positive and finite, and [`GenerateError::GridTooLarge`] if a
/// mosaic for the canvas has more cells than can be counted.
///
/// # Examples
///
/// ```
/// use motif::{arrange::generate, model::Configuration};
/// use motif_core::{canvas::CanvasBounds, kind::ArrangementKind};
///
/// let config = Configuration::default().with_num_elements(6);
/// let placements = generate(ArrangementKind::Circle, &config, CanvasBounds::default())
///     .expect("valid canvas");
/// assert_eq!(placements.len(), 6);
/// ```
pub fn generate(
    kind: ArrangementKind,
    config: &Configuration,
    canvas: CanvasBounds,
) -> Result<Placements, GenerateError> {
    let canvas = canvas.validate()?;
    let engine = engines::engine_for(kind, config, canvas)?;

    debug!(
        kind:% = kind,
        placements = engine.len(),
        width = canvas.width(),
        height = canvas.height();
        "Arrangement engine ready",
    );

    Ok(Placements::new(engine))
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    fn config(count: u32) -> Configuration {
        Configuration::default()
            .with_num_elements(count)
            .with_element_size(50.0)
    }

    #[test]
    fn test_counts_per_kind() {
        let canvas = CanvasBounds::new(1000.0, 600.0);
        for count in [1, 2, 7, 15, 64] {
            for kind in ArrangementKind::ALL {
                let placements = generate(kind, &config(count), canvas).unwrap();
                let expected = match kind {
                    ArrangementKind::Mosaic => {
                        count as usize * (count as f32 * 600.0 / 1000.0).round() as usize
                    }
                    _ => count as usize,
                };
                assert_eq!(placements.len(), expected, "{kind} x {count}");
                assert_eq!(placements.count(), expected, "{kind} x {count}");
            }
        }
    }

    #[test]
    fn test_zero_count_is_empty() {
        for kind in ArrangementKind::ALL {
            let mut placements = generate(kind, &config(0), CanvasBounds::default()).unwrap();
            assert_eq!(placements.len(), 0);
            assert!(placements.next().is_none());
        }
    }

    #[test]
    fn test_degenerate_bounds_rejected() {
        for (width, height) in [(0.0, 100.0), (100.0, -1.0), (f32::NAN, 100.0)] {
            let result = generate(
                ArrangementKind::Horizontal,
                &config(3),
                CanvasBounds::new(width, height),
            );
            assert!(matches!(result, Err(GenerateError::DegenerateBounds(_))));
        }
    }

    #[test]
    fn test_oversized_mosaic_rejected() {
        let result = generate(
            ArrangementKind::Mosaic,
            &config(64),
            CanvasBounds::new(1.0, 1e30),
        );
        assert!(matches!(
            result,
            Err(GenerateError::GridTooLarge { columns: 64, .. })
        ));

        // Other kinds do not depend on the aspect ratio.
        let placements =
            generate(ArrangementKind::Circle, &config(64), CanvasBounds::new(1.0, 1e30)).unwrap();
        assert_eq!(placements.len(), 64);
    }

    #[test]
    fn test_generation_is_idempotent() {
        let canvas = CanvasBounds::new(1280.0, 720.0);
        let config = config(9).with_rotation(true);

        for kind in ArrangementKind::ALL {
            let first: Vec<_> = generate(kind, &config, canvas).unwrap().collect();
            let second: Vec<_> = generate(kind, &config, canvas).unwrap().collect();
            assert_eq!(first, second, "{kind}");
        }
    }

    #[test]
    fn test_horizontal_segments_sum_to_width() {
        let width = 1000.0;
        let placements: Vec<_> = generate(
            ArrangementKind::Horizontal,
            &config(7),
            CanvasBounds::new(width, 500.0),
        )
        .unwrap()
        .collect();

        // Each element is centered in its segment, so a segment spans twice
        // the distance from its left edge to the element center.
        let segment = width / 7.0;
        let mut left = 0.0;
        for placement in &placements {
            let span = 2.0 * (placement.center().x() - left);
            assert_approx_eq!(f32, span, segment, epsilon = 1e-3);
            left += span;
        }
        assert_approx_eq!(f32, left, width, epsilon = 1e-2);

        for pair in placements.windows(2) {
            let gap = pair[1].center().x() - pair[0].center().x();
            assert_approx_eq!(f32, gap, segment, epsilon = 1e-3);
        }
    }

    #[test]
    fn test_single_element_has_finite_geometry() {
        for kind in ArrangementKind::ALL {
            let placements: Vec<_> =
                generate(kind, &config(1), CanvasBounds::new(800.0, 800.0))
                    .unwrap()
                    .collect();
            assert_eq!(placements.len(), 1, "{kind}");
            assert!(placements[0].bounds().is_finite(), "{kind}");
            assert_approx_eq!(f32, placements[0].center().x(), 400.0, epsilon = 1e-3);
        }
    }

    #[test]
    fn test_size_hint_tracks_progress() {
        let mut placements =
            generate(ArrangementKind::Wave, &config(3), CanvasBounds::default()).unwrap();
        assert_eq!(placements.size_hint(), (3, Some(3)));

        placements.next();
        assert_eq!(placements.produced(), 1);
        assert_eq!(placements.len(), 2);

        placements.by_ref().for_each(drop);
        assert!(placements.next().is_none());
    }

    #[test]
    fn test_mosaic_ignores_configured_color() {
        let config = config(4).with_color("#abcdef");
        let placements = generate(ArrangementKind::Mosaic, &config, CanvasBounds::default())
            .unwrap();
        for placement in placements {
            assert_ne!(placement.fill_color(), "#abcdef");
        }
    }
}

#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    fn kind_strategy() -> impl Strategy<Value = ArrangementKind> {
        prop::sample::select(ArrangementKind::ALL.to_vec())
    }

    fn canvas_strategy() -> impl Strategy<Value = CanvasBounds> {
        (200.0f32..2000.0, 200.0f32..2000.0).prop_map(|(w, h)| CanvasBounds::new(w, h))
    }

    fn expected_len(kind: ArrangementKind, count: u32, canvas: CanvasBounds) -> usize {
        match kind {
            ArrangementKind::Mosaic if count > 0 => {
                count as usize
                    * (count as f32 * canvas.height() / canvas.width()).round() as usize
            }
            _ => count as usize,
        }
    }

    /// Every run yields the expected number of finite placements.
    fn check_count_and_geometry(
        kind: ArrangementKind,
        count: u32,
        size: f32,
        canvas: CanvasBounds,
    ) -> Result<(), TestCaseError> {
        let config = Configuration::default()
            .with_num_elements(count)
            .with_element_size(size)
            .with_rotation(true);
        let placements: Vec<_> = generate(kind, &config, canvas)
            .map_err(|err| TestCaseError::fail(err.to_string()))?
            .collect();

        prop_assert_eq!(placements.len(), expected_len(kind, count, canvas));
        for placement in &placements {
            prop_assert!(placement.bounds().is_finite());
            if let Some(degrees) = placement.rotation_degrees() {
                prop_assert!(degrees.is_finite());
            }
        }
        Ok(())
    }

    proptest! {
        #[test]
        fn count_and_geometry(
            kind in kind_strategy(),
            count in 0u32..=64,
            size in 10.0f32..200.0,
            canvas in canvas_strategy(),
        ) {
            check_count_and_geometry(kind, count, size, canvas)?;
        }
    }
}
