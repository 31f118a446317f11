//! Canvas dimensions supplied by the host.

use thiserror::Error;

use crate::geometry::Size;

/// Dimension used for an axis the host cannot report.
pub const DEFAULT_DIMENSION: f32 = 1000.0;

/// Errors raised when canvas dimensions cannot carry an arrangement.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum CanvasError {
    #[error("canvas dimensions must be positive and finite, got {width}x{height}")]
    Degenerate { width: f32, height: f32 },
}

/// The width and height of the canvas an arrangement is generated for.
///
/// Read once per run and never mutated by the generator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasBounds {
    size: Size,
}

impl CanvasBounds {
    /// Creates canvas bounds from explicit dimensions.
    ///
    /// No validation happens here; see [`CanvasBounds::validate`].
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Size::new(width, height),
        }
    }

    /// Builds bounds from a host dimension query.
    ///
    /// An axis the host reports as missing or zero falls back to
    /// [`DEFAULT_DIMENSION`]. Negative or non-finite values are kept so that
    /// validation can reject them.
    ///
    /// # Examples
    ///
    /// ```
    /// # use motif_core::canvas::CanvasBounds;
    /// let bounds = CanvasBounds::from_host(Some(1920.0), None);
    /// assert_eq!(bounds.width(), 1920.0);
    /// assert_eq!(bounds.height(), 1000.0);
    /// ```
    pub fn from_host(width: Option<f32>, height: Option<f32>) -> Self {
        let pick = |value: Option<f32>| match value {
            Some(v) if v != 0.0 => v,
            _ => DEFAULT_DIMENSION,
        };
        Self::new(pick(width), pick(height))
    }

    /// Returns the canvas width
    pub fn width(self) -> f32 {
        self.size.width()
    }

    /// Returns the canvas height
    pub fn height(self) -> f32 {
        self.size.height()
    }

    /// Returns the canvas dimensions as a [`Size`]
    pub fn size(self) -> Size {
        self.size
    }

    /// Checks that both dimensions are positive and finite.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::Degenerate`] for zero, negative, NaN or
    /// infinite dimensions.
    pub fn validate(self) -> Result<Self, CanvasError> {
        if self.size.is_positive() {
            Ok(self)
        } else {
            Err(CanvasError::Degenerate {
                width: self.width(),
                height: self.height(),
            })
        }
    }
}

impl Default for CanvasBounds {
    fn default() -> Self {
        Self::new(DEFAULT_DIMENSION, DEFAULT_DIMENSION)
    }
}
