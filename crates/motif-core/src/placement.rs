//! Placement records produced by the arrangement engines.
//!
//! A [`Placement`] is the unit handed to the host: one shape, where it goes,
//! how big it is, how it is turned and what it is filled with. Placements are
//! immutable once built and are consumed exactly once by a sink.

use serde::Serialize;

use crate::geometry::{Bounds, Point, Size};

/// Outline drawn for every placed element.
///
/// Only a single shape exists today; it is drawn inside its view box and the
/// host stretches the view box to the placement's width and height.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PathShape {
    #[default]
    Square,
}

impl PathShape {
    /// SVG path data for the outline
    pub fn path_data(self) -> &'static str {
        match self {
            Self::Square => "M 0 0 H 100 V 100 H 0 L 0 0",
        }
    }

    /// Size of the coordinate box the path data is drawn in
    pub fn view_box(self) -> Size {
        match self {
            Self::Square => Size::square(100.0),
        }
    }
}

/// One positioned element on the canvas.
///
/// `x`/`y` are the top-left corner in canvas units. Rotation, when present,
/// is in degrees around the element's center.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    rotation_degrees: Option<f32>,
    fill_color: String,
    path_shape: PathShape,
}

impl Placement {
    /// Creates a placement occupying `bounds`, filled with `fill_color`.
    pub fn new(bounds: Bounds, fill_color: impl Into<String>) -> Self {
        Self {
            x: bounds.min_x(),
            y: bounds.min_y(),
            width: bounds.width(),
            height: bounds.height(),
            rotation_degrees: None,
            fill_color: fill_color.into(),
            path_shape: PathShape::default(),
        }
    }

    /// Sets the rotation in degrees (builder style).
    pub fn with_rotation(mut self, degrees: Option<f32>) -> Self {
        self.rotation_degrees = degrees;
        self
    }

    /// Returns the left edge
    pub fn x(&self) -> f32 {
        self.x
    }

    /// Returns the top edge
    pub fn y(&self) -> f32 {
        self.y
    }

    /// Returns the placed width
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Returns the placed height
    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn rotation_degrees(&self) -> Option<f32> {
        self.rotation_degrees
    }

    pub fn fill_color(&self) -> &str {
        &self.fill_color
    }

    pub fn path_shape(&self) -> PathShape {
        self.path_shape
    }

    /// Returns the area the element covers before rotation
    pub fn bounds(&self) -> Bounds {
        Bounds::new_from_top_left(Point::new(self.x, self.y), Size::new(self.width, self.height))
    }

    /// Returns the element's center, the pivot for rotation
    pub fn center(&self) -> Point {
        self.bounds().center()
    }
}
