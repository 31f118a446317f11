//! SVG document sink.

use std::{fs, io, path::Path};

use async_trait::async_trait;
use log::debug;
use svg::{self, node::element as svg_element};

use motif_core::{canvas::CanvasBounds, placement::Placement};

use super::{PlacementSink, SinkError};

/// Sink that draws every placement into an SVG document sized to the canvas.
///
/// Each placement becomes one `<path>` built from its path shape, scaled from
/// the shape's view box to the placement size. Rotation is applied about the
/// element center.
#[derive(Debug)]
pub struct SvgSink {
    canvas: CanvasBounds,
    document: svg::Document,
    placed: usize,
}

impl SvgSink {
    pub fn new(canvas: CanvasBounds) -> Self {
        let document = svg::Document::new()
            .set(
                "viewBox",
                format!("0 0 {} {}", canvas.width(), canvas.height()),
            )
            .set("width", canvas.width())
            .set("height", canvas.height());
        Self {
            canvas,
            document,
            placed: 0,
        }
    }

    pub fn canvas(&self) -> CanvasBounds {
        self.canvas
    }

    /// Number of paths drawn so far
    pub fn placed(&self) -> usize {
        self.placed
    }

    pub fn document(&self) -> &svg::Document {
        &self.document
    }

    pub fn into_document(self) -> svg::Document {
        self.document
    }

    /// Writes the document to `path`.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the file cannot be written.
    pub fn write_to(&self, path: impl AsRef<Path>) -> io::Result<()> {
        let path = path.as_ref();
        debug!(path:? = path, paths = self.placed; "Writing SVG document");
        fs::write(path, self.document.to_string())
    }

    fn render_placement(placement: &Placement) -> svg_element::Path {
        let shape = placement.path_shape();
        let view_box = shape.view_box();
        let scale_x = placement.width() / view_box.width();
        let scale_y = placement.height() / view_box.height();

        let mut transform = String::new();
        if let Some(degrees) = placement.rotation_degrees() {
            let center = placement.center();
            transform.push_str(&format!(
                "rotate({} {} {}) ",
                degrees,
                center.x(),
                center.y()
            ));
        }
        transform.push_str(&format!(
            "translate({} {}) scale({} {})",
            placement.x(),
            placement.y(),
            scale_x,
            scale_y
        ));

        svg_element::Path::new()
            .set("d", shape.path_data())
            .set("fill", placement.fill_color())
            .set("transform", transform)
    }
}

#[async_trait]
impl PlacementSink for SvgSink {
    async fn place(&mut self, placement: Placement) -> Result<(), SinkError> {
        let path = Self::render_placement(&placement);
        // `svg::Document::add` consumes the document.
        let document = std::mem::replace(&mut self.document, svg::Document::new());
        self.document = document.add(path);
        self.placed += 1;
        Ok(())
    }
}
