//! Fixed fill palette for mosaic grids.

/// Colors cycled through, in order, by the cells of a mosaic.
pub const MOSAIC_PALETTE: [&str; 5] = ["#264653", "#2a9d8f", "#e9c46a", "#f4a261", "#e76f51"];

/// Returns the palette slot for the `counter`-th cell of a grid.
pub fn mosaic_index(counter: usize) -> usize {
    counter % MOSAIC_PALETTE.len()
}

/// Returns the fill color for the `counter`-th cell of a grid.
pub fn mosaic_color(counter: usize) -> &'static str {
    MOSAIC_PALETTE[mosaic_index(counter)]
}
