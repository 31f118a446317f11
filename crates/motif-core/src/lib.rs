//! Motif Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Motif arrangement
//! generator and its hosts. It includes:
//!
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Canvas**: Host-supplied canvas dimensions ([`canvas::CanvasBounds`])
//! - **Kinds**: The arrangement algorithms on offer ([`kind::ArrangementKind`])
//! - **Placements**: Positioned elements handed to the host ([`placement::Placement`])
//! - **Palette**: The fixed mosaic palette ([`palette`] module)

pub mod canvas;
pub mod geometry;
pub mod kind;
pub mod palette;
pub mod placement;
