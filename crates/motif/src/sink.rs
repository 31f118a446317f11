//! Placement sinks.
//!
//! A [`PlacementSink`] is the host call that adds one placement to the
//! canvas. Each call is an at-most-once side effect: a failed call is
//! reported, never retried, and ends the run.
//!
//! # Available Sinks
//!
//! - [`CollectingSink`] keeps placements in memory
//! - [`svg::SvgSink`] accumulates an SVG document

pub mod svg;

use std::{error::Error as StdError, fmt};

use async_trait::async_trait;

use motif_core::placement::Placement;

/// Failure reported by a sink for a single placement.
#[derive(Debug)]
pub struct SinkError {
    message: String,
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
}

impl SinkError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Creates an error that wraps the underlying cause.
    pub fn with_source(
        message: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for SinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl StdError for SinkError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_deref()
            .map(|err| err as &(dyn StdError + 'static))
    }
}

/// Destination for placements.
///
/// The pacer calls [`place`](Self::place) once per placement, in order, and
/// never has two calls in flight.
#[async_trait]
pub trait PlacementSink: Send {
    /// Adds `placement` to the canvas.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError`] if the host rejects the placement or the call
    /// fails. The run stops at the first error.
    async fn place(&mut self, placement: Placement) -> Result<(), SinkError>;
}

#[async_trait]
impl<S: PlacementSink + ?Sized> PlacementSink for Box<S> {
    async fn place(&mut self, placement: Placement) -> Result<(), SinkError> {
        (**self).place(placement).await
    }
}

/// Sink that keeps every placement it receives.
///
/// Can be told to fail at a given call, which makes it useful for exercising
/// the abort path.
#[derive(Debug, Default)]
pub struct CollectingSink {
    placements: Vec<Placement>,
    fail_at: Option<usize>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the call with zero-based index `index` fail.
    pub fn failing_at(mut self, index: usize) -> Self {
        self.fail_at = Some(index);
        self
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    pub fn into_placements(self) -> Vec<Placement> {
        self.placements
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }
}

#[async_trait]
impl PlacementSink for CollectingSink {
    async fn place(&mut self, placement: Placement) -> Result<(), SinkError> {
        if self.fail_at == Some(self.placements.len()) {
            return Err(SinkError::new(format!(
                "placement {} rejected",
                self.placements.len()
            )));
        }
        self.placements.push(placement);
        Ok(())
    }
}
