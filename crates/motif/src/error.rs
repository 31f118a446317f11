//! Error types for Motif operations.
//!
//! [`MotifError`] is the top-level error returned by [`Generator`]. It wraps
//! the per-stage errors so callers can match on the stage that failed.
//!
//! [`Generator`]: crate::Generator

use std::io;

use thiserror::Error;

use crate::{arrange::GenerateError, model::ModelError, pacer::EmitError};

/// The main error type for Motif operations.
#[derive(Debug, Error)]
pub enum MotifError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{0}")]
    Generate(#[from] GenerateError),

    #[error("{0}")]
    Model(#[from] ModelError),

    #[error("{0}")]
    Emit(#[from] EmitError),
}

impl MotifError {
    /// Number of placements accepted before the run failed, if it got that far.
    pub fn emitted(&self) -> Option<usize> {
        match self {
            Self::Emit(err) => Some(err.emitted()),
            _ => None,
        }
    }
}
