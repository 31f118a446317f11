//! Motif - Geometric arrangements placed onto a design canvas
//!
//! This library computes arrangements of identical shape elements (rows,
//! circles, waves, spirals and mosaic grids) for a canvas, and sends the
//! resulting placements one at a time to a rate-limited host sink.
//!
//! # Pipeline
//!
//! ```text
//! ConfigurationModel (user edits, host snapshots)
//!     ↓ effective configuration, copied at run start
//! arrange::generate (engine selected by kind)
//!     ↓ lazy sequence of placements
//! pacer::emit (pacing policy, cancellation)
//!     ↓ one call per placement
//! PlacementSink
//! ```

pub mod arrange;
pub mod config;
pub mod model;
pub mod pacer;
pub mod sink;
pub mod variant;

mod error;

pub use motif_core::{canvas, geometry, kind, palette, placement};

pub use error::MotifError;

use log::{debug, info};

use canvas::CanvasBounds;
use config::AppConfig;
use model::{Configuration, ConfigurationModel, PersistedState};
use pacer::{CancelToken, EmitReport, Pacer};
use sink::PlacementSink;

/// Runs arrangements for one product variant.
///
/// # Examples
///
/// ```rust,no_run
/// use motif::{Generator, config::AppConfig, pacer::CancelToken, sink::CollectingSink};
///
/// # async fn example() -> Result<(), motif::MotifError> {
/// let generator = Generator::new(AppConfig::default());
/// let model = generator.model(None);
///
/// let mut sink = CollectingSink::new();
/// let report = generator
///     .run(&model, generator.canvas(), &mut sink, &CancelToken::new())
///     .await?;
/// assert_eq!(report.emitted(), sink.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct Generator {
    config: AppConfig,
}

impl Generator {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Canvas bounds from the configuration, with host fallbacks applied
    pub fn canvas(&self) -> CanvasBounds {
        self.config.canvas.bounds()
    }

    /// Creates a configuration model for this generator's variant.
    ///
    /// `snapshot` is the persisted host state, if any.
    pub fn model(&self, snapshot: Option<&PersistedState>) -> ConfigurationModel {
        ConfigurationModel::from_snapshot(self.config.variant, snapshot)
    }

    /// Generates the placements for `config` without emitting them.
    ///
    /// # Errors
    ///
    /// Returns [`arrange::GenerateError::UnsupportedKind`] if the variant
    /// does not offer the configured kind, and
    /// [`arrange::GenerateError::DegenerateBounds`] or
    /// [`arrange::GenerateError::GridTooLarge`] for an unusable canvas.
    pub fn generate(
        &self,
        config: &Configuration,
        canvas: CanvasBounds,
    ) -> Result<arrange::Placements, arrange::GenerateError> {
        let variant = self.config.variant;
        let kind = config.arrangement();
        if !variant.capabilities().supports_kind(kind) {
            return Err(arrange::GenerateError::UnsupportedKind { kind, variant });
        }
        arrange::generate(kind, config, canvas)
    }

    /// Runs one generation: reads the model once, then emits every placement
    /// to `sink` under the configured pacing policy.
    ///
    /// Edits to the model after the run started do not affect it.
    ///
    /// # Errors
    ///
    /// Returns [`MotifError::Generate`] before anything is emitted, or
    /// [`MotifError::Emit`] when the sink fails or the run is cancelled.
    pub async fn run<S>(
        &self,
        model: &ConfigurationModel,
        canvas: CanvasBounds,
        sink: &mut S,
        cancel: &CancelToken,
    ) -> Result<EmitReport, MotifError>
    where
        S: PlacementSink + ?Sized,
    {
        let config = model.effective();
        info!(
            variant:% = self.config.variant,
            kind:% = config.arrangement(),
            num_elements = config.num_elements();
            "Starting arrangement run",
        );

        let placements = self.generate(&config, canvas)?;
        let mut pacer = Pacer::new(self.config.pacing_policy()).with_cancel(cancel.clone());
        debug!(pacer:? = pacer, placements = placements.len(); "Pacing placements");

        let report = pacer.emit(placements, sink).await?;
        info!(emitted = report.emitted(), elapsed:? = report.elapsed(); "Arrangement run finished");
        Ok(report)
    }
}
