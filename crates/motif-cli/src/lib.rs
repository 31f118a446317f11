//! Motif CLI library
//!
//! This module contains the core CLI logic for the Motif arrangement tool.
//! The CLI plays the host: it answers the canvas query from flags and
//! configuration, keeps the persisted state in a JSON file, and collects the
//! placements into an SVG document or a JSON-lines file.

pub mod error_adapter;
pub mod sink;
pub mod state;

mod args;
mod config;

pub use args::{Args, OutputFormat};
pub use error_adapter::ErrorAdapter;

use std::{fs::File, io::BufWriter};

use log::{info, warn};

use motif::{
    Generator, MotifError,
    config::{AppConfig, PacingConfig},
    model::ConfigurationModel,
    pacer::{CancelToken, EmitReport},
    sink::svg::SvgSink,
};

use sink::JsonLinesSink;

/// Run the Motif CLI application
///
/// Loads the configuration and saved state, applies the edits given on the
/// command line, saves the resulting state, and runs one arrangement into
/// the output file. Ctrl-C cancels the run; placements made before that are
/// still written.
///
/// # Errors
///
/// Returns `MotifError` for:
/// - File I/O and configuration errors
/// - An arrangement kind the variant does not offer
/// - A degenerate canvas
/// - Sink failures and cancellation
pub async fn run(args: &Args) -> Result<EmitReport, MotifError> {
    info!(output_path = args.output, format:? = args.format; "Generating arrangement");

    let app_config = apply_overrides(config::load_config(args.config.as_ref())?, args);
    let generator = Generator::new(app_config);

    let snapshot = match &args.state {
        Some(path) => state::load_state(path)?,
        None => None,
    };
    let mut model = generator.model(snapshot.as_ref());
    apply_edits(&mut model, args)?;

    if let Some(path) = &args.state {
        state::save_state(path, &model.snapshot())?;
    }

    // Rejected canvases and kinds fail here, before any output file exists.
    let canvas = generator.canvas();
    generator.generate(&model.effective(), canvas)?;

    let cancel = CancelToken::new();
    let interrupt = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupted, cancelling run");
                cancel.cancel();
            }
        })
    };

    let result = match args.format {
        OutputFormat::Svg => {
            let mut sink = SvgSink::new(canvas);
            let result = generator.run(&model, canvas, &mut sink, &cancel).await;
            if sink.placed() > 0 || result.is_ok() {
                sink.write_to(&args.output)?;
            }
            result
        }
        OutputFormat::Jsonl => {
            let file = File::create(&args.output)?;
            let mut sink = JsonLinesSink::new(BufWriter::new(file));
            let result = generator.run(&model, canvas, &mut sink, &cancel).await;
            sink.flush()?;
            result
        }
    };
    interrupt.abort();

    let report = result?;
    info!(output_file = args.output, emitted = report.emitted(); "Arrangement written");
    Ok(report)
}

/// Layers command-line overrides on top of the loaded configuration.
fn apply_overrides(mut config: AppConfig, args: &Args) -> AppConfig {
    if let Some(variant) = args.variant {
        config.variant = variant;
    }
    if args.width.is_some() {
        config.canvas.width = args.width;
    }
    if args.height.is_some() {
        config.canvas.height = args.height;
    }
    if let Some(delay_ms) = args.delay_ms {
        config.pacing = PacingConfig::Fixed { delay_ms };
    }
    config
}

/// Applies the field edits given on the command line, as a form would.
fn apply_edits(model: &mut ConfigurationModel, args: &Args) -> Result<(), MotifError> {
    if let Some(kind) = args.kind {
        model.set_arrangement(kind)?;
    }
    if let Some(count) = &args.count {
        model.set_num_elements_input(count);
    }
    if let Some(size) = &args.size {
        model.set_element_size_input(size);
    }
    if let Some(color) = &args.color {
        model.set_color(color);
    }
    if let Some(rotation) = args.rotation {
        model.set_use_rotation(rotation);
    }
    Ok(())
}
