//! Command-line argument definitions for the Motif CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. The arrangement fields are passed as raw text and go
//! through the same clamping rules as edits made in a form.

use clap::{Parser, ValueEnum};

use motif::{kind::ArrangementKind, variant::Variant};

/// Output written by a run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// SVG document sized to the canvas
    #[default]
    Svg,
    /// One JSON placement record per line
    Jsonl,
}

/// Command-line arguments for the Motif arrangement tool
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Arrangement kind (horizontal, circle, wave, spiral, mosaic)
    #[arg(short, long)]
    pub kind: Option<ArrangementKind>,

    /// Number of elements, or mosaic columns
    #[arg(short = 'n', long)]
    pub count: Option<String>,

    /// Element size in canvas units
    #[arg(short, long)]
    pub size: Option<String>,

    /// Fill color
    #[arg(long)]
    pub color: Option<String>,

    /// Rotate circle and spiral elements to face outward
    #[arg(long)]
    pub rotation: Option<bool>,

    /// Product variant, overrides the configuration file
    #[arg(long)]
    pub variant: Option<Variant>,

    /// Canvas width, overrides the configuration file
    #[arg(long)]
    pub width: Option<f32>,

    /// Canvas height, overrides the configuration file
    #[arg(long)]
    pub height: Option<f32>,

    /// Fixed delay between placements in milliseconds, never below the
    /// variant's rate limit
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// Path to the output file
    #[arg(short, long, default_value = "out.svg")]
    pub output: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t)]
    pub format: OutputFormat,

    /// Path to the persisted state file (JSON)
    #[arg(long)]
    pub state: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
