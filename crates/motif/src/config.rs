use std::time::Duration;

use serde::Deserialize;

use motif_core::canvas::CanvasBounds;

use crate::{
    pacer::{FixedDelay, Immediate, PacingPolicy, TokenBucket},
    variant::Variant,
};

/// Application configuration loaded from TOML file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Product variant whose capabilities apply
    #[serde(default)]
    pub variant: Variant,

    /// Canvas configuration section
    #[serde(default)]
    pub canvas: CanvasConfig,

    /// Pacing configuration section
    #[serde(default)]
    pub pacing: PacingConfig,
}

impl AppConfig {
    pub fn new(variant: Variant) -> Self {
        Self {
            variant,
            ..Self::default()
        }
    }

    /// Builds the pacing policy for runs under this configuration.
    pub fn pacing_policy(&self) -> Box<dyn PacingPolicy> {
        self.pacing.policy(self.variant)
    }
}

/// Canvas configuration section
///
/// Missing or zero dimensions fall back to the host default.
#[derive(Debug, Default, Clone, Copy, Deserialize)]
pub struct CanvasConfig {
    #[serde(default)]
    pub width: Option<f32>,

    #[serde(default)]
    pub height: Option<f32>,
}

impl CanvasConfig {
    pub fn bounds(&self) -> CanvasBounds {
        CanvasBounds::from_host(self.width, self.height)
    }
}

/// Pacing configuration section
///
/// ```toml
/// [pacing]
/// policy = "token_bucket"
/// capacity = 4
/// refill_ms = 250
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum PacingConfig {
    /// Fixed delay taken from the product variant
    #[default]
    Variant,
    Fixed {
        delay_ms: u64,
    },
    TokenBucket {
        capacity: u32,
        refill_ms: u64,
    },
    /// No pause at all. Not selectable from a configuration file.
    #[serde(skip_deserializing)]
    Immediate,
}

impl PacingConfig {
    /// Builds the policy for `variant`.
    ///
    /// Configured delays never go below the variant's rate limit.
    pub fn policy(&self, variant: Variant) -> Box<dyn PacingPolicy> {
        let floor = variant.capabilities().pacing_delay();
        let at_least = |ms: u64| Duration::from_millis(ms).max(floor);
        match *self {
            Self::Variant => Box::new(FixedDelay::new(floor)),
            Self::Fixed { delay_ms } => Box::new(FixedDelay::new(at_least(delay_ms))),
            Self::TokenBucket {
                capacity,
                refill_ms,
            } => Box::new(TokenBucket::new(capacity, at_least(refill_ms))),
            Self::Immediate => Box::new(Immediate),
        }
    }
}
