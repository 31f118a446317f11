//! Configuration model.
//!
//! [`Configuration`] is the parameter set one generation run reads.
//! [`ConfigurationModel`] owns the live copy edited by the user interface:
//!
//! 1. it starts from a persisted snapshot, or from defaults,
//! 2. user edits go through clamping setters,
//! 3. a host-originated change notification overwrites it wholesale.
//!
//! Out-of-range input never becomes an error; it is corrected at the moment
//! of the edit.

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use motif_core::kind::ArrangementKind;

use crate::variant::{Capabilities, DEFAULT_ELEMENT_SIZE, Variant};

/// Fill color used until the user picks one.
pub const DEFAULT_COLOR: &str = "#ff0099";

/// Number of elements used until the user picks one.
pub const DEFAULT_NUM_ELEMENTS: u32 = 4;

/// Errors raised by configuration edits that cannot be corrected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("arrangement `{kind}` is not offered by the `{variant}` variant")]
    UnsupportedKind {
        kind: ArrangementKind,
        variant: Variant,
    },
}

/// Parameters for one arrangement run.
///
/// Setters on this type store values as given; range enforcement belongs to
/// [`ConfigurationModel`].
#[derive(Debug, Clone, PartialEq)]
pub struct Configuration {
    arrangement: ArrangementKind,
    element_size: f32,
    num_elements: u32,
    color: String,
    use_rotation: bool,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            arrangement: ArrangementKind::default(),
            element_size: DEFAULT_ELEMENT_SIZE,
            num_elements: DEFAULT_NUM_ELEMENTS,
            color: DEFAULT_COLOR.to_string(),
            use_rotation: false,
        }
    }
}

impl Configuration {
    pub fn with_arrangement(mut self, arrangement: ArrangementKind) -> Self {
        self.arrangement = arrangement;
        self
    }

    pub fn with_element_size(mut self, element_size: f32) -> Self {
        self.element_size = element_size;
        self
    }

    pub fn with_num_elements(mut self, num_elements: u32) -> Self {
        self.num_elements = num_elements;
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn with_rotation(mut self, use_rotation: bool) -> Self {
        self.use_rotation = use_rotation;
        self
    }

    pub fn arrangement(&self) -> ArrangementKind {
        self.arrangement
    }

    pub fn element_size(&self) -> f32 {
        self.element_size
    }

    pub fn num_elements(&self) -> u32 {
        self.num_elements
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    /// Returns the raw rotation toggle.
    ///
    /// Engines only honour it for kinds that support rotation.
    pub fn use_rotation(&self) -> bool {
        self.use_rotation
    }
}

/// Flat record the host persists on the design element.
///
/// Only fields that exist in the active variant are written; missing fields
/// fall back to defaults when restored.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrangement: Option<ArrangementKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element_size: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_elements: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_rotation: Option<bool>,
}

/// The live configuration of one product variant.
#[derive(Debug, Clone)]
pub struct ConfigurationModel {
    variant: Variant,
    capabilities: Capabilities,
    current: Configuration,
}

impl ConfigurationModel {
    /// Creates a model holding the variant's defaults.
    pub fn new(variant: Variant) -> Self {
        let capabilities = variant.capabilities();
        let current = Self::defaults_for(&capabilities);
        Self {
            variant,
            capabilities,
            current,
        }
    }

    /// Creates a model from a persisted snapshot, or defaults when there is none.
    pub fn from_snapshot(variant: Variant, snapshot: Option<&PersistedState>) -> Self {
        let mut model = Self::new(variant);
        model.apply_host_change(snapshot);
        model
    }

    fn defaults_for(capabilities: &Capabilities) -> Configuration {
        Configuration::default()
            .with_arrangement(capabilities.default_kind())
            .with_element_size(capabilities.clamp_size(DEFAULT_ELEMENT_SIZE))
            .with_num_elements(capabilities.clamp_count(DEFAULT_NUM_ELEMENTS))
    }

    /// Overwrites the whole state after a host-originated change.
    ///
    /// `None` means the host element is gone and the model resets to
    /// defaults. Every restored field is re-clamped; a kind the variant does
    /// not offer is dropped in favour of the default kind.
    pub fn apply_host_change(&mut self, snapshot: Option<&PersistedState>) {
        self.current = Self::defaults_for(&self.capabilities);

        let Some(snapshot) = snapshot else {
            debug!(variant:? = self.variant; "Host cleared state, using defaults");
            return;
        };

        if let Some(kind) = snapshot.arrangement {
            if let Err(err) = self.set_arrangement(kind) {
                warn!(err:err; "Ignoring persisted arrangement");
            }
        }
        if let Some(size) = snapshot.element_size {
            self.set_element_size(size);
        }
        if let Some(count) = snapshot.num_elements {
            self.set_num_elements(count);
        }
        if let Some(color) = &snapshot.color {
            self.set_color(color);
        }
        if let Some(use_rotation) = snapshot.use_rotation {
            self.set_use_rotation(use_rotation);
        }

        debug!(state:? = self.current; "Restored state from host snapshot");
    }

    /// Selects an arrangement kind.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::UnsupportedKind`] if the variant does not offer `kind`.
    pub fn set_arrangement(&mut self, kind: ArrangementKind) -> Result<(), ModelError> {
        if !self.capabilities.supports_kind(kind) {
            return Err(ModelError::UnsupportedKind {
                kind,
                variant: self.variant,
            });
        }
        self.current.arrangement = kind;
        Ok(())
    }

    /// Sets the element count, clamped into the variant's range.
    pub fn set_num_elements(&mut self, count: u32) {
        self.current.num_elements = self.capabilities.clamp_count(count);
    }

    /// Sets the element count from raw field text.
    ///
    /// Empty or unparsable input falls back to the range minimum.
    pub fn set_num_elements_input(&mut self, input: &str) {
        let count = input
            .trim()
            .parse::<i64>()
            .ok()
            .map(|value| value.clamp(0, i64::from(u32::MAX)) as u32)
            .unwrap_or(*self.capabilities.count_range().start());
        self.set_num_elements(count);
    }

    /// Sets the element size, clamped into the variant's range.
    pub fn set_element_size(&mut self, size: f32) {
        self.current.element_size = self.capabilities.clamp_size(size);
    }

    /// Sets the element size from raw field text.
    ///
    /// Empty or unparsable input falls back to the range minimum.
    pub fn set_element_size_input(&mut self, input: &str) {
        let size = input.trim().parse::<f32>().unwrap_or(f32::NAN);
        self.set_element_size(size);
    }

    /// Sets the fill color. Empty input keeps the current color.
    ///
    /// Variants without a color field keep [`DEFAULT_COLOR`].
    pub fn set_color(&mut self, color: &str) {
        if !self.capabilities.has_color_field() {
            debug!(variant:% = self.variant; "Ignoring color, variant has no color field");
            return;
        }
        let color = color.trim();
        if color.is_empty() {
            debug!("Ignoring empty color input");
            return;
        }
        self.current.color = color.to_string();
    }

    pub fn set_use_rotation(&mut self, use_rotation: bool) {
        self.current.use_rotation = use_rotation;
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    /// Returns the state as edited, including a rotation toggle that may not apply.
    pub fn configuration(&self) -> &Configuration {
        &self.current
    }

    /// Returns true if the rotation toggle applies to the selected kind.
    pub fn rotation_available(&self) -> bool {
        self.capabilities.supports_rotation(self.current.arrangement)
    }

    /// Returns the configuration a run should read.
    ///
    /// The rotation toggle is cleared when it does not apply to the selected
    /// kind in this variant.
    pub fn effective(&self) -> Configuration {
        let use_rotation = self.current.use_rotation && self.rotation_available();
        self.current.clone().with_rotation(use_rotation)
    }

    /// Returns the record to persist on the host, limited to the variant's fields.
    pub fn snapshot(&self) -> PersistedState {
        let caps = &self.capabilities;
        PersistedState {
            color: caps
                .has_color_field()
                .then(|| self.current.color.clone()),
            arrangement: caps.has_kind_field().then_some(self.current.arrangement),
            element_size: caps.has_size_field().then_some(self.current.element_size),
            num_elements: Some(self.current.num_elements),
            use_rotation: caps.has_rotation_field().then_some(self.current.use_rotation),
        }
    }
}

impl Default for ConfigurationModel {
    fn default() -> Self {
        Self::new(Variant::default())
    }
}
