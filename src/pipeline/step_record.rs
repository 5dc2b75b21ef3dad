//! Step Record - one primitive invocation within a pipeline

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single hyperparameter setting supplied to a primitive invocation.
///
/// The payload may be any JSON-serializable scalar, sequence, or mapping.
/// Values are compared structurally; canonical text forms are produced by
/// the analysis layer, not stored here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HyperparamValue {
    data: serde_json::Value,
}

impl HyperparamValue {
    /// Create a new hyperparameter value.
    ///
    /// # Arguments
    ///
    /// * `data` - Any JSON-serializable value
    #[must_use]
    pub fn new(data: impl Into<serde_json::Value>) -> Self {
        Self { data: data.into() }
    }

    /// Get the raw value.
    #[must_use]
    pub const fn data(&self) -> &serde_json::Value {
        &self.data
    }
}

/// Step Record represents one primitive invocation.
///
/// `hyperparams` distinguishes "declared nothing" (`None`, the step
/// contributes no hyperparameter row) from "declared an empty mapping"
/// (`Some` with zero entries, the step contributes an all-default row).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StepRecord {
    primitive: String,
    #[serde(default)]
    hyperparams: Option<BTreeMap<String, HyperparamValue>>,
}

impl StepRecord {
    /// Create a new step record with no declared hyperparameters.
    ///
    /// # Arguments
    ///
    /// * `primitive` - Fully-qualified primitive identifier
    ///   (e.g., "d3m.primitives.classification.random_forest.SKlearn")
    #[must_use]
    pub fn new(primitive: impl Into<String>) -> Self {
        Self {
            primitive: primitive.into(),
            hyperparams: None,
        }
    }

    /// Create a builder for constructing a step record with hyperparameters.
    #[must_use]
    pub fn builder(primitive: impl Into<String>) -> StepRecordBuilder {
        StepRecordBuilder::new(primitive)
    }

    /// Get the fully-qualified primitive identifier.
    #[must_use]
    pub fn primitive(&self) -> &str {
        &self.primitive
    }

    /// Get the declared hyperparameters, if any.
    #[must_use]
    pub const fn hyperparams(&self) -> Option<&BTreeMap<String, HyperparamValue>> {
        self.hyperparams.as_ref()
    }
}

/// Builder for `StepRecord`.
#[derive(Debug)]
pub struct StepRecordBuilder {
    primitive: String,
    hyperparams: Option<BTreeMap<String, HyperparamValue>>,
}

impl StepRecordBuilder {
    /// Create a new builder with required fields.
    #[must_use]
    pub fn new(primitive: impl Into<String>) -> Self {
        Self {
            primitive: primitive.into(),
            hyperparams: None,
        }
    }

    /// Add one hyperparameter setting.
    ///
    /// Initializes an empty declaration on first use, so a step built with
    /// at least one call has `Some` hyperparameters.
    #[must_use]
    pub fn hyperparam(mut self, name: impl Into<String>, data: impl Into<serde_json::Value>) -> Self {
        self.hyperparams
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), HyperparamValue::new(data));
        self
    }

    /// Set the full hyperparameter declaration.
    ///
    /// Passing an empty map declares "no overrides" explicitly, which is
    /// distinct from never declaring hyperparameters at all.
    #[must_use]
    pub fn hyperparams(mut self, hyperparams: BTreeMap<String, HyperparamValue>) -> Self {
        self.hyperparams = Some(hyperparams);
        self
    }

    /// Build the `StepRecord`.
    #[must_use]
    pub fn build(self) -> StepRecord {
        StepRecord {
            primitive: self.primitive,
            hyperparams: self.hyperparams,
        }
    }
}
