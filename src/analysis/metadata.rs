//! Hyperparameter Metadata Index - per-value pipeline back-references
//!
//! Where the normalized table answers "what did each step set", this
//! index answers the drill-down question "who used this value". Values
//! are kept raw so consumers can inspect structure; back-references are
//! `pipeline_id` join keys, never record copies.

use crate::analysis::canon::canonical_string;
use crate::pipeline::PipelineCollection;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

/// One observed value of one parameter and the pipelines that used it.
///
/// Grouping is structural: two steps setting `{"a":1,"b":2}` and
/// `{"b":2,"a":1}` land in the same group.
#[derive(Debug, Clone, PartialEq)]
pub struct HyperparamValueGroup {
    value: Value,
    pipeline_ids: Vec<String>,
}

impl HyperparamValueGroup {
    /// Get the raw value.
    #[must_use]
    pub const fn value(&self) -> &Value {
        &self.value
    }

    /// Get the pipelines that used this value, deduplicated in first-seen
    /// order.
    #[must_use]
    pub fn pipeline_ids(&self) -> &[String] {
        &self.pipeline_ids
    }
}

/// Everything observed about one primitive across a collection.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PrimitiveMetadata {
    parameters: BTreeMap<String, BTreeMap<String, HyperparamValueGroup>>,
    pipeline_ids: Vec<String>,
}

impl PrimitiveMetadata {
    /// Get parameter → canonical value text → value group.
    #[must_use]
    pub const fn parameters(&self) -> &BTreeMap<String, BTreeMap<String, HyperparamValueGroup>> {
        &self.parameters
    }

    /// Get the pipelines using this primitive at all (with or without
    /// declared hyperparameters), deduplicated in first-seen order.
    #[must_use]
    pub fn pipeline_ids(&self) -> &[String] {
        &self.pipeline_ids
    }
}

/// One flat drill-down row: (pipeline, primitive, parameter, raw value).
#[derive(Debug, Clone, PartialEq)]
pub struct HyperparamMetadataRow {
    pipeline_id: String,
    primitive: String,
    parameter: String,
    value: Value,
}

impl HyperparamMetadataRow {
    /// Get the pipeline identifier.
    #[must_use]
    pub fn pipeline_id(&self) -> &str {
        &self.pipeline_id
    }

    /// Get the primitive identifier.
    #[must_use]
    pub fn primitive(&self) -> &str {
        &self.primitive
    }

    /// Get the parameter name.
    #[must_use]
    pub fn parameter(&self) -> &str {
        &self.parameter
    }

    /// Get the raw value.
    #[must_use]
    pub const fn value(&self) -> &Value {
        &self.value
    }
}

/// Hyperparameter Metadata Index over a whole collection.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HyperparamMetadataIndex {
    primitives: BTreeMap<String, PrimitiveMetadata>,
}

impl HyperparamMetadataIndex {
    /// Build the index from a collection.
    #[must_use]
    pub fn build(collection: &PipelineCollection) -> Self {
        let mut primitives: BTreeMap<String, PrimitiveMetadata> = BTreeMap::new();

        for pipeline in collection {
            let pipeline_id = pipeline.pipeline_id();
            for step in pipeline.steps() {
                let metadata = primitives.entry(step.primitive().to_string()).or_default();
                push_unique(&mut metadata.pipeline_ids, pipeline_id);

                if let Some(hyperparams) = step.hyperparams() {
                    for (name, value) in hyperparams {
                        let group = metadata
                            .parameters
                            .entry(name.clone())
                            .or_default()
                            .entry(canonical_string(value.data()))
                            .or_insert_with(|| HyperparamValueGroup {
                                value: value.data().clone(),
                                pipeline_ids: Vec::new(),
                            });
                        push_unique(&mut group.pipeline_ids, pipeline_id);
                    }
                }
            }
        }

        debug!(primitives = primitives.len(), "built hyperparameter metadata index");
        Self { primitives }
    }

    /// Get one primitive's metadata, if the primitive appears in the
    /// collection.
    #[must_use]
    pub fn get(&self, primitive: &str) -> Option<&PrimitiveMetadata> {
        self.primitives.get(primitive)
    }

    /// Get the indexed primitives in sorted order.
    pub fn primitives(&self) -> impl Iterator<Item = &str> {
        self.primitives.keys().map(String::as_str)
    }

    /// Get the number of indexed primitives.
    #[must_use]
    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    /// Check whether the collection used no primitives.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Re-project the index into flat drill-down rows.
    ///
    /// Order is deterministic: primitive, then parameter, then canonical
    /// value text, then first-seen pipeline order within a value group.
    #[must_use]
    pub fn rows(&self) -> Vec<HyperparamMetadataRow> {
        let mut rows = Vec::new();
        for (primitive, metadata) in &self.primitives {
            for (parameter, groups) in &metadata.parameters {
                for group in groups.values() {
                    for pipeline_id in &group.pipeline_ids {
                        rows.push(HyperparamMetadataRow {
                            pipeline_id: pipeline_id.clone(),
                            primitive: primitive.clone(),
                            parameter: parameter.clone(),
                            value: group.value.clone(),
                        });
                    }
                }
            }
        }
        rows
    }
}

// A collection visits each pipeline once and rejects duplicate ids, so
// a repeated push can only match the last element.
fn push_unique(ids: &mut Vec<String>, id: &str) {
    if ids.last().map(String::as_str) != Some(id) {
        ids.push(id.to_string());
    }
}
