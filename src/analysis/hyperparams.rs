//! Hyperparameter normalization - value registry and per-primitive tables

use crate::analysis::canon::canonical_string;
use crate::pipeline::PipelineCollection;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Sentinel filled in for parameters a step did not specify.
pub const DEFAULT_FILL: &str = "default";

/// Unique Hyperparameter Registry: per primitive, the distinct canonical
/// value texts observed for each of its parameters across a collection.
///
/// Built by a single fold over every hyperparameter-declaring step and
/// immutable afterwards. The registry also defines the parameter-name
/// union each table row is widened to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HyperparamRegistry {
    params: BTreeMap<String, BTreeMap<String, BTreeSet<String>>>,
}

impl HyperparamRegistry {
    /// Build the registry from a collection.
    #[must_use]
    pub fn from_collection(collection: &PipelineCollection) -> Self {
        let params = collection
            .iter()
            .flat_map(|pipeline| pipeline.steps())
            .filter_map(|step| step.hyperparams().map(|h| (step.primitive(), h)))
            .fold(
                BTreeMap::<String, BTreeMap<String, BTreeSet<String>>>::new(),
                |mut params, (primitive, hyperparams)| {
                    let parameters = params.entry(primitive.to_string()).or_default();
                    for (name, value) in hyperparams {
                        parameters
                            .entry(name.clone())
                            .or_default()
                            .insert(canonical_string(value.data()));
                    }
                    params
                },
            );
        Self { params }
    }

    /// Get the primitives with at least one hyperparameter-declaring step.
    pub fn primitives(&self) -> impl Iterator<Item = &str> {
        self.params.keys().map(String::as_str)
    }

    /// Get the sorted union of parameter names ever observed for a
    /// primitive. Empty for a primitive with no declaring steps.
    #[must_use]
    pub fn parameter_names(&self, primitive: &str) -> Vec<&str> {
        self.params
            .get(primitive)
            .map(|parameters| parameters.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Get the distinct canonical value texts observed for one parameter
    /// of one primitive.
    #[must_use]
    pub fn values(&self, primitive: &str, parameter: &str) -> Option<&BTreeSet<String>> {
        self.params.get(primitive)?.get(parameter)
    }

    /// Get the number of primitives tracked.
    #[must_use]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Check whether no primitive declared hyperparameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

/// One table row: the hyperparameter settings a single step occurrence
/// contributed, widened to the primitive's full parameter union.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HyperparamRow {
    pipeline_id: String,
    values: BTreeMap<String, String>,
}

impl HyperparamRow {
    /// Get the identifier of the pipeline this row came from.
    #[must_use]
    pub fn pipeline_id(&self) -> &str {
        &self.pipeline_id
    }

    /// Get the parameter name to canonical value text mapping.
    ///
    /// Every row of one primitive's table has the same key set.
    #[must_use]
    pub const fn values(&self) -> &BTreeMap<String, String> {
        &self.values
    }

    /// Get one parameter's canonical value text, if the parameter belongs
    /// to this primitive's union.
    #[must_use]
    pub fn get(&self, parameter: &str) -> Option<&str> {
        self.values.get(parameter).map(String::as_str)
    }
}

/// Normalized hyperparameter table: primitive → ordered per-step rows.
///
/// Row order follows the collection (pipeline order, then step order
/// within a pipeline). A primitive of interest with no declaring steps
/// has an empty row list, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HyperparamTable {
    registry: HyperparamRegistry,
    rows: BTreeMap<String, Vec<HyperparamRow>>,
}

impl HyperparamTable {
    /// Build the table for the given primitives of interest.
    ///
    /// # Arguments
    ///
    /// * `collection` - Validated pipeline collection
    /// * `primitives` - Primitive identifiers to tabulate
    #[must_use]
    pub fn build(collection: &PipelineCollection, primitives: &BTreeSet<String>) -> Self {
        let registry = HyperparamRegistry::from_collection(collection);

        let mut rows: BTreeMap<String, Vec<HyperparamRow>> = primitives
            .iter()
            .map(|primitive| (primitive.clone(), Vec::new()))
            .collect();

        for pipeline in collection {
            for step in pipeline.steps() {
                if let Some(hyperparams) = step.hyperparams() {
                    if let Some(primitive_rows) = rows.get_mut(step.primitive()) {
                        let values = hyperparams
                            .iter()
                            .map(|(name, value)| {
                                (name.clone(), canonical_string(value.data()))
                            })
                            .collect();
                        primitive_rows.push(HyperparamRow {
                            pipeline_id: pipeline.pipeline_id().to_string(),
                            values,
                        });
                    }
                }
            }
        }

        // Widen every row to the union of parameters observed anywhere
        // for its primitive.
        for (primitive, primitive_rows) in &mut rows {
            let union = registry.parameter_names(primitive);
            for row in primitive_rows {
                for name in &union {
                    if !row.values.contains_key(*name) {
                        row.values
                            .insert((*name).to_string(), DEFAULT_FILL.to_string());
                    }
                }
            }
        }

        debug!(
            primitives = rows.len(),
            rows = rows.values().map(Vec::len).sum::<usize>(),
            "built hyperparameter table"
        );
        Self { registry, rows }
    }

    /// Build the table for every primitive used anywhere in the
    /// collection.
    #[must_use]
    pub fn for_all_primitives(collection: &PipelineCollection) -> Self {
        Self::build(collection, &collection.primitive_ids())
    }

    /// Get the underlying value registry.
    #[must_use]
    pub const fn registry(&self) -> &HyperparamRegistry {
        &self.registry
    }

    /// Get one primitive's rows, or `None` if the primitive was not
    /// requested at build time.
    #[must_use]
    pub fn rows(&self, primitive: &str) -> Option<&[HyperparamRow]> {
        self.rows.get(primitive).map(Vec::as_slice)
    }

    /// Get the tabulated primitives in sorted order.
    pub fn primitives(&self) -> impl Iterator<Item = &str> {
        self.rows.keys().map(String::as_str)
    }

    /// Get the number of tabulated primitives.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check whether no primitive was requested.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
