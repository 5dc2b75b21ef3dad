//! Primitive Presence Index - per-pipeline membership sets

use crate::pipeline::PipelineCollection;
use std::collections::HashSet;

/// Per-pipeline sets of primitive identifiers, aligned by index with the
/// collection the index was built from.
///
/// Membership queries are O(1); duplicate steps collapse into one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresenceIndex {
    sets: Vec<HashSet<String>>,
}

impl PresenceIndex {
    /// Build the index from a collection.
    #[must_use]
    pub fn build(collection: &PipelineCollection) -> Self {
        let sets = collection
            .iter()
            .map(|pipeline| {
                pipeline
                    .steps()
                    .iter()
                    .map(|step| step.primitive().to_string())
                    .collect()
            })
            .collect();
        Self { sets }
    }

    /// Get the number of pipelines covered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    /// Check whether the index covers no pipelines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Check whether the pipeline at `index` uses `primitive`.
    ///
    /// Out-of-range indices are not present by definition.
    #[must_use]
    pub fn contains(&self, index: usize, primitive: &str) -> bool {
        self.sets
            .get(index)
            .is_some_and(|set| set.contains(primitive))
    }

    /// Get the per-pipeline membership sets in collection order.
    #[must_use]
    pub fn sets(&self) -> &[HashSet<String>] {
        &self.sets
    }
}
