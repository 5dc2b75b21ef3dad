//! Pipeline Collection - validated, immutable input to the analysis engine

use crate::error::{Error, Result};
use crate::pipeline::PipelineRecord;
use std::collections::{BTreeSet, HashSet};
use tracing::debug;

/// A validated, immutable collection of pipeline records.
///
/// Construction checks every structural precondition the analysis engine
/// relies on, so downstream passes never re-validate:
///
/// - each record passes [`PipelineRecord::validate`],
/// - pipeline identifiers are unique,
/// - every record reports the same ordered metric-name list as the first
///   (score lists are index-aligned across the collection).
///
/// A rejected collection is unusable by contract; there is no partially
/// valid state.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineCollection {
    pipelines: Vec<PipelineRecord>,
    metric_names: Vec<String>,
}

impl PipelineCollection {
    /// Create a validated collection from raw records.
    ///
    /// # Arguments
    ///
    /// * `pipelines` - Pipeline records in presentation order
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPipeline`] if any record fails its
    /// structural checks, [`Error::DuplicatePipeline`] if two records share
    /// an identifier, or [`Error::MisalignedScores`] if a record's ordered
    /// metric names differ from the first record's.
    pub fn new(pipelines: Vec<PipelineRecord>) -> Result<Self> {
        let mut seen = HashSet::new();
        for pipeline in &pipelines {
            pipeline.validate()?;
            if !seen.insert(pipeline.pipeline_id()) {
                return Err(Error::DuplicatePipeline {
                    pipeline_id: pipeline.pipeline_id().to_string(),
                });
            }
        }

        let metric_names = pipelines
            .first()
            .map(PipelineRecord::metric_names)
            .unwrap_or_default();
        for pipeline in pipelines.iter().skip(1) {
            let found = pipeline.metric_names();
            if found != metric_names {
                return Err(Error::MisalignedScores {
                    pipeline_id: pipeline.pipeline_id().to_string(),
                    expected: metric_names,
                    found,
                });
            }
        }

        debug!(
            pipelines = pipelines.len(),
            metrics = metric_names.len(),
            "validated pipeline collection"
        );
        Ok(Self {
            pipelines,
            metric_names,
        })
    }

    /// Get the number of pipelines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pipelines.len()
    }

    /// Check whether the collection holds no pipelines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pipelines.is_empty()
    }

    /// Get the records in collection order.
    #[must_use]
    pub fn pipelines(&self) -> &[PipelineRecord] {
        &self.pipelines
    }

    /// Get the record at `index`, if in bounds.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&PipelineRecord> {
        self.pipelines.get(index)
    }

    /// Look up a record by its identifier (the join key of every derived
    /// table).
    #[must_use]
    pub fn by_id(&self, pipeline_id: &str) -> Option<&PipelineRecord> {
        self.pipelines
            .iter()
            .find(|p| p.pipeline_id() == pipeline_id)
    }

    /// Iterate over the records in collection order.
    pub fn iter(&self) -> std::slice::Iter<'_, PipelineRecord> {
        self.pipelines.iter()
    }

    /// Get every primitive identifier used anywhere in the collection,
    /// sorted.
    #[must_use]
    pub fn primitive_ids(&self) -> BTreeSet<String> {
        self.pipelines
            .iter()
            .flat_map(|p| p.steps().iter().map(|s| s.primitive().to_string()))
            .collect()
    }

    /// Get the ordered metric names every pipeline in the collection
    /// reports. Empty for an empty collection.
    #[must_use]
    pub fn metric_names(&self) -> &[String] {
        &self.metric_names
    }
}

impl<'a> IntoIterator for &'a PipelineCollection {
    type Item = &'a PipelineRecord;
    type IntoIter = std::slice::Iter<'a, PipelineRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.pipelines.iter()
    }
}
