//! One-call analysis facade
//!
//! Bundles every derived product of a collection so consumers can join
//! hyperparameter tables, drill-down metadata, and importance scores by
//! primitive identifier without re-running any pass.

use crate::analysis::{
    rank_importance, HyperparamMetadataIndex, HyperparamTable, ImportanceMap, ImportanceScorer,
    MetricRequest, MetricSeries, PresenceIndex,
};
use crate::error::Result;
use crate::pipeline::PipelineCollection;
use tracing::debug;

/// Every analytical product of one collection against one metric.
#[derive(Debug, Clone)]
pub struct PipelineProfile {
    series: MetricSeries,
    table: HyperparamTable,
    metadata: HyperparamMetadataIndex,
    importance: ImportanceMap,
}

impl PipelineProfile {
    /// Run the full analysis over a collection.
    ///
    /// The metric series and presence index are computed once and shared
    /// by the importance pass; hyperparameter products cover every
    /// primitive used anywhere in the collection.
    ///
    /// # Arguments
    ///
    /// * `collection` - Validated pipeline collection
    /// * `metric` - Metric the importance scores contrast
    ///
    /// # Errors
    ///
    /// Returns the metric extraction errors of
    /// [`MetricSeries::extract`]; the internal series and presence index
    /// always align, so no length error can occur here.
    pub fn analyze(collection: &PipelineCollection, metric: MetricRequest) -> Result<Self> {
        let series = MetricSeries::extract(collection, metric)?;
        let presence = PresenceIndex::build(collection);
        let scorer = ImportanceScorer::new(&presence, &series)?;

        let primitives = collection.primitive_ids();
        let importance = scorer.score_all(primitives.iter().cloned());
        let table = HyperparamTable::build(collection, &primitives);
        let metadata = HyperparamMetadataIndex::build(collection);

        debug!(
            pipelines = collection.len(),
            primitives = primitives.len(),
            metric = %series.request(),
            "analyzed pipeline collection"
        );
        Ok(Self {
            series,
            table,
            metadata,
            importance,
        })
    }

    /// Get the extracted metric series.
    #[must_use]
    pub const fn metric_series(&self) -> &MetricSeries {
        &self.series
    }

    /// Get the normalized hyperparameter table.
    #[must_use]
    pub const fn hyperparam_table(&self) -> &HyperparamTable {
        &self.table
    }

    /// Get the hyperparameter metadata index.
    #[must_use]
    pub const fn metadata(&self) -> &HyperparamMetadataIndex {
        &self.metadata
    }

    /// Get the importance map.
    #[must_use]
    pub const fn importance(&self) -> &ImportanceMap {
        &self.importance
    }

    /// Get the importance map ranked for presentation: descending by
    /// score, ties broken by ascending identifier.
    #[must_use]
    pub fn ranked_importance(&self) -> Vec<(&str, f64)> {
        rank_importance(&self.importance)
    }
}
