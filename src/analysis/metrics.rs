//! Metric extraction - one scalar series per pipeline

use crate::error::{Error, Result};
use crate::pipeline::{PipelineCollection, PipelineRecord};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// A metric a caller can request from a pipeline collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetricRequest {
    /// Wall-clock execution duration in seconds (millisecond precision).
    ElapsedSeconds,
    /// A named evaluation score reported by every pipeline.
    Score(String),
}

impl MetricRequest {
    /// Get the display name of the requested metric.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::ElapsedSeconds => "elapsed_seconds",
            Self::Score(name) => name,
        }
    }
}

impl fmt::Display for MetricRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An extracted metric series: one `f64` per pipeline, aligned by index
/// with the collection it was extracted from.
///
/// The series keeps the request it answered so consumers can label
/// derived outputs without re-threading the request themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSeries {
    request: MetricRequest,
    values: Vec<f64>,
}

impl MetricSeries {
    /// Extract a metric series from a collection.
    ///
    /// Elapsed time is defined for every collection, including the empty
    /// one. A named score is located by position in the collection's
    /// metric list; alignment across pipelines is already guaranteed by
    /// collection validation, so extraction reads by index.
    ///
    /// # Arguments
    ///
    /// * `collection` - Validated pipeline collection
    /// * `request` - The metric to extract
    ///
    /// # Errors
    ///
    /// Returns [`Error::MetricNotFound`] if a named score is absent from
    /// the collection's metric list, or [`Error::EmptyCollection`] if a
    /// named score is requested from a collection with no pipelines.
    pub fn extract(collection: &PipelineCollection, request: MetricRequest) -> Result<Self> {
        let values: Vec<f64> = match &request {
            MetricRequest::ElapsedSeconds => {
                collection.iter().map(PipelineRecord::elapsed_seconds).collect()
            }
            MetricRequest::Score(name) => {
                if collection.is_empty() {
                    return Err(Error::EmptyCollection);
                }
                let index = collection
                    .metric_names()
                    .iter()
                    .position(|metric| metric == name)
                    .ok_or_else(|| Error::MetricNotFound { name: name.clone() })?;
                collection
                    .iter()
                    .map(|pipeline| pipeline.scores()[index].value())
                    .collect()
            }
        };
        debug!(metric = %request, pipelines = values.len(), "extracted metric series");
        Ok(Self { request, values })
    }

    /// Get the request this series answered.
    #[must_use]
    pub const fn request(&self) -> &MetricRequest {
        &self.request
    }

    /// Get the extracted values, one per pipeline in collection order.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Get the number of values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check whether the series is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
