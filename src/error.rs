//! Error types for Perfilar
//!
//! Every failure a caller can reach is a named variant with the offending
//! identifiers embedded in the message, so ingestion rejections can be acted
//! on without a debugger.

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Perfilar error types
#[derive(Error, Debug)]
pub enum Error {
    /// A pipeline record violated a structural precondition at ingestion
    #[error("invalid pipeline record `{pipeline_id}`: {reason}")]
    InvalidPipeline {
        /// Identifier of the offending record (empty when the identifier
        /// itself is what failed validation)
        pipeline_id: String,
        /// Description of the violated precondition
        reason: String,
    },

    /// Two pipeline records in one collection share an identifier
    #[error("duplicate pipeline identifier `{pipeline_id}`")]
    DuplicatePipeline {
        /// The identifier that appeared more than once
        pipeline_id: String,
    },

    /// A pipeline reports a different ordered metric list than the rest of
    /// its collection (score lists are index-aligned by contract)
    #[error("pipeline `{pipeline_id}` reports metrics {found:?}, expected {expected:?}")]
    MisalignedScores {
        /// Identifier of the pipeline with the divergent score list
        pipeline_id: String,
        /// Ordered metric names established by the first record
        expected: Vec<String>,
        /// Ordered metric names reported by the offending record
        found: Vec<String>,
    },

    /// Requested named score is absent from the collection's metric list
    #[error("metric `{name}` not found in the collection's score list")]
    MetricNotFound {
        /// The metric name that was requested
        name: String,
    },

    /// A named-score lookup was attempted on a collection with no pipelines
    #[error("metric lookup attempted on an empty pipeline collection")]
    EmptyCollection,

    /// A metric series and a presence index of unequal length were paired
    #[error(
        "metric series has {series_len} value(s) but the presence index covers {pipeline_count} pipeline(s)"
    )]
    SeriesLengthMismatch {
        /// Number of values in the metric series
        series_len: usize,
        /// Number of pipelines covered by the presence index
        pipeline_count: usize,
    },

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Arrow error (columnar export)
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
}
