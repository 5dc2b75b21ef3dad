//! Pipeline Execution Schema
//!
//! This module provides the input data model for pipeline analytics:
//! evaluated pipeline runs, their primitive invocations, and their
//! evaluation scores.
//!
//! ## Schema Overview
//!
//! ```text
//! PipelineCollection (validated) ──< PipelineRecord (N)
//!                                         │
//!                                         ├──< StepRecord (N)  [ordered]
//!                                         └──< ScoreRecord (N) [index-aligned]
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use perfilar::pipeline::{PipelineCollection, PipelineRecord, StepRecord};
//!
//! let start = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
//! let end = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 10).unwrap();
//!
//! let record = PipelineRecord::builder("pipe-001", start, end)
//!     .step(StepRecord::builder("p.knn").hyperparam("n_neighbors", 5).build())
//!     .score("accuracy", 0.92)
//!     .build();
//!
//! let collection = PipelineCollection::new(vec![record]).unwrap();
//! assert_eq!(collection.len(), 1);
//! ```

mod collection;
mod pipeline_record;
mod score_record;
mod step_record;

pub use collection::PipelineCollection;
pub use pipeline_record::{PipelineRecord, PipelineRecordBuilder};
pub use score_record::ScoreRecord;
pub use step_record::{HyperparamValue, StepRecord, StepRecordBuilder};
