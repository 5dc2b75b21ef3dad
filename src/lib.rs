//! # Perfilar: Embedded Pipeline Analytics Engine
//!
//! Perfilar ingests machine-learning pipeline execution records (ordered
//! primitive invocations with hyperparameters, evaluation scores, and a
//! wall-clock window) and derives comparison-ready analytics:
//!
//! - normalized per-primitive hyperparameter tables with an explicit
//!   `"default"` fill,
//! - per-parameter drill-down metadata with pipeline back-references,
//! - per-primitive importance via a median-split contrast statistic.
//!
//! ## Design
//!
//! - **Validate once**: every structural precondition is checked when a
//!   [`pipeline::PipelineCollection`] is built; analysis passes never
//!   re-validate.
//! - **Pure passes**: every derived structure is a function of the
//!   collection (and a chosen metric); no caches, no shared state.
//! - **Joinable products**: all outputs key on the primitive identifier
//!   and the `pipeline_id`, so consumers can join them freely.
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use perfilar::analysis::{MetricRequest, PipelineProfile};
//! use perfilar::pipeline::{PipelineCollection, PipelineRecord, StepRecord};
//!
//! let start = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
//! let end = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 10).unwrap();
//! let forest = "d3m.primitives.classification.random_forest.SKlearn";
//!
//! let collection = PipelineCollection::new(vec![
//!     PipelineRecord::builder("a", start, end)
//!         .step(StepRecord::builder(forest).hyperparam("max_depth", 10).build())
//!         .score("accuracy", 0.9)
//!         .build(),
//!     PipelineRecord::builder("b", start, end)
//!         .step(StepRecord::new(forest))
//!         .score("accuracy", 0.8)
//!         .build(),
//!     PipelineRecord::builder("c", start, end)
//!         .score("accuracy", 0.5)
//!         .build(),
//! ])?;
//!
//! let profile = PipelineProfile::analyze(
//!     &collection,
//!     MetricRequest::Score("accuracy".to_string()),
//! )?;
//!
//! // median(0.9, 0.8) - median(0.5)
//! assert!((profile.importance()[forest] - 0.35).abs() < 1e-12);
//! assert_eq!(perfilar::label::primitive_label(forest), "S Klearn");
//! # Ok::<(), perfilar::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod analysis;
pub mod error;
pub mod export;
pub mod label;
pub mod pipeline;

pub use error::{Error, Result};
