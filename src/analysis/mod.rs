//! Pipeline Analysis Engine
//!
//! Pure, synchronous passes over a validated
//! [`PipelineCollection`](crate::pipeline::PipelineCollection). Every
//! derived structure is a function of its inputs; nothing is cached and
//! nothing persists across calls.
//!
//! ## Data Flow
//!
//! ```text
//! PipelineCollection ──┬──> PresenceIndex ──┐
//!                      ├──> MetricSeries ───┴──> ImportanceScorer ──> ImportanceMap
//!                      ├──> HyperparamRegistry ──> HyperparamTable
//!                      └──> HyperparamMetadataIndex ──> flat rows
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use perfilar::analysis::{MetricRequest, PipelineProfile};
//! use perfilar::pipeline::{PipelineCollection, PipelineRecord, StepRecord};
//!
//! let start = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
//! let end = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 10).unwrap();
//! let collection = PipelineCollection::new(vec![
//!     PipelineRecord::builder("a", start, end)
//!         .step(StepRecord::builder("p.knn").hyperparam("n_neighbors", 5).build())
//!         .score("accuracy", 0.9)
//!         .build(),
//!     PipelineRecord::builder("b", start, end)
//!         .score("accuracy", 0.5)
//!         .build(),
//! ])?;
//!
//! let profile = PipelineProfile::analyze(&collection, MetricRequest::Score("accuracy".into()))?;
//! assert_eq!(profile.importance()["p.knn"], 0.9 - 0.5);
//! # Ok::<(), perfilar::Error>(())
//! ```

mod canon;
mod hyperparams;
mod importance;
mod metadata;
mod metrics;
mod presence;
mod profile;

pub use canon::canonical_string;
pub use hyperparams::{
    HyperparamRegistry, HyperparamRow, HyperparamTable, DEFAULT_FILL,
};
pub use importance::{median, rank_importance, ImportanceMap, ImportanceScorer};
pub use metadata::{
    HyperparamMetadataIndex, HyperparamMetadataRow, HyperparamValueGroup, PrimitiveMetadata,
};
pub use metrics::{MetricRequest, MetricSeries};
pub use presence::PresenceIndex;
pub use profile::PipelineProfile;
