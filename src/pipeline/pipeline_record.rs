//! Pipeline Record - one evaluated pipeline run

use crate::error::{Error, Result};
use crate::pipeline::{ScoreRecord, StepRecord};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Pipeline Record represents a single evaluated pipeline run.
///
/// A record carries the ordered primitive invocations (`steps`), the
/// ordered evaluation results (`scores`), and the wall-clock execution
/// window. The identifier is an opaque string (typically a digest) and is
/// the join key for every derived table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PipelineRecord {
    pipeline_id: String,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    steps: Vec<StepRecord>,
    scores: Vec<ScoreRecord>,
}

impl PipelineRecord {
    /// Create a new pipeline record with no steps or scores.
    ///
    /// # Arguments
    ///
    /// * `pipeline_id` - Unique identifier for the run
    /// * `start` - UTC timestamp when execution began
    /// * `end` - UTC timestamp when execution finished
    #[must_use]
    pub fn new(pipeline_id: impl Into<String>, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            pipeline_id: pipeline_id.into(),
            start,
            end,
            steps: Vec::new(),
            scores: Vec::new(),
        }
    }

    /// Create a builder for constructing a pipeline record with steps and scores.
    #[must_use]
    pub fn builder(
        pipeline_id: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> PipelineRecordBuilder {
        PipelineRecordBuilder::new(pipeline_id, start, end)
    }

    /// Get the pipeline identifier.
    #[must_use]
    pub fn pipeline_id(&self) -> &str {
        &self.pipeline_id
    }

    /// Get the execution start timestamp.
    #[must_use]
    pub const fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Get the execution end timestamp.
    #[must_use]
    pub const fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Get the ordered primitive invocations.
    #[must_use]
    pub fn steps(&self) -> &[StepRecord] {
        &self.steps
    }

    /// Get the ordered evaluation results.
    #[must_use]
    pub fn scores(&self) -> &[ScoreRecord] {
        &self.scores
    }

    /// Get the execution duration in seconds, at millisecond precision.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn elapsed_seconds(&self) -> f64 {
        (self.end - self.start).num_milliseconds() as f64 / 1000.0
    }

    /// Get the ordered metric names this record reports.
    #[must_use]
    pub fn metric_names(&self) -> Vec<String> {
        self.scores.iter().map(|s| s.metric().to_string()).collect()
    }

    /// Check the record's structural preconditions.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPipeline`] if the identifier is empty, the
    /// end timestamp precedes the start, a step names an empty primitive,
    /// or a score names an empty metric.
    pub fn validate(&self) -> Result<()> {
        if self.pipeline_id.is_empty() {
            return Err(Error::InvalidPipeline {
                pipeline_id: String::new(),
                reason: "pipeline identifier is empty".to_string(),
            });
        }
        if self.end < self.start {
            return Err(Error::InvalidPipeline {
                pipeline_id: self.pipeline_id.clone(),
                reason: format!(
                    "end timestamp {} precedes start timestamp {}",
                    self.end, self.start
                ),
            });
        }
        for (i, step) in self.steps.iter().enumerate() {
            if step.primitive().is_empty() {
                return Err(Error::InvalidPipeline {
                    pipeline_id: self.pipeline_id.clone(),
                    reason: format!("step {i} has an empty primitive identifier"),
                });
            }
        }
        for (i, score) in self.scores.iter().enumerate() {
            if score.metric().is_empty() {
                return Err(Error::InvalidPipeline {
                    pipeline_id: self.pipeline_id.clone(),
                    reason: format!("score {i} has an empty metric name"),
                });
            }
        }
        Ok(())
    }
}

/// Builder for `PipelineRecord`.
#[derive(Debug)]
pub struct PipelineRecordBuilder {
    pipeline_id: String,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    steps: Vec<StepRecord>,
    scores: Vec<ScoreRecord>,
}

impl PipelineRecordBuilder {
    /// Create a new builder with required fields.
    #[must_use]
    pub fn new(pipeline_id: impl Into<String>, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            pipeline_id: pipeline_id.into(),
            start,
            end,
            steps: Vec::new(),
            scores: Vec::new(),
        }
    }

    /// Append one step.
    #[must_use]
    pub fn step(mut self, step: StepRecord) -> Self {
        self.steps.push(step);
        self
    }

    /// Set the full ordered step list.
    #[must_use]
    pub fn steps(mut self, steps: Vec<StepRecord>) -> Self {
        self.steps = steps;
        self
    }

    /// Append one score.
    #[must_use]
    pub fn score(mut self, metric: impl Into<String>, value: f64) -> Self {
        self.scores.push(ScoreRecord::new(metric, value));
        self
    }

    /// Set the full ordered score list.
    #[must_use]
    pub fn scores(mut self, scores: Vec<ScoreRecord>) -> Self {
        self.scores = scores;
        self
    }

    /// Build the `PipelineRecord`.
    #[must_use]
    pub fn build(self) -> PipelineRecord {
        PipelineRecord {
            pipeline_id: self.pipeline_id,
            start: self.start,
            end: self.end,
            steps: self.steps,
            scores: self.scores,
        }
    }
}
