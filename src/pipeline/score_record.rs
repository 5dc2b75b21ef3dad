//! Score Record - one evaluation result for a pipeline

use serde::{Deserialize, Serialize};

/// Score Record represents a single evaluation result.
///
/// Every pipeline in a collection reports the same ordered list of
/// metric names, so score lists can be compared by index across
/// pipelines. That alignment is enforced when a
/// [`PipelineCollection`](crate::pipeline::PipelineCollection) is built.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoreRecord {
    metric: String,
    value: f64,
}

impl ScoreRecord {
    /// Create a new score record.
    ///
    /// # Arguments
    ///
    /// * `metric` - Metric name (e.g., "accuracy", "f1_macro")
    /// * `value` - Observed metric value
    #[must_use]
    pub fn new(metric: impl Into<String>, value: f64) -> Self {
        Self {
            metric: metric.into(),
            value,
        }
    }

    /// Get the metric name.
    #[must_use]
    pub fn metric(&self) -> &str {
        &self.metric
    }

    /// Get the metric value.
    #[must_use]
    pub const fn value(&self) -> f64 {
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_record_new() {
        let score = ScoreRecord::new("accuracy", 0.92);
        assert_eq!(score.metric(), "accuracy");
        assert!((score.value() - 0.92).abs() < f64::EPSILON);
    }

    #[test]
    fn test_score_record_serde_round_trip() {
        let score = ScoreRecord::new("f1_macro", 0.5);
        let json = serde_json::to_string(&score).unwrap();
        let back: ScoreRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, score);
    }
}
