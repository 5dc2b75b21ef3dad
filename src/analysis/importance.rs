//! Primitive importance via a median-split contrast statistic

use crate::analysis::{MetricSeries, PresenceIndex};
use crate::error::{Error, Result};
use std::collections::BTreeMap;
use tracing::debug;

/// Importance per primitive identifier, sorted by identifier.
pub type ImportanceMap = BTreeMap<String, f64>;

/// Median of a series: the middle sorted value for odd lengths, the mean
/// of the two middle sorted values for even lengths. `None` for an empty
/// series.
///
/// NaN values order last under total ordering rather than poisoning the
/// sort.
#[must_use]
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        Some(sorted[mid])
    } else {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    }
}

/// Importance scorer over one presence index and one metric series.
///
/// Both inputs must come from the same collection; the length check at
/// construction is the only guard, so pairing products of different
/// collections of equal size is on the caller.
#[derive(Debug, Clone, Copy)]
pub struct ImportanceScorer<'a> {
    presence: &'a PresenceIndex,
    series: &'a MetricSeries,
}

impl<'a> ImportanceScorer<'a> {
    /// Create a scorer from aligned analysis products.
    ///
    /// # Arguments
    ///
    /// * `presence` - Presence index of the collection
    /// * `series` - Metric series extracted from the same collection
    ///
    /// # Errors
    ///
    /// Returns [`Error::SeriesLengthMismatch`] if the series and the
    /// presence index cover a different number of pipelines.
    pub fn new(presence: &'a PresenceIndex, series: &'a MetricSeries) -> Result<Self> {
        if presence.len() != series.len() {
            return Err(Error::SeriesLengthMismatch {
                series_len: series.len(),
                pipeline_count: presence.len(),
            });
        }
        Ok(Self { presence, series })
    }

    /// Score one primitive.
    ///
    /// The series is partitioned into values of pipelines that use the
    /// primitive and values of pipelines that do not. If either group is
    /// empty the score is exactly `0` (a primitive used everywhere, or
    /// nowhere, offers no contrast). Otherwise the score is
    /// `median(using) - median(not using)`; positive means presence
    /// correlates with a higher metric value.
    #[must_use]
    pub fn score(&self, primitive: &str) -> f64 {
        let mut using = Vec::new();
        let mut not_using = Vec::new();
        for (index, value) in self.series.values().iter().enumerate() {
            if self.presence.contains(index, primitive) {
                using.push(*value);
            } else {
                not_using.push(*value);
            }
        }

        match (median(&using), median(&not_using)) {
            (Some(with), Some(without)) => with - without,
            _ => 0.0,
        }
    }

    /// Score every primitive of interest against the one extracted
    /// series. The metric is never recomputed per primitive.
    #[must_use]
    pub fn score_all<I>(&self, primitives: I) -> ImportanceMap
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let map: ImportanceMap = primitives
            .into_iter()
            .map(|primitive| {
                let primitive = primitive.into();
                let score = self.score(&primitive);
                (primitive, score)
            })
            .collect();
        debug!(primitives = map.len(), metric = %self.series.request(), "scored importance");
        map
    }
}

/// Rank an importance map for presentation: descending by score, ties
/// broken by ascending primitive identifier.
#[must_use]
pub fn rank_importance(importance: &ImportanceMap) -> Vec<(&str, f64)> {
    let mut ranked: Vec<(&str, f64)> = importance
        .iter()
        .map(|(primitive, score)| (primitive.as_str(), *score))
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked
}
