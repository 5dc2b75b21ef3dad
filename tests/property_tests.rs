//! Property-based tests for perfilar
//!
//! Invariants of the analysis engine over randomly generated pipeline
//! collections, run with `ProptestConfig::with_cases(100)`.

use chrono::{DateTime, Duration, TimeZone, Utc};
use perfilar::analysis::{
    canonical_string, median, rank_importance, HyperparamTable, ImportanceScorer,
    MetricRequest, MetricSeries, PresenceIndex, DEFAULT_FILL,
};
use perfilar::pipeline::{
    HyperparamValue, PipelineCollection, PipelineRecord, StepRecord,
};
use proptest::prelude::*;
use serde_json::Value;
use std::collections::BTreeMap;

// ============================================================================
// Property Test Generators (Strategies)
// ============================================================================

const PRIMITIVE_POOL: [&str; 4] = ["p.alpha", "p.beta", "p.gamma", "p.delta"];
const PARAM_POOL: [&str; 3] = ["depth", "rate", "seed"];

fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap()
}

/// Generate one step of the given primitive: no declaration, an empty
/// declaration, or up to three parameters from the pool.
fn arb_step(primitive: &'static str) -> impl Strategy<Value = StepRecord> {
    proptest::option::of(proptest::collection::btree_map(
        proptest::sample::select(&PARAM_POOL[..]),
        0i32..10,
        0..=3,
    ))
    .prop_map(move |declared| match declared {
        None => StepRecord::new(primitive),
        Some(map) => {
            let hyperparams: BTreeMap<String, HyperparamValue> = map
                .into_iter()
                .map(|(name, value)| (name.to_string(), HyperparamValue::new(value)))
                .collect();
            StepRecord::builder(primitive).hyperparams(hyperparams).build()
        }
    })
}

type PipelineParts = (
    Option<StepRecord>,
    Option<StepRecord>,
    Option<StepRecord>,
    Option<StepRecord>,
    f64,
    i64,
);

fn arb_pipeline_parts() -> impl Strategy<Value = PipelineParts> {
    (
        proptest::option::of(arb_step(PRIMITIVE_POOL[0])),
        proptest::option::of(arb_step(PRIMITIVE_POOL[1])),
        proptest::option::of(arb_step(PRIMITIVE_POOL[2])),
        proptest::option::of(arb_step(PRIMITIVE_POOL[3])),
        0.0f64..1.0,
        0i64..3600,
    )
}

/// Generate a valid collection of up to ten pipelines over the primitive
/// pool, all reporting one "accuracy" score.
fn arb_collection() -> impl Strategy<Value = PipelineCollection> {
    proptest::collection::vec(arb_pipeline_parts(), 0..10).prop_map(|parts| {
        let start = base_time();
        let records = parts
            .into_iter()
            .enumerate()
            .map(|(i, (s0, s1, s2, s3, score, secs))| {
                let mut builder = PipelineRecord::builder(
                    format!("pipe-{i}"),
                    start,
                    start + Duration::seconds(secs),
                );
                for step in [s0, s1, s2, s3].into_iter().flatten() {
                    builder = builder.step(step);
                }
                builder.score("accuracy", score).build()
            })
            .collect();
        PipelineCollection::new(records).expect("generated records are structurally valid")
    })
}

/// Generate an arbitrary JSON value up to three levels deep.
fn arb_json_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i32>().prop_map(Value::from),
        "[a-z]{0,8}".prop_map(Value::from),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            proptest::collection::vec(inner.clone(), 0..4).prop_map(Value::from),
            proptest::collection::btree_map("[a-z]{1,6}", inner, 0..4)
                .prop_map(|map| Value::Object(map.into_iter().collect())),
        ]
    })
}

fn accuracy_series(collection: &PipelineCollection) -> MetricSeries {
    MetricSeries::extract(collection, MetricRequest::Score("accuracy".to_string()))
        .expect("accuracy is reported by every generated pipeline")
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // ========================================================================
    // Hyperparameter Table Properties
    // ========================================================================

    /// Property: every row of a primitive's table has exactly the union
    /// key set
    #[test]
    fn prop_rows_share_key_set(collection in arb_collection()) {
        let table = HyperparamTable::for_all_primitives(&collection);
        for primitive in collection.primitive_ids() {
            let union = table.registry().parameter_names(&primitive);
            let rows = table.rows(&primitive).expect("requested at build time");
            for row in rows {
                let keys: Vec<&str> = row.values().keys().map(String::as_str).collect();
                prop_assert_eq!(&keys, &union);
            }
        }
    }

    /// Property: parameters a step did not specify read back as the
    /// "default" sentinel, specified ones as their canonical text
    #[test]
    fn prop_unspecified_parameters_fill_default(collection in arb_collection()) {
        let table = HyperparamTable::for_all_primitives(&collection);
        let mut cursor: BTreeMap<&str, usize> = BTreeMap::new();

        for pipeline in &collection {
            for step in pipeline.steps() {
                if let Some(declared) = step.hyperparams() {
                    let next = cursor.entry(step.primitive()).or_insert(0);
                    let rows = table.rows(step.primitive()).expect("tabulated");
                    let row = &rows[*next];
                    *next += 1;

                    prop_assert_eq!(row.pipeline_id(), pipeline.pipeline_id());
                    for name in table.registry().parameter_names(step.primitive()) {
                        match declared.get(name) {
                            Some(value) => {
                                let expected = canonical_string(value.data());
                                prop_assert_eq!(row.get(name), Some(expected.as_str()));
                            }
                            None => prop_assert_eq!(row.get(name), Some(DEFAULT_FILL)),
                        }
                    }
                }
            }
        }

        // One row per declaring step occurrence, nothing more.
        for primitive in collection.primitive_ids() {
            let expected = cursor.get(primitive.as_str()).copied().unwrap_or(0);
            prop_assert_eq!(table.rows(&primitive).expect("tabulated").len(), expected);
        }
    }

    /// Property: normalizing the same collection twice yields
    /// structurally identical tables
    #[test]
    fn prop_normalization_is_idempotent(collection in arb_collection()) {
        let first = HyperparamTable::for_all_primitives(&collection);
        let second = HyperparamTable::for_all_primitives(&collection);
        prop_assert_eq!(first, second);
    }

    // ========================================================================
    // Canonical Serialization Properties
    // ========================================================================

    /// Property: canonical text parses back to a structurally equal value
    #[test]
    fn prop_canonical_text_preserves_structure(value in arb_json_value()) {
        let text = canonical_string(&value);
        let parsed: Value = serde_json::from_str(&text).expect("canonical text is valid JSON");
        prop_assert_eq!(parsed, value);
    }

    /// Property: canonical serialization is stable across a round trip
    #[test]
    fn prop_canonical_text_is_stable(value in arb_json_value()) {
        let text = canonical_string(&value);
        let parsed: Value = serde_json::from_str(&text).expect("canonical text is valid JSON");
        prop_assert_eq!(canonical_string(&parsed), text);
    }

    // ========================================================================
    // Median and Importance Properties
    // ========================================================================

    /// Property: median agrees with a sort-and-index reference and is
    /// permutation invariant
    #[test]
    fn prop_median_matches_reference(values in proptest::collection::vec(0.0f64..100.0, 1..50)) {
        let result = median(&values).expect("non-empty input");

        let mut sorted = values.clone();
        sorted.sort_by(|a, b| a.partial_cmp(b).expect("finite inputs"));
        let mid = sorted.len() / 2;
        let reference = if sorted.len() % 2 == 1 {
            sorted[mid]
        } else {
            (sorted[mid - 1] + sorted[mid]) / 2.0
        };
        prop_assert_eq!(result, reference);

        let mut reversed = values.clone();
        reversed.reverse();
        prop_assert_eq!(median(&reversed), Some(result));
    }

    /// Property: a primitive present in every pipeline or in none scores
    /// exactly zero
    #[test]
    fn prop_degenerate_presence_scores_exactly_zero(collection in arb_collection()) {
        prop_assume!(!collection.is_empty());
        let presence = PresenceIndex::build(&collection);
        let series = accuracy_series(&collection);
        let scorer = ImportanceScorer::new(&presence, &series).expect("aligned inputs");

        for primitive in collection.primitive_ids() {
            let count = (0..collection.len())
                .filter(|&i| presence.contains(i, &primitive))
                .count();
            if count == collection.len() {
                prop_assert_eq!(scorer.score(&primitive), 0.0);
            }
        }
        prop_assert_eq!(scorer.score("p.never_generated"), 0.0);
    }

    /// Property: importance magnitude never exceeds the series range
    #[test]
    fn prop_importance_bounded_by_series_range(collection in arb_collection()) {
        prop_assume!(!collection.is_empty());
        let presence = PresenceIndex::build(&collection);
        let series = accuracy_series(&collection);
        let scorer = ImportanceScorer::new(&presence, &series).expect("aligned inputs");

        let max = series.values().iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let min = series.values().iter().copied().fold(f64::INFINITY, f64::min);
        let range = max - min;

        for primitive in collection.primitive_ids() {
            let magnitude = scorer.score(&primitive).abs();
            prop_assert!(
                magnitude <= range + f64::EPSILON,
                "importance {} exceeds series range {}",
                magnitude,
                range
            );
        }
    }

    /// Property: ranked importance is non-increasing in score
    #[test]
    fn prop_rank_scores_non_increasing(collection in arb_collection()) {
        prop_assume!(!collection.is_empty());
        let presence = PresenceIndex::build(&collection);
        let series = accuracy_series(&collection);
        let scorer = ImportanceScorer::new(&presence, &series).expect("aligned inputs");

        let map = scorer.score_all(collection.primitive_ids());
        let ranked = rank_importance(&map);
        for pair in ranked.windows(2) {
            prop_assert!(pair[0].1 >= pair[1].1);
        }
    }

    // ========================================================================
    // Metric Extraction Properties
    // ========================================================================

    /// Property: extracted series align index-for-index with the
    /// collection
    #[test]
    fn prop_series_align_with_collection(collection in arb_collection()) {
        let elapsed = MetricSeries::extract(&collection, MetricRequest::ElapsedSeconds)
            .expect("elapsed is always extractable");
        prop_assert_eq!(elapsed.len(), collection.len());
        for (value, pipeline) in elapsed.values().iter().zip(&collection) {
            prop_assert!((value - pipeline.elapsed_seconds()).abs() < f64::EPSILON);
        }

        if !collection.is_empty() {
            let scores = accuracy_series(&collection);
            prop_assert_eq!(scores.len(), collection.len());
            for (value, pipeline) in scores.values().iter().zip(&collection) {
                prop_assert!((value - pipeline.scores()[0].value()).abs() < f64::EPSILON);
            }
        }
    }
}
