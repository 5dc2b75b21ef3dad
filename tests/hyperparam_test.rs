//! Hyperparameter Normalization Tests
//!
//! Registry deduplication, table widening with the `"default"` sentinel,
//! and the drill-down metadata index.

use chrono::{DateTime, TimeZone, Utc};
use perfilar::analysis::{
    canonical_string, HyperparamMetadataIndex, HyperparamRegistry, HyperparamTable, DEFAULT_FILL,
};
use perfilar::pipeline::{PipelineCollection, PipelineRecord, StepRecord};
use serde_json::json;
use std::collections::{BTreeMap, BTreeSet};

fn window() -> (DateTime<Utc>, DateTime<Utc>) {
    (
        Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 5).unwrap(),
    )
}

const FOREST: &str = "d3m.primitives.classification.random_forest.SKlearn";
const IMPUTER: &str = "d3m.primitives.data_transformation.imputer.SKlearn";

fn collection() -> PipelineCollection {
    let (start, end) = window();
    let records = vec![
        PipelineRecord::builder("a", start, end)
            .step(
                StepRecord::builder(IMPUTER)
                    .hyperparam("strategy", "mean")
                    .build(),
            )
            .step(
                StepRecord::builder(FOREST)
                    .hyperparam("max_depth", 10)
                    .hyperparam("class_weight", json!({"0": 1, "1": 2}))
                    .build(),
            )
            .score("accuracy", 0.9)
            .build(),
        PipelineRecord::builder("b", start, end)
            .step(
                StepRecord::builder(FOREST)
                    .hyperparam("n_estimators", 100)
                    .hyperparam("class_weight", json!({"1": 2, "0": 1}))
                    .build(),
            )
            .score("accuracy", 0.8)
            .build(),
        PipelineRecord::builder("c", start, end)
            .step(StepRecord::new(FOREST))
            .score("accuracy", 0.7)
            .build(),
    ];
    PipelineCollection::new(records).unwrap()
}

// =============================================================================
// Registry Tests
// =============================================================================

#[test]
fn test_registry_collects_parameter_union() {
    let registry = HyperparamRegistry::from_collection(&collection());
    assert_eq!(
        registry.parameter_names(FOREST),
        vec!["class_weight", "max_depth", "n_estimators"]
    );
    assert_eq!(registry.parameter_names(IMPUTER), vec!["strategy"]);
}

#[test]
fn test_registry_deduplicates_across_key_order() {
    // Pipelines a and b set class_weight with different key order.
    let registry = HyperparamRegistry::from_collection(&collection());
    let values = registry.values(FOREST, "class_weight").unwrap();
    assert_eq!(values.len(), 1);
    assert!(values.contains(r#"{"0":1,"1":2}"#));
}

#[test]
fn test_registry_unknown_primitive_is_empty() {
    let registry = HyperparamRegistry::from_collection(&collection());
    assert!(registry.parameter_names("p.ghost").is_empty());
    assert!(registry.values("p.ghost", "anything").is_none());
}

// =============================================================================
// Table Tests
// =============================================================================

#[test]
fn test_rows_share_one_key_set_per_primitive() {
    let table = HyperparamTable::for_all_primitives(&collection());
    let rows = table.rows(FOREST).unwrap();

    // Pipeline c's step declared nothing, so only a and b contribute.
    assert_eq!(rows.len(), 2);

    let expected_keys: Vec<&str> = vec!["class_weight", "max_depth", "n_estimators"];
    for row in rows {
        let keys: Vec<&str> = row.values().keys().map(String::as_str).collect();
        assert_eq!(keys, expected_keys);
    }
}

#[test]
fn test_missing_parameters_fill_with_default() {
    let table = HyperparamTable::for_all_primitives(&collection());
    let rows = table.rows(FOREST).unwrap();

    assert_eq!(rows[0].pipeline_id(), "a");
    assert_eq!(rows[0].get("max_depth"), Some("10"));
    assert_eq!(rows[0].get("n_estimators"), Some(DEFAULT_FILL));

    assert_eq!(rows[1].pipeline_id(), "b");
    assert_eq!(rows[1].get("max_depth"), Some(DEFAULT_FILL));
    assert_eq!(rows[1].get("n_estimators"), Some("100"));
}

#[test]
fn test_cell_values_are_canonical_text() {
    let table = HyperparamTable::for_all_primitives(&collection());
    let rows = table.rows(FOREST).unwrap();

    let expected = canonical_string(&json!({"0": 1, "1": 2}));
    assert_eq!(rows[0].get("class_weight"), Some(expected.as_str()));
    // Same canonical text despite different insertion order in pipeline b.
    assert_eq!(rows[1].get("class_weight"), Some(expected.as_str()));
}

#[test]
fn test_empty_declaration_contributes_all_default_row() {
    let (start, end) = window();
    let records = vec![
        PipelineRecord::builder("a", start, end)
            .step(
                StepRecord::builder(FOREST)
                    .hyperparam("max_depth", 10)
                    .build(),
            )
            .score("accuracy", 0.9)
            .build(),
        PipelineRecord::builder("b", start, end)
            .step(StepRecord::builder(FOREST).hyperparams(BTreeMap::new()).build())
            .score("accuracy", 0.8)
            .build(),
    ];
    let collection = PipelineCollection::new(records).unwrap();

    let table = HyperparamTable::for_all_primitives(&collection);
    let rows = table.rows(FOREST).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].get("max_depth"), Some(DEFAULT_FILL));
}

#[test]
fn test_primitive_without_declaring_steps_has_empty_rows() {
    let (start, end) = window();
    let records = vec![PipelineRecord::builder("a", start, end)
        .step(StepRecord::new("p.plain"))
        .score("accuracy", 0.9)
        .build()];
    let collection = PipelineCollection::new(records).unwrap();

    let table = HyperparamTable::for_all_primitives(&collection);
    assert_eq!(table.rows("p.plain"), Some(&[][..]));
}

#[test]
fn test_requested_primitive_absent_from_collection() {
    let primitives: BTreeSet<String> = ["p.ghost".to_string()].into();
    let table = HyperparamTable::build(&collection(), &primitives);

    assert_eq!(table.rows("p.ghost"), Some(&[][..]));
    assert!(table.rows(FOREST).is_none());
}

#[test]
fn test_table_row_order_follows_collection_order() {
    let table = HyperparamTable::for_all_primitives(&collection());
    let ids: Vec<&str> = table
        .rows(FOREST)
        .unwrap()
        .iter()
        .map(perfilar::analysis::HyperparamRow::pipeline_id)
        .collect();
    assert_eq!(ids, vec!["a", "b"]);
}

// =============================================================================
// Metadata Index Tests
// =============================================================================

#[test]
fn test_metadata_groups_values_structurally() {
    let index = HyperparamMetadataIndex::build(&collection());
    let metadata = index.get(FOREST).unwrap();

    let class_weight_groups = &metadata.parameters()["class_weight"];
    assert_eq!(class_weight_groups.len(), 1);

    let group = class_weight_groups.values().next().unwrap();
    assert_eq!(group.value(), &json!({"0": 1, "1": 2}));
    assert_eq!(group.pipeline_ids(), ["a".to_string(), "b".to_string()]);
}

#[test]
fn test_metadata_tracks_primitive_usage_without_declarations() {
    let index = HyperparamMetadataIndex::build(&collection());
    let metadata = index.get(FOREST).unwrap();

    // Pipeline c uses the primitive without declaring hyperparameters.
    assert_eq!(
        metadata.pipeline_ids(),
        ["a".to_string(), "b".to_string(), "c".to_string()]
    );
}

#[test]
fn test_metadata_values_stay_raw() {
    let index = HyperparamMetadataIndex::build(&collection());
    let metadata = index.get(FOREST).unwrap();

    let group = metadata.parameters()["max_depth"].values().next().unwrap();
    assert_eq!(group.value(), &json!(10));
    assert!(group.value().is_number());
}

#[test]
fn test_metadata_flat_rows_are_deterministic() {
    let index = HyperparamMetadataIndex::build(&collection());
    let rows = index.rows();

    // class_weight x {a, b}, max_depth x {a}, n_estimators x {b},
    // strategy x {a}.
    assert_eq!(rows.len(), 5);

    let rerun = index.rows();
    let first: Vec<(&str, &str, &str)> = rows
        .iter()
        .map(|row| (row.primitive(), row.parameter(), row.pipeline_id()))
        .collect();
    let again: Vec<(&str, &str, &str)> = rerun
        .iter()
        .map(|row| (row.primitive(), row.parameter(), row.pipeline_id()))
        .collect();
    assert_eq!(first, again);

    assert_eq!(rows[0].primitive(), FOREST);
    assert_eq!(rows[0].parameter(), "class_weight");
}
