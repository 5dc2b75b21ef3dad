//! Pipeline Profiling Example
//!
//! Demonstrates the full analytics flow: recording pipeline runs,
//! validating them into a collection, profiling a metric, and exporting
//! the derived tables as Arrow batches.
//!
//! Run with: cargo run --example profile_runs

use chrono::{Duration, TimeZone, Utc};
use perfilar::analysis::{MetricRequest, PipelineProfile};
use perfilar::export::{hyperparam_table_batch, importance_batch, metadata_rows_batch};
use perfilar::label::primitive_label;
use perfilar::pipeline::{PipelineCollection, PipelineRecord, StepRecord};

const IMPUTER: &str = "d3m.primitives.data_cleaning.imputer.SKlearn";
const FOREST: &str = "d3m.primitives.classification.random_forest.SKlearn";
const BOOSTING: &str = "d3m.primitives.classification.gradient_boosting.SKlearn";

fn main() {
    println!("=== Perfilar Pipeline Profiling ===\n");

    // -------------------------------------------------------------------------
    // 1. Record pipeline runs
    // -------------------------------------------------------------------------
    println!("1. Recording pipeline runs...");

    let base = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();

    let runs = vec![
        PipelineRecord::builder("run-001", base, base + Duration::seconds(30))
            .step(
                StepRecord::builder(IMPUTER)
                    .hyperparam("strategy", "mean")
                    .build(),
            )
            .step(
                StepRecord::builder(FOREST)
                    .hyperparam("n_estimators", 100)
                    .hyperparam("max_depth", 10)
                    .build(),
            )
            .score("accuracy", 0.82)
            .score("f1_macro", 0.79)
            .build(),
        PipelineRecord::builder("run-002", base, base + Duration::seconds(75))
            .step(
                StepRecord::builder(IMPUTER)
                    .hyperparam("strategy", "median")
                    .build(),
            )
            .step(
                StepRecord::builder(FOREST)
                    .hyperparam("n_estimators", 500)
                    .build(),
            )
            .score("accuracy", 0.88)
            .score("f1_macro", 0.85)
            .build(),
        PipelineRecord::builder("run-003", base, base + Duration::seconds(45))
            .step(StepRecord::new(IMPUTER))
            .step(
                StepRecord::builder(BOOSTING)
                    .hyperparam("learning_rate", 0.1)
                    .hyperparam("n_estimators", 200)
                    .build(),
            )
            .score("accuracy", 0.74)
            .score("f1_macro", 0.70)
            .build(),
        PipelineRecord::builder("run-004", base, base + Duration::seconds(20))
            .step(
                StepRecord::builder(BOOSTING)
                    .hyperparam("learning_rate", 0.05)
                    .build(),
            )
            .score("accuracy", 0.68)
            .score("f1_macro", 0.66)
            .build(),
    ];

    println!("   Recorded {} runs", runs.len());

    // -------------------------------------------------------------------------
    // 2. Validate the collection
    // -------------------------------------------------------------------------
    println!("\n2. Validating the collection...");

    let collection = PipelineCollection::new(runs).expect("runs are well formed");

    println!("   Metrics reported: {:?}", collection.metric_names());
    println!("   Distinct primitives: {}", collection.primitive_ids().len());

    // -------------------------------------------------------------------------
    // 3. Profile the runs against a metric
    // -------------------------------------------------------------------------
    println!("\n3. Profiling against accuracy...");

    let profile =
        PipelineProfile::analyze(&collection, MetricRequest::Score("accuracy".to_string()))
            .expect("accuracy is reported by every run");

    println!(
        "   Metric series: {:?}",
        profile.metric_series().values()
    );

    // -------------------------------------------------------------------------
    // 4. Importance ranking (median split)
    // -------------------------------------------------------------------------
    println!("\n4. Primitive importance (descending):");

    for (primitive, importance) in profile.ranked_importance() {
        println!(
            "   {importance:+.3}  {}  [{primitive}]",
            primitive_label(primitive)
        );
    }

    // -------------------------------------------------------------------------
    // 5. Normalized hyperparameter table
    // -------------------------------------------------------------------------
    println!("\n5. Hyperparameter table for the forest:");

    let forest_rows = profile
        .hyperparam_table()
        .rows(FOREST)
        .expect("forest appears in the runs");
    for row in forest_rows {
        println!("   {}: {:?}", row.pipeline_id(), row.values());
    }

    // -------------------------------------------------------------------------
    // 6. Arrow export
    // -------------------------------------------------------------------------
    println!("\n6. Exporting Arrow batches...");

    let table = hyperparam_table_batch(profile.hyperparam_table(), FOREST).unwrap();
    println!(
        "   Forest table batch: {} rows x {} columns",
        table.num_rows(),
        table.num_columns()
    );

    let metadata = metadata_rows_batch(profile.metadata()).unwrap();
    println!("   Metadata rows batch: {} rows", metadata.num_rows());

    let ranked = importance_batch(profile.importance()).unwrap();
    println!("   Importance batch: {} rows", ranked.num_rows());

    // -------------------------------------------------------------------------
    // 7. Serialization demonstration
    // -------------------------------------------------------------------------
    println!("\n7. JSON serialization:");

    let json = serde_json::to_string_pretty(&collection.pipelines()[0]).unwrap();
    println!("   First run record:\n{json}");

    println!("\n=== Profiling Complete ===");
}
