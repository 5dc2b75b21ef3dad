//! Columnar projections of the derived tables
//!
//! Consumers that want wide-format data (plotting frontends, notebook
//! dataframes) take these `RecordBatch` views instead of walking the
//! nested structures.

use crate::analysis::{
    canonical_string, rank_importance, HyperparamMetadataIndex, HyperparamMetadataRow,
    HyperparamRow, HyperparamTable, ImportanceMap, DEFAULT_FILL,
};
use crate::error::{Error, Result};
use crate::label::primitive_label;
use arrow::array::{ArrayRef, Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use std::sync::Arc;

/// Project one primitive's hyperparameter rows into a batch.
///
/// Schema: `pipeline_id` plus one Utf8 column per parameter in the
/// primitive's union, in sorted parameter order. A primitive with no
/// declaring steps yields a zero-row batch.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] if the primitive was not tabulated,
/// or [`Error::Arrow`] if batch assembly fails.
pub fn hyperparam_table_batch(table: &HyperparamTable, primitive: &str) -> Result<RecordBatch> {
    let rows = table
        .rows(primitive)
        .ok_or_else(|| Error::InvalidInput(format!("unknown primitive `{primitive}`")))?;
    let parameters = table.registry().parameter_names(primitive);

    let mut fields = vec![Field::new("pipeline_id", DataType::Utf8, false)];
    fields.extend(
        parameters
            .iter()
            .map(|name| Field::new(*name, DataType::Utf8, false)),
    );
    let schema = Arc::new(Schema::new(fields));

    let mut columns: Vec<ArrayRef> = Vec::with_capacity(parameters.len() + 1);
    columns.push(Arc::new(StringArray::from_iter_values(
        rows.iter().map(HyperparamRow::pipeline_id),
    )));
    for name in &parameters {
        columns.push(Arc::new(StringArray::from_iter_values(
            rows.iter().map(|row| row.get(name).unwrap_or(DEFAULT_FILL)),
        )));
    }

    Ok(RecordBatch::try_new(schema, columns)?)
}

/// Project the flat metadata rows into a batch.
///
/// Schema: `pipeline_id`, `primitive`, `parameter`, `value`; values are
/// canonical JSON text. Row order matches
/// [`HyperparamMetadataIndex::rows`].
///
/// # Errors
///
/// Returns [`Error::Arrow`] if batch assembly fails.
pub fn metadata_rows_batch(index: &HyperparamMetadataIndex) -> Result<RecordBatch> {
    let rows = index.rows();
    let schema = Arc::new(Schema::new(vec![
        Field::new("pipeline_id", DataType::Utf8, false),
        Field::new("primitive", DataType::Utf8, false),
        Field::new("parameter", DataType::Utf8, false),
        Field::new("value", DataType::Utf8, false),
    ]));

    let pipeline_ids =
        StringArray::from_iter_values(rows.iter().map(HyperparamMetadataRow::pipeline_id));
    let primitives =
        StringArray::from_iter_values(rows.iter().map(HyperparamMetadataRow::primitive));
    let parameters =
        StringArray::from_iter_values(rows.iter().map(HyperparamMetadataRow::parameter));
    let values =
        StringArray::from_iter_values(rows.iter().map(|row| canonical_string(row.value())));

    Ok(RecordBatch::try_new(
        schema,
        vec![
            Arc::new(pipeline_ids),
            Arc::new(primitives),
            Arc::new(parameters),
            Arc::new(values),
        ],
    )?)
}

/// Project an importance map into a ranked batch joined with display
/// labels.
///
/// Schema: `primitive`, `label`, `importance`; rows descend by score with
/// ties broken by identifier.
///
/// # Errors
///
/// Returns [`Error::Arrow`] if batch assembly fails.
pub fn importance_batch(importance: &ImportanceMap) -> Result<RecordBatch> {
    let ranked = rank_importance(importance);
    let schema = Arc::new(Schema::new(vec![
        Field::new("primitive", DataType::Utf8, false),
        Field::new("label", DataType::Utf8, false),
        Field::new("importance", DataType::Float64, false),
    ]));

    let primitives = StringArray::from_iter_values(ranked.iter().map(|(id, _)| *id));
    let labels = StringArray::from_iter_values(ranked.iter().map(|(id, _)| primitive_label(id)));
    let scores = Float64Array::from(ranked.iter().map(|(_, score)| *score).collect::<Vec<_>>());

    Ok(RecordBatch::try_new(
        schema,
        vec![Arc::new(primitives), Arc::new(labels), Arc::new(scores)],
    )?)
}
