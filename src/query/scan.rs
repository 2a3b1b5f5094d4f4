//! Scan engine: projection and filtering over the group-0 data region
//!
//! Every field access recomputes its absolute byte position from the schema
//! and reads 4 bytes at that offset; nothing is assumed about column
//! contiguity. One file handle is scoped to each call and shared by both
//! passes of the two-pass operations.

use std::fs::File;
use std::path::Path;

use crate::data::{read_scalar_at, ColumnType, Scalar};
use crate::query::{ColumnVector, CompareOp, Predicate, ResultSet};
use crate::storage::{ColumnGroup, HtySchema};
use crate::{HtyError, Result};

/// Resolve requested names to (index, type) pairs before any read
fn resolve_columns(group: &ColumnGroup, names: &[&str]) -> Result<Vec<(usize, ColumnType)>> {
    names
        .iter()
        .map(|name| {
            group
                .find_column(name)
                .ok_or_else(|| HtyError::ColumnNotFound((*name).to_string()))
        })
        .collect()
}

/// Project one column across all rows
///
/// The result always holds exactly `num_rows` values.
pub fn project_single_column(
    schema: &HtySchema,
    path: &Path,
    column_name: &str,
) -> Result<Vec<Scalar>> {
    let group = schema.primary_group()?;
    let (col, dtype) = group
        .find_column(column_name)
        .ok_or_else(|| HtyError::ColumnNotFound(column_name.to_string()))?;

    let file = File::open(path)?;
    let mut values = Vec::with_capacity(schema.num_rows as usize);
    for row in 0..u64::from(schema.num_rows) {
        values.push(read_scalar_at(&file, group.field_offset(row, col), dtype)?);
    }
    Ok(values)
}

/// Project several columns; result order follows `column_names`
///
/// Any unknown name aborts the whole call with no partial result.
pub fn project_columns(
    schema: &HtySchema,
    path: &Path,
    column_names: &[&str],
) -> Result<ResultSet> {
    let group = schema.primary_group()?;
    let resolved = resolve_columns(group, column_names)?;

    let file = File::open(path)?;
    let mut columns = Vec::with_capacity(resolved.len());
    for (name, &(col, dtype)) in column_names.iter().zip(&resolved) {
        let mut values = Vec::with_capacity(schema.num_rows as usize);
        for row in 0..u64::from(schema.num_rows) {
            values.push(read_scalar_at(&file, group.field_offset(row, col), dtype)?);
        }
        columns.push(ColumnVector {
            name: (*name).to_string(),
            dtype,
            values,
        });
    }
    Ok(ResultSet { columns })
}

/// Filter one column, returning the matching stored values
///
/// Two passes over the same handle: count the matches, then collect into a
/// vector sized exactly by the count. An empty table yields an empty vector.
pub fn filter(
    schema: &HtySchema,
    path: &Path,
    column_name: &str,
    op: CompareOp,
    value: Scalar,
) -> Result<Vec<Scalar>> {
    let group = schema.primary_group()?;
    let (col, dtype) = group
        .find_column(column_name)
        .ok_or_else(|| HtyError::ColumnNotFound(column_name.to_string()))?;
    let predicate = Predicate::new(op, value);
    predicate.check_operand(column_name, dtype)?;

    let file = File::open(path)?;

    let mut matching = 0usize;
    for row in 0..u64::from(schema.num_rows) {
        let stored = read_scalar_at(&file, group.field_offset(row, col), dtype)?;
        if predicate.matches(stored) {
            matching += 1;
        }
    }

    let mut values = Vec::with_capacity(matching);
    for row in 0..u64::from(schema.num_rows) {
        let stored = read_scalar_at(&file, group.field_offset(row, col), dtype)?;
        if predicate.matches(stored) {
            values.push(stored);
        }
    }
    Ok(values)
}

/// Filter on one column and project others for the matching rows
///
/// Pass 1 buffers the matching row indices; pass 2 re-reads only those rows,
/// once per projected column. Row order in the result is ascending original
/// row order; zero matches yield an empty table with the requested headers.
pub fn project_and_filter(
    schema: &HtySchema,
    path: &Path,
    projected_columns: &[&str],
    filter_column: &str,
    op: CompareOp,
    value: Scalar,
) -> Result<ResultSet> {
    let group = schema.primary_group()?;
    let (filter_col, filter_dtype) = group
        .find_column(filter_column)
        .ok_or_else(|| HtyError::ColumnNotFound(filter_column.to_string()))?;
    let resolved = resolve_columns(group, projected_columns)?;
    let predicate = Predicate::new(op, value);
    predicate.check_operand(filter_column, filter_dtype)?;

    let file = File::open(path)?;

    let mut matches = Vec::new();
    for row in 0..u64::from(schema.num_rows) {
        let stored = read_scalar_at(&file, group.field_offset(row, filter_col), filter_dtype)?;
        if predicate.matches(stored) {
            matches.push(row);
        }
    }

    let mut columns = Vec::with_capacity(resolved.len());
    for (name, &(col, dtype)) in projected_columns.iter().zip(&resolved) {
        let mut values = Vec::with_capacity(matches.len());
        for &row in &matches {
            values.push(read_scalar_at(&file, group.field_offset(row, col), dtype)?);
        }
        columns.push(ColumnVector {
            name: (*name).to_string(),
            dtype,
            values,
        });
    }
    Ok(ResultSet { columns })
}
