//! CSV → HTY ingestion
//!
//! Plain comma/newline tokenizing: the first line is the header, every
//! following non-empty line one row. A column is typed float when any of its
//! values carries a decimal point, int otherwise.

use std::fs;
use std::path::Path;

use crate::data::{ColumnType, Scalar};
use crate::storage::{write_file, ColumnDef, HtySchema};
use crate::{HtyError, Result};

/// Convert a CSV file into a fresh single-group HTY file
pub fn convert_csv_to_hty(csv_path: &Path, hty_path: &Path) -> Result<HtySchema> {
    let text = fs::read_to_string(csv_path)?;
    let (columns, rows) = parse_csv(&text)?;
    log::info!(
        "ingesting {} rows x {} columns from {}",
        rows.len(),
        columns.len(),
        csv_path.display()
    );
    write_file(hty_path, columns, &rows)
}

fn parse_csv(text: &str) -> Result<(Vec<ColumnDef>, Vec<Vec<Scalar>>)> {
    let mut lines = text.lines().filter(|l| !l.trim().is_empty());
    let header = lines
        .next()
        .ok_or_else(|| HtyError::CsvParse("input has no header line".to_string()))?;
    let names: Vec<&str> = header.split(',').map(str::trim).collect();

    let records: Vec<Vec<&str>> = lines
        .map(|line| line.split(',').map(str::trim).collect())
        .collect();

    for record in &records {
        if record.len() != names.len() {
            return Err(HtyError::ColumnCountMismatch {
                expected: names.len(),
                actual: record.len(),
            });
        }
    }

    // Sniff per column: float wins as soon as one value has a decimal point.
    let types: Vec<ColumnType> = (0..names.len())
        .map(|col| {
            if records.iter().any(|r| r[col].contains('.')) {
                ColumnType::Float
            } else {
                ColumnType::Int
            }
        })
        .collect();

    let columns = names
        .iter()
        .zip(&types)
        .map(|(name, &dtype)| ColumnDef::new(*name, dtype))
        .collect();

    let rows = records
        .iter()
        .map(|record| {
            record
                .iter()
                .zip(&types)
                .map(|(token, &dtype)| Scalar::parse_token(token, dtype))
                .collect::<Result<Vec<_>>>()
        })
        .collect::<Result<Vec<_>>>()?;

    Ok((columns, rows))
}
