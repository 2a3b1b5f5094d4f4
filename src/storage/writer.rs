//! Initial file writer
//!
//! The receiving end of the ingestion interface: typed rows arrive in schema
//! order and become the group-0 data region at offset 0, followed by the
//! first trailer.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::data::{write_scalar, Scalar};
use crate::storage::{write_trailer, ColumnDef, HtySchema};
use crate::{HtyError, Result};

/// Validate one row against the declared columns
pub(crate) fn check_row(columns: &[ColumnDef], row: &[Scalar]) -> Result<()> {
    if row.len() != columns.len() {
        return Err(HtyError::ColumnCountMismatch {
            expected: columns.len(),
            actual: row.len(),
        });
    }
    for (def, value) in columns.iter().zip(row) {
        if value.column_type() != def.dtype {
            return Err(HtyError::TypeMismatch {
                column: def.name.clone(),
                expected: def.dtype,
                actual: value.column_type(),
            });
        }
    }
    Ok(())
}

/// Write a fresh single-group HTY file and return the schema it carries
pub fn write_file(path: &Path, columns: Vec<ColumnDef>, rows: &[Vec<Scalar>]) -> Result<HtySchema> {
    for row in rows {
        check_row(&columns, row)?;
    }

    let schema = HtySchema::single_group(columns, rows.len() as u32);

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    for row in rows {
        for &value in row {
            write_scalar(&mut writer, value)?;
        }
    }
    write_trailer(&mut writer, &schema)?;
    writer.flush()?;

    Ok(schema)
}
