//! Mutation engine: append rows via full-file rewrite
//!
//! An append never edits a file in place. The pre-trailer byte range of the
//! source is copied verbatim (any further groups included), the new rows
//! follow in row-major schema order, and the updated trailer is written
//! last. A failed append therefore leaves the source untouched and the
//! destination without a trailer.

use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::data::{write_scalar, Scalar};
use crate::storage::writer::check_row;
use crate::storage::{trailer_start, write_trailer, HtySchema};
use crate::Result;

/// Append rows, writing the new version of the file to `destination`
///
/// The source file is never modified. On success the schema's row count is
/// bumped in memory to match the destination's trailer.
pub fn append_rows(
    schema: &mut HtySchema,
    source: &Path,
    destination: &Path,
    rows: &[Vec<Scalar>],
) -> Result<()> {
    validate_rows(schema, rows)?;

    let file = File::create(destination)?;
    let mut writer = BufWriter::new(file);
    write_appended(schema, source, rows, &mut writer)?;
    writer.flush()?;

    schema.num_rows += rows.len() as u32;
    Ok(())
}

/// Append rows in place: new version to a temp file in the same directory,
/// then an atomic rename over `path`
///
/// The visible file is always either the old or the new complete version.
pub fn append_rows_in_place(
    schema: &mut HtySchema,
    path: &Path,
    rows: &[Vec<Scalar>],
) -> Result<()> {
    validate_rows(schema, rows)?;

    let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
    let mut tmp = match dir {
        Some(dir) => NamedTempFile::new_in(dir)?,
        None => NamedTempFile::new_in(".")?,
    };
    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        write_appended(schema, path, rows, &mut writer)?;
        writer.flush()?;
    }
    tmp.persist(path).map_err(|e| e.error)?;

    schema.num_rows += rows.len() as u32;
    Ok(())
}

fn validate_rows(schema: &HtySchema, rows: &[Vec<Scalar>]) -> Result<()> {
    let group = schema.primary_group()?;
    for row in rows {
        check_row(&group.columns, row)?;
    }
    Ok(())
}

fn write_appended<W: Write>(
    schema: &HtySchema,
    source: &Path,
    rows: &[Vec<Scalar>],
    writer: &mut W,
) -> Result<()> {
    // Raw byte-range copy keeps every group's data intact, not just group 0.
    let data_end = trailer_start(source)?;
    let source_file = File::open(source)?;
    let mut data = source_file.take(data_end);
    std::io::copy(&mut data, writer)?;

    for row in rows {
        for &value in row {
            write_scalar(writer, value)?;
        }
    }

    let mut updated = schema.clone();
    updated.num_rows += rows.len() as u32;
    write_trailer(writer, &updated)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ColumnType;
    use crate::query::project_columns;
    use crate::storage::{read_trailer, write_file, ColumnDef};
    use crate::HtyError;
    use tempfile::tempdir;

    fn seed(path: &Path) -> HtySchema {
        write_file(
            path,
            vec![
                ColumnDef::new("age", ColumnType::Int),
                ColumnDef::new("score", ColumnType::Float),
            ],
            &[
                vec![Scalar::Int(20), Scalar::Float(3.5)],
                vec![Scalar::Int(30), Scalar::Float(4.0)],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_append_to_destination() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("source.hty");
        let dest = dir.path().join("dest.hty");

        let mut schema = seed(&source);
        let source_before = std::fs::read(&source).unwrap();

        append_rows(
            &mut schema,
            &source,
            &dest,
            &[vec![Scalar::Int(40), Scalar::Float(2.5)]],
        )
        .unwrap();

        assert_eq!(schema.num_rows, 3);
        assert_eq!(read_trailer(&dest).unwrap().num_rows, 3);
        // Source is byte-for-byte untouched.
        assert_eq!(std::fs::read(&source).unwrap(), source_before);

        // Original rows first and unchanged, new row after.
        let dest_schema = read_trailer(&dest).unwrap();
        let table = project_columns(&dest_schema, &dest, &["age", "score"]).unwrap();
        assert_eq!(
            table.column("age").unwrap().values,
            vec![Scalar::Int(20), Scalar::Int(30), Scalar::Int(40)]
        );
        assert_eq!(
            table.column("score").unwrap().values,
            vec![Scalar::Float(3.5), Scalar::Float(4.0), Scalar::Float(2.5)]
        );
    }

    #[test]
    fn test_append_in_place() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.hty");

        let mut schema = seed(&path);
        append_rows_in_place(
            &mut schema,
            &path,
            &[
                vec![Scalar::Int(40), Scalar::Float(2.5)],
                vec![Scalar::Int(50), Scalar::Float(1.5)],
            ],
        )
        .unwrap();

        assert_eq!(schema.num_rows, 4);
        let on_disk = read_trailer(&path).unwrap();
        assert_eq!(on_disk, schema);

        let table = project_columns(&on_disk, &path, &["age"]).unwrap();
        assert_eq!(
            table.column("age").unwrap().values,
            vec![
                Scalar::Int(20),
                Scalar::Int(30),
                Scalar::Int(40),
                Scalar::Int(50)
            ]
        );
    }

    #[test]
    fn test_width_mismatch_leaves_source_alone() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.hty");

        let mut schema = seed(&path);
        let before = std::fs::read(&path).unwrap();

        let err = append_rows_in_place(&mut schema, &path, &[vec![Scalar::Int(1)]]);
        assert!(matches!(
            err,
            Err(HtyError::ColumnCountMismatch {
                expected: 2,
                actual: 1
            })
        ));
        // Neither the file nor the in-memory row count moved.
        assert_eq!(std::fs::read(&path).unwrap(), before);
        assert_eq!(schema.num_rows, 2);
    }

    #[test]
    fn test_type_mismatch_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.hty");
        let dest = dir.path().join("dest.hty");

        let mut schema = seed(&path);
        let err = append_rows(
            &mut schema,
            &path,
            &dest,
            &[vec![Scalar::Float(1.0), Scalar::Float(2.0)]],
        );
        assert!(matches!(err, Err(HtyError::TypeMismatch { .. })));
        assert_eq!(schema.num_rows, 2);
    }

    #[test]
    fn test_append_empty_batch() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.hty");

        let mut schema = seed(&path);
        append_rows_in_place(&mut schema, &path, &[]).unwrap();
        assert_eq!(schema.num_rows, 2);
        assert_eq!(read_trailer(&path).unwrap().num_rows, 2);
    }
}
