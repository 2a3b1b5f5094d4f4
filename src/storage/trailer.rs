//! Trailer codec
//!
//! The trailer sits at the end of the file: the schema as compact JSON,
//! followed by a u32 little-endian byte length of that JSON. Locating the
//! trailer therefore needs two seeks from end-of-file; everything before it
//! is data region.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::storage::HtySchema;
use crate::{HtyError, Result};

/// Width of the trailer-length footer in bytes
pub const TRAILER_LEN_SIZE: u64 = 4;

/// Find the trailer of an open file: returns (start offset, JSON length)
fn locate_trailer(file: &mut File) -> Result<(u64, u64)> {
    let file_len = file.metadata()?.len();
    if file_len < TRAILER_LEN_SIZE {
        return Err(HtyError::TruncatedFile {
            expected: TRAILER_LEN_SIZE,
            actual: file_len,
        });
    }

    file.seek(SeekFrom::End(-(TRAILER_LEN_SIZE as i64)))?;
    let trailer_len = file.read_u32::<LittleEndian>()? as u64;
    if file_len < TRAILER_LEN_SIZE + trailer_len {
        return Err(HtyError::TruncatedFile {
            expected: TRAILER_LEN_SIZE + trailer_len,
            actual: file_len,
        });
    }

    Ok((file_len - TRAILER_LEN_SIZE - trailer_len, trailer_len))
}

/// Load the schema from the trailer of an HTY file
pub fn read_trailer(path: &Path) -> Result<HtySchema> {
    let mut file = File::open(path)?;
    let (start, len) = locate_trailer(&mut file)?;

    file.seek(SeekFrom::Start(start))?;
    let mut trailer = vec![0u8; len as usize];
    file.read_exact(&mut trailer)?;

    serde_json::from_slice(&trailer).map_err(|e| HtyError::SchemaParse(e.to_string()))
}

/// Byte offset where the trailer begins, i.e. the end of the data region
pub fn trailer_start(path: &Path) -> Result<u64> {
    let mut file = File::open(path)?;
    let (start, _) = locate_trailer(&mut file)?;
    Ok(start)
}

/// Serialize the schema and its length footer
///
/// Must be the last write against a destination file.
pub fn write_trailer<W: Write>(writer: &mut W, schema: &HtySchema) -> Result<()> {
    let trailer = serde_json::to_vec(schema).map_err(|e| HtyError::SchemaParse(e.to_string()))?;
    writer.write_all(&trailer)?;
    writer.write_u32::<LittleEndian>(trailer.len() as u32)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ColumnType;
    use crate::storage::ColumnDef;
    use std::io::Write as _;
    use tempfile::tempdir;

    fn sample_schema() -> HtySchema {
        HtySchema::single_group(
            vec![
                ColumnDef::new("age", ColumnType::Int),
                ColumnDef::new("score", ColumnType::Float),
            ],
            2,
        )
    }

    #[test]
    fn test_trailer_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("trailer.hty");

        let schema = sample_schema();
        {
            let mut file = File::create(&path).unwrap();
            // 2 rows x 2 columns of data before the trailer
            file.write_all(&[0u8; 16]).unwrap();
            write_trailer(&mut file, &schema).unwrap();
        }

        assert_eq!(read_trailer(&path).unwrap(), schema);
        assert_eq!(trailer_start(&path).unwrap(), 16);
    }

    #[test]
    fn test_truncated_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("short.hty");
        std::fs::write(&path, [0u8, 1]).unwrap();

        assert!(matches!(
            read_trailer(&path),
            Err(HtyError::TruncatedFile { .. })
        ));
    }

    #[test]
    fn test_length_past_start_of_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad_len.hty");
        // Length footer claims 1000 bytes of JSON in a 4-byte file.
        std::fs::write(&path, 1000u32.to_le_bytes()).unwrap();

        assert!(matches!(
            read_trailer(&path),
            Err(HtyError::TruncatedFile { .. })
        ));
    }

    #[test]
    fn test_garbage_trailer_is_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("garbage.hty");
        {
            let mut file = File::create(&path).unwrap();
            let junk = b"not json at all";
            file.write_all(junk).unwrap();
            file.write_all(&(junk.len() as u32).to_le_bytes()).unwrap();
        }

        assert!(matches!(
            read_trailer(&path),
            Err(HtyError::SchemaParse(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        assert!(matches!(
            read_trailer(Path::new("/nonexistent/no.hty")),
            Err(HtyError::Io(_))
        ));
    }
}
