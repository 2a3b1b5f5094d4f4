//! Scalar values and the 4-byte field codec
//!
//! Every stored field is exactly 4 little-endian bytes: a signed 32-bit
//! integer or an IEEE-754 single-precision float. The trailer's declared
//! column type decides which of the two a field decodes as; the data region
//! itself carries no markers.

use std::fmt;
use std::fs::File;
use std::io::{Read, Write};
use std::os::unix::fs::FileExt;

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use serde::{Deserialize, Serialize};

use crate::{HtyError, Result};

/// Physical width of every stored field in bytes
pub const FIELD_SIZE: u64 = 4;

/// Column data type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Int,
    Float,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnType::Int => f.write_str("int"),
            ColumnType::Float => f.write_str("float"),
        }
    }
}

/// One stored value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar {
    Int(i32),
    Float(f32),
}

impl Scalar {
    /// The column type this value encodes as
    #[inline]
    pub fn column_type(&self) -> ColumnType {
        match self {
            Scalar::Int(_) => ColumnType::Int,
            Scalar::Float(_) => ColumnType::Float,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Scalar::Int(v) => Some(*v),
            Scalar::Float(_) => None,
        }
    }

    pub fn as_f32(&self) -> Option<f32> {
        match self {
            Scalar::Int(_) => None,
            Scalar::Float(v) => Some(*v),
        }
    }

    /// Decode the 4-byte on-disk representation under a declared type
    #[inline]
    pub fn from_le_bytes(bytes: [u8; 4], dtype: ColumnType) -> Self {
        match dtype {
            ColumnType::Int => Scalar::Int(i32::from_le_bytes(bytes)),
            ColumnType::Float => Scalar::Float(f32::from_le_bytes(bytes)),
        }
    }

    /// Encode into the 4-byte on-disk representation
    #[inline]
    pub fn to_le_bytes(self) -> [u8; 4] {
        match self {
            Scalar::Int(v) => v.to_le_bytes(),
            Scalar::Float(v) => v.to_le_bytes(),
        }
    }

    /// Convert an ingestion token to a value of the sniffed type
    pub fn parse_token(token: &str, dtype: ColumnType) -> Result<Self> {
        let token = token.trim();
        let parsed = match dtype {
            ColumnType::Int => token.parse::<i32>().map(Scalar::Int).ok(),
            ColumnType::Float => token.parse::<f32>().map(Scalar::Float).ok(),
        };
        parsed.ok_or_else(|| HtyError::InvalidToken {
            value: token.to_string(),
            expected: dtype,
        })
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Int(v) => write!(f, "{}", v),
            // Whole floats keep a trailing .0 so the type stays visible.
            Scalar::Float(v) if v.fract() == 0.0 && v.is_finite() => write!(f, "{:.1}", v),
            Scalar::Float(v) => write!(f, "{}", v),
        }
    }
}

/// Read one field from a sequential reader
pub fn read_scalar<R: Read>(reader: &mut R, dtype: ColumnType) -> Result<Scalar> {
    let value = match dtype {
        ColumnType::Int => Scalar::Int(reader.read_i32::<LittleEndian>()?),
        ColumnType::Float => Scalar::Float(reader.read_f32::<LittleEndian>()?),
    };
    Ok(value)
}

/// Write one field to a sequential writer
pub fn write_scalar<W: Write>(writer: &mut W, value: Scalar) -> Result<()> {
    match value {
        Scalar::Int(v) => writer.write_i32::<LittleEndian>(v)?,
        Scalar::Float(v) => writer.write_f32::<LittleEndian>(v)?,
    }
    Ok(())
}

/// Read one field at an absolute file offset without seeking
pub fn read_scalar_at(file: &File, offset: u64, dtype: ColumnType) -> Result<Scalar> {
    let mut buf = [0u8; FIELD_SIZE as usize];
    file.read_exact_at(&mut buf, offset)?;
    Ok(Scalar::from_le_bytes(buf, dtype))
}
