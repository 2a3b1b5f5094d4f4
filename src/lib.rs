//! HtyBase Core Storage Engine
//!
//! A minimal columnar flat-file storage engine around the HTY format: a
//! fixed-width binary data region followed by a self-describing JSON schema
//! trailer and a 4-byte trailer length, little-endian throughout.
//!
//! The crate provides metadata extraction, single- and multi-column
//! projection, predicate filtering, combined projection+filtering, and row
//! appending via full-file rewrite. Two thin binaries (`hty-convert`,
//! `hty-analyze`) sit on top of the library.

pub mod data;
pub mod ingest;
pub mod query;
pub mod storage;

// Re-export main types
pub use data::{read_scalar, read_scalar_at, write_scalar, ColumnType, Scalar};
pub use query::{
    filter, project_and_filter, project_columns, project_single_column, ColumnVector, CompareOp,
    Predicate, ResultSet,
};
pub use storage::{
    append_rows, append_rows_in_place, read_trailer, write_file, write_trailer, ColumnDef,
    ColumnGroup, HtySchema,
};

/// Storage engine error type
#[derive(Debug, thiserror::Error)]
pub enum HtyError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("file too short for trailer: need {expected} bytes, have {actual}")]
    TruncatedFile { expected: u64, actual: u64 },

    #[error("not a valid HTY file: {0}")]
    SchemaParse(String),

    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("row has {actual} columns, schema has {expected}")]
    ColumnCountMismatch { expected: usize, actual: usize },

    #[error("invalid operator code: {0} (expected 1..=6)")]
    InvalidOperator(u8),

    #[error("type mismatch on column {column}: declared {expected}, got {actual}")]
    TypeMismatch {
        column: String,
        expected: ColumnType,
        actual: ColumnType,
    },

    #[error("cannot parse {value:?} as {expected}")]
    InvalidToken { value: String, expected: ColumnType },

    #[error("CSV parse error: {0}")]
    CsvParse(String),
}

pub type Result<T> = std::result::Result<T, HtyError>;
