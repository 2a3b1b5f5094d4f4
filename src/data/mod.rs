//! Data types shared by the storage and query layers

pub mod scalar;

pub use scalar::{read_scalar, read_scalar_at, write_scalar, ColumnType, Scalar, FIELD_SIZE};
