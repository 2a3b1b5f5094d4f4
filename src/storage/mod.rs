//! Storage module - the HTY file format
//!
//! File layout, little-endian throughout:
//! ```text
//! ┌──────────────────────────────┐
//! │ Group 0 data (row-major)     │  num_rows × num_columns × 4 bytes
//! ├──────────────────────────────┤
//! │ ... further groups ...       │
//! ├──────────────────────────────┤
//! │ JSON trailer (compact)       │
//! ├──────────────────────────────┤
//! │ Trailer length (u32)         │
//! └──────────────────────────────┘
//! ```

pub mod append;
pub mod schema;
pub mod trailer;
pub mod writer;

pub use append::{append_rows, append_rows_in_place};
pub use schema::{ColumnDef, ColumnGroup, HtySchema};
pub use trailer::{read_trailer, trailer_start, write_trailer, TRAILER_LEN_SIZE};
pub use writer::write_file;
