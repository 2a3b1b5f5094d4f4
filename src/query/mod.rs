//! Query module - projection, filtering and result tables
//!
//! All operations take an explicit schema and file path; the crate holds no
//! session state. Only group 0 of a schema is queryable.

pub mod predicate;
pub mod result;
pub mod scan;

pub use predicate::{CompareOp, Predicate};
pub use result::{ColumnVector, ResultSet};
pub use scan::{filter, project_and_filter, project_columns, project_single_column};
