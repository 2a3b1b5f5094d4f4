//! Query result tables
//!
//! The core exposes results as plain typed sequences; all formatting is a
//! front-end concern.

use crate::data::{ColumnType, Scalar};

/// One projected column with its values
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnVector {
    pub name: String,
    pub dtype: ColumnType,
    pub values: Vec<Scalar>,
}

/// A table of projected columns, one vector per requested column
///
/// Column order matches the request, not the physical layout. Every vector
/// holds the same number of values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    pub columns: Vec<ColumnVector>,
}

impl ResultSet {
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn num_rows(&self) -> usize {
        self.columns.first().map(|c| c.values.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.num_rows() == 0
    }

    /// First column with this name
    pub fn column(&self, name: &str) -> Option<&ColumnVector> {
        self.columns.iter().find(|c| c.name == name)
    }
}
