//! Trailer schema model
//!
//! The JSON trailer is the sole source of schema truth; the data region
//! carries no self-describing markers. Field names here map one-to-one onto
//! the trailer's JSON keys.

use serde::{Deserialize, Serialize};

use crate::data::{ColumnType, FIELD_SIZE};
use crate::{HtyError, Result};

/// One column within a group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDef {
    #[serde(rename = "column_name")]
    pub name: String,
    #[serde(rename = "column_type")]
    pub dtype: ColumnType,
}

impl ColumnDef {
    pub fn new(name: impl Into<String>, dtype: ColumnType) -> Self {
        Self {
            name: name.into(),
            dtype,
        }
    }
}

/// A contiguous row-major data block described by one offset and one
/// ordered column list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnGroup {
    pub num_columns: u32,
    pub offset: u32,
    pub columns: Vec<ColumnDef>,
}

impl ColumnGroup {
    /// Byte width of one row in this group
    #[inline]
    pub fn row_width(&self) -> u64 {
        self.columns.len() as u64 * FIELD_SIZE
    }

    /// Absolute byte position of one field:
    /// `offset + row * columns.len() * 4 + col * 4`
    #[inline]
    pub fn field_offset(&self, row: u64, col: usize) -> u64 {
        self.offset as u64 + row * self.row_width() + col as u64 * FIELD_SIZE
    }

    /// First column matching `name`, with its ordinal and type
    ///
    /// Duplicate names resolve to the first declaration.
    pub fn find_column(&self, name: &str) -> Option<(usize, ColumnType)> {
        self.columns
            .iter()
            .position(|c| c.name == name)
            .map(|idx| (idx, self.columns[idx].dtype))
    }
}

/// In-memory form of the trailer JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HtySchema {
    pub num_rows: u32,
    pub num_groups: u32,
    pub groups: Vec<ColumnGroup>,
}

impl HtySchema {
    /// Build a fresh single-group schema with its data block at offset 0
    pub fn single_group(columns: Vec<ColumnDef>, num_rows: u32) -> Self {
        let group = ColumnGroup {
            num_columns: columns.len() as u32,
            offset: 0,
            columns,
        };
        Self {
            num_rows,
            num_groups: 1,
            groups: vec![group],
        }
    }

    /// Group 0, the only group query operations address
    pub fn primary_group(&self) -> Result<&ColumnGroup> {
        self.groups
            .first()
            .ok_or_else(|| HtyError::SchemaParse("trailer has no column groups".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_column_group() -> ColumnGroup {
        ColumnGroup {
            num_columns: 2,
            offset: 0,
            columns: vec![
                ColumnDef::new("age", ColumnType::Int),
                ColumnDef::new("score", ColumnType::Float),
            ],
        }
    }

    #[test]
    fn test_trailer_json_field_names() {
        let schema = HtySchema {
            num_rows: 3,
            num_groups: 1,
            groups: vec![two_column_group()],
        };
        let json = serde_json::to_string(&schema).unwrap();

        assert!(json.contains("\"num_rows\":3"));
        assert!(json.contains("\"num_groups\":1"));
        assert!(json.contains("\"num_columns\":2"));
        assert!(json.contains("\"column_name\":\"age\""));
        assert!(json.contains("\"column_type\":\"int\""));
        assert!(json.contains("\"column_type\":\"float\""));

        let restored: HtySchema = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, schema);
    }

    #[test]
    fn test_missing_field_rejected() {
        let json = r#"{"num_rows":3,"groups":[]}"#;
        assert!(serde_json::from_str::<HtySchema>(json).is_err());
    }

    #[test]
    fn test_field_offset_arithmetic() {
        let mut group = two_column_group();
        group.offset = 100;

        assert_eq!(group.row_width(), 8);
        assert_eq!(group.field_offset(0, 0), 100);
        assert_eq!(group.field_offset(0, 1), 104);
        assert_eq!(group.field_offset(2, 1), 120);
    }

    #[test]
    fn test_duplicate_names_resolve_first() {
        let group = ColumnGroup {
            num_columns: 3,
            offset: 0,
            columns: vec![
                ColumnDef::new("x", ColumnType::Int),
                ColumnDef::new("y", ColumnType::Float),
                ColumnDef::new("x", ColumnType::Float),
            ],
        };
        assert_eq!(group.find_column("x"), Some((0, ColumnType::Int)));
        assert_eq!(group.find_column("missing"), None);
    }

    #[test]
    fn test_primary_group_requires_one() {
        let schema = HtySchema {
            num_rows: 0,
            num_groups: 0,
            groups: vec![],
        };
        assert!(matches!(
            schema.primary_group(),
            Err(HtyError::SchemaParse(_))
        ));
    }
}
