//! Worksheet type

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One row of cell text, in document order
pub type Row = Vec<String>;

/// All rows of a worksheet, in document order
pub type Table = Vec<Row>;

/// A worksheet (single sheet in a workbook)
///
/// Rows are not required to have the same length and the name is not
/// required to be unique within a workbook.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Worksheet {
    /// Sheet name
    name: String,
    /// Cell text, row by row
    table: Table,
}

impl Worksheet {
    /// Create a new worksheet with the given name and no rows
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            table: Table::new(),
        }
    }

    /// Create a worksheet from an existing table
    pub fn with_table<S: Into<String>>(name: S, table: Table) -> Self {
        Self {
            name: name.into(),
            table,
        }
    }

    /// Get the sheet name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get all rows
    pub fn rows(&self) -> &[Row] {
        &self.table
    }

    /// Get a row by index (0-based)
    pub fn row(&self, index: usize) -> Option<&Row> {
        self.table.get(index)
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.table.len()
    }

    /// Check if the sheet has no rows
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Width of the widest row
    pub fn column_count(&self) -> usize {
        self.table.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// The first row, which callers conventionally treat as the header
    pub fn header(&self) -> Option<&Row> {
        self.table.first()
    }

    /// All rows after the first
    pub fn body(&self) -> &[Row] {
        self.table.get(1..).unwrap_or(&[])
    }

    /// Append a row
    pub fn push_row(&mut self, row: Row) {
        self.table.push(row);
    }

    /// Consume the sheet and return its table
    pub fn into_table(self) -> Table {
        self.table
    }
}
