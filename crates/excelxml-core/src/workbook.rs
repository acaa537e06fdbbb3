//! Workbook type - the main document structure

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::worksheet::Worksheet;

/// A workbook (spreadsheet document)
///
/// Worksheets are kept in the order they were added, which for extracted
/// workbooks is document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Workbook {
    /// Worksheets in the workbook
    worksheets: Vec<Worksheet>,
}

impl Workbook {
    /// Create an empty workbook with no worksheets
    pub fn new() -> Self {
        Self {
            worksheets: Vec::new(),
        }
    }

    /// Get the number of worksheets
    pub fn sheet_count(&self) -> usize {
        self.worksheets.len()
    }

    /// Check if the workbook has no worksheets
    pub fn is_empty(&self) -> bool {
        self.worksheets.is_empty()
    }

    /// Get a worksheet by index
    pub fn worksheet(&self, index: usize) -> Option<&Worksheet> {
        self.worksheets.get(index)
    }

    /// Get the first worksheet
    pub fn first(&self) -> Option<&Worksheet> {
        self.worksheets.first()
    }

    /// Get the first worksheet with the given name
    pub fn worksheet_by_name(&self, name: &str) -> Option<&Worksheet> {
        self.worksheets.iter().find(|ws| ws.name() == name)
    }

    /// Iterate over all worksheets
    pub fn worksheets(&self) -> impl Iterator<Item = &Worksheet> {
        self.worksheets.iter()
    }

    /// Append a worksheet, returning its index
    pub fn push_worksheet(&mut self, worksheet: Worksheet) -> usize {
        let index = self.worksheets.len();
        self.worksheets.push(worksheet);
        index
    }

    /// Consume the workbook and return its worksheets
    pub fn into_worksheets(self) -> Vec<Worksheet> {
        self.worksheets
    }
}

impl From<Vec<Worksheet>> for Workbook {
    fn from(worksheets: Vec<Worksheet>) -> Self {
        Self { worksheets }
    }
}

impl FromIterator<Worksheet> for Workbook {
    fn from_iter<I: IntoIterator<Item = Worksheet>>(iter: I) -> Self {
        Self {
            worksheets: iter.into_iter().collect(),
        }
    }
}
