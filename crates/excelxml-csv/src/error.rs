//! CSV error types

use std::path::PathBuf;

use thiserror::Error;

/// Result type for CSV operations
pub type CsvResult<T> = std::result::Result<T, CsvError>;

/// Errors that can occur while saving a workbook as CSV
///
/// Files written before the failing one are left in place.
#[derive(Debug, Error)]
pub enum CsvError {
    /// Creating, writing or flushing an output file failed
    #[error("write error while {operation} '{}': {source}", .path.display())]
    Write {
        /// Stage that failed
        operation: &'static str,
        /// File being written
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A sheet name that cannot be used as a file name
    #[error("invalid file name for sheet '{name}'")]
    InvalidFileName {
        /// Offending sheet name
        name: String,
    },

    /// Nothing to save
    #[error("workbook has no worksheets to save")]
    EmptyWorkbook,
}

impl CsvError {
    pub(crate) fn write(
        operation: &'static str,
        path: impl Into<PathBuf>,
        source: impl Into<csv::Error>,
    ) -> Self {
        CsvError::Write {
            operation,
            path: path.into(),
            source: source.into(),
        }
    }
}
