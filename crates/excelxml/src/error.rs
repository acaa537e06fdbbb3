//! Unified error type

use thiserror::Error;

use excelxml_csv::CsvError;
use excelxml_reader::ReadError;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors from reading or saving a workbook
#[derive(Debug, Error)]
pub enum Error {
    /// Extraction failed
    #[error(transparent)]
    Read(#[from] ReadError),

    /// Saving as CSV failed
    #[error(transparent)]
    Csv(#[from] CsvError),
}

/// Broad category of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed XML or an I/O failure while reading the input
    Decode,
    /// Well-formed XML without any worksheet
    SchemaMismatch,
    /// Creating or writing an output file failed
    Write,
}

impl Error {
    /// Get the category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Read(ReadError::Decode { .. }) => ErrorKind::Decode,
            Error::Read(ReadError::SchemaMismatch) => ErrorKind::SchemaMismatch,
            Error::Csv(_) => ErrorKind::Write,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_kinds() {
        let err: Error = ReadError::SchemaMismatch.into();
        assert_eq!(err.kind(), ErrorKind::SchemaMismatch);

        let err: Error = CsvError::EmptyWorkbook.into();
        assert_eq!(err.kind(), ErrorKind::Write);

        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: Error = CsvError::Write {
            operation: "creating file",
            path: PathBuf::from("Sheet1.csv"),
            source: io_err.into(),
        }
        .into();
        assert_eq!(err.kind(), ErrorKind::Write);
        assert!(err.to_string().contains("creating file 'Sheet1.csv'"));
    }

    #[test]
    fn test_display_is_transparent() {
        let err: Error = ReadError::SchemaMismatch.into();
        assert_eq!(err.to_string(), ReadError::SchemaMismatch.to_string());
    }
}
