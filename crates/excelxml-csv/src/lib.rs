//! # excelxml-csv
//!
//! CSV writer for excelxml workbooks.
//!
//! A workbook is saved either as one combined file named after its first
//! sheet, or as one file per sheet. See [`OutputMode`].

mod error;
mod layout;
mod options;
mod writer;

pub use error::{CsvError, CsvResult};
pub use layout::{plan_output, OutputFile};
pub use options::{CsvWriteOptions, LineTerminator, OutputMode};
pub use writer::CsvWriter;
