//! # excelxml
//!
//! Convert spreadsheets saved in the legacy Excel 2003 XML Spreadsheet
//! format (often handed out with a misleading `.xls` extension) into CSV.
//!
//! Reading yields a [`Workbook`]: every `Worksheet` element of the document,
//! in order, each with the text of its cells row by row. Saving writes it out
//! either as one combined CSV file or as one file per sheet.
//!
//! ## Example
//!
//! ```rust
//! use excelxml::prelude::*;
//!
//! let xml = r#"<Workbook><Worksheet ss:Name="S1"><Table>
//!   <Row><Cell><Data>Title</Data></Cell><Cell><Data>Value</Data></Cell></Row>
//!   <Row><Cell><Data>A</Data></Cell><Cell><Data>1</Data></Cell></Row>
//! </Table></Worksheet></Workbook>"#;
//!
//! let workbook = excelxml::extract(xml.as_bytes()).unwrap();
//! let sheet = workbook.first().unwrap();
//! assert_eq!(sheet.name(), "S1");
//! assert_eq!(sheet.row_count(), 2);
//!
//! // Writes S1.csv into the current directory
//! // excelxml::save(&workbook, OutputMode::SingleFile).unwrap();
//! ```

mod error;
pub mod prelude;

pub use error::{Error, ErrorKind, Result};

// Re-export core types
pub use excelxml_core::{Row, Table, Workbook, Worksheet};

// Re-export I/O types
pub use excelxml_csv::{
    plan_output, CsvError, CsvWriteOptions, CsvWriter, LineTerminator, OutputFile, OutputMode,
};
pub use excelxml_reader::{DecodeCause, ReadError, ReadOptions, SheetNameSource, XmlReader};

use std::io::Read;
use std::path::{Path, PathBuf};

/// Extract a workbook from an XML spreadsheet stream
pub fn extract<R: Read>(reader: R) -> Result<Workbook> {
    Ok(XmlReader::read(reader)?)
}

/// Save a workbook as CSV into the current working directory
///
/// Returns the paths written.
pub fn save(workbook: &Workbook, mode: OutputMode) -> Result<Vec<PathBuf>> {
    Ok(CsvWriter::save(workbook, mode)?)
}

/// Extension trait for Workbook to add file I/O
pub trait WorkbookExt: Sized {
    /// Open a workbook from a file, whatever its extension
    fn open<P: AsRef<Path>>(path: P) -> Result<Self>;

    /// Read a workbook from a stream
    fn read_from<R: Read>(reader: R, options: &ReadOptions) -> Result<Self>;

    /// Save as CSV into the current working directory
    fn save_csv(&self, mode: OutputMode) -> Result<Vec<PathBuf>>;

    /// Save as CSV into `dir`
    fn save_csv_in<P: AsRef<Path>>(&self, dir: P, options: &CsvWriteOptions)
        -> Result<Vec<PathBuf>>;
}

impl WorkbookExt for Workbook {
    fn open<P: AsRef<Path>>(path: P) -> Result<Workbook> {
        Ok(XmlReader::read_file(path)?)
    }

    fn read_from<R: Read>(reader: R, options: &ReadOptions) -> Result<Workbook> {
        Ok(XmlReader::read_with_options(reader, options)?)
    }

    fn save_csv(&self, mode: OutputMode) -> Result<Vec<PathBuf>> {
        save(self, mode)
    }

    fn save_csv_in<P: AsRef<Path>>(
        &self,
        dir: P,
        options: &CsvWriteOptions,
    ) -> Result<Vec<PathBuf>> {
        Ok(CsvWriter::save_in(self, dir, options)?)
    }
}
