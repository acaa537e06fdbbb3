//! # excelxml-reader
//!
//! Streaming reader for the legacy Excel 2003 XML Spreadsheet format
//! (SpreadsheetML). Only the cell text under
//! `Worksheet > Table > Row > Cell > Data` is kept; styles, types, formulas
//! and everything else in the document are skipped.

pub mod error;
pub mod options;
pub mod reader;

pub use error::{DecodeCause, ReadError, ReadResult};
pub use options::{ReadOptions, SheetNameSource};
pub use reader::XmlReader;
