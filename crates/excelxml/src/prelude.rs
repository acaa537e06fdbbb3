//! Prelude module - common imports for excelxml users
//!
//! ```rust
//! use excelxml::prelude::*;
//! ```

pub use crate::{
    CsvWriteOptions,
    CsvWriter,
    // Error types
    Error,
    ErrorKind,
    // Options
    OutputMode,
    ReadOptions,
    Result,
    Row,
    SheetNameSource,
    Table,
    // Main types
    Workbook,
    // Extension traits
    WorkbookExt,
    Worksheet,
    // I/O types
    XmlReader,
};
