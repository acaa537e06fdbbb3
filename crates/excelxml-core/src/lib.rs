//! # excelxml-core
//!
//! Core data structures for the excelxml converter.
//!
//! This crate provides the plain value types shared by the reader and the
//! CSV writer:
//! - [`Workbook`] - ordered list of worksheets, in document order
//! - [`Worksheet`] - a sheet name plus its [`Table`]
//! - [`Row`] and [`Table`] - cell text, row by row
//!
//! ## Example
//!
//! ```rust
//! use excelxml_core::{Workbook, Worksheet};
//!
//! let mut workbook = Workbook::new();
//! workbook.push_worksheet(Worksheet::with_table(
//!     "Sheet1",
//!     vec![
//!         vec!["Title".to_string(), "Value".to_string()],
//!         vec!["A".to_string(), "1".to_string()],
//!     ],
//! ));
//!
//! assert_eq!(workbook.sheet_count(), 1);
//! assert_eq!(workbook.first().unwrap().row_count(), 2);
//! ```

pub mod workbook;
pub mod worksheet;

pub use workbook::Workbook;
pub use worksheet::{Row, Table, Worksheet};
