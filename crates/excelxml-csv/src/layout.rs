//! Output layout: which rows go into which file

use excelxml_core::{Row, Workbook};

use crate::options::OutputMode;

/// One CSV file to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile<'a> {
    /// Name of the sheet the file is named after
    pub sheet_name: &'a str,
    /// File name, `<sheet name>.csv`
    pub file_name: String,
    /// Rows in output order
    pub rows: Vec<&'a Row>,
}

impl<'a> OutputFile<'a> {
    fn named(sheet_name: &'a str, rows: Vec<&'a Row>) -> Self {
        Self {
            sheet_name,
            file_name: format!("{}.csv", sheet_name),
            rows,
        }
    }
}

/// Decide the output files for a workbook without touching the filesystem
///
/// In [`OutputMode::SingleFile`] the first sheet is copied in full and every
/// later sheet contributes its rows after the first. A later sheet with a
/// single row therefore contributes nothing.
pub fn plan_output(workbook: &Workbook, mode: OutputMode) -> Vec<OutputFile<'_>> {
    match mode {
        OutputMode::SingleFile => {
            let Some(first) = workbook.first() else {
                return Vec::new();
            };

            let rows = workbook
                .worksheets()
                .enumerate()
                .flat_map(|(index, sheet)| {
                    if index == 0 {
                        sheet.rows()
                    } else {
                        sheet.body()
                    }
                })
                .collect();

            vec![OutputFile::named(first.name(), rows)]
        }
        OutputMode::FilePerSheet => workbook
            .worksheets()
            .map(|sheet| OutputFile::named(sheet.name(), sheet.rows().iter().collect()))
            .collect(),
    }
}
