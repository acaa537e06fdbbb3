//! CSV writer

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{CsvError, CsvResult};
use crate::layout::plan_output;
use crate::options::{CsvWriteOptions, OutputMode};
use excelxml_core::{Row, Workbook, Worksheet};

/// CSV file writer
pub struct CsvWriter;

impl CsvWriter {
    /// Save a workbook into the current working directory
    ///
    /// Returns the paths written, in workbook order.
    pub fn save(workbook: &Workbook, mode: OutputMode) -> CsvResult<Vec<PathBuf>> {
        Self::save_in(workbook, Path::new(""), &CsvWriteOptions::with_mode(mode))
    }

    /// Save a workbook into `dir`
    ///
    /// Files are created (or truncated) one at a time in workbook order. When
    /// one fails, the files already written stay on disk.
    pub fn save_in<P: AsRef<Path>>(
        workbook: &Workbook,
        dir: P,
        options: &CsvWriteOptions,
    ) -> CsvResult<Vec<PathBuf>> {
        if workbook.is_empty() {
            return Err(CsvError::EmptyWorkbook);
        }

        let dir = dir.as_ref();
        let mut written = Vec::new();

        for file in plan_output(workbook, options.output_mode) {
            if !is_usable_file_name(file.sheet_name) {
                return Err(CsvError::InvalidFileName {
                    name: file.sheet_name.to_string(),
                });
            }

            let path = dir.join(&file.file_name);
            let handle =
                File::create(&path).map_err(|e| CsvError::write("creating file", path.clone(), e))?;
            Self::write_rows(file.rows.iter().copied(), handle, options)
                .map_err(|e| CsvError::write("writing rows", path.clone(), e))?;

            log::debug!("wrote {} rows to '{}'", file.rows.len(), path.display());
            written.push(path);
        }

        Ok(written)
    }

    /// Write a single worksheet, all rows included, to a writer
    pub fn write_worksheet<W: Write>(
        worksheet: &Worksheet,
        writer: W,
        options: &CsvWriteOptions,
    ) -> csv::Result<()> {
        Self::write_rows(worksheet.rows(), writer, options)
    }

    /// Write rows to a writer and flush it
    ///
    /// Rows may have different lengths.
    pub fn write_rows<'a, W, I>(rows: I, writer: W, options: &CsvWriteOptions) -> csv::Result<()>
    where
        W: Write,
        I: IntoIterator<Item = &'a Row>,
    {
        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .terminator(options.line_terminator.to_csv())
            .flexible(true)
            .from_writer(writer);

        for row in rows {
            csv_writer.write_record(row)?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}

/// Sheet names are used as file names as-is, except that they may not
/// point into another directory
fn is_usable_file_name(sheet_name: &str) -> bool {
    !sheet_name.contains(&['/', '\\', '\0'][..])
}
