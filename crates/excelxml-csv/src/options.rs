//! CSV options

/// How the worksheets of a workbook are spread over output files
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[non_exhaustive]
pub enum OutputMode {
    /// One file named after the first sheet.
    ///
    /// Sheets after the first drop their first row, which repeats the
    /// header of the first sheet.
    #[default]
    SingleFile,
    /// One file per sheet, each named after its sheet, rows unmodified
    FilePerSheet,
}

impl OutputMode {
    /// Map a "save multiple files" flag to an output mode
    pub fn from_multiple(multiple: bool) -> Self {
        if multiple {
            OutputMode::FilePerSheet
        } else {
            OutputMode::SingleFile
        }
    }
}

/// Options for writing CSV files
#[derive(Debug, Clone)]
pub struct CsvWriteOptions {
    /// Field delimiter (default: comma)
    pub delimiter: u8,
    /// Quote character (default: double quote)
    pub quote: u8,
    /// Line terminator
    pub line_terminator: LineTerminator,
    /// File layout
    pub output_mode: OutputMode,
}

impl Default for CsvWriteOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote: b'"',
            line_terminator: LineTerminator::LF,
            output_mode: OutputMode::SingleFile,
        }
    }
}

impl CsvWriteOptions {
    /// Default options with the given output mode
    pub fn with_mode(output_mode: OutputMode) -> Self {
        Self {
            output_mode,
            ..Default::default()
        }
    }
}

/// Line terminator type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineTerminator {
    /// Unix-style (LF)
    LF,
    /// Windows-style (CRLF)
    CRLF,
    /// Mac classic (CR)
    CR,
}

impl LineTerminator {
    pub(crate) fn to_csv(self) -> csv::Terminator {
        match self {
            LineTerminator::LF => csv::Terminator::Any(b'\n'),
            LineTerminator::CRLF => csv::Terminator::CRLF,
            LineTerminator::CR => csv::Terminator::Any(b'\r'),
        }
    }
}
