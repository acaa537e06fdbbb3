//! excelxml CLI - Excel XML spreadsheet to CSV conversion tool

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use excelxml::prelude::*;
use excelxml::LineTerminator;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "excelxml")]
#[command(
    author,
    version,
    about = "Convert Excel 2003 XML spreadsheets to CSV"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a spreadsheet to CSV files named after its sheets
    #[command(alias = "csv")]
    ToCsv {
        /// Input spreadsheet file (XML, whatever the extension)
        input: PathBuf,

        /// Write one file per sheet instead of one combined file
        #[arg(short, long)]
        multiple: bool,

        /// Directory for the CSV files (default: current directory)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Field delimiter (default: comma)
        #[arg(short, long, default_value = ",")]
        delimiter: char,

        /// End lines with CRLF instead of LF
        #[arg(long)]
        crlf: bool,

        /// Take each sheet name from the first attribute of its Worksheet tag
        #[arg(long)]
        positional_names: bool,
    },

    /// Show information about a spreadsheet
    Info {
        /// Input spreadsheet file
        input: PathBuf,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// List all sheets in a workbook
    Sheets {
        /// Input spreadsheet file
        input: PathBuf,
    },

    /// Print the extracted workbook (names and cell text) as JSON
    Json {
        /// Input spreadsheet file
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::ToCsv {
            input,
            multiple,
            output_dir,
            delimiter,
            crlf,
            positional_names,
        } => {
            let read_options = if positional_names {
                ReadOptions::positional_names()
            } else {
                ReadOptions::default()
            };
            let write_options = CsvWriteOptions {
                delimiter: delimiter_byte(delimiter)?,
                line_terminator: if crlf {
                    LineTerminator::CRLF
                } else {
                    LineTerminator::LF
                },
                output_mode: OutputMode::from_multiple(multiple),
                ..Default::default()
            };
            to_csv(&input, output_dir.as_deref(), &read_options, &write_options)
        }
        Commands::Info { input, json } => show_info(&input, json),
        Commands::Sheets { input } => list_sheets(&input),
        Commands::Json { input } => dump_json(&input),
    }
}

fn delimiter_byte(delimiter: char) -> Result<u8> {
    if !delimiter.is_ascii() {
        bail!("Delimiter must be a single ASCII character, got '{}'", delimiter);
    }
    Ok(delimiter as u8)
}

fn open_workbook(input: &Path, options: &ReadOptions) -> Result<Workbook> {
    let file = std::fs::File::open(input)
        .with_context(|| format!("Failed to open '{}'", input.display()))?;
    Workbook::read_from(file, options)
        .with_context(|| format!("Failed to read '{}'", input.display()))
}

fn to_csv(
    input: &Path,
    output_dir: Option<&Path>,
    read_options: &ReadOptions,
    write_options: &CsvWriteOptions,
) -> Result<()> {
    let workbook = open_workbook(input, read_options)?;

    let dir = output_dir.unwrap_or_else(|| Path::new(""));
    let written = workbook
        .save_csv_in(dir, write_options)
        .with_context(|| format!("Failed to save CSV for '{}'", input.display()))?;

    for path in written {
        eprintln!("Wrote '{}'", path.display());
    }

    Ok(())
}

#[derive(Serialize)]
struct SheetSummary<'a> {
    index: usize,
    name: &'a str,
    rows: usize,
    columns: usize,
}

#[derive(Serialize)]
struct WorkbookSummary<'a> {
    file: String,
    sheets: Vec<SheetSummary<'a>>,
}

fn summarize<'a>(input: &Path, workbook: &'a Workbook) -> WorkbookSummary<'a> {
    WorkbookSummary {
        file: input.display().to_string(),
        sheets: workbook
            .worksheets()
            .enumerate()
            .map(|(index, sheet)| SheetSummary {
                index,
                name: sheet.name(),
                rows: sheet.row_count(),
                columns: sheet.column_count(),
            })
            .collect(),
    }
}

fn show_info(input: &Path, json: bool) -> Result<()> {
    let workbook = open_workbook(input, &ReadOptions::default())?;
    let summary = summarize(input, &workbook);

    if json {
        let text = serde_json::to_string_pretty(&summary).context("Failed to encode JSON")?;
        println!("{}", text);
        return Ok(());
    }

    println!("File: {}", summary.file);
    println!("Sheets: {}", summary.sheets.len());

    for sheet in &summary.sheets {
        println!();
        println!("  Sheet {}: \"{}\"", sheet.index, sheet.name);
        if sheet.rows == 0 {
            println!("    Rows: empty");
        } else {
            println!(
                "    Rows: {} (widest row: {} columns)",
                sheet.rows, sheet.columns
            );
        }
    }

    Ok(())
}

fn list_sheets(input: &Path) -> Result<()> {
    let workbook = open_workbook(input, &ReadOptions::default())?;

    for (i, sheet) in workbook.worksheets().enumerate() {
        println!("{}\t{}", i, sheet.name());
    }

    Ok(())
}

fn dump_json(input: &Path) -> Result<()> {
    let workbook = open_workbook(input, &ReadOptions::default())?;
    let text = serde_json::to_string_pretty(&workbook).context("Failed to encode JSON")?;
    println!("{}", text);
    Ok(())
}
