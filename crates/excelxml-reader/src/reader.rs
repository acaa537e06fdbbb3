//! XML spreadsheet reader

use std::borrow::Cow;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::{DecodeCause, ReadError, ReadResult};
use crate::options::{ReadOptions, SheetNameSource};
use excelxml_core::{Row, Table, Workbook, Worksheet};

const NEXT_TOKEN: &str = "getting next token";

const WORKSHEET: &[u8] = b"Worksheet";
const TABLE: &[u8] = b"Table";
const ROW: &[u8] = b"Row";
const CELL: &[u8] = b"Cell";
const DATA: &[u8] = b"Data";
const NAME: &[u8] = b"Name";

/// Where the reader is inside a `Worksheet` subtree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    Table,
    Row,
    Cell,
    /// `Data` or anything nested in it (rich text runs)
    Data,
    /// Content we don't keep (styles, options, cell comments, ...)
    Skipped,
}

/// Excel XML spreadsheet reader
///
/// Scans the token stream once. Only the worksheet being decoded is held in
/// memory besides the workbook built so far.
pub struct XmlReader;

impl XmlReader {
    /// Read a workbook from a file path
    ///
    /// The file extension is not inspected; XML exports saved as `.xls`
    /// are read like any other.
    pub fn read_file<P: AsRef<Path>>(path: P) -> ReadResult<Workbook> {
        let file = File::open(path).map_err(|e| ReadError::decode("opening input", e))?;
        Self::read(file)
    }

    /// Read a workbook from a reader with default options
    pub fn read<R: Read>(reader: R) -> ReadResult<Workbook> {
        Self::read_with_options(reader, &ReadOptions::default())
    }

    /// Read a workbook from a reader
    pub fn read_with_options<R: Read>(reader: R, options: &ReadOptions) -> ReadResult<Workbook> {
        let mut xml_reader = Reader::from_reader(BufReader::new(reader));
        xml_reader.trim_text(false);
        xml_reader.expand_empty_elements(true);
        xml_reader.check_end_names(true);

        let mut workbook = Workbook::new();
        // Names of the elements enclosing the current position, outside worksheets
        let mut open_elements: Vec<String> = Vec::new();
        let mut buf = Vec::new();

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => {
                    check_attributes(&e)?;
                    if e.local_name().as_ref() == WORKSHEET {
                        let name = sheet_name(&e, options.sheet_names, workbook.sheet_count())?;
                        let table = Self::read_table(&mut xml_reader)?;
                        log::debug!("decoded worksheet '{}' with {} rows", name, table.len());
                        workbook.push_worksheet(Worksheet::with_table(name, table));
                    } else {
                        open_elements.push(element_name(&e));
                    }
                }
                Ok(Event::End(e)) => {
                    if open_elements.pop().is_none() {
                        let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                        return Err(ReadError::decode(
                            NEXT_TOKEN,
                            DecodeCause::UnbalancedEnd(name),
                        ));
                    }
                }
                Ok(Event::Text(e)) => {
                    e.unescape().map_err(|err| ReadError::decode(NEXT_TOKEN, err))?;
                    if open_elements.is_empty() && !is_blank(&e) {
                        return Err(ReadError::decode(NEXT_TOKEN, DecodeCause::StrayText));
                    }
                }
                Ok(Event::CData(_)) if open_elements.is_empty() => {
                    return Err(ReadError::decode(NEXT_TOKEN, DecodeCause::StrayText));
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => return Err(ReadError::decode(NEXT_TOKEN, e)),
            }
            buf.clear();
        }

        if let Some(name) = open_elements.pop() {
            return Err(ReadError::decode(
                NEXT_TOKEN,
                DecodeCause::UnexpectedEof(name),
            ));
        }

        if workbook.is_empty() {
            return Err(ReadError::SchemaMismatch);
        }

        Ok(workbook)
    }

    /// Read the rows of a worksheet whose start tag was just consumed.
    ///
    /// Returns after the matching `</Worksheet>`.
    fn read_table<R: BufRead>(xml_reader: &mut Reader<R>) -> ReadResult<Table> {
        let mut table = Table::new();
        let mut scopes: Vec<Scope> = Vec::new();
        let mut buf = Vec::new();

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => {
                    check_attributes(&e)?;
                    let scope = match (scopes.last(), e.local_name().as_ref()) {
                        (None, TABLE) => Scope::Table,
                        (Some(Scope::Table), ROW) => {
                            table.push(Row::new());
                            Scope::Row
                        }
                        (Some(Scope::Row), CELL) => {
                            if let Some(row) = table.last_mut() {
                                row.push(String::new());
                            }
                            Scope::Cell
                        }
                        (Some(Scope::Cell), DATA) | (Some(Scope::Data), _) => Scope::Data,
                        _ => {
                            log::trace!("skipping <{}>", element_name(&e));
                            Scope::Skipped
                        }
                    };
                    scopes.push(scope);
                }
                Ok(Event::End(_)) => {
                    // Popping past the last scope means this is </Worksheet>
                    if scopes.pop().is_none() {
                        break;
                    }
                }
                Ok(Event::Text(e)) => {
                    let text = e.unescape().map_err(|err| ReadError::decode(NEXT_TOKEN, err))?;
                    if scopes.last() == Some(&Scope::Data) {
                        push_cell_text(&mut table, text);
                    }
                }
                Ok(Event::CData(e)) if scopes.last() == Some(&Scope::Data) => {
                    let text = std::str::from_utf8(&e)
                        .map_err(|err| ReadError::decode(NEXT_TOKEN, err))?;
                    push_cell_text(&mut table, Cow::Borrowed(text));
                }
                Ok(Event::Eof) => {
                    return Err(ReadError::decode(
                        NEXT_TOKEN,
                        DecodeCause::UnexpectedEof("Worksheet".to_string()),
                    ));
                }
                Ok(_) => {}
                Err(e) => return Err(ReadError::decode(NEXT_TOKEN, e)),
            }
            buf.clear();
        }

        Ok(table)
    }
}

/// Pick the worksheet name from its start tag.
///
/// Falls back to `Sheet{n}` when the tag has no usable attribute.
fn sheet_name(start: &BytesStart<'_>, source: SheetNameSource, index: usize) -> ReadResult<String> {
    for attr in start.attributes() {
        let attr = attr.map_err(|e| ReadError::decode(NEXT_TOKEN, e))?;
        let wanted = match source {
            SheetNameSource::NameAttribute => attr.key.local_name().as_ref() == NAME,
            SheetNameSource::FirstAttribute => true,
        };
        if wanted {
            let value = attr
                .unescape_value()
                .map_err(|e| ReadError::decode(NEXT_TOKEN, e))?;
            return Ok(value.into_owned());
        }
    }

    Ok(format!("Sheet{}", index + 1))
}

/// Every attribute of a start tag must be well formed and carry known
/// entities, whether or not the reader looks at it
fn check_attributes(start: &BytesStart<'_>) -> ReadResult<()> {
    for attr in start.attributes() {
        let attr = attr.map_err(|e| ReadError::decode(NEXT_TOKEN, e))?;
        attr.unescape_value()
            .map_err(|e| ReadError::decode(NEXT_TOKEN, e))?;
    }
    Ok(())
}

/// Append text to the last cell of the last row
fn push_cell_text(table: &mut Table, text: Cow<'_, str>) {
    if let Some(cell) = table.last_mut().and_then(|row| row.last_mut()) {
        cell.push_str(&text);
    }
}

fn element_name(start: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(start.name().as_ref()).into_owned()
}

/// Whitespace-only text (and a leading byte order mark) is allowed between
/// top-level markup
fn is_blank(bytes: &[u8]) -> bool {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    bytes.iter().all(u8::is_ascii_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn read(xml: &str) -> ReadResult<Workbook> {
        XmlReader::read(xml.as_bytes())
    }

    fn table(rows: &[&[&str]]) -> Table {
        rows.iter()
            .map(|row| row.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    const EXPORT: &str = r#"<?xml version="1.0"?>
<?mso-application progid="Excel.Sheet"?>
<Workbook xmlns="urn:schemas-microsoft-com:office:spreadsheet"
 xmlns:o="urn:schemas-microsoft-com:office:office"
 xmlns:x="urn:schemas-microsoft-com:office:excel"
 xmlns:ss="urn:schemas-microsoft-com:office:spreadsheet">
 <DocumentProperties xmlns="urn:schemas-microsoft-com:office:office">
  <Author>Report Generator</Author>
 </DocumentProperties>
 <Styles>
  <Style ss:ID="Default" ss:Name="Normal">
   <Alignment ss:Vertical="Bottom"/>
  </Style>
 </Styles>
 <Worksheet ss:Name="Orders">
  <Table ss:ExpandedColumnCount="2" ss:ExpandedRowCount="3" x:FullColumns="1">
   <Column ss:Width="80"/>
   <Row>
    <Cell ss:StyleID="s62"><Data ss:Type="String">Item</Data></Cell>
    <Cell><Data ss:Type="String">Qty</Data></Cell>
   </Row>
   <Row>
    <Cell><Data ss:Type="String">Widget</Data></Cell>
    <Cell ss:Formula="=1+2"><Data ss:Type="Number">3</Data></Cell>
   </Row>
   <Row>
    <Cell><Data ss:Type="String">Gadget</Data><Comment><Data>ignored</Data></Comment></Cell>
    <Cell><Data ss:Type="Number">7</Data><NamedCell ss:Name="Total"/></Cell>
   </Row>
  </Table>
  <WorksheetOptions xmlns="urn:schemas-microsoft-com:office:excel">
   <Selected/>
  </WorksheetOptions>
 </Worksheet>
 <Worksheet ss:Name="Returns">
  <Table>
   <Row><Cell><Data ss:Type="String">Item</Data></Cell><Cell><Data ss:Type="String">Qty</Data></Cell></Row>
  </Table>
 </Worksheet>
</Workbook>
"#;

    #[test]
    fn test_reads_single_sheet() {
        let xml = r#"<Workbook><Worksheet ss:Name="S1"><Table>
  <Row><Cell><Data>Title</Data></Cell><Cell><Data>Value</Data></Cell></Row>
  <Row><Cell><Data>A</Data></Cell><Cell><Data>1</Data></Cell></Row>
</Table></Worksheet></Workbook>"#;

        let wb = read(xml).unwrap();

        assert_eq!(wb.sheet_count(), 1);
        let ws = wb.worksheet(0).unwrap();
        assert_eq!(ws.name(), "S1");
        assert_eq!(ws.rows(), table(&[&["Title", "Value"], &["A", "1"]]).as_slice());
    }

    #[test]
    fn test_reads_excel_export() {
        let wb = read(EXPORT).unwrap();

        assert_eq!(wb.sheet_count(), 2);

        let orders = wb.worksheet(0).unwrap();
        assert_eq!(orders.name(), "Orders");
        assert_eq!(
            orders.rows(),
            table(&[&["Item", "Qty"], &["Widget", "3"], &["Gadget", "7"]]).as_slice()
        );

        let returns = wb.worksheet(1).unwrap();
        assert_eq!(returns.name(), "Returns");
        assert_eq!(returns.rows(), table(&[&["Item", "Qty"]]).as_slice());
    }

    #[test]
    fn test_style_name_attribute_is_not_a_sheet() {
        let wb = read(EXPORT).unwrap();
        assert!(wb.worksheet_by_name("Normal").is_none());
    }

    #[test]
    fn test_name_attribute_found_by_local_name() {
        let xml = r#"<Workbook xmlns:ss="urn:schemas-microsoft-com:office:spreadsheet">
<Worksheet xmlns:x="urn:schemas-microsoft-com:office:excel" ss:Protected="0" ss:Name="Second Attr">
<Table/></Worksheet></Workbook>"#;

        let wb = read(xml).unwrap();
        assert_eq!(wb.worksheet(0).unwrap().name(), "Second Attr");
    }

    #[test]
    fn test_positional_name_takes_first_attribute() {
        let xml = r#"<Workbook>
<Worksheet ss:Name="Keyed"><Table/></Worksheet>
<Worksheet xmlns:x="urn:schemas-microsoft-com:office:excel" ss:Name="Shadowed"><Table/></Worksheet>
</Workbook>"#;

        let wb = XmlReader::read_with_options(xml.as_bytes(), &ReadOptions::positional_names())
            .unwrap();

        assert_eq!(wb.worksheet(0).unwrap().name(), "Keyed");
        // The namespace declaration comes first, so it wins
        assert_eq!(
            wb.worksheet(1).unwrap().name(),
            "urn:schemas-microsoft-com:office:excel"
        );
    }

    #[test]
    fn test_missing_name_falls_back_to_position() {
        let xml = r#"<Workbook>
<Worksheet ss:Name="First"><Table/></Worksheet>
<Worksheet><Table/></Worksheet>
</Workbook>"#;

        let wb = read(xml).unwrap();
        assert_eq!(wb.worksheet(1).unwrap().name(), "Sheet2");

        let wb = XmlReader::read_with_options(xml.as_bytes(), &ReadOptions::positional_names())
            .unwrap();
        assert_eq!(wb.worksheet(1).unwrap().name(), "Sheet2");
    }

    #[test]
    fn test_name_attribute_is_unescaped() {
        let xml = r#"<Workbook><Worksheet ss:Name="P&amp;L"><Table/></Worksheet></Workbook>"#;
        assert_eq!(read(xml).unwrap().worksheet(0).unwrap().name(), "P&L");
    }

    #[test]
    fn test_empty_elements() {
        let xml = r#"<Workbook>
<Worksheet ss:Name="Empty"/>
<Worksheet ss:Name="Blanks"><Table><Row/><Row><Cell/><Cell><Data/></Cell><Cell><Data>x</Data></Cell></Row></Table></Worksheet>
</Workbook>"#;

        let wb = read(xml).unwrap();

        assert!(wb.worksheet(0).unwrap().is_empty());
        assert_eq!(
            wb.worksheet(1).unwrap().rows(),
            &[Row::new(), vec![String::new(), String::new(), "x".to_string()]]
        );
    }

    #[test]
    fn test_cell_text_escapes_and_cdata() {
        let xml = r#"<Workbook><Worksheet ss:Name="Text"><Table><Row>
<Cell><Data>Fish &amp; Chips</Data></Cell>
<Cell><Data>line one&#10;line two</Data></Cell>
<Cell><Data><![CDATA[<raw> & "quoted"]]></Data></Cell>
<Cell><Data>  padded  </Data></Cell>
</Row></Table></Worksheet></Workbook>"#;

        let wb = read(xml).unwrap();

        assert_eq!(
            wb.worksheet(0).unwrap().rows(),
            table(&[&[
                "Fish & Chips",
                "line one\nline two",
                "<raw> & \"quoted\"",
                "  padded  "
            ]])
            .as_slice()
        );
    }

    #[test]
    fn test_rich_text_inside_data() {
        let xml = r#"<Workbook><Worksheet ss:Name="Rich"><Table><Row>
<Cell><ss:Data ss:Type="String" xmlns="http://www.w3.org/TR/REC-html40"><B>Bold</B> and <Font html:Color="red">red</Font></ss:Data></Cell>
</Row></Table></Worksheet></Workbook>"#;

        let wb = read(xml).unwrap();
        assert_eq!(wb.worksheet(0).unwrap().rows(), table(&[&["Bold and red"]]).as_slice());
    }

    #[test]
    fn test_repeated_data_in_one_cell_is_concatenated() {
        let xml = r#"<Workbook><Worksheet ss:Name="S"><Table><Row><Cell><Data>a</Data><Data>b</Data></Cell></Row></Table></Worksheet></Workbook>"#;
        assert_eq!(read(xml).unwrap().worksheet(0).unwrap().rows(), table(&[&["ab"]]).as_slice());
    }

    #[test]
    fn test_prefixed_element_names() {
        let xml = r#"<ss:Workbook xmlns:ss="urn:schemas-microsoft-com:office:spreadsheet">
<ss:Worksheet ss:Name="Prefixed"><ss:Table><ss:Row><ss:Cell><ss:Data>v</ss:Data></ss:Cell></ss:Row></ss:Table></ss:Worksheet>
</ss:Workbook>"#;

        let wb = read(xml).unwrap();
        assert_eq!(wb.worksheet(0).unwrap().name(), "Prefixed");
        assert_eq!(wb.worksheet(0).unwrap().rows(), table(&[&["v"]]).as_slice());
    }

    #[test]
    fn test_rows_outside_table_are_ignored() {
        let xml = r#"<Workbook><Worksheet ss:Name="S"><Table>
<Row><Cell><Data>kept</Data></Cell></Row>
</Table>
<WorksheetOptions><Row><Cell><Data>dropped</Data></Cell></Row></WorksheetOptions>
</Worksheet></Workbook>"#;

        let wb = read(xml).unwrap();
        assert_eq!(wb.worksheet(0).unwrap().rows(), table(&[&["kept"]]).as_slice());
    }

    #[test]
    fn test_ragged_rows_are_kept() {
        let xml = r#"<Workbook><Worksheet ss:Name="S"><Table>
<Row><Cell><Data>a</Data></Cell></Row>
<Row><Cell><Data>a</Data></Cell><Cell><Data>b</Data></Cell><Cell><Data>c</Data></Cell></Row>
</Table></Worksheet></Workbook>"#;

        let ws = read(xml).unwrap().into_worksheets().remove(0);
        assert_eq!(ws.rows(), table(&[&["a"], &["a", "b", "c"]]).as_slice());
    }

    #[test]
    fn test_no_worksheet_is_schema_mismatch() {
        let err = read(r#"<?xml version="1.0"?><Workbook><Styles/></Workbook>"#).unwrap_err();
        assert!(err.is_schema_mismatch());

        let err = read("").unwrap_err();
        assert!(err.is_schema_mismatch());
    }

    #[test]
    fn test_truncated_input_is_decode_error() {
        let err = read(r#"<Workbook><Worksheet ss:Name="S"><Table><Row>"#).unwrap_err();
        assert!(err.is_decode(), "{err}");
        assert!(err.to_string().contains("getting next token"));

        let err = read(r#"<Workbook><Worksheet ss:Name="S"></Worksheet>"#).unwrap_err();
        assert!(err.is_decode(), "{err}");

        let err = read(r#"<Workbook><Worksheet ss:Name="S"><Tab"#).unwrap_err();
        assert!(err.is_decode(), "{err}");
    }

    #[test]
    fn test_non_xml_input_is_decode_error() {
        let err = read("Title,Value\nA,1\n").unwrap_err();
        assert!(err.is_decode(), "{err}");
    }

    #[test]
    fn test_mismatched_end_tag_is_decode_error() {
        let err = read(r#"<Workbook><Worksheet ss:Name="S"><Table></Row></Table></Worksheet></Workbook>"#)
            .unwrap_err();
        assert!(err.is_decode(), "{err}");
    }

    #[test]
    fn test_malformed_attribute_outside_worksheet_is_decode_error() {
        let err = read(r#"<Workbook bad><Worksheet ss:Name="S"><Table/></Worksheet></Workbook>"#)
            .unwrap_err();
        assert!(err.is_decode(), "{err}");
        assert!(err.to_string().contains("getting next token"), "{err}");
    }

    #[test]
    fn test_malformed_attribute_on_row_is_decode_error() {
        let err = read(
            r#"<Workbook><Worksheet ss:Name="S"><Table><Row a=b><Cell><Data>x</Data></Cell></Row></Table></Worksheet></Workbook>"#,
        )
        .unwrap_err();
        assert!(err.is_decode(), "{err}");
    }

    #[test]
    fn test_unknown_entity_in_ignored_attribute_is_decode_error() {
        let err = read(
            r#"<Workbook><Worksheet ss:Name="S"><Table><Row><Cell ss:StyleID="&bogus;"><Data>x</Data></Cell></Row></Table></Worksheet></Workbook>"#,
        )
        .unwrap_err();
        assert!(err.is_decode(), "{err}");
    }

    #[test]
    fn test_unknown_entity_outside_data_is_decode_error() {
        let err = read(
            r#"<Workbook><Worksheet ss:Name="S"><Table><Row><Cell>&bogus;<Data>x</Data></Cell></Row></Table></Worksheet></Workbook>"#,
        )
        .unwrap_err();
        assert!(err.is_decode(), "{err}");

        let err = read(r#"<Workbook>&bogus;<Worksheet ss:Name="S"><Table/></Worksheet></Workbook>"#)
            .unwrap_err();
        assert!(err.is_decode(), "{err}");
    }

    #[test]
    fn test_malformed_worksheet_name_is_tokenizing_error() {
        let err = read(r#"<Workbook><Worksheet ss:Name="&bogus;"><Table/></Worksheet></Workbook>"#)
            .unwrap_err();
        assert!(err.is_decode(), "{err}");
        assert!(err.to_string().contains("getting next token"), "{err}");
    }

    #[test]
    fn test_reading_twice_gives_equal_workbooks() {
        let first = read(EXPORT).unwrap();
        let second = read(EXPORT).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_read_missing_file_is_decode_error() {
        let err = XmlReader::read_file("definitely/not/here.xml").unwrap_err();
        assert!(err.is_decode());
        assert!(err.to_string().contains("opening input"));
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank(b""));
        assert!(is_blank(b" \r\n\t"));
        assert!(is_blank(b"\xEF\xBB\xBF\n"));
        assert!(!is_blank(b" x "));
    }
}
