//! Minimal SpreadsheetML (Office 2003 XML) writer
//!
//! Only what the budget export needs: named worksheets made of rows of
//! string or numeric cells. The output opens in Excel and LibreOffice as an
//! `.xls` workbook.

use std::io::Write;

use crate::error::{ZbbError, ZbbResult};

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;
const MSO_APPLICATION: &str = r#"<?mso-application progid="Excel.Sheet"?>"#;
const SPREADSHEET_NS: &str = "urn:schemas-microsoft-com:office:spreadsheet";

/// A single cell value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Text(String),
    Number(i64),
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    fn write_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        match self {
            Cell::Text(s) => write!(
                writer,
                r#"<Cell><Data ss:Type="String">{}</Data></Cell>"#,
                escape_xml(s)
            ),
            Cell::Number(n) => write!(writer, r#"<Cell><Data ss:Type="Number">{}</Data></Cell>"#, n),
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for Cell {
    fn from(n: i64) -> Self {
        Self::Number(n)
    }
}

/// A row of cells; an empty row renders as `<Row/>`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    pub cells: Vec<Cell>,
}

impl Row {
    pub fn new(cells: Vec<Cell>) -> Self {
        Self { cells }
    }

    pub fn blank() -> Self {
        Self::default()
    }

    /// A row of string cells
    pub fn header<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(labels.into_iter().map(|s| Cell::Text(s.into())).collect())
    }

    pub fn is_blank(&self) -> bool {
        self.cells.is_empty()
    }

    fn write_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        if self.is_blank() {
            return writeln!(writer, "      <Row/>");
        }

        write!(writer, "      <Row>")?;
        for cell in &self.cells {
            cell.write_to(writer)?;
        }
        writeln!(writer, "</Row>")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Worksheet {
    pub name: String,
    pub rows: Vec<Row>,
}

impl Worksheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, row: Row) {
        self.rows.push(row);
    }

    fn write_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writeln!(writer, r#"  <Worksheet ss:Name="{}">"#, escape_xml(&self.name))?;
        writeln!(writer, "    <Table>")?;
        for row in &self.rows {
            row.write_to(writer)?;
        }
        writeln!(writer, "    </Table>")?;
        writeln!(writer, "  </Worksheet>")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Workbook {
    pub worksheets: Vec<Worksheet>,
}

impl Workbook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_worksheet(&mut self, sheet: Worksheet) {
        self.worksheets.push(sheet);
    }

    /// Serialize the workbook as UTF-8 SpreadsheetML
    pub fn write_to<W: Write>(&self, writer: &mut W) -> ZbbResult<()> {
        self.write_xml(writer)
            .map_err(|e| ZbbError::Export(format!("Failed to write workbook: {}", e)))
    }

    pub fn to_xml(&self) -> ZbbResult<String> {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer)?;
        String::from_utf8(buffer)
            .map_err(|e| ZbbError::Export(format!("Workbook is not valid UTF-8: {}", e)))
    }

    fn write_xml<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writeln!(writer, "{}", XML_DECLARATION)?;
        writeln!(writer, "{}", MSO_APPLICATION)?;
        writeln!(
            writer,
            r#"<Workbook xmlns="{ns}" xmlns:ss="{ns}">"#,
            ns = SPREADSHEET_NS
        )?;
        for sheet in &self.worksheets {
            sheet.write_to(writer)?;
        }
        writeln!(writer, "</Workbook>")
    }
}

/// Escape the XML metacharacters in text content and attribute values
///
/// Characters XML 1.0 cannot carry at all (C0 controls other than tab,
/// newline and carriage return, U+FFFE and U+FFFF) are dropped.
pub fn escape_xml(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars().filter(|&c| is_xml_char(c)) {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r' | '\u{20}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}')
}
