//! Spreadsheet export
//!
//! - `spreadsheet`: a small SpreadsheetML writer
//! - `workbook`: the monthly transactions and budget-vs-actual workbook

pub mod spreadsheet;
pub mod workbook;

pub use spreadsheet::{escape_xml, Cell, Row, Workbook, Worksheet};
pub use workbook::{export_file_name, export_workbook, ExportDocument, EXPORT_MIME_TYPE};
