//! Spreadsheet report of a conversion batch.
//!
//! One worksheet named "Dokument" with a bold header row and one row per
//! input document. Failed documents are listed with the error message in
//! place of the HTML.

use std::path::Path;

use rust_xlsxwriter::{Format, FormatAlign, Workbook, Worksheet, XlsxError};
use serde::{Deserialize, Serialize};

use crate::batch::{BatchReport, DocumentOutcome};
use crate::error::{Error, Result};

/// Name of the report worksheet.
pub const SHEET_NAME: &str = "Dokument";

/// Maximum number of characters in one cell.
pub const MAX_CELL_CHARS: usize = 32_767;

/// Characters of the lead shown in the summary layout.
const LEAD_PREVIEW_CHARS: usize = 100;

/// Section titles listed by name in the summary layout.
const LISTED_SECTIONS: usize = 3;

/// Column layout of the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ReportLayout {
    /// Overview for proofreading: file, title, lead preview, sections, HTML
    #[default]
    Summary,
    /// Import sheet for a CMS: HTML as description plus meta fields
    Import,
}

impl ReportLayout {
    /// Header labels in column order.
    pub fn headers(&self) -> &'static [&'static str] {
        match self {
            ReportLayout::Summary => &[
                "Filnamn",
                "H1 Titel",
                "Lead (förhandsvisning)",
                "Antal sektioner",
                "Sektioner",
                "HTML Kod",
            ],
            ReportLayout::Import => &[
                "Key",
                "Name",
                "Slug",
                "Description",
                "MetaTitle",
                "MetaDescription",
            ],
        }
    }

    /// Column widths in column order.
    pub fn column_widths(&self) -> &'static [f64] {
        match self {
            ReportLayout::Summary => &[35.0, 40.0, 50.0, 15.0, 50.0, 20.0],
            ReportLayout::Import => &[15.0, 30.0, 30.0, 80.0, 50.0, 60.0],
        }
    }
}

/// One cell value of a report row.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Text cell
    Text(String),
    /// Numeric cell
    Number(f64),
}

impl From<&str> for Cell {
    fn from(text: &str) -> Self {
        Cell::Text(text.to_string())
    }
}

impl From<String> for Cell {
    fn from(text: String) -> Self {
        Cell::Text(text)
    }
}

/// Report values of one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    /// File name
    pub name: String,
    /// Document title
    pub title: String,
    /// Lead, cut to a short preview
    pub lead_preview: String,
    /// Number of sections, `None` for failed documents
    pub section_count: Option<usize>,
    /// First section titles and the number of remaining ones
    pub section_summary: String,
    /// Rendered HTML, or `FEL: <message>` for failed documents
    pub html: String,
    /// Meta title captured from the preamble
    pub meta_title: String,
    /// Meta description captured from the preamble
    pub meta_description: String,
}

impl ReportRow {
    /// Build the row for one batch outcome.
    pub fn from_outcome(outcome: &DocumentOutcome) -> Self {
        match &outcome.result {
            Ok(doc) => Self {
                name: outcome.name.clone(),
                title: doc.title.clone(),
                lead_preview: lead_preview(&doc.lead),
                section_count: Some(doc.section_count()),
                section_summary: section_summary(&doc.section_titles),
                html: doc.html.clone(),
                meta_title: doc.meta_title.clone().unwrap_or_default(),
                meta_description: doc.meta_description.clone().unwrap_or_default(),
            },
            Err(message) => Self {
                name: outcome.name.clone(),
                html: format!("FEL: {}", message),
                ..Default::default()
            },
        }
    }

    /// Cell values in the column order of `layout`.
    pub fn cells(&self, layout: ReportLayout) -> Vec<Cell> {
        match layout {
            ReportLayout::Summary => vec![
                self.name.as_str().into(),
                self.title.as_str().into(),
                self.lead_preview.as_str().into(),
                match self.section_count {
                    Some(count) => Cell::Number(count as f64),
                    None => Cell::Text(String::new()),
                },
                self.section_summary.as_str().into(),
                self.html.as_str().into(),
            ],
            ReportLayout::Import => vec![
                "".into(),
                "".into(),
                "".into(),
                self.html.as_str().into(),
                self.meta_title.as_str().into(),
                self.meta_description.as_str().into(),
            ],
        }
    }
}

/// First characters of the lead, with an ellipsis when cut.
pub fn lead_preview(lead: &str) -> String {
    if lead.chars().count() > LEAD_PREVIEW_CHARS {
        let head: String = lead.chars().take(LEAD_PREVIEW_CHARS).collect();
        format!("{}...", head)
    } else {
        lead.to_string()
    }
}

/// First section titles joined by commas, with the count of the rest.
pub fn section_summary<S: AsRef<str>>(titles: &[S]) -> String {
    let listed: Vec<&str> = titles
        .iter()
        .take(LISTED_SECTIONS)
        .map(|t| t.as_ref())
        .collect();
    let mut summary = listed.join(", ");
    if titles.len() > LISTED_SECTIONS {
        summary.push_str(&format!(" (+ {} till)", titles.len() - LISTED_SECTIONS));
    }
    summary
}

/// Write the report of a batch to an `.xlsx` file.
///
/// # Example
///
/// ```no_run
/// use unword::{convert_batch, scan_folder, write_report, BatchOptions, ReportLayout};
///
/// let files = scan_folder("dokument")?;
/// let report = convert_batch(&files, &BatchOptions::default())?;
/// write_report(&report, ReportLayout::Summary, "html_dokument.xlsx")?;
/// # Ok::<(), unword::Error>(())
/// ```
pub fn write_report<P: AsRef<Path>>(
    report: &BatchReport,
    layout: ReportLayout,
    path: P,
) -> Result<()> {
    let mut workbook = build_workbook(report, layout)?;
    workbook
        .save(path.as_ref())
        .map_err(|err| map_xlsx_error("save workbook", err))
}

/// Build the report of a batch as `.xlsx` bytes.
pub fn report_to_buffer(report: &BatchReport, layout: ReportLayout) -> Result<Vec<u8>> {
    let mut workbook = build_workbook(report, layout)?;
    workbook
        .save_to_buffer()
        .map_err(|err| map_xlsx_error("save workbook", err))
}

fn build_workbook(report: &BatchReport, layout: ReportLayout) -> Result<Workbook> {
    let mut workbook = Workbook::new();
    {
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(SHEET_NAME)
            .map_err(|err| map_xlsx_error("name worksheet", err))?;

        write_header(worksheet, layout)?;

        let body = Format::new()
            .set_align(FormatAlign::Left)
            .set_align(FormatAlign::Top)
            .set_text_wrap();

        for (index, outcome) in report.outcomes.iter().enumerate() {
            let row = (index + 1) as u32;
            let cells = ReportRow::from_outcome(outcome).cells(layout);
            for (col, cell) in cells.into_iter().enumerate() {
                write_cell(worksheet, row, col as u16, cell, &body)?;
            }
        }
    }
    Ok(workbook)
}

fn write_header(worksheet: &mut Worksheet, layout: ReportLayout) -> Result<()> {
    let header = Format::new()
        .set_bold()
        .set_align(FormatAlign::Left)
        .set_align(FormatAlign::Top);

    for (col, label) in layout.headers().iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, *label, &header)
            .map_err(|err| map_xlsx_error("write header", err))?;
    }
    for (col, width) in layout.column_widths().iter().enumerate() {
        worksheet
            .set_column_width(col as u16, *width)
            .map_err(|err| map_xlsx_error("set column width", err))?;
    }
    Ok(())
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    cell: Cell,
    format: &Format,
) -> Result<()> {
    match cell {
        Cell::Text(text) => {
            let text = truncate_cell(text, row, col);
            worksheet
                .write_string_with_format(row, col, text, format)
                .map_err(|err| map_xlsx_error("write text cell", err))?;
        }
        Cell::Number(value) => {
            worksheet
                .write_number_with_format(row, col, value, format)
                .map_err(|err| map_xlsx_error("write number cell", err))?;
        }
    }
    Ok(())
}

/// Cut a cell value to the spreadsheet limit.
fn truncate_cell(text: String, row: u32, col: u16) -> String {
    if text.chars().count() <= MAX_CELL_CHARS {
        return text;
    }
    log::warn!(
        "Cell at row {}, column {} exceeds {} characters; truncated",
        row + 1,
        col + 1,
        MAX_CELL_CHARS
    );
    text.chars().take(MAX_CELL_CHARS).collect()
}

fn map_xlsx_error(context: &str, err: XlsxError) -> Error {
    Error::Spreadsheet(format!("{context} failed: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::ConvertedDocument;
    use crate::model::DocumentStats;
    use std::path::PathBuf;

    fn converted(sections: &[&str]) -> DocumentOutcome {
        DocumentOutcome {
            name: "a.docx".into(),
            path: PathBuf::from("a.docx"),
            result: Ok(ConvertedDocument {
                name: "a.docx".into(),
                meta_title: Some("Meta".into()),
                meta_description: None,
                title: "Main Title".into(),
                lead: "Intro text.".into(),
                section_titles: sections.iter().map(|s| s.to_string()).collect(),
                stats: DocumentStats::default(),
                html: "<h2>Main Title</h2>".into(),
            }),
        }
    }

    #[test]
    fn test_xlsx_error_keeps_context() {
        let mut worksheet = Worksheet::new();
        let err = worksheet
            .set_name("Bad[name]")
            .map(|_| ())
            .map_err(|e| map_xlsx_error("Naming sheet", e))
            .unwrap_err();
        assert!(matches!(&err, Error::Spreadsheet(msg) if msg.starts_with("Naming sheet failed: ")));
    }

    fn failed() -> DocumentOutcome {
        DocumentOutcome {
            name: "b.docx".into(),
            path: PathBuf::from("b.docx"),
            result: Err("Unknown file format".into()),
        }
    }

    #[test]
    fn test_lead_preview() {
        assert_eq!(lead_preview("short"), "short");
        let long = "å".repeat(120);
        let preview = lead_preview(&long);
        assert_eq!(preview.chars().count(), 103);
        assert!(preview.ends_with("..."));
        assert_eq!(lead_preview(&"x".repeat(100)), "x".repeat(100));
    }

    #[test]
    fn test_section_summary() {
        assert_eq!(section_summary::<&str>(&[]), "");
        assert_eq!(section_summary(&["A", "B"]), "A, B");
        assert_eq!(
            section_summary(&["A", "B", "C", "D", "E"]),
            "A, B, C (+ 2 till)"
        );
    }

    #[test]
    fn test_row_from_failed_outcome() {
        let row = ReportRow::from_outcome(&failed());
        assert_eq!(row.name, "b.docx");
        assert_eq!(row.html, "FEL: Unknown file format");
        assert_eq!(row.section_count, None);
    }

    #[test]
    fn test_import_cells() {
        let row = ReportRow::from_outcome(&converted(&["A"]));
        let cells = row.cells(ReportLayout::Import);
        assert_eq!(cells.len(), ReportLayout::Import.headers().len());
        assert_eq!(cells[0], Cell::Text(String::new()));
        assert_eq!(cells[3], Cell::Text("<h2>Main Title</h2>".into()));
        assert_eq!(cells[4], Cell::Text("Meta".into()));
        assert_eq!(cells[5], Cell::Text(String::new()));
    }

    #[test]
    fn test_summary_cells() {
        let row = ReportRow::from_outcome(&converted(&["A", "B"]));
        let cells = row.cells(ReportLayout::Summary);
        assert_eq!(cells[0], Cell::Text("a.docx".into()));
        assert_eq!(cells[3], Cell::Number(2.0));
        assert_eq!(cells[4], Cell::Text("A, B".into()));
    }

    #[test]
    fn test_truncate_cell() {
        let long = "a".repeat(MAX_CELL_CHARS + 10);
        assert_eq!(truncate_cell(long, 1, 0).len(), MAX_CELL_CHARS);
        assert_eq!(truncate_cell("ok".into(), 1, 0), "ok");
    }

    #[test]
    fn test_report_to_buffer() {
        let report = BatchReport {
            outcomes: vec![converted(&["A"]), failed()],
        };
        let bytes = report_to_buffer(&report, ReportLayout::Summary).unwrap();
        assert!(bytes.starts_with(b"PK\x03\x04"));
    }

    #[test]
    fn test_write_report_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("html_dokument.xlsx");
        let report = BatchReport {
            outcomes: vec![converted(&["A"])],
        };
        write_report(&report, ReportLayout::Import, &path).unwrap();
        assert!(path.exists());
    }
}
