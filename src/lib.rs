//! # unword
//!
//! Structured HTML extraction from Word documents.
//!
//! This library reads `.docx` packages, rebuilds the editorial structure of
//! the body (title, lead, sections with subheadings, lists and paragraphs)
//! and renders it as semantic HTML, JSON or a spreadsheet report.
//!
//! ## Quick Start
//!
//! ```no_run
//! use unword::{parse_file, render};
//!
//! fn main() -> unword::Result<()> {
//!     // Parse a Word file
//!     let doc = parse_file("article.docx")?;
//!
//!     // Convert to an HTML fragment
//!     let options = render::RenderOptions::default();
//!     let html = render::to_html(&doc, &options)?;
//!     println!("{}", html);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Positional structure**: preamble skipping, title, lead, sections
//! - **List detection**: numbered vs bulleted lists from numbering definitions
//! - **Output formats**: HTML fragment, standalone HTML page, JSON
//! - **Batch conversion**: parallel folder conversion with Rayon
//! - **Spreadsheet reports**: one row per document via rust_xlsxwriter

pub mod batch;
pub mod detect;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;
pub mod report;

// Re-export commonly used types
pub use batch::{
    convert_batch, convert_file, scan_folder, BatchOptions, BatchReport, ConvertedDocument,
    DocumentOutcome,
};
pub use detect::{detect_format_from_bytes, detect_format_from_path, is_docx, DocxFormat};
pub use error::{Error, Result};
pub use model::{
    ContentItem, DocumentStats, ListKind, Metadata, NumberingRef, NumberingTable, ParsedDocument,
    PreambleMeta, RawParagraph, Section, SourceDocument,
};
pub use parser::{parse_structure, DocxParser, ErrorMode, ParseOptions, PreambleMode};
pub use render::{slugify, HtmlMode, JsonFormat, RenderOptions};
pub use report::{report_to_buffer, write_report, ReportLayout, ReportRow};

use std::io::Read;
use std::path::Path;

/// Parse a Word file and return its structure.
///
/// # Arguments
///
/// * `path` - Path to the `.docx` file
///
/// # Example
///
/// ```no_run
/// use unword::parse_file;
///
/// let doc = parse_file("article.docx").unwrap();
/// println!("Sections: {}", doc.section_count());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<ParsedDocument> {
    let parser = DocxParser::open(path)?;
    parser.parse()
}

/// Parse a Word file with custom options.
///
/// # Example
///
/// ```no_run
/// use unword::{parse_file_with_options, ParseOptions};
///
/// let options = ParseOptions::new()
///     .lenient()
///     .capture_metadata();
/// let doc = parse_file_with_options("article.docx", options).unwrap();
/// ```
pub fn parse_file_with_options<P: AsRef<Path>>(
    path: P,
    options: ParseOptions,
) -> Result<ParsedDocument> {
    let parser = DocxParser::open_with_options(path, options)?;
    parser.parse()
}

/// Parse a Word document from bytes.
///
/// # Example
///
/// ```no_run
/// use unword::parse_bytes;
///
/// let data = std::fs::read("article.docx").unwrap();
/// let doc = parse_bytes(&data).unwrap();
/// ```
pub fn parse_bytes(data: &[u8]) -> Result<ParsedDocument> {
    let parser = DocxParser::from_bytes(data)?;
    parser.parse()
}

/// Parse a Word document from bytes with custom options.
pub fn parse_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<ParsedDocument> {
    let parser = DocxParser::from_bytes_with_options(data, options)?;
    parser.parse()
}

/// Parse a Word document from a reader.
pub fn parse_reader<R: Read>(reader: R) -> Result<ParsedDocument> {
    let parser = DocxParser::from_reader(reader)?;
    parser.parse()
}

/// Parse a Word document from a reader with custom options.
pub fn parse_reader_with_options<R: Read>(
    reader: R,
    options: ParseOptions,
) -> Result<ParsedDocument> {
    let parser = DocxParser::from_reader_with_options(reader, options)?;
    parser.parse()
}

/// Read the flat paragraph sequence of a Word file without structuring it.
///
/// Useful for inspecting styles and numbering when a document does not
/// come out as expected.
pub fn read_source_file<P: AsRef<Path>>(path: P) -> Result<SourceDocument> {
    let mut parser = DocxParser::open(path)?;
    parser.read_source()
}

/// Parse a Word file asynchronously.
///
/// The file is read with `tokio::fs`; parsing itself runs on the calling task.
#[cfg(feature = "async")]
pub async fn parse_file_async<P: AsRef<Path>>(
    path: P,
    options: ParseOptions,
) -> Result<ParsedDocument> {
    let data = tokio::fs::read(path).await?;
    parse_bytes_with_options(&data, options)
}

/// Convert a Word file to an HTML fragment.
///
/// # Example
///
/// ```no_run
/// use unword::to_html;
///
/// let html = to_html("article.docx").unwrap();
/// std::fs::write("article.html", html).unwrap();
/// ```
pub fn to_html<P: AsRef<Path>>(path: P) -> Result<String> {
    let doc = parse_file(path)?;
    render::to_html(&doc, &RenderOptions::default())
}

/// Convert a Word file to HTML with custom options.
///
/// # Example
///
/// ```no_run
/// use unword::{to_html_with_options, RenderOptions};
///
/// let options = RenderOptions::new().full_page().with_lang("en");
/// let page = to_html_with_options("article.docx", &options).unwrap();
/// ```
pub fn to_html_with_options<P: AsRef<Path>>(path: P, options: &RenderOptions) -> Result<String> {
    let doc = parse_file(path)?;
    render::to_html(&doc, options)
}

/// Convert a Word file to JSON.
///
/// # Example
///
/// ```no_run
/// use unword::{to_json, JsonFormat};
///
/// let json = to_json("article.docx", JsonFormat::Pretty).unwrap();
/// ```
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let doc = parse_file(path)?;
    render::to_json(&doc, format)
}

/// Builder for parsing and converting Word documents.
///
/// # Example
///
/// ```no_run
/// use unword::Unword;
///
/// let html = Unword::new()
///     .capture_metadata()
///     .full_page()
///     .lenient()
///     .parse("article.docx")?
///     .to_html()?;
/// # Ok::<(), unword::Error>(())
/// ```
pub struct Unword {
    parse_options: ParseOptions,
    render_options: RenderOptions,
}

impl Unword {
    /// Create a new Unword builder.
    pub fn new() -> Self {
        Self {
            parse_options: ParseOptions::default(),
            render_options: RenderOptions::default(),
        }
    }

    /// Enable lenient parsing mode.
    pub fn lenient(mut self) -> Self {
        self.parse_options = self.parse_options.lenient();
        self
    }

    /// Capture the Title / Meta Description values from the preamble.
    pub fn capture_metadata(mut self) -> Self {
        self.parse_options = self.parse_options.capture_metadata();
        self
    }

    /// Set the paragraph that ends the preamble.
    pub fn with_keyword_marker(mut self, marker: impl Into<String>) -> Self {
        self.parse_options = self.parse_options.with_keyword_marker(marker);
        self
    }

    /// Set the phrase that ends content extraction.
    pub fn with_terminator(mut self, phrase: impl Into<String>) -> Self {
        self.parse_options = self.parse_options.with_terminator(phrase);
        self
    }

    /// Render standalone pages instead of fragments.
    pub fn full_page(mut self) -> Self {
        self.render_options = self.render_options.full_page();
        self
    }

    /// Set the page language.
    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.render_options = self.render_options.with_lang(lang);
        self
    }

    /// Escape text payloads in HTML output.
    pub fn escaped(mut self) -> Self {
        self.render_options = self.render_options.with_escaping(true);
        self
    }

    /// Parse a Word file and return a result wrapper.
    pub fn parse<P: AsRef<Path>>(self, path: P) -> Result<UnwordResult> {
        let parser = DocxParser::open_with_options(path, self.parse_options)?;
        let document = parser.parse()?;
        Ok(UnwordResult {
            document,
            render_options: self.render_options,
        })
    }

    /// Parse a Word document from bytes.
    pub fn parse_bytes(self, data: &[u8]) -> Result<UnwordResult> {
        let parser = DocxParser::from_bytes_with_options(data, self.parse_options)?;
        let document = parser.parse()?;
        Ok(UnwordResult {
            document,
            render_options: self.render_options,
        })
    }

    /// Structure an already-read paragraph sequence.
    pub fn parse_source(self, source: &SourceDocument) -> UnwordResult {
        let document = parse_structure(&source.paragraphs, &source.numbering, &self.parse_options);
        UnwordResult {
            document,
            render_options: self.render_options,
        }
    }
}

impl Default for Unword {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of parsing a Word document.
pub struct UnwordResult {
    /// The parsed document
    pub document: ParsedDocument,
    /// Render options to use
    render_options: RenderOptions,
}

impl UnwordResult {
    /// Convert to HTML.
    pub fn to_html(&self) -> Result<String> {
        render::to_html(&self.document, &self.render_options)
    }

    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.document, format)
    }

    /// Content statistics.
    pub fn stats(&self) -> DocumentStats {
        self.document.stats()
    }

    /// Get the document.
    pub fn document(&self) -> &ParsedDocument {
        &self.document
    }
}
