//! Multi-document conversion.
//!
//! Each document is read, structured and rendered independently. A failure
//! in one document is recorded in its outcome and never aborts the batch.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::detect::is_docx;
use crate::error::{Error, Result};
use crate::model::DocumentStats;
use crate::parser::{DocxParser, ParseOptions};
use crate::render::{self, RenderOptions};
use crate::report::ReportLayout;

/// Options for batch conversion.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Parsing options applied to every document
    pub parse: ParseOptions,

    /// Rendering options applied to every document
    pub render: RenderOptions,

    /// Column layout of the spreadsheet report
    pub layout: ReportLayout,

    /// Convert documents on the rayon thread pool
    pub parallel: bool,

    /// Write `<name>.html` next to each input document
    pub write_html: bool,
}

impl BatchOptions {
    /// Create new batch options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set parsing options.
    pub fn with_parse_options(mut self, options: ParseOptions) -> Self {
        self.parse = options;
        self
    }

    /// Set rendering options.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render = options;
        self
    }

    /// Set the report layout.
    pub fn with_layout(mut self, layout: ReportLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Convert documents one after another.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Enable or disable sibling HTML files.
    pub fn with_html_files(mut self, write: bool) -> Self {
        self.write_html = write;
        self
    }
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            parse: ParseOptions::default(),
            render: RenderOptions::default(),
            layout: ReportLayout::default(),
            parallel: true,
            write_html: false,
        }
    }
}

/// A successfully converted document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertedDocument {
    /// File name of the input
    pub name: String,

    /// Meta title captured from the preamble
    pub meta_title: Option<String>,

    /// Meta description captured from the preamble
    pub meta_description: Option<String>,

    /// Document title
    pub title: String,

    /// Lead paragraph
    pub lead: String,

    /// Section titles in order
    pub section_titles: Vec<String>,

    /// Content statistics
    pub stats: DocumentStats,

    /// Rendered HTML
    pub html: String,
}

impl ConvertedDocument {
    /// Number of sections.
    pub fn section_count(&self) -> usize {
        self.section_titles.len()
    }
}

/// Outcome of converting one input document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentOutcome {
    /// File name of the input
    pub name: String,

    /// Path of the input
    pub path: PathBuf,

    /// Converted document or the error message
    pub result: std::result::Result<ConvertedDocument, String>,
}

impl DocumentOutcome {
    /// Check if the document was converted.
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    /// Error message of a failed document.
    pub fn error(&self) -> Option<&str> {
        self.result.as_ref().err().map(|e| e.as_str())
    }
}

/// Outcomes of a batch, in input order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchReport {
    /// One outcome per input document
    pub outcomes: Vec<DocumentOutcome>,
}

impl BatchReport {
    /// Number of documents in the batch.
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// Check if the batch is empty.
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Number of converted documents.
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_ok()).count()
    }

    /// Number of failed documents.
    pub fn failed(&self) -> usize {
        self.len() - self.succeeded()
    }

    /// Iterate over converted documents.
    pub fn converted(&self) -> impl Iterator<Item = &ConvertedDocument> {
        self.outcomes.iter().filter_map(|o| o.result.as_ref().ok())
    }

    /// Sum of statistics over converted documents.
    pub fn total_stats(&self) -> DocumentStats {
        let mut total = DocumentStats::new();
        for doc in self.converted() {
            total.merge(&doc.stats);
        }
        total
    }
}

/// Convert a single Word file.
///
/// # Example
///
/// ```no_run
/// use unword::{convert_file, BatchOptions};
///
/// let converted = convert_file("article.docx", &BatchOptions::default()).unwrap();
/// println!("{}", converted.html);
/// ```
pub fn convert_file<P: AsRef<Path>>(path: P, options: &BatchOptions) -> Result<ConvertedDocument> {
    let path = path.as_ref();
    let parser = DocxParser::open_with_options(path, options.parse.clone())?;
    let doc = parser.parse()?;
    let html = render::to_html(&doc, &options.render)?;

    if options.write_html {
        let target = html_path(path);
        fs::write(&target, &html)?;
        log::debug!("Wrote {}", target.display());
    }

    Ok(ConvertedDocument {
        name: display_name(path),
        meta_title: doc.meta.title.clone(),
        meta_description: doc.meta.description.clone(),
        stats: doc.stats(),
        section_titles: doc.section_titles().into_iter().map(String::from).collect(),
        title: doc.title,
        lead: doc.lead,
        html,
    })
}

/// Convert several Word files.
///
/// Returns [`Error::EmptyBatch`] when `paths` is empty. Otherwise every input
/// yields one outcome, in input order, whether or not it converted.
pub fn convert_batch<P>(paths: &[P], options: &BatchOptions) -> Result<BatchReport>
where
    P: AsRef<Path> + Sync,
{
    convert_batch_with_progress(paths, options, |_| {})
}

/// Convert several Word files, calling `on_done` after each document.
///
/// With parallel conversion `on_done` runs on worker threads, in completion
/// order.
pub fn convert_batch_with_progress<P, F>(
    paths: &[P],
    options: &BatchOptions,
    on_done: F,
) -> Result<BatchReport>
where
    P: AsRef<Path> + Sync,
    F: Fn(&DocumentOutcome) + Sync,
{
    if paths.is_empty() {
        return Err(Error::EmptyBatch);
    }

    let convert_one = |path: &P| {
        let outcome = convert_outcome(path.as_ref(), options);
        on_done(&outcome);
        outcome
    };

    let outcomes: Vec<DocumentOutcome> = if options.parallel {
        paths.par_iter().map(convert_one).collect()
    } else {
        paths.iter().map(convert_one).collect()
    };

    let report = BatchReport { outcomes };
    log::debug!(
        "Batch finished: {} converted, {} failed",
        report.succeeded(),
        report.failed()
    );
    Ok(report)
}

fn convert_outcome(path: &Path, options: &BatchOptions) -> DocumentOutcome {
    let result = convert_file(path, options).map_err(|e| {
        log::error!("Failed to convert {}: {}", path.display(), e);
        e.to_string()
    });

    DocumentOutcome {
        name: display_name(path),
        path: path.to_path_buf(),
        result,
    }
}

/// List the Word documents of a directory, sorted by path.
///
/// Not recursive. Word lock files (`~$name.docx`) are skipped.
pub fn scan_folder<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && is_docx(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Path of the sibling HTML file for a document.
pub fn html_path(path: &Path) -> PathBuf {
    path.with_extension("html")
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
