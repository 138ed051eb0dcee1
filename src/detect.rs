//! DOCX package detection and validation.

use crate::error::{Error, Result};
use crate::parser::parts::PackageParts;
use std::fs::File;
use std::io::{BufReader, Cursor, Read};
use std::path::Path;

/// Zip local file header magic: PK\x03\x04
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

/// Main document part of a package without relationship parts.
pub const DOCUMENT_PART: &str = "word/document.xml";

/// Package information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocxFormat {
    /// Number of entries in the zip container
    pub entry_count: usize,
    /// Zip entry name of the main document part
    pub main_part: String,
    /// Whether the package carries a numbering definitions part
    pub has_numbering: bool,
    /// Whether the package carries a styles part
    pub has_styles: bool,
}

impl std::fmt::Display for DocxFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DOCX ({} parts)", self.entry_count)
    }
}

/// Detect a DOCX package from a file path.
///
/// # Example
/// ```no_run
/// use unword::detect::detect_format_from_path;
///
/// let format = detect_format_from_path("article.docx").unwrap();
/// println!("{}", format);
/// ```
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<DocxFormat> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    detect_format_from_bytes(&data)
}

/// Detect a DOCX package from its bytes.
///
/// # Returns
/// * `Ok(DocxFormat)` if the data is a zip container holding its main document part
/// * `Err(Error::UnknownFormat)` if the data is not a zip container
/// * `Err(Error::MissingPart)` if the container has no main document part
///
/// The main part is the target of the package `officeDocument` relationship,
/// or [`DOCUMENT_PART`] when the package has no relationships.
pub fn detect_format_from_bytes(data: &[u8]) -> Result<DocxFormat> {
    if !is_zip_bytes(data) {
        return Err(Error::UnknownFormat);
    }

    let mut archive = zip::ZipArchive::new(Cursor::new(data))?;
    let parts = PackageParts::resolve(&mut archive)?;
    let has_part = |name: &str| archive.file_names().any(|n| n == name);

    if !has_part(&parts.document) {
        return Err(Error::MissingPart(parts.document));
    }

    Ok(DocxFormat {
        entry_count: archive.len(),
        has_numbering: has_part(&parts.numbering),
        has_styles: has_part(&parts.styles),
        main_part: parts.document,
    })
}

/// Check whether bytes start with a zip local file header.
pub fn is_zip_bytes(data: &[u8]) -> bool {
    data.starts_with(ZIP_MAGIC)
}

/// Check if a path has a `.docx` extension and is not a Word lock file.
pub fn is_docx<P: AsRef<Path>>(path: P) -> bool {
    let path = path.as_ref();
    let is_lock_file = path
        .file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.starts_with("~$"))
        .unwrap_or(false);

    !is_lock_file
        && path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case("docx"))
            .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn zip_with(entries: &[&str]) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        for name in entries {
            writer
                .start_file(*name, zip::write::FileOptions::default())
                .unwrap();
            writer.write_all(b"<xml/>").unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_detect_empty_data() {
        let result = detect_format_from_bytes(&[]);
        assert!(matches!(result, Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_detect_not_zip() {
        let result = detect_format_from_bytes(b"%PDF-1.7\n%test");
        assert!(matches!(result, Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_detect_zip_without_document() {
        let data = zip_with(&["readme.txt"]);
        let result = detect_format_from_bytes(&data);
        assert!(matches!(result, Err(Error::MissingPart(_))));
    }

    #[test]
    fn test_detect_valid_package() {
        let data = zip_with(&["[Content_Types].xml", DOCUMENT_PART, "word/numbering.xml"]);
        let format = detect_format_from_bytes(&data).unwrap();
        assert_eq!(format.entry_count, 3);
        assert_eq!(format.main_part, DOCUMENT_PART);
        assert!(format.has_numbering);
        assert!(!format.has_styles);
    }

    #[test]
    fn test_detect_renamed_main_part() {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let entries = [
            (
                "_rels/.rels",
                r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/main.xml"/></Relationships>"#,
            ),
            ("word/main.xml", "<w:document/>"),
            ("word/styles.xml", "<w:styles/>"),
        ];
        for (name, content) in entries {
            writer
                .start_file(name, zip::write::FileOptions::default())
                .unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        }
        let data = writer.finish().unwrap().into_inner();

        let format = detect_format_from_bytes(&data).unwrap();
        assert_eq!(format.main_part, "word/main.xml");
        assert!(format.has_styles);
        assert!(!format.has_numbering);
    }

    #[test]
    fn test_is_docx() {
        assert!(is_docx("dokument/artikel.docx"));
        assert!(is_docx("ARTIKEL.DOCX"));
        assert!(!is_docx("dokument/~$artikel.docx"));
        assert!(!is_docx("artikel.doc"));
        assert!(!is_docx("artikel"));
    }
}
