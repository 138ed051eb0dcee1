//! In-memory Word package builder shared by the integration tests.

#![allow(dead_code)]

use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use zip::write::FileOptions;
use zip::ZipWriter;

const STYLES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/></w:style>
  <w:style w:type="paragraph" w:styleId="Heading1"><w:name w:val="heading 1"/></w:style>
  <w:style w:type="paragraph" w:styleId="Heading2"><w:name w:val="heading 2"/></w:style>
  <w:style w:type="paragraph" w:styleId="Heading3"><w:name w:val="heading 3"/></w:style>
  <w:style w:type="paragraph" w:styleId="ListParagraph"><w:name w:val="List Paragraph"/></w:style>
</w:styles>"#;

/// Numbering part with list 1 bulleted and list 2 decimal.
const NUMBERING_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:numbering xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:abstractNum w:abstractNumId="10">
    <w:lvl w:ilvl="0"><w:numFmt w:val="bullet"/><w:lvlText w:val="•"/></w:lvl>
  </w:abstractNum>
  <w:abstractNum w:abstractNumId="20">
    <w:lvl w:ilvl="0"><w:numFmt w:val="decimal"/><w:lvlText w:val="%1."/></w:lvl>
    <w:lvl w:ilvl="1"><w:numFmt w:val="lowerLetter"/><w:lvlText w:val="%2)"/></w:lvl>
  </w:abstractNum>
  <w:num w:numId="1"><w:abstractNumId w:val="10"/></w:num>
  <w:num w:numId="2"><w:abstractNumId w:val="20"/></w:num>
</w:numbering>"#;

const CORE_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
  <dc:title>Package title</dc:title>
  <dc:creator>Redaktionen</dc:creator>
  <dcterms:created xsi:type="dcterms:W3CDTF">2024-03-01T09:30:00Z</dcterms:created>
</cp:coreProperties>"#;

/// Bulleted list id of [`NUMBERING_XML`].
pub const BULLET_LIST: &str = "1";

/// Decimal list id of [`NUMBERING_XML`].
pub const NUMBERED_LIST: &str = "2";

/// Builder for a minimal `.docx` package.
pub struct DocxBuilder {
    body: String,
    numbering: bool,
    styles: bool,
    main_part: Option<String>,
}

impl DocxBuilder {
    pub fn new() -> Self {
        Self {
            body: String::new(),
            numbering: true,
            styles: true,
            main_part: None,
        }
    }

    /// Store the body under `name` and locate it, the styles and the
    /// numbering through relationship parts.
    pub fn with_main_part(mut self, name: &str) -> Self {
        self.main_part = Some(name.to_string());
        self
    }

    /// Leave out `word/numbering.xml`.
    pub fn without_numbering(mut self) -> Self {
        self.numbering = false;
        self
    }

    /// Leave out `word/styles.xml`.
    pub fn without_styles(mut self) -> Self {
        self.styles = false;
        self
    }

    pub fn paragraph(self, text: &str) -> Self {
        self.raw(&para(None, None, text))
    }

    pub fn heading(self, level: u8, text: &str) -> Self {
        let style = format!("Heading{}", level);
        self.raw(&para(Some(&style), None, text))
    }

    pub fn bullet(self, text: &str) -> Self {
        self.raw(&para(Some("ListParagraph"), Some((BULLET_LIST, 0)), text))
    }

    pub fn numbered(self, text: &str) -> Self {
        self.raw(&para(Some("ListParagraph"), Some((NUMBERED_LIST, 0)), text))
    }

    pub fn list_item(self, num_id: &str, level: u32, text: &str) -> Self {
        self.raw(&para(Some("ListParagraph"), Some((num_id, level)), text))
    }

    pub fn empty(self) -> Self {
        self.raw("<w:p/>")
    }

    /// Append raw body XML.
    pub fn raw(mut self, xml: &str) -> Self {
        self.body.push_str(xml);
        self
    }

    /// The preamble closed by the default keyword marker.
    pub fn preamble(self) -> Self {
        self.paragraph("Internal notes")
            .paragraph("Keywords")
            .paragraph("seo, words")
    }

    pub fn document_xml(&self) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}<w:sectPr/></w:body></w:document>"#,
            self.body
        )
    }

    pub fn build(&self) -> Vec<u8> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = FileOptions::default();

        let mut add = |name: &str, content: &str| {
            zip.start_file(name, options).unwrap();
            zip.write_all(content.as_bytes()).unwrap();
        };

        add(
            "[Content_Types].xml",
            r#"<?xml version="1.0" encoding="UTF-8"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"/>"#,
        );
        match &self.main_part {
            Some(main) => {
                let (dir, file) = main.rsplit_once('/').unwrap_or(("", main.as_str()));
                let prefix = if dir.is_empty() {
                    String::new()
                } else {
                    format!("{}/", dir)
                };
                add(
                    "_rels/.rels",
                    &relationships(&[("officeDocument", format!("/{}", main).as_str())]),
                );
                add(
                    &format!("{}_rels/{}.rels", prefix, file),
                    &relationships(&[
                        ("styles", "layout/styles.xml"),
                        ("numbering", "layout/lists.xml"),
                    ]),
                );
                add(main, &self.document_xml());
                if self.styles {
                    add(&format!("{}layout/styles.xml", prefix), STYLES_XML);
                }
                if self.numbering {
                    add(&format!("{}layout/lists.xml", prefix), NUMBERING_XML);
                }
            }
            None => {
                add("word/document.xml", &self.document_xml());
                if self.styles {
                    add("word/styles.xml", STYLES_XML);
                }
                if self.numbering {
                    add("word/numbering.xml", NUMBERING_XML);
                }
            }
        }
        add("docProps/core.xml", CORE_XML);

        zip.finish().unwrap().into_inner()
    }

    /// Write the package to `dir/name` and return its path.
    pub fn write_to(&self, dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, self.build()).unwrap();
        path
    }
}

fn relationships(entries: &[(&str, &str)]) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    );
    for (i, (kind, target)) in entries.iter().enumerate() {
        xml.push_str(&format!(
            r#"<Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/{}" Target="{}"/>"#,
            i + 1,
            kind,
            target
        ));
    }
    xml.push_str("</Relationships>");
    xml
}

fn para(style: Option<&str>, numbering: Option<(&str, u32)>, text: &str) -> String {
    let mut props = String::new();
    if let Some(style) = style {
        props.push_str(&format!(r#"<w:pStyle w:val="{}"/>"#, style));
    }
    if let Some((num_id, level)) = numbering {
        props.push_str(&format!(
            r#"<w:numPr><w:ilvl w:val="{}"/><w:numId w:val="{}"/></w:numPr>"#,
            level, num_id
        ));
    }
    let props = if props.is_empty() {
        String::new()
    } else {
        format!("<w:pPr>{}</w:pPr>", props)
    };
    format!(
        r#"<w:p>{}<w:r><w:t xml:space="preserve">{}</w:t></w:r></w:p>"#,
        props,
        html_escape::encode_text(text)
    )
}

/// The reference article: preamble, title, lead, one bulleted section and
/// a terminator heading followed by FAQ content.
pub fn reference_article() -> DocxBuilder {
    DocxBuilder::new()
        .paragraph("Keywords")
        .paragraph("ignored")
        .heading(1, "Main Title")
        .paragraph("Intro text.")
        .heading(2, "First Section")
        .bullet("Point one")
        .bullet("Point two")
        .heading(1, "Vanliga frågor och svar")
        .heading(2, "Hidden")
        .paragraph("Hidden answer")
}
