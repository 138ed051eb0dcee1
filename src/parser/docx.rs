//! DOCX package reader using zip and quick-xml.
//!
//! Produces a [`SourceDocument`]: the body-level paragraphs of the main
//! document part with their style display names and numbering references,
//! the numbering definitions, and the package core properties. Part names
//! come from the package relationships (see [`PackageParts`]).

use std::collections::HashMap;
use std::io::{Cursor, Read};
use std::path::Path;

use chrono::{DateTime, Utc};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use zip::ZipArchive;

use crate::detect::is_zip_bytes;
use crate::error::{Error, Result};
use crate::model::{Metadata, NumberingRef, NumberingTable, ParsedDocument, RawParagraph, SourceDocument};

use super::options::{ErrorMode, ParseOptions};
use super::parts::{read_entry, PackageParts};
use super::structure::parse_structure;

/// Style name used when neither the paragraph nor the styles part names one.
const FALLBACK_STYLE: &str = "Normal";

/// Element paths below a paragraph.
const PARAGRAPH_PROPERTIES: &[&[u8]] = &[b"pPr"];
const NUMBERING_PROPERTIES: &[&[u8]] = &[b"pPr", b"numPr"];
const RUN: &[&[u8]] = &[b"r"];
const LINKED_RUN: &[&[u8]] = &[b"hyperlink", b"r"];

/// Built-in styles stored lower-case in the package but shown capitalized.
const BUILTIN_LOWERCASE_STYLES: &[&str] = &["caption", "footer", "header", "heading"];

/// DOCX document parser.
pub struct DocxParser {
    archive: ZipArchive<Cursor<Vec<u8>>>,
    parts: PackageParts,
    options: ParseOptions,
}

impl DocxParser {
    /// Open a DOCX file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ParseOptions::default())
    }

    /// Open a DOCX file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::from_vec(data, options)
    }

    /// Parse a DOCX package from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, ParseOptions::default())
    }

    /// Parse a DOCX package from bytes with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Self> {
        Self::from_vec(data.to_vec(), options)
    }

    /// Parse a DOCX package from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_reader_with_options(reader, ParseOptions::default())
    }

    /// Parse a DOCX package from a reader with custom options.
    pub fn from_reader_with_options<R: Read>(mut reader: R, options: ParseOptions) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_vec(data, options)
    }

    fn from_vec(data: Vec<u8>, options: ParseOptions) -> Result<Self> {
        if !is_zip_bytes(&data) {
            return Err(Error::UnknownFormat);
        }
        let mut archive = ZipArchive::new(Cursor::new(data))?;
        let parts = PackageParts::resolve(&mut archive)?;
        Ok(Self {
            archive,
            parts,
            options,
        })
    }

    /// Read the flat paragraph sequence and numbering definitions.
    pub fn read_source(&mut self) -> Result<SourceDocument> {
        let parts = &self.parts;
        let document_xml = read_entry(&mut self.archive, &parts.document)?
            .ok_or_else(|| Error::MissingPart(parts.document.clone()))?;

        let styles = match read_entry(&mut self.archive, &parts.styles)? {
            Some(xml) => parse_styles(&xml),
            None => StyleNames::default(),
        };

        let numbering = match read_entry(&mut self.archive, &parts.numbering)? {
            Some(xml) => parse_numbering(&xml),
            None => {
                log::debug!("No numbering part; list items resolve to bullets");
                NumberingTable::new()
            }
        };

        let metadata = match read_entry(&mut self.archive, &parts.core)? {
            Some(xml) => parse_core_properties(&xml),
            None => Metadata::default(),
        };

        let paragraphs = parse_paragraphs(
            &document_xml,
            &parts.document,
            &styles,
            self.options.error_mode,
        )?;
        log::debug!(
            "Read {} paragraphs, {} list instances",
            paragraphs.len(),
            numbering.instance_count()
        );

        Ok(SourceDocument {
            metadata,
            paragraphs,
            numbering,
        })
    }

    /// Read the package and rebuild its structure.
    pub fn parse(mut self) -> Result<ParsedDocument> {
        let source = self.read_source()?;
        Ok(parse_structure(
            &source.paragraphs,
            &source.numbering,
            &self.options,
        ))
    }

    /// Name of the main document part inside the package.
    pub fn document_part(&self) -> &str {
        &self.parts.document
    }
}

/// Style id → display name, plus the default paragraph style.
#[derive(Debug, Default)]
struct StyleNames {
    names: HashMap<String, String>,
    default_paragraph: Option<String>,
}

impl StyleNames {
    /// Display name for a paragraph's `pStyle` id.
    ///
    /// Unknown or absent ids resolve to the default paragraph style.
    fn resolve(&self, style_id: Option<&str>) -> String {
        style_id
            .and_then(|id| self.names.get(id))
            .or(self.default_paragraph.as_ref())
            .cloned()
            .unwrap_or_else(|| FALLBACK_STYLE.to_string())
    }
}

/// Capitalize built-in style names ("heading 1" → "Heading 1").
fn display_style_name(name: &str) -> String {
    let is_builtin = BUILTIN_LOWERCASE_STYLES
        .iter()
        .any(|b| name == *b || name.starts_with(&format!("{} ", b)));
    if !is_builtin {
        return name.to_string();
    }

    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Value of an attribute by local name (namespace prefix ignored).
pub(super) fn attr_val(e: &BytesStart<'_>, key_local: &[u8]) -> Option<String> {
    e.attributes()
        .with_checks(false)
        .flatten()
        .find(|a| a.key.local_name().as_ref() == key_local)
        .and_then(|a| a.unescape_value().ok().map(|v| v.into_owned()))
}

fn local(e: &BytesStart<'_>) -> Vec<u8> {
    e.local_name().as_ref().to_vec()
}

/// Check that the element path between two points is exactly `expected`.
fn is_path(rel: &[Vec<u8>], expected: &[&[u8]]) -> bool {
    rel.len() == expected.len() && rel.iter().zip(expected).all(|(a, b)| a.as_slice() == *b)
}

fn parse_styles(xml: &str) -> StyleNames {
    let mut styles = StyleNames::default();
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);
    let mut buf = Vec::new();

    let mut current: Option<(String, bool)> = None;

    loop {
        buf.clear();
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => match e.local_name().as_ref() {
                b"style" => {
                    let is_paragraph = attr_val(&e, b"type").as_deref() == Some("paragraph");
                    let is_default = matches!(attr_val(&e, b"default").as_deref(), Some("1") | Some("true"));
                    current = attr_val(&e, b"styleId").map(|id| (id, is_paragraph && is_default));
                }
                b"name" => {
                    if let (Some((id, is_default)), Some(name)) = (&current, attr_val(&e, b"val")) {
                        let name = display_style_name(&name);
                        if *is_default {
                            styles.default_paragraph = Some(name.clone());
                        }
                        styles.names.insert(id.clone(), name);
                    }
                }
                _ => {}
            },
            Ok(Event::End(e)) => {
                if e.local_name().as_ref() == b"style" {
                    current = None;
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                log::warn!("Malformed styles part, using styles read so far: {}", e);
                break;
            }
            _ => {}
        }
    }

    styles
}

fn parse_numbering(xml: &str) -> NumberingTable {
    let mut table = NumberingTable::new();
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);
    let mut buf = Vec::new();

    let mut abstract_id: Option<String> = None;
    let mut level: Option<u32> = None;
    let mut num_id: Option<String> = None;

    loop {
        buf.clear();
        let (e, is_empty) = match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => (e, false),
            Ok(Event::Empty(e)) => (e, true),
            Ok(Event::End(e)) => {
                match e.local_name().as_ref() {
                    b"abstractNum" => abstract_id = None,
                    b"lvl" => level = None,
                    b"num" => num_id = None,
                    _ => {}
                }
                continue;
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                log::warn!("Malformed numbering part, list lookups fall back to bullets: {}", e);
                break;
            }
            _ => continue,
        };

        match e.local_name().as_ref() {
            b"abstractNum" if !is_empty => abstract_id = attr_val(&e, b"abstractNumId"),
            b"lvl" if !is_empty && abstract_id.is_some() => {
                level = attr_val(&e, b"ilvl").and_then(|v| v.parse().ok());
            }
            b"numFmt" => {
                if let (Some(abs), Some(lvl), Some(fmt)) = (&abstract_id, level, attr_val(&e, b"val")) {
                    table.add_level(abs.clone(), lvl, fmt);
                }
            }
            b"num" if !is_empty => num_id = attr_val(&e, b"numId"),
            b"abstractNumId" => {
                if let (Some(id), Some(abs)) = (&num_id, attr_val(&e, b"val")) {
                    table.add_instance(id.clone(), abs);
                }
            }
            _ => {}
        }
    }

    table
}

fn parse_core_properties(xml: &str) -> Metadata {
    let mut metadata = Metadata::default();
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);
    let mut buf = Vec::new();
    let mut field: Option<Vec<u8>> = None;

    loop {
        buf.clear();
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => field = Some(local(&e)),
            Ok(Event::End(_)) => field = None,
            Ok(Event::Text(t)) => {
                let Some(name) = field.as_deref() else {
                    continue;
                };
                let Ok(value) = t.unescape() else {
                    continue;
                };
                let value = value.trim().to_string();
                match name {
                    b"title" => metadata.title = Some(value),
                    b"creator" => metadata.author = Some(value),
                    b"lastModifiedBy" => metadata.last_modified_by = Some(value),
                    b"created" => metadata.created = parse_w3c_date(&value),
                    b"modified" => metadata.modified = parse_w3c_date(&value),
                    _ => {}
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                log::warn!("Malformed core properties part: {}", e);
                break;
            }
            _ => {}
        }
    }

    metadata
}

fn parse_w3c_date(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|d| d.with_timezone(&Utc))
        .ok()
}

/// Paragraph being collected from `document.xml`.
struct PendingParagraph {
    /// Index of the `p` element in the element stack
    index: usize,
    text: String,
    style_id: Option<String>,
    num_id: Option<String>,
    level: Option<u32>,
    in_text: bool,
}

impl PendingParagraph {
    fn new(index: usize) -> Self {
        Self {
            index,
            text: String::new(),
            style_id: None,
            num_id: None,
            level: None,
            in_text: false,
        }
    }

    /// Handle an element opened inside this paragraph; `rel` is the path
    /// from the paragraph down to the element's parent.
    fn open(&mut self, name: &[u8], e: &BytesStart<'_>, rel: &[Vec<u8>], is_empty: bool) {
        let in_run = is_path(rel, RUN) || is_path(rel, LINKED_RUN);
        let in_num_pr = is_path(rel, NUMBERING_PROPERTIES);

        match name {
            b"pStyle" if is_path(rel, PARAGRAPH_PROPERTIES) => self.style_id = attr_val(e, b"val"),
            b"numId" if in_num_pr => self.num_id = attr_val(e, b"val"),
            b"ilvl" if in_num_pr => self.level = attr_val(e, b"val").and_then(|v| v.parse().ok()),
            b"t" if in_run && !is_empty => self.in_text = true,
            b"tab" | b"ptab" if in_run => self.text.push('\t'),
            b"cr" if in_run => self.text.push('\n'),
            b"br" if in_run => {
                let wraps = attr_val(e, b"type")
                    .map(|t| t == "textWrapping")
                    .unwrap_or(true);
                if wraps {
                    self.text.push('\n');
                }
            }
            b"noBreakHyphen" if in_run => self.text.push('-'),
            _ => {}
        }
    }

    fn finish(self, styles: &StyleNames) -> RawParagraph {
        let numbering = self
            .num_id
            .map(|id| NumberingRef::new(id, self.level.unwrap_or(0)));
        RawParagraph {
            text: self.text.trim().to_string(),
            style_name: styles.resolve(self.style_id.as_deref()),
            numbering,
        }
    }
}

/// Read body-level paragraphs from the main document part.
///
/// Paragraphs nested in tables, text boxes or content controls are not part
/// of the body sequence.
fn parse_paragraphs(
    xml: &str,
    part: &str,
    styles: &StyleNames,
    mode: ErrorMode,
) -> Result<Vec<RawParagraph>> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(false);
    let mut buf = Vec::new();

    let mut paragraphs = Vec::new();
    let mut stack: Vec<Vec<u8>> = Vec::new();
    let mut pending: Option<PendingParagraph> = None;

    loop {
        buf.clear();
        let event = match reader.read_event_into(&mut buf) {
            Ok(event) => event,
            Err(e) => {
                let position = reader.buffer_position();
                if mode == ErrorMode::Lenient {
                    log::warn!(
                        "Malformed document part at byte {}, keeping {} paragraphs: {}",
                        position,
                        paragraphs.len(),
                        e
                    );
                    break;
                }
                return Err(Error::Xml(format!("{} at byte {}: {}", part, position, e)));
            }
        };

        match event {
            Event::Start(e) => {
                let name = local(&e);
                let at_body = stack.last().map(|n| n.as_slice()) == Some(b"body".as_slice());
                if name == b"p" && at_body {
                    pending = Some(PendingParagraph::new(stack.len()));
                } else if let Some(p) = pending.as_mut() {
                    let rel = &stack[p.index + 1..];
                    p.open(&name, &e, rel, false);
                }
                stack.push(name);
            }
            Event::Empty(e) => {
                let name = local(&e);
                let at_body = stack.last().map(|n| n.as_slice()) == Some(b"body".as_slice());
                if name == b"p" && at_body {
                    paragraphs.push(PendingParagraph::new(stack.len()).finish(styles));
                } else if let Some(p) = pending.as_mut() {
                    let rel = &stack[p.index + 1..];
                    p.open(&name, &e, rel, true);
                }
            }
            Event::End(_) => {
                stack.pop();
                if let Some(p) = pending.as_mut() {
                    if stack.len() == p.index {
                        if let Some(done) = pending.take() {
                            paragraphs.push(done.finish(styles));
                        }
                    } else {
                        p.in_text = false;
                    }
                }
            }
            Event::Text(t) => {
                if let Some(p) = pending.as_mut().filter(|p| p.in_text) {
                    match t.unescape() {
                        Ok(text) => p.text.push_str(&text),
                        Err(e) => log::warn!("Skipping undecodable text run: {}", e),
                    }
                }
            }
            Event::CData(t) => {
                if let Some(p) = pending.as_mut().filter(|p| p.in_text) {
                    p.text.push_str(&String::from_utf8_lossy(&t));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs)
}
