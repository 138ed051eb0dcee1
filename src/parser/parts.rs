//! Part lookup through the package relationships.
//!
//! The main document is the target of the package-level `officeDocument`
//! relationship, and the styles and numbering parts are targets of the main
//! document's own relationships. Packages without relationship parts fall
//! back to the conventional `word/` names.

use std::io::{Read, Seek};

use quick_xml::events::Event;
use quick_xml::Reader;
use zip::ZipArchive;

use crate::detect::DOCUMENT_PART;
use crate::error::Result;

use super::docx::attr_val;

const PACKAGE_RELS: &str = "_rels/.rels";
const DEFAULT_STYLES: &str = "word/styles.xml";
const DEFAULT_NUMBERING: &str = "word/numbering.xml";
const DEFAULT_CORE: &str = "docProps/core.xml";

/// Relationship type suffixes, shared by the transitional and strict schemas.
const OFFICE_DOCUMENT_REL: &str = "/officeDocument";
const CORE_PROPERTIES_REL: &str = "/core-properties";
const STYLES_REL: &str = "/styles";
const NUMBERING_REL: &str = "/numbering";

/// Zip entry names of the parts the reader consumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PackageParts {
    pub(crate) document: String,
    pub(crate) styles: String,
    pub(crate) numbering: String,
    pub(crate) core: String,
}

impl Default for PackageParts {
    fn default() -> Self {
        Self {
            document: DOCUMENT_PART.to_string(),
            styles: DEFAULT_STYLES.to_string(),
            numbering: DEFAULT_NUMBERING.to_string(),
            core: DEFAULT_CORE.to_string(),
        }
    }
}

impl PackageParts {
    /// Follow the package and main-document relationships.
    pub(crate) fn resolve<R: Read + Seek>(archive: &mut ZipArchive<R>) -> Result<Self> {
        let mut parts = Self::default();

        if let Some(xml) = read_entry(archive, PACKAGE_RELS)? {
            let rels = parse_relationships(&xml);
            if let Some(target) = find_target(&rels, OFFICE_DOCUMENT_REL) {
                parts.document = resolve_target("", target);
            }
            if let Some(target) = find_target(&rels, CORE_PROPERTIES_REL) {
                parts.core = resolve_target("", target);
            }
        }

        let document = parts.document.clone();
        let (dir, file) = split_part_name(&document);
        let document_rels = if dir.is_empty() {
            format!("_rels/{}.rels", file)
        } else {
            format!("{}/_rels/{}.rels", dir, file)
        };

        if let Some(xml) = read_entry(archive, &document_rels)? {
            let rels = parse_relationships(&xml);
            if let Some(target) = find_target(&rels, STYLES_REL) {
                parts.styles = resolve_target(dir, target);
            }
            if let Some(target) = find_target(&rels, NUMBERING_REL) {
                parts.numbering = resolve_target(dir, target);
            }
        }

        log::debug!("Resolved package parts: {:?}", parts);
        Ok(parts)
    }
}

/// Read an entry as UTF-8 text, `None` if the package does not contain it.
pub(crate) fn read_entry<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    name: &str,
) -> Result<Option<String>> {
    let mut file = match archive.by_name(name) {
        Ok(file) => file,
        Err(zip::result::ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)?;
    Ok(Some(String::from_utf8_lossy(&bytes).into_owned()))
}

#[derive(Debug)]
struct Relationship {
    rel_type: String,
    target: String,
    external: bool,
}

fn parse_relationships(xml: &str) -> Vec<Relationship> {
    let mut rels = Vec::new();
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);
    let mut buf = Vec::new();

    loop {
        buf.clear();
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) | Ok(Event::Empty(e))
                if e.local_name().as_ref() == b"Relationship" =>
            {
                if let (Some(rel_type), Some(target)) = (attr_val(&e, b"Type"), attr_val(&e, b"Target")) {
                    let external = attr_val(&e, b"TargetMode").as_deref() == Some("External");
                    rels.push(Relationship {
                        rel_type,
                        target,
                        external,
                    });
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                log::warn!("Malformed relationships part, keeping {} entries: {}", rels.len(), e);
                break;
            }
            _ => {}
        }
    }

    rels
}

fn find_target<'a>(rels: &'a [Relationship], type_suffix: &str) -> Option<&'a str> {
    rels.iter()
        .find(|r| !r.external && r.rel_type.ends_with(type_suffix))
        .map(|r| r.target.as_str())
}

/// Split a part name into its directory and file name.
fn split_part_name(name: &str) -> (&str, &str) {
    match name.rfind('/') {
        Some(i) => (&name[..i], &name[i + 1..]),
        None => ("", name),
    }
}

/// Resolve a relationship target against the directory of its source part.
///
/// Absolute targets start at the package root. The result never has a
/// leading slash, matching zip entry names.
fn resolve_target(base_dir: &str, target: &str) -> String {
    let (mut segments, target): (Vec<&str>, &str) = match target.strip_prefix('/') {
        Some(absolute) => (Vec::new(), absolute),
        None => (base_dir.split('/').filter(|s| !s.is_empty()).collect(), target),
    };

    for segment in target.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }

    segments.join("/")
}
