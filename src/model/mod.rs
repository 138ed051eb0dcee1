//! Document model types for Word content representation.
//!
//! Two layers live here: the flat paragraph sequence read from a package
//! (`SourceDocument`, `RawParagraph`, `NumberingTable`) and the structured
//! tree rebuilt from it (`ParsedDocument`, `Section`, `ContentItem`). The
//! structured tree is format-agnostic and is what every renderer consumes.

mod document;
mod numbering;
mod paragraph;

pub use document::{
    ContentItem, DocumentStats, Metadata, ParsedDocument, PreambleMeta, Section, SourceDocument,
};
pub use numbering::{ListKind, NumberingTable, BULLET_FORMAT};
pub use paragraph::{NumberingRef, RawParagraph};
