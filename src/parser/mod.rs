//! Word document parsing module.

mod classify;
mod docx;
mod options;
pub(crate) mod parts;
mod structure;

pub use classify::{classify, heading_tag, list_kind, Tag};
pub use docx::DocxParser;
pub use options::{
    ErrorMode, ParseOptions, PreambleMode, DEFAULT_KEYWORD_MARKER, DEFAULT_TERMINATOR,
    META_DESCRIPTION_LABEL, META_TITLE_LABEL,
};
pub use structure::parse_structure;
