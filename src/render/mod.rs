//! Rendering module for converting parsed documents to output formats.

mod html;
mod json;
mod options;
mod slug;

pub use html::{to_html, HtmlRenderer};
pub use json::{to_json, JsonFormat};
pub use options::{HtmlMode, RenderOptions, DEFAULT_LANG};
pub use slug::{slugify, Slugger};
