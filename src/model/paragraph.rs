//! Paragraph-level types read from the source package.

use serde::{Deserialize, Serialize};

/// A body paragraph as read from the document, before any interpretation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawParagraph {
    /// Trimmed paragraph text
    pub text: String,

    /// Display name of the paragraph style (e.g., "Heading 2", "Normal")
    pub style_name: String,

    /// List numbering reference, if the paragraph carries one
    pub numbering: Option<NumberingRef>,
}

impl RawParagraph {
    /// Create a paragraph with the given text and style.
    ///
    /// The text is trimmed.
    pub fn new(text: impl Into<String>, style_name: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            text: text.trim().to_string(),
            style_name: style_name.into(),
            numbering: None,
        }
    }

    /// Create a paragraph in the default "Normal" style.
    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, "Normal")
    }

    /// Create a heading paragraph ("Heading N" style).
    pub fn heading(text: impl Into<String>, level: u8) -> Self {
        Self::new(text, format!("Heading {}", level))
    }

    /// Attach a numbering reference.
    pub fn with_numbering(mut self, num_id: impl Into<String>, level: u32) -> Self {
        self.numbering = Some(NumberingRef::new(num_id, level));
        self
    }

    /// Check if the paragraph has no text.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Check if this paragraph carries list numbering.
    pub fn is_list_item(&self) -> bool {
        self.numbering.is_some()
    }
}

/// Reference from a paragraph into the numbering definitions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NumberingRef {
    /// List instance id (`w:numId`)
    pub num_id: String,

    /// Indent level (`w:ilvl`), 0 = top level
    pub level: u32,
}

impl NumberingRef {
    /// Create a new numbering reference.
    pub fn new(num_id: impl Into<String>, level: u32) -> Self {
        Self {
            num_id: num_id.into(),
            level,
        }
    }
}
