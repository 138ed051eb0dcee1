//! Document-level types.

use super::{ListKind, NumberingTable, RawParagraph};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A Word package flattened to its body paragraphs.
///
/// This is everything the structure parser needs; it does not depend on
/// the package format any further.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceDocument {
    /// Package properties (title, author, dates)
    pub metadata: Metadata,

    /// Body paragraphs in document order
    pub paragraphs: Vec<RawParagraph>,

    /// List numbering definitions
    pub numbering: NumberingTable,
}

impl SourceDocument {
    /// Create a source document from paragraphs with no numbering definitions.
    pub fn from_paragraphs(paragraphs: Vec<RawParagraph>) -> Self {
        Self {
            paragraphs,
            ..Default::default()
        }
    }

    /// Attach numbering definitions.
    pub fn with_numbering(mut self, numbering: NumberingTable) -> Self {
        self.numbering = numbering;
        self
    }

    /// Number of body paragraphs, including empty ones.
    pub fn paragraph_count(&self) -> usize {
        self.paragraphs.len()
    }

    /// Get plain text of all paragraphs, one per line.
    pub fn plain_text(&self) -> String {
        self.paragraphs
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Package properties from `docProps/core.xml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Metadata {
    /// Document title
    pub title: Option<String>,

    /// Document author
    pub author: Option<String>,

    /// Last person to save the document
    pub last_modified_by: Option<String>,

    /// Creation date
    pub created: Option<DateTime<Utc>>,

    /// Last modification date
    pub modified: Option<DateTime<Utc>>,
}

/// Label/value pairs captured from the preamble.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreambleMeta {
    /// Value following the "Title" label
    pub title: Option<String>,

    /// Value following the "Meta Description" label
    pub description: Option<String>,
}

impl PreambleMeta {
    /// Check if nothing was captured.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none()
    }
}

/// One entry inside a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "text", rename_all = "snake_case")]
pub enum ContentItem {
    /// Third-level heading inside a section
    Subheading(String),
    /// Item of a numbered list
    NumberedItem(String),
    /// Item of a bulleted list
    BulletItem(String),
    /// Plain paragraph
    Paragraph(String),
}

impl ContentItem {
    /// Text payload of the item.
    pub fn text(&self) -> &str {
        match self {
            ContentItem::Subheading(t)
            | ContentItem::NumberedItem(t)
            | ContentItem::BulletItem(t)
            | ContentItem::Paragraph(t) => t,
        }
    }

    /// List kind this item must be rendered in, if any.
    pub fn list_kind(&self) -> Option<ListKind> {
        match self {
            ContentItem::NumberedItem(_) => Some(ListKind::Ordered),
            ContentItem::BulletItem(_) => Some(ListKind::Unordered),
            ContentItem::Subheading(_) | ContentItem::Paragraph(_) => None,
        }
    }
}

/// A titled block opened by a second-level heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Section heading text
    pub title: String,

    /// Content in document order
    pub items: Vec<ContentItem>,
}

impl Section {
    /// Open an empty section.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            items: Vec::new(),
        }
    }

    /// Append an item.
    pub fn push(&mut self, item: ContentItem) {
        self.items.push(item);
    }

    /// Check if the section has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }
}

/// The structured content rebuilt from one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedDocument {
    /// Values captured from the preamble (capturing variant only)
    pub meta: PreambleMeta,

    /// First top-level heading
    pub title: String,

    /// First paragraph after the title
    pub lead: String,

    /// Sections with at least one item, in document order
    pub sections: Vec<Section>,
}

impl ParsedDocument {
    /// Create an empty parsed document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if nothing at all was extracted.
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.lead.is_empty() && self.sections.is_empty()
    }

    /// Number of sections.
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Titles of all sections in order.
    pub fn section_titles(&self) -> Vec<&str> {
        self.sections.iter().map(|s| s.title.as_str()).collect()
    }

    /// Compute content statistics.
    pub fn stats(&self) -> DocumentStats {
        let mut stats = DocumentStats::new();
        stats.count_text(&self.title);
        stats.count_text(&self.lead);

        for section in &self.sections {
            stats.section_count += 1;
            stats.count_text(&section.title);
            for item in &section.items {
                match item {
                    ContentItem::Subheading(_) => stats.subheading_count += 1,
                    ContentItem::NumberedItem(_) => stats.numbered_item_count += 1,
                    ContentItem::BulletItem(_) => stats.bullet_item_count += 1,
                    ContentItem::Paragraph(_) => stats.paragraph_count += 1,
                }
                stats.count_text(item.text());
            }
        }

        stats
    }
}

/// Content statistics of a parsed document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentStats {
    /// Number of sections
    pub section_count: u32,

    /// Number of subheadings
    pub subheading_count: u32,

    /// Number of numbered list items
    pub numbered_item_count: u32,

    /// Number of bulleted list items
    pub bullet_item_count: u32,

    /// Number of plain paragraphs inside sections
    pub paragraph_count: u32,

    /// Approximate word count (whitespace-separated tokens)
    pub word_count: u32,
}

impl DocumentStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of list items.
    pub fn list_item_count(&self) -> u32 {
        self.numbered_item_count + self.bullet_item_count
    }

    /// Add word count from text.
    pub fn count_text(&mut self, text: &str) {
        self.word_count += text.split_whitespace().count() as u32;
    }

    /// Merge another stats instance into this one.
    pub fn merge(&mut self, other: &DocumentStats) {
        self.section_count += other.section_count;
        self.subheading_count += other.subheading_count;
        self.numbered_item_count += other.numbered_item_count;
        self.bullet_item_count += other.bullet_item_count;
        self.paragraph_count += other.paragraph_count;
        self.word_count += other.word_count;
    }
}
