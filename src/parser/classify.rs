//! Paragraph style classification.

use crate::model::{ListKind, NumberingRef, NumberingTable};

/// Semantic tag of a paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    /// Top-level heading (document title)
    Heading1,
    /// Section heading
    Heading2,
    /// Subheading inside a section
    Heading3,
    /// Item of a numbered list
    NumberedItem,
    /// Item of a bulleted list
    BulletedItem,
    /// Anything else
    Paragraph,
}

/// Classify a paragraph by style name and numbering.
///
/// Heading styles are matched by substring, so "Heading 2 Char" or a
/// localized "Custom Heading 2" also count. Numbering lookups never fail:
/// anything that cannot be resolved is a bulleted item.
pub fn classify(style_name: &str, numbering: Option<&NumberingRef>, table: &NumberingTable) -> Tag {
    if let Some(tag) = heading_tag(style_name) {
        return tag;
    }

    match list_kind(numbering, table) {
        Some(ListKind::Ordered) => Tag::NumberedItem,
        Some(ListKind::Unordered) => Tag::BulletedItem,
        None => Tag::Paragraph,
    }
}

/// Heading tag for a style name, if it is one of the three heading styles.
pub fn heading_tag(style_name: &str) -> Option<Tag> {
    if style_name.contains("Heading 1") {
        Some(Tag::Heading1)
    } else if style_name.contains("Heading 2") {
        Some(Tag::Heading2)
    } else if style_name.contains("Heading 3") {
        Some(Tag::Heading3)
    } else {
        None
    }
}

/// List kind of a paragraph from its numbering alone.
pub fn list_kind(numbering: Option<&NumberingRef>, table: &NumberingTable) -> Option<ListKind> {
    numbering.map(|n| table.list_kind(n))
}
