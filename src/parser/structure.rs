//! Rebuilds title, lead and sections from a flat paragraph sequence.
//!
//! The document convention is positional: a preamble closed by a keyword
//! marker, one top-level heading, one lead paragraph, then sections opened
//! by second-level headings, up to a terminator phrase. The parser walks the
//! paragraphs once with an explicit state that only ever moves forward.

use crate::model::{
    ContentItem, ListKind, NumberingTable, ParsedDocument, PreambleMeta, RawParagraph, Section,
};

use super::classify::{classify, list_kind, Tag};
use super::options::{ParseOptions, PreambleMode, META_DESCRIPTION_LABEL, META_TITLE_LABEL};

/// Parse a paragraph sequence into a structured document.
///
/// Never fails: a document that does not follow the convention simply yields
/// a sparse result (no title, no lead, or no sections).
pub fn parse_structure(
    paragraphs: &[RawParagraph],
    numbering: &NumberingTable,
    options: &ParseOptions,
) -> ParsedDocument {
    let mut parser = StructureParser::new(numbering, options);
    for paragraph in paragraphs {
        if !parser.feed(paragraph) {
            break;
        }
    }
    parser.finish()
}

/// Position in the document convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Before the keyword marker
    Preamble,
    /// The next paragraph is the value of a preamble label
    MetaValue(MetaField),
    /// The next paragraph is the keyword value, which is discarded
    KeywordValue,
    /// Title, lead and sections
    Body,
    /// Terminator seen
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MetaField {
    Title,
    Description,
}

/// Single-pass state machine over paragraphs.
struct StructureParser<'a> {
    numbering: &'a NumberingTable,
    options: &'a ParseOptions,
    state: State,
    meta: PreambleMeta,
    title: Option<String>,
    lead: Option<String>,
    sections: Vec<Section>,
    current: Option<Section>,
}

impl<'a> StructureParser<'a> {
    fn new(numbering: &'a NumberingTable, options: &'a ParseOptions) -> Self {
        Self {
            numbering,
            options,
            state: State::Preamble,
            meta: PreambleMeta::default(),
            title: None,
            lead: None,
            sections: Vec::new(),
            current: None,
        }
    }

    /// Consume one paragraph. Returns `false` once no further paragraphs
    /// should be fed.
    fn feed(&mut self, paragraph: &RawParagraph) -> bool {
        // Labels in the capturing preamble take the next physical paragraph
        if paragraph.is_empty() && !self.takes_empty_value() {
            return self.state != State::Done;
        }

        let state = self.state;
        self.state = match state {
            State::Preamble => self.preamble(paragraph),
            State::MetaValue(field) => {
                let value = Some(paragraph.text.clone());
                match field {
                    MetaField::Title => self.meta.title = value,
                    MetaField::Description => self.meta.description = value,
                }
                State::Preamble
            }
            State::KeywordValue => {
                log::debug!("Preamble ended, skipped keyword value {:?}", paragraph.text);
                State::Body
            }
            State::Body => self.body(paragraph),
            State::Done => State::Done,
        };

        self.state != State::Done
    }

    fn takes_empty_value(&self) -> bool {
        self.options.preamble == PreambleMode::CaptureMetadata
            && matches!(self.state, State::MetaValue(_) | State::KeywordValue)
    }

    fn preamble(&mut self, paragraph: &RawParagraph) -> State {
        let text = paragraph.text.as_str();

        if !self.options.keyword_marker.is_empty() && text == self.options.keyword_marker {
            return State::KeywordValue;
        }

        if self.options.preamble == PreambleMode::CaptureMetadata {
            if text == META_TITLE_LABEL {
                return State::MetaValue(MetaField::Title);
            }
            if text == META_DESCRIPTION_LABEL {
                return State::MetaValue(MetaField::Description);
            }
        }

        State::Preamble
    }

    fn body(&mut self, paragraph: &RawParagraph) -> State {
        let text = &paragraph.text;

        if !self.options.terminator.is_empty() && text.contains(&self.options.terminator) {
            log::debug!("Terminator phrase reached, stopping");
            return State::Done;
        }

        let tag = classify(
            &paragraph.style_name,
            paragraph.numbering.as_ref(),
            self.numbering,
        );

        if tag == Tag::Heading1 && self.title.is_none() {
            self.title = Some(text.clone());
            return State::Body;
        }

        if tag == Tag::Heading2 {
            self.close_section();
            self.current = Some(Section::new(text.clone()));
            return State::Body;
        }

        if self.title.is_some() && self.lead.is_none() && self.current.is_none() {
            self.lead = Some(text.clone());
            return State::Body;
        }

        let numbering = self.numbering;
        match self.current.as_mut() {
            Some(section) if tag == Tag::Heading3 => {
                section.push(ContentItem::Subheading(text.clone()));
            }
            Some(section) => {
                let item = match list_kind(paragraph.numbering.as_ref(), numbering) {
                    Some(ListKind::Ordered) => ContentItem::NumberedItem(text.clone()),
                    Some(ListKind::Unordered) => ContentItem::BulletItem(text.clone()),
                    None => ContentItem::Paragraph(text.clone()),
                };
                section.push(item);
            }
            None => log::debug!("Dropping paragraph outside any section: {:?}", text),
        }

        State::Body
    }

    /// Move the open section to the output if it has content.
    fn close_section(&mut self) {
        if let Some(section) = self.current.take() {
            if section.is_empty() {
                log::debug!("Dropping empty section {:?}", section.title);
            } else {
                self.sections.push(section);
            }
        }
    }

    fn finish(mut self) -> ParsedDocument {
        if matches!(self.state, State::Preamble | State::MetaValue(_)) {
            log::warn!(
                "Keyword marker {:?} not found; no content extracted",
                self.options.keyword_marker
            );
        }

        self.close_section();

        ParsedDocument {
            meta: self.meta,
            title: self.title.unwrap_or_default(),
            lead: self.lead.unwrap_or_default(),
            sections: self.sections,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bullets() -> NumberingTable {
        NumberingTable::new()
            .with_list("1", "bullet", 1)
            .with_list("2", "decimal", 1)
    }

    fn bullet(text: &str) -> RawParagraph {
        RawParagraph::plain(text).with_numbering("1", 0)
    }

    fn numbered(text: &str) -> RawParagraph {
        RawParagraph::plain(text).with_numbering("2", 0)
    }

    fn parse(paragraphs: &[RawParagraph]) -> ParsedDocument {
        parse_structure(paragraphs, &bullets(), &ParseOptions::default())
    }

    fn preamble() -> Vec<RawParagraph> {
        vec![
            RawParagraph::plain("Title"),
            RawParagraph::plain("SEO title"),
            RawParagraph::plain("Meta Description"),
            RawParagraph::plain("SEO description"),
            RawParagraph::plain("Keywords"),
            RawParagraph::plain("ignored"),
        ]
    }

    #[test]
    fn test_reference_scenario() {
        let paragraphs = vec![
            RawParagraph::plain("Keywords"),
            RawParagraph::plain("ignored"),
            RawParagraph::heading("Main Title", 1),
            RawParagraph::plain("Intro text."),
            RawParagraph::heading("First Section", 2),
            bullet("Point one"),
            bullet("Point two"),
            RawParagraph::heading("Vanliga frågor och svar", 1),
            RawParagraph::heading("After", 2),
            RawParagraph::plain("Never seen"),
        ];

        let doc = parse(&paragraphs);
        assert_eq!(doc.title, "Main Title");
        assert_eq!(doc.lead, "Intro text.");
        assert_eq!(doc.sections.len(), 1);
        assert_eq!(doc.sections[0].title, "First Section");
        assert_eq!(
            doc.sections[0].items,
            vec![
                ContentItem::BulletItem("Point one".into()),
                ContentItem::BulletItem("Point two".into()),
            ]
        );
    }

    #[test]
    fn test_preamble_skips_until_keyword_value() {
        let mut paragraphs = preamble();
        paragraphs.push(RawParagraph::heading("Main Title", 1));

        let doc = parse(&paragraphs);
        assert_eq!(doc.title, "Main Title");
        // Default mode does not capture preamble values
        assert!(doc.meta.is_empty());
    }

    #[test]
    fn test_preamble_capture_metadata() {
        let mut paragraphs = preamble();
        paragraphs.push(RawParagraph::heading("Main Title", 1));

        let options = ParseOptions::new().capture_metadata();
        let doc = parse_structure(&paragraphs, &bullets(), &options);
        assert_eq!(doc.meta.title.as_deref(), Some("SEO title"));
        assert_eq!(doc.meta.description.as_deref(), Some("SEO description"));
        assert_eq!(doc.title, "Main Title");
    }

    #[test]
    fn test_capture_metadata_empty_label_value() {
        let paragraphs = vec![
            RawParagraph::plain("Title"),
            RawParagraph::plain(""),
            RawParagraph::plain("Meta Description"),
            RawParagraph::plain("SEO description"),
            RawParagraph::plain("Keywords"),
            RawParagraph::plain("kw"),
            RawParagraph::heading("Main Title", 1),
        ];

        let options = ParseOptions::new().capture_metadata();
        let doc = parse_structure(&paragraphs, &bullets(), &options);
        assert_eq!(doc.meta.title.as_deref(), Some(""));
        assert_eq!(doc.meta.description.as_deref(), Some("SEO description"));
        assert_eq!(doc.title, "Main Title");
    }

    #[test]
    fn test_empty_keyword_value_by_mode() {
        let paragraphs = vec![
            RawParagraph::plain("Keywords"),
            RawParagraph::plain(""),
            RawParagraph::heading("Main Title", 1),
            RawParagraph::plain("Lead"),
        ];

        let options = ParseOptions::new().capture_metadata();
        let doc = parse_structure(&paragraphs, &bullets(), &options);
        assert_eq!(doc.title, "Main Title");
        assert_eq!(doc.lead, "Lead");

        // Default mode skips the empty paragraph, so the heading is the value
        let doc = parse(&paragraphs);
        assert_eq!(doc.title, "");
        assert_eq!(doc.lead, "");
    }

    #[test]
    fn test_keyword_value_is_skipped_even_if_heading() {
        let paragraphs = vec![
            RawParagraph::plain("Keywords"),
            RawParagraph::heading("Looks like a title", 1),
            RawParagraph::heading("Real Title", 1),
        ];
        assert_eq!(parse(&paragraphs).title, "Real Title");
    }

    #[test]
    fn test_empty_paragraphs_skipped_everywhere() {
        let paragraphs = vec![
            RawParagraph::plain(""),
            RawParagraph::plain("Keywords"),
            RawParagraph::plain("   "),
            RawParagraph::plain("ignored"),
            RawParagraph::plain(""),
            RawParagraph::heading("Main Title", 1),
            RawParagraph::plain(""),
            RawParagraph::plain("Lead"),
            RawParagraph::heading("S", 2),
            RawParagraph::plain(""),
            RawParagraph::plain("Body"),
        ];

        let doc = parse(&paragraphs);
        assert_eq!(doc.title, "Main Title");
        assert_eq!(doc.lead, "Lead");
        assert_eq!(doc.sections[0].items, vec![ContentItem::Paragraph("Body".into())]);
    }

    #[test]
    fn test_missing_keyword_yields_empty_document() {
        let paragraphs = vec![
            RawParagraph::heading("Main Title", 1),
            RawParagraph::plain("Lead"),
            RawParagraph::heading("S", 2),
            RawParagraph::plain("Body"),
        ];
        assert!(parse(&paragraphs).is_empty());
    }

    #[test]
    fn test_empty_section_dropped() {
        let paragraphs = vec![
            RawParagraph::plain("Keywords"),
            RawParagraph::plain("x"),
            RawParagraph::heading("Main Title", 1),
            RawParagraph::plain("Lead"),
            RawParagraph::heading("Empty", 2),
            RawParagraph::heading("Filled", 2),
            RawParagraph::plain("Content"),
            RawParagraph::heading("Trailing empty", 2),
        ];

        let doc = parse(&paragraphs);
        assert_eq!(doc.section_titles(), vec!["Filled"]);
        assert!(doc.sections.iter().all(|s| !s.is_empty()));
    }

    #[test]
    fn test_zero_sections() {
        let paragraphs = vec![
            RawParagraph::plain("Keywords"),
            RawParagraph::plain("x"),
            RawParagraph::heading("Main Title", 1),
            RawParagraph::plain("Lead"),
            RawParagraph::plain("Dropped, no section open"),
        ];

        let doc = parse(&paragraphs);
        assert_eq!(doc.lead, "Lead");
        assert!(doc.sections.is_empty());
    }

    #[test]
    fn test_section_before_lead_blocks_lead() {
        let paragraphs = vec![
            RawParagraph::plain("Keywords"),
            RawParagraph::plain("x"),
            RawParagraph::heading("Main Title", 1),
            RawParagraph::heading("S", 2),
            RawParagraph::plain("Body"),
        ];

        let doc = parse(&paragraphs);
        assert_eq!(doc.lead, "");
        assert_eq!(doc.sections[0].items, vec![ContentItem::Paragraph("Body".into())]);
    }

    #[test]
    fn test_no_title_means_no_lead() {
        let paragraphs = vec![
            RawParagraph::plain("Keywords"),
            RawParagraph::plain("x"),
            RawParagraph::plain("Orphan"),
            RawParagraph::heading("S", 2),
            RawParagraph::plain("Body"),
        ];

        let doc = parse(&paragraphs);
        assert_eq!(doc.title, "");
        assert_eq!(doc.lead, "");
        assert_eq!(doc.sections.len(), 1);
    }

    #[test]
    fn test_item_kinds() {
        let paragraphs = vec![
            RawParagraph::plain("Keywords"),
            RawParagraph::plain("x"),
            RawParagraph::heading("Main Title", 1),
            RawParagraph::plain("Lead"),
            RawParagraph::heading("S", 2),
            RawParagraph::heading("Sub", 3),
            numbered("Step"),
            bullet("Point"),
            RawParagraph::plain("Para").with_numbering("99", 0),
            RawParagraph::plain("Plain"),
        ];

        let doc = parse(&paragraphs);
        assert_eq!(
            doc.sections[0].items,
            vec![
                ContentItem::Subheading("Sub".into()),
                ContentItem::NumberedItem("Step".into()),
                ContentItem::BulletItem("Point".into()),
                ContentItem::BulletItem("Para".into()),
                ContentItem::Paragraph("Plain".into()),
            ]
        );
    }

    #[test]
    fn test_heading3_can_become_lead() {
        let paragraphs = vec![
            RawParagraph::plain("Keywords"),
            RawParagraph::plain("x"),
            RawParagraph::heading("Main Title", 1),
            RawParagraph::heading("Sub before sections", 3),
        ];
        assert_eq!(parse(&paragraphs).lead, "Sub before sections");
    }

    #[test]
    fn test_later_heading1_folded_into_section() {
        let paragraphs = vec![
            RawParagraph::plain("Keywords"),
            RawParagraph::plain("x"),
            RawParagraph::heading("Main Title", 1),
            RawParagraph::plain("Lead"),
            RawParagraph::heading("Second H1 dropped", 1),
            RawParagraph::heading("S", 2),
            RawParagraph::heading("Second H1 kept", 1),
            RawParagraph::heading("Numbered H1", 1).with_numbering("2", 0),
        ];

        let doc = parse(&paragraphs);
        assert_eq!(doc.title, "Main Title");
        assert_eq!(
            doc.sections[0].items,
            vec![
                ContentItem::Paragraph("Second H1 kept".into()),
                ContentItem::NumberedItem("Numbered H1".into()),
            ]
        );
    }

    #[test]
    fn test_terminator_is_substring_match() {
        let paragraphs = vec![
            RawParagraph::plain("Keywords"),
            RawParagraph::plain("x"),
            RawParagraph::heading("Main Title", 1),
            RawParagraph::plain("Lead"),
            RawParagraph::heading("S", 2),
            RawParagraph::plain("Body"),
            RawParagraph::plain("Läs mer: Vanliga frågor och svar om tjänsten"),
            RawParagraph::plain("After"),
        ];

        let doc = parse(&paragraphs);
        assert_eq!(doc.sections[0].items.len(), 1);
    }

    #[test]
    fn test_custom_markers() {
        let paragraphs = vec![
            RawParagraph::plain("Nyckelord"),
            RawParagraph::plain("x"),
            RawParagraph::heading("Titel", 1),
            RawParagraph::plain("Lead"),
            RawParagraph::heading("S", 2),
            RawParagraph::plain("Body"),
            RawParagraph::heading("FAQ", 2),
            RawParagraph::plain("Q"),
        ];

        let options = ParseOptions::new()
            .with_keyword_marker("Nyckelord")
            .with_terminator("FAQ");
        let doc = parse_structure(&paragraphs, &bullets(), &options);
        assert_eq!(doc.title, "Titel");
        assert_eq!(doc.section_titles(), vec!["S"]);
    }
}
