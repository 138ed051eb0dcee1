//! HTML rendering for parsed documents.

use std::borrow::Cow;

use crate::error::Result;
use crate::model::{ContentItem, ListKind, ParsedDocument, Section};

use super::{HtmlMode, RenderOptions, Slugger};

/// Inline style of the standalone page.
const PAGE_STYLE: &str = "    body { font-family: system-ui, -apple-system, Segoe UI, Roboto, Helvetica, Arial, sans-serif; line-height: 1.6; color: #111; margin: 0; }
    main { max-width: 72ch; margin: 0 auto; padding: 24px; }
    h1, h2, h3 { line-height: 1.25; }
    ul, ol { padding-left: 1.2rem; }
    .lead { font-size: 1.125rem; }";

/// Convert a parsed document to HTML.
pub fn to_html(doc: &ParsedDocument, options: &RenderOptions) -> Result<String> {
    let renderer = HtmlRenderer::new(options.clone());
    renderer.render(doc)
}

/// HTML renderer.
pub struct HtmlRenderer {
    options: RenderOptions,
    slugger: Slugger,
}

/// Indentation and heading levels of one output shape.
struct Layout {
    title_level: u8,
    section_level: u8,
    subheading_level: u8,
    section_indent: &'static str,
    item_indent: &'static str,
    list_item_indent: &'static str,
}

impl Layout {
    fn for_mode(mode: HtmlMode) -> Self {
        let (title_level, section_level, subheading_level) = mode.heading_levels();
        match mode {
            HtmlMode::Fragment => Self {
                title_level,
                section_level,
                subheading_level,
                section_indent: "",
                item_indent: "",
                list_item_indent: "",
            },
            HtmlMode::FullPage => Self {
                title_level,
                section_level,
                subheading_level,
                section_indent: "      ",
                item_indent: "        ",
                list_item_indent: "          ",
            },
        }
    }
}

impl HtmlRenderer {
    /// Create a new HTML renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            slugger: Slugger::new(),
        }
    }

    /// Render a document to HTML.
    pub fn render(&self, doc: &ParsedDocument) -> Result<String> {
        let layout = Layout::for_mode(self.options.mode);
        let sections: String = doc
            .sections
            .iter()
            .map(|section| self.render_section(section, &layout))
            .collect();

        let html = match self.options.mode {
            HtmlMode::Fragment => format!(
                "<h{lvl}>{title}</h{lvl}>\n<p class=\"lead\">{lead}</p>\n{sections}",
                lvl = layout.title_level,
                title = self.text(&doc.title),
                lead = self.text(&doc.lead),
                sections = sections,
            ),
            HtmlMode::FullPage => self.render_page(doc, &layout, &sections),
        };

        Ok(html)
    }

    fn render_page(&self, doc: &ParsedDocument, layout: &Layout, sections: &str) -> String {
        let title = self.text(&doc.title);
        format!(
            r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <title>{title}</title>

  <style>
{style}
  </style>
</head>
<body>
  <main>
    <header>
      <h{lvl}>{title}</h{lvl}>
      <p class="lead">
        {lead}
      </p>
    </header>

    <article>
{sections}
    </article>
  </main>
</body>
</html>"#,
            lang = self.options.lang,
            title = title,
            style = PAGE_STYLE,
            lvl = layout.title_level,
            lead = self.text(&doc.lead),
            sections = sections,
        )
    }

    fn render_section(&self, section: &Section, layout: &Layout) -> String {
        let id = self.slugger.slugify(&section.title);
        let content = self.render_items(&section.items, layout).join("\n");

        format!(
            "{indent}<section id=\"{id}\">\n{inner}<h{lvl}>{title}</h{lvl}>\n{content}\n{indent}</section>\n",
            indent = layout.section_indent,
            inner = layout.item_indent,
            id = id,
            lvl = layout.section_level,
            title = self.text(&section.title),
            content = content,
        )
    }

    /// Render section items, grouping consecutive list items of the same
    /// kind into one list. Lists never nest.
    fn render_items(&self, items: &[ContentItem], layout: &Layout) -> Vec<String> {
        let mut lines = Vec::with_capacity(items.len() + 2);
        let mut open: Option<ListKind> = None;

        for item in items {
            let wanted = item.list_kind();
            if let Some(kind) = open.filter(|kind| Some(*kind) != wanted) {
                lines.push(format!("{}</{}>", layout.item_indent, kind.tag()));
                open = None;
            }

            match item {
                ContentItem::Subheading(text) => lines.push(format!(
                    "{indent}<h{lvl}>{text}</h{lvl}>",
                    indent = layout.item_indent,
                    lvl = layout.subheading_level,
                    text = self.text(text),
                )),
                ContentItem::NumberedItem(text) | ContentItem::BulletItem(text) => {
                    if open.is_none() {
                        if let Some(kind) = wanted {
                            lines.push(format!("{}<{}>", layout.item_indent, kind.tag()));
                            open = Some(kind);
                        }
                    }
                    lines.push(format!(
                        "{}<li>{}</li>",
                        layout.list_item_indent,
                        self.text(text)
                    ));
                }
                ContentItem::Paragraph(text) => lines.push(format!(
                    "{}<p>{}</p>",
                    layout.item_indent,
                    self.text(text)
                )),
            }
        }

        if let Some(kind) = open {
            lines.push(format!("{}</{}>", layout.item_indent, kind.tag()));
        }

        lines
    }

    fn text<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if self.options.escape_text {
            html_escape::encode_text(text)
        } else {
            Cow::Borrowed(text)
        }
    }
}
