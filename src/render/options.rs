//! Rendering options and configuration.

/// Default page language of full-page output.
pub const DEFAULT_LANG: &str = "sv";

/// Options for rendering a parsed document.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Fragment or standalone page
    pub mode: HtmlMode,

    /// `lang` attribute of the page shell
    pub lang: String,

    /// HTML-escape text payloads
    pub escape_text: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the HTML mode.
    pub fn with_mode(mut self, mode: HtmlMode) -> Self {
        self.mode = mode;
        self
    }

    /// Render a standalone page.
    pub fn full_page(mut self) -> Self {
        self.mode = HtmlMode::FullPage;
        self
    }

    /// Set the page language.
    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }

    /// Enable or disable escaping of text payloads.
    ///
    /// Off by default: text is emitted as it appears in the document, so
    /// callers rendering untrusted input must turn this on or escape upstream.
    pub fn with_escaping(mut self, escape: bool) -> Self {
        self.escape_text = escape;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            mode: HtmlMode::Fragment,
            lang: DEFAULT_LANG.to_string(),
            escape_text: false,
        }
    }
}

/// HTML output shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HtmlMode {
    /// Semantic body only, for pasting into a CMS field
    #[default]
    Fragment,
    /// Complete page with head, inline style and body
    FullPage,
}

impl HtmlMode {
    /// Heading levels used for title, section titles and subheadings.
    ///
    /// Fragments are embedded below the host page's own `<h1>`.
    pub fn heading_levels(&self) -> (u8, u8, u8) {
        match self {
            HtmlMode::Fragment => (2, 3, 4),
            HtmlMode::FullPage => (1, 2, 3),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_options_builder() {
        let options = RenderOptions::new()
            .full_page()
            .with_lang("en")
            .with_escaping(true);

        assert_eq!(options.mode, HtmlMode::FullPage);
        assert_eq!(options.lang, "en");
        assert!(options.escape_text);
    }

    #[test]
    fn test_defaults() {
        let options = RenderOptions::default();
        assert_eq!(options.mode, HtmlMode::Fragment);
        assert_eq!(options.lang, "sv");
        assert!(!options.escape_text);
    }

    #[test]
    fn test_heading_levels() {
        assert_eq!(HtmlMode::Fragment.heading_levels(), (2, 3, 4));
        assert_eq!(HtmlMode::FullPage.heading_levels(), (1, 2, 3));
    }
}
