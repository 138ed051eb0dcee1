//! Parsing options and configuration.

/// Default marker paragraph that ends the preamble.
pub const DEFAULT_KEYWORD_MARKER: &str = "Keywords";

/// Default phrase that ends content extraction ("Frequently Asked Questions").
pub const DEFAULT_TERMINATOR: &str = "Vanliga frågor och svar";

/// Preamble label whose following paragraph is the meta title.
pub const META_TITLE_LABEL: &str = "Title";

/// Preamble label whose following paragraph is the meta description.
pub const META_DESCRIPTION_LABEL: &str = "Meta Description";

/// Options for parsing Word documents.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Error handling mode
    pub error_mode: ErrorMode,

    /// How the preamble before the keyword marker is treated
    pub preamble: PreambleMode,

    /// Paragraph text (exact match) that ends the preamble
    pub keyword_marker: String,

    /// Phrase (substring match) that ends content extraction
    pub terminator: String,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable lenient mode (keep what was read before a malformed part).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Set preamble mode.
    pub fn with_preamble(mut self, mode: PreambleMode) -> Self {
        self.preamble = mode;
        self
    }

    /// Capture "Title" / "Meta Description" values from the preamble.
    pub fn capture_metadata(mut self) -> Self {
        self.preamble = PreambleMode::CaptureMetadata;
        self
    }

    /// Set the keyword marker.
    pub fn with_keyword_marker(mut self, marker: impl Into<String>) -> Self {
        self.keyword_marker = marker.into();
        self
    }

    /// Set the terminator phrase.
    pub fn with_terminator(mut self, phrase: impl Into<String>) -> Self {
        self.terminator = phrase.into();
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Strict,
            preamble: PreambleMode::SkipKeywordValue,
            keyword_marker: DEFAULT_KEYWORD_MARKER.to_string(),
            terminator: DEFAULT_TERMINATOR.to_string(),
        }
    }
}

/// Error handling mode while reading the package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail on malformed document XML
    #[default]
    Strict,
    /// Keep the paragraphs read before the malformed point
    Lenient,
}

/// Treatment of the metadata preamble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PreambleMode {
    /// Skip everything up to the keyword marker and the paragraph after it
    #[default]
    SkipKeywordValue,
    /// Like `SkipKeywordValue`, but capture "Title" and "Meta Description"
    /// label/value pairs seen before the marker
    CaptureMetadata,
}
