//! URL-safe identifiers for section titles.

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Turns titles into ASCII identifiers.
///
/// Accents are decomposed and dropped, so titles differing only in accents
/// or punctuation map to the same identifier.
#[derive(Debug, Clone)]
pub struct Slugger {
    disallowed: Regex,
    separators: Regex,
}

impl Slugger {
    /// Create a new slugger.
    pub fn new() -> Self {
        Self {
            disallowed: Regex::new(r"[^\w\s-]").unwrap(),
            separators: Regex::new(r"[-\s]+").unwrap(),
        }
    }

    /// Build the identifier for a title.
    pub fn slugify(&self, text: &str) -> String {
        let ascii: String = text.nfkd().filter(char::is_ascii).collect();
        let lowered = ascii.to_lowercase();
        let cleaned = self.disallowed.replace_all(&lowered, "");
        let joined = self.separators.replace_all(&cleaned, "-");
        joined.trim_matches('-').to_string()
    }
}

impl Default for Slugger {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the identifier for a title with a one-off [`Slugger`].
pub fn slugify(text: &str) -> String {
    Slugger::new().slugify(text)
}
