//! List numbering definitions.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::NumberingRef;

/// Format reported for any reference that cannot be resolved.
pub const BULLET_FORMAT: &str = "bullet";

/// Level formats rendered as ordered lists.
const ORDERED_FORMATS: &[&str] = &[
    "decimal",
    "lowerLetter",
    "upperLetter",
    "lowerRoman",
    "upperRoman",
];

/// Kind of list a numbered paragraph belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    /// Numbered list (`<ol>`)
    Ordered,
    /// Bulleted list (`<ul>`)
    Unordered,
}

impl ListKind {
    /// Map a level format string to a list kind.
    ///
    /// Only the five counting formats are ordered; everything else, including
    /// unknown formats, is a bullet list.
    pub fn from_format(format: &str) -> Self {
        if ORDERED_FORMATS.contains(&format) {
            ListKind::Ordered
        } else {
            ListKind::Unordered
        }
    }

    /// HTML tag name for this list kind.
    pub fn tag(&self) -> &'static str {
        match self {
            ListKind::Ordered => "ol",
            ListKind::Unordered => "ul",
        }
    }
}

/// Numbering definitions of a document.
///
/// Mirrors the two-step indirection of WordprocessingML: a list instance
/// (`w:num`) points at an abstract definition (`w:abstractNum`), which holds
/// one format per indent level.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NumberingTable {
    /// List instance id → abstract definition id
    instances: HashMap<String, String>,

    /// Abstract definition id → (level → format)
    abstracts: HashMap<String, HashMap<u32, String>>,
}

impl NumberingTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a list instance pointing at an abstract definition.
    ///
    /// The first registration of an id wins.
    pub fn add_instance(&mut self, num_id: impl Into<String>, abstract_id: impl Into<String>) {
        self.instances
            .entry(num_id.into())
            .or_insert_with(|| abstract_id.into());
    }

    /// Register the format of one level of an abstract definition.
    ///
    /// The first registration of a level wins.
    pub fn add_level(&mut self, abstract_id: impl Into<String>, level: u32, format: impl Into<String>) {
        self.abstracts
            .entry(abstract_id.into())
            .or_default()
            .entry(level)
            .or_insert_with(|| format.into());
    }

    /// Convenience: register a list instance with its own abstract definition
    /// holding a single format for every given level.
    pub fn with_list(mut self, num_id: &str, format: &str, levels: u32) -> Self {
        let abstract_id = format!("abstract-{}", num_id);
        for level in 0..levels.max(1) {
            self.add_level(abstract_id.clone(), level, format);
        }
        self.add_instance(num_id, abstract_id);
        self
    }

    /// Resolve the level format for a numbering reference.
    ///
    /// Returns `None` when any step of the chain is missing.
    pub fn lookup(&self, numbering: &NumberingRef) -> Option<&str> {
        let abstract_id = self.instances.get(&numbering.num_id)?;
        let levels = self.abstracts.get(abstract_id)?;
        levels.get(&numbering.level).map(|s| s.as_str())
    }

    /// Resolve the level format, falling back to [`BULLET_FORMAT`].
    pub fn format_of(&self, numbering: &NumberingRef) -> &str {
        self.lookup(numbering).unwrap_or(BULLET_FORMAT)
    }

    /// Resolve the list kind for a numbering reference. Never fails.
    pub fn list_kind(&self, numbering: &NumberingRef) -> ListKind {
        ListKind::from_format(self.format_of(numbering))
    }

    /// Check if the table has no definitions.
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty() && self.abstracts.is_empty()
    }

    /// Number of list instances.
    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }
}
