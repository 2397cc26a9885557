//! Tag and header value types.
//!
//! A [`Tag`] is always stored in canonical form (marker-prefixed, lowercase)
//! so that requested tags and tokens scanned out of document text compare
//! with plain string equality. A [`HeaderText`] keeps the captured line raw
//! and derives its display form on demand, so the visible link text and the
//! link anchor can never drift apart.

use serde::Serialize;

use crate::defaults::{HEADING_MARKER, TAG_MARKER};
use crate::error::{Error, Result};

/// A tag in canonical form: `#` marker followed by a lowercase word.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Tag(String);

impl Tag {
    /// Build a tag from a configuration word.
    ///
    /// The word is trimmed, lowercased, and prefixed with the tag marker.
    /// A word that already carries a marker keeps it, so `"#x"` becomes
    /// `"##x"` and only matches a literal `##x` token in text.
    pub fn from_word(raw: &str) -> Result<Self> {
        let word = raw.trim();
        if word.is_empty() {
            return Err(Error::InvalidInput("empty tag word".to_string()));
        }
        Ok(Self(format!("{TAG_MARKER}{}", word.to_lowercase())))
    }

    /// Canonicalize a marker-prefixed token scanned out of document text.
    pub fn from_token(token: &str) -> Self {
        Self(token.to_lowercase())
    }

    /// Canonical string form, marker included.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One header line captured from a document, kept exactly as it appeared
/// (without the trailing newline).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct HeaderText(String);

impl HeaderText {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The captured line, markers and all.
    pub fn as_raw(&self) -> &str {
        &self.0
    }

    /// Header text with the leading marker run stripped and surrounding
    /// whitespace trimmed. Used for both link text and link anchor.
    pub fn display_text(&self) -> &str {
        self.0.trim_start_matches(HEADING_MARKER).trim()
    }
}

/// Insertion-ordered mapping from tag to the headers captured after its
/// occurrences.
///
/// Tags appear in first-occurrence order; headers within a tag appear in
/// occurrence order. Duplicate headers are kept. A tag that never matched
/// is an absent key, never an empty list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TagHeaderIndex {
    entries: Vec<(Tag, Vec<HeaderText>)>,
}

impl TagHeaderIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a header to a tag's list, creating the entry on first push.
    pub fn push(&mut self, tag: Tag, header: HeaderText) {
        if let Some((_, headers)) = self.entries.iter_mut().find(|(t, _)| *t == tag) {
            headers.push(header);
        } else {
            self.entries.push((tag, vec![header]));
        }
    }

    /// Headers captured for a tag, or `None` if the tag never matched.
    pub fn get(&self, tag: &Tag) -> Option<&[HeaderText]> {
        self.entries
            .iter()
            .find(|(t, _)| t == tag)
            .map(|(_, headers)| headers.as_slice())
    }

    pub fn contains(&self, tag: &Tag) -> bool {
        self.entries.iter().any(|(t, _)| t == tag)
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&Tag, &[HeaderText])> {
        self.entries.iter().map(|(t, h)| (t, h.as_slice()))
    }

    /// Number of tags with at least one captured header.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
