//! Centralized default constants for the tagsum system.
//!
//! **This module is the single source of truth** for all shared default values.
//! All crates should reference these constants instead of defining their own
//! magic values.
//!
//! Organized by domain area. When adding new constants, place them in the
//! appropriate section and document the rationale for the chosen value.

// =============================================================================
// EMBED
// =============================================================================

/// Fence language that triggers a summary embed block.
pub const EMBED_TRIGGER: &str = "tagsummary";

/// Fixed label used for every generated header link.
pub const LINK_LABEL: &str = "Link";

// =============================================================================
// TAGS AND HEADERS
// =============================================================================

/// Marker character that starts a tag token in document text.
pub const TAG_MARKER: char = '#';

/// Marker character that starts a markdown heading line.
pub const HEADING_MARKER: char = '#';

// =============================================================================
// DOCUMENT STORE
// =============================================================================

/// Extension appended to a document reference to form its store path.
pub const DOCUMENT_EXTENSION: &str = ".md";

// =============================================================================
// EVENTS
// =============================================================================

/// Default document-change bus broadcast channel capacity.
pub const EVENT_BUS_CAPACITY: usize = 256;

/// Default summary-service observer channel capacity.
pub const SERVICE_EVENT_CAPACITY: usize = 64;

// =============================================================================
// HEADER RULE CONFIGURATION
// =============================================================================

/// Environment variable selecting the header matching rule.
pub const ENV_HEADER_RULE: &str = "TAGSUM_HEADER_RULE";

/// Environment variable overriding the service observer channel capacity.
pub const ENV_SERVICE_EVENT_CAPACITY: &str = "TAGSUM_SERVICE_EVENT_CAPACITY";

/// Header matching rule selection.
///
/// - `MarkdownHeading`: a header is a line of one or more `#` markers,
///   then whitespace, then visible text. This is the strict default and
///   keeps captured lines aligned with what markdown engines treat as
///   headings (and therefore as link anchors).
/// - `NextNonBlankLine`: a header is any line with visible content.
///   Looser capture for stores whose documents use underline-style or
///   no headings at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HeaderRule {
    #[default]
    MarkdownHeading,
    NextNonBlankLine,
}

impl HeaderRule {
    /// Parse rule from string (case-insensitive, accepts hyphens/underscores).
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "markdown_heading" | "heading" | "headings" | "strict" => Some(Self::MarkdownHeading),
            "next_non_blank" | "next_non_blank_line" | "any_line" | "loose" => {
                Some(Self::NextNonBlankLine)
            }
            _ => None,
        }
    }

    /// Load the rule from `TAGSUM_HEADER_RULE` with fallback to the default.
    pub fn from_env() -> Self {
        match std::env::var(ENV_HEADER_RULE) {
            Ok(val) => match Self::from_str_loose(&val) {
                Some(rule) => rule,
                None => {
                    tracing::warn!(value = %val, "Invalid TAGSUM_HEADER_RULE, using default");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }
}

impl std::fmt::Display for HeaderRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MarkdownHeading => write!(f, "markdown_heading"),
            Self::NextNonBlankLine => write!(f, "next_non_blank_line"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_rule_from_str_loose() {
        assert_eq!(
            HeaderRule::from_str_loose("markdown-heading"),
            Some(HeaderRule::MarkdownHeading)
        );
        assert_eq!(
            HeaderRule::from_str_loose("STRICT"),
            Some(HeaderRule::MarkdownHeading)
        );
        assert_eq!(
            HeaderRule::from_str_loose("next-non-blank"),
            Some(HeaderRule::NextNonBlankLine)
        );
        assert_eq!(
            HeaderRule::from_str_loose("loose"),
            Some(HeaderRule::NextNonBlankLine)
        );
        assert_eq!(HeaderRule::from_str_loose("bogus"), None);
    }

    #[test]
    fn test_header_rule_display_round_trip() {
        for rule in [HeaderRule::MarkdownHeading, HeaderRule::NextNonBlankLine] {
            assert_eq!(HeaderRule::from_str_loose(&rule.to_string()), Some(rule));
        }
    }

    #[test]
    fn test_header_rule_default_is_strict() {
        assert_eq!(HeaderRule::default(), HeaderRule::MarkdownHeading);
    }
}
