//! Embed block configuration parsing.
//!
//! The configuration string of a summary embed is one line of the form
//! `<document reference>:<tag1>, <tag2>, ...`. Parsing is strict about
//! shape (the colon and at least one tag are mandatory) and lenient about
//! whitespace.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::tags::Tag;

/// Parsed embed block configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbedConfig {
    /// Target document reference, without extension.
    pub reference: String,
    /// Requested tags in canonical form, in configuration order.
    pub tags: Vec<Tag>,
}

impl EmbedConfig {
    /// Parse a raw configuration string.
    ///
    /// The split happens on the first colon only, so a document reference
    /// must not contain a colon (anything after the first one is read as
    /// the tag list). Tag words are comma-separated; surrounding
    /// whitespace is trimmed and empty words are dropped.
    pub fn parse(source: &str) -> Result<Self> {
        let (reference, tag_list) = source.split_once(':').ok_or_else(|| {
            Error::Config("missing ':' between document reference and tag list".to_string())
        })?;

        let reference = reference.trim();
        if reference.is_empty() {
            return Err(Error::Config("document reference is empty".to_string()));
        }

        let tags = tag_list
            .split(',')
            .map(str::trim)
            .filter(|word| !word.is_empty())
            .map(Tag::from_word)
            .collect::<Result<Vec<_>>>()?;
        if tags.is_empty() {
            return Err(Error::Config("tag list is empty".to_string()));
        }

        Ok(Self {
            reference: reference.to_string(),
            tags,
        })
    }
}

/// Context captured when the host invokes an embed block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderContext {
    /// Identity of the document the embed block lives in, handed to the
    /// inline renderer so the host can resolve relative links.
    pub source_id: String,
}

impl RenderContext {
    pub fn new(source_id: impl Into<String>) -> Self {
        Self {
            source_id: source_id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_reference_and_tags() {
        let config = EmbedConfig::parse("notes:proj, ops").expect("valid config");
        assert_eq!(config.reference, "notes");
        let tags: Vec<&str> = config.tags.iter().map(Tag::as_str).collect();
        assert_eq!(tags, vec!["#proj", "#ops"]);
    }

    #[test]
    fn test_parse_trims_whitespace_and_lowercases() {
        let config = EmbedConfig::parse("  daily log  :  Proj ,OPS  ").expect("valid config");
        assert_eq!(config.reference, "daily log");
        let tags: Vec<&str> = config.tags.iter().map(Tag::as_str).collect();
        assert_eq!(tags, vec!["#proj", "#ops"]);
    }

    #[test]
    fn test_parse_splits_on_first_colon_only() {
        let config = EmbedConfig::parse("notes:time:10").expect("valid config");
        assert_eq!(config.reference, "notes");
        assert_eq!(config.tags[0].as_str(), "#time:10");
    }

    #[test]
    fn test_parse_tolerates_trailing_newline() {
        let config = EmbedConfig::parse("notes:proj\n").expect("valid config");
        assert_eq!(config.tags[0].as_str(), "#proj");
    }

    #[test]
    fn test_parse_drops_empty_words_keeps_duplicates() {
        let config = EmbedConfig::parse("notes:proj,,proj, ,").expect("valid config");
        let tags: Vec<&str> = config.tags.iter().map(Tag::as_str).collect();
        assert_eq!(tags, vec!["#proj", "#proj"]);
    }

    #[test]
    fn test_parse_missing_colon_is_config_error() {
        let err = EmbedConfig::parse("notes proj ops").expect_err("must fail");
        assert!(matches!(err, Error::Config(_)));
        assert_eq!(
            err.to_string(),
            "Invalid embed config: missing ':' between document reference and tag list"
        );
    }

    #[test]
    fn test_parse_empty_reference_is_config_error() {
        let err = EmbedConfig::parse("  :proj").expect_err("must fail");
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_parse_empty_tag_list_is_config_error() {
        for source in ["notes:", "notes: , ,"] {
            let err = EmbedConfig::parse(source).expect_err("must fail");
            assert!(matches!(err, Error::Config(_)));
        }
    }

    #[test]
    fn test_parse_empty_string_is_config_error() {
        assert!(EmbedConfig::parse("").is_err());
    }
}
