//! Tag-to-header extraction from markdown content.
//!
//! This module walks a document line by line and captures, for every
//! occurrence of a requested tag, the nearest header line below it. The
//! scan never backtracks: headers are located up front, then each tag
//! occurrence is resolved with a binary search over the header positions.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::defaults::{HeaderRule, HEADING_MARKER};
use crate::tags::{HeaderText, Tag, TagHeaderIndex};

/// Tag tokens are a `#` marker plus one or more non-whitespace characters,
/// preceded by start of line or whitespace.
static TAG_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|\s)(#\S+)").expect("tag token pattern is valid"));

/// Extract the headers following each occurrence of the requested tags.
///
/// Returns an insertion-ordered index: tags keyed in first-occurrence
/// order, headers listed in occurrence order within each tag.
///
/// # Rules
///
/// 1. A tag token is `#` plus non-whitespace characters, at line start or
///    after whitespace; punctuation sticks to the token (`#proj.` is not
///    `#proj`)
/// 2. Token matching is case-insensitive (both sides are canonicalized)
/// 3. The captured header is the nearest line below the occurrence that
///    satisfies the active [`HeaderRule`]; the search distance is unbounded
/// 4. An occurrence with no following header contributes nothing
/// 5. Scanning resumes after the tag occurrence, not after the captured
///    header, so one header may be attributed to several occurrences
/// 6. The same header captured for two occurrences of one tag yields two
///    entries
/// 7. A requested tag that never matches stays absent from the index
///
/// # Examples
///
/// ```
/// use tagsum_core::{extract_tag_headers, HeaderRule, Tag};
///
/// let content = "#proj kickoff notes\n## Milestone One\n";
/// let tags = vec![Tag::from_word("proj").unwrap()];
/// let index = extract_tag_headers(content, &tags, HeaderRule::MarkdownHeading);
/// assert_eq!(index.get(&tags[0]).unwrap()[0].as_raw(), "## Milestone One");
/// ```
pub fn extract_tag_headers(content: &str, tags: &[Tag], rule: HeaderRule) -> TagHeaderIndex {
    let mut index = TagHeaderIndex::new();
    if tags.is_empty() || content.is_empty() {
        return index;
    }

    let requested: HashSet<&Tag> = tags.iter().collect();
    let lines: Vec<&str> = content.lines().collect();
    let header_lines = header_line_indices(&lines, rule);

    for (line_no, line) in lines.iter().enumerate() {
        for cap in TAG_TOKEN.captures_iter(line) {
            let token = match cap.get(1) {
                Some(m) => m.as_str(),
                None => continue,
            };
            let tag = Tag::from_token(token);
            if !requested.contains(&tag) {
                continue;
            }

            // Nearest header strictly below the occurrence's line.
            let next = header_lines.partition_point(|&h| h <= line_no);
            if let Some(&header_line) = header_lines.get(next) {
                index.push(tag, HeaderText::new(lines[header_line]));
            }
        }
    }

    index
}

/// Indices of all lines that count as headers under the given rule.
fn header_line_indices(lines: &[&str], rule: HeaderRule) -> Vec<usize> {
    lines
        .iter()
        .enumerate()
        .filter(|(_, line)| match rule {
            HeaderRule::MarkdownHeading => is_markdown_heading(line),
            HeaderRule::NextNonBlankLine => !line.trim().is_empty(),
        })
        .map(|(i, _)| i)
        .collect()
}

/// A markdown heading is a line-anchored marker run, then at least one
/// whitespace character, then visible text.
fn is_markdown_heading(line: &str) -> bool {
    let after_markers = line.trim_start_matches(HEADING_MARKER);
    if after_markers.len() == line.len() {
        return false;
    }
    match after_markers.chars().next() {
        Some(c) if c.is_whitespace() => !after_markers.trim().is_empty(),
        _ => false,
    }
}
