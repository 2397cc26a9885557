//! Summary rendering: turning an extraction index into ordered block
//! instructions for an output surface.
//!
//! Rendering is pure. The instruction list is fully determined by the
//! document display name and the index, so re-rendering unchanged inputs
//! produces byte-identical output.

use serde::Serialize;

use crate::defaults::LINK_LABEL;
use crate::tags::TagHeaderIndex;

/// A single block-level instruction for an output surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RenderInstruction {
    /// Heading introducing one tag's group: `"<tag> (<count>)"`.
    GroupHeading { text: String },
    /// One list item under the current group. The markdown carries the
    /// header display text and a wiki link targeting that header.
    ListItem { markdown: String },
}

/// Render an extraction index into ordered block instructions.
///
/// Groups follow index order; items follow each group's header order. The
/// count in a group heading always equals the number of items that follow
/// it. The link anchor reuses the item's display text, so link text and
/// anchor cannot disagree. An empty index renders no instructions.
pub fn render_summary(document_name: &str, index: &TagHeaderIndex) -> Vec<RenderInstruction> {
    let mut instructions = Vec::new();
    for (tag, headers) in index.iter() {
        instructions.push(RenderInstruction::GroupHeading {
            text: format!("{tag} ({})", headers.len()),
        });
        for header in headers {
            let display = header.display_text();
            instructions.push(RenderInstruction::ListItem {
                markdown: format!("{display} [[{document_name}#{display}|{LINK_LABEL}]]"),
            });
        }
    }
    instructions
}
