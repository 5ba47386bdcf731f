//! Repair of image reference links split into sibling nodes.
//!
//! Some parsers turn `[![alt][image]][link]` into four siblings instead of a
//! link wrapping an image:
//!
//! ```text
//! text "["  image_ref [image]  text "]"  link_ref [link]
//! ```
//!
//! This processor re-nests the image under the link and drops the brackets.
//! The pattern is specific enough that no other document shape matches it.

use mdfix_ast::{Document, NodeId, NodeKind, NodeTag};

use crate::patch::Patch;
use crate::registry::PostProcessor;

/// Moves a bracketed image reference into the link reference after it.
#[derive(Clone, Copy, Debug, Default)]
pub struct ImageRefLinkFix;

impl PostProcessor for ImageRefLinkFix {
    fn name(&self) -> &'static str {
        "image-ref-links"
    }

    fn node_tags(&self) -> &'static [NodeTag] {
        &[NodeTag::ImageRef]
    }

    fn process(&self, doc: &Document, node: NodeId) -> Option<Patch> {
        if doc.kind(node).tag() != NodeTag::ImageRef {
            return None;
        }
        let left = doc
            .prev_sibling(node)
            .filter(|&id| is_text(doc, id, "["))?;
        let right = doc
            .next_sibling(node)
            .filter(|&id| is_text(doc, id, "]"))?;
        let link = doc
            .next_sibling(right)
            .filter(|&id| matches!(doc.kind(id), NodeKind::LinkRef { .. }))?;

        let mut patch = Patch::new();
        patch
            .remove_children(link)
            .append(link, node)
            .detach(right)
            .detach(left)
            .node_added(node)
            .node_removed(right)
            .node_removed(left);
        Some(patch)
    }
}

fn is_text(doc: &Document, id: NodeId, literal: &str) -> bool {
    doc.kind(id).as_text() == Some(literal)
}
