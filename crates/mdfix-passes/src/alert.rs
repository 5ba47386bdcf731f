//! GitHub alert extraction.
//!
//! GitHub alerts are a syntactic superset of block-quotes:
//!
//! ```markdown
//! > [!TIP]
//! > I am an alert
//! ```
//!
//! The marker may also sit alone in its own paragraph, with the content in
//! the following blocks:
//!
//! ```markdown
//! > [!NOTE]
//! >
//! > I am also an alert
//! ```
//!
//! A marker with nothing after it (`> [!CAUTION]`) stays a block-quote.
//! Only top-level block-quotes are converted, and alerts do not nest.

use std::sync::LazyLock;

use regex::Regex;

use mdfix_ast::{AlertKind, Document, NodeId, NodeKind, NodeTag};

use crate::patch::Patch;
use crate::registry::PostProcessor;

static ALERT_MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[!(NOTE|TIP|IMPORTANT|WARNING|CAUTION)\]").unwrap());

/// Largest column the marker may start at; leaves room for the `>` prefix
/// and its indentation.
const MAX_MARKER_COLUMN: usize = 5;

/// Converts marked top-level block-quotes into alert nodes.
#[derive(Clone, Copy, Debug, Default)]
pub struct AlertPostProcessor;

impl PostProcessor for AlertPostProcessor {
    fn name(&self) -> &'static str {
        "alerts"
    }

    fn node_tags(&self) -> &'static [NodeTag] {
        &[NodeTag::BlockQuote]
    }

    fn process(&self, doc: &Document, node: NodeId) -> Option<Patch> {
        if doc.kind(node) != &NodeKind::BlockQuote {
            return None;
        }
        let paragraph = doc
            .first_child(node)
            .filter(|&child| doc.kind(child) == &NodeKind::Paragraph)?;
        let kind = alert_kind(doc, node, paragraph)?;
        Some(rewrite(doc, node, paragraph, kind))
    }
}

/// Whether a non-break node follows `node` among its siblings.
fn has_content_after(doc: &Document, node: NodeId) -> bool {
    doc.following_siblings(node)
        .any(|sibling| !doc.kind(sibling).is_line_break())
}

/// Content after the marker paragraph, as following blocks.
fn has_block_content(doc: &Document, paragraph: NodeId) -> bool {
    has_content_after(doc, paragraph)
}

/// Content inside the marker paragraph, after the first inline node.
fn has_inline_content(doc: &Document, paragraph: NodeId) -> bool {
    doc.first_child(paragraph)
        .is_some_and(|first| has_content_after(doc, first))
}

fn alert_kind(doc: &Document, quote: NodeId, paragraph: NodeId) -> Option<AlertKind> {
    if doc.parent(quote) != Some(doc.root()) {
        return None;
    }
    if !has_block_content(doc, paragraph) && !has_inline_content(doc, paragraph) {
        return None;
    }

    let marker = doc.first_child(paragraph)?;
    if doc.start_line_column(marker).column > MAX_MARKER_COLUMN {
        return None;
    }
    // Matched on source text, so emphasis, code spans and links that
    // spell out a marker count too.
    let text = doc.source_slice(marker)?;
    let captures = ALERT_MARKER_RE.captures(text)?;
    AlertKind::from_marker(&captures[1])
}

fn rewrite(doc: &Document, quote: NodeId, paragraph: NodeId, kind: AlertKind) -> Patch {
    let mut patch = Patch::new();
    let alert = patch.create(NodeKind::Alert(kind), doc.span(quote));

    if has_block_content(doc, paragraph) {
        for sibling in doc.following_siblings(paragraph) {
            patch.append(alert, sibling);
        }
    }

    if has_inline_content(doc, paragraph) {
        // Drop the marker line, including its line break.
        for inline in doc.children(paragraph) {
            patch.detach(inline);
            if doc.kind(inline).is_line_break() {
                break;
            }
        }
        patch.prepend(alert, paragraph);
    }

    patch
        .insert_before(quote, alert)
        .detach(quote)
        .node_removed_with_children(quote)
        .node_added_with_children(alert);
    patch
}
