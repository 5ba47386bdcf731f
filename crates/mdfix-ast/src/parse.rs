//! Tree builder over pulldown-cmark offset events.
//!
//! Builds a [`Document`] from the event stream so that the post-processors
//! can work on a real tree with source spans. GitHub block-quote alerts are
//! never recognised here; the `[!TYPE]` marker reaches the tree as plain text.

use std::ops::Range;

use pulldown_cmark::{CodeBlockKind, Event, LinkType, Options, Parser, Tag};

use crate::arena::{Document, NodeId};
use crate::kind::NodeKind;
use crate::span::Span;

/// Parser options used when none are given: strikethrough only.
#[must_use]
pub fn default_options() -> Options {
    Options::ENABLE_STRIKETHROUGH
}

/// Parse markdown into a document tree.
///
/// `ENABLE_GFM` is always removed from `options`.
///
/// ```
/// use mdfix_ast::{NodeKind, default_options, parse_markdown};
///
/// let doc = parse_markdown("> [!TIP]\n> Use it", default_options());
/// let quote = doc.first_child(doc.root()).unwrap();
/// assert_eq!(doc.kind(quote), &NodeKind::BlockQuote);
/// ```
#[must_use]
pub fn parse_markdown(source: &str, mut options: Options) -> Document {
    options.remove(Options::ENABLE_GFM);
    let mut builder = TreeBuilder::new(source);
    for (event, range) in Parser::new_ext(source, options).into_offset_iter() {
        builder.push(event, range);
    }
    let doc = builder.finish();
    tracing::debug!(nodes = doc.node_count(), "Parsed markdown tree");
    doc
}

struct TreeBuilder {
    doc: Document,
    /// Open containers; `None` marks a flattened container.
    stack: Vec<Option<NodeId>>,
}

impl TreeBuilder {
    fn new(source: &str) -> Self {
        Self {
            doc: Document::new(source),
            stack: Vec::new(),
        }
    }

    fn finish(self) -> Document {
        self.doc
    }

    fn parent(&self) -> NodeId {
        self.stack
            .iter()
            .rev()
            .find_map(|entry| *entry)
            .unwrap_or_else(|| self.doc.root())
    }

    fn add(&mut self, kind: NodeKind, range: Range<usize>) -> NodeId {
        let parent = self.parent();
        let id = self.doc.create(kind, Span::from(range));
        self.doc.append_child(parent, id);
        id
    }

    fn push(&mut self, event: Event<'_>, range: Range<usize>) {
        match event {
            Event::Start(tag) => {
                let entry = container_kind(tag).map(|kind| self.add(kind, range));
                self.stack.push(entry);
            }
            Event::End(_) => {
                self.stack.pop();
            }
            Event::Text(text) => self.text(&text, range),
            Event::Code(code) => {
                self.add(NodeKind::Code(code.into_string()), range);
            }
            Event::Html(html) | Event::InlineHtml(html) => self.html(&html, range),
            Event::SoftBreak => {
                self.add(NodeKind::SoftLineBreak, range);
            }
            Event::HardBreak => {
                self.add(NodeKind::HardLineBreak, range);
            }
            Event::Rule => {
                self.add(NodeKind::ThematicBreak, range);
            }
            Event::FootnoteReference(_)
            | Event::InlineMath(_)
            | Event::DisplayMath(_)
            | Event::TaskListMarker(_) => {
                // Not modelled
            }
        }
    }

    fn text(&mut self, text: &str, range: Range<usize>) {
        let parent = self.parent();
        if let NodeKind::CodeBlock { literal, .. } = self.doc.kind_mut(parent) {
            literal.push_str(text);
            return;
        }

        // pulldown-cmark splits text around brackets; merge contiguous runs.
        if let Some(last) = self.doc.last_child(parent)
            && self.doc.span(last).end == range.start
            && let NodeKind::Text(literal) = self.doc.kind_mut(last)
        {
            literal.push_str(text);
            self.doc.set_span_end(last, range.end);
            return;
        }

        self.add(NodeKind::Text(text.to_owned()), range);
    }

    fn html(&mut self, html: &str, range: Range<usize>) {
        let parent = self.parent();
        if let NodeKind::HtmlBlock { literal } = self.doc.kind_mut(parent) {
            literal.push_str(html);
        } else {
            self.add(NodeKind::InlineHtml(html.to_owned()), range);
        }
    }
}

/// Node kind for a container tag, or `None` when the container is flattened.
fn container_kind(tag: Tag<'_>) -> Option<NodeKind> {
    let kind = match tag {
        Tag::Paragraph => NodeKind::Paragraph,
        Tag::Heading { level, .. } => NodeKind::Heading {
            level: level as u8,
        },
        Tag::BlockQuote(_) => NodeKind::BlockQuote,
        Tag::CodeBlock(kind) => NodeKind::CodeBlock {
            info: match kind {
                CodeBlockKind::Fenced(info) => info.into_string(),
                CodeBlockKind::Indented => String::new(),
            },
            literal: String::new(),
        },
        Tag::HtmlBlock => NodeKind::HtmlBlock {
            literal: String::new(),
        },
        Tag::List(start) => NodeKind::List { start },
        Tag::Item => NodeKind::Item,
        Tag::Emphasis => NodeKind::Emphasis,
        Tag::Strong => NodeKind::Strong,
        Tag::Strikethrough => NodeKind::Strikethrough,
        Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        } => {
            if is_reference(link_type) {
                NodeKind::LinkRef {
                    url: dest_url.into_string(),
                    title: title.into_string(),
                    label: id.into_string(),
                }
            } else {
                NodeKind::Link {
                    url: dest_url.into_string(),
                    title: title.into_string(),
                }
            }
        }
        Tag::Image {
            link_type,
            dest_url,
            title,
            id,
        } => {
            if is_reference(link_type) {
                NodeKind::ImageRef {
                    url: dest_url.into_string(),
                    title: title.into_string(),
                    label: id.into_string(),
                }
            } else {
                NodeKind::Image {
                    url: dest_url.into_string(),
                    title: title.into_string(),
                }
            }
        }
        Tag::FootnoteDefinition(_)
        | Tag::DefinitionList
        | Tag::DefinitionListTitle
        | Tag::DefinitionListDefinition
        | Tag::Table(_)
        | Tag::TableHead
        | Tag::TableRow
        | Tag::TableCell
        | Tag::Superscript
        | Tag::Subscript
        | Tag::MetadataBlock(_) => return None,
    };
    Some(kind)
}

/// Links resolved against a reference definition.
fn is_reference(link_type: LinkType) -> bool {
    matches!(
        link_type,
        LinkType::Reference | LinkType::Collapsed | LinkType::Shortcut
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn outline(markdown: &str) -> String {
        let doc = parse_markdown(markdown, default_options());
        doc.outline(doc.root())
    }

    #[test]
    fn test_paragraph() {
        assert_eq!(
            outline("Hello, world!"),
            "document\n  paragraph\n    text \"Hello, world!\"\n"
        );
    }

    #[test]
    fn test_alert_marker_is_single_text() {
        assert_eq!(
            outline("> [!TIP]\n> I am an alert"),
            concat!(
                "document\n",
                "  block_quote\n",
                "    paragraph\n",
                "      text \"[!TIP]\"\n",
                "      soft_break\n",
                "      text \"I am an alert\"\n",
            )
        );
    }

    #[test]
    fn test_alert_marker_span() {
        let doc = parse_markdown("> [!NOTE]\n> body", default_options());
        let quote = doc.first_child(doc.root()).unwrap();
        let para = doc.first_child(quote).unwrap();
        let marker = doc.first_child(para).unwrap();
        assert_eq!(doc.span(marker), Span::new(2, 9));
        assert_eq!(doc.start_line_column(marker).column, 2);
    }

    #[test]
    fn test_gfm_option_ignored() {
        let doc = parse_markdown("> [!NOTE]\n> body", Options::ENABLE_GFM);
        let quote = doc.first_child(doc.root()).unwrap();
        assert_eq!(doc.kind(quote), &NodeKind::BlockQuote);
    }

    #[test]
    fn test_reference_links_and_images() {
        let markdown = "[![logo][img]][home]\n\n[img]: /logo.png\n[home]: /index.md\n";
        assert_eq!(
            outline(markdown),
            concat!(
                "document\n",
                "  paragraph\n",
                "    link_ref [home]\n",
                "      image_ref [img]\n",
                "        text \"logo\"\n",
            )
        );
    }

    #[test]
    fn test_inline_link() {
        assert_eq!(
            outline("[docs](./guide.md)"),
            concat!(
                "document\n",
                "  paragraph\n",
                "    link \"./guide.md\"\n",
                "      text \"docs\"\n",
            )
        );
    }

    #[test]
    fn test_code_block_literal() {
        assert_eq!(
            outline("```rust\nfn main() {}\n```"),
            "document\n  code_block \"rust\" \"fn main() {}\\n\"\n"
        );
    }

    #[test]
    fn test_heading_and_list() {
        assert_eq!(
            outline("## Title\n\n1. one\n2. two"),
            concat!(
                "document\n",
                "  heading 2\n",
                "    text \"Title\"\n",
                "  list 1\n",
                "    item\n",
                "      text \"one\"\n",
                "    item\n",
                "      text \"two\"\n",
            )
        );
    }

    #[test]
    fn test_flattened_table() {
        let options = Options::ENABLE_TABLES;
        let doc = parse_markdown("| a |\n|---|\n| b |", options);
        let texts: Vec<_> = doc
            .descendants(doc.root())
            .filter_map(|id| doc.kind(id).as_text())
            .collect();
        assert_eq!(texts, vec!["a", "b"]);
        assert!(
            doc.children(doc.root())
                .all(|id| matches!(doc.kind(id), NodeKind::Text(_)))
        );
    }
}
