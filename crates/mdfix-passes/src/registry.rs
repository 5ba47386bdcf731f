//! Post-processor registry and tree walker.
//!
//! Processors are registered for one or more [`NodeTag`]s. A run walks the
//! tree once in document order and invokes every processor registered for a
//! node's tag, in registration order. Processors are pure: they inspect the
//! document and return a [`Patch`], which the walker applies before moving on.
//!
//! The walk visits a snapshot of the nodes reachable when the run starts.
//! Nodes created by patches are therefore never handed back to a processor,
//! and nodes detached by an earlier patch are skipped.

use std::collections::HashMap;

use mdfix_ast::{Document, NodeId, NodeTag, NodeTracker};

use crate::patch::Patch;

/// A tree rewrite invoked for specific node kinds.
pub trait PostProcessor {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Node kinds this processor is invoked for.
    fn node_tags(&self) -> &'static [NodeTag];

    /// Inspect `node` and return the rewrite to apply, or `None` to leave the
    /// tree unchanged.
    fn process(&self, doc: &Document, node: NodeId) -> Option<Patch>;
}

/// Counters for a single run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Processor invocations.
    pub visited: usize,
    /// Invocations that returned a patch.
    pub patched: usize,
}

/// Ordered set of post-processors keyed by node tag.
#[derive(Default)]
pub struct PostProcessorSet {
    processors: Vec<Box<dyn PostProcessor>>,
    by_tag: HashMap<NodeTag, Vec<usize>>,
}

impl PostProcessorSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a processor.
    #[must_use]
    pub fn with_processor<P: PostProcessor + 'static>(mut self, processor: P) -> Self {
        self.register(Box::new(processor));
        self
    }

    /// Register a boxed processor.
    pub fn register(&mut self, processor: Box<dyn PostProcessor>) {
        let index = self.processors.len();
        for &tag in processor.node_tags() {
            self.by_tag.entry(tag).or_default().push(index);
        }
        self.processors.push(processor);
    }

    /// Names of the registered processors in registration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.processors.iter().map(|processor| processor.name())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.processors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.processors.is_empty()
    }

    /// Walk `doc` once, applying every patch and reporting it to `tracker`.
    pub fn run<T: NodeTracker + ?Sized>(&self, doc: &mut Document, tracker: &mut T) -> RunSummary {
        let mut summary = RunSummary::default();
        if self.processors.is_empty() {
            return summary;
        }

        let candidates: Vec<NodeId> = doc
            .descendants(doc.root())
            .filter(|&id| self.by_tag.contains_key(&doc.kind(id).tag()))
            .collect();

        for node in candidates {
            let tag = doc.kind(node).tag();
            let Some(indices) = self.by_tag.get(&tag) else {
                continue;
            };
            for &index in indices {
                // An earlier patch may have moved the node out of the tree.
                if !doc.is_attached(node) || doc.kind(node).tag() != tag {
                    break;
                }
                let processor = &self.processors[index];
                summary.visited += 1;
                if let Some(patch) = processor.process(doc, node) {
                    tracing::debug!(processor = processor.name(), node = ?node, %tag, "Applying patch");
                    patch.apply(doc, tracker);
                    summary.patched += 1;
                }
            }
        }

        tracing::debug!(
            visited = summary.visited,
            patched = summary.patched,
            "Post-processing completed"
        );
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mdfix_ast::{Change, ChangeJournal, NodeKind, Span, default_options, parse_markdown};
    use pretty_assertions::assert_eq;

    /// Wraps every block-quote in a fresh block-quote.
    struct WrapQuote;

    impl PostProcessor for WrapQuote {
        fn name(&self) -> &'static str {
            "wrap-quote"
        }

        fn node_tags(&self) -> &'static [NodeTag] {
            &[NodeTag::BlockQuote]
        }

        fn process(&self, doc: &Document, node: NodeId) -> Option<Patch> {
            let mut patch = Patch::new();
            let wrapper = patch.create(NodeKind::BlockQuote, doc.span(node));
            patch
                .insert_before(node, wrapper)
                .append(wrapper, node)
                .node_added(wrapper);
            Some(patch)
        }
    }

    /// Drops every text node.
    struct DropText;

    impl PostProcessor for DropText {
        fn name(&self) -> &'static str {
            "drop-text"
        }

        fn node_tags(&self) -> &'static [NodeTag] {
            &[NodeTag::Text]
        }

        fn process(&self, _doc: &Document, node: NodeId) -> Option<Patch> {
            let mut patch = Patch::new();
            patch.detach(node).node_removed(node);
            Some(patch)
        }
    }

    /// Removes the paragraph that follows a paragraph.
    struct DropNextParagraph;

    impl PostProcessor for DropNextParagraph {
        fn name(&self) -> &'static str {
            "drop-next"
        }

        fn node_tags(&self) -> &'static [NodeTag] {
            &[NodeTag::Paragraph]
        }

        fn process(&self, doc: &Document, node: NodeId) -> Option<Patch> {
            let next = doc.next_sibling(node)?;
            let mut patch = Patch::new();
            patch.detach(next);
            Some(patch)
        }
    }

    #[test]
    fn test_empty_set_is_noop() {
        let mut doc = parse_markdown("> quote", default_options());
        let before = doc.outline(doc.root());
        let mut journal = ChangeJournal::new();
        let summary = PostProcessorSet::new().run(&mut doc, &mut journal);
        assert_eq!(summary, RunSummary::default());
        assert_eq!(doc.outline(doc.root()), before);
        assert!(journal.is_empty());
    }

    #[test]
    fn test_created_nodes_are_not_revisited() {
        let mut doc = parse_markdown("> one\n\n---\n\n> two", default_options());
        let mut journal = ChangeJournal::new();
        let set = PostProcessorSet::new().with_processor(WrapQuote);
        let summary = set.run(&mut doc, &mut journal);

        assert_eq!(summary, RunSummary { visited: 2, patched: 2 });
        assert_eq!(
            doc.outline(doc.root()),
            concat!(
                "document\n",
                "  block_quote\n",
                "    block_quote\n",
                "      paragraph\n",
                "        text \"one\"\n",
                "  thematic_break\n",
                "  block_quote\n",
                "    block_quote\n",
                "      paragraph\n",
                "        text \"two\"\n",
            )
        );
        assert_eq!(journal.changes().len(), 2);
    }

    #[test]
    fn test_processors_run_in_document_order() {
        let mut doc = parse_markdown("first\n\nsecond\n\nthird", default_options());
        let mut journal = ChangeJournal::new();
        let set = PostProcessorSet::new().with_processor(DropNextParagraph);
        let summary = set.run(&mut doc, &mut journal);

        // "second" is detached by the first invocation and skipped afterwards.
        assert_eq!(summary, RunSummary { visited: 2, patched: 1 });
        assert_eq!(
            doc.outline(doc.root()),
            concat!(
                "document\n",
                "  paragraph\n",
                "    text \"first\"\n",
                "  paragraph\n",
                "    text \"third\"\n",
            )
        );
    }

    #[test]
    fn test_multiple_processors_by_tag() {
        let mut doc = parse_markdown("> *a* b", default_options());
        let mut journal = ChangeJournal::new();
        let set = PostProcessorSet::new()
            .with_processor(WrapQuote)
            .with_processor(DropText);
        assert_eq!(set.names().collect::<Vec<_>>(), vec!["wrap-quote", "drop-text"]);

        let summary = set.run(&mut doc, &mut journal);
        assert_eq!(summary, RunSummary { visited: 3, patched: 3 });
        assert_eq!(
            doc.outline(doc.root()),
            concat!(
                "document\n",
                "  block_quote\n",
                "    block_quote\n",
                "      paragraph\n",
                "        emphasis\n",
            )
        );
        assert!(matches!(journal.changes()[0], Change::Added(_)));
        assert!(matches!(journal.changes()[2], Change::Removed(_)));
    }

    #[test]
    fn test_register_boxed() {
        let mut set = PostProcessorSet::new();
        assert!(set.is_empty());
        set.register(Box::new(DropText));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_detached_node_span_kept() {
        let mut doc = parse_markdown("text", default_options());
        let para = doc.first_child(doc.root()).unwrap();
        let text = doc.first_child(para).unwrap();
        let mut journal = ChangeJournal::new();
        PostProcessorSet::new()
            .with_processor(DropText)
            .run(&mut doc, &mut journal);
        assert!(!doc.is_attached(text));
        assert_eq!(doc.span(text), Span::new(0, 4));
        assert_eq!(journal.changes(), &[Change::Removed(text)]);
    }
}
