//! Arena-backed document tree.
//!
//! Nodes live in a single `Vec` and refer to each other by [`NodeId`].
//! Every structural mutation goes through [`Document`] methods, which keep
//! parent, child and sibling links consistent. Detached nodes stay in the
//! arena but are no longer reachable from the root.

use std::fmt::Write;

use crate::kind::NodeKind;
use crate::span::{LineColumn, LineIndex, Span};

/// Stable index of a node in a [`Document`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// Position of the node in the arena.
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Debug)]
struct Node {
    kind: NodeKind,
    span: Span,
    parent: Option<NodeId>,
    first_child: Option<NodeId>,
    last_child: Option<NodeId>,
    prev: Option<NodeId>,
    next: Option<NodeId>,
}

impl Node {
    fn new(kind: NodeKind, span: Span) -> Self {
        Self {
            kind,
            span,
            parent: None,
            first_child: None,
            last_child: None,
            prev: None,
            next: None,
        }
    }
}

/// Markdown document tree with its source text.
#[derive(Clone, Debug)]
pub struct Document {
    source: String,
    lines: LineIndex,
    nodes: Vec<Node>,
}

impl Document {
    /// Create a document holding only the root node.
    pub fn new(source: impl Into<String>) -> Self {
        let source = source.into();
        let root = Node::new(NodeKind::Document, Span::new(0, source.len()));
        Self {
            lines: LineIndex::new(&source),
            source,
            nodes: vec![root],
        }
    }

    /// Root node of the tree.
    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Number of nodes in the arena, attached or not.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Allocate a new detached node.
    pub fn create(&mut self, kind: NodeKind, span: Span) -> NodeId {
        let id = u32::try_from(self.nodes.len()).expect("document exceeds u32::MAX nodes");
        self.nodes.push(Node::new(kind, span));
        NodeId(id)
    }

    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    #[must_use]
    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.node(id).kind
    }

    pub fn kind_mut(&mut self, id: NodeId) -> &mut NodeKind {
        &mut self.node_mut(id).kind
    }

    #[must_use]
    pub fn span(&self, id: NodeId) -> Span {
        self.node(id).span
    }

    /// Source text covered by the node's span, markup included.
    ///
    /// `None` when the span runs past the source or splits a character.
    #[must_use]
    pub fn source_slice(&self, id: NodeId) -> Option<&str> {
        let Span { start, end } = self.span(id);
        self.source.get(start..end)
    }

    pub(crate) fn set_span_end(&mut self, id: NodeId, end: usize) {
        self.node_mut(id).span.end = end;
    }

    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    #[must_use]
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).first_child
    }

    #[must_use]
    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).last_child
    }

    #[must_use]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).next
    }

    #[must_use]
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).prev
    }

    /// Children of `id` in order.
    #[must_use]
    pub fn children(&self, id: NodeId) -> Siblings<'_> {
        Siblings {
            doc: self,
            next: self.first_child(id),
        }
    }

    /// Siblings after `id` in order, excluding `id` itself.
    #[must_use]
    pub fn following_siblings(&self, id: NodeId) -> Siblings<'_> {
        Siblings {
            doc: self,
            next: self.next_sibling(id),
        }
    }

    /// Pre-order traversal of the subtree rooted at `id`, including `id`.
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        Descendants {
            doc: self,
            root: id,
            next: Some(id),
        }
    }

    /// Whether `ancestor` is `id` or one of its ancestors.
    #[must_use]
    pub fn is_ancestor_or_self(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.parent(node);
        }
        false
    }

    /// Whether `id` is reachable from the root.
    #[must_use]
    pub fn is_attached(&self, id: NodeId) -> bool {
        self.is_ancestor_or_self(self.root(), id)
    }

    /// Line and column of a source offset.
    #[must_use]
    pub fn line_column(&self, offset: usize) -> LineColumn {
        self.lines.line_column(&self.source, offset)
    }

    /// Line and column where node `id` starts.
    #[must_use]
    pub fn start_line_column(&self, id: NodeId) -> LineColumn {
        self.line_column(self.span(id).start)
    }

    /// Plain text of a subtree: text and code literals, line breaks as spaces.
    #[must_use]
    pub fn text_content(&self, id: NodeId) -> String {
        let mut text = String::new();
        for node in self.descendants(id) {
            match self.kind(node) {
                NodeKind::Text(literal) | NodeKind::Code(literal) => text.push_str(literal),
                NodeKind::SoftLineBreak | NodeKind::HardLineBreak => text.push(' '),
                _ => {}
            }
        }
        text
    }

    /// Unlink `id` from its parent and siblings. Its own children stay.
    pub fn detach(&mut self, id: NodeId) {
        let node = self.node(id);
        let (parent, prev, next) = (node.parent, node.prev, node.next);

        match prev {
            Some(prev) => self.node_mut(prev).next = next,
            None => {
                if let Some(parent) = parent {
                    self.node_mut(parent).first_child = next;
                }
            }
        }
        match next {
            Some(next) => self.node_mut(next).prev = prev,
            None => {
                if let Some(parent) = parent {
                    self.node_mut(parent).last_child = prev;
                }
            }
        }

        let node = self.node_mut(id);
        node.parent = None;
        node.prev = None;
        node.next = None;
    }

    /// Detach all children of `id`.
    pub fn remove_children(&mut self, id: NodeId) {
        while let Some(child) = self.first_child(id) {
            self.detach(child);
        }
    }

    /// Move `child` to the end of `parent`'s children.
    ///
    /// # Panics
    ///
    /// Panics if `child` is the root or an ancestor of `parent`.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.prepare_move(parent, child);
        let last = self.last_child(parent);
        {
            let node = self.node_mut(child);
            node.parent = Some(parent);
            node.prev = last;
        }
        match last {
            Some(last) => self.node_mut(last).next = Some(child),
            None => self.node_mut(parent).first_child = Some(child),
        }
        self.node_mut(parent).last_child = Some(child);
    }

    /// Move `child` to the start of `parent`'s children.
    ///
    /// # Panics
    ///
    /// Panics if `child` is the root or an ancestor of `parent`.
    pub fn prepend_child(&mut self, parent: NodeId, child: NodeId) {
        match self.first_child(parent) {
            Some(first) if first != child => self.insert_before(first, child),
            Some(_) => {}
            None => self.append_child(parent, child),
        }
    }

    /// Move `node` to directly before `anchor`.
    ///
    /// # Panics
    ///
    /// Panics if `anchor` is detached, or if `node` is the root or an
    /// ancestor of `anchor`.
    pub fn insert_before(&mut self, anchor: NodeId, node: NodeId) {
        assert_ne!(anchor, node, "a node cannot be inserted before itself");
        let parent = self
            .parent(anchor)
            .expect("insert_before anchor must have a parent");
        self.prepare_move(parent, node);
        let prev = self.prev_sibling(anchor);
        {
            let moved = self.node_mut(node);
            moved.parent = Some(parent);
            moved.prev = prev;
            moved.next = Some(anchor);
        }
        self.node_mut(anchor).prev = Some(node);
        match prev {
            Some(prev) => self.node_mut(prev).next = Some(node),
            None => self.node_mut(parent).first_child = Some(node),
        }
    }

    fn prepare_move(&mut self, new_parent: NodeId, node: NodeId) {
        assert_ne!(node, self.root(), "the root cannot be moved");
        assert!(
            !self.is_ancestor_or_self(node, new_parent),
            "moving {node:?} under {new_parent:?} would create a cycle"
        );
        self.detach(node);
    }

    /// Indented outline of the subtree at `id`, one node per line.
    ///
    /// ```
    /// use mdfix_ast::{Document, NodeKind, Span};
    ///
    /// let mut doc = Document::new("hi");
    /// let para = doc.create(NodeKind::Paragraph, Span::new(0, 2));
    /// let text = doc.create(NodeKind::Text("hi".to_owned()), Span::new(0, 2));
    /// doc.append_child(doc.root(), para);
    /// doc.append_child(para, text);
    /// assert_eq!(doc.outline(doc.root()), "document\n  paragraph\n    text \"hi\"\n");
    /// ```
    #[must_use]
    pub fn outline(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_outline(id, 0, &mut out);
        out
    }

    fn write_outline(&self, id: NodeId, depth: usize, out: &mut String) {
        let kind = self.kind(id);
        write!(out, "{}{}", "  ".repeat(depth), kind.tag()).unwrap();
        match kind {
            NodeKind::Heading { level } => write!(out, " {level}").unwrap(),
            NodeKind::Alert(alert) => write!(out, " {alert}").unwrap(),
            NodeKind::List { start: Some(start) } => write!(out, " {start}").unwrap(),
            NodeKind::CodeBlock { info, literal } => write!(out, " {info:?} {literal:?}").unwrap(),
            NodeKind::HtmlBlock { literal } => write!(out, " {literal:?}").unwrap(),
            NodeKind::Text(literal) | NodeKind::Code(literal) | NodeKind::InlineHtml(literal) => {
                write!(out, " {literal:?}").unwrap();
            }
            NodeKind::Link { url, .. } | NodeKind::Image { url, .. } => {
                write!(out, " {url:?}").unwrap();
            }
            NodeKind::LinkRef { label, .. } | NodeKind::ImageRef { label, .. } => {
                write!(out, " [{label}]").unwrap();
            }
            _ => {}
        }
        out.push('\n');
        for child in self.children(id) {
            self.write_outline(child, depth + 1, out);
        }
    }
}

/// Iterator over a run of siblings.
pub struct Siblings<'a> {
    doc: &'a Document,
    next: Option<NodeId>,
}

impl Iterator for Siblings<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.doc.next_sibling(current);
        Some(current)
    }
}

/// Pre-order iterator over a subtree.
pub struct Descendants<'a> {
    doc: &'a Document,
    root: NodeId,
    next: Option<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.doc.first_child(current).or_else(|| {
            let mut node = current;
            loop {
                if node == self.root {
                    return None;
                }
                if let Some(next) = self.doc.next_sibling(node) {
                    return Some(next);
                }
                node = self.doc.parent(node)?;
            }
        });
        Some(current)
    }
}
