//! Tree walker with a per-node-kind dispatch table.

use std::collections::HashMap;

use mdfix_ast::{Document, NodeId, NodeTag};

use crate::alert::render_alert;
use crate::html::render_default;

/// Handler that renders one node into the context's output.
pub type RenderFn = fn(&mut HtmlContext<'_>, NodeId);

/// HTML renderer over a [`Document`].
///
/// Every node kind has a default handler. Handlers registered with
/// [`with_handler`](Self::with_handler) take precedence; the alert handler is
/// registered by default.
///
/// # Example
///
/// ```
/// use mdfix_ast::{NodeTag, default_options, parse_markdown};
/// use mdfix_renderer::{HtmlContext, HtmlRenderer};
///
/// fn shout(ctx: &mut HtmlContext<'_>, node: mdfix_ast::NodeId) {
///     let text = ctx.document().text_content(node).to_uppercase();
///     ctx.out().push_str(&text);
/// }
///
/// let doc = parse_markdown("*quiet*", default_options());
/// let html = HtmlRenderer::new()
///     .with_handler(NodeTag::Emphasis, shout)
///     .render(&doc);
/// assert_eq!(html, "<p>QUIET</p>");
/// ```
#[derive(Clone)]
pub struct HtmlRenderer {
    handlers: HashMap<NodeTag, RenderFn>,
}

impl HtmlRenderer {
    /// Create a renderer with the alert handler registered.
    #[must_use]
    pub fn new() -> Self {
        let mut handlers: HashMap<NodeTag, RenderFn> = HashMap::new();
        handlers.insert(NodeTag::Alert, render_alert);
        Self { handlers }
    }

    /// Register `handler` for `tag`, replacing any previous one.
    #[must_use]
    pub fn with_handler(mut self, tag: NodeTag, handler: RenderFn) -> Self {
        self.handlers.insert(tag, handler);
        self
    }

    /// Drop the handler for `tag`, falling back to the default rendering.
    #[must_use]
    pub fn without_handler(mut self, tag: NodeTag) -> Self {
        self.handlers.remove(&tag);
        self
    }

    /// Render the whole document.
    #[must_use]
    pub fn render(&self, doc: &Document) -> String {
        self.render_node(doc, doc.root())
    }

    /// Render the subtree at `node`.
    #[must_use]
    pub fn render_node(&self, doc: &Document, node: NodeId) -> String {
        let mut ctx = HtmlContext {
            doc,
            handlers: &self.handlers,
            out: String::with_capacity(4096),
        };
        ctx.render_node(node);
        ctx.out
    }
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Rendering state handed to every handler.
pub struct HtmlContext<'a> {
    doc: &'a Document,
    handlers: &'a HashMap<NodeTag, RenderFn>,
    out: String,
}

impl<'a> HtmlContext<'a> {
    #[must_use]
    pub fn document(&self) -> &'a Document {
        self.doc
    }

    /// Output buffer.
    pub fn out(&mut self) -> &mut String {
        &mut self.out
    }

    /// Render `node` through its registered handler or the default.
    pub fn render_node(&mut self, node: NodeId) {
        let tag = self.doc.kind(node).tag();
        let handler = self.handlers.get(&tag).copied().unwrap_or(render_default);
        handler(self, node);
    }

    /// Render the children of `node` in order.
    pub fn render_children(&mut self, node: NodeId) {
        let doc = self.doc;
        for child in doc.children(node) {
            self.render_node(child);
        }
    }
}
