//! Default HTML rendering for every node kind.
//!
//! Produces compact semantic HTML5: `<p>`, `<blockquote>`,
//! `<pre><code class="language-…">`, `<img>` and `<a>`.

use std::fmt::Write;

use mdfix_ast::{NodeId, NodeKind};

use crate::renderer::HtmlContext;

/// Escape text for use in HTML content and attribute values.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

/// Render `node` with the built-in markup for its kind.
pub(crate) fn render_default(ctx: &mut HtmlContext<'_>, node: NodeId) {
    let doc = ctx.document();
    match doc.kind(node) {
        NodeKind::Document => ctx.render_children(node),
        NodeKind::Paragraph => wrap(ctx, node, "p"),
        NodeKind::Heading { level } => wrap(ctx, node, &format!("h{level}")),
        // Without the alert handler an alert degrades to its block-quote.
        NodeKind::BlockQuote | NodeKind::Alert(_) => wrap(ctx, node, "blockquote"),
        NodeKind::List { start } => {
            let close = match start {
                Some(1) => {
                    ctx.out().push_str("<ol>");
                    "</ol>"
                }
                Some(n) => {
                    write!(ctx.out(), r#"<ol start="{n}">"#).unwrap();
                    "</ol>"
                }
                None => {
                    ctx.out().push_str("<ul>");
                    "</ul>"
                }
            };
            ctx.render_children(node);
            ctx.out().push_str(close);
        }
        NodeKind::Item => wrap(ctx, node, "li"),
        NodeKind::CodeBlock { info, literal } => code_block(ctx.out(), info, literal),
        NodeKind::HtmlBlock { literal } | NodeKind::InlineHtml(literal) => {
            ctx.out().push_str(literal);
        }
        NodeKind::ThematicBreak => ctx.out().push_str("<hr>"),
        NodeKind::Text(text) => ctx.out().push_str(&escape_html(text)),
        NodeKind::Code(code) => {
            write!(ctx.out(), "<code>{}</code>", escape_html(code)).unwrap();
        }
        NodeKind::SoftLineBreak => ctx.out().push('\n'),
        NodeKind::HardLineBreak => ctx.out().push_str("<br>"),
        NodeKind::Emphasis => wrap(ctx, node, "em"),
        NodeKind::Strong => wrap(ctx, node, "strong"),
        NodeKind::Strikethrough => wrap(ctx, node, "s"),
        NodeKind::Link { url, title } | NodeKind::LinkRef { url, title, .. } => {
            write!(ctx.out(), r#"<a href="{}""#, escape_html(url)).unwrap();
            title_attr(ctx.out(), title);
            ctx.out().push('>');
            ctx.render_children(node);
            ctx.out().push_str("</a>");
        }
        NodeKind::Image { url, title } | NodeKind::ImageRef { url, title, .. } => {
            let alt = doc.text_content(node);
            write!(ctx.out(), r#"<img src="{}""#, escape_html(url)).unwrap();
            title_attr(ctx.out(), title);
            write!(ctx.out(), r#" alt="{}">"#, escape_html(&alt)).unwrap();
        }
    }
}

fn wrap(ctx: &mut HtmlContext<'_>, node: NodeId, tag: &str) {
    write!(ctx.out(), "<{tag}>").unwrap();
    ctx.render_children(node);
    write!(ctx.out(), "</{tag}>").unwrap();
}

fn title_attr(out: &mut String, title: &str) {
    if !title.is_empty() {
        write!(out, r#" title="{}""#, escape_html(title)).unwrap();
    }
}

fn code_block(out: &mut String, info: &str, literal: &str) {
    match info.split_whitespace().next() {
        Some(lang) => write!(
            out,
            r#"<pre><code class="language-{}">{}</code></pre>"#,
            escape_html(lang),
            escape_html(literal)
        )
        .unwrap(),
        None => write!(out, "<pre><code>{}</code></pre>", escape_html(literal)).unwrap(),
    }
}
