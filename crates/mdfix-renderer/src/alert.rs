//! Alert container rendering.

use std::fmt::Write;

use mdfix_ast::{NodeId, NodeKind};

use crate::renderer::HtmlContext;

/// Render an alert node as a titled `markdown-alert` container.
///
/// Nodes that are not alerts only have their children rendered.
pub fn render_alert(ctx: &mut HtmlContext<'_>, node: NodeId) {
    let NodeKind::Alert(kind) = ctx.document().kind(node) else {
        ctx.render_children(node);
        return;
    };
    let name = kind.as_str().to_lowercase();
    write!(
        ctx.out(),
        r#"<div class="markdown-alert markdown-alert-{name}"><p class="markdown-alert-title">{name}</p>"#
    )
    .unwrap();
    ctx.render_children(node);
    ctx.out().push_str("</div>");
}
