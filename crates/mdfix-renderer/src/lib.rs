//! HTML renderer for mdfix documents.
//!
//! [`HtmlRenderer`] walks a [`mdfix_ast::Document`] and dispatches each node
//! to a [`RenderFn`] chosen by its [`mdfix_ast::NodeTag`]. Kinds without a
//! registered handler use the built-in markup; alerts are rendered by
//! [`render_alert`] unless that handler is removed.
//!
//! # Example
//!
//! ```
//! use mdfix_ast::{ChangeJournal, default_options, parse_markdown};
//! use mdfix_passes::PostProcessorSet;
//! use mdfix_renderer::HtmlRenderer;
//!
//! let mut doc = parse_markdown("> [!NOTE]\n> Read this", default_options());
//! PostProcessorSet::standard().run(&mut doc, &mut ChangeJournal::new());
//!
//! let html = HtmlRenderer::new().render(&doc);
//! assert!(html.starts_with(r#"<div class="markdown-alert markdown-alert-note">"#));
//! ```

mod alert;
mod html;
mod renderer;

pub use alert::render_alert;
pub use html::escape_html;
pub use renderer::{HtmlContext, HtmlRenderer, RenderFn};
