//! Arena-backed markdown document tree.
//!
//! This crate provides the [`Document`] tree that the mdfix post-processors
//! rewrite and the HTML renderer walks.
//!
//! # Architecture
//!
//! - [`Document`]: nodes stored in an arena and addressed by [`NodeId`];
//!   all mutation goes through methods that keep links consistent
//! - [`NodeKind`]: closed set of node kinds, with [`NodeTag`] as its
//!   field-less discriminant
//! - [`NodeTracker`]: change journal notified of structural mutations
//! - [`parse_markdown`]: builds a tree from pulldown-cmark events
//!
//! # Example
//!
//! ```
//! use mdfix_ast::{NodeTag, default_options, parse_markdown};
//!
//! let doc = parse_markdown("> quoted", default_options());
//! let quote = doc.first_child(doc.root()).unwrap();
//! assert_eq!(doc.kind(quote).tag(), NodeTag::BlockQuote);
//! ```

mod arena;
mod kind;
mod parse;
mod span;
mod tracker;

pub use arena::{Descendants, Document, NodeId, Siblings};
pub use kind::{AlertKind, NodeKind, NodeTag};
pub use parse::{default_options, parse_markdown};
pub use pulldown_cmark::Options;
pub use span::{LineColumn, Span};
pub use tracker::{Change, ChangeJournal, NodeTracker};
