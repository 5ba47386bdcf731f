//! Tree post-processors for mdfix.
//!
//! Post-processors rewrite a parsed [`mdfix_ast::Document`] before it is
//! rendered:
//!
//! - [`AlertPostProcessor`]: turns `> [!NOTE]` style block-quotes into alert
//!   nodes
//! - [`ImageRefLinkFix`]: re-nests image reference links that were split into
//!   sibling nodes
//!
//! Processors return a [`Patch`] instead of mutating the tree; the
//! [`PostProcessorSet`] walker applies patches and journals the changes.
//!
//! # Example
//!
//! ```
//! use mdfix_ast::{ChangeJournal, NodeTag, default_options, parse_markdown};
//! use mdfix_passes::PostProcessorSet;
//!
//! let mut doc = parse_markdown("> [!TIP]\n> Use it", default_options());
//! let mut journal = ChangeJournal::new();
//! PostProcessorSet::standard().run(&mut doc, &mut journal);
//!
//! let alert = doc.first_child(doc.root()).unwrap();
//! assert_eq!(doc.kind(alert).tag(), NodeTag::Alert);
//! ```

mod alert;
mod image_ref;
mod patch;
mod registry;

pub use alert::AlertPostProcessor;
pub use image_ref::ImageRefLinkFix;
pub use patch::{Edit, Patch, Target};
pub use registry::{PostProcessor, PostProcessorSet, RunSummary};

impl PostProcessorSet {
    /// Set with every built-in processor registered.
    #[must_use]
    pub fn standard() -> Self {
        Self::new()
            .with_processor(AlertPostProcessor)
            .with_processor(ImageRefLinkFix)
    }
}
