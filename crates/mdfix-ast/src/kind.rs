//! Node kinds of the document tree.

use std::fmt;

/// Alert type carried by an alert block.
///
/// Parsed from the upper-case marker token (`[!NOTE]`, `[!TIP]`, ...).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AlertKind {
    Note,
    Tip,
    Important,
    Warning,
    Caution,
}

impl AlertKind {
    /// All alert kinds in marker order.
    pub const ALL: [Self; 5] = [
        Self::Note,
        Self::Tip,
        Self::Important,
        Self::Warning,
        Self::Caution,
    ];

    /// Parse a marker token. Matching is case-sensitive.
    ///
    /// ```
    /// use mdfix_ast::AlertKind;
    ///
    /// assert_eq!(AlertKind::from_marker("TIP"), Some(AlertKind::Tip));
    /// assert_eq!(AlertKind::from_marker("tip"), None);
    /// ```
    #[must_use]
    pub fn from_marker(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == token)
    }

    /// Marker token as written in the source.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Note => "NOTE",
            Self::Tip => "TIP",
            Self::Important => "IMPORTANT",
            Self::Warning => "WARNING",
            Self::Caution => "CAUTION",
        }
    }
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of a document node, with its kind-specific payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    /// Tree root.
    Document,
    Paragraph,
    /// Heading with level 1-6.
    Heading { level: u8 },
    BlockQuote,
    /// Alert block produced from a marked block-quote.
    Alert(AlertKind),
    /// List; `start` is set for ordered lists.
    List { start: Option<u64> },
    Item,
    CodeBlock { info: String, literal: String },
    HtmlBlock { literal: String },
    ThematicBreak,
    Text(String),
    /// Inline code span.
    Code(String),
    InlineHtml(String),
    SoftLineBreak,
    HardLineBreak,
    Emphasis,
    Strong,
    Strikethrough,
    Link { url: String, title: String },
    Image { url: String, title: String },
    /// Link resolved from a reference definition.
    LinkRef {
        url: String,
        title: String,
        label: String,
    },
    /// Image resolved from a reference definition.
    ImageRef {
        url: String,
        title: String,
        label: String,
    },
}

impl NodeKind {
    /// Field-less tag of this kind.
    #[must_use]
    pub fn tag(&self) -> NodeTag {
        match self {
            Self::Document => NodeTag::Document,
            Self::Paragraph => NodeTag::Paragraph,
            Self::Heading { .. } => NodeTag::Heading,
            Self::BlockQuote => NodeTag::BlockQuote,
            Self::Alert(_) => NodeTag::Alert,
            Self::List { .. } => NodeTag::List,
            Self::Item => NodeTag::Item,
            Self::CodeBlock { .. } => NodeTag::CodeBlock,
            Self::HtmlBlock { .. } => NodeTag::HtmlBlock,
            Self::ThematicBreak => NodeTag::ThematicBreak,
            Self::Text(_) => NodeTag::Text,
            Self::Code(_) => NodeTag::Code,
            Self::InlineHtml(_) => NodeTag::InlineHtml,
            Self::SoftLineBreak => NodeTag::SoftLineBreak,
            Self::HardLineBreak => NodeTag::HardLineBreak,
            Self::Emphasis => NodeTag::Emphasis,
            Self::Strong => NodeTag::Strong,
            Self::Strikethrough => NodeTag::Strikethrough,
            Self::Link { .. } => NodeTag::Link,
            Self::Image { .. } => NodeTag::Image,
            Self::LinkRef { .. } => NodeTag::LinkRef,
            Self::ImageRef { .. } => NodeTag::ImageRef,
        }
    }

    /// Literal of a `Text` node.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Whether this is a soft or hard line break.
    #[must_use]
    pub fn is_line_break(&self) -> bool {
        matches!(self, Self::SoftLineBreak | Self::HardLineBreak)
    }
}

/// Discriminant of [`NodeKind`], used as a registry and dispatch key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeTag {
    Document,
    Paragraph,
    Heading,
    BlockQuote,
    Alert,
    List,
    Item,
    CodeBlock,
    HtmlBlock,
    ThematicBreak,
    Text,
    Code,
    InlineHtml,
    SoftLineBreak,
    HardLineBreak,
    Emphasis,
    Strong,
    Strikethrough,
    Link,
    Image,
    LinkRef,
    ImageRef,
}

impl NodeTag {
    /// Snake-case name used in tree outlines and logs.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Document => "document",
            Self::Paragraph => "paragraph",
            Self::Heading => "heading",
            Self::BlockQuote => "block_quote",
            Self::Alert => "alert",
            Self::List => "list",
            Self::Item => "item",
            Self::CodeBlock => "code_block",
            Self::HtmlBlock => "html_block",
            Self::ThematicBreak => "thematic_break",
            Self::Text => "text",
            Self::Code => "code",
            Self::InlineHtml => "inline_html",
            Self::SoftLineBreak => "soft_break",
            Self::HardLineBreak => "hard_break",
            Self::Emphasis => "emphasis",
            Self::Strong => "strong",
            Self::Strikethrough => "strikethrough",
            Self::Link => "link",
            Self::Image => "image",
            Self::LinkRef => "link_ref",
            Self::ImageRef => "image_ref",
        }
    }
}

impl fmt::Display for NodeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
