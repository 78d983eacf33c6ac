//! Core data structures for the document tree.
//!
//! Every recognised ADF node type has its own variant carrying only the
//! attributes the converters read. Anything else lands in [`Node::Unknown`],
//! which keeps its type name, scalar attributes, marks and children so that
//! converters can still walk through it.

use std::collections::BTreeMap;

/// Free-form attribute bag used by unknown nodes and marks.
pub type Attrs = BTreeMap<String, Scalar>;

/// A scalar attribute value. Nested objects and arrays are not kept.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

impl Scalar {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Scalar::Integer(n) => Some(*n),
            Scalar::Float(f) if f.fract() == 0.0 => Some(*f as i64),
            _ => None,
        }
    }
}

/// The root of a document. Always serialized as `{"type":"doc","version":1}`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    pub content: Vec<Node>,
}

impl Document {
    pub fn new(content: Vec<Node>) -> Self {
        Self { content }
    }

    /// True when the document has no block content at all.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Descendant text with block separators, see [`crate::formats::text`].
    pub fn plain_text(&self) -> String {
        crate::formats::text::to_plain_text(self)
    }
}

/// A node of the document tree, either block or inline level.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Paragraph(Vec<Node>),
    Heading(Heading),
    BulletList(Vec<Node>),
    OrderedList(Vec<Node>),
    ListItem(Vec<Node>),
    Blockquote(Vec<Node>),
    CodeBlock(CodeBlock),
    Rule,
    Panel(Panel),
    Table(Vec<Node>),
    TableRow(Vec<Node>),
    TableHeader(Vec<Node>),
    TableCell(Vec<Node>),
    MediaSingle(Vec<Node>),
    MediaGroup(Vec<Node>),
    Media(Media),
    Expand(Expand),
    Text(Text),
    HardBreak,
    Emoji { short_name: String },
    Mention { text: String },
    Date { timestamp: String },
    InlineCard { url: String },
    Unknown(UnknownNode),
}

/// A heading; the level is kept within 1..=6.
#[derive(Debug, Clone, PartialEq)]
pub struct Heading {
    pub level: u8,
    pub content: Vec<Node>,
}

/// A fenced code block with an optional language token.
#[derive(Debug, Clone, PartialEq)]
pub struct CodeBlock {
    pub language: Option<String>,
    pub content: Vec<Node>,
}

/// A coloured callout. The panel type is free-form (`info`, `note`, ...).
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub panel_type: Option<String>,
    pub content: Vec<Node>,
}

/// A collapsible section.
#[derive(Debug, Clone, PartialEq)]
pub struct Expand {
    pub title: String,
    pub content: Vec<Node>,
}

/// A run of text with its formatting marks, in stored order.
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub text: String,
    pub marks: Vec<Mark>,
}

/// An embedded file or external image.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Media {
    pub id: Option<String>,
    /// `file` or `link`; absent means `file`.
    pub media_type: Option<String>,
    pub alt: Option<String>,
    pub url: Option<String>,
    pub width: Option<i64>,
    pub height: Option<i64>,
    pub marks: Vec<Mark>,
}

impl Media {
    pub fn is_link(&self) -> bool {
        self.media_type.as_deref() == Some("link")
    }

    /// The href of the first link mark, if any.
    pub fn link_href(&self) -> Option<&str> {
        self.marks.iter().find_map(|mark| match mark {
            Mark::Link { href: Some(href), .. } => Some(href.as_str()),
            _ => None,
        })
    }
}

/// A node whose type is not part of the recognised vocabulary.
#[derive(Debug, Clone, PartialEq)]
pub struct UnknownNode {
    pub node_type: String,
    pub attrs: Attrs,
    pub marks: Vec<Mark>,
    pub content: Vec<Node>,
}

/// An inline formatting annotation.
#[derive(Debug, Clone, PartialEq)]
pub enum Mark {
    Strong,
    Em,
    Underline,
    Strike,
    Code,
    Link {
        href: Option<String>,
        title: Option<String>,
    },
    Unknown {
        mark_type: String,
        attrs: Attrs,
    },
}

impl Mark {
    pub fn link(href: impl Into<String>) -> Self {
        Mark::Link {
            href: Some(href.into()),
            title: None,
        }
    }

    pub fn type_name(&self) -> &str {
        match self {
            Mark::Strong => "strong",
            Mark::Em => "em",
            Mark::Underline => "underline",
            Mark::Strike => "strike",
            Mark::Code => "code",
            Mark::Link { .. } => "link",
            Mark::Unknown { mark_type, .. } => mark_type,
        }
    }
}

impl Node {
    pub fn paragraph(content: Vec<Node>) -> Self {
        Node::Paragraph(content)
    }

    /// Builds a heading, clamping the level into 1..=6.
    pub fn heading(level: i64, content: Vec<Node>) -> Self {
        Node::Heading(Heading {
            level: level.clamp(1, 6) as u8,
            content,
        })
    }

    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(Text {
            text: text.into(),
            marks: Vec::new(),
        })
    }

    pub fn marked_text(text: impl Into<String>, marks: Vec<Mark>) -> Self {
        Node::Text(Text {
            text: text.into(),
            marks,
        })
    }

    /// A list item holding a single paragraph.
    pub fn list_item(content: Vec<Node>) -> Self {
        Node::ListItem(vec![Node::Paragraph(content)])
    }

    pub fn code_block(language: Option<String>, code: impl Into<String>) -> Self {
        let code = code.into();
        let content = if code.is_empty() {
            Vec::new()
        } else {
            vec![Node::text(code)]
        };
        Node::CodeBlock(CodeBlock { language, content })
    }

    /// The ADF type name of this node.
    pub fn type_name(&self) -> &str {
        match self {
            Node::Paragraph(_) => "paragraph",
            Node::Heading(_) => "heading",
            Node::BulletList(_) => "bulletList",
            Node::OrderedList(_) => "orderedList",
            Node::ListItem(_) => "listItem",
            Node::Blockquote(_) => "blockquote",
            Node::CodeBlock(_) => "codeBlock",
            Node::Rule => "rule",
            Node::Panel(_) => "panel",
            Node::Table(_) => "table",
            Node::TableRow(_) => "tableRow",
            Node::TableHeader(_) => "tableHeader",
            Node::TableCell(_) => "tableCell",
            Node::MediaSingle(_) => "mediaSingle",
            Node::MediaGroup(_) => "mediaGroup",
            Node::Media(_) => "media",
            Node::Expand(_) => "expand",
            Node::Text(_) => "text",
            Node::HardBreak => "hardBreak",
            Node::Emoji { .. } => "emoji",
            Node::Mention { .. } => "mention",
            Node::Date { .. } => "date",
            Node::InlineCard { .. } => "inlineCard",
            Node::Unknown(unknown) => &unknown.node_type,
        }
    }

    /// Child nodes; leaves return an empty slice.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Paragraph(c)
            | Node::BulletList(c)
            | Node::OrderedList(c)
            | Node::ListItem(c)
            | Node::Blockquote(c)
            | Node::Table(c)
            | Node::TableRow(c)
            | Node::TableHeader(c)
            | Node::TableCell(c)
            | Node::MediaSingle(c)
            | Node::MediaGroup(c) => c,
            Node::Heading(h) => &h.content,
            Node::CodeBlock(b) => &b.content,
            Node::Panel(p) => &p.content,
            Node::Expand(e) => &e.content,
            Node::Unknown(u) => &u.content,
            Node::Rule
            | Node::Media(_)
            | Node::Text(_)
            | Node::HardBreak
            | Node::Emoji { .. }
            | Node::Mention { .. }
            | Node::Date { .. }
            | Node::InlineCard { .. } => &[],
        }
    }

    /// Marks carried by this node. Only inline nodes have any.
    pub fn marks(&self) -> &[Mark] {
        match self {
            Node::Text(t) => &t.marks,
            Node::Media(m) => &m.marks,
            Node::Unknown(u) => &u.marks,
            _ => &[],
        }
    }
}
