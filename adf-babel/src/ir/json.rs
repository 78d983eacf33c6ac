//! JSON decoding and encoding for the document tree.
//!
//! Decoding works on an untyped [`serde_json::Value`] and never fails: a field
//! with the wrong shape is read as absent, a non-object entry in a `content`
//! array is skipped, and an object without a string `type` becomes an unknown
//! node so its children survive. Only [`Document::from_json`] can fail, and only
//! when the text is not JSON at all.

use crate::error::FormatError;
use crate::ir::nodes::{
    Attrs, CodeBlock, Document, Expand, Heading, Mark, Media, Node, Panel, Scalar, Text,
    UnknownNode,
};
use serde_json::{Map, Number, Value};

type Object = Map<String, Value>;

/// Whether `value` looks like an ADF root (`{"type": "doc", ...}`).
pub fn is_adf_document(value: &Value) -> bool {
    value.get("type").and_then(Value::as_str) == Some("doc")
}

impl Document {
    /// Parse ADF JSON text into a document.
    pub fn from_json(source: &str) -> Result<Document, FormatError> {
        let value: Value = serde_json::from_str(source)?;
        Ok(Document::from_value(&value))
    }

    /// Decode a document from an already parsed JSON value.
    pub fn from_value(value: &Value) -> Document {
        Document {
            content: decode_nodes(value.get("content")),
        }
    }

    /// Encode as an ADF JSON value. The version is always 1.
    pub fn to_value(&self) -> Value {
        let mut root = Object::new();
        root.insert("type".to_string(), Value::from("doc"));
        root.insert("version".to_string(), Value::from(1));
        root.insert("content".to_string(), encode_nodes(&self.content));
        Value::Object(root)
    }

    pub fn to_json(&self) -> String {
        self.to_value().to_string()
    }

    pub fn to_json_pretty(&self) -> String {
        // Serializing a Value cannot fail: all map keys are strings.
        serde_json::to_string_pretty(&self.to_value()).unwrap_or_default()
    }
}

fn decode_nodes(value: Option<&Value>) -> Vec<Node> {
    value
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(decode_node).collect())
        .unwrap_or_default()
}

fn decode_node(value: &Value) -> Option<Node> {
    let object = value.as_object()?;
    let attrs = object.get("attrs").and_then(Value::as_object);
    let content = || decode_nodes(object.get("content"));

    let node_type = object.get("type").and_then(Value::as_str).unwrap_or("");
    let node = match node_type {
        "paragraph" => Node::Paragraph(content()),
        "heading" => Node::Heading(Heading {
            level: int_attr(attrs, "level").unwrap_or(1).clamp(1, 6) as u8,
            content: content(),
        }),
        "bulletList" => Node::BulletList(content()),
        "orderedList" => Node::OrderedList(content()),
        "listItem" => Node::ListItem(content()),
        "blockquote" => Node::Blockquote(content()),
        "codeBlock" => Node::CodeBlock(CodeBlock {
            language: str_attr(attrs, "language").filter(|lang| !lang.is_empty()),
            content: content(),
        }),
        "rule" => Node::Rule,
        "panel" => Node::Panel(Panel {
            panel_type: str_attr(attrs, "panelType"),
            content: content(),
        }),
        "table" => Node::Table(content()),
        "tableRow" => Node::TableRow(content()),
        "tableHeader" => Node::TableHeader(content()),
        "tableCell" => Node::TableCell(content()),
        "mediaSingle" => Node::MediaSingle(content()),
        "mediaGroup" => Node::MediaGroup(content()),
        "media" => Node::Media(Media {
            id: str_attr(attrs, "id"),
            media_type: str_attr(attrs, "type"),
            alt: str_attr(attrs, "alt"),
            url: str_attr(attrs, "url"),
            width: int_attr(attrs, "width"),
            height: int_attr(attrs, "height"),
            marks: decode_marks(object.get("marks")),
        }),
        "expand" => Node::Expand(Expand {
            title: str_attr(attrs, "title").unwrap_or_default(),
            content: content(),
        }),
        "text" => Node::Text(Text {
            text: object
                .get("text")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            marks: decode_marks(object.get("marks")),
        }),
        "hardBreak" => Node::HardBreak,
        "emoji" => Node::Emoji {
            short_name: str_attr(attrs, "shortName").unwrap_or_default(),
        },
        "mention" => Node::Mention {
            text: str_attr(attrs, "text").unwrap_or_default(),
        },
        "date" => Node::Date {
            timestamp: str_attr(attrs, "timestamp")
                .or_else(|| int_attr(attrs, "timestamp").map(|ts| ts.to_string()))
                .unwrap_or_default(),
        },
        "inlineCard" => Node::InlineCard {
            url: str_attr(attrs, "url").unwrap_or_default(),
        },
        other => Node::Unknown(UnknownNode {
            node_type: other.to_string(),
            attrs: decode_attrs(attrs),
            marks: decode_marks(object.get("marks")),
            content: content(),
        }),
    };
    Some(node)
}

fn decode_marks(value: Option<&Value>) -> Vec<Mark> {
    value
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(decode_mark).collect())
        .unwrap_or_default()
}

fn decode_mark(value: &Value) -> Option<Mark> {
    let object = value.as_object()?;
    let mark_type = object.get("type").and_then(Value::as_str)?;
    let attrs = object.get("attrs").and_then(Value::as_object);
    let mark = match mark_type {
        "strong" => Mark::Strong,
        "em" => Mark::Em,
        "underline" => Mark::Underline,
        "strike" => Mark::Strike,
        "code" => Mark::Code,
        "link" => Mark::Link {
            href: str_attr(attrs, "href"),
            title: str_attr(attrs, "title"),
        },
        other => Mark::Unknown {
            mark_type: other.to_string(),
            attrs: decode_attrs(attrs),
        },
    };
    Some(mark)
}

fn str_attr(attrs: Option<&Object>, key: &str) -> Option<String> {
    attrs?.get(key)?.as_str().map(str::to_string)
}

fn int_attr(attrs: Option<&Object>, key: &str) -> Option<i64> {
    let value = attrs?.get(key)?;
    value
        .as_i64()
        .or_else(|| value.as_f64().map(|f| f as i64))
}

fn decode_attrs(attrs: Option<&Object>) -> Attrs {
    let Some(attrs) = attrs else {
        return Attrs::new();
    };
    attrs
        .iter()
        .filter_map(|(key, value)| {
            let scalar = match value {
                Value::String(s) => Scalar::String(s.clone()),
                Value::Bool(b) => Scalar::Bool(*b),
                Value::Number(n) => match n.as_i64() {
                    Some(i) => Scalar::Integer(i),
                    None => Scalar::Float(n.as_f64()?),
                },
                _ => return None,
            };
            Some((key.clone(), scalar))
        })
        .collect()
}

fn encode_nodes(nodes: &[Node]) -> Value {
    Value::Array(nodes.iter().map(encode_node).collect())
}

fn encode_node(node: &Node) -> Value {
    let mut object = Object::new();
    object.insert("type".to_string(), Value::from(node.type_name()));

    let mut attrs = Object::new();
    let mut is_container = true;
    match node {
        Node::Heading(heading) => {
            attrs.insert("level".to_string(), Value::from(heading.level));
        }
        Node::CodeBlock(block) => {
            if let Some(language) = &block.language {
                attrs.insert("language".to_string(), Value::from(language.as_str()));
            }
        }
        Node::Panel(panel) => {
            if let Some(panel_type) = &panel.panel_type {
                attrs.insert("panelType".to_string(), Value::from(panel_type.as_str()));
            }
        }
        Node::Expand(expand) => {
            attrs.insert("title".to_string(), Value::from(expand.title.as_str()));
        }
        Node::Media(media) => {
            is_container = false;
            insert_opt(&mut attrs, "id", media.id.as_deref());
            insert_opt(&mut attrs, "type", media.media_type.as_deref());
            insert_opt(&mut attrs, "alt", media.alt.as_deref());
            insert_opt(&mut attrs, "url", media.url.as_deref());
            if let Some(width) = media.width {
                attrs.insert("width".to_string(), Value::from(width));
            }
            if let Some(height) = media.height {
                attrs.insert("height".to_string(), Value::from(height));
            }
        }
        Node::Text(text) => {
            is_container = false;
            object.insert("text".to_string(), Value::from(text.text.as_str()));
        }
        Node::Emoji { short_name } => {
            is_container = false;
            attrs.insert("shortName".to_string(), Value::from(short_name.as_str()));
        }
        Node::Mention { text } => {
            is_container = false;
            attrs.insert("text".to_string(), Value::from(text.as_str()));
        }
        Node::Date { timestamp } => {
            is_container = false;
            attrs.insert("timestamp".to_string(), Value::from(timestamp.as_str()));
        }
        Node::InlineCard { url } => {
            is_container = false;
            attrs.insert("url".to_string(), Value::from(url.as_str()));
        }
        Node::Unknown(unknown) => {
            attrs = encode_attrs(&unknown.attrs);
            is_container = !unknown.content.is_empty();
        }
        Node::Rule | Node::HardBreak => is_container = false,
        _ => {}
    }

    if !attrs.is_empty() {
        object.insert("attrs".to_string(), Value::Object(attrs));
    }
    if is_container {
        object.insert("content".to_string(), encode_nodes(node.children()));
    }
    let marks = node.marks();
    if !marks.is_empty() {
        object.insert(
            "marks".to_string(),
            Value::Array(marks.iter().map(encode_mark).collect()),
        );
    }
    Value::Object(object)
}

fn encode_mark(mark: &Mark) -> Value {
    let mut object = Object::new();
    object.insert("type".to_string(), Value::from(mark.type_name()));
    let attrs = match mark {
        Mark::Link { href, title } => {
            let mut attrs = Object::new();
            insert_opt(&mut attrs, "href", href.as_deref());
            insert_opt(&mut attrs, "title", title.as_deref());
            attrs
        }
        Mark::Unknown { attrs, .. } => encode_attrs(attrs),
        _ => Object::new(),
    };
    if !attrs.is_empty() {
        object.insert("attrs".to_string(), Value::Object(attrs));
    }
    Value::Object(object)
}

fn encode_attrs(attrs: &Attrs) -> Object {
    attrs
        .iter()
        .map(|(key, scalar)| {
            let value = match scalar {
                Scalar::String(s) => Value::from(s.as_str()),
                Scalar::Integer(i) => Value::from(*i),
                Scalar::Float(f) => Number::from_f64(*f).map_or(Value::Null, Value::Number),
                Scalar::Bool(b) => Value::from(*b),
            };
            (key.clone(), value)
        })
        .collect()
}

fn insert_opt(object: &mut Object, key: &str, value: Option<&str>) {
    if let Some(value) = value {
        object.insert(key.to_string(), Value::from(value));
    }
}
