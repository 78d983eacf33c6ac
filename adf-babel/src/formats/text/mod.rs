//! Plain text format
//!
//! Issues keep a plain-text copy of their description next to the tree. Export
//! flattens the tree to one line per block; import treats every blank-line
//! separated chunk as a literal paragraph, with no Markdown interpretation.

use crate::error::FormatError;
use crate::format::Format;
use crate::ir::nodes::{Document, Node};

/// Format implementation for plain text
pub struct TextFormat;

impl Format for TextFormat {
    fn name(&self) -> &str {
        "text"
    }

    fn description(&self) -> &str {
        "Plain text"
    }

    fn file_extensions(&self) -> &[&str] {
        &["txt"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, FormatError> {
        Ok(parse_plain_text(source))
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(to_plain_text(doc))
    }
}

/// Descendant text, one line per block.
pub fn to_plain_text(doc: &Document) -> String {
    let mut lines = Vec::new();
    block_lines(&doc.content, &mut lines);
    lines.join("\n")
}

/// Blank-line separated chunks become paragraphs; line breaks inside a chunk
/// become hard breaks.
pub fn parse_plain_text(source: &str) -> Document {
    let mut content = Vec::new();
    let mut chunk: Vec<&str> = Vec::new();
    for line in source.lines().chain(std::iter::once("")) {
        if line.trim().is_empty() {
            if !chunk.is_empty() {
                content.push(literal_paragraph(&chunk));
                chunk.clear();
            }
        } else {
            chunk.push(line.trim_end());
        }
    }
    if content.is_empty() {
        content.push(Node::paragraph(Vec::new()));
    }
    Document::new(content)
}

fn literal_paragraph(lines: &[&str]) -> Node {
    let mut inline = Vec::with_capacity(lines.len() * 2);
    for (index, line) in lines.iter().enumerate() {
        if index > 0 {
            inline.push(Node::HardBreak);
        }
        inline.push(Node::text(*line));
    }
    Node::paragraph(inline)
}

fn block_lines(nodes: &[Node], lines: &mut Vec<String>) {
    for node in nodes {
        let line = match node {
            Node::Paragraph(content) => inline_text(content),
            Node::Heading(heading) => inline_text(&heading.content),
            Node::CodeBlock(block) => inline_text(&block.content),
            Node::Rule => continue,
            Node::TableRow(cells) => cells
                .iter()
                .map(|cell| cell_text(cell.children()))
                .collect::<Vec<_>>()
                .join("\t"),
            Node::Text(_)
            | Node::HardBreak
            | Node::Emoji { .. }
            | Node::Mention { .. }
            | Node::Date { .. }
            | Node::InlineCard { .. }
            | Node::Media(_) => inline_text(std::slice::from_ref(node)),
            container => {
                block_lines(container.children(), lines);
                continue;
            }
        };
        if !line.trim().is_empty() {
            lines.push(line);
        }
    }
}

fn cell_text(blocks: &[Node]) -> String {
    blocks
        .iter()
        .map(|block| inline_text(std::slice::from_ref(block)))
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn inline_text(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(&text.text),
            Node::HardBreak => out.push('\n'),
            Node::Emoji { short_name } => out.push_str(short_name),
            Node::Mention { text } => {
                out.push('@');
                out.push_str(text);
            }
            Node::Date { timestamp } => out.push_str(timestamp),
            Node::InlineCard { url } => out.push_str(url),
            Node::Media(media) => out.push_str(media.alt.as_deref().unwrap_or("")),
            other => out.push_str(&inline_text(other.children())),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::nodes::Mark;

    #[test]
    fn blocks_become_lines() {
        let doc = Document::new(vec![
            Node::heading(1, vec![Node::text("Title")]),
            Node::paragraph(vec![
                Node::text("Hi "),
                Node::marked_text("there", vec![Mark::Strong]),
            ]),
            Node::Rule,
            Node::BulletList(vec![
                Node::list_item(vec![Node::text("one")]),
                Node::list_item(vec![Node::text("two")]),
            ]),
            Node::Table(vec![Node::TableRow(vec![
                Node::TableCell(vec![Node::paragraph(vec![Node::text("a")])]),
                Node::TableCell(vec![Node::paragraph(vec![Node::text("b")])]),
            ])]),
        ]);
        assert_eq!(to_plain_text(&doc), "Title\nHi there\none\ntwo\na\tb");
        assert_eq!(doc.plain_text(), to_plain_text(&doc));
    }

    #[test]
    fn chunks_become_literal_paragraphs() {
        let doc = parse_plain_text("**not bold**\nsecond line\n\n\nnext");
        assert_eq!(
            doc.content,
            vec![
                Node::paragraph(vec![
                    Node::text("**not bold**"),
                    Node::HardBreak,
                    Node::text("second line"),
                ]),
                Node::paragraph(vec![Node::text("next")]),
            ]
        );
        assert_eq!(parse_plain_text("").content, vec![Node::paragraph(vec![])]);
    }
}
