//! Markdown serialization (tree → Markdown)
//!
//! Walks the tree the same way the HTML renderer does but emits Markdown
//! tokens. Top-level blocks are separated by a blank line; list items and
//! table rows by a single newline.
//!
//! Inline text is written unescaped when re-parsing the result yields the same
//! inline nodes. Otherwise every special character in plain text is
//! backslash-escaped (see [`escape_markdown`]). This keeps ordinary prose
//! readable while the parser still reads back exactly what was rendered.
//! Paragraph lines that would open a block (`- x`, `1. x`, `> x`, `# x`, a
//! fence or a rule) get their leading marker escaped, and link destinations
//! escape their parentheses.
//!
//! Lossy spots: underline has no Markdown form and is dropped, panels and
//! expands are flattened to their content, and media without an absolute URL
//! keep only their alt text.

use super::parser::{parse_inline, starts_block};
use crate::common::escape::{escape_link_destination, escape_markdown};
use crate::common::links::is_web_url;
use crate::ir::nodes::{Document, Mark, Media, Node, Text};

/// Options for Markdown rendering
#[derive(Debug, Clone, PartialEq)]
pub struct MarkdownOptions {
    /// Bullet character for unordered lists: `-`, `*` or `+`.
    pub bullet_marker: char,
}

impl Default for MarkdownOptions {
    fn default() -> Self {
        Self { bullet_marker: '-' }
    }
}

impl MarkdownOptions {
    /// Use `marker` for bullets; anything but `-`, `*` or `+` keeps `-`.
    pub fn with_bullet_marker(mut self, marker: char) -> Self {
        self.bullet_marker = match marker {
            '-' | '*' | '+' => marker,
            _ => '-',
        };
        self
    }
}

/// Serialize a document to Markdown.
pub fn serialize_to_markdown(doc: &Document, options: &MarkdownOptions) -> String {
    let renderer = MarkdownRenderer { options };
    renderer.blocks(&doc.content, "\n\n")
}

struct MarkdownRenderer<'a> {
    options: &'a MarkdownOptions,
}

impl MarkdownRenderer<'_> {
    fn blocks(&self, nodes: &[Node], separator: &str) -> String {
        nodes
            .iter()
            .filter_map(|node| self.block(node))
            .filter(|md| !md.is_empty())
            .collect::<Vec<_>>()
            .join(separator)
    }

    fn block(&self, node: &Node) -> Option<String> {
        let markdown = match node {
            Node::Paragraph(content) => self.paragraph(content),
            Node::Heading(heading) => {
                let hashes = "#".repeat(usize::from(heading.level.clamp(1, 6)));
                format!("{hashes} {}", self.inline_content(&heading.content))
            }
            Node::BulletList(items) => {
                let marker = self.options.bullet_marker.to_string();
                items
                    .iter()
                    .map(|item| self.list_item(item, &marker))
                    .collect::<Vec<_>>()
                    .join("\n")
            }
            Node::OrderedList(items) => items
                .iter()
                .enumerate()
                .map(|(index, item)| self.list_item(item, &format!("{}.", index + 1)))
                .collect::<Vec<_>>()
                .join("\n"),
            Node::ListItem(content) => self.blocks(content, "\n"),
            Node::Blockquote(content) => {
                let inner = self.blocks(content, "\n\n");
                if inner.is_empty() {
                    ">".to_string()
                } else {
                    inner
                        .lines()
                        .map(|line| {
                            if line.is_empty() {
                                ">".to_string()
                            } else {
                                format!("> {line}")
                            }
                        })
                        .collect::<Vec<_>>()
                        .join("\n")
                }
            }
            Node::CodeBlock(block) => {
                let language = block.language.as_deref().unwrap_or("");
                format!("```{language}\n{}\n```", raw_text(&block.content))
            }
            Node::Rule => "---".to_string(),
            Node::Panel(panel) => self.blocks(&panel.content, "\n\n"),
            Node::Expand(expand) => self.blocks(&expand.content, "\n\n"),
            Node::Table(rows) => self.table(rows),
            Node::MediaSingle(content) | Node::MediaGroup(content) => self.blocks(content, "\n"),
            Node::Media(media) => media_markdown(media),
            Node::Text(_)
            | Node::HardBreak
            | Node::Emoji { .. }
            | Node::Mention { .. }
            | Node::Date { .. }
            | Node::InlineCard { .. } => self.inline_content(std::slice::from_ref(node)),
            Node::Unknown(unknown) => {
                tracing::debug!(
                    node_type = %unknown.node_type,
                    "rendering children of unknown node"
                );
                self.blocks(&unknown.content, "\n\n")
            }
            Node::TableRow(content) | Node::TableHeader(content) | Node::TableCell(content) => {
                self.blocks(content, "\n\n")
            }
        };
        if markdown.is_empty() {
            None
        } else {
            Some(markdown)
        }
    }

    /// `- first line` followed by continuation lines indented two spaces.
    fn list_item(&self, item: &Node, prefix: &str) -> String {
        let inner = match item {
            Node::ListItem(content) => self.blocks(content, "\n"),
            other => self.block(other).unwrap_or_default(),
        };
        let mut lines = inner.lines().filter(|line| !line.is_empty());
        let Some(first) = lines.next() else {
            return prefix.to_string();
        };
        let mut out = format!("{prefix} {first}");
        for line in lines {
            out.push_str("\n  ");
            out.push_str(line);
        }
        out
    }

    fn table(&self, rows: &[Node]) -> String {
        let rows: Vec<Vec<String>> = rows
            .iter()
            .map(|row| {
                row.children()
                    .iter()
                    .map(|cell| self.cell_text(cell).replace('|', "\\|"))
                    .collect::<Vec<_>>()
            })
            .filter(|cells| cells.iter().any(|cell| !cell.is_empty()))
            .collect();
        let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
        if columns == 0 {
            return String::new();
        }

        let line = |cells: &[String]| {
            let mut padded = cells.to_vec();
            padded.resize(columns, String::new());
            padded.join(" | ")
        };
        let mut out = vec![line(&rows[0]), vec!["---"; columns].join(" | ")];
        out.extend(rows[1..].iter().map(|cells| line(cells)));
        out.join("\n")
    }

    /// Inline text of a cell: each child block's inline content, space separated.
    fn cell_text(&self, cell: &Node) -> String {
        cell.children()
            .iter()
            .map(|child| match child {
                Node::Text(_)
                | Node::HardBreak
                | Node::Emoji { .. }
                | Node::Mention { .. }
                | Node::Date { .. }
                | Node::InlineCard { .. } => self.inline_content(std::slice::from_ref(child)),
                block => self.inline_content(block.children()),
            })
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn paragraph(&self, content: &[Node]) -> String {
        let markdown = self.inline_content(content);
        if content.iter().any(|node| matches!(node, Node::Media(_))) {
            return markdown;
        }
        markdown
            .split('\n')
            .map(escape_block_start)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Inline nodes, unescaped when that reads back identically.
    fn inline_content(&self, nodes: &[Node]) -> String {
        let plain = inlines(nodes, false);
        if reads_back_as(&plain, nodes) {
            plain
        } else {
            inlines(nodes, true)
        }
    }
}

fn inlines(nodes: &[Node], escape: bool) -> String {
    let mut out = String::new();
    for node in nodes {
        inline(&mut out, node, escape);
    }
    out
}

fn inline(out: &mut String, node: &Node, escape: bool) {
    match node {
        Node::Text(text) => {
            if !text.text.is_empty() {
                out.push_str(&wrap_marks(text_body(text, escape), &text.marks));
            }
        }
        Node::HardBreak => out.push('\n'),
        Node::Emoji { short_name } => out.push_str(short_name),
        Node::Mention { text } => {
            if !text.is_empty() {
                out.push('@');
                out.push_str(text);
            }
        }
        Node::Date { timestamp } => out.push_str(timestamp),
        Node::InlineCard { url } => {
            if !url.is_empty() {
                let label = if escape {
                    escape_markdown(url)
                } else {
                    url.clone()
                };
                out.push_str(&format!("[{label}]({})", escape_link_destination(url)));
            }
        }
        Node::Media(media) => out.push_str(&media_markdown(media)),
        Node::Unknown(unknown) => {
            let inner = inlines(&unknown.content, escape);
            if !inner.is_empty() {
                out.push_str(&wrap_marks(inner, &unknown.marks));
            }
        }
        other => out.push_str(&inlines(other.children(), escape)),
    }
}

/// Text under a code mark is never escaped; the parser reads code spans raw.
fn text_body(text: &Text, escape: bool) -> String {
    if escape && !text.marks.contains(&Mark::Code) {
        escape_markdown(&text.text)
    } else {
        text.text.clone()
    }
}

fn wrap_marks(content: String, marks: &[Mark]) -> String {
    let mut result = content;
    for mark in marks.iter().rev() {
        result = match mark {
            Mark::Strong => format!("**{result}**"),
            Mark::Em => format!("*{result}*"),
            Mark::Strike => format!("~~{result}~~"),
            Mark::Code => format!("`{result}`"),
            Mark::Link { href, .. } => {
                let href = escape_link_destination(href.as_deref().unwrap_or(""));
                format!("[{result}]({href})")
            }
            Mark::Underline => result,
            Mark::Unknown { mark_type, .. } => {
                tracing::debug!(mark_type = %mark_type, "dropping unknown mark");
                result
            }
        };
    }
    result
}

/// Whether parsing `rendered` gives back `nodes` (adjacent runs merged).
fn reads_back_as(rendered: &str, nodes: &[Node]) -> bool {
    if !nodes.iter().all(|node| matches!(node, Node::Text(_))) {
        return false;
    }
    merge_runs(parse_inline(rendered)) == merge_runs(nodes.to_vec())
}

/// Escape the marker of a line the block scanner would not read as paragraph
/// text: the first character, or the `.`/`)` after the digits of `1. x`.
fn escape_block_start(line: &str) -> String {
    let body = line.trim_start();
    if body.is_empty() || !starts_block(body.trim_end()) {
        return line.to_string();
    }
    let indent = &line[..line.len() - body.len()];
    let at = body.bytes().take_while(u8::is_ascii_digit).count();
    format!("{indent}{}\\{}", &body[..at], &body[at..])
}

fn merge_runs(nodes: Vec<Node>) -> Vec<Node> {
    let mut merged: Vec<Node> = Vec::with_capacity(nodes.len());
    for node in nodes {
        if let Node::Text(text) = &node {
            if text.text.is_empty() {
                continue;
            }
            if let Some(Node::Text(last)) = merged.last_mut() {
                if last.marks == text.marks {
                    last.text.push_str(&text.text);
                    continue;
                }
            }
        }
        merged.push(node);
    }
    merged
}

fn raw_text(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(&text.text),
            Node::HardBreak => out.push('\n'),
            other => out.push_str(&raw_text(other.children())),
        }
    }
    out
}

fn media_markdown(media: &Media) -> String {
    let alt = escape_markdown(media.alt.as_deref().unwrap_or("image"));
    let href = media.link_href().filter(|href| !href.is_empty());
    let url = match media.url.as_deref().filter(|url| !url.is_empty()) {
        Some(url) => Some(url),
        None if media.is_link() => href,
        None => None,
    };
    let image = match url.filter(|url| is_web_url(url)) {
        Some(url) => format!("![{alt}]({})", escape_link_destination(url)),
        None => format!("![{alt}]"),
    };
    match href {
        Some(href) => format!("[{image}]({})", escape_link_destination(href)),
        None => image,
    }
}
