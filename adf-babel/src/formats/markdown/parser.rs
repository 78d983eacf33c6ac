//! Markdown parsing (Markdown → tree)
//!
//! A two-level recursive-descent parser. The block scanner walks trimmed lines
//! and tries, in order: blank line, heading, thematic break, standalone image,
//! blockquote, fenced code, bullet list, ordered list and finally paragraph.
//! Paragraph text, heading text and list item text go through the inline
//! scanner.
//!
//! Parsing never fails. An unclosed delimiter is emitted as literal text and
//! the scanner moves on by one character, so any input terminates.
//!
//! Images are never turned into media nodes: a standalone image becomes a
//! paragraph holding a link to the image URL, and an inline image becomes the
//! literal text `[alt](url)` carrying a link mark.

use crate::common::escape::is_escapable;
use crate::common::links::is_web_url;
use crate::ir::nodes::{Document, Mark, Node};

/// Parse Markdown into a document. Empty input yields one empty paragraph.
pub fn parse_from_markdown(source: &str) -> Document {
    let lines: Vec<&str> = source
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();
    let mut content = parse_blocks(&lines);
    if content.is_empty() {
        content.push(Node::paragraph(Vec::new()));
    }
    Document::new(content)
}

fn parse_blocks(lines: &[&str]) -> Vec<Node> {
    let mut blocks = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i].trim();

        if line.is_empty() {
            i += 1;
            continue;
        }

        if let Some(level) = heading_level(line) {
            let text = line[level..].trim();
            blocks.push(Node::heading(level as i64, parse_inline(text)));
            i += 1;
            continue;
        }

        if is_rule(line) {
            blocks.push(Node::Rule);
            i += 1;
            continue;
        }

        if let Some((alt, url)) = block_image(line) {
            let text = if alt.is_empty() { url.clone() } else { alt };
            blocks.push(Node::paragraph(vec![Node::marked_text(
                text,
                vec![Mark::link(url)],
            )]));
            i += 1;
            continue;
        }

        if line.starts_with('>') {
            let mut quoted = Vec::new();
            while i < lines.len() {
                let Some(rest) = lines[i].trim().strip_prefix('>') else {
                    break;
                };
                quoted.push(rest.trim().to_string());
                i += 1;
            }
            let quoted: Vec<&str> = quoted.iter().map(String::as_str).collect();
            let mut content = parse_blocks(&quoted);
            if content.is_empty() {
                content.push(Node::paragraph(Vec::new()));
            }
            blocks.push(Node::Blockquote(content));
            continue;
        }

        if let Some(info) = line.strip_prefix("```") {
            let language = info.trim();
            let language = (!language.is_empty()).then(|| language.to_string());
            let mut code = Vec::new();
            i += 1;
            while i < lines.len() && !lines[i].trim().starts_with("```") {
                code.push(lines[i]);
                i += 1;
            }
            // Skip the closing fence; an unclosed fence runs to the end.
            if i < lines.len() {
                i += 1;
            }
            blocks.push(Node::code_block(language, code.join("\n")));
            continue;
        }

        if let Some(marker) = bullet_marker(line) {
            let mut items = Vec::new();
            while i < lines.len() {
                let item = lines[i].trim();
                if bullet_marker(item) != Some(marker) {
                    break;
                }
                items.push(Node::list_item(parse_inline(item[2..].trim())));
                i += 1;
            }
            blocks.push(Node::BulletList(items));
            continue;
        }

        if ordered_item(line).is_some() {
            let mut items = Vec::new();
            while i < lines.len() {
                let Some(text) = ordered_item(lines[i].trim()) else {
                    break;
                };
                items.push(Node::list_item(parse_inline(text)));
                i += 1;
            }
            blocks.push(Node::OrderedList(items));
            continue;
        }

        let mut paragraph = vec![line];
        i += 1;
        while i < lines.len() {
            let next = lines[i].trim();
            if starts_block(next) {
                break;
            }
            paragraph.push(next);
            i += 1;
        }
        blocks.push(Node::paragraph(parse_inline(&paragraph.join(" "))));
    }

    blocks
}

/// Whether a trimmed line ends a running paragraph.
pub(crate) fn starts_block(line: &str) -> bool {
    line.is_empty()
        || heading_level(line).is_some()
        || is_rule(line)
        || line.starts_with('>')
        || line.starts_with("```")
        || bullet_marker(line).is_some()
        || ordered_item(line).is_some()
        || block_image(line).is_some()
}

/// Number of leading `#` when they are followed by whitespace or end the
/// line. The caller clamps the level.
fn heading_level(line: &str) -> Option<usize> {
    let hashes = line.bytes().take_while(|b| *b == b'#').count();
    if hashes == 0 {
        return None;
    }
    match line[hashes..].chars().next() {
        None | Some(' ') | Some('\t') => Some(hashes),
        Some(_) => None,
    }
}

/// Three or more of the same `-`, `*` or `_`.
fn is_rule(line: &str) -> bool {
    let mut chars = line.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    matches!(first, '-' | '*' | '_') && line.chars().count() >= 3 && chars.all(|c| c == first)
}

fn bullet_marker(line: &str) -> Option<char> {
    let mut chars = line.chars();
    match (chars.next(), chars.next()) {
        (Some(marker @ ('-' | '*' | '+')), Some(' ')) => Some(marker),
        _ => None,
    }
}

/// Text after `N. ` or `N) `.
fn ordered_item(line: &str) -> Option<&str> {
    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let rest = line[digits..]
        .strip_prefix('.')
        .or_else(|| line[digits..].strip_prefix(')'))?;
    rest.strip_prefix(' ').map(str::trim)
}

/// `![alt](url)` spanning the whole line with an absolute web URL.
fn block_image(line: &str) -> Option<(String, String)> {
    if !line.starts_with("![") {
        return None;
    }
    let chars: Vec<char> = line.chars().collect();
    let (alt, url, end) = scan_link(&chars, 1)?;
    (end == chars.len() && is_web_url(&url)).then_some((alt, url))
}

/// Parse inline Markdown into text nodes with marks.
pub(crate) fn parse_inline(text: &str) -> Vec<Node> {
    let chars: Vec<char> = text.chars().collect();
    let mut out = InlineBuilder::default();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let next = chars.get(i + 1).copied();

        if c == '\\' {
            if let Some(escaped) = next.filter(|n| is_escapable(*n)) {
                out.push_char(escaped);
                i += 2;
                continue;
            }
        }

        if c == '[' {
            if let Some((label, url, end)) = scan_link(&chars, i) {
                let label = if label.is_empty() { url.clone() } else { label };
                out.push_marked(label, vec![Mark::link(url)]);
                i = end;
                continue;
            }
        }

        if c == '!' && next == Some('[') {
            if let Some((alt, url, end)) = scan_link(&chars, i + 1) {
                out.push_marked(format!("[{alt}]({url})"), vec![Mark::link(url)]);
                i = end;
                continue;
            }
        }

        if c == '`' {
            if let Some((code, end)) = scan_code(&chars, i) {
                out.push_marked(code, vec![Mark::Code]);
                i = end;
                continue;
            }
        }

        if (c == '*' || c == '_') && next == Some(c) {
            if let Some((inner, end)) = scan_delimited(&chars, i + 2, &[c, c]) {
                out.push_marked(inner, vec![Mark::Strong]);
                i = end;
                continue;
            }
        }

        if c == '*' || c == '_' {
            if let Some((inner, end)) = scan_delimited(&chars, i + 1, &[c]) {
                out.push_marked(inner, vec![Mark::Em]);
                i = end;
                continue;
            }
        }

        // Plain run. A special character that opened nothing is taken literally.
        out.push_char(c);
        i += 1;
        while i < chars.len() && !is_inline_special(chars[i]) {
            out.push_char(chars[i]);
            i += 1;
        }
    }

    out.finish()
}

fn is_inline_special(c: char) -> bool {
    matches!(c, '[' | '`' | '*' | '_' | '!' | '\\')
}

/// `[text](url)` starting at `start` (which must be `[`). Backslash escapes
/// are honoured in both parts. Returns text, url and the index after `)`.
fn scan_link(chars: &[char], start: usize) -> Option<(String, String, usize)> {
    if chars.get(start) != Some(&'[') {
        return None;
    }
    let (text, close) = scan_until(chars, start + 1, ']')?;
    if chars.get(close + 1) != Some(&'(') {
        return None;
    }
    let (url, end) = scan_until(chars, close + 2, ')')?;
    Some((text, url, end + 1))
}

/// Unescaped text up to the first unescaped `stop`, and the index of `stop`.
fn scan_until(chars: &[char], from: usize, stop: char) -> Option<(String, usize)> {
    let mut text = String::new();
    let mut i = from;
    while i < chars.len() {
        match chars[i] {
            '\\' if chars.get(i + 1).is_some_and(|n| is_escapable(*n)) => {
                text.push(chars[i + 1]);
                i += 2;
            }
            c if c == stop => return Some((text, i)),
            c => {
                text.push(c);
                i += 1;
            }
        }
    }
    None
}

/// Code span content is raw: no escapes, no nesting.
fn scan_code(chars: &[char], start: usize) -> Option<(String, usize)> {
    let close = (start + 1..chars.len()).find(|&i| chars[i] == '`')?;
    if close == start + 1 {
        return None;
    }
    Some((chars[start + 1..close].iter().collect(), close + 1))
}

/// Non-empty content between `from` and the next unescaped `delimiter`.
/// The content is taken literally apart from backslash escapes.
fn scan_delimited(chars: &[char], from: usize, delimiter: &[char]) -> Option<(String, usize)> {
    let mut i = from;
    while i < chars.len() {
        if chars[i] == '\\' && chars.get(i + 1).is_some_and(|n| is_escapable(*n)) {
            i += 2;
            continue;
        }
        if chars[i..].starts_with(delimiter) {
            if i == from {
                return None;
            }
            return Some((unescape(&chars[from..i]), i + delimiter.len()));
        }
        i += 1;
    }
    None
}

fn unescape(chars: &[char]) -> String {
    let mut out = String::with_capacity(chars.len());
    let mut i = 0;
    while i < chars.len() {
        if chars[i] == '\\' && chars.get(i + 1).is_some_and(|n| is_escapable(*n)) {
            out.push(chars[i + 1]);
            i += 2;
        } else {
            out.push(chars[i]);
            i += 1;
        }
    }
    out
}

/// Collects inline nodes, merging consecutive plain characters into one run.
#[derive(Default)]
struct InlineBuilder {
    nodes: Vec<Node>,
    plain: String,
}

impl InlineBuilder {
    fn push_char(&mut self, c: char) {
        self.plain.push(c);
    }

    fn push_marked(&mut self, text: String, marks: Vec<Mark>) {
        self.flush();
        self.nodes.push(Node::marked_text(text, marks));
    }

    fn flush(&mut self) {
        if !self.plain.is_empty() {
            self.nodes.push(Node::text(std::mem::take(&mut self.plain)));
        }
    }

    fn finish(mut self) -> Vec<Node> {
        self.flush();
        self.nodes
    }
}
