//! HTML rendering (tree → display markup)
//!
//! Walks the document tree and emits a styled HTML fragment wrapped in a single
//! `<div class="adf-content">` container. Rendering never fails: unknown nodes
//! contribute their children, unknown marks are dropped, and media that cannot
//! be resolved falls back to the raw node identifier.
//!
//! Every piece of literal text goes through [`escape_html`] before any markup
//! is attached to it.

use crate::common::escape::escape_html;
use crate::common::links::{is_web_url, trim_slashes};
use crate::ir::nodes::{Document, Mark, Media, Node};
use std::collections::BTreeMap;
use std::fmt::Write;

/// Filename → attachment identifier, as resolved by the host beforehand.
/// Ordered so that case-insensitive lookups always pick the same entry.
pub type AttachmentMap = BTreeMap<String, String>;

pub const DEFAULT_ATTACHMENT_SCHEME: &str = "jira-image";
pub const DEFAULT_IMAGE_WIDTH: i64 = 400;
pub const MAX_IMAGE_WIDTH: i64 = 600;

const ROOT_STYLE: &str = "font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; font-size: 14px; line-height: 1.5; color: #333;";
const LINK_STYLE: &str = "color: #0052CC;";
const CODE_STYLE: &str = "background: #f0f0f0; padding: 2px 4px; border-radius: 3px; font-family: monospace; font-size: 0.9em;";
const PRE_STYLE: &str = "margin: 0.5em 0; padding: 12px; background: #f5f5f5; border-radius: 6px; overflow-x: auto; font-family: SFMono-Regular, Monaco, monospace; font-size: 13px;";
const IMG_STYLE: &str = "max-width:100%;height:auto;border-radius:4px;";
const EXPAND_FALLBACK_TITLE: &str = "▼";

/// Options for HTML rendering
#[derive(Debug, Clone)]
pub struct HtmlOptions {
    /// Base URL of the source system; exposed to the host as `data-fallback`.
    pub base_url: String,
    /// Known attachments, keyed by filename.
    pub attachments: AttachmentMap,
    /// Scheme of the opaque media references (`<scheme>://<id>`).
    pub attachment_scheme: String,
    pub default_image_width: i64,
    pub max_image_width: i64,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            attachments: AttachmentMap::new(),
            attachment_scheme: DEFAULT_ATTACHMENT_SCHEME.to_string(),
            default_image_width: DEFAULT_IMAGE_WIDTH,
            max_image_width: MAX_IMAGE_WIDTH,
        }
    }
}

impl HtmlOptions {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_attachments(mut self, attachments: AttachmentMap) -> Self {
        self.attachments = attachments;
        self
    }

    pub fn with_attachment_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.attachment_scheme = scheme.into();
        self
    }

    pub fn with_image_widths(mut self, default_width: i64, max_width: i64) -> Self {
        self.default_image_width = default_width;
        self.max_image_width = max_width;
        self
    }

    /// Look up an attachment id by filename: exact match first, then the
    /// smallest key that matches case-insensitively.
    fn resolve_attachment(&self, filename: &str) -> Option<&str> {
        if let Some(id) = self.attachments.get(filename) {
            return Some(id);
        }
        let wanted = filename.to_lowercase();
        self.attachments
            .iter()
            .find(|(name, _)| name.to_lowercase() == wanted)
            .map(|(_, id)| id.as_str())
    }
}

/// Render a document to an HTML fragment.
///
/// An empty document renders as the empty string.
pub fn serialize_to_html(doc: &Document, options: &HtmlOptions) -> String {
    let renderer = HtmlRenderer { options };
    let blocks: Vec<String> = doc
        .content
        .iter()
        .map(|node| renderer.render(node))
        .filter(|html| !html.is_empty())
        .collect();
    if blocks.is_empty() {
        return String::new();
    }
    wrap_in_root(&blocks.join("\n"))
}

/// Wrap an already rendered fragment in the root container.
pub fn wrap_in_root(inner: &str) -> String {
    format!("<div class=\"adf-content\" style=\"{ROOT_STYLE}\">\n{inner}\n</div>")
}

struct HtmlRenderer<'a> {
    options: &'a HtmlOptions,
}

impl HtmlRenderer<'_> {
    fn render(&self, node: &Node) -> String {
        let mut out = String::new();
        self.render_into(&mut out, node);
        out
    }

    fn render_children(&self, nodes: &[Node]) -> String {
        let mut out = String::new();
        for node in nodes {
            self.render_into(&mut out, node);
        }
        out
    }

    fn render_into(&self, out: &mut String, node: &Node) {
        match node {
            Node::Paragraph(content) => {
                let inner = self.render_children(content);
                let inner = if inner.is_empty() { "<br>" } else { &inner };
                let _ = write!(out, "<p style='margin: 0 0 0.5em;'>{inner}</p>");
            }
            Node::Heading(heading) => {
                let level = heading.level.clamp(1, 6);
                let _ = write!(
                    out,
                    "<h{level} style='margin: 0.75em 0 0.25em; font-size: {}em;'>{}</h{level}>",
                    heading_size(level),
                    self.render_children(&heading.content)
                );
            }
            Node::BulletList(items) => {
                let _ = write!(
                    out,
                    "<ul style='margin: 0.5em 0; padding-left: 1.5em;'>{}</ul>",
                    self.render_children(items)
                );
            }
            Node::OrderedList(items) => {
                // No start attribute: items are always numbered from 1.
                let _ = write!(
                    out,
                    "<ol style='margin: 0.5em 0; padding-left: 1.5em;'>{}</ol>",
                    self.render_children(items)
                );
            }
            Node::ListItem(content) => {
                let _ = write!(
                    out,
                    "<li style='margin: 0.25em 0;'>{}</li>",
                    self.render_children(content)
                );
            }
            Node::Blockquote(content) => {
                let _ = write!(
                    out,
                    "<blockquote style='margin: 0.5em 0; padding-left: 1em; border-left: 4px solid #ccc; color: #666;'>{}</blockquote>",
                    self.render_children(content)
                );
            }
            Node::CodeBlock(block) => {
                let language = match &block.language {
                    Some(lang) if !lang.is_empty() => {
                        format!(" data-language=\"{}\"", escape_html(lang))
                    }
                    _ => String::new(),
                };
                let mut code = String::new();
                collect_code_text(&block.content, &mut code);
                let _ = write!(
                    out,
                    "<pre style='{PRE_STYLE}'{language}><code>{}</code></pre>",
                    escape_html(&code)
                );
            }
            Node::Rule => {
                out.push_str("<hr style='margin: 1em 0; border: none; border-top: 1px solid #ddd;'>");
            }
            Node::Panel(panel) => {
                let background = panel_background(panel.panel_type.as_deref());
                let _ = write!(
                    out,
                    "<div style='margin: 0.5em 0; padding: 12px; background: {background}; border-radius: 6px;'>{}</div>",
                    self.render_children(&panel.content)
                );
            }
            Node::Table(rows) => {
                let _ = write!(
                    out,
                    "<table style='border-collapse: collapse; width: 100%; margin: 0.5em 0;'><tbody>{}</tbody></table>",
                    self.render_children(rows)
                );
            }
            Node::TableRow(cells) => {
                let _ = write!(out, "<tr>{}</tr>", self.render_children(cells));
            }
            Node::TableHeader(content) => self.render_cell(out, "th", content),
            Node::TableCell(content) => self.render_cell(out, "td", content),
            Node::MediaSingle(content) | Node::MediaGroup(content) => {
                let _ = write!(
                    out,
                    "<div style='margin: 0.5em 0;'>{}</div>",
                    self.render_children(content)
                );
            }
            Node::Media(media) => self.render_media(out, media),
            Node::Expand(expand) => {
                let title = if expand.title.is_empty() {
                    EXPAND_FALLBACK_TITLE
                } else {
                    &expand.title
                };
                let _ = write!(
                    out,
                    "<details style='margin: 0.5em 0;'><summary style='cursor: pointer; font-weight: 600;'>{}</summary><div style='margin-top: 0.5em;'>{}</div></details>",
                    escape_html(title),
                    self.render_children(&expand.content)
                );
            }
            Node::Text(text) => {
                if !text.text.is_empty() {
                    out.push_str(&wrap_marks(escape_html(&text.text), &text.marks));
                }
            }
            Node::HardBreak => out.push_str("<br>"),
            Node::Emoji { short_name } => {
                if !short_name.is_empty() {
                    let _ = write!(
                        out,
                        "<span title=\"{}\">{}</span>",
                        escape_html(short_name),
                        escape_html(emoji_for(short_name))
                    );
                }
            }
            Node::Mention { text } => {
                if !text.is_empty() {
                    let _ = write!(
                        out,
                        "<span style='background: #E3FCEF; padding: 1px 4px; border-radius: 3px;'>@{}</span>",
                        escape_html(text)
                    );
                }
            }
            Node::Date { timestamp } => {
                if !timestamp.is_empty() {
                    let _ = write!(out, "<span>{}</span>", escape_html(timestamp));
                }
            }
            Node::InlineCard { url } => {
                if !url.is_empty() {
                    let url = escape_html(url);
                    let _ = write!(out, "<a href=\"{url}\" style='{LINK_STYLE}'>{url}</a>");
                }
            }
            Node::Unknown(unknown) => {
                tracing::debug!(node_type = %unknown.node_type, "rendering children of unknown node");
                let inner = self.render_children(&unknown.content);
                if !inner.is_empty() {
                    out.push_str(&wrap_marks(inner, &unknown.marks));
                }
            }
        }
    }

    fn render_cell(&self, out: &mut String, tag: &str, content: &[Node]) {
        let _ = write!(
            out,
            "<{tag} style='border: 1px solid #ddd; padding: 8px;'>{}</{tag}>",
            self.render_children(content)
        );
    }

    fn render_media(&self, out: &mut String, media: &Media) {
        let href = media.link_href();
        let alt = media.alt.as_deref().unwrap_or("image");

        let external = if media.is_link() {
            media.url.as_deref().or(href).filter(|url| is_web_url(url))
        } else {
            None
        };
        let src = match external {
            Some(url) => url.to_string(),
            None => {
                let resolved = media
                    .alt
                    .as_deref()
                    .and_then(|name| self.options.resolve_attachment(name));
                let id = match resolved {
                    Some(id) => id,
                    None => {
                        tracing::debug!(media_id = ?media.id, alt, "media not in attachment map, using raw id");
                        media.id.as_deref().unwrap_or("")
                    }
                };
                if id.is_empty() {
                    tracing::debug!("skipping media without id or url");
                    return;
                }
                format!("{}://{id}", self.options.attachment_scheme)
            }
        };

        let width = media
            .width
            .unwrap_or(self.options.default_image_width)
            .min(self.options.max_image_width);

        if let Some(href) = href {
            let _ = write!(out, "<a href=\"{}\" target=\"_blank\">", escape_html(href));
        }
        let _ = write!(
            out,
            "<img src=\"{}\" alt=\"{}\" width=\"{width}\" style='{IMG_STYLE}' data-fallback=\"{}\" />",
            escape_html(&src),
            escape_html(alt),
            escape_html(trim_slashes(&self.options.base_url))
        );
        if href.is_some() {
            out.push_str("</a>");
        }
    }
}

/// Wrap already escaped content in the markup for each mark, walking the
/// stored marks back to front so the last mark ends up innermost.
fn wrap_marks(content: String, marks: &[Mark]) -> String {
    let mut result = content;
    for mark in marks.iter().rev() {
        result = match mark {
            Mark::Strong => format!("<strong>{result}</strong>"),
            Mark::Em => format!("<em>{result}</em>"),
            Mark::Underline => format!("<u>{result}</u>"),
            Mark::Strike => format!("<s>{result}</s>"),
            Mark::Code => format!("<code style='{CODE_STYLE}'>{result}</code>"),
            Mark::Link { href, title } => {
                let href = escape_html(href.as_deref().unwrap_or("#"));
                let title = match title.as_deref() {
                    Some(t) if !t.is_empty() => format!(" title=\"{}\"", escape_html(t)),
                    _ => String::new(),
                };
                format!("<a href=\"{href}\"{title} style='{LINK_STYLE}'>{result}</a>")
            }
            Mark::Unknown { mark_type, .. } => {
                tracing::debug!(mark_type = %mark_type, "dropping unknown mark");
                result
            }
        };
    }
    result
}

fn collect_code_text(nodes: &[Node], out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(&text.text),
            Node::HardBreak => out.push('\n'),
            other => collect_code_text(other.children(), out),
        }
    }
}

fn heading_size(level: u8) -> &'static str {
    match level {
        1 => "1.25",
        2 => "1.1",
        3 => "1.0",
        _ => "0.9",
    }
}

/// Background colour for a panel type; anything unrecognised is neutral.
pub fn panel_background(panel_type: Option<&str>) -> &'static str {
    match panel_type {
        Some("info") => "#deebff",
        Some("note") => "#eae6ff",
        Some("success") => "#d3fcef",
        Some("warning") => "#fffae6",
        Some("error") => "#ffebe6",
        _ => "#f4f5f7",
    }
}

/// Emoji for a short name, or the short name itself when unknown.
pub fn emoji_for(short_name: &str) -> &str {
    match short_name {
        ":smile:" => "😊",
        ":sad:" => "😢",
        ":+1:" => "👍",
        ":-1:" => "👎",
        ":heart:" => "❤️",
        ":check:" => "✅",
        ":x:" => "❌",
        ":warning:" => "⚠️",
        ":bulb:" => "💡",
        other => other,
    }
}
