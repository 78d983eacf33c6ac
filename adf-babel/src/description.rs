//! Issue descriptions and the choice between their stored representations
//!
//! An issue may carry its description in up to three forms: the ADF tree, a
//! server-rendered HTML copy for older issues, and plain text. Hosts always
//! prefer the tree, fall back to the HTML through the legacy converter, and
//! use the plain text as a last resort. A saved edit replaces all three with
//! values derived from the new tree.

use crate::common::escape::escape_html;
use crate::formats::html::legacy::html_to_markdown;
use crate::formats::html::serializer::{serialize_to_html, wrap_in_root, HtmlOptions};
use crate::formats::markdown::parser::parse_from_markdown;
use crate::formats::markdown::serializer::{serialize_to_markdown, MarkdownOptions};
use crate::ir::json::is_adf_document;
use crate::ir::nodes::Document;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The stored forms of an issue description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IssueDescription {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adf: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Which stored form an edit buffer was seeded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedSource {
    Adf,
    Html,
    Text,
    Empty,
}

impl SeedSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeedSource::Adf => "adf",
            SeedSource::Html => "html",
            SeedSource::Text => "text",
            SeedSource::Empty => "empty",
        }
    }
}

/// Markdown to put in the editor, and where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSeed {
    pub source: SeedSource,
    pub markdown: String,
}

impl IssueDescription {
    pub fn from_adf(adf: Value) -> Self {
        Self {
            adf: Some(adf),
            ..Self::default()
        }
    }

    pub fn with_html(mut self, html: impl Into<String>) -> Self {
        self.html = Some(html.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// The decoded tree, if the stored ADF value is a document at all.
    pub fn document(&self) -> Option<Document> {
        let value = self.adf.as_ref()?;
        if !is_adf_document(value) {
            tracing::debug!("stored adf is not a document root, treating it as absent");
            return None;
        }
        Some(Document::from_value(value))
    }

    /// Seed an edit buffer: tree first, then legacy markup, then raw text.
    ///
    /// A form that yields no Markdown at all counts as absent.
    pub fn edit_seed(&self, options: &MarkdownOptions) -> EditSeed {
        if let Some(doc) = self.document() {
            let markdown = serialize_to_markdown(&doc, options);
            if !markdown.is_empty() {
                return EditSeed {
                    source: SeedSource::Adf,
                    markdown,
                };
            }
        }
        if let Some(html) = non_blank(&self.html) {
            tracing::debug!("seeding editor from legacy html");
            return EditSeed {
                source: SeedSource::Html,
                markdown: html_to_markdown(html),
            };
        }
        if let Some(text) = non_blank(&self.text) {
            tracing::debug!("seeding editor from plain text");
            return EditSeed {
                source: SeedSource::Text,
                markdown: text.to_string(),
            };
        }
        EditSeed {
            source: SeedSource::Empty,
            markdown: String::new(),
        }
    }

    /// Markup for display, following the same preference order as
    /// [`IssueDescription::edit_seed`]. Plain text is escaped and its line
    /// breaks kept.
    pub fn display_html(&self, options: &HtmlOptions) -> String {
        if let Some(doc) = self.document() {
            let html = serialize_to_html(&doc, options);
            if !html.is_empty() {
                return html;
            }
        }
        if let Some(html) = non_blank(&self.html) {
            return wrap_in_root(html);
        }
        if let Some(text) = non_blank(&self.text) {
            return wrap_in_root(&escape_html(text).replace('\n', "<br>"));
        }
        String::new()
    }

    /// The description after saving edited Markdown. The tree and the plain
    /// text are derived from the new Markdown; the server-rendered HTML is
    /// stale and dropped.
    pub fn commit_edit(markdown: &str) -> Self {
        let doc = parse_from_markdown(markdown);
        Self {
            adf: Some(doc.to_value()),
            html: None,
            text: Some(doc.plain_text()),
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}
