//! HTML format implementation
//!
//! Export renders the document tree into a styled markup fragment for display
//! in the host's web view. Import goes the other way only approximately: legacy
//! markup is rewritten into Markdown (see [`legacy`]) which is then parsed like
//! any other Markdown.
//!
//! # Element Mapping Table
//!
//! | ADF node          | HTML                                                  | Notes                                   |
//! |-------------------|-------------------------------------------------------|-----------------------------------------|
//! | doc               | `<div class="adf-content">`                           | Children joined by newline; empty → ""  |
//! | paragraph         | `<p>`                                                 | Empty paragraph → `<p><br></p>`         |
//! | heading           | `<h1>`..`<h6>`                                        | Level clamped, font size table          |
//! | bulletList        | `<ul>`                                                |                                         |
//! | orderedList       | `<ol>`                                                | Always numbered from 1                  |
//! | listItem          | `<li>`                                                |                                         |
//! | blockquote        | `<blockquote>`                                        | Left border                             |
//! | codeBlock         | `<pre data-language><code>`                           | Text escaped, marks ignored             |
//! | rule              | `<hr>`                                                |                                         |
//! | panel             | `<div>` with background                               | info/note/success/warning/error/neutral |
//! | table             | `<table><tbody>`                                      | `<th>` for headers, `<td>` for cells    |
//! | mediaSingle/Group | `<div>`                                               |                                         |
//! | media             | `<img src="scheme://id">` or external `src`           | Link mark → `<a target="_blank">`       |
//! | expand            | `<details><summary>`                                  | Title defaults to `▼`                   |
//! | Inline:           |                                                       |                                         |
//! |   text            | escaped text wrapped per mark                         | Marks applied back to front             |
//! |   hardBreak       | `<br>`                                                |                                         |
//! |   emoji           | `<span title>`                                        | Small fixed table, else short name      |
//! |   mention         | `<span>@name</span>`                                  | Pill style                              |
//! |   date            | `<span>`                                              |                                         |
//! |   inlineCard      | `<a href>url</a>`                                     |                                         |
//! | anything else     | children only                                         | Nothing when the children render empty  |
//!
//! # Media references
//!
//! Images stored as attachments are not rendered with a fetchable URL. The
//! `src` carries an opaque `<scheme>://<attachment id>` reference that the host
//! resolves out of band, and `data-fallback` carries the source system's base
//! URL so the host can offer an "open in browser" link instead.
//!
//! # Options
//!
//! [`Format::serialize_with_options`] accepts `base-url`, `attachment-scheme`,
//! `attachments` (a JSON object of filename → attachment id),
//! `default-image-width` and `max-image-width`.

pub mod legacy;
pub mod serializer;

use crate::error::FormatError;
use crate::format::Format;
use crate::formats::markdown::parser::parse_from_markdown;
use crate::ir::nodes::Document;
use std::collections::HashMap;

pub use legacy::html_to_markdown;
pub use serializer::{serialize_to_html, AttachmentMap, HtmlOptions};

/// Format implementation for HTML
#[derive(Default)]
pub struct HtmlFormat {
    options: HtmlOptions,
}

impl HtmlFormat {
    pub fn new(options: HtmlOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &HtmlOptions {
        &self.options
    }
}

impl Format for HtmlFormat {
    fn name(&self) -> &str {
        "html"
    }

    fn description(&self) -> &str {
        "Styled HTML fragment (import via legacy Markdown fallback)"
    }

    fn file_extensions(&self) -> &[&str] {
        &["html", "htm"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, FormatError> {
        tracing::debug!("importing html through the legacy markdown fallback");
        Ok(parse_from_markdown(&html_to_markdown(source)))
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(serialize_to_html(doc, &self.options))
    }

    fn serialize_with_options(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        let options = apply_options(self.options.clone(), options)?;
        Ok(serialize_to_html(doc, &options))
    }
}

fn apply_options(
    mut html: HtmlOptions,
    options: &HashMap<String, String>,
) -> Result<HtmlOptions, FormatError> {
    for (key, value) in options {
        match key.as_str() {
            "base-url" => html.base_url = value.clone(),
            "attachment-scheme" => html.attachment_scheme = value.clone(),
            "attachments" => html.attachments = serde_json::from_str::<AttachmentMap>(value)?,
            "default-image-width" => html.default_image_width = parse_width(key, value)?,
            "max-image-width" => html.max_image_width = parse_width(key, value)?,
            other => {
                return Err(FormatError::NotSupported(format!(
                    "Format 'html' has no option '{other}'"
                )))
            }
        }
    }
    Ok(html)
}

fn parse_width(key: &str, value: &str) -> Result<i64, FormatError> {
    value.trim().parse().map_err(|_| {
        FormatError::SerializationError(format!("Invalid value for '{key}': {value}"))
    })
}
