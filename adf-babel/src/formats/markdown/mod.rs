//! Markdown format implementation
//!
//! Markdown is the editing format: the host seeds its editor with Markdown
//! rendered from the stored tree and parses the edited text back into a tree
//! when the user saves. Both directions are hand written, with a deliberately
//! small dialect.
//!
//! # Element Mapping Table
//!
//! | ADF node       | Markdown                 | Export Notes                        | Import Notes                            |
//! |----------------|--------------------------|-------------------------------------|-----------------------------------------|
//! | heading        | `#` .. `######`          | Level clamped                       | 7+ `#` clamp to 6; `#x` is text         |
//! | paragraph      | Paragraph                | Empty paragraphs omitted            | Lines joined with spaces                |
//! | bulletList     | `- item`                 | Marker configurable                 | `-`, `*`, `+`; same marker continues    |
//! | orderedList    | `1. item`                | Renumbered from 1                   | `N.` or `N)`; numbers discarded         |
//! | blockquote     | `> text`                 | Blank lines kept as `>`             | Re-parsed recursively                   |
//! | codeBlock      | ```` ```lang ````        | Content verbatim                    | Verbatim until closing fence or EOF     |
//! | rule           | `---`                    |                                     | `---`, `***`, `___`                     |
//! | table          | `a \| b` rows            | Header separator, `\|` escaped      | Not parsed (stays text)                 |
//! | media          | `![alt](url)`            | Alt only when no absolute URL       | Downgraded to a link, never media       |
//! | panel, expand  | Content only             |                                     |                                         |
//! | Inline:        |                          |                                     |                                         |
//! |   strong       | `**text**`               |                                     | `**` or `__`, content literal           |
//! |   em           | `*text*`                 |                                     | `*` or `_`                              |
//! |   code         | `` `text` ``             | Never escaped                       | Raw                                     |
//! |   link         | `[text](href)`           |                                     |                                         |
//! |   strike       | `~~text~~`               |                                     | Not parsed                              |
//! |   underline    | dropped                  | Text kept                           |                                         |
//!
//! # Lossy Conversions
//!
//! - Underline and unknown marks are dropped.
//! - Panels and expands flatten into their content.
//! - Nested lists come back as one flat list.
//! - Images come back as links.

pub mod parser;
pub mod serializer;

use crate::error::FormatError;
use crate::format::Format;
use crate::ir::nodes::Document;
use std::collections::HashMap;

pub use parser::parse_from_markdown;
pub use serializer::{serialize_to_markdown, MarkdownOptions};

/// Format implementation for Markdown
#[derive(Default)]
pub struct MarkdownFormat {
    options: MarkdownOptions,
}

impl MarkdownFormat {
    pub fn new(options: MarkdownOptions) -> Self {
        Self { options }
    }
}

impl Format for MarkdownFormat {
    fn name(&self) -> &str {
        "markdown"
    }

    fn description(&self) -> &str {
        "Markdown editing dialect"
    }

    fn file_extensions(&self) -> &[&str] {
        &["md", "markdown"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, FormatError> {
        Ok(parse_from_markdown(source))
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(serialize_to_markdown(doc, &self.options))
    }

    fn serialize_with_options(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        let mut markdown = self.options.clone();
        for (key, value) in options {
            match (key.as_str(), value.chars().collect::<Vec<_>>().as_slice()) {
                ("bullet-marker", [marker @ ('-' | '*' | '+')]) => {
                    markdown = markdown.with_bullet_marker(*marker);
                }
                ("bullet-marker", _) => {
                    return Err(FormatError::SerializationError(format!(
                        "Invalid value for 'bullet-marker': {value}"
                    )))
                }
                (other, _) => {
                    return Err(FormatError::NotSupported(format!(
                        "Format 'markdown' has no option '{other}'"
                    )))
                }
            }
        }
        Ok(serialize_to_markdown(doc, &markdown))
    }
}
