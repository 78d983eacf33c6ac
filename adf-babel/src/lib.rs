//! Conversions for Atlassian Document Format (ADF) issue descriptions
//!
//!     This crate converts issue descriptions between the structured tree the issue tracker stores
//!     (ADF JSON), the HTML a desktop client displays, and the Markdown its editor works in. It
//!     also carries the fallback path for older issues that only have server-rendered HTML.
//!
//!     This is a pure lib: it powers adf-cli but is shell agnostic. No printing, no env vars, no
//!     file or network I/O. Attachment lookups are done by the host beforehand and handed in as
//!     a plain map.
//!
//! Architecture
//!
//!     Everything goes through one tree (./ir). Each converter reads a tree, or text, and returns
//!     a new artifact; nothing is mutated after construction and nothing is cached between calls,
//!     so every function here is safe to call from any thread.
//!
//!     .
//!     ├── error.rs
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     ├── description.rs          # Choosing between stored description forms
//!     ├── formats
//!     │   ├── adf                 # JSON in and out
//!     │   ├── html
//!     │   │   ├── serializer.rs   # tree → display markup
//!     │   │   └── legacy.rs       # legacy markup → Markdown
//!     │   ├── markdown
//!     │   │   ├── parser.rs       # Markdown → tree
//!     │   │   └── serializer.rs   # tree → Markdown
//!     │   └── text                # plain text copy
//!     ├── ir                      # The document tree and its JSON codec
//!     └── common                  # Escaping and link helpers
//!
//! Tolerance
//!
//!     Converters never fail. An unknown node type renders its children, an unknown mark is
//!     dropped and its text kept, missing attributes take typed defaults, and malformed Markdown
//!     degrades to literal text. Errors ([`FormatError`]) only exist at the edges: decoding a JSON
//!     payload, looking up a format, or asking a format for something it cannot do.
//!
//! Testing
//!
//!     tests
//!     ├── lib.rs
//!     ├── html
//!     └── markdown
//!
//!     Note that rust does not by default discover tests in subdirectories, so we need to include
//!     these in the mod.

pub mod common;
pub mod description;
pub mod error;
pub mod format;
pub mod formats;
pub mod ir;
pub mod registry;

pub use description::{EditSeed, IssueDescription, SeedSource};
pub use error::FormatError;
pub use format::Format;
pub use formats::html::{html_to_markdown, serialize_to_html, AttachmentMap, HtmlOptions};
pub use formats::markdown::{parse_from_markdown, serialize_to_markdown, MarkdownOptions};
pub use ir::nodes::{Document, Mark, Node};
pub use registry::FormatRegistry;
