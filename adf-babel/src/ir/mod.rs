//! The in-memory document tree shared by every converter.
//!
//! Trees are built fresh for each conversion (from JSON or by the Markdown
//! parser) and are never mutated afterwards; converters read a tree and
//! return a new artifact.

pub mod json;
pub mod nodes;

pub use nodes::{Attrs, Document, Mark, Media, Node, Scalar, Text};
