//! Format implementations
//!
//! This module contains all format implementations that convert between the
//! document tree and its text representations.

pub mod adf;
pub mod html;
pub mod markdown;
pub mod text;

pub use adf::AdfFormat;
pub use html::{HtmlFormat, HtmlOptions};
pub use markdown::{MarkdownFormat, MarkdownOptions};
pub use text::TextFormat;
