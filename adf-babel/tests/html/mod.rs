//! HTML format tests
//!
//! Display rendering of the tree, and the legacy markup fallback.

mod export;
mod legacy;
