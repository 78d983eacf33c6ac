//! Markdown format tests
//!
//! Tests for both directions of the Markdown editing dialect and the
//! round trip between them.

mod export;
mod import;
mod roundtrip;
