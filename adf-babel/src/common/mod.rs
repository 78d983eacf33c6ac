//! Helpers shared by several formats.

pub mod escape;
pub mod links;
