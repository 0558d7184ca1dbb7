//! CLI command implementations.

pub mod preset;
pub mod render;
