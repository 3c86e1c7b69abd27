//! CLI command implementations.

pub mod favorites;
pub mod render;
pub mod shell;
