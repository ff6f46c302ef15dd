//! CLI command implementations.

pub mod notarize;
pub mod package;
