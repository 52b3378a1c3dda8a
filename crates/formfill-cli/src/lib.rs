//! CLI library components for the formfill tool.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;
