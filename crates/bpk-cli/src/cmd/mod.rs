//! Subcommand implementations

pub mod detect;
pub mod package;
