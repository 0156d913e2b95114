// rulesplit/src/commands/mod.rs
//! Subcommand implementations.

pub mod apply;
pub mod common;
pub mod rules;
pub mod translate;
