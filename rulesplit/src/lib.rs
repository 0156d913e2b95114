// rulesplit/src/lib.rs
//! # rulesplit CLI
//!
//! Terminal front end for `rulesplit-core`: loads rule files and translation
//! catalogs, runs the rule engine, and renders the resulting content sequence.

pub mod cli;
pub mod commands;
pub mod logger;
pub mod ui;
