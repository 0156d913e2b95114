// rulesplit/src/ui/mod.rs
//! Terminal presentation: themes, sequence rendering and rule tables.

pub mod output_format;
pub mod rule_table;
pub mod theme;
