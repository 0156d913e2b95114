//! Rule definitions and their compilation.
//!
//! A [`compiler::Rule`] pairs a pattern with a replacer. Rules are compiled as a
//! list by [`compiler::compile_rules`], which refuses any pattern that cannot
//! match globally.

pub mod compiler;
