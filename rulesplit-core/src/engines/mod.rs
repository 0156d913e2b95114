// rulesplit-core/src/engines/mod.rs
//! This module contains the segmentation engine implementations.
//!
//! Each engine is a separate file within this directory and implements the
//! `SegmentationEngine` trait.

pub mod rule_engine;
