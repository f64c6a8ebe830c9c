//! Builder API for collection-etch
//!
//! This module provides the main entry point for generating documentation
//! for a directory of collection files.

mod etch_builder;

pub use etch_builder::EtchBuilder;
