//! collection-etch: Documentation generator for API collection exports
//!
//! This crate turns collection export files (named requests organized in
//! nested folders, with headers, bodies and example responses) into static
//! HTML documentation by:
//! - Walking the item tree once, producing a table of contents and the
//!   content of every request in the same order
//! - Redacting sensitive fields and truncating oversized bodies before they
//!   are shown
//! - Assembling self-contained pages with a sidebar, theme toggle and search
//! - Writing an index page linking every generated page
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────┐
//! │ *.postman_collection.json│
//! └────────────┬─────────────┘
//!              ▼
//!       ┌─────────────┐
//!       │ Collection  │
//!       └──────┬──────┘
//!              ▼
//!   ┌─────────────────────┐     ┌──────────────────────────┐
//!   │ CollectionWalker    │────▶│ ContentRenderer          │
//!   │ (TOC + fragments)   │     │ (Sanitizer, highlighter) │
//!   └──────────┬──────────┘     └──────────────────────────┘
//!              ▼
//!       ┌─────────────┐
//!       │HtmlGenerator│──▶ <name>.html, index.html
//!       └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```no_run
//! use collection_etch::{EtchBuilder, EtchConfig};
//!
//! let config = EtchConfig::new().from_env().expect("invalid configuration");
//! let report = EtchBuilder::new("collections")
//!     .output_dir("output")
//!     .config(config)
//!     .build()
//!     .expect("Failed to generate docs");
//! assert!(report.is_success());
//! ```

// Input model and configuration
pub mod collection;
pub mod config;
pub mod diagnostics;

// Content transforms
pub mod highlight;
pub mod markdown;
pub mod render;
pub mod sanitize;

// Traversal and assembly
pub mod embed;
pub mod html;
pub mod slug;
pub mod toc;
pub mod walker;

// Entry points and terminal output
pub mod builder;
pub mod generator;
pub mod printer;

// Test utilities - available for downstream crate testing
pub mod test;

// Re-exports for convenience
pub use collection::{classify, Collection, ItemRecord, NodeKind};
pub use config::EtchConfig;
pub use diagnostics::{Diagnostic, DiagnosticSeverity, DiagnosticsCollector, EtchError, EtchResult};
pub use render::{BodyLabel, ContentRenderer};
pub use sanitize::Sanitizer;
pub use toc::TocEntry;
pub use walker::{CollectionWalker, Walked};

// Terminal output
pub use printer::ReportPrinter;

// Asset embedding
pub use embed::{AssetBundle, DEFAULT_CSS, DEFAULT_INDEX_CSS, DEFAULT_JS};

// Builder API
pub use builder::EtchBuilder;

// Documentation generation
pub use generator::{discover_collections, BatchReport, Etcher, FailedCollection, GeneratedDoc};

// Output generators
pub use html::{HtmlGenerator, IndexEntry, PageContext};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
