//! Etcher - batch documentation generation
//!
//! This module provides the [`Etcher`], which turns every collection file of
//! an input directory into an HTML page and finally writes the index page
//! linking them.
//!
//! Failures are contained at the level they occur: a malformed node is
//! skipped by the walker, a collection that cannot be loaded or written is
//! recorded in the [`BatchReport`] without stopping the batch, and a failed
//! index write leaves the generated pages in place.

use crate::collection::Collection;
use crate::config::EtchConfig;
use crate::diagnostics::{Diagnostic, DiagnosticsCollector, EtchError, EtchResult};
use crate::embed::AssetBundle;
use crate::html::{timestamp_now, HtmlGenerator, IndexEntry, PageContext};
use crate::slug::page_file_name;
use crate::walker::CollectionWalker;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// File name of the index page
pub const INDEX_FILE: &str = "index.html";

/// A page written for one collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedDoc {
    /// Collection file the page was generated from
    pub source: PathBuf,
    /// Page file name, relative to the output directory
    pub file: String,
    /// Collection name
    pub title: String,
    /// Full path of the written page
    pub path: PathBuf,
    /// Number of rendered requests
    pub endpoints: usize,
    /// Number of nodes skipped because they could not be decoded
    pub skipped: usize,
}

/// A collection that produced no page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedCollection {
    /// Collection file
    pub source: PathBuf,
    /// Why it failed
    pub error: String,
}

/// Outcome of a batch run
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    /// Pages written, in input order
    pub generated: Vec<GeneratedDoc>,
    /// Collections that failed
    pub failed: Vec<FailedCollection>,
    /// Path of the index page, when it was written
    pub index: Option<PathBuf>,
    /// Why the index page could not be written
    pub index_error: Option<String>,
    /// Item-level and collection-level diagnostics
    pub diagnostics: DiagnosticsCollector,
}

impl BatchReport {
    /// Number of collection files processed
    pub fn total(&self) -> usize {
        self.generated.len() + self.failed.len()
    }

    /// Total number of rendered requests
    pub fn endpoint_count(&self) -> usize {
        self.generated.iter().map(|doc| doc.endpoints).sum()
    }

    /// Whether the run produced something from its input.
    ///
    /// An empty input directory counts as a success.
    pub fn is_success(&self) -> bool {
        !self.generated.is_empty() || self.failed.is_empty()
    }
}

/// The batch documentation generator
pub struct Etcher {
    /// Run configuration
    config: EtchConfig,
    /// Where pages are written
    output_dir: PathBuf,
    /// Page assembler
    html: HtmlGenerator,
    /// Diagnostics collector
    diagnostics: DiagnosticsCollector,
}

impl Etcher {
    /// Create an Etcher writing to `output_dir`
    pub fn new(
        config: EtchConfig,
        assets: AssetBundle,
        output_dir: impl Into<PathBuf>,
    ) -> EtchResult<Self> {
        let html = HtmlGenerator::new(assets, &config)?;
        Ok(Self {
            config,
            output_dir: output_dir.into(),
            html,
            diagnostics: DiagnosticsCollector::new(),
        })
    }

    /// Get the diagnostics collector
    pub fn diagnostics(&self) -> &DiagnosticsCollector {
        &self.diagnostics
    }

    /// Generate pages for every collection file in `input_dir`, then the
    /// index page.
    ///
    /// Only a missing input directory or an output directory that cannot be
    /// created is an error; everything else is recorded in the report.
    pub fn run(&mut self, input_dir: impl AsRef<Path>) -> EtchResult<BatchReport> {
        let input_dir = input_dir.as_ref();
        let sources = discover_collections(input_dir, &self.config.input_suffix)?;
        tracing::info!(
            "Found {} collection file(s) in {}",
            sources.len(),
            input_dir.display()
        );

        fs::create_dir_all(&self.output_dir)?;

        let mut report = BatchReport::default();
        for source in sources {
            match self.generate_document(&source) {
                Ok(doc) => report.generated.push(doc),
                Err(e) => {
                    tracing::error!("Failed to generate {}: {}", source.display(), e);
                    self.diagnostics
                        .add(Diagnostic::error(e.to_string()).in_file(&source));
                    report.failed.push(FailedCollection {
                        source,
                        error: e.to_string(),
                    });
                }
            }
        }

        match self.generate_index(&report.generated) {
            Ok(path) => {
                tracing::info!("Index written to {}", path.display());
                report.index = Some(path);
            }
            Err(e) => {
                tracing::error!("Failed to write index: {}", e);
                self.diagnostics.error(format!("index not written: {}", e));
                report.index_error = Some(e.to_string());
            }
        }

        report.diagnostics = self.diagnostics.clone();
        Ok(report)
    }

    /// Generate and write the page of one collection file
    pub fn generate_document(&mut self, source: &Path) -> EtchResult<GeneratedDoc> {
        tracing::info!("Loading collection: {}", source.display());
        let collection = Collection::load(source)?;

        let walked = CollectionWalker::new(&self.config).walk_collection(&collection);
        self.diagnostics
            .extend_for_file(source, walked.diagnostics.iter().cloned());

        let context = PageContext {
            title: collection.name().to_string(),
            description: collection.description().to_string(),
            version: collection.version(),
            generated_at: timestamp_now(),
        };
        let page = self.html.page(&context, &walked.toc, &walked.fragments);

        let file = page_file_name(source, &self.config.input_suffix);
        let path = self.output_dir.join(&file);
        fs::write(&path, page)?;

        tracing::info!(
            "Generated {} ({} endpoints) from {}",
            path.display(),
            walked.endpoints,
            source.display()
        );

        Ok(GeneratedDoc {
            source: source.to_path_buf(),
            file,
            title: context.title,
            path,
            endpoints: walked.endpoints,
            skipped: walked.diagnostics.len(),
        })
    }

    /// Write the index page listing `docs`
    pub fn generate_index(&self, docs: &[GeneratedDoc]) -> EtchResult<PathBuf> {
        let entries: Vec<IndexEntry> = docs
            .iter()
            .map(|doc| IndexEntry {
                file: doc.file.clone(),
                title: doc.title.clone(),
            })
            .collect();

        let page = self.html.index_page(&entries)?;
        let path = self.output_dir.join(INDEX_FILE);
        fs::write(&path, page)?;
        Ok(path)
    }
}

/// List the collection files directly inside `dir`, sorted by file name.
///
/// Subdirectories are not searched.
pub fn discover_collections(dir: &Path, suffix: &str) -> EtchResult<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(EtchError::FileNotFound(dir.to_path_buf()));
    }

    let mut sources = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(io::Error::from)?;
        let matches = entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.ends_with(suffix));
        if entry.file_type().is_file() && matches {
            sources.push(entry.into_path());
        }
    }

    Ok(sources)
}
