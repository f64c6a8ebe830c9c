//! EtchBuilder - Main API for documentation generation
//!
//! This module provides the builder pattern API for configuring and
//! running a batch generation over a directory of collection files.

use crate::config::EtchConfig;
use crate::diagnostics::{EtchError, EtchResult};
use crate::embed::AssetBundle;
use crate::generator::{BatchReport, Etcher};
use std::path::PathBuf;

/// Default output directory
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Builder for configuring documentation generation
///
/// # Example
///
/// ```no_run
/// use collection_etch::{EtchBuilder, EtchConfig};
///
/// let report = EtchBuilder::new("collections")
///     .output_dir("site")
///     .config(EtchConfig::default())
///     .build()
///     .expect("Failed to generate docs");
/// println!("{} page(s) written", report.generated.len());
/// ```
#[derive(Debug, Clone)]
pub struct EtchBuilder {
    /// Directory holding the collection files
    pub input_dir: PathBuf,
    /// Output directory
    pub output_dir: PathBuf,
    /// Run configuration
    pub config: EtchConfig,
    /// Directory whose assets replace the embedded ones
    pub assets_dir: Option<PathBuf>,
}

impl EtchBuilder {
    /// Create a new builder reading collections from `input_dir`
    pub fn new(input_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            config: EtchConfig::default(),
            assets_dir: None,
        }
    }

    /// Set the output directory
    pub fn output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_dir = path.into();
        self
    }

    /// Set the run configuration
    pub fn config(mut self, config: EtchConfig) -> Self {
        self.config = config;
        self
    }

    /// Read assets from a directory instead of using the embedded ones
    pub fn assets_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.assets_dir = Some(path.into());
        self
    }

    /// Create the [`Etcher`] this builder describes
    pub fn etcher(&self) -> EtchResult<Etcher> {
        let assets = match &self.assets_dir {
            Some(dir) if !dir.is_dir() => return Err(EtchError::FileNotFound(dir.clone())),
            Some(dir) => AssetBundle::from_dir(dir)?,
            None => AssetBundle::embedded(),
        };
        Etcher::new(self.config.clone(), assets, self.output_dir.clone())
    }

    /// Build the documentation
    ///
    /// This method:
    /// 1. Validates the configuration
    /// 2. Loads the page assets
    /// 3. Generates one page per collection file, then the index page
    pub fn build(self) -> EtchResult<BatchReport> {
        if self.config.input_suffix.is_empty() {
            return Err(EtchError::config("input suffix must not be empty"));
        }

        let mut etcher = self.etcher()?;
        etcher.run(&self.input_dir)
    }
}
