//! Error types and diagnostics
//!
//! This module provides error handling and diagnostic reporting
//! for the documentation generator.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for collection-etch operations
pub type EtchResult<T> = Result<T, EtchError>;

/// Main error type for collection-etch
#[derive(Debug, Error)]
pub enum EtchError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Collection file does not exist
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Collection file is not valid JSON
    #[error("Failed to decode JSON in {file}: {source}")]
    Decode {
        file: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Template rendering error
    #[error("Template error: {0}")]
    Template(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Failure while formatting a node or body
    #[error("Render error: {0}")]
    Render(String),
}

impl EtchError {
    /// Create a decode error for a collection file
    pub fn decode(file: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        EtchError::Decode {
            file: file.into(),
            source,
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        EtchError::Config(message.into())
    }
}

/// Diagnostic severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticSeverity {
    /// Error - a whole collection could not be generated
    Error,
    /// Warning - generation continued without part of the input
    Warning,
}

impl DiagnosticSeverity {
    /// Get display string
    pub fn display(&self) -> &'static str {
        match self {
            DiagnosticSeverity::Error => "error",
            DiagnosticSeverity::Warning => "warning",
        }
    }

    /// Get ANSI color code
    pub fn color(&self) -> &'static str {
        match self {
            DiagnosticSeverity::Error => "\x1b[31m",   // Red
            DiagnosticSeverity::Warning => "\x1b[33m", // Yellow
        }
    }
}

/// A diagnostic message
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// Severity level
    pub severity: DiagnosticSeverity,
    /// Message
    pub message: String,
    /// Collection file the diagnostic belongs to
    pub file: Option<PathBuf>,
    /// Name of the collection node involved, if any
    pub item: Option<String>,
}

impl Diagnostic {
    /// Create a new diagnostic
    pub fn new(severity: DiagnosticSeverity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            file: None,
            item: None,
        }
    }

    /// Create an error diagnostic
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(DiagnosticSeverity::Error, message)
    }

    /// Create a warning diagnostic
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(DiagnosticSeverity::Warning, message)
    }

    /// Set the source file
    pub fn in_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Set the node name
    pub fn for_item(mut self, item: impl Into<String>) -> Self {
        self.item = Some(item.into());
        self
    }

    /// Format the diagnostic for display
    pub fn format(&self) -> String {
        let mut result = String::new();

        if let Some(ref file) = self.file {
            result.push_str(&file.display().to_string());
            result.push_str(": ");
        }

        result.push_str(self.severity.display());

        if let Some(ref item) = self.item {
            result.push_str(" [");
            result.push_str(item);
            result.push(']');
        }

        result.push_str(": ");
        result.push_str(&self.message);

        result
    }

    /// Format with ANSI colors
    pub fn format_colored(&self) -> String {
        let mut result = String::new();
        let reset = "\x1b[0m";

        if let Some(ref file) = self.file {
            result.push_str("\x1b[2m");
            result.push_str(&file.display().to_string());
            result.push_str(reset);
            result.push_str(": ");
        }

        result.push_str(self.severity.color());
        result.push_str(self.severity.display());
        result.push_str(reset);

        if let Some(ref item) = self.item {
            result.push_str("\x1b[2m [");
            result.push_str(item);
            result.push_str("]\x1b[0m");
        }

        result.push_str(": ");
        result.push_str(&self.message);

        result
    }
}

/// Collector for diagnostics during a batch run
#[derive(Debug, Clone, Default)]
pub struct DiagnosticsCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticsCollector {
    /// Create a new collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic
    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Add several diagnostics, tagging each with the file they came from
    pub fn extend_for_file(
        &mut self,
        file: impl Into<PathBuf>,
        diagnostics: impl IntoIterator<Item = Diagnostic>,
    ) {
        let file = file.into();
        for diagnostic in diagnostics {
            self.add(diagnostic.in_file(file.clone()));
        }
    }

    /// Add an error
    pub fn error(&mut self, message: impl Into<String>) {
        self.add(Diagnostic::error(message));
    }

    /// Get all diagnostics
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Item-level problems, in the order they were recorded
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == DiagnosticSeverity::Warning)
    }

    /// Get warning count
    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_error_names_file() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = EtchError::decode("billing.postman_collection.json", source);
        assert!(err.to_string().contains("billing.postman_collection.json"));
        assert!(err.to_string().starts_with("Failed to decode JSON"));
    }

    #[test]
    fn test_diagnostic() {
        let diag = Diagnostic::warning("skipped malformed node")
            .in_file("users.postman_collection.json")
            .for_item("Create user");

        assert_eq!(diag.severity, DiagnosticSeverity::Warning);
        assert_eq!(
            diag.format(),
            "users.postman_collection.json: warning [Create user]: skipped malformed node"
        );
    }

    #[test]
    fn test_diagnostics_collector() {
        let mut collector = DiagnosticsCollector::new();
        collector.error("error 1");
        collector.add(Diagnostic::warning("warning 1"));
        collector.extend_for_file("a.json", vec![Diagnostic::warning("warning 2")]);

        assert_eq!(collector.warning_count(), 2);
        assert_eq!(collector.diagnostics().len(), 3);
        let messages: Vec<_> = collector.warnings().map(|d| d.message.as_str()).collect();
        assert_eq!(messages, vec!["warning 1", "warning 2"]);
        assert_eq!(
            collector.diagnostics()[2].file,
            Some(PathBuf::from("a.json"))
        );
    }
}
