//! Terminal summary of a batch run
//!
//! This module prints a [`BatchReport`] for the command line, with colored
//! output when the terminal supports it.
//!
//! # Example
//!
//! ```no_run
//! use collection_etch::generator::BatchReport;
//! use collection_etch::printer::ReportPrinter;
//!
//! let report = BatchReport::default();
//! let printer = ReportPrinter::new(&report, true);
//! printer.print_to_stdout();
//! ```

use crate::diagnostics::Diagnostic;
use crate::generator::BatchReport;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::io;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Prints the outcome of a batch run
pub struct ReportPrinter<'a> {
    /// Report to print
    report: &'a BatchReport,
    /// Whether to use colored output
    use_color: bool,
}

impl<'a> ReportPrinter<'a> {
    /// Create a new printer
    ///
    /// # Arguments
    /// * `report` - Outcome of the run
    /// * `use_color` - Whether to use ANSI colors
    pub fn new(report: &'a BatchReport, use_color: bool) -> Self {
        Self { report, use_color }
    }

    /// Format the report for the Display trait
    pub fn format(&self, f: &mut Formatter<'_>) -> FmtResult {
        for doc in &self.report.generated {
            writeln!(
                f,
                "{} {} {}",
                self.styled_green("✓"),
                self.styled_bold(&doc.file),
                self.styled_gray(&format!("{} ({} endpoints)", doc.title, doc.endpoints))
            )?;
        }
        for failed in &self.report.failed {
            writeln!(
                f,
                "{} {}: {}",
                self.styled_red("✗"),
                failed.source.display(),
                failed.error
            )?;
        }

        for diagnostic in self.report.diagnostics.warnings() {
            if self.use_color {
                writeln!(f, "{}", diagnostic.format_colored())?;
            } else {
                writeln!(f, "{}", diagnostic.format())?;
            }
        }

        if let Some(index) = &self.report.index {
            writeln!(f, "{} {}", self.styled_green("✓"), index.display())?;
        }
        if let Some(error) = &self.report.index_error {
            writeln!(f, "{} index not written: {}", self.styled_red("✗"), error)?;
        }

        writeln!(f)?;
        writeln!(f, "{}", self.summary())
    }

    /// Print directly to stdout with colors
    pub fn print_to_stdout(&self) {
        let choice = if self.use_color {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        let mut stdout = StandardStream::stdout(choice);
        if let Err(e) = self.write_colored(&mut stdout) {
            eprintln!("Error printing report: {}", e);
        }
    }

    /// Write with colors to a WriteColor implementor
    fn write_colored<W: WriteColor>(&self, w: &mut W) -> io::Result<()> {
        for doc in &self.report.generated {
            self.write_color(w, "✓", Color::Green)?;
            write!(w, " ")?;
            self.write_bold(w, &doc.file)?;
            writeln!(w, " {} ({} endpoints)", doc.title, doc.endpoints)?;
        }
        for failed in &self.report.failed {
            self.write_color(w, "✗", Color::Red)?;
            writeln!(w, " {}: {}", failed.source.display(), failed.error)?;
        }

        for diagnostic in self.report.diagnostics.warnings() {
            self.write_color(w, diagnostic.severity.display(), Color::Yellow)?;
            writeln!(w, " {}", diagnostic_context(diagnostic))?;
        }

        if let Some(index) = &self.report.index {
            self.write_color(w, "✓", Color::Green)?;
            writeln!(w, " {}", index.display())?;
        }
        if let Some(error) = &self.report.index_error {
            self.write_color(w, "✗", Color::Red)?;
            writeln!(w, " index not written: {}", error)?;
        }

        writeln!(w)?;
        self.write_bold(w, &self.summary())?;
        writeln!(w)
    }

    fn summary(&self) -> String {
        format!(
            "{} page(s) generated, {} failed, {} endpoint(s), {} warning(s)",
            self.report.generated.len(),
            self.report.failed.len(),
            self.report.endpoint_count(),
            self.report.diagnostics.warning_count()
        )
    }

    // === Color helper methods ===

    fn write_color<W: WriteColor>(&self, w: &mut W, s: &str, color: Color) -> io::Result<()> {
        w.set_color(ColorSpec::new().set_fg(Some(color)))?;
        write!(w, "{}", s)?;
        w.reset()
    }

    fn write_bold<W: WriteColor>(&self, w: &mut W, s: &str) -> io::Result<()> {
        w.set_color(ColorSpec::new().set_bold(true))?;
        write!(w, "{}", s)?;
        w.reset()
    }

    // === Style helpers for Display trait ===

    fn styled_green(&self, s: &str) -> String {
        self.styled(s, "32")
    }

    fn styled_red(&self, s: &str) -> String {
        self.styled(s, "31")
    }

    fn styled_bold(&self, s: &str) -> String {
        self.styled(s, "1")
    }

    fn styled_gray(&self, s: &str) -> String {
        self.styled(s, "90")
    }

    fn styled(&self, s: &str, code: &str) -> String {
        if self.use_color {
            format!("\x1b[{}m{}\x1b[0m", code, s)
        } else {
            s.to_string()
        }
    }
}

impl Display for ReportPrinter<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        self.format(f)
    }
}

/// File and node a diagnostic refers to, followed by its message
fn diagnostic_context(diagnostic: &Diagnostic) -> String {
    let mut out = String::new();
    if let Some(file) = &diagnostic.file {
        out.push_str(&format!("{}: ", file.display()));
    }
    if let Some(item) = &diagnostic.item {
        out.push_str(&format!("[{}] ", item));
    }
    out.push_str(&diagnostic.message);
    out
}
