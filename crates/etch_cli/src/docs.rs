//! Documentation generation command for the etch CLI
//!
//! This module parses the command line, layers the run configuration
//! (defaults, optional TOML file, environment) and runs a batch over the
//! input directory.

use anyhow::{bail, Context, Result};
use collection_etch::{EtchBuilder, EtchConfig, ReportPrinter};
use std::path::PathBuf;

/// Run the docs command with the given arguments.
///
/// Returns whether the batch produced something from its input.
pub fn run(args: &[String]) -> Result<bool> {
    let cmd = DocsCommand::parse(args)?;
    let config = cmd.load_config()?;

    let mut builder = EtchBuilder::new(&cmd.input)
        .output_dir(&cmd.output)
        .config(config);
    if let Some(ref assets) = cmd.assets {
        builder = builder.assets_dir(assets);
    }

    let report = builder.build().with_context(|| {
        format!(
            "failed to generate documentation from {}",
            cmd.input.display()
        )
    })?;

    ReportPrinter::new(&report, cmd.use_color).print_to_stdout();
    Ok(report.is_success())
}

/// Documentation command configuration
#[derive(Debug, PartialEq)]
struct DocsCommand {
    /// Directory holding the collection files
    input: PathBuf,
    /// Output directory for generated pages
    output: PathBuf,
    /// TOML file with rendering limits
    config: Option<PathBuf>,
    /// Directory overriding the embedded assets
    assets: Option<PathBuf>,
    /// Colored terminal output
    use_color: bool,
}

impl DocsCommand {
    fn parse(args: &[String]) -> Result<Self> {
        let mut input: Option<PathBuf> = None;
        let mut cmd = DocsCommand {
            input: PathBuf::new(),
            output: PathBuf::from("output"),
            config: None,
            assets: None,
            use_color: true,
        };

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--output" | "-o" => {
                    if i + 1 < args.len() {
                        cmd.output = PathBuf::from(&args[i + 1]);
                        i += 2;
                    } else {
                        bail!("--output requires a value");
                    }
                }
                "--config" | "-c" => {
                    if i + 1 < args.len() {
                        cmd.config = Some(PathBuf::from(&args[i + 1]));
                        i += 2;
                    } else {
                        bail!("--config requires a value (a .toml file)");
                    }
                }
                "--assets" | "-a" => {
                    if i + 1 < args.len() {
                        cmd.assets = Some(PathBuf::from(&args[i + 1]));
                        i += 2;
                    } else {
                        bail!("--assets requires a value (a directory)");
                    }
                }
                "--no-color" => {
                    cmd.use_color = false;
                    i += 1;
                }
                arg if !arg.starts_with('-') => {
                    if input.is_some() {
                        bail!("Unexpected argument: {}", arg);
                    }
                    input = Some(PathBuf::from(arg));
                    i += 1;
                }
                _ => {
                    bail!("Unknown flag: {}", args[i]);
                }
            }
        }

        match input {
            Some(input) => cmd.input = input,
            None => bail!("Missing <input-dir>"),
        }

        Ok(cmd)
    }

    /// Defaults, then the TOML file if given, then the environment
    fn load_config(&self) -> Result<EtchConfig> {
        let config = match self.config {
            Some(ref path) => EtchConfig::from_toml_file(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => EtchConfig::new(),
        };

        config
            .from_env()
            .context("invalid configuration in environment")
    }
}

/// Print docs command usage
pub fn usage() {
    eprintln!("etch [options] <input-dir>");
    eprintln!();
    eprintln!("Generate HTML documentation from API collection exports.");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  <input-dir>                Directory with *.postman_collection.json files");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --output, -o <dir>         Output directory (default: output)");
    eprintln!("  --config, -c <file>        TOML file with rendering limits");
    eprintln!("  --assets, -a <dir>         Directory with api.css, api.js, index.css overrides");
    eprintln!("  --no-color                 Disable colored output");
    eprintln!("  --help, -h                 Show this help");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  etch collections                      Write pages to ./output");
    eprintln!("  etch collections -o site -c etch.toml Use custom limits");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_defaults() {
        let cmd = DocsCommand::parse(&args(&["collections"])).unwrap();
        assert_eq!(
            cmd,
            DocsCommand {
                input: PathBuf::from("collections"),
                output: PathBuf::from("output"),
                config: None,
                assets: None,
                use_color: true,
            }
        );
    }

    #[test]
    fn test_parse_flags() {
        let cmd = DocsCommand::parse(&args(&[
            "-o", "site", "--config", "etch.toml", "in", "--assets", "theme", "--no-color",
        ]))
        .unwrap();
        assert_eq!(cmd.input, PathBuf::from("in"));
        assert_eq!(cmd.output, PathBuf::from("site"));
        assert_eq!(cmd.config, Some(PathBuf::from("etch.toml")));
        assert_eq!(cmd.assets, Some(PathBuf::from("theme")));
        assert!(!cmd.use_color);
    }

    #[test]
    fn test_parse_errors() {
        assert!(DocsCommand::parse(&args(&[])).is_err());
        assert!(DocsCommand::parse(&args(&["in", "--output"])).is_err());
        assert!(DocsCommand::parse(&args(&["in", "--verbose"])).is_err());
        assert!(DocsCommand::parse(&args(&["a", "b"])).is_err());
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("etch.toml");
        fs::write(&path, "max_depth = 3\n").unwrap();

        let cmd = DocsCommand::parse(&args(&["in", "-c", path.to_str().unwrap()])).unwrap();
        let config = cmd.load_config().unwrap();
        assert_eq!(config.max_depth, 3);
    }

    #[test]
    fn test_load_config_missing_file() {
        let cmd = DocsCommand::parse(&args(&["in", "-c", "/nonexistent/etch.toml"])).unwrap();
        let err = cmd.load_config().unwrap_err();
        assert!(format!("{:#}", err).contains("failed to load config"));
    }
}
