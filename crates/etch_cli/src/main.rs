//! etch - static HTML documentation for API collection exports
//!
//! Usage: `etch [options] <input-dir>`
//!
//! Environment:
//! - `ETCH_LOG` - Log level (default: "info")
//! - `MAX_RESPONSES`, `MAX_JSON_LENGTH`, `MAX_STRING_LENGTH`,
//!   `REDACT_STRING_LENGTH`, `MAX_ARRAY_ITEMS`, `MAX_DEPTH`,
//!   `SENSITIVE_KEYS`, `REQUEST_HEADERS_WHITELIST` - rendering limits,
//!   also read from a `.env` file in the working directory

mod docs;

use std::env;
use std::process::ExitCode;

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    // Use ETCH_LOG env var for log level configuration, default to "info"
    use tracing_subscriber::EnvFilter;
    let filter = EnvFilter::try_from_env("ETCH_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        docs::usage();
        return ExitCode::SUCCESS;
    }
    if args.iter().any(|a| a == "--version" || a == "-V") {
        println!("{} {}", collection_etch::NAME, collection_etch::VERSION);
        return ExitCode::SUCCESS;
    }

    match docs::run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            eprintln!("Run `etch --help` for usage.");
            ExitCode::FAILURE
        }
    }
}
