use clap::Parser;
use std::path::PathBuf;

/// Command-line interface. All three options are required; clap prints
/// a usage error and exits with a non-zero status when any is missing.
#[derive(Debug, Parser)]
#[command(name = "notes-backend", version, about = "File-backed notes HTTP service")]
pub struct Cli {
    /// Host address to bind the HTTP server to
    #[arg(long)]
    pub host: String,

    /// Port to bind the HTTP server to
    #[arg(long)]
    pub port: u16,

    /// Directory holding the note files (created if absent)
    #[arg(long)]
    pub cache: PathBuf,
}

/// Effective configuration, built once at process start and passed by
/// ownership into the server. Nothing reads configuration ambiently.
#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub store_dir: PathBuf,
}

impl Config {
    pub fn from_cli(cli: Cli) -> Self {
        Self {
            host: cli.host,
            port: cli.port,
            store_dir: cli.cache,
        }
    }
}

/// Returns the absolute path to the bundled static assets directory.
/// Uses CARGO_MANIFEST_DIR at compile time, so it resolves to
/// notes-backend/static/ regardless of the working directory at runtime.
pub fn static_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("static")
}
