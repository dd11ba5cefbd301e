use std::path::PathBuf;

use clap::Parser;

use crate::config::{DEFAULT_OUTPUT, DEFAULT_SOURCE, DEFAULT_SOURCE_LANG, DEFAULT_TIMEOUT_SECS};
use crate::services::google::DEFAULT_ENDPOINT;

/// Translate locale JSON files from a source language.
#[derive(Debug, Parser)]
#[command(name = "locale-translator", version)]
pub struct Cli {
    /// Path to the source JSON
    #[arg(long, env = "LOCALES_SOURCE", default_value = DEFAULT_SOURCE)]
    pub source: PathBuf,

    /// Directory to write translated files
    #[arg(long, env = "LOCALES_OUTPUT_DIR", default_value = DEFAULT_OUTPUT)]
    pub output_dir: PathBuf,

    /// Locale codes to translate (default: all configured languages)
    #[arg(long, num_args = 1..)]
    pub langs: Option<Vec<String>>,

    /// Language of the source file, as understood by the translation service
    #[arg(long, default_value = DEFAULT_SOURCE_LANG)]
    pub source_lang: String,

    /// Translation endpoint
    #[arg(long, env = "TRANSLATE_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Also write a JSON run report to this path
    #[arg(long)]
    pub report: Option<PathBuf>,
}
