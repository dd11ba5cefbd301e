use anyhow::Context;
use clap::Parser;
use once_cell::unsync::OnceCell;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod cli;
mod config;
mod error;
mod model;
mod services;

use cli::Cli;
use config::Config;
use error::RunError;
use model::locale::TargetLocale;
use services::google::{self, GoogleTranslator};
use services::translate_types::{RunReport, Translator};
use services::{locale_files, pipeline};

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("locale_translator=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Built on first use so a rejected command line never sets up networking.
    let client = OnceCell::new();

    let report = run(Cli::parse(), |config, target| {
        let client = client.get_or_try_init(|| google::build_client(config.timeout))?;
        Ok(GoogleTranslator::new(
            client,
            &config.endpoint,
            &config.source_lang,
            &target.lang_code,
        ))
    })?;

    for l in &report.locales {
        println!(
            "{}: {} translated, {} cached, {} failed, {} skipped -> {}",
            l.locale,
            l.translated,
            l.cache_hits,
            l.failed,
            l.skipped,
            l.output.display()
        );
    }
    if report.failed() > 0 {
        warn!(
            "{} string(s) kept their source text, see warnings above",
            report.failed()
        );
    }
    println!("Translation complete.");

    Ok(())
}

/// Validates the command line, loads the source document and writes every
/// requested locale. Locale codes are checked before any file is touched.
fn run<T, F>(cli: Cli, mut make_translator: F) -> anyhow::Result<RunReport>
where
    T: Translator,
    F: FnMut(&Config, &TargetLocale) -> Result<T, RunError>,
{
    let config = Config::try_from(cli)?;

    let source = locale_files::read_source(&config.source)
        .context("failed to load source locale file")?;
    info!(
        "Loaded {} ({} target locale(s))",
        config.source.display(),
        config.targets.len()
    );

    let report = pipeline::run(&source, &config.targets, &config.output_dir, |target| {
        make_translator(&config, target)
    })?;

    if let Some(path) = &config.report {
        locale_files::write_json(path, &report)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
    }

    Ok(report)
}
