use std::path::PathBuf;
use std::time::Duration;

use crate::cli::Cli;
use crate::error::RunError;
use crate::model::locale::{self, TargetLocale};

pub const DEFAULT_SOURCE: &str = "auction-admin/locales/en.default.json";
pub const DEFAULT_OUTPUT: &str = "auction-admin/locales";
pub const DEFAULT_SOURCE_LANG: &str = "en";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    pub source: PathBuf,
    pub output_dir: PathBuf,
    pub targets: Vec<TargetLocale>,
    pub source_lang: String,
    pub endpoint: String,
    pub timeout: Duration,
    pub report: Option<PathBuf>,
}

impl TryFrom<Cli> for Config {
    type Error = RunError;

    /// Fails on unsupported locale codes, before anything touches disk or network.
    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        let targets = locale::select(cli.langs.as_deref())?;

        Ok(Config {
            source: cli.source,
            output_dir: cli.output_dir,
            targets,
            source_lang: cli.source_lang,
            endpoint: cli.endpoint,
            timeout: Duration::from_secs(cli.timeout_secs),
            report: cli.report,
        })
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::services::google::DEFAULT_ENDPOINT;

    fn parse(args: &[&str]) -> Result<Config, RunError> {
        let cli = Cli::try_parse_from(std::iter::once("locale-translator").chain(args.iter().copied()))
            .expect("arguments parse");
        Config::try_from(cli)
    }

    #[test]
    fn defaults_cover_every_locale() {
        let cfg = parse(&[]).unwrap();
        assert_eq!(cfg.source, PathBuf::from(DEFAULT_SOURCE));
        assert_eq!(cfg.output_dir, PathBuf::from(DEFAULT_OUTPUT));
        assert_eq!(cfg.targets.len(), locale::BUNDLED_LANGS.len());
        assert_eq!(cfg.source_lang, "en");
        assert_eq!(cfg.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(cfg.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert!(cfg.report.is_none());
    }

    #[test]
    fn flags_override_defaults() {
        let cfg = parse(&[
            "--source",
            "in/en.json",
            "--output-dir",
            "out",
            "--langs",
            "ja",
            "ko",
            "--timeout-secs",
            "5",
        ])
        .unwrap();
        assert_eq!(cfg.source, PathBuf::from("in/en.json"));
        assert_eq!(cfg.output_dir, PathBuf::from("out"));
        let locales: Vec<&str> = cfg.targets.iter().map(|t| t.locale.as_str()).collect();
        assert_eq!(locales, ["ja", "ko"]);
        assert_eq!(cfg.timeout, Duration::from_secs(5));
    }

    #[test]
    fn unsupported_locale_is_a_config_error() {
        assert!(matches!(
            parse(&["--langs", "de", "xx"]),
            Err(RunError::UnsupportedLocales(codes)) if codes == ["xx"]
        ));
    }
}
