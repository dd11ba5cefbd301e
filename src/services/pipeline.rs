use std::path::Path;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::RunError;
use crate::model::locale::TargetLocale;
use crate::services::{
    locale_files, qa,
    translate_types::{LocaleReport, RunReport, Translator},
    tree::TreeTranslator,
};

/// Translates `source` into every target, one locale after another, and
/// writes `<output_dir>/<locale>.json` for each.
///
/// `make_translator` is called once per locale. Per-string translation
/// failures are absorbed by the tree walk; only filesystem errors and
/// errors from `make_translator` abort the run.
pub fn run<T, F>(
    source: &Value,
    targets: &[TargetLocale],
    output_dir: &Path,
    mut make_translator: F,
) -> Result<RunReport, RunError>
where
    T: Translator,
    F: FnMut(&TargetLocale) -> Result<T, RunError>,
{
    locale_files::prepare_output_dir(output_dir)?;

    let mut report = RunReport::default();

    for target in targets {
        info!("Translating locale '{}'...", target.locale);

        let translator = make_translator(target)?;
        let mut tree = TreeTranslator::new(&translator);
        let translated = tree.translate(source);

        let issues = qa::run(source, &translated);
        for issue in &issues {
            debug!(locale = %target.locale, path = %issue.path, code = %issue.code, "{}", issue.message);
        }

        let output = locale_files::write_locale(output_dir, &target.locale, &translated)?;

        let locale_report = LocaleReport {
            locale: target.locale.clone(),
            output,
            qa_issues: issues.len(),
            ..tree.into_report()
        };

        if locale_report.failed > 0 {
            warn!(
                "{} string(s) left untranslated in '{}'",
                locale_report.failed, target.locale
            );
        }
        info!(
            locale = %target.locale,
            translated = locale_report.translated,
            cache_hits = locale_report.cache_hits,
            failed = locale_report.failed,
            "wrote {}",
            locale_report.output.display()
        );

        report.locales.push(locale_report);
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use serde_json::json;

    use super::*;
    use crate::model::locale;
    use crate::services::tree::tests::Upper;

    fn file_names(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn writes_one_file_per_requested_locale() {
        let dir = tempfile::tempdir().unwrap();
        let out_dir = dir.path().join("locales");
        let source = json!({"greeting": "Hello {{name}}", "count": 3});

        let requested = vec!["de".to_string(), "fr".to_string()];
        let targets = locale::select(Some(&requested)).unwrap();

        let report = run(&source, &targets, &out_dir, |t| Ok(Upper::new(&t.lang_code))).unwrap();

        assert_eq!(file_names(&out_dir), ["de.json", "fr.json"]);

        let de: Value =
            serde_json::from_str(&fs::read_to_string(out_dir.join("de.json")).unwrap()).unwrap();
        assert_eq!(de, json!({"greeting": "HELLO {{name}}", "count": 3}));

        let locales: Vec<&str> = report.locales.iter().map(|l| l.locale.as_str()).collect();
        assert_eq!(locales, ["de", "fr"]);
        assert_eq!(report.locales[0].translated, 1);
        assert_eq!(report.locales[0].output, out_dir.join("de.json"));
        assert_eq!(report.failed(), 0);
    }

    #[test]
    fn each_locale_gets_a_fresh_cache() {
        let dir = tempfile::tempdir().unwrap();
        let source = json!(["Same", "Same"]);
        let targets = locale::select(Some(&["pl".to_string(), "it".to_string()])).unwrap();

        let report = run(&source, &targets, dir.path(), |t| Ok(Upper::new(&t.lang_code))).unwrap();

        for l in &report.locales {
            assert_eq!(l.translated, 1, "locale {}", l.locale);
            assert_eq!(l.cache_hits, 1, "locale {}", l.locale);
        }
    }

    #[test]
    fn untranslated_output_is_counted_by_qa() {
        let dir = tempfile::tempdir().unwrap();
        let source = json!({"a": "Hello", "b": "{{only}}", "c": ""});
        let targets = locale::select(Some(&["ar".to_string()])).unwrap();

        // A translator that hands text back unchanged.
        struct Echo;
        impl Translator for Echo {
            fn target_lang(&self) -> &str {
                "ar"
            }
            fn translate(&self, text: &str) -> Result<String, crate::error::TranslateError> {
                Ok(text.to_string())
            }
        }

        let report = run(&source, &targets, dir.path(), |_| Ok(Echo)).unwrap();
        // Only "Hello" is flagged: "{{only}}" has nothing to translate.
        assert_eq!(report.locales[0].qa_issues, 1);
        assert_eq!(report.locales[0].translated, 2);
        assert_eq!(report.locales[0].skipped, 1);
    }

    #[test]
    fn factory_errors_abort_the_run() {
        let dir = tempfile::tempdir().unwrap();
        let targets = locale::select(None).unwrap();
        let mut calls = 0;

        let result = run(&json!({}), &targets, dir.path(), |_| -> Result<Upper, RunError> {
            calls += 1;
            Err(RunError::UnsupportedLocales(vec!["pl".into()]))
        });

        assert!(result.is_err());
        assert_eq!(calls, 1);
        assert!(file_names(dir.path()).is_empty());
    }
}
