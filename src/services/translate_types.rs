use std::path::PathBuf;

use serde::Serialize;

use crate::error::TranslateError;

/// A translation backend bound to one target language.
pub trait Translator {
    fn target_lang(&self) -> &str;

    fn translate(&self, text: &str) -> Result<String, TranslateError>;
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct LocaleReport {
    pub locale: String,
    pub lang_code: String,
    pub output: PathBuf,
    /// Strings returned by the service.
    pub translated: usize,
    /// Strings served from the in-run cache.
    pub cache_hits: usize,
    /// Strings that fell back to the source text after a service error.
    pub failed: usize,
    /// Empty or whitespace-only strings, never sent to the service.
    pub skipped: usize,
    pub placeholder_mismatches: usize,
    pub qa_issues: usize,
}

#[derive(Debug, Default, Serialize)]
pub struct RunReport {
    pub locales: Vec<LocaleReport>,
}

impl RunReport {
    pub fn failed(&self) -> usize {
        self.locales.iter().map(|l| l.failed).sum()
    }
}
