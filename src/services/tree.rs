use std::collections::HashMap;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::services::placeholder;
use crate::services::translate_types::{LocaleReport, Translator};

/// (original string, target language) -> translated string.
pub type TranslationCache = HashMap<(String, String), String>;

/// Walks one document for one target language. The cache lives and dies
/// with this value.
pub struct TreeTranslator<'a, T: Translator + ?Sized> {
    translator: &'a T,
    cache: TranslationCache,
    report: LocaleReport,
}

impl<'a, T: Translator + ?Sized> TreeTranslator<'a, T> {
    pub fn new(translator: &'a T) -> Self {
        TreeTranslator {
            translator,
            cache: TranslationCache::new(),
            report: LocaleReport {
                lang_code: translator.target_lang().to_string(),
                ..LocaleReport::default()
            },
        }
    }

    pub fn translate(&mut self, value: &Value) -> Value {
        match value {
            Value::Object(map) => {
                let mut out = Map::with_capacity(map.len());
                for (key, v) in map {
                    out.insert(key.clone(), self.translate(v));
                }
                Value::Object(out)
            }
            Value::Array(items) => Value::Array(items.iter().map(|v| self.translate(v)).collect()),
            Value::String(s) => Value::String(self.translate_str(s)),
            Value::Number(_) | Value::Bool(_) | Value::Null => value.clone(),
        }
    }

    pub fn translate_str(&mut self, text: &str) -> String {
        let translator = self.translator;
        let target = translator.target_lang();
        let key = (text.to_string(), target.to_string());

        if let Some(hit) = self.cache.get(&key) {
            debug!(target_lang = target, text, "cache hit");
            self.report.cache_hits += 1;
            return hit.clone();
        }

        let guarded = placeholder::protect(text);

        let translated = if guarded.safe.trim().is_empty() {
            self.report.skipped += 1;
            guarded.safe.clone()
        } else {
            match translator.translate(&guarded.safe) {
                Ok(t) => {
                    self.report.translated += 1;
                    t
                }
                Err(e) => {
                    warn!("Failed to translate '{text}' to {target}: {e}. Keeping original.");
                    self.report.failed += 1;
                    guarded.safe.clone()
                }
            }
        };

        let restored = guarded.restore(&translated);
        if !restored.missing.is_empty() {
            let lost: Vec<&str> = restored
                .missing
                .iter()
                .map(|&i| guarded.tokens[i].as_str())
                .collect();
            warn!(
                "Placeholders {lost:?} were dropped while translating '{text}' to {target}: got '{}'",
                restored.text
            );
            self.report.placeholder_mismatches += 1;
        }

        self.cache.insert(key, restored.text.clone());
        restored.text
    }

    pub fn into_report(self) -> LocaleReport {
        self.report
    }
}
