//! Masks interpolation tokens (`{{name}}`, `{count}`) before a string is
//! sent for translation and puts them back afterwards.

use once_cell::sync::Lazy;
use rand::{thread_rng, Rng};
use regex::Regex;

static PLACEHOLDER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{.*?\}\}|\{[^{}]+\}").expect("placeholder pattern"));

static MARKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"__TOKEN\d*_\d+__").expect("marker pattern"));

const MARKER_PREFIX: &str = "__TOKEN";

/// A string with its placeholders swapped for inert markers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guarded {
    pub safe: String,
    pub tokens: Vec<String>,
    prefix: String,
}

/// Result of putting placeholders back into a translated string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Restored {
    pub text: String,
    /// Indices into [`Guarded::tokens`] whose marker was not found.
    pub missing: Vec<usize>,
}

/// Returns every placeholder in `text`, in order of appearance.
pub fn tokens(text: &str) -> Vec<&str> {
    PLACEHOLDER_RE.find_iter(text).map(|m| m.as_str()).collect()
}

pub fn protect(text: &str) -> Guarded {
    if !PLACEHOLDER_RE.is_match(text) {
        return Guarded {
            safe: text.to_string(),
            tokens: Vec::new(),
            prefix: String::new(),
        };
    }

    let prefix = marker_prefix(text);
    let mut tokens: Vec<String> = Vec::new();

    let safe = PLACEHOLDER_RE
        .replace_all(text, |caps: &regex::Captures| {
            tokens.push(caps[0].to_string());
            format!("{prefix}{}__", tokens.len() - 1)
        })
        .into_owned();

    Guarded {
        safe,
        tokens,
        prefix,
    }
}

/// True when `safe` still has something a translator could work on once
/// markers are ignored.
pub fn has_translatable_text(safe: &str) -> bool {
    MARKER_RE
        .split(safe)
        .any(|part| part.chars().any(char::is_alphabetic))
}

impl Guarded {
    pub fn marker(&self, index: usize) -> String {
        format!("{}{}__", self.prefix, index)
    }

    pub fn restore(&self, translated: &str) -> Restored {
        let mut text = translated.to_string();
        let mut missing = Vec::new();

        for (idx, token) in self.tokens.iter().enumerate() {
            let marker = self.marker(idx);
            if text.contains(&marker) {
                text = text.replace(&marker, token);
            } else {
                missing.push(idx);
            }
        }

        Restored { text, missing }
    }
}

/// `__TOKEN_` unless the text already contains that prefix, in which case a
/// random numeric salt is mixed in until the prefix is unique to this text.
fn marker_prefix(text: &str) -> String {
    let plain = format!("{MARKER_PREFIX}_");
    if !text.contains(MARKER_PREFIX) {
        return plain;
    }

    let mut rng = thread_rng();
    loop {
        let salt: u32 = rng.gen_range(1000..1_000_000);
        let candidate = format!("{MARKER_PREFIX}{salt}_");
        if !text.contains(&candidate) {
            return candidate;
        }
    }
}
