use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde_json::Value;

use crate::error::{RunError, TranslateError};
use crate::services::translate_types::Translator;

pub const DEFAULT_ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";

/// The public endpoint rejects longer payloads.
pub const MAX_CHARS: usize = 5000;

const ERROR_SNIPPET_LEN: usize = 400;

pub fn build_client(timeout: Duration) -> Result<Client, RunError> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(RunError::Client)
}

/// Google Translate bound to one source/target language pair.
pub struct GoogleTranslator<'a> {
    client: &'a Client,
    endpoint: String,
    source_lang: String,
    target_lang: String,
}

impl<'a> GoogleTranslator<'a> {
    pub fn new(client: &'a Client, endpoint: &str, source_lang: &str, target_lang: &str) -> Self {
        GoogleTranslator {
            client,
            endpoint: endpoint.to_string(),
            source_lang: source_lang.to_string(),
            target_lang: target_lang.to_string(),
        }
    }

    fn request(&self, text: &str) -> Result<String, TranslateError> {
        let params = [
            ("client", "gtx"),
            ("sl", self.source_lang.as_str()),
            ("tl", self.target_lang.as_str()),
            ("dt", "t"),
            ("q", text),
        ];

        let resp = self.client.get(self.endpoint.as_str()).query(&params).send()?;
        let status = resp.status();

        // Read as text first so an error body is not lost when it isn't JSON.
        let body = resp.text()?;

        if !status.is_success() {
            return Err(TranslateError::Status {
                status: status.as_u16(),
                message: extract_error_message(status, &body),
            });
        }

        let json: Value = serde_json::from_str(&body)
            .map_err(|e| TranslateError::InvalidResponse(e.to_string()))?;

        parse_response(&json)
    }
}

impl Translator for GoogleTranslator<'_> {
    fn target_lang(&self) -> &str {
        &self.target_lang
    }

    fn translate(&self, text: &str) -> Result<String, TranslateError> {
        let core = text.trim();
        if core.is_empty() || self.source_lang == self.target_lang {
            return Ok(text.to_string());
        }

        let len = core.chars().count();
        if len > MAX_CHARS {
            return Err(TranslateError::TooLong(len));
        }

        let translated = self.request(core)?;
        Ok(reattach_whitespace(text, translated.trim()))
    }
}

/// Joins the sentence fragments of a `translate_a/single` response:
/// `[[["Hallo ", "Hello ", ...], ["Welt", "world", ...]], ...]`.
pub fn parse_response(json: &Value) -> Result<String, TranslateError> {
    let sentences = json
        .get(0)
        .and_then(|v| v.as_array())
        .ok_or_else(|| TranslateError::InvalidResponse("missing sentence array".into()))?;

    let mut out = String::new();
    for sentence in sentences {
        if let Some(part) = sentence.get(0).and_then(|v| v.as_str()) {
            out.push_str(part);
        }
    }

    if out.trim().is_empty() {
        return Err(TranslateError::EmptyResponse);
    }

    Ok(out)
}

fn reattach_whitespace(original: &str, translated: &str) -> String {
    let lead = &original[..original.len() - original.trim_start().len()];
    let trail = &original[original.trim_end().len()..];
    format!("{lead}{translated}{trail}")
}

fn extract_error_message(status: StatusCode, body_text: &str) -> String {
    // Common shapes: { "error": { "message": "..." } } or { "message": "..." }
    if let Ok(v) = serde_json::from_str::<Value>(body_text) {
        if let Some(msg) = v
            .get("error")
            .and_then(|e| e.get("message"))
            .and_then(|m| m.as_str())
        {
            return msg.to_string();
        }
        if let Some(msg) = v.get("message").and_then(|m| m.as_str()) {
            return msg.to_string();
        }
    }

    let trimmed = body_text.trim();
    if trimmed.is_empty() {
        return status
            .canonical_reason()
            .unwrap_or("no response body")
            .to_string();
    }

    match trimmed.char_indices().nth(ERROR_SNIPPET_LEN) {
        Some((cut, _)) => format!("{}...", &trimmed[..cut]),
        None => trimmed.to_string(),
    }
}
