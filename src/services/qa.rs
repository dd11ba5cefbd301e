use serde::Serialize;
use serde_json::Value;

use crate::services::placeholder;

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct QaIssue {
    pub path: String,
    pub code: String,
    pub message: String,
}

/// Compares a translated document with its source, leaf by leaf.
pub fn run(source: &Value, translated: &Value) -> Vec<QaIssue> {
    let mut issues: Vec<QaIssue> = Vec::new();
    walk(source, translated, "", &mut issues);
    issues
}

fn walk(source: &Value, translated: &Value, path: &str, issues: &mut Vec<QaIssue>) {
    match (source, translated) {
        (Value::Object(src), Value::Object(out)) => {
            for (key, s) in src {
                let child = if path.is_empty() {
                    key.clone()
                } else {
                    format!("{path}.{key}")
                };
                match out.get(key) {
                    Some(t) => walk(s, t, &child, issues),
                    None => issues.push(issue(&child, "MISSING_KEY", "Key absent from translation")),
                }
            }
        }
        (Value::Array(src), Value::Array(out)) => {
            if src.len() != out.len() {
                issues.push(issue(
                    path,
                    "LENGTH_MISMATCH",
                    &format!("Expected {} items, found {}", src.len(), out.len()),
                ));
            }
            for (idx, (s, t)) in src.iter().zip(out).enumerate() {
                walk(s, t, &format!("{path}[{idx}]"), issues);
            }
        }
        (Value::String(src), Value::String(out)) => check_string(src, out, path, issues),
        (s, t) if s == t => {}
        _ => issues.push(issue(path, "TYPE_MISMATCH", "Value type differs from source")),
    }
}

fn check_string(src: &str, out: &str, path: &str, issues: &mut Vec<QaIssue>) {
    let expected = placeholder::tokens(src);
    let found = placeholder::tokens(out);

    if expected != found {
        issues.push(issue(
            path,
            "PLACEHOLDER_MISMATCH",
            &format!("Expected placeholders {expected:?}, found {found:?}"),
        ));
    }

    // Identical text is only suspicious when there was something to translate.
    if src == out && placeholder::has_translatable_text(&placeholder::protect(src).safe) {
        issues.push(issue(
            path,
            "SAME_AS_ORIGINAL",
            "Translation is identical to the source text",
        ));
    }
}

fn issue(path: &str, code: &str, message: &str) -> QaIssue {
    QaIssue {
        path: path.to_string(),
        code: code.to_string(),
        message: message.to_string(),
    }
}
