use std::fs;
use std::path::{Path, PathBuf};

use encoding_rs::UTF_8;
use serde_json::Value;

use crate::error::RunError;

pub fn read_source(path: &Path) -> Result<Value, RunError> {
    let bytes = fs::read(path).map_err(|e| RunError::io(path, e))?;

    // Editors on Windows like to prepend a BOM (EF BB BF); serde_json rejects it.
    let (text, had_errors) = UTF_8.decode_with_bom_removal(&bytes);
    if had_errors {
        return Err(RunError::InvalidUtf8 {
            path: path.to_path_buf(),
        });
    }

    serde_json::from_str(&text).map_err(|source| RunError::Json {
        path: path.to_path_buf(),
        source,
    })
}

pub fn prepare_output_dir(dir: &Path) -> Result<(), RunError> {
    fs::create_dir_all(dir).map_err(|e| RunError::io(dir, e))
}

pub fn locale_path(dir: &Path, locale: &str) -> PathBuf {
    dir.join(format!("{locale}.json"))
}

/// Writes `<dir>/<locale>.json` with two-space indentation and non-ASCII
/// characters left as-is.
pub fn write_locale(dir: &Path, locale: &str, value: &Value) -> Result<PathBuf, RunError> {
    let path = locale_path(dir, locale);
    write_json(&path, value)?;
    Ok(path)
}

pub fn write_json<T: serde::Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), RunError> {
    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');
    write_atomic(path, json.as_bytes())
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), RunError> {
    let tmp = tmp_path(path);

    if let Some(parent) = tmp.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| RunError::io(parent, e))?;
        }
    }

    fs::write(&tmp, bytes).map_err(|e| RunError::io(&tmp, e))?;

    // rename replaces an existing target in one step.
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(RunError::io(path, e));
    }

    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut p = path.to_path_buf();
    let file_name = match path.file_name().and_then(|s| s.to_str()) {
        Some(n) => n.to_string(),
        None => "locale".to_string(),
    };
    p.set_file_name(format!("{file_name}.tmp"));
    p
}
