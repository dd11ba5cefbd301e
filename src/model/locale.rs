use serde::Serialize;

use crate::error::RunError;

/// Configured locales, in the order they are processed by default.
/// Left: output file name. Right: code sent to the translation service.
pub const BUNDLED_LANGS: &[(&str, &str)] = &[
    ("pl", "pl"),
    ("de", "de"),
    ("fr", "fr"),
    ("it", "it"),
    ("nl", "nl"),
    ("ar", "ar"),
    ("ja", "ja"),
    ("ko", "ko"),
];

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct TargetLocale {
    pub locale: String,
    pub lang_code: String,
}

impl TargetLocale {
    fn bundled(locale: &str, lang_code: &str) -> Self {
        TargetLocale {
            locale: locale.to_string(),
            lang_code: lang_code.to_string(),
        }
    }
}

fn lookup(code: &str) -> Option<&'static str> {
    BUNDLED_LANGS
        .iter()
        .find(|(locale, _)| *locale == code)
        .map(|(_, lang)| *lang)
}

/// Resolves the requested locale codes against [`BUNDLED_LANGS`].
///
/// `None` or an empty request selects every configured locale. Requested
/// codes keep the caller's order, duplicates are dropped. Any unknown code
/// fails the whole selection and every unknown code is named in the error.
pub fn select(requested: Option<&[String]>) -> Result<Vec<TargetLocale>, RunError> {
    let requested = match requested {
        Some(r) if !r.is_empty() => r,
        _ => {
            return Ok(BUNDLED_LANGS
                .iter()
                .map(|(locale, lang)| TargetLocale::bundled(locale, lang))
                .collect())
        }
    };

    let missing: Vec<String> = requested
        .iter()
        .filter(|code| lookup(code).is_none())
        .cloned()
        .collect();
    if !missing.is_empty() {
        return Err(RunError::UnsupportedLocales(missing));
    }

    let mut targets: Vec<TargetLocale> = Vec::with_capacity(requested.len());
    for code in requested {
        if targets.iter().any(|t| &t.locale == code) {
            continue;
        }
        if let Some(lang) = lookup(code) {
            targets.push(TargetLocale::bundled(code, lang));
        }
    }

    Ok(targets)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn no_filter_selects_everything_in_configured_order() {
        let all = select(None).unwrap();
        let locales: Vec<&str> = all.iter().map(|t| t.locale.as_str()).collect();
        assert_eq!(locales, ["pl", "de", "fr", "it", "nl", "ar", "ja", "ko"]);

        let empty = select(Some(&[])).unwrap();
        assert_eq!(empty.len(), BUNDLED_LANGS.len());
    }

    #[test]
    fn filter_keeps_requested_order_and_drops_duplicates() {
        let req = codes(&["fr", "de", "fr"]);
        let targets = select(Some(&req)).unwrap();
        assert_eq!(
            targets,
            vec![
                TargetLocale::bundled("fr", "fr"),
                TargetLocale::bundled("de", "de"),
            ]
        );
    }

    #[test]
    fn unknown_codes_are_all_reported() {
        let req = codes(&["de", "xx", "pt"]);
        match select(Some(&req)) {
            Err(RunError::UnsupportedLocales(missing)) => {
                assert_eq!(missing, codes(&["xx", "pt"]))
            }
            other => panic!("expected unsupported locales, got {other:?}"),
        }
    }

    #[test]
    fn unsupported_message_lists_codes() {
        let err = RunError::UnsupportedLocales(codes(&["xx", "yy"]));
        assert_eq!(err.to_string(), "Unsupported locale codes: xx, yy");
    }
}
