use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::resolve::FinalFallback;

/// Longest accepted language tag, e.g. `zh-hant-tw` fits comfortably.
pub const MAX_CODE_LEN: usize = 16;

/// A normalized language tag such as `en`, `zh` or `pt-br`.
///
/// Codes are trimmed and lower-cased on parse. The primary subtag is 2-3 ASCII
/// letters; any further subtags are 2-8 ASCII alphanumerics separated by `-`.
/// Once stored, a code is the identity of a language row and never changes.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, utoipa::ToSchema)]
#[serde(transparent)]
#[schema(value_type = String, example = "en")]
pub struct LanguageCode(String);

/// Error when parsing a malformed language code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid language code '{invalid}': expected a tag like 'en' or 'pt-br'")]
pub struct InvalidLanguageCode {
    invalid: String,
}

impl LanguageCode {
    pub fn parse(raw: &str) -> Result<Self, InvalidLanguageCode> {
        let code = raw.trim().to_ascii_lowercase();
        if is_well_formed(&code) {
            Ok(Self(code))
        } else {
            Err(InvalidLanguageCode {
                invalid: raw.to_string(),
            })
        }
    }

    /// Wrap a code known to be well-formed, e.g. a compile-time constant.
    pub(crate) fn from_trusted(code: &str) -> Self {
        debug_assert!(is_well_formed(code));
        Self(code.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The leading subtag, e.g. `zh` for `zh-cn`.
    pub fn primary(&self) -> LanguageCode {
        match self.0.split_once('-') {
            Some((primary, _)) => Self(primary.to_string()),
            None => self.clone(),
        }
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

fn is_well_formed(code: &str) -> bool {
    if code.is_empty() || code.len() > MAX_CODE_LEN {
        return false;
    }
    let mut parts = code.split('-');
    let primary_ok = parts
        .next()
        .is_some_and(|p| (2..=3).contains(&p.len()) && p.chars().all(|c| c.is_ascii_lowercase()));
    primary_ok
        && parts.all(|p| {
            (2..=8).contains(&p.len())
                && p.chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        })
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for LanguageCode {
    type Err = InvalidLanguageCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for LanguageCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for LanguageCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// The language a reader asked for, paired with the site-wide default.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LanguagePreference {
    pub requested: LanguageCode,
    pub default: LanguageCode,
    pub last_resort: FinalFallback,
}

impl LanguagePreference {
    pub fn new(requested: LanguageCode, default: LanguageCode) -> Self {
        Self {
            requested,
            default,
            last_resort: FinalFallback::default(),
        }
    }

    /// Preference that only ever asks for the default language.
    pub fn default_only(default: LanguageCode) -> Self {
        Self::new(default.clone(), default)
    }

    pub fn with_last_resort(mut self, last_resort: FinalFallback) -> Self {
        self.last_resort = last_resort;
        self
    }
}

/// Extract the first language from an `Accept-Language` header value.
///
/// Quality weights are ignored and only the primary subtag is kept, so
/// `zh-CN,zh;q=0.9,en;q=0.8` yields `zh`. Wildcards and malformed entries
/// are skipped.
pub fn parse_accept_language(header: &str) -> Option<LanguageCode> {
    header
        .split(',')
        .filter_map(|entry| entry.split(';').next())
        .map(str::trim)
        .filter(|tag| !tag.is_empty() && *tag != "*")
        .find_map(|tag| LanguageCode::parse(tag).ok())
        .map(|code| code.primary())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_normalizes_case_and_whitespace() {
        let code = LanguageCode::parse("  EN ").unwrap();
        assert_eq!(code.as_str(), "en");

        let code = LanguageCode::parse("pt-BR").unwrap();
        assert_eq!(code.as_str(), "pt-br");
        assert_eq!(code.primary().as_str(), "pt");
    }

    #[test]
    fn parse_rejects_malformed_codes() {
        for raw in ["", "e", "english", "en_US", "en-", "-en", "e1", "en-x", "中文"] {
            assert!(LanguageCode::parse(raw).is_err(), "{raw:?} should be rejected");
        }
        let too_long = format!("en-{}", "a".repeat(MAX_CODE_LEN));
        assert!(LanguageCode::parse(&too_long).is_err());
    }

    #[test]
    fn deserialize_validates() {
        let code: LanguageCode = serde_json::from_str("\"ZH\"").unwrap();
        assert_eq!(code.as_str(), "zh");
        assert!(serde_json::from_str::<LanguageCode>("\"not a code\"").is_err());
    }

    #[test]
    fn accept_language_takes_first_usable_primary_subtag() {
        assert_eq!(
            parse_accept_language("zh-CN,zh;q=0.9,en;q=0.8").unwrap().as_str(),
            "zh"
        );
        assert_eq!(parse_accept_language("*, fr;q=0.5").unwrap().as_str(), "fr");
        assert_eq!(parse_accept_language("en").unwrap().as_str(), "en");
        assert!(parse_accept_language("").is_none());
        assert!(parse_accept_language("*").is_none());
    }
}
