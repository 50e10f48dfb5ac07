use serde::Deserialize;

use crate::language::LanguageCode;
use crate::resolve::FinalFallback;

/// Site-wide language settings.
#[derive(Debug, Deserialize, Clone)]
pub struct I18nConfig {
    /// Language used when the requested one has no translation. Default: "en".
    #[serde(default = "default_language")]
    pub default_language: LanguageCode,
    /// Tier used once both the requested and the default language are
    /// missing: `canonical_only` (default) or `any_language`.
    #[serde(default)]
    pub final_fallback: FinalFallback,
}

fn default_language() -> LanguageCode {
    LanguageCode::from_trusted("en")
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            default_language: default_language(),
            final_fallback: FinalFallback::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_take_defaults() {
        let config: I18nConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.default_language.as_str(), "en");
        assert_eq!(config.final_fallback, FinalFallback::CanonicalOnly);
        assert_eq!(I18nConfig::default().final_fallback, FinalFallback::CanonicalOnly);

        let config: I18nConfig =
            serde_json::from_str(r#"{"default_language":"ZH","final_fallback":"any_language"}"#)
                .unwrap();
        assert_eq!(config.default_language.as_str(), "zh");
        assert_eq!(config.final_fallback, FinalFallback::AnyLanguage);
    }
}
