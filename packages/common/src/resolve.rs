//! Translation resolution.
//!
//! Every piece of content has one canonical row and any number of
//! per-language overlays. Given the overlays that exist for one row, this
//! module picks the one a reader should see:
//!
//! 1. the requested language,
//! 2. otherwise the site default language,
//! 3. otherwise, under [`FinalFallback::AnyLanguage`], the overlay with the
//!    lowest language code,
//! 4. otherwise nothing, and the caller renders canonical fields only.
//!
//! Resolution never fails; at worst a row is shown with its canonical fields.

use serde::{Deserialize, Serialize};

use crate::language::LanguagePreference;

/// Anything tagged with the language it is written in.
pub trait Localized {
    fn language_code(&self) -> &str;
}

/// Which step of the fallback chain produced the effective translation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ResolvedFrom {
    /// Exact match for the requested language.
    Requested,
    /// The requested language was missing; the default language was used.
    Default,
    /// Neither was present; the lowest language code available was used.
    Any,
    /// No translation exists at all.
    None,
}

impl ResolvedFrom {
    pub fn is_fallback(&self) -> bool {
        !matches!(self, Self::Requested)
    }
}

/// What happens once neither the requested nor the default language exists.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinalFallback {
    /// Use the translation with the lowest language code.
    AnyLanguage,
    /// Render canonical fields only.
    #[default]
    CanonicalOnly,
}

/// Outcome of resolving one row's translations.
#[derive(Debug)]
pub struct Resolution<'a, T> {
    pub translation: Option<&'a T>,
    pub source: ResolvedFrom,
}

impl<'a, T> Clone for Resolution<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T> Copy for Resolution<'a, T> {}

impl<'a, T: Localized> Resolution<'a, T> {
    /// Language of the chosen translation, if any.
    pub fn language(&self) -> Option<&'a str> {
        self.translation.map(|t| t.language_code())
    }
}

/// Pick the effective translation from `candidates`.
///
/// `candidates` must all belong to the same canonical row. Duplicated
/// languages are tolerated; the first one wins.
pub fn resolve<'a, T: Localized>(
    candidates: &'a [T],
    requested: &str,
    default: &str,
    last_resort: FinalFallback,
) -> Resolution<'a, T> {
    if let Some(t) = candidates.iter().find(|t| t.language_code() == requested) {
        return Resolution {
            translation: Some(t),
            source: ResolvedFrom::Requested,
        };
    }
    if let Some(t) = candidates.iter().find(|t| t.language_code() == default) {
        return Resolution {
            translation: Some(t),
            source: ResolvedFrom::Default,
        };
    }
    let any = match last_resort {
        FinalFallback::AnyLanguage => candidates
            .iter()
            .min_by(|a, b| a.language_code().cmp(b.language_code())),
        FinalFallback::CanonicalOnly => None,
    };
    match any {
        Some(t) => Resolution {
            translation: Some(t),
            source: ResolvedFrom::Any,
        },
        None => Resolution {
            translation: None,
            source: ResolvedFrom::None,
        },
    }
}

/// [`resolve`] driven by a [`LanguagePreference`].
pub fn resolve_for<'a, T: Localized>(
    candidates: &'a [T],
    preference: &LanguagePreference,
) -> Resolution<'a, T> {
    resolve(
        candidates,
        preference.requested.as_str(),
        preference.default.as_str(),
        preference.last_resort,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::LanguageCode;

    #[derive(Debug, PartialEq)]
    struct Row {
        lang: &'static str,
        degree: &'static str,
    }

    impl Localized for Row {
        fn language_code(&self) -> &str {
            self.lang
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row {
                lang: "zh",
                degree: "学士",
            },
            Row {
                lang: "en",
                degree: "BSc",
            },
        ]
    }

    #[test]
    fn exact_match_wins() {
        let rows = rows();
        let r = resolve(&rows, "zh", "en", FinalFallback::AnyLanguage);
        assert_eq!(r.source, ResolvedFrom::Requested);
        assert_eq!(r.translation.unwrap().degree, "学士");
        assert!(!r.source.is_fallback());
    }

    #[test]
    fn falls_back_to_default_language() {
        let rows = rows();
        let r = resolve(&rows, "fr", "en", FinalFallback::AnyLanguage);
        assert_eq!(r.source, ResolvedFrom::Default);
        assert_eq!(r.translation.unwrap().degree, "BSc");
        assert_eq!(r.language(), Some("en"));
    }

    #[test]
    fn falls_back_to_lowest_code_when_default_missing() {
        let rows = rows();
        let r = resolve(&rows, "fr", "de", FinalFallback::AnyLanguage);
        assert_eq!(r.source, ResolvedFrom::Any);
        assert_eq!(r.language(), Some("en"));
    }

    #[test]
    fn canonical_only_policy_skips_the_any_tier() {
        let rows = rows();
        assert_eq!(
            resolve(&rows, "zh", "en", FinalFallback::CanonicalOnly)
                .translation
                .unwrap()
                .degree,
            "学士"
        );
        assert_eq!(
            resolve(&rows, "fr", "en", FinalFallback::CanonicalOnly)
                .translation
                .unwrap()
                .degree,
            "BSc"
        );

        let r = resolve(&rows, "fr", "de", FinalFallback::CanonicalOnly);
        assert_eq!(r.source, ResolvedFrom::None);
        assert!(r.translation.is_none());
    }

    #[test]
    fn no_candidates_resolves_to_none() {
        let rows: Vec<Row> = Vec::new();
        let r = resolve(&rows, "fr", "de", FinalFallback::AnyLanguage);
        assert_eq!(r.source, ResolvedFrom::None);
        assert!(r.translation.is_none());
        assert!(r.language().is_none());
    }

    #[test]
    fn preference_wrapper_matches_plain_resolve() {
        let rows = rows();
        let pref = LanguagePreference::new(
            LanguageCode::parse("fr").unwrap(),
            LanguageCode::parse("zh").unwrap(),
        );
        let r = resolve_for(&rows, &pref);
        assert_eq!(r.source, ResolvedFrom::Default);
        assert_eq!(r.translation.unwrap().degree, "学士");
    }

    #[test]
    fn default_preference_never_borrows_an_unrelated_language() {
        let rows = rows();
        let pref = LanguagePreference::new(
            LanguageCode::parse("fr").unwrap(),
            LanguageCode::parse("de").unwrap(),
        );
        let r = resolve_for(&rows, &pref);
        assert_eq!(r.source, ResolvedFrom::None);
        assert!(r.translation.is_none());

        let r = resolve_for(&rows, &pref.with_last_resort(FinalFallback::AnyLanguage));
        assert_eq!(r.source, ResolvedFrom::Any);
        assert_eq!(r.translation.unwrap().degree, "BSc");
    }
}
