use axum::{
    extract::{FromRequestParts, Query},
    http::{header::ACCEPT_LANGUAGE, request::Parts},
};
use common::language::parse_accept_language;
use common::{LanguageCode, LanguagePreference};
use serde::Deserialize;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Deserialize)]
struct LangParam {
    lang: Option<String>,
}

/// The reader's language preference for this request.
///
/// Taken from `?lang=`, then the first `Accept-Language` entry, then the
/// configured default. A malformed `?lang=` is rejected; a malformed header
/// is ignored.
pub struct RequestedLanguage(pub LanguagePreference);

impl FromRequestParts<AppState> for RequestedLanguage {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let default = state.config.i18n.default_language.clone();

        let Query(param) = Query::<LangParam>::try_from_uri(&parts.uri)
            .map_err(|e| AppError::validation(e.body_text()))?;

        let requested = match param.lang.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => {
                Some(LanguageCode::parse(raw).map_err(|e| AppError::Validation {
                    field: Some("lang"),
                    message: e.to_string(),
                })?)
            }
            _ => parts
                .headers
                .get(ACCEPT_LANGUAGE)
                .and_then(|v| v.to_str().ok())
                .and_then(parse_accept_language),
        };

        let preference = match requested {
            Some(requested) => LanguagePreference::new(requested, default),
            None => LanguagePreference::default_only(default),
        };
        Ok(RequestedLanguage(
            preference.with_last_resort(state.config.i18n.final_fallback),
        ))
    }
}
