use chrono::NaiveDate;

use super::{StoreError, StoreResult};

/// Short labels: titles, names, institutions.
pub const MAX_LABEL_LEN: usize = 256;
/// One-paragraph fields: summaries, headlines, locations.
pub const MAX_SUMMARY_LEN: usize = 1024;
/// Long-form prose: descriptions, abstracts, post bodies.
pub const MAX_BODY_LEN: usize = 100_000;
pub const MAX_URL_LEN: usize = 2048;
pub const MAX_SLUG_LEN: usize = 128;

/// A required text field: trimmed, 1 to `max` Unicode characters.
pub fn required_text(field: &'static str, value: &str, max: usize) -> StoreResult<()> {
    let value = value.trim();
    if value.is_empty() || value.chars().count() > max {
        return Err(StoreError::validation(
            field,
            format!("{} must be 1-{max} characters", capitalize(field)),
        ));
    }
    Ok(())
}

/// An optional text field: at most `max` Unicode characters when present.
pub fn optional_text(field: &'static str, value: Option<&str>, max: usize) -> StoreResult<()> {
    if let Some(value) = value
        && value.chars().count() > max
    {
        return Err(StoreError::validation(
            field,
            format!("{} must be at most {max} characters", capitalize(field)),
        ));
    }
    Ok(())
}

/// An optional link: bounded and starting with `http://` or `https://`.
pub fn optional_url(field: &'static str, value: Option<&str>) -> StoreResult<()> {
    let Some(value) = value else {
        return Ok(());
    };
    optional_text(field, Some(value), MAX_URL_LEN)?;
    let value = value.trim();
    if !(value.starts_with("http://") || value.starts_with("https://")) {
        return Err(StoreError::validation(
            field,
            format!("{} must be an http(s) URL", capitalize(field)),
        ));
    }
    Ok(())
}

/// `end` may be open, but never before `start`.
pub fn date_range(start: Option<NaiveDate>, end: Option<NaiveDate>) -> StoreResult<()> {
    if let (Some(start), Some(end)) = (start, end)
        && end < start
    {
        return Err(StoreError::validation(
            "end_date",
            "End date must not be before start date",
        ));
    }
    Ok(())
}

/// Lowercase ASCII letters, digits and single dashes, e.g. `hello-world-2`.
pub fn slug(value: &str) -> StoreResult<()> {
    let well_formed = !value.is_empty()
        && value.len() <= MAX_SLUG_LEN
        && value
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        && !value.starts_with('-')
        && !value.ends_with('-')
        && !value.contains("--");
    if !well_formed {
        return Err(StoreError::validation(
            "slug",
            format!("Slug must be 1-{MAX_SLUG_LEN} characters of a-z, 0-9 and single dashes"),
        ));
    }
    Ok(())
}

pub fn position(value: i32) -> StoreResult<()> {
    if value < 0 {
        return Err(StoreError::validation("position", "Position must be >= 0"));
    }
    Ok(())
}

pub fn optional_sort_order(value: Option<i32>) -> StoreResult<()> {
    if let Some(value) = value
        && value < 0
    {
        return Err(StoreError::validation(
            "sort_order",
            "Sort order must be >= 0",
        ));
    }
    Ok(())
}

/// Trim a required field before storing it.
pub fn clean(value: String) -> String {
    let trimmed = value.trim();
    if trimmed.len() == value.len() {
        value
    } else {
        trimmed.to_string()
    }
}

/// Trim an optional field, mapping blank input to `None`.
pub fn clean_optional(value: Option<String>) -> Option<String> {
    value.map(clean).filter(|v| !v.is_empty())
}

fn capitalize(field: &str) -> String {
    let words = field.replace('_', " ");
    let mut chars = words.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_text_counts_characters_not_bytes() {
        assert!(required_text("degree", "学士", 2).is_ok());
        assert!(required_text("degree", "学士学", 2).is_err());
        let err = required_text("full_name", "   ", 10).unwrap_err();
        match err {
            StoreError::Validation { field, message } => {
                assert_eq!(field, "full_name");
                assert_eq!(message, "Full name must be 1-10 characters");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn urls_must_be_http() {
        assert!(optional_url("url", None).is_ok());
        assert!(optional_url("url", Some("https://mit.edu")).is_ok());
        assert!(optional_url("url", Some("ftp://mit.edu")).is_err());
    }

    #[test]
    fn date_range_allows_open_end() {
        let start = NaiveDate::from_ymd_opt(2015, 9, 1);
        let end = NaiveDate::from_ymd_opt(2019, 6, 1);
        assert!(date_range(start, None).is_ok());
        assert!(date_range(start, end).is_ok());
        assert!(date_range(end, start).is_err());
    }

    #[test]
    fn slugs() {
        assert!(slug("hello-world-2").is_ok());
        for bad in ["", "Hello", "a--b", "-a", "a-", "a b", "ünï"] {
            assert!(slug(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn clean_optional_drops_blank_values() {
        assert_eq!(clean_optional(Some("  ".into())), None);
        assert_eq!(clean_optional(Some(" Boston ".into())), Some("Boston".into()));
        assert_eq!(clean_optional(None), None);
    }
}
