//! Plain categorical fields carried by some content kinds.
//!
//! None of these drive a state machine; they are labels used for filtering
//! and display. With the `sea-orm` feature enabled they can be used directly
//! as entity columns and are stored as their snake_case string.

#[cfg(feature = "sea-orm")]
use sea_orm::prelude::StringLen;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error when parsing an unknown category string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid {kind} '{invalid}'. Valid values: {valid}")]
pub struct UnknownCategory {
    kind: &'static str,
    invalid: String,
    valid: String,
}

impl UnknownCategory {
    fn new(kind: &'static str, invalid: &str, all: &[&'static str]) -> Self {
        Self {
            kind,
            invalid: invalid.to_string(),
            valid: all.join(", "),
        }
    }
}

/// Where an idea currently stands.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema,
)]
#[cfg_attr(
    feature = "sea-orm",
    derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
    sea_orm(rs_type = "String", db_type = "String(StringLen::None)")
)]
#[serde(rename_all = "snake_case")]
pub enum IdeaStatus {
    #[default]
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "draft"))]
    Draft,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "exploring"))]
    Exploring,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "in_progress"))]
    InProgress,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "shelved"))]
    Shelved,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "done"))]
    Done,
}

impl IdeaStatus {
    pub const ALL: &'static [IdeaStatus] = &[
        Self::Draft,
        Self::Exploring,
        Self::InProgress,
        Self::Shelved,
        Self::Done,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Exploring => "exploring",
            Self::InProgress => "in_progress",
            Self::Shelved => "shelved",
            Self::Done => "done",
        }
    }
}

/// Relative importance, shared by ideas and recent updates.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema,
)]
#[cfg_attr(
    feature = "sea-orm",
    derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
    sea_orm(rs_type = "String", db_type = "String(StringLen::None)")
)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "low"))]
    Low,
    #[default]
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "medium"))]
    Medium,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "high"))]
    High,
}

impl Priority {
    pub const ALL: &'static [Priority] = &[Self::Low, Self::Medium, Self::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// What a recent update announces.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema,
)]
#[cfg_attr(
    feature = "sea-orm",
    derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
    sea_orm(rs_type = "String", db_type = "String(StringLen::None)")
)]
#[serde(rename_all = "snake_case")]
pub enum UpdateKind {
    #[default]
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "news"))]
    News,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "publication"))]
    Publication,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "talk"))]
    Talk,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "award"))]
    Award,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "release"))]
    Release,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "other"))]
    Other,
}

impl UpdateKind {
    pub const ALL: &'static [UpdateKind] = &[
        Self::News,
        Self::Publication,
        Self::Talk,
        Self::Award,
        Self::Release,
        Self::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::News => "news",
            Self::Publication => "publication",
            Self::Talk => "talk",
            Self::Award => "award",
            Self::Release => "release",
            Self::Other => "other",
        }
    }
}

/// Venue type of a publication.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema,
)]
#[cfg_attr(
    feature = "sea-orm",
    derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
    sea_orm(rs_type = "String", db_type = "String(StringLen::None)")
)]
#[serde(rename_all = "snake_case")]
pub enum PublicationKind {
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "journal"))]
    Journal,
    #[default]
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "conference"))]
    Conference,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "preprint"))]
    Preprint,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "thesis"))]
    Thesis,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "book"))]
    Book,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "other"))]
    Other,
}

impl PublicationKind {
    pub const ALL: &'static [PublicationKind] = &[
        Self::Journal,
        Self::Conference,
        Self::Preprint,
        Self::Thesis,
        Self::Book,
        Self::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Journal => "journal",
            Self::Conference => "conference",
            Self::Preprint => "preprint",
            Self::Thesis => "thesis",
            Self::Book => "book",
            Self::Other => "other",
        }
    }
}

macro_rules! impl_category_text {
    ($ty:ident, $label:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = UnknownCategory;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == s)
                    .ok_or_else(|| {
                        let all: Vec<&'static str> = Self::ALL.iter().map(|v| v.as_str()).collect();
                        UnknownCategory::new($label, s, &all)
                    })
            }
        }
    };
}

impl_category_text!(IdeaStatus, "idea status");
impl_category_text!(Priority, "priority");
impl_category_text!(UpdateKind, "update kind");
impl_category_text!(PublicationKind, "publication kind");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_uses_snake_case_strings() {
        assert_eq!(
            serde_json::to_string(&IdeaStatus::InProgress).unwrap(),
            "\"in_progress\""
        );
        let parsed: UpdateKind = serde_json::from_str("\"talk\"").unwrap();
        assert_eq!(parsed, UpdateKind::Talk);
    }

    #[test]
    fn display_and_from_str_agree() {
        for status in IdeaStatus::ALL {
            assert_eq!(status.to_string().parse::<IdeaStatus>().unwrap(), *status);
        }
        for kind in PublicationKind::ALL {
            assert_eq!(kind.as_str().parse::<PublicationKind>().unwrap(), *kind);
        }
    }

    #[test]
    fn unknown_values_list_valid_choices() {
        let err = "urgent".parse::<Priority>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid priority 'urgent'. Valid values: low, medium, high"
        );
    }
}
