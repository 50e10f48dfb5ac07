//! Request and response shapes shared by every content kind.

use std::collections::BTreeMap;

use common::LanguageCode;
use serde::Deserialize;

use crate::content::ViewOptions;
use crate::store::DetailText;

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Only rows owned by this user.
    pub owner_id: Option<i32>,
    /// Requested language; falls back to `Accept-Language`, then the site default.
    pub lang: Option<String>,
    /// Embed the owner summary in every row.
    #[serde(default)]
    pub include_owner: bool,
    /// Load and resolve detail lines. Default: true.
    pub include_details: Option<bool>,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct GetQuery {
    pub lang: Option<String>,
    #[serde(default)]
    pub include_owner: bool,
    pub include_details: Option<bool>,
}

impl ListQuery {
    pub fn view_options(&self) -> ViewOptions {
        view_options(self.include_owner, self.include_details)
    }
}

impl GetQuery {
    pub fn view_options(&self) -> ViewOptions {
        view_options(self.include_owner, self.include_details)
    }
}

fn view_options(include_owner: bool, include_details: Option<bool>) -> ViewOptions {
    let defaults = ViewOptions::default();
    ViewOptions {
        include_owner,
        include_details: include_details.unwrap_or(defaults.include_details),
    }
}

/// Create a row of some kind: its canonical fields at the top level, plus
/// an optional map of initial translations keyed by language code.
#[derive(Debug, Deserialize)]
pub struct CreateContentRequest<F, T> {
    pub user_id: i32,
    #[serde(flatten)]
    pub fields: F,
    #[serde(default = "BTreeMap::new")]
    pub translations: BTreeMap<LanguageCode, T>,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct CreateDetailRequest {
    /// Defaults to one past the current last line.
    pub position: Option<i32>,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub translations: BTreeMap<LanguageCode, DetailText>,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct UpdateDetailRequest {
    pub position: i32,
}
