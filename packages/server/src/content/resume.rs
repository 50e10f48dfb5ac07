use common::LanguagePreference;
use sea_orm::{ConnectionTrait, TransactionTrait};
use serde::Serialize;
use tracing::instrument;

use super::award::AwardView;
use super::education::EducationView;
use super::personal_info::PersonalInfoView;
use super::project::ProjectView;
use super::publication::PublicationView;
use super::research_project::ResearchProjectView;
use super::view::{LocalizedView, OwnerSummary, ViewOptions, list_views};
use super::work_experience::WorkExperienceView;
use crate::entity::{
    award, education, personal_info, project, publication, research_project, work_experience,
};
use crate::store::{StoreResult, UserStore};

/// Every public section of one owner's portfolio, rendered in one language.
#[derive(Debug, Serialize)]
pub struct Resume {
    pub owner: OwnerSummary,
    /// The first personal info row by `sort_order`, if the owner has one.
    pub personal_info: Option<LocalizedView<PersonalInfoView>>,
    pub education: Vec<LocalizedView<EducationView>>,
    pub work_experience: Vec<LocalizedView<WorkExperienceView>>,
    pub projects: Vec<LocalizedView<ProjectView>>,
    pub research_projects: Vec<LocalizedView<ResearchProjectView>>,
    pub publications: Vec<LocalizedView<PublicationView>>,
    pub awards: Vec<LocalizedView<AwardView>>,
}

/// Assemble the resume of `owner_id`. Fails only when the owner is missing.
#[instrument(skip(conn, preference), fields(lang = preference.requested.as_str()))]
pub async fn resume<C>(
    conn: &C,
    owner_id: i32,
    preference: &LanguagePreference,
) -> StoreResult<Resume>
where
    C: ConnectionTrait + TransactionTrait,
{
    let owner = UserStore::new(conn).get(owner_id).await?;
    let owner_filter = Some(owner_id);
    let options = ViewOptions::default();

    let personal_info =
        list_views::<personal_info::Entity, C>(conn, owner_filter, preference, options)
            .await?
            .into_iter()
            .next();

    Ok(Resume {
        owner: OwnerSummary::from(&owner),
        personal_info,
        education: list_views::<education::Entity, C>(conn, owner_filter, preference, options)
            .await?,
        work_experience: list_views::<work_experience::Entity, C>(
            conn,
            owner_filter,
            preference,
            options,
        )
        .await?,
        projects: list_views::<project::Entity, C>(conn, owner_filter, preference, options).await?,
        research_projects: list_views::<research_project::Entity, C>(
            conn,
            owner_filter,
            preference,
            options,
        )
        .await?,
        publications: list_views::<publication::Entity, C>(conn, owner_filter, preference, options)
            .await?,
        awards: list_views::<award::Entity, C>(conn, owner_filter, preference, options).await?,
    })
}
