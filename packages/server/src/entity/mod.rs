pub mod award;
pub mod award_translation;
pub mod blog_post;
pub mod blog_post_translation;
pub mod education;
pub mod education_detail;
pub mod education_detail_translation;
pub mod education_translation;
pub mod idea;
pub mod idea_translation;
pub mod language;
pub mod personal_info;
pub mod personal_info_translation;
pub mod project;
pub mod project_detail;
pub mod project_detail_translation;
pub mod project_translation;
pub mod publication;
pub mod publication_translation;
pub mod recent_update;
pub mod recent_update_translation;
pub mod research_project;
pub mod research_project_detail;
pub mod research_project_detail_translation;
pub mod research_project_translation;
pub mod user;
pub mod work_experience;
pub mod work_experience_detail;
pub mod work_experience_detail_translation;
pub mod work_experience_translation;
