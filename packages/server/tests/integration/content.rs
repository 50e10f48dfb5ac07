use ::common::config::I18nConfig;
use ::common::{FinalFallback, LanguageCode};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
use serde_json::json;

use folio_server::entity::{education_detail, education_detail_translation, education_translation};
use folio_server::store::TranslationStore;

use crate::common::{TestApp, routes};

mod translation_resolution {
    use super::*;

    #[tokio::test]
    async fn requested_language_is_used_when_present() {
        let app = TestApp::spawn().await;
        let user_id = app.create_user("ada").await;
        let id = app.create_mit_education(user_id).await;

        let res = app
            .get(&format!("{}?lang=en", routes::item("education", id)))
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["institution"], "MIT");
        assert_eq!(res.body["degree"], "BSc");
        assert_eq!(res.body["language"], "en");
        assert_eq!(res.body["resolved_from"], "requested");
    }

    #[tokio::test]
    async fn missing_language_falls_back_to_the_default() {
        let app = TestApp::spawn().await;
        let user_id = app.create_user("ada").await;
        let id = app.create_mit_education(user_id).await;

        let res = app
            .get(&format!("{}?lang=zh", routes::item("education", id)))
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["degree"], "BSc");
        assert_eq!(res.body["language"], "en");
        assert_eq!(res.body["resolved_from"], "default");
    }

    #[tokio::test]
    async fn added_translation_takes_over_for_its_language() {
        let app = TestApp::spawn().await;
        let user_id = app.create_user("ada").await;
        let id = app.create_mit_education(user_id).await;

        let res = app
            .put(
                &routes::translation("education", id, "zh"),
                &json!({ "degree": "学士", "field_of_study": "计算机科学" }),
            )
            .await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["language_code"], "zh");

        let zh = app
            .get(&format!("{}?lang=zh", routes::item("education", id)))
            .await;
        assert_eq!(zh.body["degree"], "学士");
        assert_eq!(zh.body["field_of_study"], "计算机科学");
        assert_eq!(zh.body["resolved_from"], "requested");

        let en = app
            .get(&format!("{}?lang=en", routes::item("education", id)))
            .await;
        assert_eq!(en.body["degree"], "BSc");
        assert_eq!(en.body["institution"], "MIT");
    }

    #[tokio::test]
    async fn accept_language_header_is_honored() {
        let app = TestApp::spawn().await;
        let user_id = app.create_user("ada").await;
        let id = app.create_mit_education(user_id).await;
        app.put(
            &routes::translation("education", id, "zh"),
            &json!({ "degree": "学士" }),
        )
        .await;

        let res = app
            .get_with_language(&routes::item("education", id), "zh-CN,zh;q=0.9,en;q=0.8")
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["degree"], "学士");
    }

    #[tokio::test]
    async fn query_parameter_wins_over_header() {
        let app = TestApp::spawn().await;
        let user_id = app.create_user("ada").await;
        let id = app.create_mit_education(user_id).await;
        app.put(
            &routes::translation("education", id, "zh"),
            &json!({ "degree": "学士" }),
        )
        .await;

        let res = app
            .get_with_language(&format!("{}?lang=en", routes::item("education", id)), "zh")
            .await;

        assert_eq!(res.body["degree"], "BSc");
        assert_eq!(res.body["resolved_from"], "requested");
    }

    #[tokio::test]
    async fn any_translation_is_used_when_default_is_missing() {
        let app = TestApp::spawn_with(I18nConfig {
            final_fallback: FinalFallback::AnyLanguage,
            ..I18nConfig::default()
        })
        .await;
        let user_id = app.create_user("ada").await;

        let res = app
            .post(
                &routes::kind("education"),
                &json!({
                    "user_id": user_id,
                    "institution": "Tsinghua University",
                    "start_date": "2019-09-01",
                    "translations": { "zh": { "degree": "硕士" } }
                }),
            )
            .await;
        assert_eq!(res.status, 201, "{}", res.text);
        let id = res.id();

        let res = app
            .get(&format!("{}?lang=fr", routes::item("education", id)))
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["degree"], "硕士");
        assert_eq!(res.body["language"], "zh");
        assert_eq!(res.body["resolved_from"], "any");
    }

    #[tokio::test]
    async fn row_without_translations_still_renders() {
        let app = TestApp::spawn().await;
        let user_id = app.create_user("ada").await;

        let res = app
            .post(
                &routes::kind("education"),
                &json!({
                    "user_id": user_id,
                    "institution": "MIT",
                    "start_date": "2015-09-01"
                }),
            )
            .await;
        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["resolved_from"], "none");
        assert!(res.body["language"].is_null());

        let res = app.get(&routes::item("education", res.id())).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["institution"], "MIT");
        assert_eq!(res.body["degree"], "");
        assert_eq!(res.body["resolved_from"], "none");
    }

    #[tokio::test]
    async fn malformed_language_parameter_is_rejected() {
        let app = TestApp::spawn().await;
        let user_id = app.create_user("ada").await;
        let id = app.create_mit_education(user_id).await;

        let res = app
            .get(&format!("{}?lang=english!", routes::item("education", id)))
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
        assert_eq!(res.body["field"], "lang");
    }
}

mod mit_scenario {
    use super::*;

    async fn create_bilingual_mit(app: &TestApp) -> i32 {
        let user_id = app.create_user("ada").await;
        let res = app
            .post(
                &routes::kind("education"),
                &json!({
                    "user_id": user_id,
                    "institution": "MIT",
                    "start_date": "2015-09-01",
                    "sort_order": 2,
                    "translations": {
                        "en": { "degree": "BSc" },
                        "zh": { "degree": "学士" }
                    }
                }),
            )
            .await;
        assert_eq!(res.status, 201, "{}", res.text);
        res.id()
    }

    #[tokio::test]
    async fn requested_then_default_language() {
        let app = TestApp::spawn().await;
        let id = create_bilingual_mit(&app).await;

        let zh = app
            .get(&format!("{}?lang=zh", routes::item("education", id)))
            .await;
        assert_eq!(zh.body["degree"], "学士");
        assert_eq!(zh.body["sort_order"], 2);

        let fr = app
            .get(&format!("{}?lang=fr", routes::item("education", id)))
            .await;
        assert_eq!(fr.body["degree"], "BSc");
        assert_eq!(fr.body["resolved_from"], "default");
    }

    #[tokio::test]
    async fn canonical_only_when_nothing_matches() {
        let app = TestApp::spawn_with(I18nConfig {
            default_language: LanguageCode::parse("de").unwrap(),
            ..I18nConfig::default()
        })
        .await;
        let id = create_bilingual_mit(&app).await;

        let res = app
            .get(&format!("{}?lang=fr", routes::item("education", id)))
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["institution"], "MIT");
        assert_eq!(res.body["degree"], "");
        assert!(res.body["language"].is_null());
        assert_eq!(res.body["resolved_from"], "none");
    }
}

mod translation_management {
    use super::*;

    #[tokio::test]
    async fn upsert_replaces_instead_of_duplicating() {
        let app = TestApp::spawn().await;
        let user_id = app.create_user("ada").await;
        let id = app.create_mit_education(user_id).await;

        for degree in ["学士", "理学学士"] {
            let res = app
                .put(
                    &routes::translation("education", id, "zh"),
                    &json!({ "degree": degree }),
                )
                .await;
            assert_eq!(res.status, 200, "{}", res.text);
        }

        let count = TranslationStore::<education_translation::Entity, _>::new(&app.db)
            .count_for(id, "zh")
            .await
            .unwrap();
        assert_eq!(count, 1);

        let res = app.get(&routes::translations("education", id)).await;
        assert_eq!(res.status, 200);
        let languages: Vec<&str> = res
            .data()
            .iter()
            .map(|t| t["language_code"].as_str().unwrap())
            .collect();
        assert_eq!(languages, ["en", "zh"]);

        let zh = app.get(&routes::translation("education", id, "zh")).await;
        assert_eq!(zh.body["degree"], "理学学士");
    }

    #[tokio::test]
    async fn replacing_clears_fields_left_out() {
        let app = TestApp::spawn().await;
        let user_id = app.create_user("ada").await;
        let id = app.create_mit_education(user_id).await;

        let res = app
            .put(
                &routes::translation("education", id, "en"),
                &json!({ "degree": "BSc" }),
            )
            .await;

        assert_eq!(res.status, 200);
        assert!(res.body["field_of_study"].is_null());
    }

    #[tokio::test]
    async fn unregistered_language_cannot_be_written() {
        let app = TestApp::spawn().await;
        let user_id = app.create_user("ada").await;
        let id = app.create_mit_education(user_id).await;

        let res = app
            .put(
                &routes::translation("education", id, "fr"),
                &json!({ "degree": "Licence" }),
            )
            .await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn translation_of_missing_row_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app
            .put(
                &routes::translation("education", 404, "en"),
                &json!({ "degree": "BSc" }),
            )
            .await;

        assert_eq!(res.status, 404);
    }

    #[tokio::test]
    async fn empty_translated_field_is_rejected() {
        let app = TestApp::spawn().await;
        let user_id = app.create_user("ada").await;
        let id = app.create_mit_education(user_id).await;

        let res = app
            .put(
                &routes::translation("education", id, "zh"),
                &json!({ "degree": "   " }),
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["field"], "degree");
    }

    #[tokio::test]
    async fn deleted_translation_falls_back_again() {
        let app = TestApp::spawn().await;
        let user_id = app.create_user("ada").await;
        let id = app.create_mit_education(user_id).await;
        app.put(
            &routes::translation("education", id, "zh"),
            &json!({ "degree": "学士" }),
        )
        .await;

        let res = app.delete(&routes::translation("education", id, "zh")).await;
        assert_eq!(res.status, 204);

        let res = app
            .get(&format!("{}?lang=zh", routes::item("education", id)))
            .await;
        assert_eq!(res.body["degree"], "BSc");
        assert_eq!(res.body["resolved_from"], "default");

        let res = app.delete(&routes::translation("education", id, "zh")).await;
        assert_eq!(res.status, 404);
    }
}

mod content_lifecycle {
    use super::*;

    #[tokio::test]
    async fn rows_are_listed_by_sort_order_then_id() {
        let app = TestApp::spawn().await;
        let user_id = app.create_user("ada").await;
        let rows = [("Harvard", 2), ("Yale", 1), ("MIT", 0), ("Stanford", 1)];
        for (institution, sort_order) in rows {
            let res = app
                .post(
                    &routes::kind("education"),
                    &json!({
                        "user_id": user_id,
                        "institution": institution,
                        "start_date": "2015-09-01",
                        "sort_order": sort_order
                    }),
                )
                .await;
            assert_eq!(res.status, 201, "{}", res.text);
        }

        let res = app
            .get(&format!("{}?owner_id={user_id}", routes::kind("education")))
            .await;

        assert_eq!(res.status, 200);
        let institutions: Vec<&str> = res
            .data()
            .iter()
            .map(|e| e["institution"].as_str().unwrap())
            .collect();
        assert_eq!(institutions, ["MIT", "Yale", "Stanford", "Harvard"]);
    }

    #[tokio::test]
    async fn listing_filters_by_owner() {
        let app = TestApp::spawn().await;
        let ada = app.create_user("ada").await;
        let grace = app.create_user("grace").await;
        app.create_mit_education(ada).await;
        app.create_mit_education(grace).await;

        let res = app
            .get(&format!("{}?owner_id={grace}", routes::kind("education")))
            .await;

        assert_eq!(res.data().len(), 1);
        assert_eq!(res.data()[0]["user_id"], grace.to_string());

        let all = app.get(&routes::kind("education")).await;
        assert_eq!(all.data().len(), 2);
    }

    #[tokio::test]
    async fn owner_is_embedded_on_request() {
        let app = TestApp::spawn().await;
        let user_id = app.create_user("ada").await;
        let id = app.create_mit_education(user_id).await;

        let plain = app.get(&routes::item("education", id)).await;
        assert!(plain.body.get("owner").is_none());

        let res = app
            .get(&format!("{}?include_owner=true", routes::item("education", id)))
            .await;
        assert_eq!(res.body["owner"]["username"], "ada");
        assert_eq!(res.body["owner"]["id"], user_id.to_string());
    }

    #[tokio::test]
    async fn create_for_missing_owner_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app
            .post(
                &routes::kind("education"),
                &json!({ "user_id": 77, "institution": "MIT", "start_date": "2015-09-01" }),
            )
            .await;

        assert_eq!(res.status, 404);
    }

    #[tokio::test]
    async fn end_before_start_is_rejected() {
        let app = TestApp::spawn().await;
        let user_id = app.create_user("ada").await;

        let res = app
            .post(
                &routes::kind("education"),
                &json!({
                    "user_id": user_id,
                    "institution": "MIT",
                    "start_date": "2019-09-01",
                    "end_date": "2015-06-01"
                }),
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn failed_translation_rolls_back_the_row() {
        let app = TestApp::spawn().await;
        let user_id = app.create_user("ada").await;

        let res = app
            .post(
                &routes::kind("education"),
                &json!({
                    "user_id": user_id,
                    "institution": "MIT",
                    "start_date": "2015-09-01",
                    "translations": { "en": { "degree": "BSc" }, "fr": { "degree": "Licence" } }
                }),
            )
            .await;
        assert_eq!(res.status, 404);

        let res = app.get(&routes::kind("education")).await;
        assert!(res.data().is_empty());
    }

    #[tokio::test]
    async fn patch_updates_only_given_fields() {
        let app = TestApp::spawn().await;
        let user_id = app.create_user("ada").await;
        let id = app.create_mit_education(user_id).await;

        let res = app
            .patch(
                &routes::item("education", id),
                &json!({
                    "institution": "Massachusetts Institute of Technology",
                    "end_date": null
                }),
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["institution"], "Massachusetts Institute of Technology");
        assert!(res.body["end_date"].is_null());
        assert_eq!(res.body["start_date"], "2015-09-01");
        assert_eq!(res.body["degree"], "BSc");
    }

    #[tokio::test]
    async fn empty_patch_returns_the_row_unchanged() {
        let app = TestApp::spawn().await;
        let user_id = app.create_user("ada").await;
        let id = app.create_mit_education(user_id).await;
        let before = app.get(&routes::item("education", id)).await;

        let res = app.patch(&routes::item("education", id), &json!({})).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["updated_at"], before.body["updated_at"]);
        assert_eq!(res.body["end_date"], "2019-06-01");
    }

    #[tokio::test]
    async fn patch_is_checked_against_the_stored_row() {
        let app = TestApp::spawn().await;
        let user_id = app.create_user("ada").await;
        let id = app.create_mit_education(user_id).await;

        let res = app
            .patch(&routes::item("education", id), &json!({ "start_date": "2020-01-01" }))
            .await;

        assert_eq!(res.status, 400);
    }

    #[tokio::test]
    async fn translatable_field_in_canonical_patch_is_rejected() {
        let app = TestApp::spawn().await;
        let user_id = app.create_user("ada").await;
        let id = app.create_mit_education(user_id).await;

        let res = app
            .patch(&routes::item("education", id), &json!({ "degree": "MSc" }))
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
        let res = app.get(&routes::item("education", id)).await;
        assert_eq!(res.body["degree"], "BSc");
    }

    #[tokio::test]
    async fn deleting_a_row_removes_its_translations_and_details() {
        let app = TestApp::spawn().await;
        let user_id = app.create_user("ada").await;
        let id = app.create_mit_education(user_id).await;
        app.put(
            &routes::translation("education", id, "zh"),
            &json!({ "degree": "学士" }),
        )
        .await;
        let res = app
            .post(
                &routes::details("education", id),
                &json!({ "translations": { "en": { "content": "Graduated with honors" } } }),
            )
            .await;
        assert_eq!(res.status, 201, "{}", res.text);
        let detail_id = res.id();

        let res = app.delete(&routes::item("education", id)).await;
        assert_eq!(res.status, 204);

        assert_eq!(app.get(&routes::item("education", id)).await.status, 404);
        let store = TranslationStore::<education_translation::Entity, _>::new(&app.db);
        assert_eq!(store.count_for(id, "en").await.unwrap(), 0);
        assert_eq!(store.count_for(id, "zh").await.unwrap(), 0);

        let details = education_detail::Entity::find()
            .filter(education_detail::Column::EducationId.eq(id))
            .count(&app.db)
            .await
            .unwrap();
        assert_eq!(details, 0);
        let detail_translations = education_detail_translation::Entity::find()
            .filter(education_detail_translation::Column::EducationDetailId.eq(detail_id))
            .count(&app.db)
            .await
            .unwrap();
        assert_eq!(detail_translations, 0);

        let res = app.delete(&routes::item("education", id)).await;
        assert_eq!(res.status, 404);
    }
}

mod other_kinds {
    use super::*;

    #[tokio::test]
    async fn current_position_cannot_have_an_end_date() {
        let app = TestApp::spawn().await;
        let user_id = app.create_user("ada").await;

        let res = app
            .post(
                &routes::kind("work-experience"),
                &json!({
                    "user_id": user_id,
                    "company": "Acme",
                    "start_date": "2020-01-01",
                    "end_date": "2021-01-01",
                    "is_current": true
                }),
            )
            .await;

        assert_eq!(res.status, 400);
    }

    #[tokio::test]
    async fn publishing_without_a_date_stamps_now() {
        let app = TestApp::spawn().await;
        let user_id = app.create_user("ada").await;

        let res = app
            .post(
                &routes::kind("blog-posts"),
                &json!({
                    "user_id": user_id,
                    "slug": "hello-world",
                    "is_published": true,
                    "translations": {
                        "en": { "title": "Hello", "content": "# Hello\n\nFirst post." }
                    }
                }),
            )
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert!(res.body["published_at"].is_string());
        assert_eq!(res.body["title"], "Hello");
        assert_eq!(res.body["content"], "# Hello\n\nFirst post.");
    }

    #[tokio::test]
    async fn invalid_slug_is_rejected() {
        let app = TestApp::spawn().await;
        let user_id = app.create_user("ada").await;

        let res = app
            .post(
                &routes::kind("blog-posts"),
                &json!({ "user_id": user_id, "slug": "Hello World" }),
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["field"], "slug");
    }

    #[tokio::test]
    async fn every_kind_is_routed() {
        let app = TestApp::spawn().await;

        for kind in [
            "personal-info",
            "education",
            "work-experience",
            "projects",
            "blog-posts",
            "ideas",
            "research-projects",
            "publications",
            "awards",
            "recent-updates",
        ] {
            let res = app.get(&routes::kind(kind)).await;
            assert_eq!(res.status, 200, "{kind}: {}", res.text);
            assert!(res.data().is_empty());
        }
    }
}

mod api_document {
    use super::*;

    #[tokio::test]
    async fn document_covers_languages_and_users_only() {
        let app = TestApp::spawn().await;

        let res = app.get("/api-docs/openapi.json").await;

        assert_eq!(res.status, 200);
        let paths = res.body["paths"].as_object().unwrap();
        assert!(paths.keys().any(|p| p.starts_with(routes::LANGUAGES)));
        assert!(paths.contains_key("/api/v1/users/{id}/resume"));
        assert!(!paths.keys().any(|p| p.starts_with("/api/v1/education")));

        let res = app.get(&routes::kind("education")).await;
        assert_eq!(res.status, 200);
    }
}
