use ::common::LanguageCode;
use serde_json::json;

use folio_server::store::{LanguageRegistry, StoreError};

use crate::common::{TestApp, routes};

mod language_listing {
    use super::*;

    #[tokio::test]
    async fn seeded_languages_are_listed_by_code() {
        let app = TestApp::spawn().await;

        let res = app.get(routes::LANGUAGES).await;

        assert_eq!(res.status, 200);
        let codes: Vec<&str> = res
            .data()
            .iter()
            .map(|l| l["code"].as_str().unwrap())
            .collect();
        assert_eq!(codes, ["en", "zh"]);
    }

    #[tokio::test]
    async fn a_language_can_be_fetched_by_code() {
        let app = TestApp::spawn().await;

        let res = app.get(&routes::language("zh")).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["name"], "Chinese");
        assert_eq!(res.body["native_name"], "中文");
        assert_eq!(res.body["is_active"], true);
    }

    #[tokio::test]
    async fn codes_are_normalized_before_lookup() {
        let app = TestApp::spawn().await;

        let res = app.get(&routes::language("ZH")).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["code"], "zh");
    }

    #[tokio::test]
    async fn unknown_language_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app.get(&routes::language("fr")).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn malformed_code_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app.get(&routes::language("e1")).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }
}

mod language_registry {
    use super::*;

    #[tokio::test]
    async fn registering_twice_keeps_one_row() {
        let app = TestApp::spawn().await;
        let registry = LanguageRegistry::new(&app.db);
        let fr = LanguageCode::parse("fr").unwrap();

        assert!(registry.register(&fr, "French", "Français").await.unwrap());
        assert!(!registry.register(&fr, "French", "Français").await.unwrap());

        assert_eq!(
            registry.active_codes().await.unwrap(),
            ["en", "fr", "zh"].map(|c| LanguageCode::parse(c).unwrap())
        );
    }

    #[tokio::test]
    async fn validity_covers_unknown_and_malformed_codes() {
        let app = TestApp::spawn().await;
        let registry = LanguageRegistry::new(&app.db);

        assert!(registry.is_valid("en").await.unwrap());
        assert!(!registry.is_valid("fr").await.unwrap());
        assert!(!registry.is_valid("not a code").await.unwrap());
    }

    #[tokio::test]
    async fn unused_language_can_be_removed() {
        let app = TestApp::spawn().await;
        let registry = LanguageRegistry::new(&app.db);
        let fr = LanguageCode::parse("fr").unwrap();
        registry.register(&fr, "French", "Français").await.unwrap();

        registry.remove(&fr).await.unwrap();

        assert!(!registry.is_valid("fr").await.unwrap());
    }

    #[tokio::test]
    async fn language_in_use_cannot_be_removed() {
        let app = TestApp::spawn().await;
        let user_id = app.create_user("ada").await;
        let id = app.create_mit_education(user_id).await;
        let res = app
            .put(
                &routes::translation("education", id, "zh"),
                &json!({ "degree": "学士" }),
            )
            .await;
        assert_eq!(res.status, 200);

        let err = LanguageRegistry::new(&app.db)
            .remove(&LanguageCode::parse("zh").unwrap())
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::Conflict(_)), "got {err:?}");
        assert_eq!(app.get(&routes::language("zh")).await.status, 200);
    }

    #[tokio::test]
    async fn detail_translations_also_hold_a_language() {
        let app = TestApp::spawn().await;
        let user_id = app.create_user("ada").await;
        let id = app.create_mit_education(user_id).await;
        let res = app
            .post(
                &routes::details("education", id),
                &json!({ "translations": { "zh": { "content": "荣誉毕业" } } }),
            )
            .await;
        assert_eq!(res.status, 201, "{}", res.text);

        let err = LanguageRegistry::new(&app.db)
            .remove(&LanguageCode::parse("zh").unwrap())
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::Conflict(_)), "got {err:?}");
    }
}
