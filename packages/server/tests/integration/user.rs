use sea_orm::{EntityTrait, PaginatorTrait};
use serde_json::json;

use folio_server::entity::{
    education, education_detail, education_detail_translation, education_translation,
};

use crate::common::{TestApp, routes};

mod user_creation {
    use super::*;

    #[tokio::test]
    async fn user_can_be_created() {
        let app = TestApp::spawn().await;

        let res = app
            .post(
                routes::USERS,
                &json!({ "username": "ada", "email": "ada@example.com" }),
            )
            .await;

        assert_eq!(res.status, 201);
        assert_eq!(res.body["username"], "ada");
        assert_eq!(res.body["email"], "ada@example.com");
        assert!(res.body["id"].is_number());
        assert!(res.body["created_at"].is_string());
    }

    #[tokio::test]
    async fn duplicate_username_is_a_conflict() {
        let app = TestApp::spawn().await;
        app.create_user("ada").await;

        let res = app.post(routes::USERS, &json!({ "username": "ada" })).await;

        assert_eq!(res.status, 409);
        assert_eq!(res.body["code"], "CONFLICT");
    }

    #[tokio::test]
    async fn invalid_username_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app
            .post(routes::USERS, &json!({ "username": "ada lovelace" }))
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
        assert_eq!(res.body["field"], "username");
    }

    #[tokio::test]
    async fn missing_body_field_is_a_validation_error() {
        let app = TestApp::spawn().await;

        let res = app.post(routes::USERS, &json!({ "email": "a@b.c" })).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }
}

mod user_lookup {
    use super::*;

    #[tokio::test]
    async fn users_are_listed_by_id() {
        let app = TestApp::spawn().await;
        let first = app.create_user("ada").await;
        let second = app.create_user("grace").await;

        let res = app.get(routes::USERS).await;

        assert_eq!(res.status, 200);
        let ids: Vec<i64> = res.data().iter().map(|u| u["id"].as_i64().unwrap()).collect();
        assert_eq!(ids, [first as i64, second as i64]);
    }

    #[tokio::test]
    async fn missing_user_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app.get(&routes::user(999)).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }
}

mod user_deletion {
    use super::*;

    #[tokio::test]
    async fn deleting_a_user_removes_everything_they_own() {
        let app = TestApp::spawn().await;
        let ada = app.create_user("ada").await;
        let grace = app.create_user("grace").await;
        let owned = app.create_mit_education(ada).await;
        let kept = app.create_mit_education(grace).await;
        let res = app
            .post(
                &routes::details("education", owned),
                &json!({ "translations": { "en": { "content": "Graduated with honors" } } }),
            )
            .await;
        assert_eq!(res.status, 201, "{}", res.text);

        let res = app.delete(&routes::user(ada)).await;
        assert_eq!(res.status, 204);

        assert_eq!(app.get(&routes::user(ada)).await.status, 404);
        assert_eq!(app.get(&routes::item("education", owned)).await.status, 404);
        assert_eq!(app.get(&routes::item("education", kept)).await.status, 200);

        assert_eq!(education::Entity::find().count(&app.db).await.unwrap(), 1);
        assert_eq!(
            education_translation::Entity::find().count(&app.db).await.unwrap(),
            1
        );
        assert_eq!(education_detail::Entity::find().count(&app.db).await.unwrap(), 0);
        assert_eq!(
            education_detail_translation::Entity::find()
                .count(&app.db)
                .await
                .unwrap(),
            0
        );
    }

    #[tokio::test]
    async fn deleting_a_missing_user_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app.delete(&routes::user(42)).await;

        assert_eq!(res.status, 404);
    }
}
