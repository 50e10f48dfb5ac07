use serde_json::json;

use crate::common::{TestApp, routes};

async fn add_detail(app: &TestApp, education_id: i32, body: serde_json::Value) -> i32 {
    let res = app.post(&routes::details("education", education_id), &body).await;
    assert_eq!(res.status, 201, "create detail failed: {}", res.text);
    res.id()
}

mod detail_lines {
    use super::*;

    #[tokio::test]
    async fn lines_are_appended_in_order() {
        let app = TestApp::spawn().await;
        let user_id = app.create_user("ada").await;
        let id = app.create_mit_education(user_id).await;

        add_detail(
            &app,
            id,
            json!({ "translations": { "en": { "content": "Thesis on compilers" } } }),
        )
        .await;
        add_detail(
            &app,
            id,
            json!({ "translations": { "en": { "content": "Teaching assistant" } } }),
        )
        .await;

        let res = app.get(&routes::details("education", id)).await;
        assert_eq!(res.status, 200);
        let positions: Vec<i64> = res
            .data()
            .iter()
            .map(|d| d["position"].as_i64().unwrap())
            .collect();
        assert_eq!(positions, [0, 1]);

        let view = app.get(&routes::item("education", id)).await;
        assert_eq!(
            view.body["details"],
            json!(["Thesis on compilers", "Teaching assistant"])
        );
    }

    #[tokio::test]
    async fn lines_resolve_their_language_independently() {
        let app = TestApp::spawn().await;
        let user_id = app.create_user("ada").await;
        let id = app.create_mit_education(user_id).await;
        let translated = add_detail(
            &app,
            id,
            json!({ "translations": { "en": { "content": "Graduated with honors" } } }),
        )
        .await;
        add_detail(
            &app,
            id,
            json!({ "translations": { "en": { "content": "Dean's list" } } }),
        )
        .await;

        let res = app
            .put(
                &routes::detail_translation("education", id, translated, "zh"),
                &json!({ "content": "荣誉毕业" }),
            )
            .await;
        assert_eq!(res.status, 200, "{}", res.text);

        let view = app
            .get(&format!("{}?lang=zh", routes::item("education", id)))
            .await;
        assert_eq!(view.body["details"], json!(["荣誉毕业", "Dean's list"]));
    }

    #[tokio::test]
    async fn details_can_be_skipped() {
        let app = TestApp::spawn().await;
        let user_id = app.create_user("ada").await;
        let id = app.create_mit_education(user_id).await;
        add_detail(&app, id, json!({ "translations": { "en": { "content": "Honors" } } })).await;

        let res = app
            .get(&format!("{}?include_details=false", routes::item("education", id)))
            .await;

        assert_eq!(res.body["details"], json!([]));
    }

    #[tokio::test]
    async fn lines_can_be_reordered() {
        let app = TestApp::spawn().await;
        let user_id = app.create_user("ada").await;
        let id = app.create_mit_education(user_id).await;
        let first = add_detail(
            &app,
            id,
            json!({ "translations": { "en": { "content": "A" } } }),
        )
        .await;
        add_detail(&app, id, json!({ "translations": { "en": { "content": "B" } } })).await;

        let res = app
            .patch(&routes::detail("education", id, first), &json!({ "position": 5 }))
            .await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["position"], 5);

        let view = app.get(&routes::item("education", id)).await;
        assert_eq!(view.body["details"], json!(["B", "A"]));
    }

    #[tokio::test]
    async fn negative_position_is_rejected() {
        let app = TestApp::spawn().await;
        let user_id = app.create_user("ada").await;
        let id = app.create_mit_education(user_id).await;

        let res = app
            .post(
                &routes::details("education", id),
                &json!({ "position": -1, "translations": {} }),
            )
            .await;

        assert_eq!(res.status, 400);
    }

    #[tokio::test]
    async fn deleted_line_disappears_with_its_translations() {
        let app = TestApp::spawn().await;
        let user_id = app.create_user("ada").await;
        let id = app.create_mit_education(user_id).await;
        let detail = add_detail(
            &app,
            id,
            json!({ "translations": { "en": { "content": "A" } } }),
        )
        .await;

        let res = app.delete(&routes::detail("education", id, detail)).await;
        assert_eq!(res.status, 204);

        let res = app.get(&routes::details("education", id)).await;
        assert!(res.data().is_empty());

        let res = app
            .put(
                &routes::detail_translation("education", id, detail, "zh"),
                &json!({ "content": "甲" }),
            )
            .await;
        assert_eq!(res.status, 404);
    }

    #[tokio::test]
    async fn line_under_another_parent_is_not_found() {
        let app = TestApp::spawn().await;
        let user_id = app.create_user("ada").await;
        let first = app.create_mit_education(user_id).await;
        let second = app.create_mit_education(user_id).await;
        let detail = add_detail(
            &app,
            first,
            json!({ "translations": { "en": { "content": "A" } } }),
        )
        .await;

        let res = app.delete(&routes::detail("education", second, detail)).await;

        assert_eq!(res.status, 404);
    }

    #[tokio::test]
    async fn details_of_missing_parent_are_not_found() {
        let app = TestApp::spawn().await;

        let res = app.get(&routes::details("education", 12)).await;

        assert_eq!(res.status, 404);
    }

    #[tokio::test]
    async fn other_detail_kinds_are_routed() {
        let app = TestApp::spawn().await;
        let user_id = app.create_user("ada").await;
        let res = app
            .post(
                &routes::kind("projects"),
                &json!({
                    "user_id": user_id,
                    "translations": { "en": { "title": "Compiler" } }
                }),
            )
            .await;
        assert_eq!(res.status, 201, "{}", res.text);
        let project = res.id();

        let res = app
            .post(
                &routes::details("projects", project),
                &json!({ "translations": { "en": { "content": "Wrote the parser" } } }),
            )
            .await;
        assert_eq!(res.status, 201, "{}", res.text);

        let view = app.get(&routes::item("projects", project)).await;
        assert_eq!(view.body["details"], json!(["Wrote the parser"]));
    }
}
