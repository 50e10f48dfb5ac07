use serde_json::json;

use crate::common::{TestApp, routes};

mod resume_assembly {
    use super::*;

    #[tokio::test]
    async fn resume_collects_every_section_in_one_language() {
        let app = TestApp::spawn().await;
        let user_id = app.create_user("ada").await;
        let res = app
            .post(
                &routes::kind("personal-info"),
                &json!({
                    "user_id": user_id,
                    "email": "ada@example.com",
                    "translations": {
                        "en": { "full_name": "Ada Lovelace", "headline": "Engineer" },
                        "zh": { "full_name": "艾达·洛夫莱斯" }
                    }
                }),
            )
            .await;
        assert_eq!(res.status, 201, "{}", res.text);
        app.create_mit_education(user_id).await;
        let res = app
            .post(
                &routes::kind("work-experience"),
                &json!({
                    "user_id": user_id,
                    "company": "Analytical Engines Ltd",
                    "start_date": "2019-07-01",
                    "is_current": true,
                    "translations": { "zh": { "position": "工程师" } }
                }),
            )
            .await;
        assert_eq!(res.status, 201, "{}", res.text);

        let res = app.get(&format!("{}?lang=zh", routes::resume(user_id))).await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["owner"]["username"], "ada");
        assert_eq!(res.body["personal_info"]["full_name"], "艾达·洛夫莱斯");
        assert_eq!(res.body["personal_info"]["email"], "ada@example.com");

        let education = res.body["education"].as_array().unwrap();
        assert_eq!(education.len(), 1);
        assert_eq!(education[0]["degree"], "BSc");
        assert_eq!(education[0]["resolved_from"], "default");

        assert_eq!(res.body["work_experience"][0]["position"], "工程师");
        assert_eq!(res.body["work_experience"][0]["resolved_from"], "requested");
        assert_eq!(res.body["projects"], json!([]));
        assert_eq!(res.body["research_projects"], json!([]));
        assert_eq!(res.body["publications"], json!([]));
        assert_eq!(res.body["awards"], json!([]));
    }

    #[tokio::test]
    async fn resume_without_content_is_empty() {
        let app = TestApp::spawn().await;
        let user_id = app.create_user("ada").await;

        let res = app.get(&routes::resume(user_id)).await;

        assert_eq!(res.status, 200);
        assert!(res.body["personal_info"].is_null());
        assert_eq!(res.body["education"], json!([]));
    }

    #[tokio::test]
    async fn resume_only_includes_the_owners_rows() {
        let app = TestApp::spawn().await;
        let ada = app.create_user("ada").await;
        let grace = app.create_user("grace").await;
        app.create_mit_education(grace).await;

        let res = app.get(&routes::resume(ada)).await;

        assert_eq!(res.body["education"], json!([]));
    }

    #[tokio::test]
    async fn resume_of_missing_user_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app.get(&routes::resume(5)).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }
}
