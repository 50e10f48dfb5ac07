use std::net::SocketAddr;
use std::sync::Arc;

use reqwest::Client;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use serde_json::{Value, json};

use ::common::config::I18nConfig;
use folio_server::config::{AppConfig, CorsConfig, DatabaseConfig, ServerConfig};
use folio_server::state::AppState;

pub mod routes {
    pub const LANGUAGES: &str = "/api/v1/languages";
    pub const USERS: &str = "/api/v1/users";

    pub fn language(code: &str) -> String {
        format!("/api/v1/languages/{code}")
    }

    pub fn user(id: i32) -> String {
        format!("/api/v1/users/{id}")
    }

    pub fn resume(user_id: i32) -> String {
        format!("/api/v1/users/{user_id}/resume")
    }

    pub fn kind(kind: &str) -> String {
        format!("/api/v1/{kind}")
    }

    pub fn item(kind: &str, id: i32) -> String {
        format!("/api/v1/{kind}/{id}")
    }

    pub fn translations(kind: &str, id: i32) -> String {
        format!("/api/v1/{kind}/{id}/translations")
    }

    pub fn translation(kind: &str, id: i32, lang: &str) -> String {
        format!("/api/v1/{kind}/{id}/translations/{lang}")
    }

    pub fn details(kind: &str, id: i32) -> String {
        format!("/api/v1/{kind}/{id}/details")
    }

    pub fn detail(kind: &str, id: i32, detail_id: i32) -> String {
        format!("/api/v1/{kind}/{id}/details/{detail_id}")
    }

    pub fn detail_translation(kind: &str, id: i32, detail_id: i32, lang: &str) -> String {
        format!("/api/v1/{kind}/{id}/details/{detail_id}/translations/{lang}")
    }
}

/// A running test server backed by a private in-memory database.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub db: DatabaseConnection,
}

/// Parsed HTTP response for test assertions.
pub struct TestResponse {
    pub status: u16,
    /// Raw response body as text.
    pub text: String,
    /// Parsed JSON body, or `Null` if the response is not valid JSON.
    pub body: Value,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with(I18nConfig::default()).await
    }

    /// Spawn with custom language settings.
    pub async fn spawn_with(i18n: I18nConfig) -> Self {
        // Every pooled connection to `sqlite::memory:` is a separate
        // database, so the pool is pinned to one connection.
        let mut opts = ConnectOptions::new("sqlite::memory:");
        opts.max_connections(1)
            .min_connections(1)
            .sqlx_logging(false);
        let db = Database::connect(opts)
            .await
            .expect("Failed to open in-memory database");

        folio_server::database::sync_schema(&db)
            .await
            .expect("Failed to sync schema");
        folio_server::seed::seed_languages(&db)
            .await
            .expect("Failed to seed languages");
        folio_server::seed::ensure_indexes(&db).await;

        let app_config = AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                request_timeout_secs: 10,
                cors: CorsConfig {
                    allow_origins: vec![],
                    max_age: 3600,
                },
            },
            database: DatabaseConfig {
                url: "sqlite::memory:".to_string(),
                max_connections: 1,
                sqlx_logging: false,
            },
            i18n,
        };

        let state = AppState {
            db: db.clone(),
            config: Arc::new(app_config),
        };

        let app = folio_server::build_router(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            client: Client::new(),
            db,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        let res = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to send GET request");

        TestResponse::from_response(res).await
    }

    pub async fn get_with_language(&self, path: &str, accept_language: &str) -> TestResponse {
        let res = self
            .client
            .get(self.url(path))
            .header("Accept-Language", accept_language)
            .send()
            .await
            .expect("Failed to send GET request");

        TestResponse::from_response(res).await
    }

    pub async fn post(&self, path: &str, body: &Value) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to send POST request");

        TestResponse::from_response(res).await
    }

    pub async fn patch(&self, path: &str, body: &Value) -> TestResponse {
        let res = self
            .client
            .patch(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to send PATCH request");

        TestResponse::from_response(res).await
    }

    pub async fn put(&self, path: &str, body: &Value) -> TestResponse {
        let res = self
            .client
            .put(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to send PUT request");

        TestResponse::from_response(res).await
    }

    pub async fn delete(&self, path: &str) -> TestResponse {
        let res = self
            .client
            .delete(self.url(path))
            .send()
            .await
            .expect("Failed to send DELETE request");

        TestResponse::from_response(res).await
    }

    /// Create a user and return their id.
    pub async fn create_user(&self, username: &str) -> i32 {
        let res = self
            .post(routes::USERS, &json!({ "username": username }))
            .await;
        assert_eq!(res.status, 201, "create user failed: {}", res.text);
        res.id()
    }

    /// Create the education row used across tests: MIT, with an English
    /// translation only. Returns its id.
    pub async fn create_mit_education(&self, user_id: i32) -> i32 {
        let res = self
            .post(
                &routes::kind("education"),
                &json!({
                    "user_id": user_id,
                    "institution": "MIT",
                    "start_date": "2015-09-01",
                    "end_date": "2019-06-01",
                    "translations": {
                        "en": { "degree": "BSc", "field_of_study": "Computer Science" }
                    }
                }),
            )
            .await;
        assert_eq!(res.status, 201, "create education failed: {}", res.text);
        res.id()
    }
}

impl TestResponse {
    pub async fn from_response(res: reqwest::Response) -> Self {
        let status = res.status().as_u16();
        let text = res.text().await.expect("Failed to read response body");
        let body = serde_json::from_str(&text).unwrap_or(Value::Null);
        Self { status, text, body }
    }

    /// The `id` field of a created resource.
    pub fn id(&self) -> i32 {
        self.body["id"]
            .as_i64()
            .unwrap_or_else(|| panic!("response has no id: {}", self.text)) as i32
    }

    /// Items of a `{ "data": [...] }` list response.
    pub fn data(&self) -> &Vec<Value> {
        self.body["data"]
            .as_array()
            .unwrap_or_else(|| panic!("response has no data array: {}", self.text))
    }
}
