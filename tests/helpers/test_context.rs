//! Test context for unified test setup
//! 
//! This module provides a unified test context that boots the full
//! application (router, services, database, mocked mail API) on an
//! ephemeral port and exposes an HTTP client against it.

use reqwest::{Client, StatusCode};
use serde_json::Value;

use TurfBook::config::Settings;
use TurfBook::database::DatabaseService;
use TurfBook::handlers;
use TurfBook::middleware::rate_limit::{RateLimitConfig, RateLimitMiddleware};
use TurfBook::services::ServiceFactory;
use TurfBook::state::AppState;

use super::database_helper::TestDatabase;
use super::mail_mock::MailMockServer;
use super::test_data;

/// Unified test context that manages all test components
pub struct TestContext {
    pub database: TestDatabase,
    pub mail_mock: MailMockServer,
    pub settings: Settings,
    pub services: ServiceFactory,
    pub base_url: String,
    pub client: Client,
}

impl TestContext {
    /// Create a new test context with default settings
    pub async fn new() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        Self::new_with(|_| {}).await
    }

    /// Create a new test context, letting the caller adjust settings first
    pub async fn new_with(
        adjust: impl FnOnce(&mut Settings),
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let database = TestDatabase::new().await?;
        
        let mail_mock = MailMockServer::new().await;
        mail_mock.mock_send_success().await;

        let mut settings = Settings::default();
        settings.database.url = database.database_url.clone();
        settings.jwt.secret = "integration-test-secret-0123456789ab".to_string();
        settings.mail.enabled = true;
        settings.mail.api_url = mail_mock.api_url();
        settings.mail.api_key = "test-key".to_string();
        // Generous limit so unrelated tests never trip it; rate limit tests
        // tighten this through the adjust hook.
        settings.rate_limit.max_requests = 1000;
        adjust(&mut settings);
        settings.validate()?;

        let database_service = DatabaseService::new(database.pool.clone());
        let services = ServiceFactory::new(settings.clone(), database_service)?;
        let rate_limiter =
            RateLimitMiddleware::new(RateLimitConfig::from_settings(&settings.rate_limit));

        let state = AppState {
            settings: settings.clone(),
            db: database.pool.clone(),
            services: services.clone(),
            rate_limiter,
        };

        let app = handlers::build_router(state);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self {
            database,
            mail_mock,
            settings,
            services,
            base_url: format!("http://{}", addr),
            client: Client::new(),
        })
    }

    /// Build a full URL for an API path
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Register an account through the API, returning the response JSON
    pub async fn register(&self, payload: &Value) -> (StatusCode, Value) {
        let response = self.client
            .post(self.url("/api/auth/register"))
            .json(payload)
            .send()
            .await
            .expect("register request failed");
        
        let status = response.status();
        let body = response.json().await.unwrap_or(Value::Null);
        (status, body)
    }

    /// Log in through the API, returning the bearer token
    pub async fn login(&self, email: &str, password: &str, role: &str) -> String {
        let response = self.client
            .post(self.url("/api/auth/login"))
            .json(&test_data::login_payload(email, password, role))
            .send()
            .await
            .expect("login request failed");
        
        assert_eq!(response.status(), StatusCode::OK, "login should succeed");
        let body: Value = response.json().await.expect("login response body");
        body["token"].as_str().expect("token in login response").to_string()
    }

    /// Register a fresh account and log in, returning (token, user_id, email)
    pub async fn register_and_login(&self, role: &str) -> (String, i64, String) {
        let payload = test_data::register_payload(role);
        let email = payload["email"].as_str().unwrap().to_string();
        
        let (status, body) = self.register(&payload).await;
        assert_eq!(status, StatusCode::CREATED, "registration should succeed: {body}");
        let user_id = body["id"].as_i64().expect("user id in register response");
        
        let token = self.login(&email, test_data::TEST_PASSWORD, role).await;
        (token, user_id, email)
    }

    /// Create an admin account directly (admins are never self-registered)
    pub async fn create_admin(&self) -> (String, i64, String) {
        let email = test_data::unique_email("admin");
        let password_hash = self.services.auth_service
            .hash_password(test_data::TEST_PASSWORD)
            .expect("hash admin password");
        
        let user_id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO users (name, email, password_hash, role)
            VALUES ($1, $2, $3, 'admin')
            RETURNING id
            "#
        )
        .bind("Test Admin")
        .bind(&email)
        .bind(&password_hash)
        .fetch_one(&self.database.pool)
        .await
        .expect("insert admin");
        
        let token = self.login(&email, test_data::TEST_PASSWORD, "admin").await;
        (token, user_id, email)
    }
}
