//! Mock mail API server for testing
//! 
//! This module provides a mock HTTP server that simulates the transactional
//! mail API the mailer service talks to. It uses wiremock to create
//! configurable mock responses.

use serde_json::json;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

/// Mock mail API server for testing
pub struct MailMockServer {
    pub server: MockServer,
}

impl MailMockServer {
    /// Create a new mock mail API server
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        Self { server }
    }

    /// Base URL the mailer service should be pointed at
    pub fn api_url(&self) -> String {
        self.server.uri()
    }

    /// Accept every send request with a successful response
    pub async fn mock_send_success(&self) {
        Mock::given(method("POST"))
            .and(path("/send"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "ok": true,
                "message_id": "msg-test-0001",
                "error": null,
            })))
            .mount(&self.server)
            .await;
    }

    /// Simulate a mail provider outage
    pub async fn mock_send_failure(&self) {
        Mock::given(method("POST"))
            .and(path("/send"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&self.server)
            .await;
    }

    /// Number of send requests received so far
    pub async fn send_count(&self) -> usize {
        self.server
            .received_requests()
            .await
            .map(|reqs| reqs.iter().filter(|r| r.url.path() == "/send").count())
            .unwrap_or(0)
    }
}
