//! End-to-end tests for registration, login, and OTP flows

mod helpers;

use reqwest::StatusCode;
use serde_json::Value;
use serial_test::serial;

use helpers::{test_data, TestContext};

#[tokio::test]
#[serial]
async fn test_register_login_and_profile_flow() {
    let ctx = TestContext::new().await.expect("test context");
    
    let payload = test_data::register_payload("user");
    let email = payload["email"].as_str().unwrap().to_string();
    
    let (status, body) = ctx.register(&payload).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["email"], email.as_str());
    assert_eq!(body["role"], "user");
    assert!(body.get("password_hash").is_none(), "hash must never leave the service");
    
    // Role-gated login: correct password, wrong portal
    let response = ctx.client
        .post(ctx.url("/api/auth/login"))
        .json(&test_data::login_payload(&email, test_data::TEST_PASSWORD, "partner"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    
    // Wrong password
    let response = ctx.client
        .post(ctx.url("/api/auth/login"))
        .json(&test_data::login_payload(&email, "wrong password!", "user"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    
    // Correct login
    let token = ctx.login(&email, test_data::TEST_PASSWORD, "user").await;
    
    // Authenticated profile fetch
    let response = ctx.client
        .get(ctx.url("/api/users/me"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let profile: Value = response.json().await.unwrap();
    assert_eq!(profile["email"], email.as_str());
    
    // No token, no profile
    let response = ctx.client
        .get(ctx.url("/api/users/me"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[serial]
async fn test_duplicate_email_is_conflict() {
    let ctx = TestContext::new().await.expect("test context");
    
    let payload = test_data::register_payload("user");
    let (status, _) = ctx.register(&payload).await;
    assert_eq!(status, StatusCode::CREATED);
    
    let (status, body) = ctx.register(&payload).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "email_taken");
}

#[tokio::test]
#[serial]
async fn test_email_is_normalized_before_uniqueness_check() {
    let ctx = TestContext::new().await.expect("test context");
    
    let mut payload = test_data::register_payload("user");
    let email = payload["email"].as_str().unwrap().to_string();
    let (status, _) = ctx.register(&payload).await;
    assert_eq!(status, StatusCode::CREATED);
    
    payload["email"] = Value::String(email.to_uppercase());
    let (status, _) = ctx.register(&payload).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
#[serial]
async fn test_partner_registration_carries_company_details() {
    let ctx = TestContext::new().await.expect("test context");

    let payload = test_data::register_payload("partner");
    let (status, body) = ctx.register(&payload).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["role"], "partner");
    assert_eq!(body["partner_details"]["company_name"], payload["company_name"]);
    assert_eq!(body["partner_details"]["is_verified"], false);
    let partner_id = body["id"].as_i64().unwrap();

    // A partner without a company name is rejected
    let mut incomplete = test_data::register_payload("partner");
    incomplete.as_object_mut().unwrap().remove("company_name");
    let (status, _) = ctx.register(&incomplete).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // An admin can verify the partner account
    let (admin_token, _, _) = ctx.create_admin().await;
    let response = ctx.client
        .post(ctx.url(&format!("/api/users/{}/partner/verify", partner_id)))
        .bearer_auth(&admin_token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let details: Value = response.json().await.unwrap();
    assert_eq!(details["is_verified"], true);

    // Verification shows up on the partner profile
    let email = payload["email"].as_str().unwrap();
    let partner_token = ctx.login(email, test_data::TEST_PASSWORD, "partner").await;
    let response = ctx.client
        .get(ctx.url("/api/users/me"))
        .bearer_auth(&partner_token)
        .send()
        .await
        .unwrap();
    let profile: Value = response.json().await.unwrap();
    assert_eq!(profile["partner_details"]["is_verified"], true);
}

#[tokio::test]
#[serial]
async fn test_admin_accounts_cannot_self_register() {
    let ctx = TestContext::new().await.expect("test context");
    
    let payload = test_data::register_payload("admin");
    let (status, body) = ctx.register(&payload).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["code"], "permission_denied");
}

#[tokio::test]
#[serial]
async fn test_weak_password_rejected() {
    let ctx = TestContext::new().await.expect("test context");
    
    let mut payload = test_data::register_payload("user");
    payload["password"] = Value::String("short".to_string());
    let (status, body) = ctx.register(&payload).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "invalid_input");
}

#[tokio::test]
#[serial]
async fn test_otp_login_flow() {
    let ctx = TestContext::new().await.expect("test context");
    
    let (_, _, email) = ctx.register_and_login("user").await;
    
    // Request a code; delivery goes through the mocked mail API
    let response = ctx.client
        .post(ctx.url("/api/auth/otp/request"))
        .json(&serde_json::json!({ "email": email }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::ACCEPTED);
    assert_eq!(ctx.mail_mock.send_count().await, 1);
    
    let code = ctx.database.get_otp_code(&email).await.unwrap()
        .expect("a code should be stored");
    assert_eq!(code.len(), 6);
    
    // Verify the code and use the issued token
    let response = ctx.client
        .post(ctx.url("/api/auth/otp/verify"))
        .json(&serde_json::json!({ "email": email, "code": code }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    let token = body["token"].as_str().unwrap();
    
    let response = ctx.client
        .get(ctx.url("/api/users/me"))
        .bearer_auth(token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    
    // The code was consumed; replaying it fails
    let response = ctx.client
        .post(ctx.url("/api/auth/otp/verify"))
        .json(&serde_json::json!({ "email": email, "code": code }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[serial]
async fn test_expired_otp_rejected() {
    let ctx = TestContext::new().await.expect("test context");
    
    let (_, _, email) = ctx.register_and_login("user").await;
    
    let response = ctx.client
        .post(ctx.url("/api/auth/otp/request"))
        .json(&serde_json::json!({ "email": email }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::ACCEPTED);
    
    let code = ctx.database.get_otp_code(&email).await.unwrap().unwrap();
    ctx.database.expire_otp(&email).await.unwrap();
    
    let response = ctx.client
        .post(ctx.url("/api/auth/otp/verify"))
        .json(&serde_json::json!({ "email": email, "code": code }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[serial]
async fn test_otp_request_for_unknown_email_does_not_leak() {
    let ctx = TestContext::new().await.expect("test context");
    
    // Unknown address: same outward response, no mail sent
    let response = ctx.client
        .post(ctx.url("/api/auth/otp/request"))
        .json(&serde_json::json!({ "email": test_data::unique_email("ghost") }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::ACCEPTED);
    assert_eq!(ctx.mail_mock.send_count().await, 0);
}

#[tokio::test]
#[serial]
async fn test_wrong_otp_code_rejected_without_side_effects() {
    let ctx = TestContext::new().await.expect("test context");
    
    let (_, _, email) = ctx.register_and_login("user").await;
    
    ctx.client
        .post(ctx.url("/api/auth/otp/request"))
        .json(&serde_json::json!({ "email": email }))
        .send()
        .await
        .unwrap();
    
    let response = ctx.client
        .post(ctx.url("/api/auth/otp/verify"))
        .json(&serde_json::json!({ "email": email, "code": "000000x" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    
    // The stored code survives a failed attempt
    assert!(ctx.database.get_otp_code(&email).await.unwrap().is_some());
}

#[tokio::test]
#[serial]
async fn test_otp_request_surfaces_mail_outage() {
    let ctx = TestContext::new().await.expect("test context");

    let (_, _, email) = ctx.register_and_login("user").await;

    // Swap the happy-path mock for a provider outage
    ctx.mail_mock.server.reset().await;
    ctx.mail_mock.mock_send_failure().await;

    let response = ctx.client
        .post(ctx.url("/api/auth/otp/request"))
        .json(&serde_json::json!({ "email": email }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"]["code"], "mail_error");
}

#[tokio::test]
#[serial]
async fn test_otp_requests_are_rate_limited() {
    let ctx = TestContext::new_with(|settings| {
        settings.rate_limit.max_requests = 2;
        settings.rate_limit.burst_allowance = 0;
    })
    .await
    .expect("test context");
    
    let (_, _, email) = ctx.register_and_login("user").await;
    let body = serde_json::json!({ "email": email });
    
    for _ in 0..2 {
        let response = ctx.client
            .post(ctx.url("/api/auth/otp/request"))
            .json(&body)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::ACCEPTED);
    }
    
    let response = ctx.client
        .post(ctx.url("/api/auth/otp/request"))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
}
